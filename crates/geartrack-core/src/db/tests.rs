//! Database tests

use super::*;
use crate::error::Error;
use crate::models::*;

use chrono::NaiveDate;
use rust_decimal::Decimal;

fn owner(id: &str, name: &str) -> Owner {
    Owner {
        id: id.to_string(),
        name: name.to_string(),
        document: "987.654.321-00".to_string(),
        phone: "(21) 97777-6666".to_string(),
        email: format!("{}@email.com", id),
        address: String::new(),
    }
}

fn vehicle(id: &str, plate: &str, owner_id: &str) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        plate: plate.to_string(),
        brand: "Honda".to_string(),
        model: "Civic".to_string(),
        year: 2019,
        color: "Preto".to_string(),
        gearbox_type: GearboxType::Cvt,
        mileage: 60000,
        owner_id: owner_id.to_string(),
    }
}

fn service(id: &str, vehicle_id: &str, date: &str, status: ServiceStatus, cents: i64) -> ServiceOrder {
    ServiceOrder {
        id: id.to_string(),
        vehicle_id: vehicle_id.to_string(),
        service_type: "Retífica".to_string(),
        description: "Troca de embreagem".to_string(),
        entry_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        exit_date: None,
        status,
        value: Decimal::new(cents, 2),
        payment_method: Some(PaymentMethod::Pix),
    }
}

// ========== Seeding ==========

#[test]
fn test_empty_store_seeds_default_owner() {
    let db = Database::in_memory().unwrap();
    assert!(db.raw_value("wj_owners").unwrap().is_none());

    let owners = db.get_owners().unwrap();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].id, "1");
    assert_eq!(owners[0].name, "João Silva");

    // Persisted immediately
    let raw = db.raw_value("wj_owners").unwrap().unwrap();
    assert!(raw.contains("João Silva"));
}

#[test]
fn test_seed_defaults_creates_all_collections() {
    let db = Database::in_memory().unwrap();
    db.seed_defaults().unwrap();

    for key in ["wj_owners", "wj_vehicles", "wj_services"] {
        assert!(db.raw_value(key).unwrap().is_some(), "{} missing", key);
    }

    let vehicles = db.get_vehicles().unwrap();
    assert_eq!(vehicles[0].plate, "ABC-1234");
    assert_eq!(vehicles[0].gearbox_type, GearboxType::Automatic);

    let services = db.get_services().unwrap();
    assert_eq!(services[0].value, Decimal::new(120000, 2));
    assert_eq!(services[0].status, ServiceStatus::Finished);
    assert_eq!(services[0].exit_date, NaiveDate::from_ymd_opt(2023, 10, 2));
}

#[test]
fn test_empty_collection_is_not_reseeded() {
    let db = Database::in_memory().unwrap();
    db.delete_owner("1").unwrap();

    assert!(db.get_owners().unwrap().is_empty());
    assert_eq!(db.raw_value("wj_owners").unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_store_survives_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("shop.db");
    let path = path.to_str().unwrap();

    {
        let db = Database::new(path).unwrap();
        db.save_owner(&owner("42", "Maria Souza")).unwrap();
    }

    let db = Database::new(path).unwrap();
    let owners = db.get_owners().unwrap();
    assert_eq!(owners.len(), 2);
    assert_eq!(owners[1].name, "Maria Souza");
}

// ========== Upsert / delete ==========

#[test]
fn test_upsert_appends_then_replaces() {
    let db = Database::in_memory().unwrap();

    let mut maria = owner("42", "Maria Souza");
    db.save_owner(&maria).unwrap();

    let owners = db.get_owners().unwrap();
    assert_eq!(owners.len(), 2);
    assert_eq!(db.get_owner("42").unwrap(), Some(maria.clone()));

    maria.phone = "(21) 90000-0000".to_string();
    maria.address = "Av. Brasil, 500".to_string();
    db.save_owner(&maria).unwrap();

    let owners = db.get_owners().unwrap();
    assert_eq!(owners.len(), 2, "same id must not create a second record");
    assert_eq!(owners[1], maria);
}

#[test]
fn test_upsert_replaces_whole_record() {
    let db = Database::in_memory().unwrap();
    let mut order = service("9", "1", "2024-05-10", ServiceStatus::Repair, 50000);
    order.exit_date = NaiveDate::from_ymd_opt(2024, 5, 12);
    db.save_service(&order).unwrap();

    // Replacement without exit date or payment clears them
    let mut replacement = service("9", "1", "2024-05-10", ServiceStatus::Finished, 55000);
    replacement.payment_method = None;
    db.save_service(&replacement).unwrap();

    let stored = db.get_service("9").unwrap().unwrap();
    assert_eq!(stored, replacement);
    assert!(stored.exit_date.is_none());
    assert!(stored.payment_method.is_none());
}

#[test]
fn test_upsert_preserves_insertion_order() {
    let db = Database::in_memory().unwrap();
    db.save_owner(&owner("b", "Bruno")).unwrap();
    db.save_owner(&owner("a", "Ana")).unwrap();
    db.save_owner(&owner("b", "Bruno Lima")).unwrap();

    let ids: Vec<String> = db.get_owners().unwrap().into_iter().map(|o| o.id).collect();
    assert_eq!(ids, vec!["1", "b", "a"]);
}

#[test]
fn test_delete_removes_record() {
    let db = Database::in_memory().unwrap();
    db.save_vehicle(&vehicle("2", "XYZ-9876", "1")).unwrap();

    assert!(db.delete_vehicle("2").unwrap());
    let vehicles = db.get_vehicles().unwrap();
    assert!(vehicles.iter().all(|v| v.id != "2"));
    assert!(db.get_vehicle("2").unwrap().is_none());
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let db = Database::in_memory().unwrap();
    let before = db.get_services().unwrap();

    assert!(!db.delete_service("does-not-exist").unwrap());
    assert_eq!(db.get_services().unwrap(), before);
}

#[test]
fn test_upsert_accepts_dangling_references() {
    let db = Database::in_memory().unwrap();
    db.save_vehicle(&vehicle("3", "DEF-0001", "missing-owner")).unwrap();
    db.save_service(&service("3", "missing-vehicle", "2024-01-01", ServiceStatus::Analysis, 0))
        .unwrap();

    assert_eq!(db.owner_name_or_unknown("missing-owner").unwrap(), UNKNOWN_OWNER);
    assert_eq!(db.vehicle_plate_or_unknown("missing-vehicle").unwrap(), UNKNOWN_VEHICLE);
    assert_eq!(db.vehicle_plate_or_unknown("1").unwrap(), "ABC-1234");
}

#[test]
fn test_deleting_owner_leaves_vehicles() {
    let db = Database::in_memory().unwrap();
    db.delete_owner("1").unwrap();

    let vehicles = db.vehicles_for_owner("1").unwrap();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(db.owner_name_or_unknown("1").unwrap(), "Desconhecido");
}

// ========== Corrupt data ==========

#[test]
fn test_malformed_value_is_an_error_not_a_reseed() {
    let db = Database::in_memory().unwrap();
    db.set_raw_value("wj_vehicles", "{not json").unwrap();

    let err = db.get_vehicles().unwrap_err();
    match err {
        Error::CorruptData { key, .. } => assert_eq!(key, "wj_vehicles"),
        other => panic!("expected CorruptData, got {:?}", other),
    }

    // Writes fail too and leave the stored value alone
    assert!(db.save_vehicle(&vehicle("2", "XYZ-9876", "1")).is_err());
    assert!(db.delete_vehicle("1").is_err());
    assert_eq!(db.raw_value("wj_vehicles").unwrap().as_deref(), Some("{not json"));
}

#[test]
fn test_wrong_shape_is_corrupt() {
    let db = Database::in_memory().unwrap();
    db.set_raw_value("wj_services", r#"[{"id":"1"}]"#).unwrap();
    assert!(matches!(db.get_services(), Err(Error::CorruptData { .. })));

    // Other collections are unaffected
    assert_eq!(db.get_owners().unwrap().len(), 1);
}

#[test]
fn test_reads_records_written_by_dashboard() {
    let db = Database::in_memory().unwrap();
    db.set_raw_value(
        "wj_services",
        r#"[{"id":"1700000000000","vehicleId":"1","type":"Revisão","description":"x","entryDate":"2024-03-15","exitDate":"","status":"Em Reparo","value":350.5,"paymentMethod":""}]"#,
    )
    .unwrap();

    // An empty exitDate string is not a date; the collection is reported as corrupt
    assert!(db.get_services().is_err());

    db.set_raw_value(
        "wj_services",
        r#"[{"id":"1700000000000","vehicleId":"1","type":"Revisão","description":"x","entryDate":"2024-03-15","status":"Em Reparo","value":350.5,"paymentMethod":""}]"#,
    )
    .unwrap();
    let services = db.get_services().unwrap();
    assert_eq!(services[0].value, Decimal::new(3505, 1));
    assert_eq!(services[0].status, ServiceStatus::Repair);
    assert!(services[0].payment_method.is_none());
}

#[test]
fn test_reads_fractional_mileage() {
    let db = Database::in_memory().unwrap();
    db.set_raw_value(
        "wj_vehicles",
        r#"[{"id":"1","plate":"ABC-1234","brand":"Toyota","model":"Corolla","year":2020,"color":"Prata","gearboxType":"Automático","mileage":45000.5,"ownerId":"1"}]"#,
    )
    .unwrap();

    let vehicles = db.get_vehicles().unwrap();
    assert_eq!(vehicles[0].mileage, 45001);

    // Written back as whole kilometres
    db.save_vehicle(&vehicles[0]).unwrap();
    let raw = db.raw_value("wj_vehicles").unwrap().unwrap();
    assert!(raw.contains(r#""mileage":45001"#), "stored {}", raw);
}

// ========== Search ==========

#[test]
fn test_search_owners() {
    let db = Database::in_memory().unwrap();
    db.save_owner(&owner("2", "Maria Souza")).unwrap();

    assert_eq!(db.search_owners("joão").unwrap().len(), 1);
    assert_eq!(db.search_owners("SOUZA").unwrap()[0].id, "2");
    assert_eq!(db.search_owners("123.456").unwrap()[0].id, "1");
    assert_eq!(db.search_owners("97777").unwrap()[0].id, "2");
    assert_eq!(db.search_owners("").unwrap().len(), 2);
    assert!(db.search_owners("zzz").unwrap().is_empty());
}

#[test]
fn test_search_vehicles() {
    let db = Database::in_memory().unwrap();
    db.save_vehicle(&vehicle("2", "XYZ-9876", "1")).unwrap();

    assert_eq!(db.search_vehicles("abc").unwrap()[0].id, "1");
    assert_eq!(db.search_vehicles("civic").unwrap()[0].id, "2");
    assert_eq!(db.search_vehicles("TOYOTA").unwrap()[0].id, "1");
}

#[test]
fn test_search_services_by_plate() {
    let db = Database::in_memory().unwrap();
    db.save_service(&service("2", "ghost", "2024-02-01", ServiceStatus::Analysis, 0))
        .unwrap();

    let by_plate = db.search_services("abc-1234").unwrap();
    assert_eq!(by_plate.len(), 1);
    assert_eq!(by_plate[0].id, "1");

    assert_eq!(db.search_services("embreagem").unwrap()[0].id, "2");
    assert_eq!(db.search_services("óleo").unwrap()[0].id, "1");
}

#[test]
fn test_services_for_vehicle_newest_first() {
    let db = Database::in_memory().unwrap();
    db.save_service(&service("2", "1", "2024-02-01", ServiceStatus::Finished, 100))
        .unwrap();
    db.save_service(&service("3", "2", "2024-03-01", ServiceStatus::Finished, 100))
        .unwrap();

    let ids: Vec<String> = db
        .services_for_vehicle("1")
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec!["2", "1"]);
}

// ========== Dashboard ==========

#[test]
fn test_dashboard_stats() {
    let db = Database::in_memory().unwrap();
    db.save_service(&service("2", "1", "2024-01-10", ServiceStatus::Analysis, 10000))
        .unwrap();
    db.save_service(&service("3", "1", "2024-02-10", ServiceStatus::Repair, 20000))
        .unwrap();
    db.save_service(&service("4", "ghost", "2024-03-10", ServiceStatus::Finished, 30000))
        .unwrap();
    db.save_service(&service("5", "1", "2022-03-10", ServiceStatus::Cancelled, 99900))
        .unwrap();

    let stats = db.get_dashboard_stats(3).unwrap();
    assert_eq!(stats.total_owners, 1);
    assert_eq!(stats.total_vehicles, 1);
    assert_eq!(stats.active_services, 2);
    // Seed order (1200.00) plus order 4 (300.00)
    assert_eq!(stats.total_revenue, Decimal::new(150000, 2));

    let recent: Vec<(&str, &str)> = stats
        .recent_services
        .iter()
        .map(|r| (r.service.id.as_str(), r.plate.as_str()))
        .collect();
    assert_eq!(recent, vec![("4", "N/A"), ("3", "ABC-1234"), ("2", "ABC-1234")]);
}

fn finished_json(id: &str, date: &str, value: &str) -> String {
    format!(
        r#"{{"id":"{}","vehicleId":"1","type":"Retífica","description":"","entryDate":"{}","status":"Finalizado","value":{}}}"#,
        id, date, value
    )
}

#[test]
fn test_dashboard_huge_revenue() {
    let db = Database::in_memory().unwrap();
    db.set_raw_value(
        "wj_services",
        &format!("[{}]", finished_json("1", "2024-05-05", "1e27")),
    )
    .unwrap();

    let stats = db.get_dashboard_stats(5).unwrap();
    assert_eq!(stats.total_revenue, Decimal::from_scientific("1e27").unwrap());
}

#[test]
fn test_dashboard_revenue_overflow_is_an_error() {
    let db = Database::in_memory().unwrap();
    db.set_raw_value(
        "wj_services",
        &format!(
            "[{},{}]",
            finished_json("1", "2024-05-05", "5e28"),
            finished_json("2", "2023-05-05", "5e28")
        ),
    )
    .unwrap();

    // Each order decodes on its own
    assert_eq!(db.get_services().unwrap().len(), 2);
    assert!(matches!(
        db.get_dashboard_stats(5),
        Err(Error::InvalidData(_))
    ));
}

#[test]
fn test_index_by_id() {
    let owners = vec![owner("a", "Ana"), owner("b", "Bruno")];
    let index = index_by_id(&owners);
    assert_eq!(index.get("b").map(|o| o.name.as_str()), Some("Bruno"));
    assert!(index.get("c").is_none());
}
