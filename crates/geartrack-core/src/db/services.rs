//! Service order collection

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{index_by_id, Database, Record};
use crate::error::Result;
use crate::models::{ServiceOrder, ServiceStatus};

impl Record for ServiceOrder {
    const KEY: &'static str = "wj_services";
    const NAME: &'static str = "service order";

    fn id(&self) -> &str {
        &self.id
    }

    fn seed() -> Vec<Self> {
        vec![ServiceOrder {
            id: "1".to_string(),
            vehicle_id: "1".to_string(),
            service_type: "Troca de Óleo de Câmbio".to_string(),
            description: "Troca preventiva de fluído e filtro do câmbio CVT.".to_string(),
            entry_date: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap_or_default(),
            exit_date: NaiveDate::from_ymd_opt(2023, 10, 2),
            status: ServiceStatus::Finished,
            value: Decimal::new(120000, 2),
            payment_method: None,
        }]
    }
}

impl Database {
    pub fn get_services(&self) -> Result<Vec<ServiceOrder>> {
        self.get_all()
    }

    pub fn get_service(&self, id: &str) -> Result<Option<ServiceOrder>> {
        self.find(id)
    }

    pub fn save_service(&self, service: &ServiceOrder) -> Result<()> {
        self.upsert(service)
    }

    pub fn delete_service(&self, id: &str) -> Result<bool> {
        self.delete::<ServiceOrder>(id)
    }

    /// Service orders whose type, description or vehicle plate contains
    /// `query` (case-insensitive)
    pub fn search_services(&self, query: &str) -> Result<Vec<ServiceOrder>> {
        let needle = query.to_lowercase();
        let vehicles = self.get_vehicles()?;
        let by_id = index_by_id(&vehicles);

        Ok(self
            .get_services()?
            .into_iter()
            .filter(|s| {
                let plate_matches = by_id
                    .get(s.vehicle_id.as_str())
                    .is_some_and(|v| v.plate.to_lowercase().contains(&needle));
                s.service_type.to_lowercase().contains(&needle)
                    || plate_matches
                    || s.description.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Service orders for one vehicle, most recent entry first
    pub fn services_for_vehicle(&self, vehicle_id: &str) -> Result<Vec<ServiceOrder>> {
        let mut services: Vec<ServiceOrder> = self
            .get_services()?
            .into_iter()
            .filter(|s| s.vehicle_id == vehicle_id)
            .collect();
        services.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));
        Ok(services)
    }
}
