//! Export functionality for revenue reports and full store snapshots
//!
//! Supports:
//! - Report export as `;`-delimited, BOM-prefixed CSV for spreadsheet tools
//! - Full JSON snapshot export/import of the three collections

use std::path::{Path, PathBuf};

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::format::{format_decimal_comma, format_share};
use crate::models::{Bucket, Consolidation, Owner, ServiceOrder, Vehicle, ViewType};

/// Content type declared for report exports
pub const EXPORT_CONTENT_TYPE: &str = "text/csv;charset=utf-8;";

/// Byte-order mark so spreadsheet tools pick UTF-8
pub const UTF8_BOM: char = '\u{feff}';

/// Column titles of the report export
pub const REPORT_HEADER: [&str; 4] = [
    "Period",
    "Service Volume",
    "Gross Revenue (R$)",
    "Share of Total (%)",
];

/// Serialize buckets into the report CSV payload, BOM included
pub fn export_report_csv(buckets: &[Bucket], total_value: Decimal) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(REPORT_HEADER)?;
    for bucket in buckets {
        writer.write_record([
            bucket.label.clone(),
            bucket.count.to_string(),
            format_decimal_comma(bucket.value, 2),
            format_share(bucket.share_percent, total_value),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    let body = String::from_utf8(bytes)
        .map_err(|e| Error::InvalidData(format!("CSV output is not UTF-8: {}", e)))?;

    let mut payload = String::with_capacity(body.len() + UTF8_BOM.len_utf8());
    payload.push(UTF8_BOM);
    payload.push_str(&body);
    Ok(payload)
}

/// `Report_<view>_<year>.csv`, or `Report_annual_Historical.csv`
pub fn report_file_name(view: ViewType, selected_year: i32) -> String {
    match view {
        ViewType::Annual => format!("Report_{}_Historical.csv", view.as_str()),
        _ => format!("Report_{}_{}.csv", view.as_str(), selected_year),
    }
}

/// Write a consolidation's CSV into `dir`, returning the file path
pub fn write_report(dir: &Path, report: &Consolidation) -> Result<PathBuf> {
    let payload = export_report_csv(&report.buckets, report.total_value)?;
    let file_name = report_file_name(report.view, report.year.unwrap_or_default());

    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, payload)?;

    info!(
        "Wrote {} report ({}) to {}",
        report.view,
        EXPORT_CONTENT_TYPE,
        path.display()
    );
    Ok(path)
}

/// Snapshot metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Application version that created the snapshot
    pub version: String,
    /// When the snapshot was created
    pub created_at: String,
    pub total_records: usize,
}

/// Full store snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub metadata: SnapshotMetadata,
    pub owners: Vec<Owner>,
    pub vehicles: Vec<Vehicle>,
    pub services: Vec<ServiceOrder>,
}

/// Records written by a snapshot import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotImportStats {
    pub owners: usize,
    pub vehicles: usize,
    pub services: usize,
}

impl SnapshotImportStats {
    pub fn total(&self) -> usize {
        self.owners + self.vehicles + self.services
    }
}

impl Database {
    /// Export all three collections
    pub fn export_snapshot(&self) -> Result<Snapshot> {
        let owners = self.get_owners()?;
        let vehicles = self.get_vehicles()?;
        let services = self.get_services()?;

        Ok(Snapshot {
            metadata: SnapshotMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                created_at: Utc::now().to_rfc3339(),
                total_records: owners.len() + vehicles.len() + services.len(),
            },
            owners,
            vehicles,
            services,
        })
    }

    /// Restore a snapshot.
    ///
    /// With `replace` each collection is overwritten as a whole; otherwise
    /// every record is upserted by id into what is already stored.
    pub fn import_snapshot(&self, snapshot: &Snapshot, replace: bool) -> Result<SnapshotImportStats> {
        if replace {
            self.replace_all(&snapshot.owners)?;
            self.replace_all(&snapshot.vehicles)?;
            self.replace_all(&snapshot.services)?;
        } else {
            for owner in &snapshot.owners {
                self.upsert(owner)?;
            }
            for vehicle in &snapshot.vehicles {
                self.upsert(vehicle)?;
            }
            for service in &snapshot.services {
                self.upsert(service)?;
            }
        }

        let stats = SnapshotImportStats {
            owners: snapshot.owners.len(),
            vehicles: snapshot.vehicles.len(),
            services: snapshot.services.len(),
        };
        info!(
            "Imported snapshot from {} ({} records)",
            snapshot.metadata.created_at,
            stats.total()
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GearboxType, ServiceStatus};
    use crate::reports::consolidate;
    use chrono::NaiveDate;

    fn finished(id: &str, date: (i32, u32, u32), value: i64) -> ServiceOrder {
        ServiceOrder {
            id: id.to_string(),
            vehicle_id: "1".to_string(),
            service_type: "Retífica".to_string(),
            description: String::new(),
            entry_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            exit_date: None,
            status: ServiceStatus::Finished,
            value: Decimal::new(value, 2),
            payment_method: None,
        }
    }

    fn lines(payload: &str) -> Vec<&str> {
        payload.trim_start_matches(UTF8_BOM).lines().collect()
    }

    #[test]
    fn test_annual_export_rows() {
        let orders = vec![
            finished("1", (2023, 10, 1), 120000),
            finished("2", (2024, 3, 15), 80000),
        ];
        let report = consolidate(&orders, ViewType::Annual, 2024).unwrap();
        let payload = export_report_csv(&report.buckets, report.total_value).unwrap();

        assert!(payload.starts_with('\u{feff}'));
        assert_eq!(EXPORT_CONTENT_TYPE, "text/csv;charset=utf-8;");
        assert_eq!(
            lines(&payload),
            vec![
                "Period;Service Volume;Gross Revenue (R$);Share of Total (%)",
                "2024;1;800,00;40,0",
                "2023;1;1200,00;60,0",
            ]
        );
        assert!(payload.ends_with('\n'));
        assert!(!payload.contains('\r'));
    }

    #[test]
    fn test_empty_total_exports_zero_shares() {
        let report = consolidate(&[], ViewType::Quarterly, 2024).unwrap();
        let payload = export_report_csv(&report.buckets, report.total_value).unwrap();
        let rows = lines(&payload);

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[1], "1st Quarter (Jan-Mar);0;0,00;0");
        assert_eq!(rows[4], "4th Quarter (Oct-Dec);0;0,00;0");
    }

    #[test]
    fn test_no_thousands_separator_in_revenue() {
        let orders = vec![finished("1", (2024, 2, 2), 123456789)];
        let report = consolidate(&orders, ViewType::Monthly, 2024).unwrap();
        let payload = export_report_csv(&report.buckets, report.total_value).unwrap();

        assert!(lines(&payload).contains(&"Feb;1;1234567,89;100,0"));
    }

    #[test]
    fn test_huge_order_exports_full_share() {
        let mut order = finished("1", (2024, 7, 7), 0);
        order.value = Decimal::from_scientific("1e27").unwrap();
        let report = consolidate(&[order], ViewType::Quarterly, 2024).unwrap();
        let payload = export_report_csv(&report.buckets, report.total_value).unwrap();

        let row = lines(&payload)[3];
        assert!(row.starts_with("3rd Quarter (Jul-Sep);1;1000000000000000000000000000,"));
        assert!(row.ends_with(";100,0"), "row was {}", row);
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(
            report_file_name(ViewType::Monthly, 2023),
            "Report_monthly_2023.csv"
        );
        assert_eq!(
            report_file_name(ViewType::Quarterly, 2024),
            "Report_quarterly_2024.csv"
        );
        assert_eq!(
            report_file_name(ViewType::Annual, 2024),
            "Report_annual_Historical.csv"
        );
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let orders = vec![finished("1", (2023, 10, 1), 120000)];
        let report = consolidate(&orders, ViewType::Monthly, 2023).unwrap();

        let path = write_report(&dir.path().join("reports"), &report).unwrap();
        assert!(path.ends_with("Report_monthly_2023.csv"));

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with('\u{feff}'));
        assert!(lines(&written).contains(&"Oct;1;1200,00;100,0"));
    }

    #[test]
    fn test_snapshot_round_trip_replace() {
        let source = Database::in_memory().unwrap();
        source
            .save_vehicle(&Vehicle {
                id: "v2".to_string(),
                plate: "XYZ-9876".to_string(),
                model: "Golf".to_string(),
                brand: "VW".to_string(),
                year: 2019,
                color: "Cinza".to_string(),
                mileage: 80000,
                gearbox_type: GearboxType::DualClutch,
                owner_id: "1".to_string(),
            })
            .unwrap();
        let snapshot = source.export_snapshot().unwrap();
        assert_eq!(snapshot.metadata.total_records, 4);

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();

        let target = Database::in_memory().unwrap();
        let stats = target.import_snapshot(&parsed, true).unwrap();

        assert_eq!(stats.total(), 4);
        assert_eq!(target.get_owners().unwrap(), source.get_owners().unwrap());
        assert_eq!(target.get_vehicles().unwrap().len(), 2);
        assert_eq!(target.get_services().unwrap(), source.get_services().unwrap());
    }

    #[test]
    fn test_snapshot_merge_upserts() {
        let db = Database::in_memory().unwrap();
        let mut snapshot = db.export_snapshot().unwrap();
        snapshot.owners[0].name = "João S.".to_string();
        snapshot.owners.push(Owner {
            id: "2".to_string(),
            name: "Maria".to_string(),
            ..snapshot.owners[0].clone()
        });

        db.import_snapshot(&snapshot, false).unwrap();

        let owners = db.get_owners().unwrap();
        assert_eq!(owners.len(), 2);
        assert_eq!(owners[0].name, "João S.");
        assert_eq!(owners[1].name, "Maria");
    }
}
