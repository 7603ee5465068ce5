//! Dashboard overview

use rust_decimal::Decimal;

use super::{index_by_id, Database, UNKNOWN_VEHICLE};
use crate::error::{Error, Result};
use crate::models::{DashboardStats, RecentService};

impl Database {
    /// Counts, finished revenue and the `recent_limit` latest service orders
    pub fn get_dashboard_stats(&self, recent_limit: usize) -> Result<DashboardStats> {
        let owners = self.get_owners()?;
        let vehicles = self.get_vehicles()?;
        let mut services = self.get_services()?;

        let total_revenue = services
            .iter()
            .filter(|s| s.is_finished())
            .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(s.value))
            .ok_or_else(|| {
                Error::InvalidData(
                    "Finished revenue overflows the supported money range".to_string(),
                )
            })?;
        let active_services = services.iter().filter(|s| s.is_active()).count();

        // Stable sort keeps insertion order among orders entered the same day
        services.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));

        let plates = index_by_id(&vehicles);
        let recent_services = services
            .into_iter()
            .take(recent_limit)
            .map(|service| {
                let plate = plates
                    .get(service.vehicle_id.as_str())
                    .map(|v| v.plate.clone())
                    .unwrap_or_else(|| UNKNOWN_VEHICLE.to_string());
                RecentService { service, plate }
            })
            .collect();

        Ok(DashboardStats {
            total_owners: owners.len(),
            total_vehicles: vehicles.len(),
            active_services,
            total_revenue,
            recent_services,
        })
    }
}
