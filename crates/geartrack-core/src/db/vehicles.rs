//! Vehicle collection

use super::{Database, Record};
use crate::error::Result;
use crate::models::{GearboxType, Vehicle};

/// Shown in place of a vehicle that no longer exists
pub const UNKNOWN_VEHICLE: &str = "N/A";

impl Record for Vehicle {
    const KEY: &'static str = "wj_vehicles";
    const NAME: &'static str = "vehicle";

    fn id(&self) -> &str {
        &self.id
    }

    fn seed() -> Vec<Self> {
        vec![Vehicle {
            id: "1".to_string(),
            plate: "ABC-1234".to_string(),
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2020,
            color: "Prata".to_string(),
            gearbox_type: GearboxType::Automatic,
            mileage: 45000,
            owner_id: "1".to_string(),
        }]
    }
}

impl Database {
    pub fn get_vehicles(&self) -> Result<Vec<Vehicle>> {
        self.get_all()
    }

    pub fn get_vehicle(&self, id: &str) -> Result<Option<Vehicle>> {
        self.find(id)
    }

    pub fn save_vehicle(&self, vehicle: &Vehicle) -> Result<()> {
        self.upsert(vehicle)
    }

    /// Service orders pointing at the vehicle are left in place
    pub fn delete_vehicle(&self, id: &str) -> Result<bool> {
        self.delete::<Vehicle>(id)
    }

    /// Vehicles whose plate, model or brand contains `query` (case-insensitive)
    pub fn search_vehicles(&self, query: &str) -> Result<Vec<Vehicle>> {
        let needle = query.to_lowercase();
        Ok(self
            .get_vehicles()?
            .into_iter()
            .filter(|v| {
                v.plate.to_lowercase().contains(&needle)
                    || v.model.to_lowercase().contains(&needle)
                    || v.brand.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Vehicles registered to an owner
    pub fn vehicles_for_owner(&self, owner_id: &str) -> Result<Vec<Vehicle>> {
        Ok(self
            .get_vehicles()?
            .into_iter()
            .filter(|v| v.owner_id == owner_id)
            .collect())
    }

    /// Resolve a weak vehicle reference to its plate
    pub fn vehicle_plate_or_unknown(&self, vehicle_id: &str) -> Result<String> {
        Ok(self
            .get_vehicle(vehicle_id)?
            .map(|v| v.plate)
            .unwrap_or_else(|| UNKNOWN_VEHICLE.to_string()))
    }
}
