//! Owner (customer) collection

use super::{Database, Record};
use crate::error::Result;
use crate::models::Owner;

/// Shown in place of an owner that no longer exists
pub const UNKNOWN_OWNER: &str = "Desconhecido";

impl Record for Owner {
    const KEY: &'static str = "wj_owners";
    const NAME: &'static str = "owner";

    fn id(&self) -> &str {
        &self.id
    }

    fn seed() -> Vec<Self> {
        vec![Owner {
            id: "1".to_string(),
            name: "João Silva".to_string(),
            document: "123.456.789-00".to_string(),
            phone: "(11) 98888-7777".to_string(),
            email: "joao@email.com".to_string(),
            address: "Rua das Flores, 123".to_string(),
        }]
    }
}

impl Database {
    pub fn get_owners(&self) -> Result<Vec<Owner>> {
        self.get_all()
    }

    pub fn get_owner(&self, id: &str) -> Result<Option<Owner>> {
        self.find(id)
    }

    pub fn save_owner(&self, owner: &Owner) -> Result<()> {
        self.upsert(owner)
    }

    pub fn delete_owner(&self, id: &str) -> Result<bool> {
        self.delete::<Owner>(id)
    }

    /// Owners whose name (case-insensitive), document or phone contains `query`
    pub fn search_owners(&self, query: &str) -> Result<Vec<Owner>> {
        let needle = query.to_lowercase();
        Ok(self
            .get_owners()?
            .into_iter()
            .filter(|o| {
                o.name.to_lowercase().contains(&needle)
                    || o.document.contains(query)
                    || o.phone.contains(query)
            })
            .collect())
    }

    /// Resolve a weak owner reference to a display name
    pub fn owner_name_or_unknown(&self, owner_id: &str) -> Result<String> {
        Ok(self
            .get_owner(owner_id)?
            .map(|o| o.name)
            .unwrap_or_else(|| UNKNOWN_OWNER.to_string()))
    }
}
