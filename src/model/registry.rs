use std::collections::HashMap;

use super::{
    entities::{Commodity, CommodityID},
    error::LoadError,
};

/// Interns commodities by (namespace, symbol) so that every reference to the
/// same pair yields the same `CommodityID`.
#[derive(Debug, Clone)]
pub struct Registry {
    commodities: Vec<Commodity>,
    index: HashMap<(String, String), CommodityID>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            commodities: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn commodity_id(&mut self, space: &str, name: &str) -> CommodityID {
        if let Some(id) = self.lookup(space, name) {
            return id;
        }
        let id = CommodityID(self.commodities.len());
        self.commodities.push(Commodity {
            id,
            space: space.to_string(),
            name: name.to_string(),
        });
        self.index.insert((space.to_string(), name.to_string()), id);
        id
    }

    pub fn resolve(&self, space: &str, name: &str) -> Result<CommodityID, LoadError> {
        self.lookup(space, name)
            .ok_or_else(|| LoadError::unresolved("commodity", &format!("{}:{}", space, name)))
    }

    fn lookup(&self, space: &str, name: &str) -> Option<CommodityID> {
        self.index
            .get(&(space.to_string(), name.to_string()))
            .copied()
    }

    pub fn commodity(&self, id: CommodityID) -> &Commodity {
        &self.commodities[id.0]
    }

    pub fn commodity_name(&self, id: CommodityID) -> &str {
        &self.commodity(id).name
    }

    pub fn commodities(&self) -> &[Commodity] {
        &self.commodities
    }

    pub fn len(&self) -> usize {
        self.commodities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commodities.is_empty()
    }
}
