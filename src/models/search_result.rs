use serde::{Deserialize, Serialize};

use crate::models::product_record::ProductRecord;

/// Body of a product search response. Records keep the API's order.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SearchResult {
    #[serde(default)]
    pub data: Vec<ProductRecord>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Product IDs of every record that carries one, in result order.
    pub fn product_ids(&self) -> Vec<String> {
        self.data
            .iter()
            .filter_map(|p| p.product_id.clone())
            .filter(|id| !id.is_empty())
            .collect()
    }
}
