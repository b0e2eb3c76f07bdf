use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::value_to_short_string;

/// One product as returned in the `data` array of a product search.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub items: Vec<ItemOffer>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ItemOffer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Price {
    // The API normally sends a number, but the field is kept raw so that
    // strings and nulls survive deserialization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular: Option<Value>,
}

impl ProductRecord {
    /// Lower-cased description, empty when missing.
    pub fn description_lower(&self) -> String {
        self.description.as_deref().unwrap_or_default().to_lowercase()
    }

    /// Lower-cased brand, empty when missing.
    pub fn brand_lower(&self) -> String {
        self.brand.as_deref().unwrap_or_default().to_lowercase()
    }

    /// Raw `items[0].price.regular`, if present and not null.
    pub fn raw_regular_price(&self) -> Option<&Value> {
        self.items
            .first()
            .and_then(|item| item.price.as_ref())
            .and_then(|price| price.regular.as_ref())
            .filter(|v| !v.is_null())
    }

    /// `items[0].price.regular` as a number. Numeric strings count; anything
    /// else (missing, null, text, NaN, infinities) is unusable.
    pub fn regular_price(&self) -> Option<f64> {
        let parsed = match self.raw_regular_price()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|p| p.is_finite())
    }

    pub fn price_display(&self) -> Option<String> {
        self.raw_regular_price().map(value_to_short_string)
    }
}
