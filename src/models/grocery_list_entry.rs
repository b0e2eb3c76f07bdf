use std::fmt;

use serde::{Deserialize, Serialize};

/// One line of a grocery list: what to search for and, optionally, which
/// brand to lean towards.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GroceryListEntry {
    pub item_name: String,
    pub brand_hint: Option<String>,
}

impl GroceryListEntry {
    pub fn new(item_name: impl Into<String>, brand_hint: Option<String>) -> Self {
        Self {
            item_name: item_name.into(),
            brand_hint: brand_hint.filter(|h| !h.is_empty()),
        }
    }
}

impl fmt::Display for GroceryListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.brand_hint {
            Some(hint) => write!(f, "{} — {}", self.item_name, hint),
            // a trailing separator keeps a hyphenated item from being split on reparse
            None if self.item_name.contains(['-', '—']) => write!(f, "{} —", self.item_name),
            None => write!(f, "{}", self.item_name),
        }
    }
}
