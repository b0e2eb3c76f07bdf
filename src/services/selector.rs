//! Product selection heuristics.
//!
//! One [`ProductSelector`] covers every way the tool has picked a product
//! from a search result, chosen with a [`SelectionStrategy`]. All strategies
//! return `None` only when there are no records to choose from.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::config::DEFAULT_PREFERRED_BRAND;
use crate::models::ProductRecord;

/// Search phrases tried by [`SelectionStrategy::Relevance`] for common
/// one-word items.
pub const DEFAULT_KEYWORD_ALIASES: &[(&str, &[&str])] = &[
    ("milk", &["whole milk", "organic milk", "milk gallon"]),
    ("eggs", &["large eggs", "cage free eggs"]),
    ("cheese", &["cheddar block cheese", "shredded cheddar"]),
    ("bread", &["whole grain bread", "sourdough bread"]),
    ("ice cream", &["vanilla ice cream", "chocolate ice cream"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStrategy {
    /// First record in API order.
    First,
    /// First record whose brand equals the preferred brand, else the first.
    PreferredBrand,
    /// Preferred brand with a matching description, then any matching
    /// description, then the first record.
    Relevance,
    /// Brand-hint filter, then the lowest regular price.
    LowestPrice,
    /// All item keywords plus brand hint, then the lowest regular price.
    #[default]
    KeywordPrice,
}

impl SelectionStrategy {
    pub const ALL: [SelectionStrategy; 5] = [
        SelectionStrategy::First,
        SelectionStrategy::PreferredBrand,
        SelectionStrategy::Relevance,
        SelectionStrategy::LowestPrice,
        SelectionStrategy::KeywordPrice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionStrategy::First => "first",
            SelectionStrategy::PreferredBrand => "preferred-brand",
            SelectionStrategy::Relevance => "relevance",
            SelectionStrategy::LowestPrice => "lowest-price",
            SelectionStrategy::KeywordPrice => "keyword-price",
        }
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        SelectionStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = SelectionStrategy::ALL.iter().map(|s| s.as_str()).collect();
                format!("unknown strategy '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

#[derive(Debug, Clone)]
pub struct ProductSelector {
    strategy: SelectionStrategy,
    preferred_brand: String,
    keyword_aliases: HashMap<String, Vec<String>>,
}

impl Default for ProductSelector {
    fn default() -> Self {
        Self::new(SelectionStrategy::default(), DEFAULT_PREFERRED_BRAND)
    }
}

impl ProductSelector {
    pub fn new(strategy: SelectionStrategy, preferred_brand: &str) -> Self {
        let keyword_aliases = DEFAULT_KEYWORD_ALIASES
            .iter()
            .map(|(item, phrases)| (item.to_string(), phrases.iter().map(|p| p.to_string()).collect()))
            .collect();
        Self {
            strategy,
            preferred_brand: preferred_brand.trim().to_lowercase(),
            keyword_aliases,
        }
    }

    pub fn with_keyword_aliases(mut self, aliases: HashMap<String, Vec<String>>) -> Self {
        self.keyword_aliases = aliases
            .into_iter()
            .map(|(item, phrases)| (item.to_lowercase(), phrases.into_iter().map(|p| p.to_lowercase()).collect()))
            .collect();
        self
    }

    pub fn strategy(&self) -> SelectionStrategy {
        self.strategy
    }

    pub fn select<'r>(
        &self,
        records: &'r [ProductRecord],
        item_name: &str,
        brand_hint: Option<&str>,
    ) -> Option<&'r ProductRecord> {
        if records.is_empty() {
            return None;
        }
        let hint = brand_hint
            .map(|h| h.trim().to_lowercase())
            .filter(|h| !h.is_empty());

        match self.strategy {
            SelectionStrategy::First => records.first(),
            SelectionStrategy::PreferredBrand => self.select_preferred_brand(records),
            SelectionStrategy::Relevance => self.select_relevant(records, item_name),
            SelectionStrategy::LowestPrice => {
                let filtered: Vec<&ProductRecord> = records
                    .iter()
                    .filter(|p| hint.as_deref().map_or(true, |h| matches_brand_hint(p, h)))
                    .collect();
                cheapest_or_first(or_all(filtered, records))
            }
            SelectionStrategy::KeywordPrice => {
                let keywords = tokenize(item_name);
                let filtered: Vec<&ProductRecord> = records
                    .iter()
                    .filter(|p| matches_all_keywords(p, &keywords))
                    .filter(|p| hint.as_deref().map_or(true, |h| matches_brand_hint(p, h)))
                    .collect();
                cheapest_or_first(or_all(filtered, records))
            }
        }
    }

    fn is_preferred_brand(&self, record: &ProductRecord) -> bool {
        !self.preferred_brand.is_empty() && record.brand_lower() == self.preferred_brand
    }

    fn select_preferred_brand<'r>(&self, records: &'r [ProductRecord]) -> Option<&'r ProductRecord> {
        records
            .iter()
            .find(|p| self.is_preferred_brand(p))
            .or_else(|| records.first())
    }

    fn select_relevant<'r>(&self, records: &'r [ProductRecord], item_name: &str) -> Option<&'r ProductRecord> {
        let item = item_name.to_lowercase();
        let phrases = self
            .keyword_aliases
            .get(&item)
            .cloned()
            .unwrap_or_else(|| vec![item]);
        let mentions_any = |p: &ProductRecord| {
            let desc = p.description_lower();
            phrases.iter().any(|k| desc.contains(k.as_str()))
        };

        records
            .iter()
            .find(|p| self.is_preferred_brand(p) && mentions_any(*p))
            .or_else(|| records.iter().find(|p| mentions_any(*p)))
            .or_else(|| records.first())
    }
}

/// Lower-cased, whitespace-separated keywords of an item name.
pub fn tokenize(item_name: &str) -> Vec<String> {
    item_name.to_lowercase().split_whitespace().map(str::to_string).collect()
}

/// Every keyword appears somewhere in `description + " " + brand`.
pub fn matches_all_keywords(record: &ProductRecord, keywords: &[String]) -> bool {
    let combined = format!("{} {}", record.description_lower(), record.brand_lower());
    keywords.iter().all(|k| combined.contains(k.as_str()))
}

/// `hint` must already be lower-cased.
pub fn matches_brand_hint(record: &ProductRecord, hint: &str) -> bool {
    record.brand_lower().contains(hint) || record.description_lower().contains(hint)
}

fn or_all<'r>(filtered: Vec<&'r ProductRecord>, records: &'r [ProductRecord]) -> Vec<&'r ProductRecord> {
    if filtered.is_empty() {
        records.iter().collect()
    } else {
        filtered
    }
}

/// Lowest usable regular price; the earliest record wins a tie. Falls back
/// to the first candidate when nothing has a usable price.
pub fn cheapest_or_first<'r>(candidates: Vec<&'r ProductRecord>) -> Option<&'r ProductRecord> {
    let mut lowest: Option<(&'r ProductRecord, f64)> = None;
    for &record in &candidates {
        let Some(price) = record.regular_price() else {
            continue;
        };
        if lowest.map_or(true, |(_, best)| price < best) {
            lowest = Some((record, price));
        }
    }
    lowest.map(|(record, _)| record).or_else(|| candidates.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn product(id: &str, description: &str, brand: Option<&str>, price: Value) -> ProductRecord {
        serde_json::from_value(json!({
            "productId": id,
            "description": description,
            "brand": brand,
            "items": [{"price": {"regular": price}}],
        }))
        .unwrap()
    }

    fn ids(selected: Option<&ProductRecord>) -> Option<&str> {
        selected.and_then(|p| p.product_id.as_deref())
    }

    fn milk_candidates() -> Vec<ProductRecord> {
        vec![
            product("kroger", "2% milk store brand", Some("Kroger"), json!(2.99)),
            product("ov", "Organic Valley 2% milk", Some("Organic Valley"), json!(4.49)),
        ]
    }

    #[test]
    fn test_brand_hint_beats_lower_price() {
        let selector = ProductSelector::default();
        let records = milk_candidates();
        assert_eq!(ids(selector.select(&records, "2% milk", Some("Organic Valley"))), Some("ov"));
    }

    #[test]
    fn test_without_hint_cheapest_keyword_match_wins() {
        let selector = ProductSelector::default();
        let records = milk_candidates();
        assert_eq!(ids(selector.select(&records, "2% milk", None)), Some("kroger"));
    }

    #[test]
    fn test_keywords_may_match_brand_text() {
        let selector = ProductSelector::default();
        let records = vec![
            product("a", "Greek Yogurt", Some("Chobani"), json!(1.50)),
            product("b", "Vanilla Greek Yogurt", Some("Fage"), json!(1.25)),
        ];
        assert_eq!(ids(selector.select(&records, "chobani yogurt", None)), Some("a"));
    }

    #[test]
    fn test_never_returns_record_missing_a_keyword_when_some_match() {
        let selector = ProductSelector::default();
        let records = vec![
            product("cheap", "Butter", Some("Kroger"), json!(0.99)),
            product("match", "Unsalted Sweet Cream Butter", Some("Land O Lakes"), json!(5.49)),
            product("also", "Salted Butter Sticks", Some("Kroger"), json!(3.99)),
        ];
        let selected = selector.select(&records, "unsalted butter", None).unwrap();
        assert!(matches_all_keywords(selected, &tokenize("unsalted butter")));
        assert_eq!(selected.product_id.as_deref(), Some("match"));
    }

    #[test]
    fn test_falls_back_to_all_records_when_nothing_matches() {
        let selector = ProductSelector::default();
        let records = vec![
            product("a", "Sourdough Loaf", Some("Bakery"), json!(4.00)),
            product("b", "Rye Loaf", Some("Bakery"), json!(3.00)),
        ];
        assert_eq!(ids(selector.select(&records, "baguette", Some("Nobody"))), Some("b"));
    }

    #[test]
    fn test_price_tie_goes_to_first_occurrence() {
        let selector = ProductSelector::default();
        let records = vec![
            product("first", "Large Eggs", None, json!(3.00)),
            product("second", "Large Eggs", None, json!(3.00)),
        ];
        assert_eq!(ids(selector.select(&records, "eggs", None)), Some("first"));
    }

    #[test]
    fn test_unpriced_records_are_skipped_but_kept_as_fallback() {
        let selector = ProductSelector::default();
        let records = vec![
            product("noprice", "Bananas", None, Value::Null),
            product("text", "Bananas Organic", None, json!("see store")),
            product("priced", "Bananas Bunch", None, json!("0.69")),
        ];
        assert_eq!(ids(selector.select(&records, "bananas", None)), Some("priced"));

        let unpriced = vec![
            product("noprice", "Bananas", None, Value::Null),
            product("text", "Bananas Organic", None, json!("see store")),
        ];
        assert_eq!(ids(selector.select(&unpriced, "bananas", None)), Some("noprice"));
    }

    #[test]
    fn test_infinite_price_never_wins() {
        let selector = ProductSelector::default();
        let records = vec![
            product("a", "Whole Milk", None, Value::Null),
            product("b", "Whole Milk Gallon", None, json!("inf")),
        ];
        assert_eq!(ids(selector.select(&records, "milk", None)), Some("a"));

        let with_price = vec![
            product("inf", "Whole Milk", None, json!("infinity")),
            product("real", "Whole Milk Gallon", None, json!(3.19)),
        ];
        assert_eq!(ids(selector.select(&with_price, "milk", None)), Some("real"));
    }

    #[test]
    fn test_hint_found_only_in_description() {
        let selector = ProductSelector::default();
        let records = vec![
            product("plain", "Greek Yogurt Plain", Some("Fage"), json!(1.25)),
            product("desc", "Chobani Greek Yogurt Vanilla", Some("Kroger Co"), json!(1.89)),
        ];
        assert!(matches_brand_hint(&records[1], "chobani"));
        assert!(!records[1].brand_lower().contains("chobani"));
        assert_eq!(ids(selector.select(&records, "greek yogurt", Some("Chobani"))), Some("desc"));
    }

    #[test]
    fn test_record_without_items_is_not_priced() {
        let bare: ProductRecord = serde_json::from_value(json!({"productId": "bare", "description": "Apples"})).unwrap();
        let records = vec![bare, product("priced", "Apples Gala", None, json!(9.99))];
        assert_eq!(ids(ProductSelector::default().select(&records, "apples", None)), Some("priced"));
    }

    #[test]
    fn test_hint_is_case_insensitive_substring() {
        let selector = ProductSelector::default();
        let records = vec![
            product("a", "Peanut Butter", Some("Jif"), json!(2.50)),
            product("b", "Peanut Butter Creamy", Some("Smucker's Natural"), json!(3.50)),
        ];
        assert_eq!(ids(selector.select(&records, "peanut butter", Some("SMUCKER"))), Some("b"));
    }

    #[test]
    fn test_empty_results_select_nothing() {
        for strategy in SelectionStrategy::ALL {
            let selector = ProductSelector::new(strategy, "harris teeter");
            assert!(selector.select(&[], "milk", Some("Horizon")).is_none(), "{strategy}");
        }
    }

    #[test]
    fn test_lowest_price_ignores_keywords() {
        let selector = ProductSelector::new(SelectionStrategy::LowestPrice, "harris teeter");
        let records = vec![
            product("milk", "Horizon Organic Whole Milk", Some("Horizon"), json!(5.99)),
            product("cheaper", "Horizon Cheese Sticks", Some("Horizon"), json!(3.99)),
            product("other", "Whole Milk", Some("Kroger"), json!(2.99)),
        ];
        assert_eq!(ids(selector.select(&records, "whole milk", Some("horizon"))), Some("cheaper"));
        assert_eq!(ids(selector.select(&records, "whole milk", None)), Some("other"));
    }

    #[test]
    fn test_first_strategy_takes_api_order() {
        let selector = ProductSelector::new(SelectionStrategy::First, "harris teeter");
        let records = milk_candidates();
        assert_eq!(ids(selector.select(&records, "2% milk", Some("Organic Valley"))), Some("kroger"));
    }

    #[test]
    fn test_preferred_brand_is_exact_and_case_insensitive() {
        let selector = ProductSelector::new(SelectionStrategy::PreferredBrand, "Harris Teeter");
        let records = vec![
            product("near", "Milk", Some("Harris Teeter Organics"), json!(1.0)),
            product("exact", "Milk", Some("HARRIS TEETER"), json!(9.0)),
        ];
        assert_eq!(ids(selector.select(&records, "milk", None)), Some("exact"));

        let none_preferred = milk_candidates();
        assert_eq!(ids(selector.select(&none_preferred, "milk", None)), Some("kroger"));
    }

    #[test]
    fn test_relevance_prefers_brand_then_keyword_then_first() {
        let selector = ProductSelector::new(SelectionStrategy::Relevance, "harris teeter");
        let records = vec![
            product("chips", "Potato Chips", Some("Lay's"), json!(1.0)),
            product("kroger", "Kroger Whole Milk Gallon", Some("Kroger"), json!(3.0)),
            product("ht", "HT Traders Organic Milk", Some("Harris Teeter"), json!(6.0)),
        ];
        assert_eq!(ids(selector.select(&records, "Milk", None)), Some("ht"));

        let no_house_brand = &records[..2];
        assert_eq!(ids(selector.select(no_house_brand, "milk", None)), Some("kroger"));

        assert_eq!(ids(selector.select(&records, "salsa", None)), Some("chips"));
    }

    #[test]
    fn test_relevance_uses_whole_item_name_without_alias() {
        let selector = ProductSelector::new(SelectionStrategy::Relevance, "harris teeter");
        let records = vec![
            product("a", "Green Apples", None, json!(1.0)),
            product("b", "Apple Juice", None, json!(1.0)),
        ];
        assert_eq!(ids(selector.select(&records, "apple juice", None)), Some("b"));
    }

    #[test]
    fn test_custom_aliases_replace_defaults() {
        let aliases = HashMap::from([("soda".to_string(), vec!["Cola".to_string()])]);
        let selector = ProductSelector::new(SelectionStrategy::Relevance, "harris teeter").with_keyword_aliases(aliases);
        let records = vec![
            product("a", "Soda Water", None, json!(1.0)),
            product("b", "Diet Cola", None, json!(1.0)),
        ];
        assert_eq!(ids(selector.select(&records, "soda", None)), Some("b"));
    }

    #[test]
    fn test_strategy_round_trips_through_names() {
        for strategy in SelectionStrategy::ALL {
            assert_eq!(strategy.to_string().parse::<SelectionStrategy>(), Ok(strategy));
        }
        assert_eq!("KEYWORD_PRICE".parse::<SelectionStrategy>(), Ok(SelectionStrategy::KeywordPrice));
        assert!("cheapest".parse::<SelectionStrategy>().is_err());
    }
}
