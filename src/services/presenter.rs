use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};

use crate::models::ProductRecord;
use crate::services::shopping_run::{ItemOutcome, ItemStatus};

const NOT_AVAILABLE: &str = "N/A";
const UNKNOWN_BRAND: &str = "Unknown";

/// `description (brand) — $price — ID: identifier`
pub fn format_product(product: &ProductRecord) -> String {
    let description = product.description.as_deref().unwrap_or(NOT_AVAILABLE);
    let brand = product.brand.as_deref().unwrap_or(UNKNOWN_BRAND);
    let price = product.price_display().unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let product_id = product.product_id.as_deref().unwrap_or(NOT_AVAILABLE);
    format!("{} ({}) — ${} — ID: {}", description, brand, price, product_id)
}

pub fn candidates_header(item_name: &str) -> String {
    format!("--- Top Results for '{}' ---", item_name)
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

/// Table of raw search results, used by the single-term search.
pub fn results_table(products: &[ProductRecord]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Description", "Brand", "Price", "Product ID"]);
    for p in products {
        table.add_row(vec![
            p.description.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            p.brand.clone().unwrap_or_else(|| UNKNOWN_BRAND.to_string()),
            p.price_display().map(|v| format!("${}", v)).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            p.product_id.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ]);
    }
    table
}

/// End-of-run table: one row per list entry with what was picked and every
/// product ID the search returned.
pub fn summary_table(outcomes: &[ItemOutcome]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Item", "Selected", "Price", "Product ID", "Result IDs"]);
    for outcome in outcomes {
        let (selected, price, product_id) = match &outcome.status {
            ItemStatus::Selected(p) => (
                p.description.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                p.price_display().map(|v| format!("${}", v)).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                p.product_id.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            ),
            other => (other.label().to_string(), "—".to_string(), "—".to_string()),
        };
        table.add_row(vec![
            outcome.entry.to_string(),
            selected,
            price,
            product_id,
            outcome.result_ids.join(", "),
        ]);
    }
    table
}
