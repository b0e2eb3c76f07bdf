use std::io::Write;

use yansi::Paint;

use crate::api::{fetch_bearer_token, search_products};
use crate::config::ApiConfig;
use crate::error::GrocerError;
use crate::models::{GroceryListEntry, ProductRecord};
use crate::services::presenter::{candidates_header, format_product, results_table, summary_table};
use crate::services::selector::ProductSelector;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Print every search result before the selected product.
    pub show_candidates: bool,
    /// Print the summary table after the last item.
    pub summary: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemStatus {
    Selected(ProductRecord),
    NoResults,
    SearchFailed(String),
    Skipped,
}

impl ItemStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Selected(_) => "selected",
            ItemStatus::NoResults => "no results",
            ItemStatus::SearchFailed(_) => "search failed",
            ItemStatus::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemOutcome {
    pub entry: GroceryListEntry,
    pub status: ItemStatus,
    pub result_ids: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub outcomes: Vec<ItemOutcome>,
}

impl RunSummary {
    pub fn selected(&self) -> impl Iterator<Item = (&GroceryListEntry, &ProductRecord)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            ItemStatus::Selected(p) => Some((&o.entry, p)),
            _ => None,
        })
    }
}

/// Search every entry in order and print the chosen product for each.
///
/// The token is fetched once up front; if that fails nothing is searched.
/// Per-item failures are reported and the run moves on.
pub async fn run_shopping_list<W: Write>(
    client: &reqwest::Client,
    config: &ApiConfig,
    selector: &ProductSelector,
    entries: &[GroceryListEntry],
    options: &RunOptions,
    out: &mut W,
) -> Result<RunSummary, GrocerError> {
    writeln!(out, "Found {} items in grocery list.", entries.len())?;

    let token = fetch_bearer_token(client, config).await?;
    tracing::info!(strategy = %selector.strategy(), items = entries.len(), "Starting grocery search");

    let mut summary = RunSummary::default();
    for entry in entries {
        let outcome = search_entry(client, config, selector, &token, entry, options, out).await?;
        summary.outcomes.push(outcome);
    }

    if options.summary && !summary.outcomes.is_empty() {
        writeln!(out, "\n{}", summary_table(&summary.outcomes))?;
    }
    Ok(summary)
}

async fn search_entry<W: Write>(
    client: &reqwest::Client,
    config: &ApiConfig,
    selector: &ProductSelector,
    token: &str,
    entry: &GroceryListEntry,
    options: &RunOptions,
    out: &mut W,
) -> Result<ItemOutcome, GrocerError> {
    let mut outcome = ItemOutcome {
        entry: entry.clone(),
        status: ItemStatus::Skipped,
        result_ids: Vec::new(),
    };

    let item_name = entry.item_name.as_str();
    if item_name.is_empty() {
        tracing::warn!(line = %entry, "Skipping list line without an item name");
        eprintln!("{} {} (no item name)", Paint::new("Skipping line:").yellow(), entry);
        return Ok(outcome);
    }

    match &entry.brand_hint {
        Some(hint) => writeln!(out, "\nSearching for: {} (brand hint: {})", item_name, hint)?,
        None => writeln!(out, "\nSearching for: {}", item_name)?,
    }

    let results = match search_products(client, config, token, item_name).await {
        Ok(Some(results)) if !results.is_empty() => results,
        Ok(_) => {
            writeln!(out, "No results for {}", item_name)?;
            outcome.status = ItemStatus::NoResults;
            return Ok(outcome);
        }
        Err(e) => {
            tracing::warn!(error = %e, item = item_name, "Search failed, skipping item");
            eprintln!("{} '{}': {}", Paint::new("Search failed for").red(), item_name, e);
            writeln!(out, "No results for {}", item_name)?;
            outcome.status = ItemStatus::SearchFailed(e.to_string());
            return Ok(outcome);
        }
    };
    outcome.result_ids = results.product_ids();

    if options.show_candidates {
        writeln!(out, "{}", candidates_header(item_name))?;
        for product in &results.data {
            writeln!(out, "  {}", format_product(product))?;
        }
    }

    match selector.select(&results.data, item_name, entry.brand_hint.as_deref()) {
        Some(product) => {
            writeln!(out, "- {}", format_product(product))?;
            outcome.status = ItemStatus::Selected(product.clone());
        }
        None => {
            writeln!(out, "No product selected for {}", item_name)?;
            outcome.status = ItemStatus::NoResults;
        }
    }
    Ok(outcome)
}

/// One search term, printed as a table of every result.
pub async fn run_single_search<W: Write>(
    client: &reqwest::Client,
    config: &ApiConfig,
    term: &str,
    out: &mut W,
) -> Result<Vec<ProductRecord>, GrocerError> {
    let token = fetch_bearer_token(client, config).await?;
    let products = search_products(client, config, &token, term)
        .await?
        .map(|r| r.data)
        .unwrap_or_default();

    if products.is_empty() {
        writeln!(out, "No results found for {}.", term)?;
    } else {
        writeln!(out, "\n{}\n{}", candidates_header(term), results_table(&products))?;
    }
    Ok(products)
}
