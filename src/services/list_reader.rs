use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::GroceryListEntry;

const EM_DASH: char = '—';
const HYPHEN: char = '-';

#[derive(Debug, Error)]
pub enum ListError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a grocery list file into entries, in file order.
pub fn read_grocery_list(path: &Path) -> Result<Vec<GroceryListEntry>, ListError> {
    if !path.is_file() {
        return Err(ListError::NotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path).map_err(|source| ListError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_list(&contents);
    tracing::debug!(path = %path.display(), count = entries.len(), "Parsed grocery list");
    Ok(entries)
}

/// Lines that are blank or start with `#` (after trimming) are skipped.
pub fn parse_list(contents: &str) -> Vec<GroceryListEntry> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(parse_item_line)
        .collect()
}

/// Split `item — brand` or `item - brand` at the first separator. An em dash
/// anywhere on the line wins over hyphens.
pub fn parse_item_line(line: &str) -> GroceryListEntry {
    let split = line
        .split_once(EM_DASH)
        .or_else(|| line.split_once(HYPHEN));
    match split {
        Some((item, hint)) => GroceryListEntry::new(item.trim(), Some(hint.trim().to_string())),
        None => GroceryListEntry::new(line.trim(), None),
    }
}
