pub mod list_reader;
pub mod presenter;
pub mod selector;
pub mod shopping_run;

pub use list_reader::{parse_item_line, read_grocery_list, ListError};
pub use presenter::format_product;
pub use selector::{ProductSelector, SelectionStrategy};
pub use shopping_run::{run_shopping_list, run_single_search, ItemOutcome, ItemStatus, RunOptions, RunSummary};
