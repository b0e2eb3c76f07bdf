pub mod grocery_list_entry;
pub mod product_record;
pub mod search_result;

pub use grocery_list_entry::GroceryListEntry;
pub use product_record::{ItemOffer, Price, ProductRecord};
pub use search_result::SearchResult;
