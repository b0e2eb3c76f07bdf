pub mod client;
pub mod error;
pub mod products;
pub mod token;

// Re-export commonly used functions
pub use client::{build_http_client, set_silent};
pub use error::ApiError;
pub use products::search_products;
pub use token::fetch_bearer_token;
