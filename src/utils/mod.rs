// URL handling utilities
pub mod query_string;

// JSON utilities
pub mod json_converter;

pub use query_string::build_query_string;
pub use json_converter::value_to_short_string;
