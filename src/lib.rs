//! Grocery list product search against the Kroger product API.
//!
//! A run reads a list file, acquires one client-credentials token, searches
//! each entry and picks a product with a configurable [`ProductSelector`].

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::GrocerError;
pub use services::{ProductSelector, SelectionStrategy};
