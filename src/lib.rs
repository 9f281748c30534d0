pub mod client;
pub mod config;
pub mod default_colors;
pub mod display;
pub mod error;
pub mod notify;
pub mod traits;
pub mod types;

pub use client::CatalogClient;
