pub mod client;

pub use client::{PortfolioApiError, PortfolioClient};
