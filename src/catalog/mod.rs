//! Catalog domain: benefit records, backend transport, and sample data.

pub mod client;
pub mod error;
pub mod fixture;
pub mod models;

pub use client::{CatalogSource, HttpCatalog};
pub use error::ApiError;
pub use fixture::SampleCatalog;
pub use models::{Benefit, BenefitEnvelope, CategoriesEnvelope, ErrorEnvelope, PageEnvelope};
