//! # Catalog Core
//!
//! Core types and error definitions for the product catalog service.
//! Every other crate in the workspace builds on the [`Product`] entity and
//! the [`CatalogError`] taxonomy defined here.

pub mod domain;
pub mod error;
pub mod result;
pub mod traits;

pub use domain::*;
pub use error::*;
pub use result::*;
pub use traits::*;
