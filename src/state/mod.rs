//! State management module
//!
//! This module handles all application state, including:
//! - The catalog file and private content files (catalog.rs)
//! - Shared data structures (data.rs)
//! - User edits validated before they reach the catalog (edit.rs)
//! - Display ordering for the tile grid (presentation.rs)

pub mod catalog;
pub mod data;
pub mod edit;
pub mod error;
pub mod presentation;

pub use catalog::Catalog;
pub use data::{Entry, ImportSummary};
pub use edit::{suggested_display_name, validate_display_name, EditError};
pub use error::CatalogError;
pub use presentation::{presentation_order, PresentationList};
