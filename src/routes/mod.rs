//! HTTP handlers.
//!
//! Listing handlers share one generic implementation over
//! [`ListingResource`](crate::traits::ListingResource); the concrete
//! `list_*` wrappers exist so each endpoint gets its own `OpenAPI` entry.

pub mod forms;
pub mod health;
pub mod listing;
pub mod search;

pub use forms::{submit_tip, subscribe};
pub use health::health;
pub use listing::{list, list_departments, list_programs, list_vendors};
pub use search::search;
