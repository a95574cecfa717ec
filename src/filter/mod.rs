//! # Search-Box Filtering
//!
//! Listing endpoints accept a free-text `filter` query parameter. It is parsed
//! into a [`FilterExpression`] and applied to the page of rows fetched from
//! the database.
//!
//! ```rust
//! use calspend::filter::{parse, Operator};
//!
//! let filter = parse(r#""health services" AND acme"#);
//! assert_eq!(filter.operator(), Operator::And);
//! assert!(filter.matches("ACME Health Services LLC"));
//! assert!(!filter.matches("Acme Corp"));
//! ```
//!
//! The keyword search endpoint additionally pushes a coarse version of the
//! expression into SQL with [`build_prefilter`] before matching in memory.

pub mod expression;
pub mod search;

pub use expression::{FilterExpression, Operator, matches, parse};
pub use search::{build_like_condition, build_prefilter};
