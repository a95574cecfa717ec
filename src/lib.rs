//! # calspend
//!
//! Read API behind the California spending transparency site: paginated
//! listings of vendor totals, departments and budget programs, keyword
//! search, and the visitor tip and mailing-list forms.
//!
//! Every listing accepts a search-box `filter` expression (see [`filter`])
//! that narrows the returned page by name.
//!
//! ```rust,ignore
//! let db = Database::connect("sqlite::memory:").await?;
//! Migrator::up(&db, None).await?;
//! let app = calspend::app::router(AppState::new(db, Config::default()));
//! ```

pub mod app;
pub mod config;
pub mod entities;
pub mod errors;
pub mod filter;
pub mod migration;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod sort;
pub mod traits;
pub mod validation;

pub use app::{AppState, router};
pub use config::Config;
pub use errors::ApiError;
pub use filter::{FilterExpression, Operator};
pub use migration::Migrator;
pub use traits::ListingResource;
