//! Leaflog: a single-user houseplant care tracker.
//!
//! The library is independent of the HTTP transport: `models`, `db`, and
//! `care` can be used directly, `api` provides the axum router on top.
//!
//! # Usage
//!
//! ```no_run
//! use leaflog::Database;
//!
//! let db = Database::open_default()?;
//! db.migrate()?;
//!
//! let plants = db.living_plants()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod care;
pub mod db;
pub mod models;

// Re-export commonly used types at crate root
pub use db::Database;
