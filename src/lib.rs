//! Occupation automation-probability dashboard: data layer.
//!
//! Loads the CDF / PDF spreadsheets once per process, answers search and
//! browse queries, tracks a per-session selection and encodes CSV / Excel
//! exports. The desktop front end in `main.rs` only consumes these types.

pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod session;

pub use config::Config;
pub use error::{OutlookError, Result};
pub use session::{Selection, Session};
