//! Core types, traits, and error handling for standup-tools.
//!
//! This crate provides the foundational pieces shared by every other crate:
//! the [`ActivityReport`] value, the [`RepositoryQueryPort`] trait that
//! abstracts the external `git`/`gh` queries, and the [`Collector`] that
//! turns a repository path and a lookback window into a report.

pub mod collector;
pub mod config;
pub mod error;
pub mod locale;
pub mod port;
pub mod types;

pub use collector::{cutoff_timestamp, Collector};
pub use config::{CommandsConfig, Config};
pub use error::{Error, Result};
pub use locale::{Locale, Messages};
pub use port::RepositoryQueryPort;
pub use types::ActivityReport;
