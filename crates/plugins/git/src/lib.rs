//! Command-line adapter for standup-tools.
//!
//! Implements [`standup_core::RepositoryQueryPort`] by spawning `git` for
//! local history and diffs, and the GitHub CLI `gh` for the remote URL and
//! pull-request listings.

mod client;
mod command;

pub use client::CliRepositoryQuery;
pub use command::CommandRunner;
