//! Git operations module
//!
//! Provides:
//! - Running git subcommands behind a mockable trait
//! - Change set detection for CI and local runs

pub mod diff;
pub mod runner;

pub use diff::{resolve_changes, union_views, ChangeSet};
pub use runner::{parse_paths, GitRunner, SystemGit};
