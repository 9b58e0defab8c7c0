//! dav-sync - push changed records and images to a WebDAV store
//!
//! A one-shot CI/local tool that:
//! - Asks git which files changed or were added
//! - Picks out logsheet and team records and images by directory
//! - Uploads each one to a deterministic remote path over WebDAV

pub mod classify;
pub mod config;
pub mod error;
pub mod git;
pub mod record;
pub mod remote;
pub mod sync;
pub mod webdav;

pub use classify::{classify, Category, Classified};
pub use config::{Config, RunMode};
pub use error::{Result, SyncError};
pub use git::{ChangeSet, GitRunner, SystemGit};
pub use record::{read_record, Record};
pub use sync::{SyncPlan, SyncSummary, Syncer, IMAGES_FROM_NEW_ONLY};
pub use webdav::{upload, RemoteStore, WebDavStore};
