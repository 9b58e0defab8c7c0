//! End-to-end sync run: changes -> plan -> uploads -> summary

use colored::Colorize;
use std::path::Path;

use crate::classify::{classify, Category};
use crate::config::RunMode;
use crate::error::Result;
use crate::git::{resolve_changes, ChangeSet, GitRunner};
use crate::record::read_record;
use crate::remote::{image_remote_path, record_remote_path};
use crate::webdav::{upload, RemoteStore};

/// Images never change once committed, so only newly added ones are uploaded.
/// Records are taken from both changed and new files to catch version bumps.
pub const IMAGES_FROM_NEW_ONLY: bool = true;

/// Files selected for upload, grouped by category
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    pub logsheets: Vec<String>,
    pub teams: Vec<String>,
    pub images: Vec<String>,
}

impl SyncPlan {
    pub fn from_changes(changes: &ChangeSet) -> Self {
        let records = classify(changes.all());

        let images = if IMAGES_FROM_NEW_ONLY {
            classify(&changes.new).images
        } else {
            classify(changes.all()).images
        };

        Self {
            logsheets: records.logsheets,
            teams: records.teams,
            images,
        }
    }

    pub fn total(&self) -> usize {
        self.logsheets.len() + self.teams.len() + self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// How many files of each category were uploaded
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncSummary {
    pub logsheets: usize,
    pub teams: usize,
    pub images: usize,
}

impl SyncSummary {
    pub fn total(&self) -> usize {
        self.logsheets + self.teams + self.images
    }
}

pub struct Syncer<'a> {
    store: &'a dyn RemoteStore,
    work_dir: &'a Path,
}

impl<'a> Syncer<'a> {
    pub fn new(store: &'a dyn RemoteStore, work_dir: &'a Path) -> Self {
        Self { store, work_dir }
    }

    /// Detect changes with git and upload everything relevant
    pub fn sync(&self, git: &dyn GitRunner, mode: RunMode) -> Result<SyncSummary> {
        println!(
            "{} Detecting changed files ({} mode)...",
            "→".blue(),
            mode.label()
        );

        let changes = resolve_changes(git, mode)?;
        self.run(&changes)
    }

    /// Upload the files selected from `changes`, stopping at the first error
    pub fn run(&self, changes: &ChangeSet) -> Result<SyncSummary> {
        let plan = SyncPlan::from_changes(changes);

        if plan.is_empty() {
            println!(
                "{}",
                "No relevant files (logsheets, teams, or images) to upload.".dimmed()
            );
            return Ok(SyncSummary::default());
        }

        println!("\n{} {} file(s) to upload:", "→".blue(), plan.total());
        println!("  {} Logsheets: {}", "•".green(), plan.logsheets.len());
        println!("  {} Teams: {}", "•".green(), plan.teams.len());
        println!("  {} Images: {}\n", "•".green(), plan.images.len());

        let mut summary = SyncSummary::default();

        for path in &plan.logsheets {
            self.upload_record(Category::Logsheet, path)?;
            summary.logsheets += 1;
        }

        for path in &plan.teams {
            self.upload_record(Category::Team, path)?;
            summary.teams += 1;
        }

        for path in &plan.images {
            self.upload_image(path)?;
            summary.images += 1;
        }

        println!(
            "\n{} Upload complete: {} logsheet(s), {} team(s), {} image(s)",
            "✓".green().bold(),
            summary.logsheets,
            summary.teams,
            summary.images
        );

        Ok(summary)
    }

    fn upload_record(&self, category: Category, path: &str) -> Result<()> {
        let local = self.work_dir.join(path);
        let record = read_record(&local)?;
        let remote = record_remote_path(category, &record);
        self.upload(path, &local, &remote)
    }

    fn upload_image(&self, path: &str) -> Result<()> {
        let local = self.work_dir.join(path);
        let remote = image_remote_path(path);
        self.upload(path, &local, &remote)
    }

    fn upload(&self, display: &str, local: &Path, remote: &str) -> Result<()> {
        upload(self.store, local, remote)?;
        println!(
            "{} Uploaded: {} {} {}",
            "✓".green(),
            display,
            "->".dimmed(),
            remote.cyan()
        );
        Ok(())
    }
}
