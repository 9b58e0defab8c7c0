//! Change set detection from git diffs

use std::collections::BTreeSet;

use super::runner::{parse_paths, GitRunner};
use crate::config::RunMode;
use crate::error::Result;

/// Added, copied, modified, renamed
const CHANGED_FILTER: &str = "--diff-filter=ACMR";
const ADDED_FILTER: &str = "--diff-filter=A";

/// Paths reported by git for one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    pub changed: BTreeSet<String>,
    pub new: BTreeSet<String>,
}

impl ChangeSet {
    /// Every path in `changed` or `new`
    pub fn all(&self) -> BTreeSet<String> {
        union_views([
            self.changed.iter().cloned().collect::<Vec<_>>(),
            self.new.iter().cloned().collect(),
        ])
    }
}

/// Merge independently queried path lists, dropping duplicates
pub fn union_views<I>(views: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    views.into_iter().flatten().collect()
}

/// Resolve the change set for the given run mode
pub fn resolve_changes(git: &dyn GitRunner, mode: RunMode) -> Result<ChangeSet> {
    match mode {
        RunMode::Ci => resolve_ci(git),
        RunMode::Local => resolve_local(git),
    }
}

fn resolve_ci(git: &dyn GitRunner) -> Result<ChangeSet> {
    let branch = git.run(&["rev-parse", "--abbrev-ref", "HEAD"])?;
    let range = format!("origin/{}...HEAD", branch.trim());

    let changed = diff_names(git, &[CHANGED_FILTER, range.as_str()])?;
    let new = diff_names(git, &[ADDED_FILTER, range.as_str()])?;

    Ok(ChangeSet {
        changed: union_views([changed]),
        new: union_views([new]),
    })
}

fn resolve_local(git: &dyn GitRunner) -> Result<ChangeSet> {
    let committed = unpushed_changes(git);
    let unstaged = diff_names(git, &[CHANGED_FILTER, "HEAD"])?;
    let staged = diff_names(git, &["--cached", CHANGED_FILTER])?;

    let untracked = parse_paths(&git.run(&["ls-files", "--others", "--exclude-standard"])?);

    Ok(ChangeSet {
        changed: union_views([committed, unstaged, staged]),
        new: union_views([untracked]),
    })
}

/// Commits not yet on the upstream branch. Empty when there is no upstream.
fn unpushed_changes(git: &dyn GitRunner) -> Vec<String> {
    let tracking = match git.run(&["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"]) {
        Ok(out) => out.trim().to_string(),
        Err(_) => return Vec::new(),
    };
    if tracking.is_empty() {
        return Vec::new();
    }

    let range = format!("{}...HEAD", tracking);
    diff_names(git, &[CHANGED_FILTER, range.as_str()]).unwrap_or_default()
}

fn diff_names(git: &dyn GitRunner, extra: &[&str]) -> Result<Vec<String>> {
    let mut args = vec!["diff", "--name-only"];
    args.extend_from_slice(extra);
    Ok(parse_paths(&git.run(&args)?))
}
