//! Remote path layout
//!
//! Records are stored as `<category>/<id>/<version>.json`, images as
//! `images/<file name>`.

use crate::classify::Category;
use crate::record::Record;

/// Destination for a logsheet or team record
pub fn record_remote_path(category: Category, record: &Record) -> String {
    format!(
        "{}/{}/{}.json",
        category.directory(),
        record.id,
        record.version
    )
}

/// Destination for an image; only the file name is kept
pub fn image_remote_path(local_path: &str) -> String {
    let file_name = local_path.rsplit('/').next().unwrap_or(local_path);
    format!("{}/{}", Category::Image.directory(), file_name)
}

/// Directory containing `remote_path`, if it is not at the root
pub fn parent_directory(remote_path: &str) -> Option<&str> {
    remote_path
        .trim_matches('/')
        .rsplit_once('/')
        .map(|(parent, _)| parent)
        .filter(|parent| !parent.is_empty())
}

/// Every directory from the root down to and including `remote_dir`
pub fn directory_chain(remote_dir: &str) -> Vec<String> {
    let segments: Vec<&str> = remote_dir
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    (1..=segments.len())
        .map(|depth| segments[..depth].join("/"))
        .collect()
}
