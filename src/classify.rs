//! Sorting changed paths into upload categories

/// Kind of file the sync knows how to upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Logsheet,
    Team,
    Image,
}

impl Category {
    /// Directory the category lives under, both locally and remotely
    pub fn directory(&self) -> &'static str {
        match self {
            Category::Logsheet => "logsheets",
            Category::Team => "teams",
            Category::Image => "images",
        }
    }

    /// Classify a single repository-relative path. First matching rule wins.
    pub fn of(path: &str) -> Option<Category> {
        if path.starts_with("logsheets/") && path.ends_with(".json") {
            Some(Category::Logsheet)
        } else if path.starts_with("teams/") && path.ends_with(".json") {
            Some(Category::Team)
        } else if path.starts_with("images/") {
            Some(Category::Image)
        } else {
            None
        }
    }
}

/// Paths grouped by category, each list in input order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Classified {
    pub logsheets: Vec<String>,
    pub teams: Vec<String>,
    pub images: Vec<String>,
}

impl Classified {
    pub fn total(&self) -> usize {
        self.logsheets.len() + self.teams.len() + self.images.len()
    }
}

/// Partition paths into logsheets, teams and images, discarding the rest
pub fn classify<I, S>(paths: I) -> Classified
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut classified = Classified::default();

    for path in paths {
        let path = path.as_ref();
        match Category::of(path) {
            Some(Category::Logsheet) => classified.logsheets.push(path.to_string()),
            Some(Category::Team) => classified.teams.push(path.to_string()),
            Some(Category::Image) => classified.images.push(path.to_string()),
            None => {}
        }
    }

    classified
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_rules() {
        assert_eq!(Category::of("logsheets/a.json"), Some(Category::Logsheet));
        assert_eq!(Category::of("logsheets/a.txt"), None);
        assert_eq!(Category::of("teams/x.json"), Some(Category::Team));
        assert_eq!(Category::of("teams/readme.md"), None);
        assert_eq!(Category::of("images/x.png"), Some(Category::Image));
        assert_eq!(Category::of("images/nested/x.json"), Some(Category::Image));
        assert_eq!(Category::of("src/logsheets/a.json"), None);
        assert_eq!(Category::of("README.md"), None);
    }

    #[test]
    fn test_classify_preserves_input_order() {
        let files = vec![
            "teams/b.json",
            "logsheets/z.json",
            "README.md",
            "logsheets/a.json",
            "images/2.png",
            "images/1.png",
        ];

        let classified = classify(&files);
        assert_eq!(classified.logsheets, vec!["logsheets/z.json", "logsheets/a.json"]);
        assert_eq!(classified.teams, vec!["teams/b.json"]);
        assert_eq!(classified.images, vec!["images/2.png", "images/1.png"]);
        assert_eq!(classified.total(), 5);
    }

    #[test]
    fn test_each_path_lands_in_at_most_one_category() {
        let files = [
            "logsheets/a.json",
            "teams/a.json",
            "images/a.json",
            "logsheets/a.png",
            "other/a.json",
        ];

        for file in files {
            let classified = classify([file]);
            assert!(classified.total() <= 1, "{} classified twice", file);
        }
    }

    #[test]
    fn test_classify_empty() {
        let classified = classify(Vec::<String>::new());
        assert_eq!(classified, Classified::default());
        assert_eq!(classified.total(), 0);
    }
}
