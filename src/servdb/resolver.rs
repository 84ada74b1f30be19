//! Physical path detection for logical datasets.
//!
//! Resolution is read-only and deterministic: given the same roots, sub-path
//! candidates and filesystem state, the same dataset always resolves to the
//! same file. Probe order is roots, then sub-paths (bare directory last),
//! then supported extensions, then the alternative stem.

use crate::model::{DatasetSource, FileType};
use std::path::{Path, PathBuf};

pub trait PathResolver {
    /// Best-matching physical file for the dataset, or `None` if it cannot
    /// be found under any configured root.
    fn detect_path(&self, source: &DatasetSource) -> Option<PathBuf>;
}

/// Production resolver probing a list of directories.
#[derive(Debug, Clone)]
pub struct SearchRoots {
    roots: Vec<PathBuf>,
    sub_paths: Vec<String>,
}

impl SearchRoots {
    pub fn new(roots: Vec<PathBuf>, sub_paths: Vec<String>) -> Self {
        Self { roots, sub_paths }
    }

    fn stems<'a>(source: &'a DatasetSource) -> Vec<&'a str> {
        let mut stems = vec![source.name];
        if let Some(alt) = source.alternative_name {
            if alt != source.name {
                stems.push(alt);
            }
        }
        stems
    }

    fn probe_dir(dir: &Path, source: &DatasetSource) -> Option<PathBuf> {
        for ext in source.supported.iter() {
            for stem in Self::stems(source) {
                // Conf files only ever live under the alternative stem when
                // one is configured, but probing both is harmless and keeps
                // the order obvious.
                let candidate = dir.join(format!("{}.{}", stem, ext.extension()));
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

impl PathResolver for SearchRoots {
    fn detect_path(&self, source: &DatasetSource) -> Option<PathBuf> {
        for root in &self.roots {
            if source.uses_sub_path {
                for sub in &self.sub_paths {
                    if let Some(path) = Self::probe_dir(&root.join(sub), source) {
                        return Some(path);
                    }
                }
            }
            if let Some(path) = Self::probe_dir(root, source) {
                return Some(path);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileTypeSet;
    use std::fs;

    fn source(uses_sub_path: bool) -> DatasetSource {
        DatasetSource {
            name: "item_db",
            supported: FileTypeSet::txt_and_conf(),
            alternative_name: None,
            uses_sub_path,
        }
    }

    fn resolver(root: &Path) -> SearchRoots {
        SearchRoots::new(
            vec![root.to_path_buf()],
            vec!["pre-re".to_string(), "re".to_string()],
        )
    }

    #[test]
    fn test_detect_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolver(dir.path()).detect_path(&source(false)), None);
    }

    #[test]
    fn test_detect_in_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("item_db.txt");
        fs::write(&path, "1,Apple\n").unwrap();

        assert_eq!(resolver(dir.path()).detect_path(&source(false)), Some(path));
    }

    #[test]
    fn test_sub_path_wins_over_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pre-re")).unwrap();
        let sub = dir.path().join("pre-re").join("item_db.txt");
        fs::write(&sub, "").unwrap();
        fs::write(dir.path().join("item_db.txt"), "").unwrap();

        assert_eq!(resolver(dir.path()).detect_path(&source(true)), Some(sub));
    }

    #[test]
    fn test_txt_probed_before_conf() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("item_db.txt");
        fs::write(&txt, "").unwrap();
        fs::write(dir.path().join("item_db.conf"), "").unwrap();

        assert_eq!(resolver(dir.path()).detect_path(&source(false)), Some(txt));
    }

    #[test]
    fn test_alternative_stem_is_probed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("constants.conf");
        fs::write(&path, "").unwrap();

        let source = DatasetSource {
            name: "const_db",
            supported: FileTypeSet::conf_only(),
            alternative_name: Some("constants"),
            uses_sub_path: false,
        };
        assert_eq!(resolver(dir.path()).detect_path(&source), Some(path));
    }

    #[test]
    fn test_unsupported_extension_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("item_db.conf"), "").unwrap();

        let txt_only = DatasetSource {
            supported: FileTypeSet::txt_only(),
            ..source(false)
        };
        assert_eq!(resolver(dir.path()).detect_path(&txt_only), None);
    }
}
