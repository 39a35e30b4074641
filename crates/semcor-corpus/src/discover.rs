use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

/// Directory that holds the tagged documents of a subcorpus.
pub const TAGFILES_DIR: &str = "tagfiles";

/// The Brown subsets shipped with SemCor.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Subcorpus {
    Brown1,
    Brown2,
    BrownV,
    All,
}

impl Subcorpus {
    /// Parse a subcorpus name; `semcor` is accepted as an alias for `all`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "brown1" => Some(Subcorpus::Brown1),
            "brown2" => Some(Subcorpus::Brown2),
            "brownv" => Some(Subcorpus::BrownV),
            "all" | "semcor" => Some(Subcorpus::All),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Subcorpus::Brown1 => "brown1",
            Subcorpus::Brown2 => "brown2",
            Subcorpus::BrownV => "brownv",
            Subcorpus::All => "all",
        }
    }

    /// Subcorpus directories below a corpus root.
    pub fn paths(self, root: impl AsRef<Path>) -> Vec<PathBuf> {
        let root = root.as_ref();
        match self {
            Subcorpus::All => [Subcorpus::Brown1, Subcorpus::Brown2, Subcorpus::BrownV]
                .into_iter()
                .map(|s| root.join(s.name()))
                .collect(),
            single => vec![root.join(single.name())],
        }
    }
}

/// Collect corpus documents from files and directories.
///
/// A file is accepted when it sits in a `tagfiles` directory inside a
/// subcorpus directory. A directory either is a subcorpus (it contains
/// `tagfiles`) or is searched recursively for such files. Anything else is
/// reported and skipped. The result is sorted and free of duplicates.
pub fn list_files<I, P>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut files = BTreeSet::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_file() && is_tagfile(path) {
            files.insert(path.to_path_buf());
        } else if path.is_dir() {
            let tagfiles = path.join(TAGFILES_DIR);
            let (root, depth) = if tagfiles.is_dir() {
                (tagfiles, 1)
            } else {
                (path.to_path_buf(), usize::MAX)
            };
            for entry in WalkDir::new(&root).min_depth(1).max_depth(depth) {
                match entry {
                    Ok(entry) => {
                        if entry.file_type().is_file()
                            && !is_hidden(entry.path())
                            && is_tagfile(entry.path())
                        {
                            files.insert(entry.into_path());
                        }
                    }
                    Err(err) => warn!("skipping unreadable entry under {}: {err}", root.display()),
                }
            }
        } else {
            warn!(
                "invalid corpus path {}: corpus files must live in a \"{}\" directory \
                 inside a subcorpus directory",
                path.display(),
                TAGFILES_DIR
            );
        }
    }
    files.into_iter().collect()
}

fn is_tagfile(path: &Path) -> bool {
    let Some(parent) = path.parent() else {
        return false;
    };
    parent.file_name().is_some_and(|name| name == TAGFILES_DIR)
        && parent.parent().and_then(Path::file_name).is_some()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}
