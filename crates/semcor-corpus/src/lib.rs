//! Load SemCor-style corpus files into a read-only paragraph/sentence tree.
//!
//! SemCor tag files are SGML rather than XML: attribute values are usually
//! unquoted (`<wf cmd=done pos=NN lemma=jury wnsn=1 lexsn=1:14:00::>`) and
//! the occasional `&` shows up unescaped in running text. The parser here is
//! lenient about both and keeps only the structure the converters need:
//! `<p>`, `<s>`, `<wf>` and `<punc>`.
//!
//! # Features
//! - Runtime backing choice: memory-map source files or read them into owned
//!   buffers via [`LoadMode`].
//! - Fixed node interface: leaves implement [`semcor_types::TaggedNode`].
//! - Corpus discovery: [`list_files`] finds documents that follow the
//!   `<root>/<subcorpus>/tagfiles/<file>` layout; [`Subcorpus`] names the
//!   standard Brown subsets.
//!
//! # Example
//! ```no_run
//! use semcor_corpus::{CorpusFile, LoadMode, Subcorpus, list_files};
//!
//! # fn main() -> anyhow::Result<()> {
//! let files = list_files(Subcorpus::Brown1.paths("/path/to/semcor"));
//! for path in &files {
//!     let file = CorpusFile::open(path, LoadMode::Mmap)?;
//!     println!("{}/{}: {} words", file.concordance(), file.shortname(),
//!         file.document().word_count());
//! }
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p semcor-corpus --example stats -- <corpus-root>`.

mod discover;
mod document;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use memmap2::Mmap;

pub use discover::{Subcorpus, TAGFILES_DIR, list_files};
pub use document::{Document, Node, Paragraph, Sentence};

/// Strategy for reading corpus files.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map each file (fast, zero-copy while parsing).
    #[default]
    Mmap,
    /// Read each file into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer> {
    match mode {
        LoadMode::Mmap => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            // Empty files cannot be mapped on every platform.
            let len = file
                .metadata()
                .with_context(|| format!("stat {}", path.display()))?
                .len();
            if len == 0 {
                return Ok(Buffer::Owned(Vec::new()));
            }
            unsafe { Mmap::map(&file) }
                .map(Buffer::Mmap)
                .with_context(|| format!("mmap {}", path.display()))
        }
        LoadMode::Owned => {
            let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

impl Document {
    /// Read and parse a corpus file.
    pub fn load(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let path = path.as_ref();
        let buffer = load_file(path, mode)?;
        let text = std::str::from_utf8(buffer.as_slice())
            .with_context(|| format!("{} is not valid utf8", path.display()))?;
        Document::parse_str(text).with_context(|| format!("parse {}", path.display()))
    }
}

/// One source document together with the names derived from its location.
#[derive(Debug)]
pub struct CorpusFile {
    concordance: String,
    shortname: String,
    path: PathBuf,
    document: Document,
}

impl CorpusFile {
    /// Load `<root>/<concordance>/tagfiles/<shortname>`.
    pub fn open(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let path = path.as_ref();
        let document = Document::load(path, mode)?;
        Ok(Self {
            concordance: concordance_name(path),
            shortname: shortname(path),
            path: path.to_path_buf(),
            document,
        })
    }

    /// Wrap an already parsed document, e.g. one built from a string.
    pub fn from_document(
        concordance: impl Into<String>,
        shortname: impl Into<String>,
        document: Document,
    ) -> Self {
        let concordance = concordance.into();
        let shortname = shortname.into();
        Self {
            path: PathBuf::from(&concordance).join(TAGFILES_DIR).join(&shortname),
            concordance,
            shortname,
            document,
        }
    }

    /// Subcorpus name, taken from the directory above `tagfiles`.
    pub fn concordance(&self) -> &str {
        &self.concordance
    }

    /// File stem, e.g. `br-a01`.
    pub fn shortname(&self) -> &str {
        &self.shortname
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn concordance_name(path: &Path) -> String {
    path.parent()
        .and_then(Path::parent)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn shortname(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_names_from_layout() {
        let path = Path::new("/corpora/semcor/brown2/tagfiles/br-e01.xml");
        assert_eq!(concordance_name(path), "brown2");
        assert_eq!(shortname(path), "br-e01");
    }

    #[test]
    fn missing_grandparent_yields_empty_concordance() {
        assert_eq!(concordance_name(Path::new("br-a01")), "");
    }

    #[test]
    fn owned_and_mmap_modes_agree() {
        let dir = tempfile::tempdir().unwrap();
        let tagfiles = dir.path().join("brown1").join(TAGFILES_DIR);
        std::fs::create_dir_all(&tagfiles).unwrap();
        let path = tagfiles.join("br-a01");
        std::fs::write(
            &path,
            "<p pnum=1>\n<s snum=1>\n\
             <wf cmd=done pos=NN lemma=jury wnsn=1 lexsn=1:14:00::>jury</wf>\n\
             <punc>.</punc>\n</s>\n</p>\n",
        )
        .unwrap();

        let mapped = CorpusFile::open(&path, LoadMode::Mmap).unwrap();
        let owned = CorpusFile::open(&path, LoadMode::Owned).unwrap();
        assert_eq!(mapped.concordance(), "brown1");
        assert_eq!(mapped.shortname(), "br-a01");
        assert_eq!(mapped.document(), owned.document());
        assert_eq!(mapped.document().word_count(), 1);
    }

    #[test]
    fn empty_file_loads_as_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty");
        std::fs::write(&path, "").unwrap();
        let doc = Document::load(&path, LoadMode::Mmap).unwrap();
        assert!(doc.paragraphs().is_empty());
    }
}
