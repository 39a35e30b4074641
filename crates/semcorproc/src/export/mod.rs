//! Converters from loaded corpus files to dictionaries, tables, concordances
//! and plain-text renditions.
//!
//! Every exporter walks its input files one at a time and reports an
//! [`ExportSummary`] once the last one is written.

mod concordance;
mod dictionary;
mod running;
mod table;
mod tokens;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use semcor_corpus::CorpusFile;
use tracing::warn;

use crate::error::{ExportError, Result};

pub use concordance::{
    ConcordanceOptions, KindId, concordance_file_name, concordance_header, concordance_rows,
    export_concordance,
};
pub use dictionary::{build_dictionary, export_dictionary, load_or_build_dictionary};
pub use running::{export_running_text, running_text};
pub use table::{
    TABLE_FILE, TABLE_SENSE_FILE, TableOptions, export_table, table_header, table_rows,
};
pub use tokens::{export_tokens, token_lines};

/// Default directory for per-document token files.
pub const TOKENS_DIR: &str = "typetoken";
/// Default directory for per-document running text.
pub const RUNNING_TEXT_DIR: &str = "running_text";

/// What an exporter wrote.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExportSummary {
    pub files: usize,
    pub rows: usize,
    pub output: PathBuf,
}

/// Create the requested output directory, falling back to `default`.
///
/// Without a request the default is used directly. A directory that cannot
/// be created is reported and replaced by the default, which must succeed.
pub fn output_dir(requested: Option<&Path>, default: &Path) -> Result<PathBuf> {
    if let Some(dir) = requested {
        match fs::create_dir_all(dir) {
            Ok(()) => return Ok(dir.to_path_buf()),
            Err(err) => warn!(
                "cannot create output directory {}: {err}; writing to {} instead",
                dir.display(),
                default.display()
            ),
        }
    }
    fs::create_dir_all(default).map_err(|err| ExportError::io(default, err))?;
    Ok(default.to_path_buf())
}

/// Tab-separated writer that never quotes, so fields land verbatim.
pub(crate) fn tsv_writer(path: &Path) -> Result<csv::Writer<BufWriter<File>>> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|err| ExportError::io(path, err))?;
    Ok(csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(BufWriter::new(file)))
}

pub(crate) fn finish_tsv<W: Write>(mut writer: csv::Writer<W>, path: &Path) -> Result<()> {
    writer.flush().map_err(|err| ExportError::io(path, err))
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| ExportError::io(parent, err))?;
    }
    Ok(())
}

/// `<dir>/<concordance>/<shortname>.txt`
pub(crate) fn document_output(dir: &Path, file: &CorpusFile) -> PathBuf {
    dir.join(file.concordance())
        .join(format!("{}.txt", file.shortname()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use semcor_corpus::Document;

    #[test]
    fn output_dir_uses_request_when_possible() {
        let tmp = tempfile::tempdir().unwrap();
        let requested = tmp.path().join("a").join("b");
        let default = tmp.path().join("default");
        assert_eq!(output_dir(Some(&requested), &default).unwrap(), requested);
        assert!(requested.is_dir());
        assert!(!default.exists());
    }

    #[test]
    fn output_dir_falls_back_to_default() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("taken");
        fs::write(&blocker, "not a directory").unwrap();
        let default = tmp.path().join("default");
        assert_eq!(output_dir(Some(&blocker), &default).unwrap(), default);
        assert!(default.is_dir());
        assert_eq!(output_dir(None, &default).unwrap(), default);
    }

    #[test]
    fn per_document_paths_follow_concordance() {
        let file = CorpusFile::from_document("brown2", "br-e01", Document::default());
        assert_eq!(
            document_output(Path::new("out"), &file),
            Path::new("out").join("brown2").join("br-e01.txt")
        );
    }

    #[test]
    fn tsv_writer_does_not_quote() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("x.csv");
        let mut writer = tsv_writer(&path).unwrap();
        writer.write_record(["a \"b\"", "c,d", "``"]).unwrap();
        finish_tsv(writer, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a \"b\"\tc,d\t``\n");
    }
}
