use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use semcor_corpus::{CorpusFile, LoadMode};
use semcor_lemma::LemmaDictionary;
use semcor_types::TaggedNode;
use tracing::info;

use super::{ExportSummary, document_output, ensure_parent};
use crate::error::{ExportError, Result};
use crate::tokenize::word_tokens;

/// One line per paragraph: ` wordform/pos` per token, punctuation glued on.
pub fn running_text(
    file: &CorpusFile,
    dictionary: &LemmaDictionary,
    keep_multiword: bool,
) -> Vec<String> {
    file.document()
        .paragraphs()
        .iter()
        .map(|paragraph| {
            let mut line = String::new();
            for node in paragraph.nodes() {
                if node.is_punctuation() {
                    line.push_str(node.text());
                } else if node.is_word() {
                    for token in word_tokens(dictionary, node, keep_multiword) {
                        line.push(' ');
                        line.push_str(&token.wordform);
                        line.push('/');
                        line.push_str(&token.pos);
                    }
                }
            }
            line
        })
        .collect()
}

/// Write one running-text file per document below `dir`.
pub fn export_running_text(
    files: &[PathBuf],
    mode: LoadMode,
    dictionary: &LemmaDictionary,
    keep_multiword: bool,
    dir: &Path,
) -> Result<ExportSummary> {
    if files.is_empty() {
        return Err(ExportError::NoInputs);
    }
    let mut rows = 0;
    for path in files {
        let file = CorpusFile::open(path, mode)?;
        let output = document_output(dir, &file);
        ensure_parent(&output)?;
        let handle = File::create(&output).map_err(|err| ExportError::io(&output, err))?;
        let mut writer = BufWriter::new(handle);
        for line in running_text(&file, dictionary, keep_multiword) {
            writeln!(writer, "{line}").map_err(|err| ExportError::io(&output, err))?;
            rows += 1;
        }
        writer.flush().map_err(|err| ExportError::io(&output, err))?;
        info!("file \"{}\" processed", file.shortname());
    }
    Ok(ExportSummary {
        files: files.len(),
        rows,
        output: dir.to_path_buf(),
    })
}
