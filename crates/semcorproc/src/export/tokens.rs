use std::path::{Path, PathBuf};

use semcor_corpus::{CorpusFile, LoadMode};
use semcor_lemma::LemmaDictionary;
use semcor_types::{PUNCTUATION_POS, TaggedNode};
use tracing::info;

use super::{ExportSummary, document_output, finish_tsv, tsv_writer};
use crate::error::{ExportError, Result};
use crate::report::report_token;
use crate::tokenize::word_tokens;

/// `wordform lemma pos` triples for every token and punctuation mark of `file`.
pub fn token_lines(
    file: &CorpusFile,
    dictionary: &LemmaDictionary,
    keep_multiword: bool,
    verbose: bool,
) -> Vec<[String; 3]> {
    let mut lines = Vec::new();
    for node in file.document().nodes() {
        if node.is_punctuation() {
            let text = node.text().to_string();
            lines.push([text.clone(), text, PUNCTUATION_POS.to_string()]);
        } else if node.is_word() {
            for token in word_tokens(dictionary, node, keep_multiword) {
                if verbose {
                    report_token(&format!("{}/{}", file.shortname(), token.wordform), &token);
                }
                lines.push([token.wordform, token.lemma, token.pos]);
            }
        }
    }
    lines
}

/// Write one token file per document below `dir`.
pub fn export_tokens(
    files: &[PathBuf],
    mode: LoadMode,
    dictionary: &LemmaDictionary,
    keep_multiword: bool,
    verbose: bool,
    dir: &Path,
) -> Result<ExportSummary> {
    if files.is_empty() {
        return Err(ExportError::NoInputs);
    }
    let mut rows = 0;
    for path in files {
        let file = CorpusFile::open(path, mode)?;
        let output = document_output(dir, &file);
        let mut writer = tsv_writer(&output)?;
        for line in token_lines(&file, dictionary, keep_multiword, verbose) {
            writer.write_record(&line)?;
            rows += 1;
        }
        finish_tsv(writer, &output)?;
        info!("file \"{}\" processed", file.shortname());
    }
    Ok(ExportSummary {
        files: files.len(),
        rows,
        output: dir.to_path_buf(),
    })
}
