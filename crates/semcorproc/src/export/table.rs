use std::path::{Path, PathBuf};

use semcor_corpus::{CorpusFile, LoadMode};
use semcor_lemma::LemmaDictionary;
use semcor_types::TaggedNode;
use tracing::info;

use super::{ExportSummary, finish_tsv, tsv_writer};
use crate::error::{ExportError, Result};
use crate::report::report_token;

/// Default table file name under the output root.
pub const TABLE_FILE: &str = "semcor2r.csv";
/// Default table file name when only sense-tagged tokens are kept.
pub const TABLE_SENSE_FILE: &str = "semcor2r_semtagged.csv";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TableOptions {
    pub keep_multiword: bool,
    /// Keep only sense-bearing tokens and add `wnsn`/`sense_key` columns.
    /// Implies `keep_multiword`.
    pub sense_only: bool,
    pub verbose: bool,
}

pub fn table_header(options: &TableOptions) -> Vec<&'static str> {
    let mut header = vec!["concordance", "file", "token_id", "wordform", "pos", "lemma"];
    if options.sense_only {
        header.extend(["wnsn", "sense_key"]);
    }
    header
}

/// One row per word token (or component) of `file`.
///
/// Positions in `token_id` run over the whole document and also count
/// punctuation and tokens filtered out in sense mode.
pub fn table_rows(
    file: &CorpusFile,
    dictionary: &LemmaDictionary,
    options: &TableOptions,
) -> Vec<Vec<String>> {
    let keep_multiword = options.keep_multiword || options.sense_only;
    let mut rows = Vec::new();
    let mut position = 0usize;
    for node in file.document().nodes() {
        if node.is_punctuation() {
            position += 1;
            continue;
        }
        if !node.is_word() {
            continue;
        }
        let token = dictionary.token_from_tag(node);
        if options.sense_only && token.sense.is_none() {
            position += 1;
            continue;
        }
        let parts = if keep_multiword {
            vec![token]
        } else {
            dictionary.expand(&token)
        };
        for part in parts {
            position += 1;
            let token_id = format!("{}/{}/{}", file.shortname(), part.wordform, position);
            if options.verbose {
                report_token(&token_id, &part);
            }
            let mut row = vec![
                file.concordance().to_string(),
                file.shortname().to_string(),
                token_id,
                part.wordform,
                part.pos,
                part.lemma,
            ];
            if options.sense_only
                && let Some(sense) = part.sense
            {
                row.push(sense.wnsn);
                row.push(sense.sense_key);
            }
            rows.push(row);
        }
    }
    rows
}

/// Write the table for `files` to `output`.
pub fn export_table(
    files: &[PathBuf],
    mode: LoadMode,
    dictionary: &LemmaDictionary,
    options: &TableOptions,
    output: &Path,
) -> Result<ExportSummary> {
    if files.is_empty() {
        return Err(ExportError::NoInputs);
    }
    let mut writer = tsv_writer(output)?;
    writer.write_record(table_header(options))?;
    let mut rows = 0;
    for path in files {
        let file = CorpusFile::open(path, mode)?;
        for row in table_rows(&file, dictionary, options) {
            writer.write_record(&row)?;
            rows += 1;
        }
        info!("file \"{}\" processed", file.shortname());
    }
    finish_tsv(writer, output)?;
    Ok(ExportSummary {
        files: files.len(),
        rows,
        output: output.to_path_buf(),
    })
}
