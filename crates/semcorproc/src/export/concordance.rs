use std::path::{Path, PathBuf};

use semcor_corpus::{CorpusFile, LoadMode};
use semcor_lemma::LemmaDictionary;
use semcor_types::{NO_POS, TextItem};
use tracing::info;

use super::{ExportSummary, finish_tsv, tsv_writer};
use crate::context::{Boundary, build_context};
use crate::error::{ExportError, Result};
use crate::report::report_item;
use crate::tokenize::tokenize;

/// Which label leads the `token_id` of a concordance row.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum KindId {
    Wordform,
    Lemma,
    #[default]
    LemmaPos,
}

impl KindId {
    fn label(self, item: &TextItem) -> String {
        match self {
            KindId::Wordform => item.wordform.clone(),
            KindId::Lemma => item.lemma.clone(),
            KindId::LemmaPos => format!("{}/{}", item.lemma, item.pos),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConcordanceOptions {
    /// Lemmas whose occurrences become concordance lines.
    pub types: Vec<String>,
    pub left: usize,
    pub right: usize,
    pub boundary: Boundary,
    /// POS prefixes; empty keeps every POS.
    pub pos_filter: Vec<String>,
    pub add_closest: bool,
    pub kind_id: KindId,
    pub keep_multiword: bool,
    pub verbose: bool,
}

impl Default for ConcordanceOptions {
    fn default() -> Self {
        Self {
            types: Vec::new(),
            left: 10,
            right: 10,
            boundary: Boundary::default(),
            pos_filter: Vec::new(),
            add_closest: false,
            kind_id: KindId::default(),
            keep_multiword: false,
            verbose: false,
        }
    }
}

impl ConcordanceOptions {
    fn selects(&self, item: &TextItem) -> bool {
        item.is_word()
            && self.types.iter().any(|t| *t == item.lemma)
            && (self.pos_filter.is_empty()
                || self.pos_filter.iter().any(|p| item.pos.starts_with(p.as_str())))
    }
}

/// Default output name: the types joined by `_`, then `_conc.csv`.
pub fn concordance_file_name(types: &[String]) -> String {
    format!("{}_conc.csv", types.join("_"))
}

pub fn concordance_header(add_closest: bool) -> Vec<&'static str> {
    let mut header = vec!["concordance", "file", "token_id", "left", "wordform", "right"];
    if add_closest {
        header.extend(["last", "next"]);
    }
    header.extend(["lemma", "pos", "sense_key"]);
    header
}

/// One row per selected occurrence in `file`, with its context windows.
pub fn concordance_rows(
    file: &CorpusFile,
    dictionary: &LemmaDictionary,
    options: &ConcordanceOptions,
) -> Vec<Vec<String>> {
    let items: Vec<TextItem> =
        tokenize(file.document(), dictionary, options.keep_multiword).collect();
    let mut rows = Vec::new();
    for (index, item) in items.iter().enumerate() {
        if !options.selects(item) {
            continue;
        }
        let token_id = format!(
            "{}/{}/{}",
            options.kind_id.label(item),
            file.shortname(),
            index + 1
        );
        if options.verbose {
            report_item(&token_id, item);
        }
        let (left, right) = build_context(
            &items,
            index,
            options.left,
            options.right,
            options.boundary,
        );
        let mut row = vec![
            file.concordance().to_string(),
            file.shortname().to_string(),
            token_id,
            left,
            item.wordform.clone(),
            right,
        ];
        if options.add_closest {
            let last = index.checked_sub(1).and_then(|i| items.get(i));
            let next = items.get(index + 1);
            row.push(last.map_or(NO_POS, |i| i.wordform.as_str()).to_string());
            row.push(next.map_or(NO_POS, |i| i.wordform.as_str()).to_string());
        }
        row.push(item.lemma.clone());
        row.push(item.pos.clone());
        row.push(item.sense_key.clone().unwrap_or_else(|| NO_POS.to_string()));
        rows.push(row);
    }
    rows
}

/// Write concordance lines for `options.types` over `files` to `output`.
pub fn export_concordance(
    files: &[PathBuf],
    mode: LoadMode,
    dictionary: &LemmaDictionary,
    options: &ConcordanceOptions,
    output: &Path,
) -> Result<ExportSummary> {
    if options.types.is_empty() {
        return Err(ExportError::NoTypes);
    }
    if files.is_empty() {
        return Err(ExportError::NoInputs);
    }
    let mut writer = tsv_writer(output)?;
    writer.write_record(concordance_header(options.add_closest))?;
    let mut rows = 0;
    for path in files {
        let file = CorpusFile::open(path, mode)?;
        for row in concordance_rows(&file, dictionary, options) {
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
