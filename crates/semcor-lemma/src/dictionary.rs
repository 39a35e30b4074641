use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use semcor_types::{JOIN_MARKER, TaggedNode, is_closed_class};
use serde::{Deserialize, Serialize};

/// POS tag to lemma, for one word form.
pub type PosLemmas = BTreeMap<String, String>;

/// Word form to POS-tagged lemmas, as observed in an annotated corpus.
///
/// Each `(wordform, pos)` pair maps to exactly one lemma: the first one
/// recorded. Serializes as `{"wordform": {"POS": "lemma"}}`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LemmaDictionary {
    entries: BTreeMap<String, PosLemmas>,
}

impl LemmaDictionary {
    /// Read a dictionary previously written by [`save`](Self::save).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("open lemma dictionary {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parse lemma dictionary {}", path.display()))
    }

    /// Write the dictionary as JSON, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        let file =
            File::create(path).with_context(|| format!("create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)
            .with_context(|| format!("write lemma dictionary {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("flush {}", path.display()))
    }

    /// Number of word forms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// POS-tagged lemmas recorded for a word form. Empty records count as absent.
    pub fn get(&self, wordform: &str) -> Option<&PosLemmas> {
        self.entries.get(wordform).filter(|entry| !entry.is_empty())
    }

    pub fn lemma(&self, wordform: &str, pos: &str) -> Option<&str> {
        self.get(wordform)
            .and_then(|entry| entry.get(pos))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PosLemmas)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, PosLemmas)> for LemmaDictionary {
    fn from_iter<T: IntoIterator<Item = (String, PosLemmas)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Accumulates dictionary entries from tagged corpus nodes.
#[derive(Debug, Default)]
pub struct DictionaryBuilder {
    entries: BTreeMap<String, PosLemmas>,
}

impl DictionaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one node.
    ///
    /// Only `<wf>` nodes count, and multiword forms are left to expansion
    /// time. A node with both `pos` and `lemma` records that lemma; a
    /// closed-class node without a lemma records its lowercased form. Either
    /// way an existing `(wordform, pos)` entry is never overwritten.
    pub fn record<N: TaggedNode + ?Sized>(&mut self, node: &N) {
        if !node.is_word() {
            return;
        }
        let wordform = node.text();
        if wordform.is_empty() || wordform.contains(JOIN_MARKER) {
            return;
        }
        let Some(pos) = node.attribute("pos").map(primary_pos).filter(|p| !p.is_empty()) else {
            return;
        };
        let lemma = match node.attribute("lemma").filter(|l| !l.is_empty()) {
            Some(lemma) => lemma.to_string(),
            None if is_closed_class(pos) => wordform.to_lowercase(),
            None => return,
        };
        self.entries
            .entry(wordform.to_string())
            .or_default()
            .entry(pos.to_string())
            .or_insert(lemma);
    }

    /// Record every node of a document, in order.
    pub fn record_document<'a, N, I>(&mut self, nodes: I)
    where
        N: TaggedNode + 'a,
        I: IntoIterator<Item = &'a N>,
    {
        for node in nodes {
            self.record(node);
        }
    }

    /// Word forms recorded so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn finish(self) -> LemmaDictionary {
        LemmaDictionary {
            entries: self.entries,
        }
    }
}

/// First tag of a compound POS such as `NN|VB`.
pub(crate) fn primary_pos(raw: &str) -> &str {
    raw.split_once('|').map_or(raw, |(head, _)| head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use semcor_corpus::Document;

    fn build(source: &str) -> LemmaDictionary {
        let doc = Document::parse_str(source).unwrap();
        let mut builder = DictionaryBuilder::new();
        builder.record_document(doc.nodes());
        builder.finish()
    }

    #[test]
    fn first_lemma_wins_per_pos() {
        let dict = build(
            "<p><s><wf pos=NN lemma=bank>bank</wf><wf pos=VB lemma=bank>bank</wf>\
             <wf pos=NN lemma=banking>bank</wf></s></p>",
        );
        let entry = dict.get("bank").unwrap();
        assert_eq!(entry.len(), 2);
        assert_eq!(dict.lemma("bank", "NN"), Some("bank"));
        assert_eq!(dict.lemma("bank", "VB"), Some("bank"));
    }

    #[test]
    fn closed_class_without_lemma_uses_lowercased_form() {
        let dict = build("<p><s><wf cmd=ignore pos=DT>The</wf></s></p>");
        assert_eq!(dict.lemma("The", "DT"), Some("the"));
    }

    #[test]
    fn closed_class_entries_merge_with_earlier_tags() {
        let dict = build(
            "<p><s><wf pos=IN lemma=that>that</wf><wf pos=WDT>that</wf>\
             <wf pos=IN>that</wf></s></p>",
        );
        assert_eq!(dict.lemma("that", "IN"), Some("that"));
        assert_eq!(dict.lemma("that", "WDT"), Some("that"));
        assert_eq!(dict.get("that").unwrap().len(), 2);
    }

    #[test]
    fn skips_multiwords_open_class_without_lemma_and_punctuation() {
        let dict = build(
            "<p><s><wf pos=VB lemma=take_over>took_over</wf><wf pos=NN>running</wf>\
             <punc>.</punc><wf>bare</wf></s></p>",
        );
        assert!(dict.is_empty());
    }

    #[test]
    fn compound_pos_keeps_first_tag() {
        let dict = build("<p><s><wf pos=NN|VB lemma=run>run</wf></s></p>");
        assert_eq!(dict.lemma("run", "NN"), Some("run"));
        assert_eq!(primary_pos("JJ"), "JJ");
    }

    #[test]
    fn saves_and_loads_json() {
        let dict = build("<p><s><wf pos=NN lemma=jury>jury</wf><wf pos=DT>an</wf></s></p>");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("lemma_dictionary.json");
        dict.save(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"{"an":{"DT":"an"},"jury":{"NN":"jury"}}"#);
        assert_eq!(LemmaDictionary::load(&path).unwrap(), dict);
    }

    #[test]
    fn empty_records_count_as_absent() {
        let dict: LemmaDictionary = serde_json::from_str(r#"{"odd":{}}"#).unwrap();
        assert_eq!(dict.len(), 1);
        assert!(dict.get("odd").is_none());
    }
}
