//! Flatten a parsed document into positional [`TextItem`]s.

use std::collections::VecDeque;
use std::slice;

use semcor_corpus::{Document, Node, Paragraph, Sentence};
use semcor_lemma::LemmaDictionary;
use semcor_types::{TaggedNode, TextItem, Token};

/// Resolve a `<wf>` node and split it into components unless multiwords are kept.
pub fn word_tokens(dictionary: &LemmaDictionary, node: &Node, keep_multiword: bool) -> Vec<Token> {
    let token = dictionary.token_from_tag(node);
    if keep_multiword {
        vec![token]
    } else {
        dictionary.expand(&token)
    }
}

/// Lazily walk `document` paragraph by paragraph, sentence by sentence.
///
/// Only the first item emitted inside a paragraph (or sentence) carries the
/// matching start flag, even when that item is the first component of a
/// multiword expansion. Components inherit the sense key of their parent.
pub fn tokenize<'a>(
    document: &'a Document,
    dictionary: &'a LemmaDictionary,
    keep_multiword: bool,
) -> DocumentTokens<'a> {
    DocumentTokens {
        dictionary,
        keep_multiword,
        paragraphs: document.paragraphs().iter(),
        sentences: Default::default(),
        nodes: Default::default(),
        pending: VecDeque::new(),
        paragraph_start: false,
        sentence_start: false,
    }
}

/// Iterator returned by [`tokenize`].
pub struct DocumentTokens<'a> {
    dictionary: &'a LemmaDictionary,
    keep_multiword: bool,
    paragraphs: slice::Iter<'a, Paragraph>,
    sentences: slice::Iter<'a, Sentence>,
    nodes: slice::Iter<'a, Node>,
    pending: VecDeque<TextItem>,
    paragraph_start: bool,
    sentence_start: bool,
}

impl DocumentTokens<'_> {
    fn take_flags(&mut self) -> (bool, bool) {
        (
            std::mem::take(&mut self.paragraph_start),
            std::mem::take(&mut self.sentence_start),
        )
    }

    fn emit(&mut self, node: &Node) {
        if node.is_punctuation() {
            let (paragraph_start, sentence_start) = self.take_flags();
            self.pending.push_back(TextItem::punctuation(
                node.text(),
                paragraph_start,
                sentence_start,
            ));
        } else if node.is_word() {
            let token = self.dictionary.token_from_tag(node);
            let sense_key = token.sense_key().map(str::to_owned);
            let parts = if self.keep_multiword {
                vec![token]
            } else {
                self.dictionary.expand(&token)
            };
            for part in parts {
                let (paragraph_start, sentence_start) = self.take_flags();
                self.pending.push_back(TextItem::word(
                    part,
                    sense_key.clone(),
                    paragraph_start,
                    sentence_start,
                ));
            }
        }
    }
}

impl Iterator for DocumentTokens<'_> {
    type Item = TextItem;

    fn next(&mut self) -> Option<TextItem> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(item);
            }
            if let Some(node) = self.nodes.next() {
                self.emit(node);
                continue;
            }
            if let Some(sentence) = self.sentences.next() {
                self.nodes = sentence.nodes().iter();
                self.sentence_start = true;
                continue;
            }
            let paragraph = self.paragraphs.next()?;
            self.sentences = paragraph.sentences().iter();
            self.paragraph_start = true;
        }
    }
}
