//! Shared value types for SemCor-style annotated corpora.
//!
//! A corpus document is a tree of paragraphs (`<p>`), sentences (`<s>`),
//! tagged word forms (`<wf>`) and punctuation (`<punc>`). Loaders expose the
//! leaves through the [`TaggedNode`] trait; the lemma crate turns them into
//! [`Token`]s and the tokenizer flattens those into [`TextItem`]s.
//!
//! Every value here is immutable once built. Resolution outcomes travel with
//! the value as a [`Resolution`] pair instead of being reported on the side.
//!
//! ```rust
//! use semcor_types::{Resolution, Status, Token, is_closed_class};
//!
//! let token = Token::new("Fulton_County", "NNP", "fulton_county", Resolution::OK);
//! assert!(token.is_multiword());
//! assert!(is_closed_class("PRP$"));
//! assert_eq!(Status::Unsure.to_string(), "unsure");
//! ```

use std::borrow::Cow;
use std::fmt;

/// Character joining the parts of a multiword expression (`New_York`).
pub const JOIN_MARKER: char = '_';

/// POS value used when a tag carries no `pos` attribute.
pub const NO_POS: &str = "NA";

/// POS value written for punctuation nodes.
pub const PUNCTUATION_POS: &str = "punc";

/// Penn tags for function words whose lemma defaults to the lowercased form.
pub const CLOSED_CLASS_TAGS: [&str; 17] = [
    "EX", "IN", "PDT", "DT", "POS", "PRP", "PRP$", "RP", "TO", "UH", "WDT", "LS", "WP", "WP$",
    "CC", "CD", "FW",
];

/// Whether `pos` belongs to [`CLOSED_CLASS_TAGS`].
pub fn is_closed_class(pos: &str) -> bool {
    CLOSED_CLASS_TAGS.contains(&pos)
}

/// Outcome of resolving one attribute of a token.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Status {
    #[default]
    Ok,
    Unsure,
}

impl Status {
    pub fn is_ok(self) -> bool {
        matches!(self, Status::Ok)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Ok => "ok",
            Status::Unsure => "unsure",
        })
    }
}

/// POS and lemma resolution outcomes for a single token.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Resolution {
    pub pos: Status,
    pub lemma: Status,
}

impl Resolution {
    pub const OK: Resolution = Resolution {
        pos: Status::Ok,
        lemma: Status::Ok,
    };

    pub fn new(pos: Status, lemma: Status) -> Self {
        Self { pos, lemma }
    }

    /// True when neither POS nor lemma is unsure.
    pub fn is_sure(self) -> bool {
        self.pos.is_ok() && self.lemma.is_ok()
    }
}

/// Word-sense annotation carried by a tag with a `wnsn` attribute.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SenseInfo {
    /// Raw `wnsn` value; may list several senses (`1;2`).
    pub wnsn: String,
    /// `lemma%lexsn`.
    pub sense_key: String,
}

/// One surface word occurrence with its resolved POS and lemma.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub wordform: String,
    pub pos: String,
    pub lemma: String,
    pub sense: Option<SenseInfo>,
    pub status: Resolution,
}

impl Token {
    pub fn new(
        wordform: impl Into<String>,
        pos: impl Into<String>,
        lemma: impl Into<String>,
        status: Resolution,
    ) -> Self {
        Self {
            wordform: wordform.into(),
            pos: pos.into(),
            lemma: lemma.into(),
            sense: None,
            status,
        }
    }

    pub fn with_sense(mut self, sense: SenseInfo) -> Self {
        self.sense = Some(sense);
        self
    }

    pub fn is_multiword(&self) -> bool {
        self.wordform.contains(JOIN_MARKER)
    }

    pub fn sense_key(&self) -> Option<&str> {
        self.sense.as_ref().map(|s| s.sense_key.as_str())
    }
}

/// Whether a [`TextItem`] came from a `<wf>` or a `<punc>` node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ItemKind {
    Word,
    Punctuation,
}

/// Positional item of a flattened document, used to rebuild context windows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextItem {
    pub kind: ItemKind,
    pub wordform: String,
    pub pos: String,
    pub lemma: String,
    pub sense_key: Option<String>,
    pub paragraph_start: bool,
    pub sentence_start: bool,
    /// Contribution to a context budget: 1 for words, 0 for punctuation.
    pub weight: usize,
    pub status: Resolution,
}

impl TextItem {
    pub fn word(
        token: Token,
        sense_key: Option<String>,
        paragraph_start: bool,
        sentence_start: bool,
    ) -> Self {
        Self {
            kind: ItemKind::Word,
            wordform: token.wordform,
            pos: token.pos,
            lemma: token.lemma,
            sense_key,
            paragraph_start,
            sentence_start,
            weight: 1,
            status: token.status,
        }
    }

    pub fn punctuation(text: &str, paragraph_start: bool, sentence_start: bool) -> Self {
        Self {
            kind: ItemKind::Punctuation,
            wordform: text.to_string(),
            pos: PUNCTUATION_POS.to_string(),
            lemma: text.to_string(),
            sense_key: None,
            paragraph_start,
            sentence_start,
            weight: 0,
            status: Resolution::OK,
        }
    }

    pub fn is_word(&self) -> bool {
        self.kind == ItemKind::Word
    }

    /// Surface text as it joins running text: words get a leading space.
    pub fn spaced(&self) -> Cow<'_, str> {
        match self.kind {
            ItemKind::Word => Cow::Owned(format!(" {}", self.wordform)),
            ItemKind::Punctuation => Cow::Borrowed(&self.wordform),
        }
    }
}

/// Read-only view of a tagged leaf in a parsed corpus document.
pub trait TaggedNode {
    /// Lowercased element name (`wf`, `punc`).
    fn tag_name(&self) -> &str;

    /// Text content; empty when the element had none.
    fn text(&self) -> &str;

    fn attribute(&self, name: &str) -> Option<&str>;

    fn is_word(&self) -> bool {
        self.tag_name() == "wf"
    }

    fn is_punctuation(&self) -> bool {
        self.tag_name() == "punc"
    }
}
