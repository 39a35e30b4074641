use std::borrow::Cow;

use anyhow::{Context, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, BytesText, Event};
use semcor_types::TaggedNode;
use tracing::debug;

/// A `<wf>` or `<punc>` element with its text and attributes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node {
    name: String,
    text: String,
    attributes: Vec<(String, String)>,
}

impl Node {
    pub fn new(name: &str, text: impl Into<String>, attributes: Vec<(String, String)>) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            text: text.into(),
            attributes,
        }
    }

    /// Attributes in source order, keys lowercased.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl TaggedNode for Node {
    fn tag_name(&self) -> &str {
        &self.name
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Sentence {
    nodes: Vec<Node>,
}

impl Sentence {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Paragraph {
    sentences: Vec<Sentence>,
}

impl Paragraph {
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Every node of the paragraph in document order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.sentences.iter().flat_map(|s| s.nodes.iter())
    }
}

/// Parsed corpus document. Immutable once built.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Parse SemCor SGML from memory.
    ///
    /// Leaves found outside an open `<s>` are placed in an implicit sentence
    /// (and paragraph) so no token is dropped.
    pub fn parse_str(source: &str) -> Result<Self> {
        let source = quote_attributes(source);
        let mut reader = Reader::from_str(&source);
        let config = reader.config_mut();
        config.trim_text(true);
        config.check_end_names = false;

        let mut tree = TreeBuilder::default();
        let mut leaf: Option<Node> = None;
        loop {
            let event = reader.read_event().with_context(|| {
                format!("malformed markup near byte {}", reader.buffer_position())
            })?;
            match event {
                Event::Start(start) => {
                    let name = element_name(start.name().as_ref());
                    match name.as_str() {
                        "p" => tree.open_paragraph(),
                        "s" => tree.open_sentence(),
                        "wf" | "punc" => {
                            if let Some(unclosed) = leaf.take() {
                                tree.push(unclosed);
                            }
                            leaf = Some(Node::new(&name, String::new(), read_attributes(&start)));
                        }
                        _ => {}
                    }
                }
                Event::Empty(start) => {
                    let name = element_name(start.name().as_ref());
                    if matches!(name.as_str(), "wf" | "punc") {
                        tree.push(Node::new(&name, String::new(), read_attributes(&start)));
                    }
                }
                Event::Text(text) => {
                    if let Some(node) = leaf.as_mut() {
                        node.text.push_str(&decode_text(&text));
                    }
                }
                Event::CData(data) => {
                    if let Some(node) = leaf.as_mut() {
                        node.text.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::End(end) => match element_name(end.name().as_ref()).as_str() {
                    "wf" | "punc" => {
                        if let Some(node) = leaf.take() {
                            tree.push(node);
                        }
                    }
                    "s" => tree.close_sentence(),
                    "p" => tree.close_paragraph(),
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }
        if let Some(node) = leaf.take() {
            tree.push(node);
        }

        Ok(Self {
            paragraphs: tree.finish(),
        })
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Every `<wf>`/`<punc>` node in document order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.paragraphs.iter().flat_map(Paragraph::nodes)
    }

    /// Number of `<wf>` nodes.
    pub fn word_count(&self) -> usize {
        self.nodes().filter(|n| n.is_word()).count()
    }
}

#[derive(Default)]
struct TreeBuilder {
    done: Vec<Paragraph>,
    paragraph: Option<Paragraph>,
    sentence: Option<Sentence>,
}

impl TreeBuilder {
    fn open_paragraph(&mut self) {
        self.close_paragraph();
        self.paragraph = Some(Paragraph::default());
    }

    fn close_paragraph(&mut self) {
        self.close_sentence();
        if let Some(paragraph) = self.paragraph.take() {
            self.done.push(paragraph);
        }
    }

    fn open_sentence(&mut self) {
        self.close_sentence();
        self.sentence = Some(Sentence::default());
    }

    fn close_sentence(&mut self) {
        if let Some(sentence) = self.sentence.take() {
            self.paragraph
                .get_or_insert_with(Paragraph::default)
                .sentences
                .push(sentence);
        }
    }

    fn push(&mut self, node: Node) {
        self.sentence
            .get_or_insert_with(Sentence::default)
            .nodes
            .push(node);
    }

    fn finish(mut self) -> Vec<Paragraph> {
        self.close_paragraph();
        self.done
    }
}

/// Rewrite every start tag so its attribute values are double-quoted.
///
/// SemCor writes values bare (`lemma=o'clock`). Left as is, an apostrophe in
/// a bare value opens a quoted string that runs past the end of the tag.
/// Double-quoted values are kept; a single-quoted value is only taken as such
/// when its closing quote ends the value before the tag does.
fn quote_attributes(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = String::with_capacity(source.len() + source.len() / 8);
    let mut pos = 0;
    while let Some(offset) = source[pos..].find('<') {
        let start = pos + offset;
        out.push_str(&source[pos..start]);
        let name_start = start + 1;
        if !bytes.get(name_start).is_some_and(u8::is_ascii_alphabetic) {
            out.push('<');
            pos = name_start;
            continue;
        }
        pos = copy_start_tag(source, name_start, &mut out);
    }
    out.push_str(&source[pos..]);
    out
}

/// Copy the start tag whose name begins at `name_start`; returns the offset
/// just past it.
fn copy_start_tag(source: &str, name_start: usize, out: &mut String) -> usize {
    let bytes = source.as_bytes();
    let mut i = scan(bytes, name_start, |b| {
        b.is_ascii_whitespace() || matches!(b, b'/' | b'>')
    });
    out.push('<');
    out.push_str(&source[name_start..i]);
    loop {
        let gap = scan(bytes, i, |b| !b.is_ascii_whitespace());
        out.push_str(&source[i..gap]);
        i = gap;
        match bytes.get(i) {
            None => return i,
            Some(b'>') => {
                out.push('>');
                return i + 1;
            }
            Some(b'/') => {
                out.push('/');
                i += 1;
                continue;
            }
            Some(_) => {}
        }
        let key_end = scan(bytes, i, |b| {
            b.is_ascii_whitespace() || matches!(b, b'=' | b'/' | b'>')
        });
        out.push_str(&source[i..key_end]);
        i = key_end;
        let eq = scan(bytes, i, |b| !b.is_ascii_whitespace());
        if bytes.get(eq) != Some(&b'=') {
            continue;
        }
        let value_start = scan(bytes, eq + 1, |b| !b.is_ascii_whitespace());
        let (value, next) = attribute_value(source, value_start);
        out.push_str("=\"");
        push_escaped(out, value);
        out.push('"');
        i = next;
    }
}

/// The raw value starting at `start` and the offset just past it.
fn attribute_value(source: &str, start: usize) -> (&str, usize) {
    let bytes = source.as_bytes();
    if let Some(&quote) = bytes.get(start)
        && matches!(quote, b'"' | b'\'')
        && let Some(len) = source[start + 1..].find(quote as char)
    {
        let close = start + 1 + len;
        let closes_value = quote == b'"'
            || (!source[start + 1..close].contains('>')
                && bytes
                    .get(close + 1)
                    .is_none_or(|&b| b.is_ascii_whitespace() || matches!(b, b'/' | b'>')));
        if closes_value {
            return (&source[start + 1..close], close + 1);
        }
    }
    let mut end = scan(bytes, start, |b| b.is_ascii_whitespace() || b == b'>');
    if end > start && bytes[end - 1] == b'/' && bytes.get(end) == Some(&b'>') {
        end -= 1;
    }
    (&source[start..end], end)
}

fn scan(bytes: &[u8], from: usize, stop: impl Fn(u8) -> bool) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| stop(b))
        .map_or(bytes.len(), |offset| from + offset)
}

/// Escape a value for a double-quoted attribute. Entities already present
/// are left alone.
fn push_escaped(out: &mut String, value: &str) {
    for (i, c) in value.char_indices() {
        match c {
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '&' if !starts_entity(&value[i + 1..]) => out.push_str("&amp;"),
            c => out.push(c),
        }
    }
}

fn starts_entity(rest: &str) -> bool {
    rest.find(';').is_some_and(|end| {
        end > 0
            && rest[..end]
                .bytes()
                .enumerate()
                .all(|(i, b)| b.is_ascii_alphanumeric() || (i == 0 && b == b'#'))
    })
}

fn element_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

fn read_attributes(start: &BytesStart<'_>) -> Vec<(String, String)> {
    let mut attributes = Vec::new();
    for attr in start.html_attributes() {
        match attr {
            Ok(attr) => {
                let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
                let value = match attr.unescape_value() {
                    Ok(value) => value.into_owned(),
                    Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
                };
                attributes.push((key, value));
            }
            Err(err) => debug!("skipping undecodable attribute: {err}"),
        }
    }
    attributes
}

fn decode_text<'a>(text: &'a BytesText<'a>) -> Cow<'a, str> {
    match text.unescape() {
        Ok(decoded) => decoded,
        Err(_) => String::from_utf8_lossy(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<contextfile concordance=brown>
<context filename=br-a01 paras=yes>
<p pnum=1>
<s snum=1>
<wf cmd=ignore pos=DT>The</wf>
<wf cmd=done rdf=group pos=NNP lemma=group wnsn=1 lexsn=1:03:00:: pn=group>Fulton_County_Grand_Jury</wf>
<wf cmd=done pos=VB lemma=say wnsn=1 lexsn=2:32:00::>said</wf>
<punc>.</punc>
</s>
<s snum=2>
<wf cmd=done pos=NN lemma=jury wnsn=1 lexsn=1:14:00::>jury</wf>
</s>
</p>
<p pnum=2>
<s snum=3>
<wf cmd=ignore pos=CC>and</wf>
</s>
</p>
</context>
</contextfile>
"#;

    #[test]
    fn builds_paragraph_sentence_tree() {
        let doc = Document::parse_str(SAMPLE).unwrap();
        assert_eq!(doc.paragraphs().len(), 2);
        assert_eq!(doc.paragraphs()[0].sentences().len(), 2);
        assert_eq!(doc.paragraphs()[0].sentences()[0].nodes().len(), 4);
        assert_eq!(doc.word_count(), 5);
    }

    #[test]
    fn reads_unquoted_attributes() {
        let doc = Document::parse_str(SAMPLE).unwrap();
        let said = doc.nodes().find(|n| n.text() == "said").unwrap();
        assert_eq!(said.tag_name(), "wf");
        assert_eq!(said.attribute("pos"), Some("VB"));
        assert_eq!(said.attribute("lemma"), Some("say"));
        assert_eq!(said.attribute("lexsn"), Some("2:32:00::"));
        assert_eq!(said.attribute("LEMMA"), Some("say"));
        assert_eq!(said.attribute("wnsn"), Some("1"));
        assert_eq!(said.attribute("ot"), None);
    }

    #[test]
    fn punctuation_nodes_keep_text() {
        let doc = Document::parse_str(SAMPLE).unwrap();
        let punc: Vec<_> = doc.nodes().filter(|n| n.is_punctuation()).collect();
        assert_eq!(punc.len(), 1);
        assert_eq!(punc[0].text(), ".");
    }

    #[test]
    fn stray_leaves_get_implicit_scopes() {
        let doc = Document::parse_str("<wf pos=NN>cat</wf>\n<p>\n<wf pos=NN>dog</wf>\n</p>\n")
            .unwrap();
        assert_eq!(doc.paragraphs().len(), 2);
        assert_eq!(doc.paragraphs()[0].nodes().next().unwrap().text(), "cat");
        assert_eq!(doc.paragraphs()[1].nodes().next().unwrap().text(), "dog");
    }

    #[test]
    fn unescaped_ampersand_is_kept_verbatim() {
        let doc = Document::parse_str("<p><s><wf pos=NNP>AT&T</wf><wf pos=NN>&amp;</wf></s></p>")
            .unwrap();
        let texts: Vec<_> = doc.nodes().map(|n| n.text().to_string()).collect();
        assert_eq!(texts, vec!["AT&T", "&"]);
    }

    #[test]
    fn apostrophes_in_bare_values_stay_inside_the_tag() {
        let doc = Document::parse_str(
            "<p><s><wf cmd=done pos=RB lemma=o'clock wnsn=1 lexsn=4:02:00::>o'clock</wf>\n\
             <wf cmd=done pos=NN lemma=jury>jury</wf>\n\
             <wf cmd=done pos=PRP lemma=it's>it's</wf>\n\
             <wf cmd=done pos=NN lemma=ma'am>Ma'am</wf></s></p>",
        )
        .unwrap();
        let nodes: Vec<_> = doc.nodes().collect();
        let texts: Vec<_> = nodes.iter().map(|n| n.text()).collect();
        assert_eq!(texts, vec!["o'clock", "jury", "it's", "Ma'am"]);
        assert_eq!(nodes[0].attribute("lemma"), Some("o'clock"));
        assert_eq!(nodes[0].attribute("lexsn"), Some("4:02:00::"));
        assert_eq!(nodes[2].attribute("lemma"), Some("it's"));
        assert_eq!(nodes[3].attribute("lemma"), Some("ma'am"));
        assert_eq!(nodes[3].attribute("pos"), Some("NN"));
    }

    #[test]
    fn quoting_keeps_existing_quotes_and_escapes_bare_values() {
        assert_eq!(
            quote_attributes("<wf a=x\"y b='q r' c d=AT&T e=&amp; f=\"1 2\">t</wf>"),
            "<wf a=\"x&quot;y\" b=\"q r\" c d=\"AT&amp;T\" e=\"&amp;\" f=\"1 2\">t</wf>"
        );
        assert_eq!(quote_attributes("<wf pos=NN/>"), "<wf pos=\"NN\"/>");
        assert_eq!(quote_attributes("<wf lemma='s>'s</wf>"), "<wf lemma=\"'s\">'s</wf>");
        assert_eq!(quote_attributes("a < b"), "a < b");
    }

    #[test]
    fn quoted_and_escaped_values_decode() {
        let doc = Document::parse_str(
            "<p><s><wf pos=\"NNP\" lemma=AT&T>AT&T</wf><wf pos=NN lemma=say\"so>x</wf></s></p>",
        )
        .unwrap();
        let nodes: Vec<_> = doc.nodes().collect();
        assert_eq!(nodes[0].attribute("pos"), Some("NNP"));
        assert_eq!(nodes[0].attribute("lemma"), Some("AT&T"));
        assert_eq!(nodes[1].attribute("lemma"), Some("say\"so"));
    }

    #[test]
    fn uppercase_tags_and_empty_leaves() {
        let doc = Document::parse_str("<P><S><WF POS=DT>the</WF><wf pos=NN/></S></P>").unwrap();
        let nodes: Vec<_> = doc.nodes().collect();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].tag_name(), "wf");
        assert_eq!(nodes[0].attribute("pos"), Some("DT"));
        assert_eq!(nodes[1].text(), "");
    }
}
