use semcor_types::{JOIN_MARKER, NO_POS, Resolution, SenseInfo, Status, TaggedNode, Token};

use crate::dictionary::{LemmaDictionary, PosLemmas, primary_pos};

impl LemmaDictionary {
    /// POS for a word form whose tag did not settle it.
    ///
    /// A word form recorded under a single tag gets that tag. Otherwise
    /// `default` is returned, flagged unsure only when the recorded tags
    /// disagree on the lemma.
    pub fn resolve_pos(&self, wordform: &str, default: &str) -> (String, Status) {
        let Some(entry) = self.get(wordform) else {
            return (default.to_string(), Status::Ok);
        };
        if entry.len() == 1
            && let Some(pos) = entry.keys().next()
        {
            return (pos.clone(), Status::Ok);
        }
        let status = match agreed_lemma(entry) {
            Some(_) => Status::Ok,
            None => Status::Unsure,
        };
        (default.to_string(), status)
    }

    /// Lemma for a word form under `pos`.
    ///
    /// `default` falls back to the lowercased word form when missing or
    /// empty. Unknown word forms keep the default and are unsure; known ones
    /// take the lemma recorded for `pos`, else the lemma every tag agrees on,
    /// else the default.
    pub fn resolve_lemma(
        &self,
        wordform: &str,
        pos: &str,
        default: Option<&str>,
    ) -> (String, Status) {
        let mut fallback = match default {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => wordform.to_lowercase(),
        };
        let Some(entry) = self.get(wordform) else {
            return (fallback, Status::Unsure);
        };
        let status = match agreed_lemma(entry) {
            Some(lemma) => {
                fallback = lemma.to_string();
                Status::Ok
            }
            None => Status::Unsure,
        };
        let lemma = entry.get(pos).cloned().unwrap_or(fallback);
        (lemma, status)
    }

    /// Build a token from a `<wf>` tag, resolving the lemma when absent.
    ///
    /// The POS comes straight from the tag, so only the lemma can be unsure.
    pub fn token_from_tag<N: TaggedNode + ?Sized>(&self, tag: &N) -> Token {
        let wordform = tag.text();
        let pos = tag.attribute("pos").map(primary_pos).unwrap_or(NO_POS);
        let (lemma, lemma_status) = match tag.attribute("lemma").filter(|l| !l.is_empty()) {
            Some(lemma) => (lemma.to_string(), Status::Ok),
            None => self.resolve_lemma(wordform, pos, None),
        };
        let sense = tag.attribute("wnsn").map(|wnsn| SenseInfo {
            wnsn: wnsn.to_string(),
            sense_key: format!("{}%{}", lemma, tag.attribute("lexsn").unwrap_or_default()),
        });
        Token {
            wordform: wordform.to_string(),
            pos: pos.to_string(),
            lemma,
            sense,
            status: Resolution::new(Status::Ok, lemma_status),
        }
    }

    /// Split a multiword token into one token per component.
    ///
    /// Components take their POS from the dictionary, falling back to the
    /// parent's. The default lemma of component `i` is part `i` of the
    /// parent lemma when both split into the same number of parts, else the
    /// whole parent lemma. Sense annotation stays with the parent. Tokens
    /// without the join marker come back unchanged.
    pub fn expand(&self, token: &Token) -> Vec<Token> {
        if !token.is_multiword() {
            return vec![token.clone()];
        }
        let parts: Vec<&str> = token.wordform.split(JOIN_MARKER).collect();
        let lemma_parts: Vec<&str> = token.lemma.split(JOIN_MARKER).collect();
        let aligned = lemma_parts.len() > 1 && lemma_parts.len() == parts.len();

        parts
            .iter()
            .enumerate()
            .map(|(index, part)| {
                let (pos, pos_status) = self.resolve_pos(part, &token.pos);
                let default = if aligned {
                    lemma_parts[index]
                } else {
                    token.lemma.as_str()
                };
                let (lemma, lemma_status) = self.resolve_lemma(part, &pos, Some(default));
                Token::new(*part, pos, lemma, Resolution::new(pos_status, lemma_status))
            })
            .collect()
    }
}

/// The lemma shared by every tag of an entry, if they all agree.
fn agreed_lemma(entry: &PosLemmas) -> Option<&str> {
    let mut lemmas = entry.values();
    let first = lemmas.next()?;
    lemmas.all(|l| l == first).then_some(first.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DictionaryBuilder;
    use semcor_corpus::{Document, Node};

    fn dict(source: &str) -> LemmaDictionary {
        let doc = Document::parse_str(source).unwrap();
        let mut builder = DictionaryBuilder::new();
        builder.record_document(doc.nodes());
        builder.finish()
    }

    fn wf(text: &str, attrs: &[(&str, &str)]) -> Node {
        Node::new(
            "wf",
            text,
            attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn bank_dict() -> LemmaDictionary {
        dict("<p><s><wf pos=NN lemma=bank>bank</wf><wf pos=VB lemma=bank>bank</wf>\
              <wf pos=VB lemma=see>saw</wf><wf pos=NN lemma=saw>saw</wf>\
              <wf pos=NN lemma=jury>jury</wf><wf pos=DT>the</wf>\
              <wf pos=VB lemma=run>running</wf><wf pos=RB lemma=back>back</wf></s></p>")
    }

    #[test]
    fn single_pos_entries_resolve_to_that_pos() {
        let dict = bank_dict();
        assert_eq!(dict.resolve_pos("jury", "NA"), ("NN".to_string(), Status::Ok));
        assert_eq!(dict.resolve_pos("the", "XX"), ("DT".to_string(), Status::Ok));
    }

    #[test]
    fn multi_pos_entries_keep_default() {
        let dict = bank_dict();
        assert_eq!(dict.resolve_pos("bank", "NA"), ("NA".to_string(), Status::Ok));
        assert_eq!(dict.resolve_pos("saw", "NA"), ("NA".to_string(), Status::Unsure));
    }

    #[test]
    fn unknown_word_forms_keep_default_pos() {
        let dict = bank_dict();
        assert_eq!(dict.resolve_pos("zebra", "NN"), ("NN".to_string(), Status::Ok));
    }

    #[test]
    fn unknown_word_forms_get_lowercased_lemma_and_unsure() {
        let dict = bank_dict();
        assert_eq!(
            dict.resolve_lemma("Zebras", "NNS", None),
            ("zebras".to_string(), Status::Unsure)
        );
        assert_eq!(
            dict.resolve_lemma("Zebras", "NNS", Some("")),
            ("zebras".to_string(), Status::Unsure)
        );
        assert_eq!(
            dict.resolve_lemma("Zebras", "NNS", Some("zebra")),
            ("zebra".to_string(), Status::Unsure)
        );
    }

    #[test]
    fn agreeing_lemmas_are_ok() {
        let dict = bank_dict();
        assert_eq!(
            dict.resolve_lemma("bank", "NN", Some("bank")),
            ("bank".to_string(), Status::Ok)
        );
        assert_eq!(
            dict.resolve_lemma("bank", "JJ", Some("other")),
            ("bank".to_string(), Status::Ok)
        );
        assert_eq!(dict.resolve_lemma("the", "DT", None), ("the".to_string(), Status::Ok));
    }

    #[test]
    fn disagreeing_lemmas_are_unsure_but_use_exact_pos() {
        let dict = bank_dict();
        assert_eq!(
            dict.resolve_lemma("saw", "VB", None),
            ("see".to_string(), Status::Unsure)
        );
        assert_eq!(
            dict.resolve_lemma("saw", "JJ", None),
            ("saw".to_string(), Status::Unsure)
        );
    }

    #[test]
    fn token_from_tag_prefers_explicit_lemma() {
        let dict = bank_dict();
        let token = dict.token_from_tag(&wf(
            "said",
            &[("pos", "VB"), ("lemma", "say"), ("wnsn", "1"), ("lexsn", "2:32:00::")],
        ));
        assert_eq!(token.pos, "VB");
        assert_eq!(token.lemma, "say");
        assert_eq!(token.status, Resolution::OK);
        let sense = token.sense.expect("sense-bearing");
        assert_eq!(sense.wnsn, "1");
        assert_eq!(sense.sense_key, "say%2:32:00::");
    }

    #[test]
    fn token_from_tag_resolves_missing_lemma() {
        let dict = bank_dict();
        let token = dict.token_from_tag(&wf("the", &[("pos", "DT")]));
        assert_eq!(token.lemma, "the");
        assert_eq!(token.status, Resolution::OK);
        assert!(token.sense.is_none());

        let token = dict.token_from_tag(&wf("Gleaming", &[]));
        assert_eq!(token.pos, NO_POS);
        assert_eq!(token.lemma, "gleaming");
        assert_eq!(token.status, Resolution::new(Status::Ok, Status::Unsure));
    }

    #[test]
    fn token_from_tag_splits_compound_pos_and_defaults_lexsn() {
        let dict = bank_dict();
        let tag = wf("run", &[("pos", "NN|VB"), ("lemma", "run"), ("wnsn", "0")]);
        let token = dict.token_from_tag(&tag);
        assert_eq!(token.pos, "NN");
        assert_eq!(token.sense_key(), Some("run%"));
    }

    #[test]
    fn expansion_yields_one_token_per_part_in_order() {
        let dict = bank_dict();
        for (form, n) in [("a_b", 2), ("New_York_City", 3), ("x_y_z_w", 4), ("solo", 1)] {
            let token = Token::new(form, "NNP", form.to_lowercase(), Resolution::OK);
            let parts = dict.expand(&token);
            assert_eq!(parts.len(), n);
            let rejoined: Vec<_> = parts.iter().map(|t| t.wordform.as_str()).collect();
            assert_eq!(rejoined.join("_"), form);
        }
    }

    #[test]
    fn expansion_aligns_lemma_parts_when_counts_match() {
        let dict = LemmaDictionary::default();
        let token = Token::new("took_over", "VB", "take_over", Resolution::OK);
        let parts = dict.expand(&token);
        assert_eq!(parts[0].lemma, "take");
        assert_eq!(parts[1].lemma, "over");
        assert!(parts.iter().all(|t| t.pos == "VB"));
        assert!(parts.iter().all(|t| t.sense.is_none()));
    }

    #[test]
    fn expansion_uses_whole_parent_lemma_otherwise() {
        let dict = LemmaDictionary::default();
        let token = dict.token_from_tag(&wf("running_back", &[("lemma", "halfback")]));
        let parts = dict.expand(&token);
        let words: Vec<_> = parts.iter().map(|t| t.wordform.as_str()).collect();
        assert_eq!(words, vec!["running", "back"]);
        assert!(parts.iter().all(|t| t.lemma == "halfback"));
        assert!(parts.iter().all(|t| t.pos == NO_POS));
        assert!(parts.iter().all(|t| t.status == Resolution::new(Status::Ok, Status::Unsure)));
    }

    #[test]
    fn expansion_prefers_dictionary_matches() {
        let dict = bank_dict();
        let token = dict.token_from_tag(&wf("running_back", &[("lemma", "halfback")]));
        let parts = dict.expand(&token);
        assert_eq!(parts[0].pos, "VB");
        assert_eq!(parts[0].lemma, "run");
        assert_eq!(parts[1].pos, "RB");
        assert_eq!(parts[1].lemma, "back");
        assert!(parts.iter().all(|t| t.status.is_sure()));
    }

    #[test]
    fn plain_tokens_pass_through_expansion() {
        let dict = bank_dict();
        let tag = wf("jury", &[("pos", "NN"), ("lemma", "jury"), ("wnsn", "1")]);
        let token = dict.token_from_tag(&tag);
        assert_eq!(dict.expand(&token), vec![token]);
    }
}
