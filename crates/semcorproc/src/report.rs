use semcor_types::{Resolution, Status, TextItem, Token};
use tracing::warn;

/// Log a `warn!` line for a token whose POS or lemma is not settled.
///
/// Returns whether anything was reported.
pub fn report_token(id: &str, token: &Token) -> bool {
    report(id, &token.wordform, &token.pos, &token.lemma, token.status)
}

pub fn report_item(id: &str, item: &TextItem) -> bool {
    report(id, &item.wordform, &item.pos, &item.lemma, item.status)
}

fn report(id: &str, wordform: &str, pos: &str, lemma: &str, status: Resolution) -> bool {
    let Some(what) = unsure_part(status) else {
        return false;
    };
    warn!(
        "unsure about {what} information in token {id}: wordform: {wordform}, pos: {pos}, lemma: {lemma}"
    );
    true
}

/// Which part of a resolution is unsure, as written in reports.
pub fn unsure_part(status: Resolution) -> Option<&'static str> {
    match (status.pos, status.lemma) {
        (Status::Ok, Status::Ok) => None,
        (Status::Unsure, Status::Unsure) => Some("pos and lemma"),
        (Status::Unsure, Status::Ok) => Some("pos"),
        (Status::Ok, Status::Unsure) => Some("lemma"),
    }
}
