//! Weight-budgeted context windows around a target item.

use semcor_types::TextItem;

/// Structural scope a context window must not cross.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Boundary {
    #[default]
    Paragraph,
    Sentence,
    Unbounded,
}

impl Boundary {
    /// Whether `item` starts a new scope of this kind.
    fn opens_scope(self, item: &TextItem) -> bool {
        match self {
            Boundary::Paragraph => item.paragraph_start,
            Boundary::Sentence => item.sentence_start,
            Boundary::Unbounded => false,
        }
    }
}

/// Left and right context of `items[target]` as running text.
///
/// The right side takes items until their weight reaches `right_budget`.
/// The left side counts the target's own weight and walks back while the
/// total stays within `left_budget`. Neither side crosses `boundary`, and an
/// out-of-range target yields two empty strings.
pub fn build_context(
    items: &[TextItem],
    target: usize,
    left_budget: usize,
    right_budget: usize,
    boundary: Boundary,
) -> (String, String) {
    let Some(center) = items.get(target) else {
        return (String::new(), String::new());
    };

    let mut end = target + 1;
    let mut weight = 0;
    while end < items.len() && weight < right_budget && !boundary.opens_scope(&items[end]) {
        weight += items[end].weight;
        end += 1;
    }

    let mut start = target;
    let mut weight = center.weight;
    while start > 0 && weight <= left_budget && !boundary.opens_scope(&items[start]) {
        start -= 1;
        weight += items[start].weight;
    }

    (join(&items[start..target]), join(&items[target + 1..end]))
}

fn join(items: &[TextItem]) -> String {
    items.iter().map(TextItem::spaced).collect()
}
