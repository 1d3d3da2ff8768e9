pub mod eval;
pub mod stats;
pub mod tree;

use std::cmp::Ordering;

/// Caseless lexicographic ordering with a case-sensitive tiebreak, the
/// stand-in for the UI layer's locale-aware compare. The tiebreak keeps the
/// ordering total so repeated builds never disagree.
pub(crate) fn caseless_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
