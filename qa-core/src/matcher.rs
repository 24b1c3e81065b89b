//! Problem matching: deciding whether two problems denote the same real-world question.
//!
//! Identity (`id` equality) always matches. Beyond that, [`DefaultMatcher`] recognizes
//! wildcard ids and problems regenerated with a different id but the same description and
//! choices. Implement [`ProblemMatcher`] to give other problem kinds their own equivalence.

use crate::problem::Problem;

/// Id segment that matches any single segment of the other id.
pub const WILDCARD_SEGMENT: &str = "*";

/// Separator between id segments (`services.api.port`).
pub const ID_SEPARATOR: char = '.';

/// Equivalence test between a stored problem and a posed one. Implementations should be
/// symmetric and must treat equal ids as a match.
pub trait ProblemMatcher: Send + Sync {
    fn matches(&self, stored: &Problem, posed: &Problem) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMatcher;

impl ProblemMatcher for DefaultMatcher {
    fn matches(&self, stored: &Problem, posed: &Problem) -> bool {
        if stored.id == posed.id {
            return true;
        }
        if stored.form != posed.form {
            return false;
        }
        ids_match(&stored.id, &posed.id) || same_question(stored, posed)
    }
}

/// Segment-wise id comparison where [`WILDCARD_SEGMENT`] on either side matches anything.
pub fn ids_match(a: &str, b: &str) -> bool {
    let a: Vec<&str> = a.split(ID_SEPARATOR).collect();
    let b: Vec<&str> = b.split(ID_SEPARATOR).collect();
    a.len() == b.len()
        && a
            .iter()
            .zip(b.iter())
            .all(|(x, y)| x == y || *x == WILDCARD_SEGMENT || *y == WILDCARD_SEGMENT)
}

fn same_question(a: &Problem, b: &Problem) -> bool {
    if a.desc.is_empty() || a.desc != b.desc {
        return false;
    }
    let mut a_options = a.options.clone();
    let mut b_options = b.options.clone();
    a_options.sort();
    b_options.sort();
    a_options == b_options
}
