//! Last-match-wins evaluation of a candidate path against ordered rule sets.
//!
//! Pure and deterministic: no I/O, same inputs give the same verdict. Rule
//! sets arrive root to leaf and each set's patterns are in file order, so a
//! plain forward scan that overwrites the running verdict reproduces
//! gitignore's "last match wins, negation re-includes" semantics with
//! deeper directories taking priority.

use crate::path::pattern::{glob_match, CompiledPattern, Segment};
use crate::path::ruleset::RuleSet;
use std::sync::Arc;

/// Decide whether `candidate` (a `/`-separated path relative to the base
/// directory) is ignored. `is_dir` is the caller's lexical judgement; no
/// filesystem check happens here.
pub fn is_ignored(candidate: &str, is_dir: bool, rule_sets: &[Arc<RuleSet>]) -> bool {
    let segments: Vec<&str> = candidate.split('/').filter(|s| !s.is_empty()).collect();

    let mut verdict = false;
    for set in rule_sets {
        // Patterns only apply to paths under their declaring directory, and
        // they see the path relative to that directory.
        let prefix: Vec<&str> = set.prefix().split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < prefix.len() || segments[..prefix.len()] != prefix[..] {
            continue;
        }
        let local = &segments[prefix.len()..];

        for pattern in set.patterns() {
            if pattern.directory_only() && !is_dir {
                continue;
            }
            if pattern_matches(pattern, local) {
                verdict = !pattern.negated();
            }
        }
    }
    verdict
}

fn pattern_matches(pattern: &CompiledPattern, path: &[&str]) -> bool {
    if pattern.anchored() {
        return segments_match(pattern.segments(), path);
    }
    // Unanchored patterns behave as if prefixed with `**/`: any segment
    // suffix of the candidate may match.
    (0..=path.len()).any(|start| segments_match(pattern.segments(), &path[start..]))
}

fn segments_match(pattern: &[Segment], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((Segment::Recursive, rest)) => {
            // `**` consumes zero or more whole segments; try every split
            // until the remainder matches.
            (0..=path.len()).any(|consumed| segments_match(rest, &path[consumed..]))
        }
        Some((Segment::Glob(tokens), rest)) => path
            .split_first()
            .is_some_and(|(head, tail)| glob_match(tokens, head) && segments_match(rest, tail)),
    }
}
