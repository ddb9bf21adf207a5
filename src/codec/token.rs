//! fixed-size grouping of code points into tokens.

use std::collections::HashMap;

/// Splits a code-point sequence into groups of `group_size`, the last group
/// holding the remainder (1..group_size). An empty input still yields one
/// empty token, so a tree can be built over it.
pub fn tokenize(cps: &[char], group_size: usize) -> Vec<String> {
    if cps.is_empty() {
        return vec![String::new()];
    }
    cps.chunks(group_size).map(|chunk| chunk.iter().collect()).collect()
}

/// Counts occurrences per distinct token.
pub fn count_frequencies(tokens: &[String]) -> HashMap<String, u32> {
    let mut frequencies = HashMap::new();
    for t in tokens {
        *frequencies.entry(t.clone()).or_insert(0u32) += 1;
    }
    frequencies
}

/// Cuts `s` down to at most `keep` code points.
pub fn truncate_code_points(s: &mut String, keep: u64) {
    if let Some((idx, _)) = s.char_indices().nth(keep as usize) {
        s.truncate(idx);
    }
}
