//! "Did you mean?" suggestions for undefined names.
//!
//! When a name lookup fails, every name visible from the failing frame is
//! scored against the missing one. Up to three candidates whose similarity
//! reaches the cutoff are attached to the Name error. The search only
//! shapes the error payload; it never changes the outcome of evaluation.

/// Suggestions attached to a Name error.
pub const MAX_SUGGESTIONS: usize = 3;

/// Minimum similarity for a candidate to be suggested.
pub const SIMILARITY_CUTOFF: f64 = 0.6;

/// Levenshtein edit distance between two strings, counted in chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();

    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    // Two-row optimization instead of the full matrix
    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a.chars().enumerate() {
        curr_row[0] = i + 1;

        for (j, &b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);

            curr_row[j + 1] = (prev_row[j + 1] + 1) // deletion
                .min(curr_row[j] + 1) // insertion
                .min(prev_row[j] + cost); // substitution
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}

/// Similarity in `[0, 1]`: `(|a| + |b| - distance) / (|a| + |b|)`.
///
/// For edits made only of insertions and deletions this equals the
/// matching-blocks ratio `2M / T`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }
    let distance = edit_distance(a, b);
    total.saturating_sub(distance) as f64 / total as f64
}

/// Up to `max_results` candidates with similarity of at least `cutoff`.
///
/// Sorted by descending similarity, then alphabetically for ties.
pub fn close_matches<'a>(
    word: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    max_results: usize,
    cutoff: f64,
) -> Vec<String> {
    if word.is_empty() || max_results == 0 {
        return Vec::new();
    }

    let mut matches: Vec<(f64, &str)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let score = similarity(word, candidate);
            (score >= cutoff).then_some((score, candidate))
        })
        .collect();

    matches.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    matches.dedup_by(|a, b| a.1 == b.1);

    matches
        .into_iter()
        .take(max_results)
        .map(|(_, s)| s.to_string())
        .collect()
}
