//! Partial-ratio string similarity.
//!
//! `ratio` is the normalized indel similarity `2 * LCS / (|a| + |b|) * 100`.
//! `partial_ratio` slides the shorter string over the longer one and keeps the
//! best `ratio` of any alignment, so "tomato" scores 100 against
//! "tomato sauce". Both are case-sensitive; callers lower-case first.

/// Length of the longest common subsequence of `a` and `b`.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Best `ratio` of `needle` against every window of `haystack`, including the
/// partial windows hanging off either end. Requires `needle.len() <= haystack.len()`.
fn best_alignment(needle: &[char], haystack: &[char]) -> f64 {
    let m = needle.len();
    let n = haystack.len();
    let mut best = 0.0f64;

    // windows growing in from the left edge
    for end in 1..m.min(n + 1) {
        best = best.max(ratio_chars(needle, &haystack[..end]));
    }
    // full-width windows
    for start in 0..=n.saturating_sub(m) {
        best = best.max(ratio_chars(needle, &haystack[start..start + m]));
        if best >= 100.0 {
            return 100.0;
        }
    }
    // windows shrinking off the right edge
    for start in (n.saturating_sub(m) + 1)..n {
        best = best.max(ratio_chars(needle, &haystack[start..]));
    }
    best
}

/// Partial-ratio similarity in `[0, 100]`.
///
/// Two empty strings score 100; an empty string against a non-empty one scores 0.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    if a.len() < b.len() {
        best_alignment(&a, &b)
    } else if b.len() < a.len() {
        best_alignment(&b, &a)
    } else {
        best_alignment(&a, &b).max(best_alignment(&b, &a))
    }
}
