//! Approximate item-name matching for typed moves.
//!
//! Similarity is the Ratcliff/Obershelp ratio: twice the number of matching
//! characters over the combined length, where matches are found by taking
//! the longest common block and recursing on both sides of it. Input and
//! candidates are compared trimmed and lowercased.

/// Similarity of two strings in `[0, 1]`; `1.0` for identical strings.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = normalize(a).chars().collect();
    let b: Vec<char> = normalize(b).chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Best candidate scoring at least `cutoff`, first one on equal scores.
pub fn close_match<'a, S: AsRef<str>>(
    input: &str,
    candidates: &'a [S],
    cutoff: f64,
) -> Option<&'a str> {
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let candidate = candidate.as_ref();
        let score = similarity(input, candidate);
        if score < cutoff {
            continue;
        }
        match best {
            Some((_, current)) if score <= current => {}
            _ => best = Some((candidate, score)),
        }
    }
    best.map(|(name, _)| name)
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + len..], &b[j + len..])
}

/// Longest common contiguous block as `(start_a, start_b, len)`, earliest in
/// `a` then earliest in `b` on ties.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // run[j + 1] = length of the common run ending at a[i], b[j]
    let mut previous = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        let mut current = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let run = previous[j] + 1;
                current[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        previous = current;
    }
    best
}
