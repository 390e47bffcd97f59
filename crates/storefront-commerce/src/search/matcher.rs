//! Approximate string matching.

/// Default similarity cutoff. Scores above it are not matches.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Number of characters over which a late match start costs a full point.
pub const LOCATION_DISTANCE: usize = 100;

/// Scores how well a pattern matches a piece of text.
pub trait Matcher: Send + Sync {
    /// Score `pattern` against `text`.
    ///
    /// `0.0` is a perfect match, `1.0` a total mismatch. `None` means the
    /// best match is outside the matcher's threshold.
    fn score(&self, pattern: &str, text: &str) -> Option<f64>;
}

/// Case-insensitive approximate substring matcher.
///
/// Finds the substring of the text with the fewest edits (insertions,
/// deletions, substitutions) against the pattern. The score is the error
/// ratio plus a penalty for how far into the text the match starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    threshold: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cutoff, clamped to `0.0..=1.0`.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = if threshold.is_nan() {
            DEFAULT_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Matcher for FuzzyMatcher {
    fn score(&self, pattern: &str, text: &str) -> Option<f64> {
        let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
        if pattern.is_empty() {
            return None;
        }
        let text: Vec<char> = text.to_lowercase().chars().collect();

        let (errors, start) = best_substring_match(&pattern, &text);
        let location_penalty = start as f64 / LOCATION_DISTANCE as f64;
        let score = errors as f64 / pattern.len() as f64 + location_penalty;

        (score <= self.threshold).then_some(score)
    }
}

/// Lowest edit distance between `pattern` and any substring of `text`.
///
/// Returns `(errors, start)` where `start` is the char offset the best
/// substring begins at. Equal costs prefer the earliest start.
fn best_substring_match(pattern: &[char], text: &[char]) -> (usize, usize) {
    let m = pattern.len();

    // Column j holds (cost, start) for pattern[..i] ending at text[..j].
    // Row 0 is free at every column: a match may begin anywhere.
    let mut prev: Vec<(usize, usize)> = (0..=m).map(|i| (i, 0)).collect();
    let mut best = prev[m];

    for (j, &tc) in text.iter().enumerate() {
        let mut cur = vec![(0, j + 1); m + 1];
        for i in 1..=m {
            let (diag_cost, diag_start) = prev[i - 1];
            let substitution = (diag_cost + usize::from(pattern[i - 1] != tc), diag_start);
            let (up_cost, up_start) = cur[i - 1];
            let skip_pattern = (up_cost + 1, up_start);
            let (left_cost, left_start) = prev[i];
            let skip_text = (left_cost + 1, left_start);

            cur[i] = substitution.min(skip_pattern).min(skip_text);
        }
        if cur[m] < best {
            best = cur[m];
        }
        prev = cur;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_exact_match_scores_zero() {
        let m = FuzzyMatcher::new();
        assert_eq!(m.score("phone", "phone"), Some(0.0));
        assert_eq!(m.score("PHONE", "Phone"), Some(0.0));
    }

    #[test]
    fn test_substring_penalized_by_location() {
        let m = FuzzyMatcher::new();
        let score = m.score("mascara", "Essence Mascara Lash Princess").unwrap();
        assert!(approx(score, 8.0 / 100.0));
    }

    #[test]
    fn test_one_typo() {
        let m = FuzzyMatcher::new();
        let score = m.score("lipstik", "Red Lipstick").unwrap();
        // one missing char over 7, starting at offset 4
        assert!(approx(score, 1.0 / 7.0 + 0.04));
    }

    #[test]
    fn test_mismatch_outside_threshold() {
        let m = FuzzyMatcher::new();
        assert_eq!(m.score("zzzz", "Red Lipstick"), None);
        assert_eq!(m.score("laptop", ""), None);
    }

    #[test]
    fn test_late_match_exceeds_threshold() {
        let m = FuzzyMatcher::new();
        let text = format!("{}needle", "x".repeat(40));
        assert_eq!(m.score("needle", &text), None);

        let text = format!("{}needle", "x".repeat(30));
        assert!(approx(m.score("needle", &text).unwrap(), 0.3));
    }

    #[test]
    fn test_empty_pattern_matches_nothing() {
        let m = FuzzyMatcher::new();
        assert_eq!(m.score("", "anything"), None);
    }

    #[test]
    fn test_threshold_is_inclusive_and_clamped() {
        let m = FuzzyMatcher::new().with_threshold(0.25);
        // 1 error over 4 chars is exactly 0.25
        assert_eq!(m.score("abcx", "abcd"), Some(0.25));
        assert_eq!(FuzzyMatcher::new().with_threshold(7.0).threshold(), 1.0);
        assert_eq!(
            FuzzyMatcher::new().with_threshold(f64::NAN).threshold(),
            DEFAULT_THRESHOLD
        );
    }

    #[test]
    fn test_best_substring_prefers_earliest_start() {
        let pattern: Vec<char> = "ab".chars().collect();
        let text: Vec<char> = "xxabyyab".chars().collect();
        assert_eq!(best_substring_match(&pattern, &text), (0, 2));
    }

    #[test]
    fn test_best_substring_counts_errors() {
        let pattern: Vec<char> = "kitten".chars().collect();
        let text: Vec<char> = "sitting".chars().collect();
        // "kitten" vs "sittin": two substitutions
        assert_eq!(best_substring_match(&pattern, &text).0, 2);
    }
}
