use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Split text into a set of lowercase words.
///
/// Whitespace is the only separator. Punctuation stays attached and no
/// words are filtered out, so "wifi" and "wifi?" are different tokens.
/// Matching stays predictable from what the person literally typed.
pub fn tokenize(text: &str) -> HashSet<String> {
  text.split_whitespace().map(|word| word.to_lowercase()).collect()
}

/// Jaccard similarity between two word sets: |intersection| / |union|
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f32 {
  if a.is_empty() || b.is_empty() {
    return 0.0;
  }

  let intersection = a.intersection(b).count();
  let union = a.union(b).count();

  let ratio = intersection as f32 / union as f32;
  if ratio.is_finite() {
    ratio
  } else {
    0.0
  }
}

/// Scores queries against topic labels with a bounded random drift.
///
/// The drift is uniform in [0, factor) and added on top of the Jaccard
/// base, capped at 1.0. It keeps repeated identical questions from
/// producing identical rankings, which reads more like a conversation
/// and less like a lookup table.
pub struct Scorer {
  factor: f32,
  rng: StdRng,
}

impl Scorer {
  pub fn new(factor: f32) -> Self {
    Self { factor, rng: StdRng::from_os_rng() }
  }

  /// Seeded variant for reproducible runs
  pub fn with_seed(factor: f32, seed: u64) -> Self {
    Self { factor, rng: StdRng::seed_from_u64(seed) }
  }

  /// Relatedness of a query to a topic label, in [0.0, 1.0].
  ///
  /// Either side tokenizing to nothing scores exactly 0.0 with no drift,
  /// so blank input can never sneak past the relevance threshold.
  pub fn score(&mut self, query: &str, topic: &str) -> f32 {
    let query_words = tokenize(query);
    let topic_words = tokenize(topic);

    if query_words.is_empty() || topic_words.is_empty() {
      return 0.0;
    }

    let base = jaccard(&query_words, &topic_words);
    let drift = self.factor * self.rng.random::<f32>();
    (base + drift).min(1.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tokenize_lowercases_and_splits() {
    let words = tokenize("WiFi Not   Connecting");
    assert_eq!(words.len(), 3);
    assert!(words.contains("wifi"));
    assert!(words.contains("not"));
    assert!(words.contains("connecting"));
  }

  #[test]
  fn test_tokenize_keeps_punctuation_and_small_words() {
    let words = tokenize("my wifi is down!");
    assert!(words.contains("my"));
    assert!(words.contains("is"));
    assert!(words.contains("down!"));
    assert!(!words.contains("down"));
  }

  #[test]
  fn test_tokenize_empty_and_whitespace() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("   \t\n  ").is_empty());
  }

  #[test]
  fn test_jaccard_identical_sets() {
    let a = tokenize("password reset");
    assert_eq!(jaccard(&a, &a), 1.0);
  }

  #[test]
  fn test_jaccard_disjoint_sets() {
    let a = tokenize("password reset");
    let b = tokenize("docker build");
    assert_eq!(jaccard(&a, &b), 0.0);
  }

  #[test]
  fn test_jaccard_partial_overlap() {
    // {wifi, down} vs {wifi, not, connecting}: 1 shared of 4 total
    let a = tokenize("wifi down");
    let b = tokenize("wifi not connecting");
    assert_eq!(jaccard(&a, &b), 0.25);
  }

  #[test]
  fn test_jaccard_empty_side_is_zero() {
    let a = tokenize("anything");
    let empty = tokenize("");
    assert_eq!(jaccard(&a, &empty), 0.0);
    assert_eq!(jaccard(&empty, &a), 0.0);
    assert_eq!(jaccard(&empty, &empty), 0.0);
  }

  #[test]
  fn test_score_stays_in_unit_range() {
    let mut scorer = Scorer::with_seed(0.15, 42);
    for query in ["wifi not connecting", "printer offline", "totally unrelated words"] {
      for topic in ["wifi not connecting", "printer offline", "password reset"] {
        let score = scorer.score(query, topic);
        assert!((0.0..=1.0).contains(&score), "score {score} out of range");
      }
    }
  }

  #[test]
  fn test_score_caps_identical_text_at_one() {
    let mut scorer = Scorer::with_seed(0.15, 7);
    assert_eq!(scorer.score("printer offline", "printer offline"), 1.0);
  }

  #[test]
  fn test_score_never_drops_below_base_similarity() {
    let mut scorer = Scorer::with_seed(0.15, 99);
    let base = jaccard(&tokenize("wifi down"), &tokenize("wifi not connecting"));
    for _ in 0..50 {
      assert!(scorer.score("wifi down", "wifi not connecting") >= base);
    }
  }

  #[test]
  fn test_zero_factor_gives_exact_jaccard() {
    let mut scorer = Scorer::with_seed(0.0, 1);
    assert_eq!(scorer.score("wifi down", "wifi not connecting"), 0.25);
    assert_eq!(scorer.score("password reset", "password reset"), 1.0);
  }

  #[test]
  fn test_empty_query_scores_zero_even_with_drift() {
    let mut scorer = Scorer::with_seed(0.15, 3);
    for _ in 0..20 {
      assert_eq!(scorer.score("", "password reset"), 0.0);
      assert_eq!(scorer.score("password reset", ""), 0.0);
    }
  }

  #[test]
  fn test_same_seed_same_sequence() {
    let mut a = Scorer::with_seed(0.15, 1234);
    let mut b = Scorer::with_seed(0.15, 1234);
    for _ in 0..10 {
      assert_eq!(a.score("wifi down", "wifi not connecting"), b.score("wifi down", "wifi not connecting"));
    }
  }
}
