use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Reply framings. `{solution}` is replaced with the best-ranked solution.
pub const REPLY_TEMPLATES: [&str; 5] = [
  "🔍 Quantum analysis complete: {solution}",
  "💡 Quantum suggestion: {solution}",
  "🚀 Quantum solution: {solution}",
  "⚛️ Quantum algorithm suggests: {solution}",
  "🌌 Multiverse analysis indicates: {solution}",
];

/// What the assistant says when the search produced nothing
pub const FALLBACK_RESPONSES: [&str; 5] = [
  "I've consulted the quantum realm but didn't find a precise match. Could you provide more details?",
  "The quantum probabilities are uncertain on this topic. Try rephrasing your question.",
  "My quantum circuits are having interference with this query. Please try again with different words.",
  "The multiverse suggests several possibilities, but none stand out clearly. Could you elaborate?",
  "Quantum entanglement has confused my response. Please ask again with more context.",
];

/// Secondary solutions (after the first, up to this many) are listed
/// under an insights section
const SECONDARY_LIMIT: usize = 3;

/// Turns a flat solution list into one chat reply.
///
/// The first solution is framed by a randomly chosen template, the next
/// few become a bulleted insights section, and anything beyond that is
/// summarized as a count. An empty list gets a fallback instead.
pub struct Composer {
  rng: StdRng,
}

impl Composer {
  pub fn new() -> Self {
    Self { rng: StdRng::from_os_rng() }
  }

  /// Seeded variant for reproducible runs
  pub fn with_seed(seed: u64) -> Self {
    Self { rng: StdRng::seed_from_u64(seed) }
  }

  pub fn reply(&mut self, solutions: &[String]) -> String {
    if solutions.is_empty() {
      let pick = self.rng.random_range(0..FALLBACK_RESPONSES.len());
      return FALLBACK_RESPONSES[pick].to_string();
    }

    let pick = self.rng.random_range(0..REPLY_TEMPLATES.len());
    let mut reply = REPLY_TEMPLATES[pick].replace("{solution}", &solutions[0]);

    if solutions.len() > 1 {
      let bullets: Vec<String> =
        solutions[1..].iter().take(SECONDARY_LIMIT).map(|s| format!("• {s}")).collect();
      reply.push_str("\n\n**Additional quantum insights:**\n");
      reply.push_str(&bullets.join("\n"));
    }

    if solutions.len() > 1 + SECONDARY_LIMIT {
      let omitted = solutions.len() - (1 + SECONDARY_LIMIT);
      reply.push_str(&format!("\n\n*And {omitted} more quantum possibilities...*"));
    }

    reply
  }
}

impl Default for Composer {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn solutions(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("solution {i}")).collect()
  }

  #[test]
  fn test_empty_list_gets_a_fallback() {
    let mut composer = Composer::with_seed(11);
    let reply = composer.reply(&[]);
    assert!(FALLBACK_RESPONSES.contains(&reply.as_str()));
  }

  #[test]
  fn test_single_solution_uses_a_template() {
    let mut composer = Composer::with_seed(11);
    let reply = composer.reply(&solutions(1));
    assert!(reply.contains("solution 0"));
    assert!(!reply.contains("{solution}"));
    assert!(!reply.contains("Additional quantum insights"));
  }

  #[test]
  fn test_secondary_solutions_become_bullets() {
    let mut composer = Composer::with_seed(11);
    let reply = composer.reply(&solutions(3));
    assert!(reply.contains("**Additional quantum insights:**"));
    assert!(reply.contains("• solution 1"));
    assert!(reply.contains("• solution 2"));
    assert!(!reply.contains("more quantum possibilities"));
  }

  #[test]
  fn test_overflow_is_summarized_as_a_count() {
    let mut composer = Composer::with_seed(11);
    let reply = composer.reply(&solutions(6));
    assert!(reply.contains("• solution 1"));
    assert!(reply.contains("• solution 3"));
    assert!(!reply.contains("• solution 4"));
    assert!(reply.contains("*And 2 more quantum possibilities...*"));
  }

  #[test]
  fn test_exactly_four_solutions_has_no_overflow_note() {
    let mut composer = Composer::with_seed(11);
    let reply = composer.reply(&solutions(4));
    assert!(reply.contains("• solution 3"));
    assert!(!reply.contains("more quantum possibilities"));
  }

  #[test]
  fn test_same_seed_same_replies() {
    let mut a = Composer::with_seed(5);
    let mut b = Composer::with_seed(5);
    for n in [0, 1, 2, 5, 8] {
      assert_eq!(a.reply(&solutions(n)), b.reply(&solutions(n)));
    }
  }
}
