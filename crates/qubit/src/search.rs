use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::config::Config;
use crate::error::QubitError;
use crate::knowledge::KnowledgeBase;
use crate::reserved::ReservedCommand;
use crate::similarity::Scorer;

/// Message raised for the generic injected fault
pub const SIMULATED_DECOHERENCE: &str = "💥 Simulated quantum decoherence event";

/// Message raised for the flux-capacitor injected fault
pub const SIMULATED_FLUX: &str = "🪐 Quantum flux capacitor malfunction";

/// Trending looks at this many of the most recent searches
const TRENDING_WINDOW: usize = 20;

/// How many trending queries are reported
const TRENDING_TOP: usize = 3;

/// "Recent" means strictly within this many hours
const RECENT_WINDOW_HOURS: i64 = 24;

/// One query recorded for analytics, exactly as the person typed it
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRecord {
  pub query: String,
  pub timestamp: DateTime<Utc>,
}

/// Aggregate view over the search history
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStats {
  /// Every search ever recorded by this searcher
  pub total: usize,
  /// Searches within the last 24 hours
  pub recent: usize,
  /// Up to three (query, count) pairs from the trailing window,
  /// most frequent first, ties in first-seen order
  pub trending: Vec<(String, usize)>,
}

impl SearchStats {
  pub fn empty() -> Self {
    Self { total: 0, recent: 0, trending: Vec::new() }
  }
}

/// Ranks knowledge base topics against free-text queries.
///
/// Every non-faulting search is recorded in history, including ones that
/// match nothing. The two fault-injection commands raise before anything
/// is recorded, so simulated outages never pollute the analytics.
pub struct Searcher {
  kb: KnowledgeBase,
  config: Config,
  scorer: Scorer,
  history: Vec<SearchRecord>,
}

impl Searcher {
  pub fn new(kb: KnowledgeBase, config: Config) -> Self {
    let scorer = Scorer::new(config.randomness_factor);
    Self { kb, config, scorer, history: Vec::new() }
  }

  /// Seeded variant for reproducible runs
  pub fn with_seed(kb: KnowledgeBase, config: Config, seed: u64) -> Self {
    let scorer = Scorer::with_seed(config.randomness_factor, seed);
    Self { kb, config, scorer, history: Vec::new() }
  }

  pub fn knowledge(&self) -> &KnowledgeBase {
    &self.kb
  }

  pub fn history(&self) -> &[SearchRecord] {
    &self.history
  }

  /// Score every topic against the query and expand the best matches
  /// into a flat solution list.
  ///
  /// The top `limit` topics above the relevance threshold contribute,
  /// confidence deciding how their solutions are phrased:
  /// high scores verbatim, medium hedged as "Possible match", and
  /// threshold-level ones contributing a single "Related idea". The
  /// flat list is then capped at `max_solutions`.
  pub fn search(&mut self, query: &str, limit: usize) -> Result<Vec<String>, QubitError> {
    match ReservedCommand::parse(query) {
      Some(ReservedCommand::SimulateError) => {
        return Err(QubitError::simulated(SIMULATED_DECOHERENCE));
      }
      Some(ReservedCommand::QuantumFlux) => {
        return Err(QubitError::simulated(SIMULATED_FLUX));
      }
      _ => {}
    }

    self.history.push(SearchRecord { query: query.to_string(), timestamp: Utc::now() });

    let kb = &self.kb;
    let config = &self.config;
    let scorer = &mut self.scorer;

    let mut ranked: Vec<(&str, &[String], f32)> = kb
      .iter()
      .map(|(topic, solutions)| {
        let score = scorer.score(query, topic);
        (topic, solutions, score)
      })
      .filter(|(_, _, score)| *score >= config.min_similarity)
      .collect();

    // Stable sort: topics that tie keep their catalog order
    ranked.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

    debug!("{} of {} topics cleared the relevance threshold", ranked.len(), kb.len());

    let mut solutions = Vec::new();
    for (_, topic_solutions, score) in ranked.iter().take(limit) {
      if *score > config.high_confidence {
        solutions.extend(topic_solutions.iter().cloned());
      } else if *score > config.medium_confidence {
        solutions.extend(topic_solutions.iter().map(|s| format!("Possible match: {s}")));
      } else if let Some(first) = topic_solutions.first() {
        solutions.push(format!("Related idea: {first}"));
      }
    }

    solutions.truncate(config.max_solutions);
    Ok(solutions)
  }

  /// Summarize the history: totals, a 24-hour window, and what keeps
  /// coming up lately
  pub fn stats(&self) -> SearchStats {
    if self.history.is_empty() {
      return SearchStats::empty();
    }

    let cutoff = Utc::now() - Duration::hours(RECENT_WINDOW_HOURS);
    let recent = self.history.iter().filter(|r| r.timestamp > cutoff).count();

    let start = self.history.len().saturating_sub(TRENDING_WINDOW);
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in &self.history[start..] {
      match counts.iter_mut().find(|(query, _)| *query == record.query) {
        Some((_, n)) => *n += 1,
        None => counts.push((record.query.clone(), 1)),
      }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TRENDING_TOP);

    SearchStats { total: self.history.len(), recent, trending: counts }
  }
}
