use chrono::{DateTime, Local};

use crate::config::Config;
use crate::error::QubitError;
use crate::knowledge::KnowledgeBase;
use crate::reply::Composer;
use crate::reserved::ReservedCommand;
use crate::search::{SearchStats, Searcher};

pub const VOICE_SUPPORT_NOTICE: &str = "🎙️ Voice Support is coming in the next quantum update.";

pub const DARK_MODE_NOTICE: &str = "🌙 Dark Mode is being tuned for optimal quantum viewing.";

pub const HELP_TEXT: &str = "**Quantum Assistant Help:**\n• Describe your technical issue\n• Use 'quantum stats' for analytics\n• Try 'simulate error' for testing\n• Use clear, specific questions for best results";

/// Point-in-time summary of one conversation
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
  /// Turns taken, including reserved commands and failed ones
  pub queries: u64,
  /// Elapsed wall time as H:MM:SS
  pub duration: String,
  /// When the session opened, as %H:%M:%S local time
  pub start_time: String,
}

/// One conversation with the assistant.
///
/// Each value is a self-contained session: its own query counter, clock,
/// search history, and randomness. Two chatbots never share state, so
/// parallel conversations cannot bleed into each other's analytics.
pub struct Chatbot {
  searcher: Searcher,
  composer: Composer,
  limit: usize,
  session_start: DateTime<Local>,
  session_queries: u64,
}

impl Chatbot {
  pub fn new(kb: KnowledgeBase, config: Config) -> Self {
    Self {
      limit: config.search_limit,
      searcher: Searcher::new(kb, config),
      composer: Composer::new(),
      session_start: Local::now(),
      session_queries: 0,
    }
  }

  /// Seeded variant for reproducible runs. The scorer and composer
  /// draw from separate streams derived from the one seed.
  pub fn with_seed(kb: KnowledgeBase, config: Config, seed: u64) -> Self {
    Self {
      limit: config.search_limit,
      searcher: Searcher::with_seed(kb, config, seed),
      composer: Composer::with_seed(seed.wrapping_add(1)),
      session_start: Local::now(),
      session_queries: 0,
    }
  }

  pub fn knowledge(&self) -> &KnowledgeBase {
    self.searcher.knowledge()
  }

  /// Take one conversational turn.
  ///
  /// Every call counts as a query, even the ones that fail. Reserved
  /// commands are answered (or raised) without touching the ranker;
  /// everything else is searched and composed into a reply.
  pub fn process(&mut self, query: &str) -> Result<String, QubitError> {
    self.session_queries += 1;

    match ReservedCommand::parse(query) {
      Some(ReservedCommand::VoiceSupport) => Err(QubitError::coming_soon(VOICE_SUPPORT_NOTICE)),
      Some(ReservedCommand::DarkMode) => Err(QubitError::coming_soon(DARK_MODE_NOTICE)),
      Some(ReservedCommand::QuantumStats) => Ok(format!(
        "📊 Quantum Stats: {} queries this session, {} total searches.",
        self.session_queries,
        self.searcher.history().len()
      )),
      Some(ReservedCommand::Help) => Ok(HELP_TEXT.to_string()),
      _ => {
        let solutions = self.searcher.search(query, self.limit)?;
        Ok(self.composer.reply(&solutions))
      }
    }
  }

  pub fn search_stats(&self) -> SearchStats {
    self.searcher.stats()
  }

  pub fn session_stats(&self) -> SessionStats {
    let elapsed = Local::now().signed_duration_since(self.session_start);
    let seconds = elapsed.num_seconds().max(0);

    SessionStats {
      queries: self.session_queries,
      duration: format!("{}:{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60, seconds % 60),
      start_time: self.session_start.format("%H:%M:%S").to_string(),
    }
  }
}
