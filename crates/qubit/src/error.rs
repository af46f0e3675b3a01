use thiserror::Error;

/// Failures the assistant surfaces to the person chatting with it.
///
/// Both variants carry their full user-facing text, so `Display` is the
/// message verbatim. Scoring problems never show up here - the engine
/// absorbs those and treats the topic as unrelated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QubitError {
  /// Deliberately injected fault, reachable through reserved queries
  #[error("{message}")]
  Simulated { message: String },

  /// Feature that is recognized but not shipped yet
  #[error("{message}")]
  ComingSoon { message: String },
}

impl QubitError {
  pub fn simulated(message: impl Into<String>) -> Self {
    Self::Simulated { message: message.into() }
  }

  pub fn coming_soon(message: impl Into<String>) -> Self {
    Self::ComingSoon { message: message.into() }
  }

  /// Coming-soon failures render as announcements, not instability
  pub fn is_coming_soon(&self) -> bool {
    matches!(self, Self::ComingSoon { .. })
  }

  pub fn message(&self) -> &str {
    match self {
      Self::Simulated { message } | Self::ComingSoon { message } => message,
    }
  }
}
