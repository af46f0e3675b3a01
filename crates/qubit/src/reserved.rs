/// Queries the assistant intercepts before any knowledge base search.
///
/// Matching is exact on the whole query after trimming and lowercasing,
/// so "HELP" is reserved but "help me with wifi" goes to the ranker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedCommand {
  /// Unshipped feature gate
  VoiceSupport,
  /// Unshipped feature gate
  DarkMode,
  /// Session and history analytics
  QuantumStats,
  /// Usage guidance
  Help,
  /// Fault injection: generic decoherence
  SimulateError,
  /// Fault injection: flux capacitor
  QuantumFlux,
}

impl ReservedCommand {
  /// Classify a raw query, or `None` if it should be searched normally
  pub fn parse(query: &str) -> Option<Self> {
    match query.trim().to_lowercase().as_str() {
      "voice support" => Some(Self::VoiceSupport),
      "dark mode" => Some(Self::DarkMode),
      "quantum stats" => Some(Self::QuantumStats),
      "help" => Some(Self::Help),
      "simulate error" => Some(Self::SimulateError),
      "quantum flux" => Some(Self::QuantumFlux),
      _ => None,
    }
  }
}
