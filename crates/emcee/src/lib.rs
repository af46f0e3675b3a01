//! Emcee - conversational transcript rendering for terminal assistants
//!
//! ## Features
//!
//! - Speaker lines with timestamps and hanging indents
//! - Notices and alerts for out-of-band events (feature gates, faults)
//! - Banner displays for session openings and closings
//! - Aligned label/value rows for stats summaries
//! - All output to stdout (the transcript is the product, not a log)
//!
//! ## Usage
//!
//! Speaker lines: `speaker_line()`, with `Voice::User` or `Voice::Assistant`
//!
//! Out-of-band: `notice()`, `alert()`, `hint()`
//!
//! Framing: `headline()`, `closing()`, `summary_row()`

use chrono::Local;
use colored::*;

/// Width that wrapped output targets
pub const TRANSCRIPT_WIDTH: usize = 80;

/// Continuation lines under a speaker prefix are indented this much
const HANGING_INDENT: usize = 2;

/// Who is talking on a transcript line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Voice {
  User,
  Assistant,
}

impl Voice {
  fn color(&self) -> Color {
    match self {
      Voice::User => Color::Green,
      Voice::Assistant => Color::Cyan,
    }
  }
}

/// Core output function - everything goes through stdout line by line
pub fn say(message: &str) {
  for line in message.lines() {
    println!("{line}");
  }
}

/// Wall-clock timestamp used on transcript lines
pub fn timestamp() -> String {
  Local::now().format("%H:%M:%S").to_string()
}

/// Format the `Name (hh:mm:ss):` prefix for a speaker
fn speaker_prefix(name: &str, voice: Voice) -> String {
  format!("{} ({}):", name.color(voice.color()).bold(), timestamp().dimmed())
}

/// Print one utterance: a speaker prefix, then the message indented
/// under it. Message lines are rendered as-is so composed replies keep
/// their own structure (bullets, emphasis, blank lines).
pub fn speaker_line(name: &str, voice: Voice, message: &str) {
  say(&speaker_prefix(name, voice));
  let indent = " ".repeat(HANGING_INDENT);
  for line in message.lines() {
    say(&format!("{indent}{line}"));
  }
}

/// Notice - out-of-band information the assistant wants seen (not an error)
pub fn notice(message: &str) {
  for line in message.lines() {
    say(&line.yellow().to_string());
  }
}

/// Alert - the turn failed and the transcript should show it loudly
pub fn alert(message: &str) {
  for line in message.lines() {
    say(&line.red().bold().to_string());
  }
}

/// Hint - quiet guidance printed between turns (prompts, key bindings),
/// wrapped to the transcript width
pub fn hint(message: &str) {
  for line in wrap_text(message, TRANSCRIPT_WIDTH) {
    say(&line.dimmed().to_string());
  }
}

/// Create a banner line of the specified length and character
pub fn banner_line(length: usize, char: char) -> String {
  char.to_string().repeat(length)
}

/// Display a message between banner lines
pub fn as_banner<F>(say_fn: F, message: &str, width: Option<usize>, border_char: Option<char>)
where
  F: Fn(&str),
{
  let width = width.unwrap_or(50);
  let border_char = border_char.unwrap_or('=');

  let banner = banner_line(width, border_char);

  say_fn(&banner);
  say_fn(message);
  say_fn(&banner);
}

/// Headline - opens a session with a bannered title
pub fn headline(message: &str) {
  as_banner(|msg| say(&msg.cyan().bold().to_string()), message, Some(50), Some('='));
}

/// Closing - ends a session with a softer banner
pub fn closing(message: &str) {
  as_banner(|msg| say(&msg.blue().bold().to_string()), message, Some(50), Some('-'));
}

/// Aligned label/value row for stats summaries
pub fn summary_row(label: &str, value: &str) {
  // Pad before coloring so ANSI escapes don't count toward the column width
  let padded = format!("{:<18}", format!("{label}:"));
  say(&format!("{} {}", padded.bold(), value));
}

/// Bulleted item under a summary heading
pub fn summary_item(text: &str) {
  say(&format!("  • {text}"));
}

/// Wrap text to the given width, preserving paragraph breaks
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();

  for paragraph in text.split('\n') {
    if paragraph.trim().is_empty() {
      lines.push(String::new());
      continue;
    }

    let words: Vec<&str> = paragraph.split_whitespace().collect();
    let mut current_line = String::new();

    for word in words {
      if current_line.is_empty() {
        current_line = word.to_string();
      } else if current_line.len() + 1 + word.len() <= width {
        current_line.push(' ');
        current_line.push_str(word);
      } else {
        lines.push(current_line);
        current_line = word.to_string();
      }
    }

    if !current_line.is_empty() {
      lines.push(current_line);
    }
  }

  lines
}

/// Macros so call sites read like speech

#[macro_export]
macro_rules! notice {
  ($msg:expr) => {
    $crate::notice($msg);
  };
}

#[macro_export]
macro_rules! alert {
  ($msg:expr) => {
    $crate::alert($msg);
  };
}

#[macro_export]
macro_rules! hint {
  ($msg:expr) => {
    $crate::hint($msg);
  };
}
