use anyhow::{anyhow, Result};
use colored::*;
use std::io::{self, Write};
use std::path::Path;

use crate::config::Config;
use crate::knowledge::KnowledgeBase;
use crate::session::Chatbot;

/// How the assistant signs its transcript lines
pub const ASSISTANT_NAME: &str = "Qubit";

fn build_chatbot(kb_path: &Path, seed: Option<u64>) -> Chatbot {
  let kb = KnowledgeBase::load_or_builtin(kb_path);
  let config = Config::load();

  match seed {
    Some(seed) => Chatbot::with_seed(kb, config, seed),
    None => Chatbot::new(kb, config),
  }
}

/// One turn: ask, then render the reply or the failure
fn respond(bot: &mut Chatbot, query: &str) {
  match bot.process(query) {
    Ok(reply) => emcee::speaker_line(ASSISTANT_NAME, emcee::Voice::Assistant, &reply),
    Err(e) if e.is_coming_soon() => emcee::notice(&format!("🚧 {e}")),
    Err(e) => emcee::alert(&format!("⚠️ Quantum instability: {e}")),
  }
}

/// Run an interactive support session until exit/quit or EOF
pub fn chat(kb_path: &Path, seed: Option<u64>) -> Result<()> {
  let mut bot = build_chatbot(kb_path, seed);

  emcee::headline("Quantum AI Assistant Pro");
  emcee::hint("Describe your problem, or try 'help'. Type 'exit' to end the session.");

  loop {
    print!("{} ", "you>".green().bold());
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
      break; // EOF
    }

    let query = line.trim();
    if query.is_empty() {
      continue;
    }
    if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
      break;
    }

    respond(&mut bot, query);
  }

  print_session_summary(&bot);
  Ok(())
}

fn print_session_summary(bot: &Chatbot) {
  let session = bot.session_stats();
  let search = bot.search_stats();

  println!();
  emcee::closing("Session complete");
  emcee::summary_row("Queries", &session.queries.to_string());
  emcee::summary_row("Duration", &session.duration);
  emcee::summary_row("Started", &session.start_time);
  emcee::summary_row("Searches", &search.total.to_string());

  if !search.trending.is_empty() {
    println!("{}", "Trending this session:".bold());
    for (query, count) in &search.trending {
      emcee::summary_item(&format!("{query} ({count})"));
    }
  }
}

/// Ask a single question and exit
pub fn ask(kb_path: &Path, seed: Option<u64>, words: &[String]) -> Result<()> {
  let query = words.join(" ");
  let mut bot = build_chatbot(kb_path, seed);

  match bot.process(&query) {
    Ok(reply) => {
      emcee::speaker_line(ASSISTANT_NAME, emcee::Voice::Assistant, &reply);
      Ok(())
    }
    Err(e) if e.is_coming_soon() => {
      emcee::notice(&format!("🚧 {e}"));
      Ok(())
    }
    Err(e) => Err(anyhow!("⚠️ Quantum instability: {e}")),
  }
}

/// List every topic the assistant can match against
pub fn topics(kb_path: &Path) -> Result<()> {
  let kb = KnowledgeBase::load_or_builtin(kb_path);

  println!("{}", "Knowledge base topics:".bold());
  for (topic, solutions) in kb.iter() {
    println!("  {} ({})", topic.cyan(), solutions.len());
  }
  Ok(())
}

/// Show the numbered solutions recorded for one topic
pub fn show(kb_path: &Path, topic: &str) -> Result<()> {
  let kb = KnowledgeBase::load_or_builtin(kb_path);
  let entry =
    kb.find(topic).ok_or_else(|| anyhow!("Topic '{}' not found in the knowledge base", topic))?;

  println!("{}", format!("=== {} ===", entry.topic).blue().bold());
  for (i, solution) in entry.solutions.iter().enumerate() {
    println!("{}. {}", i + 1, solution);
  }
  Ok(())
}

/// Write the built-in catalog to disk so it can be customized
pub fn init(kb_path: &Path, force: bool) -> Result<()> {
  if kb_path.exists() && !force {
    return Err(anyhow!(
      "Knowledge base already exists at {} (use --force to start over)",
      kb_path.display()
    ));
  }

  let kb = KnowledgeBase::builtin();
  kb.save_to(kb_path)?;

  println!("{} Seeded knowledge base ({} topics) at {}", "✓".green(), kb.len(), kb_path.display());
  Ok(())
}
