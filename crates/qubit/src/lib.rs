//! Qubit - Quantum-Themed Technical Support Assistant
//!
//! A session-scoped support chatbot that ranks free-text problem
//! descriptions against a topic-keyed knowledge base and composes
//! templated replies with a bounded dose of quantum randomness.

pub mod commands;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod reply;
pub mod reserved;
pub mod search;
pub mod session;
pub mod similarity;
