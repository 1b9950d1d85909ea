//! Sensei: an interactive machine-learning course player for the terminal.
//!
//! The `core` module is the engine — catalog, step navigation, quiz grading,
//! and the playground bridge — and knows nothing about terminals. `content`
//! is the embedded course catalog, and `tui` is the ratatui adapter that
//! turns keys into actions and state into frames.

pub mod content;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;
