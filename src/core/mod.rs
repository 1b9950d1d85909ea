//! # Core Application Logic
//!
//! This module contains Sensei's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────────┐
//!                    │           CORE              │
//!                    │  (this module)              │
//!                    │                             │
//!                    │  • catalog  (course data)   │
//!                    │  • navigator (step cursor)  │
//!                    │  • quiz     (grading)       │
//!                    │  • bridge   (playground)    │
//!                    │  • state/action (reducer)   │
//!                    │                             │
//!                    │  No I/O*. No UI. Pure.      │
//!                    └─────────────┬───────────────┘
//!                                  │
//!                  ┌───────────────┴───────────────┐
//!                  ▼                               ▼
//!           ┌────────────┐                  ┌────────────┐
//!           │    TUI     │                  │  progress  │
//!           │  Adapter   │                  │  (files)   │
//!           │ (ratatui)  │                  │            │
//!           └────────────┘                  └────────────┘
//! ```
//!
//! (*) `config` and `progress` are the two file-touching corners, kept here
//! because they define the shapes the reducer's `Effect`s refer to. The
//! reducer itself never performs I/O.

pub mod action;
pub mod bridge;
pub mod catalog;
pub mod config;
pub mod navigator;
pub mod progress;
pub mod quiz;
pub mod state;
