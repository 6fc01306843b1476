//! # Core Application Logic
//!
//! Business logic of the assistant. Knows nothing about terminals or HTTP.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │  ── spawns effects ──▶   │  Backend   │
//!     │ (ratatui)  │  ◀── completions ─────   │ (reqwest)  │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `App`, `Conversation`, `ContextState`, `ChatTurn`
//! - [`action`]: `Action`, `Effect`, and the `update()` reducer
//! - [`notification`]: transient user-visible messages
//! - [`config`]: layered configuration

pub mod action;
pub mod config;
pub mod notification;
pub mod state;
