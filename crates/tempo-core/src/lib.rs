//! # Tempo Core Library
//!
//! This library provides the core business logic for the Tempo work/rest
//! interval timer. All operations are available to any front end (CLI,
//! desktop shell) through the same library surface; rendering, dialogs and
//! audio playback live in those front ends, not here.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a caller-ticked state machine that counts a phase
//!   down one second at a time and drives phase transitions
//! - **Storage**: SQLite-backed key-value persistence for configuration,
//!   preferences, session history and statistics
//! - **Statistics**: cumulative focus/break totals and a consecutive-day
//!   streak, updated once per recorded session
//! - **Backup**: export/import of all persisted records as one JSON blob
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: phase/countdown state machine
//! - [`Database`]: key-value persistence backend
//! - [`ConfigStore`] / [`PreferencesStore`]: validated settings stores
//! - [`SessionRecorder`] / [`StatsStore`]: session history and aggregation

pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use error::{CoreError, DatabaseError, Result};
pub use events::Event;
pub use storage::{
    backup, ConfigStore, Database, Preferences, PreferencesStore, SessionRecord, SessionRecorder,
    SessionStore, Statistics, StatsStore, Theme, TimerConfig,
};
pub use timer::{Phase, Ticker, TimerEngine, TimerState, TimerStatus};
