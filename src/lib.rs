//! # Introduction
//!
//! algotrace runs a textbook algorithm exactly once on a working copy of its
//! input, recording a fully materialized snapshot of the visible state at
//! every observable event. The finished trace is then navigated forward,
//! backward, by seeking or by autoplay, without ever running the algorithm
//! again.
//!
//! ## Pipeline
//!
//! ```text
//! Raw input → Parser → Registry → Step generator + Recorder → Trace → Player → TUI
//! ```
//!
//! 1. [`input`]: parses array literals, bracket strings and text, and
//!    generates seeded random inputs.
//! 2. [`registry`]: the read-only table of [`registry::AlgorithmDescriptor`]s
//!    with their parameter schemas.
//! 3. [`algorithms`]: one deterministic step generator per algorithm, each
//!    driving a [`recorder::Recorder`].
//! 4. [`snapshot`]: the [`snapshot::Snapshot`] data model and the immutable
//!    [`snapshot::Trace`].
//! 5. [`player`]: the playback state machine with its single autoplay timer.
//! 6. [`ui`]: ratatui-based viewer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use algotrace::player::{Player, PlaybackStatus};
//! use algotrace::registry::Params;
//!
//! let mut player = Player::default();
//! player.load_algorithm("bubble-sort", &[5, 2, 4, 1], &Params::new()).unwrap();
//! let end = player.seek(player.total_steps());
//! assert_eq!(end.status, PlaybackStatus::Finished);
//! assert_eq!(player.current_snapshot().unwrap().array_state, vec![1, 2, 4, 5]);
//! ```

pub mod algorithms;
pub mod config;
pub mod errors;
pub mod input;
pub mod player;
pub mod recorder;
pub mod registry;
pub mod snapshot;
pub mod ui;
