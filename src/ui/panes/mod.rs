//! TUI pane rendering modules
//!
//! Each pane is a stateless `render_*` function over the current snapshot;
//! scroll offsets live in the [`App`](crate::ui::App) and are clamped here.
//!
//! # Pane Modules
//!
//! - [`array`]: the main array as bars (numbers) or cells (strings), with
//!   pointer labels and the echoed expression
//! - [`details`]: variables, auxiliary payload, counters and result
//! - [`pseudocode`]: pseudocode, complexity and the parameters in effect
//! - [`status`]: status bar with keybindings and playback state
//! - `utils`: shared block styling, scrolling and payload formatting

mod utils;

pub mod array;
pub mod details;
pub mod pseudocode;
pub mod status;

pub use array::render_array_pane;
pub use details::render_details_pane;
pub use pseudocode::render_pseudocode_pane;
pub use status::render_status_bar;
