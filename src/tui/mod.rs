//! Terminal dashboard.
//!
//! Renders the host, network, and modem panels from the latest published
//! snapshots. The panel state is itself a [`StatusSink`](crate::render::StatusSink):
//! the refresh loop publishes snapshots into it and the draw pass reads it
//! back.

mod app;
mod render;
mod state;
mod style;

pub use app::App;
pub use state::PanelState;
