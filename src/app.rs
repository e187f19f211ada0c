//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the loaded tracks, the
//! active page and the selection/filter state.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
