//! Dataset module: track records and the delimiter-separated table loader.
//!
//! The loader produces the strongly typed [`Track`] records consumed by the
//! analysis and UI layers; [`discover`] lists candidate dataset files so
//! missing-file errors can say what is actually on disk.

mod discover;
mod load;
mod model;

pub use discover::discover;
pub use load::{DatasetError, load};
pub use model::Track;
