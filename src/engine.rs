//! Audio engine seam.
//!
//! The playback controller drives a boxed [`AudioEngine`] and never
//! touches rodio directly. This module defines that contract, the
//! events and errors that cross it, and the rodio-backed engine that
//! implements it on a dedicated audio thread.

mod backend;
mod clock;
mod sink;
mod thread;
mod types;

pub use backend::RodioEngine;
pub use types::*;

#[cfg(test)]
mod tests;
