//! Playback controller.
//!
//! `player::Player` owns one album, one audio engine handle and the
//! transport state the UI renders. All playback intent goes through
//! it; engine truth comes back through the event subscription.

mod model;

pub use model::*;
