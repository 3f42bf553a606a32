//! Engine-facing types: the trait the controller drives, plus the
//! events and errors that cross it.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use thiserror::Error;

/// Notifications an engine pushes while a source is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The playback position moved.
    TimeUpdate(Duration),
    /// The engine learned the real length of the current source.
    DurationChange(Duration),
    /// The current source played through to its end.
    Ended,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cannot open {src}: {source}")]
    Open {
        src: String,
        source: std::io::Error,
    },
    #[error("cannot decode {src}: {source}")]
    Decode {
        src: String,
        source: rodio::decoder::DecoderError,
    },
    #[error("no audio output device: {0}")]
    NoDevice(String),
    #[error("no source loaded")]
    NoSource,
    #[error("audio engine shut down")]
    Closed,
}

/// Contract between the playback controller and an audio backend.
///
/// An engine holds at most one source. `load` replaces it and leaves
/// the new source paused at position zero; position and duration
/// reports flow back through the receiver handed out by `subscribe`.
pub trait AudioEngine: Send {
    /// Swap in a new source. Open and decode failures surface here,
    /// before the engine's current source is touched.
    fn load(&mut self, src: &str) -> Result<(), EngineError>;

    /// Start or resume the loaded source. Refused when nothing is
    /// loaded or the engine is gone.
    fn play(&mut self) -> Result<(), EngineError>;

    /// Pause, keeping the current position.
    fn pause(&mut self);

    /// Jump to an absolute position in the loaded source.
    fn seek_to(&mut self, position: Duration);

    /// Output volume, clamped by callers to 0.0..=1.0.
    fn set_volume(&mut self, volume: f32);

    /// Hand out the event stream. A later call replaces the previous
    /// subscription.
    fn subscribe(&mut self) -> Receiver<EngineEvent>;

    /// Drop the engine-side end of the subscription so no further
    /// events are delivered.
    fn detach(&mut self);

    /// Stop playback and discard the loaded source.
    fn unload(&mut self);
}
