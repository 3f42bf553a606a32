use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use log::{debug, warn};
use rodio::{Decoder, OutputStreamBuilder, Sink};

use super::clock::TransportClock;
use super::sink::create_sink_at;
use super::types::{EngineError, EngineEvent};

/// Commands the facade sends into the audio thread.
pub(super) enum EngineCmd {
    /// Swap in an already-decoded source, paused at zero. The path is
    /// kept for seek rebuilds.
    Load {
        path: PathBuf,
        source: Decoder<BufReader<File>>,
        duration: Option<Duration>,
    },
    Play,
    Pause,
    /// Jump to an absolute position in the current source.
    Seek(Duration),
    SetVolume(f32),
    /// Replace the event subscription.
    Subscribe(Sender<EngineEvent>),
    /// Drop the event subscription.
    Detach,
    /// Discard the current source.
    Unload,
    Shutdown,
}

/// Deliver an event; a dropped receiver ends the subscription.
fn emit(events: &mut Option<Sender<EngineEvent>>, event: EngineEvent) {
    if let Some(tx) = events {
        if tx.send(event).is_err() {
            *events = None;
        }
    }
}

pub(super) fn spawn_engine_thread(
    rx: Receiver<EngineCmd>,
    ready_tx: Sender<Result<(), EngineError>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let _ = ready_tx.send(Err(EngineError::NoDevice(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);
        if ready_tx.send(Ok(())).is_err() {
            return;
        }

        let mut sink: Option<Sink> = None;
        let mut path: Option<PathBuf> = None;
        let mut clock = TransportClock::new();
        let mut playing = false;
        let mut volume: f32 = 1.0;
        let mut events: Option<Sender<EngineEvent>> = None;

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(EngineCmd::Load {
                    path: new_path,
                    source,
                    duration,
                }) => {
                    if let Some(s) = sink.take() {
                        s.stop();
                    }
                    let new_sink = Sink::connect_new(stream.mixer());
                    new_sink.append(source);
                    new_sink.pause();
                    new_sink.set_volume(volume);
                    sink = Some(new_sink);
                    debug!("loaded {}", new_path.display());
                    path = Some(new_path);
                    playing = false;
                    clock.reset();
                    if let Some(d) = duration {
                        emit(&mut events, EngineEvent::DurationChange(d));
                    }
                    emit(&mut events, EngineEvent::TimeUpdate(Duration::ZERO));
                }
                Ok(EngineCmd::Play) => {
                    if let Some(s) = &sink {
                        s.play();
                        clock.start();
                        playing = true;
                    }
                }
                Ok(EngineCmd::Pause) => {
                    if let Some(s) = &sink {
                        s.pause();
                        clock.stop();
                        playing = false;
                        emit(&mut events, EngineEvent::TimeUpdate(clock.elapsed()));
                    }
                }
                Ok(EngineCmd::Seek(position)) => {
                    let Some(p) = &path else {
                        continue;
                    };
                    // Scrubbing rebuilds the sink and skips into the file. Build
                    // the replacement before stopping the old one so a failed
                    // rebuild leaves playback intact.
                    match create_sink_at(&stream, p, position) {
                        Ok(new_sink) => {
                            new_sink.set_volume(volume);
                            if let Some(s) = sink.take() {
                                s.stop();
                            }
                            if playing {
                                new_sink.play();
                            }
                            sink = Some(new_sink);
                            clock.set(position);
                            emit(&mut events, EngineEvent::TimeUpdate(position));
                        }
                        Err(e) => warn!("seek rebuild failed: {e}"),
                    }
                }
                Ok(EngineCmd::SetVolume(v)) => {
                    volume = v;
                    if let Some(s) = &sink {
                        s.set_volume(v);
                    }
                }
                Ok(EngineCmd::Subscribe(tx)) => {
                    events = Some(tx);
                }
                Ok(EngineCmd::Detach) => {
                    events = None;
                }
                Ok(EngineCmd::Unload) => {
                    if let Some(s) = sink.take() {
                        s.stop();
                    }
                    path = None;
                    playing = false;
                    clock.reset();
                }
                Ok(EngineCmd::Shutdown) => {
                    if let Some(s) = sink.take() {
                        s.stop();
                    }
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic tick: position report while playing, end
                    // detection when the sink drained.
                    if !playing {
                        continue;
                    }
                    if let Some(s) = &sink {
                        if s.empty() {
                            playing = false;
                            clock.stop();
                            emit(&mut events, EngineEvent::Ended);
                        } else {
                            emit(&mut events, EngineEvent::TimeUpdate(clock.elapsed()));
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
