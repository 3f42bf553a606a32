use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{Decoder, Source};

use super::thread::{EngineCmd, spawn_engine_thread};
use super::types::{AudioEngine, EngineError, EngineEvent};

/// Rodio-backed engine.
///
/// Sources are decoded on the caller's thread so `load` reports open
/// and decode failures synchronously; the decoded source is then
/// handed to a dedicated audio thread that owns the output stream.
pub struct RodioEngine {
    tx: Sender<EngineCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
    has_source: bool,
}

impl RodioEngine {
    /// Spawn the audio thread and open the default output device.
    /// Fails with `NoDevice` when the machine has no usable output.
    pub fn start() -> Result<Self, EngineError> {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let handle = spawn_engine_thread(rx, ready_tx);

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = handle.join();
                return Err(e);
            }
            Err(_) => {
                let _ = handle.join();
                return Err(EngineError::NoDevice(
                    "audio thread exited during startup".to_string(),
                ));
            }
        }

        Ok(Self {
            tx,
            join: Mutex::new(Some(handle)),
            has_source: false,
        })
    }

    fn send(&self, cmd: EngineCmd) -> Result<(), EngineError> {
        self.tx.send(cmd).map_err(|_| EngineError::Closed)
    }
}

impl AudioEngine for RodioEngine {
    fn load(&mut self, src: &str) -> Result<(), EngineError> {
        let path = PathBuf::from(src);
        let file = File::open(&path).map_err(|source| EngineError::Open {
            src: src.to_string(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|source| EngineError::Decode {
            src: src.to_string(),
            source,
        })?;
        // Not every container knows its length up front; the catalog
        // estimate stays in effect when this comes back None.
        let duration = source.total_duration();

        self.send(EngineCmd::Load {
            path,
            source,
            duration,
        })?;
        self.has_source = true;
        Ok(())
    }

    fn play(&mut self) -> Result<(), EngineError> {
        if !self.has_source {
            return Err(EngineError::NoSource);
        }
        self.send(EngineCmd::Play)
    }

    fn pause(&mut self) {
        let _ = self.send(EngineCmd::Pause);
    }

    fn seek_to(&mut self, position: Duration) {
        let _ = self.send(EngineCmd::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        let _ = self.send(EngineCmd::SetVolume(volume));
    }

    fn subscribe(&mut self) -> Receiver<EngineEvent> {
        let (tx, rx) = mpsc::channel();
        let _ = self.send(EngineCmd::Subscribe(tx));
        rx
    }

    fn detach(&mut self) {
        let _ = self.send(EngineCmd::Detach);
    }

    fn unload(&mut self) {
        let _ = self.send(EngineCmd::Unload);
        self.has_source = false;
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        let _ = self.send(EngineCmd::Shutdown);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
