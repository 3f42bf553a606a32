//! Controller model: `Player`, its error type and the render snapshot.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use log::warn;
use thiserror::Error;

use crate::catalog::{Album, Song};
use crate::engine::{AudioEngine, EngineError, EngineEvent};

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("album '{slug}' has no songs")]
    EmptyAlbum { slug: String },
    #[error("song index {index} out of range, album has {len} songs")]
    SongOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Drives one album through one audio engine.
///
/// There is always exactly one current song (`current` indexes into
/// the album's song list) and the engine holds that song's source.
/// Songs are identified by index throughout; two songs with the same
/// title stay distinct.
///
/// State transitions commit only after the engine accepts the
/// operation, so a refused load or start never leaves the UI claiming
/// playback that is not happening.
pub struct Player {
    album: Album,
    engine: Box<dyn AudioEngine>,
    events: Option<Receiver<EngineEvent>>,
    current: usize,
    playing: bool,
    position: Duration,
    duration: Option<Duration>,
    volume: f32,
}

impl Player {
    /// Take ownership of the engine and prepare the album's first song,
    /// paused. The duration starts from the catalog estimate until the
    /// engine reports the real one.
    pub fn new(
        album: Album,
        mut engine: Box<dyn AudioEngine>,
        volume: f32,
    ) -> Result<Self, PlayerError> {
        if album.songs.is_empty() {
            return Err(PlayerError::EmptyAlbum {
                slug: album.slug.clone(),
            });
        }

        let events = engine.subscribe();
        // NaN survives f32::clamp; fall back to the sink default so
        // the engine never sees a non-finite volume.
        let volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
        engine.set_volume(volume);
        engine.load(&album.songs[0].audio_src)?;
        let duration = album.songs[0].duration;

        Ok(Self {
            album,
            engine,
            events: Some(events),
            current: 0,
            playing: false,
            position: Duration::ZERO,
            duration,
            volume,
        })
    }

    pub fn album(&self) -> &Album {
        &self.album
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start or resume the current song. The playing flag is set only
    /// once the engine confirms.
    pub fn play(&mut self) -> Result<(), PlayerError> {
        self.engine.play()?;
        self.playing = true;
        Ok(())
    }

    /// Pause, keeping the position so `play` resumes where it left off.
    pub fn pause(&mut self) {
        self.engine.pause();
        self.playing = false;
    }

    /// Make the song at `index` current, loaded and paused at the
    /// start. Does not itself begin playback. On failure the previous
    /// song stays current and loaded.
    pub fn select_song(&mut self, index: usize) -> Result<(), PlayerError> {
        let song = self
            .album
            .songs
            .get(index)
            .ok_or(PlayerError::SongOutOfRange {
                index,
                len: self.album.songs.len(),
            })?;

        self.engine.load(&song.audio_src)?;
        self.current = index;
        self.playing = false;
        self.position = Duration::ZERO;
        self.duration = song.duration;
        Ok(())
    }

    /// The track-row click policy: the current song toggles
    /// play/pause, any other song becomes current and starts playing.
    pub fn toggle_or_select(&mut self, index: usize) -> Result<(), PlayerError> {
        if index >= self.album.songs.len() {
            return Err(PlayerError::SongOutOfRange {
                index,
                len: self.album.songs.len(),
            });
        }

        if index == self.current && self.playing {
            self.pause();
            return Ok(());
        }
        if index != self.current {
            self.select_song(index)?;
        }
        self.play()
    }

    /// Step to the previous song and play it. At the first song this
    /// reloads and replays the first song from the start.
    pub fn previous(&mut self) -> Result<(), PlayerError> {
        let target = self.current.saturating_sub(1);
        self.select_song(target)?;
        self.play()
    }

    /// Step to the next song and play it. At the last song this
    /// reloads and replays the last song from the start.
    pub fn next(&mut self) -> Result<(), PlayerError> {
        let target = (self.current + 1).min(self.album.songs.len() - 1);
        self.select_song(target)?;
        self.play()
    }

    /// Jump to `fraction` of the known duration. Without a duration
    /// there is nothing meaningful to scale against, so this is a
    /// no-op. The position updates immediately; the engine's own
    /// TimeUpdate confirms it later.
    pub fn seek(&mut self, fraction: f32) {
        if !fraction.is_finite() {
            return;
        }
        let Some(duration) = self.duration else {
            return;
        };
        let target = duration.mul_f32(fraction.clamp(0.0, 1.0));
        self.engine.seek_to(target);
        self.position = target;
    }

    /// Set volume, clamped to 0.0..=1.0. Non-finite requests are
    /// ignored, keeping the current volume.
    pub fn set_volume(&mut self, ratio: f32) {
        if !ratio.is_finite() {
            return;
        }
        let volume = ratio.clamp(0.0, 1.0);
        self.engine.set_volume(volume);
        self.volume = volume;
    }

    /// Apply everything the engine reported since the last poll.
    pub fn poll_events(&mut self) {
        let mut pending: Vec<EngineEvent> = Vec::new();
        if let Some(rx) = &self.events {
            while let Ok(event) = rx.try_recv() {
                pending.push(event);
            }
        }

        for event in pending {
            match event {
                EngineEvent::TimeUpdate(position) => self.position = position,
                EngineEvent::DurationChange(duration) => self.duration = Some(duration),
                EngineEvent::Ended => self.song_ended(),
            }
        }
    }

    /// Auto-advance on end of song; the last song ends the album with
    /// the position pinned at its full duration.
    fn song_ended(&mut self) {
        let next = self.current + 1;
        if next < self.album.songs.len() {
            match self.select_song(next) {
                Ok(()) => {
                    if let Err(e) = self.play() {
                        warn!("auto-advance start failed: {e}");
                    }
                }
                Err(e) => {
                    self.playing = false;
                    warn!("auto-advance load failed: {e}");
                }
            }
        } else {
            self.playing = false;
            if let Some(duration) = self.duration {
                self.position = duration;
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            album: &self.album,
            current: self.current,
            song: &self.album.songs[self.current],
            playing: self.playing,
            position: self.position,
            duration: self.duration,
            volume: self.volume,
        }
    }

    /// Tear down: drop our event receiver, detach the engine-side
    /// subscription, then discard the loaded source. Safe to call more
    /// than once; late engine events go nowhere instead of reviving a
    /// dead view.
    pub fn close(&mut self) {
        self.events = None;
        self.engine.detach();
        self.engine.unload();
        self.playing = false;
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.close();
    }
}

/// Immutable view of the transport for one render pass.
pub struct Snapshot<'a> {
    pub album: &'a Album,
    pub current: usize,
    pub song: &'a Song,
    pub playing: bool,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub volume: f32,
}

impl Snapshot<'_> {
    /// Played fraction of the known duration, for progress display.
    pub fn progress(&self) -> Option<f32> {
        let duration = self.duration?;
        if duration.is_zero() {
            return None;
        }
        Some((self.position.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0))
    }
}
