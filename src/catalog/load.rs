use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use lofty::file::AudioFile;
use lofty::probe::Probe;
use thiserror::Error;
use walkdir::WalkDir;

use super::model::{Album, Catalog};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read album file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse album file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("duplicate album slug '{slug}' in {}", path.display())]
    DuplicateSlug { slug: String, path: PathBuf },
    #[error("album '{slug}' has no songs")]
    EmptyAlbum { slug: String },
    #[error("no album files found in {}", dir.display())]
    NoAlbums { dir: PathBuf },
}

fn is_album_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn is_remote(src: &str) -> bool {
    src.contains("://")
}

/// Resolve relative `audio_src` entries against the album file's
/// directory so the engine only ever sees usable paths. URLs pass
/// through untouched.
fn resolve_sources(album: &mut Album, album_file: &Path) {
    let base = album_file.parent().unwrap_or(Path::new("."));
    for song in &mut album.songs {
        if is_remote(&song.audio_src) || Path::new(&song.audio_src).is_absolute() {
            continue;
        }
        song.audio_src = base.join(&song.audio_src).to_string_lossy().into_owned();
    }
}

fn probe_duration(path: &Path) -> Option<std::time::Duration> {
    let tagged = Probe::open(path).ok()?.read().ok()?;
    Some(tagged.properties().duration())
}

/// Fill in durations the catalog does not declare by probing the
/// audio files themselves. Probe failures leave the duration unknown;
/// the transport shows `-:--` until the engine reports one.
fn probe_missing_durations(album: &mut Album) {
    for song in &mut album.songs {
        if song.duration.is_some() || is_remote(&song.audio_src) {
            continue;
        }
        song.duration = probe_duration(Path::new(&song.audio_src));
    }
}

fn load_album_file(path: &Path) -> Result<Album, CatalogError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut album: Album = toml::from_str(&text).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if album.songs.is_empty() {
        return Err(CatalogError::EmptyAlbum {
            slug: album.slug.clone(),
        });
    }
    resolve_sources(&mut album, path);
    Ok(album)
}

/// Load every album file under `dir`, in path order.
///
/// Slugs must be unique across the catalog and every album must have
/// at least one song; either violation fails the whole load rather
/// than dropping data silently.
pub fn load_dir(dir: &Path, probe_durations: bool) -> Result<Catalog, CatalogError> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file() && is_album_file(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(CatalogError::NoAlbums {
            dir: dir.to_path_buf(),
        });
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut albums: Vec<Album> = Vec::with_capacity(files.len());
    for path in files {
        let mut album = load_album_file(&path)?;
        if !seen.insert(album.slug.clone()) {
            return Err(CatalogError::DuplicateSlug {
                slug: album.slug.clone(),
                path,
            });
        }
        if probe_durations {
            probe_missing_durations(&mut album);
        }
        albums.push(album);
    }

    Ok(Catalog::new(albums))
}
