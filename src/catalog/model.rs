use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// One song inside an album.
#[derive(Clone, Debug, Deserialize)]
pub struct Song {
    pub title: String,
    /// Path or URL of the audio data. Relative paths are resolved
    /// against the album file's directory at load time.
    pub audio_src: String,
    /// Length estimate from the catalog, if it carries one. The
    /// engine's reported duration replaces this once known.
    #[serde(
        default,
        rename = "duration_secs",
        deserialize_with = "de_duration_secs"
    )]
    pub duration: Option<Duration>,
}

/// One album: presentation metadata plus its ordered song list.
#[derive(Clone, Debug, Deserialize)]
pub struct Album {
    pub slug: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub release_info: String,
    #[serde(default)]
    pub cover_art: Option<String>,
    pub songs: Vec<Song>,
}

/// A fixed collection of albums, looked up by slug.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    albums: Vec<Album>,
}

impl Catalog {
    pub fn new(albums: Vec<Album>) -> Self {
        Self { albums }
    }

    /// Case-sensitive exact slug lookup. Returns the first match in
    /// catalog order.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.slug == slug)
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn first(&self) -> Option<&Album> {
        self.albums.first()
    }
}

/// Accept fractional seconds; values a duration cannot hold
/// (negative, nan, inf, more seconds than u64 carries) become
/// unknown instead of failing the whole album file.
fn de_duration_secs<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = Option::<f64>::deserialize(deserializer)?;
    Ok(secs.and_then(|s| Duration::try_from_secs_f64(s).ok()))
}
