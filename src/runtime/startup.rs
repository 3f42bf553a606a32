use anyhow::Context;
use log::info;

use crate::catalog::{self, Album};
use crate::config;

/// Loads the catalog and resolves which album to open: the slug given
/// on the command line, or the first album in catalog order.
pub fn pick_album(settings: &config::Settings, slug: Option<&str>) -> anyhow::Result<Album> {
    let dir = &settings.catalog.dir;
    let catalog = catalog::load_dir(dir, settings.catalog.probe_durations)
        .with_context(|| format!("loading albums from {}", dir.display()))?;
    info!(
        "catalog: {} album(s) from {}",
        catalog.albums().len(),
        dir.display()
    );

    let album = match slug {
        Some(slug) => catalog.find_by_slug(slug).with_context(|| {
            let known: Vec<&str> = catalog.albums().iter().map(|a| a.slug.as_str()).collect();
            format!("no album with slug '{slug}' (available: {})", known.join(", "))
        })?,
        None => catalog.first().context("catalog has no albums")?,
    };
    info!("opening album '{}' ({} songs)", album.slug, album.songs.len());
    Ok(album.clone())
}
