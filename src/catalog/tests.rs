use std::fs;
use std::path::Path;
use std::time::Duration;

use tempfile::tempdir;

use super::*;

fn album_toml(slug: &str, title: &str) -> String {
    format!(
        r#"
slug = "{slug}"
title = "{title}"
artist = "Glass Harbor"
release_info = "2019 Glass Harbor"

[[songs]]
title = "First Light"
audio_src = "audio/first-light.mp3"
duration_secs = 214.2

[[songs]]
title = "Crosstown"
audio_src = "/music/crosstown.ogg"
"#
    )
}

#[test]
fn find_by_slug_returns_exact_match_or_none() {
    let albums = vec![
        Album {
            slug: "first".to_string(),
            title: "First".to_string(),
            artist: "A".to_string(),
            release_info: String::new(),
            cover_art: None,
            songs: vec![Song {
                title: "One".to_string(),
                audio_src: "one.mp3".to_string(),
                duration: None,
            }],
        },
        Album {
            slug: "second".to_string(),
            title: "Second".to_string(),
            artist: "B".to_string(),
            release_info: String::new(),
            cover_art: None,
            songs: vec![Song {
                title: "Two".to_string(),
                audio_src: "two.mp3".to_string(),
                duration: None,
            }],
        },
    ];
    let catalog = Catalog::new(albums);

    assert_eq!(catalog.find_by_slug("second").map(|a| a.title.as_str()), Some("Second"));
    assert!(catalog.find_by_slug("third").is_none());
    // Exact match only, no case folding.
    assert!(catalog.find_by_slug("Second").is_none());
}

#[test]
fn load_dir_parses_album_and_keeps_song_order() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("shade.toml"), album_toml("shade", "Shade")).unwrap();

    let catalog = load_dir(dir.path(), false).unwrap();
    assert_eq!(catalog.albums().len(), 1);

    let album = catalog.find_by_slug("shade").unwrap();
    assert_eq!(album.title, "Shade");
    assert_eq!(album.artist, "Glass Harbor");
    assert_eq!(album.songs.len(), 2);
    assert_eq!(album.songs[0].title, "First Light");
    assert_eq!(album.songs[1].title, "Crosstown");
    assert_eq!(album.songs[0].duration, Some(Duration::from_secs_f64(214.2)));
    assert_eq!(album.songs[1].duration, None);
}

#[test]
fn load_dir_resolves_relative_sources_against_album_dir() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("shade.toml"), album_toml("shade", "Shade")).unwrap();

    let catalog = load_dir(dir.path(), false).unwrap();
    let album = catalog.find_by_slug("shade").unwrap();

    let expected = dir.path().join("audio/first-light.mp3");
    assert_eq!(Path::new(&album.songs[0].audio_src), expected);
    // Absolute paths pass through untouched.
    assert_eq!(album.songs[1].audio_src, "/music/crosstown.ogg");
}

#[test]
fn load_dir_leaves_urls_untouched() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("stream.toml"),
        r#"
slug = "stream"
title = "Stream"
artist = "A"

[[songs]]
title = "Remote"
audio_src = "https://example.com/remote.mp3"
"#,
    )
    .unwrap();

    let catalog = load_dir(dir.path(), false).unwrap();
    let album = catalog.find_by_slug("stream").unwrap();
    assert_eq!(album.songs[0].audio_src, "https://example.com/remote.mp3");
}

#[test]
fn load_dir_orders_albums_by_file_path() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.toml"), album_toml("beta", "Beta")).unwrap();
    fs::write(dir.path().join("a.toml"), album_toml("alpha", "Alpha")).unwrap();

    let catalog = load_dir(dir.path(), false).unwrap();
    let slugs: Vec<&str> = catalog.albums().iter().map(|a| a.slug.as_str()).collect();
    assert_eq!(slugs, vec!["alpha", "beta"]);
    assert_eq!(catalog.first().map(|a| a.slug.as_str()), Some("alpha"));
}

#[test]
fn load_dir_skips_hidden_and_non_toml_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("real.toml"), album_toml("real", "Real")).unwrap();
    fs::write(dir.path().join(".hidden.toml"), album_toml("hidden", "Hidden")).unwrap();
    fs::write(dir.path().join("notes.txt"), "not an album").unwrap();

    let catalog = load_dir(dir.path(), false).unwrap();
    assert_eq!(catalog.albums().len(), 1);
    assert!(catalog.find_by_slug("hidden").is_none());
}

#[test]
fn load_dir_rejects_duplicate_slugs() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.toml"), album_toml("same", "One")).unwrap();
    fs::write(dir.path().join("b.toml"), album_toml("same", "Two")).unwrap();

    match load_dir(dir.path(), false) {
        Err(CatalogError::DuplicateSlug { slug, .. }) => assert_eq!(slug, "same"),
        other => panic!("expected DuplicateSlug, got {other:?}"),
    }
}

#[test]
fn load_dir_rejects_album_without_songs() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("empty.toml"),
        r#"
slug = "empty"
title = "Empty"
artist = "Nobody"
songs = []
"#,
    )
    .unwrap();

    match load_dir(dir.path(), false) {
        Err(CatalogError::EmptyAlbum { slug }) => assert_eq!(slug, "empty"),
        other => panic!("expected EmptyAlbum, got {other:?}"),
    }
}

#[test]
fn load_dir_reports_parse_errors_with_path() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("broken.toml"), "slug = [not toml").unwrap();

    match load_dir(dir.path(), false) {
        Err(CatalogError::Parse { path, .. }) => {
            assert!(path.ends_with("broken.toml"));
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn load_dir_errors_on_empty_directory() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        load_dir(dir.path(), false),
        Err(CatalogError::NoAlbums { .. })
    ));
}

#[test]
fn invalid_duration_values_become_unknown() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("odd.toml"),
        r#"
slug = "odd"
title = "Odd"
artist = "A"

[[songs]]
title = "Backwards"
audio_src = "b.mp3"
duration_secs = -3.0

[[songs]]
title = "Unknowable"
audio_src = "u.mp3"
duration_secs = nan

[[songs]]
title = "Endless"
audio_src = "e.mp3"
duration_secs = inf

[[songs]]
title = "Geological"
audio_src = "g.mp3"
duration_secs = 1.0e20
"#,
    )
    .unwrap();

    // The last value is finite but larger than a Duration can hold;
    // it must degrade to unknown like the rest, not abort the load.
    let catalog = load_dir(dir.path(), false).unwrap();
    let album = catalog.find_by_slug("odd").unwrap();
    let durations: Vec<_> = album.songs.iter().map(|s| s.duration).collect();
    assert_eq!(durations, vec![None, None, None, None]);
}

#[test]
fn probing_garbage_audio_leaves_duration_unknown() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("not-audio.mp3"), b"not a real mp3").unwrap();
    fs::write(
        dir.path().join("probe.toml"),
        r#"
slug = "probe"
title = "Probe"
artist = "A"

[[songs]]
title = "Garbage"
audio_src = "not-audio.mp3"
"#,
    )
    .unwrap();

    let catalog = load_dir(dir.path(), true).unwrap();
    let album = catalog.find_by_slug("probe").unwrap();
    assert_eq!(album.songs[0].duration, None);
}
