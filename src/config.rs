//! Settings schema and loading.
//!
//! Four sections drive the app: catalog location, playback defaults,
//! control steps and UI text. Values come from an optional TOML file
//! overlaid with `ADAGIO__*` environment variables; bad values fall
//! back to defaults at startup rather than refusing to run.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
