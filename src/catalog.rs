//! Album catalog: data model and directory loader.
//!
//! Albums are described by one TOML file each. The loader walks a
//! catalog directory, parses every album file and optionally probes
//! the referenced audio files for durations the catalog does not
//! carry itself.

mod load;
mod model;

pub use load::*;
pub use model::*;

#[cfg(test)]
mod tests;
