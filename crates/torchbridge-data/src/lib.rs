//! Preset file I/O for Torchbridge.
//!
//! Reads preset libraries from RON, JSON or TOML files, runs every entry
//! through the core importer, and writes presets back out in any of the
//! three formats.

pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, Format, load_library, load_presets, write_presets};
