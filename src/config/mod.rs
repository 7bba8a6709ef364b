// src/config/mod.rs

//! Configuration loading and validation.
//!
//! Settings come from an optional `Tickrun.toml` file, with the
//! `TICKRUN_WORKDIR` environment variable overriding the working
//! directory. The resolved [`Settings`] value is passed explicitly into
//! the components that need it; nothing reads configuration ad hoc.

pub mod loader;
pub mod model;

pub use loader::{load_from_path, load_or_default};
pub use model::{AgentSettings, RawSettings, Settings};
