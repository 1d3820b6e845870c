//! climate-story: a three-scene narrative chart of global temperature
//! anomalies.
//!
//! The crate loads an annual anomaly table, derives scales and axes from it,
//! and drives any [`render::StoryView`] through a fixed catalog of scenes.
//! An SVG scene graph and a recording view ship with the crate.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{SceneCatalog, StoryConfig, StoryEngine, StorySnapshot};
pub use error::{StoryError, StoryResult};
