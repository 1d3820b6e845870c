mod axes;
mod axis_label_format;
mod config;
mod dot_styling;
mod engine;
mod engine_init;
mod engine_snapshot;
mod json_contract;
mod navigation;
mod scene_catalog;
mod scene_renderer;

pub use axes::{AxisTick, StoryAxes, TIME_AXIS_TITLE, VALUE_AXIS_TITLE};
pub use config::{DEFAULT_LOAD_FAILURE_MESSAGE, StoryConfig};
pub use dot_styling::{classify_dots, line_observations};
pub use engine::StoryEngine;
pub use engine_snapshot::StorySnapshot;
pub use json_contract::{STORY_SNAPSHOT_JSON_SCHEMA_V1, StorySnapshotJsonContractV1};
pub use navigation::NavigationController;
pub use scene_catalog::{
    AnnotationAnchor, AnnotationTemplate, DotRule, LineWindow, MODERN_ERA_START_YEAR,
    RECORD_YEAR_COUNT, SceneCatalog, SceneDefinition, SceneDescriptor,
};
pub use scene_renderer::{SceneRenderOptions, render_scene};
