pub mod dataset;
pub mod line_series;
pub mod primitives;
pub mod scale;
pub mod time_scale;
pub mod types;
pub mod value_scale;
pub mod windowing;

pub use dataset::Dataset;
pub use line_series::{LinePath, PathPoint, project_line_path, project_point};
pub use scale::LinearScale;
pub use time_scale::TimeScale;
pub use types::{ChartLayout, Margins, Observation, Viewport};
pub use value_scale::ValueScale;
pub use windowing::{observations_from_year, observations_in_year_window};
