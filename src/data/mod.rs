mod loader;

pub use loader::{DatasetFormat, DatasetSource, load_dataset, parse_dataset};
