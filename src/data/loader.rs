use std::path::Path;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::primitives::{parse_anomaly_field, parse_year_field};
use crate::core::{Dataset, Observation};
use crate::error::{StoryError, StoryResult};

/// Column contract of the anomaly table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetFormat {
    #[serde(default = "default_year_column")]
    pub year_column: String,
    #[serde(default = "default_anomaly_column")]
    pub anomaly_column: String,
    /// Metadata lines above the header row.
    #[serde(default = "default_preamble_lines")]
    pub preamble_lines: usize,
}

impl Default for DatasetFormat {
    fn default() -> Self {
        Self {
            year_column: default_year_column(),
            anomaly_column: default_anomaly_column(),
            preamble_lines: default_preamble_lines(),
        }
    }
}

fn default_year_column() -> String {
    "Year".to_owned()
}

fn default_anomaly_column() -> String {
    "J-D".to_owned()
}

fn default_preamble_lines() -> usize {
    1
}

/// Where the raw dataset text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Path(std::path::PathBuf),
    /// `http(s)://` resource; needs the `remote-fetch` feature.
    Url(String),
    /// Already-fetched text, labelled for error messages.
    Inline { label: String, text: String },
}

impl DatasetSource {
    /// Classifies a resource string as URL or filesystem path.
    #[must_use]
    pub fn parse(resource: &str) -> Self {
        if resource.starts_with("http://") || resource.starts_with("https://") {
            Self::Url(resource.to_owned())
        } else {
            Self::Path(Path::new(resource).to_path_buf())
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
            Self::Inline { label, .. } => label.clone(),
        }
    }

    fn read_text(&self) -> StoryResult<String> {
        match self {
            Self::Path(path) => std::fs::read_to_string(path)
                .map_err(|err| StoryError::load(self.label(), err)),
            Self::Url(url) => fetch_url(url),
            Self::Inline { text, .. } => Ok(text.clone()),
        }
    }
}

#[cfg(feature = "remote-fetch")]
fn fetch_url(url: &str) -> StoryResult<String> {
    let response = reqwest::blocking::get(url).map_err(|err| StoryError::load(url, err))?;
    let response = response
        .error_for_status()
        .map_err(|err| StoryError::load(url, err))?;
    response.text().map_err(|err| StoryError::load(url, err))
}

#[cfg(not(feature = "remote-fetch"))]
fn fetch_url(url: &str) -> StoryResult<String> {
    Err(StoryError::load(
        url,
        "remote resources require the `remote-fetch` feature",
    ))
}

/// Reads and parses the dataset. Blocks until the resource is available.
pub fn load_dataset(source: &DatasetSource, format: &DatasetFormat) -> StoryResult<Dataset> {
    let label = source.label();
    let text = source.read_text()?;
    let dataset = parse_dataset(&text, format).map_err(|err| match err {
        StoryError::Load { reason, .. } => StoryError::Load {
            resource: label.clone(),
            reason,
        },
        other => other,
    })?;
    info!(resource = %label, observations = dataset.len(), "dataset loaded");
    Ok(dataset)
}

/// Parses anomaly table text.
///
/// Preamble lines are dropped, the next line is the header. Rows whose year
/// or anomaly does not parse are skipped; a missing column therefore yields
/// an empty dataset rather than an error.
pub fn parse_dataset(text: &str, format: &DatasetFormat) -> StoryResult<Dataset> {
    let table = strip_preamble(text, format.preamble_lines);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(table.as_bytes());

    let headers = reader
        .headers()
        .map_err(|err| StoryError::load("<inline>", format!("failed to read header row: {err}")))?
        .clone();
    let year_index = headers
        .iter()
        .position(|name| name == format.year_column);
    let anomaly_index = headers
        .iter()
        .position(|name| name == format.anomaly_column);

    let mut observations = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record
            .map_err(|err| StoryError::load("<inline>", format!("failed to read row: {err}")))?;

        let year = year_index
            .and_then(|index| record.get(index))
            .and_then(parse_year_field);
        let anomaly = anomaly_index
            .and_then(|index| record.get(index))
            .and_then(parse_anomaly_field);

        match (year, anomaly) {
            (Some(year), Some(anomaly)) => observations.push(Observation { year, anomaly }),
            _ => skipped += 1,
        }
    }

    debug!(
        kept = observations.len(),
        skipped,
        year_column_found = year_index.is_some(),
        anomaly_column_found = anomaly_index.is_some(),
        "parsed anomaly table"
    );
    Ok(Dataset::new(observations))
}

fn strip_preamble(text: &str, preamble_lines: usize) -> &str {
    let mut rest = text;
    for _ in 0..preamble_lines {
        match rest.find('\n') {
            Some(index) => rest = &rest[index + 1..],
            None => return "",
        }
    }
    rest
}
