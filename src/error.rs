use thiserror::Error;

pub type StoryResult<T> = Result<T, StoryError>;

#[derive(Debug, Error)]
pub enum StoryError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Dataset could not be read or parsed. Fatal to the story session.
    #[error("failed to load dataset `{resource}`: {reason}")]
    Load { resource: String, reason: String },

    #[error("scene {index} is outside 1..={total}")]
    SceneOutOfRange { index: usize, total: usize },
}

impl StoryError {
    pub(crate) fn load(resource: impl Into<String>, reason: impl ToString) -> Self {
        Self::Load {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}
