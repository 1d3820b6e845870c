use serde::{Deserialize, Serialize};

use crate::error::{StoryError, StoryResult};

/// Current scene index, clamped to `1..=total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationController {
    current: usize,
    total: usize,
}

impl NavigationController {
    /// Starts on scene 1.
    pub fn new(total: usize) -> StoryResult<Self> {
        if total == 0 {
            return Err(StoryError::InvalidData(
                "navigation needs at least one scene".to_owned(),
            ));
        }
        Ok(Self { current: 1, total })
    }

    #[must_use]
    pub fn current(self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(self) -> usize {
        self.total
    }

    #[must_use]
    pub fn can_retreat(self) -> bool {
        self.current > 1
    }

    #[must_use]
    pub fn can_advance(self) -> bool {
        self.current < self.total
    }

    /// Moves forward one scene. Returns `false` on the last scene.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Moves back one scene. Returns `false` on the first scene.
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jumps directly to `index`.
    pub fn jump_to(&mut self, index: usize) -> StoryResult<()> {
        if index == 0 || index > self.total {
            return Err(StoryError::SceneOutOfRange {
                index,
                total: self.total,
            });
        }
        self.current = index;
        Ok(())
    }
}
