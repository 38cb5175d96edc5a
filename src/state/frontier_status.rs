//! Lifecycle of a recursive frontier expansion

use std::fmt;

/// Represents where the frontier is in its expansion
///
/// `Idle → Expanding → (Expanding | Done | StepLimitReached)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontierStatus {
    /// State was just loaded or created, nothing fetched yet
    Idle,

    /// An expansion step is in progress
    Expanding,

    /// The target number of articles has been discovered
    Done,

    /// The configured step bound was hit before reaching the target
    StepLimitReached,
}

impl FrontierStatus {
    /// Returns true if no further expansion steps will run
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::StepLimitReached)
    }

    /// Returns true if the target was reached
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Expanding => "expanding",
            Self::Done => "done",
            Self::StepLimitReached => "step_limit_reached",
        }
    }
}

impl fmt::Display for FrontierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
