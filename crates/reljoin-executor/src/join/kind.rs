use std::{fmt, str::FromStr};

use crate::errors::ExecutorError;

/// The seven supported join variants.
///
/// Textual spellings are normalized once, through [`FromStr`]; everything
/// downstream dispatches on the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinKind {
    #[default]
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    LeftSemi,
    LeftAnti,
    Cross,
}

impl JoinKind {
    pub const ALL: [JoinKind; 7] = [
        JoinKind::Inner,
        JoinKind::LeftOuter,
        JoinKind::RightOuter,
        JoinKind::FullOuter,
        JoinKind::LeftSemi,
        JoinKind::LeftAnti,
        JoinKind::Cross,
    ];

    /// Canonical spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::Inner => "inner",
            JoinKind::LeftOuter => "left_outer",
            JoinKind::RightOuter => "right_outer",
            JoinKind::FullOuter => "full_outer",
            JoinKind::LeftSemi => "left_semi",
            JoinKind::LeftAnti => "left_anti",
            JoinKind::Cross => "cross",
        }
    }

    /// Whether right-side columns are part of the output schema
    pub fn exposes_right_columns(&self) -> bool {
        !matches!(self, JoinKind::LeftSemi | JoinKind::LeftAnti)
    }

    /// Whether unmatched right rows are emitted with an all-NULL left side
    pub fn null_extends_left(&self) -> bool {
        matches!(self, JoinKind::RightOuter | JoinKind::FullOuter)
    }

    /// Whether unmatched left rows are emitted with an all-NULL right side
    pub fn null_extends_right(&self) -> bool {
        matches!(self, JoinKind::LeftOuter | JoinKind::FullOuter)
    }

    /// Every kind except Cross takes a condition; Cross must not.
    pub fn requires_condition(&self) -> bool {
        !matches!(self, JoinKind::Cross)
    }

    /// Semi and anti joins only need to know whether a match exists.
    pub fn needs_existence_only(&self) -> bool {
        matches!(self, JoinKind::LeftSemi | JoinKind::LeftAnti)
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoinKind {
    type Err = ExecutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inner" => Ok(JoinKind::Inner),
            "left" | "leftouter" | "left_outer" => Ok(JoinKind::LeftOuter),
            "right" | "rightouter" | "right_outer" => Ok(JoinKind::RightOuter),
            "outer" | "full" | "fullouter" | "full_outer" => Ok(JoinKind::FullOuter),
            "semi" | "leftsemi" | "left_semi" => Ok(JoinKind::LeftSemi),
            "anti" | "leftanti" | "left_anti" => Ok(JoinKind::LeftAnti),
            "cross" => Ok(JoinKind::Cross),
            other => Err(ExecutorError::InvalidJoinConfiguration(format!(
                "unknown join kind '{}'",
                other
            ))),
        }
    }
}
