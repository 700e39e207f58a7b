#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a team challenge.
///
/// `Requested -> TimesProposed -> Scheduled`. There is no cancellation or
/// reopening path; `Scheduled` is terminal.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeStatus {
    /// Created by the challenger, waiting for the defender to propose times.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "requested"))]
    Requested,
    /// The defender has proposed candidate start times.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "times_proposed"))]
    TimesProposed,
    /// A time was picked and a match was created.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "scheduled"))]
    Scheduled,
}

impl ChallengeStatus {
    pub const ALL: &'static [ChallengeStatus] =
        &[Self::Requested, Self::TimesProposed, Self::Scheduled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::TimesProposed => "times_proposed",
            Self::Scheduled => "scheduled",
        }
    }

    /// Returns true once a match has been created for the challenge.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Scheduled)
    }

    /// Whether the defender may (re)submit time options in this state.
    pub fn accepts_proposals(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for ChallengeStatus {
    fn default() -> Self {
        Self::Requested
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChallengeStatusError {
    invalid: String,
}

impl fmt::Display for ParseChallengeStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid challenge status '{}'. Valid values: {}",
            self.invalid,
            ChallengeStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseChallengeStatusError {}

impl FromStr for ChallengeStatus {
    type Err = ParseChallengeStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(Self::Requested),
            "times_proposed" => Ok(Self::TimesProposed),
            "scheduled" => Ok(Self::Scheduled),
            _ => Err(ParseChallengeStatusError {
                invalid: s.to_string(),
            }),
        }
    }
}
