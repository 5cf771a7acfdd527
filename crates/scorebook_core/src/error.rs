use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{PhaseKind, PlayerId, TeamId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("phase sequence ended")]
    PhaseSequenceEnded,

    #[error("invalid player code: {0:?}")]
    InvalidPlayerCode(String),

    #[error("invalid team code: {0:?}")]
    InvalidTeamCode(String),

    #[error("no event with id {0}")]
    EventNotFound(usize),

    #[error("timestamp refers to unknown phase {0}")]
    UnknownPhase(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("rule violation: {0}")]
    RuleViolation(Violation),
}

impl MatchError {
    /// Errors that no policy can override.
    pub fn is_structural(&self) -> bool {
        !self.is_rule_violation()
    }

    pub fn is_rule_violation(&self) -> bool {
        matches!(self, MatchError::RuleViolation(_))
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            MatchError::RuleViolation(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Violation> for MatchError {
    fn from(violation: Violation) -> Self {
        MatchError::RuleViolation(violation)
    }
}

impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        MatchError::InvalidConfig(err.to_string())
    }
}

/// Soft rule breaches. Each one is put to the policy hook before the
/// action is recorded or discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    #[error("team {team} called a timeout during {phase}")]
    UnexpectedTimeout { team: TeamId, phase: PhaseKind },

    #[error("team {team} already used its timeouts for {phase}")]
    ExtraTimeoutInPhase { team: TeamId, phase: PhaseKind },

    #[error("team {team} already used its timeouts for the match")]
    ExtraTimeoutInMatch { team: TeamId },

    #[error("goal by dismissed player {player}")]
    GoalByDismissedPlayer { player: PlayerId },

    #[error("warning for dismissed player {player}")]
    WarningForDismissedPlayer { player: PlayerId },

    #[error("player {player} already warned")]
    WarningForWarnedPlayer { player: PlayerId },

    #[error("suspension for dismissed player {player}")]
    SuspensionForDismissedPlayer { player: PlayerId },

    #[error("player {player} already dismissed")]
    DismissalForDismissedPlayer { player: PlayerId },

    #[error("event during {phase}, match is not live")]
    EventDuringNonLivePhase { phase: PhaseKind },
}

pub type Result<T> = std::result::Result<T, MatchError>;
