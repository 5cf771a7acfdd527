use serde::{Deserialize, Serialize};

use super::{PlayerId, Score, TeamId, Timestamp};

/// A recorded action on the match sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Insertion identity. Renumbered 0..N-1 whenever the log is replayed.
    pub id: usize,
    pub timestamp: Timestamp,
    /// Score right after this event was applied.
    pub score: Score,
    #[serde(flatten)]
    pub kind: EventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    Goal { player: PlayerId },
    Timeout { team: TeamId },
    Warning { player: PlayerId },
    Suspension { player: PlayerId },
    Dismissal { player: PlayerId },
    PenaltyScored { player: PlayerId },
    PenaltyMissed { player: PlayerId },
    /// End-of-phase marker; `was_live` tells whether the phase that just
    /// closed was a live one.
    PhaseExpired { was_live: bool },
}

impl EventKind {
    /// Short code printed in the event column of the score sheet.
    pub fn code(&self) -> &'static str {
        match self {
            EventKind::Goal { .. } => "",
            EventKind::Timeout { .. } => "TO",
            EventKind::Warning { .. } => "AMM",
            EventKind::Suspension { .. } => "2M",
            EventKind::Dismissal { .. } => "SQ",
            EventKind::PenaltyScored { .. } => "(R)",
            EventKind::PenaltyMissed { .. } => "R",
            EventKind::PhaseExpired { .. } => "-",
        }
    }

    pub fn player(&self) -> Option<PlayerId> {
        match *self {
            EventKind::Goal { player }
            | EventKind::Warning { player }
            | EventKind::Suspension { player }
            | EventKind::Dismissal { player }
            | EventKind::PenaltyScored { player }
            | EventKind::PenaltyMissed { player } => Some(player),
            EventKind::Timeout { .. } | EventKind::PhaseExpired { .. } => None,
        }
    }

    pub fn team(&self) -> Option<TeamId> {
        match *self {
            EventKind::Timeout { team } => Some(team),
            _ => self.player().map(|p| p.team),
        }
    }

    pub fn is_score_change(&self) -> bool {
        matches!(self, EventKind::Goal { .. } | EventKind::PenaltyScored { .. })
    }
}

impl Event {
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn player(&self) -> Option<PlayerId> {
        self.kind.player()
    }

    pub fn team(&self) -> Option<TeamId> {
        self.kind.team()
    }
}
