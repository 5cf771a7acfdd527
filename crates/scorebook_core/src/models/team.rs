use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Phase;
use crate::engine::{MatchRules, PolicyHook};
use crate::error::{MatchError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TeamId {
    A,
    B,
}

impl TeamId {
    pub const ALL: [TeamId; 2] = [TeamId::A, TeamId::B];

    pub fn code(self) -> char {
        match self {
            TeamId::A => 'A',
            TeamId::B => 'B',
        }
    }

    pub(crate) fn from_code(code: char) -> Option<TeamId> {
        match code {
            'A' => Some(TeamId::A),
            'B' => Some(TeamId::B),
            _ => None,
        }
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for TeamId {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        match (chars.next().and_then(TeamId::from_code), chars.next()) {
            (Some(team), None) => Ok(team),
            _ => Err(MatchError::InvalidTeamCode(s.to_string())),
        }
    }
}

/// Timeout bookkeeping for one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    /// Accepted timeouts keyed by phase ordinal.
    timeouts: BTreeMap<usize, u32>,
}

impl Team {
    pub fn new(id: TeamId) -> Self {
        Self { id, timeouts: BTreeMap::new() }
    }

    pub fn timeouts_in_phase(&self, ordinal: usize) -> u32 {
        self.timeouts.get(&ordinal).copied().unwrap_or(0)
    }

    pub fn total_timeouts(&self) -> u32 {
        self.timeouts.values().sum()
    }

    /// Try to charge a timeout to `phase`.
    ///
    /// The checks run in a fixed order (suspendable phase, phase quota,
    /// match quota) and each breach is put to the hook. `Ok(false)` means
    /// the hook declined and nothing was charged.
    pub fn timeout(
        &mut self,
        phase: &Phase,
        rules: &MatchRules,
        hook: &mut dyn PolicyHook,
    ) -> Result<bool> {
        if !phase.can_be_suspended() && !hook.accept_unexpected_timeout(self.id, phase)? {
            debug!(team = %self.id, phase = %phase.kind, "timeout outside regular time rejected");
            return Ok(false);
        }
        if self.timeouts_in_phase(phase.ordinal) >= rules.max_timeouts_per_phase
            && !hook.accept_additional_timeout_in_phase(self.id, phase)?
        {
            debug!(team = %self.id, phase = %phase.kind, "phase timeout quota exhausted");
            return Ok(false);
        }
        if self.total_timeouts() >= rules.max_timeouts_per_match
            && !hook.accept_additional_timeout_in_match(self.id)?
        {
            debug!(team = %self.id, "match timeout quota exhausted");
            return Ok(false);
        }
        *self.timeouts.entry(phase.ordinal).or_insert(0) += 1;
        Ok(true)
    }
}
