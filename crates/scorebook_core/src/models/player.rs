use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::TeamId;
use crate::engine::{MatchRules, PolicyHook};
use crate::error::{MatchError, Result};

/// Team letter plus shirt number, written `A7` or `A 7` on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId {
    pub team: TeamId,
    pub number: u32,
}

impl PlayerId {
    pub fn new(team: TeamId, number: u32) -> Self {
        Self { team, number }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.team, self.number)
    }
}

impl FromStr for PlayerId {
    type Err = MatchError;

    fn from_str(code: &str) -> Result<Self> {
        let invalid = || MatchError::InvalidPlayerCode(code.to_string());

        let mut chars = code.chars();
        let team = chars.next().and_then(TeamId::from_code).ok_or_else(invalid)?;
        let digits = chars.as_str().trim_start();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number = digits.parse().map_err(|_| invalid())?;
        Ok(Self { team, number })
    }
}

/// Disciplinary record of a single player for the current match generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub goals: u32,
    pub warned: bool,
    pub suspensions: u32,
    pub dismissed: bool,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self { id, goals: 0, warned: false, suspensions: 0, dismissed: false }
    }

    pub fn team(&self) -> TeamId {
        self.id.team
    }

    pub fn number(&self) -> u32 {
        self.id.number
    }

    pub fn goal(&mut self, hook: &mut dyn PolicyHook) -> Result<bool> {
        if self.dismissed && !hook.accept_goal_by_dismissed_player(self)? {
            debug!(player = %self.id, "goal by dismissed player rejected");
            return Ok(false);
        }
        self.goals += 1;
        Ok(true)
    }

    pub fn warning(&mut self, hook: &mut dyn PolicyHook) -> Result<bool> {
        if self.dismissed && !hook.accept_warning_for_dismissed_player(self)? {
            debug!(player = %self.id, "warning for dismissed player rejected");
            return Ok(false);
        }
        if self.warned && !hook.accept_warning_for_warned_player(self)? {
            debug!(player = %self.id, "second warning rejected");
            return Ok(false);
        }
        self.warned = true;
        Ok(true)
    }

    /// Count a suspension; reaching the dismissal threshold dismisses the
    /// player as a side effect. The suspension itself stays accepted even if
    /// the hook declines the automatic dismissal, but an error from the hook
    /// leaves the record as it was.
    pub fn suspension(&mut self, rules: &MatchRules, hook: &mut dyn PolicyHook) -> Result<bool> {
        if self.dismissed && !hook.accept_suspension_for_dismissed_player(self)? {
            debug!(player = %self.id, "suspension for dismissed player rejected");
            return Ok(false);
        }
        self.suspensions += 1;
        if self.suspensions == rules.suspensions_before_dismissal {
            debug!(player = %self.id, suspensions = self.suspensions, "dismissal threshold reached");
            if let Err(err) = self.dismiss(hook) {
                self.suspensions -= 1;
                return Err(err);
            }
        }
        Ok(true)
    }

    pub fn dismiss(&mut self, hook: &mut dyn PolicyHook) -> Result<bool> {
        if self.dismissed && !hook.accept_dismissal_for_dismissed_player(self)? {
            debug!(player = %self.id, "dismissal of dismissed player rejected");
            return Ok(false);
        }
        self.dismissed = true;
        Ok(true)
    }
}
