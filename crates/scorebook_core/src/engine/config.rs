//! # Match Configuration
//!
//! Match format and rule constants in one serde-friendly place.
//!
//! ```rust
//! use scorebook_core::engine::MatchConfig;
//!
//! let league = MatchConfig::championship();
//! let cup = MatchConfig::knockout();
//! assert_eq!(cup.rules.max_timeouts_per_match, 3);
//! # let _ = league;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};
use crate::models::PhaseSequence;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum MatchFormat {
    /// Two periods; the result stands whatever it is.
    Championship { period_minutes: u32 },
    /// Two periods, then extra time and penalties until there is a winner.
    Knockout { period_minutes: u32, extra_period_minutes: u32 },
}

impl Default for MatchFormat {
    fn default() -> Self {
        MatchFormat::Championship { period_minutes: 25 }
    }
}

/// Quotas and durations enforced by the roster and the suspension tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    /// Timeouts a team may call in one regular period (default: 2)
    pub max_timeouts_per_phase: u32,
    /// Timeouts a team may call over the whole match (default: 3)
    pub max_timeouts_per_match: u32,
    /// Game-time length of a suspension in minutes (default: 2)
    pub suspension_minutes: u32,
    /// Suspensions after which a player is dismissed (default: 3)
    pub suspensions_before_dismissal: u32,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            max_timeouts_per_phase: 2,
            max_timeouts_per_match: 3,
            suspension_minutes: 2,
            suspensions_before_dismissal: 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(flatten)]
    pub format: MatchFormat,
    #[serde(default)]
    pub rules: MatchRules,
}

impl MatchConfig {
    /// League play, 25-minute periods.
    pub fn championship() -> Self {
        Self::default()
    }

    /// Cup play, 25-minute periods and 5-minute extra periods.
    pub fn knockout() -> Self {
        Self {
            format: MatchFormat::Knockout { period_minutes: 25, extra_period_minutes: 5 },
            rules: MatchRules::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let timed = match self.format {
            MatchFormat::Championship { period_minutes } => vec![period_minutes],
            MatchFormat::Knockout { period_minutes, extra_period_minutes } => {
                vec![period_minutes, extra_period_minutes]
            }
        };
        if timed.contains(&0) {
            return Err(MatchError::InvalidConfig("periods must last at least one minute".into()));
        }
        if self.rules.suspension_minutes == 0 {
            return Err(MatchError::InvalidConfig("suspensions must last at least one minute".into()));
        }
        if self.rules.suspensions_before_dismissal == 0 {
            return Err(MatchError::InvalidConfig(
                "dismissal threshold must be at least one suspension".into(),
            ));
        }
        Ok(())
    }

    /// Template timeline for a match played in this format.
    pub fn phase_sequence(&self) -> PhaseSequence {
        match self.format {
            MatchFormat::Championship { period_minutes } => PhaseSequence::championship(period_minutes),
            MatchFormat::Knockout { period_minutes, extra_period_minutes } => {
                PhaseSequence::knockout(period_minutes, extra_period_minutes)
            }
        }
    }
}
