use std::fmt;

use serde::{Deserialize, Serialize};

/// A point on the match timeline.
///
/// The phase is referenced by its ordinal in the owning sequence. The
/// derived ordering compares fields in declaration order, which is exactly
/// phase ordinal, then minute, then second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    pub phase: usize,
    pub minute: u32,
    pub second: u32,
}

impl Timestamp {
    pub fn new(phase: usize, minute: u32, second: u32) -> Self {
        Self { phase, minute, second }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minute, self.second)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub team_a: u32,
    pub team_b: u32,
}

impl Score {
    pub fn new(team_a: u32, team_b: u32) -> Self {
        Self { team_a, team_b }
    }

    pub fn is_tied(&self) -> bool {
        self.team_a == self.team_b
    }
}

impl From<(u32, u32)> for Score {
    fn from((team_a, team_b): (u32, u32)) -> Self {
        Self { team_a, team_b }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.team_a, self.team_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_order_is_phase_then_minute_then_second() {
        let early = Timestamp::new(1, 24, 59);
        let later_phase = Timestamp::new(3, 0, 0);
        assert!(early < later_phase);
        assert!(Timestamp::new(1, 2, 59) < Timestamp::new(1, 7, 12));
        assert!(Timestamp::new(1, 7, 12) < Timestamp::new(1, 7, 13));
        assert_eq!(Timestamp::new(1, 7, 12), Timestamp::new(1, 7, 12));
    }

    #[test]
    fn test_timestamp_display() {
        assert_eq!(Timestamp::new(1, 7, 3).to_string(), "07:03");
        assert_eq!(Timestamp::new(3, 25, 0).to_string(), "25:00");
    }

    #[test]
    fn test_score_helpers() {
        let score = Score::from((3, 1));
        assert!(!score.is_tied());
        assert_eq!(score.to_string(), "3-1");
        assert!(Score::default().is_tied());
    }
}
