//! Suspension time arithmetic.
//!
//! A suspension runs for a fixed amount of game time. When it does not fit
//! in what is left of the phase it started in, the remainder is carried
//! over to the next scheduled live phase; with no live phase left it simply
//! never expires.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{PhaseSequence, PlayerId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suspension {
    pub player: PlayerId,
    pub start: Timestamp,
    /// `None` when the match ends before the suspension would.
    pub expiration: Option<Timestamp>,
}

impl Suspension {
    /// True once `at` is strictly past the expiration.
    pub fn is_expired(&self, at: &Timestamp) -> bool {
        self.expiration.is_some_and(|expiration| *at > expiration)
    }

    /// True from the start up to and including the expiration.
    pub fn is_active(&self, at: &Timestamp) -> bool {
        *at >= self.start && !self.is_expired(at)
    }
}

#[derive(Debug, Clone)]
pub struct SuspensionTracker {
    minutes: u32,
    suspensions: Vec<Suspension>,
}

impl SuspensionTracker {
    pub fn new(minutes: u32) -> Self {
        Self { minutes, suspensions: Vec::new() }
    }

    /// Record a suspension starting at `start` and compute when it ends.
    pub fn on_player_suspension(
        &mut self,
        start: Timestamp,
        player: PlayerId,
        phases: &PhaseSequence,
    ) -> Suspension {
        let suspension = Suspension { player, start, expiration: self.expiration(start, phases) };
        debug!(
            %player,
            start = %start,
            expiration = ?suspension.expiration,
            "suspension recorded"
        );
        let at = self.suspensions.partition_point(|s| s.start <= start);
        self.suspensions.insert(at, suspension);
        suspension
    }

    pub fn expiration(&self, start: Timestamp, phases: &PhaseSequence) -> Option<Timestamp> {
        let phase = phases.phase(start.phase)?;
        let minute = start.minute.saturating_add(self.minutes);
        let fits = minute < phase.duration || (minute == phase.duration && start.second == 0);
        if fits {
            return Some(Timestamp::new(phase.ordinal, minute, start.second));
        }
        let next = phases.next_scheduled_live_phase(phase)?;
        let overflow = minute.saturating_sub(phase.duration);
        Some(Timestamp::new(next.ordinal, overflow, start.second))
    }

    pub fn get(&self, index: usize) -> Option<&Suspension> {
        self.suspensions.get(index)
    }

    pub fn len(&self) -> usize {
        self.suspensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suspensions.is_empty()
    }

    /// All suspensions ordered by start.
    pub fn iter(&self) -> std::slice::Iter<'_, Suspension> {
        self.suspensions.iter()
    }

    pub fn active_at(&self, at: Timestamp) -> impl Iterator<Item = &Suspension> {
        self.suspensions.iter().filter(move |s| s.is_active(&at))
    }

    pub fn expired_at(&self, at: Timestamp) -> impl Iterator<Item = &Suspension> {
        self.suspensions.iter().filter(move |s| s.is_expired(&at))
    }

    pub fn for_player(&self, player: PlayerId) -> impl Iterator<Item = &Suspension> {
        self.suspensions.iter().filter(move |s| s.player == player)
    }
}

impl std::ops::Index<usize> for SuspensionTracker {
    type Output = Suspension;

    fn index(&self, index: usize) -> &Suspension {
        &self.suspensions[index]
    }
}

impl<'a> IntoIterator for &'a SuspensionTracker {
    type Item = &'a Suspension;
    type IntoIter = std::slice::Iter<'a, Suspension>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
