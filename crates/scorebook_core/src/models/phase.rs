//! Match phases and the ordered timeline they form.
//!
//! A sequence is built from the live periods only; the before-match
//! sentinel, the intervals between live periods and the after-match
//! sentinel are interleaved automatically. Ordinals are assigned over the
//! whole interleaved timeline and never change afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::Score;
use crate::error::{MatchError, Result};

// =============================================================================
// Phase
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    BeforeMatch,
    FirstPeriod,
    Interval,
    SecondPeriod,
    FirstExtraPeriod,
    SecondExtraPeriod,
    Penalties,
    AfterMatch,
}

impl PhaseKind {
    /// Regular time, as opposed to extra time and penalties.
    pub fn is_regulation(self) -> bool {
        matches!(self, PhaseKind::FirstPeriod | PhaseKind::SecondPeriod)
    }

    pub fn is_extra_time(self) -> bool {
        matches!(self, PhaseKind::FirstExtraPeriod | PhaseKind::SecondExtraPeriod)
    }

    pub fn label(self) -> &'static str {
        match self {
            PhaseKind::BeforeMatch => "before match",
            PhaseKind::FirstPeriod => "first period",
            PhaseKind::Interval => "interval",
            PhaseKind::SecondPeriod => "second period",
            PhaseKind::FirstExtraPeriod => "first extra period",
            PhaseKind::SecondExtraPeriod => "second extra period",
            PhaseKind::Penalties => "penalties",
            PhaseKind::AfterMatch => "after match",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub kind: PhaseKind,
    pub is_live: bool,
    /// Minutes; 0 for untimed phases.
    pub duration: u32,
    pub ordinal: usize,
}

impl Phase {
    fn live(kind: PhaseKind, duration: u32) -> Self {
        Self { kind, is_live: true, duration, ordinal: 0 }
    }

    fn pause(kind: PhaseKind) -> Self {
        Self { kind, is_live: false, duration: 0, ordinal: 0 }
    }

    /// Whether a team may call a timeout during this phase.
    pub fn can_be_suspended(&self) -> bool {
        self.is_live && self.kind.is_regulation()
    }
}

// =============================================================================
// Transition policy
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// One step at a time, whatever the score.
    Linear,
    /// Knockout play: once regular or extra time is over and the scores
    /// differ, the match is decided and jumps to the after-match sentinel.
    TieBreak,
}

// =============================================================================
// PhaseSequence
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSequence {
    phases: Vec<Phase>,
    current: usize,
    policy: TransitionPolicy,
}

impl PhaseSequence {
    /// Build a sequence from its live periods, given as `(kind, minutes)`.
    pub fn new(live_periods: &[(PhaseKind, u32)], policy: TransitionPolicy) -> Self {
        let mut phases = Vec::with_capacity(live_periods.len() * 2 + 1);
        phases.push(Phase::pause(PhaseKind::BeforeMatch));
        for (i, &(kind, duration)) in live_periods.iter().enumerate() {
            if i > 0 {
                phases.push(Phase::pause(PhaseKind::Interval));
            }
            phases.push(Phase::live(kind, duration));
        }
        phases.push(Phase::pause(PhaseKind::AfterMatch));

        for (ordinal, phase) in phases.iter_mut().enumerate() {
            phase.ordinal = ordinal;
        }

        Self { phases, current: 0, policy }
    }

    /// Two regular periods, no extra time.
    pub fn championship(period_minutes: u32) -> Self {
        Self::new(
            &[(PhaseKind::FirstPeriod, period_minutes), (PhaseKind::SecondPeriod, period_minutes)],
            TransitionPolicy::Linear,
        )
    }

    /// Two regular periods, two extra periods and penalties, cut short as
    /// soon as a winner is known.
    pub fn knockout(period_minutes: u32, extra_period_minutes: u32) -> Self {
        Self::new(
            &[
                (PhaseKind::FirstPeriod, period_minutes),
                (PhaseKind::SecondPeriod, period_minutes),
                (PhaseKind::FirstExtraPeriod, extra_period_minutes),
                (PhaseKind::SecondExtraPeriod, extra_period_minutes),
                (PhaseKind::Penalties, 0),
            ],
            TransitionPolicy::TieBreak,
        )
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub fn current_phase(&self) -> &Phase {
        &self.phases[self.current]
    }

    pub fn is_live(&self) -> bool {
        self.current_phase().is_live
    }

    pub fn is_ended(&self) -> bool {
        self.current == self.terminal()
    }

    /// Move the cursor forward according to the transition policy.
    pub fn enter_next_phase(&mut self, score: Score) -> Result<&Phase> {
        if self.is_ended() {
            return Err(MatchError::PhaseSequenceEnded);
        }
        let from = self.current_phase().kind;
        self.current = self.next_index(score);
        info!(from = %from, to = %self.current_phase().kind, %score, "entering next phase");
        Ok(self.current_phase())
    }

    /// The phase `enter_next_phase` would move to, or `None` at the end.
    pub fn preview_next_phase(&self, score: Score) -> Option<&Phase> {
        if self.is_ended() {
            return None;
        }
        self.phases.get(self.next_index(score))
    }

    /// First live phase scheduled after `phase`, regardless of the score.
    pub fn next_scheduled_live_phase(&self, phase: &Phase) -> Option<&Phase> {
        self.phases
            .iter()
            .skip(phase.ordinal + 1)
            .find(|p| p.is_live)
    }

    pub fn phase(&self, ordinal: usize) -> Option<&Phase> {
        self.phases.get(ordinal)
    }

    /// Duration of the first phase of the given kind, if scheduled.
    pub fn duration_of(&self, kind: PhaseKind) -> Option<u32> {
        self.phases.iter().find(|p| p.kind == kind).map(|p| p.duration)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Phase> {
        self.phases.iter()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    fn terminal(&self) -> usize {
        self.phases.len() - 1
    }

    fn next_index(&self, score: Score) -> usize {
        match self.policy {
            TransitionPolicy::Linear => self.current + 1,
            TransitionPolicy::TieBreak => {
                let closes_a_block = matches!(
                    self.current_phase().kind,
                    PhaseKind::SecondPeriod | PhaseKind::SecondExtraPeriod
                );
                if closes_a_block && !score.is_tied() {
                    self.terminal()
                } else {
                    self.current + 1
                }
            }
        }
    }
}

impl<'a> IntoIterator for &'a PhaseSequence {
    type Item = &'a Phase;
    type IntoIter = std::slice::Iter<'a, Phase>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
