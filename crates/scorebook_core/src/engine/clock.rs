//! Time sources.
//!
//! The engine only ever peeks at the match clock; starting, stopping and
//! ticking it belong to whoever drives the match.

use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

/// Match-relative time as shown on the official's stopwatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockReading {
    pub minute: u32,
    pub second: u32,
    pub tenth: u32,
}

impl ClockReading {
    pub fn new(minute: u32, second: u32) -> Self {
        Self { minute, second, tenth: 0 }
    }
}

pub trait TimeSource {
    fn peek(&self) -> ClockReading;
}

impl<T: TimeSource + ?Sized> TimeSource for Rc<T> {
    fn peek(&self) -> ClockReading {
        (**self).peek()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn peek(&self) -> ClockReading {
        (**self).peek()
    }
}

/// A stopwatch whose reading is set by hand.
///
/// Share it through an `Arc` to keep setting it after handing it to a
/// match. Readings are replaced as a whole, so a concurrent `peek` never
/// mixes two of them.
#[derive(Debug, Default)]
pub struct ManualClock {
    reading: Mutex<ClockReading>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(minute: u32, second: u32) -> Self {
        Self { reading: Mutex::new(ClockReading::new(minute, second)) }
    }

    pub fn set(&self, minute: u32, second: u32) {
        *self.lock() = ClockReading::new(minute, second);
    }

    pub fn set_tenth(&self, tenth: u32) {
        self.lock().tenth = tenth;
    }

    fn lock(&self) -> MutexGuard<'_, ClockReading> {
        self.reading.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TimeSource for ManualClock {
    fn peek(&self) -> ClockReading {
        *self.lock()
    }
}
