//! Replaying adapter for the Clock port.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, FixedOffset};

use crate::cassette::{CassetteReplayer, Channel};
use crate::error::CassetteError;
use crate::ports::clock::Clock;

/// Serves recorded clock readings in order.
///
/// The final reading is repeated once the others are used, so a session
/// reads a frozen clock instead of running dry.
pub struct ReplayingClock {
    readings: Mutex<VecDeque<DateTime<FixedOffset>>>,
}

impl ReplayingClock {
    /// Drains and decodes every clock reading from `replayer`.
    ///
    /// # Errors
    ///
    /// Returns an error if no reading was recorded or one is not RFC 3339.
    pub fn new(replayer: &mut CassetteReplayer) -> Result<Self, CassetteError> {
        let mut readings = VecDeque::with_capacity(replayer.remaining(Channel::ClockNow));
        while let Some(entry) = replayer.next(Channel::ClockNow) {
            let reading = serde_json::from_value(entry.output).map_err(|source| {
                CassetteError::Output { channel: Channel::ClockNow.name(), seq: entry.seq, source }
            })?;
            readings.push_back(reading);
        }
        if readings.is_empty() {
            return Err(CassetteError::Missing(Channel::ClockNow.name()));
        }
        Ok(Self { readings: Mutex::new(readings) })
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let mut readings = self.readings.lock().unwrap_or_else(PoisonError::into_inner);
        if readings.len() > 1 {
            if let Some(reading) = readings.pop_front() {
                return reading;
            }
        }
        // Construction guarantees one reading is always left.
        readings.front().copied().unwrap_or_default()
    }
}
