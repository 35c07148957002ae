//! Playback timing shared by the preview cycle and GIF export.
//!
//! The user-facing speed control maps to a per-frame period of
//! `1100 - speed` milliseconds, so a higher speed means shorter frames.

use std::time::Duration;

use crate::error::CoreError;

/// Slowest allowed speed (1000 ms per frame).
pub const MIN_SPEED: u32 = 100;
/// Fastest allowed speed (100 ms per frame).
pub const MAX_SPEED: u32 = 1000;
/// Speed used when none is given (500 ms per frame).
pub const DEFAULT_SPEED: u32 = 600;

const PERIOD_BASE_MS: u32 = 1100;

/// Validate that a speed value lies in `[MIN_SPEED, MAX_SPEED]`.
pub fn validate_speed(speed: u32) -> Result<(), CoreError> {
    if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        return Err(CoreError::Validation(format!(
            "speed must be between {MIN_SPEED} and {MAX_SPEED}, got {speed}"
        )));
    }
    Ok(())
}

/// Per-frame display period in milliseconds for a speed value.
pub fn frame_period_ms(speed: u32) -> Result<u32, CoreError> {
    validate_speed(speed)?;
    Ok(PERIOD_BASE_MS - speed)
}

/// Per-frame display period for a speed value.
pub fn frame_period(speed: u32) -> Result<Duration, CoreError> {
    frame_period_ms(speed).map(|ms| Duration::from_millis(u64::from(ms)))
}

/// Cycles the displayed frame index over a sequence on a fixed period.
///
/// Call [`restart`](Self::restart) whenever the sequence or the speed
/// changes; the cycle then begins again at frame 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackCycle {
    len: usize,
    index: usize,
    period: Duration,
}

impl PlaybackCycle {
    pub fn new(len: usize, speed: u32) -> Result<Self, CoreError> {
        Ok(Self {
            len,
            index: 0,
            period: frame_period(speed)?,
        })
    }

    /// Reset to frame 0 with a new sequence length and speed.
    ///
    /// On an invalid speed the cycle is left untouched.
    pub fn restart(&mut self, len: usize, speed: u32) -> Result<(), CoreError> {
        self.period = frame_period(speed)?;
        self.len = len;
        self.index = 0;
        Ok(())
    }

    /// Index currently on display, or `None` for an empty sequence.
    pub fn current(&self) -> Option<usize> {
        (self.len > 0).then_some(self.index)
    }

    /// Move to the next frame, wrapping after the last one.
    pub fn advance(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.index = (self.index + 1) % self.len;
        Some(self.index)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_is_base_minus_speed() {
        assert_eq!(frame_period_ms(100).unwrap(), 1000);
        assert_eq!(frame_period_ms(DEFAULT_SPEED).unwrap(), 500);
        assert_eq!(frame_period(1000).unwrap(), Duration::from_millis(100));
    }

    #[test]
    fn out_of_range_speed_is_rejected() {
        assert!(frame_period_ms(99).is_err());
        assert!(frame_period_ms(1001).is_err());
        assert!(frame_period_ms(0).is_err());
    }

    #[test]
    fn cycle_wraps_to_first_frame() {
        let mut cycle = PlaybackCycle::new(3, DEFAULT_SPEED).unwrap();
        assert_eq!(cycle.current(), Some(0));
        assert_eq!(cycle.advance(), Some(1));
        assert_eq!(cycle.advance(), Some(2));
        assert_eq!(cycle.advance(), Some(0));
    }

    #[test]
    fn empty_cycle_never_advances() {
        let mut cycle = PlaybackCycle::new(0, DEFAULT_SPEED).unwrap();
        assert_eq!(cycle.current(), None);
        assert_eq!(cycle.advance(), None);
    }

    #[test]
    fn restart_resets_index_and_period() {
        let mut cycle = PlaybackCycle::new(4, DEFAULT_SPEED).unwrap();
        cycle.advance();
        cycle.advance();
        cycle.restart(2, 900).unwrap();
        assert_eq!(cycle.current(), Some(0));
        assert_eq!(cycle.len(), 2);
        assert_eq!(cycle.period(), Duration::from_millis(200));
    }

    #[test]
    fn restart_with_bad_speed_keeps_state() {
        let mut cycle = PlaybackCycle::new(4, DEFAULT_SPEED).unwrap();
        cycle.advance();
        assert!(cycle.restart(2, 5000).is_err());
        assert_eq!(cycle.current(), Some(1));
        assert_eq!(cycle.len(), 4);
    }
}
