//! Repetition tracking state machine
//!
//! Consumes one angle sample per frame and detects repetitions with
//! hysteresis: a rep starts when the smoothed angle rises a threshold
//! above the resting baseline, and completes when it falls back below
//! half that threshold. Smoothing over a short window suppresses
//! detector jitter; a minimum hold time rejects twitches.

use super::buffer::AngleBuffer;

/// Minimum rise above baseline to start a repetition, in degrees
pub const DEFAULT_THRESHOLD_ANGLE: f32 = 30.0;

/// Minimum time between rep start and return to baseline, in seconds
pub const DEFAULT_MIN_HOLD_TIME: f64 = 0.5;

/// Samples averaged before state-machine decisions
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// Tracks exercise repetitions from a stream of angle samples
pub struct RepetitionTracker {
    threshold_angle: f32,
    min_hold_time: f64,
    history: AngleBuffer,
    in_rep: bool,
    rep_start_time: Option<f64>,
    peak_angle: f32,
    baseline_angle: f32,
    rep_count: u32,
}

impl RepetitionTracker {
    pub fn new() -> Self {
        Self::with_params(
            DEFAULT_THRESHOLD_ANGLE,
            DEFAULT_MIN_HOLD_TIME,
            DEFAULT_SMOOTHING_WINDOW,
        )
    }

    pub fn with_params(threshold_angle: f32, min_hold_time: f64, smoothing_window: usize) -> Self {
        Self {
            threshold_angle,
            min_hold_time,
            history: AngleBuffer::new(smoothing_window),
            in_rep: false,
            rep_start_time: None,
            peak_angle: 0.0,
            baseline_angle: 0.0,
            rep_count: 0,
        }
    }

    /// Feed one angle sample taken at wall-clock time `now` (seconds)
    ///
    /// Returns `(rep_started, rep_completed)`. A movement that returns
    /// to baseline before `min_hold_time` elapses is discarded silently:
    /// no event, no count change.
    pub fn update(&mut self, now: f64, angle: f32) -> (bool, bool) {
        self.history.push(angle);
        let smoothed = self.history.mean().unwrap_or(angle);

        let mut rep_started = false;
        let mut rep_completed = false;

        if !self.in_rep {
            if smoothed > self.baseline_angle + self.threshold_angle {
                self.in_rep = true;
                self.rep_start_time = Some(now);
                self.peak_angle = smoothed;
                rep_started = true;
            }
        } else {
            if smoothed > self.peak_angle {
                self.peak_angle = smoothed;
            }

            // Hysteresis: completion requires falling below half the
            // start threshold
            if smoothed < self.baseline_angle + self.threshold_angle * 0.5 {
                let held_long_enough = self
                    .rep_start_time
                    .map(|t0| now - t0 >= self.min_hold_time)
                    .unwrap_or(false);
                if held_long_enough {
                    self.rep_count += 1;
                    rep_completed = true;
                }

                self.in_rep = false;
                self.rep_start_time = None;
                self.baseline_angle = smoothed;
            }
        }

        (rep_started, rep_completed)
    }

    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    pub fn is_in_rep(&self) -> bool {
        self.in_rep
    }

    /// Highest smoothed angle seen during the current repetition
    pub fn peak_angle(&self) -> f32 {
        self.peak_angle
    }

    /// Clear all history and counters back to the initial state
    pub fn reset(&mut self) {
        self.history.clear();
        self.in_rep = false;
        self.rep_start_time = None;
        self.peak_angle = 0.0;
        self.baseline_angle = 0.0;
        self.rep_count = 0;
    }
}

impl Default for RepetitionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the tracker through rise -> hold -> fall, 10 frames apart
    fn run_rep(tracker: &mut RepetitionTracker, start: f64, frame_gap: f64) -> (bool, bool) {
        let mut started = false;
        let mut completed = false;
        let mut t = start;

        // Rise well above baseline + threshold and saturate the window
        for _ in 0..8 {
            let (s, c) = tracker.update(t, 80.0);
            started |= s;
            completed |= c;
            t += frame_gap;
        }
        // Fall back to baseline
        for _ in 0..12 {
            let (s, c) = tracker.update(t, 0.0);
            started |= s;
            completed |= c;
            t += frame_gap;
        }
        (started, completed)
    }

    #[test]
    fn test_full_rep_counts_once() {
        let mut tracker = RepetitionTracker::new();
        let (started, completed) = run_rep(&mut tracker, 0.0, 0.1);

        assert!(started);
        assert!(completed);
        assert_eq!(tracker.rep_count(), 1);
        assert!(!tracker.is_in_rep());
    }

    #[test]
    fn test_short_hold_is_discarded_silently() {
        // 1 ms between frames: the whole movement lasts under min_hold_time
        let mut tracker = RepetitionTracker::new();
        let (started, completed) = run_rep(&mut tracker, 0.0, 0.001);

        assert!(started);
        assert!(!completed);
        assert_eq!(tracker.rep_count(), 0);
        assert!(!tracker.is_in_rep());
    }

    #[test]
    fn test_rep_started_fires_on_threshold_crossing() {
        let mut tracker = RepetitionTracker::with_params(30.0, 0.5, 1);

        let (started, _) = tracker.update(0.0, 10.0);
        assert!(!started);
        let (started, _) = tracker.update(0.1, 45.0);
        assert!(started);
        assert!(tracker.is_in_rep());
    }

    #[test]
    fn test_peak_tracks_running_maximum() {
        let mut tracker = RepetitionTracker::with_params(30.0, 0.5, 1);
        tracker.update(0.0, 50.0);
        tracker.update(0.1, 90.0);
        tracker.update(0.2, 70.0);
        assert_eq!(tracker.peak_angle(), 90.0);
    }

    #[test]
    fn test_hysteresis_band_keeps_rep_open() {
        // Window of 1 so samples pass through unsmoothed
        let mut tracker = RepetitionTracker::with_params(30.0, 0.0, 1);
        tracker.update(0.0, 50.0);
        // 20° is above the 15° completion bound: still in rep
        let (_, completed) = tracker.update(1.0, 20.0);
        assert!(!completed);
        assert!(tracker.is_in_rep());
        // 10° crosses it
        let (_, completed) = tracker.update(2.0, 10.0);
        assert!(completed);
        assert!(!tracker.is_in_rep());
    }

    #[test]
    fn test_baseline_rebases_after_each_rep() {
        let mut tracker = RepetitionTracker::with_params(30.0, 0.0, 1);
        tracker.update(0.0, 40.0);
        let (_, completed) = tracker.update(1.0, 5.0);
        assert!(completed);

        // Baseline is now 5°: the next rep needs to clear 35°
        let (started, _) = tracker.update(2.0, 30.0);
        assert!(!started);
        let (started, _) = tracker.update(3.0, 40.0);
        assert!(started);
    }

    #[test]
    fn test_consecutive_reps() {
        let mut tracker = RepetitionTracker::new();
        run_rep(&mut tracker, 0.0, 0.1);
        run_rep(&mut tracker, 10.0, 0.1);
        run_rep(&mut tracker, 20.0, 0.1);
        assert_eq!(tracker.rep_count(), 3);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut tracker = RepetitionTracker::new();
        run_rep(&mut tracker, 0.0, 0.1);
        assert_eq!(tracker.rep_count(), 1);

        tracker.reset();
        assert_eq!(tracker.rep_count(), 0);
        assert!(!tracker.is_in_rep());
        assert_eq!(tracker.peak_angle(), 0.0);

        let (started, _) = tracker.update(0.0, 40.0);
        assert!(started, "baseline back at zero after reset");
    }
}
