// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame timing: delta time, windowed smoothing, and an FPS counter.
//!
//! [`FrameTimer`] computes the raw delta between consecutive draw ticks and
//! feeds it into a [`WindowedMean`] over the last [`SMOOTHING_WINDOW`]
//! samples. [`FpsCounter`] maintains the one-second frame bucket. All three
//! are mutated only on the rendering thread, inside the draw tick, and are
//! reset whenever a surface is (re)created so a new context starts with a
//! clean window.

use crate::time::{NANOS_PER_SEC, TimePoint};

/// Number of delta samples in the smoothing window.
pub const SMOOTHING_WINDOW: usize = 5;

/// Arithmetic mean over a fixed-size circular window of samples.
///
/// Until the window fills, [`mean`](Self::mean) averages only the populated
/// slots.
#[derive(Clone, Copy, Debug)]
pub struct WindowedMean {
    samples: [f32; SMOOTHING_WINDOW],
    cursor: usize,
    filled: usize,
}

impl WindowedMean {
    /// Creates an empty window.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            samples: [0.0; SMOOTHING_WINDOW],
            cursor: 0,
            filled: 0,
        }
    }

    /// Adds a sample, evicting the oldest once the window is full.
    pub fn add(&mut self, sample: f32) {
        self.samples[self.cursor] = sample;
        self.cursor = (self.cursor + 1) % SMOOTHING_WINDOW;
        if self.filled < SMOOTHING_WINDOW {
            self.filled += 1;
        }
    }

    /// Returns the mean of the populated slots, or zero if no samples have
    /// been added.
    #[must_use]
    pub fn mean(&self) -> f32 {
        if self.filled == 0 {
            return 0.0;
        }
        let mut sum = 0.0;
        for sample in &self.samples[..self.filled] {
            sum += sample;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "filled is at most SMOOTHING_WINDOW"
        )]
        {
            sum / self.filled as f32
        }
    }

    /// Discards all samples.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.filled = 0;
    }
}

impl Default for WindowedMean {
    fn default() -> Self {
        Self::new()
    }
}

/// One-second-bucket frames-per-second counter.
///
/// [`tick`](Self::tick) increments the bucket's frame count and, once at
/// least one second has elapsed since the bucket started, publishes the count
/// as the current FPS and opens a new bucket. A window of exactly 60 ticks
/// spaced 1/60 s apart therefore publishes 60 on the boundary tick.
#[derive(Clone, Copy, Debug)]
pub struct FpsCounter {
    frames: u32,
    fps: u32,
    window_start: TimePoint,
}

impl FpsCounter {
    /// Creates a counter whose first bucket starts at `now`.
    #[must_use]
    pub const fn new(now: TimePoint) -> Self {
        Self {
            frames: 0,
            fps: 0,
            window_start: now,
        }
    }

    /// Restarts the current bucket at `now`. The last published FPS value is
    /// retained.
    pub fn reset(&mut self, now: TimePoint) {
        self.frames = 0;
        self.window_start = now;
    }

    /// Counts one frame at `now`; returns the newly published FPS value when
    /// a one-second bucket closes.
    pub fn tick(&mut self, now: TimePoint) -> Option<u32> {
        self.frames += 1;
        if now.saturating_nanos_since(self.window_start) >= NANOS_PER_SEC {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start = now;
            Some(self.fps)
        } else {
            None
        }
    }

    /// Returns the most recently published FPS value.
    #[must_use]
    pub const fn fps(&self) -> u32 {
        self.fps
    }
}

/// Tracks the delta between consecutive draw ticks and its windowed mean.
#[derive(Clone, Copy, Debug)]
pub struct FrameTimer {
    last_frame: TimePoint,
    delta_seconds: f32,
    smoothed: WindowedMean,
}

impl FrameTimer {
    /// Creates a timer whose first delta will be measured from `now`.
    #[must_use]
    pub const fn new(now: TimePoint) -> Self {
        Self {
            last_frame: now,
            delta_seconds: 0.0,
            smoothed: WindowedMean::new(),
        }
    }

    /// Starts a fresh timing window at `now`, discarding accumulated samples.
    pub fn reset(&mut self, now: TimePoint) {
        self.last_frame = now;
        self.delta_seconds = 0.0;
        self.smoothed.reset();
    }

    /// Records a tick at `now`, updating the delta and the smoothing window.
    pub fn tick(&mut self, now: TimePoint) {
        self.delta_seconds = now.seconds_since(self.last_frame);
        self.last_frame = now;
        self.smoothed.add(self.delta_seconds);
    }

    /// Returns the delta of the most recent tick, in seconds.
    #[must_use]
    pub const fn delta_seconds(&self) -> f32 {
        self.delta_seconds
    }

    /// Returns the windowed mean of recent deltas, in seconds.
    #[must_use]
    pub fn smoothed_delta(&self) -> f32 {
        self.smoothed.mean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_partial_window() {
        let mut mean = WindowedMean::new();
        assert_eq!(mean.mean(), 0.0);

        mean.add(1.0);
        mean.add(3.0);
        assert!((mean.mean() - 2.0).abs() < 1e-6, "mean of two samples");
    }

    #[test]
    fn mean_evicts_oldest_when_full() {
        let mut mean = WindowedMean::new();
        for _ in 0..SMOOTHING_WINDOW {
            mean.add(1.0);
        }
        assert!((mean.mean() - 1.0).abs() < 1e-6, "full window of ones");

        // One large sample replaces one of the ones.
        mean.add(6.0);
        assert!((mean.mean() - 2.0).abs() < 1e-6, "(6 + 4*1) / 5");
    }

    #[test]
    fn reset_empties_the_window() {
        let mut mean = WindowedMean::new();
        mean.add(5.0);
        mean.reset();
        assert_eq!(mean.mean(), 0.0);
    }

    #[test]
    fn sixty_uniform_ticks_publish_sixty_fps() {
        // 1/60 s rounded up so the 60th tick lands on the boundary.
        const STEP: u64 = 16_666_667;

        let mut fps = FpsCounter::new(TimePoint(0));
        let mut published = None;
        for i in 1..=60_u64 {
            let result = fps.tick(TimePoint(i * STEP));
            if i < 60 {
                assert!(result.is_none(), "bucket must not close before 1s");
            } else {
                published = result;
            }
        }
        assert_eq!(published, Some(60));
        assert_eq!(fps.fps(), 60);
    }

    #[test]
    fn fps_reset_keeps_last_published_value() {
        let mut fps = FpsCounter::new(TimePoint(0));
        for i in 1..=30_u64 {
            fps.tick(TimePoint(i * 40_000_000));
        }
        assert_eq!(fps.fps(), 25, "25 frames in the first full second");

        fps.reset(TimePoint(0));
        assert_eq!(fps.fps(), 25, "reset opens a new bucket, keeps last fps");
    }

    #[test]
    fn frame_timer_tracks_delta_and_mean() {
        let mut timer = FrameTimer::new(TimePoint(0));
        timer.tick(TimePoint(100_000_000));
        assert!((timer.delta_seconds() - 0.1).abs() < 1e-6, "first delta");

        timer.tick(TimePoint(400_000_000));
        assert!((timer.delta_seconds() - 0.3).abs() < 1e-6, "second delta");
        assert!(
            (timer.smoothed_delta() - 0.2).abs() < 1e-6,
            "mean of 0.1 and 0.3"
        );

        timer.reset(TimePoint(500_000_000));
        assert_eq!(timer.delta_seconds(), 0.0);
        assert_eq!(timer.smoothed_delta(), 0.0);
    }
}
