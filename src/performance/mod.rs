//! # Frame Metrics
//!
//! Rolling frame-time statistics and per-frame draw counts for the engine
//! loop.
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use orrery::performance::PerformanceMonitor;
//!
//! let mut monitor = PerformanceMonitor::new();
//!
//! monitor.begin_frame();
//! // ... traverse and draw ...
//! monitor.record_draws(12, 3_456);
//! monitor.end_frame();
//!
//! // frames stepped by a fixed tick can be recorded directly
//! monitor.record_frame(Duration::from_millis(16));
//! println!("{}", monitor.get_metrics());
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use log::debug;

/// Frame and draw statistics over the current sample window.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    /// Frames per second derived from the average frame time
    pub fps: f32,
    /// Average frame time in milliseconds
    pub frame_time_ms: f32,
    pub min_frame_time_ms: f32,
    pub max_frame_time_ms: f32,
    /// Models drawn in the last frame
    pub draw_calls: u32,
    /// Vertices submitted in the last frame
    pub vertex_count: u64,
    /// Frames recorded since creation or the last reset
    pub total_frames: u64,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: f32::MAX,
            max_frame_time_ms: 0.0,
            draw_calls: 0,
            vertex_count: 0,
            total_frames: 0,
        }
    }
}

impl fmt::Display for PerformanceMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1} fps, {:.2}ms avg ({:.2}..{:.2}), {} draws, {} vertices",
            self.fps,
            self.frame_time_ms,
            if self.total_frames == 0 { 0.0 } else { self.min_frame_time_ms },
            self.max_frame_time_ms,
            self.draw_calls,
            self.vertex_count
        )
    }
}

/// Keeps a ring buffer of recent frame times and derives [`PerformanceMetrics`].
#[derive(Debug)]
pub struct PerformanceMonitor {
    frame_times: VecDeque<Duration>,
    max_samples: usize,
    frame_start: Option<Instant>,
    current_metrics: PerformanceMetrics,
}

impl PerformanceMonitor {
    /// Keeps about two seconds of history at 60 fps.
    pub fn new() -> Self {
        Self::with_window(120)
    }

    pub fn with_window(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples,
            frame_start: None,
            current_metrics: PerformanceMetrics::default(),
        }
    }

    /// Mark the beginning of a frame
    pub fn begin_frame(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// Mark the end of a frame and record its wall-clock duration
    pub fn end_frame(&mut self) {
        if let Some(start) = self.frame_start.take() {
            self.record_frame(start.elapsed());
        }
    }

    /// Records a frame of known duration.
    pub fn record_frame(&mut self, frame_time: Duration) {
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);
        self.current_metrics.total_frames += 1;
        self.update_metrics();
    }

    fn update_metrics(&mut self) {
        let Some(count) = u32::try_from(self.frame_times.len()).ok().filter(|&n| n > 0) else {
            return;
        };

        let total_time: Duration = self.frame_times.iter().sum();
        let avg_frame_time_ms = (total_time / count).as_secs_f32() * 1000.0;

        self.current_metrics.frame_time_ms = avg_frame_time_ms;
        self.current_metrics.fps = if avg_frame_time_ms > 0.0 {
            1000.0 / avg_frame_time_ms
        } else {
            0.0
        };

        if let (Some(min_time), Some(max_time)) = (self.frame_times.iter().min(), self.frame_times.iter().max()) {
            self.current_metrics.min_frame_time_ms = min_time.as_secs_f32() * 1000.0;
            self.current_metrics.max_frame_time_ms = max_time.as_secs_f32() * 1000.0;
        }
    }

    /// Stores the draw counts of the frame in progress.
    pub fn record_draws(&mut self, draw_calls: u32, vertex_count: u64) {
        self.current_metrics.draw_calls = draw_calls;
        self.current_metrics.vertex_count = vertex_count;
    }

    pub fn get_metrics(&self) -> &PerformanceMetrics {
        &self.current_metrics
    }

    /// Frame times of the window in milliseconds, oldest first
    pub fn get_frame_time_history(&self) -> Vec<f32> {
        self.frame_times
            .iter()
            .map(|duration| duration.as_secs_f32() * 1000.0)
            .collect()
    }

    /// Reset all metrics and history
    pub fn reset(&mut self) {
        debug!("Resetting performance monitor after {} frames", self.current_metrics.total_frames);
        self.frame_times.clear();
        self.current_metrics = PerformanceMetrics::default();
        self.frame_start = None;
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_and_fps() {
        let mut monitor = PerformanceMonitor::new();
        monitor.record_frame(Duration::from_millis(10));
        monitor.record_frame(Duration::from_millis(30));

        let metrics = monitor.get_metrics();
        assert!((metrics.frame_time_ms - 20.0).abs() < 1e-3);
        assert!((metrics.fps - 50.0).abs() < 1e-2);
        assert!((metrics.min_frame_time_ms - 10.0).abs() < 1e-3);
        assert!((metrics.max_frame_time_ms - 30.0).abs() < 1e-3);
        assert_eq!(metrics.total_frames, 2);
    }

    #[test]
    fn test_window_drops_oldest() {
        let mut monitor = PerformanceMonitor::with_window(2);
        for ms in [100, 10, 20] {
            monitor.record_frame(Duration::from_millis(ms));
        }
        assert_eq!(monitor.get_frame_time_history().len(), 2);
        assert!((monitor.get_metrics().max_frame_time_ms - 20.0).abs() < 1e-3);
        assert_eq!(monitor.get_metrics().total_frames, 3);
    }

    #[test]
    fn test_begin_end_and_reset() {
        let mut monitor = PerformanceMonitor::new();
        monitor.end_frame();
        assert_eq!(monitor.get_metrics().total_frames, 0);

        monitor.begin_frame();
        monitor.record_draws(3, 108);
        monitor.end_frame();
        assert_eq!(monitor.get_metrics().total_frames, 1);
        assert_eq!(monitor.get_metrics().draw_calls, 3);

        monitor.reset();
        assert_eq!(*monitor.get_metrics(), PerformanceMetrics::default());
        assert!(monitor.get_frame_time_history().is_empty());
    }

    #[test]
    fn test_display_before_any_frame() {
        let text = PerformanceMetrics::default().to_string();
        assert!(text.starts_with("0.0 fps"), "{}", text);
    }
}
