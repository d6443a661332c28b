//! Frame timing

use std::time::{Duration, Instant};

/// Frame timer driven once per iteration of the runtime loop
///
/// Tracks the delta between frames, total elapsed time, frame count and a
/// once-per-second FPS sample. The engine copies these into each frame's
/// `FrameContext`.
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    fps: f32,
    fps_window: f32,
    fps_frames: u32,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_window: 0.0,
            fps_frames: 0,
        }
    }

    /// Update the timer from the wall clock (call once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.advance(elapsed);
    }

    /// Advance the timer by an explicit amount
    ///
    /// Used by `update` and by fixed-step headless runs.
    pub fn advance(&mut self, elapsed: Duration) {
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.frame_count += 1;

        self.fps_window += self.delta_time;
        self.fps_frames += 1;
        if self.fps_window >= 1.0 {
            self.fps = self.fps_frames as f32 / self.fps_window;
            self.fps_window = 0.0;
            self.fps_frames = 0;
        }
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, sampled over the last full second
    pub fn fps(&self) -> f32 {
        self.fps
    }
}
