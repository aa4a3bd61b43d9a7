// Frame timing
//
// The simulation is frame-rate independent: every update receives the real
// time elapsed since the previous frame and scales all motion by it. The
// clock also keeps a rolling FPS average for diagnostics.

use std::time::{Duration, Instant};

/// Upper bound on a single frame's delta time, in seconds.
/// A stall (window drag, debugger pause) otherwise turns into one giant
/// simulation step that teleports actors through walls.
pub const MAX_FRAME_DT: f32 = 0.1;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Wall-clock frame timing state
pub struct FrameClock {
    /// Time of last frame
    last_frame_time: Instant,

    /// Time when the clock started
    start_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame_time: now,
            start_time: now,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame.
    ///
    /// Returns the clamped delta time in seconds and the timestamp the
    /// frame started at, which the simulation uses for its own timers.
    pub fn begin_frame(&mut self) -> (f32, Instant) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        // Store frame time for FPS calculation
        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        (frame_time.as_secs_f32().min(MAX_FRAME_DT), now)
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total elapsed time since start
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Get total elapsed time in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }

    /// Get total number of frames begun
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        // Calculate average frame time
        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        // Convert to FPS
        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_creation() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_frame_counting() {
        let mut clock = FrameClock::new();
        clock.begin_frame();
        assert_eq!(clock.frame_count(), 1);

        clock.begin_frame();
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_delta_time_tracks_real_time() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(15));

        let (dt, _) = clock.begin_frame();
        assert!(dt >= 0.015, "dt was {dt}");
        assert!(dt <= MAX_FRAME_DT);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(150));

        let (dt, _) = clock.begin_frame();
        assert_eq!(dt, MAX_FRAME_DT);
    }

    #[test]
    fn test_elapsed_time() {
        let clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        assert!(clock.elapsed() >= Duration::from_millis(10));
        assert!(clock.elapsed_secs() > 0.0);
    }

    #[test]
    fn test_timestamps_are_monotonic() {
        let mut clock = FrameClock::new();
        let (_, first) = clock.begin_frame();
        let (_, second) = clock.begin_frame();
        assert!(second >= first);
    }
}
