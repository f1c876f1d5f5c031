//! Frame timing

/// Fixed-step frame clock for headless, scripted runs
#[derive(Debug, Clone)]
pub struct FrameClock {
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}

impl FrameClock {
    /// Create a clock advancing by `delta_time` seconds per frame
    pub fn new(delta_time: f32) -> Self {
        Self {
            delta_time: delta_time.max(0.0),
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance by one frame and return the frame's delta
    pub fn tick(&mut self) -> f32 {
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Seconds per frame
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Total simulated time
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clock_accumulates() {
        let mut clock = FrameClock::new(0.25);
        clock.tick();
        clock.tick();
        assert_eq!(clock.frame_count(), 2);
        assert_relative_eq!(clock.total_time(), 0.5);
    }

    #[test]
    fn test_negative_delta_is_clamped() {
        let clock = FrameClock::new(-1.0);
        assert_relative_eq!(clock.delta_time(), 0.0);
    }
}
