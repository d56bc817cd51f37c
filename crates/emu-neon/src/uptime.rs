//! Emulated-time accounting.

/// Completed frames per emulated second.
pub const FRAMES_PER_SECOND: u32 = 25;

/// Whole seconds plus the frames completed in the current second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Uptime {
    seconds: u32,
    frames: u32,
}

impl Uptime {
    /// Replace the whole-second count. Frames into the current second are
    /// kept.
    pub fn set_seconds(&mut self, seconds: u32) {
        self.seconds = seconds;
    }

    /// Count one completed frame.
    pub fn frame_completed(&mut self) {
        self.frames += 1;
        if self.frames == FRAMES_PER_SECOND {
            self.frames = 0;
            self.seconds = self.seconds.wrapping_add(1);
        }
    }

    #[must_use]
    pub const fn seconds(&self) -> u32 {
        self.seconds
    }

    #[must_use]
    pub const fn frames(&self) -> u32 {
        self.frames
    }

    #[must_use]
    pub fn as_secs_f64(&self) -> f64 {
        f64::from(self.seconds) + f64::from(self.frames) / f64::from(FRAMES_PER_SECOND)
    }
}
