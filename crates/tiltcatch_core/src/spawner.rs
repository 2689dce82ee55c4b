//! Frame-counted spawn cadence

/// Counts frames and fires once every `interval` ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnScheduler {
    timer: u32,
    interval: u32,
}

impl SpawnScheduler {
    /// Create a scheduler; an interval of zero is treated as one
    pub fn new(interval: u32) -> Self {
        Self {
            timer: 0,
            interval: interval.max(1),
        }
    }

    /// Advance one frame, returning true when a spawn is due
    ///
    /// The timer restarts whenever it fires, whether or not the caller
    /// actually has room for another ball.
    pub fn tick(&mut self) -> bool {
        self.timer += 1;
        if self.timer >= self.interval {
            self.timer = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.timer = 0;
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }
}
