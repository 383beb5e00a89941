use alloc::format;
use alloc::string::String;

/// Proof that a tick was scheduled for a particular grid generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TickToken(u32);

/// Whole-second counter driven by external ticks.
///
/// Every [`Timer::reset`] starts a new generation. Tokens handed out for an older generation, or handed out before
/// [`Timer::stop`], no longer advance the counter, so a late tick from a replaced grid is harmless.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timer {
    elapsed_secs: u32,
    running: bool,
    generation: u32,
}

impl Timer {
    pub const fn new() -> Self {
        Self {
            elapsed_secs: 0,
            running: true,
            generation: 0,
        }
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Token to attach to the next scheduled tick, `None` once stopped.
    pub fn token(&self) -> Option<TickToken> {
        self.running.then_some(TickToken(self.generation))
    }

    pub fn tick(&mut self, token: TickToken) -> bool {
        if !self.running || token != TickToken(self.generation) {
            log::trace!("Ignoring stale tick {:?}", token);
            return false;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.elapsed_secs = 0;
        self.running = true;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn display(&self) -> String {
        format_clock(self.elapsed_secs)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats whole seconds as zero-padded `mm:ss`.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
