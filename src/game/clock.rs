/// Whole-second game clock.
///
/// The clock only counts; the one-second cadence comes from whoever owns the
/// recurring callback and forwards it through [`Stopwatch::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stopwatch {
    elapsed: u32,
    started: bool,
    running: bool,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the clock once per game. Returns `true` only on the call that
    /// actually started it.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.running = true;
        true
    }

    pub fn tick(&mut self) -> Option<u32> {
        if !self.running {
            return None;
        }
        self.elapsed = self.elapsed.saturating_add(1);
        Some(self.elapsed)
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

pub fn format_clock(total_secs: u32) -> String {
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}
