use std::time::Instant;

/// Lap timer: every `elapsed` call measures from the previous call.
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&mut self) -> f64 {
        let now = Instant::now();
        let ms = now.duration_since(self.start).as_secs_f64() * 1000.0;
        self.start = now;
        ms
    }
}

pub fn cost_line(detail: &str, ms: f64) -> String {
    format!("{detail}: {ms} (ms)")
}

pub fn show_costs(detail: &str, ms: f64) {
    log::info!("{}", cost_line(detail, ms));
}
