//! Player statistics for the end-of-run summary

use std::time::{Duration, Instant};

/// Counters and timings accumulated over one session
#[derive(Debug, Clone)]
pub struct PlayerStats {
    /// Investigative actions taken; bumps even when an action turns out to
    /// be a repeat or an invalid pick. Attempts, not discoveries.
    pub clues_found: u32,

    /// Ordered record of irreversible choices, e.g. "Arrested Mr. Ireland"
    pub decisions_made: Vec<String>,

    start: Instant,
    end: Option<Instant>,
}

impl PlayerStats {
    pub fn new() -> Self {
        Self {
            clues_found: 0,
            decisions_made: Vec::new(),
            start: Instant::now(),
            end: None,
        }
    }

    pub fn add_clue_found(&mut self) {
        self.clues_found += 1;
    }

    pub fn add_decision(&mut self, decision: impl Into<String>) {
        self.decisions_made.push(decision.into());
    }

    /// Close the clock. Only the first call takes effect; the loop-end
    /// finalizer may run on any exit path.
    pub fn set_end_time(&mut self) {
        if self.end.is_none() {
            self.end = Some(Instant::now());
        }
    }

    pub fn ended(&self) -> bool {
        self.end.is_some()
    }

    /// Session duration: running total until the end time is set, frozen after
    pub fn elapsed(&self) -> Duration {
        match self.end {
            Some(end) => end.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    /// Human-readable summary lines for the post-run debrief
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("Total clues found: {}", self.clues_found),
            format!("Decisions made: {:?}", self.decisions_made),
            format!("Time taken: {:.2} seconds", self.elapsed().as_secs_f64()),
        ]
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_time_is_set_exactly_once() {
        let mut stats = PlayerStats::new();
        assert!(!stats.ended());

        stats.set_end_time();
        let frozen = stats.elapsed();
        assert!(stats.ended());

        // A second finalization must not move the end time
        std::thread::sleep(Duration::from_millis(15));
        stats.set_end_time();
        assert_eq!(stats.elapsed(), frozen);
    }

    #[test]
    fn counters_accumulate() {
        let mut stats = PlayerStats::new();
        stats.add_clue_found();
        stats.add_clue_found();
        stats.add_decision("Arrested Mr. Ireland");

        assert_eq!(stats.clues_found, 2);
        assert_eq!(stats.decisions_made, ["Arrested Mr. Ireland"]);
    }
}
