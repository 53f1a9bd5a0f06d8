// Single-owner cancellable deadline, driven by the host clock.
// Rescheduling supersedes the previous deadline; a stale generation never fires.

/// Debounced callback slot. Time is host milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct DebounceTimer {
    delay_ms: f64,
    deadline: Option<f64>,
    generation: u64,
}

impl DebounceTimer {
    pub fn new(delay_ms: f64) -> Self {
        DebounceTimer {
            delay_ms,
            deadline: None,
            generation: 0,
        }
    }

    /// Arm (or re-arm) the timer. Returns the generation token for host-side timeouts.
    pub fn schedule(&mut self, now_ms: f64) -> u64 {
        self.generation += 1;
        self.deadline = Some(now_ms + self.delay_ms);
        self.generation
    }

    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            self.generation += 1;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fire if the deadline has passed. Fires at most once per schedule.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Fire from a host timeout carrying `generation`. Superseded tokens are ignored.
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.deadline.is_some() && generation == self.generation {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_delay() {
        let mut timer = DebounceTimer::new(120.0);
        timer.schedule(1000.0);
        assert!(!timer.poll(1100.0));
        assert!(timer.poll(1120.0));
        assert!(!timer.poll(1500.0));
    }

    #[test]
    fn reschedule_pushes_deadline() {
        let mut timer = DebounceTimer::new(120.0);
        timer.schedule(1000.0);
        timer.schedule(1100.0);
        assert!(!timer.poll(1150.0));
        assert!(timer.poll(1220.0));
    }

    #[test]
    fn cancel_prevents_fire() {
        let mut timer = DebounceTimer::new(120.0);
        timer.schedule(0.0);
        timer.cancel();
        assert!(!timer.is_pending());
        assert!(!timer.poll(10_000.0));
    }

    #[test]
    fn stale_generation_ignored() {
        let mut timer = DebounceTimer::new(120.0);
        let first = timer.schedule(0.0);
        let second = timer.schedule(50.0);
        assert!(!timer.fire(first));
        assert!(timer.fire(second));
        assert!(!timer.fire(second));
    }

    #[test]
    fn cancelled_generation_ignored() {
        let mut timer = DebounceTimer::new(120.0);
        let token = timer.schedule(0.0);
        timer.cancel();
        assert!(!timer.fire(token));
    }
}
