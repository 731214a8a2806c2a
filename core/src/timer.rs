use minegrid_protocol::BoardSnapshot;

/// Client-only elapsed-seconds display, seeded from the server's total and
/// advanced by the host's one-second tick while the session is ongoing.
///
/// Once the lifecycle leaves "ongoing" (or the view stops it) ticking is
/// latched off for good; later snapshots still reseed the shown value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayTimer {
    seconds: u64,
    running: bool,
    halted: bool,
}

impl DisplayTimer {
    pub fn reseed(&mut self, snapshot: &BoardSnapshot) {
        self.seconds = snapshot.total_time_in_seconds;
        if snapshot.state.is_finished() {
            self.halted = true;
        }
        self.running = !self.halted;
    }

    /// Returns whether the displayed value changed.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.seconds = self.seconds.saturating_add(1);
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.halted = true;
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use minegrid_protocol::{Cell, SessionState};

    use super::*;

    fn snapshot(state: SessionState, total: u64) -> BoardSnapshot {
        BoardSnapshot::from_rows(vec![vec![Cell::hidden(0, 0)]], state, "abc123", total).unwrap()
    }

    fn seeded(state: SessionState, total: u64) -> DisplayTimer {
        let mut timer = DisplayTimer::default();
        timer.reseed(&snapshot(state, total));
        timer
    }

    #[test]
    fn unseeded_timer_does_not_tick() {
        let mut timer = DisplayTimer::default();
        assert!(!timer.tick());
        assert_eq!(timer.seconds(), 0);
    }

    #[test]
    fn ticks_from_seed_while_ongoing() {
        let mut timer = seeded(SessionState::Ongoing, 41);

        let mut previous = timer.seconds();
        for _ in 0..3 {
            assert!(timer.tick());
            assert!(timer.seconds() > previous);
            previous = timer.seconds();
        }

        assert_eq!(timer.seconds(), 44);
    }

    #[test]
    fn fresh_snapshot_reseeds() {
        let mut timer = seeded(SessionState::Ongoing, 10);
        timer.tick();
        timer.tick();

        timer.reseed(&snapshot(SessionState::Ongoing, 11));

        assert_eq!(timer.seconds(), 11);
        assert!(timer.is_running());
    }

    #[test]
    fn freezes_when_game_ends() {
        let mut timer = seeded(SessionState::Ongoing, 10);
        timer.tick();

        timer.reseed(&snapshot(SessionState::Won, 12));
        for _ in 0..5 {
            assert!(!timer.tick());
        }

        assert_eq!(timer.seconds(), 12);
    }

    #[test]
    fn stays_halted_after_end_even_if_ongoing_reappears() {
        let mut timer = seeded(SessionState::Lost, 30);

        timer.reseed(&snapshot(SessionState::Ongoing, 31));

        assert!(!timer.is_running());
        assert!(!timer.tick());
        assert_eq!(timer.seconds(), 31);
    }

    #[test]
    fn stop_is_permanent() {
        let mut timer = seeded(SessionState::Ongoing, 0);
        timer.stop();
        timer.reseed(&snapshot(SessionState::Ongoing, 5));
        assert!(!timer.tick());
    }
}
