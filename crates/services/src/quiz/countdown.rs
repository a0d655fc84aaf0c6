/// Identifies one armed countdown.
///
/// Every call to [`Countdown::arm`] issues a new id; ticks carrying any other id
/// are stale and ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CountdownId(u64);

impl CountdownId {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownTick {
    /// The tick belongs to a cancelled or superseded countdown.
    Stale,
    Running(u32),
    /// Reached zero on this tick. The countdown is disarmed.
    Expired,
}

/// Per-question countdown owned by a quiz session.
///
/// At most one countdown is live at a time: arming cancels the previous one
/// first, and expiry disarms it so zero is reported once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    budget: u32,
    remaining: u32,
    live: Option<CountdownId>,
    issued: u64,
}

impl Countdown {
    #[must_use]
    pub fn new(budget: u32) -> Self {
        Self {
            budget,
            remaining: budget,
            live: None,
            issued: 0,
        }
    }

    /// Cancel any live countdown and start a fresh one at the full budget.
    pub fn arm(&mut self) -> CountdownId {
        self.cancel();
        self.issued += 1;
        let id = CountdownId(self.issued);
        self.live = Some(id);
        self.remaining = self.budget;
        id
    }

    /// Stop the live countdown. `remaining` keeps its last value.
    pub fn cancel(&mut self) {
        self.live = None;
    }

    pub fn tick(&mut self, id: CountdownId) -> CountdownTick {
        if self.live != Some(id) {
            return CountdownTick::Stale;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.live = None;
            return CountdownTick::Expired;
        }
        CountdownTick::Running(self.remaining)
    }

    #[must_use]
    pub fn live(&self) -> Option<CountdownId> {
        self.live
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn budget(&self) -> u32 {
        self.budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_a_single_expiry() {
        let mut countdown = Countdown::new(3);
        let id = countdown.arm();

        assert_eq!(countdown.tick(id), CountdownTick::Running(2));
        assert_eq!(countdown.tick(id), CountdownTick::Running(1));
        assert_eq!(countdown.tick(id), CountdownTick::Expired);
        assert_eq!(countdown.tick(id), CountdownTick::Stale);
        assert_eq!(countdown.remaining(), 0);
        assert!(!countdown.is_live());
    }

    #[test]
    fn rearming_invalidates_previous_id() {
        let mut countdown = Countdown::new(30);
        let first = countdown.arm();
        countdown.tick(first);

        let second = countdown.arm();
        assert_ne!(first, second);
        assert_eq!(countdown.remaining(), 30);
        assert_eq!(countdown.tick(first), CountdownTick::Stale);
        assert_eq!(countdown.tick(second), CountdownTick::Running(29));
    }

    #[test]
    fn cancelled_countdown_ignores_ticks() {
        let mut countdown = Countdown::new(5);
        let id = countdown.arm();
        countdown.tick(id);
        countdown.cancel();

        assert_eq!(countdown.tick(id), CountdownTick::Stale);
        assert_eq!(countdown.remaining(), 4);
    }

    #[test]
    fn budget_of_one_expires_on_first_tick() {
        let mut countdown = Countdown::new(1);
        let id = countdown.arm();
        assert_eq!(countdown.tick(id), CountdownTick::Expired);
    }
}
