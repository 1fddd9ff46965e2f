// ⏳ Week Cycle - rolling weekly window with a one-shot report latch
//
// evaluate() is pure and can run on every tick. The latch is the only thing
// standing between an hourly timer and a double reset: once the report is
// due, nothing changes again until restart().

use chrono::{DateTime, Utc};

/// Days in one tracking week.
pub const WEEK_LENGTH_DAYS: i64 = 7;

/// Outcome of checking the clock against the week start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekEvaluation {
    /// Whole days since the week started.
    pub days_elapsed: i64,

    /// True once a full week has passed.
    pub elapsed: bool,
}

// ============================================================================
// WEEK CYCLE
// ============================================================================

/// The current tracking week: its start timestamp plus the report latch.
///
/// Exactly one cycle is active at a time; a new one begins only through
/// `restart()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekCycle {
    start: DateTime<Utc>,
    report_due: bool,
}

impl WeekCycle {
    /// Cycle starting at the given instant, latch clear.
    pub fn starting(start: DateTime<Utc>) -> Self {
        WeekCycle {
            start,
            report_due: false,
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Pure elapse check. Never mutates, never latches.
    pub fn evaluate(&self, now: DateTime<Utc>) -> WeekEvaluation {
        let days_elapsed = (now - self.start).num_days();

        WeekEvaluation {
            days_elapsed,
            elapsed: days_elapsed >= WEEK_LENGTH_DAYS,
        }
    }

    /// Latch the report flag once the week has elapsed.
    ///
    /// Returns true only on the call that first observes the elapsed week;
    /// every later call returns false until `restart()` clears the latch.
    pub fn latch_report(&mut self, now: DateTime<Utc>) -> bool {
        if self.report_due || !self.evaluate(now).elapsed {
            return false;
        }

        self.report_due = true;
        true
    }

    /// Whether the weekly report is waiting to be acknowledged.
    pub fn report_due(&self) -> bool {
        self.report_due
    }

    /// Begin a fresh week at `now`. Clears the latch.
    pub fn restart(&mut self, now: DateTime<Utc>) {
        self.start = now;
        self.report_due = false;
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 6, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_evaluate_before_week_ends() {
        let week = WeekCycle::starting(start());

        let eval = week.evaluate(start());
        assert_eq!(eval.days_elapsed, 0);
        assert!(!eval.elapsed);

        // One minute short of seven days
        let eval = week.evaluate(start() + Duration::days(7) - Duration::minutes(1));
        assert_eq!(eval.days_elapsed, 6);
        assert!(!eval.elapsed);
    }

    #[test]
    fn test_evaluate_at_exactly_seven_days() {
        let week = WeekCycle::starting(start());

        let eval = week.evaluate(start() + Duration::days(7));
        assert_eq!(eval.days_elapsed, 7);
        assert!(eval.elapsed);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let week = WeekCycle::starting(start());
        let now = start() + Duration::days(10);

        assert!(week.evaluate(now).elapsed);
        assert!(week.evaluate(now).elapsed);
        assert!(!week.report_due());
    }

    #[test]
    fn test_latch_fires_once() {
        let mut week = WeekCycle::starting(start());
        let now = start() + Duration::days(7);

        assert!(week.latch_report(now));
        assert!(week.report_due());

        // A later tick must not re-fire
        assert!(!week.latch_report(now + Duration::minutes(5)));
        assert!(week.report_due());
    }

    #[test]
    fn test_latch_does_not_fire_early() {
        let mut week = WeekCycle::starting(start());

        assert!(!week.latch_report(start() + Duration::days(3)));
        assert!(!week.report_due());
    }

    #[test]
    fn test_restart_clears_latch() {
        let mut week = WeekCycle::starting(start());
        let now = start() + Duration::days(8);

        assert!(week.latch_report(now));

        week.restart(now);
        assert!(!week.report_due());
        assert_eq!(week.start(), now);
        assert!(!week.evaluate(now).elapsed);

        // A fresh cycle can latch again a week later
        assert!(week.latch_report(now + Duration::days(7)));
    }
}
