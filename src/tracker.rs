// 🍎 Tracker State - the one canonical state container
//
// Owns the food catalog, the eaten-this-week set and the week cycle, and
// answers every query the presentation layer renders from. The presentation
// layer only forwards intents here; it never holds state of its own.
//
// Invariant: the eaten set is always a subset of the catalog, spelled the
// catalog's way.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::catalog::{food_key, FoodCatalog};
use crate::report::ReportView;
use crate::week::{WeekCycle, WeekEvaluation};

/// Unique items to eat per week.
pub const WEEKLY_GOAL: usize = 30;

// ============================================================================
// RESULT & VIEW TYPES
// ============================================================================

/// Outcome of an add-food intent.
///
/// Carries the catalog spelling so an acknowledgement notice can quote it.
/// Blank input is `Ignored` - a normal value, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddResult {
    /// Blank after trimming. Nothing happened.
    Ignored,

    /// Brand-new food: inserted into the catalog and marked eaten.
    CreatedAndMarkedEaten(String),

    /// Known food that was not yet eaten: marked eaten, catalog unchanged.
    AlreadyExistedNowMarked(String),

    /// Known food already marked eaten: nothing to do.
    AlreadyExistedAlreadyMarked(String),
}

/// Progress toward the weekly goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub count: usize,
    pub remaining: usize,
    pub message: String,
}

/// Sorted catalog split by eaten-this-week membership.
/// Both halves keep the catalog's display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodPartition {
    pub to_eat: Vec<String>,
    pub eaten: Vec<String>,
}

// ============================================================================
// TRACKER STATE
// ============================================================================

#[derive(Debug, Clone)]
pub struct TrackerState {
    catalog: FoodCatalog,
    eaten: HashSet<String>,
    week: WeekCycle,
}

impl TrackerState {
    /// Fresh tracker: preset catalog, nothing eaten, week starting now.
    pub fn new(now: DateTime<Utc>) -> Self {
        TrackerState {
            catalog: FoodCatalog::with_defaults(),
            eaten: HashSet::new(),
            week: WeekCycle::starting(now),
        }
    }

    /// Rebuild from persisted values.
    ///
    /// Eaten entries are re-resolved against the catalog; anything that no
    /// longer matches is dropped, so the subset invariant holds even for a
    /// hand-edited store.
    pub fn hydrate(
        custom_foods: Vec<String>,
        eaten_foods: Vec<String>,
        week_start: DateTime<Utc>,
    ) -> Self {
        let catalog = FoodCatalog::from_customs(custom_foods);
        let eaten = eaten_foods
            .iter()
            .filter_map(|food| catalog.resolve(food))
            .map(str::to_string)
            .collect();

        TrackerState {
            catalog,
            eaten,
            week: WeekCycle::starting(week_start),
        }
    }

    // ========================================================================
    // USER INTENTS
    // ========================================================================

    /// Flip eaten-membership for a known food; unknown names are a no-op.
    /// Returns the new membership (true = now eaten).
    pub fn toggle_eaten(&mut self, food: &str) -> bool {
        let name = match self.catalog.resolve(food) {
            Some(name) => name.to_string(),
            None => return false,
        };

        if self.eaten.remove(&name) {
            false
        } else {
            self.eaten.insert(name);
            true
        }
    }

    /// Add a food by name, marking it eaten.
    ///
    /// Matching is case-insensitive; an existing entry keeps its catalog
    /// spelling, a new one keeps the submitted casing (trimmed).
    pub fn add_food(&mut self, raw: &str) -> AddResult {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return AddResult::Ignored;
        }

        match self.catalog.resolve(trimmed).map(str::to_string) {
            Some(existing) => {
                if self.eaten.insert(existing.clone()) {
                    AddResult::AlreadyExistedNowMarked(existing)
                } else {
                    AddResult::AlreadyExistedAlreadyMarked(existing)
                }
            }
            None => {
                let name = trimmed.to_string();
                self.catalog.insert_custom(name.clone());
                self.eaten.insert(name.clone());
                AddResult::CreatedAndMarkedEaten(name)
            }
        }
    }

    // ========================================================================
    // WEEK CYCLE
    // ========================================================================

    /// Pure elapse check against the stored week start.
    pub fn evaluate_week(&self, now: DateTime<Utc>) -> WeekEvaluation {
        self.week.evaluate(now)
    }

    /// Tick entry point: latches the report flag once the week has elapsed.
    /// True exactly once per elapse event.
    pub fn poll_week(&mut self, now: DateTime<Utc>) -> bool {
        self.week.latch_report(now)
    }

    pub fn report_due(&self) -> bool {
        self.week.report_due()
    }

    /// Start a fresh week: clear the eaten set, restart the cycle.
    /// The catalog is untouched.
    pub fn reset_week(&mut self, now: DateTime<Utc>) {
        self.eaten.clear();
        self.week.restart(now);
    }

    pub fn week_start(&self) -> DateTime<Utc> {
        self.week.start()
    }

    // ========================================================================
    // DERIVED VIEWS
    // ========================================================================

    pub fn progress(&self) -> Progress {
        let count = self.eaten.len();
        let remaining = WEEKLY_GOAL.saturating_sub(count);

        let message = if remaining == 0 {
            "🎉 Congratulations! You've reached your goal!".to_string()
        } else {
            format!("{} more unique items to reach your goal", remaining)
        };

        Progress {
            count,
            remaining,
            message,
        }
    }

    pub fn weekly_report(&self) -> ReportView {
        ReportView::new(self.eaten.len(), WEEKLY_GOAL, self.catalog.custom_count())
    }

    /// All foods in display order (ascending, case-insensitive).
    pub fn sorted_catalog(&self) -> &[String] {
        self.catalog.sorted()
    }

    pub fn partition(&self) -> FoodPartition {
        let mut partition = FoodPartition::default();

        for food in self.catalog.sorted() {
            if self.eaten.contains(food) {
                partition.eaten.push(food.clone());
            } else {
                partition.to_eat.push(food.clone());
            }
        }

        partition
    }

    pub fn is_eaten(&self, food: &str) -> bool {
        self.catalog
            .resolve(food)
            .map_or(false, |name| self.eaten.contains(name))
    }

    pub fn eaten_count(&self) -> usize {
        self.eaten.len()
    }

    /// Eaten foods as a list, sorted for deterministic persistence.
    pub fn eaten_foods(&self) -> Vec<String> {
        let mut foods: Vec<String> = self.eaten.iter().cloned().collect();
        foods.sort_by(|a, b| food_key(a).cmp(&food_key(b)));
        foods
    }

    /// User-added foods in insertion order, as persisted.
    pub fn custom_foods(&self) -> &[String] {
        self.catalog.customs()
    }

    pub fn catalog(&self) -> &FoodCatalog {
        &self.catalog
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
        Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap()
    }

    fn tracker() -> TrackerState {
        TrackerState::new(start())
    }

    #[test]
    fn test_toggle_is_an_involution() {
        let mut state = tracker();

        assert!(state.toggle_eaten("Apple"));
        assert!(state.is_eaten("Apple"));
        assert_eq!(state.eaten_count(), 1);

        assert!(!state.toggle_eaten("Apple"));
        assert!(!state.is_eaten("Apple"));
        assert_eq!(state.eaten_count(), 0);
    }

    #[test]
    fn test_toggle_resolves_casing() {
        let mut state = tracker();

        state.toggle_eaten("apple");
        assert!(state.is_eaten("Apple"));
        assert_eq!(state.eaten_foods(), vec!["Apple".to_string()]);
    }

    #[test]
    fn test_toggle_unknown_food_is_a_no_op() {
        let mut state = tracker();

        assert!(!state.toggle_eaten("Durian"));
        assert_eq!(state.eaten_count(), 0);
        assert_eq!(state.catalog().len(), 35);
    }

    #[test]
    fn test_add_blank_is_ignored() {
        let mut state = tracker();

        assert_eq!(state.add_food(""), AddResult::Ignored);
        assert_eq!(state.add_food("   "), AddResult::Ignored);
        assert_eq!(state.eaten_count(), 0);
        assert_eq!(state.catalog().len(), 35);
    }

    #[test]
    fn test_add_new_food_creates_and_marks() {
        let mut state = tracker();

        assert_eq!(
            state.add_food("Kiwi"),
            AddResult::CreatedAndMarkedEaten("Kiwi".to_string())
        );
        assert_eq!(state.catalog().len(), 36);
        assert!(state.is_eaten("Kiwi"));

        // Sort invariant survives the insertion
        let sorted = state.sorted_catalog();
        for pair in sorted.windows(2) {
            assert!(food_key(&pair[0]) < food_key(&pair[1]));
        }
    }

    #[test]
    fn test_add_existing_food_keeps_catalog_spelling() {
        let mut state = tracker();

        assert_eq!(
            state.add_food("apple"),
            AddResult::AlreadyExistedNowMarked("Apple".to_string())
        );
        assert_eq!(state.catalog().len(), 35); // Catalog unchanged
        assert_eq!(state.eaten_foods(), vec!["Apple".to_string()]);
    }

    #[test]
    fn test_add_already_eaten_food_changes_nothing() {
        let mut state = tracker();
        state.toggle_eaten("Apple");

        assert_eq!(
            state.add_food("APPLE"),
            AddResult::AlreadyExistedAlreadyMarked("Apple".to_string())
        );
        assert_eq!(state.eaten_count(), 1);
        assert_eq!(state.catalog().len(), 35);
    }

    #[test]
    fn test_add_trims_input() {
        let mut state = tracker();

        assert_eq!(
            state.add_food("  Kiwi  "),
            AddResult::CreatedAndMarkedEaten("Kiwi".to_string())
        );
        assert_eq!(state.catalog().resolve("kiwi"), Some("Kiwi"));
    }

    #[test]
    fn test_progress_empty_and_complete() {
        let mut state = tracker();

        let progress = state.progress();
        assert_eq!(progress.count, 0);
        assert_eq!(progress.remaining, 30);
        assert_eq!(progress.message, "30 more unique items to reach your goal");

        for food in state.sorted_catalog().to_vec().iter().take(30) {
            state.toggle_eaten(food);
        }

        let progress = state.progress();
        assert_eq!(progress.count, 30);
        assert_eq!(progress.remaining, 0);
        assert_eq!(progress.message, "🎉 Congratulations! You've reached your goal!");
    }

    #[test]
    fn test_progress_remaining_never_negative() {
        let mut state = tracker();

        for food in state.sorted_catalog().to_vec() {
            state.toggle_eaten(&food);
        }

        assert_eq!(state.eaten_count(), 35);
        assert_eq!(state.progress().remaining, 0);
    }

    #[test]
    fn test_partition_preserves_order() {
        let mut state = tracker();
        state.toggle_eaten("Banana");
        state.toggle_eaten("Spinach");

        let partition = state.partition();
        assert_eq!(partition.eaten, vec!["Banana".to_string(), "Spinach".to_string()]);
        assert_eq!(
            partition.to_eat.len() + partition.eaten.len(),
            state.catalog().len()
        );

        // Each half is still in catalog order
        for half in [&partition.to_eat, &partition.eaten] {
            for pair in half.windows(2) {
                assert!(food_key(&pair[0]) < food_key(&pair[1]));
            }
        }

        // Disjoint
        for food in &partition.eaten {
            assert!(!partition.to_eat.contains(food));
        }
    }

    #[test]
    fn test_week_latch_and_reset() {
        let mut state = tracker();
        state.toggle_eaten("Apple");
        state.toggle_eaten("Kale");

        let before = start() + Duration::days(6);
        assert!(!state.evaluate_week(before).elapsed);
        assert!(!state.poll_week(before));

        let elapsed = start() + Duration::days(7);
        assert!(state.evaluate_week(elapsed).elapsed);
        assert!(state.poll_week(elapsed));
        assert!(state.report_due());

        // Second poll before the reset: no re-fire, nothing cleared
        assert!(!state.poll_week(elapsed + Duration::hours(1)));
        assert_eq!(state.eaten_count(), 2);

        let reset_at = elapsed + Duration::hours(2);
        state.reset_week(reset_at);
        assert_eq!(state.eaten_count(), 0);
        assert!(!state.report_due());
        assert_eq!(state.week_start(), reset_at);
        assert_eq!(state.catalog().len(), 35); // Catalog survives the reset
    }

    #[test]
    fn test_weekly_report_counts_customs() {
        let mut state = tracker();
        state.add_food("Kiwi");
        state.toggle_eaten("Kiwi"); // Un-eat it again

        let report = state.weekly_report();
        assert_eq!(report.eaten_count, 0);
        assert_eq!(report.goal, WEEKLY_GOAL);
        assert_eq!(report.custom_count, 1); // Known, even though not eaten
    }

    #[test]
    fn test_hydrate_restores_membership() {
        let state = TrackerState::hydrate(
            vec!["Kiwi".to_string()],
            vec!["apple".to_string(), "Kiwi".to_string(), "Durian".to_string()],
            start(),
        );

        // "apple" resolves to the catalog spelling, "Durian" is dropped
        assert_eq!(
            state.eaten_foods(),
            vec!["Apple".to_string(), "Kiwi".to_string()]
        );
        assert_eq!(state.catalog().len(), 36);
        assert_eq!(state.week_start(), start());
    }
}
