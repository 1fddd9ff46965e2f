// 📊 Weekly Report - fixed-threshold progress tiers
//
// Percentage of goal, bucketed: ≥100 achieved, ≥75 great, ≥50 good,
// everything below is a start.

// ============================================================================
// REPORT TIER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTier {
    Achieved,
    Great,
    Good,
    Start,
}

impl ReportTier {
    /// Bucket a percentage of the weekly goal.
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            ReportTier::Achieved
        } else if percentage >= 75.0 {
            ReportTier::Great
        } else if percentage >= 50.0 {
            ReportTier::Good
        } else {
            ReportTier::Start
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportTier::Achieved => "achieved",
            ReportTier::Great => "great",
            ReportTier::Good => "good",
            ReportTier::Start => "start",
        }
    }

    /// The one fixed message each tier maps to.
    pub fn message(&self) -> &'static str {
        match self {
            ReportTier::Achieved => {
                "Amazing job! You've achieved your goal of 30 different fruits and vegetables!"
            }
            ReportTier::Great => {
                "Great effort! You're well on your way to a varied, healthy diet!"
            }
            ReportTier::Good => "Good progress! Keep exploring new fruits and vegetables!",
            ReportTier::Start => {
                "You've made a start! Next week, try to add more variety to your diet!"
            }
        }
    }
}

// ============================================================================
// REPORT VIEW
// ============================================================================

/// Everything the weekly report shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub eaten_count: usize,
    pub goal: usize,
    pub percentage: f64,
    pub tier: ReportTier,

    /// Custom foods currently known, whether eaten or not.
    pub custom_count: usize,
}

impl ReportView {
    pub fn new(eaten_count: usize, goal: usize, custom_count: usize) -> Self {
        let percentage = eaten_count as f64 / goal as f64 * 100.0;

        ReportView {
            eaten_count,
            goal,
            percentage,
            tier: ReportTier::for_percentage(percentage),
            custom_count,
        }
    }

    pub fn message(&self) -> &'static str {
        self.tier.message()
    }

    pub fn summary(&self) -> String {
        format!(
            "You ate {} different fruits and vegetables this week.",
            self.eaten_count
        )
    }

    /// Extra line shown only when the user has added their own foods.
    pub fn custom_note(&self) -> Option<String> {
        if self.custom_count > 0 {
            Some(format!(
                "Including {} custom items you've added",
                self.custom_count
            ))
        } else {
            None
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        // Against a goal of 30
        assert_eq!(ReportView::new(0, 30, 0).tier, ReportTier::Start);
        assert_eq!(ReportView::new(14, 30, 0).tier, ReportTier::Start); // ~46.7%
        assert_eq!(ReportView::new(15, 30, 0).tier, ReportTier::Good); // 50%
        assert_eq!(ReportView::new(22, 30, 0).tier, ReportTier::Good); // ~73.3%, under 75
        assert_eq!(ReportView::new(23, 30, 0).tier, ReportTier::Great); // ~76.7%
        assert_eq!(ReportView::new(29, 30, 0).tier, ReportTier::Great); // ~96.7%
        assert_eq!(ReportView::new(30, 30, 0).tier, ReportTier::Achieved);
        assert_eq!(ReportView::new(35, 30, 0).tier, ReportTier::Achieved); // Over 100%
    }

    #[test]
    fn test_tier_messages_are_distinct() {
        let tiers = [
            ReportTier::Achieved,
            ReportTier::Great,
            ReportTier::Good,
            ReportTier::Start,
        ];

        for (i, a) in tiers.iter().enumerate() {
            for b in tiers.iter().skip(i + 1) {
                assert_ne!(a.message(), b.message());
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }

    #[test]
    fn test_report_summary() {
        let report = ReportView::new(12, 30, 0);

        assert_eq!(
            report.summary(),
            "You ate 12 different fruits and vegetables this week."
        );
        assert_eq!(report.message(), ReportTier::Start.message());
    }

    #[test]
    fn test_custom_note() {
        assert_eq!(ReportView::new(5, 30, 0).custom_note(), None);
        assert_eq!(
            ReportView::new(5, 30, 3).custom_note(),
            Some("Including 3 custom items you've added".to_string())
        );
    }
}
