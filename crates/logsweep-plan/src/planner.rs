//! Partitioning candidates into archive groups.

use chrono::Datelike;
use indexmap::IndexMap;

use logsweep_core::{Candidate, Group, GroupKey};
use logsweep_scan::PatternSet;

use crate::cutoff::CutoffDate;

/// The planned groups for one run.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    /// Groups in iteration order: first-seen order for date mode, supplied
    /// pattern order for pattern mode. Pattern-mode groups may be empty;
    /// the runner reports those instead of archiving them.
    pub groups: Vec<Group>,
}

impl Plan {
    /// Groups with at least one member.
    pub fn eligible(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|g| g.is_eligible())
    }

    /// Number of eligible groups.
    pub fn eligible_count(&self) -> usize {
        self.eligible().count()
    }

    /// Total members across all groups.
    pub fn total_members(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }
}

/// Partitions candidates into groups under the active grouping mode.
#[derive(Debug, Default)]
pub struct GroupPlanner;

impl GroupPlanner {
    /// Create a new planner.
    pub fn new() -> Self {
        Self
    }

    /// Group dated candidates by calendar month.
    ///
    /// Group iteration order is the order in which each month was first
    /// seen. Candidates dated after the cutoff are excluded from
    /// membership entirely; a month whose every candidate is too new simply
    /// never forms a group. Candidates without an embedded date never reach
    /// this planner (the classifier already excluded them).
    pub fn plan_by_month(&self, candidates: Vec<Candidate>, cutoff: Option<CutoffDate>) -> Plan {
        let mut buckets: IndexMap<GroupKey, Vec<Candidate>> = IndexMap::new();
        let mut excluded = 0usize;

        for candidate in candidates {
            let Some(date) = candidate.date else {
                continue;
            };
            if let Some(cutoff) = &cutoff {
                if !cutoff.includes(date) {
                    excluded += 1;
                    continue;
                }
            }
            let key = GroupKey::month(date.year(), date.month());
            buckets.entry(key).or_default().push(candidate);
        }

        if excluded > 0 {
            tracing::debug!(excluded, "candidates newer than the cutoff were left alone");
        }

        Plan {
            groups: buckets
                .into_iter()
                .map(|(key, members)| Group { key, members })
                .collect(),
        }
    }

    /// Group candidates by user pattern, in supplied pattern order.
    ///
    /// Overlaps resolve first-match-wins: the first pattern that matches a
    /// file claims it, and later patterns never see it. Patterns that match
    /// nothing still produce their (empty) group so the runner can report
    /// them explicitly.
    pub fn plan_by_pattern(&self, candidates: Vec<Candidate>, patterns: &PatternSet) -> Plan {
        let mut groups: Vec<Group> = patterns
            .patterns()
            .iter()
            .map(|p| Group::new(p.key.clone()))
            .collect();

        for candidate in candidates {
            let claimed = patterns
                .patterns()
                .iter()
                .position(|p| p.is_match(candidate.name.as_str()));
            if let Some(index) = claimed {
                groups[index].members.push(candidate);
            }
        }

        Plan { groups }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::time::SystemTime;

    fn dated(name: &str, y: i32, m: u32, d: u32) -> Candidate {
        Candidate::dated(
            format!("/logs/{name}"),
            name,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            SystemTime::now(),
            16,
        )
    }

    fn undated(name: &str) -> Candidate {
        Candidate::undated(format!("/logs/{name}"), name, SystemTime::now(), 16)
    }

    #[test]
    fn test_month_grouping_partitions_all_candidates() {
        let candidates = vec![
            dated("2024_01_05_a.log", 2024, 1, 5),
            dated("2024_01_09_b.log", 2024, 1, 9),
            dated("2024_02_01_c.log", 2024, 2, 1),
        ];

        let plan = GroupPlanner::new().plan_by_month(candidates, None);

        assert_eq!(plan.groups.len(), 2);
        assert_eq!(plan.groups[0].key.as_str(), "2024-01");
        assert_eq!(plan.groups[0].len(), 2);
        assert_eq!(plan.groups[1].key.as_str(), "2024-02");
        assert_eq!(plan.groups[1].len(), 1);
        assert_eq!(plan.total_members(), 3);
    }

    #[test]
    fn test_month_grouping_preserves_first_seen_order() {
        let candidates = vec![
            dated("2024_03_01.log", 2024, 3, 1),
            dated("2024_01_01.log", 2024, 1, 1),
            dated("2024_03_02.log", 2024, 3, 2),
        ];

        let plan = GroupPlanner::new().plan_by_month(candidates, None);
        let keys: Vec<&str> = plan.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["2024-03", "2024-01"]);
    }

    #[test]
    fn test_cutoff_excludes_members_not_flags_them() {
        let cutoff = CutoffDate::absolute(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        let candidates = vec![
            dated("2024_01_05.log", 2024, 1, 5),
            dated("2024_02_01.log", 2024, 2, 1),
        ];

        let plan = GroupPlanner::new().plan_by_month(candidates, Some(cutoff));

        assert_eq!(plan.groups.len(), 1);
        assert_eq!(plan.groups[0].key.as_str(), "2024-01");
        assert_eq!(plan.total_members(), 1);
    }

    #[test]
    fn test_first_match_wins_on_overlapping_patterns() {
        let patterns =
            PatternSet::compile(&["2024_08*".to_string(), "2024_08_01*".to_string()]).unwrap();
        let candidates = vec![undated("2024_08_01_server.log")];

        let plan = GroupPlanner::new().plan_by_pattern(candidates, &patterns);

        assert_eq!(plan.groups[0].len(), 1);
        assert_eq!(plan.groups[1].len(), 0);
    }

    #[test]
    fn test_pattern_order_decides_the_winner() {
        let patterns =
            PatternSet::compile(&["2024_08_01*".to_string(), "2024_08*".to_string()]).unwrap();
        let candidates = vec![undated("2024_08_01_server.log"), undated("2024_08_02.log")];

        let plan = GroupPlanner::new().plan_by_pattern(candidates, &patterns);

        assert_eq!(plan.groups[0].key.as_str(), "2024_08_01");
        assert_eq!(plan.groups[0].len(), 1);
        assert_eq!(plan.groups[1].key.as_str(), "2024_08");
        assert_eq!(plan.groups[1].len(), 1);
    }

    #[test]
    fn test_unmatched_pattern_yields_empty_group() {
        let patterns = PatternSet::compile(&["foo*".to_string(), "bar*".to_string()]).unwrap();
        let candidates = vec![undated("foo_1.log")];

        let plan = GroupPlanner::new().plan_by_pattern(candidates, &patterns);

        assert_eq!(plan.groups.len(), 2);
        assert!(plan.groups[0].is_eligible());
        assert!(!plan.groups[1].is_eligible());
        assert_eq!(plan.eligible_count(), 1);
    }

    #[test]
    fn test_empty_plan_is_a_valid_outcome() {
        let plan = GroupPlanner::new().plan_by_month(Vec::new(), None);
        assert!(plan.groups.is_empty());
        assert_eq!(plan.eligible_count(), 0);
    }
}
