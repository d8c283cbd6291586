//! Completion-weighted progress aggregation across a project's phases.

use crate::phase::PhaseStatus;
use crate::types::Date;

/// The slice of a phase row that progress math reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseSnapshot {
    pub status: PhaseStatus,
    /// 0-100; only meaningful while `status` is `InProgress`.
    pub completion: i16,
}

impl PhaseSnapshot {
    pub fn new(status: PhaseStatus, completion: i16) -> Self {
        Self { status, completion }
    }

    /// This phase's contribution to overall progress: completed phases count
    /// as 100 and pending ones as 0 regardless of any stored completion.
    fn contribution(self) -> i64 {
        match self.status {
            PhaseStatus::Completed => 100,
            PhaseStatus::InProgress => i64::from(self.completion.clamp(0, 100)),
            PhaseStatus::Pending => 0,
        }
    }
}

/// Overall project completion percentage: the rounded mean of per-phase
/// contributions. An empty phase list is 0 (never a division by zero).
pub fn project_progress(phases: &[PhaseSnapshot]) -> u8 {
    if phases.is_empty() {
        return 0;
    }
    let sum: i64 = phases.iter().map(|p| p.contribution()).sum();
    let len = phases.len() as i64;
    // Round half up, matching the portal's displayed figure.
    ((sum * 2 + len) / (2 * len)) as u8
}

/// Counts of phases by status, for dashboard summary tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct PhaseStatusCounts {
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
}

pub fn phase_status_counts(phases: &[PhaseSnapshot]) -> PhaseStatusCounts {
    let mut counts = PhaseStatusCounts::default();
    for phase in phases {
        match phase.status {
            PhaseStatus::Completed => counts.completed += 1,
            PhaseStatus::InProgress => counts.in_progress += 1,
            PhaseStatus::Pending => counts.pending += 1,
        }
    }
    counts
}

/// The phase a project is currently in, `None`-safe against an index that
/// has drifted out of bounds (e.g. after phases were reconfigured).
pub fn current_phase<T>(phases: &[T], current_phase_index: i32) -> Option<&T> {
    usize::try_from(current_phase_index)
        .ok()
        .and_then(|idx| phases.get(idx))
}

/// Signed whole days from `today` until `deadline`; negative means overdue
/// by that many days.
pub fn days_until_deadline(deadline: Date, today: Date) -> i64 {
    (deadline - today).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(status: PhaseStatus, completion: i16) -> PhaseSnapshot {
        PhaseSnapshot::new(status, completion)
    }

    #[test]
    fn empty_phase_list_is_zero() {
        assert_eq!(project_progress(&[]), 0);
    }

    #[test]
    fn all_completed_is_one_hundred() {
        let phases = vec![snap(PhaseStatus::Completed, 0); 5];
        assert_eq!(project_progress(&phases), 100);
    }

    #[test]
    fn all_pending_is_zero() {
        let phases = vec![snap(PhaseStatus::Pending, 0); 3];
        assert_eq!(project_progress(&phases), 0);
    }

    #[test]
    fn mixed_statuses_weight_by_completion() {
        // round((100 + 50 + 0) / 3) = 50
        let phases = [
            snap(PhaseStatus::Completed, 0),
            snap(PhaseStatus::InProgress, 50),
            snap(PhaseStatus::Pending, 0),
        ];
        assert_eq!(project_progress(&phases), 50);
    }

    #[test]
    fn pending_completion_value_is_ignored() {
        // A leftover completion figure on a pending phase contributes nothing.
        let phases = [snap(PhaseStatus::Pending, 80)];
        assert_eq!(project_progress(&phases), 0);
    }

    #[test]
    fn completed_phase_ignores_stored_completion() {
        let phases = [snap(PhaseStatus::Completed, 10)];
        assert_eq!(project_progress(&phases), 100);
    }

    #[test]
    fn result_rounds_to_nearest() {
        // (100 + 0 + 0) / 3 = 33.33 -> 33
        let phases = [
            snap(PhaseStatus::Completed, 0),
            snap(PhaseStatus::Pending, 0),
            snap(PhaseStatus::Pending, 0),
        ];
        assert_eq!(project_progress(&phases), 33);

        // (100 + 100 + 0) / 3 = 66.67 -> 67
        let phases = [
            snap(PhaseStatus::Completed, 0),
            snap(PhaseStatus::Completed, 0),
            snap(PhaseStatus::Pending, 0),
        ];
        assert_eq!(project_progress(&phases), 67);
    }

    #[test]
    fn progress_is_monotonic_in_completion() {
        let mut last = 0;
        for completion in 0..=100 {
            let phases = [
                snap(PhaseStatus::InProgress, completion),
                snap(PhaseStatus::Pending, 0),
            ];
            let progress = project_progress(&phases);
            assert!(progress >= last, "dropped at completion={completion}");
            last = progress;
        }
    }

    #[test]
    fn progress_is_monotonic_in_status_advancement() {
        let base = [snap(PhaseStatus::Pending, 0), snap(PhaseStatus::Pending, 0)];
        let started = [snap(PhaseStatus::InProgress, 40), snap(PhaseStatus::Pending, 0)];
        let done = [snap(PhaseStatus::Completed, 40), snap(PhaseStatus::Pending, 0)];
        assert!(project_progress(&base) <= project_progress(&started));
        assert!(project_progress(&started) <= project_progress(&done));
    }

    #[test]
    fn out_of_range_completion_is_clamped() {
        let phases = [snap(PhaseStatus::InProgress, 150)];
        assert_eq!(project_progress(&phases), 100);
        let phases = [snap(PhaseStatus::InProgress, -5)];
        assert_eq!(project_progress(&phases), 0);
    }

    #[test]
    fn status_counts_tally_each_bucket() {
        let phases = [
            snap(PhaseStatus::Completed, 0),
            snap(PhaseStatus::Completed, 0),
            snap(PhaseStatus::InProgress, 50),
            snap(PhaseStatus::Pending, 0),
        ];
        let counts = phase_status_counts(&phases);
        assert_eq!(counts.completed, 2);
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.pending, 1);
    }

    #[test]
    fn current_phase_is_index_safe() {
        let phases = ["a", "b", "c"];
        assert_eq!(current_phase(&phases, 1), Some(&"b"));
        assert_eq!(current_phase(&phases, 3), None);
        assert_eq!(current_phase(&phases, -1), None);
        assert_eq!(current_phase::<&str>(&[], 0), None);
    }

    #[test]
    fn deadline_math_signs() {
        let today = Date::from_ymd_opt(2026, 3, 10).unwrap();
        let next_week = Date::from_ymd_opt(2026, 3, 17).unwrap();
        let last_week = Date::from_ymd_opt(2026, 3, 3).unwrap();
        assert_eq!(days_until_deadline(next_week, today), 7);
        assert_eq!(days_until_deadline(last_week, today), -7);
        assert_eq!(days_until_deadline(today, today), 0);
    }
}
