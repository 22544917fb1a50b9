//! 提交关联：按学生的提交记录计算每个作业的完成状态

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::models::assignments::entities::{Assignment, ProgressStatus};
use crate::models::assignments::responses::ProgressStats;
use crate::models::submissions::entities::{Submission, SubmissionStatus};
use crate::models::{AssignmentId, UserId};

/// 学生在一组可见作业上的完成情况
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressReport {
    statuses: HashMap<AssignmentId, ProgressStatus>,
    stats: ProgressStats,
}

impl ProgressReport {
    pub fn status_of(&self, id: &AssignmentId) -> Option<ProgressStatus> {
        self.statuses.get(id).copied()
    }

    pub fn stats(&self) -> ProgressStats {
        self.stats
    }
}

/// 关联作业与提交
///
/// 只统计属于 `student` 的提交；指向不可见作业的提交被忽略。
/// 已提交但未批改的作业归为 Pending。
pub fn correlate(
    student: &UserId,
    assignments: &[Assignment],
    submissions: &[Submission],
    now: DateTime<Utc>,
) -> ProgressReport {
    let mut graded: HashSet<&AssignmentId> = HashSet::new();
    let mut submitted: HashSet<&AssignmentId> = HashSet::new();

    for submission in submissions.iter().filter(|s| &s.student_id == student) {
        submitted.insert(&submission.assignment_id);
        if submission.status == SubmissionStatus::Graded {
            graded.insert(&submission.assignment_id);
        }
    }

    let mut statuses = HashMap::with_capacity(assignments.len());
    let mut completed = 0;
    let mut overdue = 0;

    for assignment in assignments {
        let status = if graded.contains(&assignment.id) {
            completed += 1;
            ProgressStatus::Completed
        } else if !submitted.contains(&assignment.id) && assignment.deadline < now {
            overdue += 1;
            ProgressStatus::Overdue
        } else {
            ProgressStatus::Pending
        };
        statuses.insert(assignment.id.clone(), status);
    }

    ProgressReport {
        stats: ProgressStats::new(statuses.len() as i64, completed, overdue),
        statuses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::entities::Role;
    use crate::policies::fixtures::{assignment, now, principal, submission};
    use chrono::Duration;

    #[test]
    fn test_graded_and_missed() {
        let teacher = principal(Role::Teacher);
        let student = principal(Role::Student);
        let a1 = assignment(&teacher.subject, "A1", now() + Duration::days(3));
        let a2 = assignment(&teacher.subject, "A2", now() - Duration::days(1));
        let subs = vec![submission(&a1.id, &student.subject, SubmissionStatus::Graded)];

        let report = correlate(&student.subject, &[a1.clone(), a2.clone()], &subs, now());

        assert_eq!(report.stats(), ProgressStats::new(2, 1, 1));
        assert_eq!(report.stats().pending(), 0);
        assert_eq!(report.status_of(&a1.id), Some(ProgressStatus::Completed));
        assert_eq!(report.status_of(&a2.id), Some(ProgressStatus::Overdue));
    }

    #[test]
    fn test_submitted_but_ungraded_is_pending() {
        let teacher = principal(Role::Teacher);
        let student = principal(Role::Student);
        let past = assignment(&teacher.subject, "Past", now() - Duration::days(2));
        let future = assignment(&teacher.subject, "Future", now() + Duration::days(2));
        let subs = vec![
            submission(&past.id, &student.subject, SubmissionStatus::Submitted),
            submission(&future.id, &student.subject, SubmissionStatus::Submitted),
        ];

        let report = correlate(&student.subject, &[past.clone(), future.clone()], &subs, now());

        assert_eq!(report.status_of(&past.id), Some(ProgressStatus::Pending));
        assert_eq!(report.status_of(&future.id), Some(ProgressStatus::Pending));
        assert_eq!(report.stats(), ProgressStats::new(2, 0, 0));
        assert_eq!(report.stats().pending(), 2);
    }

    #[test]
    fn test_other_students_submissions_ignored() {
        let teacher = principal(Role::Teacher);
        let student = principal(Role::Student);
        let other = principal(Role::Student);
        let a = assignment(&teacher.subject, "A", now() - Duration::hours(1));
        let subs = vec![submission(&a.id, &other.subject, SubmissionStatus::Graded)];

        let report = correlate(&student.subject, &[a.clone()], &subs, now());
        assert_eq!(report.status_of(&a.id), Some(ProgressStatus::Overdue));
    }

    #[test]
    fn test_dangling_submission_ignored() {
        let teacher = principal(Role::Teacher);
        let student = principal(Role::Student);
        let a = assignment(&teacher.subject, "A", now() + Duration::days(1));
        let subs = vec![submission(
            &AssignmentId::generate(),
            &student.subject,
            SubmissionStatus::Graded,
        )];

        let report = correlate(&student.subject, &[a], &subs, now());
        assert_eq!(report.stats(), ProgressStats::new(1, 0, 0));
    }

    #[test]
    fn test_ids_match_across_representations() {
        let teacher = principal(Role::Teacher);
        let student = principal(Role::Student);
        let a = assignment(&teacher.subject, "A", now() - Duration::days(1));
        let upper = a.id.as_str().to_uppercase();
        let same_id = AssignmentId::parse(&upper).unwrap();
        let subs = vec![submission(&same_id, &student.subject, SubmissionStatus::Graded)];

        let report = correlate(&student.subject, &[a.clone()], &subs, now());
        assert_eq!(report.status_of(&a.id), Some(ProgressStatus::Completed));
    }

    #[test]
    fn test_pending_invariant_holds() {
        let teacher = principal(Role::Teacher);
        let student = principal(Role::Student);
        let mut assignments = Vec::new();
        let mut subs = Vec::new();
        for i in -5..5i64 {
            let a = assignment(&teacher.subject, "A", now() + Duration::days(i));
            match i.rem_euclid(3) {
                0 => subs.push(submission(&a.id, &student.subject, SubmissionStatus::Graded)),
                1 => subs.push(submission(&a.id, &student.subject, SubmissionStatus::Submitted)),
                _ => {}
            }
            assignments.push(a);
        }

        let stats = correlate(&student.subject, &assignments, &subs, now()).stats();
        assert_eq!(stats.total(), 10);
        assert_eq!(
            stats.pending(),
            stats.total() - stats.completed() - stats.overdue()
        );
    }

    #[test]
    fn test_empty_inputs() {
        let student = principal(Role::Student);
        let report = correlate(&student.subject, &[], &[], now());
        assert_eq!(report.stats(), ProgressStats::default());
    }
}
