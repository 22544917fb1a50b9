//! 作业筛选
//!
//! 谓词只有三种：全文、科目、状态类别，按“与”组合。空文本或空科目
//! 视为不筛选。组合结果与谓词顺序无关。

use chrono::{DateTime, Utc};

use crate::models::assignments::entities::{
    Assignment, DeadlineStatus, ProgressStatus, StatusCategory,
};
use crate::policies::correlator::ProgressReport;
use crate::policies::deadline::DeadlineWindow;
use crate::policies::status::classify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// 标题、描述、科目的子串匹配（不区分大小写），存储小写形式
    Text(String),
    /// 科目精确匹配
    Subject(String),
    Category(StatusCategory),
}

impl Predicate {
    fn matches(&self, assignment: &Assignment, ctx: &FilterContext<'_>) -> bool {
        match self {
            Predicate::Text(needle) => {
                assignment.title.to_lowercase().contains(needle)
                    || assignment.description.to_lowercase().contains(needle)
                    || assignment.subject.to_lowercase().contains(needle)
            }
            Predicate::Subject(subject) => &assignment.subject == subject,
            Predicate::Category(category) => category_matches(*category, assignment, ctx),
        }
    }
}

fn category_matches(
    category: StatusCategory,
    assignment: &Assignment,
    ctx: &FilterContext<'_>,
) -> bool {
    let progress = |expected: ProgressStatus| {
        ctx.progress
            .and_then(|report| report.status_of(&assignment.id))
            .is_some_and(|status| status == expected)
    };

    match category {
        StatusCategory::Active => assignment.deadline > ctx.now,
        StatusCategory::Expired => assignment.deadline <= ctx.now,
        StatusCategory::Upcoming => DeadlineWindow::UPCOMING.contains(assignment.deadline, ctx.now),
        StatusCategory::DueToday => {
            classify(assignment.deadline, ctx.now) == DeadlineStatus::DueToday
        }
        StatusCategory::DueSoon => classify(assignment.deadline, ctx.now) == DeadlineStatus::DueSoon,
        StatusCategory::Completed => progress(ProgressStatus::Completed),
        StatusCategory::Pending => progress(ProgressStatus::Pending),
        StatusCategory::Overdue => progress(ProgressStatus::Overdue),
    }
}

/// 筛选时的上下文
///
/// 依赖完成状态的类别需要 `progress`，缺失时这些类别不匹配任何作业。
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub now: DateTime<Utc>,
    pub progress: Option<&'a ProgressReport>,
}

/// 谓词的合取
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentFilter {
    predicates: Vec<Predicate>,
}

impl AssignmentFilter {
    /// 不筛选
    pub fn all() -> Self {
        Self::default()
    }

    pub fn text(mut self, query: &str) -> Self {
        let query = query.trim();
        if !query.is_empty() {
            self.predicates.push(Predicate::Text(query.to_lowercase()));
        }
        self
    }

    pub fn subject(mut self, subject: &str) -> Self {
        let subject = subject.trim();
        if !subject.is_empty() {
            self.predicates.push(Predicate::Subject(subject.to_string()));
        }
        self
    }

    pub fn category(mut self, category: StatusCategory) -> Self {
        self.predicates.push(Predicate::Category(category));
        self
    }

    /// 合并两个筛选条件
    pub fn and(mut self, other: AssignmentFilter) -> Self {
        self.predicates.extend(other.predicates);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn requires_progress(&self) -> bool {
        self.predicates
            .iter()
            .any(|p| matches!(p, Predicate::Category(c) if c.requires_progress()))
    }

    pub fn matches(&self, assignment: &Assignment, ctx: &FilterContext<'_>) -> bool {
        self.predicates.iter().all(|p| p.matches(assignment, ctx))
    }

    /// 保持输入顺序返回满足全部谓词的作业
    pub fn apply(&self, assignments: Vec<Assignment>, ctx: &FilterContext<'_>) -> Vec<Assignment> {
        if self.is_empty() {
            return assignments;
        }
        assignments
            .into_iter()
            .filter(|a| self.matches(a, ctx))
            .collect()
    }
}
