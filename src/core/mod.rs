pub mod duration;
pub mod error;
pub mod models;
pub mod store;

use chrono::{Months, Utc};

use crate::core::duration::parse_offset;
use crate::core::error::{TodoError, TodoResult};
use crate::core::models::{SortKey, Task};

/// The ordered task collection; owns every mutation and the index contract.
///
/// Positions are 0-based, are the only addressing scheme, and shift left when
/// an earlier task is deleted. Order is insertion order until a sort runs;
/// a sort rewrites the stored order in place.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Appends a new task. With no offset (or an empty one) the deadline
    /// defaults to one calendar month out; otherwise it is now plus the
    /// parsed offset. A malformed offset aborts the add with nothing
    /// appended.
    pub fn add(&mut self, title: &str, offset: Option<&str>) -> TodoResult<&Task> {
        let now = Utc::now();
        let deadline = match offset {
            Some(spec) if !spec.is_empty() => {
                let offset = parse_offset(spec)?;
                now.checked_add_signed(offset)
                    .ok_or_else(|| TodoError::InvalidOffset(spec.to_string()))?
            }
            _ => now
                .checked_add_months(Months::new(1))
                .ok_or_else(|| TodoError::InvalidOffset("1 month".to_string()))?,
        };

        self.tasks.push(Task::new(title, deadline, now));
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Index check shared by every positional operation.
    pub fn validate_index(&self, index: i64) -> TodoResult<usize> {
        if index < 0 || index as usize >= self.tasks.len() {
            return Err(TodoError::InvalidIndex(index));
        }
        Ok(index as usize)
    }

    /// Removes the task at `index`, shifting later tasks one position left.
    pub fn delete(&mut self, index: i64) -> TodoResult<Task> {
        let i = self.validate_index(index)?;
        Ok(self.tasks.remove(i))
    }

    /// Flips completion. Completing stamps `completed_at`; reopening clears
    /// it, so the stamp always mirrors the current state.
    pub fn toggle(&mut self, index: i64) -> TodoResult<&Task> {
        let i = self.validate_index(index)?;
        let now = Utc::now();
        let task = &mut self.tasks[i];
        task.completed = !task.completed;
        task.completed_at = task.completed.then_some(now);
        Ok(&self.tasks[i])
    }

    /// Replaces the title at `index`; every other field is untouched.
    pub fn edit(&mut self, index: i64, title: &str) -> TodoResult<&Task> {
        let i = self.validate_index(index)?;
        self.tasks[i].title = title.to_string();
        Ok(&self.tasks[i])
    }

    /// Reorders the collection in place. `Vec::sort_by` is stable, and a
    /// reversed comparator still maps equal keys to `Equal`, so ties keep
    /// their prior relative order in both directions.
    pub fn sort(&mut self, criteria: &str, ascending: bool) -> TodoResult<()> {
        let key: SortKey = criteria.parse()?;
        match (key, ascending) {
            (SortKey::Title, true) => self.tasks.sort_by(|a, b| a.title.cmp(&b.title)),
            (SortKey::Title, false) => self.tasks.sort_by(|a, b| b.title.cmp(&a.title)),
            (SortKey::Deadline, true) => self.tasks.sort_by(|a, b| a.deadline.cmp(&b.deadline)),
            (SortKey::Deadline, false) => self.tasks.sort_by(|a, b| b.deadline.cmp(&a.deadline)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_list() -> TaskList {
        let mut list = TaskList::new();
        list.add("write report", None).unwrap();
        list.add("buy milk", Some("2h")).unwrap();
        list.add("call bank", Some("1d")).unwrap();
        list
    }

    fn titles(list: &TaskList) -> Vec<String> {
        list.tasks().iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn add_defaults_to_one_calendar_month_out() {
        let mut list = TaskList::new();
        list.add("Buy milk", None).unwrap();

        let task = &list.tasks()[0];
        let span = task.deadline - task.created_at;
        assert!(span >= Duration::days(28) && span <= Duration::days(31));
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn add_with_offset_is_relative_to_creation() {
        let mut list = TaskList::new();
        list.add("Buy milk", Some("2h")).unwrap();

        let task = &list.tasks()[0];
        assert_eq!(task.deadline - task.created_at, Duration::hours(2));
    }

    #[test]
    fn empty_offset_takes_the_default() {
        let mut list = TaskList::new();
        list.add("Buy milk", Some("")).unwrap();

        let task = &list.tasks()[0];
        assert!(task.deadline - task.created_at >= Duration::days(28));
    }

    #[test]
    fn tokenless_offset_means_deadline_now() {
        let mut list = TaskList::new();
        list.add("Buy milk", Some("soon")).unwrap();

        let task = &list.tasks()[0];
        assert_eq!(task.deadline, task.created_at);
    }

    #[test]
    fn bad_offset_aborts_the_add() {
        let mut list = sample_list();
        let before = list.len();

        let err = list.add("x", Some("99999999999999999999h")).unwrap_err();
        assert!(matches!(err, TodoError::InvalidOffset(_)));
        assert_eq!(list.len(), before);
    }

    #[test]
    fn toggle_stamps_then_clears_completed_at() {
        let mut list = sample_list();

        let toggled = list.toggle(1).unwrap();
        assert!(toggled.completed);
        assert!(toggled.completed_at.is_some());

        let back = list.toggle(1).unwrap();
        assert!(!back.completed);
        assert!(back.completed_at.is_none());
    }

    #[test]
    fn delete_shifts_later_tasks_left() {
        let mut list = sample_list();

        let removed = list.delete(1).unwrap();
        assert_eq!(removed.title, "buy milk");
        assert_eq!(titles(&list), ["write report", "call bank"]);
    }

    #[test]
    fn out_of_range_indexes_leave_the_list_unchanged() {
        let mut list = sample_list();
        let before = titles(&list);

        for index in [-1, list.len() as i64] {
            assert!(matches!(list.delete(index), Err(TodoError::InvalidIndex(_))));
            assert!(matches!(list.toggle(index), Err(TodoError::InvalidIndex(_))));
            assert!(matches!(
                list.edit(index, "new"),
                Err(TodoError::InvalidIndex(_))
            ));
        }

        assert_eq!(titles(&list), before);
    }

    #[test]
    fn edit_changes_only_the_title() {
        let mut list = sample_list();
        let original = list.tasks()[2].clone();

        list.edit(2, "call insurance").unwrap();

        let edited = &list.tasks()[2];
        assert_eq!(edited.title, "call insurance");
        assert_eq!(edited.deadline, original.deadline);
        assert_eq!(edited.created_at, original.created_at);
        assert_eq!(edited.completed, original.completed);
        assert_eq!(edited.completed_at, original.completed_at);
    }

    #[test]
    fn sort_by_title_descending_reverses_ascending() {
        let mut list = sample_list();

        list.sort("title", true).unwrap();
        assert_eq!(titles(&list), ["buy milk", "call bank", "write report"]);

        list.sort("title", false).unwrap();
        assert_eq!(titles(&list), ["write report", "call bank", "buy milk"]);
    }

    #[test]
    fn sort_by_deadline() {
        let mut list = sample_list();

        list.sort("deadline", true).unwrap();
        assert_eq!(titles(&list), ["buy milk", "call bank", "write report"]);
    }

    #[test]
    fn sort_is_stable_on_equal_keys() {
        let mut list = TaskList::new();
        list.add("dup", Some("1h")).unwrap();
        list.add("dup", Some("2h")).unwrap();
        list.add("aaa", Some("3h")).unwrap();

        list.sort("title", true).unwrap();

        let tasks = list.tasks();
        assert_eq!(tasks[0].title, "aaa");
        // The two "dup" entries keep their insertion order.
        assert!(tasks[1].deadline < tasks[2].deadline);
    }

    #[test]
    fn invalid_criteria_leaves_order_unchanged() {
        let mut list = sample_list();
        let before = titles(&list);

        assert!(matches!(
            list.sort("priority", true),
            Err(TodoError::InvalidCriteria(_))
        ));
        assert_eq!(titles(&list), before);
    }
}
