use super::messages::Message;
use super::task::{DueStatus, Task, TaskFilter};
use crate::{msg_error, msg_info, msg_print};
use anyhow::Result;
use chrono::{DateTime, Utc};
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Prints the tasks visible under `filter`, or the matching empty-list hint.
    pub fn tasks(tasks: &[&Task], total: usize, filter: TaskFilter) -> Result<()> {
        if tasks.is_empty() {
            Self::empty(total, filter);
            return Ok(());
        }

        msg_print!(Message::TasksHeader(filter.to_string()), true);
        Self::table(tasks, Utc::now()).printstd();
        msg_print!(Message::TaskCountSummary {
            shown: tasks.len(),
            total,
        });

        Ok(())
    }

    /// Prints the current error message, if any.
    pub fn error(error: Option<&str>) {
        if let Some(error) = error {
            msg_error!(error);
        }
    }

    fn empty(total: usize, filter: TaskFilter) {
        if total == 0 || filter == TaskFilter::All {
            msg_info!(Message::NoTasksFound);
            msg_print!(Message::StartByAddingTask);
        } else {
            msg_info!(Message::NoFilteredTasks(filter.to_string()));
        }
    }

    pub fn table(tasks: &[&Task], now: DateTime<Utc>) -> Table {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "DESCRIPTION", "DUE", "STATUS", ""]);
        for task in tasks {
            let status = if task.completed { "done" } else { "active" };
            table.add_row(row![task.id, task.title, task.description, task.due_date_text(), status, Self::badge(task, now)]);
        }

        table
    }

    fn badge(task: &Task, now: DateTime<Utc>) -> String {
        match DueStatus::classify(task, now) {
            Some(due) if due.is_urgent() => format!("⏰ {}", due),
            Some(due) => due.to_string(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn task(id: &str, completed: bool, due_date: DateTime<Utc>) -> Task {
        Task {
            id: id.to_string(),
            user_id: "u1".to_string(),
            title: format!("Task {}", id),
            description: String::new(),
            completed,
            due_date,
            created_at: due_date,
        }
    }

    #[test]
    fn test_table_has_header_and_one_row_per_task() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let a = task("a", false, now - Duration::days(1));
        let b = task("b", true, now + Duration::days(4));

        let table = View::table(&[&a, &b], now);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_badge_marks_urgent_and_skips_completed() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        assert_eq!(View::badge(&task("a", false, now - Duration::hours(1)), now), "⏰ Overdue");
        assert_eq!(View::badge(&task("b", false, now + Duration::days(5)), now), "5 days left");
        assert_eq!(View::badge(&task("c", true, now - Duration::days(3)), now), "");
    }
}
