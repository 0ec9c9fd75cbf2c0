//! Table rendering for the `list` and `sort` commands.

use chrono::{DateTime, Duration, Utc};

use crate::core::models::Task;

/// Column set for the task table; identical for every render.
pub const HEADERS: [&str; 7] = [
    "#",
    "Title",
    "Deadline",
    "Completed",
    "Created At",
    "Completed At",
    "Until Deadline",
];

/// Builds one 7-field row per task, in collection order. `now` is sampled
/// once by the caller so every row sees the same clock.
pub fn task_rows(tasks: &[Task], now: DateTime<Utc>) -> Vec<[String; 7]> {
    tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            [
                index.to_string(),
                task.title.clone(),
                format_timestamp(task.deadline),
                if task.completed { "✓" } else { "✗" }.to_string(),
                format_timestamp(task.created_at),
                task.completed_at.map(format_timestamp).unwrap_or_default(),
                format_remaining(task.time_until_deadline(now)),
            ]
        })
        .collect()
}

/// Prints the header and every task as an aligned table. An empty collection
/// still gets its header.
pub fn print_table(tasks: &[Task]) {
    let rows = task_rows(tasks, Utc::now());

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    println!("{}", render_line(&header, &widths));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("{}", render_line(&rule, &widths));
    for row in &rows {
        println!("{}", render_line(row, &widths));
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    padded.join("  ").trim_end().to_string()
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// `{days}d {hours}h {minutes}m`, decomposed from the magnitude with a
/// leading `-` once the deadline has passed.
pub fn format_remaining(remaining: Duration) -> String {
    let sign = if remaining < Duration::zero() { "-" } else { "" };
    let total_minutes = remaining.num_minutes().abs();
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;
    format!("{sign}{days}d {hours}h {minutes}m")
}
