//! Table rendering for task listings.
//!
//! Presentation glue over the repository's output: a manually laid-out
//! table with category coloring. Rendering returns a `String` so tests can
//! assert on it without capturing stdout.

use colored::Colorize;

use crate::config::Config;
use crate::task::{Status, Task};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const HEADERS: [&str; 6] = ["#", "Task", "Category", "Status", "Added", "Completed"];
const GUTTER: &str = "   ";

/// Category filter parsed from the `show` argument.
///
/// With no filter, archived tasks are hidden. A filter is a comma-separated
/// list of category names matched case-insensitively; the literal `archive`
/// reveals archived tasks (their category is `ARCHIVE`). A category nothing
/// matches simply yields zero rows.
#[derive(Debug, Clone, Default)]
pub struct ShowFilter {
    categories: Vec<String>,
}

impl ShowFilter {
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let categories = raw
            .map(|value| {
                value
                    .split(',')
                    .map(|c| c.trim().to_lowercase())
                    .filter(|c| !c.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self { categories }
    }

    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if self.categories.is_empty() {
            return task.status != Status::Archived;
        }
        self.categories.contains(&task.category.to_lowercase())
    }
}

/// Render the visible tasks as a table.
///
/// Row numbers are the task's absolute position plus one — exactly what the
/// user feeds back into mutation commands. Hidden rows (archived tasks are
/// not always last once new tasks follow them) leave gaps in the numbering
/// rather than shifting it onto the wrong task.
#[must_use]
pub fn render(tasks: &[Task], filter: &ShowFilter, config: &Config) -> String {
    let visible: Vec<&Task> = tasks.iter().filter(|t| filter.matches(t)).collect();

    let rows: Vec<[String; 6]> = visible
        .iter()
        .map(|task| {
            [
                (task.position + 1).to_string(),
                task.description.clone(),
                task.category.clone(),
                task.status.label().to_string(),
                task.created_at.format(TIME_FORMAT).to_string(),
                task.completed_at
                    .map_or_else(|| "Not-Done".to_string(), |t| t.format(TIME_FORMAT).to_string()),
            ]
        })
        .collect();

    let mut widths: [usize; 6] = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let rule_len = widths.iter().sum::<usize>() + GUTTER.len() * (widths.len() - 1);

    let mut out = String::new();
    out.push_str(&format!("\n{}\n", "Task Tracker".bold()));
    out.push_str(&format!("{}\n", "─".repeat(rule_len)));

    let header = HEADERS
        .iter()
        .zip(widths)
        .map(|(title, width)| format!("{title:<width$}"))
        .collect::<Vec<_>>()
        .join(GUTTER);
    out.push_str(&format!("{}\n", header.yellow().bold()));
    out.push_str(&format!("{}\n", "─".repeat(rule_len)));

    if visible.is_empty() {
        out.push_str("No tasks to show\n");
        return out;
    }

    for (task, row) in visible.iter().zip(&rows) {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(col, (cell, width))| {
                let padded = format!("{cell:<width$}");
                if col == 2 {
                    padded.color(config.color_for(&task.category)).to_string()
                } else {
                    padded
                }
            })
            .collect();
        out.push_str(&format!("{}\n", cells.join(GUTTER).trim_end()));
    }

    if visible.iter().all(|t| t.status == Status::Completed) {
        out.push_str(&format!("\n{}\n", "Nice! All tasks completed!".green().bold()));
    }

    out
}
