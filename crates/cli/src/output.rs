//! Table and JSON rendering for command output.

use std::fmt::Display;

use anyhow::Result;
use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;
use serde_json::Value;

/// Widest a column may grow before its cells are truncated.
const MAX_COLUMN_WIDTH: usize = 60;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count()).min(MAX_COLUMN_WIDTH);
                }
            }
        }
        widths
    }

    fn render_line(cells: &[String], widths: &[usize]) -> String {
        let line = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!("{:<w$}", truncate(cell, w))
            })
            .collect::<Vec<_>>()
            .join("  ");
        line.trim_end().to_string()
    }

    /// Header, rule and rows, one line each.
    pub fn render(&self) -> Vec<String> {
        let widths = self.widths();
        let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(Self::render_line(&self.headers, &widths));
        lines.push("-".repeat(total));
        lines.extend(self.rows.iter().map(|row| Self::render_line(row, &widths)));
        lines
    }

    pub fn print(&self) {
        let mut lines = self.render().into_iter();
        if let Some(header) = lines.next() {
            println!("{}", style(header).bold());
        }
        for line in lines {
            println!("{line}");
        }
    }
}

fn truncate(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        return cell.to_string();
    }
    let mut out: String = cell.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn or_dash<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}

pub fn date_time(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".into())
}

/// Cell text for an arbitrary JSON value: strings without quotes, null as empty.
pub fn json_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
