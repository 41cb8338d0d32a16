//! The `dashboard` command: greeting, quote of the day, totals, the expense breakdown, the weekly
//! study chart, todo progress and the most recent records.

use crate::aggregate::DashboardSummary;
use crate::args::DashboardArgs;
use crate::commands::list::{expense_line, study_session_line, todo_line};
use crate::commands::{session, Out};
use crate::motivation::{first_name, greeting, Quote};
use crate::store::{Collections, Mode};
use crate::tracker::Tracker;
use crate::{utils, Config, Result};
use chrono::{Local, NaiveDateTime, Timelike};
use serde::Serialize;
use std::fmt::Write;

/// How many of each kind of record the "recent" panels show.
const RECENT: usize = 4;
const BAR_WIDTH: usize = 20;

/// Everything shown on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub greeting: String,
    pub now: NaiveDateTime,
    pub quote: Quote,
    pub summary: DashboardSummary,
    pub recent: Collections,
}

impl Dashboard {
    pub fn new(
        tracker: &Tracker,
        display_name: Option<&str>,
        now: NaiveDateTime,
        quote: Quote,
    ) -> Self {
        let data = tracker.data();
        Self {
            greeting: format!("{}, {}!", greeting(now.hour()), first_name(display_name)),
            now,
            quote,
            summary: tracker.summary(),
            recent: Collections {
                expenses: data.expenses.iter().take(RECENT).cloned().collect(),
                study_sessions: data.study_sessions.iter().take(RECENT).cloned().collect(),
                todos: data.todos.iter().take(RECENT).cloned().collect(),
            },
        }
    }

    /// The dashboard as plain text.
    pub fn render(&self) -> String {
        let s = &self.summary;
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.greeting);
        let _ = writeln!(out, "{}", self.now.format("%A, %B %-d, %Y"));
        let _ = writeln!(out, "\"{}\"", self.quote.text);

        let _ = writeln!(out);
        let _ = writeln!(out, "Total expenses:   {}", utils::fmt_money(s.total_expenses));
        let _ = writeln!(
            out,
            "Study hours:      {}",
            utils::fmt_hours(s.total_study_hours)
        );
        let _ = writeln!(
            out,
            "Todos completed:  {} of {} ({}%)",
            s.todos.completed,
            s.todos.total,
            s.todos.display_percent()
        );
        let _ = writeln!(
            out,
            "                  {}",
            bar(s.todos.progress_percent(), 100.0)
        );

        let _ = writeln!(out);
        let _ = writeln!(out, "Expenses by category");
        if s.expense_breakdown.is_empty() {
            let _ = writeln!(out, "  No expenses yet");
        }
        let name_width = s
            .expense_breakdown
            .iter()
            .map(|t| t.name.chars().count())
            .max()
            .unwrap_or(0);
        for total in &s.expense_breakdown {
            let _ = writeln!(
                out,
                "  {:<name_width$}  {:>12}  {}",
                total.name,
                utils::fmt_money(total.value),
                total.color
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Study hours by weekday");
        let max = s
            .weekly_study
            .iter()
            .map(|d| d.hours)
            .filter(|h| h.is_finite())
            .fold(0.0, f64::max);
        for day in &s.weekly_study {
            let _ = writeln!(
                out,
                "  {}  {}  {}",
                day.day,
                bar(day.hours, max),
                utils::fmt_hours(day.hours)
            );
        }

        section(&mut out, "Recent expenses", &self.recent.expenses, expense_line);
        section(
            &mut out,
            "Recent study sessions",
            &self.recent.study_sessions,
            study_session_line,
        );
        section(&mut out, "Recent todos", &self.recent.todos, todo_line);
        out.trim_end().to_string()
    }
}

fn section<R>(out: &mut String, title: &str, records: &[R], line: fn(&R) -> String) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    if records.is_empty() {
        let _ = writeln!(out, "  Nothing yet");
    }
    for record in records {
        let _ = writeln!(out, "  {}", line(record));
    }
}

/// A fixed-width text bar filled in proportion to `value / max`.
fn bar(value: f64, max: f64) -> String {
    let filled = if value.is_finite() && max > 0.0 {
        ((value / max).clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    format!(
        "[{}{}]",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled)
    )
}

/// Loads the owner's records and renders the dashboard. Without a seed the quote is random.
pub async fn dashboard(config: Config, mode: Mode, args: DashboardArgs) -> Result<Out<Dashboard>> {
    let tracker = session(&config, mode).await?;
    let quote = match args.seed() {
        Some(seed) => Quote::draw(seed),
        None => Quote::random(),
    };
    let dashboard = Dashboard::new(
        &tracker,
        config.display_name(),
        Local::now().naive_local(),
        quote,
    );
    Ok(Out::new(dashboard.render(), dashboard))
}
