use std::io::{self, Write};

use engine_logging::engine_warn;
use pledge_core::AppViewModel;

use super::RenderSink;

const INDEX_WIDTH: usize = 6;
const PERCENT_WIDTH: usize = 18;
const AMOUNT_WIDTH: usize = 16;

/// Renders the table as plain text to any writer (stdout in the app).
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalRenderer<W> {
    #[cfg(test)]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_lines(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    fn render(&mut self, view: &AppViewModel) {
        if let Err(err) = self.write_lines(&render_lines(view)) {
            engine_warn!("Failed to draw table: {}", err);
        }
    }
}

pub fn render_lines(view: &AppViewModel) -> Vec<String> {
    let rule = "-".repeat(INDEX_WIDTH + PERCENT_WIDTH + AMOUNT_WIDTH + 6);
    let mut lines = vec![
        String::new(),
        format!(
            "{:>INDEX_WIDTH$} | {:>PERCENT_WIDTH$} | {:>AMOUNT_WIDTH$}",
            "S.No.", "Percentage funded", "Amount pledged"
        ),
        rule.clone(),
    ];

    match view.placeholder() {
        Some(text) => lines.push(format!("{text:^width$}", width = rule.len())),
        None => lines.extend(view.table.rows.iter().map(|row| {
            format!(
                "{:>INDEX_WIDTH$} | {:>PERCENT_WIDTH$} | {:>AMOUNT_WIDTH$}",
                row.display_index, row.percentage_funded, row.amount_pledged
            )
        })),
    }
    lines.push(rule);
    lines.push(footer(view));

    if let Some(error) = &view.page_error {
        lines.push(format!("! {error}"));
    }
    if let Some(notification) = &view.notification {
        lines.push(format!("* {}  [d] dismiss", notification.message));
    }
    lines
}

fn footer(view: &AppViewModel) -> String {
    let options = view
        .rows_per_page_options
        .iter()
        .map(|value| {
            if *value == view.table.rows_per_page {
                format!("[{value}]")
            } else {
                value.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let prev = if view.table.prev_enabled { "<" } else { " " };
    let next = if view.table.next_enabled { ">" } else { " " };
    format!(
        "Rows per page: {options}    {prev} Page [{}] {} {next}",
        view.page_input, view.table.page_label
    )
}
