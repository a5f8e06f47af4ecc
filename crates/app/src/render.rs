//! Terminal rendering.
//!
//! Every function returns a `String`; callers decide where it goes. Styling
//! goes through `console`, so colors are dropped when stdout is not a terminal.

use std::sync::OnceLock;

use apitester_domain::{HistoryEntry, ResponseSpec, TestResults};
use console::{Alignment, Style, measure_text_width, pad_str, style};
use serde_json::Value;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;

/// Rows shown by `history`.
pub const HISTORY_ROWS: usize = 20;

const URL_WIDTH: usize = 50;
const BODY_TITLE: &str = "Response Body";
const THEME: &str = "base16-ocean.dark";

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

/// Green below 400, red otherwise.
fn status_style(status: u16) -> Style {
    if status < 400 {
        Style::new().green()
    } else {
        Style::new().red()
    }
}

/// Renders a response: status line, optional header table, body panel and timing.
#[must_use]
pub fn response(response: &ResponseSpec, show_headers: bool) -> String {
    let status = if response.status_text.is_empty() {
        format!("Status: {}", response.status)
    } else {
        format!("Status: {} {}", response.status, response.status_text)
    };

    let mut out = status_style(response.status).apply_to(status).to_string();
    out.push_str("\n\n");

    if show_headers {
        let rows: Vec<Vec<String>> = response
            .headers
            .iter()
            .map(|(name, value)| vec![name.clone(), value.clone()])
            .collect();
        out.push_str(&table(&["Header", "Value"], &rows));
        out.push_str("\n\n");
    }

    let body = response.json().map_or_else(
        |_| response.body_text().into_owned(),
        |json| highlight_json(&json, console::colors_enabled()),
    );
    out.push_str(&panel(BODY_TITLE, &body));
    out.push_str("\n\n");
    out.push_str(
        &style(format!("Time: {:.2}s", response.elapsed_secs()))
            .dim()
            .to_string(),
    );
    out
}

/// Renders test results followed by the overall verdict.
#[must_use]
pub fn test_results(results: &TestResults) -> String {
    let mut lines = vec![style("Running Tests:").bold().to_string()];
    lines.extend(assertion_lines(results, ""));
    lines.push(String::new());
    if results.all_passed() {
        lines.push(style("All tests passed!").green().bold().to_string());
    } else {
        lines.push(
            style(format!("{} test(s) failed!", results.failed_count()))
                .red()
                .bold()
                .to_string(),
        );
    }
    lines.join("\n")
}

/// One ✓ or ✗ line per assertion, passes first.
#[must_use]
pub fn assertion_lines(results: &TestResults, indent: &str) -> Vec<String> {
    let passed = results
        .passed()
        .into_iter()
        .map(|line| style(format!("{indent}✓ {line}")).green().to_string());
    let failed = results
        .failed()
        .into_iter()
        .map(|line| style(format!("{indent}✗ {line}")).red().to_string());
    passed.chain(failed).collect()
}

/// Time, method, truncated URL and colored status for each entry.
#[must_use]
pub fn history<'a>(entries: impl IntoIterator<Item = &'a HistoryEntry>) -> String {
    let rows: Vec<Vec<String>> = entries
        .into_iter()
        .map(|entry| {
            vec![
                entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                entry.method.to_string(),
                truncate_url(&entry.url),
                status_style(entry.status_code)
                    .apply_to(entry.status_code)
                    .to_string(),
            ]
        })
        .collect();
    table(&["Time", "Method", "URL", "Status"], &rows)
}

fn truncate_url(url: &str) -> String {
    if url.chars().count() > URL_WIDTH {
        let head: String = url.chars().take(URL_WIDTH).collect();
        format!("{head}...")
    } else {
        url.to_string()
    }
}

/// The `METHOD URL → status` line printed for each request of a run.
#[must_use]
pub fn run_line(method: impl std::fmt::Display, url: &str, status: u16) -> String {
    status_style(status)
        .apply_to(format!("  {method} {url} → {status}"))
        .to_string()
}

/// Draws a boxed table with bold magenta headers.
///
/// Cell widths are measured without ANSI codes so styled cells line up.
#[must_use]
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}", segments.join(mid))
    };
    let line = |cells: Vec<String>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!(" {} ", pad_str(cell, *width, Alignment::Left, None)))
            .collect();
        format!("│{}│", padded.join("│"))
    };

    let header_style = Style::new().magenta().bold();
    let mut out = vec![
        rule("┌", "┬", "┐"),
        line(
            headers
                .iter()
                .map(|h| header_style.apply_to(h).to_string())
                .collect(),
        ),
        rule("├", "┼", "┤"),
    ];
    out.extend(rows.iter().map(|row| line(row.clone())));
    out.push(rule("└", "┴", "┘"));
    out.join("\n")
}

/// Frames `content` in a rounded blue box with `title` in the top border.
#[must_use]
pub fn panel(title: &str, content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let inner = lines
        .iter()
        .map(|l| measure_text_width(l))
        .max()
        .unwrap_or(0)
        .max(measure_text_width(title) + 2);

    let border = Style::new().blue();
    let top_fill = "─".repeat(inner - measure_text_width(title) - 1);
    let mut out = vec![format!(
        "{}{}{}",
        border.apply_to("╭─ "),
        title,
        border.apply_to(format!(" {top_fill}╮"))
    )];
    for l in &lines {
        out.push(format!(
            "{} {} {}",
            border.apply_to("│"),
            pad_str(l, inner, Alignment::Left, None),
            border.apply_to("│")
        ));
    }
    out.push(border.apply_to(format!("╰{}╯", "─".repeat(inner + 2))).to_string());
    out.join("\n")
}

/// Pretty-prints JSON with two-space indentation, highlighted when `colored`.
#[must_use]
pub fn highlight_json(value: &Value, colored: bool) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    if colored {
        highlight(&pretty, "json")
    } else {
        pretty
    }
}

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme() -> Option<&'static Theme> {
    THEME_SET.get_or_init(ThemeSet::load_defaults).themes.get(THEME)
}

/// Highlights `text` line by line, resetting attributes at each line end so
/// the panel border keeps its own color. Unknown syntaxes come back unchanged.
fn highlight(text: &str, extension: &str) -> String {
    let syntaxes = syntax_set();
    let (Some(syntax), Some(theme)) = (syntaxes.find_syntax_by_extension(extension), theme())
    else {
        return text.to_string();
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();
    for line in text.lines() {
        let with_newline = format!("{line}\n");
        let Ok(ranges) = highlighter.highlight_line(&with_newline, syntaxes) else {
            return text.to_string();
        };
        let escaped = as_24_bit_terminal_escaped(&ranges, false);
        lines.push(format!("{}\x1b[0m", escaped.trim_end_matches('\n')));
    }
    lines.join("\n")
}
