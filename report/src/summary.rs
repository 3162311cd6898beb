//! Text rendering of the grouped throughput chart, for the terminal.

use std::fmt::Write;

use throughput_chart::{GroupedBarLayout, THROUGHPUT_KEY};

/// Shown in place of the label of a run without parameters.
pub const NO_PARAMETERS: &str = "(no parameters)";

/// Number of cells of the longest bar.
const BAR_WIDTH: usize = 40;

/// Cells of a bar of `length` when the longest bar is `max`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cells(length: f64, max: f64) -> usize {
    if max <= 0.0 || length <= 0.0 {
        return 0;
    }
    ((length / max) * BAR_WIDTH as f64).round() as usize
}

/// Render every label with one bar per target, in label order.
pub fn render(chart: &GroupedBarLayout) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let (_, max) = chart.value_span();
    let name_width = chart.legend().map(|name| name.chars().count()).max().unwrap_or(0);
    let bar_width = BAR_WIDTH;

    writeln!(out, "{THROUGHPUT_KEY}")?;
    for (index, label) in chart.labels().iter().enumerate() {
        writeln!(out)?;
        if label.is_empty() {
            writeln!(out, "{NO_PARAMETERS}")?;
        }
        for line in label.lines() {
            writeln!(out, "{line}")?;
        }
        for group in chart.groups() {
            let bar = &group.bars[index];
            writeln!(
                out,
                "  {:<name_width$} |{:<bar_width$}| {}",
                group.target,
                "#".repeat(cells(bar.length, max)),
                bar.value_label().text,
            )?;
        }
    }
    Ok(out)
}
