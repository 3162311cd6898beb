//! Image rendering of the grouped throughput chart.
//!
//! Draws the bars computed by [`GroupedBarLayout`] with `plotters`: one colour
//! per target, the value printed in white at the centre of each bar, and the
//! parameter combinations as multi-line tick labels on the category axis.
//! Output paths ending in `.svg` get a vector image, anything else a raster
//! image encoded after the extension (PNG by default).

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use throughput_chart::{GroupedBarLayout, THROUGHPUT_KEY};

use crate::error::ReportError;
use crate::summary::NO_PARAMETERS;

// ---------------------------------------------------------------------------
// Palette, 7 distinguishable colors (loosely based on ColorBrewer Set1)
// ---------------------------------------------------------------------------

const PALETTE: [RGBColor; 7] = [
    RGBColor(52, 152, 219),  // blue
    RGBColor(230, 160, 0),   // amber
    RGBColor(46, 204, 113),  // emerald
    RGBColor(231, 76, 60),   // red
    RGBColor(155, 89, 182),  // amethyst
    RGBColor(26, 188, 156),  // turquoise
    RGBColor(44, 62, 80),    // dark slate
];

/// Pixel distance between two lines of a tick label.
const LINE_HEIGHT: i32 = 14;

/// Approximate pixel width of one tick label character.
const CHAR_WIDTH: usize = 7;

pub const DEFAULT_TITLE: &str = "Throughput per target";

fn target_color(target_index: usize) -> RGBColor {
    PALETTE[target_index % PALETTE.len()]
}

// ---------------------------------------------------------------------------
// X-axis label formatter (human-readable K / M suffixes)
// ---------------------------------------------------------------------------

fn x_fmt(x: &f64) -> String {
    let v = x.abs();
    let sign = if *x < 0.0 { "-" } else { "" };
    if v >= 1_000_000.0 {
        format!("{sign}{:.1}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("{sign}{:.0}K", v / 1_000.0)
    } else {
        format!("{sign}{:.0}", v)
    }
}

// ---------------------------------------------------------------------------
// Sizing
// ---------------------------------------------------------------------------

/// Canvas size fitting every bar and every tick label line.
pub fn canvas_size(chart: &GroupedBarLayout) -> (u32, u32) {
    let bars = chart.labels().len() * chart.target_count().max(1);
    let lines: usize = chart
        .labels()
        .iter()
        .map(|label| label.lines().count().max(1))
        .sum();
    let rows = u32::try_from(bars.max(lines)).unwrap_or(u32::MAX / 32);
    (1000, rows.saturating_mul(22).saturating_add(160).max(480))
}

fn label_area_width(chart: &GroupedBarLayout) -> u32 {
    let longest = chart
        .labels()
        .iter()
        .flat_map(|label| label.lines())
        .map(|line| line.chars().count())
        .chain(
            chart
                .labels()
                .iter()
                .any(String::is_empty)
                .then(|| NO_PARAMETERS.len()),
        )
        .max()
        .unwrap_or(0);
    u32::try_from(longest * CHAR_WIDTH + 24)
        .unwrap_or(u32::MAX)
        .clamp(60, 360)
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Draw the chart on any `plotters` drawing area.
pub fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &GroupedBarLayout,
    title: &str,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let (x_lo, x_hi) = chart.value_span();
    let x_range = (x_lo * 1.05)..(x_hi * 1.05).max(1.0);
    let pad = chart.config().band_height;
    let (y_lo, y_hi) = chart.offset_span().unwrap_or((0.0, pad));

    let mut ctx = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 18))
        .margin(14)
        .x_label_area_size(44)
        .y_label_area_size(label_area_width(chart))
        .build_cartesian_2d(x_range.clone(), (y_lo - pad)..(y_hi + pad))?;

    ctx.configure_mesh()
        .disable_y_mesh()
        .y_labels(0)
        .x_desc(THROUGHPUT_KEY)
        .x_label_formatter(&x_fmt)
        .draw()?;

    let value_style = ("sans-serif", 11)
        .into_font()
        .color(&WHITE)
        .pos(Pos::new(HPos::Center, VPos::Center));

    for group in chart.groups() {
        let color = target_color(group.target_index);
        ctx.draw_series(group.bars.iter().map(|bar| {
            let ((x0, y0), (x1, y1)) = bar.bounds();
            Rectangle::new([(x0, y0), (x1, y1)], color.filled())
        }))?
        .label(group.target.as_str())
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));

        ctx.draw_series(
            group
                .autolabel()
                .into_iter()
                .map(|value| Text::new(value.text, (value.x, value.y), value_style.clone())),
        )?;
    }

    // Tick labels: one text line per parameter, right-aligned against the axis.
    let tick_style = ("sans-serif", 12)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Right, VPos::Center));
    for (label, &position) in chart.labels().iter().zip(chart.label_positions()) {
        let (x, y) = ctx.backend_coord(&(x_range.start, position));
        let lines: Vec<&str> = if label.is_empty() {
            vec![NO_PARAMETERS]
        } else {
            label.lines().collect()
        };
        let first = y - (LINE_HEIGHT * (i32::try_from(lines.len()).unwrap_or(1) - 1)) / 2;
        for (line, y) in lines.iter().zip((first..).step_by(LINE_HEIGHT as usize)) {
            root.draw(&Text::new(*line, (x - 8, y), tick_style.clone()))?;
        }
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .margin(12)
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK.mix(0.3))
        .label_font(("sans-serif", 13))
        .draw()?;

    Ok(())
}

/// Returns `true` if `output` asks for a vector image.
fn is_svg(output: &Path) -> bool {
    output
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Draw the chart and save it to `output`, SVG or raster after the extension.
pub fn render_to_file(
    chart: &GroupedBarLayout,
    output: &Path,
    title: &str,
) -> Result<(), ReportError> {
    let draw_error = |message: String| ReportError::Draw {
        path: output.to_path_buf(),
        message,
    };
    let size = canvas_size(chart);

    if is_svg(output) {
        let root = SVGBackend::new(output, size).into_drawing_area();
        draw(&root, chart, title).map_err(|e| draw_error(e.to_string()))?;
        root.present().map_err(|e| draw_error(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output, size).into_drawing_area();
        draw(&root, chart, title).map_err(|e| draw_error(e.to_string()))?;
        root.present().map_err(|e| draw_error(e.to_string()))?;
    }
    Ok(())
}
