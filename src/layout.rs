//! Geometry of a horizontal grouped bar chart.
//!
//! Every label owns one position on the category axis. Targets are added one
//! at a time; the `n`-th target added draws its bars at `position + n *
//! band_height`, so the bars of one label form a stack of adjacent bands:
//!
//! ```text
//! label 1 ┤████████████  target 0
//!         ┤██████        target 1
//!         ┤█████████     target 2
//!
//! label 0 ┤███████       target 0
//!         ┤████████████  target 1
//!         ┤████          target 2
//! ```
//!
//! The layout only computes coordinates; drawing them is left to a renderer.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use indexmap::IndexSet;
use tracing::debug;

use crate::collector::TargetSeries;
use crate::errors::Error;

/// Spacing and band sizes of the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Base distance between two label positions; the whole axis spans
    /// `labels * spacing`.
    pub spacing: f64,
    /// Thickness of a single bar.
    pub band_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: 0.1,
            band_height: 0.025,
        }
    }
}

impl LayoutConfig {
    /// Create a configuration from explicit sizes.
    #[must_use]
    pub const fn new(spacing: f64, band_height: f64) -> Self {
        Self {
            spacing,
            band_height,
        }
    }

    /// Widen the spacing so that `targets` bands fit within one label step.
    ///
    /// With the default sizes only four targets fit before the bands of one
    /// label run into the next label.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fit_targets(self, targets: usize) -> Self {
        let needed = self.band_height * targets as f64;
        Self {
            spacing: self.spacing.max(needed),
            ..self
        }
    }
}

/// Evenly spaced positions from `0` to `count * spacing`, both ends included.
///
/// A single label sits at `0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn label_positions(count: usize, spacing: f64) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let stop = count as f64 * spacing;
            let step = stop / (count - 1) as f64;
            (0..count).map(|i| i as f64 * step).collect()
        }
    }
}

/// A single horizontal bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Index of the label this bar belongs to.
    pub label_index: usize,
    /// Centre of the bar on the category axis.
    pub offset: f64,
    /// Extent of the bar along the value axis, starting from zero.
    pub length: f64,
    /// Thickness of the bar on the category axis.
    pub thickness: f64,
    /// The throughput the bar represents.
    pub value: i64,
}

impl Bar {
    /// Corners of the bar as `((value_min, offset_min), (value_max, offset_max))`.
    #[must_use]
    pub fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let half = self.thickness / 2.0;
        (
            (self.length.min(0.0), self.offset - half),
            (self.length.max(0.0), self.offset + half),
        )
    }

    /// Geometric centre of the bar as `(value, offset)`.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.length / 2.0, self.offset)
    }

    /// Text annotation showing the bar's value at its centre.
    #[must_use]
    pub fn value_label(&self) -> ValueLabel {
        let (x, y) = self.center();
        ValueLabel {
            x,
            y,
            text: format!("{:.2}", self.length),
        }
    }
}

/// Value text anchored inside a bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueLabel {
    /// Anchor on the value axis.
    pub x: f64,
    /// Anchor on the category axis.
    pub y: f64,
    /// Value formatted with two decimals.
    pub text: String,
}

/// All bars of one target.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    /// Target name, shown in the legend.
    pub target: String,
    /// Order in which the target was added to the layout.
    pub target_index: usize,
    /// One bar per label, in label order.
    pub bars: Vec<Bar>,
}

impl BarGroup {
    /// Value annotations for every bar of the group.
    #[must_use]
    pub fn autolabel(&self) -> Vec<ValueLabel> {
        self.bars.iter().map(Bar::value_label).collect()
    }
}

/// Layout session adding one target at a time.
#[derive(Debug, Clone)]
pub struct GroupedBarLayout {
    config: LayoutConfig,
    labels: Vec<String>,
    positions: Vec<f64>,
    legend: IndexSet<String, hashbrown::DefaultHashBuilder>,
    groups: Vec<BarGroup>,
}

impl GroupedBarLayout {
    /// Start a layout for the given labels.
    #[must_use]
    pub fn new(labels: Vec<String>, config: LayoutConfig) -> Self {
        let positions = label_positions(labels.len(), config.spacing);
        Self {
            config,
            labels,
            positions,
            legend: IndexSet::default(),
            groups: Vec::new(),
        }
    }

    /// Add the bars of one target.
    ///
    /// `values[i]` is drawn against label `i`. A failed call leaves the
    /// layout untouched.
    ///
    /// # Errors
    ///
    /// * [`Error::DuplicateTarget`] if `target` was already added.
    /// * [`Error::ValueCountMismatch`] if there is not exactly one value per
    ///   label.
    #[allow(clippy::cast_precision_loss)]
    pub fn add_target(&mut self, target: &str, values: &[i64]) -> Result<&BarGroup, Error> {
        if self.legend.contains(target) {
            return Err(Error::DuplicateTarget(target.into()));
        }
        if values.len() != self.labels.len() {
            return Err(Error::ValueCountMismatch {
                target: target.into(),
                labels: self.labels.len(),
                values: values.len(),
            });
        }

        let target_index = self.groups.len();
        let shift = target_index as f64 * self.config.band_height;
        let bars = self
            .positions
            .iter()
            .zip(values)
            .enumerate()
            .map(|(label_index, (&position, &value))| Bar {
                label_index,
                offset: position + shift,
                length: value as f64,
                thickness: self.config.band_height,
                value,
            })
            .collect();

        debug!(id = target, target_index, "target added to layout");
        self.legend.insert(target.into());
        self.groups.push(BarGroup {
            target: target.into(),
            target_index,
            bars,
        });
        Ok(&self.groups[target_index])
    }

    /// The configuration the layout was built with.
    #[must_use]
    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    /// Labels in axis order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Position of every label on the category axis.
    #[must_use]
    pub fn label_positions(&self) -> &[f64] {
        &self.positions
    }

    /// Target names in the order they were added.
    pub fn legend(&self) -> impl Iterator<Item = &str> {
        self.legend.iter().map(String::as_str)
    }

    /// Number of targets added so far; also the index of the next target.
    #[must_use]
    pub fn target_count(&self) -> usize {
        self.groups.len()
    }

    /// Bar groups in the order they were added.
    #[must_use]
    pub fn groups(&self) -> &[BarGroup] {
        &self.groups
    }

    /// Range covered on the value axis, always including zero.
    #[must_use]
    pub fn value_span(&self) -> (f64, f64) {
        self.bars()
            .fold((0.0f64, 0.0f64), |(lo, hi), bar| {
                (lo.min(bar.length), hi.max(bar.length))
            })
    }

    /// Range covered by the bars on the category axis, `None` without bars.
    #[must_use]
    pub fn offset_span(&self) -> Option<(f64, f64)> {
        self.bars().fold(None, |span, bar| {
            let ((_, lo), (_, hi)) = bar.bounds();
            Some(match span {
                None => (lo, hi),
                Some((min, max)) => (lo.min(min), hi.max(max)),
            })
        })
    }

    fn bars(&self) -> impl Iterator<Item = &Bar> {
        self.groups.iter().flat_map(|group| group.bars.iter())
    }
}

/// Lay out the targets of `series` in `target_order`.
///
/// # Errors
///
/// * [`Error::UnknownTarget`] if a name in `target_order` has no series.
/// * Any error of [`GroupedBarLayout::add_target`].
pub fn layout<'a, I>(
    labels: &[String],
    series: &TargetSeries,
    target_order: I,
    config: LayoutConfig,
) -> Result<GroupedBarLayout, Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut layout = GroupedBarLayout::new(labels.to_vec(), config);
    for target in target_order {
        let values = series
            .get(target)
            .ok_or_else(|| Error::UnknownTarget(target.into()))?;
        layout.add_target(target, values)?;
    }
    Ok(layout)
}
