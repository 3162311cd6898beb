#![doc = include_str!("../README.md")]
#![no_std]
#![deny(clippy::mod_module_files)]

extern crate alloc;

pub mod collector;
pub mod errors;
pub mod layout;
pub mod record;

pub use collector::{Collection, LabelRegistry, RecordCollector, TargetSeries, collect};
pub use layout::{
    Bar, BarGroup, GroupedBarLayout, LayoutConfig, ValueLabel, label_positions, layout,
};
pub use record::{Record, RecordError, TARGET_KEY, THROUGHPUT_KEY, parse_fields};

// Re-export errors
pub use errors::Error;
