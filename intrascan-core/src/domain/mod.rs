//! Domain types: bars, validated series, directional labels.

pub mod bar;
pub mod labels;

pub use bar::{Bar, BarSeries, SeriesError};
pub use labels::{Bias, MarketTrend, StructureLabel};
