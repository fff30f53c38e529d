//! Market data access: provider trait and implementations, universe, timeframes.

pub mod memory;
pub mod provider;
pub mod synthetic;
pub mod timeframe;
pub mod universe;
pub mod yahoo;

pub use memory::StaticProvider;
pub use provider::{DataError, DataProvider};
pub use synthetic::SyntheticProvider;
pub use timeframe::{Interval, LookbackPeriod, TimeFrameError};
pub use universe::{display_name, Universe};
pub use yahoo::YahooProvider;
