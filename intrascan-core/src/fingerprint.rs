//! Dataset fingerprinting: deterministic identification of the bars a scan saw.
//!
//! Two scans with the same `DatasetHash` and the same configuration produce
//! identical rankings. The hash covers symbols, timestamps, and the exact bit
//! patterns of every price and volume, in the order the series are supplied.

use crate::domain::BarSeries;
use serde::{Deserialize, Serialize};
use std::fmt;

/// BLAKE3 hex digest over a set of bar series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetHash(pub String);

impl DatasetHash {
    /// Hash `series` in the order given.
    pub fn of<'a, I>(series: I) -> Self
    where
        I: IntoIterator<Item = &'a BarSeries>,
    {
        let mut hasher = blake3::Hasher::new();
        for s in series {
            hasher.update(s.symbol().as_bytes());
            hasher.update(&[0u8]);
            hasher.update(&(s.len() as u64).to_le_bytes());
            for bar in s.bars() {
                hasher.update(&bar.timestamp.and_utc().timestamp().to_le_bytes());
                for price in [bar.open, bar.high, bar.low, bar.close] {
                    hasher.update(&price.to_bits().to_le_bytes());
                }
                hasher.update(&bar.volume.to_le_bytes());
            }
        }
        Self(hasher.finalize().to_hex().to_string())
    }

    /// First 12 hex characters, for log lines.
    pub fn short(&self) -> &str {
        let end = self.0.len().min(12);
        &self.0[..end]
    }
}

impl fmt::Display for DatasetHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
