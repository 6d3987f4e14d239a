//! Decoding of cumulative offset lists.

use tracing::debug;

use crate::config::{DecoderConfig, ParseMode};
use crate::errors::{CsrrgError, Result};
use crate::reader::RawLine;
use crate::report::Anomalies;

const INITIAL_CAPACITY: usize = 15;

/// Per-bucket counts derived from a cumulative offset list.
///
/// `counts[i] = offsets[i + 1] - offsets[i]`, so a list of `N` offsets gives
/// `N - 1` counts. The first offset is a baseline and produces no count.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CountTable {
    counts: Vec<i64>,
    base: i64,
    total: i64,
}

impl CountTable {
    /// Builds the table from decoded offsets.
    ///
    /// The buffer starts with room for 15 counts and doubles whenever it is
    /// full.
    ///
    /// # Errors
    ///
    /// [`CsrrgError::TryReserve`] is returned when the buffer cannot grow.
    pub fn from_offsets(offsets: &[i64]) -> Result<Self> {
        let mut counts = Vec::new();
        counts.try_reserve_exact(INITIAL_CAPACITY)?;
        for pair in offsets.windows(2) {
            if counts.len() == counts.capacity() {
                counts.try_reserve_exact(counts.capacity())?;
            }
            counts.push(pair[1].wrapping_sub(pair[0]));
        }
        Ok(Self {
            counts,
            base: offsets.first().copied().unwrap_or(0),
            total: offsets.last().copied().unwrap_or(0),
        })
    }

    /// Tokenizes an offset line and builds the table.
    ///
    /// In strict mode a decreasing offset is rejected; in lenient mode the
    /// resulting negative counts are kept and tallied.
    pub(crate) fn parse(
        raw: &RawLine,
        config: &DecoderConfig,
        anomalies: &mut Anomalies,
    ) -> Result<Self> {
        let line = raw.number;
        let offsets = config.parse_line(raw, anomalies)?;
        let table = Self::from_offsets(&offsets)?;
        let negative = table.counts.iter().filter(|&&c| c < 0).count();
        if negative != 0 {
            if config.get_mode() == ParseMode::Strict {
                return Err(CsrrgError::invalid_token(
                    line,
                    raw.text.as_str(),
                    "offsets must be non-decreasing",
                ));
            }
            debug!(line, negative, "decreasing offsets");
            anomalies.negative_counts += negative;
        }
        Ok(table)
    }

    /// Returns the number of counts.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Checks if the table holds no count.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the counts.
    #[inline(always)]
    pub fn counts(&self) -> &[i64] {
        &self.counts
    }

    /// Returns the first offset of the list, or 0 if the list was empty.
    #[inline(always)]
    pub const fn base(&self) -> i64 {
        self.base
    }

    /// Returns the last offset of the list, or 0 if the list was empty.
    #[inline(always)]
    pub const fn total(&self) -> i64 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_counts() {
        let table = CountTable::from_offsets(&[0, 2, 4]).unwrap();
        assert_eq!(&[2, 2], table.counts());
        assert_eq!(0, table.base());
        assert_eq!(4, table.total());
    }

    #[test]
    fn test_single_offset() {
        let table = CountTable::from_offsets(&[7]).unwrap();
        assert!(table.is_empty());
        assert_eq!(7, table.total());
    }

    #[test]
    fn test_empty() {
        let table = CountTable::from_offsets(&[]).unwrap();
        assert!(table.is_empty());
        assert_eq!(0, table.total());
    }

    #[test]
    fn test_growth_beyond_initial_capacity() {
        let offsets: Vec<i64> = (0..100).map(|i| i * 3).collect();
        let table = CountTable::from_offsets(&offsets).unwrap();
        assert_eq!(99, table.len());
        assert!(table.counts().iter().all(|&c| c == 3));
    }

    #[test]
    fn test_parse_lenient_decreasing() {
        let config = DecoderConfig::new();
        let mut anomalies = Anomalies::default();
        let raw = RawLine::new(3, "0;3;1;4");
        let table = CountTable::parse(&raw, &config, &mut anomalies).unwrap();
        assert_eq!(&[3, -2, 3], table.counts());
        assert_eq!(1, anomalies.negative_counts);
    }

    #[test]
    fn test_parse_strict_decreasing() {
        let config = DecoderConfig::new().mode(ParseMode::Strict);
        let mut anomalies = Anomalies::default();
        let raw = RawLine::new(3, "0;3;1;4");
        let result = CountTable::parse(&raw, &config, &mut anomalies);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_lenient_non_numeric() {
        let config = DecoderConfig::new();
        let mut anomalies = Anomalies::default();
        let raw = RawLine::new(3, "0;x;4");
        let table = CountTable::parse(&raw, &config, &mut anomalies).unwrap();
        assert_eq!(&[0, 4], table.counts());
        assert_eq!(1, anomalies.coerced_tokens);
    }

    proptest! {
        #[test]
        fn prop_counts_of_non_decreasing_offsets(
            start in 0i64..1000,
            steps in proptest::collection::vec(0i64..50, 0..64),
        ) {
            let mut offsets = vec![start];
            for step in &steps {
                let last = *offsets.last().unwrap();
                offsets.push(last + step);
            }
            let table = CountTable::from_offsets(&offsets).unwrap();
            prop_assert_eq!(offsets.len() - 1, table.len());
            prop_assert!(table.counts().iter().all(|&c| c >= 0));
            prop_assert_eq!(
                offsets[offsets.len() - 1] - offsets[0],
                table.counts().iter().sum::<i64>()
            );
        }
    }
}
