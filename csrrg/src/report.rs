//! Summary of a decode.

use std::fmt;

/// Tally of malformed data that was tolerated instead of rejected.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Anomalies {
    /// Tokens that were not valid integers and were read leniently.
    pub coerced_tokens: usize,

    /// Header indices outside `0..num_cols` that were dropped.
    pub dropped_indices: usize,

    /// Matrix rows that ran out of index tokens before their count.
    pub short_rows: usize,

    /// Sections whose index line ran out of tokens before its last group.
    pub short_groups: usize,

    /// Negative counts produced by decreasing offsets.
    pub negative_counts: usize,

    /// Whether the final header offset differs from the number of indices.
    pub total_mismatch: bool,
}

impl Anomalies {
    /// Returns the number of tolerated anomalies.
    pub const fn total(&self) -> usize {
        self.coerced_tokens
            + self.dropped_indices
            + self.short_rows
            + self.short_groups
            + self.negative_counts
            + self.total_mismatch as usize
    }

    /// Checks if nothing was tolerated.
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Outcome of a successful decode.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DecodeReport {
    /// Nominal maximum row width from the first header line.
    pub max_row_width: i64,

    /// Number of matrix rows.
    pub num_rows: usize,

    /// Number of matrix columns.
    pub num_cols: usize,

    /// Final cumulative value of the header offsets.
    pub declared_indices: i64,

    /// Number of complete sections decoded.
    pub num_sections: usize,

    /// Number of edges emitted.
    pub num_edges: usize,

    /// Whether the input ended with an index line lacking its pointer line.
    pub incomplete_section: bool,

    /// Tolerated malformed data.
    pub anomalies: Anomalies,
}

impl DecodeReport {
    /// Checks if the input was decoded without any anomaly or dangling section.
    pub const fn is_clean(&self) -> bool {
        !self.incomplete_section && self.anomalies.is_empty()
    }
}

impl fmt::Display for DecodeReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "matrix: {} x {}", self.num_rows, self.num_cols)?;
        writeln!(f, "sections: {}", self.num_sections)?;
        writeln!(f, "edges: {}", self.num_edges)?;
        if self.incomplete_section {
            writeln!(f, "incomplete section: yes")?;
        }
        write!(f, "anomalies: {}", self.anomalies.total())?;
        if !self.anomalies.is_empty() {
            let a = &self.anomalies;
            write!(
                f,
                " (coerced={}, dropped={}, short_rows={}, short_groups={}, negative={}, total_mismatch={})",
                a.coerced_tokens,
                a.dropped_indices,
                a.short_rows,
                a.short_groups,
                a.negative_counts,
                a.total_mismatch,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_report() {
        let report = DecodeReport::default();
        assert!(report.is_clean());
        assert_eq!(
            "matrix: 0 x 0\nsections: 0\nedges: 0\nanomalies: 0",
            report.to_string()
        );
    }

    #[test]
    fn test_anomalies_total() {
        let anomalies = Anomalies {
            coerced_tokens: 2,
            short_rows: 1,
            total_mismatch: true,
            ..Default::default()
        };
        assert_eq!(4, anomalies.total());
        let report = DecodeReport {
            anomalies,
            ..Default::default()
        };
        assert!(!report.is_clean());
    }
}
