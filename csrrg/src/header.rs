//! The three header lines and the matrix built from them.

use std::io::BufRead;

use tracing::debug;

use crate::config::DecoderConfig;
use crate::errors::{CsrrgError, Result};
use crate::matrix::AdjacencyMatrix;
use crate::offset::CountTable;
use crate::reader::LineReader;
use crate::report::Anomalies;

const NUM_HEADER_LINES: usize = 3;

/// Decoded header of a CSRRG file.
///
/// ```text
/// line 1: nominal maximum row width
/// line 2: column indices of all rows, concatenated
/// line 3: cumulative offsets delimiting the rows in line 2
/// ```
#[derive(Clone, Debug)]
pub struct Header {
    max_row_width: i64,
    indices: Vec<i64>,
    row_counts: CountTable,
}

impl Header {
    /// Reads the first three non-blank lines.
    ///
    /// # Errors
    ///
    /// [`CsrrgError::InsufficientHeader`] is returned when the input ends
    /// earlier.
    pub(crate) fn read<R>(
        lines: &mut LineReader<R>,
        config: &DecoderConfig,
        anomalies: &mut Anomalies,
    ) -> Result<Self>
    where
        R: BufRead,
    {
        let mut raw = Vec::with_capacity(NUM_HEADER_LINES);
        while raw.len() < NUM_HEADER_LINES {
            match lines.next_non_blank()? {
                Some(line) => raw.push(line),
                None => return Err(CsrrgError::insufficient_header(raw.len())),
            }
        }
        let max_row_width = config.parse_value(&raw[0], anomalies)?;
        let indices = config.parse_line(&raw[1], anomalies)?;
        let row_counts = CountTable::parse(&raw[2], config, anomalies)?;

        if usize::try_from(row_counts.total()).ok() != Some(indices.len()) {
            debug!(
                declared = row_counts.total(),
                found = indices.len(),
                "header offsets do not match the number of indices"
            );
            anomalies.total_mismatch = true;
        }

        Ok(Self {
            max_row_width,
            indices,
            row_counts,
        })
    }

    /// Returns the nominal maximum row width.
    pub const fn max_row_width(&self) -> i64 {
        self.max_row_width
    }

    /// Returns the number of matrix rows.
    pub fn num_rows(&self) -> usize {
        self.row_counts.len()
    }

    /// Returns the number of matrix columns, one more than the largest index.
    pub fn num_cols(&self) -> usize {
        self.indices
            .iter()
            .copied()
            .max()
            .filter(|&max| max >= 0)
            .map_or(0, |max| {
                usize::try_from(max).map_or(usize::MAX, |max| max.saturating_add(1))
            })
    }

    /// Returns the final cumulative offset.
    pub const fn declared_indices(&self) -> i64 {
        self.row_counts.total()
    }

    /// Builds the matrix in a single pass over the indices.
    ///
    /// Row `r` takes the next `count[r]` indices. Indices outside of the
    /// columns are dropped, and a row left without enough indices is kept
    /// partially filled.
    pub(crate) fn build_matrix(&self, anomalies: &mut Anomalies) -> Result<AdjacencyMatrix> {
        let mut matrix = AdjacencyMatrix::zeros(self.num_rows(), self.num_cols())?;
        let mut indices = self.indices.iter();
        for (row, &count) in self.row_counts.counts().iter().enumerate() {
            for _ in 0..count.max(0) {
                let Some(&index) = indices.next() else {
                    debug!(row, count, "not enough indices for the row");
                    anomalies.short_rows += 1;
                    break;
                };
                match usize::try_from(index) {
                    Ok(col) if col < matrix.num_cols() => matrix.set(row, col),
                    _ => {
                        debug!(row, index, "dropped an index out of range");
                        anomalies.dropped_indices += 1;
                    }
                }
            }
        }
        Ok(matrix)
    }
}
