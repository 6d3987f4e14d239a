//! Dense adjacency matrix.

use std::fmt;
use std::io::Write;

use bincode::{Decode, Encode};

use crate::errors::Result;

/// Dense 0/1 grid where cell `(i, j)` is set iff there is an edge `i -> j`.
///
/// The numbers of rows and columns are independent of each other.
#[derive(Clone, Debug, Default, Eq, PartialEq, Decode, Encode)]
pub struct AdjacencyMatrix {
    data: Vec<bool>,
    num_rows: usize,
    num_cols: usize,
}

impl AdjacencyMatrix {
    /// Allocates a zero-filled matrix.
    ///
    /// # Errors
    ///
    /// [`CsrrgError::TryReserve`](crate::errors::CsrrgError::TryReserve) is
    /// returned when the storage cannot be allocated.
    pub fn zeros(num_rows: usize, num_cols: usize) -> Result<Self> {
        let len = num_rows.checked_mul(num_cols).unwrap_or(usize::MAX);
        let mut data = Vec::new();
        data.try_reserve_exact(len)?;
        data.resize(len, false);
        Ok(Self {
            data,
            num_rows,
            num_cols,
        })
    }

    /// Returns the number of rows.
    #[inline(always)]
    pub const fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[inline(always)]
    pub const fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Gets the cell, or `false` when it is outside of the matrix.
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.num_rows && col < self.num_cols && self.data[row * self.num_cols + col]
    }

    #[inline(always)]
    pub(crate) fn set(&mut self, row: usize, col: usize) {
        debug_assert!(row < self.num_rows);
        debug_assert!(col < self.num_cols);
        self.data[row * self.num_cols + col] = true;
    }

    /// Returns the cells of a row.
    pub fn row(&self, row: usize) -> &[bool] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        (0..self.num_rows).map(move |row| self.row(row))
    }

    /// Returns an iterator over `(row, col)` of the set cells in row-major order.
    pub fn connections(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &cell)| cell)
                .map(move |(j, _)| (i, j))
        })
    }

    /// Checks the storage length against the dimensions.
    pub(crate) fn is_consistent(&self) -> bool {
        self.num_rows
            .checked_mul(self.num_cols)
            .map_or(false, |len| len == self.data.len())
    }

    /// Writes the matrix in the bracketed format, e.g., ` [1. 0. 1.]`.
    pub fn write_bracketed<W>(&self, mut wtr: W) -> std::io::Result<()>
    where
        W: Write,
    {
        for row in self.rows() {
            wtr.write_all(b" [")?;
            for (j, &cell) in row.iter().enumerate() {
                if j != 0 {
                    wtr.write_all(b" ")?;
                }
                write!(wtr, "{}.", u8::from(cell))?;
            }
            wtr.write_all(b"]\n")?;
        }
        Ok(())
    }
}

/// Space-separated rows of 0/1, one per line.
impl fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &cell in row {
                write!(f, "{} ", u8::from(cell))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AdjacencyMatrix {
        let mut matrix = AdjacencyMatrix::zeros(2, 3).unwrap();
        matrix.set(0, 0);
        matrix.set(0, 1);
        matrix.set(1, 0);
        matrix
    }

    #[test]
    fn test_zeros() {
        let matrix = AdjacencyMatrix::zeros(2, 4).unwrap();
        assert_eq!(2, matrix.num_rows());
        assert_eq!(4, matrix.num_cols());
        assert_eq!(0, matrix.connections().count());
        assert!(matrix.is_consistent());
    }

    #[test]
    fn test_zeros_overflow() {
        assert!(AdjacencyMatrix::zeros(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_get_out_of_range() {
        let matrix = sample();
        assert!(matrix.get(0, 1));
        assert!(!matrix.get(0, 3));
        assert!(!matrix.get(2, 0));
    }

    #[test]
    fn test_write_bracketed() {
        let mut buf = vec![];
        sample().write_bracketed(&mut buf).unwrap();
        assert_eq!(" [1. 1. 0.]\n [1. 0. 0.]\n", String::from_utf8(buf).unwrap());
    }

    #[test]
    fn test_write_bracketed_no_columns() {
        let mut buf = vec![];
        AdjacencyMatrix::zeros(2, 0)
            .unwrap()
            .write_bracketed(&mut buf)
            .unwrap();
        assert_eq!(" []\n []\n", String::from_utf8(buf).unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!("1 1 0 \n1 0 0 \n", sample().to_string());
    }

    #[test]
    fn test_connections() {
        let connections: Vec<_> = sample().connections().collect();
        assert_eq!(vec![(0, 0), (0, 1), (1, 0)], connections);
    }
}
