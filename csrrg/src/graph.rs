//! In-memory decoded graph.

use std::io::{Read, Write};

use bincode::{Decode, Encode};

use crate::common;
use crate::errors::{CsrrgError, Result};
use crate::matrix::AdjacencyMatrix;
use crate::section::Edge;
use crate::sink::{GraphSink, TextSink};

/// Adjacency matrix from the header and edges from the sections.
#[derive(Clone, Debug, Default, Eq, PartialEq, Decode, Encode)]
pub struct Graph {
    matrix: AdjacencyMatrix,
    edges: Vec<Edge>,
}

impl Graph {
    /// Gets the reference to the adjacency matrix.
    #[inline(always)]
    pub const fn matrix(&self) -> &AdjacencyMatrix {
        &self.matrix
    }

    /// Gets the edges in emission order.
    #[inline(always)]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Writes the graph in the text format produced by the decoder.
    pub fn write_text<W>(&self, wtr: W) -> Result<()>
    where
        W: Write,
    {
        let mut sink = TextSink::new(wtr);
        sink.write_matrix(self.matrix.clone())?;
        for &edge in &self.edges {
            sink.write_edge(edge)?;
        }
        sink.finish()
    }

    /// Exports the graph data.
    ///
    /// # Errors
    ///
    /// When bincode generates an error, it will be returned as is.
    pub fn write<W>(&self, mut wtr: W) -> Result<usize>
    where
        W: Write,
    {
        let num_bytes = bincode::encode_into_std_write(self, &mut wtr, common::bincode_config())?;
        Ok(num_bytes)
    }

    /// Creates a graph from a reader.
    ///
    /// # Errors
    ///
    /// When bincode generates an error, it will be returned as is.
    /// [`CsrrgError`] is also returned when the matrix dimensions do not
    /// match its storage.
    pub fn read<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let graph: Self = bincode::decode_from_std_read(&mut rdr, common::bincode_config())?;
        if !graph.matrix.is_consistent() {
            return Err(CsrrgError::invalid_argument(
                "rdr",
                "matrix dimensions do not match its cells",
            ));
        }
        Ok(graph)
    }
}

/// Collects a decoded graph in memory.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    matrix: AdjacencyMatrix,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph.
    pub fn build(self) -> Graph {
        Graph {
            matrix: self.matrix,
            edges: self.edges,
        }
    }
}

impl GraphSink for GraphBuilder {
    fn write_matrix(&mut self, matrix: AdjacencyMatrix) -> Result<()> {
        self.matrix = matrix;
        Ok(())
    }

    fn write_edge(&mut self, edge: Edge) -> Result<()> {
        self.edges.try_reserve(1)?;
        self.edges.push(edge);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph {
        let mut builder = GraphBuilder::new();
        let mut matrix = AdjacencyMatrix::zeros(2, 2).unwrap();
        matrix.set(1, 0);
        builder.write_matrix(matrix).unwrap();
        builder.write_edge(Edge::new(1, 0)).unwrap();
        builder.write_edge(Edge::new(0, -4)).unwrap();
        builder.build()
    }

    #[test]
    fn test_write_read() {
        let graph = sample();
        let mut buf = vec![];
        let num_bytes = graph.write(&mut buf).unwrap();
        assert_eq!(buf.len(), num_bytes);
        let other = Graph::read(buf.as_slice()).unwrap();
        assert_eq!(graph, other);
    }

    #[test]
    fn test_read_truncated() {
        let mut buf = vec![];
        sample().write(&mut buf).unwrap();
        buf.truncate(buf.len() - 1);
        assert!(Graph::read(buf.as_slice()).is_err());
    }

    #[test]
    fn test_write_text() {
        let mut buf = vec![];
        sample().write_text(&mut buf).unwrap();
        assert_eq!(
            " [0. 0.]\n [1. 0.]\n1 - 0\n0 - -4\n",
            String::from_utf8(buf).unwrap()
        );
    }
}
