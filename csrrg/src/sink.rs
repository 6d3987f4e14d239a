//! Destinations of decoded graphs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::{CsrrgError, Result};
use crate::matrix::AdjacencyMatrix;
use crate::section::Edge;

/// Receiver of a decoded graph.
///
/// The matrix is written exactly once, before any edge.
pub trait GraphSink {
    /// Takes over the adjacency matrix.
    fn write_matrix(&mut self, matrix: AdjacencyMatrix) -> Result<()>;

    /// Appends one edge.
    fn write_edge(&mut self, edge: Edge) -> Result<()>;

    /// Called once after the last edge.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes the text artifact: bracketed matrix rows, then `src - dst` lines.
#[derive(Debug)]
pub struct TextSink<W>
where
    W: Write,
{
    wtr: W,
}

impl<W> TextSink<W>
where
    W: Write,
{
    /// Creates a sink over a writer.
    pub const fn new(wtr: W) -> Self {
        Self { wtr }
    }

    /// Unwraps the writer.
    pub fn into_inner(self) -> W {
        self.wtr
    }
}

impl TextSink<BufWriter<File>> {
    /// Creates or truncates the file at `path`.
    ///
    /// # Errors
    ///
    /// See [`create_output`].
    pub fn create<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Ok(Self::new(create_output(path)?))
    }
}

/// Creates or truncates an output file for buffered writing.
///
/// # Errors
///
/// [`CsrrgError::OpenOutput`] is returned when the file cannot be created.
pub fn create_output<P>(path: P) -> Result<BufWriter<File>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| CsrrgError::open_output(path, e))?;
    Ok(BufWriter::new(file))
}

impl<W> GraphSink for TextSink<W>
where
    W: Write,
{
    fn write_matrix(&mut self, matrix: AdjacencyMatrix) -> Result<()> {
        matrix.write_bracketed(&mut self.wtr)?;
        Ok(())
    }

    fn write_edge(&mut self, edge: Edge) -> Result<()> {
        writeln!(self.wtr, "{edge}")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.wtr.flush()?;
        Ok(())
    }
}

/// Feeds two sinks with the same graph.
impl<A, B> GraphSink for (A, B)
where
    A: GraphSink,
    B: GraphSink,
{
    fn write_matrix(&mut self, matrix: AdjacencyMatrix) -> Result<()> {
        self.0.write_matrix(matrix.clone())?;
        self.1.write_matrix(matrix)
    }

    fn write_edge(&mut self, edge: Edge) -> Result<()> {
        self.0.write_edge(edge)?;
        self.1.write_edge(edge)
    }

    fn finish(&mut self) -> Result<()> {
        self.0.finish()?;
        self.1.finish()
    }
}
