//! Edge sections following the header.
//!
//! A section is an index line followed by a pointer line, and blank lines
//! may appear anywhere between them. The section reader pairs the lines
//! up: it waits for an index line, then for its pointer line, and yields
//! the pair. Emitting the edges of a complete section is left to the
//! caller, which is [`Decoder::decode`](crate::Decoder::decode) writing
//! them to its sink before asking for the next section.

use std::fmt;
use std::io::BufRead;

use bincode::{Decode, Encode};

use crate::config::DecoderConfig;
use crate::errors::Result;
use crate::offset::CountTable;
use crate::reader::{LineReader, RawLine};
use crate::report::Anomalies;

/// Directed edge `source -> target`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Decode, Encode)]
pub struct Edge {
    /// Source vertex.
    pub source: i64,

    /// Destination vertex.
    pub target: i64,
}

impl Edge {
    /// Creates a new edge.
    pub const fn new(source: i64, target: i64) -> Self {
        Self { source, target }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.source, self.target)
    }
}

/// One index line and the group sizes decoded from its pointer line.
#[derive(Clone, Debug)]
pub struct EdgeSection {
    indices: Vec<i64>,
    group_sizes: CountTable,
}

impl EdgeSection {
    pub(crate) fn parse(
        index_line: &RawLine,
        pointer_line: &RawLine,
        config: &DecoderConfig,
        anomalies: &mut Anomalies,
    ) -> Result<Self> {
        let group_sizes = CountTable::parse(pointer_line, config, anomalies)?;
        let indices = config.parse_line(index_line, anomalies)?;
        Ok(Self {
            indices,
            group_sizes,
        })
    }

    /// Calls `f` with every edge in group order, then destination order.
    ///
    /// The first index of a group is its source and each following index is
    /// a destination. Emission stops when the indices run out; the return
    /// value tells whether every group was complete.
    pub fn for_each_edge<F>(&self, mut f: F) -> Result<bool>
    where
        F: FnMut(Edge) -> Result<()>,
    {
        let mut indices = self.indices.iter().copied();
        for &size in self.group_sizes.counts() {
            let size = usize::try_from(size).unwrap_or(0);
            let mut group = indices.by_ref().take(size);
            let Some(source) = group.next() else {
                if size == 0 {
                    continue;
                }
                return Ok(false);
            };
            let mut taken = 1;
            for target in group {
                f(Edge::new(source, target))?;
                taken += 1;
            }
            if taken < size {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Collects the edges of the section.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = vec![];
        // The closure never fails.
        let _ = self.for_each_edge(|edge| {
            edges.push(edge);
            Ok(())
        });
        edges
    }
}

/// Result of reading one section.
#[derive(Debug)]
pub(crate) enum SectionEvent {
    /// An index line followed by its pointer line.
    Complete {
        index_line: RawLine,
        pointer_line: RawLine,
    },

    /// An index line at the end of input without a pointer line.
    Dangling { index_line: RawLine },
}

// Edge emission happens between two calls of `next_section`, so it has no
// state of its own here.
enum State {
    AwaitIndexLine,
    AwaitPointerLine(RawLine),
    Done,
}

/// Reads the sections after the header, skipping blank lines.
pub(crate) struct SectionReader<'a, R> {
    lines: &'a mut LineReader<R>,
    state: State,
}

impl<'a, R> SectionReader<'a, R>
where
    R: BufRead,
{
    pub fn new(lines: &'a mut LineReader<R>) -> Self {
        Self {
            lines,
            state: State::AwaitIndexLine,
        }
    }

    /// Returns the next section, or `None` once the input is exhausted.
    ///
    /// A dangling index line is returned once and ends the sections.
    pub fn next_section(&mut self) -> Result<Option<SectionEvent>> {
        loop {
            match std::mem::replace(&mut self.state, State::Done) {
                State::AwaitIndexLine => match self.lines.next_non_blank()? {
                    Some(index_line) => self.state = State::AwaitPointerLine(index_line),
                    None => return Ok(None),
                },
                State::AwaitPointerLine(index_line) => {
                    return match self.lines.next_non_blank()? {
                        Some(pointer_line) => {
                            self.state = State::AwaitIndexLine;
                            Ok(Some(SectionEvent::Complete {
                                index_line,
                                pointer_line,
                            }))
                        }
                        None => Ok(Some(SectionEvent::Dangling { index_line })),
                    };
                }
                State::Done => return Ok(None),
            }
        }
    }
}
