//! # CSRRG decoder
//!
//! Decodes graphs stored in the CSRRG format, an offset-encoded text format
//! close to compressed sparse rows:
//!
//! ```text
//! 9           nominal maximum row width
//! 0;1;2;0     column indices of all rows, concatenated
//! 0;2;4       cumulative offsets delimiting the rows
//! 0;1;2       section: connection groups, each a source and its destinations
//! 0;3         section: cumulative offsets delimiting the groups
//! ```
//!
//! The header becomes a dense [`AdjacencyMatrix`] and every section becomes
//! a list of [`Edge`]s.
//!
//! ```
//! use csrrg::{Decoder, DecoderConfig};
//!
//! let data = "9\n0;1;2;0\n0;2;4\n0;1;2\n0;3\n";
//! let (graph, report) = Decoder::new(DecoderConfig::new())
//!     .read_graph(data.as_bytes())
//!     .unwrap();
//!
//! assert!(graph.matrix().get(1, 0));
//! assert_eq!(2, graph.edges().len());
//! assert!(report.is_clean());
//! ```
#![deny(missing_docs)]

mod common;
pub mod config;
pub mod decoder;
pub mod errors;
pub mod graph;
mod header;
pub mod matrix;
pub mod offset;
mod reader;
pub mod report;
pub mod section;
pub mod sink;
mod utils;


pub use config::{DecoderConfig, ParseMode};
pub use decoder::Decoder;
pub use errors::CsrrgError;
pub use graph::{Graph, GraphBuilder};
pub use matrix::AdjacencyMatrix;
pub use report::{Anomalies, DecodeReport};
pub use section::Edge;
pub use sink::{GraphSink, TextSink};
