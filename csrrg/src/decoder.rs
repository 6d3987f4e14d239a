//! Reconstruction of a graph from the CSRRG format.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, error};

use crate::config::DecoderConfig;
use crate::errors::{CsrrgError, Result};
use crate::graph::{Graph, GraphBuilder};
use crate::header::Header;
use crate::reader::LineReader;
use crate::report::{Anomalies, DecodeReport};
use crate::section::{EdgeSection, SectionEvent, SectionReader};
use crate::sink::{GraphSink, TextSink};

/// Decoder of the CSRRG format.
///
/// # Examples
///
/// ```
/// use csrrg::{Decoder, DecoderConfig, TextSink};
///
/// let data = "9\n0;1;2;0\n0;2;4\n0;1;2\n0;3\n";
/// let decoder = Decoder::new(DecoderConfig::new());
/// let (sink, report) = decoder
///     .decode(data.as_bytes(), || Ok(TextSink::new(vec![])))
///     .unwrap();
///
/// let text = String::from_utf8(sink.into_inner()).unwrap();
/// assert_eq!(" [1. 1. 0.]\n [1. 0. 1.]\n0 - 1\n0 - 2\n", text);
/// assert_eq!(2, report.num_edges);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Creates a new decoder.
    pub const fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Gets the configuration.
    pub const fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes the input and passes the graph to a sink.
    ///
    /// `open_sink` is called once the matrix is built, so a malformed header
    /// never opens the sink. Edges are passed in section order, then group
    /// order, then destination order. An index line at the end of input
    /// without its pointer line is reported in the returned
    /// [`DecodeReport`] and ends the decode without an error.
    ///
    /// # Errors
    ///
    /// [`CsrrgError`] is returned when
    ///  - the input has less than three non-blank header lines,
    ///  - a token or offset list is rejected in strict mode,
    ///  - memory cannot be allocated, or
    ///  - reading, opening the sink or writing to it fails.
    ///
    /// What was already passed to the sink is kept.
    pub fn decode<R, S, F>(&self, rdr: R, open_sink: F) -> Result<(S, DecodeReport)>
    where
        R: Read,
        S: GraphSink,
        F: FnOnce() -> Result<S>,
    {
        let mut lines = LineReader::new(BufReader::new(rdr));
        let mut anomalies = Anomalies::default();

        let header = Header::read(&mut lines, &self.config, &mut anomalies)?;
        let matrix = header.build_matrix(&mut anomalies)?;
        debug!(
            num_rows = matrix.num_rows(),
            num_cols = matrix.num_cols(),
            "built the adjacency matrix"
        );
        let mut report = DecodeReport {
            max_row_width: header.max_row_width(),
            num_rows: matrix.num_rows(),
            num_cols: matrix.num_cols(),
            declared_indices: header.declared_indices(),
            ..Default::default()
        };
        drop(header);

        let mut sink = open_sink()?;
        sink.write_matrix(matrix)?;

        let mut sections = SectionReader::new(&mut lines);
        while let Some(event) = sections.next_section()? {
            match event {
                SectionEvent::Complete {
                    index_line,
                    pointer_line,
                } => {
                    let section =
                        EdgeSection::parse(&index_line, &pointer_line, &self.config, &mut anomalies)?;
                    let mut num_edges = 0;
                    let complete = section.for_each_edge(|edge| {
                        num_edges += 1;
                        sink.write_edge(edge)
                    })?;
                    if !complete {
                        debug!(line = index_line.number, "not enough indices for the groups");
                        anomalies.short_groups += 1;
                    }
                    report.num_sections += 1;
                    report.num_edges += num_edges;
                }
                SectionEvent::Dangling { index_line } => {
                    error!(line = index_line.number, "Incomplete edge section found");
                    report.incomplete_section = true;
                }
            }
        }
        sink.finish()?;

        report.anomalies = anomalies;
        if !report.anomalies.is_empty() {
            debug!(anomalies = report.anomalies.total(), "decoded with anomalies");
        }
        Ok((sink, report))
    }

    /// Decodes the file at `input` into the text artifact at `output`.
    ///
    /// The output file is created only after the header was decoded.
    ///
    /// # Errors
    ///
    /// In addition to the errors of [`Decoder::decode`],
    /// [`CsrrgError::OpenInput`] and [`CsrrgError::OpenOutput`] are returned
    /// when the files cannot be opened.
    pub fn decode_file<P, Q>(&self, input: P, output: Q) -> Result<DecodeReport>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let (_, report) = self.decode_path(input, || TextSink::create(output))?;
        Ok(report)
    }

    /// Decodes the file at `input` and passes the graph to a sink.
    ///
    /// # Errors
    ///
    /// In addition to the errors of [`Decoder::decode`],
    /// [`CsrrgError::OpenInput`] is returned when the file cannot be opened.
    pub fn decode_path<P, S, F>(&self, input: P, open_sink: F) -> Result<(S, DecodeReport)>
    where
        P: AsRef<Path>,
        S: GraphSink,
        F: FnOnce() -> Result<S>,
    {
        let input = input.as_ref();
        let file = File::open(input).map_err(|e| CsrrgError::open_input(input, e))?;
        self.decode(file, open_sink)
    }

    /// Decodes the input into an in-memory [`Graph`].
    ///
    /// # Errors
    ///
    /// See [`Decoder::decode`].
    pub fn read_graph<R>(&self, rdr: R) -> Result<(Graph, DecodeReport)>
    where
        R: Read,
    {
        let (builder, report) = self.decode(rdr, || Ok(GraphBuilder::new()))?;
        Ok((builder.build(), report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::ParseMode;
    use crate::section::Edge;

    fn decode_text(data: &str) -> Result<(String, DecodeReport)> {
        let decoder = Decoder::default();
        let (sink, report) = decoder.decode(data.as_bytes(), || Ok(TextSink::new(vec![])))?;
        Ok((String::from_utf8(sink.into_inner()).unwrap(), report))
    }

    #[test]
    fn test_header_only() {
        let (text, report) = decode_text("9\n0;1;2;0\n0;2;4\n").unwrap();
        assert_eq!(" [1. 1. 0.]\n [1. 0. 1.]\n", text);
        assert_eq!(0, report.num_sections);
        assert!(report.is_clean());
    }

    #[test]
    fn test_sections() {
        let (text, report) = decode_text("9\n0;1;2;0\n0;2;4\n\n0;1;2\n0;3\n\n1;0\n\n0;2\n").unwrap();
        assert_eq!(" [1. 1. 0.]\n [1. 0. 1.]\n0 - 1\n0 - 2\n1 - 0\n", text);
        assert_eq!(2, report.num_sections);
        assert_eq!(3, report.num_edges);
    }

    #[test]
    fn test_dangling_section() {
        let (text, report) = decode_text("9\n0;1;2;0\n0;2;4\n0;1;2\n0;3\n4;5\n\n").unwrap();
        assert_eq!(" [1. 1. 0.]\n [1. 0. 1.]\n0 - 1\n0 - 2\n", text);
        assert_eq!(1, report.num_sections);
        assert!(report.incomplete_section);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_sink_not_opened_on_bad_header() {
        let decoder = Decoder::default();
        let mut opened = false;
        let result = decoder.decode("9\n0;1\n".as_bytes(), || {
            opened = true;
            Ok(TextSink::new(Vec::<u8>::new()))
        });
        assert!(matches!(result, Err(CsrrgError::InsufficientHeader(_))));
        assert!(!opened);
    }

    #[test]
    fn test_sink_open_failure() {
        let decoder = Decoder::default();
        let result = decoder.decode("9\n0;1\n0;2\n".as_bytes(), || {
            Err::<TextSink<Vec<u8>>, _>(CsrrgError::open_output(
                "graf.txt",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ))
        });
        assert_eq!(-3, result.unwrap_err().status_code());
    }

    #[test]
    fn test_strict_mode() {
        let data = "9\n0;1;2;0\n0;2;4\n0;x;2\n0;3\n";
        let decoder = Decoder::new(DecoderConfig::new().mode(ParseMode::Strict));
        let result = decoder.decode(data.as_bytes(), || Ok(TextSink::new(vec![])));
        match result {
            Err(CsrrgError::InvalidToken(e)) => assert_eq!(4, e.line),
            _ => panic!("expected an invalid token error"),
        }

        let (text, report) = decode_text(data).unwrap();
        assert!(text.ends_with("0 - 0\n0 - 2\n"));
        assert_eq!(1, report.anomalies.coerced_tokens);
    }

    #[test]
    fn test_read_graph() {
        let decoder = Decoder::default();
        let (graph, report) = decoder
            .read_graph("2\n1;0\n0;1;2\n0;1;1;2;3\n0;2;4\n".as_bytes())
            .unwrap();
        assert_eq!(vec![(0, 1), (1, 0)], graph.matrix().connections().collect::<Vec<_>>());
        assert_eq!(&[Edge::new(0, 1), Edge::new(1, 2)], graph.edges());
        assert!(report.is_clean());
    }
}
