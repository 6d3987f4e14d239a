use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use csrrg::Graph;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "show", about = "Prints a graph written by `decode --binary-out`")]
struct Args {
    /// Binary graph file.
    #[clap(short = 'i', long)]
    graph_in: PathBuf,

    /// Prints the `i - j` pairs of the set matrix cells.
    #[clap(short = 'c', long)]
    connections: bool,

    /// Prints the edges decoded from the sections.
    #[clap(short = 'e', long)]
    edges: bool,

    /// Prints the graph in the text format of `decode` instead.
    #[clap(short = 't', long)]
    text: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the graph...");
    let graph = Graph::read(BufReader::new(File::open(args.graph_in)?))?;
    let matrix = graph.matrix();
    eprintln!(
        "{} x {} matrix, {} edges",
        matrix.num_rows(),
        matrix.num_cols(),
        graph.edges().len()
    );

    let mut out = BufWriter::new(std::io::stdout().lock());
    if args.text {
        graph.write_text(&mut out)?;
        return Ok(());
    }

    write!(out, "{matrix}")?;
    if args.connections {
        for (i, j) in matrix.connections() {
            writeln!(out, "{i} - {j}")?;
        }
    }
    if args.edges {
        for edge in graph.edges() {
            writeln!(out, "{edge}")?;
        }
    }
    out.flush()?;

    Ok(())
}
