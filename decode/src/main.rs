use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use csrrg::errors::Result;
use csrrg::sink::create_output;
use csrrg::{DecodeReport, Decoder, DecoderConfig, GraphBuilder, ParseMode, TextSink};

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EXTENSION: &str = "csrrg";

#[derive(Parser, Debug)]
#[clap(
    name = "decode",
    about = "Converts a CSRRG file into an adjacency matrix and an edge list"
)]
struct Args {
    /// CSRRG file to decode.
    #[clap(short = 'i', long)]
    input: PathBuf,

    /// Text output file.
    #[clap(short = 'o', long, default_value = "graf.txt")]
    output: PathBuf,

    /// Also writes the decoded graph in binary form to this file.
    #[clap(short = 'b', long)]
    binary_out: Option<PathBuf>,

    /// Rejects malformed tokens and decreasing offsets instead of tolerating them.
    #[clap(long)]
    strict: bool,

    /// Delimiter of integer lists.
    #[clap(short = 'd', long, default_value = ";", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Accepts input files without the .csrrg extension.
    #[clap(long)]
    any_extension: bool,

    /// Prints a summary of the decode to stderr.
    #[clap(long)]
    report: bool,

    /// Enables debug logging, e.g., of tolerated anomalies.
    #[clap(short = 'v', long)]
    verbose: bool,
}

fn parse_delimiter(s: &str) -> std::result::Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("{s:?} must be a single ASCII character")),
    }
}

fn has_extension(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == EXTENSION)
}

fn run(args: &Args) -> Result<DecodeReport> {
    let mode = if args.strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    };
    let config = DecoderConfig::new().delimiter(args.delimiter)?.mode(mode);
    let decoder = Decoder::new(config);

    let Some(binary_out) = &args.binary_out else {
        return decoder.decode_file(&args.input, &args.output);
    };

    let ((_, builder), report) = decoder.decode_path(&args.input, || {
        Ok((TextSink::create(&args.output)?, GraphBuilder::new()))
    })?;
    let graph = builder.build();

    eprintln!("Writing the binary graph...: {}", binary_out.display());
    let mut wtr = create_output(binary_out)?;
    let num_bytes = graph.write(&mut wtr)?;
    wtr.flush()?;
    eprintln!("{num_bytes} bytes");

    Ok(report)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if !args.any_extension && !has_extension(&args.input) {
        eprintln!("Invalid file format, use .{EXTENSION} to convert it to .txt");
        return ExitCode::from(64);
    }

    eprintln!("Decoding...: {}", args.input.display());
    let start = Instant::now();
    match run(&args) {
        Ok(report) => {
            info!(
                edges = report.num_edges,
                anomalies = report.anomalies.total(),
                "wrote {}",
                args.output.display()
            );
            eprintln!("{} seconds", start.elapsed().as_secs_f64());
            if args.report {
                eprintln!("{report}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(u8::try_from(e.status_code().unsigned_abs()).unwrap_or(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(Ok(b','), parse_delimiter(","));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("graph.csrrg")));
        assert!(!has_extension(Path::new("graph.txt")));
        assert!(!has_extension(Path::new("csrrg")));
    }

    #[test]
    fn test_args() {
        let args = Args::parse_from(["decode", "-i", "g.csrrg", "--strict", "-d", ","]);
        assert_eq!(PathBuf::from("graf.txt"), args.output);
        assert!(args.strict);
        assert_eq!(b',', args.delimiter);
        assert!(args.binary_out.is_none());
    }
}
