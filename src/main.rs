//! Diagnostic binary for protocol-v2 request streams.
//!
//! Reads a pkt-line request stream from stdin and either lists the decoded
//! chunks or writes them back out in canonical form.

mod cli;

use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;
use pktwire::{PacketScanner, PktLineCodec, RequestDecoder, RequestWriter};

fn main() -> ExitCode {
    // Applications embedding the library should install their own subscriber.
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = cli::Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pktwire: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &cli::Cli) -> Result<(), Box<dyn std::error::Error>> {
    let codec = cli
        .max_packet_length
        .map_or_else(PktLineCodec::default, PktLineCodec::new);
    let scanner = PacketScanner::with_codec(io::stdin().lock(), codec);
    let mut decoder = RequestDecoder::new(scanner);
    let stdout = io::stdout().lock();

    if cli.canonical {
        let mut writer = RequestWriter::with_codec(stdout, codec);
        while decoder.advance() {
            if let Some(chunk) = decoder.chunk() {
                writer.write_chunk(chunk)?;
            }
        }
        writer.flush()?;
    } else {
        let mut out = io::BufWriter::new(stdout);
        while decoder.advance() {
            if let Some(chunk) = decoder.chunk() {
                writeln!(out, "{chunk}")?;
            }
        }
        out.flush()?;
    }

    match decoder.into_error() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
