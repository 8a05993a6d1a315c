//! dumpw2d - Dump W2D opcode streams
//!
//! A command line tool for inspecting raw W2D opcode streams, either as the
//! decoded opcode sequence or as the primitives a render pass would draw.

use clap::{ArgAction, Parser};
use serde_json::json;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, debug};
use w2d_core::api::{RenderParams, render_frame};
use w2d_core::error::Result;
use w2d_core::parser::OpcodeDecoder;

#[derive(Parser, Debug)]
#[command(name = "dumpw2d")]
#[command(about = "Dump the opcodes or rendered primitives of W2D streams")]
#[command(version)]
struct Args {
    /// One or more paths to raw W2D stream files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Print rendered primitives instead of decoded opcodes
    #[arg(long, action = ArgAction::SetTrue)]
    primitives: bool,

    /// Write JSON, one document per input file
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,
}

/// Print the decoded opcode sequence, one opcode per line.
fn dump_opcodes<W: Write>(out: &mut W, data: &[u8], as_json: bool) -> Result<()> {
    let mut opcodes = Vec::new();
    for item in OpcodeDecoder::new(data) {
        opcodes.push(item?);
    }
    if as_json {
        serde_json::to_writer_pretty(&mut *out, &json!({ "opcodes": opcodes }))
            .map_err(io::Error::from)?;
        writeln!(out)?;
        return Ok(());
    }
    for (i, opcode) in opcodes.iter().enumerate() {
        writeln!(out, "{i:6} {opcode}")?;
    }
    Ok(())
}

/// Print the primitives and the pass summary of one render pass.
fn dump_primitives<W: Write>(out: &mut W, data: &[u8], as_json: bool) -> Result<()> {
    let frame = render_frame(data, &RenderParams::default())?;
    let report = &frame.report;
    if as_json {
        let diagnostics: Vec<_> = report
            .diagnostics
            .iter()
            .map(|d| json!({ "index": d.index, "opcode": d.opcode.as_str() }))
            .collect();
        let doc = json!({
            "primitives": frame.primitives,
            "diagnostics": diagnostics,
            "current_point": report.current_point,
        });
        serde_json::to_writer_pretty(&mut *out, &doc).map_err(io::Error::from)?;
        writeln!(out)?;
        return Ok(());
    }
    for primitive in &frame.primitives {
        writeln!(out, "{primitive}")?;
    }
    for diagnostic in &report.diagnostics {
        writeln!(out, "# {diagnostic}")?;
    }
    writeln!(
        out,
        "# {} opcodes ({} draw), {} drawn, {} hidden, {} unsupported, ends at {}",
        report.stats.opcodes,
        report.stats.draw_opcodes,
        report.stats.emitted,
        report.stats.suppressed,
        report.stats.unsupported,
        report.current_point
    )?;
    Ok(())
}

fn dump_file<W: Write>(out: &mut W, path: &Path, args: &Args) -> Result<()> {
    let data = fs::read(path)?;
    debug!(path = %path.display(), bytes = data.len(), "read stream");
    if !args.json {
        writeln!(out, "== {}", path.display())?;
    }
    if args.primitives {
        dump_primitives(out, &data, args.json)
    } else {
        dump_opcodes(out, &data, args.json)
    }
}

fn main() -> core::result::Result<(), Box<dyn core::error::Error>> {
    let args = Args::parse();

    let level = if args.debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    // Open output
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)?;
        Box::new(BufWriter::new(file))
    };

    let mut failed = false;
    for path in &args.files {
        if !path.exists() {
            eprintln!("Error: File not found: {}", path.display());
            // keep the listings of earlier files
            output.flush()?;
            std::process::exit(1);
        }
        if let Err(e) = dump_file(&mut output, path, &args) {
            eprintln!("Error: {}: {e}", path.display());
            failed = true;
        }
    }

    output.flush()?;
    if failed {
        std::process::exit(1);
    }
    Ok(())
}
