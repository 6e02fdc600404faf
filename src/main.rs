use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use segment_glb::{ExtractConfig, GlbCodec, Pipeline};

/// Reads a GLB and prints its segment point and node graph as one JSON line.
#[derive(Parser)]
#[command(name = "segment-glb", version)]
struct Cli {
    /// GLB file to read. Reads stdin when omitted or `-`.
    input: Option<PathBuf>,
    /// Fail on duplicate node names and edges to unknown nodes.
    #[arg(long)]
    validate: bool,
    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    pollster::block_on(run(cli))?;

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let bytes = read_input(cli.input.as_ref())?;
    log::info!("Received GLB buffer with byteLength: {}", bytes.len());

    let config = ExtractConfig {
        validate_graph: cli.validate,
    };
    let pipeline = Pipeline::with_config(GlbCodec::new(), config);
    let parsed = pipeline
        .decode_and_parse(&bytes)
        .await
        .context("Error processing GLB")?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&parsed.graph())?
    } else {
        serde_json::to_string(&parsed.graph())?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    stdout.flush()?;

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        _ => {
            let mut bytes = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .context("Failed to read stdin")?;
            Ok(bytes)
        }
    }
}
