//! pixmorph-cli: apply image effects from the command line.
//!
//! Posts a local JPEG, PNG or WebP file to the effect server and writes
//! the returned image to disk. Also lists the available effects and
//! probes the server's health endpoint.
//!
//! # Usage
//!
//! ```text
//! cargo run --bin pixmorph-cli -- apply photo.jpg --effect style-transfer --style candy
//! cargo run --bin pixmorph-cli -- effects --json
//! cargo run --bin pixmorph-cli -- --base-url http://localhost:8000 health
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use pixmorph_cli::EffectClient;
use pixmorph_effects::{
    ClientConfig, DEFAULT_BASE_URL, DOWNLOAD_FILENAME, Effect, EffectRequest, EffectSummary,
    SelectedFile, Style,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Command-line client for the pixmorph image effect server.
#[derive(Parser)]
#[command(name = "pixmorph-cli", version)]
struct Cli {
    /// Base URL of the effect server.
    #[arg(long, global = true, env = "PIXMORPH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Log request details to stderr (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply an effect to an image file.
    Apply {
        /// Path to the input image (JPEG, PNG, WebP).
        input: PathBuf,

        /// Effect to apply.
        #[arg(long, value_enum)]
        effect: EffectArg,

        /// Style for `style-transfer` (candy, mosaic, `rain_princess`,
        /// udnie) or `pixel-art` (8bit, 16bit, modern, mosaic).
        #[arg(long)]
        style: Option<String>,

        /// Where to write the result.
        #[arg(short, long, default_value = DOWNLOAD_FILENAME)]
        output: PathBuf,
    },

    /// List the available effects and their styles.
    Effects {
        /// Output the listing as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check that the server is up.
    Health,
}

/// Effect selection.
#[derive(Clone, Copy, ValueEnum)]
enum EffectArg {
    GraySketch,
    ColorSketch,
    Sticker,
    Cartoon,
    NeonGlow,
    ComicArt,
    Manga,
    PopArt,
    StyleTransfer,
    PixelArt,
}

/// Maps the local CLI [`EffectArg`] to an [`Effect`].
const fn effect_from_arg(arg: EffectArg) -> Effect {
    match arg {
        EffectArg::GraySketch => Effect::GraySketch,
        EffectArg::ColorSketch => Effect::ColorSketch,
        EffectArg::Sticker => Effect::Sticker,
        EffectArg::Cartoon => Effect::Cartoon,
        EffectArg::NeonGlow => Effect::NeonGlow,
        EffectArg::ComicArt => Effect::ComicArt,
        EffectArg::Manga => Effect::Manga,
        EffectArg::PopArt => Effect::PopArt,
        EffectArg::StyleTransfer => Effect::StyleTransfer,
        EffectArg::PixelArt => Effect::PixelArt,
    }
}

/// Build an [`EffectRequest`] from the `--effect` and `--style` flags.
fn request_from_cli(effect: EffectArg, style: Option<&str>) -> anyhow::Result<EffectRequest> {
    let effect = effect_from_arg(effect);
    let style = style.map(|s| Style::parse_for(effect, s)).transpose()?;
    Ok(EffectRequest::new(effect, style)?)
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "pixmorph_cli=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ClientConfig::from_override(Some(&cli.base_url));
    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: ClientConfig) -> anyhow::Result<()> {
    match command {
        Command::Apply {
            input,
            effect,
            style,
            output,
        } => {
            let request = request_from_cli(effect, style.as_deref())?;
            apply(&EffectClient::new(config), &input, request, &output).await
        }
        Command::Effects { json } => {
            print_effects(json)?;
            Ok(())
        }
        Command::Health => {
            let client = EffectClient::new(config);
            let status = client.health().await?;
            println!("{}: {}", client.config().health_url(), status.status);
            if !status.is_ok() {
                bail!("server reported status {:?}", status.status);
            }
            Ok(())
        }
    }
}

async fn apply(
    client: &EffectClient,
    input: &Path,
    request: EffectRequest,
    output: &Path,
) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(input)
        .await
        .with_context(|| format!("reading {}", input.display()))?;
    let name = input
        .file_name()
        .map_or_else(|| input.display().to_string(), |n| n.to_string_lossy().into_owned());
    let file = SelectedFile::from_extension(name, bytes)?;

    eprintln!("Image: {} ({} bytes, {})", input.display(), file.len(), file.mime());
    eprintln!("Applying: {request}");

    let result = client.apply(&file, request).await?;
    tokio::fs::write(output, &result)
        .await
        .with_context(|| format!("writing {}", output.display()))?;

    eprintln!("Result written to {} ({} bytes)", output.display(), result.len());
    Ok(())
}

fn print_effects(json: bool) -> anyhow::Result<()> {
    let summaries: Vec<EffectSummary> = Effect::ALL.into_iter().map(Effect::summary).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("{:<16} {:<24} {}", "Effect", "Endpoint", "Styles");
    println!("{}", "-".repeat(60));
    for summary in &summaries {
        println!(
            "{:<16} {:<24} {}",
            summary.effect.slug(),
            summary.path,
            summary.styles.join(", "),
        );
    }
    Ok(())
}
