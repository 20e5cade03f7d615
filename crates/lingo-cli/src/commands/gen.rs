//! Asset generation commands

use anyhow::{Context, Result};
use clap::Subcommand;
use lingo_gen::{
    produce_assets, providers, AssetKind, AudioProducer, GenConfig, ImageProducer, RunSummary,
};
use std::path::Path;

#[derive(Subcommand)]
pub enum GenCommands {
    /// Generate MP3 audio for every phrase answer
    Audio {
        /// Corpus directory of phrase set JSON files
        #[arg(long, default_value = "lang_data")]
        corpus: String,

        /// Output directory for audio files and the manifest
        #[arg(long, default_value = "frontend/audio")]
        output: String,

        /// Provider to use (elevenlabs, mock)
        #[arg(long)]
        provider: Option<String>,
    },

    /// Generate WebP illustrations for phrases with image descriptions
    Images {
        /// Corpus directory of phrase set JSON files
        #[arg(long, default_value = "lang_data")]
        corpus: String,

        /// Output directory for image files and the manifest
        #[arg(long, default_value = "frontend/images")]
        output: String,

        /// Provider to use (openai, mock)
        #[arg(long)]
        provider: Option<String>,
    },

    /// Render the image style prompt once to preview a style change
    TestStyle {
        /// File holding the style prompt
        #[arg(long, default_value = "image_style.txt")]
        style: String,

        /// Output file for the test render
        #[arg(long, default_value = "frontend/images/test_style.webp")]
        output: String,

        /// Provider to use (openai, mock)
        #[arg(long)]
        provider: Option<String>,
    },
}

pub fn run(cmd: GenCommands) -> Result<()> {
    match cmd {
        GenCommands::Audio {
            corpus,
            output,
            provider,
        } => run_audio(&corpus, &output, provider),
        GenCommands::Images {
            corpus,
            output,
            provider,
        } => run_images(&corpus, &output, provider),
        GenCommands::TestStyle {
            style,
            output,
            provider,
        } => run_test_style(&style, &output, provider),
    }
}

fn run_audio(corpus: &str, output: &str, provider: Option<String>) -> Result<()> {
    let config = GenConfig::load()?;
    let provider_name =
        provider.unwrap_or_else(|| config.default_provider(AssetKind::Audio).to_string());
    let synthesizer = providers::create_synthesizer(&provider_name, &config)?;

    println!("Audio generator ({})", synthesizer.name());
    println!("{}", "=".repeat(40));

    let producer = AudioProducer::new(synthesizer);

    let manifest_path = Path::new(output).join("manifest.json");
    let summary = produce_assets(&producer, Path::new(corpus), Path::new(output), &manifest_path)?;

    report(summary, &manifest_path);
    Ok(())
}

fn run_images(corpus: &str, output: &str, provider: Option<String>) -> Result<()> {
    let config = GenConfig::load()?;
    let provider_name =
        provider.unwrap_or_else(|| config.default_provider(AssetKind::Image).to_string());
    let renderer = providers::create_renderer(&provider_name, &config)?;

    println!("Image generator ({})", renderer.name());
    println!("{}", "=".repeat(40));

    let producer = ImageProducer::new(renderer);

    let manifest_path = Path::new(output).join("manifest.json");
    let summary = produce_assets(&producer, Path::new(corpus), Path::new(output), &manifest_path)?;

    report(summary, &manifest_path);
    Ok(())
}

fn run_test_style(style: &str, output: &str, provider: Option<String>) -> Result<()> {
    let config = GenConfig::load()?;
    let provider_name =
        provider.unwrap_or_else(|| config.default_provider(AssetKind::Image).to_string());
    let renderer = providers::create_renderer(&provider_name, &config)?;

    let prompt = std::fs::read_to_string(style)
        .with_context(|| format!("Failed to read style file {}", style))?
        .trim()
        .to_string();

    println!("Prompt:\n{}\n", prompt);
    println!("Generating...");

    let bytes = renderer.render(&prompt)?;

    let out_path = Path::new(output);
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out_path, &bytes)?;

    println!("Saved to: {}", out_path.display());
    Ok(())
}

fn report(summary: RunSummary, manifest_path: &Path) {
    println!("{}", "=".repeat(40));
    println!("Total generated: {}", summary.generated);
    println!("Total skipped (unchanged): {}", summary.skipped);
    println!("Manifest saved to: {}", manifest_path.display());
}
