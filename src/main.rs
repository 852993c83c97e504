// SYNOID Shorts Main Entry Point
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use synoid_shorts::agent::core::{RunOptions, ShortsCore};
use synoid_shorts::agent::health;
use synoid_shorts::agent::record::ContentRecord;
use synoid_shorts::config::{ShortsConfig, DEFAULT_CONFIG_FILE};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "synoid-shorts")]
#[command(about = "SYNOID Shorts Generator", long_about = None)]
struct Cli {
    /// Settings file (JSON). When present it replaces the preset.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Built-in layout preset
    #[arg(long, global = true, value_enum, default_value_t = Preset::Portrait1080)]
    preset: Preset,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    #[value(name = "portrait-1080")]
    Portrait1080,
    #[value(name = "portrait-720")]
    Portrait720,
}

impl Preset {
    fn settings(self) -> ShortsConfig {
        match self {
            Preset::Portrait1080 => ShortsConfig::portrait_1080(),
            Preset::Portrait720 => ShortsConfig::portrait_720(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate, render and upload one short
    Run {
        /// Theme to use instead of a weighted random pick
        #[arg(short, long)]
        theme: Option<String>,

        /// Path to output video file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stop after rendering
        #[arg(long)]
        no_upload: bool,

        /// Save the generated record as JSON for a later `upload`
        #[arg(long)]
        save_record: Option<PathBuf>,
    },

    /// Generate content only and print the record as JSON
    Generate {
        #[arg(short, long)]
        theme: Option<String>,

        /// Also write the record to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a clip from given text without calling the model
    Render {
        #[arg(long)]
        hook: String,

        #[arg(long)]
        body: String,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Upload an existing clip using a saved record
    Upload {
        /// Video file to upload
        #[arg(short, long)]
        input: PathBuf,

        /// Record JSON written by `run --save-record` or `generate --output`
        #[arg(short, long)]
        record: PathBuf,
    },

    /// Authorize YouTube uploads and store the token
    Auth,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info,hyper=warn,reqwest=warn,rustls=warn");
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    info!("--- SYNOID SHORTS v{} ---", env!("CARGO_PKG_VERSION"));

    let mut config = ShortsConfig::load_or(&cli.config, cli.preset.settings());

    match cli.command {
        Commands::Run {
            theme,
            output,
            no_upload,
            save_record,
        } => {
            warn_missing_dependencies(&config);
            if let Some(output) = output {
                config.paths.output = output;
            }
            let core = ShortsCore::new(config);
            let report = core
                .run(&RunOptions {
                    theme,
                    upload: !no_upload,
                    save_record,
                })
                .await?;
            match report.upload {
                Some(video) => info!(
                    "🎉 Published '{}' as https://youtube.com/shorts/{}",
                    report.record.title, video.id
                ),
                None => info!("🎉 Clip ready at {:?}", report.video.output_path),
            }
        }

        Commands::Generate { theme, output } => {
            let core = ShortsCore::new(config);
            let theme = core.choose_theme(theme.as_deref());
            let record = core.generate(&theme).await;
            if let Some(path) = output {
                record.save(&path)?;
            }
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Commands::Render { hook, body, output } => {
            warn_missing_dependencies(&config);
            if let Some(output) = output {
                config.paths.output = output;
            }
            let record = ContentRecord {
                hook,
                body,
                ..ContentRecord::fallback()
            };
            let core = ShortsCore::new(config);
            let output = core.config().paths.output.clone();
            let video = core.create_video(&record, &output).await?;
            info!(
                "🎉 Clip ready at {:?} ({:.1}s, {:.2} MB)",
                video.output_path, video.duration_secs, video.size_mb
            );
        }

        Commands::Upload { input, record } => {
            let record = ContentRecord::load(&record)
                .with_context(|| format!("cannot upload {:?} without its record", input))?;
            let core = ShortsCore::new(config);
            let video = core.publish(&input, &record).await?;
            info!("🎉 Published as https://youtube.com/shorts/{}", video.id);
        }

        Commands::Auth => {
            ShortsCore::new(config).authorize().await?;
        }
    }

    Ok(())
}

fn warn_missing_dependencies(config: &ShortsConfig) {
    let missing = health::check_dependencies(&config.render.ffmpeg_path);
    if !missing.is_empty() {
        warn!("⚠️ Missing dependencies: {:?}. Rendering will fail.", missing);
    }
}
