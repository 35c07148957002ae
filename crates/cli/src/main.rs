//! Flipbook CLI
//!
//! Generate frame-by-frame animations from a motion prompt without running
//! the HTTP server.

mod output;
mod preview;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flipbook_core::error::CoreError;
use flipbook_core::generation::{
    validate_frame_count, FramePlanning, DEFAULT_FRAME_COUNT, DEFAULT_MAX_FRAMES,
};
use flipbook_core::playback::{validate_speed, DEFAULT_SPEED};
use flipbook_gemini::{GeminiApi, GeminiConfig, GenerativeBackend};
use flipbook_pipeline::export::export_gif;
use flipbook_pipeline::refiner::refine_prompt;
use flipbook_pipeline::AnimationOrchestrator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "flipbook")]
#[command(about = "Generate flipbook-style animations from a motion prompt")]
#[command(version)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Elaborate a motion prompt into a description of the opening scene
    Refine {
        /// Motion prompt, e.g. "a ball bouncing"
        prompt: String,
    },

    /// Generate frames and export them as PNG files plus an animated GIF
    Generate {
        /// Motion prompt, e.g. "a ball bouncing"
        prompt: String,

        /// Number of frames to generate
        #[arg(short, long, default_value_t = DEFAULT_FRAME_COUNT)]
        frames: usize,

        /// Plan every frame with one storyboard call before drawing
        #[arg(long)]
        storyboard: bool,

        /// Refine the prompt first and animate from the refined text
        #[arg(long)]
        refine: bool,

        /// Playback speed (100-1000); higher is faster
        #[arg(long, default_value_t = DEFAULT_SPEED)]
        speed: u32,

        /// Output directory for frames and the GIF
        #[arg(short, long)]
        out: PathBuf,

        /// Play the result in the terminal after writing it
        #[arg(long)]
        preview: bool,

        /// Number of playback loops shown by --preview
        #[arg(long, default_value_t = 3)]
        loops: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let backend: Arc<dyn GenerativeBackend> = Arc::new(GeminiApi::new(GeminiConfig::from_env()));

    match cli.command {
        Commands::Refine { prompt } => {
            let refined = refine_prompt(backend.as_ref(), &prompt)
                .await
                .context("Prompt refinement failed")?;
            println!("{refined}");
        }

        Commands::Generate {
            prompt,
            frames,
            storyboard,
            refine,
            speed,
            out,
            preview,
            loops,
        } => {
            let planning = if storyboard {
                FramePlanning::Storyboard
            } else {
                FramePlanning::Inline
            };
            let options = GenerateOptions {
                frame_count: frames,
                planning,
                refine,
                speed,
                out,
                preview,
                loops,
            };
            generate(backend, &prompt, options).await?;
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "flipbook=info,flipbook_pipeline=info,flipbook_gemini=warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout carries only command output.
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

struct GenerateOptions {
    frame_count: usize,
    planning: FramePlanning,
    refine: bool,
    speed: u32,
    out: PathBuf,
    preview: bool,
    loops: usize,
}

/// Reject a bad speed or frame count before spending any model calls.
fn validate_options(options: &GenerateOptions) -> Result<(), CoreError> {
    validate_speed(options.speed)?;
    validate_frame_count(options.frame_count, DEFAULT_MAX_FRAMES)
}

async fn generate(
    backend: Arc<dyn GenerativeBackend>,
    prompt: &str,
    options: GenerateOptions,
) -> Result<()> {
    validate_options(&options)?;

    let motion = if options.refine && options.frame_count > 0 {
        eprintln!("Refining prompt...");
        let refined = refine_prompt(backend.as_ref(), prompt)
            .await
            .context("Prompt refinement failed")?;
        println!("Refined prompt: {refined}");
        refined
    } else {
        prompt.to_string()
    };

    let orchestrator = AnimationOrchestrator::new(backend)
        .with_planning(options.planning)
        .with_max_frames(DEFAULT_MAX_FRAMES);

    let frames = orchestrator
        .generate(&motion, options.frame_count, |message| eprintln!("{message}"))
        .await
        .context("Animation generation failed")?;

    if frames.is_empty() {
        println!("No frames requested; nothing written.");
        return Ok(());
    }

    let speed = options.speed;
    let to_encode = frames.frames().to_vec();
    let gif = tokio::task::spawn_blocking(move || export_gif(&to_encode, speed))
        .await
        .context("GIF export task failed")?
        .context("GIF export failed")?;

    let written = output::write_animation(&options.out, &frames, &gif).await?;
    println!(
        "Wrote {} frames and {} to {}",
        written.frames.len(),
        written.gif.display(),
        options.out.display()
    );

    if options.preview {
        preview::play(&written.frames, speed, options.loops).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(frame_count: usize, speed: u32) -> GenerateOptions {
        GenerateOptions {
            frame_count,
            planning: FramePlanning::Inline,
            refine: true,
            speed,
            out: PathBuf::from("out"),
            preview: false,
            loops: 1,
        }
    }

    #[test]
    fn defaults_are_accepted() {
        assert!(validate_options(&options(DEFAULT_FRAME_COUNT, DEFAULT_SPEED)).is_ok());
    }

    #[test]
    fn frame_count_over_cap_is_rejected_up_front() {
        assert!(matches!(
            validate_options(&options(DEFAULT_MAX_FRAMES + 1, DEFAULT_SPEED)),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn out_of_range_speed_is_rejected_up_front() {
        assert!(matches!(
            validate_options(&options(DEFAULT_FRAME_COUNT, 50)),
            Err(CoreError::Validation(_))
        ));
    }
}
