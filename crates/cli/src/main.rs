#![deny(unsafe_code)]
//! CLI binary for the drift ambient particle system.
//!
//! Subcommands:
//! - `render` — run the animation loop N frames headlessly, write a PNG
//! - `list` — print available style presets

mod error;

use clap::{Parser, Subcommand};
use drift_animator::{AnimationLoop, FixedStepClock, StepScheduler, SurfaceController};
use drift_core::{DriftError, PixelSurface};
use drift_field::{FieldParams, ParticleField};
use drift_render::RenderStyle;
use error::CliError;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "drift", about = "Ambient particle background renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the animation for N frames and write a PNG of the last one.
    Render {
        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 960)]
        width: usize,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 540)]
        height: usize,

        /// Number of animation frames to run.
        #[arg(short, long, default_value_t = 300)]
        frames: u64,

        /// Simulated frames per second.
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Style preset name (indigo, ember, mono).
        #[arg(short, long, default_value = "indigo")]
        style: String,

        /// Output file path.
        #[arg(short, long, default_value = "drift.png")]
        output: PathBuf,

        /// Field parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available style presets.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let styles = RenderStyle::list_names();
            if cli.json {
                let info = serde_json::json!({ "styles": styles });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Styles:");
                println!("  {}", styles.join(", "));
            }
        }
        Command::Render {
            width,
            height,
            frames,
            fps,
            seed,
            style,
            output,
            params,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let style =
                RenderStyle::from_name(&style).map_err(|e| CliError::Input(e.to_string()))?;
            if !(fps > 0.0 && fps.is_finite()) {
                return Err(CliError::Input(format!("invalid --fps: {fps}")));
            }

            let field = ParticleField::new(FieldParams::from_json(&params), seed);
            let controller = SurfaceController::new(PixelSurface::new(width, height)?);
            let mut animation =
                AnimationLoop::new(field, controller, style, FixedStepClock::new(1.0 / fps));
            animation.resize(width, height)?;

            let mut scheduler = StepScheduler::new();
            animation.start(&mut scheduler)?;
            for _ in 0..frames {
                if let Some(handle) = scheduler.take_due() {
                    animation.on_frame(handle, &mut scheduler);
                }
            }
            animation.stop(&mut scheduler);

            let surface = animation
                .surface()
                .ok_or(CliError::Animation(DriftError::SurfaceUnavailable))?;
            drift_render::snapshot::write_png(surface, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "frames": frames,
                    "seed": seed,
                    "particles": animation.field().len(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} particles ({width}x{height}, {frames} frames, seed {seed}) -> {}",
                    animation.field().len(),
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(|logger| logger.start())
        .ok();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
