use anyhow::Context;
use clap::{Parser, Subcommand};
use radiosity_camera::Camera;
use radiosity_common::AppConfig;
use radiosity_input::{Input, load_script, replay};
use radiosity_render::{DebugTextRenderer, RenderView, Renderer, Scene};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "radiosity-cli", about = "CLI tool for the radiosity demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, crate info and the effective configuration
    Info,
    /// Describe the demo room as seen from the configured camera
    Scene {
        /// Override the camera yaw in degrees
        #[arg(long, allow_hyphen_values = true)]
        yaw: Option<f32>,
        /// Override the camera pitch in degrees
        #[arg(long, allow_hyphen_values = true)]
        pitch: Option<f32>,
    },
    /// Replay a YAML input script against the camera and print the final frame
    Replay {
        /// Path to the input script
        script: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load_or_default(cli.config.as_deref()).context("loading configuration")?;
    let scene = Scene::demo_room();
    let renderer = DebugTextRenderer::new();

    match cli.command {
        Commands::Info => {
            println!("radiosity-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", radiosity_render::crate_info());
            println!("scene: {} objects", scene.len());
            print!("{}", config.to_yaml()?);
        }
        Commands::Scene { yaw, pitch } => {
            let mut camera = Camera::from_config(&config.camera);
            if yaw.is_some() || pitch.is_some() {
                let yaw = yaw.unwrap_or(camera.yaw());
                let pitch = pitch.unwrap_or(camera.pitch());
                camera = camera.with_yaw_pitch(yaw, pitch);
            }
            let view = RenderView::from_camera(
                &camera,
                config.window.aspect(),
                &config.projection,
                false,
            );
            print!("{}", renderer.render(&scene, &view));
        }
        Commands::Replay { script } => {
            let events = load_script(&script)
                .with_context(|| format!("loading input script {}", script.display()))?;
            tracing::info!("replaying {} events from {}", events.len(), script.display());
            let mut input = Input::new(Camera::from_config(&config.camera));
            let report = replay(&mut input, &events);

            println!(
                "Replayed {}/{} events ({} frames), close requested: {}",
                report.events,
                events.len(),
                report.frames,
                report.close_requested
            );
            if !report.cursor_modes.is_empty() {
                println!("Cursor modes: {:?}", report.cursor_modes);
            }

            let camera = input.camera();
            println!(
                "Camera: yaw={:.2} pitch={:.2} zoom={:.1}",
                camera.yaw(),
                camera.pitch(),
                camera.zoom()
            );
            let view = RenderView::from_camera(
                camera,
                config.window.aspect(),
                &config.projection,
                input.wireframe(),
            );
            print!("{}", renderer.render(&scene, &view));
        }
    }

    Ok(())
}
