#![deny(unsafe_code)]
//! CLI binary for the lava-lamp renderer.
//!
//! Subcommands:
//! - `render`: run an engine N frames on a CPU raster, write PNG
//! - `trace`: run an engine N frames and report per-frame contour counts
//! - `list`: print available engines

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use lava_lamp_core::raster::Raster;
use lava_lamp_core::surface::RecordingSurface;
use lava_lamp_core::{Engine, Seed, Srgb};
use lava_lamp_engines::snapshot::write_png;
use lava_lamp_engines::EngineKind;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lava-lamp", about = "Metaball lava-lamp renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Raise log verbosity (-v debug, -vv trace). Overrides RUST_LOG.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an engine for N frames and write a PNG snapshot of the last one.
    Render {
        #[command(flatten)]
        run: RunArgs,

        /// Background color behind the blobs.
        #[arg(long, default_value = "#000000")]
        background: String,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Also write every Nth frame into --frames-dir.
        #[arg(long, requires = "frames_dir")]
        every: Option<usize>,

        /// Directory for intermediate frames.
        #[arg(long, requires = "every")]
        frames_dir: Option<PathBuf>,
    },
    /// Run an engine for N frames and print contour statistics per frame.
    Trace {
        #[command(flatten)]
        run: RunArgs,
    },
    /// List available engines.
    List,
}

#[derive(clap::Args)]
struct RunArgs {
    /// Engine name.
    #[arg(short, long, default_value = "metaballs")]
    engine: String,

    /// Viewport width in pixels.
    #[arg(short = 'W', long, default_value_t = 800)]
    width: usize,

    /// Viewport height in pixels.
    #[arg(short = 'H', long, default_value_t = 600)]
    height: usize,

    /// Number of frames to render.
    #[arg(short, long, default_value_t = 120)]
    frames: usize,

    /// PRNG seed for deterministic output.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Engine parameters as a JSON string.
    #[arg(long, default_value = "{}")]
    params: String,
}

impl RunArgs {
    fn to_seed(&self) -> Result<Seed, CliError> {
        let params: Value = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        Ok(Seed::new(&self.engine, self.width, self.height, self.seed)
            .with_params(params)
            .with_frames(self.frames))
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// `frame_00042.png`-style name for an intermediate frame.
fn frame_path(dir: &Path, frame: u64) -> PathBuf {
    dir.join(format!("frame_{frame:05}.png"))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render(
    seed: &Seed,
    background: &str,
    output: &Path,
    dump: Option<(usize, &Path)>,
    json_mode: bool,
) -> Result<(), CliError> {
    let background = Srgb::from_hex(background)
        .map_err(|e| CliError::Input(format!("invalid --background: {e}")))?;
    if let Some((every, dir)) = dump {
        if every == 0 {
            return Err(CliError::Input("--every must be at least 1".into()));
        }
        std::fs::create_dir_all(dir)?;
    }

    let mut engine = EngineKind::from_seed(seed)?;
    let mut raster = Raster::new(seed.width, seed.height, background)?;
    let mut dumped = Vec::new();
    for _ in 0..seed.frames {
        engine.render_frame(&mut raster);
        if let Some((every, dir)) = dump {
            if engine.frame() % every as u64 == 0 {
                let path = frame_path(dir, engine.frame());
                write_png(&raster, &path)?;
                tracing::debug!(frame = engine.frame(), path = %path.display(), "frame written");
                dumped.push(path.display().to_string());
            }
        }
    }
    write_png(&raster, output)?;

    if json_mode {
        print_json(&json!({
            "engine": seed.engine,
            "width": seed.width,
            "height": seed.height,
            "frames": seed.frames,
            "seed": seed.seed,
            "params": engine.params(),
            "output": output.display().to_string(),
            "frame_files": dumped,
        }))?;
    } else {
        eprintln!(
            "rendered {} ({}x{}, {} frames, seed {}) -> {}",
            seed.engine,
            seed.width,
            seed.height,
            seed.frames,
            seed.seed,
            output.display()
        );
        if !dumped.is_empty() {
            eprintln!("wrote {} intermediate frames", dumped.len());
        }
    }
    Ok(())
}

fn trace(seed: &Seed, json_mode: bool) -> Result<(), CliError> {
    let mut engine = EngineKind::from_seed(seed)?;
    let mut surface = RecordingSurface::new();
    let mut rows = Vec::with_capacity(seed.frames);
    for _ in 0..seed.frames {
        surface.clear();
        engine.render_frame(&mut surface);
        let paths = surface.filled_paths();
        let vertices: usize = paths.iter().map(Vec::len).sum();
        rows.push((engine.frame(), paths.len(), vertices));
    }

    if json_mode {
        let frames: Vec<Value> = rows
            .iter()
            .map(|&(frame, contours, vertices)| {
                json!({"frame": frame, "contours": contours, "vertices": vertices})
            })
            .collect();
        print_json(&json!({"engine": seed.engine, "frames": frames}))?;
    } else {
        println!("{:>6} {:>9} {:>9}", "frame", "contours", "vertices");
        for (frame, contours, vertices) in rows {
            println!("{frame:>6} {contours:>9} {vertices:>9}");
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let engines = EngineKind::list_engines();
            if cli.json {
                print_json(&json!({ "engines": engines }))?;
            } else {
                println!("Engines:");
                for name in engines {
                    println!("  {name}");
                }
            }
        }
        Command::Render {
            run,
            background,
            output,
            every,
            frames_dir,
        } => {
            let seed = run.to_seed()?;
            let dump = every.zip(frames_dir.as_deref());
            render(&seed, &background, &output, dump, cli.json)?;
        }
        Command::Trace { run } => {
            let seed = run.to_seed()?;
            trace(&seed, cli.json)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        tracing::debug!(exit_code = e.exit_code(), "command failed");
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
