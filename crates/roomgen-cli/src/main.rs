//! Roomgen batch generator
//!
//! Generates scene-sample datasets, inspects saved samples and prints the
//! default configuration.
//!
//! Usage:
//!   cargo run -p roomgen-cli -- generate --out data/rooms --num-scenes 100 --seed 7
//!   cargo run -p roomgen-cli -- inspect data/rooms/0000000.bin
//!   cargo run -p roomgen-cli -- --verbose default-config

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};

use roomgen_core::config::{validate_config, SceneConfig};
use roomgen_core::dataset::NormalizedViewpoints;
use roomgen_core::engine::SceneGenerator;
use roomgen_core::persistence::{load_samples, read_samples_json, save_samples, write_samples_json};
use roomgen_core::prelude::SceneSamples;

// ── Default configuration ───────────────────────────────────────────────
const DEFAULT_CONFIG_JSON: &str = include_str!("../../../data/default_config.json");

#[derive(Parser)]
#[command(name = "roomgen", version, about = "Procedural indoor room layouts")]
struct Args {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Generate a dataset of scene samples
    Generate {
        /// JSON configuration; the embedded default when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        out: PathBuf,
        #[arg(short = 'n', long, default_value_t = 10)]
        num_scenes: usize,
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
        #[arg(long, value_enum, default_value_t = Format::Bincode)]
        format: Format,
    },

    /// Print a summary of a saved sample
    Inspect { input: PathBuf },

    /// Print the embedded default configuration
    DefaultConfig,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Bincode,
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Bincode => "bin",
            Format::Json => "json",
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match args.cmd {
        Cmd::Generate {
            config,
            out,
            num_scenes,
            seed,
            format,
        } => generate(config.as_deref(), &out, num_scenes, seed, format),
        Cmd::Inspect { input } => inspect(&input),
        Cmd::DefaultConfig => {
            print!("{}", DEFAULT_CONFIG_JSON);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SceneConfig> {
    let text = match path {
        Some(p) => fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?,
        None => DEFAULT_CONFIG_JSON.to_string(),
    };
    let config = SceneConfig::from_json(&text).context("parsing configuration")?;

    let errors = validate_config(&config);
    if !errors.is_empty() {
        for e in &errors {
            warn!("config: {}", e);
        }
        bail!("configuration has {} error(s)", errors.len());
    }
    Ok(config)
}

fn generate(config: Option<&Path>, out: &Path, num_scenes: usize, seed: u64, format: Format) -> Result<()> {
    let config = load_config(config)?;
    fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;

    let mut generator = SceneGenerator::new(config, seed)?;
    let samples = generator.generate_batch(num_scenes);

    for (i, s) in samples.iter().enumerate() {
        let path = out.join(format!("{:07}.{}", i, format.extension()));
        let writer = BufWriter::new(
            File::create(&path).with_context(|| format!("creating {}", path.display()))?,
        );
        let written = match format {
            Format::Bincode => save_samples(writer, s),
            Format::Json => write_samples_json(writer, s),
        };
        written.with_context(|| format!("writing {}", path.display()))?;
    }

    let viewpoints = NormalizedViewpoints::from_samples(&samples);
    let path = out.join("viewpoints.json");
    let writer = BufWriter::new(File::create(&path).with_context(|| format!("creating {}", path.display()))?);
    serde_json::to_writer_pretty(writer, &viewpoints).context("writing viewpoints.json")?;

    info!(
        "Wrote {}/{} layouts to {} (viewpoint scale {:.2})",
        samples.len(),
        num_scenes,
        out.display(),
        viewpoints.scale
    );
    Ok(())
}

fn inspect(input: &Path) -> Result<()> {
    let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
    let reader = BufReader::new(file);
    let samples: SceneSamples = match input.extension().and_then(|e| e.to_str()) {
        Some("json") => read_samples_json(reader),
        _ => load_samples(reader),
    }
    .with_context(|| format!("loading {}", input.display()))?;

    println!("=== {} ===\n", input.display());
    for (i, scene) in samples.scenes.iter().enumerate() {
        let (rows, cols) = scene.floor_plan().shape();
        println!(
            "variant {}: {}x{} grid, {} floor cells, {} walls, {} objects, {} lights",
            i,
            rows,
            cols,
            scene.floor_area(),
            scene.walls.len(),
            scene.objects().len(),
            scene.lights().len()
        );
    }
    println!("viewpoints: {}\n", samples.viewpoints.len());
    if let Some(scene) = samples.scenes.first() {
        println!("{}", scene.render_plan(true));
    }
    Ok(())
}
