//! Headless driver: builds a sculpting session from config and flags, runs a
//! command script against it, and optionally hot-reloads the config.
#![forbid(unsafe_code)]

mod script;
mod watch;

use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use isosculpt_runtime::Sculptor;
use isosculpt_world::{TerrainConfig, load_config_from_path};
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};

#[derive(Parser, Debug)]
#[command(name = "isosculpt")]
#[command(about = "Marching Cubes terrain sculpting, headless", long_about = None)]
struct Args {
    /// Terrain config (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid size in cells, e.g. 64x32x64
    #[arg(long, value_parser = parse_grid)]
    grid: Option<[usize; 3]>,

    #[arg(long)]
    voxel_size: Option<f32>,

    #[arg(long)]
    seed: Option<i32>,

    /// Command script, one command per line
    #[arg(long)]
    script: Option<PathBuf>,

    /// Keep running and rebuild whenever the config file changes
    #[arg(long, default_value_t = false)]
    watch: bool,

    /// Also write debug-level logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_grid(s: &str) -> Result<[usize; 3], String> {
    let parts: Vec<&str> = s.split(['x', 'X']).collect();
    if parts.len() != 3 {
        return Err(format!("expected SXxSYxSZ, got '{s}'"));
    }
    let mut out = [0usize; 3];
    for (o, p) in out.iter_mut().zip(&parts) {
        *o = p
            .trim()
            .parse()
            .map_err(|_| format!("'{p}' is not a cell count"))?;
    }
    Ok(out)
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<(), Box<dyn Error>> {
    match log_file {
        Some(path) => {
            CombinedLogger::init(vec![
                TermLogger::new(
                    LevelFilter::Info,
                    Config::default(),
                    TerminalMode::Mixed,
                    ColorChoice::Auto,
                ),
                WriteLogger::new(LevelFilter::Debug, Config::default(), File::create(path)?),
            ])?;
        }
        None => {
            env_logger::Builder::new()
                .target(env_logger::Target::Stdout)
                .filter_level(log::LevelFilter::Info)
                .parse_env("RUST_LOG")
                .init();
        }
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<TerrainConfig, Box<dyn Error>> {
    let mut cfg = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => TerrainConfig::default(),
    };
    if let Some([sx, sy, sz]) = args.grid {
        cfg.grid.size_x = sx;
        cfg.grid.size_y = sy;
        cfg.grid.size_z = sz;
    }
    if let Some(v) = args.voxel_size {
        cfg.grid.voxel_size = v;
    }
    if let Some(seed) = args.seed {
        cfg.noise.seed = seed;
    }
    Ok(cfg)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let cfg = build_config(&args)?;
    let mut sculptor = Sculptor::new(cfg)?;
    println!("{}", script::stats_line(&sculptor));

    if let Some(path) = &args.script {
        let src = std::fs::read_to_string(path)?;
        let ran = script::run_script(&mut sculptor, &src)?;
        log::info!("ran {} commands from {}", ran, path.display());
        println!("{}", script::stats_line(&sculptor));
    }

    if args.watch {
        let Some(path) = args.config.clone() else {
            return Err("--watch needs --config".into());
        };
        let rx = watch::spawn_config_watcher(path.clone());
        loop {
            if watch::process_config_events(&rx, &path, &mut sculptor) {
                println!("{}", script::stats_line(&sculptor));
            }
            std::thread::sleep(Duration::from_millis(200));
        }
    }
    Ok(())
}
