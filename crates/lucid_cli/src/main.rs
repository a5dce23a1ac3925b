use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lucid_renderer::{render, IntegratorKind, RenderConfig};
use lucid_scene::{cornell_box, load_scene};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Render a scene with the Lucid path tracer.
#[derive(Debug, Parser)]
#[command(name = "lucid", version, about)]
struct Args {
    /// JSON scene file. Renders the built-in Cornell box when omitted.
    scene: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// JSON render settings; command-line values take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Samples per pixel
    #[arg(short, long)]
    samples: Option<u32>,

    /// Maximum path length
    #[arg(long)]
    max_depth: Option<u32>,

    /// Integrator: "path_tracer" or "constant"
    #[arg(short, long)]
    integrator: Option<IntegratorKind>,

    /// Seed for the sample generators
    #[arg(long)]
    seed: Option<u64>,

    /// Logging level, overridden by RUST_LOG
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

impl Args {
    fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading render settings {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing render settings {}", path.display()))?
            }
            None => RenderConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(integrator) = self.integrator {
            config.integrator = integrator;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .parse_default_env()
        .init();

    let scene = match &args.scene {
        Some(path) => load_scene(path).with_context(|| format!("loading scene {}", path.display()))?,
        None => {
            log::info!("No scene given, using the built-in Cornell box");
            cornell_box().context("building the Cornell box")?
        }
    };

    let config = args.render_config()?;
    let image = render(&scene, &config).context("rendering")?;
    image
        .save_png(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["lucid"]).unwrap();
        assert!(args.scene.is_none());
        assert_eq!(args.output, PathBuf::from("render.png"));
        assert_eq!(args.render_config().unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "lucid",
            "scenes/cornell.json",
            "--width",
            "320",
            "-s",
            "8",
            "--integrator",
            "constant",
            "--seed",
            "42",
        ])
        .unwrap();
        assert_eq!(args.scene, Some(PathBuf::from("scenes/cornell.json")));

        let config = args.render_config().unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, RenderConfig::default().height);
        assert_eq!(config.samples_per_pixel, 8);
        assert_eq!(config.integrator, IntegratorKind::Constant);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_bad_integrator() {
        assert!(Args::try_parse_from(["lucid", "--integrator", "whitted"]).is_err());
    }
}
