//! Lissajous Knots launcher
//!
//! ## Usage
//!
//! ```bash
//! lissajous                          # Start the viewer on http://127.0.0.1:8050
//! lissajous serve --port 9000        # Custom port
//! lissajous points -a 3 -b 2 -c 7    # Print the points as JSON
//! lissajous svg --camera top -o knot.svg
//! lissajous config init              # Write a default config file
//! ```

mod export;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use lissajous_config::ViewerConfig;
use lissajous_core::{generate, Basis, ParameterSet};
use lissajous_web::{AppState, CameraPreset};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lissajous")]
#[command(about = "Lissajous Knots - interactive 3D knot viewer")]
#[command(version)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web viewer (the default when no command is given)
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the point sequence
    Points {
        #[command(flatten)]
        knot: KnotArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Render the knot to an SVG file
    Svg {
        #[command(flatten)]
        knot: KnotArgs,

        /// Camera preset (default, top, lateral-right, lateral-left, front, rear)
        #[arg(long)]
        camera: Option<CameraPreset>,

        /// Image size in pixels
        #[arg(long)]
        size: Option<u32>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Csv,
}

/// Knot parameters; anything omitted comes from the config defaults
#[derive(Args, Debug, Default)]
struct KnotArgs {
    /// Frequency on x
    #[arg(short, allow_hyphen_values = true)]
    a: Option<f64>,

    /// Frequency on y
    #[arg(short, allow_hyphen_values = true)]
    b: Option<f64>,

    /// Frequency on z
    #[arg(short, allow_hyphen_values = true)]
    c: Option<f64>,

    /// Phase on x (radians)
    #[arg(long, allow_hyphen_values = true)]
    phase: Option<f64>,

    /// Phase on y (radians)
    #[arg(long, allow_hyphen_values = true)]
    phase_y: Option<f64>,

    /// Number of points
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    samples: Option<i64>,

    /// sine or cosine
    #[arg(long)]
    basis: Option<Basis>,
}

impl KnotArgs {
    /// Merge over `defaults`. Invalid values are clamped with a warning.
    fn params(&self, defaults: &ParameterSet) -> ParameterSet {
        let mut params = *defaults;
        let f = &mut params.frequencies;
        f.x = self.a.unwrap_or(f.x);
        f.y = self.b.unwrap_or(f.y);
        f.z = self.c.unwrap_or(f.z);
        params.phase = self.phase.unwrap_or(params.phase);
        params.phase_y = self.phase_y.unwrap_or(params.phase_y);
        params.basis = self.basis.unwrap_or(params.basis);
        if let Some(raw) = self.samples {
            params.samples = ParameterSet::clamp_samples(raw);
            if params.samples as i64 != raw {
                tracing::warn!("Sample count {} clamped to {}", raw, params.samples);
            }
        }

        if let Err(e) = params.validate() {
            tracing::warn!("{}; falling back to sanitised parameters", e);
            return params.sanitized();
        }
        params
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lissajous=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        None => serve(config_path, None, None).await,
        Some(Commands::Serve { host, port }) => serve(config_path, host, port).await,
        Some(Commands::Points { knot, format }) => {
            let config = ViewerConfig::discover(config_path)?;
            let seq = generate(&knot.params(&config.defaults));
            match format {
                Format::Json => println!("{}", export::points_json(&seq)?),
                Format::Csv => print!("{}", export::points_csv(&seq)),
            }
            Ok(())
        }
        Some(Commands::Svg {
            knot,
            camera,
            size,
            out,
        }) => {
            let config = ViewerConfig::discover(config_path)?;
            let camera = camera
                .or_else(|| config.figure.camera.parse().ok())
                .unwrap_or_default();
            let seq = generate(&knot.params(&config.defaults));
            let svg = export::scene_svg(
                &seq,
                camera,
                size.unwrap_or(config.figure.size),
                Some(config.figure.shadow_offset),
            );
            match out {
                Some(path) => {
                    std::fs::write(&path, svg)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Wrote {} ({} points, {} view)", path.display(), seq.len(), camera.label());
                }
                None => println!("{}", svg),
            }
            Ok(())
        }
        Some(Commands::Config { action }) => config_command(config_path, action),
    }
}

async fn serve(config_path: Option<&Path>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = ViewerConfig::discover(config_path).context("Failed to load config")?;
    config.apply_overrides(host, port.map(|p| p.to_string()));
    config.validate()?;

    let addr = config.server.addr();
    let listener = lissajous_web::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    let url = format!("http://{}", listener.local_addr()?);

    lissajous_web::routes::print_routes();
    println!("Lissajous Knots ready at {}", url);
    println!();

    let state = Arc::new(AppState::new(config));
    lissajous_web::serve_on(listener, state)
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("Server error")
}

fn config_command(config_path: Option<&Path>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = ViewerConfig::discover(config_path)?;
            print!("{}", config.to_yaml()?);
        }
        ConfigAction::Path => match ViewerConfig::resolve_path(config_path) {
            Some(path) => println!("{}", path.display()),
            None => bail!("No config directory available on this platform"),
        },
        ConfigAction::Init { force } => {
            let Some(path) = ViewerConfig::resolve_path(config_path) else {
                bail!("No config directory available on this platform");
            };
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            ViewerConfig::default().save(&path)?;
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lissajous_core::{MAX_SAMPLES, MIN_SAMPLES};

    #[test]
    fn test_no_args_means_serve() {
        let cli = Cli::try_parse_from(["lissajous"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from(["lissajous", "serve", "--host", "0.0.0.0", "-p", "9000"]).unwrap();
        match cli.command {
            Some(Commands::Serve { host, port }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(9000));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_points_args() {
        let cli = Cli::try_parse_from([
            "lissajous", "points", "-a", "3", "-b", "2", "-c", "7", "--phase", "1.57", "-n", "1000",
            "--basis", "cosine", "--format", "csv",
        ])
        .unwrap();
        let Some(Commands::Points { knot, format }) = cli.command else {
            panic!("expected points");
        };
        assert_eq!(format, Format::Csv);

        let params = knot.params(&ParameterSet::default());
        assert_eq!(params.frequencies.z, 7.0);
        assert_eq!(params.phase, 1.57);
        assert_eq!(params.samples, 1000);
        assert_eq!(params.basis, Basis::Cosine);
    }

    #[test]
    fn test_negative_values_accepted() {
        let cli = Cli::try_parse_from(["lissajous", "points", "-a", "-3", "-n", "-5"]).unwrap();
        let Some(Commands::Points { knot, .. }) = cli.command else {
            panic!("expected points");
        };
        let params = knot.params(&ParameterSet::default());
        assert_eq!(params.frequencies.x, -3.0);
        assert_eq!(params.samples, MIN_SAMPLES);
    }

    #[test]
    fn test_samples_clamped_high() {
        let knot = KnotArgs {
            samples: Some(1_000_000),
            ..Default::default()
        };
        assert_eq!(knot.params(&ParameterSet::default()).samples, MAX_SAMPLES);
    }

    #[test]
    fn test_non_finite_sanitised() {
        let knot = KnotArgs {
            b: Some(f64::NAN),
            ..Default::default()
        };
        let params = knot.params(&ParameterSet::default());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_svg_camera_parse() {
        let cli = Cli::try_parse_from(["lissajous", "svg", "--camera", "lateral-right"]).unwrap();
        let Some(Commands::Svg { camera, .. }) = cli.command else {
            panic!("expected svg");
        };
        assert_eq!(camera, Some(CameraPreset::LateralRight));
    }

    #[test]
    fn test_config_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        config_command(Some(path.as_path()), ConfigAction::Init { force: false }).unwrap();
        assert!(path.exists());
        assert!(config_command(Some(path.as_path()), ConfigAction::Init { force: false }).is_err());
        config_command(Some(path.as_path()), ConfigAction::Init { force: true }).unwrap();

        let loaded = ViewerConfig::load(&path).unwrap();
        assert_eq!(loaded, ViewerConfig::default());
    }
}
