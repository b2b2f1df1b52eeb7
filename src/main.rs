//! meshport - load 3D scenes into render-ready entities
//!
//! Command-line front end for the meshport importer.

mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use meshport_assets::{FileSource, GltfParser};
use meshport_core::Severity;
use meshport_import::MeshLoader;
use meshport_render::{Entity, MaterialLibrary, MeshSink};

use settings::Settings;

#[derive(Parser)]
#[command(name = "meshport", version, about = "Load 3D scenes into render-ready entities")]
struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a scene and describe the entity it produces
    Inspect {
        /// Scene file, relative to the asset root
        scene: String,

        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the effective settings
    Settings {
        /// Write the effective settings to the settings file
        #[arg(long)]
        write: bool,
    },
}

/// One renderable unit of an imported entity.
#[derive(Debug, Serialize)]
struct UnitSummary {
    vertices: usize,
    indices: usize,
    triangles: usize,
    texture: Option<String>,
    fallback: bool,
    bounds: Option<[[f32; 3]; 2]>,
}

#[derive(Debug, Serialize)]
struct EntitySummary {
    name: String,
    units: Vec<UnitSummary>,
}

fn summarize(entity: &Entity) -> EntitySummary {
    let units = entity
        .iter()
        .map(|renderer| {
            let mesh = renderer.geometry();
            let material = renderer.material();
            UnitSummary {
                vertices: mesh.vertex_count(),
                indices: mesh.index_count(),
                triangles: mesh.triangle_count(),
                texture: material.diffuse_path().map(str::to_string),
                fallback: material.is_fallback(),
                bounds: mesh
                    .bounds()
                    .map(|b| [b.min.to_array(), b.max.to_array()]),
            }
        })
        .collect();

    EntitySummary {
        name: entity.name().to_string(),
        units,
    }
}

fn inspect(settings: &Settings, scene: &str, json: bool) -> Result<()> {
    let source = FileSource::new(settings.assets.root.clone());
    let materials = MaterialLibrary::with_config(&source, settings.material_config());
    let mut loader = MeshLoader::new(GltfParser::new(), MeshSink::new(), materials);

    let entity = loader
        .load_from(&source, scene)
        .with_context(|| format!("Failed to import {}", scene))?;
    let summary = summarize(&entity);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}: {} submeshes", summary.name, summary.units.len());
    for (i, unit) in summary.units.iter().enumerate() {
        let texture = match (&unit.texture, unit.fallback) {
            (Some(path), false) => path.clone(),
            (Some(path), true) => format!("{} (default)", path),
            (None, _) => "(default)".to_string(),
        };
        println!(
            "  [{}] {} vertices, {} indices, texture {}",
            i, unit.vertices, unit.indices, texture
        );
    }
    Ok(())
}

fn show_settings(settings: &Settings, path: Option<&PathBuf>, write: bool) -> Result<()> {
    match path {
        Some(path) => println!("# {}", path.display()),
        None => println!("# (no settings path)"),
    }
    print!("{}", toml::to_string_pretty(settings)?);

    if write {
        let path = path.context("Could not determine config directory")?;
        settings.save_to(path)?;
    }
    Ok(())
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Filter used until the settings are read: `RUST_LOG` if set, otherwise
/// debug with `--verbose` and info without.
fn initial_filter(verbose: bool, env: Option<&str>) -> EnvFilter {
    match env {
        Some(directives) => EnvFilter::new(directives),
        None if verbose => EnvFilter::new("debug"),
        None => EnvFilter::new("info"),
    }
}

/// Build the log subscriber. The returned handle swaps its filter later.
fn logging<W>(
    filter: EnvFilter,
    writer: W,
) -> (impl tracing::Subscriber + Send + Sync, FilterHandle)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(writer));
    (subscriber, handle)
}

fn apply_log_level(handle: &FilterHandle, level: Severity) -> Result<()> {
    handle
        .reload(EnvFilter::new(level.to_string()))
        .context("Failed to apply log level")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging before the settings so their warnings are shown
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (subscriber, filter) =
        logging(initial_filter(cli.verbose, env.as_deref()), std::io::stderr);
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    let settings_path = cli.config.clone().or_else(Settings::default_path);
    let settings = match &settings_path {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    if env.is_none() && !cli.verbose {
        apply_log_level(&filter, settings.log.level)?;
    }

    debug!("Using settings from {:?}", settings_path);

    match cli.command {
        Command::Inspect { scene, json } => {
            info!("Inspecting {}", scene);
            inspect(&settings, &scene, json)
        }
        Command::Settings { write } => show_settings(&settings, settings_path.as_ref(), write),
    }
}
