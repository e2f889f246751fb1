use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use conrad_scene::{ExportOptions, MeshKind, export_to_path, load_scene};

/// Exports an OBJ or glTF scene into a Conrad `.scene` file.
#[derive(Debug, Parser)]
#[command(name = "conrad-export", version, about)]
struct Args {
    /// Scene to export (`.obj`, `.gltf` or `.glb`).
    input: PathBuf,

    /// Output file. Defaults to the input path with a `.scene` extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// How the engine should treat the exported meshes.
    #[arg(long, value_enum, default_value_t = MeshKindArg::Static)]
    mesh_kind: MeshKindArg,

    /// Log every skipped entity as well.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MeshKindArg {
    Static,
    Dynamic,
    Streamed,
}

impl From<MeshKindArg> for MeshKind {
    fn from(kind: MeshKindArg) -> Self {
        match kind {
            MeshKindArg::Static => MeshKind::Static,
            MeshKindArg::Dynamic => MeshKind::Dynamic,
            MeshKindArg::Streamed => MeshKind::Streamed,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("scene"));

    let options = ExportOptions {
        mesh_kind: args.mesh_kind.into(),
    };
    log::info!("Exporting {} to {}", args.input.display(), output.display());

    let scene = match load_scene(&args.input, &options) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    match export_to_path(&scene, &output) {
        Ok(total) => {
            log::info!("Done exporting {} kB.", total as f64 / 1000.0);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to export {}: {e}", output.display());
            log::error!("An error occurred, removing the corrupt output file");
            if let Err(e) = std::fs::remove_file(&output) {
                log::error!("Unable to remove {}: {e}", output.display());
            }
            ExitCode::FAILURE
        }
    }
}
