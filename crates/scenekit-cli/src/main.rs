mod error;
mod script;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use error::{CliError, CliResult};
use scenekit_core::{EditorConfig, SceneEditor, SceneStore, SceneTemplate};
use script::Replay;

#[derive(Parser)]
#[command(
    name = "scenekit",
    version,
    about = "SceneKit: replay scene edit scripts against the manipulation engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an edit script against a scene built from a template
    Run {
        /// Path to the JSON script
        #[arg()]
        script: PathBuf,

        /// Template for the starting scene
        #[arg(short, long, default_value = "title")]
        template: String,

        /// Editor config JSON (quiet period, throttle, guidelines)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the available scene templates
    Templates,

    /// Print a freshly created template scene as JSON
    Show {
        /// Template name, e.g. titleAndVideo
        #[arg()]
        template: String,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = execute(cli.command) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn execute(command: Commands) -> CliResult<()> {
    match command {
        Commands::Run { script, template, config } => {
            let config = match config {
                Some(path) => EditorConfig::from_json_str(&read(&path)?)?,
                None => EditorConfig::default(),
            };
            let steps = script::parse(&read(&script)?)?;
            let scene = template.parse::<SceneTemplate>()?.create();
            let scene_id = scene.id.clone();
            let mut store = SceneStore::new();
            store.add_scene(scene)?;

            let mut replay = Replay::new(SceneEditor::new(store, config), scene_id, Instant::now());
            replay.run(&steps)?;
            log::info!("Replayed {} steps, {} commits", steps.len(), replay.commits());
            println!("{}", replay.editor().store().to_json().map_err(CliError::Output)?);
        }
        Commands::Templates => {
            for template in SceneTemplate::ALL {
                println!("{:<20} {}", template.name(), template.label());
            }
        }
        Commands::Show { template } => {
            let scene = template.parse::<SceneTemplate>()?.create();
            let json = serde_json::to_string_pretty(&scene).map_err(CliError::Output)?;
            println!("{json}");
        }
    }
    Ok(())
}

fn read(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}
