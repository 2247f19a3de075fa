use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use rs_basecode::app::App;
use rs_basecode::config::AppConfig;
use rs_basecode::model::DrawingMethod;

#[derive(Parser, Debug)]
#[command(name = "rs-basecode")]
#[command(about = "Free-fly camera, OBJ model and GUI demo scenes in a software-rendered window")]
struct Cli {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// OBJ model to show, overrides the config
    #[arg(long)]
    model: Option<PathBuf>,

    /// arrays or elements
    #[arg(long)]
    drawing_method: Option<DrawingMethod>,

    /// Index of the first demo scene
    #[arg(long)]
    scene: Option<usize>,

    /// Log the frame rate once a second
    #[arg(long)]
    print_fps: bool,
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading config")?;
    if let Some(model) = cli.model {
        config.model.path = model;
    }
    if let Some(method) = cli.drawing_method {
        config.model.drawing_method = method;
    }
    if let Some(scene) = cli.scene {
        config.start_scene = scene;
    }
    config.print_fps |= cli.print_fps;

    let mut app = App::new(&config)
        .with_context(|| format!("starting with model {}", config.model.path.display()))?;
    app.run().context("running the frame loop")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    run(cli).inspect_err(|err| error!("{err:#}"))
}
