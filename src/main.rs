use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use eframe::egui;

use gallery_room::camera::Viewport;
use gallery_room::content::GalleryManifest;
use gallery_room::layout::LayoutStrategy;
use gallery_room::net::{CachedImageSource, HttpImageSource};
use gallery_room::viewer::Carousel;
use gallery_room::GalleryRoom;

mod app;

use app::GalleryApp;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    AutoFit,
    Scattered,
}

impl From<StrategyArg> for LayoutStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::AutoFit => LayoutStrategy::AutoFit,
            StrategyArg::Scattered => LayoutStrategy::Scattered,
        }
    }
}

/// Walk through a room of paintings.
#[derive(Debug, Parser)]
#[command(name = "gallery-room", version)]
struct Args {
    /// Gallery manifest (JSON: paintings + optional config)
    manifest: PathBuf,

    /// Override the manifest's arrangement strategy
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Seed for a reproducible arrangement
    #[arg(long)]
    seed: Option<u64>,

    /// Initial window width
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Initial window height
    #[arg(long, default_value_t = 800.0)]
    height: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let manifest = GalleryManifest::load(&args.manifest)?;
    let mut config = manifest.config;
    if let Some(strategy) = args.strategy {
        config.room.strategy = strategy.into();
    }
    log::info!(
        "Opening {} paintings ({:?})",
        manifest.paintings.len(),
        config.room.strategy
    );

    let source = Arc::new(CachedImageSource::new(HttpImageSource::new()));
    let room = GalleryRoom::spawn(
        manifest.paintings,
        config,
        source,
        Viewport::new(args.width, args.height),
        args.seed,
        Carousel::new(),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    eframe::run_native(
        "Gallery Room",
        options,
        Box::new(move |_cc| Ok(Box::new(GalleryApp::new(room)))),
    )?;
    Ok(())
}
