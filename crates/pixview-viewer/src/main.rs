use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use winit::dpi::LogicalSize;

use pixview_engine::device::GpuInit;
use pixview_engine::logging::{init_logging, LoggingConfig};
use pixview_engine::window::{Runtime, ViewerConfig};

/// GPU-accelerated raster image viewer.
///
/// Keys: `=`/`-` zoom, arrows pan, `R`/`E` rotate, `0` reset view,
/// `S` toggle smoothing, `C` toggle rotation mode, `Esc` quit.
#[derive(Debug, Parser)]
#[command(name = "pixview", version, about)]
struct Args {
    /// Image file to open (PNG, JPEG, BMP, GIF, ICO, TIFF, WebP).
    image: Option<PathBuf>,

    /// Window title.
    #[arg(long, default_value = "pixview")]
    title: String,

    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 1024.0)]
    width: f64,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 768.0)]
    height: f64,

    /// Log filter in env_logger syntax (overrides RUST_LOG).
    #[arg(long)]
    log: Option<String>,

    /// Present frames without waiting for vsync.
    #[arg(long)]
    no_vsync: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });
    log::info!("starting pixview (image: {:?})", args.image);

    let config = ViewerConfig {
        title: args.title,
        initial_size: LogicalSize::new(args.width, args.height),
        image_path: args.image,
    };

    let gpu_init = GpuInit {
        present_mode: if args.no_vsync {
            wgpu::PresentMode::AutoNoVsync
        } else {
            wgpu::PresentMode::Fifo
        },
        ..GpuInit::default()
    };

    Runtime::run(config, gpu_init)
}
