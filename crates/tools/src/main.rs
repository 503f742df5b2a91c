use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use globe::{Globe, Theme};
use gpu::WgpuDevice;
use runtime::HeadlessHost;
use scene::InputEvent;
use surface::{FillRule, LandMaskConfig, LandMaskResource, generate_dots};
use tools::{DotSummary, ToolError, backdrop, load_config, load_markers, write_dots_csv, write_pgm, write_ppm};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless renderer and data dumps for the point-cloud globe")]
struct Args {
    /// Globe config JSON; every field is optional
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FillArg {
    NonZero,
    EvenOdd,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DotFormat {
    Summary,
    Csv,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render frames and write the last one as a PPM image
    Render {
        /// Output image
        #[arg(long, default_value = "globe.ppm")]
        out: PathBuf,

        /// Marker list JSON (defaults to the built-in showcase set)
        #[arg(long)]
        markers: Option<PathBuf>,

        /// Write the last overlay frame here instead of stdout
        #[arg(long)]
        overlay: Option<PathBuf>,

        /// Surface width in CSS pixels (defaults to the config)
        #[arg(long)]
        width: Option<f64>,

        /// Surface height in CSS pixels (defaults to the config)
        #[arg(long)]
        height: Option<f64>,

        #[arg(long)]
        pixel_ratio: Option<f64>,

        /// Frames to run before capturing
        #[arg(long, default_value_t = 1)]
        frames: u32,

        /// Horizontal drag in pixels applied before the first frame
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        drag_x: f64,

        /// Vertical drag in pixels applied before the first frame
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        drag_y: f64,

        /// Wheel delta applied before the first frame
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        wheel: f64,

        #[arg(long)]
        dark: bool,
    },

    /// Rasterize the world outlines and write the land mask as a PGM image
    Mask {
        #[arg(long, default_value = "land_mask.pgm")]
        out: PathBuf,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        height: Option<u32>,

        #[arg(long, value_enum)]
        fill_rule: Option<FillArg>,
    },

    /// Generate the dot field and print a summary or the points
    Dots {
        #[arg(long)]
        count: Option<usize>,

        #[arg(long, value_enum, default_value_t = DotFormat::Summary)]
        format: DotFormat,

        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

type BoxError = Box<dyn std::error::Error>;

fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Render {
            out,
            markers,
            overlay,
            width,
            height,
            pixel_ratio,
            frames,
            drag_x,
            drag_y,
            wheel,
            dark,
        } => {
            let opts = RenderOptions {
                width,
                height,
                pixel_ratio,
                frames,
                drag: [drag_x, drag_y],
                wheel,
                dark,
            };
            render(args.config.as_deref(), markers.as_deref(), &out, overlay.as_deref(), opts)?
        }
        Command::Mask {
            out,
            width,
            height,
            fill_rule,
        } => mask(args.config.as_deref(), &out, width, height, fill_rule)?,
        Command::Dots { count, format, out } => dots(args.config.as_deref(), count, format, out.as_deref())?,
    }
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>, ToolError> {
    File::create(path).map(BufWriter::new).map_err(|source| ToolError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn output(path: Option<&Path>) -> Result<Box<dyn Write>, ToolError> {
    Ok(match path {
        Some(path) => Box::new(create(path)?),
        None => Box::new(io::stdout().lock()),
    })
}

struct RenderOptions {
    width: Option<f64>,
    height: Option<f64>,
    pixel_ratio: Option<f64>,
    frames: u32,
    drag: [f64; 2],
    wheel: f64,
    dark: bool,
}

fn render(
    config: Option<&Path>,
    markers: Option<&Path>,
    out: &Path,
    overlay_out: Option<&Path>,
    opts: RenderOptions,
) -> Result<(), BoxError> {
    let config = load_config(config)?;
    let markers = load_markers(markers)?;
    let land = LandMaskResource::world(config.land_mask);
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let device = pollster::block_on(WgpuDevice::offscreen(&instance)).map_err(ToolError::from)?;
    info!(format = ?device.format(), "offscreen device ready");
    let mut globe = Globe::new(
        &land,
        markers,
        Theme::for_dark_mode(opts.dark),
        config,
        Box::new(device),
    )?;

    let width = opts.width.unwrap_or(config.surface.width);
    let height = opts.height.unwrap_or(config.surface.height);
    let pixel_ratio = opts.pixel_ratio.unwrap_or(config.surface.pixel_ratio);
    if !globe.resize(width, height, pixel_ratio)? {
        return Err(ToolError::BadSize { width, height }.into());
    }

    let [dx, dy] = opts.drag;
    if dx != 0.0 || dy != 0.0 {
        globe.handle_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        globe.handle_input(InputEvent::PointerMove { x: dx, y: dy });
        globe.handle_input(InputEvent::PointerUp);
    }
    if opts.wheel != 0.0 {
        globe.handle_input(InputEvent::Wheel { delta_y: opts.wheel });
    }

    let mut host = HeadlessHost::new();
    globe.start(&mut host)?;
    let mut overlay = globe.overlay();
    for i in 0..opts.frames.max(1) {
        let Some(ticket) = host.frames.fire() else {
            break;
        };
        if let Some(frame) = globe.on_frame(&mut host, ticket, f64::from(i) * 1000.0 / 60.0) {
            overlay = frame;
        }
    }

    let size = globe.scene().map(|scene| scene.surface_size());
    if let (Some(size), Some(pixels)) = (size, globe.read_pixels()?) {
        let mut file = create(out)?;
        write_ppm(&mut file, size.width, size.height, &pixels, backdrop(opts.dark))?;
        file.flush()?;
        info!(
            path = %out.display(),
            width = size.width,
            height = size.height,
            cards = overlay.markers.len(),
            "wrote frame"
        );
    }

    let mut sink = output(overlay_out)?;
    serde_json::to_writer_pretty(&mut sink, &overlay)?;
    writeln!(sink)?;
    globe.teardown(&mut host);
    Ok(())
}

fn mask(
    config: Option<&Path>,
    out: &Path,
    width: Option<u32>,
    height: Option<u32>,
    fill_rule: Option<FillArg>,
) -> Result<(), BoxError> {
    let base = load_config(config)?.land_mask;
    let mask_config = LandMaskConfig {
        width: width.unwrap_or(base.width),
        height: height.unwrap_or(base.height),
        fill_rule: match fill_rule {
            Some(FillArg::NonZero) => FillRule::NonZero,
            Some(FillArg::EvenOdd) => FillRule::EvenOdd,
            None => base.fill_rule,
        },
    };
    let land = LandMaskResource::world(mask_config);
    let mask = land.get();
    let mut file = create(out)?;
    write_pgm(&mut file, mask)?;
    file.flush()?;
    info!(
        path = %out.display(),
        land_cells = mask.land_cells(),
        skipped = mask.skipped_polygons(),
        "wrote land mask"
    );
    Ok(())
}

fn dots(config: Option<&Path>, count: Option<usize>, format: DotFormat, out: Option<&Path>) -> Result<(), BoxError> {
    let config = load_config(config)?;
    let land = LandMaskResource::world(config.land_mask);
    let field = generate_dots(count.unwrap_or(config.dots.count), config.dots.radius, land.get());
    let mut sink = output(out)?;
    match format {
        DotFormat::Summary => {
            serde_json::to_writer_pretty(&mut sink, &DotSummary::of(&field))?;
            writeln!(sink)?;
        }
        DotFormat::Csv => write_dots_csv(&mut sink, &field)?,
    }
    sink.flush()?;
    Ok(())
}
