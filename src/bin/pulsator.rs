use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pulsator", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the pulse schedule of a config as JSON.
    Schedule(ScheduleArgs),
    /// Render the rings at one instant as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct ScheduleArgs {
    /// Pulse config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Pulse config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Time since start, in milliseconds.
    #[arg(long = "at-ms", default_value_t = 0)]
    at_ms: u64,

    /// Square frame size in pixels.
    #[arg(long, default_value_t = 256)]
    size: u32,

    /// Background color (`#RRGGBB`, `#AARRGGBB` or a color name). Transparent when omitted.
    #[arg(long)]
    background: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Schedule(args) => cmd_schedule(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<pulsator::PulseConfig> {
    match path {
        Some(p) => pulsator::PulseConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(pulsator::PulseConfig::default()),
    }
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let schedule = pulsator::build_schedule(&cfg)?;
    let json = serde_json::to_string_pretty(&schedule).context("serialize schedule")?;
    println!("{json}");
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let background = args
        .background
        .as_deref()
        .map(pulsator::parse_color)
        .transpose()
        .map_err(|e| anyhow::anyhow!("background: {e}"))?;

    let mut ctl = pulsator::PulseController::new(
        cfg,
        pulsator::RecordingContainer::new(),
        pulsator::ManualClock::new(),
    )?;
    let side = f64::from(args.size);
    ctl.on_resize(side, side);
    ctl.start()?;
    ctl.clock_mut().advance(args.at_ms);
    ctl.pump()?;

    let mut frame = pulsator::render_frame(&ctl, args.size, args.size, background)?;
    frame.unpremultiply();

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
