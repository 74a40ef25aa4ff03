use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use adcomp::{
    AspectRatio, ComposerConfig, DEFAULT_ANIMATION_FILE_NAME, DEFAULT_STILL_FILE_NAME,
    GifAssembler, GridSpec, ImageSource,
};

#[derive(Parser, Debug)]
#[command(name = "adcomp", version, about = "Caption stills and animate sprite sheets")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Burn a caption into an image and export it as PNG.
    Still(StillArgs),
    /// Slice a sprite sheet, caption every frame and export a looping GIF.
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct CommonArgs {
    /// Caption text; empty draws nothing.
    #[arg(long, default_value = "")]
    caption: String,

    /// Caption font (TrueType/OpenType). Required unless the caption is empty.
    #[arg(long)]
    font: Option<PathBuf>,

    /// JSON composer config; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct StillArgs {
    /// Input image: a file path or a `data:` URI.
    #[arg(long = "in")]
    in_path: String,

    /// Output canvas shape.
    #[arg(long)]
    aspect: Option<AspectRatio>,

    /// Output PNG path.
    #[arg(long, default_value = DEFAULT_STILL_FILE_NAME)]
    out: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Sprite sheet: a file path or a `data:` URI.
    #[arg(long)]
    sheet: String,

    /// Display time of every frame in milliseconds.
    #[arg(long)]
    frame_ms: Option<u32>,

    /// Sprite grid rows.
    #[arg(long)]
    rows: Option<u32>,

    /// Sprite grid columns.
    #[arg(long)]
    cols: Option<u32>,

    /// Output GIF path.
    #[arg(long, default_value = DEFAULT_ANIMATION_FILE_NAME)]
    out: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Still(args) => cmd_still(args),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(common: &CommonArgs) -> anyhow::Result<ComposerConfig> {
    let mut cfg = match &common.config {
        Some(path) => ComposerConfig::from_path(path)?,
        None => ComposerConfig::default(),
    };
    if let Some(font) = &common.font {
        cfg.font_path = Some(font.clone());
    }
    Ok(cfg)
}

fn cmd_still(args: StillArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.common)?;
    if let Some(aspect) = args.aspect {
        cfg.aspect_ratio = aspect;
    }
    cfg.validate()?;

    let mut overlay = cfg.build_overlay(&args.common.caption)?;
    let source = ImageSource::parse(&args.in_path);
    let image = adcomp::export_still(
        &source,
        &args.common.caption,
        cfg.aspect_ratio,
        overlay.as_mut(),
    )?;

    ensure_parent(&args.out)?;
    image.write_to(&args.out)?;
    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        image.width,
        image.height
    );
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.common)?;
    if let Some(ms) = args.frame_ms {
        cfg.frame_duration_ms = ms;
    }
    cfg.grid = GridSpec {
        rows: args.rows.unwrap_or(cfg.grid.rows),
        cols: args.cols.unwrap_or(cfg.grid.cols),
    };
    cfg.validate()?;

    let mut overlay = cfg.build_overlay(&args.common.caption)?;
    let sheet = ImageSource::parse(&args.sheet);
    let asset = adcomp::animate_sprite_sheet(
        &sheet,
        &args.common.caption,
        cfg.grid,
        cfg.timing()?,
        overlay.as_mut(),
        &GifAssembler::new(),
    )?;

    ensure_parent(&args.out)?;
    asset.write_to(&args.out)?;
    eprintln!(
        "wrote {} ({} frames, {}x{}, {} ms/frame)",
        args.out.display(),
        asset.frame_count,
        asset.width,
        asset.height,
        asset.frame_duration_ms
    );
    Ok(())
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
