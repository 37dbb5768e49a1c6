use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use behindtext::{
    Engine, EngineConfig, ExportConstraints, ExportFormat, ExportOptions, NaturalSize,
    NoSegmenter, PrecomputedCutout, ProjectOverlayConfig, RenderTarget, Segmenter, StoredProject,
    TargetMode, decode_overlay, pick_target_size,
};

#[derive(Parser, Debug)]
#[command(name = "behindtext", version)]
struct Cli {
    /// Engine config JSON (fonts, budgets, font dirs).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra directory to load fonts from. Repeatable.
    #[arg(long = "font-dir", global = true)]
    font_dirs: Vec<PathBuf>,

    /// Do not load system fonts.
    #[arg(long, global = true, default_value_t = false)]
    no_system_fonts: bool,

    /// Log at debug level.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Regenerate an export from a stored project and its background.
    Render(RenderArgs),
    /// Print the computed text layout for a target size as JSON.
    Layout(LayoutArgs),
    /// Print the raster size picked for an image.
    Target(TargetArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Png,
    Jpeg,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Background image.
    #[arg(long)]
    background: PathBuf,

    /// Precomputed subject cutout. Without it the background is used as the foreground.
    #[arg(long)]
    foreground: Option<PathBuf>,

    /// Stored project or bare overlay JSON.
    #[arg(long)]
    project: PathBuf,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long)]
    max_width: Option<u32>,

    #[arg(long)]
    max_height: Option<u32>,

    #[arg(long, value_enum, default_value_t = FormatArg::Png)]
    format: FormatArg,

    /// JPEG quality in [0, 1].
    #[arg(long, default_value_t = behindtext::DEFAULT_JPEG_QUALITY)]
    quality: f64,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Stored project or bare overlay JSON.
    #[arg(long)]
    project: PathBuf,

    #[arg(long)]
    width: u32,

    #[arg(long)]
    height: u32,
}

#[derive(Parser, Debug)]
struct TargetArgs {
    /// Natural image width.
    #[arg(long)]
    width: u32,

    /// Natural image height.
    #[arg(long)]
    height: u32,

    /// Export mode: maximum output width.
    #[arg(long, conflicts_with = "viewport")]
    max_width: Option<u32>,

    /// Export mode: optional maximum output height.
    #[arg(long, requires = "max_width")]
    max_height: Option<u32>,

    /// Interactive mode: viewport size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_size)]
    viewport: Option<NaturalSize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _ = tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    match &cli.cmd {
        Command::Render(args) => cmd_render(&cli, args),
        Command::Layout(args) => cmd_layout(&cli, args),
        Command::Target(args) => cmd_target(&cli, args),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    }
    .with_env_overrides();
    config.font_dirs.extend(cli.font_dirs.iter().cloned());
    if cli.no_system_fonts {
        config.load_system_fonts = false;
    }
    Ok(config)
}

fn load_overlay(path: &Path) -> anyhow::Result<ProjectOverlayConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read project '{}'", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parse project '{}'", path.display()))?;
    if value.get("overlay").is_some() {
        Ok(StoredProject::from_reader(text.as_bytes())?.overlay)
    } else {
        Ok(ProjectOverlayConfig::from_json_str(&text)?)
    }
}

fn cmd_render(cli: &Cli, args: &RenderArgs) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    let overlay = load_overlay(&args.project)?;
    let background = std::fs::read(&args.background)
        .with_context(|| format!("read background '{}'", args.background.display()))?;

    let segmenter: Box<dyn Segmenter> = match &args.foreground {
        Some(path) => Box::new(PrecomputedCutout(
            std::fs::read(path).with_context(|| format!("read foreground '{}'", path.display()))?,
        )),
        None => Box::new(NoSegmenter),
    };

    let format = match args.format {
        FormatArg::Png => ExportFormat::Png,
        FormatArg::Jpeg => ExportFormat::Jpeg {
            quality: args.quality,
        },
    };
    let options = ExportOptions {
        constraints: ExportConstraints {
            max_width: args.max_width.unwrap_or(config.export.max_width),
            max_height: args.max_height.or(config.export.max_height),
        },
        format,
    };

    let engine = Engine::new(config);
    let exported = engine.regenerate(&overlay, &background, segmenter.as_ref(), &options)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &exported.bytes)
        .with_context(|| format!("write '{}'", args.out.display()))?;

    for d in &exported.diagnostics {
        eprintln!("note: {d}");
    }
    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        exported.target.width,
        exported.target.height
    );
    Ok(())
}

fn cmd_layout(cli: &Cli, args: &LayoutArgs) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    let spec = decode_overlay(&load_overlay(&args.project)?);
    let target = RenderTarget::new(args.width, args.height).validate()?;

    let engine = Engine::new(config);
    let layout = engine.compositor().layout(&spec, target);
    let b = layout.bounds_px;
    let out = serde_json::json!({
        "fontSizePx": layout.font_size_px,
        "anchorPx": { "x": layout.anchor_px.x, "y": layout.anchor_px.y },
        "boundsPx": { "x": b.x0, "y": b.y0, "width": b.width(), "height": b.height() },
        "rotationRad": layout.rotation_rad,
        "fontFamily": layout.font_chain.to_css(),
        "widthEstimated": layout.width_estimated,
        "substitution": layout.substitution,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_target(cli: &Cli, args: &TargetArgs) -> anyhow::Result<()> {
    let natural = NaturalSize::new(args.width, args.height);
    let mode = match (args.viewport, args.max_width) {
        (Some(viewport), _) => TargetMode::Interactive {
            viewport,
            budget: load_config(cli)?.interactive,
        },
        (None, Some(max_width)) => TargetMode::Export(ExportConstraints {
            max_width,
            max_height: args.max_height,
        }),
        (None, None) => anyhow::bail!("pass either --max-width or --viewport"),
    };
    let target = pick_target_size(natural, &mode);
    println!(
        "{}",
        serde_json::json!({ "width": target.width, "height": target.height })
    );
    Ok(())
}

fn parse_size(s: &str) -> Result<NaturalSize, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let w = w.trim().parse::<u32>().map_err(|e| format!("width: {e}"))?;
    let h = h.trim().parse::<u32>().map_err(|e| format!("height: {e}"))?;
    Ok(NaturalSize::new(w, h))
}
