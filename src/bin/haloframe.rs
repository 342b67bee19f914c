use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use haloframe::{
    DEFAULT_EXPORT_NAME, EditorSession, FrameConfig, HexColor, InputEvent, Point, Vec2,
};

#[derive(Parser, Debug)]
#[command(name = "haloframe", version)]
struct Cli {
    /// Log filter (e.g. `warn`, `haloframe=debug`).
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a profile picture and write it as PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Frame config JSON; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Photo to place inside the frame.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Banner text.
    #[arg(long)]
    text: Option<String>,

    /// Text colour (#RRGGBB).
    #[arg(long)]
    text_color: Option<HexColor>,

    /// Banner gradient colour at the 9 o'clock end (#RRGGBB).
    #[arg(long)]
    banner_color_1: Option<HexColor>,

    /// Banner gradient colour at the 5 o'clock end (#RRGGBB).
    #[arg(long)]
    banner_color_2: Option<HexColor>,

    /// Banner opacity in [0,1].
    #[arg(long)]
    opacity: Option<f64>,

    /// Font size in pixels.
    #[arg(long)]
    font_size: Option<u32>,

    /// Font file to use instead of the system sans-serif.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Surface edge in pixels.
    #[arg(long)]
    size: Option<u32>,

    /// Zoom applied to the photo.
    #[arg(long)]
    zoom: Option<f64>,

    /// Pan the photo by `dx,dy` pixels.
    #[arg(long, value_parser = parse_vec2, allow_hyphen_values = true)]
    drag: Option<Vec2>,

    /// Output PNG path.
    #[arg(long, default_value = DEFAULT_EXPORT_NAME)]
    out: PathBuf,

    /// Print the per-character arc placement to stderr.
    #[arg(long)]
    dump_layout: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&cli.log))
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn parse_vec2(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected dx,dy, got \"{s}\""))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad dx \"{x}\": {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad dy \"{y}\": {e}"))?;
    Ok(Vec2::new(x, y))
}

fn load_config(args: &RenderArgs) -> anyhow::Result<FrameConfig> {
    let mut cfg = match &args.config {
        Some(path) => FrameConfig::from_path(path)?,
        None => FrameConfig::default(),
    };
    if let Some(px) = args.size {
        cfg.surface_px = px;
    }
    if let Some(path) = &args.font {
        cfg.font.path = Some(path.clone());
    }
    let style = &mut cfg.style;
    if let Some(text) = &args.text {
        style.text = text.clone();
    }
    if let Some(c) = &args.text_color {
        style.text_color = c.clone();
    }
    if let Some(c) = &args.banner_color_1 {
        style.banner_color_1 = c.clone();
    }
    if let Some(c) = &args.banner_color_2 {
        style.banner_color_2 = c.clone();
    }
    if let Some(v) = args.opacity {
        style.banner_opacity = v;
    }
    if let Some(px) = args.font_size {
        style.font_size_px = px;
    }
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;
    let mut session = EditorSession::new(cfg)?;

    if let Some(path) = &args.image {
        let bytes =
            std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        session
            .load_image_bytes(&bytes)
            .with_context(|| format!("load image '{}'", path.display()))?;
    }
    if let Some(z) = args.zoom {
        session.handle(InputEvent::Zoom(z))?;
    }
    if let Some(d) = args.drag {
        let start = session.surface().center();
        session.handle(InputEvent::PointerDown(start))?;
        session.handle(InputEvent::PointerMove(start + d))?;
        session.handle(InputEvent::PointerUp)?;
    }

    if args.dump_layout {
        dump_layout(&mut session);
    }

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    haloframe::write_png(session.frame(), &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn dump_layout(session: &mut EditorSession) {
    let layout = session.text_layout();
    let b = layout.banner;
    eprintln!("banner:");
    eprintln!("  radius:      {:.3}", b.radius);
    eprintln!("  thickness:   {:.3}", b.thickness);
    eprintln!("  start_angle: {:.6}", layout.start_angle);
    eprintln!("  total_angle: {:.6}", layout.total_angle);
    for c in &layout.chars {
        let p: Point = c.anchor(b.center, b.radius);
        eprintln!(
            "  {:?} (#{}): angle={:.6} width={:.3} at=({:.1}, {:.1})",
            c.ch, c.source_index, c.angle, c.width, p.x, p.y
        );
    }
}
