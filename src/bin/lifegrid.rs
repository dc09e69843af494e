use std::{
    fs::File,
    io::BufReader,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lifegrid", version, about = "Life-calendar wallpaper renderer")]
struct Cli {
    #[command(flatten)]
    fonts: FontArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct FontArgs {
    /// Regular TTF/OTF face; well-known system fonts are tried when unset or unreadable.
    #[arg(long = "font", env = "LIFEGRID_FONT", global = true)]
    regular: Option<PathBuf>,

    /// Bold face of the same family.
    #[arg(long = "font-bold", env = "LIFEGRID_FONT_BOLD", global = true)]
    bold: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an input document to PNG.
    Render(RenderArgs),
    /// Write the display list and layout metrics of an input document as JSON.
    Export(ExportArgs),
    /// Keep a PNG up to date, repainting at the top of every minute.
    Preview(PreviewArgs),
    /// Serve `GET /w/{token}/image.png` from a user snapshot.
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input JSON (`settings`, `habits`, `goals`, `reminders`, `now`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Override the render time (`YYYY-MM-DDTHH:MM:SS`, local).
    #[arg(long)]
    now: Option<NaiveDateTime>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Print the resolved font family and faces.
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// Input JSON; its `now` is ignored.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// PNG rewritten on every repaint.
    #[arg(long)]
    out: PathBuf,

    /// Stop after this many frames.
    #[arg(long)]
    frames: Option<u64>,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Listen address.
    #[arg(long, env = "LIFEGRID_BIND", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// JSON snapshot of users keyed by public token.
    #[arg(long, env = "LIFEGRID_DATA", default_value = "data/users.json")]
    data: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lifegrid=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let sources = lifegrid::FontSources {
        regular: cli.fonts.regular,
        bold: cli.fonts.bold,
    };
    let fonts = lifegrid::ensure_fonts_loaded(&sources);

    match cli.cmd {
        Command::Render(args) => cmd_render(args, fonts),
        Command::Export(args) => cmd_export(args),
        Command::Preview(args) => cmd_preview(args, fonts).await,
        Command::Serve(args) => cmd_serve(args, fonts).await,
    }
}

fn read_input(path: &Path) -> anyhow::Result<lifegrid::WallpaperInput> {
    let f = File::open(path).with_context(|| format!("open input '{}'", path.display()))?;
    let input: lifegrid::WallpaperInput =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse input JSON")?;
    Ok(input)
}

fn load(args: &InputArgs) -> anyhow::Result<lifegrid::WallpaperInput> {
    let mut input = read_input(&args.in_path)?;
    if let Some(now) = args.now {
        input.now = now;
    }
    Ok(input)
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_render(args: RenderArgs, fonts: &lifegrid::FontLibrary) -> anyhow::Result<()> {
    if args.dump_fonts {
        eprintln!("font family: {}", fonts.family().unwrap_or("<none>"));
        eprintln!("bold face: {}", if fonts.has_bold() { "yes" } else { "no" });
    }
    let input = load(&args.input)?;
    let png = lifegrid::render_png(&input, fonts)?;

    ensure_parent(&args.out)?;
    std::fs::write(&args.out, &png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct Export<'a> {
    stats: &'a lifegrid::RenderStats,
    display_list: &'a lifegrid::DisplayList,
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let input = load(&args.input)?;
    let (display_list, stats) = lifegrid::render_display_list(&input)?;
    let json = serde_json::to_string_pretty(&Export {
        stats: &stats,
        display_list: &display_list,
    })
    .context("serialize export")?;

    match args.out {
        Some(out) => {
            ensure_parent(&out)?;
            std::fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

async fn cmd_preview(args: PreviewArgs, fonts: &lifegrid::FontLibrary) -> anyhow::Result<()> {
    let input = read_input(&args.in_path)?;
    ensure_parent(&args.out)?;
    let frames = lifegrid::session::preview::run_preview(
        input,
        fonts,
        lifegrid::session::preview::PreviewLoopOpts {
            out: args.out,
            max_frames: args.frames,
        },
    )
    .await?;
    eprintln!("painted {frames} frame(s)");
    Ok(())
}

async fn cmd_serve(args: ServeArgs, fonts: &lifegrid::FontLibrary) -> anyhow::Result<()> {
    let store = lifegrid::server::store::SnapshotStore::load(&args.data).await?;
    let state = lifegrid::server::app::AppState::new(store, Arc::new(fonts.clone()));
    lifegrid::server::app::serve(args.bind, state).await?;
    Ok(())
}
