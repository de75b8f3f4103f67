use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "printfit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a product preview as PNG or JPEG (chosen by the output extension).
    Render(RenderArgs),
    /// Print the resolved template geometry and auto-fit transform as JSON.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Product record JSON (title, category, customizationConfig).
    #[arg(long)]
    product: PathBuf,

    /// Customer photo; repeat for collages.
    #[arg(long = "image")]
    images: Vec<PathBuf>,

    /// Output path (.png, .jpg or .jpeg).
    #[arg(long)]
    out: PathBuf,

    /// Zoom presses to replay; negative values zoom out.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    zoom_steps: i32,

    /// Rotate presses to replay (quarter turns).
    #[arg(long, default_value_t = 0)]
    rotate_steps: u32,

    /// Drag the photo by DX,DY canvas pixels.
    #[arg(long, value_parser = parse_drag, allow_hyphen_values = true)]
    drag: Option<(f64, f64)>,

    /// TTF/OTF font for placeholder labels (overrides PRINTFIT_LABEL_FONT).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Canvas width (overrides PRINTFIT_CANVAS_WIDTH).
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height (overrides PRINTFIT_CANVAS_HEIGHT).
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Product record JSON.
    #[arg(long)]
    product: PathBuf,

    /// Photo to compute the auto-fit transform for.
    #[arg(long)]
    image: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn parse_drag(s: &str) -> Result<(f64, f64), String> {
    let (dx, dy) = s
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got '{s}'"))?;
    let dx = dx.trim().parse::<f64>().map_err(|e| format!("bad DX: {e}"))?;
    let dy = dy.trim().parse::<f64>().map_err(|e| format!("bad DY: {e}"))?;
    Ok((dx, dy))
}

fn read_product(path: &Path) -> anyhow::Result<printfit::ProductRecord> {
    printfit::ProductRecord::from_path(path)
        .with_context(|| format!("load product '{}'", path.display()))
}

fn read_bytes(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let record = read_product(&args.product)?;
    if let Some(cat) = &record.category
        && !printfit::is_customizable_category(cat.title())
    {
        tracing::warn!(category = cat.title(), "category is not customizable, rendering anyway");
    }

    let mut opts = printfit::PreviewOpts::from_env();
    if let Some(w) = args.width {
        opts.canvas.width = w;
    }
    if let Some(h) = args.height {
        opts.canvas.height = h;
    }
    if args.font.is_some() {
        opts.label_font = args.font.clone();
    }

    let mut session = printfit::PreviewSession::new(
        &record.context(),
        record.customization_config.as_ref(),
        &opts,
    )?;

    for path in &args.images {
        let bytes = read_bytes(path)?;
        session
            .load_image(&bytes)
            .with_context(|| format!("load image '{}'", path.display()))?;
    }

    for _ in 0..args.zoom_steps.unsigned_abs() {
        if args.zoom_steps > 0 {
            session.zoom_in();
        } else {
            session.zoom_out();
        }
    }
    for _ in 0..args.rotate_steps {
        session.rotate();
    }
    if let Some((dx, dy)) = args.drag {
        let displayed = session.surface().canvas().size();
        let start = session.template().print_area.center();
        session.pointer_down(start, displayed);
        session.pointer_move(start + printfit::Vec2::new(dx, dy), displayed);
        session.pointer_up();
    }

    let ext = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let format = printfit::ExportFormat::from_extension(ext)
        .with_context(|| format!("unsupported output extension '{ext}' (use png or jpg)"))?;
    let bytes = printfit::export::encode(&session.frame(), format)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &bytes)
        .with_context(|| format!("write preview '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let record = read_product(&args.product)?;
    let template =
        printfit::Template::resolve(record.customization_config.as_ref(), &record.context());

    let auto_fit = match &args.image {
        Some(path) => {
            let img = printfit::UploadedImage::decode(&read_bytes(path)?)
                .with_context(|| format!("decode image '{}'", path.display()))?;
            Some(printfit::auto_fit(img.size(), template.fit_area))
        }
        None => None,
    };

    let report = serde_json::json!({
        "title": record.title,
        "category": record.category.as_ref().map(|c| c.title()),
        "customizable": record
            .category
            .as_ref()
            .is_some_and(|c| printfit::is_customizable_category(c.title())),
        "template": template,
        "auto_fit": auto_fit,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
