use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "silhouette", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an avatar preview as SVG (and optionally PNG).
    Render(RenderArgs),
    /// Print the validated descriptor and derived factors as JSON.
    Factors(FactorsArgs),
    /// List the default part catalog as JSON.
    Parts(PartsArgs),
    /// Build, validate and rasterize a body-part composition.
    Compose(ComposeArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input body descriptor JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write a PNG rendering here.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Render options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// PNG scale relative to the canvas size.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
}

#[derive(Parser, Debug)]
struct FactorsArgs {
    /// Input body descriptor JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct PartsArgs {
    /// Only list parts in this category (legacy names such as `arms` are accepted).
    #[arg(long)]
    category: Option<String>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input composition request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Directory that part image paths are resolved against (defaults to the input's directory).
    #[arg(long)]
    assets_root: Option<PathBuf>,

    /// Fail instead of warning when the composition does not validate.
    #[arg(long)]
    strict: bool,
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
        Command::Factors(args) => cmd_factors(args),
        Command::Parts(args) => cmd_parts(args),
        Command::Compose(args) => cmd_compose(args),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_png(path: &Path, img: &image::RgbaImage) -> anyhow::Result<()> {
    ensure_parent(path)?;
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let body: silhouette::BodyDescriptor = read_json(&args.in_path, "body descriptor")?;
    let opts = match &args.config {
        Some(path) => read_json(path, "render options")?,
        None => silhouette::RenderOptions::default(),
    };

    let preview = silhouette::preview_avatar(&body, &opts);
    tracing::info!(
        bmi = preview.factors.bmi,
        width_factor = preview.factors.body_width_factor,
        "avatar rendered"
    );

    ensure_parent(&args.out)?;
    std::fs::write(&args.out, preview.svg())
        .with_context(|| format!("write svg '{}'", args.out.display()))?;
    tracing::info!(path = %args.out.display(), "wrote svg");

    if let Some(png) = &args.png {
        let img = silhouette::rasterize_drawing(&preview.drawing, args.scale)?;
        write_png(png, &img)?;
        tracing::info!(path = %png.display(), "wrote png");
    }
    Ok(())
}

fn cmd_factors(args: FactorsArgs) -> anyhow::Result<()> {
    let body: silhouette::BodyDescriptor = read_json(&args.in_path, "body descriptor")?;
    let validated = body.validate();
    let factors = silhouette::DerivedFactors::from_validated(&validated);
    let out = serde_json::json!({
        "validated": validated,
        "factors": factors,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_parts(args: PartsArgs) -> anyhow::Result<()> {
    let composer = silhouette::BodyPartsComposer::new(silhouette::ComposerConfig::default());
    let parts = match &args.category {
        None => composer.get_all_body_parts(),
        Some(name) => {
            let categories = silhouette::PartCategory::parse_lenient(name);
            if categories.is_empty() {
                tracing::warn!(category = %name, "unknown category");
            }
            categories
                .iter()
                .flat_map(|c| composer.get_body_parts_by_category(c.as_str()))
                .collect()
        }
    };
    println!("{}", serde_json::to_string_pretty(&parts)?);
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let request: silhouette::ComposeRequest = read_json(&args.in_path, "compose request")?;
    let composer = silhouette::BodyPartsComposer::new(silhouette::ComposerConfig::default());
    let composition = composer.compose(request)?;

    let validation = composer.validate_composition(&composition);
    if !validation.valid {
        for err in &validation.errors {
            tracing::warn!(id = %composition.id, "{err}");
        }
        if args.strict {
            anyhow::bail!(
                "composition '{}' is invalid: {}",
                composition.name,
                validation.errors.join("; ")
            );
        }
    }

    let root = match args.assets_root {
        Some(root) => root,
        None => args
            .in_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };
    let resolver = silhouette::DirFragmentResolver::new(root);
    let img = silhouette::rasterize_composition(&composition, &resolver)?;
    write_png(&args.out, &img)?;
    tracing::info!(path = %args.out.display(), parts = composition.parts.len(), "wrote composition");
    Ok(())
}
