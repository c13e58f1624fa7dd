use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use globset::{Glob, GlobSet, GlobSetBuilder};
use image::{DynamicImage, ImageReader};
use serde::Deserialize;
use spriteatlas_core::packer::PackFailure;
use spriteatlas_core::{
    AtlasConfig, AtlasStats, InputImage, OutputFormat, WidthEstimate, pack_images, pack_layout,
    render,
};
use tracing::{error, info, warn};
use walkdir::{DirEntry, WalkDir};

#[derive(Parser, Debug)]
#[command(
    name = "spriteatlas",
    about = "Pack sprites into a single atlas image plus metadata",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack images into an atlas PNG and a metadata file
    Pack(PackArgs),
    /// Metadata only (no PNG): sizes are read from image headers
    Layout(PackArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Input file or directory
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// File tag: artifacts are written as <tag>.png and <tag>.<ext>
    #[arg(short, long, default_value = "sprites", help_heading = "Input/Output")]
    name: String,
    /// YAML config file; keys present in it override the flags
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    // Layout
    /// Keep one pixel between packed sprites
    #[arg(long, default_value_t = true, action=ArgAction::Set, help_heading = "Layout")]
    padding: bool,
    /// Widest-sprite rule of the canvas estimate: accumulate | running_max
    #[arg(long, default_value = "accumulate", help_heading = "Layout")]
    width_estimate: String,

    // Export
    /// Metadata format: json-array | json (alias) | json-hash | libgdx | css | xml
    #[arg(long, default_value = "json-array", help_heading = "Export")]
    format: String,
    /// Export packing stats (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_stats: Option<PathBuf>,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: compute layout and stats but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    let show_progress = cli.progress && !cli.quiet;
    match &cli.command {
        Commands::Pack(args) => run_pack(args, show_progress),
        Commands::Layout(args) => run_layout(args, show_progress),
    }
}

/// Flags first, then the YAML file on top.
fn resolve_config(cli: &PackArgs) -> anyhow::Result<AtlasConfig> {
    let output_format = parse_format(&cli.format)?;
    let width_estimate = parse_width_estimate(&cli.width_estimate)?;
    let mut cfg = AtlasConfig::builder()
        .file_tag(cli.name.clone())
        .output_format(output_format)
        .add_padding(cli.padding)
        .width_estimate(width_estimate)
        .build();
    if let Some(path) = &cli.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)
            .with_context(|| format!("parse config {}", path.display()))?;
        cfg = y.apply(cfg)?;
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Prints the merged config when asked; returns true if the caller should stop.
fn maybe_print_config(cli: &PackArgs, cfg: &AtlasConfig) -> anyhow::Result<bool> {
    if !cli.print_config {
        return Ok(false);
    }
    match cli.print_config_format.as_str() {
        "yaml" => println!("{}", serde_yaml::to_string(cfg)?),
        _ => println!("{}", serde_json::to_string_pretty(cfg)?),
    }
    Ok(true)
}

fn run_pack(cli: &PackArgs, show_progress: bool) -> anyhow::Result<()> {
    let cfg = resolve_config(cli)?;
    if maybe_print_config(cli, &cfg)? {
        return Ok(());
    }

    let paths = gather_paths(&cli.input, &cli.include, &cli.exclude)?;
    let inputs = load_images_with_progress(&cli.input, &paths, show_progress)?;
    info!(count = inputs.len(), "loaded input images");

    let out = pack_images(inputs, &cfg)?;
    let stats = out.layout.atlas.stats();
    report_failures(&out.layout.failures);
    info!(
        width = out.layout.atlas.width,
        height = out.layout.atlas.height,
        "{}",
        stats.summary()
    );

    if !cli.dry_run {
        fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("create out_dir {}", cli.out_dir.display()))?;
        let png_path = cli.out_dir.join(cfg.image_name());
        out.rgba
            .save(&png_path)
            .with_context(|| format!("write {}", png_path.display()))?;
        info!(?png_path, "atlas image written");

        let meta_path = cli.out_dir.join(cfg.metadata_name());
        fs::write(&meta_path, &out.metadata).with_context(|| {
            format!(
                "write {} (atlas image {} was already saved)",
                meta_path.display(),
                png_path.display()
            )
        })?;
        info!(?meta_path, format = ?cfg.output_format, "metadata written");
    }

    export_stats(cli, &stats)
}

fn run_layout(cli: &PackArgs, show_progress: bool) -> anyhow::Result<()> {
    let cfg = resolve_config(cli)?;
    if maybe_print_config(cli, &cfg)? {
        return Ok(());
    }

    let paths = gather_paths(&cli.input, &cli.include, &cli.exclude)?;
    let items = read_dimensions_with_progress(&cli.input, &paths, show_progress)?;
    info!(count = items.len(), "read input dimensions");

    let out = pack_layout(items, &cfg)?;
    let stats = out.atlas.stats();
    report_failures(&out.failures);
    info!(
        width = out.atlas.width,
        height = out.atlas.height,
        "{}",
        stats.summary()
    );

    if !cli.dry_run {
        fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("create out_dir {}", cli.out_dir.display()))?;
        let meta_path = cli.out_dir.join(cfg.metadata_name());
        fs::write(&meta_path, render(cfg.output_format, &out.atlas))
            .with_context(|| format!("write {}", meta_path.display()))?;
        info!(?meta_path, format = ?cfg.output_format, "metadata written (layout-only)");
    }

    export_stats(cli, &stats)
}

fn report_failures(failures: &[PackFailure]) {
    if failures.is_empty() {
        return;
    }
    let names: Vec<&str> = failures.iter().map(|f| f.name.as_str()).collect();
    warn!(
        failed = failures.len(),
        sprites = ?names,
        "some sprites did not fit and were left at the origin; the atlas is incomplete"
    );
}

fn export_stats(cli: &PackArgs, stats: &AtlasStats) -> anyhow::Result<()> {
    let Some(stats_path) = &cli.export_stats else {
        return Ok(());
    };
    if cli.dry_run {
        println!("{}", stats.summary());
        return Ok(());
    }
    fs::write(stats_path, serde_json::to_string_pretty(stats)?)
        .with_context(|| format!("write {}", stats_path.display()))?;
    info!(?stats_path, "stats exported");
    Ok(())
}

fn parse_format(s: &str) -> anyhow::Result<OutputFormat> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown metadata format: {}", s))
}

fn parse_width_estimate(s: &str) -> anyhow::Result<WidthEstimate> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown width estimate: {}", s))
}

fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let inc_set = build_globset(include)?;
    let exc_set = build_globset(exclude)?;
    let mut list: Vec<PathBuf> = Vec::new();
    if path.is_file() {
        if !should_skip(path, inc_set.as_ref(), exc_set.as_ref()) && is_image(path) {
            list.push(path.to_path_buf());
        }
    } else {
        let walker = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));
        for entry in walker.filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && !should_skip(p, inc_set.as_ref(), exc_set.as_ref()) && is_image(p) {
                list.push(p.to_path_buf());
            }
        }
    }
    Ok(list)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut b = GlobSetBuilder::new();
    for pat in patterns {
        b.add(Glob::new(pat).with_context(|| format!("invalid glob {}", pat))?);
    }
    Ok(Some(b.build()?))
}

/// Dot-prefixed entries stand in for hidden layers and never become sprites.
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

fn should_skip(p: &Path, include: Option<&GlobSet>, exclude: Option<&GlobSet>) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if exclude.is_some_and(|ex| ex.is_match(&s)) {
        return true;
    }
    if include.is_some_and(|inc| !inc.is_match(&s)) {
        return true;
    }
    false
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "bmp" | "tga" | "gif")
    )
}

/// Raw sprite name: the path relative to the input root with `/` separators.
fn sprite_name(root: &Path, p: &Path) -> String {
    let rel = match p.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel,
        _ => Path::new(p.file_name().unwrap_or(p.as_os_str())),
    };
    rel.to_string_lossy().replace('\\', "/")
}

fn progress_bar(len: usize, verb: &str, enabled: bool) -> anyhow::Result<Option<indicatif::ProgressBar>> {
    use indicatif::{ProgressBar, ProgressStyle};
    if !enabled {
        return Ok(None);
    }
    let b = ProgressBar::new(len as u64);
    b.set_style(ProgressStyle::with_template(&format!(
        "{{spinner:.green}} {} {{pos}}/{{len}} [{{elapsed_precise}}] {{wide_msg}}",
        verb
    ))?);
    Ok(Some(b))
}

fn load_images_with_progress(
    root: &Path,
    paths: &[PathBuf],
    progress: bool,
) -> anyhow::Result<Vec<InputImage>> {
    let bar = progress_bar(paths.len(), "loading", progress)?;
    let mut list = Vec::with_capacity(paths.len());
    for p in paths {
        let name = sprite_name(root, p);
        if let Some(b) = &bar {
            b.set_message(name.clone());
        }
        match load_image(p) {
            Ok(image) => list.push(InputImage { name, image }),
            Err(e) => {
                error!(?p, error = %e, "skip image");
            }
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(list)
}

fn read_dimensions_with_progress(
    root: &Path,
    paths: &[PathBuf],
    progress: bool,
) -> anyhow::Result<Vec<(String, u32, u32)>> {
    let bar = progress_bar(paths.len(), "reading", progress)?;
    let mut list = Vec::with_capacity(paths.len());
    for p in paths {
        let name = sprite_name(root, p);
        if let Some(b) = &bar {
            b.set_message(name.clone());
        }
        match image::image_dimensions(p) {
            Ok((w, h)) => list.push((name, w, h)),
            Err(e) => {
                error!(?p, error = %e, "skip image");
            }
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(list)
}

fn load_image(p: &Path) -> anyhow::Result<DynamicImage> {
    let img = ImageReader::open(p)?.with_guessed_format()?.decode()?;
    Ok(img)
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    file_tag: Option<String>,
    output_format: Option<String>,
    add_padding: Option<bool>,
    width_estimate: Option<String>,
}

impl YamlConfig {
    fn apply(self, mut cfg: AtlasConfig) -> anyhow::Result<AtlasConfig> {
        if let Some(v) = self.file_tag {
            cfg.file_tag = v;
        }
        if let Some(v) = self.output_format {
            cfg.output_format = parse_format(&v)?;
        }
        if let Some(v) = self.add_padding {
            cfg.add_padding = v;
        }
        if let Some(v) = self.width_estimate {
            cfg.width_estimate = parse_width_estimate(&v)?;
        }
        Ok(cfg)
    }
}
