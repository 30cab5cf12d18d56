use clap::{Args, Parser, Subcommand, ValueEnum};
use responsive_picture::imaging::RustProbe;
use responsive_picture::static_image::{
    self, STATIC_MODEL, STATIC_ROLE, StaticFiles, StaticImage, StaticRatios,
};
use responsive_picture::{
    GlideUrls, ImageRequest, Loading, MediaLibrary, MediaLookup, Preset, RenderOptions, Resolver,
    Settings, assemble, config, markup, output,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "responsive-picture")]
#[command(about = "Responsive <picture> markup for media library images")]
#[command(long_about = "\
Responsive <picture> markup for media library images

Resolves an image role of a model into crops, srcset candidates and
transform-service URLs, then renders the wrapper, placeholder and image
markup.

Settings are read from picture.toml in the config directory. Named presets
bundle crop, size, sizes/columns and alternate sources.

Run 'responsive-picture gen-config' to generate a documented picture.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing picture.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Worker threads for resolving alternate sources (default: all cores)
    #[arg(long, global = true)]
    jobs: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Human-readable summary of the resolved image
    Summary,
    /// Template attributes as JSON
    Json,
    /// Rendered HTML
    Html,
}

/// Flags shared by every command that renders.
#[derive(Args)]
struct RenderArgs {
    /// Named preset from picture.toml
    #[arg(long)]
    preset: Option<String>,

    /// Crop name (overrides the preset)
    #[arg(long)]
    crop: Option<String>,

    /// Target width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Target height in pixels (fixed-height crop)
    #[arg(long)]
    height: Option<u32>,

    /// Literal `sizes` attribute
    #[arg(long)]
    sizes: Option<String>,

    /// Disable the low-quality placeholder
    #[arg(long)]
    no_lqip: bool,

    /// Load eagerly instead of lazily
    #[arg(long)]
    eager: bool,

    #[arg(long, value_enum, default_value = "summary")]
    format: Format,
}

#[derive(Subcommand)]
enum Command {
    /// Render an image role from a media library JSON file
    Render {
        /// Media library: JSON list of records
        #[arg(long)]
        media: PathBuf,

        /// Model key, e.g. "article:12"
        #[arg(long)]
        model: String,

        /// Image role within the model
        #[arg(long)]
        role: String,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Render a local file without a media library
    Static {
        /// Directory the files are relative to
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Image file, or `crop=path` once per crop
        #[arg(long = "file", required = true)]
        files: Vec<String>,

        /// Output ratio (width/height), or `crop=ratio` once per crop
        #[arg(long = "ratio")]
        ratios: Vec<String>,

        /// Alt text
        #[arg(long)]
        alt: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Validate picture.toml and list its presets
    Check,
    /// Print a stock picture.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_thread_pool(cli.jobs);

    match cli.command {
        Command::Render {
            media,
            model,
            role,
            render,
        } => {
            let settings = config::load_config(&cli.config_dir)?;
            let library = MediaLibrary::from_json(&std::fs::read_to_string(&media)?)?;
            render_image(&settings, &library, &model, &role, &render)?;
        }
        Command::Static {
            root,
            files,
            ratios,
            alt,
            render,
        } => {
            let settings = config::load_config(&cli.config_dir)?;
            let preset = render
                .preset
                .as_deref()
                .map(|name| settings.preset(name))
                .transpose()?;
            let image = StaticImage {
                root,
                files: parse_files(&files)?,
                ratios: parse_ratios(&ratios)?,
                alt,
            };
            let library = static_image::make_library(&RustProbe::new(), &image, preset)?;
            render_image(&settings, &library, STATIC_MODEL, STATIC_ROLE, &render)?;
        }
        Command::Check => {
            println!("==> Checking {}", config_path(&cli.config_dir).display());
            let settings = config::load_config(&cli.config_dir)?;
            output::print_settings(&settings);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn render_image(
    settings: &Settings,
    library: &dyn MediaLookup,
    model: &str,
    role: &str,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut request = ImageRequest::new(model, role);
    if let Some(name) = &args.preset {
        request = request.preset(settings.preset(name)?);
    }
    request = apply_overrides(request, args);

    let urls: GlideUrls = settings.url_builder();
    let resolved = Resolver::new(library, &urls, &settings.columns)
        .webp(settings.webp_support)
        .resolve(&request)?;

    let options = RenderOptions {
        lqip: args.no_lqip.then_some(false),
        loading: args.eager.then_some(Loading::Eager),
        ..RenderOptions::default()
    };

    match args.format {
        Format::Summary => output::print_resolved(role, model, &resolved),
        Format::Json => {
            let attrs = assemble(&resolved, &options, &settings.render_defaults());
            println!("{}", serde_json::to_string_pretty(&attrs.to_json_map()?)?);
        }
        Format::Html => {
            let attrs = assemble(&resolved, &options, &settings.render_defaults());
            println!("{}", markup::render(&attrs).into_string());
        }
    }
    Ok(())
}

/// Command-line flags win over the preset.
fn apply_overrides(request: ImageRequest, args: &RenderArgs) -> ImageRequest {
    let overrides = Preset {
        crop: args.crop.clone(),
        width: args.width,
        height: args.height,
        sizes: args.sizes.clone(),
        ..Preset::default()
    };
    request.preset(&overrides)
}

fn split_pair(arg: &str) -> Option<(&str, &str)> {
    arg.split_once('=')
        .map(|(crop, value)| (crop.trim(), value.trim()))
}

fn parse_files(args: &[String]) -> Result<StaticFiles, String> {
    match args {
        [single] if split_pair(single).is_none() => Ok(StaticFiles::Single(PathBuf::from(single))),
        _ => args
            .iter()
            .map(|arg| {
                split_pair(arg)
                    .map(|(crop, path)| (crop.to_string(), PathBuf::from(path)))
                    .ok_or_else(|| format!("expected crop=path, got '{arg}'"))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(StaticFiles::PerCrop),
    }
}

fn parse_ratio(value: &str) -> Result<f64, String> {
    // Accept "16/9" as well as "1.777"
    let parsed = match value.split_once('/') {
        Some((w, h)) => w
            .trim()
            .parse::<f64>()
            .and_then(|w| h.trim().parse::<f64>().map(|h| w / h)),
        None => value.parse::<f64>(),
    };
    parsed.map_err(|e| format!("invalid ratio '{value}': {e}"))
}

fn parse_ratios(args: &[String]) -> Result<StaticRatios, String> {
    match args {
        [] => Ok(StaticRatios::Native),
        [single] if split_pair(single).is_none() => parse_ratio(single).map(StaticRatios::Single),
        _ => args
            .iter()
            .map(|arg| {
                let (crop, value) =
                    split_pair(arg).ok_or_else(|| format!("expected crop=ratio, got '{arg}'"))?;
                Ok((crop.to_string(), parse_ratio(value)?))
            })
            .collect::<Result<BTreeMap<_, _>, String>>()
            .map(StaticRatios::PerCrop),
    }
}

fn config_path(dir: &Path) -> PathBuf {
    dir.join(config::CONFIG_FILE)
}

/// Initialize the rayon thread pool.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(jobs: Option<usize>) {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let threads = jobs.map_or(cores, |j| j.clamp(1, cores));
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
