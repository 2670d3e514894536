use std::fs;
use std::path::{Path, PathBuf};

use canvas::align::Anchor;
use canvas::config::EditorConfig;
use canvas::engine::EngineCore;
use canvas::export::{self, NamingPolicy};
use canvas::input::InputEvent;
use canvas::load;
use canvas::model::Color;
use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{}", .0.user_message())]
    Canvas(#[from] canvas::error::Error),
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },
    #[error("invalid gesture script {}: {source}", path.display())]
    Script { path: PathBuf, source: serde_json::Error },
}

#[derive(Parser, Debug)]
#[command(name = "backdrop", about = "Place an image on a blurred backdrop and export the composite as PNG")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose one image and write the PNG.
    Compose(ComposeArgs),
}

#[derive(Args, Debug)]
struct ComposeArgs {
    /// Source image (PNG, JPEG or GIF).
    input: PathBuf,

    /// Output file, or a directory to write a generated file name into.
    #[arg(short, long, env = "BACKDROP_OUTPUT", default_value = ".")]
    output: PathBuf,

    /// Editor config JSON; flags below override it.
    #[arg(long, env = "BACKDROP_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "BACKDROP_WIDTH")]
    width: Option<u32>,

    #[arg(long, env = "BACKDROP_HEIGHT")]
    height: Option<u32>,

    /// Size preset: `WxH` or `aspect_X_Y`.
    #[arg(long, env = "BACKDROP_PRESET")]
    preset: Option<String>,

    /// Backdrop blur radius in pixels; 0 disables the backdrop.
    #[arg(long, env = "BACKDROP_BLUR")]
    blur: Option<f64>,

    #[arg(long, env = "BACKDROP_BACKGROUND_SCALE")]
    background_scale: Option<f64>,

    /// Frame fill colour, `#rrggbb` or `#rgb`.
    #[arg(long, env = "BACKDROP_FILL")]
    fill: Option<Color>,

    /// Where to place the foreground: `center`, `top-left`, `bottom`, ...
    #[arg(long, env = "BACKDROP_ANCHOR")]
    anchor: Option<Anchor>,

    #[arg(long, value_enum)]
    fit: Option<Fit>,

    /// Foreground scale relative to the image's natural size.
    #[arg(long)]
    scale: Option<f64>,

    /// JSON array of input events to replay after layout.
    #[arg(long)]
    gestures: Option<PathBuf>,

    /// Name generated files `canvas-image-YYYYMMDD-HHMMSS.png`.
    #[arg(long, env = "BACKDROP_TIMESTAMP_NAME")]
    timestamp_name: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Fit {
    Width,
    Height,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Compose(args) => run_compose(&args),
    };
    if let Err(e) = &result {
        tracing::error!(error = %e, "backdrop failed");
    }
    result
}

fn run_compose(args: &ComposeArgs) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => EditorConfig::from_json(&read_string(path)?)?,
        None => EditorConfig::default(),
    };
    apply_overrides(&mut config, args);

    let mut core = EngineCore::new(config)?;
    if let Some(preset) = &args.preset {
        core.apply_preset(preset)?;
    }

    let bytes = fs::read(&args.input).map_err(|source| CliError::Read { path: args.input.clone(), source })?;
    let source = load::decode(&bytes, &mime_for(&args.input))?;
    core.set_image(source.info());

    match args.fit {
        Some(Fit::Width) => {
            core.fit_width();
        }
        Some(Fit::Height) => {
            core.fit_height();
        }
        None => {}
    }
    if let Some(scale) = args.scale {
        core.set_scale(scale);
    }
    if let Some(path) = &args.gestures {
        let events = read_script(path)?;
        replay(&mut core, &events);
    }

    let png = export::export_png(&core.export_scene(Some(source.pixels()))?)?;
    let policy = if args.timestamp_name { NamingPolicy::Timestamped } else { NamingPolicy::Fixed };
    let path = output_path(&args.output, policy, chrono::Local::now().naive_local());
    fs::write(&path, &png).map_err(|source| CliError::Write { path: path.clone(), source })?;

    tracing::info!(path = %path.display(), bytes = png.len(), "composite written");
    println!("{}", path.display());
    Ok(())
}

/// Layer command-line values over the loaded config.
fn apply_overrides(config: &mut EditorConfig, args: &ComposeArgs) {
    if let Some(width) = args.width {
        config.canvas_width = width;
    }
    if let Some(height) = args.height {
        config.canvas_height = height;
    }
    if let Some(blur) = args.blur {
        config.blur_px = blur;
    }
    if let Some(scale) = args.background_scale {
        config.background_scale = scale;
    }
    if let Some(fill) = args.fill {
        config.fill = fill;
    }
    if let Some(anchor) = args.anchor {
        config.anchor = anchor;
    }
}

fn replay(core: &mut EngineCore, events: &[InputEvent]) {
    let actions: usize = events.iter().map(|event| core.handle_event(event).len()).sum();
    let t = core.transform();
    tracing::info!(
        events = events.len(),
        actions,
        x = t.x,
        y = t.y,
        width = t.width,
        height = t.height,
        "gesture script replayed"
    );
}

fn read_string(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })
}

fn read_script(path: &Path) -> Result<Vec<InputEvent>, CliError> {
    serde_json::from_str(&read_string(path)?).map_err(|source| CliError::Script { path: path.to_path_buf(), source })
}

/// MIME type implied by the file extension.
fn mime_for(path: &Path) -> String {
    image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_owned())
        .unwrap_or_else(|_| "application/octet-stream".to_owned())
}

fn output_path(output: &Path, policy: NamingPolicy, now: NaiveDateTime) -> PathBuf {
    if output.is_dir() { output.join(export::file_name(policy, now)) } else { output.to_path_buf() }
}
