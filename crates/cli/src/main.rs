mod overlay;

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use posebridge_core::detection::infrastructure::model_resolver;
use posebridge_core::plugin::platform::{platform_name, register_platform_plugin};
use posebridge_core::shared::constants::{IMAGE_EXTENSIONS, POSE_MODEL_NAME};
use posebridge_core::{
    Frame, Orientation, PixelFormat, PluginOptions, PluginRegistry, PoseDetectorHandle,
};

/// Pose landmark detection on a single camera frame.
#[derive(Parser)]
#[command(name = "posebridge")]
struct Cli {
    /// Input image file, treated as one sensor-space camera frame.
    input: PathBuf,

    /// Clockwise rotation (degrees) that brings the frame upright: 0, 90, 180 or 270.
    #[arg(long, default_value = "0")]
    orientation: i32,

    /// Frame comes from a mirrored (front-facing) camera.
    #[arg(long)]
    mirrored: bool,

    /// Invert RGB channels before handing the image to the detector.
    #[arg(long)]
    invert_colors: bool,

    /// Capture timestamp stamped on every landmark record.
    #[arg(long, default_value = "0")]
    timestamp: i64,

    /// Pose landmark ONNX model. Resolved from the model cache when omitted.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Where to download the model from if it isn't cached or bundled.
    #[arg(long)]
    model_url: Option<String>,

    /// Directory with pre-packaged models.
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// Write the display-space frame with the detected skeleton drawn on it.
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Pretty-print the landmark JSON.
    #[arg(long)]
    pretty: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let model_path = resolve_model(&cli)?;
    let registry = PluginRegistry::global();
    register_platform_plugin(registry, &model_path)?;
    log::info!("Using {} pose plugin", platform_name());

    let options = PluginOptions::new(cli.invert_colors);
    let mut handle = PoseDetectorHandle::create_in(registry, options)?;

    let image = image::open(&cli.input)?.to_rgb8();
    let (width, height) = image.dimensions();
    let orientation = Orientation::from_degrees(cli.orientation);
    let frame = Frame::new(image.clone().into_raw(), width, height, PixelFormat::Rgb)
        .with_orientation(orientation)
        .with_mirrored(cli.mirrored)
        .with_timestamp(cli.timestamp);

    let result = handle.detect_pose(&frame);
    handle.release();
    log::info!(
        "Detected {} landmarks in {} ({}x{}, {} degrees)",
        result.len(),
        cli.input.display(),
        width,
        height,
        orientation.degrees()
    );

    if let Some(path) = &cli.overlay {
        overlay::render(&image, orientation, cli.mirrored, &result).save(path)?;
        log::info!("Overlay written to {}", path.display());
    }

    let json = if cli.pretty {
        result.to_json_pretty()?
    } else {
        result.to_json()?
    };
    println!("{json}");
    Ok(())
}

fn resolve_model(cli: &Cli) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.model {
        return Ok(path.clone());
    }
    log::info!("Resolving model: {POSE_MODEL_NAME}");
    let downloading = cli.model_url.is_some();
    let path = model_resolver::resolve(
        POSE_MODEL_NAME,
        cli.model_url.as_deref(),
        cli.models_dir.as_deref(),
        Some(Box::new(download_progress)),
    )?;
    if downloading {
        eprintln!();
    }
    Ok(path)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !is_image(&cli.input) {
        return Err(format!(
            "Input must be an image ({}), got {}",
            IMAGE_EXTENSIONS.join(", "),
            cli.input.display()
        )
        .into());
    }
    if ![0, 90, 180, 270].contains(&cli.orientation) {
        return Err(format!(
            "Orientation must be one of 0, 90, 180, 270, got {}",
            cli.orientation
        )
        .into());
    }
    if let Some(model) = &cli.model {
        if !model.exists() {
            return Err(format!("Model file not found: {}", model.display()).into());
        }
        if cli.model_url.is_some() {
            return Err("--model and --model-url are mutually exclusive".into());
        }
    }
    if let Some(dir) = &cli.models_dir {
        if !dir.is_dir() {
            return Err(format!("Models directory not found: {}", dir.display()).into());
        }
    }
    if let Some(overlay) = &cli.overlay {
        if !is_image(overlay) {
            return Err(format!(
                "Overlay path needs an image extension, got {}",
                overlay.display()
            )
            .into());
        }
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading pose landmark model... {pct}%");
    } else {
        eprint!("\rDownloading pose landmark model... {downloaded} bytes");
    }
}
