use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;

use moodtune_core::capture::domain::frame_source::FrameSource;
use moodtune_core::capture::infrastructure::opencv_source::OpencvFrameSource;
use moodtune_core::detection::domain::emotion_detector::EmotionDetector;
use moodtune_core::detection::infrastructure::model_resolver;
use moodtune_core::detection::infrastructure::yunet_fer_detector::{
    YunetFerDetector, DEFAULT_CONFIDENCE,
};
use moodtune_core::display::domain::frame_display::{FrameDisplay, NullDisplay};
use moodtune_core::display::infrastructure::highgui_display::HighguiDisplay;
use moodtune_core::pipeline::live_session_use_case::LiveSessionUseCase;
use moodtune_core::pipeline::session_logger::StdoutSessionLogger;
use moodtune_core::recommendation::domain::song_catalog::SongCatalog;
use moodtune_core::recommendation::domain::song_recommender::SongRecommender;
use moodtune_core::recommendation::infrastructure::browser_opener::BrowserOpener;
use moodtune_core::shared::constants::{
    EMOTION_MODEL_NAME, EMOTION_MODEL_URL, FACE_MODEL_NAME, FACE_MODEL_URL,
};
use moodtune_core::tracking::domain::stabilization_tracker::StabilizationTracker;

/// Watches faces on camera, reads the room, and queues up a song to match.
#[derive(Parser)]
#[command(name = "moodtune")]
struct Cli {
    /// Camera index to capture from.
    #[arg(long, default_value = "0", conflicts_with = "video")]
    camera: i32,

    /// Process a video file instead of the camera.
    #[arg(long)]
    video: Option<PathBuf>,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f32,

    /// Run without a preview window (logs only).
    #[arg(long)]
    headless: bool,
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

    let detector = build_detector(&cli)?;
    let source = build_source(&cli);
    let display = build_display(&cli);

    let recommender = SongRecommender::new(SongCatalog::new(), Box::new(BrowserOpener));
    let tracker = StabilizationTracker::new(recommender, Instant::now());

    let mut use_case = LiveSessionUseCase::new(
        source,
        detector,
        tracker,
        display,
        Box::new(StdoutSessionLogger::default()),
    );
    let summary = use_case.execute()?;

    log::info!(
        "Session over: {} frames, {} faces seen, {} locked, recommendation {}",
        summary.frames,
        summary.faces_seen,
        summary.faces_locked,
        if summary.recommendation_issued {
            "issued"
        } else {
            "not issued"
        }
    );
    Ok(())
}

fn build_detector(cli: &Cli) -> Result<Box<dyn EmotionDetector>, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {FACE_MODEL_NAME}");
    let face_model = model_resolver::resolve(
        FACE_MODEL_NAME,
        FACE_MODEL_URL,
        None,
        Some(Box::new(|received, total| {
            download_progress("face detection", received, total)
        })),
    )?;
    eprintln!();

    log::info!("Resolving model: {EMOTION_MODEL_NAME}");
    let emotion_model = model_resolver::resolve(
        EMOTION_MODEL_NAME,
        EMOTION_MODEL_URL,
        None,
        Some(Box::new(|received, total| {
            download_progress("emotion", received, total)
        })),
    )?;
    eprintln!();

    Ok(Box::new(YunetFerDetector::new(
        &face_model,
        &emotion_model,
        cli.confidence,
    )?))
}

fn build_source(cli: &Cli) -> Box<dyn FrameSource> {
    match &cli.video {
        Some(path) => Box::new(OpencvFrameSource::file(path.clone())),
        None => Box::new(OpencvFrameSource::camera(cli.camera)),
    }
}

fn build_display(cli: &Cli) -> Box<dyn FrameDisplay> {
    if cli.headless {
        Box::new(NullDisplay)
    } else {
        Box::new(HighguiDisplay)
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if cli.camera < 0 {
        return Err(format!("Camera index must not be negative, got {}", cli.camera).into());
    }
    if let Some(video) = &cli.video {
        if !video.exists() {
            return Err(format!("Video file not found: {}", video.display()).into());
        }
    }
    Ok(())
}

fn download_progress(label: &str, downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading {label} model... {pct}%");
    } else {
        eprint!("\rDownloading {label} model... {downloaded} bytes");
    }
}
