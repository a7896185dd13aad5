//! Binary entrypoint: acquire one session of rover photos and print a page.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser};
use rand::{SeedableRng, rngs::StdRng};
use rover_gallery::api::MarsPhotosApi;
use rover_gallery::config::Configuration;
use rover_gallery::events::Progress;
use rover_gallery::gallery::{Action, GalleryState, reduce};
use rover_gallery::pagination::{PageRequest, page_buttons};
use rover_gallery::tasks;
use rover_gallery::{AcquisitionResult, PhotoRecord};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "rover-gallery",
    version,
    about = "Browse a random sampling of Mars rover photos"
)]
struct Args {
    /// Path to YAML config (built-in defaults when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Gallery page to print (1-based, clamped)
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    page: usize,
    /// Show details for the photo at this position (1-based) on the page
    #[arg(long, value_name = "N")]
    open: Option<usize>,
    /// Deterministic seed for date sampling and shuffling
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// API key, overrides `api.key`
    #[arg(long, env = "NASA_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Print the page as JSON instead of text
    #[arg(long)]
    json: bool,
    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "info",
        1 => "info,rover_gallery=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut cfg = match &args.config {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Configuration::default(),
    };
    if let Some(key) = args.api_key.clone() {
        cfg.api.key = key;
    }
    if args.seed.is_some() {
        cfg.shuffle_seed = args.seed;
    }
    let cfg = cfg.validated().context("invalid configuration values")?;
    info!(
        base_url = %cfg.api.base_url,
        rover = %cfg.acquisition.rover,
        start_year = cfg.acquisition.start_year,
        end_year = cfg.acquisition.end_year,
        pages_per_date = cfg.acquisition.pages_per_date,
        seed = ?cfg.shuffle_seed,
        "configuration loaded"
    );

    let api = MarsPhotosApi::new(&cfg.api).context("failed to build http client")?;
    let mut rng = match cfg.shuffle_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let (status_tx, status_rx) =
        watch::channel(Progress::starting(cfg.acquisition.start_year, 0));
    let cancel = CancellationToken::new();
    let follower = tokio::spawn(tasks::progress::run(status_rx, cancel.clone()));

    // No mid-run cancellation in the pipeline itself; ctrl-c abandons the run.
    let outcome = tokio::select! {
        res = tasks::acquire::run(&cfg.acquisition, &api, &mut rng, &status_tx) => {
            res.context("photo acquisition failed")
        }
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            Err(anyhow!("interrupted"))
        }
    };
    // The follower stops on its own once it has seen the terminal status.
    drop(status_tx);
    match follower.await {
        Ok(Ok(last)) => debug!(%last, "progress follower finished"),
        Ok(Err(err)) => warn!("progress follower failed: {err:?}"),
        Err(err) => warn!("progress follower join error: {err}"),
    }
    let photos = outcome?;

    let mut state = reduce(
        GalleryState::new(cfg.gallery.photos_per_page),
        Action::Loaded { len: photos.len() },
    );
    state = reduce(state, Action::GoToPage(PageRequest::Number(args.page)));
    if let Some(position) = args.open {
        state = reduce(
            state,
            Action::Open {
                window_index: position.saturating_sub(1),
            },
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        print_json(&mut out, &photos, &state)?;
    } else {
        print_text(&mut out, &photos, &state)?;
    }
    Ok(())
}

fn print_json(out: &mut impl Write, photos: &AcquisitionResult, state: &GalleryState) -> Result<()> {
    match state.selected(photos.as_slice()) {
        Some(photo) => serde_json::to_writer_pretty(&mut *out, photo)?,
        None => serde_json::to_writer_pretty(&mut *out, state.window(photos.as_slice()))?,
    }
    writeln!(out)?;
    Ok(())
}

fn print_text(out: &mut impl Write, photos: &AcquisitionResult, state: &GalleryState) -> Result<()> {
    if photos.is_empty() {
        writeln!(out, "No photos found.")?;
        return Ok(());
    }
    if let Some(photo) = state.selected(photos.as_slice()) {
        return print_detail(out, photo);
    }

    let offset = (state.page - 1) * state.page_size;
    for (i, photo) in state.window(photos.as_slice()).iter().enumerate() {
        writeln!(out, "{:>4}. {}", offset + i + 1, photo.caption())?;
        writeln!(out, "      {}", photo.img_src)?;
    }

    let total = state.total_pages();
    if total > 1 {
        let strip: Vec<String> = page_buttons(state.page, total)
            .map(|n| {
                if n == state.page {
                    format!("[{n}]")
                } else {
                    n.to_string()
                }
            })
            .collect();
        writeln!(out)?;
        writeln!(out, "Page {} of {}   {}", state.page, total, strip.join(" "))?;
    }
    Ok(())
}

fn print_detail(out: &mut impl Write, photo: &PhotoRecord) -> Result<()> {
    let rover = &photo.rover;
    writeln!(out, "{} Rover", rover.name)?;
    writeln!(out, "  Sol {} - {}", photo.sol, photo.earth_date)?;
    writeln!(out, "  Camera: {} ({})", photo.camera.full_name, photo.camera.name)?;
    writeln!(out, "  Status: {}", rover.status)?;
    writeln!(out, "  Launched: {}", rover.launch_date)?;
    writeln!(out, "  Landed: {}", rover.landing_date)?;
    if let Some(max_sol) = rover.max_sol {
        writeln!(out, "  Mission sols: {max_sol}")?;
    }
    if let Some(total) = rover.total_photos {
        writeln!(out, "  Total photos: {total}")?;
    }
    writeln!(out, "  Full resolution: {}", photo.img_src)?;
    Ok(())
}
