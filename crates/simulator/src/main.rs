//! Desktop simulator for the watchface.
//!
//! Runs one revision of the face minute by minute against a simulated
//! host. Refresh requests are answered by a scripted companion and the
//! final frame can be written out as a PNG image.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p simulator -- --revision showcase --minutes 12 \
//!     --script crates/simulator/scripts/demo.json --snapshot face.png
//! ```

// Desktop crate: unwrap/expect/panic allowed.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod companion;
mod host;
mod snapshot;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, ValueEnum};
use platform::config::{dev_banner, APP_VERSION, SCREEN_HEIGHT, SCREEN_WIDTH};
use platform::{DisplayCaps, EventLoop, HostEvent, TupleValue};
use tracing_subscriber::{fmt, EnvFilter};
use watchface::assets::RESOURCES;
use watchface::{FaceConfig, Revision, WatchFace, REQUEST_KEY, REQUEST_VALUE};

use crate::companion::Companion;
use crate::host::SimHost;
use crate::snapshot::Framebuffer;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RevisionArg {
    Greeting,
    Clock,
    Weather,
    Stocks,
    Showcase,
}

impl From<RevisionArg> for Revision {
    fn from(arg: RevisionArg) -> Self {
        match arg {
            RevisionArg::Greeting => Revision::Greeting,
            RevisionArg::Clock => Revision::Clock,
            RevisionArg::Weather => Revision::Weather,
            RevisionArg::Stocks => Revision::Stocks,
            RevisionArg::Showcase => Revision::Showcase,
        }
    }
}

#[derive(Parser)]
#[command(name = "watchface-sim")]
#[command(about = "Run the watchface against a simulated watch", long_about = None)]
#[command(version)]
struct Cli {
    /// Which build of the face to run
    #[arg(long, value_enum, default_value = "showcase")]
    revision: RevisionArg,
    /// Use the 12-hour clock
    #[arg(long)]
    twelve_hour: bool,
    /// Simulate a monochrome display
    #[arg(long)]
    mono: bool,
    /// Start time, `YYYY-MM-DD HH:MM` (defaults to now)
    #[arg(long, value_parser = parse_start)]
    start: Option<NaiveDateTime>,
    /// Minutes to simulate
    #[arg(long, default_value_t = 10)]
    minutes: u32,
    /// JSON companion script
    #[arg(long)]
    script: Option<PathBuf>,
    /// Write the final frame as an image (format from the extension, e.g. .png)
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn parse_start(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respects RUST_LOG, defaults to INFO
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber")?;

    tracing::info!(version = APP_VERSION, "{}", dev_banner());
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let revision = Revision::from(cli.revision);
    let caps = if cli.mono {
        DisplayCaps::MONOCHROME
    } else {
        DisplayCaps::COLOR
    };
    let start = cli.start.unwrap_or_else(|| Local::now().naive_local());
    let mut companion = match &cli.script {
        Some(path) => Companion::load(path)?,
        None => Companion::builtin(),
    };

    let host = SimHost::new(caps, &RESOURCES, start, !cli.twelve_hour)?;
    let face = WatchFace::new(FaceConfig::for_revision(revision));
    let mut event_loop = EventLoop::launch(host, face)
        .map_err(|failure| anyhow::anyhow!(failure.error))
        .context("face failed to start")?;
    tracing::info!(%revision, %start, "face launched");

    if revision.uses_messaging() {
        // the companion pushes its first reading as soon as the app opens
        let first = companion.next_reply(revision)?;
        post(&mut event_loop, HostEvent::InboxReceived(first));
        event_loop.run_until_idle();
    }

    for minute in 1..=cli.minutes {
        let now = event_loop.host_mut().advance_minutes(1)?;
        if !event_loop.post_tick(now).unwrap_or(false) {
            tracing::warn!(minute, "tick not queued");
        }
        event_loop.run_until_idle();

        for sent in event_loop.host_mut().take_outbox() {
            let is_request =
                sent.find(REQUEST_KEY).and_then(TupleValue::as_int32) == Some(REQUEST_VALUE);
            post(&mut event_loop, HostEvent::OutboxSent(sent));
            if is_request {
                let reply = companion.next_reply(revision)?;
                post(&mut event_loop, HostEvent::InboxReceived(reply));
            }
        }
        event_loop.run_until_idle();
    }

    if let Some(path) = &cli.snapshot {
        let mut frame = Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let host = event_loop.host();
        let clock = host.status_clock();
        platform::render::render_scene(host.scene(), &clock, &mut frame)
            .context("rendering snapshot")?;
        frame
            .save(path)
            .with_context(|| format!("writing snapshot to {}", path.display()))?;
        tracing::info!(path = %path.display(), "snapshot written");
    }

    let (host, face) = event_loop.shutdown();
    let stats = host.scene().stats();
    tracing::info!(
        time = %face.state().time,
        weather = %face.state().weather,
        quote = %face.state().quote,
        allocations = stats.allocations,
        releases = stats.releases,
        leaked = host.scene().live_objects(),
        "face stopped"
    );
    Ok(())
}

fn post(event_loop: &mut EventLoop<SimHost, WatchFace>, event: HostEvent) {
    if let Err(event) = event_loop.post(event) {
        tracing::warn!(?event, "event queue full, dropping");
    }
}
