// SPDX-License-Identifier: MPL-2.0
//! Headless player host.
//!
//! Opens a file, plays it on the simulated engine and reads user input from
//! standard input, one command per line: key names (`space`, `left`, `f`,
//! ...) or `move`, `leave`, `settings`, `rate <x>`, `volume <x>`,
//! `scrub <fraction>`, `quit`.

use lens_player::config::{self, Config};
use lens_player::media::LocalMediaProvider;
use lens_player::session::{Message, PlaybackSession, SessionOptions, SessionSender};
use lens_player::ui::keyboard::{parse_key_name, FocusTarget};
use lens_player::video_player::{ChannelEngine, MediaEngine, SimulatedEngine};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "\
Usage: lens_player [OPTIONS] FILE

Options:
  --duration <SECS>  Length of the simulated media (default: 120)
  --config <PATH>    Settings file to use instead of the default one
  -h, --help         Print this help
";

const DEFAULT_DURATION_SECS: f64 = 120.0;

struct Args {
    file: PathBuf,
    duration: f64,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let duration = args
        .opt_value_from_str("--duration")?
        .unwrap_or(DEFAULT_DURATION_SECS);
    let config = args.opt_value_from_str("--config")?;
    let file = args.finish().into_iter().next().map(PathBuf::from);

    Ok(file.map(|file| Args {
        file,
        duration,
        config,
    }))
}

fn load_config(path: Option<&PathBuf>) -> Config {
    let loaded = match path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    loaded.unwrap_or_else(|err| {
        tracing::warn!(%err, "could not load settings, using defaults");
        Config::default()
    })
}

/// Parses one line of terminal input.
fn parse_command(line: &str) -> Option<Message> {
    let mut words = line.split_whitespace();
    let head = words.next()?;
    let arg = words.next().and_then(|w| w.parse::<f64>().ok());

    let msg = match (head.to_ascii_lowercase().as_str(), arg) {
        ("quit" | "q" | "exit", _) => Message::Close,
        ("move", _) => Message::PointerMoved,
        ("leave", _) => Message::PointerLeft,
        ("settings", _) => Message::ToggleSettings,
        ("rate", Some(rate)) => Message::SetPlaybackRate(rate),
        ("volume", Some(level)) => Message::SetVolume(level as f32),
        ("seek", Some(delta)) => Message::SeekBy(delta),
        ("scrub", Some(fraction)) => Message::CommitScrub(fraction),
        _ => Message::KeyPressed {
            key: parse_key_name(head)?,
            focus: FocusTarget::Player,
        },
    };
    Some(msg)
}

/// Feeds terminal commands to the session. End of input closes the player.
async fn forward_input<R>(input: R, session: SessionSender)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match parse_command(&line) {
            Some(msg) => {
                if session.send(msg).is_err() {
                    tracing::debug!("session closed, dropping terminal input");
                    return;
                }
            }
            None if line.trim().is_empty() => {}
            None => tracing::warn!(input = %line.trim(), "unknown command"),
        }
    }
    if session.send(Message::Close).is_err() {
        tracing::debug!("session already closed at end of input");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lens_player=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let config = load_config(args.config.as_ref());
    let (engine, commands) = ChannelEngine::new();
    let engine: Box<dyn MediaEngine> = Box::new(engine);

    let session = match PlaybackSession::open_path(
        &LocalMediaProvider,
        &args.file,
        engine,
        SessionOptions::from(&config),
    ) {
        Ok(session) => session,
        Err(err) => {
            tracing::error!(%err, "cannot open media");
            return ExitCode::FAILURE;
        }
    };

    tokio::spawn(SimulatedEngine::new(args.duration).run(commands, session.sender()));

    let mut states = session.subscribe();
    tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let state = *states.borrow_and_update();
            tracing::info!(
                time = %state.time_label(),
                playing = state.playing,
                volume = state.volume.value(),
                muted = state.muted,
                rate = %state.rate.label(),
                pip = state.pip,
                fullscreen = state.fullscreen,
                controls = state.controls_visible,
                settings = state.settings_open,
                "state"
            );
        }
    });

    tokio::spawn(forward_input(
        BufReader::new(tokio::io::stdin()),
        session.sender(),
    ));

    session.run().await;
    ExitCode::SUCCESS
}
