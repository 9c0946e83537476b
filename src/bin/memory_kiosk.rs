//! Headless kiosk driver.
//!
//! Plays rounds against the session's virtual clock with a simulated player
//! and prints each round's summary. Useful for checking a kiosk config and
//! image directory without a display.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rustc_hash::FxHashMap;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use memory_match::assets::{AssetManifest, AssetProbe, DirectoryProbe};
use memory_match::cards::{ImageKey, Visibility};
use memory_match::core::{Difficulty, GameConfig};
use memory_match::engine::RoundState;
use memory_match::session::{LifecyclePhase, Notice, Session, SessionEvent};

#[derive(Parser, Debug)]
#[command(name = "memory-kiosk")]
#[command(about = "Play memory-match rounds headlessly on a virtual clock")]
struct Args {
    /// TOML config file. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Difficulty: easy | medium | hard (overrides the config)
    #[arg(long)]
    difficulty: Option<String>,

    /// Shuffle seed (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Rounds to play.
    #[arg(long, default_value_t = 1)]
    rounds: u32,

    /// Simulated player.
    #[arg(long, value_enum, default_value_t = PlayerKind::Memory)]
    player: PlayerKind,

    /// Milliseconds the player waits between picks.
    #[arg(long, default_value_t = 700)]
    think_ms: u64,

    /// Treat every configured image as present instead of probing the image directory.
    #[arg(long)]
    assume_assets: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    /// Knows where every card is.
    Perfect,
    /// Remembers every card it has seen.
    Memory,
    /// Never picks a card.
    Idle,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(label) = &args.difficulty {
        let difficulty = Difficulty::from_label(label)
            .with_context(|| format!("unknown difficulty {label:?}"))?;
        config = config.with_difficulty(difficulty);
    }
    if let Some(seed) = args.seed {
        config = config.with_shuffle_seed(seed);
    }

    if args.assume_assets {
        let manifest: AssetManifest = config.images.iter().cloned().collect();
        let session = Session::new(config, manifest).context("invalid configuration")?;
        run(session, &args)
    } else {
        let probe = DirectoryProbe::new(config.image_dir.clone());
        let session = Session::new(config, probe).context("invalid configuration")?;
        run(session, &args)
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn run<P: AssetProbe>(mut session: Session<P>, args: &Args) -> Result<()> {
    let think = Duration::from_millis(args.think_ms.max(1));

    for round_no in 1..=args.rounds {
        let notices = session.dispatch(SessionEvent::StartRound);
        log_notices(&notices);
        if session.phase() != LifecyclePhase::Active {
            let message = session.status_message().unwrap_or("round did not start");
            anyhow::bail!("round {round_no}: {message}");
        }

        let mut memory: FxHashMap<usize, ImageKey> = FxHashMap::default();
        while session.phase() == LifecyclePhase::Active {
            let pick = session
                .round()
                .filter(|round| !round.input_locked())
                .and_then(|round| next_pick(args.player, round, &memory));
            if let Some(position) = pick {
                log_notices(&session.dispatch(SessionEvent::SelectCard(position)));
                if let Some(round) = session.round() {
                    remember(round, &mut memory);
                }
            }
            log_notices(&session.advance(think));
        }

        if let Some(summary) = session.last_summary() {
            println!(
                "round {round_no} [{}]: {} {summary}",
                summary.grid_label(),
                summary.outcome.message()
            );
        }
    }

    Ok(())
}

fn log_notices(notices: &[Notice]) {
    for notice in notices {
        tracing::debug!(?notice);
    }
}

fn remember(round: &RoundState, memory: &mut FxHashMap<usize, ImageKey>) {
    for card in round.cards() {
        if card.visibility == Visibility::Revealed {
            memory.insert(card.position, card.key.clone());
        }
    }
}

/// Choose the next card, or `None` to wait.
fn next_pick(player: PlayerKind, round: &RoundState, memory: &FxHashMap<usize, ImageKey>) -> Option<usize> {
    let hidden: Vec<usize> = round
        .cards()
        .iter()
        .filter(|c| c.visibility == Visibility::Hidden)
        .map(|c| c.position)
        .collect();

    let known = |position: usize| known_key(player, round, memory, position);

    match player {
        PlayerKind::Idle => None,
        PlayerKind::Perfect | PlayerKind::Memory => match round.revealed_first() {
            Some(first) => {
                let key = &round.card(first)?.key;
                hidden
                    .iter()
                    .copied()
                    .find(|&p| known(p) == Some(key))
                    .or_else(|| hidden.iter().copied().find(|&p| known(p).is_none()))
                    .or_else(|| hidden.first().copied())
            }
            None => {
                let known_pair = hidden.iter().copied().find(|&p| {
                    known(p).is_some_and(|key| hidden.iter().any(|&q| q != p && known(q) == Some(key)))
                });
                known_pair
                    .or_else(|| hidden.iter().copied().find(|&p| known(p).is_none()))
                    .or_else(|| hidden.first().copied())
            }
        },
    }
}

/// Key the player knows to be at `position`.
fn known_key<'a>(
    player: PlayerKind,
    round: &'a RoundState,
    memory: &'a FxHashMap<usize, ImageKey>,
    position: usize,
) -> Option<&'a ImageKey> {
    match player {
        PlayerKind::Perfect => round.card(position).map(|c| &c.key),
        PlayerKind::Memory => memory.get(&position),
        PlayerKind::Idle => None,
    }
}
