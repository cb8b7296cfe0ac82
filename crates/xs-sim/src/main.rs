//! X Spin Simulator
//!
//! Usage:
//!   xs-sim room          - Play rounds in a room (bots only, or with an autopilot human)
//!   xs-sim grand-prix    - Run a full Grand Prix
//!   xs-sim config        - Print the default configuration
//!
//! The simulator stands in for a renderer: it advances the virtual clock in
//! fixed steps and reports the end of every spin animation immediately.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use xs_core::{Profile, SharedWallet, Wallet};
use xs_engine::{GameConfig, GrandPrix, RoomConfig, RoomSession};
use xs_stage::{RoomPhase, RoomTrace, TimingConfig, TimingProfile, TournamentPhase};

/// Clock step per loop iteration
const STEP_MS: u64 = 250;

#[derive(Parser)]
#[command(name = "xs-sim", about = "X Spin round and tournament simulator")]
struct Cli {
    /// Config file (.yaml, .yml or .json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// RNG seed for reproducible runs
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Timing profile: normal, turbo or studio
    #[arg(short, long, global = true)]
    timing: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play rounds in one room
    Room {
        /// Number of rounds to play
        #[arg(short, long, default_value_t = 5)]
        rounds: u32,

        /// Room mode: solo, blitz or duel
        #[arg(short, long)]
        mode: Option<String>,

        /// Seat an autopilot human who bets every round
        #[arg(long)]
        human: bool,

        /// Human stake per round
        #[arg(short, long, default_value_t = 100)]
        bet: u64,

        /// Human starting balance
        #[arg(long, default_value_t = 1_000)]
        balance: u64,

        /// Write the event trace as JSON
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// Run one Grand Prix
    GrandPrix {
        /// Enter an autopilot human
        #[arg(long)]
        human: bool,

        /// Human starting balance
        #[arg(long, default_value_t = 100)]
        balance: u64,

        /// Write the event trace as JSON
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// Print the default configuration
    Config {
        /// YAML instead of JSON
        #[arg(long)]
        yaml: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(name) = &cli.timing {
        config.timing = TimingConfig::from_profile(parse_timing(name)?);
    }
    if let Some(seed) = cli.seed {
        config.room.seed = Some(seed);
        config.tournament.seed = Some(seed);
    }

    match cli.command {
        Commands::Room {
            rounds,
            mode,
            human,
            bet,
            balance,
            trace,
        } => {
            if let Some(mode) = mode {
                config.room = apply_mode(&config.room, &mode)?;
            }
            run_room(&config, rounds, human.then_some((bet, balance)), trace.as_deref())
        }
        Commands::GrandPrix {
            human,
            balance,
            trace,
        } => run_grand_prix(&config, human.then_some(balance), trace.as_deref()),
        Commands::Config { yaml } => {
            if yaml {
                print!("{}", serde_yml::to_string(&config)?);
            } else {
                println!("{}", config.to_json()?);
            }
            Ok(())
        }
    }
}

fn parse_timing(name: &str) -> Result<TimingProfile> {
    Ok(match name {
        "normal" => TimingProfile::Normal,
        "turbo" => TimingProfile::Turbo,
        "studio" => TimingProfile::Studio,
        other => bail!("unknown timing profile: {other}"),
    })
}

fn apply_mode(room: &RoomConfig, mode: &str) -> Result<RoomConfig> {
    let base = match mode {
        "solo" => RoomConfig::solo(),
        "blitz" => RoomConfig::default(),
        "duel" => RoomConfig::duel(),
        other => bail!("unknown room mode: {other}"),
    };
    Ok(RoomConfig {
        seed: room.seed,
        limits: room.limits,
        bot_profile: room.bot_profile.clone(),
        ..base
    })
}

fn autopilot_profile(wallet: &SharedWallet, balance: u64) -> Profile {
    let profile = Profile::new("autopilot", "Autopilot");
    wallet.open(profile.id.clone(), balance);
    profile
}

fn run_room(
    config: &GameConfig,
    rounds: u32,
    human: Option<(u64, u64)>,
    trace_path: Option<&Path>,
) -> Result<()> {
    let wallet = SharedWallet::new(Wallet::new());
    let profile = human.map(|(_, balance)| autopilot_profile(&wallet, balance));
    let mut room = RoomSession::new(config, profile.as_ref(), wallet)?;
    let bet = human.map_or(0, |(bet, _)| bet);

    println!("🎡 {} room {} ({} seats)", room.mode().display_name(), room.id(), room.players().len());

    loop {
        match room.phase() {
            RoomPhase::Closed(reason) => {
                println!("  room closed: {reason:?}");
                break;
            }
            RoomPhase::PreGame => {
                if let Err(e) = room.place_bet(bet) {
                    if !e.is_recoverable() {
                        return Err(e.into());
                    }
                    log::warn!("autopilot cannot bet {bet}: {e}");
                }
                room.acknowledge_color()?;
                if room.human().is_some_and(|h| h.bet_amount > 0) {
                    room.confirm_bet()?;
                }
            }
            RoomPhase::Spinning => {
                room.spin_complete(room.round());
                if let Some(result) = room.last_result() {
                    match &result.winner_name {
                        Some(name) => println!(
                            "  round {:>3}: {} wins {} (pot {})",
                            result.round, name, result.amount, result.pot
                        ),
                        None => println!(
                            "  round {:>3}: no winner on {}, {} stakes returned",
                            result.round,
                            result.winning_color,
                            result.refunds.len()
                        ),
                    }
                }
                if room.round() >= rounds {
                    if room.human().is_some() {
                        room.exit_to_lobby()?;
                    }
                    break;
                }
            }
            _ => room.tick(STEP_MS),
        }
    }

    if let Some(human) = room.human_id() {
        println!("  autopilot balance: {}", room.balance(human));
    }
    write_trace(room.trace(), config.room.seed, config, trace_path)
}

fn run_grand_prix(config: &GameConfig, human: Option<u64>, trace_path: Option<&Path>) -> Result<()> {
    let wallet = SharedWallet::new(Wallet::new());
    let profile = human.map(|balance| autopilot_profile(&wallet, balance));
    let mut gp = GrandPrix::new(config, profile, wallet)?;
    gp.register()?;

    println!("🏆 Grand Prix {}: pot {}", gp.id(), gp.aggregate_pot());

    while gp.phase() != TournamentPhase::Complete {
        match gp.phase() {
            TournamentPhase::GroupSpinning => {
                gp.group_spin_complete();
                println!("  group winners: {}", gp.group_winners().len());
            }
            TournamentPhase::FinalSpinning => {
                gp.final_spin_complete();
            }
            _ => gp.tick(STEP_MS),
        }
    }

    match gp.grand_winner() {
        Some(winner) => println!("  champion: {} (+{})", winner.username, gp.aggregate_pot()),
        None => println!("  no champion, entry fees refunded"),
    }
    if let Some(standing) = gp.standing() {
        println!("  autopilot finished: {standing:?}");
    }
    write_trace(gp.trace(), config.tournament.seed, config, trace_path)
}

fn write_trace(
    trace: &RoomTrace,
    seed: Option<u64>,
    config: &GameConfig,
    path: Option<&Path>,
) -> Result<()> {
    let validation = trace.validate();
    if !validation.is_valid() {
        log::warn!("trace warnings: {:?}", validation.warnings());
    }
    let Some(path) = path else {
        return Ok(());
    };
    let json = trace
        .clone()
        .with_metadata("seed", serde_json::json!(seed))
        .with_metadata("timing", serde_json::to_value(&config.timing)?)
        .to_json()?;
    fs::write(path, json).with_context(|| format!("writing trace {}", path.display()))?;
    println!("  trace: {} events → {}", trace.len(), path.display());
    Ok(())
}
