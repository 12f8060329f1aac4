//! Terminal client for trails matches.
//!
//! This binary is the composition root: it loads content, seats
//! participants, builds the [`trails_runtime::Runtime`] with console and bot
//! providers, and renders events while the match plays out.
//!
//! ```bash
//! # Two humans against two bots
//! trails play --humans ana,bo --players 4
//!
//! # Headless bot match with a fixed seed
//! trails play --players 3 --seed 7 --instant
//! ```

mod config;
mod console;
mod logging;
mod render;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use trails_content::{Content, ContentFactory};
use trails_core::{GameConfig, PlayerId, ProfileRef, TileKind};
use trails_runtime::{
    BotProvider, FileProfileRepository, FileStateRepository, OracleManager, ProfileRepository,
    ProviderKind, ProviderRegistry, QuestionBank, Runtime, new_match,
};

use config::ClientConfig;
use console::ConsoleProvider;
use render::{Names, spawn_renderer};

/// How long the renderer may take to print the last events of a match.
const RENDER_DRAIN: Duration = Duration::from_secs(2);

#[derive(Parser, Debug)]
#[command(name = "trails", version, about = "Race along the trails, answer questions, draw cards")]
struct Cli {
    /// Content directory (overrides TRAILS_CONTENT_DIR)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a match
    Play(PlayArgs),
    /// Print the board layout
    Board,
    /// List stored profiles
    Profiles,
}

#[derive(clap::Args, Debug)]
struct PlayArgs {
    /// Seats in total, humans first
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=4))]
    players: u8,

    /// Comma-separated profile names of human participants
    #[arg(long, value_delimiter = ',')]
    humans: Vec<String>,

    /// Match seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Probability that a bot answers correctly
    #[arg(long, default_value_t = 0.6)]
    accuracy: f64,

    /// Skip the pacing delays between moves
    #[arg(long)]
    instant: bool,

    /// Continue the session's latest snapshot
    #[arg(long)]
    resume: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    if let Some(data) = cli.data {
        config.content_dir = Some(data);
    }

    let session_id = config
        .session_id
        .clone()
        .unwrap_or_else(|| format!("session_{}", rand::random::<u32>()));
    let _log_guard = logging::setup_logging(&session_id)?;

    let content = load_content(&config)?;
    match cli.command {
        Command::Play(args) => play(config, content, &session_id, args).await,
        Command::Board => {
            print_board(&content);
            Ok(())
        }
        Command::Profiles => print_profiles(&config),
    }
}

fn load_content(config: &ClientConfig) -> Result<Content> {
    match &config.content_dir {
        Some(dir) => ContentFactory::new(dir)
            .load()
            .with_context(|| format!("loading content from {}", dir.display())),
        None => Content::standard().context("loading built-in content"),
    }
}

async fn play(
    config: ClientConfig,
    mut content: Content,
    session_id: &str,
    args: PlayArgs,
) -> Result<()> {
    if args.humans.len() > usize::from(args.players) {
        bail!(
            "{} humans do not fit in {} seats",
            args.humans.len(),
            args.players
        );
    }
    if args.instant {
        content.config = GameConfig {
            ticks_per_step: 1,
            roll_pause_ticks: 0,
            turn_end_pause_ticks: 0,
            ..content.config
        };
    }

    let save_dir = config.resolved_save_dir();
    let profiles: Arc<dyn ProfileRepository> = Arc::new(FileProfileRepository::new(&save_dir)?);

    let mut seats = Vec::new();
    for name in &args.humans {
        let profile = profiles.get_or_create(&name.to_lowercase(), name)?;
        seats.push(profile.to_profile_ref());
    }
    for seat in seats.len()..usize::from(args.players) {
        seats.push(ProfileRef::guest(PlayerId(seat as u8)));
    }

    let oracles = OracleManager::from_content(&content);
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, players = args.players, session = session_id, "starting match");

    let mut providers = ProviderRegistry::new();
    providers.register(ProviderKind::Interactive, ConsoleProvider::new());
    providers.register(ProviderKind::Bot, BotProvider::new(seed, args.accuracy));
    for seat in 0..args.humans.len() {
        providers.bind(PlayerId(seat as u8), ProviderKind::Interactive);
    }
    let bank = QuestionBank::new(content.questions.clone())?.with_profiles(profiles.clone());
    providers.set_questions(Arc::new(bank));

    let mut builder = Runtime::builder()
        .config(config.runtime.clone())
        .oracles(oracles.clone())
        .providers(providers)
        .profiles(profiles);
    if config.enable_persistence || args.resume {
        let snapshots = FileStateRepository::new(config.snapshot_dir(session_id))?;
        builder = builder.snapshots(Arc::new(snapshots));
    }
    if !args.resume {
        builder = builder.initial_state(new_match(&oracles, seed, seats)?);
    }

    let mut runtime = builder.build().await?;
    let handle = runtime.handle();
    let names = Names::from_state(&handle.query_state().await?);
    let mut renderer = spawn_renderer(handle.event_bus(), names);

    println!(
        "Seed {seed}. Answer correctly on waypoint {} or beyond and the whole table wins.",
        oracles.config().final_index
    );
    let outcome = runtime.run().await;

    if outcome.is_ok() {
        // The renderer ends by itself once it has printed the finish.
        if tokio::time::timeout(RENDER_DRAIN, &mut renderer).await.is_err() {
            tracing::warn!("renderer did not finish in time");
            renderer.abort();
        }
    } else {
        renderer.abort();
    }
    runtime.shutdown().await?;

    let outcome = outcome?;
    tracing::info!(%outcome, "match over");
    Ok(())
}

fn print_board(content: &Content) {
    let config = &content.config;
    for (name, waypoints) in content.board.board.paths() {
        let glyphs: String = waypoints
            .iter()
            .map(|waypoint| match waypoint.kind {
                TileKind::Intersection => 'X',
                kind if config.is_final(waypoint.index) && name == trails_runtime::START_PATH => {
                    kind.glyph().to_ascii_lowercase()
                }
                kind => kind.glyph(),
            })
            .collect();
        println!("{name:>16} {glyphs}");
    }
    println!();
    for (at, destinations) in content.board.intersections.iter() {
        for destination in destinations {
            println!("{:>16} → {}", at.to_string(), destination.entry());
        }
    }
    println!("\nQ question  C card  X intersection  lowercase: final stretch");
}

fn print_profiles(config: &ClientConfig) -> Result<()> {
    let repo = FileProfileRepository::new(config.resolved_save_dir())?;
    let profiles = repo.list()?;
    if profiles.is_empty() {
        println!("No stored profiles yet.");
    }
    for profile in profiles {
        println!(
            "{:<12} rating {:>5}  answered {:>3} ({:>3} correct)  won {}/{}",
            profile.display_name,
            profile.rating,
            profile.questions_answered,
            profile.questions_correct,
            profile.matches_won,
            profile.matches_played
        );
    }
    Ok(())
}
