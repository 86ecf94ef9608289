use backend::Backend;
use clap::{Parser, ValueEnum};
use game::GameState;
use monke::MonkePlayer;
use players::Player;
use terminal_ui::TerminalUIPlayer;
use tracing_subscriber::EnvFilter;

/// Who plays a side
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    /// Someone typing squares into the terminal
    Human,
    /// Random moves
    Monke,
}

/// Play chess by picking up and putting down pieces
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
    white: PlayerKind,
    #[arg(long, value_enum, default_value_t = PlayerKind::Monke)]
    black: PlayerKind,
    /// Seed for random players, so games can be replayed
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many moves; 0 plays until a player stops
    #[arg(long, default_value_t = 1000)]
    max_half_moves: u32,
    /// Start from a saved game instead of the initial position
    #[arg(long)]
    snapshot: Option<GameState>,
    /// Log filter, used when `RUST_LOG` is not set
    #[arg(long, default_value = "info")]
    log: String,
}

fn make_player(kind: PlayerKind, seed: Option<u64>) -> Box<dyn Player> {
    match kind {
        PlayerKind::Human => Box::new(TerminalUIPlayer::new()),
        PlayerKind::Monke => Box::new(seed.map_or_else(MonkePlayer::new, MonkePlayer::with_seed)),
    }
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log)),
        )
        .with_writer(std::io::stderr)
        .init();

    let white = make_player(args.white, args.seed);
    // Offset the seed so two random players don't mirror each other
    let black = make_player(args.black, args.seed.map(|seed| seed.wrapping_add(1)));
    let start = args.snapshot.unwrap_or_default();
    tracing::info!(white = ?args.white, black = ?args.black, start = %start.snapshot(), "starting game");

    let mut backend = Backend::from_state(start, white, black);
    backend.play_game(Some(args.max_half_moves).filter(|&max| max > 0));
    println!("{}", backend.game_state().snapshot());
}
