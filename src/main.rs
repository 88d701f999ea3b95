//! Dominion Engine - Main Binary
//!
//! Hot-seat console play over stdin, and random self-play simulation

use clap::{Parser, Subcommand};
use dominion_engine::{
    core::{CardName, PlayerId},
    game::{
        random_controller::play_out, GameConfig, GameEvent, GameState, GameStateView,
        RandomController, VerbosityLevel,
    },
    Result,
};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dominion")]
#[command(about = "Dominion deck-building game engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a hot-seat game, one command token per line on stdin
    ///
    /// Tokens: PlayAllTreasures, EndTurn, PlayCard:<idx>, BuyCard:<idx>.
    /// While an effect waits for a decision every line is its payload.
    /// "status" prints the current player's view, "save" writes a snapshot.
    Play {
        /// Player names in seating order (2 to 4)
        #[arg(value_name = "NAMES", required_unless_present = "start_from")]
        names: Vec<String>,

        /// Set random seed for deterministic games
        #[arg(long)]
        seed: Option<u64>,

        /// Fixed kingdom, ten comma-separated card names
        #[arg(long, value_delimiter = ',')]
        kingdom: Option<Vec<CardName>>,

        /// Verbosity level for engine output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "minimal", short = 'v')]
        verbosity: VerbosityLevel,

        /// Output file for game snapshots
        #[arg(long, default_value = "game.snapshot")]
        snapshot_output: PathBuf,

        /// Load and resume game from snapshot file
        #[arg(long, value_name = "SNAPSHOT_FILE")]
        start_from: Option<PathBuf>,
    },

    /// Run games between random controllers
    Simulate {
        /// Number of players per game
        #[arg(long, default_value = "2")]
        players: usize,

        /// Number of games to run
        #[arg(long, default_value = "10")]
        games: usize,

        /// Base random seed; game N uses seed + N
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Abandon a game after this many inputs
        #[arg(long, default_value = "20000")]
        max_commands: usize,

        /// Verbosity level for engine output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "silent", short = 'v')]
        verbosity: VerbosityLevel,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            names,
            seed,
            kingdom,
            verbosity,
            snapshot_output,
            start_from,
        } => {
            let game = match start_from {
                Some(path) => {
                    println!("Resuming game from {}", path.display());
                    GameState::from_json(&std::fs::read_to_string(path)?)?
                }
                None => {
                    let mut config = GameConfig::new().with_verbosity(verbosity);
                    config.seed = seed;
                    config.kingdom = kingdom;
                    GameState::with_config(&names, &config)?
                }
            };
            run_play(game, &snapshot_output)
        }
        Commands::Simulate {
            players,
            games,
            seed,
            max_commands,
            verbosity,
        } => run_simulate(players, games, seed, max_commands, verbosity),
    }
}

fn run_play(mut game: GameState, snapshot_output: &Path) -> Result<()> {
    print_events(&mut game);
    print_status(&game);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let token = line.trim();

        match token {
            "status" => print_status(&game),
            "save" => {
                std::fs::write(snapshot_output, game.to_json()?)?;
                println!("Saved snapshot to {}", snapshot_output.display());
            }
            _ => {
                if let Err(err) = game.submit_token(token) {
                    eprintln!("error: {err}");
                }
                print_events(&mut game);
            }
        }

        if game.is_game_over() {
            break;
        }
    }
    Ok(())
}

fn print_events(game: &mut GameState) {
    for event in game.drain_events() {
        match &event {
            GameEvent::EndGame(scores) => {
                println!("=== Game Over ===");
                for score in scores {
                    println!("  {score}");
                }
            }
            _ => println!("{event}"),
        }
    }
}

fn print_status(game: &GameState) {
    let view = GameStateView::new(game, game.next_actor());
    let hand: Vec<String> = view
        .hand()
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{i}:{name}"))
        .collect();
    println!("--- {} ---", game.players[view.player_id().seat()].name);
    println!("Hand: {}", hand.join("  "));
    println!(
        "Actions: {}  Buys: {}  Gold: {}  Deck: {}  Discard: {} ({})",
        view.actions(),
        view.buys(),
        view.gold(),
        view.deck_count(),
        view.discard_count(),
        view.discard_top().map_or("-".to_string(), |c| c.to_string()),
    );
    let supply: Vec<String> = view
        .supply()
        .iter()
        .map(|pile| format!("{}:{}", pile.slot, pile))
        .collect();
    println!("Supply: {}", supply.join("  "));
    println!(
        "Trash: {} ({})",
        view.trash_count(),
        view.trash_top().map_or("-".to_string(), |c| c.to_string())
    );
    if let Some(pending) = view.pending_decision() {
        println!("Waiting on {:?} for {}", pending.kind, pending.card);
    }
}

fn run_simulate(
    players: usize,
    games: usize,
    seed: u64,
    max_commands: usize,
    verbosity: VerbosityLevel,
) -> Result<()> {
    let names: Vec<String> = (1..=players).map(|i| format!("Player {i}")).collect();
    let mut wins = vec![0usize; players];
    let mut abandoned = 0;

    for game_index in 0..games {
        let game_seed = seed.wrapping_add(game_index as u64);
        let config = GameConfig::new()
            .with_seed(game_seed)
            .with_verbosity(verbosity);
        let mut game = GameState::with_config(&names, &config)?;
        let mut controllers: Vec<RandomController> = (0..players)
            .map(|seat| {
                let controller_seed = game_seed.wrapping_mul(31).wrapping_add(seat as u64);
                RandomController::with_seed(PlayerId::new(seat), controller_seed)
            })
            .collect();

        let scores = play_out(&mut game, &mut controllers, max_commands)?;
        match scores {
            Some(scores) => {
                let best = scores.iter().map(|s| s.score).max().unwrap_or(0);
                for (seat, score) in scores.iter().enumerate() {
                    if score.score == best {
                        wins[seat] += 1;
                    }
                }
                let line: Vec<String> = scores.iter().map(|s| s.to_string()).collect();
                println!(
                    "Game {} (seed {}): {} turns | {}",
                    game_index + 1,
                    game_seed,
                    game.turn.turn_number,
                    line.join(" | ")
                );
            }
            None => {
                abandoned += 1;
                println!("Game {} (seed {}): abandoned", game_index + 1, game_seed);
            }
        }
    }

    println!("=== Simulation Summary ===");
    for (name, count) in names.iter().zip(&wins) {
        println!("{name}: {count} wins (ties count for everyone)");
    }
    if abandoned > 0 {
        println!("Abandoned: {abandoned}");
    }
    Ok(())
}
