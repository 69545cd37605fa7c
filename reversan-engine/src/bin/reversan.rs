//! Play Othello against the engine, watch it play itself, or time a search.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use reversan_engine::settings::{MAX_DEPTH, MAX_THREADS, MIN_DEPTH, MIN_THREADS};
use reversan_engine::{new_engine, Algorithm, Engine, MoveOrder, OrderPreset, SearchSettings};
use reversan_othello::{Action, Board, Game, Location, Player};

/// Fixed-depth Othello engine
#[derive(Parser, Debug)]
#[command(name = "reversan", version, about = "Fixed-depth alpha-beta and negascout Othello engine")]
struct Cli {
    /// What to run
    #[arg(value_enum, default_value_t = Mode::Play)]
    mode: Mode,

    /// Plies to search
    #[arg(
        short,
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u8).range(MIN_DEPTH as i64..=MAX_DEPTH as i64)
    )]
    depth: u8,

    /// Search algorithm
    #[arg(short, long, value_enum, default_value_t = CliAlgorithm::Negascout)]
    engine: CliAlgorithm,

    /// Worker threads (negascout only)
    #[arg(
        short,
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(MIN_THREADS as i64..=MAX_THREADS as i64)
    )]
    threads: u8,

    /// Search without a transposition table
    #[arg(long)]
    disable_tt: bool,

    /// Order in which moves are tried
    #[arg(short, long, value_enum, default_value_t = CliOrder::Optimized)]
    order: CliOrder,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Play Black against the engine
    Play,
    /// Let the engine play both sides
    BotVsBot,
    /// Time one search of a fixed midgame position
    Benchmark,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliAlgorithm {
    Alphabeta,
    Negascout,
}

impl From<CliAlgorithm> for Algorithm {
    fn from(algorithm: CliAlgorithm) -> Self {
        match algorithm {
            CliAlgorithm::Alphabeta => Algorithm::Alphabeta,
            CliAlgorithm::Negascout => Algorithm::Negascout,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOrder {
    LineByLine,
    Optimized,
    OptimizedAlt,
}

impl From<CliOrder> for OrderPreset {
    fn from(order: CliOrder) -> Self {
        match order {
            CliOrder::LineByLine => OrderPreset::LineByLine,
            CliOrder::Optimized => OrderPreset::Optimized,
            CliOrder::OptimizedAlt => OrderPreset::OptimizedAlt,
        }
    }
}

impl Cli {
    fn to_settings(&self) -> SearchSettings {
        SearchSettings {
            depth: self.depth,
            threads: self.threads as usize,
            transposition_enabled: !self.disable_tt,
            move_order: MoveOrder::from(OrderPreset::from(self.order)),
            ..SearchSettings::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut engine = new_engine(cli.engine.into(), cli.to_settings())
        .context("failed to create the engine")?;
    info!(
        "{:?} engine, depth {}, {} thread(s), transposition table {}",
        cli.engine,
        cli.depth,
        cli.threads,
        if cli.disable_tt { "off" } else { "on" }
    );

    match cli.mode {
        Mode::Play => play(engine.as_mut()),
        Mode::BotVsBot => bot_vs_bot(engine.as_mut()),
        Mode::Benchmark => {
            benchmark(engine.as_mut());
            Ok(())
        }
    }
}

/// The human plays Black and moves first; the engine answers as White.
fn play(engine: &mut dyn Engine) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut game = Game::default();

    while !game.is_finished() {
        println!("\n{}\n", game);

        let action = match game.active_player {
            Player::Black if game.moves().is_empty() => {
                println!("You have no legal moves and must pass.");
                Action::Pass
            }
            Player::Black => {
                print!("Enter a move: ");
                io::stdout().flush()?;

                let line = match lines.next() {
                    Some(line) => line.context("failed to read a move")?,
                    None => {
                        println!();
                        info!("Input closed, ending the game");
                        return Ok(());
                    }
                };

                match line.parse::<Location>() {
                    Ok(loc) if game.moves().contains(loc) => Action::Play(loc),
                    Ok(loc) => {
                        println!("{} is not legal. Legal moves: {}", loc, game.moves());
                        continue;
                    }
                    Err(err) => {
                        println!("Cannot parse move ({}). Enter a move like D3.", err);
                        continue;
                    }
                }
            }
            Player::White => engine_turn(engine, game),
        };

        game = game.apply(action)?;
    }

    print_result(game);
    Ok(())
}

/// The engine plays both sides from the initial position.
fn bot_vs_bot(engine: &mut dyn Engine) -> Result<()> {
    let mut game = Game::default();

    while !game.is_finished() {
        println!("\n{}\n", game);
        let action = engine_turn(engine, game);
        game = game.apply(action)?;
    }

    print_result(game);
    Ok(())
}

/// Search a fixed midgame position once and report how long it took.
fn benchmark(engine: &mut dyn Engine) {
    let board = Board::BENCHMARK;
    println!("{}\n", board.display_moves(Player::Black));

    let start = Instant::now();
    let outcome = engine.analyze(board, Player::Black);
    let elapsed = start.elapsed();

    let stats = engine.last_stats();
    match outcome.best_move {
        Some(mv) => println!("Best move: {}", mv),
        None => println!("Best move: pass"),
    }
    println!("Score:     {}", outcome.score);
    println!("Nodes:     {}", stats.nodes);
    println!("Leaves:    {}", stats.leaves);
    println!("Time:      {:.3} s", elapsed.as_secs_f64());
    if elapsed.as_secs_f64() > 0.0 {
        println!(
            "Speed:     {:.0} nodes/s",
            stats.nodes as f64 / elapsed.as_secs_f64()
        );
    }
}

fn engine_turn(engine: &mut dyn Engine, game: Game) -> Action {
    let player = game.active_player;
    let start = Instant::now();
    let action = Action::from(engine.search(game.board, player));

    match action {
        Action::Play(mv) => println!(
            "{} plays {} ({} nodes, {:.2} s)",
            player,
            mv,
            engine.last_stats().nodes,
            start.elapsed().as_secs_f64()
        ),
        Action::Pass => println!("{} has no legal moves and passes.", player),
    }
    action
}

fn print_result(game: Game) {
    println!("\n{}\n", game.board);
    println!(
        "Final score: Black {}, White {}",
        game.board.count(Player::Black),
        game.board.count(Player::White)
    );
    match game.winner() {
        Some(winner) => println!("{} wins.", winner),
        None => println!("Draw."),
    }
}
