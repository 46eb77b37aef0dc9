//! # Gridmerge Terminal Entry Point
//!
//! Restores the saved game, then reads commands from stdin and prints the
//! neighborhood around the player after every accepted action.

use clap::Parser;
use gridmerge::{
    ActivationResult, DeterministicSpawner, FileSaveStore, GameConfig, GameDriver, GameEvent,
    GridResult, MessageImportance, MovementMode, PersistenceGateway, PlayerInput, SeededLuck, HELP_TEXT,
};
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Command line arguments for the Gridmerge game.
#[derive(Parser, Debug)]
#[command(name = "gridmerge")]
#[command(about = "A location-grid token merging game")]
#[command(version)]
struct Args {
    /// Where progress is saved
    #[arg(long, default_value = "gridmerge-save.json")]
    save: PathBuf,

    /// JSON file overriding gameplay options
    #[arg(long)]
    config: Option<PathBuf>,

    /// World seed mixed into every luck roll
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Discard any saved game before starting
    #[arg(long)]
    reset: bool,

    /// Let `goto` position reports drive movement instead of clicks
    #[arg(long)]
    feed: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
        tracing::debug!("tracing subscriber installed");
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .format_target(false)
            .init();
    }
}

fn run(args: &Args) -> GridResult<()> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if args.feed {
        config.movement_mode = MovementMode::ExternalFeed;
    }

    info!("Starting Gridmerge v{}", gridmerge::VERSION);

    let spawner = DeterministicSpawner::from_config(&config, SeededLuck::new(args.seed));
    let gateway = PersistenceGateway::new(FileSaveStore::new(&args.save));
    let mut driver = GameDriver::with_persistence(config, spawner, gateway);
    driver.subscribe(|event| match event {
        GameEvent::Victory { value } => {
            println!("*** Victory! You made a {value}. Keep going! ***");
        }
        GameEvent::Message {
            text,
            importance: MessageImportance::Important,
        } => println!("!!! {text}"),
        _ => {}
    });
    if args.reset {
        driver.reset();
    }

    println!("Welcome to Gridmerge! {HELP_TEXT}");
    print_neighborhood(&mut driver);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let input = match PlayerInput::parse(&line) {
            Ok(input) => input,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match input {
            PlayerInput::Activate(target) => {
                let result = driver.handle_activation(target);
                report(&mut driver, &result);
            }
            PlayerInput::Step(direction) => {
                let result = driver.step(direction);
                report(&mut driver, &result);
            }
            PlayerInput::Position(point) => {
                let result = driver.handle_position_update(point);
                report(&mut driver, &result);
            }
            PlayerInput::Look => print_neighborhood(&mut driver),
            PlayerInput::Inventory => match driver.session().inventory.peek() {
                Some(value) => println!("You are carrying a {value}."),
                None => println!("Your hands are empty."),
            },
            PlayerInput::Statistics => {
                let stats = &driver.session().statistics;
                println!(
                    "picked up {}, placed {}, merges {}, moves {}, refused {}, best {}",
                    stats.tokens_picked_up,
                    stats.tokens_placed,
                    stats.merges,
                    stats.moves,
                    stats.rejected_actions,
                    stats.highest_token
                );
            }
            PlayerInput::Reset => {
                driver.reset();
                print_neighborhood(&mut driver);
            }
            PlayerInput::Help => println!("{HELP_TEXT}"),
            PlayerInput::Quit => break,
        }
        io::stdout().flush()?;
    }

    info!("Game loop ended");
    Ok(())
}

fn report(driver: &mut GameDriver, result: &ActivationResult) {
    println!("{}", result.message);
    if result.accepted {
        print_neighborhood(driver);
    }
}

/// Prints the visible window with north at the top. The player's cell is
/// bracketed; empty cells show as dots.
fn print_neighborhood(driver: &mut GameDriver) {
    let player = driver.session().player_position;
    let size = driver.config().neighborhood_size;
    let cells = driver.visible_cells();

    for row in cells.chunks(2 * size.max(1) as usize).rev() {
        let line: String = row
            .iter()
            .map(|cell| {
                let text = cell.value.map_or_else(|| ".".to_string(), |v| v.to_string());
                if cell.coordinate == player {
                    format!("[{text:^3}]")
                } else {
                    format!(" {text:^3} ")
                }
            })
            .collect();
        println!("{line}");
    }

    match driver.session().inventory.peek() {
        Some(value) => println!("At {player}, carrying {value}"),
        None => println!("At {player}, hands empty"),
    }
}
