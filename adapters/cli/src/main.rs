#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the game as an ASCII animation.
//!
//! A reader thread turns stdin lines into input events while the main
//! thread ticks the state at a fixed interval and presents each frame.

use std::{
    io::{self, BufRead},
    thread,
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_core::InputEvent;
use snake_rendering::present;
use snake_world::{GameConfig, GameState, InputQueue};

mod ascii;

use ascii::AsciiSink;

/// Classic snake in the terminal.
#[derive(Debug, Parser)]
#[command(name = "snake", version, about)]
struct Args {
    /// Board width in cells.
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(i32).range(1..))]
    width: i32,

    /// Board height in cells.
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(i32).range(1..))]
    height: i32,

    /// Milliseconds between ticks.
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Points awarded per apple.
    #[arg(long, default_value_t = 100)]
    apple_points: i64,

    /// Growth steps granted per apple.
    #[arg(long, default_value_t = 5)]
    growth_per_apple: u32,

    /// Apples to eat before the level advances.
    #[arg(long, default_value_t = 10)]
    apples_per_level: u32,

    /// Ticks a candidate spawn is simulated forward before acceptance.
    #[arg(long, default_value_t = 10)]
    safety_lookahead: u32,

    /// Seed for the game's random generator; omit for an entropy seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks; omit to run until quit.
    #[arg(long)]
    max_ticks: Option<u64>,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            apple_points: self.apple_points,
            growth_per_apple: self.growth_per_apple,
            apples_per_level: self.apples_per_level,
            safety_lookahead: self.safety_lookahead,
            tick_interval: Duration::from_millis(self.tick_ms),
        }
    }
}

/// Maps one key of buffered terminal input to its event, if any.
fn event_for_key(key: char) -> Option<InputEvent> {
    match key.to_ascii_lowercase() {
        'w' => Some(InputEvent::MoveUp),
        's' => Some(InputEvent::MoveDown),
        'a' => Some(InputEvent::MoveLeft),
        'd' => Some(InputEvent::MoveRight),
        'p' => Some(InputEvent::TogglePaused),
        'r' => Some(InputEvent::PlayAgain),
        'q' => Some(InputEvent::QuitGame),
        _ => None,
    }
}

fn spawn_input_reader(queue: InputQueue) {
    let handle = thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            for key in line.chars() {
                if let Some(event) = event_for_key(key) {
                    queue.push(event);
                }
            }
        }
    });
    // The reader lives for the whole process; nothing joins it.
    drop(handle);
}

/// Entry point for the snake command-line interface.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.game_config();
    let rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut state = GameState::initial(config, rng)
        .context("no safe snake spawn on the configured board")?;
    spawn_input_reader(state.input_queue());

    let mut sink = AsciiSink::new(config.width, config.height, io::stdout().lock());
    let mut ticks: u64 = 0;
    loop {
        present(&state, &mut sink)?;
        if state.is_done() {
            break;
        }
        if let Some(max_ticks) = args.max_ticks {
            if ticks >= max_ticks {
                break;
            }
        }
        thread::sleep(config.tick_interval);
        state = state.next_state();
        ticks += 1;
    }

    Ok(())
}
