mod cave;
mod frame;
mod game;
mod state;
mod term;

use std::{fs::File, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use log::{error, info};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

pub type TermInt = u16;
pub type Coords = (u16, u16);

#[derive(Parser)]
#[command(name = "cavern", about = "Fly down a cave that never ends")]
struct Args {
    /// Seed for the cave generator, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// File to write the log to
    #[arg(long, default_value = "cavern.log")]
    log_file: PathBuf,

    /// Log debug messages too
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The terminal belongs to the game, so logs go to a file
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Cavern starting up");

    logged(play(seed))
}

/// Every failure, start-up ones included, ends up in the log before `main` returns it.
fn logged(res: Result<()>) -> Result<()> {
    if let Err(e) = &res {
        error!("{:#}", e);
    }

    res
}

fn play(seed: u64) -> Result<()> {
    let mut game = game::CaveGame::new(seed)?;

    let res = game.initialize().and_then(|_| game.run());
    let restored = game.shutdown();

    res.and(restored)
}
