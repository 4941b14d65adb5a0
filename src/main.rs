//! Khun Phaen Puzzle Solver
//!
//! Solves the Khun Phaen (Klotski) sliding-block puzzle: rectangular pieces
//! slide one cell at a time on a 4x5 board until the 2x2 khun reaches the
//! goal cell. The solver runs a breadth-first search over board
//! configurations, replays the shortest solution in the terminal and prints
//! frontier statistics.

use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;

use khun_phaen::{parser, render, solver};

/// Solves a Khun Phaen sliding-block puzzle and replays the solution.
#[derive(Parser)]
#[command(name = "khun-phaen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Puzzle setup file.
    #[arg(default_value = "khun_phaen.txt")]
    puzzle: PathBuf,

    /// Cap on the number of queued configurations.
    #[arg(long)]
    max_fringe: Option<usize>,

    /// Milliseconds between replay frames.
    #[arg(long, default_value_t = 500)]
    step_delay: u64,
}

fn main() {
    let cli = Cli::parse();

    let text = match fs::read_to_string(&cli.puzzle) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Failed to read {}: {}", cli.puzzle.display(), e);
            process::exit(2);
        }
    };
    let board = match parser::parse_setup(&text) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Invalid puzzle definition: {}", e);
            process::exit(2);
        }
    };

    println!("Khun Phaen start state:");
    println!();
    print!("{}", render::render(&board));

    let report = match solver::solve(&board, cli.max_fringe) {
        Ok(report) => report,
        Err(overflow) => {
            eprintln!("Error: {}", overflow);
            eprint!("{}", overflow.stats);
            process::exit(1);
        }
    };

    match report.path {
        Some(path) => {
            println!("Solved!");
            println!();
            if let Err(e) = render::replay(&path, Duration::from_millis(cli.step_delay)) {
                eprintln!("Replay failed: {}", e);
            }
            print!("{}", report.stats);
        }
        None => {
            println!("Not solved :(");
            print!("{}", report.stats);
        }
    }
}
