//! Command-line JPS+ demo.
//!
//! Run: cargo run --bin jpsplus-demo -- [grid-file] [row,col] [row,col]
//!
//! Without arguments it searches the built-in 50×50 world from corner to
//! corner. Set `RUST_LOG=debug` (or `trace`) for search diagnostics.

use std::time::Instant;
use std::{env, fs, process};

use jpsplus::{Cell, JumpMatrix};
use jpsplus_demos::{WORLD_50X50, parse_cell, parse_grid, render_path};
use log::info;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let text = match args.first() {
        Some(path) => fs::read_to_string(path)?,
        None => WORLD_50X50.to_owned(),
    };
    let grid = parse_grid(&text)?;

    let corner = Cell::new(grid.rows() as i32 - 1, grid.cols() as i32 - 1);
    let start = cell_arg(&args, 1)?.unwrap_or(Cell::ZERO);
    let goal = cell_arg(&args, 2)?.unwrap_or(corner);

    let t = Instant::now();
    let matrix = JumpMatrix::new(grid);
    info!(
        "precomputed {}x{} matrix ({} jump points) in {:?}",
        matrix.rows(),
        matrix.cols(),
        matrix.jump_point_count(),
        t.elapsed()
    );

    let t = Instant::now();
    let (path, stats) = matrix.find_path_with_stats(start, goal)?;
    info!(
        "found path {start} -> {goal} in {:?}: {} expansions, {} pushes",
        t.elapsed(),
        stats.expanded,
        stats.pushed
    );

    print!("{}", render_path(matrix.grid(), &path));
    let jumps: Vec<String> = path.iter().map(ToString::to_string).collect();
    println!("cost {:.3}: {}", stats.cost, jumps.join(" -> "));
    Ok(())
}

fn cell_arg(args: &[String], i: usize) -> Result<Option<Cell>, String> {
    match args.get(i) {
        None => Ok(None),
        Some(s) => parse_cell(s)
            .map(Some)
            .ok_or_else(|| format!("expected row,col but got {s:?}")),
    }
}
