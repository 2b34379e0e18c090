use docopt::Docopt;
use error_chain::ChainedError;
use kruskal_mazes::{
    errors::*,
    maze::Maze,
    units::{ColumnsCount, RowsCount},
};
use log::info;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    process,
};

const USAGE: &str = "Kruskal Mazes

Usage:
    maze_driver -h | --help
    maze_driver [--rows=<r>] [--cols=<c>] [--seed=<s>] [--save-edges=<path>] [--quiet]

Options:
    -h --help            Show this screen.
    --rows=<r>           Number of rows in the maze grid [default: 10].
    --cols=<c>           Number of columns in the maze grid [default: 10].
    --seed=<s>           Seed the random wall choices to get the same maze every time.
    --save-edges=<path>  Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --quiet              Do not print the maze as text.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_cols: usize,
    flag_seed: Option<u64>,
    flag_save_edges: String,
    flag_quiet: bool,
}

fn main() {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    if let Err(e) = run(&args) {
        eprintln!("{}", e.display_chain());
        process::exit(1);
    }
}

fn run(args: &MazeArgs) -> Result<()> {
    let (rows, columns) = (RowsCount(args.flag_rows), ColumnsCount(args.flag_cols));
    let maze = match args.flag_seed {
        Some(seed) => Maze::from_seed(rows, columns, seed)?,
        None => Maze::new(rows, columns)?,
    };
    info!("Generated {} x {} maze with {} passages",
          args.flag_rows,
          args.flag_cols,
          maze.passages().count());

    if !args.flag_quiet {
        print!("{}", maze);
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze, &args.flag_save_edges)?;
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze: &Maze, file_path: &str) -> Result<()> {

    let passages: Vec<(usize, usize)> = maze.passages().collect();

    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", maze.size(), passages.len()));
    for (src, dst) in passages {
        graph_data.push_str(&format!("{} {}\n", src + 1, dst + 1));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;
    info!("Saved maze graph to {}", file_path);

    Ok(())
}
