use docopt::Docopt;
use log::{debug, info, warn};
use serde_derive::Deserialize;
use mazes::{
    generators,
    grid::Grid,
    grid_displays::GridRender,
    pathing,
    renderers,
    units::{Height, Width},
};
use std::{
    io,
    io::prelude::*,
    fs::File,
};

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [--width=<w>] [--height=<h>] [--seed=<n>] [--show-path] [--text-out=<path>] [--image-out=<path>] [--cell-pixels=<n>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --width=<w>            The maze width in cells, at least 3 [default: 20].
    --height=<h>           The maze height in cells, at least 3 [default: 20].
    --seed=<n>             Seed for the random number generator, the same seed gives the same maze.
    --show-path            Find the shortest path from the entrance to the exit and draw it.
    --text-out=<path>      Output file path for a textual rendering of the maze. Printed to stdout if neither output path is given.
    --image-out=<path>     Output file path for an image rendering of the maze. Always PNG format.
    --cell-pixels=<n>      Pixel count of one cell side in an image rendering [default: 10] max 255.
    --save-edges=<path>    Serialize the maze passages to a text file: each line is a pair of numbers. Line 1: n(#passage cells) m(#edges). Line 2+ edge between passage cells. Uses 1-based vertex indices in row major order.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_height: usize,
    flag_seed: Option<u64>,
    flag_show_path: bool,
    flag_text_out: Option<String>,
    flag_image_out: Option<String>,
    flag_cell_pixels: u8,
    flag_save_edges: Option<String>,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            ImageSaveError(::image::ImageError);
        }

        errors {
            DimensionsTooSmall(width: usize, height: usize) {
                description("maze dimensions too small")
                display("A {}x{} maze has no room for an entrance and exit, both sides must be at least 3", width, height)
            }
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    init_logging();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    debug!("Driver arguments: {:?}", args);

    let (width, height) = (args.flag_width, args.flag_height);
    if width < 3 || height < 3 {
        return Err(ErrorKind::DimensionsTooSmall(width, height).into());
    }

    let maze_grid = match args.flag_seed {
        Some(seed) => generators::generate_seeded(Width(width), Height(height), seed),
        None => generators::generate(Width(width), Height(height)),
    };
    let (start, end) = match (maze_grid.start(), maze_grid.end()) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err("Generated maze has no entrance or exit.".into()),
    };
    info!("Generated {}x{} maze, entrance {} exit {}", width, height, start, end);

    let path = if args.flag_show_path {
        let path_opt = pathing::find_shortest_path(&maze_grid, start, end);
        match path_opt {
            Some(ref path) => info!("Path found, {} cells long", path.len()),
            None => warn!("No path found from {} to {}", start, end),
        }
        path_opt
    } else {
        None
    };

    if let Some(ref edges_path) = args.flag_save_edges {
        save_maze_graph(&maze_grid, edges_path)?;
    }

    if let Some(ref image_path) = args.flag_image_out {
        let render_options = renderers::RenderOptionsBuilder::new()
            .cell_side_pixels_length(args.flag_cell_pixels)
            .path(path.as_deref())
            .build();
        renderers::save_grid_image(&maze_grid, &render_options, image_path)
            .chain_err(|| format!("Failed to write maze to image file {}", image_path))?;
    }

    let text = GridRender::new(&maze_grid, path.as_deref()).to_string();
    match args.flag_text_out {
        Some(ref text_path) => {
            write_text_to_file(&text, text_path)
                .chain_err(|| format!("Failed to write maze to text file {}", text_path))?;
        }
        None if args.flag_image_out.is_none() => print!("{}", text),
        None => {}
    }

    Ok(())
}

/// Logging is off unless `MAZES_LOG` is set, e.g. `MAZES_LOG=debug`.
fn init_logging() {
    if std::env::var("MAZES_LOG").is_ok() {
        let e = env_logger::Env::new()
            .filter("MAZES_LOG")
            .write_style("MAZES_LOG_STYLE");
        env_logger::init_from_env(e);
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let graph = maze_grid.passage_graph();

    let mut graph_data = String::new();
    graph_data.push_str(graph.node_count().to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(graph.edge_count().to_string().as_ref());
    graph_data.push('\n');

    // Nodes were added in row major order so node indices already follow it
    for edge in graph.raw_edges() {
        let src_as_1_based_index = edge.source().index() + 1;
        let dst_as_1_based_index = edge.target().index() + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
