//! `inkboard` command line entry point.

use clap::{Parser, Subcommand};
use inkboard_core::placement::Placer;
use inkboard_core::{Board, BoardError, BoardResult, Camera, GeometryConfig, LayoutGenerator};
use inkboard_render::{grid_bounds, render_grid};
use kurbo::{Point, Size, Vec2};
use serde_json::json;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "inkboard", about = "Canvas geometry tools for InkBoard boards")]
struct Cli {
    /// JSON file overriding geometry defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a titled bullet list as a frame of cards.
    Layout {
        /// Text file to read, or `-` for stdin.
        input: String,
        /// Existing shapes to avoid (JSON array of shape records).
        #[arg(long)]
        board: Option<PathBuf>,
        #[arg(long, value_parser = parse_point, default_value = "0,0", allow_hyphen_values = true)]
        center: Point,
    },
    /// Find a free top-left position for a box.
    Place {
        width: f64,
        height: f64,
        #[arg(long, value_parser = parse_point, default_value = "0,0", allow_hyphen_values = true)]
        at: Point,
        #[arg(long)]
        board: Option<PathBuf>,
    },
    /// Count the grid dots drawn for a viewport.
    Grid {
        width: f64,
        height: f64,
        #[arg(long, value_parser = parse_point, default_value = "0,0", allow_hyphen_values = true)]
        pan: Point,
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,
        /// Grid spacing; defaults to the configured base size.
        #[arg(long)]
        size: Option<f64>,
    },
}

/// Parse `x,y`.
fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got `{}`", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate `{}`: {}", v.trim(), e))
    };
    Ok(Point::new(parse(x)?, parse(y)?))
}

fn read_input(input: &str) -> BoardResult<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| BoardError::Io(format!("Failed to read stdin: {}", e)))?;
        return Ok(text);
    }
    fs::read_to_string(input).map_err(|e| BoardError::Io(format!("Failed to read {}: {}", input, e)))
}

fn load_board(path: Option<&Path>, config: &GeometryConfig) -> BoardResult<Board> {
    let Some(path) = path else {
        return Ok(Board::with_config(config));
    };
    let json = fs::read_to_string(path)
        .map_err(|e| BoardError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    let board = Board::from_json(&json, config)?;
    log::info!("Loaded {} shapes from {}", board.len(), path.display());
    Ok(board)
}

fn to_pretty(value: &serde_json::Value) -> BoardResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| BoardError::Encode(e.to_string()))
}

fn layout(text: &str, board: &Board, center: Point, config: &GeometryConfig) -> BoardResult<String> {
    let generator = LayoutGenerator::new(config.layout.clone(), config.placement.clone());
    match generator.generate(text, center, &board.snapshot()) {
        Some(result) => {
            log::info!(
                "Generated {} cards in a {}x{} grid",
                result.cards.len(),
                result.columns,
                result.rows
            );
            serde_json::to_string_pretty(&result).map_err(|e| BoardError::Encode(e.to_string()))
        }
        None => {
            log::info!("No list items found; nothing generated");
            Ok("null".to_string())
        }
    }
}

fn place(size: Size, at: Point, board: &Board, config: &GeometryConfig) -> BoardResult<String> {
    let position = Placer::new(config.placement.clone()).find_free_position(at, size, &board.snapshot());
    to_pretty(&json!({ "x": position.x, "y": position.y }))
}

fn grid(viewport: Size, pan: Point, zoom: f64, base_size: f64, config: &GeometryConfig) -> BoardResult<String> {
    let camera = Camera::at(Vec2::new(pan.x, pan.y), zoom);
    let transform = camera.transform();
    let dots = render_grid(
        transform,
        viewport,
        base_size,
        config.grid.dot_color.into(),
        config.grid.dot_radius,
    );
    let bounds = grid_bounds(transform, viewport, base_size);
    to_pretty(&json!({ "dots": dots.len(), "bounds": bounds }))
}

fn run(cli: Cli) -> BoardResult<()> {
    let config = match &cli.config {
        Some(path) => GeometryConfig::load(path)?,
        None => GeometryConfig::default(),
    };

    let output = match cli.command {
        Command::Layout { input, board, center } => {
            let text = read_input(&input)?;
            let board = load_board(board.as_deref(), &config)?;
            layout(&text, &board, center, &config)?
        }
        Command::Place {
            width,
            height,
            at,
            board,
        } => {
            let board = load_board(board.as_deref(), &config)?;
            place(Size::new(width, height), at, &board, &config)?
        }
        Command::Grid {
            width,
            height,
            pan,
            zoom,
            size,
        } => {
            let base_size = size.unwrap_or(config.grid.base_size);
            grid(Size::new(width, height), pan, zoom, base_size, &config)?
        }
    };

    println!("{}", output);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Running {:?}", cli.command);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("inkboard: {}", e);
            ExitCode::FAILURE
        }
    }
}
