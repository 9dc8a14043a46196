use std::path::PathBuf;

use clap::Parser;
use log::{info, LevelFilter};
use mazecore::{Maze, MazeParams};
use mazeterm::{
    canvas::Canvas,
    logging,
    settings::Settings,
    term::{self, Animation, Terminal},
    AppError,
};

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "mazeterm")]
struct Args {
    #[clap(short, long, help = "Number of rows")]
    rows: Option<usize>,
    #[clap(short, long, help = "Number of columns")]
    cols: Option<usize>,
    #[clap(short, long, help = "Seed for the generator, random if not set")]
    seed: Option<u64>,
    #[clap(long, help = "Cell width in terminal columns")]
    cell_width: Option<u16>,
    #[clap(long, help = "Cell height in terminal rows")]
    cell_height: Option<u16>,
    #[clap(short, long, action, help = "Animate generation and solving")]
    animate: bool,
    #[clap(short, long, help = "Delay between animation frames in milliseconds")]
    delay: Option<u64>,
    #[clap(long, action, help = "Only generate, don't solve")]
    no_solve: bool,
    #[clap(long, help = "Settings file to use instead of the default one")]
    config: Option<PathBuf>,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "More logging, repeat for more")]
    verbose: u8,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(rows) = self.rows {
            settings.rows = rows;
        }
        if let Some(cols) = self.cols {
            settings.cols = cols;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if let Some(width) = self.cell_width {
            settings.cell_width = width;
        }
        if let Some(height) = self.cell_height {
            settings.cell_height = height;
        }
        if let Some(delay) = self.delay {
            settings.frame_delay_ms = delay;
        }
    }

    fn level(&self, settings: &Settings) -> LevelFilter {
        match self.verbose {
            0 => settings.level_filter(),
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let settings_path = args.config.clone().unwrap_or_else(Settings::default_path);

    if args.reset_config {
        Settings::reset_config(settings_path)?;
        return Ok(());
    }

    if args.show_config_path {
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    let mut settings = Settings::load(settings_path)?;
    args.apply(&mut settings);

    if logging::init(args.level(&settings)).is_err() {
        eprintln!("logger was already set");
    }

    better_panic::install();

    let params = settings.maze_params();
    let canvas = Canvas::for_params(&params);

    if args.animate {
        logging::get_logger().hold();
        let result = animate(params, canvas, &settings, args.no_solve);
        logging::get_logger().release();
        return result;
    }

    let mut maze = Maze::new(params, canvas)?;
    if !args.no_solve {
        maze.solve();
    }
    info!("seed: {}", maze.seed());
    term::print(maze.renderer())?;

    Ok(())
}

fn animate(
    params: MazeParams,
    canvas: Canvas,
    settings: &Settings,
    no_solve: bool,
) -> Result<(), AppError> {
    let terminal = Terminal::new()?;

    let mut maze = Maze::new(params, Animation::new(canvas, settings.frame_delay()))?;
    if !no_solve {
        maze.solve();
    }
    info!("seed: {}", maze.seed());

    terminal.wait_for_close()?;
    maze.into_renderer().finish()?;
    Ok(())
}
