// sortty: time-travel sorting algorithm visualizer for the terminal

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};

use sortty::algorithms::{AlgorithmKind, AlgorithmRunner};
use sortty::ui::theme::{DARK_THEME, LIGHT_THEME};
use sortty::ui::App;

/// Default element count for generated inputs
const DEFAULT_RANDOM_COUNT: usize = 16;

/// Step payloads snapshot the array, so very large inputs would make a full
/// run's history enormous. Quadratic algorithms stay comfortable below this.
const MAX_INPUT_LEN: usize = 256;

#[derive(Parser)]
#[command(name = "sortty", version, about = "Time-travel sorting algorithm visualizer")]
struct Args {
    /// Values to sort, e.g. `sortty 5 3 8 1`
    #[arg(value_name = "VALUE", allow_negative_numbers = true)]
    values: Vec<i32>,

    /// Algorithm to visualize
    #[arg(short, long, value_enum, default_value_t = AlgorithmKind::Bubble)]
    algorithm: AlgorithmKind,

    /// Read input values from a file (whitespace or comma separated)
    #[arg(short, long, conflicts_with = "values")]
    file: Option<PathBuf>,

    /// Sort N random values between 1 and 99
    #[arg(
        short = 'n',
        long = "random",
        value_name = "N",
        conflicts_with_all = ["values", "file"]
    )]
    random: Option<usize>,

    /// Seed for --random, for reproducible runs
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Use the light color palette
    #[arg(long)]
    light: bool,
}

/// Pick the input values from the command line, a file, or a random generator.
fn resolve_input(args: &Args) -> Result<Vec<i32>, Box<dyn std::error::Error>> {
    if !args.values.is_empty() {
        return Ok(args.values.clone());
    }

    if let Some(path) = &args.file {
        let raw = fs::read_to_string(path)?;
        let mut values = Vec::new();
        for token in raw
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
        {
            let value = token
                .parse::<i32>()
                .map_err(|e| format!("invalid value {:?} in {}: {}", token, path.display(), e))?;
            values.push(value);
        }
        return Ok(values);
    }

    let count = args.random.unwrap_or(DEFAULT_RANDOM_COUNT);
    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok((0..count).map(|_| rng.gen_range(1..=99)).collect())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let input = match resolve_input(&args) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if input.len() > MAX_INPUT_LEN {
        eprintln!(
            "Error: {} values exceeds the supported maximum of {}",
            input.len(),
            MAX_INPUT_LEN
        );
        std::process::exit(1);
    }

    eprintln!(
        "Visualizing {} over {} value(s)...",
        args.algorithm.label(),
        input.len()
    );

    let runner = AlgorithmRunner::new(args.algorithm.create());
    let theme = if args.light { &LIGHT_THEME } else { &DARK_THEME };

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(runner, input, theme);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
