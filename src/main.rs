//! finquest command-line interface.
//!
//! Usage:
//!   finquest status
//!   finquest add "Save for a bike" --reward 150 --goal 300 --category savings
//!   finquest start <ID>
//!   finquest complete <ID>
//!   finquest curve --levels 30

use chrono::Utc;
use clap::{Parser, Subcommand};
use finquest::config::Settings;
use finquest::constants::{
    DEFAULT_CURVE_TABLE_LEVELS, MAX_CURVE_TABLE_LEVELS, PROGRESS_BAR_WIDTH,
};
use finquest::leveling::{curve_table, to_progress, LevelProgress};
use finquest::quests::Quest;
use finquest::utils::{build_info, DataDir};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "finquest")]
#[command(about = "Earn XP and levels by completing savings quests")]
struct Cli {
    /// Data directory (defaults to ~/.finquest)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show level progress and recent quest activity
    Status,

    /// Create a new quest
    Add {
        title: String,

        /// XP paid out on completion
        #[arg(short, long, default_value_t = 0.0, value_parser = parse_finite)]
        reward: f64,

        /// Savings target
        #[arg(short, long, default_value_t = 0.0, value_parser = parse_finite)]
        goal: f64,

        #[arg(short, long, default_value = "savings")]
        category: String,
    },

    /// Mark a quest as in progress
    Start { id: String },

    /// Complete a quest and collect its reward
    Complete { id: String },

    /// Print the XP curve from settings.json
    Curve {
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_CURVE_TABLE_LEVELS,
            value_parser = clap::value_parser!(u32).range(1..=MAX_CURVE_TABLE_LEVELS as i64)
        )]
        levels: u32,
    },

    /// Show version information
    Version,
}

fn parse_finite(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("expected a finite number, got {}", s))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn open_data_dir(data_dir: Option<PathBuf>) -> finquest::Result<(DataDir, Settings)> {
    let dir = match data_dir {
        Some(path) => DataDir::at(path)?,
        None => DataDir::default_location()?,
    };
    tracing::debug!(data_dir = %dir.root().display(), "using data directory");
    let settings = Settings::load(&dir);
    Ok((dir, settings))
}

fn run(cli: Cli) -> finquest::Result<()> {
    match cli.command.unwrap_or(Commands::Status) {
        Commands::Version => {
            println!("{}", build_info::version_line());
        }
        Commands::Status => {
            let (dir, settings) = open_data_dir(cli.data_dir)?;
            let state = dir.load_profile()?;
            let board = dir.load_quests()?;
            print_badge(&to_progress(&state, &settings.curve));
            println!();
            print_quest_list("Recently completed", &board.recently_completed(), true);
            println!();
            print_quest_list("Active quests", &board.recently_created(), false);
        }
        Commands::Add {
            title,
            reward,
            goal,
            category,
        } => {
            let (dir, _) = open_data_dir(cli.data_dir)?;
            let mut board = dir.load_quests()?;
            let id = board.add(Quest::new(title.as_str(), category, goal, reward, Utc::now()))?;
            dir.save_quests(&board)?;
            println!("Added quest {} ({})", title, id);
        }
        Commands::Start { id } => {
            let (dir, _) = open_data_dir(cli.data_dir)?;
            let mut board = dir.load_quests()?;
            board.start(&id, Utc::now())?;
            dir.save_quests(&board)?;
            println!("Quest {} is in progress", id);
        }
        Commands::Complete { id } => {
            let (dir, settings) = open_data_dir(cli.data_dir)?;
            let mut board = dir.load_quests()?;
            let state = dir.load_profile()?;
            let gain = board.complete(&id, &state, &settings.curve, Utc::now())?;

            // Quest first: a crash in between must not let the reward be claimed twice
            dir.save_quests(&board)?;
            dir.save_profile(&gain.state)?;

            if gain.gained > 0 {
                println!(
                    "Level up! +{} level(s), now level {}",
                    gain.gained, gain.state.level
                );
            }
            print_badge(&to_progress(&gain.state, &settings.curve));
        }
        Commands::Curve { levels } => {
            let (_, settings) = open_data_dir(cli.data_dir)?;
            print_curve(&settings, levels);
        }
    }

    Ok(())
}

fn print_badge(progress: &LevelProgress) {
    let filled = (progress.progress * PROGRESS_BAR_WIDTH as f64).round() as usize;
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(PROGRESS_BAR_WIDTH.saturating_sub(filled))
    );

    println!("╔══════════════════════════════════════════╗");
    println!("║  Level {:<34}║", progress.level);
    println!("╚══════════════════════════════════════════╝");
    match progress.xp_remaining() {
        Some(remaining) => println!(
            "  {} {:.0}/{:.0} XP ({:.0} to go)",
            bar, progress.xp, progress.next_level_xp, remaining
        ),
        None => println!("  {} MAX LEVEL", bar),
    }
    if let Some(total) = progress.total_xp {
        println!("  Lifetime XP: {:.0}", total);
    }
}

fn print_quest_list(heading: &str, quests: &[Quest], completed: bool) {
    println!("{}:", heading);
    if quests.is_empty() {
        println!("  (none)");
        return;
    }
    for quest in quests {
        let when = if completed {
            quest.finished_at()
        } else {
            quest.created_at()
        };
        let date = when
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        println!(
            "  {}  {:<28} {:>6.0} XP  [{}]  {}",
            date,
            quest.title,
            quest.exp_reward,
            quest.status.name(),
            quest.id
        );
    }
}

fn print_curve(settings: &Settings, levels: u32) {
    let curve = &settings.curve;
    println!(
        "XP curve: {} (base {}, factor {}, growth {})",
        curve.mode.name(),
        curve.base,
        curve.factor,
        curve.growth()
    );
    println!("{:>6}  {:>14}  {:>16}", "Level", "XP to next", "Total to reach");
    for row in curve_table(curve, levels) {
        let next = if row.xp_to_next.is_infinite() {
            "max".to_string()
        } else {
            format!("{:.0}", row.xp_to_next)
        };
        println!(
            "{:>6}  {:>14}  {:>16.0}",
            row.level, next, row.total_to_reach
        );
    }
}
