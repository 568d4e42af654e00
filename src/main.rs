//! Vienna Express: A Murder Mystery
//!
//! Entry point: parses the command line, sets up logging and the terminal,
//! runs one session to resolution, then prints the debrief (session log,
//! error log, player summary).

use clap::Parser;
use std::time::Duration;
use vienna_express::audio::{cues, AudioPlayer, SilentAudio};
use vienna_express::console::{Console, Style};
use vienna_express::data::LogEntry;
use vienna_express::game::{narrative, GameConfig, GameOutcome};
use vienna_express::{Game, Result};

#[derive(Parser, Debug)]
#[command(
    name = "vienna-express",
    version,
    about = "A timer-bounded murder mystery aboard the Vienna express"
)]
struct Args {
    /// Countdown length in seconds
    #[arg(long, default_value_t = 300)]
    duration: u64,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Emit the post-run debrief as JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Everything worth inspecting after a run
#[derive(serde::Serialize)]
struct Debrief<'a> {
    agent: Option<&'a str>,
    outcome: Option<GameOutcome>,
    clues_found: u32,
    decisions_made: &'a [String],
    elapsed_seconds: f64,
    session_log: &'a [LogEntry],
    error_log: &'a [LogEntry],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vienna_express=warn".into()),
        )
        .init();

    let args = Args::parse();
    tracing::info!(version = vienna_express::VERSION, "Vienna Express starting");

    let mut console = Console::stdio(!args.no_color);
    let mut audio = SilentAudio;

    // Title screen
    console.print(narrative::TITLE_BANNER, Style::Success)?;
    audio.load_track(cues::BACKGROUND);
    audio.play_once();
    let _ = console.prompt("Press Enter to start the game")?;

    let mut game = Game::new(GameConfig {
        duration: Duration::from_secs(args.duration),
    });
    game.run(&mut console, &mut audio)?;

    if args.json {
        let debrief = Debrief {
            agent: game.agent_name(),
            outcome: game.outcome(),
            clues_found: game.stats().clues_found,
            decisions_made: &game.stats().decisions_made,
            elapsed_seconds: game.stats().elapsed().as_secs_f64(),
            session_log: game.session_log().entries(),
            error_log: game.error_log().entries(),
        };
        println!("{}", serde_json::to_string_pretty(&debrief)?);
        return Ok(());
    }

    console.print_blank()?;
    console.print("Game logs:", Style::Plain)?;
    for message in game.session_log().messages() {
        console.print(message, Style::Plain)?;
    }

    console.print_blank()?;
    console.print("Game error logs:", Style::Plain)?;
    for message in game.error_log().messages() {
        console.print(message, Style::Plain)?;
    }

    console.print_blank()?;
    console.print("Game summary:", Style::Plain)?;
    for line in game.stats().summary_lines() {
        console.print(&line, Style::Plain)?;
    }

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  Thanks for playing Vienna Express!                    ║");
    println!("║                                                        ║");
    println!("║  The truth is always aboard.                           ║");
    println!("╚════════════════════════════════════════════════════════╝\n");

    Ok(())
}
