//! Core game logic and state management

pub mod interaction;
pub mod narrative;

pub use interaction::{Approach, ArrestReport, Discovery, GateResult};

use crate::audio::{self, cues, AudioPlayer};
use crate::console::{Console, Style};
use crate::data::{Carriage, Character, CrimeScene, PlayerStats, SessionLog};
use crate::timer::Countdown;
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::time::Duration;

/// Current phase of the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pre-game menu: only quit or start
    NotStarted,
    /// Free exploration under the countdown
    InProgress,
    /// Terminal; the loop stops here
    Resolved(GameOutcome),
}

/// How the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The culprit was arrested in time
    Solved,
    /// An innocent passenger was arrested
    WrongArrest,
    /// The train reached Vienna first
    TimeExpired,
    /// The player walked away
    Quit,
}

/// Tunables supplied by the command line
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Countdown length
    pub duration: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(300),
        }
    }
}

/// Top-level player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quit,
    Start,
    Arrest,
    Interact,
    Examine,
    Review,
    Choose,
}

impl Command {
    /// Pre-game command set
    fn parse_pregame(input: &str) -> std::result::Result<Self, GameError> {
        match input.to_lowercase().as_str() {
            "q" => Ok(Self::Quit),
            "s" => Ok(Self::Start),
            other => Err(GameError::InvalidCommand(other.to_string())),
        }
    }

    /// In-game command set
    fn parse_ingame(input: &str) -> std::result::Result<Self, GameError> {
        match input.to_lowercase().as_str() {
            "q" => Ok(Self::Quit),
            "a" => Ok(Self::Arrest),
            "i" => Ok(Self::Interact),
            "e" => Ok(Self::Examine),
            "r" => Ok(Self::Review),
            "c" => Ok(Self::Choose),
            other => Err(GameError::InvalidCommand(other.to_string())),
        }
    }
}

/// Parse a 1-based menu index typed by the player
fn parse_index(input: &str) -> std::result::Result<usize, GameError> {
    input
        .trim()
        .parse::<usize>()
        .map_err(|err| GameError::Unexpected(format!("not a number: {input:?} ({err})")))
}

const PREGAME_PROMPT: &str = "Press 'q' to quit or 's' to start:";
const INGAME_PROMPT: &str = "Press 'q' to quit, 'a' to attempt an arrest, 'i' to interact, \
                             'e' to examine the crime scene, 'r' to review clues or 'c' to \
                             choose a carriage:";

/// The aggregate game state and its timed interaction loop
pub struct Game {
    phase: GamePhase,
    config: GameConfig,

    pub(crate) stats: PlayerStats,
    pub(crate) session_log: SessionLog,
    pub(crate) error_log: SessionLog,

    pub(crate) scene: CrimeScene,
    pub(crate) suspect: Character,
    pub(crate) witness: Character,
    pub(crate) bystanders: Vec<Character>,
    pub(crate) carriages: Vec<Carriage>,

    /// One-shot group-interview gates
    pub(crate) room_questioned: bool,
    pub(crate) platform_questioned: bool,

    agent_name: Option<String>,
    countdown: Option<Countdown>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            config,
            stats: PlayerStats::new(),
            session_log: SessionLog::new(),
            error_log: SessionLog::new(),
            scene: CrimeScene::new("First carriage of the train"),
            suspect: Character::suspect(
                "Mr. Ireland",
                "I was asleep in the second carriage for the evening.",
                "Confirmed by Mr Spain.",
            ),
            witness: Character::witness(
                "Ms. England",
                "I saw someone run towards carriage 3 after the incident.",
                "Suspicious figure in dark clothing.",
            ),
            bystanders: vec![
                Character::npc(
                    "Mr Germany",
                    "Welcome to my carriage. I will help as much as I can; France had \
                     terrible relations with almost every other nation, so it could have \
                     been anyone.",
                ),
                Character::npc(
                    "Ms Italy",
                    "Please excuse the mess. I believe it was either England or Spain; \
                     tensions between France and those two have been rising for quite \
                     some time.",
                ),
                Character::npc(
                    "Mr Spain",
                    "The passcode for carriage two is 4545, but I will not speak to you \
                     on this matter! What happened to France has been a long time \
                     coming. Now leave my carriage!",
                ),
            ],
            carriages: vec![
                Carriage::new(
                    "Carriage 1",
                    "6969",
                    "Torn letter containing the single word 'Oscail'",
                ),
                Carriage::new("Carriage 2", "4545", "The whispered phrase 'an doras'"),
                Carriage::new(
                    "Carriage 3",
                    "oscail an doras",
                    "Blood-soaked knife with a harp emblem",
                ),
            ],
            room_questioned: false,
            platform_questioned: false,
            agent_name: None,
            countdown: None,
        }
    }

    // --- read-side accessors -------------------------------------------------

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            GamePhase::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.phase, GamePhase::Resolved(_))
    }

    /// The ordered clue record
    pub fn clues(&self) -> &[String] {
        self.scene.review_clues()
    }

    pub fn carriages(&self) -> &[Carriage] {
        &self.carriages
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn session_log(&self) -> &SessionLog {
        &self.session_log
    }

    pub fn error_log(&self) -> &SessionLog {
        &self.error_log
    }

    pub fn agent_name(&self) -> Option<&str> {
        self.agent_name.as_deref()
    }

    // --- state transitions ---------------------------------------------------

    /// Move to the terminal phase. The first resolution wins; later calls
    /// are ignored.
    pub(crate) fn resolve(&mut self, outcome: GameOutcome) {
        if matches!(self.phase, GamePhase::Resolved(_)) {
            return;
        }
        tracing::info!(?outcome, "game resolved");
        self.session_log.log(format!("Game resolved: {outcome:?}"));
        self.phase = GamePhase::Resolved(outcome);
    }

    fn expired(&self) -> bool {
        self.countdown.as_ref().is_some_and(|c| c.is_expired())
    }

    // --- the loop ------------------------------------------------------------

    /// Run the session to resolution: start the countdown, then read and
    /// dispatch commands until a terminal action or the deadline.
    ///
    /// Command failures are logged and survived; the loop only ends through
    /// a resolution. Every exit path stops the countdown thread and closes
    /// the stats clock exactly once.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        audio: &mut dyn AudioPlayer,
    ) -> Result<()> {
        self.countdown = Some(Countdown::start(self.config.duration));
        self.session_log.log("Game started");

        for line in narrative::WELCOME {
            console.print(line, Style::Success)?;
        }
        audio.load_track(cues::BACKGROUND);
        audio.play_looping();

        while self.is_running() {
            self.display_remaining_time(console)?;

            if self.expired() {
                console.print(narrative::TIMEOUT, Style::Alert)?;
                self.resolve(GameOutcome::TimeExpired);
                break;
            }

            match self.update(console, audio) {
                Ok(()) => self.session_log.log("Successfully updated"),
                Err(err) => match err.downcast_ref::<GameError>() {
                    Some(GameError::InvalidSelection(_)) | Some(GameError::InvalidCommand(_)) => {
                        self.error_log.log(format!("Error found: {err}."));
                    }
                    _ => {
                        self.error_log
                            .log(format!("Unexpected error from run(): {err}."));
                        console.print(
                            "An unexpected error occurred. We continue playing...",
                            Style::Alert,
                        )?;
                    }
                },
            }
            self.session_log.log("---");
        }

        self.finalize(audio);
        Ok(())
    }

    /// Loop-end finalizer, shared by every exit path
    fn finalize(&mut self, audio: &mut dyn AudioPlayer) {
        self.stats.set_end_time();
        if let Some(countdown) = &mut self.countdown {
            countdown.stop();
        }
        audio.stop();
        self.session_log.log("Game over");
    }

    fn display_remaining_time<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        if let Some(countdown) = &self.countdown {
            if !countdown.is_expired() {
                console.print(
                    &format!("Time remaining: {:.2} seconds", countdown.remaining_secs()),
                    Style::Plain,
                )?;
            }
        }
        Ok(())
    }

    /// One loop iteration: read a command for the current phase and act on it
    fn update<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        audio: &mut dyn AudioPlayer,
    ) -> Result<()> {
        match self.phase {
            GamePhase::NotStarted => self.update_pregame(console, audio),
            GamePhase::InProgress => self.update_ingame(console, audio),
            GamePhase::Resolved(_) => Ok(()),
        }
    }

    fn update_pregame<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        audio: &mut dyn AudioPlayer,
    ) -> Result<()> {
        let Some(input) = console.prompt(PREGAME_PROMPT)? else {
            self.resolve(GameOutcome::Quit);
            return Ok(());
        };

        match Command::parse_pregame(&input) {
            Ok(Command::Quit) => {
                self.resolve(GameOutcome::Quit);
                Ok(())
            }
            Ok(Command::Start) => {
                self.phase = GamePhase::InProgress;
                self.start_sequence(console, audio)
            }
            Ok(_) | Err(_) => {
                console.print("Invalid entry.", Style::Alert)?;
                Err(GameError::InvalidCommand(input).into())
            }
        }
    }

    /// The intro: cue, agent name, mission briefing, background loop
    fn start_sequence<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        audio: &mut dyn AudioPlayer,
    ) -> Result<()> {
        self.session_log.log("Game is starting");

        audio.load_track(cues::INTRO);
        audio.play_once();
        audio::wait_for_silence(&*audio);

        let Some(name) = console.prompt("Enter your agent's name:")? else {
            self.resolve(GameOutcome::Quit);
            return Ok(());
        };
        console.print(&format!("Welcome, Agent {name}!"), Style::Narration)?;
        console.print_blank()?;

        for line in narrative::briefing(&name) {
            console.print(&line, Style::Briefing)?;
        }
        console.print_blank()?;
        self.agent_name = Some(name);

        audio.load_track(cues::BACKGROUND);
        audio.play_looping();
        Ok(())
    }

    fn update_ingame<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        audio: &mut dyn AudioPlayer,
    ) -> Result<()> {
        let Some(input) = console.prompt(INGAME_PROMPT)? else {
            self.resolve(GameOutcome::Quit);
            return Ok(());
        };
        self.session_log.log(format!("Player input is {input}."));

        match Command::parse_ingame(&input) {
            Ok(Command::Quit) => {
                self.resolve(GameOutcome::Quit);
                Ok(())
            }
            Ok(Command::Arrest) => self.arrest_flow(console, audio),
            Ok(Command::Interact) => self.interact_flow(console),
            Ok(Command::Examine) => self.examine_flow(console),
            Ok(Command::Review) => self.review_flow(console),
            Ok(Command::Choose) => self.carriage_flow(console),
            Ok(Command::Start) => unreachable!("start is not an in-game command"),
            Err(err) => {
                console.print("Invalid choice of game option.", Style::Alert)?;
                Err(err.into())
            }
        }
    }

    // --- command flows: prompt/print glue over the interaction engine --------

    fn examine_flow<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.print("You decide to examine the crime scene.", Style::Narration)?;
        console.print_blank()?;

        let discovery = self.examine_scene();
        let text_style = if discovery.fresh {
            Style::Narration
        } else {
            Style::Warning
        };
        for line in &discovery.lines {
            console.print(line, text_style)?;
        }
        Ok(())
    }

    fn interact_flow<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.print("You decide to interact with the passengers.", Style::Narration)?;
        let Some(input) = console.prompt(
            "Choose 1 to speak to the people in the room, or 2 to speak to the people \
             outside:",
        )?
        else {
            self.resolve(GameOutcome::Quit);
            return Ok(());
        };
        let selector = parse_index(&input)?;

        let discovery = match self.interview_group(selector) {
            Ok(discovery) => discovery,
            Err(err) => {
                console.print("This is not an option for a character.", Style::Alert)?;
                return Err(err);
            }
        };

        let text_style = if discovery.fresh {
            Style::Narration
        } else {
            Style::Warning
        };
        for line in &discovery.lines {
            console.print(line, text_style)?;
        }
        Ok(())
    }

    fn review_flow<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        if self.clues().is_empty() {
            console.print("You have not found any clues yet.", Style::Warning)?;
        } else {
            for clue in self.clues() {
                console.print(clue, Style::Clue)?;
            }
        }
        Ok(())
    }

    fn carriage_flow<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.print("You decide to choose a carriage to investigate:", Style::Narration)?;
        for (i, carriage) in self.carriages.iter().enumerate() {
            console.print(&format!("{}. {}", i + 1, carriage.name), Style::Narration)?;
        }

        let Some(input) =
            console.prompt("Enter the number of the carriage you want to investigate:")?
        else {
            self.resolve(GameOutcome::Quit);
            return Ok(());
        };
        let index = parse_index(&input)?;

        let approach = match self.approach_carriage(index) {
            Ok(approach) => approach,
            Err(err) => {
                console.print("This carriage does not exist.", Style::Alert)?;
                return Err(err);
            }
        };

        match approach {
            Approach::AlreadyChecked { name } => {
                console.print(&format!("You have looked in {name} already."), Style::Warning)?;
            }
            Approach::Locked { lines, prompt } => {
                for line in &lines {
                    console.print(line, Style::Narration)?;
                }
                let Some(attempt) = console.prompt(prompt)? else {
                    self.resolve(GameOutcome::Quit);
                    return Ok(());
                };

                let gate = self.submit_passcode(index, &attempt)?;
                let text_style = if gate.newly_opened {
                    Style::Success
                } else {
                    Style::Alert
                };
                for line in &gate.lines {
                    console.print(line, text_style)?;
                }
            }
        }
        Ok(())
    }

    fn arrest_flow<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        audio: &mut dyn AudioPlayer,
    ) -> Result<()> {
        console.print(
            "You continue your investigation, determined to solve the mystery...",
            Style::Narration,
        )?;
        console.print("Choose a passenger you wish to arrest:", Style::Narration)?;
        console.print(
            "Remember: you can only arrest one passenger, so choose wisely!",
            Style::Success,
        )?;
        for (i, name) in self.arrest_roster().iter().enumerate() {
            console.print(&format!("{}. {}", i + 1, name), Style::Narration)?;
        }

        let Some(input) =
            console.prompt("Enter the number of the passenger you want to arrest:")?
        else {
            self.resolve(GameOutcome::Quit);
            return Ok(());
        };
        let index = parse_index(&input)?;

        let report = match self.attempt_arrest(index) {
            Ok(report) => report,
            Err(err) => {
                console.print("That is not one of the passengers.", Style::Alert)?;
                return Err(err);
            }
        };

        for line in &report.lines {
            console.print(line, Style::Narration)?;
        }

        // The win/lose cue plays out before the closing narration; these are
        // the only two points where the game waits on the audio collaborator.
        if report.guilty {
            audio.load_track(cues::TRUMPETS);
            audio.play_once();
            audio::wait_for_silence(&*audio);

            for line in narrative::WIN {
                console.print(line, Style::Success)?;
            }
            audio.load_track(cues::VICTORY);
            audio.play_once();
            audio::wait_for_silence(&*audio);
        } else {
            audio.load_track(cues::WOMP);
            audio.play_once();
            audio::wait_for_silence(&*audio);

            for line in narrative::LOSE {
                console.print(line, Style::Alert)?;
            }
            audio.load_track(cues::WRONG);
            audio.play_once();
            audio::wait_for_silence(&*audio);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use std::io::Cursor;

    fn console_over(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false)
    }

    #[test]
    fn pregame_accepts_only_quit_and_start() {
        assert!(matches!(Command::parse_pregame("q"), Ok(Command::Quit)));
        assert!(matches!(Command::parse_pregame("S"), Ok(Command::Start)));
        assert!(Command::parse_pregame("x").is_err());
        // In-game commands are not valid before the game starts
        assert!(Command::parse_pregame("a").is_err());
    }

    #[test]
    fn ingame_command_set() {
        for (token, expected) in [
            ("q", Command::Quit),
            ("a", Command::Arrest),
            ("i", Command::Interact),
            ("e", Command::Examine),
            ("r", Command::Review),
            ("c", Command::Choose),
        ] {
            assert_eq!(Command::parse_ingame(token).unwrap(), expected);
        }
        assert!(Command::parse_ingame("s").is_err());
        assert!(Command::parse_ingame("examine").is_err());
    }

    #[test]
    fn resolve_is_one_shot() {
        let mut game = Game::new(GameConfig::default());
        game.resolve(GameOutcome::Quit);
        game.resolve(GameOutcome::Solved);

        assert_eq!(game.outcome(), Some(GameOutcome::Quit));
    }

    #[test]
    fn bad_pregame_entry_is_logged_and_survived() {
        let mut game = Game::new(GameConfig::default());
        let mut console = console_over("banana\nq\n");
        let mut audio = SilentAudio;

        game.run(&mut console, &mut audio).unwrap();

        assert_eq!(game.outcome(), Some(GameOutcome::Quit));
        assert_eq!(game.error_log().entries().len(), 1);
        assert!(game
            .error_log()
            .messages()
            .next()
            .unwrap()
            .contains("banana"));
    }

    #[test]
    fn malformed_numeric_input_is_survived() {
        let mut game = Game::new(GameConfig::default());
        // start, name, interact with a non-numeric selector, then quit
        let mut console = console_over("s\nBond\ni\nfirst\nq\n");
        let mut audio = SilentAudio;

        game.run(&mut console, &mut audio).unwrap();

        assert_eq!(game.outcome(), Some(GameOutcome::Quit));
        assert!(game
            .error_log()
            .messages()
            .any(|m| m.contains("Unexpected error")));
    }

    #[test]
    fn eof_on_stdin_resolves_as_quit() {
        let mut game = Game::new(GameConfig::default());
        let mut console = console_over("");
        let mut audio = SilentAudio;

        game.run(&mut console, &mut audio).unwrap();

        assert_eq!(game.outcome(), Some(GameOutcome::Quit));
        assert!(game.stats().ended());
    }
}
