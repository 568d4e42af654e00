//! End-to-end tests for the investigation flow
//!
//! These drive the interaction engine directly (no terminal) and, for the
//! full-session cases, run the real loop over scripted input:
//! - crime scene examination is one-shot
//! - passcode gates reward each carriage at most once
//! - invalid selections fail without touching the world
//! - arrests resolve the game, win or lose
//! - the countdown ends a session that outlasts it

use std::collections::VecDeque;
use std::io::{self, BufRead, Cursor, Read};
use std::time::Duration;
use vienna_express::audio::{AudioPlayer, SilentAudio};
use vienna_express::console::Console;
use vienna_express::game::{Approach, GameConfig, GameOutcome};
use vienna_express::{Game, GameError};

fn new_game() -> Game {
    Game::new(GameConfig::default())
}

fn console_over(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
    Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false)
}

// ============================================================================
// Interaction engine
// ============================================================================

#[test]
fn examining_the_scene_is_one_shot() {
    let mut game = new_game();

    let first = game.examine_scene();
    assert!(first.fresh);
    assert_eq!(game.clues().len(), 2, "first examination yields two clues");
    assert!(game.clues()[0].contains("6969"));

    // Repeat visits narrate but never add clues
    for _ in 0..3 {
        let repeat = game.examine_scene();
        assert!(!repeat.fresh);
    }
    assert_eq!(game.clues().len(), 2);
}

#[test]
fn room_interviews_are_one_shot() {
    let mut game = new_game();

    let first = game.interview_group(1).unwrap();
    assert!(first.fresh);
    assert_eq!(
        game.clues().len(),
        4,
        "dialogue, alibi, dialogue, observation"
    );

    let repeat = game.interview_group(1).unwrap();
    assert!(!repeat.fresh);
    assert!(repeat.lines[0].contains("no longer wish to speak"));
    assert_eq!(game.clues().len(), 4, "no clues on the repeat visit");
}

#[test]
fn platform_interviews_reveal_the_carriage_two_passcode() {
    let mut game = new_game();

    let first = game.interview_group(2).unwrap();
    assert!(first.fresh);
    assert_eq!(game.clues().len(), 2);
    assert!(game.clues().iter().any(|c| c.contains("4545")));

    let repeat = game.interview_group(2).unwrap();
    assert!(!repeat.fresh);
    assert_eq!(game.clues().len(), 2);
}

#[test]
fn invalid_selections_leave_the_world_untouched() {
    let mut game = new_game();
    game.examine_scene();

    let clues_before = game.clues().to_vec();

    for selector in [0, 3, 99] {
        let err = game.interview_group(selector).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GameError>(),
            Some(GameError::InvalidSelection(_))
        ));
    }
    for index in [0, 4, 17] {
        let err = game.approach_carriage(index).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GameError>(),
            Some(GameError::InvalidSelection(_))
        ));
        let err = game.submit_passcode(index, "6969").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GameError>(),
            Some(GameError::InvalidSelection(_))
        ));
    }
    for index in [0, 6] {
        let err = game.attempt_arrest(index).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GameError>(),
            Some(GameError::InvalidSelection(_))
        ));
    }

    assert_eq!(game.clues(), clues_before.as_slice());
    assert!(game.carriages().iter().all(|c| !c.checked()));
    assert!(game.stats().decisions_made.is_empty());
    assert!(game.is_running(), "failed selections never end the game");
}

#[test]
fn clue_counter_counts_attempts_not_discoveries() {
    let mut game = new_game();

    game.examine_scene();
    game.examine_scene();
    // Even an invalid selector bumps the counter before validation
    let _ = game.interview_group(42);

    assert_eq!(game.stats().clues_found, 3);
    assert_eq!(game.clues().len(), 2, "only the first examination found anything");
}

// ============================================================================
// Passcode gates
// ============================================================================

#[test]
fn wrong_then_right_passcode_for_carriage_one() {
    let mut game = new_game();
    game.examine_scene();
    let clues_after_examine = game.clues().len();

    assert!(matches!(
        game.approach_carriage(1).unwrap(),
        Approach::Locked { .. }
    ));

    let miss = game.submit_passcode(1, "1234").unwrap();
    assert!(!miss.newly_opened);
    assert!(miss.lines[0].contains("Incorrect"));
    assert!(!game.carriages()[0].checked());
    assert_eq!(game.clues().len(), clues_after_examine);

    let hit = game.submit_passcode(1, "6969").unwrap();
    assert!(hit.newly_opened);
    assert!(game.carriages()[0].checked());
    assert_eq!(game.clues().len(), clues_after_examine + 1);
    assert!(game.clues().last().unwrap().contains("Oscail"));
}

#[test]
fn opened_carriage_never_rewards_twice() {
    let mut game = new_game();

    assert!(game.submit_passcode(3, "OSCAIL AN DORAS").unwrap().newly_opened);
    let clues_after_open = game.clues().len();

    // Right or wrong, attempts against an opened door add nothing
    assert!(!game.submit_passcode(3, "oscail an doras").unwrap().newly_opened);
    assert!(!game.submit_passcode(3, "nonsense").unwrap().newly_opened);
    assert_eq!(game.clues().len(), clues_after_open);

    match game.approach_carriage(3).unwrap() {
        Approach::AlreadyChecked { name } => assert_eq!(name, "Carriage 3"),
        other => panic!("expected AlreadyChecked, got {other:?}"),
    }
}

// ============================================================================
// Arrest resolution
// ============================================================================

#[test]
fn arresting_the_suspect_wins() {
    let mut game = new_game();

    let report = game.attempt_arrest(1).unwrap();
    assert!(report.guilty);
    assert_eq!(report.arrested, "Mr. Ireland");

    assert_eq!(game.outcome(), Some(GameOutcome::Solved));
    assert!(!game.is_running());
    assert_eq!(game.stats().decisions_made, ["Arrested Mr. Ireland"]);
}

#[test]
fn arresting_anyone_else_loses() {
    for innocent in 2..=5 {
        let mut game = new_game();
        let report = game.attempt_arrest(innocent).unwrap();

        assert!(!report.guilty);
        assert_eq!(game.outcome(), Some(GameOutcome::WrongArrest));
        assert!(!game.is_running());
        assert_eq!(game.stats().decisions_made.len(), 1);
    }
}

// ============================================================================
// Full sessions over scripted input
// ============================================================================

/// An audio backend that records the cue sequence it was asked to play
#[derive(Default)]
struct RecordingAudio {
    calls: Vec<String>,
}

impl AudioPlayer for RecordingAudio {
    fn load_track(&mut self, name: &str) {
        self.calls.push(format!("load:{name}"));
    }
    fn play_looping(&mut self) {
        self.calls.push("loop".to_string());
    }
    fn play_once(&mut self) {
        self.calls.push("once".to_string());
    }
    fn stop(&mut self) {
        self.calls.push("stop".to_string());
    }
    fn is_playing(&self) -> bool {
        false
    }
}

#[test]
fn scripted_session_solves_the_case() {
    // start, agent name, examine, review, carriage 1 + passcode,
    // room interviews, arrest the suspect
    let script = "s\nBond\ne\nr\nc\n1\n6969\ni\n1\na\n1\n";
    let mut console = console_over(script);
    let mut audio = RecordingAudio::default();

    let mut game = new_game();
    game.run(&mut console, &mut audio).unwrap();

    assert_eq!(game.outcome(), Some(GameOutcome::Solved));
    assert_eq!(game.agent_name(), Some("Bond"));
    assert_eq!(game.clues().len(), 7, "2 scene + 1 carriage + 4 interviews");
    assert_eq!(game.stats().decisions_made, ["Arrested Mr. Ireland"]);
    assert!(game.stats().ended());

    // The victory cue sequence ran in order
    let trumpets = audio
        .calls
        .iter()
        .position(|c| c == "load:trumpets")
        .expect("trumpets cue");
    let victory = audio
        .calls
        .iter()
        .position(|c| c == "load:victory")
        .expect("victory cue");
    assert!(trumpets < victory);
    assert_eq!(audio.calls.last().map(String::as_str), Some("stop"));

    let transcript = String::from_utf8(console.into_writer()).unwrap();
    assert!(transcript.contains("Time remaining:"));
    assert!(transcript.contains("Welcome, Agent Bond!"));
    assert!(transcript.contains("prevented an international crisis"));

    // The session log is ordered and bracketed by lifecycle entries
    let messages: Vec<_> = game.session_log().messages().collect();
    assert_eq!(messages.first(), Some(&"Game started"));
    assert_eq!(messages.last(), Some(&"Game over"));
}

#[test]
fn bad_commands_never_abort_a_session() {
    // Invalid top-level command, invalid group, invalid carriage, then quit
    let script = "s\nBond\nx\ni\n9\nc\n8\nq\n";
    let mut console = console_over(script);
    let mut audio = SilentAudio;

    let mut game = new_game();
    game.run(&mut console, &mut audio).unwrap();

    assert_eq!(game.outcome(), Some(GameOutcome::Quit));
    assert_eq!(game.error_log().entries().len(), 3);
    assert!(game
        .error_log()
        .messages()
        .all(|m| m.starts_with("Error found:")));
}

// ============================================================================
// Countdown expiry
// ============================================================================

/// A reader that waits before producing each line, like a player thinking
struct SlowLines {
    lines: VecDeque<Vec<u8>>,
    delay: Duration,
    buf: Vec<u8>,
    pos: usize,
}

impl SlowLines {
    fn new(lines: &[&str], delay: Duration) -> Self {
        Self {
            lines: lines
                .iter()
                .map(|l| format!("{l}\n").into_bytes())
                .collect(),
            delay,
            buf: Vec::new(),
            pos: 0,
        }
    }
}

impl Read for SlowLines {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(out.len());
        out[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for SlowLines {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos >= self.buf.len() {
            match self.lines.pop_front() {
                Some(line) => {
                    std::thread::sleep(self.delay);
                    self.buf = line;
                    self.pos = 0;
                }
                None => return Ok(&[]),
            }
        }
        Ok(&self.buf[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.buf.len());
    }
}

#[test]
fn expiry_during_blocked_input_times_the_game_out() {
    // The countdown is far shorter than the player's thinking time, so it
    // expires while the loop is blocked reading; the loop only sees the
    // flag after the read returns, and real elapsed time exceeds the
    // configured duration.
    let duration = Duration::from_millis(100);
    let lines = ["s", "Bond", "r", "r", "r", "r", "r", "r", "r", "r"];
    let input = SlowLines::new(&lines, Duration::from_millis(150));

    let mut console = Console::new(input, Vec::new(), false);
    let mut audio = SilentAudio;
    let mut game = Game::new(GameConfig { duration });

    game.run(&mut console, &mut audio).unwrap();

    assert_eq!(game.outcome(), Some(GameOutcome::TimeExpired));
    assert!(!game.is_running());
    assert!(game.stats().ended());
    assert!(
        game.stats().elapsed() > duration,
        "the deadline is only observed once input unblocks"
    );
    assert!(
        game.stats().decisions_made.is_empty(),
        "no arrest was recorded"
    );

    let transcript = String::from_utf8(console.into_writer()).unwrap();
    assert!(transcript.contains("No time remaining"));
}
