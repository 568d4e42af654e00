//! The interaction engine
//!
//! One operation per player command. Each validates its input, mutates the
//! world, and reports narration lines for the console layer to print; the
//! prompting itself stays out of here so a whole investigation can be
//! driven directly from tests.

use super::{narrative, Game, GameOutcome};
use crate::{GameError, Result};

const CLUE_CARRIAGE1_PASSCODE: &str = "Carriage 1 passcode: 6969";
const CLUE_TIE_PIN: &str = "Spanish flag tie pin";
const CLUE_BYSTANDERS: &str =
    "Three people are hanging around the scene who have nothing to do with the crime.";
const CLUE_CARRIAGE2_PASSCODE: &str = "Carriage 2 passcode: 4545";

/// Outcome of a one-shot investigative action
#[derive(Debug, Clone)]
pub struct Discovery {
    /// False when the action had already been spent
    pub fresh: bool,
    pub lines: Vec<String>,
}

/// What the player finds at a carriage door
#[derive(Debug, Clone)]
pub enum Approach {
    /// The door was opened on an earlier visit
    AlreadyChecked { name: String },
    /// Locked; the caller should collect a passcode attempt
    Locked {
        lines: Vec<String>,
        prompt: &'static str,
    },
}

/// Result of a passcode attempt
#[derive(Debug, Clone)]
pub struct GateResult {
    /// True only on the attempt that actually opened the door
    pub newly_opened: bool,
    pub lines: Vec<String>,
}

/// Result of an arrest. The game is resolved by the time this is returned.
#[derive(Debug, Clone)]
pub struct ArrestReport {
    pub arrested: String,
    pub guilty: bool,
    pub lines: Vec<String>,
}

impl Game {
    /// Examine the crime scene. The scene's two physical clues come out on
    /// the first visit only.
    pub fn examine_scene(&mut self) -> Discovery {
        // The counter tracks investigative attempts, not discoveries.
        self.stats.add_clue_found();
        self.session_log.log("Examination happening");
        tracing::debug!(investigated = self.scene.investigated(), "examine scene");

        if !self.scene.investigated() {
            self.scene.add_clue(CLUE_CARRIAGE1_PASSCODE);
            self.scene.add_clue(CLUE_TIE_PIN);
            self.scene.mark_investigated();
            Discovery {
                fresh: true,
                lines: narrative::SCENE_DISCOVERY
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            }
        } else {
            Discovery {
                fresh: false,
                lines: vec![narrative::SCENE_ALREADY_EXAMINED.to_string()],
            }
        }
    }

    /// Question one of the two interview groups: 1 = the suspect and the
    /// witness in the room, 2 = the three bystanders outside. Each group
    /// talks exactly once.
    pub fn interview_group(&mut self, selector: usize) -> Result<Discovery> {
        // Counts the attempt before the selector is validated.
        self.stats.add_clue_found();
        self.session_log.log("Interactions happening");

        match selector {
            1 => {
                if self.room_questioned {
                    return Ok(Discovery {
                        fresh: false,
                        lines: vec![narrative::ROOM_EXHAUSTED.to_string()],
                    });
                }
                self.session_log.log("Interviewing the suspect and the witness.");

                let mut lines =
                    vec!["You decide to interact with the passengers in the room:".to_string()];

                let spoken = self.suspect.interact();
                self.scene.add_clue(spoken.clone());
                lines.push(spoken);
                if let Some(alibi) = self.suspect.alibi() {
                    self.scene.add_clue(alibi.clone());
                    lines.push(alibi);
                }
                lines.push(self.suspect.perform_action());

                let spoken = self.witness.interact();
                self.scene.add_clue(spoken.clone());
                lines.push(spoken);
                if let Some(observation) = self.witness.observation() {
                    self.scene.add_clue(observation.clone());
                    lines.push(observation);
                }
                lines.push(self.witness.perform_action());

                self.room_questioned = true;
                Ok(Discovery { fresh: true, lines })
            }
            2 => {
                if self.platform_questioned {
                    return Ok(Discovery {
                        fresh: false,
                        lines: vec![narrative::PLATFORM_EXHAUSTED.to_string()],
                    });
                }
                self.session_log.log("Interviewing the bystanders outside.");

                let mut lines =
                    vec!["You decide to speak to the people outside and ask them for clues:"
                        .to_string()];
                for bystander in &mut self.bystanders {
                    lines.push(bystander.interact());
                    lines.push(bystander.perform_action());
                }

                self.scene.add_clue(CLUE_BYSTANDERS);
                self.scene.add_clue(CLUE_CARRIAGE2_PASSCODE);
                self.platform_questioned = true;
                Ok(Discovery { fresh: true, lines })
            }
            other => {
                Err(GameError::InvalidSelection(format!("character group {other}")).into())
            }
        }
    }

    /// Walk up to a carriage door. Fails on an index outside 1..=3; a door
    /// opened earlier reports as such instead of re-prompting.
    pub fn approach_carriage(&mut self, index: usize) -> Result<Approach> {
        self.session_log
            .log(format!("Player chooses to investigate carriage {index}."));

        let carriage = self
            .carriages
            .get(index.wrapping_sub(1))
            .ok_or_else(|| GameError::InvalidSelection(format!("carriage {index}")))?;

        if carriage.checked() {
            self.session_log
                .log(format!("{} had been chosen before. No access.", carriage.name));
            Ok(Approach::AlreadyChecked {
                name: carriage.name.clone(),
            })
        } else {
            self.session_log
                .log(format!("{} is being investigated.", carriage.name));
            Ok(Approach::Locked {
                lines: narrative::approach_lines(index)
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                prompt: narrative::passcode_prompt(index),
            })
        }
    }

    /// Try a passcode against a carriage door. A mismatch is a normal
    /// game-flow branch, not an error; the door and clue list are untouched.
    /// The reward clue is granted at most once per carriage.
    pub fn submit_passcode(&mut self, index: usize, attempt: &str) -> Result<GateResult> {
        let carriage = self
            .carriages
            .get_mut(index.wrapping_sub(1))
            .ok_or_else(|| GameError::InvalidSelection(format!("carriage {index}")))?;

        if carriage.checked() {
            return Ok(GateResult {
                newly_opened: false,
                lines: vec![format!("You have looked in {} already.", carriage.name)],
            });
        }

        if carriage.try_unlock(attempt) {
            let reward = carriage.reward_clue.clone();
            let name = carriage.name.clone();
            self.scene.add_clue(reward);
            self.session_log.log(format!("{name} unlocked."));
            tracing::info!(carriage = %name, "door opened");
            Ok(GateResult {
                newly_opened: true,
                lines: narrative::unlock_lines(index)
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            })
        } else {
            self.session_log.log(format!(
                "Wrong passcode for {}.",
                self.carriages[index - 1].name
            ));
            Ok(GateResult {
                newly_opened: false,
                lines: vec![narrative::WRONG_PASSCODE.to_string()],
            })
        }
    }

    /// The fixed accusation roster, in presentation order
    pub fn arrest_roster(&self) -> Vec<&str> {
        let mut roster = vec![self.suspect.name.as_str(), self.witness.name.as_str()];
        roster.extend(self.bystanders.iter().map(|b| b.name.as_str()));
        roster
    }

    /// Arrest a passenger by roster index (1-based). A valid index resolves
    /// the game either way; there is no second arrest.
    pub fn attempt_arrest(&mut self, index: usize) -> Result<ArrestReport> {
        let roster = self.arrest_roster();
        let arrested = roster
            .get(index.wrapping_sub(1))
            .map(|name| name.to_string())
            .ok_or_else(|| GameError::InvalidSelection(format!("passenger {index}")))?;

        self.stats.add_decision(format!("Arrested {arrested}"));
        self.session_log.log(format!("Arrest made: {arrested}."));

        let guilty = arrested == self.suspect.name;
        let lines = vec![if guilty {
            narrative::confession(&arrested)
        } else {
            narrative::protest(&arrested)
        }];

        self.resolve(if guilty {
            GameOutcome::Solved
        } else {
            GameOutcome::WrongArrest
        });

        Ok(ArrestReport {
            arrested,
            guilty,
            lines,
        })
    }
}
