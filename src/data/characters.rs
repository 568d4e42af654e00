//! Passengers aboard the train
//!
//! One character type with a role tag instead of a class hierarchy; the
//! shared fields (name, dialogue, one-shot interaction) live on the struct
//! and role-specific behavior dispatches over [`Role`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// What a character is to the investigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// The accused-in-waiting; their alibi is a clue
    Suspect { alibi: String },
    /// Saw something; their observation is a clue
    Witness { observation: String },
    /// A bystander with opinions
    Npc,
}

/// A passenger the player can question and, once, arrest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub dialogue: String,
    pub role: Role,
    /// One-shot: flips false→true on first interaction, never resets
    interacted: bool,
}

impl Character {
    pub fn suspect(name: &str, dialogue: &str, alibi: &str) -> Self {
        Self {
            name: name.to_string(),
            dialogue: dialogue.to_string(),
            role: Role::Suspect {
                alibi: alibi.to_string(),
            },
            interacted: false,
        }
    }

    pub fn witness(name: &str, dialogue: &str, observation: &str) -> Self {
        Self {
            name: name.to_string(),
            dialogue: dialogue.to_string(),
            role: Role::Witness {
                observation: observation.to_string(),
            },
            interacted: false,
        }
    }

    pub fn npc(name: &str, dialogue: &str) -> Self {
        Self {
            name: name.to_string(),
            dialogue: dialogue.to_string(),
            role: Role::Npc,
            interacted: false,
        }
    }

    /// Speak to the character. The full dialogue comes out exactly once;
    /// afterwards they are no longer interested.
    pub fn interact(&mut self) -> String {
        if !self.interacted {
            self.interacted = true;
            format!("{}: {}", self.name, self.dialogue)
        } else {
            format!("{} is no longer interested in talking.", self.name)
        }
    }

    pub fn has_interacted(&self) -> bool {
        self.interacted
    }

    /// Suspect's alibi, phrased as a clue
    pub fn alibi(&self) -> Option<String> {
        match &self.role {
            Role::Suspect { alibi } => Some(format!("{}'s alibi: {}", self.name, alibi)),
            _ => None,
        }
    }

    /// Witness's observation, phrased as a clue
    pub fn observation(&self) -> Option<String> {
        match &self.role {
            Role::Witness { observation } => {
                Some(format!("{}'s observation: {}", self.name, observation))
            }
            _ => None,
        }
    }

    /// Idle flavor line, dispatched over the role tag
    pub fn perform_action(&self) -> String {
        match self.role {
            Role::Suspect { .. } => format!(
                "{} nervously shifts his dark suit and avoids eye contact.",
                self.name
            ),
            Role::Witness { .. } => format!(
                "Witness {} speaks hurriedly and glances around anxiously.",
                self.name
            ),
            Role::Npc => format!("{} decides to hang around and see what will happen.", self.name),
        }
    }
}

// Identity is the name alone; two characters with the same name are the
// same passenger regardless of role or interaction state.
impl PartialEq for Character {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Character {}

impl PartialOrd for Character {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Character {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interact_is_one_shot() {
        let mut npc = Character::npc("Mr Germany", "Welcome to my carriage.");
        assert!(!npc.has_interacted());

        let first = npc.interact();
        assert!(first.contains("Welcome to my carriage."));
        assert!(npc.has_interacted());

        let second = npc.interact();
        assert_eq!(second, "Mr Germany is no longer interested in talking.");
        // Still interacted; the flag never resets
        assert!(npc.has_interacted());
    }

    #[test]
    fn equality_and_ordering_use_name_only() {
        let a = Character::suspect("Mr. Ireland", "...", "alibi");
        let b = Character::npc("Mr. Ireland", "different dialogue");
        let c = Character::npc("Ms. England", "");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < c);
    }

    #[test]
    fn role_payloads_phrase_clues() {
        let s = Character::suspect("Mr. Ireland", "d", "Confirmed by Mr Spain.");
        let w = Character::witness("Ms. England", "d", "Suspicious figure in dark clothing.");
        let n = Character::npc("Mr Spain", "d");

        assert_eq!(s.alibi().unwrap(), "Mr. Ireland's alibi: Confirmed by Mr Spain.");
        assert_eq!(
            w.observation().unwrap(),
            "Ms. England's observation: Suspicious figure in dark clothing."
        );
        assert!(n.alibi().is_none());
        assert!(n.observation().is_none());
    }
}
