//! The crime scene and the locked carriages

use serde::{Deserialize, Serialize};

/// Where the body was found. Clues accumulate here from every source:
/// the scene itself, interviews, and unlocked carriages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrimeScene {
    pub location: String,
    clues: Vec<String>,
    /// One-shot: the scene gives up its physical clues exactly once
    investigated: bool,
}

impl CrimeScene {
    pub fn new(location: &str) -> Self {
        Self {
            location: location.to_string(),
            clues: Vec::new(),
            investigated: false,
        }
    }

    /// Append a discovered clue. Clues are never removed or reordered.
    pub fn add_clue(&mut self, clue: impl Into<String>) {
        self.clues.push(clue.into());
    }

    /// The ordered clue record
    pub fn review_clues(&self) -> &[String] {
        &self.clues
    }

    pub fn investigated(&self) -> bool {
        self.investigated
    }

    pub fn mark_investigated(&mut self) {
        self.investigated = true;
    }
}

/// A locked carriage gated by a passcode, hiding one reward clue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Carriage {
    pub name: String,
    passcode: String,
    pub reward_clue: String,
    /// One-shot: set on first successful unlock, never reset
    checked: bool,
}

impl Carriage {
    pub fn new(name: &str, passcode: &str, reward_clue: &str) -> Self {
        Self {
            name: name.to_string(),
            passcode: passcode.to_string(),
            reward_clue: reward_clue.to_string(),
            checked: false,
        }
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Try a passcode. Case-insensitive. Returns whether the door opened;
    /// a wrong attempt leaves the carriage untouched.
    pub fn try_unlock(&mut self, attempt: &str) -> bool {
        if attempt.trim().eq_ignore_ascii_case(&self.passcode) {
            self.checked = true;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clues_are_ordered_and_append_only() {
        let mut scene = CrimeScene::new("First carriage");
        scene.add_clue("first");
        scene.add_clue("second");
        assert_eq!(scene.review_clues(), ["first", "second"]);
    }

    #[test]
    fn unlock_is_case_insensitive_and_one_shot() {
        let mut carriage = Carriage::new("Carriage 3", "oscail an doras", "knife");
        assert!(!carriage.try_unlock("open sesame"));
        assert!(!carriage.checked());

        assert!(carriage.try_unlock("OSCAIL AN DORAS"));
        assert!(carriage.checked());

        // Further attempts cannot un-check the carriage
        assert!(!carriage.try_unlock("wrong"));
        assert!(carriage.checked());
    }
}
