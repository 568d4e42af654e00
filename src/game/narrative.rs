//! Narrative text for the mystery
//!
//! All the words the player reads, kept together so the engine code stays
//! about state and the story can be re-written without touching it.

/// Title banner shown before the loop starts
pub const TITLE_BANNER: &str = r#"
╔══════════════════════════════════════════════════════════╗
║              THE VIENNA EXPRESS                          ║
║              A  Murder  Mystery                          ║
║                                                          ║
║   Your expertise is needed to solve a complex case       ║
║   and unveil the truth.                                  ║
╚══════════════════════════════════════════════════════════╝
"#;

/// Opening lines when the game loop begins
pub const WELCOME: [&str; 2] = [
    "Welcome to 'The Vienna Express Murder Mystery'.",
    "You are about to embark on a thrilling adventure as an agent of Interpol.",
];

/// Mission briefing shown once the player starts
pub fn briefing(agent_name: &str) -> Vec<String> {
    vec![
        "You find yourself on a luxurious train, en route to a UN summit in Vienna."
            .to_string(),
        format!(
            "As the famed Interpol agent {agent_name}, you are here to solve the \
             mysterious murder of the President of France."
        ),
        "The train is filled with world leaders, each with their own motives and secrets."
            .to_string(),
        "You have only five minutes to make an arrest before the train reaches Vienna."
            .to_string(),
        "If the train arrives before an arrest is made, the murderer will go free, \
         sparking tensions between nations."
            .to_string(),
        "Your mission is to uncover the truth and prevent an international crisis."
            .to_string(),
    ]
}

/// Loop-exit narration when the countdown runs out
pub const TIMEOUT: &str = "No time remaining. You failed to make an arrest before the \
                           train reached its destination, and the culprit has gone free.";

/// First examination of the crime scene
pub const SCENE_DISCOVERY: [&str; 2] = [
    "You enter the room and find a nervous-looking waiter. He tells you to check out \
     Carriage 1, gives you its passcode, and hurries away.",
    "On your way out you spot a tie pin with the Spanish flag embedded on it, lying \
     near the window.",
];

pub const SCENE_ALREADY_EXAMINED: &str = "You've already examined the crime scene clues.";

/// Exhausted one-shot interview groups
pub const ROOM_EXHAUSTED: &str =
    "You have already interacted with the passengers here. They no longer wish to speak to you.";
pub const PLATFORM_EXHAUSTED: &str =
    "The people outside are tired of you. They no longer want to speak to you.";

/// Flavor shown when approaching each carriage door
pub fn approach_lines(carriage: usize) -> Vec<&'static str> {
    match carriage {
        1 => vec!["You approach the door to Carriage 1."],
        2 => vec![
            "You approach the door to Carriage 2.",
            "The door is locked and requires a passcode.",
        ],
        3 => vec![
            "You open the door to Carriage 3.",
            "A strange man bars the way, asking for a password. He sounds as though he \
             may be Irish, but hides his accent well.",
        ],
        _ => vec![],
    }
}

/// The passcode prompt for each carriage door
pub fn passcode_prompt(carriage: usize) -> &'static str {
    match carriage {
        3 => "Enter the password:",
        _ => "Enter the 4-digit passcode:",
    }
}

/// What the player finds behind each opened door
pub fn unlock_lines(carriage: usize) -> Vec<&'static str> {
    match carriage {
        1 => vec![
            "Correct passcode. The door is open.",
            "You walk into the carriage and find a torn letter containing a single word.",
        ],
        2 => vec![
            "Correct passcode. The door is open.",
            "You find an old man who quietly whispers the phrase 'an doras'.",
        ],
        3 => vec![
            "Congratulations! The door opens.",
            "You find a blood-soaked knife with a harp emblem on it.",
        ],
        _ => vec![],
    }
}

pub const WRONG_PASSCODE: &str = "Incorrect passcode. You return to the main menu.";

/// The guilty party's confession on arrest
pub fn confession(name: &str) -> String {
    format!(
        "{name}: I'm not the only one who wanted him eliminated! France has been trying \
         to provoke a war and disband the UN for years. I was merely the only one of us \
         five nations willing to do what must be done."
    )
}

/// An innocent passenger's protest on arrest
pub fn protest(name: &str) -> String {
    format!("{name}: You've got the wrong person! I had nothing to do with it.")
}

pub const WIN: [&str; 2] = [
    "Congratulations! You have made the correct arrest just as the train reaches its \
     destination, and prevented an international crisis.",
    "The UN and the world thank you!",
];

pub const LOSE: [&str; 2] = [
    "You have failed to make the correct arrest, and the real culprit has just \
     disembarked the train.",
    "This will lead to an international crisis.",
];
