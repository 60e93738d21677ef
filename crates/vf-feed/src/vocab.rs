//! Fixed vocabularies for the activity feed

use serde::{Deserialize, Serialize};

/// Username prefixes
pub const NAME_PREFIXES: [&str; 21] = [
    "Dragon", "Lucky", "Fire", "Super", "Mega", "Gold", "Fish", "King", "Master", "Slot", "Vegas",
    "Royal", "Star", "Moon", "Sun", "Cyber", "Neon", "Rich", "Big", "Wild", "Hot",
];

/// Username suffixes
pub const NAME_SUFFIXES: [&str; 16] = [
    "Slayer", "Winner", "777", "88", "99", "King", "Boy", "Girl", "Pro", "X", "Hunter", "Master",
    "Boss", "Gamer", "Whale", "Pot",
];

/// Action verbs
pub const ACTIONS: [&str; 6] = ["Claimed", "Just Won", "Hit", "Withdrew", "Verified", "Unlocked"];

/// Display color class for a prize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTag {
    Gold,
    Pink,
    Green,
    Purple,
    Orange,
}

/// Prize captions with their color tags, equally weighted
pub const PRIZES: [(&str, ColorTag); 9] = [
    ("5,000 COINS", ColorTag::Gold),
    ("MINI JACKPOT", ColorTag::Pink),
    ("INSTANT ACCESS", ColorTag::Green),
    ("$450.00 CASH", ColorTag::Green),
    ("WELCOME BONUS", ColorTag::Gold),
    ("x500 MULTIPLIER", ColorTag::Purple),
    ("12,500 COINS", ColorTag::Gold),
    ("HUGE WIN", ColorTag::Orange),
    ("VIP STATUS", ColorTag::Purple),
];
