// Opponent profile generation
pub const DIFFICULTY_MIN: f64 = 0.25;
pub const DIFFICULTY_MAX: f64 = 0.75;
pub const RISK_MIN: f64 = 0.3;
pub const RISK_MAX: f64 = 0.85;
pub const PROFILE_DECIMALS: i32 = 3;

// Difficulty tier boundaries (upper bounds, exclusive)
pub const EASY_DIFFICULTY_BELOW: f64 = 0.45;
pub const MEDIUM_DIFFICULTY_BELOW: f64 = 0.65;

// Threat lookahead depth (player moves modelled)
pub const MOVES_TO_PREDICT: usize = 2;

pub const OPPONENT_CREATURES: [&str; 7] = [
    "goblin", "dark elf", "ogre", "witch", "hog", "spirit", "gremlin",
];

// Largest value a roll range may reach
pub const MAX_ROLL_VALUE: u32 = 1_000_000;

// Fallback attack handed out when a combatant runs out of items
pub const FALLBACK_ITEM_NAME: &str = "punch";
pub const FALLBACK_MAGNITUDE: (u32, u32) = (1, 2);
pub const FALLBACK_COOLDOWN: (u32, u32) = (1, 2);

// Player move input
pub const MOVE_PROMPT: &str = "Enter the item you wish to use: ";
pub const MOVE_RETRY_MESSAGE: &str = "Item not found! Try again...";
pub const NAME_MATCH_CUTOFF: f64 = 0.6;

// Simulation safety cap
pub const SIMULATION_MAX_TICKS: u64 = 10_000;
