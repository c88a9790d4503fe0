// Logical screen space (y grows downward)
pub const SCREEN_WIDTH: f64 = 800.0;
pub const SCREEN_HEIGHT: f64 = 600.0;

// Player energy
pub const STARTING_ENERGY: u32 = 100;
pub const MAX_ENERGY: u32 = 100;

// Kosh's idle spot in the quest scenes
pub const KOSH_POS: (f64, f64) = (380.0, 340.0);

// Window Witch
pub const WINDOW_CONVINCE_RATE: f64 = 0.9;
pub const DAD_ONE_HEAD: (f64, f64) = (145.0, 190.0);
pub const DAD_TWO_HEAD: (f64, f64) = (595.0, 190.0);
pub const WINDOW_POS: (f64, f64) = (400.0, 300.0);
pub const ZZZ_CHANCE: f64 = 0.05;

// Easter egg (Window Witch side quest)
pub const EGG_SPAWN_CHANCE: f64 = 0.75;
pub const EGG_ANCHOR: (f64, f64) = (600.0, 150.0);
pub const EGG_JITTER_X: f64 = 30.0;
pub const EGG_JITTER_Y: f64 = 20.0;
pub const EGG_BOB_SPEED: f64 = 2.0;
pub const EGG_BOB_AMPLITUDE: f64 = 8.0;
pub const EGG_CLICK_RADIUS: f64 = 50.0;

// Da Wire
pub const DA_WIRE_ROUNDS: u32 = 5;
pub const DA_WIRE_WINS_NEEDED: u32 = 2;
pub const WIRE_BASE_SPEED: f64 = 1.3;
pub const WIRE_DIFFICULTY_STEP: f64 = 0.08;
pub const WIRE_WATCH_SECONDS: f64 = 2.0;
pub const WIRE_LICK_THRESHOLD: f64 = 0.35;
pub const WIRE_GRIP_TARGET_SECONDS: f64 = 0.4;

// In and Out
pub const IN_AND_OUT_MAX_TRIPS: u32 = 10;
pub const ENERGY_PER_TRIP: u32 = 10;
pub const TRAVEL_SECONDS: f64 = 1.0;
pub const MIN_TRIPS_FOR_FOOD: u32 = 3;
pub const FOOD_CHANCE: f64 = 0.20;
pub const FALSE_ALARM_CHANCE: f64 = 0.15;
pub const KITCHEN_INSIDE_X: f64 = 200.0;
pub const KITCHEN_OUTSIDE_X: f64 = 600.0;
pub const FOOD_BOWL_POS: (f64, f64) = (600.0, 300.0);

// Witch in the Wardrobe
pub const WARDROBE_ROUNDS: u32 = 10;
pub const WARDROBE_CATCHES_NEEDED: u32 = 7;
pub const WARDROBE_X: f64 = 450.0;
pub const APPROACH_SECONDS: f64 = 1.5;
pub const DOOR_OPEN_SECONDS: f64 = 0.8;
pub const JUMP_SECONDS: f64 = 0.6;
pub const JUMP_ARC_HEIGHT: f64 = 80.0;
pub const KOSH_FLOOR_Y: f64 = 400.0;
pub const KOSH_START_X: f64 = 100.0;
pub const KOSH_INSIDE: (f64, f64) = (510.0, 320.0);
pub const WAIT_SECONDS_RANGE: (f64, f64) = (0.8, 1.5);
pub const PEEK_SECONDS_RANGE: (f64, f64) = (0.6, 1.2);
pub const PEEK_POSITIONS: [(f64, f64); 5] = [
    (500.0, 220.0),
    (560.0, 220.0),
    (620.0, 220.0),
    (500.0, 300.0),
    (620.0, 300.0),
];
pub const CATCH_RADIUS: f64 = 40.0;
pub const ROUND_RESULT_SECONDS: f64 = 0.8;

// Particles
pub const SPARKLE_JITTER: f64 = 10.0;
pub const SPARKLE_LIFE_RANGE: (f64, f64) = (0.5, 1.0);
pub const ZZZ_LIFE_SECONDS: f64 = 2.0;
pub const ZZZ_RISE_SPEED: f64 = 30.0;
