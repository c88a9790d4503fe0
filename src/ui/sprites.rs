//! ASCII art for the stage.

pub const KOSH_IDLE: [&str; 2] = ["/\\_/\\", "( o.o )"];
pub const KOSH_MEOW: [&str; 2] = ["/\\_/\\", "( O o O )"];
pub const KOSH_PAW: [&str; 2] = ["/\\_/\\", "( -.- )ノ"];
pub const KOSH_ZOOM: [&str; 2] = ["/\\_/\\ ≈", "( >.< )≈"];

pub const DAD_ASLEEP: [&str; 2] = ["(-_-)", "[=====]"];
pub const DAD_AWAKE: [&str; 2] = ["(O_o)", "[=====]"];

pub const WINDOW_CLOSED: [&str; 3] = ["+--+--+", "|  |  |", "+--+--+"];
pub const WINDOW_OPEN: [&str; 3] = ["+     +", "| ~v~ |", "+     +"];

pub const EGG: [&str; 2] = [" _ ", "(@)"];

pub const STRING_TOY: char = '@';

pub const BOWL_EMPTY: [&str; 1] = ["\\___/"];
pub const BOWL_FULL: [&str; 2] = [" ooo ", "\\___/"];

pub const WARDROBE: [&str; 5] = [
    "+-------+",
    "|   |   |",
    "|  o|o  |",
    "|   |   |",
    "+-------+",
];

pub const RACCOON: [&str; 2] = ["!", "(•ᴥ•)"];
