//! Star type codes and their fixed color pairs.
//!
//! Every type code maps to a (primary, secondary) pair. The secondary color
//! is only drawn for binary systems; single classes carry white. Codes
//! outside the table fall back to white/white instead of failing.

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    pub fn to_array(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}

/// Primary and secondary color of a star system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub primary: Rgb,
    pub secondary: Rgb,
}

impl ColorPair {
    pub const fn new(primary: Rgb, secondary: Rgb) -> Self {
        Self { primary, secondary }
    }

    pub const fn single(primary: Rgb) -> Self {
        Self::new(primary, Rgb::WHITE)
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        Self::new(Rgb::WHITE, Rgb::WHITE)
    }
}

const RED: Rgb = Rgb(211, 105, 86);
const BLUE: Rgb = Rgb(100, 179, 252);
const YELLOW: Rgb = Rgb(229, 189, 114);

// Binary components use their own, more saturated shades.
const BINARY_RED: Rgb = Rgb(242, 80, 48);
const BINARY_BLUE: Rgb = Rgb(143, 255, 255);
const BINARY_YELLOW: Rgb = Rgb(215, 178, 56);

/// The twelve known star classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarClass {
    GalacticCore,
    BlackHole,
    ProtoplanetaryDisk,
    Yellow,
    Blue,
    Red,
    BlueBlue,
    BlueRed,
    BlueYellow,
    YellowYellow,
    YellowRed,
    RedRed,
}

impl StarClass {
    pub const ALL: [StarClass; 12] = [
        StarClass::GalacticCore,
        StarClass::BlackHole,
        StarClass::ProtoplanetaryDisk,
        StarClass::Yellow,
        StarClass::Blue,
        StarClass::Red,
        StarClass::BlueBlue,
        StarClass::BlueRed,
        StarClass::BlueYellow,
        StarClass::YellowYellow,
        StarClass::YellowRed,
        StarClass::RedRed,
    ];

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1..=12 => Some(Self::ALL[code as usize - 1]),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        self as u32 + 1
    }

    /// Binary-pair classes draw a second, offset circle.
    pub fn is_binary(self) -> bool {
        self.code() >= 7
    }

    pub fn colors(self) -> ColorPair {
        match self {
            StarClass::GalacticCore => ColorPair::single(Rgb::WHITE),
            StarClass::BlackHole => ColorPair::new(Rgb(0, 0, 255), Rgb(0, 0, 255)),
            StarClass::ProtoplanetaryDisk => ColorPair::single(Rgb(143, 143, 255)),
            StarClass::Yellow => ColorPair::single(YELLOW),
            StarClass::Blue => ColorPair::single(BLUE),
            StarClass::Red => ColorPair::single(RED),
            StarClass::BlueBlue => ColorPair::new(BINARY_BLUE, BINARY_BLUE),
            StarClass::BlueRed => ColorPair::new(BINARY_BLUE, BINARY_RED),
            StarClass::BlueYellow => ColorPair::new(BINARY_BLUE, BINARY_YELLOW),
            StarClass::YellowYellow => ColorPair::new(BINARY_YELLOW, BINARY_YELLOW),
            StarClass::YellowRed => ColorPair::new(BINARY_YELLOW, BINARY_RED),
            StarClass::RedRed => ColorPair::new(BINARY_RED, BINARY_RED),
        }
    }
}

/// Color pair for a raw type code; unknown codes are white/white.
pub fn colors_for(code: u32) -> ColorPair {
    StarClass::from_code(code)
        .map(StarClass::colors)
        .unwrap_or_default()
}
