//! Platform codes and their classification into hardware manufacturers.
//!
//! [`Platform::from_code`] is a total parse: any code outside the known
//! tables is kept verbatim as [`Platform::Unrecognized`].  Classification is
//! then an exhaustive match, so adding a platform without assigning it a
//! manufacturer fails to compile.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Manufacturer;

// ── Platform ──────────────────────────────────────────────────────────────────

/// A game console or computer platform as it appears in the dataset.
///
/// Serialized as its raw code; a `null` code reads as an empty unrecognized
/// platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Platform {
    // Nintendo
    Nes,
    GameBoy,
    Snes,
    N64,
    GameBoyAdvance,
    GameCube,
    Ds,
    Wii,
    ThreeDs,
    WiiU,
    // Sony
    Ps,
    Ps2,
    Ps3,
    Ps4,
    Psp,
    PsVita,
    // Microsoft
    Xbox,
    Xbox360,
    XboxOne,
    // Sega
    Genesis,
    GameGear,
    SegaSaturn,
    SegaCd,
    Dreamcast,
    // Personal computer
    Pc,
    // Legacy platforms without a dedicated manufacturer bucket
    Atari2600,
    ThreeDo,
    NeoGeo,
    PcFx,
    Saturn,
    TurboGrafx16,
    WonderSwan,
    /// Any code not listed above.
    Unrecognized(String),
}

impl Platform {
    /// Every code with a dedicated variant, in declaration order.
    pub const KNOWN_CODES: [&'static str; 32] = [
        "NES", "GB", "SNES", "N64", "GBA", "GC", "DS", "Wii", "3DS", "WiiU", "PS", "PS2", "PS3",
        "PS4", "PSP", "PSV", "XB", "X360", "XOne", "GEN", "GG", "SSAT", "SCD", "DC", "PC", "2600",
        "3DO", "NG", "PCFX", "SAT", "TG16", "WS",
    ];

    /// Parse a raw platform code.  Never fails; matching is exact.
    pub fn from_code(code: &str) -> Self {
        match code {
            "NES" => Self::Nes,
            "GB" => Self::GameBoy,
            "SNES" => Self::Snes,
            "N64" => Self::N64,
            "GBA" => Self::GameBoyAdvance,
            "GC" => Self::GameCube,
            "DS" => Self::Ds,
            "Wii" => Self::Wii,
            "3DS" => Self::ThreeDs,
            "WiiU" => Self::WiiU,
            "PS" => Self::Ps,
            "PS2" => Self::Ps2,
            "PS3" => Self::Ps3,
            "PS4" => Self::Ps4,
            "PSP" => Self::Psp,
            "PSV" => Self::PsVita,
            "XB" => Self::Xbox,
            "X360" => Self::Xbox360,
            "XOne" => Self::XboxOne,
            "GEN" => Self::Genesis,
            "GG" => Self::GameGear,
            "SSAT" => Self::SegaSaturn,
            "SCD" => Self::SegaCd,
            "DC" => Self::Dreamcast,
            "PC" => Self::Pc,
            "2600" => Self::Atari2600,
            "3DO" => Self::ThreeDo,
            "NG" => Self::NeoGeo,
            "PCFX" => Self::PcFx,
            "SAT" => Self::Saturn,
            "TG16" => Self::TurboGrafx16,
            "WS" => Self::WonderSwan,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// The dataset code for this platform.
    pub fn code(&self) -> &str {
        match self {
            Self::Nes => "NES",
            Self::GameBoy => "GB",
            Self::Snes => "SNES",
            Self::N64 => "N64",
            Self::GameBoyAdvance => "GBA",
            Self::GameCube => "GC",
            Self::Ds => "DS",
            Self::Wii => "Wii",
            Self::ThreeDs => "3DS",
            Self::WiiU => "WiiU",
            Self::Ps => "PS",
            Self::Ps2 => "PS2",
            Self::Ps3 => "PS3",
            Self::Ps4 => "PS4",
            Self::Psp => "PSP",
            Self::PsVita => "PSV",
            Self::Xbox => "XB",
            Self::Xbox360 => "X360",
            Self::XboxOne => "XOne",
            Self::Genesis => "GEN",
            Self::GameGear => "GG",
            Self::SegaSaturn => "SSAT",
            Self::SegaCd => "SCD",
            Self::Dreamcast => "DC",
            Self::Pc => "PC",
            Self::Atari2600 => "2600",
            Self::ThreeDo => "3DO",
            Self::NeoGeo => "NG",
            Self::PcFx => "PCFX",
            Self::Saturn => "SAT",
            Self::TurboGrafx16 => "TG16",
            Self::WonderSwan => "WS",
            Self::Unrecognized(code) => code,
        }
    }

    /// The hardware manufacturer owning this platform.
    ///
    /// Never returns [`Manufacturer::All`].
    pub fn manufacturer(&self) -> Manufacturer {
        match self {
            Self::Pc => Manufacturer::PC,
            Self::Nes
            | Self::GameBoy
            | Self::Snes
            | Self::N64
            | Self::GameBoyAdvance
            | Self::GameCube
            | Self::Ds
            | Self::Wii
            | Self::ThreeDs
            | Self::WiiU => Manufacturer::Nintendo,
            Self::Ps | Self::Ps2 | Self::Ps3 | Self::Ps4 | Self::Psp | Self::PsVita => {
                Manufacturer::Sony
            }
            Self::Xbox | Self::Xbox360 | Self::XboxOne => Manufacturer::Microsoft,
            Self::Genesis | Self::GameGear | Self::SegaSaturn | Self::SegaCd | Self::Dreamcast => {
                Manufacturer::Sega
            }
            Self::Atari2600
            | Self::ThreeDo
            | Self::NeoGeo
            | Self::PcFx
            | Self::Saturn
            | Self::TurboGrafx16
            | Self::WonderSwan
            | Self::Unrecognized(_) => Manufacturer::Other,
        }
    }

    /// `true` for codes that fell through every known table.
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }
}

/// Map a raw platform code to its manufacturer.
///
/// Total and deterministic; unknown codes classify as [`Manufacturer::Other`].
pub fn classify(code: &str) -> Manufacturer {
    Platform::from_code(code).manufacturer()
}

impl Default for Platform {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<Option<String>> for Platform {
    fn from(code: Option<String>) -> Self {
        code.map(|c| Self::from_code(&c)).unwrap_or_default()
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.code().to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
