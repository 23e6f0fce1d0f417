//! Level formatting and tooltip visibility for modifiers.

use std::fmt;

use hf_core::json::{self, JsonObject};
use hf_core::{ContentError, ContentResult, DecodeError, DecodeResult, PacketReader, PacketWriter};
use serde_json::Value;

/// Highest level rendered as pluses; above it [`LevelDisplay::Pluses`]
/// switches to a roman numeral.
pub const MAX_PLUSES_LEVEL: u32 = 10;

/// How a modifier's level is appended to its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelDisplay {
    /// Name followed by a roman numeral: `Reinforced II`.
    #[default]
    Default,
    /// Name alone at level 1, otherwise like [`LevelDisplay::Default`].
    SingleLevel,
    /// Name alone at every level.
    NoLevels,
    /// One `+` per level above the first: `Sharp++` at level 3. Levels
    /// above [`MAX_PLUSES_LEVEL`] use a roman numeral instead.
    Pluses,
}

impl LevelDisplay {
    /// Every variant, in a stable order.
    pub const ALL: [Self; 4] = [Self::Default, Self::SingleLevel, Self::NoLevels, Self::Pluses];

    /// The `type` name used in both encodings.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::SingleLevel => "single_level",
            Self::NoLevels => "no_levels",
            Self::Pluses => "pluses",
        }
    }

    /// Parse a `type` name.
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.type_name() == name)
    }

    /// Format `name` at `level`.
    pub fn name_for_level(self, name: &str, level: u32) -> String {
        match self {
            Self::Default => format!("{name} {}", roman_numeral(level)),
            Self::SingleLevel if level == 1 => name.to_string(),
            Self::SingleLevel => format!("{name} {}", roman_numeral(level)),
            Self::NoLevels => name.to_string(),
            Self::Pluses if level > MAX_PLUSES_LEVEL => format!("{name} {}", roman_numeral(level)),
            Self::Pluses => format!("{name}{}", "+".repeat(level.saturating_sub(1) as usize)),
        }
    }

    /// Structured form: `{ "type": name }`.
    pub fn to_json(self) -> Value {
        let mut json = JsonObject::new();
        json.insert("type".to_string(), Value::from(self.type_name()));
        Value::Object(json)
    }

    /// Read the structured form.
    pub fn from_json(json: &JsonObject) -> ContentResult<Self> {
        let name = json::get_str(json, "type")?;
        Self::from_type_name(name)
            .ok_or_else(|| ContentError::syntax(format!("unknown level display \"{name}\"")))
    }

    /// Write the wire form: the type name.
    pub fn to_network(self, writer: &mut PacketWriter) {
        writer.write_string(self.type_name());
    }

    /// Read the wire form.
    pub fn from_network(reader: &mut PacketReader<'_>) -> DecodeResult<Self> {
        let name = reader.read_string()?;
        Self::from_type_name(&name).ok_or(DecodeError::UnknownType {
            what: "level display",
            name,
        })
    }
}

/// Roman numeral for 1..=3999; other values fall back to decimal.
pub fn roman_numeral(value: u32) -> String {
    const TABLE: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    if value == 0 || value > 3999 {
        return value.to_string();
    }
    let mut rest = value;
    let mut out = String::new();
    for (amount, numeral) in TABLE {
        while rest >= amount {
            out.push_str(numeral);
            rest -= amount;
        }
    }
    out
}

/// When a modifier shows up in tooltips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TooltipDisplay {
    /// Always shown.
    #[default]
    Always,
    /// Shown only in detailed (advanced) views.
    Contextual,
    /// Never shown.
    Never,
}

impl TooltipDisplay {
    /// Every variant, indexed by wire ordinal.
    pub const ALL: [Self; 3] = [Self::Always, Self::Contextual, Self::Never];

    /// Lower-case name used in the structured form.
    pub fn name(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Contextual => "contextual",
            Self::Never => "never",
        }
    }

    /// Parse a structured-form name. `tinker_station` is accepted for `contextual`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "always" => Some(Self::Always),
            "contextual" | "tinker_station" => Some(Self::Contextual),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    /// Wire ordinal.
    pub fn ordinal(self) -> usize {
        match self {
            Self::Always => 0,
            Self::Contextual => 1,
            Self::Never => 2,
        }
    }

    /// Whether to show the modifier in a basic or advanced tooltip.
    pub fn should_display(self, advanced: bool) -> bool {
        if advanced {
            self != Self::Never
        } else {
            self == Self::Always
        }
    }

    /// Write the ordinal as an `i32`.
    pub fn to_network(self, writer: &mut PacketWriter) {
        writer.write_enum(self.ordinal());
    }

    /// Read an ordinal, rejecting values out of range.
    pub fn from_network(reader: &mut PacketReader<'_>) -> DecodeResult<Self> {
        let ordinal = reader.read_enum()?;
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(DecodeError::InvalidEnum {
                what: "tooltip display",
                ordinal,
            })
    }
}

impl fmt::Display for TooltipDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
