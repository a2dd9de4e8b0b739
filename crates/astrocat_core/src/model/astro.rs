//! Astro domain model.
//!
//! # Responsibility
//! - Define the catalog record with its embedded star system and moons.
//! - Normalize legacy or partial documents into fully populated records.
//!
//! # Invariants
//! - `name` is the only identity of a record; there is no surrogate key.
//! - Deserialized records always carry a `system` and a `moons` list.
//! - Long text fields hold escaped newlines (see [`crate::model::text`]).
//! - Moons without a name are never kept.

use crate::config::CanvasBounds;
use crate::model::text::{escape_newlines, unescape_newlines};
use crate::store::placement::random_below;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Star name used when a document omits the system entirely.
pub const DEFAULT_STAR_NAME: &str = "Unknown";
/// Star type used when a document omits the system entirely.
pub const DEFAULT_STAR_TYPE: &str = "N/A";

/// Themed grouping shared by astros and moons.
///
/// Serialized as its display label. Unknown labels decode to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Exoticos,
    Caoticos,
    Toxicos,
    Habitaveis,
    Primordiais,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 5] = [
        Category::Exoticos,
        Category::Caoticos,
        Category::Toxicos,
        Category::Habitaveis,
        Category::Primordiais,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Exoticos => "Astros Exóticos",
            Self::Caoticos => "Astros Caóticos",
            Self::Toxicos => "Astros Tóxicos",
            Self::Habitaveis => "Astros Habitáveis",
            Self::Primordiais => "Astros Primordiais",
        }
    }

    /// Starmap dot color.
    pub fn color_hex(self) -> &'static str {
        match self {
            Self::Exoticos => "#FF69B4",
            Self::Caoticos => "#FF4500",
            Self::Toxicos => "#32CD32",
            Self::Habitaveis => "#1E90FF",
            Self::Primordiais => "#9370DB",
        }
    }

    /// Exact label lookup (surrounding whitespace ignored).
    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label() == trimmed)
    }

    pub fn from_label_or_default(label: &str) -> Self {
        Self::from_label(label).unwrap_or_default()
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .map(Self::from_label_or_default)
            .unwrap_or_default())
    }
}

/// Kind of the main media asset attached to an astro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaType {
    Image,
    Video,
    /// No media attached. Serialized as an empty string.
    #[default]
    None,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::None => "",
        }
    }

    /// Lenient parse; anything but `image`/`video` is `None`.
    pub fn from_name(value: &str) -> Self {
        match value.trim() {
            "image" => Self::Image,
            "video" => Self::Video,
            _ => Self::None,
        }
    }
}

impl Serialize for MediaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MediaType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().map(Self::from_name).unwrap_or_default())
    }
}

/// Starmap placement in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "coordX")]
    pub x: i32,
    #[serde(rename = "coordY")]
    pub y: i32,
}

impl Coordinates {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Star system embedded one-to-one in every astro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StarSystemWire")]
pub struct StarSystem {
    pub star_name: String,
    pub star_type: String,
    /// One-based orbit index of the owning astro.
    pub orbital_position: u32,
    pub total_planets_in_system: u32,
}

impl StarSystem {
    /// System around `star_name` with a single planet in orbit 1.
    pub fn named(star_name: impl Into<String>) -> Self {
        Self {
            star_name: star_name.into(),
            star_type: String::new(),
            orbital_position: 1,
            total_planets_in_system: 1,
        }
    }

    fn normalize(&mut self) {
        self.orbital_position = self.orbital_position.max(1);
        self.total_planets_in_system = self.total_planets_in_system.max(1);
    }
}

impl Default for StarSystem {
    fn default() -> Self {
        Self {
            star_name: DEFAULT_STAR_NAME.to_string(),
            star_type: DEFAULT_STAR_TYPE.to_string(),
            orbital_position: 1,
            total_planets_in_system: 1,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct StarSystemWire {
    star_name: Option<String>,
    star_type: Option<String>,
    orbital_position: Option<Value>,
    total_planets_in_system: Option<Value>,
}

impl From<StarSystemWire> for StarSystem {
    fn from(wire: StarSystemWire) -> Self {
        Self {
            star_name: wire
                .star_name
                .unwrap_or_else(|| DEFAULT_STAR_NAME.to_string()),
            star_type: wire
                .star_type
                .unwrap_or_else(|| DEFAULT_STAR_TYPE.to_string()),
            orbital_position: positive_or_one(wire.orbital_position.as_ref()),
            total_planets_in_system: positive_or_one(wire.total_planets_in_system.as_ref()),
        }
    }
}

/// Named, categorized moon of one astro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moon {
    pub name: String,
    #[serde(default)]
    pub category: Category,
}

impl Moon {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct MoonWire {
    name: Option<String>,
    category: Category,
}

/// Free-text fields of an astro, stored newline-escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    ShortDescription,
    InfoGeral,
    Historia,
    Civilizacao,
    Biologia,
}

impl TextField {
    pub const ALL: [TextField; 5] = [
        TextField::ShortDescription,
        TextField::InfoGeral,
        TextField::Historia,
        TextField::Civilizacao,
        TextField::Biologia,
    ];
}

/// Validation failures for astro write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstroValidationError {
    EmptyName,
    EmptyStarName,
}

impl Display for AstroValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "astro name cannot be empty"),
            Self::EmptyStarName => write!(f, "star system name cannot be empty"),
        }
    }
}

impl Error for AstroValidationError {}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "AstroWire")]
pub struct AstroRecord {
    /// Unique, case-sensitive identity.
    pub name: String,
    pub category: Category,
    pub short_description: String,
    pub info_geral: String,
    pub historia: String,
    pub civilizacao: String,
    pub biologia: String,
    /// Relative path of an imported asset, or empty.
    pub main_media_path: String,
    pub main_media_type: MediaType,
    /// `None` only on records that have not been placed by a store yet.
    #[serde(flatten)]
    pub position: Option<Coordinates>,
    pub system: StarSystem,
    /// Display order is insertion order.
    pub moons: Vec<Moon>,
}

impl AstroRecord {
    /// Creates an unplaced astro with empty descriptive fields.
    pub fn new(name: impl Into<String>, system: StarSystem) -> Self {
        Self {
            name: name.into(),
            category: Category::default(),
            short_description: String::new(),
            info_geral: String::new(),
            historia: String::new(),
            civilizacao: String::new(),
            biologia: String::new(),
            main_media_path: String::new(),
            main_media_type: MediaType::None,
            position: None,
            system,
            moons: Vec::new(),
        }
    }

    /// Checks the fields a record must carry before it is written.
    pub fn validate(&self) -> Result<(), AstroValidationError> {
        if self.name.trim().is_empty() {
            return Err(AstroValidationError::EmptyName);
        }
        if self.system.star_name.trim().is_empty() {
            return Err(AstroValidationError::EmptyStarName);
        }
        Ok(())
    }

    /// Brings a record into persisted shape.
    ///
    /// - Text fields, short description included, are newline-escaped.
    /// - Moons with blank names are dropped.
    /// - System counters are at least 1.
    pub fn normalize(&mut self) {
        for field in TextField::ALL {
            let escaped = escape_newlines(self.text(field));
            *self.text_mut(field) = escaped;
        }
        self.moons.retain(|moon| !moon.name.trim().is_empty());
        self.system.normalize();
    }

    /// Stored (escaped) text of one section.
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::ShortDescription => &self.short_description,
            TextField::InfoGeral => &self.info_geral,
            TextField::Historia => &self.historia,
            TextField::Civilizacao => &self.civilizacao,
            TextField::Biologia => &self.biologia,
        }
    }

    /// Sets one section from display text, escaping line breaks.
    pub fn set_text(&mut self, field: TextField, value: &str) {
        *self.text_mut(field) = escape_newlines(value);
    }

    /// Section text with real line breaks, for display.
    pub fn display_text(&self, field: TextField) -> String {
        unescape_newlines(self.text(field))
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::ShortDescription => &mut self.short_description,
            TextField::InfoGeral => &mut self.info_geral,
            TextField::Historia => &mut self.historia,
            TextField::Civilizacao => &mut self.civilizacao,
            TextField::Biologia => &mut self.biologia,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct AstroWire {
    name: Option<String>,
    category: Category,
    short_description: Option<String>,
    info_geral: Option<String>,
    historia: Option<String>,
    civilizacao: Option<String>,
    biologia: Option<String>,
    main_media_path: Option<String>,
    main_media_type: MediaType,
    coord_x: Option<Value>,
    coord_y: Option<Value>,
    system: Option<StarSystem>,
    moons: Option<Vec<MoonWire>>,
}

impl From<AstroWire> for AstroRecord {
    fn from(wire: AstroWire) -> Self {
        let position = backfill_position(
            wire.coord_x.as_ref().and_then(pixel),
            wire.coord_y.as_ref().and_then(pixel),
            CanvasBounds::default(),
        );
        let moons = wire
            .moons
            .unwrap_or_default()
            .into_iter()
            .filter_map(|moon| {
                moon.name.map(|name| Moon {
                    name,
                    category: moon.category,
                })
            })
            .collect();

        let mut record = Self {
            name: wire.name.unwrap_or_default(),
            category: wire.category,
            short_description: wire.short_description.unwrap_or_default(),
            info_geral: wire.info_geral.unwrap_or_default(),
            historia: wire.historia.unwrap_or_default(),
            civilizacao: wire.civilizacao.unwrap_or_default(),
            biologia: wire.biologia.unwrap_or_default(),
            main_media_path: wire.main_media_path.unwrap_or_default(),
            main_media_type: wire.main_media_type,
            position,
            system: wire.system.unwrap_or_default(),
            moons,
        };
        record.normalize();
        record
    }
}

/// Accepts positive integers, floats (floored) and numeric strings.
fn positive_or_one(value: Option<&Value>) -> u32 {
    let parsed = match value {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float.floor() as i64)),
        Some(Value::String(text)) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed
        .filter(|candidate| *candidate >= 1)
        .and_then(|candidate| u32::try_from(candidate).ok())
        .unwrap_or(1)
}

/// Keeps whichever axis a document carries and draws only the missing one.
///
/// A record with neither axis stays unplaced so the store can place it.
fn backfill_position(
    x: Option<i32>,
    y: Option<i32>,
    bounds: CanvasBounds,
) -> Option<Coordinates> {
    match (x, y) {
        (Some(x), Some(y)) => Some(Coordinates::new(x, y)),
        (Some(x), None) => Some(Coordinates::new(x, random_axis(bounds.height))),
        (None, Some(y)) => Some(Coordinates::new(random_axis(bounds.width), y)),
        (None, None) => None,
    }
}

fn random_axis(bound: u32) -> i32 {
    i32::try_from(random_below(bound as usize)).unwrap_or(i32::MAX)
}

fn pixel(value: &Value) -> Option<i32> {
    let Value::Number(number) = value else {
        return None;
    };
    let whole = number
        .as_i64()
        .or_else(|| number.as_f64().map(|float| float.floor() as i64))?;
    i32::try_from(whole).ok()
}
