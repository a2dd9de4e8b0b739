//! Astro use-case service.
//!
//! # Responsibility
//! - Translate raw form input into persisted astro records and back.
//! - Provide the catalog views the UI layer renders (groups, random pick).
//!
//! # Invariants
//! - Form submissions go through `AstroStore::upsert`; the service never
//!   mutates the collection directly.
//! - Long text leaves the form escaped and enters the form unescaped.

use crate::config::StoreConfig;
use crate::model::astro::{AstroRecord, Category, MediaType, Moon, StarSystem, TextField};
use crate::model::text::{escape_newlines, unescape_newlines};
use crate::provider::file::FileProvider;
use crate::provider::media::MediaImport;
use crate::store::astro_store::{AstroStore, StoreResult, UpsertOutcome};
use crate::store::placement::random_below;

/// One moon row of the astro form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoonRow {
    pub name: String,
    pub category: String,
}

/// Raw astro form input, exactly as typed by the user.
///
/// Numeric fields are strings; long text holds real line breaks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AstroForm {
    pub name: String,
    pub category: String,
    pub short_description: String,
    pub info_geral: String,
    pub historia: String,
    pub civilizacao: String,
    pub biologia: String,
    pub main_media_path: String,
    pub main_media_type: String,
    pub star_name: String,
    pub star_type: String,
    pub orbital_position: String,
    pub total_planets_in_system: String,
    pub moons: Vec<MoonRow>,
}

impl AstroForm {
    /// Builds an unplaced record from form input.
    ///
    /// # Contract
    /// - Name and star fields are trimmed.
    /// - Short description and long text are trimmed and newline-escaped.
    /// - Orbital numbers that are not positive integers become 1.
    /// - Moon rows with blank names are dropped.
    pub fn into_record(&self) -> AstroRecord {
        let system = StarSystem {
            star_name: self.star_name.trim().to_string(),
            star_type: self.star_type.trim().to_string(),
            orbital_position: parse_count(&self.orbital_position),
            total_planets_in_system: parse_count(&self.total_planets_in_system),
        };

        let mut record = AstroRecord::new(self.name.trim(), system);
        record.category = Category::from_label_or_default(&self.category);
        record.short_description = escape_newlines(self.short_description.trim());
        record.info_geral = escape_newlines(self.info_geral.trim());
        record.historia = escape_newlines(self.historia.trim());
        record.civilizacao = escape_newlines(self.civilizacao.trim());
        record.biologia = escape_newlines(self.biologia.trim());
        record.main_media_path = self.main_media_path.clone();
        record.main_media_type = MediaType::from_name(&self.main_media_type);
        record.moons = self
            .moons
            .iter()
            .filter(|row| !row.name.trim().is_empty())
            .map(|row| {
                Moon::new(
                    row.name.trim(),
                    Category::from_label_or_default(&row.category),
                )
            })
            .collect();
        record
    }

    /// Prefills an edit form from a stored record.
    pub fn from_record(record: &AstroRecord) -> Self {
        Self {
            name: record.name.clone(),
            category: record.category.label().to_string(),
            short_description: unescape_newlines(&record.short_description),
            info_geral: unescape_newlines(&record.info_geral),
            historia: unescape_newlines(&record.historia),
            civilizacao: unescape_newlines(&record.civilizacao),
            biologia: unescape_newlines(&record.biologia),
            main_media_path: record.main_media_path.clone(),
            main_media_type: record.main_media_type.as_str().to_string(),
            star_name: record.system.star_name.clone(),
            star_type: record.system.star_type.clone(),
            orbital_position: record.system.orbital_position.to_string(),
            total_planets_in_system: record.system.total_planets_in_system.to_string(),
            moons: record
                .moons
                .iter()
                .map(|moon| MoonRow {
                    name: moon.name.clone(),
                    category: moon.category.label().to_string(),
                })
                .collect(),
        }
    }

    /// Points the form at a freshly imported media asset.
    pub fn attach_media(&mut self, import: &MediaImport) {
        self.main_media_path = import.relative_path.clone();
        self.main_media_type = import.media_type.as_str().to_string();
    }
}

/// Astros of one category, in collection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: Category,
    pub astros: Vec<&'a AstroRecord>,
}

/// Use-case facade over one astro store.
pub struct AstroService<P: FileProvider> {
    store: AstroStore<P>,
}

impl<P: FileProvider> AstroService<P> {
    pub fn new(store: AstroStore<P>) -> Self {
        Self { store }
    }

    /// Opens and loads a store, then wraps it.
    pub fn open(provider: P, config: StoreConfig) -> StoreResult<Self> {
        AstroStore::open(provider, config).map(Self::new)
    }

    pub fn store(&self) -> &AstroStore<P> {
        &self.store
    }

    pub fn into_store(self) -> AstroStore<P> {
        self.store
    }

    /// Saves a submitted form as a new astro or as an edit of `original_name`.
    ///
    /// Store errors are returned unchanged so the caller can keep the form
    /// open on `DuplicateName` or `Validation`.
    pub fn submit(
        &mut self,
        form: &AstroForm,
        original_name: Option<&str>,
    ) -> StoreResult<UpsertOutcome> {
        self.store.upsert(form.into_record(), original_name)
    }

    pub fn delete(&mut self, name: &str) -> StoreResult<usize> {
        self.store.delete(name)
    }

    pub fn list(&self) -> Vec<AstroRecord> {
        self.store.list()
    }

    pub fn find(&self, name: &str) -> Option<&AstroRecord> {
        self.store.find_by_name(name)
    }

    /// Edit form for the named astro, if it exists.
    pub fn edit_form(&self, name: &str) -> Option<AstroForm> {
        self.find(name).map(AstroForm::from_record)
    }

    /// Display text of one section of the named astro.
    pub fn section_text(&self, name: &str, field: TextField) -> Option<String> {
        self.find(name).map(|astro| astro.display_text(field))
    }

    /// Any astro, chosen uniformly; `None` for an empty catalog.
    pub fn random_astro(&self) -> Option<&AstroRecord> {
        let astros = self.store.astros();
        if astros.is_empty() {
            return None;
        }
        astros.get(random_below(astros.len()))
    }

    /// Every category in display order with its astros; empty groups included.
    pub fn group_by_category(&self) -> Vec<CategoryGroup<'_>> {
        Category::ALL
            .into_iter()
            .map(|category| CategoryGroup {
                category,
                astros: self
                    .store
                    .astros()
                    .iter()
                    .filter(|astro| astro.category == category)
                    .collect(),
            })
            .collect()
    }
}

/// Reads the leading integer of `value`, ignoring trailing text.
///
/// Anything that does not start with a positive integer becomes 1.
fn parse_count(value: &str) -> u32 {
    let trimmed = value.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = unsigned
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if negative {
        return 1;
    }
    unsigned[..digits_end]
        .parse::<u32>()
        .ok()
        .filter(|count| *count >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::parse_count;

    #[test]
    fn parse_count_defaults_to_one() {
        assert_eq!(parse_count(" 3 "), 3);
        assert_eq!(parse_count("2.5"), 2);
        assert_eq!(parse_count(""), 1);
        assert_eq!(parse_count("0"), 1);
        assert_eq!(parse_count("-4"), 1);
        assert_eq!(parse_count("many"), 1);
    }

    #[test]
    fn parse_count_reads_leading_digits() {
        assert_eq!(parse_count("3 planetas"), 3);
        assert_eq!(parse_count("12th"), 12);
        assert_eq!(parse_count("+5"), 5);
        assert_eq!(parse_count("planet 3"), 1);
        assert_eq!(parse_count("-4 moons"), 1);
    }
}
