use astrocat_core::{
    AstroRecord, AstroValidationError, Category, Coordinates, MediaType, Moon, StarSystem,
    TextField,
};
use serde_json::json;

fn placed_kepler() -> AstroRecord {
    let mut astro = AstroRecord::new("Kepler-9", StarSystem::named("Kepler"));
    astro.category = Category::Habitaveis;
    astro.position = Some(Coordinates::new(120, 45));
    astro.main_media_path = "media/1_image_kepler.png".to_string();
    astro.main_media_type = MediaType::Image;
    astro.moons.push(Moon::new("Io-9", Category::Toxicos));
    astro
}

#[test]
fn astro_new_sets_defaults() {
    let astro = AstroRecord::new("Kepler-9", StarSystem::named("Kepler"));

    assert_eq!(astro.category, Category::Exoticos);
    assert_eq!(astro.main_media_type, MediaType::None);
    assert!(astro.main_media_path.is_empty());
    assert_eq!(astro.position, None);
    assert!(astro.moons.is_empty());
    assert_eq!(astro.system.orbital_position, 1);
    assert_eq!(astro.system.total_planets_in_system, 1);
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let json = serde_json::to_value(placed_kepler()).unwrap();

    assert_eq!(json["name"], "Kepler-9");
    assert_eq!(json["category"], "Astros Habitáveis");
    assert_eq!(json["shortDescription"], "");
    assert_eq!(json["infoGeral"], "");
    assert_eq!(json["mainMediaPath"], "media/1_image_kepler.png");
    assert_eq!(json["mainMediaType"], "image");
    assert_eq!(json["coordX"], 120);
    assert_eq!(json["coordY"], 45);
    assert_eq!(json["system"]["starName"], "Kepler");
    assert_eq!(json["system"]["orbitalPosition"], 1);
    assert_eq!(json["system"]["totalPlanetsInSystem"], 1);
    assert_eq!(json["moons"][0]["name"], "Io-9");
    assert_eq!(json["moons"][0]["category"], "Astros Tóxicos");
}

#[test]
fn unplaced_record_serializes_without_coordinates() {
    let astro = AstroRecord::new("Drifter", StarSystem::named("Nomad"));
    let json = serde_json::to_value(&astro).unwrap();

    assert!(json.get("coordX").is_none());
    assert!(json.get("coordY").is_none());
    assert_eq!(json["mainMediaType"], "");
}

#[test]
fn serde_roundtrip_preserves_record() {
    let mut astro = placed_kepler();
    astro.set_text(TextField::Historia, "Founded\nAbandoned");

    let text = serde_json::to_string_pretty(&astro).unwrap();
    let decoded: AstroRecord = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, astro);
}

#[test]
fn deserialize_backfills_legacy_record() {
    let value = json!({ "name": "Old World", "category": "Astros Primordiais" });
    let astro: AstroRecord = serde_json::from_value(value).unwrap();

    assert_eq!(astro.system, StarSystem::default());
    assert_eq!(astro.system.star_name, "Unknown");
    assert_eq!(astro.system.star_type, "N/A");
    assert!(astro.moons.is_empty());
    assert_eq!(astro.position, None);
    assert_eq!(astro.category, Category::Primordiais);
}

#[test]
fn deserialize_normalizes_system_numbers_and_unknown_labels() {
    let value = json!({
        "name": "Odd",
        "category": "Astros Estranhos",
        "mainMediaType": "audio",
        "system": {
            "starName": "Vega",
            "starType": "A0V",
            "orbitalPosition": "0",
            "totalPlanetsInSystem": "7"
        }
    });
    let astro: AstroRecord = serde_json::from_value(value).unwrap();

    assert_eq!(astro.category, Category::Exoticos);
    assert_eq!(astro.main_media_type, MediaType::None);
    assert_eq!(astro.system.orbital_position, 1);
    assert_eq!(astro.system.total_planets_in_system, 7);
}

#[test]
fn deserialize_drops_nameless_moons() {
    let value = json!({
        "name": "Moony",
        "system": { "starName": "Sol" },
        "moons": [
            { "name": "Luna", "category": "Astros Caóticos" },
            { "category": "Astros Tóxicos" },
            { "name": "   " }
        ]
    });
    let astro: AstroRecord = serde_json::from_value(value).unwrap();

    assert_eq!(astro.moons, vec![Moon::new("Luna", Category::Caoticos)]);
}

#[test]
fn deserialize_escapes_raw_line_breaks() {
    let value = json!({ "name": "Raw", "biologia": "cells\nspores" });
    let astro: AstroRecord = serde_json::from_value(value).unwrap();

    assert_eq!(astro.biologia, "cells\\nspores");
    assert_eq!(astro.display_text(TextField::Biologia), "cells\nspores");
}

#[test]
fn validate_rejects_blank_name_and_star() {
    let nameless = AstroRecord::new("  ", StarSystem::named("Sol"));
    assert_eq!(nameless.validate(), Err(AstroValidationError::EmptyName));

    let starless = AstroRecord::new("Earth", StarSystem::named(""));
    assert_eq!(starless.validate(), Err(AstroValidationError::EmptyStarName));

    assert!(placed_kepler().validate().is_ok());
}

#[test]
fn category_labels_and_colors_are_stable() {
    let labels: Vec<_> = Category::ALL.iter().map(|category| category.label()).collect();
    assert_eq!(
        labels,
        vec![
            "Astros Exóticos",
            "Astros Caóticos",
            "Astros Tóxicos",
            "Astros Habitáveis",
            "Astros Primordiais",
        ]
    );
    assert_eq!(Category::Habitaveis.color_hex(), "#1E90FF");
    assert_eq!(Category::from_label(" Astros Tóxicos "), Some(Category::Toxicos));
    assert_eq!(Category::from_label("Planets"), None);
}
