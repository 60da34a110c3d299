use chrono::NaiveDate;
use serde_json::json;

use super::*;

fn rick() -> Value {
    json!({
        "id": 1,
        "name": "Rick Sanchez",
        "status": "Alive",
        "species": "Human",
        "type": "",
        "gender": "Male",
        "origin": {
            "name": "Earth (C-137)",
            "url": "https://rickandmortyapi.com/api/location/1"
        },
        "location": {
            "name": "Citadel of Ricks",
            "url": "https://rickandmortyapi.com/api/location/3"
        },
        "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
        "episode": [
            "https://rickandmortyapi.com/api/episode/1",
            "https://rickandmortyapi.com/api/episode/2"
        ],
        "url": "https://rickandmortyapi.com/api/character/1",
        "created": "2017-11-04T18:48:46.250Z"
    })
}

#[test]
fn location_maps_fields() {
    let loc = decode_location(&json!({
        "id": 3,
        "name": "Citadel of Ricks",
        "type": "Space station",
        "dimension": "unknown",
        "residents": [],
    }))
    .unwrap();
    assert_eq!(loc.id, 3);
    assert_eq!(loc.name, "Citadel of Ricks");
    assert_eq!(loc.kind.as_deref(), Some("Space station"));
    assert_eq!(loc.dimension.as_deref(), Some("unknown"));
}

#[test]
fn location_missing_dimension_fails() {
    let err = decode_location(&json!({"id": 3, "name": "Citadel", "type": "Space station"}))
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::DecodeFailed {
            kind: ResourceKind::Location,
            field: "dimension"
        }
    ));
}

#[test]
fn location_string_id_fails() {
    let err = decode_location(&json!({
        "id": "3", "name": "Citadel", "type": "", "dimension": ""
    }))
    .unwrap_err();
    assert!(matches!(err, ApiError::DecodeFailed { field: "id", .. }));
}

#[test]
fn episode_parses_air_date() {
    let ep = decode_episode(&json!({
        "id": 1,
        "name": "Pilot",
        "air_date": "December 2, 2013",
        "episode": "S01E01",
        "characters": []
    }))
    .unwrap();
    assert_eq!(ep.air_date, NaiveDate::from_ymd_opt(2013, 12, 2).unwrap());
    assert_eq!(ep.episode_code, "S01E01");
}

#[test]
fn episode_bad_air_date_is_substituted_by_default() {
    let ep = decode_episode(&json!({
        "id": 99,
        "name": "Unaired",
        "air_date": "TBA",
        "episode": "S09E99"
    }))
    .unwrap();
    assert_eq!(ep.id, 99);
}

#[test]
fn episode_bad_air_date_rejected_under_strict_policy() {
    let err = decode_episode_with(
        &json!({"id": 99, "name": "Unaired", "air_date": "TBA", "episode": "S09E99"}),
        AirDatePolicy::Reject,
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::DecodeFailed { field: "air_date", .. }));
}

#[test]
fn episode_code_is_not_validated() {
    let ep = decode_episode(&json!({
        "id": 2, "name": "Lawnmower Dog", "air_date": "December 9, 2013", "episode": "episode two"
    }))
    .unwrap();
    assert_eq!(ep.episode_code, "episode two");
}

#[test]
fn character_resolves_links() {
    let ch = decode_character(&rick()).unwrap();
    assert_eq!(ch.id, 1);
    assert_eq!(ch.kind, "");
    assert_eq!(ch.origin_id, 1);
    assert_eq!(ch.location_id, 3);
    assert_eq!(ch.episode_ids, vec![1, 2]);
}

#[test]
fn character_empty_origin_defaults_to_unknown() {
    let mut value = rick();
    value["origin"] = json!({"name": "unknown", "url": ""});
    let ch = decode_character(&value).unwrap();
    assert_eq!(ch.origin_id, 0);
}

#[test]
fn character_malformed_episode_url_becomes_zero() {
    let mut value = rick();
    value["episode"] = json!([
        "https://rickandmortyapi.com/api/episode/1",
        "https://rickandmortyapi.com/api/episode/x"
    ]);
    let ch = decode_character(&value).unwrap();
    assert_eq!(ch.episode_ids, vec![1, 0]);
}

#[test]
fn character_missing_origin_object_fails() {
    let mut value = rick();
    value.as_object_mut().unwrap().remove("origin");
    let err = decode_character(&value).unwrap_err();
    assert!(matches!(err, ApiError::DecodeFailed { field: "origin.url", .. }));
}

#[test]
fn character_non_string_episode_entry_fails() {
    let mut value = rick();
    value["episode"] = json!(["https://rickandmortyapi.com/api/episode/1", 2]);
    let err = decode_character(&value).unwrap_err();
    assert!(matches!(
        err,
        ApiError::DecodeFailed {
            kind: ResourceKind::Character,
            field: "episode"
        }
    ));
}

#[test]
fn resource_trait_uses_options() {
    let value = json!({"id": 1, "name": "Pilot", "air_date": "soon", "episode": "S01E01"});
    let strict = DecodeOptions {
        air_date_policy: AirDatePolicy::Reject,
    };
    assert!(<EpisodeRecord as Resource>::decode(&value, &strict).is_err());
    assert!(<EpisodeRecord as Resource>::decode(&value, &DecodeOptions::default()).is_ok());
    assert_eq!(<CharacterRecord as Resource>::KIND, ResourceKind::Character);
}
