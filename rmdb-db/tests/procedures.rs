use chrono::NaiveDate;
use rmdb_catalog::{Association, CharacterRecord, EpisodeRecord, LocationRecord};
use rmdb_db::*;

fn location(id: i64, name: &str) -> LocationRecord {
    LocationRecord {
        id,
        name: name.to_string(),
        kind: Some("Planet".to_string()),
        dimension: Some("Dimension C-137".to_string()),
    }
}

fn episode(id: i64) -> EpisodeRecord {
    EpisodeRecord {
        id,
        name: "Pilot".to_string(),
        air_date: NaiveDate::from_ymd_opt(2013, 12, 2).unwrap(),
        episode_code: "S01E01".to_string(),
    }
}

fn character(id: i64, origin_id: i64, location_id: i64) -> CharacterRecord {
    CharacterRecord {
        id,
        name: "Morty Smith".to_string(),
        status: "Alive".to_string(),
        species: "Human".to_string(),
        kind: String::new(),
        gender: "Male".to_string(),
        origin_id,
        location_id,
        episode_ids: vec![],
    }
}

#[test]
fn one_prepared_statement_serves_many_rows() {
    let conn = open_memory().unwrap();
    let mut call = ProcedureCall::<LocationRecord>::prepare(&conn).unwrap();
    for id in 1..=3 {
        add_location(&mut call, &location(id, "Earth")).unwrap();
    }
    assert_eq!(call.executions(), 3);
    drop(call);

    assert_eq!(table_counts(&conn).unwrap().locations, 3);
}

#[test]
fn episode_air_date_is_stored_iso() {
    let conn = open_memory().unwrap();
    let mut call = ProcedureCall::<EpisodeRecord>::prepare(&conn).unwrap();
    add_episode(&mut call, &episode(1)).unwrap();
    drop(call);

    let stored: String = conn
        .query_row(r#"SELECT air_date FROM "episode" WHERE id = 1"#, [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(stored, "2013-12-02");
}

#[test]
fn duplicate_primary_key_is_an_error() {
    let conn = open_memory().unwrap();
    let mut call = ProcedureCall::<LocationRecord>::prepare(&conn).unwrap();
    add_location(&mut call, &location(1, "Earth")).unwrap();
    let err = add_location(&mut call, &location(1, "Earth (Replacement Dimension)")).unwrap_err();
    assert!(matches!(
        err,
        OperationError::Procedure {
            procedure: Procedure::AddLocation,
            ..
        }
    ));
}

#[test]
fn character_with_missing_location_is_rejected() {
    let conn = open_memory().unwrap();
    let mut locations = ProcedureCall::<LocationRecord>::prepare(&conn).unwrap();
    add_location(&mut locations, &location(1, "Earth")).unwrap();

    let mut characters = ProcedureCall::<CharacterRecord>::prepare(&conn).unwrap();
    add_character(&mut characters, &character(1, 1, 1)).unwrap();
    let err = add_character(&mut characters, &character(2, 1, 99)).unwrap_err();
    assert!(matches!(
        err,
        OperationError::Procedure {
            procedure: Procedure::AddCharacter,
            ..
        }
    ));
    drop(characters);
    drop(locations);

    assert_eq!(table_counts(&conn).unwrap().characters, 1);
}

#[test]
fn association_requires_both_parents() {
    let conn = open_memory().unwrap();
    ProcedureCall::<LocationRecord>::prepare(&conn)
        .and_then(|mut call| add_location(&mut call, &location(1, "Earth")))
        .unwrap();
    ProcedureCall::<EpisodeRecord>::prepare(&conn)
        .and_then(|mut call| add_episode(&mut call, &episode(1)))
        .unwrap();
    ProcedureCall::<CharacterRecord>::prepare(&conn)
        .and_then(|mut call| add_character(&mut call, &character(1, 1, 1)))
        .unwrap();

    let mut call = ProcedureCall::<Association>::prepare(&conn).unwrap();
    add_character_in_episode(
        &mut call,
        Association {
            character_id: 1,
            episode_id: 1,
        },
    )
    .unwrap();
    assert!(
        add_character_in_episode(
            &mut call,
            Association {
                character_id: 1,
                episode_id: 2,
            },
        )
        .is_err()
    );
    assert!(
        add_character_in_episode(
            &mut call,
            Association {
                character_id: 2,
                episode_id: 1,
            },
        )
        .is_err()
    );
}

#[test]
fn duplicate_associations_are_accepted() {
    let conn = open_memory().unwrap();
    ProcedureCall::<LocationRecord>::prepare(&conn)
        .and_then(|mut call| add_location(&mut call, &location(1, "Earth")))
        .unwrap();
    ProcedureCall::<EpisodeRecord>::prepare(&conn)
        .and_then(|mut call| add_episode(&mut call, &episode(1)))
        .unwrap();
    ProcedureCall::<CharacterRecord>::prepare(&conn)
        .and_then(|mut call| add_character(&mut call, &character(1, 1, 1)))
        .unwrap();

    let mut call = ProcedureCall::<Association>::prepare(&conn).unwrap();
    let pair = Association {
        character_id: 1,
        episode_id: 1,
    };
    add_character_in_episode(&mut call, pair).unwrap();
    add_character_in_episode(&mut call, pair).unwrap();
    drop(call);

    assert_eq!(table_counts(&conn).unwrap().associations, 2);
}

#[test]
fn call_reports_the_procedure_of_its_row_type() {
    let conn = open_memory().unwrap();
    let locations = ProcedureCall::<LocationRecord>::prepare(&conn).unwrap();
    let associations = ProcedureCall::<Association>::prepare(&conn).unwrap();
    assert_eq!(locations.procedure(), Procedure::AddLocation);
    assert_eq!(associations.procedure(), Procedure::AddCharacterInEpisode);
    assert_eq!(locations.executions(), 0);
}
