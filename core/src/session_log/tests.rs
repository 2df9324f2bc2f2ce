use super::*;
use crate::error::StatsError;
use serde_json::json;
use std::io::Write;

fn parse(value: serde_json::Value) -> SessionLog {
    SessionLog::from_slice(value.to_string().as_bytes()).unwrap()
}

#[test]
fn test_entity_id_keys() {
    assert_eq!(EntityId::from(12).key(), "12");
    assert_eq!(EntityId::from("abc").key(), "abc");

    let float: EntityId = serde_json::from_value(json!(7.0)).unwrap();
    assert_eq!(float.key(), "7");

    assert_eq!(key_of(None), UNDEFINED_KEY);
}

#[test]
fn test_entity_id_from_value() {
    assert_eq!(EntityId::from_value(&json!(3)).unwrap(), Some(EntityId::from(3)));
    assert_eq!(
        EntityId::from_value(&json!("null")).unwrap(),
        Some(EntityId::from("null"))
    );
    assert_eq!(EntityId::from_value(&json!(null)).unwrap(), None);
    assert!(matches!(
        EntityId::from_value(&json!({"a": 1})),
        Err(StatsError::InputMalformed { .. })
    ));
}

#[test]
fn test_entity_id_serializes_in_original_form() {
    assert_eq!(serde_json::to_value(EntityId::from(4)).unwrap(), json!(4));
    assert_eq!(serde_json::to_value(EntityId::from("x")).unwrap(), json!("x"));
}

#[test]
fn test_position_sample_keeps_leading_vector() {
    let sample: PositionSample =
        serde_json::from_value(json!([[1.5, 2.0, 3.0], 90, 1, 0, "Alpha 1-1"])).unwrap();
    assert_eq!(sample.coords, [1.5, 2.0, 3.0]);
}

#[test]
fn test_position_sample_2d_vector() {
    let sample: PositionSample = serde_json::from_value(json!([[4, 5]])).unwrap();
    assert_eq!(sample.coords, [4.0, 5.0, 0.0]);
}

#[test]
fn test_position_sample_rejects_bad_shapes() {
    assert!(serde_json::from_value::<PositionSample>(json!([])).is_err());
    assert!(serde_json::from_value::<PositionSample>(json!([5, 6, 7])).is_err());
    assert!(serde_json::from_value::<PositionSample>(json!([[1]])).is_err());
    assert!(serde_json::from_value::<PositionSample>(json!([[1, "a", 2]])).is_err());
}

#[test]
fn test_distance_between_samples() {
    let a = PositionSample::new(0.0, 0.0, 0.0);
    let b = PositionSample::new(3.0, 4.0, 0.0);
    assert_eq!(a.distance_to(&b), 5.0);
    assert_eq!(b.distance_to(&a), 5.0);
}

#[test]
fn test_is_truthy() {
    assert!(!is_truthy(&json!(null)));
    assert!(!is_truthy(&json!(false)));
    assert!(!is_truthy(&json!(0)));
    assert!(!is_truthy(&json!("")));
    assert!(is_truthy(&json!(1)));
    assert!(is_truthy(&json!(true)));
    assert!(is_truthy(&json!("yes")));
    assert!(is_truthy(&json!([])));
}

#[test]
fn test_raw_entity_fields() {
    let log = parse(json!({
        "entities": [
            {"id": 0, "name": "Rifleman", "isPlayer": 1, "side": "WEST", "type": "unit",
             "positions": [[[0, 0, 0]]], "framesFired": [[12, [1, 2, 3]]]},
            {"id": 1, "name": "Hunter", "type": "vehicle", "positions": null}
        ],
        "events": []
    }));
    let entities = log.entities().unwrap();

    assert_eq!(entities.len(), 2);
    assert!(entities[0].is_player());
    assert_eq!(entities[0].side.as_deref(), Some("WEST"));
    assert_eq!(entities[0].entity_type.as_deref(), Some("unit"));
    assert_eq!(entities[0].frames_fired.as_ref().map(Vec::len), Some(1));

    assert!(!entities[1].is_player());
    assert!(entities[1].positions().is_empty());
    assert!(entities[1].frames_fired.is_none());
    assert_eq!(entities[1].describe(), "entity 1 (Hunter)");
}

#[test]
fn test_raw_event_accessors() {
    let hit = RawEvent(vec![json!(120), json!("hit"), json!(7), json!([3, "MX"]), json!(42.5)]);
    assert_eq!(hit.timestamp(), Some(&json!(120)));
    assert_eq!(hit.event_type(), Some("hit"));
    assert_eq!(hit.victim(), Some(&json!(7)));
    assert_eq!(hit.killer_info(), &json!([3, "MX"]));
    assert_eq!(hit.distance().and_then(|n| n.as_f64()), Some(42.5));

    let connected = RawEvent(vec![json!(5), json!("connected"), json!("Player")]);
    assert_eq!(connected.event_type(), Some("connected"));
    assert_eq!(connected.victim(), Some(&json!("Player")));
    assert_eq!(connected.killer_info(), &json!(null));
    assert!(connected.distance().is_none());
}

#[test]
fn test_missing_sections() {
    let log = parse(json!({"missionName": "Op"}));
    assert!(matches!(
        log.entities(),
        Err(StatsError::RequiredFieldMissing { .. })
    ));
    assert!(matches!(log.events(), Err(StatsError::RequiredFieldMissing { .. })));
    assert!(matches!(
        log.start_time(),
        Err(StatsError::RequiredFieldMissing { .. })
    ));
}

#[test]
fn test_start_time() {
    let log = parse(json!({"times": [{"systemTimeUTC": "2023-05-12T19:35:19.123", "frameNum": 0}]}));
    assert_eq!(log.start_time().unwrap(), "2023-05-12T19:35:19.123");
}

#[test]
fn test_load_session_log_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_session_log(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, StatsError::InputNotFound { .. }));
}

#[test]
fn test_load_session_log_malformed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{\"entities\": [").unwrap();

    let err = load_session_log(file.path()).unwrap_err();
    assert!(matches!(err, StatsError::InputMalformed { .. }));
}

#[test]
fn test_load_session_log_wrong_shape() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"entities": [{"id": true}], "events": []}"#).unwrap();

    let err = load_session_log(file.path()).unwrap_err();
    assert!(matches!(err, StatsError::InputMalformed { .. }));
}

#[test]
fn test_load_session_log() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        json!({
            "entities": [{"id": 0, "framesFired": []}],
            "events": [[0, "connected", "Bob", 0]],
            "missionName": "Op Test",
            "missionAuthor": "Someone",
            "worldName": "Altis",
            "times": [{"systemTimeUTC": "2023-01-01T00:00:00"}]
        })
        .to_string()
        .as_bytes(),
    )
    .unwrap();

    let log = load_session_log(file.path()).unwrap();
    assert_eq!(log.entities().unwrap().len(), 1);
    assert_eq!(log.events().unwrap().len(), 1);
    assert_eq!(log.mission_name.as_deref(), Some("Op Test"));
    assert_eq!(log.world_name.as_deref(), Some("Altis"));
}
