//! Journey: point the tool at stores it did not write itself

use chrono::Utc;
use companion_core::ops::{self, UpdateRequest, ViewOutcome};
use companion_core::{EntryType, StorageError};
use companion_e2e_tests::harness::TestProject;
use companion_e2e_tests::mocks::TestDataFactory;
use serde_json::{json, Value};

#[test]
fn test_hand_edited_store_round_trips_byte_for_byte() {
    let project = TestProject::bare();
    let raw = project.write_store_value(&TestDataFactory::hand_edited_store());

    let store = project.store();
    project.storage.save(&store).unwrap();

    assert_eq!(project.snapshot(), raw);
}

#[test]
fn test_hand_edited_store_can_be_viewed() {
    let project = TestProject::bare();
    project.write_store_value(&TestDataFactory::hand_edited_store());

    match ops::view(&project.storage, None).unwrap() {
        ViewOutcome::Summary(summary) => {
            assert_eq!(summary.project_name.as_deref(), Some("billing"));
            assert_eq!(summary.current_version.as_deref(), Some("4"));
            assert_eq!(summary.stats.features, 2);
            assert_eq!(summary.stats.decisions, 2);
            assert_eq!(summary.stats.memories, 2);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    match ops::view(&project.storage, Some("decision_log")).unwrap() {
        ViewOutcome::Section { value, .. } => {
            assert_eq!(value[1]["date"], "sometime in March");
            assert_eq!(value[0]["rationale"], Value::Null);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_add_leaves_hand_edited_rows_alone() {
    let project = TestProject::bare();
    let original = TestDataFactory::hand_edited_store();
    project.write_store_value(&original);

    for entry_type in [EntryType::Feature, EntryType::Decision, EntryType::Session, EntryType::Bugfix] {
        project.add_interactive(&TestDataFactory::answers(entry_type, "Follow-up"));
    }

    let raw = project.raw();
    for section in ["feature_registry", "decision_log", "session_history", "detailed_memories"] {
        let before = original[section].as_array().unwrap();
        let after = raw[section].as_array().unwrap();
        assert_eq!(&after[..before.len()], &before[..], "rows of {}", section);
    }
    assert_eq!(raw["project_overview"], original["project_overview"]);
    assert_eq!(raw["team_notes"], original["team_notes"]);
    // A numeric version is carried into new features as written
    assert_eq!(raw["feature_registry"][2]["added_in_version"], "4");
}

#[test]
fn test_update_touches_only_its_keys() {
    let project = TestProject::bare();
    let original = TestDataFactory::hand_edited_store();
    project.write_store_value(&original);

    let request = UpdateRequest {
        version: Some("5.0.0".to_string()),
        focus: Some("Refund API".to_string()),
    };
    ops::update(&project.storage, &request, Utc::now()).unwrap();

    let raw = project.raw();
    let mut expected = original.clone();
    expected["project_overview"]["current_version"] = json!("5.0.0");
    expected["project_overview"]["last_updated"] = raw["project_overview"]["last_updated"].clone();
    expected["current_development_focus"]["upcoming_changes"] =
        json!(["Multi-currency", "Refund API"]);
    assert_eq!(raw, expected);

    let stamp = raw["project_overview"]["last_updated"].as_str().unwrap();
    assert!(stamp.ends_with('Z') && stamp.len() == "2024-05-01T09:00:00.000Z".len());
}

#[test]
fn test_legacy_store_gains_sections_lazily() {
    let project = TestProject::bare();
    project.write_raw_store(TestDataFactory::legacy_store());

    match ops::view(&project.storage, None).unwrap() {
        ViewOutcome::Summary(summary) => {
            assert_eq!(summary.sections, vec!["entries", "lastUpdated", "version"]);
            assert_eq!(summary.stats.memories, 0);
            assert_eq!(summary.current_version, None);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    project.add_interactive(&TestDataFactory::answers(EntryType::Decision, "Adopt JSON"));
    let request = UpdateRequest {
        version: None,
        focus: Some("Schema docs".to_string()),
    };
    ops::update(&project.storage, &request, Utc::now()).unwrap();

    let raw = project.raw();
    assert_eq!(raw["lastUpdated"], "2024-01-15T10:20:30.000Z");
    assert_eq!(raw["version"], "1.0.0");
    assert_eq!(raw["decision_log"].as_array().unwrap().len(), 1);
    assert_eq!(raw["detailed_memories"].as_array().unwrap().len(), 1);
    assert!(raw.get("feature_registry").is_none());
    assert!(raw.get("project_overview").is_none());
    assert_eq!(raw["current_development_focus"]["upcoming_changes"], json!(["Schema docs"]));
}

#[test]
fn test_setup_leaves_legacy_store_alone() {
    let project = TestProject::bare();
    project.write_raw_store(TestDataFactory::legacy_store());

    let report = project.setup(Utc::now());
    assert!(!report.memory_created);
    assert_eq!(project.snapshot(), TestDataFactory::legacy_store());
}

#[test]
fn test_corrupt_store_is_reported() {
    let project = TestProject::bare();
    project.write_raw_store("{ \"project_overview\": ");

    let err = ops::view(&project.storage, None).unwrap_err();
    assert!(matches!(err, StorageError::CorruptStore { .. }));
}

#[test]
fn test_wrong_shaped_registry_blocks_only_that_add() {
    let project = TestProject::bare();
    let raw = project.write_store_value(&json!({
        "detailed_memories": [],
        "feature_registry": "tracked in the wiki"
    }));

    let answers = TestDataFactory::answers(EntryType::Feature, "Export");
    let mut prompter = companion_core::Prompter::new(answers.as_bytes(), Vec::new());
    let request = ops::AddRequest {
        interactive: true,
        entry_type: None,
    };
    let err = ops::add(&project.storage, &request, &mut prompter, Utc::now()).unwrap_err();
    assert!(matches!(err, ops::AddError::Storage(StorageError::Section(_))));
    assert_eq!(project.snapshot(), raw);

    project.add_interactive(&TestDataFactory::answers(EntryType::Pattern, "Builder"));
    assert_eq!(project.store().stats().memories, 1);
}
