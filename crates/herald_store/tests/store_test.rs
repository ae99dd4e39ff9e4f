//! Integration tests for the guild store: identity reconciliation, macro
//! CRUD, configuration records, durability, and cross-process visibility.

use herald_core::{AccessPolicy, GuildIdentity, Requester};
use herald_error::{HeraldErrorKind, MacroErrorKind, StorageErrorKind};
use herald_store::GuildStore;
use std::path::Path;
use std::time::Duration;

const GUILD_ID: u64 = 123456789012345678;

fn test_policy() -> AccessPolicy {
    AccessPolicy {
        admin_roles: vec!["admin".to_string()],
        admin_permissions: vec!["administrator".to_string()],
    }
}

fn guild(name: &str) -> GuildIdentity {
    GuildIdentity::new(GUILD_ID, name).unwrap()
}

fn member() -> Requester {
    Requester::new(42, "maker", vec!["member".to_string()], vec![])
}

fn admin() -> Requester {
    Requester::new(7, "boss", vec!["Admin".to_string()], vec![])
}

fn guild_dirs(data_dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(data_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn display_name_change_renames_directory_and_keeps_content() {
    let tmp = tempfile::tempdir().unwrap();
    let store = GuildStore::new(tmp.path(), test_policy()).unwrap();

    store
        .create_macro(&guild("Aurora Keepers!"), "Welcome", "hi", &member())
        .await
        .unwrap();
    assert_eq!(
        guild_dirs(tmp.path()),
        vec![format!("Aurora_Keepers_{GUILD_ID}")]
    );

    // Same guild id, new display name: exactly one directory afterwards,
    // renamed, with the macro intact.
    let renamed = guild("The Aurora Hangout");
    let fetched = store.get_macro(&renamed, "welcome").await.unwrap();
    assert_eq!(fetched.message, "hi");
    assert_eq!(
        guild_dirs(tmp.path()),
        vec![format!("The_Aurora_Hangout_{GUILD_ID}")]
    );
}

#[tokio::test]
async fn resolve_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let store = GuildStore::new(tmp.path(), test_policy()).unwrap();

    let g = guild("Stable Name");
    let first = store.resolve_guild_dir(&g).await.unwrap();
    let second = store.resolve_guild_dir(&g).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(guild_dirs(tmp.path()).len(), 1);
}

#[tokio::test]
async fn empty_sanitized_name_falls_back_to_placeholder() {
    let tmp = tempfile::tempdir().unwrap();
    let store = GuildStore::new(tmp.path(), test_policy()).unwrap();

    store.resolve_guild_dir(&guild("!!!")).await.unwrap();
    assert_eq!(guild_dirs(tmp.path()), vec![format!("guild_{GUILD_ID}")]);
}

#[tokio::test]
async fn create_then_get_is_case_insensitive() {
    let tmp = tempfile::tempdir().unwrap();
    let store = GuildStore::new(tmp.path(), test_policy()).unwrap();
    let g = guild("Case Town");

    let created = store
        .create_macro(&g, "Welcome", "hi", &member())
        .await
        .unwrap();
    assert_eq!(created.created_by, 42);
    assert_eq!(created.created_by_name, "maker");

    for variant in ["welcome", "WELCOME", "WeLcOmE"] {
        let fetched = store.get_macro(&g, variant).await.unwrap();
        assert_eq!(fetched, created);
    }
}

#[tokio::test]
async fn duplicate_create_fails_in_any_case() {
    let tmp = tempfile::tempdir().unwrap();
    let store = GuildStore::new(tmp.path(), test_policy()).unwrap();
    let g = guild("Case Town");

    store
        .create_macro(&g, "Welcome", "hi", &member())
        .await
        .unwrap();
    let err = store
        .create_macro(&g, "WELCOME", "other", &member())
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        HeraldErrorKind::Macro(e) if matches!(&e.kind, MacroErrorKind::DuplicateName(_))
    ));
}

#[tokio::test]
async fn delete_without_admin_is_forbidden_and_leaves_set_unchanged() {
    let tmp = tempfile::tempdir().unwrap();
    let store = GuildStore::new(tmp.path(), test_policy()).unwrap();
    let g = guild("Guarded");

    store
        .create_macro(&g, "Welcome", "hi", &member())
        .await
        .unwrap();
    let err = store
        .delete_macro(&g, "welcome", &member())
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), HeraldErrorKind::Access(_)));

    // Still present.
    assert!(store.get_macro(&g, "Welcome").await.is_ok());
}

#[tokio::test]
async fn admin_delete_removes_the_macro() {
    let tmp = tempfile::tempdir().unwrap();
    let store = GuildStore::new(tmp.path(), test_policy()).unwrap();
    let g = guild("Guarded");

    store
        .create_macro(&g, "Welcome", "hi", &member())
        .await
        .unwrap();
    store.delete_macro(&g, "welcome", &admin()).await.unwrap();

    let err = store.get_macro(&g, "welcome").await.unwrap_err();
    assert!(matches!(
        err.kind(),
        HeraldErrorKind::Macro(e) if matches!(&e.kind, MacroErrorKind::NotFound(_))
    ));
}

#[tokio::test]
async fn delete_missing_macro_as_admin_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let store = GuildStore::new(tmp.path(), test_policy()).unwrap();

    let err = store
        .delete_macro(&guild("Guarded"), "ghost", &admin())
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), HeraldErrorKind::Macro(_)));
}

#[tokio::test]
async fn list_is_sorted_and_stable() {
    let tmp = tempfile::tempdir().unwrap();
    let store = GuildStore::new(tmp.path(), test_policy()).unwrap();
    let g = guild("Sorted");

    for name in ["zulu", "alpha", "mike"] {
        store.create_macro(&g, name, "m", &member()).await.unwrap();
    }

    let names = |macros: Vec<herald_core::Macro>| -> Vec<String> {
        macros.into_iter().map(|m| m.name).collect()
    };
    let first = names(store.list_macros(&g).await.unwrap());
    assert_eq!(first, vec!["alpha", "mike", "zulu"]);

    let second = names(store.list_macros(&g).await.unwrap());
    assert_eq!(first, second);
}

#[tokio::test]
async fn leftover_temp_file_does_not_shadow_the_record() {
    let tmp = tempfile::tempdir().unwrap();
    let store = GuildStore::new(tmp.path(), test_policy()).unwrap();
    let g = guild("Crashy");

    store
        .create_macro(&g, "Welcome", "hi", &member())
        .await
        .unwrap();

    // Simulate a crash between temp-write and rename: only the temp file
    // carries the half-finished write.
    let dir = store.resolve_guild_dir(&g).await.unwrap();
    let temp = dir.join(format!("{GUILD_ID}_macros.tmp"));
    std::fs::write(&temp, b"{ partial garbage").unwrap();

    let fetched = store.get_macro(&g, "welcome").await.unwrap();
    assert_eq!(fetched.message, "hi");
}

#[tokio::test]
async fn corrupt_record_is_quarantined_then_reads_as_empty() {
    let tmp = tempfile::tempdir().unwrap();
    let store = GuildStore::new(tmp.path(), test_policy()).unwrap();
    let g = guild("Broken");

    let dir = store.resolve_guild_dir(&g).await.unwrap();
    let record_path = dir.join(format!("{GUILD_ID}_macros.json"));
    std::fs::write(&record_path, b"not json at all").unwrap();

    let err = store.list_macros(&g).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        HeraldErrorKind::Storage(e) if matches!(&e.kind, StorageErrorKind::CorruptRecord { .. })
    ));

    // Original bytes preserved, record file moved aside.
    let backup = dir.join(format!("{GUILD_ID}_macros.bak"));
    assert_eq!(std::fs::read(&backup).unwrap(), b"not json at all");
    assert!(!record_path.exists());

    // Next read proceeds from an empty set.
    assert!(store.list_macros(&g).await.unwrap().is_empty());
}

#[tokio::test]
async fn legacy_plain_string_records_are_upgraded_on_read() {
    let tmp = tempfile::tempdir().unwrap();
    let store = GuildStore::new(tmp.path(), test_policy()).unwrap();
    let g = guild("Old Timer");

    let dir = store.resolve_guild_dir(&g).await.unwrap();
    std::fs::write(
        dir.join(format!("{GUILD_ID}_macros.json")),
        br#"{"greet": "hello there"}"#,
    )
    .unwrap();

    let fetched = store.get_macro(&g, "greet").await.unwrap();
    assert_eq!(fetched.message, "hello there");
    assert_eq!(fetched.created_by, 0);
    assert_eq!(fetched.created_by_name, "unknown");
}

#[tokio::test]
async fn second_process_observes_writes_via_mtime() {
    let tmp = tempfile::tempdir().unwrap();
    let writer = GuildStore::new(tmp.path(), test_policy()).unwrap();
    let reader = GuildStore::new(tmp.path(), test_policy()).unwrap();
    let g = guild("Shared");

    writer
        .create_macro(&g, "first", "1", &member())
        .await
        .unwrap();
    assert_eq!(reader.list_macros(&g).await.unwrap().len(), 1);

    // Give the second write a distinct mtime before invalidation kicks in.
    tokio::time::sleep(Duration::from_millis(50)).await;
    writer
        .create_macro(&g, "second", "2", &member())
        .await
        .unwrap();
    assert_eq!(reader.list_macros(&g).await.unwrap().len(), 2);
}

#[tokio::test]
async fn config_defaults_toggle_and_persist() {
    let tmp = tempfile::tempdir().unwrap();
    let store = GuildStore::new(tmp.path(), test_policy()).unwrap();
    let g = guild("Configured");

    assert!(store.get_config(&g).await.unwrap().temperature_enabled());

    store.set_temperature_enabled(&g, false).await.unwrap();
    assert!(!store.get_config(&g).await.unwrap().temperature_enabled());

    // A fresh store (fresh process) reads the persisted value.
    let fresh = GuildStore::new(tmp.path(), test_policy()).unwrap();
    assert!(!fresh.get_config(&g).await.unwrap().temperature_enabled());
}

#[tokio::test]
async fn unknown_config_keys_survive_writes() {
    let tmp = tempfile::tempdir().unwrap();
    let store = GuildStore::new(tmp.path(), test_policy()).unwrap();
    let g = guild("Forward Compatible");

    let dir = store.resolve_guild_dir(&g).await.unwrap();
    let config_path = dir.join(format!("{GUILD_ID}_config.json"));
    std::fs::write(
        &config_path,
        br#"{"events": {"temperature": {"enabled": false}}, "dashboard": {"theme": "dark"}}"#,
    )
    .unwrap();

    store.set_temperature_enabled(&g, true).await.unwrap();

    let written: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&config_path).unwrap()).unwrap();
    assert_eq!(written["dashboard"]["theme"], "dark");
    assert_eq!(written["events"]["temperature"]["enabled"], true);
}

#[tokio::test]
async fn the_welcome_scenario_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let store = GuildStore::new(tmp.path(), test_policy()).unwrap();
    let g = guild("Aurora Keepers!");

    let author = Requester::new(42, "helper", vec![], vec![]);
    store.create_macro(&g, "Welcome", "hi", &author).await.unwrap();
    assert_eq!(
        guild_dirs(tmp.path()),
        vec![format!("Aurora_Keepers_{GUILD_ID}")]
    );

    let fetched = store.get_macro(&g, "welcome").await.unwrap();
    assert_eq!(fetched.message, "hi");
    assert_eq!(fetched.created_by, 42);

    let no_admin = Requester::new(9, "pleb", vec!["member".to_string()], vec![]);
    let err = store.delete_macro(&g, "welcome", &no_admin).await.unwrap_err();
    assert!(matches!(err.kind(), HeraldErrorKind::Access(_)));

    store.delete_macro(&g, "welcome", &admin()).await.unwrap();
    let err = store.get_macro(&g, "welcome").await.unwrap_err();
    assert!(matches!(
        err.kind(),
        HeraldErrorKind::Macro(e) if matches!(&e.kind, MacroErrorKind::NotFound(_))
    ));
}
