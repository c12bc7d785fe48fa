use lingo_core::{KeyValueStore, MemoryStore, User};
use lingo_store::FileStore;
use lingo_types::Language;

use crate::profile::{PROFILE_KEY, load_local_profile, save_local_profile};

#[test]
fn first_run_creates_and_persists_default_profile() {
    let store = MemoryStore::new();

    let user = load_local_profile(&store);

    assert_eq!(user.name(), "Language Learner");
    assert_eq!(user.teaching_language().code, "zh");
    assert!(store.get(PROFILE_KEY).unwrap().is_some());

    let again = load_local_profile(&store);
    assert_eq!(again.id(), user.id());
}

#[test]
fn saved_profile_is_loaded_back() {
    let store = MemoryStore::new();
    let mut user = User::new("Mei", &Language::ENGLISH, vec![&Language::GERMAN]);
    user.add_learning_language(&Language::CHINESE);
    save_local_profile(&store, &user).unwrap();

    let loaded = load_local_profile(&store);

    assert_eq!(loaded.id(), user.id());
    assert_eq!(loaded.name(), "Mei");
    assert_eq!(
        loaded.learning_languages(),
        vec![&Language::GERMAN, &Language::CHINESE]
    );
}

#[test]
fn corrupt_profile_is_replaced_by_default() {
    let store = MemoryStore::new();
    store.set(PROFILE_KEY, "{not json").unwrap();

    let user = load_local_profile(&store);

    assert_eq!(user.name(), "Language Learner");
    let raw = store.get(PROFILE_KEY).unwrap().unwrap();
    assert!(raw.contains(user.id()));
}

#[test]
fn profile_survives_reopening_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let id = {
        let store = FileStore::open(dir.path()).unwrap();
        load_local_profile(&store).id().to_string()
    };

    let store = FileStore::open(dir.path()).unwrap();
    assert_eq!(load_local_profile(&store).id(), id);
}

#[test]
fn profile_without_created_at_is_kept() {
    let store = MemoryStore::new();
    store
        .set(
            PROFILE_KEY,
            r#"{"id":"user-42","name":"Mei","teachingLanguage":"en","learningLanguages":["zh"]}"#,
        )
        .unwrap();

    let user = load_local_profile(&store);

    assert_eq!(user.id(), "user-42");
    assert_eq!(user.name(), "Mei");
}
