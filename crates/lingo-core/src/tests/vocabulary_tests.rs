use lingo_types::Difficulty;

use crate::vocabulary::{VocabularyItem, VocabularyLesson, VocabularyManager};

fn lesson(title: &str, category: &str, language: &str, difficulty: Difficulty) -> VocabularyLesson {
    VocabularyLesson::new(title, "", category, language, difficulty)
}

fn titles(lessons: Vec<&VocabularyLesson>) -> Vec<&str> {
    lessons.into_iter().map(|l| l.title()).collect()
}

fn catalog() -> VocabularyManager {
    let mut manager = VocabularyManager::new();
    manager.add_lesson(lesson("Food", "daily", "en", Difficulty::Beginner));
    manager.add_lesson(lesson("Travel", "daily", "de", Difficulty::Intermediate));
    manager.add_lesson(lesson("Business", "work", "en", Difficulty::Advanced));
    manager
}

#[test]
fn filters_are_pure_views() {
    let manager = catalog();

    assert_eq!(titles(manager.lessons_by_language("en")), vec!["Food", "Business"]);
    assert_eq!(titles(manager.lessons_by_category("daily")), vec!["Food", "Travel"]);
    assert_eq!(
        titles(manager.lessons_by_difficulty(Difficulty::Intermediate)),
        vec!["Travel"]
    );
    assert_eq!(manager.all_lessons().len(), 3);
}

#[test]
fn get_lesson_and_upsert_by_id() {
    let mut manager = catalog();
    let mut food = manager.all_lessons()[0].clone();
    food.add_item(VocabularyItem::new("apple", "苹果"));

    manager.add_lesson(food.clone());

    assert_eq!(manager.all_lessons().len(), 3);
    assert_eq!(manager.get_lesson(food.id()).unwrap().item_count(), 1);
    assert!(manager.get_lesson("missing").is_none());
}

#[test]
fn clear_lessons_empties_catalog() {
    let mut manager = catalog();
    manager.clear_lessons();
    assert!(manager.all_lessons().is_empty());
}

#[test]
fn lesson_record_round_trip() {
    let mut food = lesson("Food", "daily", "en", Difficulty::Beginner);
    food.add_item(VocabularyItem {
        word: "apple".into(),
        translation: "苹果".into(),
        phonetic: Some("/ˈæp.əl/".into()),
        part_of_speech: Some("noun".into()),
    });

    let json = serde_json::to_value(food.to_record()).unwrap();
    assert_eq!(json["difficulty"], "beginner");
    assert_eq!(json["items"][0]["partOfSpeech"], "noun");

    let restored = VocabularyLesson::from_record(serde_json::from_value(json).unwrap());
    assert_eq!(restored, food);
}
