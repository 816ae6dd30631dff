// Tests for the Dictionary handle
// Test cases:
// - add, lookup by root, reload by id, remove: ids and nested text survive
// - add_sense on a fresh entry then remove leaves nothing behind
// - bulk import of the reference fixture keeps file order and content
// - malformed or missing import files leave the store unchanged
// - nested removals by index, with not-found and out-of-range errors
// - the in-memory backend behaves like the SQLite one

use super::*;
use tempfile::TempDir;

const WF_STR: &str = "test";
const DEF_STR: &str = "test";
const POS_STR: &str = "Noun";

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures").join("entry_list.csv")
}

/// Helper to open a dictionary in a temporary directory
fn create_test_dictionary() -> (Dictionary, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let dictionary = Dictionary::open(temp_dir.path()).unwrap();
    (dictionary, temp_dir)
}

fn test_entry() -> DictionaryEntry {
    let wf = WordForm::new(WF_STR);
    let mut ws = WordSense::new(Definition::new(DEF_STR), PartOfSpeech::new(POS_STR));
    ws.add_word_form(wf.clone());
    let mut entry = DictionaryEntry::new(wf);
    entry.add_sense(ws);
    entry
}

fn assert_test_entry(expected: &DictionaryEntry, actual: &DictionaryEntry) {
    assert_eq!(expected.id(), actual.id());
    assert_eq!(actual.root().text(), WF_STR);
    for ws in actual.senses() {
        for wf in ws.word_forms() {
            assert_eq!(wf.text(), WF_STR);
        }
    }
}

fn two_sense_entry(root: &str) -> DictionaryEntry {
    let mut entry = DictionaryEntry::new(WordForm::new(root));
    let mut first = WordSense::new(Definition::new("be upright"), PartOfSpeech::new("Verb"));
    first.add_word_form(WordForm::new(root));
    first.add_word_form(WordForm::new("stood"));
    entry.add_sense(first);
    entry.add_sense(WordSense::new(Definition::new("a small stall"), PartOfSpeech::new("Noun")));
    entry
}

#[test]
fn test_add_remove_lookup() {
    let (dictionary, _temp_dir) = create_test_dictionary();
    let entry = test_entry();

    dictionary.add_entry(&entry).unwrap();

    let reloaded = dictionary.get_entry(entry.id()).unwrap().unwrap();
    assert_test_entry(&entry, &reloaded);

    let looked_up = dictionary.lookup_by_entry(WF_STR).unwrap();
    assert_test_entry(&entry, &looked_up.unwrap());

    dictionary.remove(&entry).unwrap();
    assert!(dictionary.get_all_entries().unwrap().is_empty());
    assert!(dictionary.lookup_by_entry(WF_STR).unwrap().is_none());
}

#[test]
fn test_add_sense_then_remove_leaves_nothing() {
    let (dictionary, _temp_dir) = create_test_dictionary();
    let mut entry = test_entry();

    let mut new_ws = WordSense::new(Definition::new("supported by one's feet"), PartOfSpeech::new("Verb"));
    new_ws.add_word_form(WordForm::new("Stand"));
    dictionary.add_sense(new_ws, &mut entry).unwrap();

    let stored = dictionary.get_entry(entry.id()).unwrap().unwrap();
    assert_eq!(stored.senses().len(), 2);
    assert_eq!(stored.senses()[1].word_forms()[0].text(), "Stand");

    dictionary.remove(&entry).unwrap();
    assert_eq!(dictionary.get_all_entries().unwrap().len(), 0);
}

#[test]
fn test_add_sense_failure_restores_entry() {
    let (dictionary, _temp_dir) = create_test_dictionary();
    dictionary.add_entry(&test_entry()).unwrap();

    // Same root under another id violates root uniqueness
    let mut clash = DictionaryEntry::new(WordForm::new(WF_STR));
    let result = dictionary.add_sense(WordSense::new(Definition::new("x"), PartOfSpeech::new("Noun")), &mut clash);

    assert!(matches!(result, Err(DictionaryError::PersistenceError(_))));
    assert!(clash.senses().is_empty());
}

#[test]
fn test_add_from_file() {
    let (dictionary, _temp_dir) = create_test_dictionary();

    let loaded = dictionary.add_from_file(fixture_path()).unwrap();
    assert_eq!(loaded.len(), 5);

    let es = dictionary.get_all_entries().unwrap();
    assert_eq!(es.len(), 5);

    let expected = [
        ("run", "move at a speed faster than a walk and never have both or all the feet on the ground at the same time."),
        ("smile", "form one's features into a pleased or kind or amused expression"),
        ("dance", "move rhythmically to music"),
        ("cheese", "a food made from the pressed curds of milk"),
        ("gargle", "wash one's mouth and throat with a liquid kept in motion by exhaling through it."),
    ];
    for (entry, (root, definition)) in es.iter().zip(expected) {
        assert_eq!(entry.root().text(), root);
        let sense = entry.senses().first().expect("entry should have a sense");
        assert_eq!(sense.word_forms().len(), 1);
        assert_eq!(sense.word_forms()[0].text(), root);
        assert_eq!(sense.definition().unwrap().text(), definition);
    }

    for e in &es {
        dictionary.remove(e).unwrap();
    }
    assert_eq!(dictionary.get_all_entries().unwrap().len(), 0);
}

#[test]
fn test_add_from_file_missing() {
    let (dictionary, temp_dir) = create_test_dictionary();

    let result = dictionary.add_from_file(temp_dir.path().join("nope.csv"));

    match result {
        Err(e @ DictionaryError::ImportFileNotFound(_)) => assert!(e.is_not_found()),
        other => panic!("Expected ImportFileNotFound, got {:?}", other),
    }
}

#[test]
fn test_add_from_file_malformed_writes_nothing() {
    let (dictionary, temp_dir) = create_test_dictionary();
    let path = temp_dir.path().join("bad.csv");
    fs::write(&path, "run,move fast,Verb\nsmile\ndance,move to music,Verb\n").unwrap();

    let result = dictionary.add_from_file(&path);

    assert!(matches!(result, Err(DictionaryError::Format { line: 2, .. })));
    assert!(dictionary.get_all_entries().unwrap().is_empty());
}

#[test]
fn test_add_from_file_invalid_utf8_is_format_error() {
    let (dictionary, temp_dir) = create_test_dictionary();
    let path = temp_dir.path().join("latin1.csv");
    fs::write(&path, b"run,move fast,Verb\ncaf\xe9,a coffee house,Noun\n").unwrap();

    let result = dictionary.add_from_file(&path);

    assert!(matches!(result, Err(DictionaryError::Format { line: 2, .. })));
    assert!(dictionary.get_all_entries().unwrap().is_empty());
}

#[test]
fn test_add_from_file_duplicate_root_writes_nothing() {
    let (dictionary, temp_dir) = create_test_dictionary();
    let path = temp_dir.path().join("dup.csv");
    fs::write(&path, "run,move fast,Verb\nrun,operate,Verb\n").unwrap();

    assert!(matches!(dictionary.add_from_file(&path), Err(DictionaryError::PersistenceError(_))));
    assert!(dictionary.get_all_entries().unwrap().is_empty());
}

#[test]
fn test_remove_dictionary_entry_by_query() {
    let (dictionary, _temp_dir) = create_test_dictionary();
    dictionary.add_entry(&test_entry()).unwrap();

    let removed = dictionary.remove_dictionary_entry(WF_STR).unwrap();
    assert_eq!(removed.root().text(), WF_STR);

    match dictionary.remove_dictionary_entry(WF_STR) {
        Err(DictionaryError::EntryNotFound(query)) => assert_eq!(query, WF_STR),
        other => panic!("Expected EntryNotFound, got {:?}", other),
    }
}

#[test]
fn test_remove_word_sense() {
    let (dictionary, _temp_dir) = create_test_dictionary();
    dictionary.add_entry(&two_sense_entry("stand")).unwrap();

    let removed = dictionary.remove_word_sense("stand", 0).unwrap();
    assert_eq!(removed.definition().unwrap().text(), "be upright");

    let stored = dictionary.lookup_by_entry("stand").unwrap().unwrap();
    assert_eq!(stored.senses().len(), 1);
    assert_eq!(stored.senses()[0].definition().unwrap().text(), "a small stall");
}

#[test]
fn test_remove_word_sense_out_of_range() {
    let (dictionary, _temp_dir) = create_test_dictionary();
    dictionary.add_entry(&two_sense_entry("stand")).unwrap();

    match dictionary.remove_word_sense("stand", 2) {
        Err(DictionaryError::SenseIndexOutOfRange { query, index, len }) => {
            assert_eq!(query, "stand");
            assert_eq!(index, 2);
            assert_eq!(len, 2);
        }
        other => panic!("Expected SenseIndexOutOfRange, got {:?}", other),
    }
    assert_eq!(dictionary.lookup_by_entry("stand").unwrap().unwrap().senses().len(), 2);
}

#[test]
fn test_remove_definition_and_part_of_speech() {
    let (dictionary, _temp_dir) = create_test_dictionary();
    dictionary.add_entry(&two_sense_entry("stand")).unwrap();

    let definition = dictionary.remove_definition("stand", 1).unwrap();
    assert_eq!(definition.unwrap().text(), "a small stall");
    assert!(dictionary.remove_definition("stand", 1).unwrap().is_none());

    let pos = dictionary.remove_part_of_speech("stand", 0).unwrap();
    assert_eq!(pos.unwrap().label(), "Verb");

    let stored = dictionary.lookup_by_entry("stand").unwrap().unwrap();
    assert!(stored.senses()[1].definition().is_none());
    assert!(stored.senses()[0].part_of_speech().is_none());
    assert_eq!(stored.senses()[0].definition().unwrap().text(), "be upright");
}

#[test]
fn test_remove_word_form() {
    let (dictionary, _temp_dir) = create_test_dictionary();
    dictionary.add_entry(&two_sense_entry("stand")).unwrap();

    let removed = dictionary.remove_word_form("stand", 0, "stood").unwrap();
    assert_eq!(removed.text(), "stood");

    let stored = dictionary.lookup_by_entry("stand").unwrap().unwrap();
    let forms: Vec<&str> = stored.senses()[0].word_forms().iter().map(|wf| wf.text()).collect();
    assert_eq!(forms, vec!["stand"]);

    match dictionary.remove_word_form("stand", 0, "stood") {
        Err(e @ DictionaryError::WordFormNotFound { .. }) => assert!(e.is_not_found()),
        other => panic!("Expected WordFormNotFound, got {:?}", other),
    }
}

#[test]
fn test_set_definition_part_of_speech_and_add_word_form() {
    let (dictionary, _temp_dir) = create_test_dictionary();
    dictionary.add_entry(&two_sense_entry("stand")).unwrap();

    let old = dictionary
        .set_definition("stand", 1, Definition::new("a booth at a market"))
        .unwrap();
    assert_eq!(old.unwrap().text(), "a small stall");
    dictionary.set_part_of_speech("stand", 1, PartOfSpeech::new("Noun")).unwrap();
    dictionary.add_word_form("stand", 1, WordForm::new("stands")).unwrap();

    let duplicate = dictionary.add_word_form("stand", 1, WordForm::new("stands"));
    assert!(matches!(duplicate, Err(DictionaryError::DuplicateWordForm { .. })));

    let stored = dictionary.lookup_by_entry("stand").unwrap().unwrap();
    let sense = &stored.senses()[1];
    assert_eq!(sense.definition().unwrap().text(), "a booth at a market");
    assert_eq!(sense.word_forms().len(), 1);
}

#[test]
fn test_unknown_query_is_not_found() {
    let (dictionary, _temp_dir) = create_test_dictionary();

    for result in [
        dictionary.remove_word_sense("ghost", 0).map(|_| ()),
        dictionary.remove_definition("ghost", 0).map(|_| ()),
        dictionary.remove_part_of_speech("ghost", 0).map(|_| ()),
        dictionary.remove_word_form("ghost", 0, "ghost").map(|_| ()),
    ] {
        assert!(matches!(result, Err(DictionaryError::EntryNotFound(_))));
    }
}

#[test]
fn test_remove_unsaved_entry_is_not_found() {
    let (dictionary, _temp_dir) = create_test_dictionary();

    let result = dictionary.remove(&test_entry());

    assert!(matches!(result, Err(DictionaryError::EntryNotFound(_))));
}

#[test]
fn test_entries_persist_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let entry = test_entry();
    {
        let dictionary = Dictionary::open(temp_dir.path()).unwrap();
        dictionary.add_entry(&entry).unwrap();
    }

    let dictionary = Dictionary::open(temp_dir.path()).unwrap();
    let reloaded = dictionary.get_entry(entry.id()).unwrap().unwrap();
    assert_eq!(reloaded, entry);
}

#[test]
fn test_in_memory_dictionary() {
    let dictionary = Dictionary::in_memory().unwrap();
    let entry = test_entry();

    dictionary.add_entry(&entry).unwrap();
    assert_test_entry(&entry, &dictionary.lookup_by_entry(WF_STR).unwrap().unwrap());
    dictionary.remove_definition(WF_STR, 0).unwrap();
    assert!(dictionary.get_entry(entry.id()).unwrap().unwrap().senses()[0].definition().is_none());
    dictionary.remove(&entry).unwrap();
    assert!(dictionary.get_all_entries().unwrap().is_empty());
}

#[tokio::test]
async fn test_dictionary_usable_inside_current_thread_runtime() {
    let (dictionary, _temp_dir) = create_test_dictionary();
    let entry = test_entry();

    dictionary.add_entry(&entry).unwrap();

    assert_test_entry(&entry, &dictionary.lookup_by_entry(WF_STR).unwrap().unwrap());
    dictionary.remove(&entry).unwrap();
    assert!(dictionary.get_all_entries().unwrap().is_empty());
}
