use session_notes_core::{
    classify, sort_by_timestamp, ManualTimeSource, NoteCategory, NoteId, NoteStore, NoteType,
    NoteTypeRegistry, SortDirection,
};

fn observation() -> NoteType {
    NoteTypeRegistry::builtin().resolve_or_first("Observation")
}

#[test]
fn size_tracks_adds_minus_successful_deletes() {
    let clock = ManualTimeSource::new(0);
    let mut store = NoteStore::with_time_source(clock.clone());
    let mut live: Vec<NoteId> = Vec::new();
    let mut expected = 0usize;

    for step in 0..40 {
        clock.advance(1_000);
        if step % 3 == 2 {
            let target = live.remove(0);
            assert!(store.delete_note(target));
            expected -= 1;
        } else {
            live.push(store.add_note(format!("note {step}"), observation()).id);
            expected += 1;
        }
        assert_eq!(store.len(), expected);
    }

    let missing = NoteId::generate();
    assert!(!store.delete_note(missing));
    assert_eq!(store.len(), expected);
}

#[test]
fn ids_are_unique() {
    let mut store = NoteStore::with_time_source(ManualTimeSource::new(0));
    let mut ids: Vec<NoteId> = (0..100)
        .map(|idx| store.add_note(format!("{idx}"), observation()).id)
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 100);
}

#[test]
fn sort_is_stable_for_equal_timestamps_in_both_directions() {
    let clock = ManualTimeSource::new(10_000);
    let mut store = NoteStore::with_time_source(clock.clone());
    let early = store.add_note("early", observation()).id;
    clock.set(20_000);
    let a = store.add_note("A", observation()).id;
    let b = store.add_note("B", observation()).id;
    clock.set(30_000);
    let late = store.add_note("late", observation()).id;

    let ascending: Vec<NoteId> = sort_by_timestamp(&store, SortDirection::Ascending)
        .into_iter()
        .map(|note| note.id)
        .collect();
    assert_eq!(ascending, vec![early, a, b, late]);

    let descending: Vec<NoteId> = sort_by_timestamp(&store, SortDirection::Descending)
        .into_iter()
        .map(|note| note.id)
        .collect();
    assert_eq!(descending, vec![late, a, b, early]);
}

#[test]
fn projections_do_not_mutate_store() {
    let clock = ManualTimeSource::new(500);
    let mut store = NoteStore::with_time_source(clock.clone());
    store.add_note("second", observation());
    clock.set(100);
    store.add_note("first", observation());

    let before: Vec<String> = store.iter().map(|note| note.content.clone()).collect();
    let _ = sort_by_timestamp(&store, SortDirection::Ascending);
    let after: Vec<String> = store.iter().map(|note| note.content.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn image_content_is_drawing_regardless_of_type() {
    let mut store = NoteStore::with_time_source(ManualTimeSource::new(0));
    let risk = NoteTypeRegistry::builtin().resolve_or_first("Risk");
    let note = store.add_note("data:image/png;base64,AAAA", risk).clone();
    assert_eq!(note.category, Some(NoteCategory::Drawing));
    assert_eq!(classify(&note).category, NoteCategory::Drawing);
}

#[test]
fn exercise_type_name_classifies_as_exercise() {
    let mut store = NoteStore::with_time_source(ManualTimeSource::new(0));
    let exercise_type = NoteType::new("custom", "Grounding exercise", "#000000", "leaf");
    let note = store.add_note("5-4-3-2-1 done", exercise_type).clone();
    assert_eq!(classify(&note).category, NoteCategory::Exercise);
}

#[test]
fn classification_is_independent_of_call_order() {
    let mut store = NoteStore::with_time_source(ManualTimeSource::new(0));
    store.add_note("calm", observation());
    store.add_note("data:image/png;base64,AAAA", observation());
    store.add_note("Exercise started: Breathing", observation());

    let forward: Vec<NoteCategory> = store.iter().map(|note| classify(note).category).collect();
    let mut backward: Vec<NoteCategory> = store
        .iter()
        .rev()
        .map(|note| classify(note).category)
        .collect();
    backward.reverse();
    assert_eq!(forward, backward);
    assert_eq!(
        forward,
        vec![
            NoteCategory::Standard,
            NoteCategory::Drawing,
            NoteCategory::Exercise
        ]
    );
}

#[test]
fn untagged_notes_fall_back_to_sniffing() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "content": "Übung gestartet: Atmung",
        "type": {
            "id": "observation",
            "name": "Observation",
            "color": "#3b82f6",
            "icon": "eye",
            "visible": true
        },
        "timestamp": 1000,
        "created_at": 1000,
        "updated_at": 1000
    });
    let note: session_notes_core::Note = serde_json::from_value(value).unwrap();
    assert_eq!(note.category, None);
    assert_eq!(classify(&note).category, NoteCategory::Exercise);

    let json = serde_json::to_value(&note).unwrap();
    assert!(json.get("category").is_none());
    assert_eq!(json["type"]["name"], "Observation");
}
