//! Tests of the path from the store to the displayed task list

use chrono::NaiveDate;

use daybook::cache::Cache;
use daybook::clock::FixedClock;
use daybook::storage::MemorySlots;
use daybook::{Action, Outcome, Priority, TaskDraft, TaskStore};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn new_store() -> TaskStore<MemorySlots> {
    TaskStore::open_with_clock(Cache::new(MemorySlots::new()), FixedClock::new(today()))
}

fn add(store: &mut TaskStore<MemorySlots>, draft: TaskDraft) -> daybook::TaskId {
    match store.dispatch(Action::Add(draft)).unwrap() {
        Outcome::Added(id) => id,
        other => panic!("Unexpected outcome {:?}", other),
    }
}

#[test]
fn grouped_view_follows_display_order() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut store = new_store();
    let tomorrow = today().succ_opt().unwrap();
    let far = NaiveDate::from_ymd_opt(2099, 1, 1).unwrap();

    add(&mut store, TaskDraft::new("far away").on(far));
    add(&mut store, TaskDraft::new("low").on(today()).with_priority(Priority::Low));
    let done = add(&mut store, TaskDraft::new("done").on(today()).with_priority(Priority::High));
    add(&mut store, TaskDraft::new("high").on(today()).with_priority(Priority::High));
    add(&mut store, TaskDraft::new("tomorrow").on(tomorrow));
    store.dispatch(Action::ToggleCompletion(done)).unwrap();

    let view = store.grouped();
    let layout: Vec<(NaiveDate, Vec<&str>)> = view.iter()
        .map(|bucket| (bucket.date(), bucket.tasks().iter().map(|t| t.name()).collect()))
        .collect();
    assert_eq!(layout, vec![
        (today(), vec!["high", "low", "done"]),
        (tomorrow, vec!["tomorrow"]),
        (far, vec!["far away"]),
    ]);

    // Insertion order is untouched
    let names: Vec<&str> = store.tasks().iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["far away", "low", "done", "high", "tomorrow"]);
}

#[test]
fn markup_is_escaped_and_labelled() {
    let mut store = new_store();
    assert_eq!(store.render_html(), "");

    add(&mut store, TaskDraft::new("<script>").on(NaiveDate::from_ymd_opt(2099, 1, 1).unwrap()).with_description("'quoted'"));
    add(&mut store, TaskDraft::new("Today's job"));

    let html = store.render_html();
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("&#039;quoted&#039;"));
    assert!(html.contains("Today&#039;s job"));
    assert!(html.contains(r#"<span class="date-label">Today</span>"#));
    assert!(html.contains(r#"<span class="date-label">Thursday, January 1, 2099</span>"#));
    assert!(html.find("Today&#039;s job").unwrap() < html.find("&lt;script&gt;").unwrap());
}

#[test]
fn every_mutation_asks_for_a_render() {
    let mut store = new_store();
    let mut receiver = store.subscribe();

    let id = add(&mut store, TaskDraft::new("A"));
    assert!(receiver.has_changed().unwrap());
    assert_eq!(receiver.borrow_and_update().revision, 1);
    assert!(receiver.has_changed().unwrap() == false);

    store.dispatch(Action::Remove(id.clone())).unwrap();
    store.dispatch(Action::Remove(id)).unwrap();
    assert!(receiver.has_changed().unwrap());
    let signal = *receiver.borrow_and_update();
    assert_eq!(signal.revision, 3);
    assert!(signal.persisted);

    assert!(store.dispatch(Action::Add(TaskDraft::new(" "))).is_err());
    assert!(receiver.has_changed().unwrap() == false);
}
