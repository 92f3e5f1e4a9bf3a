//! Service-level CRUD invariants, exercised directly against a temp store.

use filecrud::{CrudService, FileStore, RuleSet};
use serde_json::{json, Value};
use tempfile::TempDir;

fn record(v: Value) -> filecrud::Record {
    v.as_object().expect("test record must be an object").clone()
}

async fn open_store(dir: &TempDir) -> FileStore {
    FileStore::open(dir.path()).await.unwrap()
}

#[tokio::test]
async fn create_assigns_sequential_ids_from_one() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let rules = RuleSet::default();

    let a = CrudService::create(&store, "widgets", &rules, record(json!({"name": "x"})))
        .await
        .unwrap();
    let b = CrudService::create(&store, "widgets", &rules, record(json!({"name": "y"})))
        .await
        .unwrap();
    assert_eq!(a["id"], json!(1));
    assert_eq!(b["id"], json!(2));
}

#[tokio::test]
async fn create_overwrites_a_client_supplied_id() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    let created = CrudService::create(
        &store,
        "widgets",
        &RuleSet::default(),
        record(json!({"id": 99, "name": "x"})),
    )
    .await
    .unwrap();
    assert_eq!(created["id"], json!(1));
}

#[tokio::test]
async fn create_then_get_round_trips_the_candidate() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    let created = CrudService::create(
        &store,
        "widgets",
        &RuleSet::default(),
        record(json!({"name": "x", "tags": ["a", "b"], "nested": {"k": 1}})),
    )
    .await
    .unwrap();
    let fetched = CrudService::get_by_id(&store, "widgets", 1)
        .await
        .unwrap()
        .expect("created record must be readable");
    assert_eq!(fetched, created);
    assert_eq!(fetched["name"], json!("x"));
    assert_eq!(fetched["nested"], json!({"k": 1}));
}

#[tokio::test]
async fn failed_validation_aborts_before_any_write() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let rules = RuleSet {
        required: vec!["name".into()],
        ..RuleSet::default()
    };

    let result = CrudService::create(&store, "widgets", &rules, record(json!({}))).await;
    let Err(filecrud::AppError::Validation(errors)) = result else {
        panic!("expected validation errors");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "name");
    // No id allocated, no document created.
    assert!(!dir.path().join("widgets.json").exists());
}

#[tokio::test]
async fn replace_overwrites_the_whole_record() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let rules = RuleSet::default();
    CrudService::create(&store, "widgets", &rules, record(json!({"name": "x", "qty": 5})))
        .await
        .unwrap();

    let replaced = CrudService::replace_by_id(
        &store,
        "widgets",
        1,
        record(json!({"id": 1, "name": "x2"})),
    )
    .await
    .unwrap();
    assert_eq!(replaced["name"], json!("x2"));

    let fetched = CrudService::get_by_id(&store, "widgets", 1)
        .await
        .unwrap()
        .unwrap();
    // No partial merge: qty is gone.
    assert!(fetched.get("qty").is_none());
}

#[tokio::test]
async fn replace_with_no_match_rewrites_unchanged_and_echoes_input() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let rules = RuleSet::default();
    CrudService::create(&store, "widgets", &rules, record(json!({"name": "x"})))
        .await
        .unwrap();

    let echoed = CrudService::replace_by_id(&store, "widgets", 42, record(json!({"name": "ghost"})))
        .await
        .unwrap();
    assert_eq!(echoed["name"], json!("ghost"));

    let records = store.load("widgets").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], json!("x"));
}

#[tokio::test]
async fn delete_is_idempotent_and_removes_at_most_one() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let rules = RuleSet::default();
    CrudService::create(&store, "widgets", &rules, record(json!({"name": "x"})))
        .await
        .unwrap();
    CrudService::create(&store, "widgets", &rules, record(json!({"name": "y"})))
        .await
        .unwrap();

    CrudService::delete_by_id(&store, "widgets", 1).await.unwrap();
    assert_eq!(store.load("widgets").await.unwrap().len(), 1);
    CrudService::delete_by_id(&store, "widgets", 1).await.unwrap();
    assert_eq!(store.load("widgets").await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_preserves_order_of_remaining_records() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let rules = RuleSet::default();
    for name in ["a", "b", "c"] {
        CrudService::create(&store, "widgets", &rules, record(json!({"name": name})))
            .await
            .unwrap();
    }

    CrudService::delete_by_id(&store, "widgets", 2).await.unwrap();
    let names: Vec<_> = store
        .load("widgets")
        .await
        .unwrap()
        .iter()
        .map(|r| r["name"].clone())
        .collect();
    assert_eq!(names, vec![json!("a"), json!("c")]);
}

#[tokio::test]
async fn id_after_delete_still_moves_forward() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let rules = RuleSet::default();
    CrudService::create(&store, "widgets", &rules, record(json!({"name": "x"})))
        .await
        .unwrap();
    CrudService::create(&store, "widgets", &rules, record(json!({"name": "y"})))
        .await
        .unwrap();
    CrudService::delete_by_id(&store, "widgets", 2).await.unwrap();

    // Highest surviving id is 1, so the next id is 2 again.
    let c = CrudService::create(&store, "widgets", &rules, record(json!({"name": "z"})))
        .await
        .unwrap();
    assert_eq!(c["id"], json!(2));
}

#[tokio::test]
async fn entities_are_isolated_documents() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let rules = RuleSet::default();
    CrudService::create(&store, "widgets", &rules, record(json!({"name": "w"})))
        .await
        .unwrap();
    CrudService::create(&store, "gadgets", &rules, record(json!({"name": "g"})))
        .await
        .unwrap();

    assert_eq!(store.load("widgets").await.unwrap().len(), 1);
    assert_eq!(store.load("gadgets").await.unwrap().len(), 1);
    // Both allocate from their own sequence.
    assert_eq!(
        CrudService::get_by_id(&store, "gadgets", 1).await.unwrap().unwrap()["name"],
        json!("g")
    );
}
