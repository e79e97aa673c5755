use super::{MemoryModelStore, RecordingLog};
use crate::usecase::catalog::DEFAULT_BASE_URL;
use crate::usecase::CatalogUseCase;
use common::domain::{ModelRecord, StoreDocument};
use std::sync::Arc;

fn document() -> StoreDocument {
    let mut doc = StoreDocument::starter();
    let mut terraced = ModelRecord::new("terraced-scene");
    terraced.name = "Terraced Scene".to_string();
    terraced.src = "models/terraced-scene.glb".to_string();
    doc.upsert(terraced);
    doc
}

fn catalog_use_case(doc: StoreDocument, base_url: Option<&str>) -> (CatalogUseCase, Arc<RecordingLog>) {
    let log = Arc::new(RecordingLog::default());
    let use_case = CatalogUseCase::new(
        Arc::new(MemoryModelStore::with(doc)),
        log.clone(),
        base_url.map(str::to_string),
    );
    (use_case, log)
}

#[test]
fn test_list_hides_template() {
    let (use_case, _) = catalog_use_case(document(), None);
    let catalog = use_case.load().unwrap();
    let ids: Vec<String> = catalog.list().iter().map(|m| m.id.to_string()).collect();
    assert_eq!(ids, vec!["terraced-scene".to_string()]);
    // テンプレート自体は ID 指定で取得できる
    assert!(catalog.get("client-model-template").is_some());
}

#[test]
fn test_base_url_precedence() {
    let mut doc = document();
    doc.base_url = Some("https://doc.example.com/ar/".to_string());

    let (use_case, _) = catalog_use_case(doc.clone(), Some("https://cli.example.com"));
    assert_eq!(
        use_case.load().unwrap().url("terraced-scene").as_deref(),
        Some("https://cli.example.com/model.html?id=terraced-scene")
    );

    let (use_case, _) = catalog_use_case(doc, None);
    assert_eq!(
        use_case.load().unwrap().url("terraced-scene").as_deref(),
        Some("https://doc.example.com/ar/model.html?id=terraced-scene")
    );

    let (use_case, _) = catalog_use_case(document(), None);
    assert_eq!(use_case.load().unwrap().base_url, DEFAULT_BASE_URL);
}

#[test]
fn test_unknown_id_is_none_and_warned() {
    let (use_case, log) = catalog_use_case(document(), None);
    let catalog = use_case.load().unwrap();
    assert!(catalog.get("nope").is_none());
    assert!(catalog.url("nope").is_none());
    assert!(log.messages().contains(&"model not found".to_string()));
}

#[test]
fn test_url_for_unknown_id_logs_not_found() {
    let (use_case, log) = catalog_use_case(document(), None);
    let catalog = use_case.load().unwrap();
    assert_eq!(catalog.url("nope"), None);
    let records = log.records.lock().unwrap();
    let warn = records
        .iter()
        .find(|r| r.message == "model not found")
        .expect("not-found warn record");
    assert_eq!(warn.kind.as_deref(), Some("lookup"));
    assert_eq!(
        warn.fields.as_ref().and_then(|f| f.get("id")),
        Some(&serde_json::Value::from("nope"))
    );
}

#[test]
fn test_url_for_known_id_does_not_warn() {
    let (use_case, log) = catalog_use_case(document(), Some("https://ar.example.com"));
    let catalog = use_case.load().unwrap();
    assert_eq!(
        catalog.url("terraced-scene").as_deref(),
        Some("https://ar.example.com/model.html?id=terraced-scene")
    );
    assert!(!log.messages().contains(&"model not found".to_string()));
}
