//! Store lifecycle integration tests
//!
//! - File-backed database: data survives reopening, migrations re-run cleanly
//! - Product tree: capabilities, initiatives, and task counts across both
//! - Dependency chain: blocking edges resolve as tasks finish

use tempfile::TempDir;

use stride_core::enums::{ClaimKind, ProductRight, TaskStatus};
use stride_core::inputs::{CapabilityInput, InitiativeInput, ProductInput, TaskInput};
use stride_db::service::StrideService;

fn product(name: &str) -> ProductInput {
    ProductInput {
        slug: None,
        name: name.to_string(),
        short_description: "Work tracking".to_string(),
        full_description: None,
        website: "https://example.com".to_string(),
        video_url: None,
        is_private: Some(false),
    }
}

fn task(title: &str) -> TaskInput {
    serde_json::from_value(serde_json::json!({
        "title": title,
        "description": format!("{title} in detail"),
        "product_slug": "tracker",
        "reviewer": "ada",
    }))
    .unwrap()
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn file_database_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stride.db");
    let path = path.to_str().unwrap();

    {
        let svc = StrideService::new_local(path).await.unwrap();
        let ada = svc.create_person("ada", Some("Ada")).await.unwrap();
        svc.create_product(&product("Tracker"), Some(ada.id)).await.unwrap();
        svc.create_task(&task("Persist me")).await.unwrap();
    }

    let svc = StrideService::new_local(path).await.unwrap();
    let tasks = svc.list_tasks(10).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Persist me");
    assert_eq!(svc.get_product_by_slug("tracker").await.unwrap().name, "Tracker");
}

// ---------------------------------------------------------------------------
// Product tree
// ---------------------------------------------------------------------------

#[tokio::test]
async fn product_counts_span_capabilities_and_initiatives() {
    let svc = StrideService::new_local(":memory:").await.unwrap();
    let ada = svc.create_person("ada", Some("Ada")).await.unwrap();
    let tracker = svc.create_product(&product("Tracker"), Some(ada.id)).await.unwrap();

    let root = svc
        .create_capability(&CapabilityInput {
            node_id: None,
            product_slug: Some("tracker".into()),
            name: "Tracker".into(),
            description: "Everything".into(),
            video_link: None,
            attachments: None,
        })
        .await
        .unwrap();
    let boards = svc
        .create_capability(&CapabilityInput {
            node_id: Some(root.id),
            product_slug: None,
            name: "Boards".into(),
            description: "Kanban boards".into(),
            video_link: None,
            attachments: None,
        })
        .await
        .unwrap();
    let launch = svc
        .create_initiative(&InitiativeInput {
            name: "Launch".into(),
            product_slug: Some("tracker".into()),
            description: None,
            status: None,
            video_url: None,
        })
        .await
        .unwrap();

    // Under the tree only.
    let mut input = task("Drag cards");
    input.capability = Some(boards.id);
    svc.create_task(&input).await.unwrap();

    // Under the tree and the initiative; counted once.
    let mut input = task("Board onboarding");
    input.capability = Some(boards.id);
    input.initiative = Some(launch.id);
    input.status = Some(TaskStatus::Available.code());
    svc.create_task(&input).await.unwrap();

    // Under the initiative only.
    let mut input = task("Launch post");
    input.initiative = Some(launch.id);
    svc.create_task(&input).await.unwrap();

    // Published under the product but attached to neither.
    svc.create_task(&task("Loose end")).await.unwrap();

    assert_eq!(svc.count_total_product_tasks(tracker.id).await.unwrap(), 3);
    assert_eq!(svc.count_available_product_tasks(tracker.id).await.unwrap(), 1);
    assert_eq!(svc.list_capability_tasks(boards.id).await.unwrap().len(), 2);
    assert_eq!(svc.list_capability_listings(boards.id).await.unwrap().len(), 2);
    assert_eq!(
        svc.get_product_by_capability_start(root.id).await.unwrap().id,
        tracker.id
    );
}

// ---------------------------------------------------------------------------
// Dependencies, claims, rights
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dependency_chain_unblocks_as_tasks_finish() {
    let svc = StrideService::new_local(":memory:").await.unwrap();
    let ada = svc.create_person("ada", Some("Ada")).await.unwrap();
    let tracker = svc.create_product(&product("Tracker"), Some(ada.id)).await.unwrap();
    svc.add_product_person(tracker.id, ada.id, ProductRight::Owner)
        .await
        .unwrap();

    let schema = svc.create_task(&task("Schema")).await.unwrap();
    let api = svc.create_task(&task("API")).await.unwrap();
    svc.add_task_dependency(api.id, schema.id).await.unwrap();

    assert!(svc.has_active_dependencies(api.id).await.unwrap());

    svc.add_claim(schema.id, ada.id, ClaimKind::Done).await.unwrap();
    svc.set_task_status(schema.id, TaskStatus::Done).await.unwrap();

    assert!(!svc.has_active_dependencies(api.id).await.unwrap());
    assert!(svc
        .has_product_right(tracker.id, ada.id, &ProductRight::EDITORS)
        .await
        .unwrap());
    let listing = svc.get_listing_for_task(schema.id).await.unwrap();
    assert_eq!(listing.status, TaskStatus::Done.code());
    assert!(listing.assigned_to_data.is_some());
}
