use std::sync::Arc;

use mockall::predicate;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::api::MockTaskApi;
use crate::models::NoticeKind;

use super::*;

fn setup(api: MockTaskApi) -> (TaskController, UnboundedReceiver<NoticeMessage>) {
    let (tx, rx) = mpsc::unbounded_channel::<NoticeMessage>();
    (TaskController::new(Arc::new(api), Arc::new(tx)), rx)
}

fn drain(rx: &mut UnboundedReceiver<NoticeMessage>) -> Vec<NoticeMessage> {
    let mut notices = vec![];
    while let Ok(notice) = rx.try_recv() {
        notices.push(notice);
    }
    notices
}

fn expect_list(api: &mut MockTaskApi, tasks: Vec<Task>) {
    api.expect_list_tasks().times(1).returning(move || {
        let tasks = tasks.clone();
        Box::pin(async move { Ok(tasks) })
    });
}

#[tokio::test]
async fn test_add_rejects_blank_fields() {
    // No expectations registered: any API call would panic.
    let (controller, mut rx) = setup(MockTaskApi::new());

    controller.add("", "Haute").await;
    controller.add("Walk the dog", "").await;
    controller.add("   ", "Haute").await;

    let notices = drain(&mut rx);
    assert_eq!(notices.len(), 3);
    for notice in &notices {
        assert_eq!(notice.kind(), NoticeKind::Error);
        assert_eq!(notice.message(), "All fields are required");
    }
    assert!(controller.tasks().is_empty());
}

#[tokio::test]
async fn test_add_resynchronizes_from_server() {
    let draft = Task::new("Walk the dog", "Haute");
    let server_list = vec![
        Task::new("Walk the dog", "Haute").with_id(4),
        Task::new("Buy milk", "Basse").with_id(5),
    ];

    let mut api = MockTaskApi::new();
    let created = draft.clone().with_id(4);
    api.expect_create_task()
        .with(predicate::eq(draft))
        .times(1)
        .returning(move |_| {
            let created = created.clone();
            Box::pin(async move { Ok(created) })
        });
    expect_list(&mut api, server_list.clone());

    let (controller, mut rx) = setup(api);
    controller.add("Walk the dog", "Haute").await;

    // The snapshot is whatever the server returned, not a local append.
    assert_eq!(controller.tasks(), server_list);

    let notices = drain(&mut rx);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0], NoticeMessage::info("Task added: Walk the dog"));
}

#[tokio::test]
async fn test_add_transport_failure_is_swallowed() {
    let mut api = MockTaskApi::new();
    api.expect_create_task()
        .times(1)
        .returning(|_| Box::pin(async { Err(eyre::eyre!("connection reset")) }));

    let (controller, mut rx) = setup(api);
    controller.add("Walk the dog", "Haute").await;

    // No refresh, no notice, snapshot untouched.
    assert!(controller.tasks().is_empty());
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_remove_resynchronizes_and_notifies_once() {
    let initial = vec![Task::new("A", "Haute").with_id(1)];

    let mut api = MockTaskApi::new();
    let mut seq = mockall::Sequence::new();
    let first = initial.clone();
    api.expect_list_tasks()
        .times(1)
        .in_sequence(&mut seq)
        .returning(move || {
            let first = first.clone();
            Box::pin(async move { Ok(first) })
        });
    api.expect_delete_task()
        .with(predicate::eq(1u64))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Box::pin(async { Ok(()) }));
    api.expect_list_tasks()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Box::pin(async { Ok(vec![]) }));

    let (controller, mut rx) = setup(api);
    controller.refresh().await;
    assert_eq!(controller.tasks(), initial);

    controller.remove(1).await;

    assert!(controller.tasks().is_empty());
    let notices = drain(&mut rx);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0], NoticeMessage::info("Task deleted"));
}

#[tokio::test]
async fn test_toggle_status_replaces_and_stays_silent() {
    let task = Task::new("A", "Haute").with_id(3).with_status(Status::Done);
    let expected = task.clone().with_status(Status::Cancelled);

    let mut api = MockTaskApi::new();
    let replaced = expected.clone();
    api.expect_replace_task()
        .with(predicate::eq(3u64), predicate::eq(expected.clone()))
        .times(1)
        .returning(move |_, _| {
            let replaced = replaced.clone();
            Box::pin(async move { Ok(replaced) })
        });
    let after = vec![expected.clone()];
    expect_list(&mut api, after.clone());

    let (controller, mut rx) = setup(api);
    controller.toggle_status(&task).await;

    assert_eq!(controller.tasks(), after);
    // Toggling never emits a notice.
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_update_replaces_fields_verbatim() {
    let updated = Task::new("B", "Moyenne").with_id(2).with_status(Status::Done);

    let mut api = MockTaskApi::new();
    let replaced = updated.clone();
    api.expect_replace_task()
        .with(predicate::eq(2u64), predicate::eq(updated.clone()))
        .times(1)
        .returning(move |_, _| {
            let replaced = replaced.clone();
            Box::pin(async move { Ok(replaced) })
        });
    let after = vec![updated.clone()];
    expect_list(&mut api, after.clone());

    let (controller, mut rx) = setup(api);
    controller.update(2, "B", "Moyenne", Status::Done).await;

    assert_eq!(controller.tasks(), after);
    let notices = drain(&mut rx);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0], NoticeMessage::info("Task updated: B"));
}

#[tokio::test]
async fn test_update_rejects_blank_fields() {
    let (controller, mut rx) = setup(MockTaskApi::new());

    controller.update(1, "", "Haute", Status::Done).await;
    controller.update(1, "B", "  ", Status::Done).await;

    let notices = drain(&mut rx);
    assert_eq!(notices.len(), 2);
    assert!(notices.iter().all(|n| n.kind() == NoticeKind::Error));
}

#[tokio::test]
async fn test_failed_refresh_keeps_snapshot() {
    let initial = vec![Task::new("A", "Haute").with_id(1)];

    let mut api = MockTaskApi::new();
    let mut seq = mockall::Sequence::new();
    let first = initial.clone();
    api.expect_list_tasks()
        .times(1)
        .in_sequence(&mut seq)
        .returning(move || {
            let first = first.clone();
            Box::pin(async move { Ok(first) })
        });
    api.expect_list_tasks()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Box::pin(async { Err(eyre::eyre!("connection reset")) }));

    let (controller, _rx) = setup(api);
    controller.refresh().await;
    controller.refresh().await;

    assert_eq!(controller.tasks(), initial);
}

#[tokio::test]
async fn test_filtered_tasks() {
    let list = vec![
        Task::new("A", "Haute").with_id(1),
        Task::new("B", "Basse").with_id(2),
        Task::new("C", "haute").with_id(3),
    ];

    let mut api = MockTaskApi::new();
    expect_list(&mut api, list.clone());

    let (controller, _rx) = setup(api);
    controller.refresh().await;

    // No filter: the full snapshot, order preserved.
    assert_eq!(controller.filtered_tasks(), list);

    // Case-insensitive match, order preserved, no network call (the mock
    // would panic on an unexpected list_tasks).
    controller.set_filter(Some("HAUTE".to_string()));
    let filtered = controller.filtered_tasks();
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered[0].id(), 1);
    assert_eq!(filtered[1].id(), 3);

    // An empty filter behaves like no filter.
    controller.set_filter(Some(String::new()));
    assert_eq!(controller.filtered_tasks(), list);

    controller.set_filter(None);
    assert_eq!(controller.filtered_tasks(), list);
    assert_eq!(controller.filter(), None);
}

#[tokio::test]
async fn test_snapshot_is_published_to_subscribers() {
    let list = vec![Task::new("A", "Haute").with_id(1)];

    let mut api = MockTaskApi::new();
    expect_list(&mut api, list.clone());

    let (controller, _rx) = setup(api);
    let mut sub = controller.subscribe();
    controller.refresh().await;

    assert!(sub.has_changed().expect("sender dropped"));
    assert_eq!(*sub.borrow_and_update(), list);
}

#[tokio::test]
async fn test_filter_is_published_to_subscribers() {
    let (controller, _rx) = setup(MockTaskApi::new());
    let mut sub = controller.subscribe_filter();

    controller.set_filter(Some("Haute".to_string()));

    assert!(sub.has_changed().expect("sender dropped"));
    assert_eq!(*sub.borrow_and_update(), Some("Haute".to_string()));
}
