//! End-to-end task visibility and assignment notification flows.

use super::helpers::{app, register};
use aalto::notification::domain::NotificationKind;
use aalto::task::{
    domain::{TaskPriority, TaskVisibility},
    services::CreateTaskRequest,
};
use aalto::team::domain::TeamRole;

#[tokio::test(flavor = "multi_thread")]
async fn restricted_tasks_open_up_when_the_viewer_joins_the_team() {
    let app = app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let team = app
        .teams
        .create_team("Engineering", alice.id())
        .await
        .expect("team creation should succeed");

    app.tasks
        .create_task(CreateTaskRequest::new(
            "Quarterly roadmap",
            TaskPriority::Medium,
            TaskVisibility::Restricted,
            alice.id(),
        ))
        .await
        .expect("task creation should succeed");

    let before = app
        .tasks
        .visible_tasks(bob.id())
        .await
        .expect("listing should succeed");
    assert!(before.is_empty());

    app.teams
        .invite_member(bob.id(), team.id(), TeamRole::Member)
        .await
        .expect("invitation should succeed");
    app.teams
        .accept_invitation(bob.id(), team.id())
        .await
        .expect("acceptance should succeed");

    let after = app
        .tasks
        .visible_tasks(bob.id())
        .await
        .expect("listing should succeed");
    assert_eq!(after.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn assignment_notification_lands_in_the_assignee_inbox() {
    let app = app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;

    let task = app
        .tasks
        .create_task(
            CreateTaskRequest::new(
                "Ship it",
                TaskPriority::High,
                TaskVisibility::Public,
                alice.id(),
            )
            .with_assignee(bob.id()),
        )
        .await
        .expect("task creation should succeed");

    let inbox = app
        .inbox
        .list_for_recipient(bob.id())
        .await
        .expect("inbox listing should succeed");
    assert_eq!(inbox.len(), 1);
    let delivered = inbox.first().expect("one notification");
    assert_eq!(delivered.kind(), NotificationKind::TaskAssignment);
    assert_eq!(
        delivered.message(),
        "You have been assigned to a new task: 'Ship it' by alice."
    );
    assert_eq!(delivered.related_entity_id(), Some(task.id().into_inner()));

    // Reading and clearing the inbox.
    let marked = app
        .inbox
        .mark_read(delivered.id())
        .await
        .expect("marking should succeed");
    assert!(marked.is_read());
    app.inbox
        .delete(delivered.id())
        .await
        .expect("deletion should succeed");
    let cleared = app
        .inbox
        .list_for_recipient(bob.id())
        .await
        .expect("inbox listing should succeed");
    assert!(cleared.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_team_restricts_tasks_again() {
    let app = app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let team = app
        .teams
        .create_team("Engineering", alice.id())
        .await
        .expect("team creation should succeed");
    app.teams
        .invite_member(bob.id(), team.id(), TeamRole::Member)
        .await
        .expect("invitation should succeed");
    app.teams
        .accept_invitation(bob.id(), team.id())
        .await
        .expect("acceptance should succeed");
    app.tasks
        .create_task(CreateTaskRequest::new(
            "Quarterly roadmap",
            TaskPriority::Medium,
            TaskVisibility::Restricted,
            alice.id(),
        ))
        .await
        .expect("task creation should succeed");

    // Bob leaves; the restricted task disappears from his view.
    app.teams
        .remove_member(bob.id(), team.id())
        .await
        .expect("removal should succeed");

    let after = app
        .tasks
        .visible_tasks(bob.id())
        .await
        .expect("listing should succeed");
    assert!(after.is_empty());
}
