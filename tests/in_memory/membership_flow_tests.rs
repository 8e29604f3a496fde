//! End-to-end membership and invitation flows.

use super::helpers::{app, register};
use aalto::notification::domain::NotificationKind;
use aalto::team::{
    domain::{InvitationStatus, TeamRole},
    services::TeamServiceError,
};

#[tokio::test(flavor = "multi_thread")]
async fn invitation_lifecycle_from_invite_to_active_membership() {
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

    // The invitation shows up in bob's inbox.
    let inbox = app
        .inbox
        .list_for_recipient(bob.id())
        .await
        .expect("inbox listing should succeed");
    assert_eq!(inbox.len(), 1);
    let invitation = inbox.first().expect("one notification");
    assert_eq!(invitation.kind(), NotificationKind::TeamInvitation);
    assert_eq!(invitation.related_entity_id(), Some(team.id().into_inner()));

    // Until acceptance, bob is not an active member.
    assert!(
        !app.teams
            .is_member_of_team(bob.id(), team.id())
            .await
            .expect("membership check should succeed")
    );

    app.teams
        .accept_invitation(bob.id(), team.id())
        .await
        .expect("acceptance should succeed");

    assert!(
        app.teams
            .is_member_of_team(bob.id(), team.id())
            .await
            .expect("membership check should succeed")
    );
    assert!(
        app.teams
            .users_share_team(alice.id(), bob.id())
            .await
            .expect("share check should succeed")
    );

    let members = app
        .teams
        .users_in_team(team.id())
        .await
        .expect("member listing should succeed");
    assert_eq!(members.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejection_clears_the_pair_for_reinvitation() {
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
        .reject_invitation(bob.id(), team.id())
        .await
        .expect("rejection should succeed");

    let membership = app
        .teams
        .membership(bob.id(), team.id())
        .await
        .expect("membership lookup should succeed");
    assert!(membership.is_none());

    let second = app
        .teams
        .invite_member(bob.id(), team.id(), TeamRole::Owner)
        .await
        .expect("re-invitation should succeed");
    assert_eq!(second.status(), InvitationStatus::Pending);
    assert_eq!(second.role(), TeamRole::Owner);
}

#[tokio::test(flavor = "multi_thread")]
async fn ownership_transfer_is_required_before_the_founder_leaves() {
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

    // With bob still a regular member, alice is the sole owner.
    let blocked = app.teams.remove_member(alice.id(), team.id()).await;
    assert!(matches!(blocked, Err(TeamServiceError::LastOwner { .. })));

    app.teams
        .change_member_role(bob.id(), team.id(), TeamRole::Owner)
        .await
        .expect("promotion should succeed");
    app.teams
        .remove_member(alice.id(), team.id())
        .await
        .expect("the founder can leave once ownership is shared");

    assert!(
        app.teams
            .is_team_owner(bob.id(), team.id())
            .await
            .expect("ownership check should succeed")
    );
}
