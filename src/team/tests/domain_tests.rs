//! Domain tests for team names, memberships, and enumerations.

use crate::identity::domain::UserId;
use crate::team::domain::{
    InvitationStatus, TeamDomainError, TeamId, TeamMembership, TeamName, TeamRole,
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
fn team_name_trims_whitespace() {
    let name = TeamName::new("  Engineering  ").expect("name should validate");
    assert_eq!(name.as_str(), "Engineering");
}

#[rstest]
#[case("")]
#[case("   ")]
fn team_name_rejects_empty(#[case] input: &str) {
    assert_eq!(TeamName::new(input), Err(TeamDomainError::EmptyTeamName));
}

#[rstest]
fn founder_membership_is_accepted_owner() {
    let membership = TeamMembership::founder(UserId::new(), TeamId::new(), &DefaultClock);

    assert_eq!(membership.role(), TeamRole::Owner);
    assert_eq!(membership.status(), InvitationStatus::Accepted);
    assert!(membership.is_active_owner());
    assert!(membership.responded_at().is_some());
}

#[rstest]
fn invited_membership_is_pending_and_inactive() {
    let membership =
        TeamMembership::invited(UserId::new(), TeamId::new(), TeamRole::Member, &DefaultClock);

    assert_eq!(membership.status(), InvitationStatus::Pending);
    assert!(!membership.is_active());
    assert!(membership.responded_at().is_none());
}

#[rstest]
fn accept_keeps_role_from_invite_time() {
    let mut membership =
        TeamMembership::invited(UserId::new(), TeamId::new(), TeamRole::Owner, &DefaultClock);

    membership
        .accept(&DefaultClock)
        .expect("pending invitation should accept");

    assert_eq!(membership.status(), InvitationStatus::Accepted);
    assert_eq!(membership.role(), TeamRole::Owner);
    assert!(membership.responded_at().is_some());
}

#[rstest]
fn accept_rejects_non_pending_membership() {
    let mut membership = TeamMembership::founder(UserId::new(), TeamId::new(), &DefaultClock);

    let result = membership.accept(&DefaultClock);

    assert_eq!(
        result,
        Err(TeamDomainError::InvitationNotPending {
            found: InvitationStatus::Accepted,
        })
    );
}

#[rstest]
#[case(TeamRole::Member, "member")]
#[case(TeamRole::Owner, "owner")]
fn team_role_round_trips_through_storage_form(#[case] role: TeamRole, #[case] text: &str) {
    assert_eq!(role.as_str(), text);
    assert_eq!(TeamRole::try_from(text), Ok(role));
}

#[rstest]
#[case(InvitationStatus::Pending, "pending")]
#[case(InvitationStatus::Accepted, "accepted")]
fn invitation_status_round_trips_through_storage_form(
    #[case] status: InvitationStatus,
    #[case] text: &str,
) {
    assert_eq!(status.as_str(), text);
    assert_eq!(InvitationStatus::try_from(text), Ok(status));
}

#[rstest]
fn unknown_enum_text_is_rejected() {
    assert!(TeamRole::try_from("admin").is_err());
    assert!(InvitationStatus::try_from("rejected").is_err());
}
