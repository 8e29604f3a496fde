//! Then steps for team invitation BDD scenarios.

use super::world::{InvitationWorld, run_async};
use aalto::team::{
    domain::{InvitationStatus, TeamRole},
    services::TeamServiceError,
};
use eyre::WrapErr;
use rstest_bdd_macros::then;

#[then(r#"the membership of "{user}" in "{team}" is accepted"#)]
fn membership_is_accepted(
    world: &InvitationWorld,
    user: String,
    team: String,
) -> Result<(), eyre::Report> {
    let user_id = world.user_id(&user)?;
    let team_id = world.team_id(&team)?;
    let membership = run_async(world.teams.membership(user_id, team_id))
        .wrap_err("look up scenario membership")?
        .ok_or_else(|| eyre::eyre!("expected a membership for {user} in {team}"))?;

    if membership.status() != InvitationStatus::Accepted {
        return Err(eyre::eyre!(
            "expected accepted status, found {}",
            membership.status()
        ));
    }
    Ok(())
}

#[then(r#"the role of "{user}" in "{team}" is "{role}""#)]
fn role_is(
    world: &InvitationWorld,
    user: String,
    team: String,
    role: String,
) -> Result<(), eyre::Report> {
    let expected = TeamRole::try_from(role.as_str())
        .map_err(|err| eyre::eyre!("invalid scenario role: {err}"))?;
    let user_id = world.user_id(&user)?;
    let team_id = world.team_id(&team)?;
    let membership = run_async(world.teams.membership(user_id, team_id))
        .wrap_err("look up scenario membership")?
        .ok_or_else(|| eyre::eyre!("expected a membership for {user} in {team}"))?;

    if membership.role() != expected {
        return Err(eyre::eyre!(
            "expected role {expected}, found {}",
            membership.role()
        ));
    }
    Ok(())
}

#[then(r#"no membership exists for "{user}" in "{team}""#)]
fn no_membership_exists(
    world: &InvitationWorld,
    user: String,
    team: String,
) -> Result<(), eyre::Report> {
    let user_id = world.user_id(&user)?;
    let team_id = world.team_id(&team)?;
    let membership = run_async(world.teams.membership(user_id, team_id))
        .wrap_err("look up scenario membership")?;

    if membership.is_some() {
        return Err(eyre::eyre!("expected no membership for {user} in {team}"));
    }
    Ok(())
}

#[then(r#"inviting "{user}" to "{team}" as a "{role}" succeeds"#)]
fn reinvitation_succeeds(
    world: &InvitationWorld,
    user: String,
    team: String,
    role: String,
) -> Result<(), eyre::Report> {
    let user_id = world.user_id(&user)?;
    let team_id = world.team_id(&team)?;
    let parsed = TeamRole::try_from(role.as_str())
        .map_err(|err| eyre::eyre!("invalid scenario role: {err}"))?;

    run_async(world.teams.invite_member(user_id, team_id, parsed))
        .wrap_err("re-invite scenario user")?;
    Ok(())
}

#[then("the invitation fails because a membership already exists")]
fn invitation_fails_with_existing_membership(
    world: &InvitationWorld,
) -> Result<(), eyre::Report> {
    let result = world
        .last_invite
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing invitation result"))?;

    if !matches!(
        result,
        Err(TeamServiceError::MembershipAlreadyExists { .. })
    ) {
        return Err(eyre::eyre!(
            "expected MembershipAlreadyExists error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the removal fails because of last-owner protection")]
fn removal_fails_with_last_owner(world: &InvitationWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_removal
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing removal result"))?;

    if !matches!(result, Err(TeamServiceError::LastOwner { .. })) {
        return Err(eyre::eyre!("expected LastOwner error, got {result:?}"));
    }
    Ok(())
}
