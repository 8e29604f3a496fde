//! When steps for team invitation BDD scenarios.

use super::world::{InvitationWorld, run_async};
use aalto::team::domain::TeamRole;
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#""{invitee}" accepts the invitation to "{team}""#)]
fn accept_invitation(
    world: &mut InvitationWorld,
    invitee: String,
    team: String,
) -> Result<(), eyre::Report> {
    let invitee_id = world.user_id(&invitee)?;
    let team_id = world.team_id(&team)?;
    run_async(world.teams.accept_invitation(invitee_id, team_id))
        .wrap_err("accept scenario invitation")?;
    Ok(())
}

#[when(r#""{invitee}" rejects the invitation to "{team}""#)]
fn reject_invitation(
    world: &mut InvitationWorld,
    invitee: String,
    team: String,
) -> Result<(), eyre::Report> {
    let invitee_id = world.user_id(&invitee)?;
    let team_id = world.team_id(&team)?;
    run_async(world.teams.reject_invitation(invitee_id, team_id))
        .wrap_err("reject scenario invitation")?;
    Ok(())
}

#[when(r#""{owner}" invites "{invitee}" to "{team}" as a "{role}" again"#)]
fn invite_again(
    world: &mut InvitationWorld,
    owner: String,
    invitee: String,
    team: String,
    role: String,
) -> Result<(), eyre::Report> {
    // The inviter is not an input to the service call; naming them keeps
    // the scenario readable.
    world.user_id(&owner)?;
    let invitee_id = world.user_id(&invitee)?;
    let team_id = world.team_id(&team)?;
    let role = TeamRole::try_from(role.as_str())
        .map_err(|err| eyre::eyre!("invalid scenario role: {err}"))?;

    let result = run_async(world.teams.invite_member(invitee_id, team_id, role));
    world.last_invite = Some(result);
    Ok(())
}

#[when(r#""{member}" is removed from "{team}""#)]
fn remove_member(
    world: &mut InvitationWorld,
    member: String,
    team: String,
) -> Result<(), eyre::Report> {
    let member_id = world.user_id(&member)?;
    let team_id = world.team_id(&team)?;
    let result = run_async(world.teams.remove_member(member_id, team_id));
    world.last_removal = Some(result);
    Ok(())
}
