//! Given steps for team invitation BDD scenarios.

use super::world::{InvitationWorld, run_async};
use aalto::identity::services::RegisterAccountRequest;
use aalto::team::domain::TeamRole;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a registered user "{name}""#)]
fn registered_user(world: &mut InvitationWorld, name: String) -> Result<(), eyre::Report> {
    let user = run_async(world.accounts.register(RegisterAccountRequest::new(
        name.clone(),
        format!("{name}@example.com"),
        "correct horse battery staple",
    )))
    .wrap_err("register scenario user")?;
    world.users.insert(name, user.id());
    Ok(())
}

#[given(r#"a team "{team}" created by "{owner}""#)]
fn team_created_by(
    world: &mut InvitationWorld,
    team: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let owner_id = world.user_id(&owner)?;
    let created = run_async(world.teams.create_team(team.clone(), owner_id))
        .wrap_err("create scenario team")?;
    world.team_ids.insert(team, created.id());
    Ok(())
}

#[given(r#""{invitee}" has been invited to "{team}" as a "{role}""#)]
fn user_has_been_invited(
    world: &mut InvitationWorld,
    invitee: String,
    team: String,
    role: String,
) -> Result<(), eyre::Report> {
    let invitee_id = world.user_id(&invitee)?;
    let team_id = world.team_id(&team)?;
    let role = TeamRole::try_from(role.as_str())
        .map_err(|err| eyre::eyre!("invalid scenario role: {err}"))?;

    run_async(world.teams.invite_member(invitee_id, team_id, role))
        .wrap_err("invite scenario user")?;
    Ok(())
}
