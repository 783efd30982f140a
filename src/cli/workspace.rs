use std::io::Write;

use anyhow::Result;
use clap::Subcommand;

use super::{render, Output};
use crate::client::{TeamApi, UserApi, USER_PAGE};

#[derive(Debug, Subcommand)]
pub enum TeamCommand {
    /// List teams
    List,
    /// Show a team by key or ID
    Get { team: String },
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List users
    List {
        #[arg(short, long, default_value_t = USER_PAGE)]
        limit: u32,
    },
    /// Show the authenticated user
    Me,
    /// Find a user by email or name
    Get { user: String },
}

pub async fn run_team<C, W>(command: TeamCommand, client: &C, out: &mut Output<W>) -> Result<()>
where
    C: TeamApi,
    W: Write,
{
    match command {
        TeamCommand::List => {
            let teams = client.list_teams().await?;
            out.emit(&teams, || render::team_list(&teams))
        }
        TeamCommand::Get { team } => {
            let team = client.resolve_team(&team).await?;
            out.emit(&team, || render::team_list(std::slice::from_ref(&team)))
        }
    }
}

pub async fn run_user<C, W>(command: UserCommand, client: &C, out: &mut Output<W>) -> Result<()>
where
    C: UserApi,
    W: Write,
{
    match command {
        UserCommand::List { limit } => {
            let users = client.list_users(limit).await?;
            out.emit(&users, || render::user_list(&users))
        }
        UserCommand::Me => {
            let user = client.viewer().await?;
            out.emit(&user, || render::user_list(std::slice::from_ref(&user)))
        }
        UserCommand::Get { user } => {
            let user = client.resolve_user(&user).await?;
            out.emit(&user, || render::user_list(std::slice::from_ref(&user)))
        }
    }
}
