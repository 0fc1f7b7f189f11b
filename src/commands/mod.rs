pub mod add;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod login;
pub mod logout;
pub mod signup;
pub mod toggle;
pub mod whoami;

use crate::{
    api::{AuthProvider, SupabaseAuth, SupabaseTasks},
    libs::{config::Config, controller::TaskController, messages::Message, view::View},
    msg_bail_anyhow, msg_debug, msg_warning,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure the Supabase project")]
    Init(init::InitArgs),
    #[command(about = "Create an account")]
    Signup(signup::SignupArgs),
    #[command(about = "Sign in")]
    Login(login::LoginArgs),
    #[command(about = "Sign out and forget the saved session")]
    Logout,
    #[command(about = "Show the signed-in user")]
    Whoami,
    #[command(about = "List tasks")]
    List(list::ListArgs),
    #[command(about = "Add a task")]
    Add(add::AddArgs),
    #[command(about = "Mark a task completed or active again")]
    Toggle(toggle::ToggleArgs),
    #[command(about = "Delete a task")]
    Delete(delete::DeleteArgs),
    #[command(about = "Edit title, description or due date of a task")]
    Edit(edit::EditArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Signup(args) => signup::cmd(args).await,
            Commands::Login(args) => login::cmd(args).await,
            Commands::Logout => logout::cmd().await,
            Commands::Whoami => whoami::cmd().await,
            Commands::List(args) => list::cmd(args).await,
            Commands::Add(args) => add::cmd(args).await,
            Commands::Toggle(args) => toggle::cmd(args).await,
            Commands::Delete(args) => delete::cmd(args).await,
            Commands::Edit(args) => edit::cmd(args).await,
        }
    }
}

/// Auth client for the configured project, with the saved session restored.
///
/// A saved session that can no longer be used is dropped with a warning and
/// the client continues signed out.
pub(crate) async fn auth() -> Result<Arc<SupabaseAuth>> {
    restored(&Config::read()?).await
}

async fn restored(config: &Config) -> Result<Arc<SupabaseAuth>> {
    let auth = Arc::new(SupabaseAuth::new(config.supabase()?));
    if let Err(e) = auth.restore().await {
        msg_warning!(Message::SessionRestoreFailed(e.to_string()));
    }
    Ok(auth)
}

/// Task controller for the signed-in user, with the task list loaded.
///
/// Fails when nobody is signed in or the initial fetch failed.
pub(crate) async fn tasks() -> Result<TaskController<SupabaseTasks>> {
    let config = Config::read()?;
    let auth = restored(&config).await?;
    let mut controller = TaskController::new(SupabaseTasks::new(config.supabase()?, auth.clone()));

    msg_debug!(Message::LoadingTasks);
    let mut session = auth.subscribe();
    controller.sync_session(&mut session).await;

    if controller.user().is_none() {
        msg_bail_anyhow!(Message::NotSignedIn);
    }
    if let Some(error) = controller.error() {
        msg_bail_anyhow!(error);
    }
    Ok(controller)
}

/// Prints the controller's error banner; `true` when there is none.
pub(crate) fn succeeded(controller: &TaskController<SupabaseTasks>) -> bool {
    View::error(controller.error());
    controller.error().is_none()
}
