use super::{succeeded, tasks};
use crate::{libs::messages::Message, msg_error, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ToggleArgs {
    #[arg(required = true)]
    id: String,
}

pub async fn cmd(toggle_args: ToggleArgs) -> Result<()> {
    let mut controller = tasks().await?;
    if controller.task(&toggle_args.id).is_none() {
        msg_error!(Message::TaskNotFound(toggle_args.id));
        return Ok(());
    }

    controller.toggle(&toggle_args.id).await;
    if !succeeded(&controller) {
        return Ok(());
    }

    if let Some(task) = controller.task(&toggle_args.id) {
        if task.completed {
            msg_success!(Message::TaskCompleted(task.title.clone()));
        } else {
            msg_success!(Message::TaskReopened(task.title.clone()));
        }
    }
    Ok(())
}
