use super::{succeeded, tasks};
use crate::{libs::messages::Message, msg_error, msg_info, msg_success};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    #[arg(required = true)]
    id: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub async fn cmd(delete_args: DeleteArgs) -> Result<()> {
    let mut controller = tasks().await?;
    let Some(task) = controller.task(&delete_args.id) else {
        msg_error!(Message::TaskNotFound(delete_args.id));
        return Ok(());
    };

    let confirmed = delete_args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(task.title.clone()).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    controller.remove(&delete_args.id).await;
    if !succeeded(&controller) {
        return Ok(());
    }

    msg_success!(Message::TaskDeleted(delete_args.id));
    Ok(())
}
