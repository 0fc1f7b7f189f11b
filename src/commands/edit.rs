use super::{succeeded, tasks};
use crate::{
    libs::{
        form::{EditForm, ValidationError},
        messages::Message,
    },
    msg_error, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};

/// Fields given on the command line replace the current values; with none
/// given, each field is prompted for with the current value as default.
#[derive(Debug, Args)]
pub struct EditArgs {
    #[arg(required = true)]
    id: String,
    #[arg(short, long)]
    title: Option<String>,
    #[arg(short, long)]
    description: Option<String>,
    /// Due date as YYYY-MM-DD
    #[arg(long)]
    due: Option<String>,
}

pub async fn cmd(edit_args: EditArgs) -> Result<()> {
    let mut controller = tasks().await?;
    let Some(task) = controller.task(&edit_args.id) else {
        msg_error!(Message::TaskNotFound(edit_args.id));
        return Ok(());
    };
    let mut form = EditForm::from_task(task);

    if edit_args.title.is_none() && edit_args.description.is_none() && edit_args.due.is_none() {
        prompt(&mut form)?;
    } else {
        form.title = edit_args.title.unwrap_or(form.title);
        form.description = edit_args.description.unwrap_or(form.description);
        form.due_date = edit_args.due.unwrap_or(form.due_date);
    }

    let Some(input) = form.save() else {
        msg_error!(ValidationError::TitleRequired);
        return Ok(());
    };

    controller.edit(&form.id, &input.title, &input.description, &input.due_date).await;
    if !succeeded(&controller) {
        return Ok(());
    }

    msg_success!(Message::TaskUpdated(input.title));
    Ok(())
}

fn prompt(form: &mut EditForm) -> Result<()> {
    form.title = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskTitle.to_string())
        .default(form.title.clone())
        .interact_text()?;
    form.description = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskDescription.to_string())
        .default(form.description.clone())
        .allow_empty(true)
        .interact_text()?;
    form.due_date = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskDueDate.to_string())
        .default(form.due_date.clone())
        .interact_text()?;
    Ok(())
}
