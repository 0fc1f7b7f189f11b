use super::{succeeded, tasks};
use crate::{
    libs::{
        form::{TaskForm, ValidationError},
        messages::Message,
    },
    msg_error, msg_success,
};
use anyhow::Result;
use chrono::Utc;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title; prompted for when omitted
    title: Option<String>,
    #[arg(short, long)]
    description: Option<String>,
    /// Due date as YYYY-MM-DD; prompted for when omitted
    #[arg(long)]
    due: Option<String>,
}

pub async fn cmd(add_args: AddArgs) -> Result<()> {
    let interactive = add_args.title.is_none();
    let mut form = TaskForm {
        title: match add_args.title {
            Some(title) => title,
            None => Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTaskTitle.to_string())
                .allow_empty(true)
                .interact_text()?,
        },
        description: match add_args.description {
            Some(description) => description,
            None if interactive => Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTaskDescription.to_string())
                .allow_empty(true)
                .interact_text()?,
            None => String::new(),
        },
        due_date: match add_args.due {
            Some(due) => due,
            None => Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTaskDueDate.to_string())
                .default(Utc::now().format("%Y-%m-%d").to_string())
                .interact_text()?,
        },
    };

    let Some(input) = form.submit() else {
        msg_error!(ValidationError::TitleRequired);
        return Ok(());
    };

    let mut controller = tasks().await?;
    let before = controller.tasks().len();
    controller.add(&input.title, &input.description, &input.due_date).await;
    if !succeeded(&controller) {
        return Ok(());
    }

    if controller.tasks().len() > before {
        msg_success!(Message::TaskCreated(input.title));
    }
    Ok(())
}
