use super::tasks;
use crate::libs::{task::TaskFilter, view::View};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Which tasks to show
    #[arg(short, long, value_enum, default_value_t = TaskFilter::All)]
    filter: TaskFilter,
}

pub async fn cmd(list_args: ListArgs) -> Result<()> {
    let controller = tasks().await?;
    View::tasks(&controller.filtered(list_args.filter), controller.tasks().len(), list_args.filter)
}
