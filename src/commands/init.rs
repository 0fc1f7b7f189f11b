//! Application configuration initialization command.
//!
//! Runs an interactive wizard asking for the Supabase project URL and anon
//! key, pre-filled with the current values, and saves them to `config.json`.

use crate::{
    libs::{
        config::Config,
        messages::Message,
        session_cache::{SessionCache, SESSION_FILE},
    },
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove the configuration and the saved session instead of creating one
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        Config::delete()?;
        SessionCache::new(SESSION_FILE).clear()?;
        msg_success!(Message::ConfigDeleted);
        return Ok(());
    }

    Config::init()?.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
