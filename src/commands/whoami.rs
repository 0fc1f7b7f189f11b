use super::auth;
use crate::{api::AuthProvider, libs::messages::Message, msg_info, msg_print};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    match auth().await?.current_user() {
        Some(user) => msg_print!(Message::SignedInAs(user.email.unwrap_or(user.id))),
        None => msg_info!(Message::NotSignedIn),
    }
    Ok(())
}
