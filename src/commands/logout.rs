use super::auth;
use crate::{
    api::AuthProvider,
    libs::messages::Message,
    msg_info, msg_success, msg_warning,
};
use anyhow::Result;

/// Signs out. The saved session is removed even if the service call fails.
pub async fn cmd() -> Result<()> {
    let auth = auth().await?;
    if auth.current_user().is_none() {
        msg_info!(Message::NotSignedIn);
        return Ok(());
    }

    if let Err(e) = auth.sign_out().await {
        msg_warning!(Message::SignOutIncomplete(e.to_string()));
    }
    msg_success!(Message::SignedOut);
    Ok(())
}
