use super::auth;
use crate::{
    api::AuthProvider,
    libs::{
        form::{AuthForm, AuthMode},
        messages::Message,
    },
    msg_bail_anyhow, msg_error, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Password};

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(required = true)]
    email: String,
}

pub async fn cmd(login_args: LoginArgs) -> Result<()> {
    let mut form = AuthForm::new(AuthMode::SignIn);
    form.set_email(login_args.email.trim());
    form.set_password(
        &Password::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptPassword.to_string())
            .allow_empty_password(true)
            .interact()?,
    );

    if !submit_checked(&mut form) {
        return Ok(());
    }

    let auth = auth().await?;
    match auth.sign_in(form.email(), form.password()).await {
        Ok(user) => {
            msg_success!(Message::SignedInAs(user.email.unwrap_or(user.id)));
            Ok(())
        }
        Err(e) => {
            tracing::error!("sign in failed: {}", e);
            msg_bail_anyhow!(e.message().unwrap_or_else(|| Message::AuthFailed.to_string()))
        }
    }
}

/// Validates the form and prints each field error; `true` when valid.
pub(crate) fn submit_checked(form: &mut AuthForm) -> bool {
    if form.validate() {
        return true;
    }
    let errors = form.errors();
    for error in [&errors.email, &errors.password].into_iter().flatten() {
        msg_error!(error);
    }
    false
}
