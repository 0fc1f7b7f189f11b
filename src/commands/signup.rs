use super::{auth, login::submit_checked};
use crate::{
    api::{AuthProvider, SignUpOutcome},
    libs::{
        form::{AuthForm, AuthMode, MIN_PASSWORD_LEN},
        messages::Message,
    },
    msg_bail_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Password};

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(required = true)]
    email: String,
}

pub async fn cmd(signup_args: SignupArgs) -> Result<()> {
    let mut form = AuthForm::new(AuthMode::SignUp);
    form.set_email(signup_args.email.trim());
    form.set_password(
        &Password::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptCreatePassword(MIN_PASSWORD_LEN).to_string())
            .with_confirmation(Message::PromptConfirmPassword.to_string(), Message::PasswordMismatch.to_string())
            .allow_empty_password(true)
            .interact()?,
    );

    if !submit_checked(&mut form) {
        return Ok(());
    }

    let auth = auth().await?;
    match auth.sign_up(form.email(), form.password()).await {
        Ok(SignUpOutcome::SignedIn(user)) => {
            msg_success!(Message::AccountCreated(form.email().to_string()));
            msg_success!(Message::SignedInAs(user.email.unwrap_or(user.id)));
            Ok(())
        }
        Ok(SignUpOutcome::ConfirmationRequired(_)) => {
            msg_success!(Message::AccountCreated(form.email().to_string()));
            msg_info!(Message::ConfirmEmailSent(form.email().to_string()));
            Ok(())
        }
        Err(e) => {
            tracing::error!("sign up failed: {}", e);
            msg_bail_anyhow!(e.message().unwrap_or_else(|| Message::AuthFailed.to_string()))
        }
    }
}
