use clap::Args;
use pizzeria_app::{auth::Credentials, notice::Notice};
use tracing::info;

use super::{CliError, Runtime};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Account name
    #[arg(long, env = "PIZZERIA_USERNAME")]
    username: String,

    /// Account password
    #[arg(long, env = "PIZZERIA_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn login(runtime: &Runtime, args: LoginArgs) -> Result<(), CliError> {
    let session = runtime
        .context
        .auth
        .login(Credentials {
            username: args.username,
            password: args.password,
        })
        .await?;

    runtime.store.save(&session)?;

    info!(
        path = %runtime.store.path().display(),
        role = session.role().unwrap_or("customer"),
        "session saved"
    );

    runtime.say(&Notice::SignedIn {
        username: session.username().to_string(),
    });

    Ok(())
}

pub(crate) fn logout(runtime: &Runtime) -> Result<(), CliError> {
    runtime.store.clear()?;

    runtime.say(&Notice::SignedOut);

    Ok(())
}
