// `hostconnect issue-token`: mint a bearer token for a user.

use std::path::Path;

use clap::Args;
use colored::Colorize;

use hostconnect::auth::issue_token;
use hostconnect_core::NewUser;

use crate::config::CliConfig;

#[derive(Args)]
pub struct IssueTokenArgs {
    /// Email of the user; created if it does not exist
    #[arg(long)]
    email: String,

    /// Display name used when creating the user
    #[arg(long)]
    name: Option<String>,
}

pub fn run(config_path: &Path, args: IssueTokenArgs) -> anyhow::Result<()> {
    let config = CliConfig::load(config_path)?;
    config.options.validate()?;

    if config.is_memory() {
        eprintln!(
            "{} the memory store is per process; this user will not exist in a running server",
            "warning:".yellow()
        );
    }

    let token = super::runtime()?.block_on(async {
        let store = config.open_store().await?;
        let email = args.email.trim().to_lowercase();

        let user = match store.find_user_by_email(&email).await? {
            Some(user) => user,
            None => {
                store
                    .create_user(NewUser {
                        email,
                        name: args.name,
                    })
                    .await?
            }
        };

        eprintln!("{} User {} ({})", "●".cyan(), user.email, user.id);
        anyhow::Ok(issue_token(&config.options, &user)?)
    })?;

    println!("{token}");
    Ok(())
}
