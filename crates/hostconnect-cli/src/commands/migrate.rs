// `hostconnect migrate`: create the SQL schema.

use std::path::Path;

use clap::Args;
use colored::Colorize;

use hostconnect_sqlx::{schema_sql, SqlxStore, SCHEMA};

use crate::config::CliConfig;

#[derive(Args)]
pub struct MigrateArgs {
    /// Print the schema instead of applying it
    #[arg(long)]
    print: bool,
}

pub fn run(config_path: &Path, args: MigrateArgs) -> anyhow::Result<()> {
    if args.print {
        println!("{}", schema_sql());
        return Ok(());
    }

    let config = CliConfig::load(config_path)?;
    if config.is_memory() {
        anyhow::bail!("database.url is \"memory\"; set DATABASE_URL to a sqlite or postgres url");
    }

    println!("{} Database: {}", "●".cyan(), config.database.url);

    super::runtime()?.block_on(async {
        let store = SqlxStore::connect(&config.database.url).await?;
        store.migrate().await?;
        anyhow::Ok(())
    })?;

    println!("{} Applied {} statements", "✔".green(), SCHEMA.len());
    Ok(())
}
