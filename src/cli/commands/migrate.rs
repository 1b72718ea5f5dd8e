//! Migrate command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_url).await?;
    store.close().await?;

    println!("Migrations applied to {}", config.general.database_url);
    Ok(())
}
