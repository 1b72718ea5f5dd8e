//! Create-admin command handler

use crate::config::Config;
use crate::domain::Role;
use crate::state::SharedState;

pub async fn cmd_create_admin(
    config: Config,
    email: &str,
    name: &str,
    password: &str,
) -> anyhow::Result<()> {
    let shared = SharedState::new(config).await?;

    let user = shared
        .auth_service
        .create_account(name, email, password, &[Role::Admin])
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create admin: {e}"))?;

    shared.store.close().await?;

    println!("Admin account created");
    println!("  ID:    {}", user.id);
    println!("  Email: {}", user.email);
    Ok(())
}
