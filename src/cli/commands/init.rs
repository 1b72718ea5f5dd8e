//! Init command handler

use crate::config::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    let path = Config::default_config_path();

    if Config::create_default_if_missing()? {
        println!("Created {}", path.display());
        println!("Edit it to set the database URL and server port.");
    } else {
        println!("{} already exists, leaving it untouched.", path.display());
    }

    Ok(())
}
