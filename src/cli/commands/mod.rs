mod create_admin;
mod init;
mod migrate;
mod serve;

pub use create_admin::cmd_create_admin;
pub use init::cmd_init;
pub use migrate::cmd_migrate;
pub use serve::cmd_serve;
