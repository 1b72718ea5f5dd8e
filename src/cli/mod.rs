//! CLI module - Command-line interface for campusdesk
//!
//! This module provides a structured CLI using clap for argument parsing.

pub mod commands;

use clap::{Parser, Subcommand};

/// campusdesk - campus facilities and wellbeing backend
#[derive(Parser)]
#[command(name = "campusdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server (default)
    #[command(alias = "server", alias = "web")]
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Create a default config file with generated token secrets
    Init,

    /// Create an account holding the admin role
    CreateAdmin {
        /// Login email
        #[arg(long)]
        email: String,
        /// Display name
        #[arg(long, default_value = "Administrator")]
        name: String,
        /// Initial password
        #[arg(long)]
        password: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        let cli = Cli::try_parse_from(["campusdesk"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_create_admin_args() {
        let cli = Cli::try_parse_from([
            "campusdesk",
            "create-admin",
            "--email",
            "root@campus.edu",
            "--password",
            "hunter22",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::CreateAdmin {
                email,
                name,
                password,
            }) => {
                assert_eq!(email, "root@campus.edu");
                assert_eq!(name, "Administrator");
                assert_eq!(password, "hunter22");
            }
            _ => panic!("expected create-admin"),
        }
    }

    #[test]
    fn test_create_admin_requires_email() {
        assert!(Cli::try_parse_from(["campusdesk", "create-admin", "--password", "x"]).is_err());
    }
}
