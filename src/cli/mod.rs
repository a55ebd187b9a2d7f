//! CLI module for wabridge
//!
//! - `serve`: run the HTTP server exposing both relays
//! - `send`: one-shot outbound send

use clap::{Parser, Subcommand};

pub mod send;

/// wabridge CLI
#[derive(Parser, Debug)]
#[command(name = "wabridge")]
#[command(about = "WhatsApp message relay")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server
    Serve,
    /// Send a WhatsApp text and record it
    Send {
        /// Recipient phone number
        #[arg(long)]
        to: String,
        /// Message text
        content: String,
    },
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve) => crate::server::run().await,
        Some(Commands::Send { to, content }) => send::run(&to, &content).await,
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_send() {
        let cli = Cli::try_parse_from(["wabridge", "send", "--to", "+15551234567", "hello"]).unwrap();
        match cli.command {
            Some(Commands::Send { to, content }) => {
                assert_eq!(to, "+15551234567");
                assert_eq!(content, "hello");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_send_requires_recipient() {
        assert!(Cli::try_parse_from(["wabridge", "send", "hello"]).is_err());
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["wabridge"]).unwrap();
        assert!(cli.command.is_none());
    }
}
