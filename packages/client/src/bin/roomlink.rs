//! Roomlink command-line client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomlink -- chat --handle alice
//! cargo run --bin roomlink -- chat --variant verified --page-url 'http://localhost:5000/chat?username=alice&room=rust'
//! cargo run --bin roomlink -- register --name Alice --email alice@example.com
//! ```

use std::io::IsTerminal;

use clap::{Parser, Subcommand};
use roomlink_client::{
    config::{ChatConfig, ChatVariant, SendEvent},
    ui::{ChatOptions, RegisterOptions},
    usecase::SubmitResult,
};
use roomlink_shared::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "roomlink", version, about = "Chat-room and registration client")]
struct Cli {
    /// Disable ANSI styling of the output
    #[arg(long, global = true, env = "ROOMLINK_PLAIN")]
    plain: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Join a chat room
    Chat {
        /// WebSocket URL of the chat server
        #[arg(long, env = "ROOMLINK_URL", default_value = "ws://127.0.0.1:5000/ws")]
        url: String,

        /// Page variant to reproduce
        #[arg(long, value_enum, env = "ROOMLINK_VARIANT", default_value_t = ChatVariant::Classic)]
        variant: ChatVariant,

        /// Handle to chat as (identity source `attribute`)
        #[arg(long, env = "ROOMLINK_HANDLE")]
        handle: Option<String>,

        /// Page URL carrying `username`/`handle` and `room` in its query (identity source `query`)
        #[arg(long, env = "ROOMLINK_PAGE_URL")]
        page_url: Option<String>,

        /// Override the event name used to send messages
        #[arg(long, value_enum, env = "ROOMLINK_SEND_EVENT")]
        send_event: Option<SendEvent>,

        /// Override whether an unverified status closes the send form
        #[arg(long, env = "ROOMLINK_VERIFICATION_GATE")]
        verification_gate: Option<bool>,
    },
    /// Submit the registration form
    Register {
        /// Base URL of the server hosting /submit
        #[arg(long, env = "ROOMLINK_BASE_URL", default_value = "http://127.0.0.1:5000")]
        base_url: String,

        /// Name to register (prompted for when absent)
        #[arg(long, env = "ROOMLINK_NAME")]
        name: Option<String>,

        /// Email to register (prompted for when absent)
        #[arg(long, env = "ROOMLINK_EMAIL")]
        email: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let cli = Cli::parse();
    let styled = !cli.plain && std::io::stdout().is_terminal();

    let outcome = match cli.command {
        Command::Chat {
            url,
            variant,
            handle,
            page_url,
            send_event,
            verification_gate,
        } => {
            let mut config = ChatConfig::for_variant(variant);
            if let Some(send_event) = send_event {
                config.send_event = send_event;
            }
            if let Some(verification_gate) = verification_gate {
                config.verification_gate = verification_gate;
            }
            roomlink_client::run_chat(ChatOptions {
                url,
                handle,
                page_url,
                config,
                styled,
            })
            .await
            .map(|()| true)
        }
        Command::Register {
            base_url,
            name,
            email,
        } => roomlink_client::run_register(RegisterOptions {
            base_url,
            name,
            email,
            styled,
        })
        .await
        .map(|result| matches!(result, Some(SubmitResult::Accepted(_)))),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!("Client error: {}", e);
            std::process::exit(1);
        }
    }
}
