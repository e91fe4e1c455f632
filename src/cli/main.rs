pub mod client;
pub mod cmd;
pub mod config;
pub mod ui;

use std::process::ExitCode;

use rbac_console::utils::tracing::init_tracing;

use crate::ui::message::message_error;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        message_error(format!("failed to initialize logging: {e}"));
    }

    if let Err(e) = cmd::run_cli().await {
        message_error(e.to_string());
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
