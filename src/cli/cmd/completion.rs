use anyhow::Result;
use clap::{Args, Command};
use clap_complete::Shell;

#[derive(Clone, Debug, Args)]
pub struct CompletionArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

/// Writes the completion script to stdout, eg.
/// `rbac completion bash > /etc/bash_completion.d/rbac`.
pub fn print_completion(shell: Shell, cmd: &mut Command) -> Result<()> {
    clap_complete::generate(shell, cmd, "rbac", &mut std::io::stdout());
    Ok(())
}
