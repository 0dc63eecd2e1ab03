//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::{Generator, generate, shells};

use crate::cli::{Cli, CompletionsArgs, Shell};
use crate::error::CliResult;

const BIN_NAME: &str = "nestgen";

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    match args.shell {
        Shell::Bash => write_script(shells::Bash, &mut io::stdout()),
        Shell::Zsh => write_script(shells::Zsh, &mut io::stdout()),
        Shell::Fish => write_script(shells::Fish, &mut io::stdout()),
        Shell::PowerShell => write_script(shells::PowerShell, &mut io::stdout()),
        Shell::Elvish => write_script(shells::Elvish, &mut io::stdout()),
    }
    Ok(())
}

fn write_script<G: Generator>(shell: G, out: &mut dyn io::Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_script_mentions_subcommands() {
        let mut buf = Vec::new();
        write_script(shells::Bash, &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("nestgen"));
        assert!(script.contains("generate"));
        assert!(script.contains("--skip-generator"));
    }
}
