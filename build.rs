//! Generates the man page and shell completions from the CLI definition.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::Shell;

#[allow(dead_code)]
#[path = "src/cli_args.rs"]
mod cli_args;

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=src/cli_args.rs");

    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR not set"))?;

    let mut cmd = cli_args::Cli::command();

    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;
    fs::write(out_dir.join("huepick.1"), buffer)?;

    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        clap_complete::generate_to(shell, &mut cmd, "huepick", &out_dir)?;
    }

    Ok(())
}
