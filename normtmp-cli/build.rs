//! Build script for normtmp-cli.
//!
//! This script generates the man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! The command structure is rebuilt here because a build script cannot
//! depend on the crate being built. Keep it in sync with src/cli.rs.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::io;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("normtmp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print the normalized temp directory")
        .long_about(
            "Print the OS temp directory with symbolic links resolved and, on Windows, \
             short (8.3) path segments expanded",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read configuration from this file as well as the user config")
                .value_name("PATH")
                .global(true)
                .env("NORMTMP_CONFIG"),
        )
        .subcommands(vec![
            Command::new("tmpdir")
                .about("Print the normalized temp directory")
                .long_about(
                    "Print the temp directory in a form that compares equal to other real paths",
                ),
            Command::new("expand")
                .about("Expand the short (8.3) segments of a Windows path")
                .long_about("Expand a path such as C:\\PROGRA~1 to its long form, or exit 1"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> io::Result<()> {
    let out_dir = PathBuf::from(
        std::env::var_os("OUT_DIR")
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR not set"))?,
    );
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("normtmp.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
