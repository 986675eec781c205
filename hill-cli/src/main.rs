mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use hill_crypto::KeyMatrix;

use crate::commands::Command;

#[derive(Parser, Debug)]
#[command(name = "hill", version, about = "Hill cipher over the 26-letter alphabet")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Encrypt a message; it is padded with Z to a whole number of blocks
    Encrypt {
        #[command(flatten)]
        key: KeySource,
        /// Letters A-Z, spaces are ignored
        text: String,
    },
    /// Decrypt a message; its length must be a multiple of the key order
    Decrypt {
        #[command(flatten)]
        key: KeySource,
        text: String,
    },
    /// Print the inverse of a key mod 26
    Invert {
        #[command(flatten)]
        key: KeySource,
    },
    /// Print a random key that is invertible mod 26
    GenKey {
        /// Key order, 2 or 3
        #[arg(short, long, default_value_t = 3)]
        order: usize,
        /// Print the key as JSON instead of "a,b;c,d"
        #[arg(long)]
        json: bool,
    },
}

/// Environment variable read when neither `--key` nor `--key-file` is given.
const KEY_ENV: &str = "HILL_KEY";

#[derive(Args, Debug)]
#[group(required = false, multiple = false)]
struct KeySource {
    /// Key rows separated by ';', entries by ',' (e.g. "6,24,1;13,16,10;20,17,15").
    /// Falls back to $HILL_KEY
    #[arg(short, long)]
    key: Option<KeyMatrix>,
    /// JSON file holding the key as a nested array (e.g. [[3,3],[2,5]])
    #[arg(long)]
    key_file: Option<PathBuf>,
}

impl KeySource {
    /// Explicit flags win over the environment.
    fn resolve(self, env_key: Option<&str>) -> anyhow::Result<KeyMatrix> {
        if let Some(key) = self.key {
            return Ok(key);
        }

        if let Some(path) = self.key_file {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read key file {}", path.display()))?;
            return KeyMatrix::from_json(&json)
                .with_context(|| format!("invalid key in {}", path.display()));
        }

        let text = env_key.with_context(|| {
            format!("no key given: use --key, --key-file or set {}", KEY_ENV)
        })?;
        text.parse()
            .with_context(|| format!("invalid key in {}", KEY_ENV))
    }
}

impl Cli {
    fn into_command(self, env_key: Option<&str>) -> anyhow::Result<Command> {
        Ok(match self.command {
            CliCommand::Encrypt { key, text } => Command::Encrypt {
                key: key.resolve(env_key)?,
                text,
            },
            CliCommand::Decrypt { key, text } => Command::Decrypt {
                key: key.resolve(env_key)?,
                text,
            },
            CliCommand::Invert { key } => Command::Invert {
                key: key.resolve(env_key)?,
            },
            CliCommand::GenKey { order, json } => Command::GenKey { order, json },
        })
    }
}

/// Renders the whole context chain on one line.
fn render_error(err: &anyhow::Error) -> String {
    format!("error: {:#}", err)
}

fn main() {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("parsed arguments: {:?}", cli);

    let env_key = std::env::var(KEY_ENV).ok();
    match cli
        .into_command(env_key.as_deref())
        .and_then(Command::run)
    {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("{}", render_error(&err));
            std::process::exit(1);
        }
    }
}
