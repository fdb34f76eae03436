//! Latchkey CLI
//!
//! Command-line interface for looking up and storing passwords in the
//! platform credential store.
//!
//! # Usage
//!
//! ```bash
//! # Make sure a password exists for a service, prompting for it if not
//! latchkey ensure api.example.com -u alice
//!
//! # Print a stored password
//! latchkey get api.example.com -u alice
//!
//! # Store a password read from stdin
//! echo "hunter2" | latchkey set example.com --internet -u alice
//!
//! # Remove a stored password
//! latchkey delete api.example.com -u alice
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use latchkey_core::{
    create_backend, GenericCredential, InternetCredential, InternetProtocol, KeychainError, Secret,
    StoreClient,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

mod config;

use config::BackendKind;

#[derive(Parser)]
#[command(name = "latchkey")]
#[command(about = "Look up and store passwords in the system keychain")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the configured storage backend
    #[arg(long, global = true, value_enum)]
    backend: Option<BackendKind>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the stored password
    Get(Target),

    /// Store a password read from stdin
    Set(Target),

    /// Remove the stored password
    Delete(Target),

    /// Prompt for a username and password unless one is already stored
    Ensure(Target),
}

/// The stored item a command works on.
#[derive(Args, Debug)]
struct Target {
    /// Service name, or server host with --internet
    item: String,

    /// Item label (defaults to the service or server)
    #[arg(short, long)]
    label: Option<String>,

    /// Account name
    #[arg(short = 'u', long = "username")]
    account: Option<String>,

    /// Store an internet password for a server instead of a service password
    #[arg(long)]
    internet: bool,

    /// Protocol of an internet password (e.g., https, ssh, ftp)
    #[arg(long, default_value = "https")]
    protocol: InternetProtocol,
}

/// Either kind of password handle, opened from a [`Target`].
enum Credential {
    Internet(InternetCredential),
    Generic(GenericCredential),
}

impl Credential {
    fn open(client: StoreClient, target: &Target) -> Self {
        if target.internet {
            let mut credential = InternetCredential::new(client, target.item.as_str()).with_protocol(target.protocol);
            if let Some(label) = &target.label {
                credential = credential.with_label(label.as_str());
            }
            if let Some(account) = &target.account {
                credential = credential.with_account(account.as_str());
            }
            Self::Internet(credential)
        } else {
            let mut credential = GenericCredential::new(client, target.item.as_str());
            if let Some(label) = &target.label {
                credential = credential.with_label(label.as_str());
            }
            if let Some(account) = &target.account {
                credential = credential.with_account(account.as_str());
            }
            Self::Generic(credential)
        }
    }

    fn get(&self) -> Result<Option<Secret>, KeychainError> {
        match self {
            Self::Internet(c) => c.get(),
            Self::Generic(c) => c.get(),
        }
    }

    fn set(&self, password: Option<&str>) -> Result<(), KeychainError> {
        match self {
            Self::Internet(c) => c.set(password),
            Self::Generic(c) => c.set(password),
        }
    }

    fn account(&self) -> Option<&str> {
        match self {
            Self::Internet(c) => c.account(),
            Self::Generic(c) => c.account(),
        }
    }

    fn set_account(&mut self, account: Option<String>) -> Result<(), KeychainError> {
        match self {
            Self::Internet(c) => c.set_account(account),
            Self::Generic(c) => c.set_account(account),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_deref())?;
    init_logging(&config.log_level, cli.verbose);
    debug!(config_path = ?config.config_path, "configuration loaded");

    let backend = cli.backend.unwrap_or(config.backend);
    let client = StoreClient::with_backend(create_backend(
        backend == BackendKind::Keyring,
        &config.namespace,
    ));

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    match cli.command {
        Commands::Get(target) => get_password(&Credential::open(client, &target), &mut output),
        Commands::Set(target) => set_password(&Credential::open(client, &target), &mut input, &mut output),
        Commands::Delete(target) => delete_password(&Credential::open(client, &target), &mut output),
        Commands::Ensure(target) => {
            ensure_password(&mut Credential::open(client, &target), &mut input, &mut output)
        }
    }
}

fn init_logging(level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn get_password(credential: &Credential, output: &mut impl Write) -> Result<()> {
    let password = credential
        .get()
        .context("Failed to read password")?
        .context("No password stored")?;

    writeln!(output, "{}", password.expose())?;
    Ok(())
}

fn set_password(credential: &Credential, input: &mut impl BufRead, output: &mut impl Write) -> Result<()> {
    let password = read_line(input)?.context("No password given on stdin")?;
    credential
        .set(Some(password.expose()))
        .context("Failed to store password")?;

    writeln!(output, "Password has been set!")?;
    Ok(())
}

fn delete_password(credential: &Credential, output: &mut impl Write) -> Result<()> {
    credential.set(None).context("Failed to delete password")?;
    writeln!(output, "Password removed")?;
    Ok(())
}

/// Prompt for whatever is missing and store it.
///
/// An already stored password is left untouched.
fn ensure_password(credential: &mut Credential, input: &mut impl BufRead, output: &mut impl Write) -> Result<()> {
    if credential.get().context("Failed to read password")?.is_none() {
        let account = match credential.account() {
            Some(account) => account.to_string(),
            None => prompt(input, output, "What is your username?")?
                .expose()
                .to_string(),
        };
        let password = prompt(input, output, "What would you like to set your password as?")?;

        credential
            .set(Some(password.expose()))
            .context("Failed to store password")?;
        credential
            .set_account(Some(account))
            .context("Failed to store username")?;
    }

    if credential.get().context("Failed to read password")?.is_some() {
        writeln!(output, "Password has been set!")?;
    }
    Ok(())
}

fn prompt(input: &mut impl BufRead, output: &mut impl Write, question: &str) -> Result<Secret> {
    write!(output, "{} ", question)?;
    output.flush()?;
    read_line(input)?.with_context(|| format!("No answer to {:?}", question))
}

/// One line of input without its line ending; `None` at end of input or
/// for an empty line.
fn read_line(input: &mut impl BufRead) -> Result<Option<Secret>> {
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read from stdin")?;

    let trimmed = line.trim_end_matches(['\r', '\n']);
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(Secret::new(trimmed)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn target(args: &[&str]) -> Target {
        let mut argv = vec!["latchkey", "get"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Get(target) => target,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_parse_internet_target() {
        let target = target(&["example.com", "--internet", "--protocol", "ssh", "-u", "alice"]);
        assert!(target.internet);
        assert_eq!(target.protocol, InternetProtocol::Ssh);
        assert_eq!(target.account.as_deref(), Some("alice"));
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["latchkey", "delete", "svc", "--backend", "memory", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.backend, Some(BackendKind::Memory));
    }

    #[test]
    fn test_get_missing_password_fails() {
        let credential = Credential::open(StoreClient::in_memory(), &target(&["svc"]));
        let mut output = Vec::new();
        assert!(get_password(&credential, &mut output).is_err());
        assert!(output.is_empty());
    }

    #[test]
    fn test_set_then_get() {
        let client = StoreClient::in_memory();
        let credential = Credential::open(client, &target(&["svc", "-u", "alice"]));

        let mut output = Vec::new();
        set_password(&credential, &mut Cursor::new("hunter2\n"), &mut output).unwrap();

        let mut printed = Vec::new();
        get_password(&credential, &mut printed).unwrap();
        assert_eq!(String::from_utf8(printed).unwrap(), "hunter2\n");
    }

    #[test]
    fn test_set_requires_input() {
        let credential = Credential::open(StoreClient::in_memory(), &target(&["svc"]));
        let mut output = Vec::new();
        assert!(set_password(&credential, &mut Cursor::new(""), &mut output).is_err());
    }

    #[test]
    fn test_ensure_prompts_for_missing_values() {
        let client = StoreClient::in_memory();
        let mut credential = Credential::open(client.clone(), &target(&["svc"]));

        let mut output = Vec::new();
        ensure_password(&mut credential, &mut Cursor::new("alice\ns3cret\n"), &mut output).unwrap();

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("What is your username?"));
        assert!(transcript.contains("Password has been set!"));
        assert_eq!(credential.account(), Some("alice"));

        let reopened = Credential::open(client, &target(&["svc", "-u", "alice"]));
        assert_eq!(reopened.get().unwrap().unwrap().expose(), "s3cret");
    }

    #[test]
    fn test_ensure_keeps_existing_password() {
        let client = StoreClient::in_memory();
        let mut credential = Credential::open(client, &target(&["svc", "-u", "alice"]));
        credential.set(Some("original")).unwrap();

        let mut output = Vec::new();
        ensure_password(&mut credential, &mut Cursor::new(""), &mut output).unwrap();

        assert_eq!(credential.get().unwrap().unwrap().expose(), "original");
        assert_eq!(String::from_utf8(output).unwrap(), "Password has been set!\n");
    }

    #[test]
    fn test_delete_is_repeatable() {
        let credential = Credential::open(StoreClient::in_memory(), &target(&["svc"]));
        let mut output = Vec::new();
        delete_password(&credential, &mut output).unwrap();
        delete_password(&credential, &mut output).unwrap();
    }
}
