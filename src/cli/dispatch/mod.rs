//! Maps validated CLI matches to a form action.

use crate::{
    cli::{
        actions::{login, register, Action},
        commands::{
            ARG_EMAIL, ARG_FIRST_NAME, ARG_LAST_NAME, ARG_PASSWORD, ARG_STORE, ARG_TIMEOUT,
            ARG_URL, CMD_LOGIN, CMD_REGISTER,
        },
    },
    config::{ClientConfig, DEFAULT_TIMEOUT_SECS},
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;

fn client_config(matches: &ArgMatches) -> Result<ClientConfig> {
    let url = matches
        .get_one::<String>(ARG_URL)
        .context("missing required argument: --url")?;
    let timeout = matches
        .get_one::<u64>(ARG_TIMEOUT)
        .copied()
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let mut config = ClientConfig::new(url)
        .context("invalid USERFORMS_URL")?
        .with_timeout_secs(timeout);
    if let Some(store) = matches.get_one::<String>(ARG_STORE) {
        config = config.with_store_path(store);
    }

    Ok(config)
}

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: --{name}"))
}

/// # Errors
/// Returns an error if required arguments are missing or the base URL is invalid.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((CMD_LOGIN, sub)) => Ok(Action::Login(login::Args {
            config: client_config(sub)?,
            email: required(sub, ARG_EMAIL)?,
            password: SecretString::from(required(sub, ARG_PASSWORD)?),
        })),
        Some((CMD_REGISTER, sub)) => Ok(Action::Register(register::Args {
            config: client_config(sub)?,
            first_name: required(sub, ARG_FIRST_NAME)?,
            last_name: required(sub, ARG_LAST_NAME)?,
            email: required(sub, ARG_EMAIL)?,
            password: SecretString::from(required(sub, ARG_PASSWORD)?),
        })),
        Some((name, _)) => Err(anyhow!("unknown command: {name}")),
        None => Err(anyhow!("a command is required")),
    }
}
