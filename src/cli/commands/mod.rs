pub mod logging;

use crate::config::{DEFAULT_STORE_PATH, DEFAULT_TIMEOUT};
use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_URL: &str = "url";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_STORE: &str = "store";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_FIRST_NAME: &str = "first-name";
pub const ARG_LAST_NAME: &str = "last-name";

pub const CMD_LOGIN: &str = "login";
pub const CMD_REGISTER: &str = "register";

fn email_arg() -> Arg {
    Arg::new(ARG_EMAIL)
        .short('e')
        .long(ARG_EMAIL)
        .help("Account email address")
        .env("USERFORMS_EMAIL")
        .required(true)
}

fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .short('p')
        .long(ARG_PASSWORD)
        .help("Account password")
        .env("USERFORMS_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("userforms")
        .about("Sign in to or register with the Taskdesk users API")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_URL)
                .short('u')
                .long(ARG_URL)
                .help("Base URL of the users API, example: https://tasks.example.com")
                .env("USERFORMS_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .short('t')
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds, 0 disables it")
                .default_value(DEFAULT_TIMEOUT)
                .env("USERFORMS_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_STORE)
                .short('s')
                .long(ARG_STORE)
                .help("File where tokens are stored after login")
                .default_value(DEFAULT_STORE_PATH)
                .env("USERFORMS_STORE")
                .global(true),
        )
        .subcommand(
            Command::new(CMD_LOGIN)
                .about("Sign in and store the returned tokens")
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(
            Command::new(CMD_REGISTER)
                .about("Create an account")
                .arg(
                    Arg::new(ARG_FIRST_NAME)
                        .short('f')
                        .long(ARG_FIRST_NAME)
                        .help("First name")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_LAST_NAME)
                        .short('l')
                        .long(ARG_LAST_NAME)
                        .help("Last name")
                        .required(true),
                )
                .arg(email_arg())
                .arg(password_arg()),
        );

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "userforms");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Sign in to or register with the Taskdesk users API".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_check_login_args() {
        temp_env::with_vars(
            [
                ("USERFORMS_URL", None::<&str>),
                ("USERFORMS_TIMEOUT", None),
                ("USERFORMS_STORE", None),
                ("USERFORMS_EMAIL", None),
                ("USERFORMS_PASSWORD", None),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "userforms",
                    "--url",
                    "https://tasks.example.com",
                    "login",
                    "--email",
                    "jane@example.com",
                    "--password",
                    "secret1",
                ]);

                let Some((name, sub)) = matches.subcommand() else {
                    panic!("expected a subcommand");
                };
                assert_eq!(name, CMD_LOGIN);
                assert_eq!(
                    sub.get_one::<String>(ARG_URL).cloned(),
                    Some("https://tasks.example.com".to_string())
                );
                assert_eq!(sub.get_one::<u64>(ARG_TIMEOUT).copied(), Some(10));
                assert_eq!(
                    sub.get_one::<String>(ARG_STORE).cloned(),
                    Some(DEFAULT_STORE_PATH.to_string())
                );
                assert_eq!(
                    sub.get_one::<String>(ARG_EMAIL).cloned(),
                    Some("jane@example.com".to_string())
                );
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("USERFORMS_URL", Some("http://localhost:8000")),
                ("USERFORMS_TIMEOUT", Some("3")),
                ("USERFORMS_STORE", Some("/tmp/session.json")),
                ("USERFORMS_EMAIL", Some("jane@example.com")),
                ("USERFORMS_PASSWORD", Some("secret1")),
                ("USERFORMS_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["userforms", "login"]);
                let Some((_, sub)) = matches.subcommand() else {
                    panic!("expected a subcommand");
                };
                assert_eq!(
                    sub.get_one::<String>(ARG_URL).cloned(),
                    Some("http://localhost:8000".to_string())
                );
                assert_eq!(sub.get_one::<u64>(ARG_TIMEOUT).copied(), Some(3));
                assert_eq!(
                    sub.get_one::<String>(ARG_STORE).cloned(),
                    Some("/tmp/session.json".to_string())
                );
                assert_eq!(
                    sub.get_one::<String>(ARG_PASSWORD).cloned(),
                    Some("secret1".to_string())
                );
                assert_eq!(
                    sub.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_default_timeout_matches_config() {
        temp_env::with_vars(
            [
                ("USERFORMS_TIMEOUT", None::<&str>),
                ("USERFORMS_EMAIL", Some("jane@example.com")),
                ("USERFORMS_PASSWORD", Some("secret1")),
            ],
            || {
                let matches = new().get_matches_from(vec!["userforms", "login"]);
                let timeout = matches
                    .subcommand()
                    .and_then(|(_, sub)| sub.get_one::<u64>(ARG_TIMEOUT).copied());
                assert_eq!(timeout, Some(crate::config::DEFAULT_TIMEOUT_SECS));
            },
        );
    }

    #[test]
    fn test_register_requires_names() {
        temp_env::with_vars(
            [
                ("USERFORMS_EMAIL", Some("jane@example.com")),
                ("USERFORMS_PASSWORD", Some("secret1")),
            ],
            || {
                let result = new().try_get_matches_from(vec![
                    "userforms",
                    "register",
                    "--first-name",
                    "Jane",
                ]);
                assert!(result.is_err());
            },
        );
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("USERFORMS_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "userforms".to_string(),
                    "register".to_string(),
                    "-f".to_string(),
                    "Jane".to_string(),
                    "-l".to_string(),
                    "Doe".to_string(),
                    "-e".to_string(),
                    "jane@example.com".to_string(),
                    "-p".to_string(),
                    "secret1".to_string(),
                ];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);
                let verbosity = matches
                    .subcommand()
                    .and_then(|(_, sub)| sub.get_one::<u8>(logging::ARG_VERBOSITY).copied());

                assert_eq!(verbosity, Some(index as u8));
            });
        }
    }
}
