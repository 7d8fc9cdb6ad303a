//! Startup configuration.
//!
//! Settings come from the environment (or the matching flags) and are checked
//! once, before anything else runs. A missing or invalid value is a clap
//! error and the process exits.

use std::fmt;

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, ValueEnum};

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AppEnv {
    Dev,
    Staging,
    Prod,
}

impl AppEnv {
    pub fn is_production(self) -> bool {
        self == AppEnv::Prod
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppEnv::Dev => write!(f, "dev"),
            AppEnv::Staging => write!(f, "staging"),
            AppEnv::Prod => write!(f, "prod"),
        }
    }
}

/// Settings handed explicitly to the transport, logger and cache policy.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Base address of the auth API
    #[arg(long, env = "BASE_URL", value_parser = NonEmptyStringValueParser::new())]
    pub base_url: String,

    /// Deployment environment
    #[arg(long = "env", env = "ENV", value_enum)]
    pub env: AppEnv,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "login", version, about = "Sign in against the auth API")]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[arg(short, long, env = "LOGIN_USERNAME", default_value = "")]
    pub username: String,

    #[arg(short, long, env = "LOGIN_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Ask for a long-lived session
    #[arg(long)]
    pub remember: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("login").chain(args.iter().copied()))
    }

    #[test]
    fn reads_settings_from_environment() {
        temp_env::with_vars(
            [
                ("BASE_URL", Some("http://localhost:3000")),
                ("ENV", Some("staging")),
                ("LOGIN_USERNAME", None),
            ],
            || {
                let cli = parse(&[]).unwrap();
                assert_eq!(cli.settings.base_url, "http://localhost:3000");
                assert_eq!(cli.settings.env, AppEnv::Staging);
                assert!(cli.username.is_empty());
                assert!(!cli.remember);
            },
        );
    }

    #[test]
    fn flags_override_environment() {
        temp_env::with_vars(
            [("BASE_URL", Some("http://env")), ("ENV", Some("dev"))],
            || {
                let cli = parse(&["--base-url", "http://flag", "--env", "prod"]).unwrap();
                assert_eq!(cli.settings.base_url, "http://flag");
                assert!(cli.settings.env.is_production());
            },
        );
    }

    #[test]
    fn missing_base_url_fails() {
        temp_env::with_vars([("BASE_URL", None::<&str>), ("ENV", Some("dev"))], || {
            assert!(parse(&[]).is_err());
        });
    }

    #[test]
    fn empty_base_url_fails() {
        temp_env::with_vars([("BASE_URL", Some("")), ("ENV", Some("dev"))], || {
            assert!(parse(&[]).is_err());
        });
    }

    #[test]
    fn unknown_env_fails() {
        temp_env::with_vars(
            [("BASE_URL", Some("http://localhost")), ("ENV", Some("qa"))],
            || {
                assert!(parse(&[]).is_err());
            },
        );
    }

    #[test]
    fn missing_env_fails() {
        temp_env::with_vars(
            [("BASE_URL", Some("http://localhost")), ("ENV", None)],
            || {
                assert!(parse(&[]).is_err());
            },
        );
    }

    #[test]
    fn credentials_and_verbosity() {
        temp_env::with_vars(
            [
                ("BASE_URL", Some("http://localhost")),
                ("ENV", Some("dev")),
                ("LOGIN_USERNAME", None),
                ("LOGIN_PASSWORD", Some("secret")),
            ],
            || {
                let cli = parse(&["-u", "alice", "--remember", "-vv"]).unwrap();
                assert_eq!(cli.username, "alice");
                assert_eq!(cli.password, "secret");
                assert!(cli.remember);
                assert_eq!(cli.verbose, 2);
            },
        );
    }

    #[test]
    fn env_display_matches_cli_values() {
        for env in [AppEnv::Dev, AppEnv::Staging, AppEnv::Prod] {
            let value = env.to_possible_value().unwrap();
            assert_eq!(value.get_name(), env.to_string());
        }
    }
}
