use crate::directory::DEFAULT_PHONE_INDEX;
use clap::{Arg, ArgMatches, Command};

pub const ARG_USERS_TABLE: &str = "users-table";
pub const ARG_PHONE_INDEX: &str = "phone-index";

#[derive(Debug, Clone)]
pub struct Options {
    pub users_table: String,
    pub phone_index: String,
}

impl Options {
    /// Parse user directory arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the table name is missing or blank.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let users_table = match matches.get_one::<String>(ARG_USERS_TABLE) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => anyhow::bail!("missing required argument: --{ARG_USERS_TABLE}"),
        };

        let phone_index = matches
            .get_one::<String>(ARG_PHONE_INDEX)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_PHONE_INDEX.to_string());

        Ok(Self {
            users_table,
            phone_index,
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_USERS_TABLE)
                .long(ARG_USERS_TABLE)
                .help("DynamoDB table holding user profiles")
                .env("USERS_TABLE")
                .required(true),
        )
        .arg(
            Arg::new(ARG_PHONE_INDEX)
                .long(ARG_PHONE_INDEX)
                .help("Secondary index keyed by PHONE#<e164>")
                .env("USERS_PHONE_INDEX")
                .default_value(DEFAULT_PHONE_INDEX),
        )
}
