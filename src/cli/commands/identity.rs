use crate::customer::phone::{valid_country_code, DEFAULT_COUNTRY_CODE};
use clap::{builder::ValueParser, Arg, ArgMatches, Command};

pub const ARG_COGNITO_CLIENT_ID: &str = "cognito-client-id";
pub const ARG_COUNTRY_CODE: &str = "country-code";

#[derive(Debug, Clone)]
pub struct Options {
    pub client_id: String,
    pub country_code: String,
}

impl Options {
    /// Parse identity provider arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the app client id is missing or blank.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let client_id = match matches.get_one::<String>(ARG_COGNITO_CLIENT_ID) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => anyhow::bail!("missing required argument: --{ARG_COGNITO_CLIENT_ID}"),
        };

        let country_code = matches
            .get_one::<String>(ARG_COUNTRY_CODE)
            .cloned()
            .unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string());

        Ok(Self {
            client_id,
            country_code,
        })
    }
}

#[must_use]
pub fn validator_country_code() -> ValueParser {
    ValueParser::from(move |code: &str| -> std::result::Result<String, String> {
        let code = code.trim();
        if valid_country_code(code) {
            Ok(code.to_string())
        } else {
            Err("expected '+' followed by 1 to 3 digits".to_string())
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_COGNITO_CLIENT_ID)
                .long(ARG_COGNITO_CLIENT_ID)
                .help("Cognito user pool app client id")
                .long_help(
                    "Cognito user pool app client id. The client must allow the \
                     USER_PASSWORD_AUTH flow and have no client secret.",
                )
                .env("COGNITO_CLIENT_ID")
                .required(true),
        )
        .arg(
            Arg::new(ARG_COUNTRY_CODE)
                .long(ARG_COUNTRY_CODE)
                .help("Country calling code prefixed to 10-digit national numbers")
                .env("CUSTOMER_AUTH_COUNTRY_CODE")
                .default_value(DEFAULT_COUNTRY_CODE)
                .value_parser(validator_country_code()),
        )
}
