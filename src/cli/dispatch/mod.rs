//! Map validated CLI arguments to the action the binary runs.

use crate::cli::{
    actions::{serve::Args, Action, Function},
    commands::{directory, identity, ARG_VERBOSE_ERRORS},
};
use anyhow::Result;

/// Build the serve action for `function` from parsed matches.
///
/// # Errors
/// Returns an error if required arguments are missing or blank.
pub fn handler(function: Function, matches: &clap::ArgMatches) -> Result<Action> {
    let directory_opts = directory::Options::parse(matches)?;
    let identity_opts = identity::Options::parse(matches)?;
    let verbose_errors = matches
        .get_one::<bool>(ARG_VERBOSE_ERRORS)
        .copied()
        .unwrap_or(true);

    Ok(Action::Serve(Args {
        function,
        users_table: directory_opts.users_table,
        phone_index: directory_opts.phone_index,
        cognito_client_id: identity_opts.client_id,
        country_code: identity_opts.country_code,
        verbose_errors,
    }))
}
