pub mod directory;
pub mod identity;
pub mod logging;

use crate::cli::actions::Function;
use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_VERBOSE_ERRORS: &str = "verbose-errors";

#[must_use]
pub fn new(function: Function) -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new(function.name())
        .about(function.about())
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_VERBOSE_ERRORS)
                .long(ARG_VERBOSE_ERRORS)
                .help("Include the underlying error text in 4xx/5xx response bodies")
                .env("CUSTOMER_AUTH_VERBOSE_ERRORS")
                .default_value("true")
                .value_parser(clap::value_parser!(bool)),
        );

    let command = directory::with_args(command);
    let command = identity::with_args(command);
    logging::with_args(command)
}
