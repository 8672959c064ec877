//! Tokenization of the getfacl and setfacl command lines.

use std::ffi::OsString;

use clap::{Arg, ArgAction, ArgMatches, Command, builder::OsStringValueParser};

/// Flags and operands recognised on a command line.
///
/// Flags that a command does not define stay `false`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ParsedArgs {
    pub(crate) show_help: bool,
    pub(crate) recursive: bool,
    pub(crate) remove_all: bool,
    pub(crate) remove_default: bool,
    pub(crate) modify: bool,
    pub(crate) remove_entries: bool,
    pub(crate) set: bool,
    pub(crate) operands: Vec<OsString>,
}

fn flag(id: &'static str, short: char, help: &'static str) -> Arg {
    Arg::new(id).short(short).help(help).action(ArgAction::SetTrue)
}

fn base_command(program_name: &'static str) -> Command {
    Command::new(program_name)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg_required_else_help(false)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(flag("recursive", 'R', "Apply to all files and directories recursively."))
}

fn operands_arg() -> Arg {
    Arg::new("args")
        .action(ArgAction::Append)
        .num_args(0..)
        .trailing_var_arg(true)
        .value_parser(OsStringValueParser::new())
}

/// Builds the `clap` command for `getfacl`.
pub(crate) fn getfacl_command(program_name: &'static str) -> Command {
    base_command(program_name).arg(operands_arg())
}

/// Builds the `clap` command for `setfacl`.
pub(crate) fn setfacl_command(program_name: &'static str) -> Command {
    base_command(program_name)
        .arg(flag("remove-all", 'b', "Remove all but the base ACL entries."))
        .arg(flag("remove-default", 'k', "Remove the default ACL."))
        .arg(flag("modify", 'm', "Modify ACL entries."))
        .arg(flag("remove", 'x', "Remove the listed ACL entries."))
        .arg(
            Arg::new("set")
                .long("set")
                .help("Fully replace the ACL.")
                .action(ArgAction::SetTrue),
        )
        .arg(operands_arg())
}

pub(crate) fn parse_getfacl_args<I, S>(
    program_name: &'static str,
    arguments: I,
) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let matches = getfacl_command(program_name).try_get_matches_from(arguments)?;
    Ok(collect(matches, false))
}

pub(crate) fn parse_setfacl_args<I, S>(
    program_name: &'static str,
    arguments: I,
) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let matches = setfacl_command(program_name).try_get_matches_from(arguments)?;
    Ok(collect(matches, true))
}

fn collect(mut matches: ArgMatches, setfacl: bool) -> ParsedArgs {
    let setfacl_flag = |matches: &ArgMatches, id: &str| setfacl && matches.get_flag(id);

    ParsedArgs {
        show_help: matches.get_flag("help"),
        recursive: matches.get_flag("recursive"),
        remove_all: setfacl_flag(&matches, "remove-all"),
        remove_default: setfacl_flag(&matches, "remove-default"),
        modify: setfacl_flag(&matches, "modify"),
        remove_entries: setfacl_flag(&matches, "remove"),
        set: setfacl_flag(&matches, "set"),
        operands: matches
            .remove_many::<OsString>("args")
            .map(Iterator::collect)
            .unwrap_or_default(),
    }
}
