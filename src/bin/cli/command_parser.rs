use clap::{builder::PossibleValuesParser, value_parser, Arg, ArgAction, Command};

use openshelf::types::lookup::{IdentifierKind, Shelf};

pub fn arg_parser() -> Command {
    Command::new("openshelf")
        .about("Search the Open Library catalog and the books scanned into the Internet Archive")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Log more (-v info, -vv debug)"),
        )
        .subcommand(
            Command::new("search")
                .about("Search the catalog, or show a popular book without a query")
                .arg(Arg::new("query").num_args(1..)),
        )
        .subcommand(
            Command::new("details")
                .about("Show a work with its editions")
                .arg(Arg::new("work").required(true).help("/works/{id} or the bare id"))
                .arg(
                    Arg::new("author")
                        .long("author")
                        .help("Also load this author, /authors/{id} or the bare id"),
                ),
        )
        .subcommand(
            Command::new("author")
                .about("Show an author record")
                .arg(Arg::new("key").required(true).help("/authors/{id}")),
        )
        .subcommand(
            Command::new("subject")
                .about("List works filed under a subject")
                .arg(Arg::new("subject").required(true).num_args(1..)),
        )
        .subcommand(
            Command::new("isbn")
                .about("Look up an edition by ISBN")
                .arg(Arg::new("isbn").required(true)),
        )
        .subcommand(
            Command::new("identifier")
                .about("Look up a book by ISBN, OCLC or LCCN")
                .arg(
                    Arg::new("kind")
                        .required(true)
                        .value_parser(PossibleValuesParser::new(
                            IdentifierKind::ALL.map(|x| x.as_str()),
                        )),
                )
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("reading-log")
                .about("Show one shelf of a user's reading log")
                .arg(Arg::new("username").required(true))
                .arg(
                    Arg::new("shelf")
                        .required(true)
                        .value_parser(PossibleValuesParser::new(Shelf::ALL.map(|x| x.as_str()))),
                ),
        )
        .subcommand(
            Command::new("cover")
                .about("Print the image URL of a cover")
                .arg(
                    Arg::new("id")
                        .required(true)
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("size")
                        .long("size")
                        .short('s')
                        .default_value("M")
                        .value_parser(PossibleValuesParser::new(["S", "M", "L"])),
                ),
        )
        .subcommand(
            Command::new("inside")
                .about("Search the full text of a scanned item")
                .arg(Arg::new("item").required(true).help("Internet Archive identifier"))
                .arg(Arg::new("query").required(true).num_args(1..)),
        )
        .subcommand(Command::new("serve").about("Serve the catalog as JSON over HTTP"))
        .subcommand(Command::new("config").about("Print the default configuration"))
}

pub fn arg_parser_repl() -> Command {
    arg_parser().subcommand(Command::new("exit").about("Leave the read eval print loop"))
}

pub fn arg_parser_cli() -> Command {
    arg_parser().subcommand(Command::new("repl").about("Launch a read eval print loop"))
}

pub fn generate_completions() -> Vec<String> {
    let cmd = arg_parser_repl();
    fn add_command(parent_fn_name: &str, cmd: &Command, subcmds: &mut Vec<String>) {
        let fn_name = format!(
            "{parent_fn_name} {cmd_name}",
            parent_fn_name = parent_fn_name,
            cmd_name = cmd.get_name()
        )
        .trim()
        .to_string();
        subcmds.push(fn_name.clone());
        for subcmd in cmd.get_subcommands() {
            add_command(&fn_name, subcmd, subcmds);
        }
    }
    let mut subcmds = vec![];
    for subcmd in cmd.get_subcommands() {
        add_command("", subcmd, &mut subcmds);
    }
    subcmds.sort();
    subcmds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_is_consistent() {
        arg_parser_cli().debug_assert();
        arg_parser_repl().debug_assert();
    }

    #[test]
    fn completions_cover_repl_commands() {
        let completions = generate_completions();
        assert!(completions.contains(&"search".to_string()));
        assert!(completions.contains(&"reading-log".to_string()));
        assert!(completions.contains(&"exit".to_string()));
        assert!(!completions.contains(&"repl".to_string()));
    }

    #[test]
    fn cover_size_defaults_to_medium() {
        let matches = arg_parser()
            .try_get_matches_from(["openshelf", "cover", "240727"])
            .unwrap();
        let (_, cover) = matches.subcommand().unwrap();
        assert_eq!(cover.get_one::<u64>("id"), Some(&240727));
        assert_eq!(cover.get_one::<String>("size").map(String::as_str), Some("M"));
    }
}
