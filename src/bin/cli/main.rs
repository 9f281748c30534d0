use std::sync::Arc;

use anyhow::Result;
use clap::ArgMatches;
use reedline::Signal;
use tracing::{debug, Level};

mod command_parser;
mod prompt;
mod repl;
mod server;

use openshelf::{
    config::Config,
    notify::TerminalNotifier,
    traits::DisplayTerminal,
    types::{
        book::Book,
        cover::CoverSize,
        key::{author_key_from_id, work_id_from_key, WORKS_PREFIX},
        lookup::{IdentifierKind, Shelf},
    },
    CatalogClient,
};

/// Shown when `search` is given no query.
const POPULAR_BOOKS: [&str; 5] = [
    "The Lord of the Rings",
    "1984",
    "Pride and Prejudice",
    "The Great Gatsby",
    "To Kill a Mockingbird",
];

struct Context {
    client: CatalogClient,
    config: Config,
}

enum Flow {
    Continue,
    Exit,
}

fn words(matches: &ArgMatches, name: &str) -> Option<String> {
    matches
        .get_many::<String>(name)
        .map(|x| x.cloned().collect::<Vec<String>>().join(" "))
}

fn arg<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("{name} is required"))
}

fn print_or_missing(ctx: &Context, rendered: Option<String>, missing: &str) {
    match rendered {
        Some(s) => println!("{s}"),
        None => println!("{}", ctx.config.output_notice.format_str(missing)),
    }
}

async fn handle_matches(matches: &ArgMatches, ctx: &Context) -> Result<Flow> {
    let config = &ctx.config;
    match matches.subcommand() {
        Some(("search", matches)) => {
            let query = words(matches, "query").unwrap_or_else(|| {
                println!("Try one of: {}", POPULAR_BOOKS.join(", "));
                POPULAR_BOOKS[0].to_string()
            });
            println!("{}", ctx.client.search(&query).await.fmt_to_string(config));
        }
        Some(("details", matches)) => {
            let work = arg(matches, "work")?;
            let book = Book {
                key: format!("{WORKS_PREFIX}{}", work_id_from_key(work)),
                author_key: matches
                    .get_one::<String>("author")
                    .map(|x| vec![author_key_from_id(x)]),
                ..Book::default()
            };
            println!("{}", ctx.client.load_book_card(&book).await.fmt_to_string(config));
        }
        Some(("author", matches)) => {
            let author = ctx.client.author_details(arg(matches, "key")?).await;
            print_or_missing(
                ctx,
                author.map(|x| x.fmt_to_string(config)),
                "Author not available.",
            );
        }
        Some(("subject", matches)) => {
            let subject = words(matches, "subject").unwrap_or_default();
            let books = ctx.client.subject_books(&subject).await;
            print_or_missing(
                ctx,
                books.map(|x| x.fmt_to_string(config)),
                "Subject not available.",
            );
        }
        Some(("isbn", matches)) => {
            let edition = ctx.client.book_by_isbn(arg(matches, "isbn")?).await;
            print_or_missing(
                ctx,
                edition.map(|x| x.fmt_to_string(config)),
                "No edition with that ISBN.",
            );
        }
        Some(("identifier", matches)) => {
            let kind = arg(matches, "kind")?
                .parse::<IdentifierKind>()
                .map_err(anyhow::Error::msg)?;
            let books = ctx.client.book_by_identifier(kind, arg(matches, "id")?).await;
            let rendered = books.filter(|x| !x.is_empty()).map(|books| {
                books
                    .values()
                    .map(|x| x.fmt_to_string(config))
                    .collect::<Vec<String>>()
                    .join("\n")
            });
            print_or_missing(ctx, rendered, "No book with that identifier.");
        }
        Some(("reading-log", matches)) => {
            let shelf = arg(matches, "shelf")?
                .parse::<Shelf>()
                .map_err(anyhow::Error::msg)?;
            let log = ctx.client.reading_log(arg(matches, "username")?, shelf).await;
            print_or_missing(
                ctx,
                log.map(|x| x.fmt_to_string(config)),
                "Reading log not available.",
            );
        }
        Some(("cover", matches)) => {
            let id = *matches
                .get_one::<u64>("id")
                .ok_or_else(|| anyhow::anyhow!("id is required"))?;
            let size = arg(matches, "size")?
                .parse::<CoverSize>()
                .map_err(anyhow::Error::msg)?;
            println!("{}", ctx.client.cover_url(id, size));
        }
        Some(("inside", matches)) => {
            let query = words(matches, "query").unwrap_or_default();
            let results = ctx.client.search_inside(&query, arg(matches, "item")?).await;
            print_or_missing(
                ctx,
                results.map(|x| x.fmt_to_string(config)),
                "No results found",
            );
        }
        Some(("serve", _)) => {
            server::start(ctx.client.clone(), &config.server_address).await?;
        }
        Some(("config", _)) => {
            println!("{}", Config::default_as_string()?);
        }
        Some(("exit", _)) => return Ok(Flow::Exit),
        Some((name, _)) => anyhow::bail!("Unknown command {name}"),
        None => unreachable!("subcommand required"),
    }
    Ok(Flow::Continue)
}

async fn handle_command(command: &str, ctx: &Context) -> Result<Flow> {
    let Some(words) = shlex::split(command) else {
        anyhow::bail!("Invalid command");
    };
    if words.is_empty() {
        return Ok(Flow::Continue);
    }
    let matches = command_parser::arg_parser_repl()
        .try_get_matches_from(std::iter::once("openshelf".to_string()).chain(words))?;
    handle_matches(&matches, ctx).await
}

async fn run_repl(ctx: &Context) -> Result<()> {
    let mut repl = repl::Repl::new(
        command_parser::generate_completions(),
        &ctx.config.history_path(),
    )?;
    loop {
        match repl.read_line() {
            Ok(Signal::Success(buffer)) => match handle_command(&buffer, ctx).await {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => (),
                Err(e) => println!("Error: {}", e),
            },
            Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => {
                println!("\nAborted!");
                break;
            }
            x => {
                debug!("Event: {:?}", x);
            }
        }
    }
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = command_parser::arg_parser_cli().get_matches();

    dotenvy::dotenv().ok();
    init_logging(matches.get_count("verbose"));

    let config = Config::read_config()?;
    let notifier = Arc::new(TerminalNotifier::new(config.output_notice.clone()));
    let client = CatalogClient::new(&config, notifier)?;
    let ctx = Context { client, config };

    if let Some(("repl", _)) = matches.subcommand() {
        run_repl(&ctx).await?;
    } else {
        handle_matches(&matches, &ctx).await?;
    }

    Ok(())
}
