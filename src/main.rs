//! Terminal front-end for the COVID-19 tracker.
//!
//! Reads one command per line from stdin and prints the dashboard to stdout.
//! Fetch completions are applied as they arrive, between commands.

use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use covid_tracker::{render, DiseaseClient, Region, Session, StatKind, TrackerConfig, TrackerError};

const HELP: &str = "\
commands:
  region <worldwide|CODE>         select a region
  stat <cases|recovered|deaths>   select the statistic
  countries                       list selectable countries
  table                           live cases by country
  chart                           worldwide new counts, last 14 days
  show                            redraw the info boxes
  help                            this text
  quit";

const CHART_POINTS: usize = 14;

enum Command {
    Region(Region),
    Stat(StatKind),
    Countries,
    Table,
    Chart,
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, TrackerError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next().unwrap_or_default();

    let command = match verb {
        "region" | "r" => Command::Region(arg.parse()?),
        "stat" | "s" => Command::Stat(arg.parse()?),
        "countries" => Command::Countries,
        "table" | "t" => Command::Table,
        "chart" | "c" => Command::Chart,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => {
            println!("unknown command `{other}`, try `help`");
            return Ok(None);
        }
    };
    Ok(Some(command))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = TrackerConfig::from_env()?;
    info!(
        api_base = %config.api_base,
        history_days = config.history_days,
        timeout_secs = config.request_timeout.as_secs(),
        "configuration loaded"
    );

    let mut session = Session::new(DiseaseClient::new(&config), config.history_days);
    session.start();
    println!("{HELP}");

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        tokio::select! {
            Some(_) = session.next_event(), if session.in_flight() > 0 => {
                if session.in_flight() == 0 {
                    print!("{}", render::info_boxes(session.dashboard()));
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = match parse_command(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };

                match command {
                    Command::Region(region) => {
                        if let Err(e) = session.choose_region(region) {
                            warn!(error = %e, "region rejected");
                            println!("{e}");
                        }
                    }
                    Command::Stat(kind) => {
                        session.choose_statistic(kind);
                        print!("{}", render::info_boxes(session.dashboard()));
                    }
                    Command::Countries => print!("{}", render::countries(session.dashboard())),
                    Command::Table => {
                        print!("{}", render::table(session.dashboard(), config.table_rows))
                    }
                    Command::Chart => {
                        print!("{}", render::chart(session.dashboard(), CHART_POINTS))
                    }
                    Command::Show => print!("{}", render::info_boxes(session.dashboard())),
                    Command::Help => println!("{HELP}"),
                    Command::Quit => break,
                }
            }
        }
    }

    info!("bye");
    Ok(())
}
