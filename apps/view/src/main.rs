use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use safetywise_view::presenter::render;
use safetywise_view::{HttpBackend, SafetyView, TimeBand, API_BASE};

const HELP: &str = "Type a destination. :pick N selects a suggestion, :time N picks a timeframe, :quit exits.";

enum Command {
    Query(String),
    Pick(usize),
    Time(usize),
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let Some(rest) = line.strip_prefix(':') else {
        return Some(Command::Query(line.to_string()));
    };
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next().map(str::parse::<usize>)) {
        (Some("quit"), _) => Some(Command::Quit),
        (Some("pick"), Some(Ok(n))) if n > 0 => Some(Command::Pick(n - 1)),
        (Some("time"), Some(Ok(n))) if n > 0 => Some(Command::Time(n - 1)),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    // Logs go to stderr; stdout carries the rendered frames
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting SafetyWise view v{} against {API_BASE}", env!("CARGO_PKG_VERSION"));

    let view = SafetyView::new(Arc::new(HttpBackend::new()));

    let mut updates = view.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let frame = render(&updates.borrow_and_update());
            println!("{frame}");
        }
    });

    println!("{}", render(&view.state()));
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Some(Command::Query(query)) => drop(view.set_query(query)),
            Some(Command::Pick(index)) => {
                let Some(suggestion) = view.state().suggestions.get(index).cloned() else {
                    warn!("No suggestion #{}", index + 1);
                    continue;
                };
                let view = view.clone();
                tokio::spawn(async move { view.select_suggestion(&suggestion).await });
            }
            Some(Command::Time(index)) => match TimeBand::OPTIONS.get(index) {
                Some(band) => view.set_time_band(*band),
                None => warn!("No timeframe #{}", index + 1),
            },
            Some(Command::Quit) => break,
            None => println!("{HELP}"),
        }
    }

    Ok(())
}
