use std::io;
use std::io::Read;

use tracing::error;
use tracing::info;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use watch_index::IndexConfig;
use watch_index::Key;
use watch_index::LocalNotifier;
use watch_index::Readiness;
use watch_index::Result;
use watch_index::WatchIndex;

/// Reads commands from stdin and applies them to a fresh index:
/// `N` or `+N` inserts, `-N` deletes, `!N` reports a hangup on N and `?`
/// prints the in-order listing. The listing is printed again at EOF.
fn main() -> Result<()> {
    init_observability();

    let config = IndexConfig::new()?.validate()?;
    info!(?config, "driver starting");

    let mut index = WatchIndex::new(Box::new(LocalNotifier::new(&config.notifier)));

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    for token in input.split_whitespace() {
        let Some(command) = Command::parse(token) else {
            warn!(token, "ignoring unrecognised token");
            continue;
        };

        if let Err(e) = command.apply(&mut index) {
            error!(token, "command failed: {}", e);
        }
        if config.driver.print_after_each {
            println!("{}", index.tree());
        }
    }

    println!("{}", index.tree());

    let black_height = index.tree().validate()?;
    info!(entries = index.len(), black_height, "driver finished");
    Ok(())
}

enum Command {
    Insert(Key),
    Delete(Key),
    Hangup(Key),
    Print,
}

impl Command {
    fn parse(token: &str) -> Option<Self> {
        if token == "?" {
            return Some(Command::Print);
        }

        let (command, digits): (fn(Key) -> Command, &str) =
            if let Some(rest) = token.strip_prefix('+') {
                (Command::Insert, rest)
            } else if let Some(rest) = token.strip_prefix('-') {
                (Command::Delete, rest)
            } else if let Some(rest) = token.strip_prefix('!') {
                (Command::Hangup, rest)
            } else {
                (Command::Insert, token)
            };

        digits.parse().ok().map(command)
    }

    fn apply(
        self,
        index: &mut WatchIndex,
    ) -> Result<()> {
        match self {
            Command::Insert(key) => {
                index.insert(key, close_on_hangup)?;
            }
            Command::Delete(key) => {
                index.remove(key);
            }
            Command::Hangup(key) => {
                index.dispatch(key, Readiness::Hangup)?;
            }
            Command::Print => println!("{}", index.tree()),
        }
        Ok(())
    }
}

/// Drops the entry once its peer has gone away.
fn close_on_hangup(
    index: &mut WatchIndex,
    key: Key,
    readiness: Readiness,
) -> Result<()> {
    if readiness == Readiness::Hangup {
        info!(key, "peer closed, removing entry");
        index.remove(key);
    }
    Ok(())
}

fn init_observability() {
    let base_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(EnvFilter::from_default_env());
    tracing_subscriber::registry().with(base_subscriber).init();
}
