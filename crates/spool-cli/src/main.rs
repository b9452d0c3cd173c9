mod sender;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, ensure};
use clap::{Parser, Subcommand};
use spool_core::impls::{DirStorage, StdoutConsole};
use spool_core::{DriveReport, Item, PersistentQueue, QueueBuilder, QueueConfig, RunState};
use tracing_subscriber::EnvFilter;
use ulid::Ulid;

use crate::sender::SimulatedSender;

#[derive(Debug, Parser)]
#[command(name = "spool", version, about = "Durable FIFO action queue")]
struct Cli {
    /// Directory holding the queue's storage units.
    #[arg(long, env = "SPOOL_DIR", default_value = "spool-data")]
    dir: PathBuf,

    /// Storage unit name (overrides the config file).
    #[arg(long)]
    name: Option<String>,

    /// JSON queue config, e.g. {"storage_name": "requests"}.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Append items at the tail.
    Push {
        #[arg(required_unless_present = "generate")]
        tokens: Vec<String>,

        /// Push N generated ULID tokens instead.
        #[arg(long, conflicts_with = "tokens")]
        generate: Option<usize>,
    },
    /// Remove the most recently pushed item.
    Pop,
    /// Empty the queue and its record.
    Clear,
    /// Print items, head first.
    List,
    /// Print the queue status as JSON.
    Status,
    /// Arm the queue and drive it from a periodic tick.
    Run {
        #[arg(long, default_value_t = 100)]
        tick_ms: u64,

        /// Items the simulated sender rejects.
        #[arg(long)]
        fail_on: Vec<String>,

        /// Probability (0..=1) that a send fails.
        #[arg(long, default_value_t = 0.0)]
        fail_rate: f64,

        /// Cancel the run after this many sends.
        #[arg(long)]
        limit: Option<usize>,

        /// Keep ticking and pick up items pushed by other processes.
        #[arg(long)]
        watch: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<QueueConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            QueueConfig::from_json(&raw).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => QueueConfig::default(),
    };
    if let Some(name) = &cli.name {
        config.storage_name = name.clone();
    }
    Ok(config)
}

fn open_queue(cli: &Cli) -> anyhow::Result<PersistentQueue<DirStorage>> {
    let config = load_config(cli)?;
    let queue = QueueBuilder::new(DirStorage::new(&cli.dir))
        .config(config)
        .build()
        .context("opening queue")?;
    Ok(queue)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut queue = open_queue(&cli)?;

    match cli.command {
        Command::Push { tokens, generate } => {
            let tokens = match generate {
                Some(n) => (0..n).map(|_| Ulid::new().to_string()).collect(),
                None => tokens,
            };
            for token in tokens {
                let item = Item::new(token)?;
                tracing::info!(%item, "pushed");
                queue.push(item);
            }
        }
        Command::Pop => match queue.pop() {
            Some(item) => println!("{item}"),
            None => tracing::info!("queue is empty"),
        },
        Command::Clear => {
            queue.clear();
            queue.save();
        }
        Command::List => queue.dump_to(&mut StdoutConsole),
        Command::Status => println!("{}", serde_json::to_string_pretty(&queue.status())?),
        Command::Run {
            tick_ms,
            fail_on,
            fail_rate,
            limit,
            watch,
        } => {
            ensure!(tick_ms > 0, "--tick-ms must be positive");
            ensure!(
                (0.0..=1.0).contains(&fail_rate),
                "--fail-rate must be within 0..=1, got {fail_rate}"
            );
            let control = queue.control();
            queue.set_action(SimulatedSender::new(fail_on, fail_rate, limit, control));
            let last = drive_until_done(&mut queue, Duration::from_millis(tick_ms), watch).await;
            println!("{}", serde_json::to_string_pretty(&last)?);
        }
    }
    Ok(())
}

/// The host tick: arm once, then call `drive()` every `tick` until the
/// queue disarms. With `watch`, a drained queue is reloaded from storage and
/// re-armed when new items show up; a failed or cancelled run still stops.
async fn drive_until_done(
    queue: &mut PersistentQueue<DirStorage>,
    tick: Duration,
    watch: bool,
) -> DriveReport {
    let control = queue.control();
    queue.run();

    let mut ticker = tokio::time::interval(tick);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut last = DriveReport::Idle;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let report = queue.drive();
                if report != DriveReport::Idle {
                    tracing::debug!(?report, "tick");
                    last = report;
                }
                if queue.is_armed() {
                    continue;
                }
                if !watch || queue.state() != RunState::Succeeded {
                    break;
                }
                queue.reload();
                if !queue.is_empty() {
                    queue.run();
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!("interrupted, cancelling run");
                control.cancel();
                break;
            }
        }
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TICK: Duration = Duration::from_millis(1);

    fn queue_in(dir: &TempDir, items: &[&str]) -> PersistentQueue<DirStorage> {
        let mut queue = QueueBuilder::new(DirStorage::new(dir.path())).build().unwrap();
        for s in items {
            queue.push(Item::new(*s).unwrap());
        }
        queue
    }

    fn sender(
        queue: &PersistentQueue<DirStorage>,
        fail_on: &[&str],
        limit: Option<usize>,
    ) -> SimulatedSender {
        SimulatedSender::new(
            fail_on.iter().map(|s| s.to_string()),
            0.0,
            limit,
            queue.control(),
        )
    }

    async fn drive_bounded(queue: &mut PersistentQueue<DirStorage>, watch: bool) -> DriveReport {
        tokio::time::timeout(Duration::from_secs(5), drive_until_done(queue, TICK, watch))
            .await
            .expect("tick loop did not stop")
    }

    #[tokio::test]
    async fn drains_the_queue_and_stops() {
        let dir = TempDir::new().unwrap();
        let mut queue = queue_in(&dir, &["a", "b", "c"]);
        let action = sender(&queue, &[], None);
        queue.set_action(action);

        let last = drive_bounded(&mut queue, false).await;
        assert_eq!(last, DriveReport::Completed { processed: 3 });
        assert_eq!(queue.state(), RunState::Succeeded);
        assert!(queue_in(&dir, &[]).is_empty());
    }

    #[tokio::test]
    async fn failure_stops_even_when_watching() {
        let dir = TempDir::new().unwrap();
        let mut queue = queue_in(&dir, &["a", "bad", "c"]);
        let action = sender(&queue, &["bad"], None);
        queue.set_action(action);

        let last = drive_bounded(&mut queue, true).await;
        assert_eq!(
            last,
            DriveReport::Failed {
                processed: 1,
                item: Item::new("bad").unwrap(),
            }
        );
        let after_restart = queue_in(&dir, &[]);
        let left: Vec<_> = after_restart.items().map(|i| i.to_string()).collect();
        assert_eq!(left, vec!["bad", "c"]);
    }

    #[tokio::test]
    async fn send_limit_cancels_the_loop() {
        let dir = TempDir::new().unwrap();
        let mut queue = queue_in(&dir, &["a", "b", "c"]);
        let action = sender(&queue, &[], Some(1));
        queue.set_action(action);

        let last = drive_bounded(&mut queue, true).await;
        assert_eq!(last, DriveReport::Cancelled { processed: 1 });
        assert_eq!(queue.state(), RunState::Idle);
        assert_eq!(queue.len(), 2);
    }

    #[tokio::test]
    async fn watch_picks_up_items_written_by_another_process() {
        let dir = TempDir::new().unwrap();
        let mut queue = queue_in(&dir, &["a"]);
        let action = sender(&queue, &["stop"], None);
        queue.set_action(action);

        let unit = queue.storage().path_of(queue.storage_name());
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            std::fs::write(unit, "late\nstop\n").unwrap();
        });

        let last = drive_bounded(&mut queue, true).await;
        assert_eq!(
            last,
            DriveReport::Failed {
                processed: 1,
                item: Item::new("stop").unwrap(),
            }
        );
        let left: Vec<_> = queue.items().map(|i| i.to_string()).collect();
        assert_eq!(left, vec!["stop"]);
    }
}
