use clap::Subcommand;
use tempo_core::storage::Database;
use tempo_core::timer::{Ticker, TimerEngine};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the timer and drive it until it returns to idle
    Run {
        /// Stop after this many ticks even if the timer is still going
        #[arg(long)]
        max_ticks: Option<u64>,
    },
    /// Print the timer state as JSON
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        TimerAction::Run { max_ticks } => {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            rt.block_on(drive(&db, max_ticks))
        }
        TimerAction::Status => {
            let engine = TimerEngine::new(&db);
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            Ok(())
        }
    }
}

/// Tick the engine once per second, printing events as JSON lines.
///
/// Holds at most one live [`Ticker`]. Whenever the engine's status changes
/// the old ticker is cancelled and a fresh one created only if the engine
/// still wants ticks; once it idles, the loop ends.
async fn drive(db: &Database, max_ticks: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = TimerEngine::new(db);
    if let Some(event) = engine.start() {
        println!("{}", serde_json::to_string(&event)?);
    }

    let mut status = engine.status();
    let mut ticker = engine.needs_ticks().then(Ticker::every_second);
    let mut ticks = 0u64;
    while let Some(source) = ticker.as_mut() {
        if max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }
        source.wait().await;
        ticks += 1;
        if let Some(event) = engine.tick() {
            println!("{}", serde_json::to_string(&event)?);
        }
        if engine.status() != status {
            status = engine.status();
            if let Some(source) = ticker.take() {
                source.cancel();
            }
            if engine.needs_ticks() {
                ticker = Some(Ticker::every_second());
            }
        }
    }

    println!("{}", serde_json::to_string(&engine.snapshot())?);
    Ok(())
}
