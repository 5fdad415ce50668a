use clap::Subcommand;
use tempo_core::storage::{Database, StatsStore};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Cumulative totals and the day streak
    Show,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        StatsAction::Show => {
            let stats = StatsStore::new(&db).get();
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
