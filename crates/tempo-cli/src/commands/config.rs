use clap::Subcommand;
use tempo_core::storage::{ConfigStore, Database};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as JSON
    Show,
    /// Update duration fields (minutes, fractions allowed); out-of-range
    /// values are clamped, not rejected
    Set {
        /// Focus duration in minutes
        #[arg(long)]
        focus: Option<f64>,
        /// Short break duration in minutes
        #[arg(long = "break")]
        break_duration: Option<f64>,
        /// Long break duration in minutes
        #[arg(long)]
        long_break: Option<f64>,
        /// Focus sessions between long breaks
        #[arg(long)]
        cycle: Option<u32>,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let store = ConfigStore::new(&db);

    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&store.get())?);
        }
        ConfigAction::Set {
            focus,
            break_duration,
            long_break,
            cycle,
        } => {
            let mut config = store.get();
            if let Some(v) = focus {
                config.focus_duration = v;
            }
            if let Some(v) = break_duration {
                config.break_duration = v;
            }
            if let Some(v) = long_break {
                config.long_break_duration = v;
            }
            if let Some(v) = cycle {
                config.sessions_until_long_break = v;
            }
            store.set(config);
            println!("{}", serde_json::to_string_pretty(&store.get())?);
        }
    }
    Ok(())
}
