use clap::Subcommand;
use tempo_core::storage::{Database, PreferencesStore, Theme};

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Print the effective preferences as JSON
    Show,
    /// Update one or more preference toggles
    Set {
        /// light, dark or system
        #[arg(long)]
        theme: Option<String>,
        #[arg(long)]
        notifications: Option<bool>,
        #[arg(long)]
        sound: Option<bool>,
        #[arg(long)]
        auto_start_breaks: Option<bool>,
        #[arg(long)]
        auto_start_pomodoros: Option<bool>,
    },
}

fn parse_theme(value: &str) -> Result<Theme, String> {
    match value {
        "light" => Ok(Theme::Light),
        "dark" => Ok(Theme::Dark),
        "system" => Ok(Theme::System),
        other => Err(format!("unknown theme '{other}' (expected light, dark or system)")),
    }
}

pub fn run(action: PrefsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let store = PreferencesStore::new(&db);

    match action {
        PrefsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&store.get())?);
        }
        PrefsAction::Set {
            theme,
            notifications,
            sound,
            auto_start_breaks,
            auto_start_pomodoros,
        } => {
            let mut prefs = store.get();
            if let Some(value) = theme {
                prefs.theme = parse_theme(&value)?;
            }
            if let Some(v) = notifications {
                prefs.notifications = v;
            }
            if let Some(v) = sound {
                prefs.sound = v;
            }
            if let Some(v) = auto_start_breaks {
                prefs.auto_start_breaks = v;
            }
            if let Some(v) = auto_start_pomodoros {
                prefs.auto_start_pomodoros = v;
            }
            store.set(prefs);
            println!("{}", serde_json::to_string_pretty(&store.get())?);
        }
    }
    Ok(())
}
