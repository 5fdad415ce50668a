use clap::Subcommand;
use tempo_core::storage::{Database, SessionStore};

#[derive(Subcommand)]
pub enum SessionsAction {
    /// Print the session history, oldest first
    List,
}

pub fn run(action: SessionsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        SessionsAction::List => {
            let history = SessionStore::new(&db).history();
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
    }
    Ok(())
}
