use std::path::PathBuf;

use clap::Subcommand;
use tempo_core::storage::{backup, Database};

#[derive(Subcommand)]
pub enum DataAction {
    /// Print a backup blob of all persisted records
    Export,
    /// Restore from a backup blob file; sections apply independently
    Import {
        /// Path to the blob, or "-" for stdin
        file: PathBuf,
    },
    /// Delete all persisted records
    Clear,
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        DataAction::Export => {
            println!("{}", backup::export_all(&db)?);
        }
        DataAction::Import { file } => {
            let blob = if file.as_os_str() == "-" {
                std::io::read_to_string(std::io::stdin())?
            } else {
                std::fs::read_to_string(&file)?
            };
            if !backup::import_all(&db, &blob) {
                return Err("import failed: malformed backup blob".into());
            }
            println!("{{\"imported\": true}}");
        }
        DataAction::Clear => {
            backup::clear_all(&db);
            println!("{{\"cleared\": true}}");
        }
    }
    Ok(())
}
