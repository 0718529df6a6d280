use crate::cli::commands::open_store;
use crate::cli::parser::{Commands, NoteAction};
use crate::config::Config;
use crate::core::NoteLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_local;
use std::collections::HashMap;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Note { action } = cmd {
        let mut store = open_store(cfg)?;

        match action {
            NoteAction::Add { text, plant } => {
                let note = NoteLogic::add(&mut store, text, *plant)?;
                success(format!("Note #{} added", note.id));
            }

            NoteAction::Edit {
                id,
                text,
                plant,
                general,
            } => {
                let link = if *general { Some(None) } else { plant.map(Some) };
                let note = NoteLogic::update(&mut store, *id, text.as_deref(), link)?;
                success(format!("Note #{} updated", note.id));
            }

            NoteAction::Del { id } => {
                NoteLogic::delete(&mut store, *id)?;
                success(format!("Note #{id} deleted"));
            }

            NoteAction::Done { id } => {
                let note = NoteLogic::toggle_done(&mut store, *id)?;
                if note.done {
                    success(format!("Note #{id} marked as done"));
                } else {
                    success(format!("Note #{id} reopened"));
                }
            }

            NoteAction::List { plant } => {
                let notes = NoteLogic::list(&store, *plant)?;
                if notes.is_empty() {
                    info("No notes.");
                    return Ok(());
                }

                let names: HashMap<i64, String> = store
                    .list_plants()?
                    .into_iter()
                    .map(|p| (p.id, p.name))
                    .collect();

                let mut table = Table::new(vec![
                    Column::new("ID", 3),
                    Column::new("Date", 10),
                    Column::new("Plant", 6),
                    Column::new("Done", 4),
                    Column::new("Text", 10),
                ]);
                for n in notes {
                    table.add_row(vec![
                        n.id.to_string(),
                        format_local(&n.created_at),
                        n.plant_id
                            .and_then(|pid| names.get(&pid).cloned())
                            .unwrap_or_else(|| "—".to_string()),
                        if n.done { "✔".to_string() } else { String::new() },
                        n.text,
                    ]);
                }
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
