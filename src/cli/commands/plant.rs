use crate::cli::commands::{open_reminders, open_store};
use crate::cli::parser::{Commands, PlantAction};
use crate::config::Config;
use crate::core::PlantLogic;
use crate::errors::AppResult;
use crate::models::Plant;
use crate::ui::messages::{info, success};
use crate::utils::formatting::or_dash;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Plant { action } = cmd {
        let mut store = open_store(cfg)?;

        match action {
            PlantAction::Add {
                name,
                plant_type,
                notes,
            } => {
                let plant = PlantLogic::add(&mut store, Plant::new(name.trim(), plant_type, notes))?;
                success(format!("Plant #{} added: {}", plant.id, plant.name));
            }

            PlantAction::Edit {
                id,
                name,
                plant_type,
                notes,
            } => {
                let mut plant = store.get_plant(*id)?;
                if let Some(n) = name {
                    plant.name = n.trim().to_string();
                }
                if let Some(t) = plant_type {
                    plant.plant_type = t.clone();
                }
                if let Some(n) = notes {
                    plant.notes = n.clone();
                }
                PlantLogic::update(&mut store, &plant)?;
                success(format!("Plant #{} updated", plant.id));
            }

            PlantAction::Del { id } => {
                let mut reminders = open_reminders(cfg)?;
                let removed = PlantLogic::delete(&mut store, &mut reminders, *id)?;
                success(format!(
                    "Plant #{id} deleted ({} care events removed)",
                    removed.len()
                ));
            }

            PlantAction::List => {
                let plants = PlantLogic::list(&store)?;
                if plants.is_empty() {
                    info("No plants yet. Add one with `plantcare plant add <name>`.");
                    return Ok(());
                }

                let mut table = Table::new(vec![
                    Column::new("ID", 3),
                    Column::new("Name", 10),
                    Column::new("Type", 8),
                    Column::new("Notes", 5),
                ]);
                for p in plants {
                    table.add_row(vec![
                        p.id.to_string(),
                        p.name,
                        or_dash(Some(p.plant_type.as_str())),
                        or_dash(Some(p.notes.as_str())),
                    ]);
                }
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
