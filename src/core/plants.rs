use crate::core::clock::Clock;
use crate::core::events::cancel_quietly;
use crate::db::CareStore;
use crate::errors::AppResult;
use crate::models::Plant;
use crate::reminder::{ReminderScheduler, TaskScheduler};

pub struct PlantLogic;

impl PlantLogic {
    pub fn add(store: &mut CareStore, plant: Plant) -> AppResult<Plant> {
        let plant = store.add_plant(plant)?;
        store.audit("add", &format!("plant {}", plant.id), &plant.name);
        Ok(plant)
    }

    pub fn update(store: &mut CareStore, plant: &Plant) -> AppResult<()> {
        store.update_plant(plant)?;
        store.audit("edit", &format!("plant {}", plant.id), &plant.name);
        Ok(())
    }

    /// Delete the plant together with its care events and their reminders.
    /// Returns the ids of the removed events.
    pub fn delete<S: TaskScheduler, C: Clock>(
        store: &mut CareStore,
        reminders: &mut ReminderScheduler<S, C>,
        id: i64,
    ) -> AppResult<Vec<i64>> {
        let name = store.get_plant(id)?.name;
        let removed = store.delete_plant(id)?;

        for event_id in &removed {
            cancel_quietly(store, reminders, *event_id);
        }

        store.audit(
            "del",
            &format!("plant {id}"),
            &format!("{name} removed with {} care events", removed.len()),
        );
        tracing::info!(plant_id = id, events = removed.len(), "plant deleted");

        Ok(removed)
    }

    pub fn list(store: &CareStore) -> AppResult<Vec<Plant>> {
        store.list_plants()
    }
}
