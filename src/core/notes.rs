use crate::db::CareStore;
use crate::errors::{AppError, AppResult};
use crate::models::Note;

pub struct NoteLogic;

impl NoteLogic {
    pub fn add(store: &mut CareStore, text: &str, plant_id: Option<i64>) -> AppResult<Note> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::InvalidInput("note text must not be blank".into()));
        }

        let note = store.add_note(Note::new(text, plant_id))?;
        store.audit("add", &format!("note {}", note.id), text);
        Ok(note)
    }

    /// Replace the text and/or the plant link of a note.
    pub fn update(
        store: &mut CareStore,
        id: i64,
        text: Option<&str>,
        plant_id: Option<Option<i64>>,
    ) -> AppResult<Note> {
        let mut note = store.get_note(id)?;

        if let Some(t) = text {
            let t = t.trim();
            if t.is_empty() {
                return Err(AppError::InvalidInput("note text must not be blank".into()));
            }
            note.text = t.to_string();
        }
        if let Some(pid) = plant_id {
            if let Some(p) = pid {
                store.get_plant(p)?;
            }
            note.plant_id = pid;
        }

        store.update_note(&note)?;
        store.audit("edit", &format!("note {id}"), &note.text);
        Ok(note)
    }

    pub fn delete(store: &mut CareStore, id: i64) -> AppResult<()> {
        store.delete_note(id)?;
        store.audit("del", &format!("note {id}"), "note removed");
        Ok(())
    }

    /// Flip the done flag; returns the new state.
    pub fn toggle_done(store: &mut CareStore, id: i64) -> AppResult<Note> {
        let mut note = store.get_note(id)?;
        note.done = !note.done;
        store.update_note(&note)?;
        store.audit(
            "done",
            &format!("note {id}"),
            if note.done { "marked as done" } else { "marked as open" },
        );
        Ok(note)
    }

    pub fn list(store: &CareStore, plant_id: Option<i64>) -> AppResult<Vec<Note>> {
        store.list_notes(plant_id)
    }
}
