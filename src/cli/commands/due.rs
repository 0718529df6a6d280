use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::due::{DueStatus, due_list};
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_due};
use crate::utils::formatting::kind_with_emoji;
use crate::utils::table::{Column, Table};
use crate::utils::time::format_optional;
use chrono::Utc;
use std::collections::HashMap;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Due) {
        let store = open_store(cfg)?;
        let names: HashMap<i64, String> = store
            .list_plants()?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        let entries = due_list(
            store.all_events()?,
            Utc::now(),
            cfg.due_soon_window()?,
        );

        if entries.is_empty() {
            info("Nothing to do: no open care events.");
            return Ok(());
        }

        header("Upcoming care");

        let mut table = Table::new(vec![
            Column::new("ID", 3),
            Column::new("Plant", 8),
            Column::new("Task", 8),
            Column::new("Due", 10),
            Column::new("Status", 8),
        ]);
        for e in &entries {
            table.add_row(vec![
                e.event.id.to_string(),
                names.get(&e.event.plant_id).cloned().unwrap_or_default(),
                kind_with_emoji(&e.event, cfg.language),
                format_optional(e.due_at.as_ref()),
                e.status.label().to_string(),
            ]);
        }

        // Colour whole lines; cell widths are computed on plain text.
        let rendered = table.render();
        let mut lines = rendered.lines();
        if let Some(head) = lines.next() {
            println!("{head}");
        }
        for (line, e) in lines.zip(&entries) {
            let colour = color_for_due(
                e.status == DueStatus::Done,
                e.status == DueStatus::Overdue,
                e.status == DueStatus::DueSoon,
            );
            println!("{colour}{line}{RESET}");
        }
    }

    Ok(())
}
