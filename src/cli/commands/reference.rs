use crate::cli::commands::open_store;
use crate::cli::parser::{Catalogue, Commands, ReferenceAction};
use crate::config::Config;
use crate::core::ReferenceLogic;
use crate::db::CareStore;
use crate::errors::AppResult;
use crate::models::{Affliction, ReferencePlant};
use crate::ui::messages::{info, success};
use crate::utils::formatting::bold;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Reference { action } = cmd {
        let mut store = open_store(cfg)?;

        match action {
            ReferenceAction::Import { file, catalogue } => {
                let count = match catalogue.affliction_kind() {
                    None => ReferenceLogic::import(&mut store, file)?,
                    Some(kind) => ReferenceLogic::import_afflictions(&mut store, kind, file)?,
                };
                success(format!("{count} {} imported", entries_label(*catalogue)));
            }

            ReferenceAction::Search {
                query,
                catalogue,
                favorites,
            } => match catalogue.affliction_kind() {
                None => {
                    let found = if *favorites {
                        ReferenceLogic::favorites(&store)?
                    } else {
                        ReferenceLogic::search(&store, query)?
                    };
                    if found.is_empty() {
                        info("No matching reference plants.");
                    }
                    for p in &found {
                        print_plant(&store, p)?;
                    }
                }
                Some(kind) => {
                    let found = if *favorites {
                        ReferenceLogic::affliction_favorites(&store, kind)?
                    } else {
                        ReferenceLogic::search_afflictions(&store, kind, query)?
                    };
                    if found.is_empty() {
                        info(format!("No matching {}.", entries_label(*catalogue)));
                    }
                    for a in &found {
                        print_affliction(a);
                    }
                }
            },

            ReferenceAction::Fav { id, catalogue } => {
                let (name, favorite) = match catalogue.affliction_kind() {
                    None => {
                        let p = ReferenceLogic::toggle_favorite(&store, *id)?;
                        (p.name, p.is_favorite)
                    }
                    Some(kind) => {
                        let a = ReferenceLogic::toggle_affliction_favorite(&store, kind, *id)?;
                        (a.name, a.is_favorite)
                    }
                };
                if favorite {
                    success(format!("{name} added to favorites"));
                } else {
                    success(format!("{name} removed from favorites"));
                }
            }
        }
    }

    Ok(())
}

fn entries_label(catalogue: Catalogue) -> &'static str {
    match catalogue {
        Catalogue::Plants => "reference plants",
        Catalogue::Diseases => "diseases",
        Catalogue::Pests => "pests",
    }
}

fn star(favorite: bool) -> &'static str {
    if favorite { " ★" } else { "" }
}

fn print_plant(store: &CareStore, p: &ReferencePlant) -> AppResult<()> {
    println!("#{} {}{}", p.id, bold(&p.name), star(p.is_favorite));
    for (label, value) in [
        ("Light", &p.light),
        ("Watering", &p.watering),
        ("Fertilizing", &p.fertilizing),
    ] {
        if let Some(v) = value
            && !v.is_empty()
        {
            println!("    {label}: {v}");
        }
    }
    for line in p.description.lines() {
        println!("    {line}");
    }

    let diseases = ReferenceLogic::diseases_of(store, p)?;
    if !diseases.is_empty() {
        let names: Vec<&str> = diseases.iter().map(|d| d.name.as_str()).collect();
        println!("    Diseases: {}", names.join(", "));
    }
    println!();
    Ok(())
}

fn print_affliction(a: &Affliction) {
    println!("#{} {}{}", a.id, bold(&a.name), star(a.is_favorite));
    for (label, values) in [
        ("Affects", &a.affected_plants),
        ("Symptoms", &a.symptoms),
        ("Causes", &a.causes),
        ("Treatment", &a.treatment),
    ] {
        if !values.is_empty() {
            println!("    {label}: {}", values.join(", "));
        }
    }
    if !a.prevention.is_empty() {
        println!("    Prevention: {}", a.prevention);
    }
    println!();
}
