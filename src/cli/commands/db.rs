use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    if *migrate {
        let applied = run_pending_migrations(&pool.conn)?;
        if applied.is_empty() {
            info("Schema already up to date.");
        } else {
            success(format!("Applied migrations: {}", applied.join(", ")));
        }
    }

    if *show_info {
        stats::print_db_info(&pool.conn, &cfg.database)?;
    }

    if *check {
        let verdict: String = pool
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if verdict == "ok" {
            success("Integrity check passed.");
        } else {
            error(format!("Integrity check failed: {verdict}"));
        }
    }

    if *vacuum {
        pool.conn.execute_batch("VACUUM")?;
        success("Database compacted.");
    }

    Ok(())
}
