use crate::db::log::{LogRow, load_log};
use crate::db::CareStore;
use crate::errors::AppResult;
use crate::utils::colors::{BLUE, CYAN, GREEN, GREY, MAGENTA, RED, RESET, YELLOW};
use crate::utils::table::pad_right;
use unicode_width::UnicodeWidthStr;

const OP_TARGET_MAX: usize = 40;

/// ANSI colour for an audit operation.
fn color_for_operation(op: &str) -> &'static str {
    match op {
        "add" => GREEN,
        "del" => RED,
        "edit" => YELLOW,
        "done" => CYAN,
        "remind" => MAGENTA,
        "remind_failed" => RED,
        "migration_applied" => MAGENTA,
        "backup" | "export" | "import" => BLUE,
        "init" => YELLOW,
        _ => RESET,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for c in s.chars() {
        if out.width() + 3 >= max {
            break;
        }
        out.push(c);
    }
    out.push_str("...");
    out
}

pub struct LogLogic;

impl LogLogic {
    pub fn rows(store: &CareStore) -> AppResult<Vec<LogRow>> {
        load_log(store.conn())
    }

    pub fn print_log(store: &CareStore) -> AppResult<()> {
        let rows = Self::rows(store)?;

        println!("📜 Internal log:\n");
        if rows.is_empty() {
            println!("{GREY}(empty){RESET}");
            return Ok(());
        }

        let date_w = rows.iter().map(|r| r.date.width()).max().unwrap_or(0);
        let op_w = rows
            .iter()
            .map(|r| op_target(r).width())
            .max()
            .unwrap_or(0)
            .min(OP_TARGET_MAX);

        for r in &rows {
            let plain = truncate(&op_target(r), OP_TARGET_MAX);
            let padded = pad_right(&plain, op_w);
            // Only the operation word is coloured; padding was computed on plain text.
            let coloured = match padded.split_once(' ') {
                Some((op, rest)) => {
                    format!("{}{op}{RESET} {rest}", color_for_operation(&r.operation))
                }
                None => format!("{}{padded}{RESET}", color_for_operation(&r.operation)),
            };

            println!(
                "{} | {} => {}",
                pad_right(&r.date, date_w),
                coloured,
                r.message
            );
        }

        Ok(())
    }
}

fn op_target(r: &LogRow) -> String {
    if r.target.is_empty() {
        r.operation.clone()
    } else {
        format!("{} ({})", r.operation, r.target)
    }
}
