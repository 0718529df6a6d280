/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";

/// Done → green, overdue → red, due soon → yellow.
pub fn color_for_due(done: bool, overdue: bool, soon: bool) -> &'static str {
    if done {
        GREEN
    } else if overdue {
        RED
    } else if soon {
        YELLOW
    } else {
        RESET
    }
}
