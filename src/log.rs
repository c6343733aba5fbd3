use std::fmt::Display;

pub const RED: &str = "\x1B[1;31m";
pub const GREEN: &str = "\x1B[1;32m";
pub const YELLOW: &str = "\x1B[1;33m";
pub const GREY: &str = "\x1B[1;30m";
pub const RESET: &str = "\x1B[0m";

fn line<S: Display>(color: &str, level: &str, msg: S) {
    eprintln!("[parens] {}{}:{} {}", color, level, RESET, msg);
}

#[allow(dead_code)]
pub fn error<S: Display>(msg: S) {
    line(RED, "error", msg);
}

#[allow(dead_code)]
pub fn warn<S: Display>(msg: S) {
    line(YELLOW, "warning", msg);
}

#[allow(dead_code)]
pub fn info<S: Display>(msg: S) {
    line(GREEN, "info", msg);
}

#[allow(dead_code)]
pub fn debug<S: Display>(msg: S) {
    line(GREY, "DEBUG", msg);
}
