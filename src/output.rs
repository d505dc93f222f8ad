use owo_colors::OwoColorize;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
///
/// Prompts are not handled here; they live in `prompt` so they can be driven
/// by arbitrary readers/writers in tests.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Print a plain user-facing line (no prefix). Used for the primary outputs
/// ("Renaming 'a' to 'b' ...", the final summary) which users may script
/// against.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}
