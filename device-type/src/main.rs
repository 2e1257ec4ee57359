use std::process::ExitCode;

use clap::Parser;
use wiotp_device_type::cli::App;

fn main() -> ExitCode {
    // Backtraces for panics in the action, not for errors bubbling out of libraries.
    set_env_default("RUST_BACKTRACE", "1");
    set_env_default("RUST_LIB_BACKTRACE", "0");

    match App::parse().run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

fn set_env_default(key: &str, value: &str) {
    if std::env::var_os(key).is_none() {
        // SAFETY: Called before any other thread is spawned.
        unsafe { std::env::set_var(key, value) };
    }
}
