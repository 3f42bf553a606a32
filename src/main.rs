mod catalog;
mod config;
mod engine;
mod format;
mod mpris;
mod player;
mod runtime;
mod ui;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; redirect with `RUST_LOG=debug adagio 2>log`.
    env_logger::init();
    runtime::run()
}
