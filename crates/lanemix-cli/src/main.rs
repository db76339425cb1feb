mod command;
mod config;
mod session;
mod store;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
