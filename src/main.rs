use clap::Parser;
use cli::App;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

mod cli;

fn main() -> anyhow::Result<()> {
    let app = App::parse();

    TermLogger::init(
        app.log_level(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    app.run()
}
