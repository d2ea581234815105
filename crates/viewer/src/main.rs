use clap::Parser;
use env_logger::{Builder, Env};
use optview::{App, Settings, gui};

fn main() -> Result<(), eframe::Error> {
    let env = Env::new().filter_or("OPTVIEW_LOG", "info");
    Builder::from_env(env).try_init().ok();

    let settings = Settings::parse();
    log::debug!("{settings:?}");
    gui::run(App::from_settings(&settings))
}
