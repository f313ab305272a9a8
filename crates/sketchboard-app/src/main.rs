//! Main application entry point: replays a gesture script and prints the drawing.

use sketchboard_app::{App, AppConfig, AppError, AppResult, load_script};

fn run() -> AppResult<()> {
    let mut args = std::env::args().skip(1);
    let script_path = args.next().ok_or(AppError::Usage)?;
    let config = match args.next() {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let steps = load_script(&script_path)?;
    let mut app = App::new(config)?;
    app.run(&steps)?;
    log::info!(
        "Replayed {} step(s), rendered {} frame(s)",
        steps.len(),
        app.frames()
    );

    println!("{}", app.session().to_json()?);
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        log::error!("{}", err);
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
