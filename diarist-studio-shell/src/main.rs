mod app;
mod preferences;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("Starting Diarist Studio {}", env!("CARGO_PKG_VERSION"));
    app::app_main();
}
