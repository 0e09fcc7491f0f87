//! Console logging setup.

use log::LevelFilter;

/// The level used when the config does not name one.
pub fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the global logger, writing timestamped records to stdout.
///
/// The dispatcher itself accepts every level; [`log::set_max_level`] does
/// the filtering, so the level can be changed once the config is loaded.
pub fn init(level: LevelFilter) -> Result<(), String> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(LevelFilter::Trace)
        .chain(std::io::stdout())
        .apply()
        .map_err(|e| e.to_string())?;
    log::set_max_level(level);
    Ok(())
}
