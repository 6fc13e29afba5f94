//! File logging
//!
//! The terminal belongs to the UI, so log lines only go to a file, and only
//! when one is given on the command line.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

pub fn init(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let log_file = OpenOptions::new().create(true).append(true).open(path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .format(|buf, record| {
            let timestamp = buf.timestamp_millis();
            writeln!(
                buf,
                "[{timestamp}] [{}] [{}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(io::Error::other)?;

    log::info!("=== pokesearch session started ===");
    Ok(())
}
