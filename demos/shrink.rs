//! Size ceiling example.
//!
//! Fills a log past a 1 MB ceiling and shows that the next write empties it.

use duolog::{LogConfig, LogSystem};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let system = LogSystem::new(LogConfig::new());
    let mut log = system.open(Some("shrink"), "./logs/shrink.out", true)?;
    log.set_size_limit(1)?;

    let line = "0123456789".repeat(10) + "\n";
    while log.file_size()? <= log.size_limit() {
        log.add_text(&line)?;
    }
    println!("size before next write: {} bytes", log.file_size()?);

    log.add("first line after the ceiling was hit\n")?;
    println!("size after next write: {} bytes", log.file_size()?);

    Ok(())
}
