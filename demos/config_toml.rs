//! Building a log system from TOML configuration.

use duolog::{LogConfig, LogSystemBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let toml_config = r#"
log_dir = "./logs/"
size_limit = "50M"
month_style = "calendar"
diagnostics = "debug"

[system]
path = "./logs/sys.out"
mute = false
size_limit = 1
"#;

    let config: LogConfig = toml::from_str(toml_config)?;
    duolog::init_diagnostics(&config, None)?;

    let system = LogSystemBuilder::from_config(config).build()?;
    system.syslog().init()?;

    let outcome = system.create(Some("toml"), "./logs/toml.out", false)?;
    if outcome.is_fallback() {
        duolog::show("requested path unusable, using a fallback file\n");
    }
    let mut log = outcome.into_handle();
    log.add(&format!("configured from toml, ceiling {} bytes\n", log.size_limit()))?;

    drop(log);
    system.syslog().stop();
    Ok(())
}
