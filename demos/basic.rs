//! Basic dual-sink logging example.
//!
//! Creates two logs, one mirrored to the console and one muted, flips their
//! mute flags and shows the system log recording every step.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let system = duolog::builder()
        .with_log_dir("./logs/")
        .with_system_log("./logs/sys.out")
        .with_system_mute(true)
        .build()?;

    duolog::show("------- standalone console output ------\n");
    duolog::show_time();
    duolog::show_text("[show_text]\n");

    system.syslog().init()?;

    let mut loud = system.open(Some("loud"), "./logs/loud.out", false)?;
    let mut quiet = system.open(Some("quiet"), "./logs/quiet.out", true)?;

    loud.add("visible on the console\n")?;
    quiet.add("file only\n")?;

    loud.set_mute(true);
    quiet.set_mute(false);

    loud.add("now file only\n")?;
    quiet.add(&format!("now visible, {} bytes so far\n", quiet.file_size()?))?;
    loud.add_nomute("forced onto the console\n")?;

    loud.destroy();
    quiet.destroy();
    system.syslog().stop();

    Ok(())
}
