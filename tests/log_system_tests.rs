use duolog::{CaptureBuffer, Console, LogConfig, LogSystem, MonthStyle, SystemLogConfig};
use std::path::Path;

fn system_in(dir: &Path, system_mute: bool) -> (LogSystem, CaptureBuffer) {
    let (console, buf) = Console::capture();
    let config = LogConfig::new()
        .with_log_dir(dir.join("logs"))
        .with_system(SystemLogConfig::new(dir.join("logs/sys.out")).with_mute(system_mute));
    (LogSystem::with_console(config, console), buf)
}

fn is_stamp(s: &str) -> bool {
    s.len() == 22
        && s.starts_with('[')
        && s.ends_with("] ")
        && s[1..20]
            .chars()
            .enumerate()
            .all(|(i, c)| match i {
                4 | 7 => c == '-',
                10 => c == ' ',
                13 | 16 => c == ':',
                _ => c.is_ascii_digit(),
            })
}

#[test]
fn test_stamped_line_in_file_and_console() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (system, console) = system_in(dir.path(), true);

    let mut log = system
        .open(Some("name"), dir.path().join("app.out"), false)
        .expect("open log");
    log.add(&format!("hello {}\n", 5)).expect("add");

    let file = std::fs::read_to_string(dir.path().join("app.out")).expect("read log");
    assert_eq!(file.lines().count(), 1);
    assert!(is_stamp(&file[..22]), "file line: {file:?}");
    assert_eq!(&file[22..], "hello 5\n");

    let out = console.contents();
    assert!(is_stamp(&out[..22]), "console line: {out:?}");
    assert_eq!(&out[22..], "[name] :hello 5\n");
}

#[test]
fn test_add_mute_never_reaches_console() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (system, console) = system_in(dir.path(), true);

    let mut loud = system
        .open(Some("loud"), dir.path().join("loud.out"), false)
        .expect("open log");
    loud.add_mute("x\n").expect("add");
    assert!(console.contents().is_empty());
}

#[test]
fn test_missing_directory_is_created() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (system, _console) = system_in(dir.path(), true);
    let path = dir.path().join("not/yet/there/app.out");

    let outcome = system.create(Some("app"), &path, true).expect("create");
    assert!(!outcome.is_fallback());
    assert_eq!(outcome.handle().path(), path);
    assert!(path.exists());
}

#[test]
fn test_unwritable_path_uses_fallback_under_log_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (system, _console) = system_in(dir.path(), true);
    let blocked = dir.path().join("blocked");
    std::fs::create_dir(&blocked).expect("mkdir");

    let mut log = system.open(Some("svc"), &blocked, true).expect("create");
    assert!(log.path().starts_with(dir.path().join("logs")));
    let file_name = log.path().file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("svc-"));
    assert!(file_name.ends_with(".out"));
    assert_eq!(file_name.len(), "svc-".len() + 14 + ".out".len());

    log.add_text("works\n").expect("add");
    assert_eq!(std::fs::read_to_string(log.path()).unwrap(), "works\n");
}

#[test]
fn test_destroy_leaves_flushed_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (system, _console) = system_in(dir.path(), true);
    let path = dir.path().join("d.out");

    let mut log = system.open(None, &path, true).expect("open log");
    log.add_text("one\n").expect("add");
    log.add_text("two\n").expect("add");
    log.destroy();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");

    // Reopening appends to what is already there.
    let mut again = system.open(None, &path, true).expect("reopen");
    again.add_text("three\n").expect("add");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\nthree\n");
}

#[test]
fn test_shrink_on_next_write() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (system, _console) = system_in(dir.path(), true);
    let path = dir.path().join("s.out");

    let mut log = system.open(Some("s"), &path, true).expect("open log");
    assert_eq!(log.set_size_limit(1).expect("limit"), 1 << 20);

    let chunk = "z".repeat(64 * 1024);
    while log.file_size().unwrap() <= 1 << 20 {
        log.add_text(&chunk).expect("add");
    }
    log.add("after\n").expect("add");

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(is_stamp(&content[..22]));
    assert_eq!(&content[22..], "after\n");
}

#[test]
fn test_system_log_records_handle_lifecycle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (system, console) = system_in(dir.path(), true);
    system.syslog().init().expect("init");
    system.syslog().init().expect("second init");

    let mut log = system
        .open(Some("tracked"), dir.path().join("t.out"), true)
        .expect("open log");
    log.add("entry\n").expect("add");
    assert!(log.set_size_limit(5000).is_err());
    log.destroy();
    system.syslog().stop();

    let sys = std::fs::read_to_string(dir.path().join("logs/sys.out")).unwrap();
    assert_eq!(sys.matches("log system init ok!").count(), 1);
    assert!(sys.contains("[tracked] Create ok"));
    assert!(sys.contains("[tracked] add a log"));
    assert!(sys.contains("[tracked] log destroyed"));
    assert!(!sys.contains("set file size"));
    assert!(sys.trim_end().ends_with("log system stopped!"));
    assert!(console.contents().is_empty());
}

#[test]
fn test_unmuted_system_log_prints() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (system, console) = system_in(dir.path(), false);
    system.syslog().init().expect("init");
    assert!(console.contents().contains("log system init ok!"));

    console.clear();
    system.syslog().set_mute(true);
    system.syslog().add(None, "hidden\n");
    assert!(console.contents().is_empty());
}

#[test]
fn test_zero_based_month_style() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (console, _buf) = Console::capture();
    let config = LogConfig::new().with_month_style(MonthStyle::ZeroBased);
    let system = LogSystem::with_console(config, console);

    let mut log = system
        .open(None, dir.path().join("m.out"), true)
        .expect("open log");
    log.add_time().expect("add");

    let content = std::fs::read_to_string(dir.path().join("m.out")).unwrap();
    let month: u8 = content[6..8].parse().unwrap();
    assert!(month <= 11, "zero-based month out of range: {content:?}");
}
