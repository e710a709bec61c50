//! Process exit status: fatal configuration errors exit before binding,
//! a termination signal after binding exits cleanly.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::process::Command;
#[cfg(unix)]
use std::io::{BufRead, BufReader};
#[cfg(unix)]
use std::process::Stdio;

fn run(args: &[&str]) -> (Option<i32>, String) {
    let out = Command::new(env!("CARGO_BIN_EXE_promsynth"))
        .args(args)
        .args(["--listen-address", "127.0.0.1:0"])
        .current_dir(std::env::temp_dir())
        .env("RUST_LOG", "info")
        .env_remove("INSTANCE_ID")
        .output()
        .unwrap();
    let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&out.stderr));
    (out.status.code(), text)
}

#[test]
fn bogus_type_exits_nonzero() {
    let (code, text) = run(&["--metric-type", "bogus"]);
    assert_eq!(code, Some(2), "{text}");
    assert!(text.contains("bogus"), "{text}");
    assert!(!text.contains("promsynth serving"), "{text}");
}

#[test]
fn negative_count_exits_nonzero() {
    let (code, text) = run(&["--metric-count", "-3"]);
    assert_eq!(code, Some(2), "{text}");
    assert!(text.contains("INVALID_COUNT"), "{text}");
}

#[test]
fn zero_frequency_exits_nonzero() {
    let (code, text) = run(&["--metric-frequency", "0"]);
    assert_eq!(code, Some(2), "{text}");
}

#[test]
fn frequency_beyond_one_day_exits_nonzero() {
    let (code, text) = run(&["--metric-frequency", "9223372036854775807"]);
    assert_eq!(code, Some(2), "{text}");
    assert!(text.contains("INVALID_INTERVAL"), "{text}");
}

#[cfg(unix)]
#[test]
fn sigterm_after_bind_exits_zero() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_promsynth"))
        .args(["--listen-address", "127.0.0.1:0", "--metric-frequency", "1"])
        .current_dir(std::env::temp_dir())
        .env("RUST_LOG", "info")
        .env_remove("INSTANCE_ID")
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let stdout = child.stdout.take().unwrap();
    let mut lines = BufReader::new(stdout).lines();
    let bound = lines
        .by_ref()
        .map_while(Result::ok)
        .any(|line| line.contains("promsynth serving"));
    if !bound {
        let _ = child.kill();
        panic!("server never reported its listen address");
    }

    let killed = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(killed.success());

    // Drain so the child never blocks on a full pipe while shutting down.
    let tail: Vec<String> = lines.map_while(Result::ok).collect();
    let status = child.wait().unwrap();
    assert_eq!(status.code(), Some(0), "{tail:?}");
    assert!(tail.iter().any(|l| l.contains("update scheduler stopped")), "{tail:?}");
}
