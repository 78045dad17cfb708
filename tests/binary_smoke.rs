// use macro form directly; no import needed
use std::process::Command;

#[test]
fn binary_print_config_succeeds() {
    let me = assert_cmd::cargo::cargo_bin!("nyzo_distribute");
    let out = Command::new(me)
        .arg("--print-config")
        .env_remove("NYZO_DISTRIBUTE_CONFIG")
        .output()
        .expect("spawn binary");
    assert!(
        out.status.success(),
        "binary should succeed with --print-config"
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("config"));
}

#[test]
fn binary_print_config_reports_env_override() {
    let me = assert_cmd::cargo::cargo_bin!("nyzo_distribute");
    let out = Command::new(me)
        .arg("--print-config")
        .env("NYZO_DISTRIBUTE_CONFIG", "/tmp/custom.xml")
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("/tmp/custom.xml"));
}
