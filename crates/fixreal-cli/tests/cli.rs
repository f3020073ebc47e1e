use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fixreal"));
    cmd.env_remove("FIXREAL_BYTE_ORDER")
        .env_remove("FIXREAL_SCALING")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout")
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("decode").and(contains("encode")).and(contains("unpack")));
}

#[test]
fn decode_reference_code() {
    let assert = cmd().args(["decode", "fix_8_7", "0b10000001", "0x40"]).assert().success();
    assert_eq!(stdout_of(&assert), "-0.9921875\n0.5\n");
}

#[test]
fn decode_applies_scaling() {
    let assert = cmd()
        .args(["decode", "ufix_16_0", "250", "--scaling", "10"])
        .assert()
        .success();
    assert_eq!(stdout_of(&assert), "25\n");
}

#[test]
fn decode_rejects_code_wider_than_format() {
    cmd()
        .args(["decode", "ufix_8_0", "0x100"])
        .assert()
        .failure()
        .stderr(contains("does not fit in 8 bits").and(contains("hint:")));
}

#[test]
fn encode_negative_and_hex() {
    let assert = cmd()
        .args(["encode", "fix_16_8", "-0.00390625", "1.5", "--hex"])
        .assert()
        .success();
    assert_eq!(stdout_of(&assert), "0xffff\n0x0180\n");
}

#[test]
fn encode_negative_into_unsigned_fails() {
    cmd()
        .args(["encode", "ufix_8_7", "-0.5"])
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("unsigned")).and(contains("hint:")));
}

#[test]
fn unknown_format_shows_hint() {
    cmd()
        .args(["decode", "int_8_0", "1"])
        .assert()
        .failure()
        .stderr(contains("cannot interpret format name").and(contains("hint:")));
}

#[test]
fn unsupported_width_fails() {
    cmd()
        .args(["describe", "fix_24_3"])
        .assert()
        .failure()
        .stderr(contains("unsupported bit width"));
}

#[test]
fn describe_outputs_constants() {
    let assert = cmd().args(["describe", "fix_8_5"]).assert().success();
    let value: Value = serde_json::from_str(&stdout_of(&assert)).expect("valid json");
    assert_eq!(value["name"], "fix_8_5");
    assert_eq!(value["sign_mask"], 128);
    assert_eq!(value["int_mask"], 0x60);
    assert_eq!(value["int_min"], -4.0);
    assert_eq!(value["width_bytes"], 1);
}

#[test]
fn pack_then_unpack_round_trips() {
    let temp = TempDir::new().expect("tempdir");
    let data = temp.path().join("values.bin");
    let report = temp.path().join("out").join("report.json");

    cmd()
        .args(["pack", "fix_16_8", "1.5", "-0.5", "-128", "--byte-order", "big", "-o"])
        .arg(&data)
        .assert()
        .success()
        .stderr(contains("OK: 3 values encoded"));
    assert_eq!(
        fs::read(&data).expect("packed file"),
        vec![0x01, 0x80, 0xff, 0x80, 0x80, 0x00]
    );

    cmd()
        .args(["unpack", "fix_16_8"])
        .arg(&data)
        .args(["--byte-order", "big", "-o"])
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK:"));

    let json = fs::read_to_string(&report).expect("report written");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["format"]["name"], "fix_16_8");
    assert_eq!(value["byte_order"], "big");
    assert_eq!(value["values"], serde_json::json!([1.5, -0.5, -128.0]));
}

#[test]
fn unpack_reads_byte_order_from_env() {
    let temp = TempDir::new().expect("tempdir");
    let data = temp.path().join("values.bin");
    fs::write(&data, [0x01, 0x02]).expect("write input");

    let assert = cmd()
        .env("FIXREAL_BYTE_ORDER", "<")
        .args(["unpack", "ufix_16_0"])
        .arg(&data)
        .arg("--stdout")
        .assert()
        .success();
    let value: Value = serde_json::from_str(&stdout_of(&assert)).expect("valid json");
    assert_eq!(value["byte_order"], "little");
    assert_eq!(value["values"][0], 513.0);
}

#[test]
fn unpack_rejects_partial_element() {
    let temp = TempDir::new().expect("tempdir");
    let data = temp.path().join("values.bin");
    fs::write(&data, [0u8; 5]).expect("write input");

    cmd()
        .args(["unpack", "fix_32_16"])
        .arg(&data)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("invalid buffer length").and(contains("hint:")));
}

#[test]
fn unpack_missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");
    let report = temp.path().join("report.json");

    cmd()
        .args(["unpack", "fix_8_7"])
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn unpack_report_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let data = temp.path().join("values.bin");
    fs::write(&data, [0u8; 2]).expect("write input");

    cmd()
        .args(["unpack", "fix_8_7"])
        .arg(&data)
        .arg("-o")
        .arg(&data)
        .assert()
        .failure()
        .stderr(contains("report path must differ from input"));
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let data = temp.path().join("values.bin");
    fs::write(&data, [0u8; 2]).expect("write input");

    cmd()
        .args(["unpack", "fix_8_7"])
        .arg(&data)
        .arg("--stdout")
        .arg("-o")
        .arg(temp.path().join("report.json"))
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let data = temp.path().join("values.bin");
    fs::write(&data, [0u8; 2]).expect("write input");

    cmd()
        .args(["unpack", "fix_8_7"])
        .arg(&data)
        .args(["--stdout", "--pretty", "--compact"])
        .assert()
        .failure()
        .stderr(contains("cannot use --pretty and --compact together"));
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let data = temp.path().join("values.bin");

    cmd()
        .args(["pack", "ufix_8_0", "1", "2", "--quiet", "-o"])
        .arg(&data)
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn glob_matching_single_file_is_accepted() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(temp.path().join("capture.bin"), [0x81]).expect("write input");
    let pattern = temp.path().join("*.bin");

    let assert = cmd()
        .args(["unpack", "fix_8_0"])
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .success();
    let value: Value = serde_json::from_str(&stdout_of(&assert)).expect("valid json");
    assert_eq!(value["values"][0], -127.0);
}

#[test]
fn verbose_logs_descriptor_details() {
    cmd()
        .args(["--verbose", "decode", "fix_8_7", "1"])
        .assert()
        .success()
        .stderr(contains("parsed format name"));
}
