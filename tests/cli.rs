use makefile_parser::parse_makefile;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn configure(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kaplar_configure"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn writes_makefile_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let output = configure(dir.path(), &[]);
    assert!(output.status.success());

    let content = fs::read_to_string(dir.path().join("Makefile")).unwrap();
    let makefile = parse_makefile(&content);
    assert_eq!(makefile.variable("CC"), Some("clang"));
    assert_eq!(makefile.variable("LDFLAGS"), Some("-s -O2"));
    assert!(makefile.rule("build/kaplar").is_some());
    assert!(makefile.rule("build/obj/win32/network.o").is_some());
}

#[test]
fn build_options_follow_driver_options() {
    let dir = tempfile::tempdir().unwrap();
    let output = configure(
        dir.path(),
        &["--makefile", "GNUmakefile", "-o", "custom", "-builddir", "out/", "-linux"],
    );
    assert!(output.status.success());

    let content = fs::read_to_string(dir.path().join("GNUmakefile")).unwrap();
    let makefile = parse_makefile(&content);
    assert!(makefile.rule("out/custom").is_some());
    assert_eq!(makefile.rule("clean").unwrap().recipe, vec!["@ rm -fR out/"]);
    assert!(!dir.path().join("Makefile").exists());
}

#[test]
fn repeated_runs_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let args = ["-freebsd", "-be", "-debug", "-test"];

    assert!(configure(dir.path(), &args).status.success());
    let first = fs::read(dir.path().join("Makefile")).unwrap();
    assert!(configure(dir.path(), &args).status.success());
    let second = fs::read(dir.path().join("Makefile")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unknown_option_prints_usage_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = configure(dir.path(), &["-linux", "-solaris"]);
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("-solaris"));
    assert!(stderr.contains("Usage:"));
    assert!(!dir.path().join("Makefile").exists());
}

#[test]
fn missing_value_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Makefile"), "previous").unwrap();

    let output = configure(dir.path(), &["-debug", "-o"]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(fs::read_to_string(dir.path().join("Makefile")).unwrap(), "previous");
}

#[test]
fn unsafe_build_dir_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = configure(dir.path(), &["-builddir", "my build/"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("Makefile").exists());
}

#[test]
fn output_name_with_rule_separator_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = configure(dir.path(), &["-o", "a:b"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("Makefile").exists());
}

#[test]
fn short_version_flag_is_an_unknown_option() {
    let dir = tempfile::tempdir().unwrap();
    let output = configure(dir.path(), &["--dry-run", "-V"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));
    assert!(output.stdout.is_empty());

    let output = configure(dir.path(), &["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn log_output_has_no_colour_codes_when_piped() {
    let dir = tempfile::tempdir().unwrap();
    let output = configure(dir.path(), &["-solaris"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WARN"));
    assert!(!stderr.contains('\x1b'));
}

#[test]
fn help_describes_every_driver_option() {
    let dir = tempfile::tempdir().unwrap();
    let output = configure(dir.path(), &["--help"]);
    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    assert!(help.contains("Log resolved settings and plan details"));
    assert!(help.contains("--version"));
}

#[test]
fn dry_run_prints_instead_of_writing() {
    let dir = tempfile::tempdir().unwrap();
    let output = configure(dir.path(), &["--dry-run", "-gcc"]);
    assert!(output.status.success());
    assert!(!dir.path().join("Makefile").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(parse_makefile(&stdout).variable("CC"), Some("gcc"));
}

#[test]
fn print_plan_emits_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = configure(dir.path(), &["--dry-run", "--print-plan", "-test"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("{"));
    assert!(stdout.contains("\"test_mode\": true"));
    assert!(stdout.contains("\"source\": \"main.c\""));
}

#[test]
fn custom_catalog_missing_platform_fails() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = r#"
entry_point = "main"
local_entry_point = "main.c"
source_suffix = ".c"
object_suffix = ".o"
headers = ["main.h"]
common = ["main.o"]

[toolchain]
cflags = "-Wall"
debug_cflags = "-g"
big_endian_define = "-D__BIG_ENDIAN__"
release_ldflags = "-s"
debug_ldflags = "-g"
ldlibs = "-lc"

[compilers]
clang = "clang"

[platforms.linux]
units = ["linux/network.o"]
"#;
    fs::write(dir.path().join("catalog.toml"), catalog).unwrap();

    let output = configure(dir.path(), &["--catalog", "catalog.toml", "-linux"]);
    assert!(output.status.success());
    let makefile = parse_makefile(&fs::read_to_string(dir.path().join("Makefile")).unwrap());
    assert_eq!(makefile.rules.len(), 2 + 3);

    fs::remove_file(dir.path().join("Makefile")).unwrap();
    let output = configure(dir.path(), &["--catalog", "catalog.toml", "-win32"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("Makefile").exists());
}
