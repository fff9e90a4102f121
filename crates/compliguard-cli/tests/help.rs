use assert_cmd::Command;

#[allow(deprecated)]
fn compliguard_cmd() -> Command {
    Command::cargo_bin("compliguard").unwrap()
}

#[test]
fn help_works() {
    compliguard_cmd().arg("--help").assert().success();
}

#[test]
fn help_lists_subcommands() {
    let output = compliguard_cmd().arg("--help").output().unwrap();
    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for sub in [
        "evaluate",
        "process",
        "fetch",
        "reconcile",
        "ingest-scan",
        "explain",
    ] {
        assert!(help.contains(sub), "help does not mention {sub}");
    }
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    compliguard_cmd().assert().failure().code(2);
}
