use predicates::prelude::*;

#[test]
fn test_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = assert_cmd::cargo_bin_cmd!("variant-prep");
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("prepare"))
        .stdout(predicate::str::contains("plot-monthly"));
    Ok(())
}

#[test]
fn test_prepare_help_lists_path_options() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = assert_cmd::cargo_bin_cmd!("variant-prep");
    cmd.args(["prepare", "--help"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--cases"))
        .stdout(predicate::str::contains("--variants"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--workspace"));
    Ok(())
}
