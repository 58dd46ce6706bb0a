use stagehand_util::process::CommandBuilder;

#[test]
fn exec_captures_stdout() {
    let output = CommandBuilder::new("echo").arg("publication").exec().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "publication");
}

#[test]
fn exec_sets_environment() {
    let output = CommandBuilder::new("sh")
        .arg("-c")
        .arg("printf %s \"$STAGEHAND_TEST_VAR\"")
        .env("STAGEHAND_TEST_VAR", "resolved")
        .exec()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "resolved");
}

#[test]
fn exec_pipes_stdin_data() {
    let output = CommandBuilder::new("cat")
        .stdin_data(b"in-memory key material".to_vec())
        .exec()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "in-memory key material"
    );
}

#[test]
fn exec_missing_program_errors() {
    let result = CommandBuilder::new("stagehand-no-such-binary-xyz").exec();
    assert!(result.is_err());
}
