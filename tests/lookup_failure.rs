// tests/lookup_failure.rs
use std::path::PathBuf;

use javalaunch::errors::{LaunchError, LookupFailure};

fn failure(env_vars: &[&str]) -> LookupFailure {
    LookupFailure {
        target: "java".to_string(),
        env_vars: env_vars.iter().map(|s| s.to_string()).collect(),
        searchpath: vec![PathBuf::from("/opt/java/bin")],
        url: Some("https://www.java.com/en/download/".to_string()),
    }
}

#[test]
fn message_lists_everything_that_was_checked() {
    let text = failure(&["JAVAHOME", "JAVA_HOME"]).to_string();

    assert!(text.contains(&"=".repeat(75)));
    assert!(text.contains("Unable to find the java file!"));
    assert!(text.contains("set one of the JAVAHOME, JAVA_HOME environment variables"));
    assert!(text.contains("Checked environment variables:"));
    assert!(text.contains("    - JAVAHOME"));
    assert!(text.contains("Searched in:"));
    assert!(text.contains("    - /opt/java/bin"));
    assert!(text.contains("For more information on java, see:"));
    assert!(text.contains("<https://www.java.com/en/download/>"));
}

#[test]
fn single_env_var_is_named_directly() {
    let text = failure(&["JAVA_HOME"]).to_string();
    assert!(text.contains("or set the JAVA_HOME environment variable."));
    assert!(!text.contains("one of"));
}

#[test]
fn empty_sections_are_omitted() {
    let bare = LookupFailure {
        target: "tool".to_string(),
        env_vars: vec![],
        searchpath: vec![],
        url: None,
    };
    let text = bare.to_string();

    assert!(text.contains("Unable to find the tool file!"));
    assert!(!text.contains("environment variable"));
    assert!(!text.contains("Searched in:"));
    assert!(!text.contains("For more information"));
}

#[test]
fn lookup_errors_exit_with_status_one() {
    let err = LaunchError::from(failure(&[]));
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().contains("Unable to find the java file!"));
}

#[test]
fn process_failures_carry_the_child_exit_code() {
    let err = LaunchError::ProcessFailed {
        exit_code: 3,
        stderr: Some(b"Exception in thread \"main\"".to_vec()),
        argv: vec!["java".into(), "-cp".into(), "a.jar".into(), "Main".into()],
    };
    assert_eq!(err.exit_code(), 3);
    assert_eq!(err.stderr_lossy().as_deref(), Some("Exception in thread \"main\""));
    assert!(err.to_string().contains("exit code 3"));
    assert!(err.to_string().contains("java -cp a.jar Main"));

    let signalled = LaunchError::ProcessFailed {
        exit_code: -1,
        stderr: None,
        argv: vec!["java".into()],
    };
    assert_eq!(signalled.exit_code(), 1);
}
