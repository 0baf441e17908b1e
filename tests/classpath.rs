// tests/classpath.rs
use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

use javalaunch::launch::build_argv;
use javalaunch::types::{parse_duration, parse_timeout, Classpath, JavaOptions, PATH_LIST_SEPARATOR};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Holder {
    classpath: Classpath,
    options: JavaOptions,
}

#[test]
fn list_and_joined_forms_normalize_identically() {
    let joined = format!("a.jar{PATH_LIST_SEPARATOR}b.jar{PATH_LIST_SEPARATOR}classes");
    let many = Classpath::from(["a.jar", "b.jar", "classes"]);

    assert_eq!(many.normalize(), joined);
    assert_eq!(Classpath::from(joined.as_str()).normalize(), joined);
}

#[test]
fn single_entry_list_has_no_separator() {
    assert_eq!(Classpath::from(["only.jar"]).normalize(), "only.jar");
}

#[test]
fn validation_rejects_unusable_classpaths() {
    assert!(Classpath::from("").validate().is_err());
    assert!(Classpath::Many(vec![]).validate().is_err());
    assert!(Classpath::from(["a.jar", ""]).validate().is_err());
    assert!(Classpath::from("a\0.jar").validate().is_err());

    assert!(Classpath::from("app.jar").validate().is_ok());
    assert!(Classpath::from(["a.jar", "b.jar"]).validate().is_ok());
}

#[test]
fn toml_accepts_string_or_list() {
    let h: Holder = toml::from_str(
        r#"
        classpath = "app.jar"
        options = "-Xmx2G  -Xss4m"
        "#,
    )
    .unwrap();
    assert_eq!(h.classpath, Classpath::Single("app.jar".into()));
    assert_eq!(h.options.tokens(), vec!["-Xmx2G", "-Xss4m"]);

    let h: Holder = toml::from_str(
        r#"
        classpath = ["a.jar", "b.jar"]
        options = ["-Dname=two words"]
        "#,
    )
    .unwrap();
    assert_eq!(
        h.classpath,
        Classpath::Many(vec!["a.jar".into(), "b.jar".into()])
    );
    assert_eq!(h.options.tokens(), vec!["-Dname=two words"]);
}

#[test]
fn argv_is_program_options_classpath_args() {
    let argv = build_argv(
        Path::new("/usr/bin/java"),
        &["-Xmx1G".to_string()],
        "app.jar",
        &["Main".to_string(), "x".to_string()],
    );

    let expected: Vec<OsString> = ["/usr/bin/java", "-Xmx1G", "-cp", "app.jar", "Main", "x"]
        .iter()
        .map(OsString::from)
        .collect();
    assert_eq!(argv, expected);
}

#[test]
fn argv_without_options_or_args() {
    let argv = build_argv(Path::new("java"), &[], "cp", &[]);
    assert_eq!(argv, vec![OsString::from("java"), "-cp".into(), "cp".into()]);
}

#[test]
fn durations_parse_with_units() {
    assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
    assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
    assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
    assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
    assert!(parse_duration("30").is_err());
    assert!(parse_duration("3d").is_err());
    assert!(parse_duration("").is_err());
}

#[test]
fn oversized_durations_are_errors_not_panics() {
    let err = parse_duration("18446744073709551615m").unwrap_err();
    assert!(err.contains("out of range"), "{err}");
    assert!(parse_duration("18446744073709551615h").is_err());
    assert_eq!(
        parse_duration("18446744073709551615s").unwrap(),
        Duration::from_secs(u64::MAX)
    );
}

#[test]
fn timeouts_must_be_positive() {
    assert_eq!(parse_timeout("250ms").unwrap(), Duration::from_millis(250));
    assert!(parse_timeout("0s").unwrap_err().contains("greater than zero"));
    assert!(parse_timeout("0ms").is_err());
    assert!(parse_timeout("later").is_err());
}
