// tests/config_loading.rs
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use javalaunch::config::{discover, load_and_validate, load_from_path, ConfigFile};
use javalaunch::errors::LaunchError;
use javalaunch::launch::LauncherConfig;
use javalaunch::locate::SearchSpec;
use javalaunch::types::Classpath;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn config_error(contents: &str) -> String {
    let file = write_config(contents);
    match load_and_validate(file.path()) {
        Err(LaunchError::ConfigError(msg)) => msg,
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn empty_file_means_the_default_java_search() {
    let file = write_config("");
    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.search_spec(), SearchSpec::java());
    assert!(cfg.java.path.is_none());
    assert!(cfg.classpath.is_none());
    assert!(cfg.timeout.is_none());
    assert!(cfg.graphgen.is_none());

    assert_eq!(LauncherConfig::from(&cfg), LauncherConfig::default());
}

#[test]
fn demo_config_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/javalaunch.toml");
    let cfg = load_and_validate(&path).unwrap();

    assert_eq!(
        cfg.classpath,
        Some(Classpath::Many(vec!["lib/app.jar".into(), "classes".into()]))
    );
    assert_eq!(cfg.timeout, Some(Duration::from_secs(600)));
    assert!(cfg.search.verbose);

    let graphgen = cfg.graphgen.as_ref().unwrap();
    assert_eq!(graphgen.dbname, "imdb");
    assert_eq!(graphgen.port, 5432);

    let launcher = LauncherConfig::from(&cfg);
    assert_eq!(launcher.options, vec!["-Xmx10G"]);
    assert_eq!(launcher.java, None);
    assert_eq!(
        launcher.search.searchpath(),
        &[
            PathBuf::from("/usr/lib/jvm/default/bin"),
            PathBuf::from("/usr/local/opt/openjdk/bin"),
        ]
    );
}

#[test]
fn explicit_java_and_option_list() {
    let file = write_config(
        r#"
        [java]
        path = "/opt/jdk/bin/java"
        options = ["-Xss4m", "-Dfile.encoding=UTF-8"]
        "#,
    );
    let cfg = load_and_validate(file.path()).unwrap();
    let launcher = LauncherConfig::from(&cfg);

    assert_eq!(launcher.java, Some(PathBuf::from("/opt/jdk/bin/java")));
    assert_eq!(launcher.options, vec!["-Xss4m", "-Dfile.encoding=UTF-8"]);
}

#[test]
fn custom_search_section_builds_the_spec() {
    let file = write_config(
        r#"
        [search]
        name = "stanford-parser.jar"
        env_vars = ["STANFORD_PARSER", "CLASSPATH"]
        alternates = ["stanford-parser-full.jar"]
        searchpath = ["/opt/stanford"]
        url = "https://nlp.stanford.edu/software/lex-parser.shtml"
        "#,
    );
    let spec = load_and_validate(file.path()).unwrap().search_spec();

    assert_eq!(spec.name(), "stanford-parser.jar");
    assert_eq!(spec.env_vars(), ["STANFORD_PARSER", "CLASSPATH"]);
    assert_eq!(spec.alternates(), ["stanford-parser-full.jar"]);
    assert_eq!(spec.searchpath(), [PathBuf::from("/opt/stanford")]);
    assert_eq!(
        spec.url(),
        Some("https://nlp.stanford.edu/software/lex-parser.shtml")
    );
}

#[test]
fn graphgen_defaults_fill_in_connection_details() {
    let file = write_config(
        r#"
        [graphgen]
        jar = "graphgen.jar"
        dbname = "dblp"
        "#,
    );
    let cfg = load_and_validate(file.path()).unwrap();
    let graphgen = cfg.graphgen.unwrap();

    assert_eq!(graphgen.host, "localhost");
    assert_eq!(graphgen.port, 5432);
    assert_eq!(graphgen.username, "postgres");
    assert_eq!(graphgen.password, "");
}

#[test]
fn invalid_values_are_config_errors() {
    assert!(config_error("[search]\nname = \"\"").contains("[search].name"));
    assert!(config_error("[search]\nenv_vars = [\"\"]").contains("empty name"));
    assert!(config_error("[search]\nenv_vars = [\"A=B\"]").contains("A=B"));
    assert!(config_error("[java]\npath = \"\"").contains("[java].path"));
    assert!(config_error("[run]\ntimeout = \"0s\"").contains("greater than zero"));
    assert!(config_error("[run]\ntimeout = \"soon\"").contains("[run].timeout"));
    assert!(config_error("[run]\ntimeout = \"18446744073709551615m\"").contains("out of range"));
    assert!(config_error("[run]\nclasspath = []").contains("at least one entry"));
    assert!(config_error("[run]\nclasspath = \"\"").contains("must not be empty"));
    assert!(
        config_error("[graphgen]\njar = \"g.jar\"\ndbname = \"db\"\nport = 0").contains("port")
    );
    assert!(config_error("[graphgen]\njar = \"g.jar\"\ndbname = \"\"").contains("dbname"));
}

#[test]
fn malformed_toml_is_a_toml_error() {
    let file = write_config("[java\npath = 1");
    assert!(matches!(
        load_from_path(file.path()),
        Err(LaunchError::TomlError(_))
    ));
}

#[test]
fn explicit_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(matches!(
        discover(Some(missing.as_path())),
        Err(LaunchError::IoError(_))
    ));
}

#[test]
fn default_config_is_valid() {
    let cfg = ConfigFile::default();
    assert_eq!(cfg.search_spec(), SearchSpec::java());
}
