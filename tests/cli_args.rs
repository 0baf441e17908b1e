// tests/cli_args.rs
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use javalaunch::cli::{CliArgs, Command};
use javalaunch::config::{load_and_validate, ConfigFile};
use javalaunch::errors::LaunchError;
use javalaunch::types::SerializationFormat;
use javalaunch::{graph_generator, launcher_config, locate_spec};

fn parse(args: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("javalaunch").chain(args.iter().copied())).unwrap()
}

#[test]
fn locate_without_name_extends_the_configured_search() {
    let args = parse(&["locate", "--env", "MY_JDK", "--search", "/opt/jdk/bin", "--all"]);
    let Command::Locate(locate) = &args.command else {
        panic!("expected locate");
    };
    assert!(locate.all);

    let spec = locate_spec(&ConfigFile::default(), locate);
    assert_eq!(spec.name(), "java");
    assert_eq!(spec.env_vars(), ["JAVAHOME", "JAVA_HOME", "MY_JDK"]);
    assert_eq!(spec.searchpath(), [PathBuf::from("/opt/jdk/bin")]);
}

#[test]
fn locate_with_name_starts_a_fresh_search() {
    let args = parse(&[
        "locate", "--name", "models", "--env", "MODELS", "--override", "/data", "--dir",
    ]);
    let Command::Locate(locate) = &args.command else {
        panic!("expected locate");
    };

    let spec = locate_spec(&ConfigFile::default(), locate);
    assert_eq!(spec.name(), "models");
    assert_eq!(spec.env_vars(), ["MODELS"]);
    assert_eq!(spec.override_path(), Some(PathBuf::from("/data").as_path()));
    assert!(spec.finding_dir());
    assert_eq!(spec.url(), None);
}

#[test]
fn run_keeps_hyphenated_program_arguments() {
    let args = parse(&[
        "--java-options",
        "-Xmx2G -Xss4m",
        "run",
        "--cp",
        "a.jar",
        "--cp",
        "b.jar",
        "--timeout",
        "1m",
        "com.example.Main",
        "--verbose",
        "-n",
        "3",
    ]);
    let Command::Run(run) = &args.command else {
        panic!("expected run");
    };

    assert_eq!(run.classpath, vec!["a.jar", "b.jar"]);
    assert_eq!(run.timeout, Some(Duration::from_secs(60)));
    assert_eq!(run.args, vec!["com.example.Main", "--verbose", "-n", "3"]);

    let launcher = launcher_config(&ConfigFile::default(), &args);
    assert_eq!(launcher.options, vec!["-Xmx2G", "-Xss4m"]);
}

#[test]
fn java_flag_overrides_the_config() {
    let args = parse(&["--java", "/opt/jdk/bin/java", "run", "Main"]);
    let launcher = launcher_config(&ConfigFile::default(), &args);
    assert_eq!(launcher.java, Some(PathBuf::from("/opt/jdk/bin/java")));
}

#[test]
fn run_requires_a_main_class() {
    assert!(CliArgs::try_parse_from(["javalaunch", "run", "--cp", "a.jar"]).is_err());
}

#[test]
fn run_rejects_a_zero_timeout() {
    for zero in ["0s", "0ms", "0m"] {
        assert!(
            CliArgs::try_parse_from(["javalaunch", "run", "--timeout", zero, "Main"]).is_err(),
            "--timeout {zero} should be rejected"
        );
    }
    assert!(CliArgs::try_parse_from(["javalaunch", "run", "--timeout", "soon", "Main"]).is_err());
}

#[test]
fn graph_flags_fill_the_connection() {
    let args = parse(&[
        "graph",
        "--query",
        "Nodes(ID) :- A(ID).",
        "--output",
        "g",
        "--format",
        "graphml",
        "--jar",
        "gg.jar",
        "--dbname",
        "dblp",
        "--port",
        "5544",
    ]);
    let Command::Graph(graph) = &args.command else {
        panic!("expected graph");
    };
    assert_eq!(graph.format, SerializationFormat::GraphMl);

    let generator = graph_generator(&ConfigFile::default(), graph).unwrap();
    let conn = generator.connection();
    assert_eq!(conn.host, "localhost");
    assert_eq!(conn.port, 5544);
    assert_eq!(conn.dbname, "dblp");
    assert_eq!(conn.username, "postgres");
    assert_eq!(generator.jar(), PathBuf::from("gg.jar").as_path());
}

#[test]
fn graph_without_jar_is_a_config_error() {
    let args = parse(&["graph", "--query", "q", "--output", "g", "--dbname", "d"]);
    let Command::Graph(graph) = &args.command else {
        panic!("expected graph");
    };

    assert!(matches!(
        graph_generator(&ConfigFile::default(), graph),
        Err(LaunchError::ConfigError(_))
    ));
}

#[test]
fn graph_flags_override_only_what_they_name() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "[graphgen]\njar = \"lib/graphgen.jar\"\nhost = \"db.internal\"\nport = 6543\n\
         dbname = \"imdb\"\nusername = \"reader\"\npassword = \"secret\"\n"
    )
    .unwrap();
    file.flush().unwrap();
    let cfg = load_and_validate(file.path()).unwrap();

    let args = parse(&["graph", "--query", "q", "--output", "g", "--dbname", "dblp"]);
    let Command::Graph(graph) = &args.command else {
        panic!("expected graph");
    };
    let generator = graph_generator(&cfg, graph).unwrap();
    let conn = generator.connection();
    assert_eq!(conn.host, "db.internal");
    assert_eq!(conn.port, 6543);
    assert_eq!(conn.dbname, "dblp");
    assert_eq!(conn.username, "reader");
    assert_eq!(conn.password, "secret");
    assert_eq!(generator.jar(), PathBuf::from("lib/graphgen.jar").as_path());

    let args = parse(&[
        "graph", "--query", "q", "--output", "g", "--jar", "other.jar", "--host", "127.0.0.1",
    ]);
    let Command::Graph(graph) = &args.command else {
        panic!("expected graph");
    };
    let generator = graph_generator(&cfg, graph).unwrap();
    assert_eq!(generator.connection().host, "127.0.0.1");
    assert_eq!(generator.connection().dbname, "imdb");
    assert_eq!(generator.jar(), PathBuf::from("other.jar").as_path());
}
