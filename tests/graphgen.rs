// tests/graphgen.rs
use javalaunch::errors::LaunchError;
use javalaunch::graphgen::{DbConnection, GraphGenerator, GENERATOR_CLASS};
use javalaunch::types::SerializationFormat;

fn connection() -> DbConnection {
    DbConnection {
        host: "db.local".to_string(),
        port: 5433,
        dbname: "imdb".to_string(),
        username: "reader".to_string(),
        password: "s3cret".to_string(),
    }
}

const QUERY: &str = "Nodes(ID, Name) :- Author(ID, Name).";

#[test]
fn command_args_follow_the_generator_signature() {
    let generator = GraphGenerator::new(connection(), "lib/graphgen.jar");

    assert_eq!(
        generator.command_args(QUERY, "coauthors", SerializationFormat::GraphMl),
        vec![
            GENERATOR_CLASS,
            QUERY,
            "graphml",
            "coauthors",
            "db.local",
            "5433",
            "imdb",
            "reader",
            "s3cret",
        ]
    );
}

#[test]
fn debug_output_hides_the_password() {
    let shown = format!("{:?}", connection());
    assert!(shown.contains("imdb"));
    assert!(!shown.contains("s3cret"));
}

#[test]
fn serialization_format_parses_case_insensitively() {
    assert_eq!("GML".parse::<SerializationFormat>().unwrap(), SerializationFormat::Gml);
    assert_eq!(
        "GraphML".parse::<SerializationFormat>().unwrap(),
        SerializationFormat::GraphMl
    );
    assert!("dot".parse::<SerializationFormat>().is_err());
    assert_eq!(SerializationFormat::default(), SerializationFormat::Gml);
}

#[cfg(unix)]
mod with_fake_java {
    use super::*;

    use javalaunch::launch::{Launcher, LauncherConfig};
    use javalaunch_test_utils::{with_timeout, FakeJava};

    #[tokio::test]
    async fn extraction_runs_the_generator_and_names_the_output() {
        let dir = tempfile::tempdir().unwrap();
        let java = FakeJava::new()
            .stdout("Extraction done")
            .install(dir.path(), "java")
            .unwrap();
        let launcher = Launcher::new(LauncherConfig::default().with_java(&java.path));
        let generator = GraphGenerator::new(connection(), "lib/graphgen.jar");

        let artifact = with_timeout(generator.generate_graph(
            &launcher,
            QUERY,
            "coauthors",
            SerializationFormat::Gml,
        ))
        .await
        .unwrap();

        assert_eq!(artifact.path, std::path::PathBuf::from("coauthors.gml"));
        assert_eq!(artifact.run.stdout_lossy(), "Extraction done");
        assert_eq!(
            java.recorded_args(),
            vec![
                "-cp",
                "lib/graphgen.jar",
                GENERATOR_CLASS,
                QUERY,
                "gml",
                "coauthors",
                "db.local",
                "5433",
                "imdb",
                "reader",
                "s3cret",
            ]
        );
    }

    #[tokio::test]
    async fn generator_failure_keeps_its_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let java = FakeJava::new()
            .exit_code(1)
            .stderr("relation \"author\" does not exist")
            .install(dir.path(), "java")
            .unwrap();
        let launcher = Launcher::new(LauncherConfig::default().with_java(&java.path));
        let generator = GraphGenerator::new(connection(), "lib/graphgen.jar");

        let err = with_timeout(generator.generate_graph(
            &launcher,
            QUERY,
            "coauthors",
            SerializationFormat::Gml,
        ))
        .await
        .unwrap_err();

        assert_eq!(err.exit_code(), 1);
        assert!(err.stderr_lossy().unwrap().contains("does not exist"));
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let launcher = Launcher::new(LauncherConfig::default().with_java("/bin/false"));
        let generator = GraphGenerator::new(connection(), "lib/graphgen.jar");

        let err = generator
            .generate_graph(&launcher, "  ", "out", SerializationFormat::Gml)
            .await
            .unwrap_err();

        assert!(matches!(err, LaunchError::ConfigError(_)));
    }
}
