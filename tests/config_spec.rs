use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use linctl::config::{ClientConfig, FileConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use speculate2::speculate;
use tempfile::TempDir;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

speculate! {
    describe "file config" {
        before {
            let dir = TempDir::new().expect("Failed to create temp dir");
            let path = dir.path().join("config.json");
        }

        it "returns defaults when the file is missing" {
            let config = FileConfig::read(&path).expect("Missing file should not fail");
            assert!(config.api_key.is_none());
            assert!(config.endpoint.is_none());
        }

        it "reads every field" {
            fs::write(&path, r#"{"api_key": "lin_file", "endpoint": "http://localhost:4000/graphql", "timeout_secs": 5}"#)
                .expect("Failed to write config");

            let config = FileConfig::read(&path).expect("Failed to read config");

            assert_eq!(config.api_key.as_deref(), Some("lin_file"));
            assert_eq!(config.endpoint.as_deref(), Some("http://localhost:4000/graphql"));
            assert_eq!(config.timeout_secs, Some(5));
        }

        it "fails on malformed JSON and names the file" {
            fs::write(&path, "api_key = lin_file").expect("Failed to write config");

            let err = FileConfig::read(&path).unwrap_err();

            assert!(format!("{:#}", err).contains("config.json"));
        }
    }

    describe "client config resolution" {
        it "uses defaults around a key from the file" {
            let file = FileConfig { api_key: Some("lin_file".into()), ..Default::default() };

            let config = ClientConfig::resolve(file, env(&[])).expect("Failed to resolve");

            assert_eq!(config.api_key, "lin_file");
            assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
            assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        }

        it "prefers the environment over the file" {
            let file = FileConfig {
                api_key: Some("lin_file".into()),
                endpoint: Some("http://file/graphql".into()),
                timeout_secs: Some(5),
            };
            let vars = env(&[
                ("LINCTL_API_KEY", "lin_env"),
                ("LINCTL_ENDPOINT", "http://env/graphql"),
                ("LINCTL_TIMEOUT_SECS", "9"),
            ]);

            let config = ClientConfig::resolve(file, vars).expect("Failed to resolve");

            assert_eq!(config.api_key, "lin_env");
            assert_eq!(config.endpoint, "http://env/graphql");
            assert_eq!(config.timeout, Duration::from_secs(9));
        }

        it "falls back to LINEAR_API_KEY and ignores empty values" {
            let vars = env(&[("LINCTL_API_KEY", "  "), ("LINEAR_API_KEY", "lin_legacy")]);

            let config = ClientConfig::resolve(FileConfig::default(), vars).expect("Failed to resolve");

            assert_eq!(config.api_key, "lin_legacy");
        }

        it "requires an API key" {
            let err = ClientConfig::resolve(FileConfig::default(), env(&[])).unwrap_err();
            assert!(err.to_string().contains("API key"));
        }

        it "rejects a non-numeric timeout" {
            let vars = env(&[("LINCTL_API_KEY", "lin_env"), ("LINCTL_TIMEOUT_SECS", "soon")]);

            let err = ClientConfig::resolve(FileConfig::default(), vars).unwrap_err();

            assert!(err.to_string().contains("LINCTL_TIMEOUT_SECS"));
        }
    }
}
