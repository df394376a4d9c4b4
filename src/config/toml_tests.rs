//! Tests for TOML configuration parsing.

use super::ConfigError;
use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [webhook]
            url = "https://discord.com/api/webhooks/123/tok"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(
            config.webhook.url.as_deref(),
            Some("https://discord.com/api/webhooks/123/tok")
        );
        assert!(config.webhook.thread_id.is_none());
        assert!(config.http.api_base.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [webhook]
            url = "https://discord.com/api/webhooks/123/tok"
            thread_id = "42"

            [http]
            api_base = "http://localhost:9000/api/"
            timeout = 10
            user_agent = "my-bot/1.0"

            [message]
            username = "Deploy Bot"
            avatar_url = "https://example.com/a.png"

            [retry]
            max_attempts = 5
            initial_delay = 2
            max_delay = 20
            multiplier = 1.5
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.webhook.thread_id.as_deref(), Some("42"));
        assert_eq!(config.http.api_base.as_deref(), Some("http://localhost:9000/api/"));
        assert_eq!(config.http.timeout, Some(10));
        assert_eq!(config.http.user_agent.as_deref(), Some("my-bot/1.0"));
        assert_eq!(config.message.username.as_deref(), Some("Deploy Bot"));
        assert_eq!(
            config.message.avatar_url.as_deref(),
            Some("https://example.com/a.png")
        );
        assert_eq!(config.retry.max_attempts, Some(5));
        assert_eq!(config.retry.initial_delay, Some(2));
        assert_eq!(config.retry.max_delay, Some(20));
        assert_eq!(config.retry.multiplier, Some(1.5));
    }

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.webhook.url.is_none());
        assert!(config.retry.max_attempts.is_none());
    }

    #[test]
    fn unknown_section_is_rejected() {
        let result = TomlConfig::parse("[monitor]\npoll_interval = 5\n");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = TomlConfig::parse("[webhook]\nmethod = \"PUT\"\n");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = TomlConfig::parse("[http]\ntimeout = \"ten\"\n");

        assert!(result.is_err());
    }
}

mod loading {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[webhook]\nthread_id = \"7\"").unwrap();

        let config = TomlConfig::load(file.path()).unwrap();

        assert_eq!(config.webhook.thread_id.as_deref(), Some("7"));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = TomlConfig::load(&path);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}

mod template {
    use super::*;

    #[test]
    fn template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert!(config.webhook.url.is_none());
    }

    #[test]
    fn template_mentions_every_section() {
        let template = default_config_template();

        for section in ["[webhook]", "[http]", "[message]", "[retry]"] {
            assert!(template.contains(section), "missing {section}");
        }
    }
}
