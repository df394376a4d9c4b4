//! Tests for CLI argument parsing.

use super::cli::{Cli, Command};

const URL: &str = "https://discord.com/api/webhooks/123/tok";

mod global_options {
    use super::*;

    #[test]
    fn parse_minimal_args() {
        let cli = Cli::parse_from_iter(["hookpost", "--url", URL, "get", "555"]);

        assert_eq!(cli.url.as_deref(), Some(URL));
        assert_eq!(
            cli.command,
            Command::Get {
                message_id: "555".to_string()
            }
        );
        assert!(!cli.verbose);
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::parse_from_iter([
            "hookpost",
            "delete",
            "@original",
            "--url",
            URL,
            "--thread-id",
            "42",
            "-v",
        ]);

        assert_eq!(cli.url.as_deref(), Some(URL));
        assert_eq!(cli.thread_id.as_deref(), Some("42"));
        assert!(cli.verbose);
    }

    #[test]
    fn parse_transport_options() {
        let cli = Cli::parse_from_iter([
            "hookpost",
            "--api-base",
            "http://localhost:9000/api",
            "--timeout",
            "5",
            "--retry-max",
            "4",
            "--retry-delay",
            "2",
            "-c",
            "hookpost.toml",
            "get",
            "1",
        ]);

        assert_eq!(cli.api_base.as_deref(), Some("http://localhost:9000/api"));
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.retry_max, Some(4));
        assert_eq!(cli.retry_delay, Some(2));
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("hookpost.toml"))
        );
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from_iter(["hookpost", "--url", URL]).is_err());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from_iter(["hookpost", "--bogus", "get", "1"]).is_err());
    }
}

mod subcommands {
    use super::*;

    #[test]
    fn send_with_all_options() {
        let cli = Cli::parse_from_iter([
            "hookpost",
            "send",
            "deploy finished",
            "--embed",
            "build 42",
            "--embed",
            "tests green",
            "--username",
            "ci",
            "--avatar-url",
            "https://example.com/a.png",
            "--tts",
            "--thread-name",
            "release",
        ]);

        assert_eq!(
            cli.command,
            Command::Send {
                content: Some("deploy finished".to_string()),
                embeds: vec!["build 42".to_string(), "tests green".to_string()],
                username: Some("ci".to_string()),
                avatar_url: Some("https://example.com/a.png".to_string()),
                tts: true,
                thread_name: Some("release".to_string()),
            }
        );
    }

    #[test]
    fn send_without_content() {
        let cli = Cli::parse_from_iter(["hookpost", "send", "--embed", "only an embed"]);

        assert!(matches!(cli.command, Command::Send { content: None, .. }));
    }

    #[test]
    fn edit_requires_id_and_content() {
        let cli = Cli::parse_from_iter(["hookpost", "edit", "555", "new text"]);

        assert_eq!(
            cli.command,
            Command::Edit {
                message_id: "555".to_string(),
                content: "new text".to_string(),
            }
        );
        assert!(Cli::try_parse_from_iter(["hookpost", "edit", "555"]).is_err());
    }

    #[test]
    fn init_default_output() {
        let cli = Cli::parse_from_iter(["hookpost", "init"]);

        assert!(cli.is_init());
        assert_eq!(
            cli.command,
            Command::Init {
                output: "hookpost.toml".into()
            }
        );
    }

    #[test]
    fn init_custom_output() {
        let cli = Cli::parse_from_iter(["hookpost", "init", "-o", "custom.toml"]);

        assert_eq!(
            cli.command,
            Command::Init {
                output: "custom.toml".into()
            }
        );
    }

    #[test]
    fn get_is_not_init() {
        assert!(!Cli::parse_from_iter(["hookpost", "get", "1"]).is_init());
    }
}
