//! Command-line definition.

use std::path::PathBuf;

use apitester_domain::HttpMethod;
use apitester_infrastructure::ExchangeFormat;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "apitester",
    version,
    about = "Send HTTP requests, check responses, and replay saved collections"
)]
pub struct Cli {
    /// Named environment to load on top of the default env file
    #[arg(long, global = true, value_name = "NAME")]
    pub env: Option<String>,

    /// Default env file
    #[arg(long, global = true, value_name = "PATH", default_value = ".env")]
    pub env_file: PathBuf,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send an HTTP request
    Request(RequestArgs),
    /// List saved collections
    List,
    /// Export a collection to JSON or YAML
    Export {
        name: String,
        #[arg(long, value_enum, default_value_t = FormatArg::Json)]
        format: FormatArg,
        /// Output file path (defaults to NAME.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a collection from a JSON or YAML file
    ImportCollection {
        file: PathBuf,
        /// Collection name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
    },
    /// Show recent requests
    History,
    /// Run every request in a collection
    RunCollection { name: String },
    /// Save an env file as a named environment
    SaveEnv { name: String, file: PathBuf },
    /// Make a named environment the default for later runs
    UseEnv { name: String },
    /// List named environments
    ListEnvs,
}

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// HTTP method
    pub method: HttpMethod,

    pub url: String,

    /// Header in "Key: Value" form
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Query parameter in key=value form
    #[arg(short = 'p', long = "param", value_name = "PARAM")]
    pub params: Vec<String>,

    /// Request body: JSON text or a path to a file
    #[arg(short = 'd', long)]
    pub body: Option<String>,

    /// Load the request body from a file
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Basic auth in username:password form
    #[arg(long)]
    pub auth: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = apitester_domain::request::DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Disable TLS certificate verification
    #[arg(long)]
    pub no_verify: bool,

    /// Print response headers
    #[arg(long)]
    pub show_headers: bool,

    /// Assertion to check, e.g. "status_code == 200" or "body.id == 1"
    #[arg(long = "test", value_name = "ASSERTION")]
    pub tests: Vec<String>,

    /// Append this request to a collection
    #[arg(long, value_name = "COLLECTION")]
    pub save: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for ExchangeFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => Self::Json,
            FormatArg::Yaml => Self::Yaml,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("apitester").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_request_with_everything() {
        let cli = parse(&[
            "request",
            "post",
            "https://{{host}}/users",
            "-H",
            "Content-Type: application/json",
            "--header",
            "X-Id: 1",
            "-p",
            "page=2",
            "-d",
            r#"{"name":"ada"}"#,
            "--auth",
            "u:p",
            "--timeout",
            "5",
            "--no-verify",
            "--show-headers",
            "--test",
            "status_code == 201",
            "--test",
            "body.name == ada",
            "--save",
            "users",
        ]);

        let Commands::Request(args) = cli.command else {
            panic!("expected request");
        };
        assert_eq!(args.method, HttpMethod::Post);
        assert_eq!(args.url, "https://{{host}}/users");
        assert_eq!(args.headers, vec!["Content-Type: application/json", "X-Id: 1"]);
        assert_eq!(args.params, vec!["page=2"]);
        assert_eq!(args.body.as_deref(), Some(r#"{"name":"ada"}"#));
        assert_eq!(args.auth.as_deref(), Some("u:p"));
        assert_eq!(args.timeout, 5);
        assert!(args.no_verify);
        assert!(args.show_headers);
        assert_eq!(args.tests, vec!["status_code == 201", "body.name == ada"]);
        assert_eq!(args.save.as_deref(), Some("users"));
    }

    #[test]
    fn test_request_defaults() {
        let cli = parse(&["request", "GET", "http://x"]);
        let Commands::Request(args) = cli.command else {
            panic!("expected request");
        };
        assert_eq!(args.timeout, 30);
        assert!(!args.no_verify);
        assert!(args.tests.is_empty());
        assert_eq!(cli.env_file, PathBuf::from(".env"));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let result = Cli::try_parse_from(["apitester", "request", "fetch", "http://x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = parse(&["list", "--env", "prod", "-vv"]);
        assert_eq!(cli.env.as_deref(), Some("prod"));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn test_export_options() {
        let cli = parse(&["export", "api", "--format", "yaml", "-o", "out.yml"]);
        match cli.command {
            Commands::Export {
                name,
                format,
                output,
            } => {
                assert_eq!(name, "api");
                assert_eq!(format, FormatArg::Yaml);
                assert_eq!(output, Some(PathBuf::from("out.yml")));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_kebab_case_commands() {
        assert!(matches!(
            parse(&["import-collection", "c.json"]).command,
            Commands::ImportCollection { name: None, .. }
        ));
        assert!(matches!(
            parse(&["run-collection", "api"]).command,
            Commands::RunCollection { .. }
        ));
        assert!(matches!(
            parse(&["save-env", "prod", "prod.env"]).command,
            Commands::SaveEnv { .. }
        ));
        assert!(matches!(parse(&["use-env", "prod"]).command, Commands::UseEnv { .. }));
        assert!(matches!(parse(&["list-envs"]).command, Commands::ListEnvs));
        assert!(matches!(parse(&["history"]).command, Commands::History));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
