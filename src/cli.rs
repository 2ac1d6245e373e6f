use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use recon_dashboard::application::dto::{OutputFormat, ResultSource};

/// Browse, run and analyze host-intelligence recon results from the terminal
#[derive(Parser, Debug)]
#[command(name = "recon-dashboard")]
#[command(version)]
#[command(
    about = "Browse, run and analyze host-intelligence recon results from the terminal",
    long_about = None
)]
pub struct Args {
    /// Base URL of the script-execution backend
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Config file (defaults to ./recon-dashboard.config.yml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// File holding the persisted API key
    #[arg(long, global = true, value_name = "FILE")]
    pub key_file: Option<PathBuf>,

    /// API key for this invocation only (not persisted)
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Output format: table, markdown or json
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Disable ANSI colors in table output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors and hide the progress spinner
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Where to read a result document from
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Saved result on the backend, by its server-side path
    #[arg(long, value_name = "PATH", conflicts_with = "file")]
    pub path: Option<String>,

    /// Local JSON file
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl SourceArgs {
    /// Without `--path` or `--file`, the latest backend result is used
    pub fn source(&self) -> ResultSource {
        match (&self.path, &self.file) {
            (Some(path), _) => ResultSource::Backend(path.clone()),
            (None, Some(file)) => ResultSource::LocalFile(file.clone()),
            (None, None) => ResultSource::Latest,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List saved results on the backend
    List,
    /// Show the dashboard (summary, chart, table) for a result
    View(SourceArgs),
    /// Show every vulnerability found anywhere in a result
    Vulns(SourceArgs),
    /// Upload a local JSON file to the backend
    Upload {
        /// JSON file to upload
        file: PathBuf,

        /// Fetch the uploaded result back and render it as a dashboard
        #[arg(long)]
        show: bool,
    },
    /// List the backend's scripts and their parameters
    Scripts,
    /// Run a backend script
    Run {
        /// Script name (defaults to the first script the backend offers)
        script: Option<String>,

        /// Script parameter, repeatable: -p query=apache -p limit=50
        #[arg(short, long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Export a result's records as pretty-printed JSON
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// Report name; the file is written as NAME.json
        #[arg(long)]
        name: Option<String>,
    },
    /// Let the backend extract CVEs from a saved result
    ExtractCves {
        /// Saved result path (defaults to the latest result)
        #[arg(long, value_name = "PATH")]
        path: Option<String>,
    },
    /// Manage network alerts (requires an API key)
    Alerts {
        #[command(subcommand)]
        action: AlertsCommand,
    },
    /// Show this machine's public IP address
    Ip,
    /// Show remaining query credits (requires an API key)
    Credits,
    /// Manage the stored API key
    Key {
        #[command(subcommand)]
        action: KeyCommand,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum AlertsCommand {
    /// List alerts
    List,
    /// Delete an alert by id
    Delete { id: String },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    /// Store an API key
    Set { key: String },
    /// Remove the stored API key
    Clear,
    /// Show whether a key is stored (masked)
    Show,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Maps -v/-q onto a log filter; the default keeps warnings only
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("Invalid parameter '{}'. Expected NAME=VALUE", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Invalid parameter '{}'. Name must not be empty", raw));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("recon-dashboard").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_view_defaults_to_latest() {
        let args = parse(&["view"]);
        let Command::View(source) = args.command else {
            panic!("expected view");
        };
        assert_eq!(source.source(), ResultSource::Latest);
    }

    #[test]
    fn test_view_with_local_file() {
        let args = parse(&["view", "--file", "hosts.json", "--format", "md"]);
        assert_eq!(args.format, Some(OutputFormat::Markdown));
        let Command::View(source) = args.command else {
            panic!("expected view");
        };
        assert_eq!(
            source.source(),
            ResultSource::LocalFile(PathBuf::from("hosts.json"))
        );
    }

    #[test]
    fn test_path_and_file_conflict() {
        let result = Args::try_parse_from([
            "recon-dashboard",
            "vulns",
            "--path",
            "/r/a.json",
            "--file",
            "a.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_params() {
        let args = parse(&["run", "search", "-p", "query=port:22", "--param", "limit=5"]);
        let Command::Run { script, params } = args.command else {
            panic!("expected run");
        };
        assert_eq!(script.as_deref(), Some("search"));
        assert_eq!(
            params,
            vec![
                ("query".to_string(), "port:22".to_string()),
                ("limit".to_string(), "5".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_param_rejects_missing_equals() {
        assert!(parse_param("query").is_err());
        assert!(parse_param("=x").is_err());
        assert_eq!(
            parse_param("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&["list", "--api-base", "http://h:9000", "-vv", "--no-color"]);
        assert_eq!(args.api_base.as_deref(), Some("http://h:9000"));
        assert_eq!(args.log_level(), "trace");
        assert!(args.no_color);
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(parse(&["ip"]).log_level(), "warn");
        assert_eq!(parse(&["ip", "-v"]).log_level(), "debug");
        assert_eq!(parse(&["ip", "-q"]).log_level(), "error");
    }

    #[test]
    fn test_nested_subcommands() {
        let args = parse(&["alerts", "delete", "abc123"]);
        assert!(matches!(
            args.command,
            Command::Alerts { action: AlertsCommand::Delete { ref id } } if id == "abc123"
        ));
        let args = parse(&["key", "clear"]);
        assert!(matches!(args.command, Command::Key { action: KeyCommand::Clear }));
    }

    #[test]
    fn test_upload_show_flag() {
        let args = parse(&["upload", "hosts.json"]);
        assert!(matches!(args.command, Command::Upload { show: false, .. }));

        let args = parse(&["upload", "hosts.json", "--show"]);
        let Command::Upload { file, show } = args.command else {
            panic!("expected upload");
        };
        assert_eq!(file, PathBuf::from("hosts.json"));
        assert!(show);
    }

    #[test]
    fn test_invalid_format_rejected() {
        assert!(Args::try_parse_from(["recon-dashboard", "list", "--format", "xml"]).is_err());
    }
}
