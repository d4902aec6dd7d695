use crate::domain::NewsdCommand;
use clap::builder::ArgAction;
use common::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub help: bool,
    /// --generator: gemini（API 呼び出し）または stub（固定文面、オフライン用）
    pub generator: Option<String>,
    /// --interval: serve モードの生成間隔（秒）。環境変数より優先。
    pub interval_secs: Option<u64>,
    /// --dir: ローカルストアのディレクトリ。環境変数より優先。
    pub dir: Option<PathBuf>,
    /// サブコマンド名（generate / serve / list / show / latest）
    pub command: Option<String>,
    pub command_args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            help: false,
            generator: None,
            interval_secs: None,
            dir: None,
            command: None,
            command_args: Vec::new(),
        }
    }
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("newsd")
        .about("Generate, ingest and store news articles")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("generator")
                .long("generator")
                .value_name("name")
                .help("Content generator: gemini or stub")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("interval")
                .long("interval")
                .value_name("secs")
                .help("Interval in seconds between serve cycles")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("dir")
                .long("dir")
                .value_name("path")
                .help("Local article store directory")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("positional")
                .index(1)
                .help("Command (generate, serve, list, show <id>, latest) and its arguments")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Result<Config, Error> {
    let help = matches.get_flag("help");
    let generator = matches.get_one::<String>("generator").cloned();
    let interval_secs = match matches.get_one::<String>("interval") {
        Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
            Error::invalid_argument(format!("Invalid value for --interval: '{}'", raw))
        })?),
        None => None,
    };
    let dir = matches.get_one::<String>("dir").map(PathBuf::from);
    let positional: Vec<String> = matches
        .get_many::<String>("positional")
        .map(|i| i.cloned().collect())
        .unwrap_or_default();
    let (command, command_args) = match positional.split_first() {
        Some((first, rest)) => (Some(first.clone()), rest.to_vec()),
        None => (None, vec![]),
    };

    Ok(Config {
        help,
        generator,
        interval_secs,
        dir,
        command,
        command_args,
    })
}

/// コマンドラインを解析する
pub fn parse_args() -> Result<Config, Error> {
    let cmd = build_clap_command();
    let matches = cmd
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    matches_to_config(&matches)
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[String]) -> Result<Config, Error> {
    let cmd = build_clap_command();
    let matches = cmd
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    matches_to_config(&matches)
}

/// Config を NewsdCommand に変換する
pub fn config_to_command(config: Config) -> Result<NewsdCommand, Error> {
    if config.help {
        return Ok(NewsdCommand::Help);
    }

    match config.command.as_deref() {
        None => Ok(NewsdCommand::Help),
        Some("generate") => Ok(NewsdCommand::Generate),
        Some("serve") => Ok(NewsdCommand::Serve),
        Some("list") => Ok(NewsdCommand::List),
        Some("latest") => Ok(NewsdCommand::Latest),
        Some("show") => match config.command_args.first() {
            Some(id) => Ok(NewsdCommand::Show { id: id.clone() }),
            None => Err(Error::invalid_argument("show requires an article id")),
        },
        Some(other) => Err(Error::invalid_argument(format!(
            "Unknown command: '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("newsd")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_no_args_is_help() {
        let config = parse_args_from(&args(&[])).unwrap();
        let cmd = config_to_command(config).unwrap();
        assert_eq!(cmd, NewsdCommand::Help);
    }

    #[test]
    fn test_help_flag_wins_over_command() {
        let config = parse_args_from(&args(&["-h", "generate"])).unwrap();
        assert!(config.help);
        assert_eq!(config_to_command(config).unwrap(), NewsdCommand::Help);
    }

    #[test]
    fn test_generate() {
        let config = parse_args_from(&args(&["generate"])).unwrap();
        assert_eq!(config_to_command(config).unwrap(), NewsdCommand::Generate);
    }

    #[test]
    fn test_serve() {
        let config = parse_args_from(&args(&["serve"])).unwrap();
        assert_eq!(config_to_command(config).unwrap(), NewsdCommand::Serve);
    }

    #[test]
    fn test_list_and_latest() {
        let config = parse_args_from(&args(&["list"])).unwrap();
        assert_eq!(config_to_command(config).unwrap(), NewsdCommand::List);
        let config = parse_args_from(&args(&["latest"])).unwrap();
        assert_eq!(config_to_command(config).unwrap(), NewsdCommand::Latest);
    }

    #[test]
    fn test_show_with_id() {
        let config = parse_args_from(&args(&["show", "20260101120000"])).unwrap();
        assert_eq!(
            config_to_command(config).unwrap(),
            NewsdCommand::Show {
                id: "20260101120000".to_string()
            }
        );
    }

    #[test]
    fn test_show_without_id_is_usage_error() {
        let config = parse_args_from(&args(&["show"])).unwrap();
        let err = config_to_command(config).unwrap_err();
        assert!(err.is_usage());
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_unknown_command_is_usage_error() {
        let config = parse_args_from(&args(&["destroy"])).unwrap();
        let err = config_to_command(config).unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = parse_args_from(&args(&["--unknown"])).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_generator_option() {
        let config = parse_args_from(&args(&["--generator", "stub", "generate"])).unwrap();
        assert_eq!(config.generator.as_deref(), Some("stub"));
        assert_eq!(config.command.as_deref(), Some("generate"));
    }

    #[test]
    fn test_interval_option() {
        let config = parse_args_from(&args(&["--interval", "60", "serve"])).unwrap();
        assert_eq!(config.interval_secs, Some(60));
    }

    #[test]
    fn test_interval_rejects_non_numeric() {
        let err = parse_args_from(&args(&["--interval", "soon", "serve"])).unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("--interval"));
    }

    #[test]
    fn test_dir_option() {
        let config = parse_args_from(&args(&["--dir", "/tmp/articles", "list"])).unwrap();
        assert_eq!(config.dir, Some(PathBuf::from("/tmp/articles")));
    }
}
