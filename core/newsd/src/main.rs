mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cli::{config_to_command, parse_args};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::{Article, NewsdCommand};
use ports::inbound::CommandRunner;
use usecase::Scheduler;
use wiring::{wire_newsd, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl CommandRunner for Runner {
    fn run(&self, cmd: NewsdCommand) -> Result<i32, Error> {
        let command_name = cmd_name_for_log(&cmd);
        self.log_lifecycle("command started", command_name, None);

        let result = match cmd {
            NewsdCommand::Help => {
                print_help();
                Ok(0)
            }
            NewsdCommand::Generate => self.run_generate(),
            NewsdCommand::Serve => self.run_serve(),
            NewsdCommand::List => self.run_list(),
            NewsdCommand::Show { id } => self.run_show(&id),
            NewsdCommand::Latest => self.run_latest(),
        };

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        self.log_lifecycle("command finished", command_name, Some(code));
        if let Err(ref e) = result {
            let _ = self.app.logger.log(&LogRecord::new(
                LogLevel::Error,
                e.to_string(),
                "cli",
                "error",
                None,
            ));
        }
        result
    }
}

impl Runner {
    fn log_lifecycle(&self, message: &str, command: &str, exit_code: Option<i32>) {
        let mut fields = BTreeMap::new();
        fields.insert("command".to_string(), serde_json::json!(command));
        if let Some(code) = exit_code {
            fields.insert("exit_code".to_string(), serde_json::json!(code));
        }
        let _ = self.app.logger.log(&LogRecord::new(
            LogLevel::Info,
            message,
            "cli",
            "lifecycle",
            Some(fields),
        ));
    }

    fn run_generate(&self) -> Result<i32, Error> {
        let article = self
            .app
            .pipeline
            .generate_and_ingest(self.app.generator.as_ref())
            .map_err(|f| f.error)?;
        print_summary(&article);
        Ok(0)
    }

    fn run_serve(&self) -> Result<i32, Error> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_handler = Arc::clone(&stop);
        ctrlc::set_handler(move || {
            stop_handler.store(true, Ordering::SeqCst);
        })
        .map_err(|e| Error::io_msg(format!("Failed to install signal handler: {}", e)))?;

        let scheduler = Scheduler::new(
            Duration::from_secs(self.app.settings.interval_secs),
            stop,
            Arc::clone(&self.app.logger),
        );
        scheduler.run(&mut || {
            let article = self
                .app
                .pipeline
                .generate_and_ingest(self.app.generator.as_ref())
                .map_err(|f| f.error)?;
            print_summary(&article);
            Ok(())
        });
        Ok(0)
    }

    fn run_list(&self) -> Result<i32, Error> {
        use ports::outbound::ArticleLoader;
        let articles = self.app.store.load_all()?;
        if articles.is_empty() {
            println!("No articles stored.");
            return Ok(0);
        }
        for a in &articles {
            println!("{}  {}  {}", a.id, a.created_at, a.title);
        }
        Ok(0)
    }

    fn run_show(&self, id: &str) -> Result<i32, Error> {
        use ports::outbound::ArticleLoader;
        match self.app.store.load_by_id(id)? {
            Some(article) => {
                print_article(&article)?;
                Ok(0)
            }
            None => Err(Error::io_msg(format!("Article '{}' not found", id))),
        }
    }

    fn run_latest(&self) -> Result<i32, Error> {
        use ports::outbound::ArticleLoader;
        match self.app.store.load_all()?.into_iter().next() {
            Some(article) => {
                print_article(&article)?;
                Ok(0)
            }
            None => {
                println!("No articles stored.");
                Ok(0)
            }
        }
    }
}

fn cmd_name_for_log(cmd: &NewsdCommand) -> &'static str {
    match cmd {
        NewsdCommand::Help => "help",
        NewsdCommand::Generate => "generate",
        NewsdCommand::Serve => "serve",
        NewsdCommand::List => "list",
        NewsdCommand::Show { .. } => "show",
        NewsdCommand::Latest => "latest",
    }
}

fn print_summary(article: &Article) {
    println!("Saved article {}: {}", article.id, article.title);
    println!(
        "  sources: {}, images: {}, topics: {}, related: {}",
        article.sources.len(),
        article.images.len(),
        article.topics.len(),
        article.related_articles.len()
    );
}

fn print_article(article: &Article) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(article)
        .map_err(|e| Error::json(format!("Failed to render article: {}", e)))?;
    println!("{}", json);
    Ok(())
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("newsd: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = parse_args()?;

    let mut settings = adapter::env_settings::settings_from_env()?;
    if let Some(dir) = &config.dir {
        settings.articles_dir = dir.clone();
    }
    if let Some(secs) = config.interval_secs {
        settings.interval_secs = secs;
    }

    let use_stub = match config.generator.as_deref() {
        None | Some("gemini") => {
            if config.generator.is_some() && adapter::env_settings::gemini_api_key().is_none() {
                return Err(Error::env(
                    "GEMINI_API_KEY environment variable is not set",
                ));
            }
            false
        }
        Some("stub") => true,
        Some(other) => {
            return Err(Error::invalid_argument(format!(
                "Unknown generator: '{}'",
                other
            )))
        }
    };

    let cmd = config_to_command(config)?;
    let app = wire_newsd(settings, use_stub);
    let runner = Runner { app };
    runner.run(cmd)
}

fn print_usage() {
    eprintln!("Usage: newsd [options] <command>");
}

fn print_help() {
    println!("Usage: newsd [options] <command>");
    println!();
    println!("Commands:");
    println!("  generate        Generate one news article, ingest and store it");
    println!("  serve           Run generate on a fixed interval until interrupted");
    println!("  list            List stored articles, newest first");
    println!("  show <id>       Print one stored article as JSON");
    println!("  latest          Print the most recent stored article as JSON");
    println!();
    println!("Options:");
    println!("  -h, --help             Show this help message");
    println!("  --generator <name>     Content generator: gemini or stub (default: gemini when GEMINI_API_KEY is set, stub otherwise)");
    println!("  --interval <secs>      Interval between serve cycles (overrides NEWSD_INTERVAL_SECS)");
    println!("  --dir <path>           Local article store directory (overrides NEWSD_ARTICLES_DIR)");
    println!();
    println!("Environment:");
    println!("  GEMINI_API_KEY             API key for article generation (stub is used when unset)");
    println!("  NEWSD_ARTICLES_DIR         Local article store directory (default: ./articles)");
    println!("  NEWSD_LOG_FILE             JSONL log file (default: ./newsd.jsonl)");
    println!("  NEWSD_INTERVAL_SECS        Interval for serve mode (default: 1800)");
    println!("  NEWSD_SIMILARITY_THRESHOLD Jaccard threshold for related articles (default: 0.4)");
    println!("  NEWSD_DUPLICATE_THRESHOLD  Jaccard threshold for duplicate warnings (default: 0.7)");
    println!("  SUPABASE_URL, SUPABASE_KEY Remote backend; both must be set to enable it");
    println!("  SUPABASE_TABLE             Remote table name (default: articles)");
    println!("  SUPABASE_STORAGE_ENABLED   Set to 0/false to disable the remote backend");
}
