//! poshterm - render Oh My Posh themes and decode ANSI colored text
//!
//! `poshterm render` prints a prompt for the given theme and context,
//! `poshterm decode` turns colored stdin into styled runs and
//! `poshterm info` summarizes a theme file.

use std::env;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use poshterm::config::loader::{ConfigLoader, LoadOptions};
use poshterm::{ansi, load_theme_file, Config, ContextUpdate, PromptContext, PromptEngine};

#[derive(Parser, Debug)]
#[command(name = "poshterm", version, about = "Oh My Posh style prompt renderer")]
struct Cli {
    /// Configuration file (defaults to the standard search locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a prompt
    Render(RenderArgs),

    /// Decode ANSI colored text from stdin
    Decode {
        /// Emit HTML spans instead of JSON runs
        #[arg(long)]
        html: bool,

        /// Print the text with escape sequences removed
        #[arg(long, conflicts_with = "html")]
        strip: bool,
    },

    /// Summarize a theme file
    Info {
        /// Theme file to inspect
        theme: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Theme file, overrides `theme_path` from the configuration
    #[arg(short, long)]
    theme: Option<PathBuf>,

    /// Start from the current process environment instead of the defaults
    #[arg(long)]
    from_env: bool,

    #[arg(long)]
    user: Option<String>,

    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    shell: Option<String>,

    #[arg(long)]
    pwd: Option<String>,

    #[arg(long)]
    home: Option<String>,

    /// Exit code of the previous command
    #[arg(long, allow_negative_numbers = true)]
    code: Option<i32>,

    /// Render as an elevated session
    #[arg(long)]
    root: bool,

    /// Print the rendered parts as JSON
    #[arg(long)]
    parts: bool,
}

impl RenderArgs {
    fn context_update(&self) -> ContextUpdate {
        ContextUpdate {
            user_name: self.user.clone(),
            host_name: self.host.clone(),
            shell: self.shell.clone(),
            pwd: self.pwd.clone(),
            home: self.home.clone(),
            root: self.root.then_some(true),
            code: self.code,
            ..Default::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, config_error) = load_config(&cli)?;
    init_logging(&cli, &config);
    if let Some(e) = config_error {
        warn!("Failed to load configuration: {}. Using defaults", e);
    }

    debug!(?cli, "parsed arguments");

    match cli.command {
        Command::Render(args) => render(&config, args),
        Command::Decode { html, strip } => decode(html, strip),
        Command::Info { theme } => theme_info(theme),
    }
}

/// An explicit `--config` must load. A broken file found by searching is
/// replaced by the defaults and its error handed back to be logged.
fn load_config(cli: &Cli) -> Result<(Config, Option<poshterm::Error>)> {
    match &cli.config {
        Some(path) => {
            let config = ConfigLoader::load_from_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            Ok((config, None))
        }
        None => Ok(search_config(ConfigLoader::new())),
    }
}

fn search_config(mut loader: ConfigLoader) -> (Config, Option<poshterm::Error>) {
    match loader.load_with_options(LoadOptions::default()) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

/// Logs go to stderr so stdout stays the rendered output
fn init_logging(cli: &Cli, config: &Config) {
    let level = if cli.debug || env::var("POSHTERM_DEBUG").is_ok() {
        "debug".to_string()
    } else {
        env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone())
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn render(config: &Config, args: RenderArgs) -> Result<()> {
    let mut engine = PromptEngine::with_config(config);

    if args.from_env {
        engine.update_context(PromptContext::from_env().into());
        // Configured overrides still win over the environment
        engine.update_context(config.context.clone());
    }
    engine.update_context(args.context_update());

    let theme_path = args.theme.as_ref().or(config.theme_path.as_ref());
    if let Some(path) = theme_path {
        let theme = load_theme_file(path)
            .with_context(|| format!("failed to load theme {}", path.display()))?;
        engine.set_theme(theme);
    } else {
        info!("no theme configured, using the fallback prompt");
    }

    let rendered = engine.render_prompt();
    if args.parts {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        print!("{}", rendered.prompt);
    }
    Ok(())
}

fn decode(html: bool, strip: bool) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    if strip {
        print!("{}", ansi::strip_ansi_codes(&input));
        return Ok(());
    }

    let runs = ansi::decode(&input);
    if html {
        println!("{}", ansi::to_html(&runs));
    } else {
        println!("{}", serde_json::to_string_pretty(&runs)?);
    }
    Ok(())
}

fn theme_info(path: PathBuf) -> Result<()> {
    let theme = load_theme_file(&path)
        .with_context(|| format!("failed to load theme {}", path.display()))?;
    println!("{}", serde_json::to_string_pretty(&theme.info())?);
    Ok(())
}
