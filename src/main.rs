use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ytinfo::{commands::build_manifest, links::extract_video_ids};
use ytinfo_core::{config, shellexpand};
use ytinfo_i18n::{install_bundled_locales, Args, Translator};
use ytinfo_store::Store;

#[derive(Parser)]
#[command(
    name = "ytinfo",
    version,
    about = "ytinfo: localized YouTube link info for Discord"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Check config, locale coverage and the settings store.
    Check,
    /// Resolve a translation key.
    Translate {
        /// Dotted key, e.g. `settings.saved`.
        key: String,
        /// Language to resolve in (defaults to the configured locale).
        #[arg(short, long)]
        lang: Option<String>,
        /// `name=value` pairs for named placeholders, or plain positional values.
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
    /// Print the localized command manifest as JSON.
    Commands {
        #[arg(long)]
        pretty: bool,
    },
    /// List the video IDs linked in some text.
    Links {
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;
    let _guard = init_logging(&cfg.bot)?;

    match cli.command {
        Commands::Check => {
            println!("ytinfo: status check\n");
            println!("Config: {}", cli.config);
            println!("Locales: {}", shellexpand(&cfg.i18n.locales_dir));
            println!(
                "Default locale: {} (fallback: {})",
                cfg.i18n.default_locale,
                cfg.i18n.fallback().unwrap_or("none")
            );
            println!();

            let tr = load_translator(&cfg.i18n).await?;
            for lang in tr.languages() {
                let strings = tr.table(Some(lang)).map_or(0, |t| t.len());
                let missing = tr.missing_keys(lang);
                if missing.is_empty() {
                    println!("  {lang}: {strings} strings, complete");
                } else {
                    println!("  {lang}: {strings} strings, {} missing", missing.len());
                    for key in &missing {
                        println!("      - {key}");
                    }
                }
            }
            println!();

            let store = Store::new(&cfg.store).await?;
            let (guilds, users) = store.counts().await?;
            println!(
                "Store: {} ({guilds} guilds, {users} users)",
                shellexpand(&cfg.store.db_path)
            );
        }
        Commands::Translate { key, lang, args } => {
            let tr = load_translator(&cfg.i18n).await?;
            println!("{}", tr.resolve(lang.as_deref(), &key, &parse_cli_args(&args)));
        }
        Commands::Commands { pretty } => {
            let tr = load_translator(&cfg.i18n).await?;
            let manifest = build_manifest(&tr);
            let json = if pretty {
                serde_json::to_string_pretty(&manifest)?
            } else {
                serde_json::to_string(&manifest)?
            };
            println!("{json}");
        }
        Commands::Links { text } => {
            if text.is_empty() {
                anyhow::bail!("no text provided. Usage: ytinfo links <text>");
            }
            for id in extract_video_ids(&text.join(" "), cfg.replies.max_links_per_message) {
                println!("{id}");
            }
        }
    }

    Ok(())
}

/// Log to stderr and to `{data_dir}/logs/ytinfo.log`.
///
/// The returned guard flushes the file writer on drop; keep it alive.
fn init_logging(bot: &config::BotConfig) -> anyhow::Result<WorkerGuard> {
    let logs_dir = PathBuf::from(shellexpand(&bot.data_dir)).join("logs");
    std::fs::create_dir_all(&logs_dir)?;
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&logs_dir, "ytinfo.log"));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&bot.log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    Ok(guard)
}

/// Deploy bundled locales, then load the locale directory.
async fn load_translator(cfg: &config::I18nConfig) -> anyhow::Result<Translator> {
    install_bundled_locales(&cfg.locales_dir);

    let mut tr = Translator::from_config(cfg);
    let dir = shellexpand(&cfg.locales_dir);
    if tr.load_dir(&dir).await? == 0 {
        warn!("no usable locale files in {dir}, using bundled locales");
        tr.load_bundled();
    }
    if !tr.supports(tr.active()) {
        anyhow::bail!(
            "default locale {} is not loaded (available: {})",
            tr.active(),
            tr.languages().join(", ")
        );
    }
    Ok(tr)
}

/// Named arguments when every value is `name=value`, positional otherwise.
fn parse_cli_args(args: &[String]) -> Args {
    let pairs: Option<Vec<(&str, &str)>> = args.iter().map(|a| a.split_once('=')).collect();
    match pairs {
        Some(pairs) if !pairs.is_empty() => Args::named(pairs),
        _ => Args::positional(args.iter().map(String::as_str)),
    }
}
