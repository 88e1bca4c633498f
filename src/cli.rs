//! Command-line front end
//!
//! Builds a portfolio page snapshot from the config file, command-line
//! overrides and the active stylesheet, then prints it.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use stardrift::{Background, RegenerationReport, build_presets, fresh_seed};
use stardrift_config::{Config, ConfigEvent, ConfigWatcherBuilder};
use stardrift_core::{FieldPreset, seeded_rng};
use stardrift_render::{FieldOutcome, HtmlPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Page markup with the generated elements
    Html,
    /// Generated particle values per field
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate decorative star fields for a portfolio page", long_about = None)]
struct Args {
    /// Viewport width in CSS pixels
    #[arg(long)]
    width: Option<f64>,
    /// Random seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,
    /// Act as if the reduced-motion preference were set
    #[arg(long)]
    reduced_motion: bool,
    /// Body flag class to set, e.g. show-skills-stars
    #[arg(long = "flag", value_name = "NAME")]
    flags: Vec<String>,
    /// Number of skill cards in the page skeleton
    #[arg(long)]
    skill_cards: Option<usize>,
    /// Resize the viewport after load; repeated values form one burst
    #[arg(long = "resize", value_name = "WIDTH")]
    resizes: Vec<f64>,
    /// Config file instead of ~/.stardrift/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
    /// Stylesheet with layer overrides instead of the configured one
    #[arg(long)]
    stylesheet: Option<PathBuf>,
    /// Keep running and regenerate when the config or stylesheet changes
    #[arg(long)]
    watch: bool,
}

/// Config file and stylesheet the run was built from
struct Sources {
    config_path: PathBuf,
    stylesheet_path: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<(Config, PathBuf)> {
    match &args.config {
        Some(path) => {
            let config = Config::load_from(path).with_context(|| format!("load config {:?}", path))?;
            Ok((config, path.clone()))
        }
        None => {
            let path = Config::config_file_path()?;
            let config = Config::load().unwrap_or_else(|e| {
                log::warn!("Using default configuration: {}", e);
                Config::default()
            });
            Ok((config, path))
        }
    }
}

/// Command-line values take precedence over the config file
fn apply_args(config: &mut Config, args: &Args) {
    if let Some(width) = args.width {
        config.viewport.width = width;
    }
    if args.seed.is_some() {
        config.motion.seed = args.seed;
    }
    if args.reduced_motion {
        config.motion.reduced = true;
    }
    for flag in &args.flags {
        if !config.has_flag(flag) {
            config.page.flags.push(flag.clone());
        }
    }
    if let Some(cards) = args.skill_cards {
        config.page.skill_cards = cards;
    }
}

fn load_stylesheet(config: &Config, path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("read stylesheet {:?}", path)),
        None => Ok(config.resolve_stylesheet_css()?),
    }
}

fn presets_for(config: &Config, css: &str) -> Result<Vec<FieldPreset>> {
    build_presets(&config.fields.enabled(), css).context("apply stylesheet overrides")
}

fn page_for(config: &Config) -> HtmlPage {
    let mut page = HtmlPage::portfolio(config.viewport.width, config.page.skill_cards);
    page.reduced_motion = config.motion.reduced;
    for flag in &config.page.flags {
        page.set_flag(flag);
    }
    page
}

fn build_background(config: &Config, css: &str) -> Result<Background<HtmlPage>> {
    let seed = config.motion.seed.unwrap_or_else(fresh_seed);
    log::info!("Generating with seed {}", seed);
    Ok(Background::new(page_for(config), presets_for(config, css)?, seeded_rng(seed))
        .with_quiet_period(config.resize_debounce()))
}

/// Feed a burst of resizes through the debouncer and wait for it to settle
fn simulate_resizes(background: &mut Background<HtmlPage>, widths: &[f64]) -> Result<Option<RegenerationReport>> {
    let start = Instant::now();
    for (i, &width) in widths.iter().enumerate() {
        let page = background.host_mut();
        page.client_width = Some(width);
        page.inner_width = Some(width);
        background.on_resize_at(start + Duration::from_millis(i as u64 * 50));
    }

    let settled = start + Duration::from_millis(widths.len() as u64 * 50);
    let Some(wait) = background.remaining_at(settled) else {
        return Ok(None);
    };
    Ok(background.tick_at(settled + wait)?)
}

fn report_json(report: &RegenerationReport) -> serde_json::Value {
    let fields: Vec<_> = report
        .fields
        .iter()
        .map(|field| match &field.outcome {
            FieldOutcome::Applied(plan) => serde_json::json!({
                "name": field.name,
                "status": "applied",
                "plan": plan,
            }),
            FieldOutcome::Skipped(reason) => serde_json::json!({
                "name": field.name,
                "status": "skipped",
                "reason": reason.to_string(),
            }),
        })
        .collect();

    serde_json::json!({
        "elements": report.elements(),
        "fields": fields,
    })
}

fn emit(format: OutputFormat, background: &Background<HtmlPage>, report: &RegenerationReport) -> Result<()> {
    match format {
        OutputFormat::Html => print!("{}", background.host().to_html()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report_json(report))?),
    }
    Ok(())
}

/// Inputs and page of a running `--watch` session
struct WatchSession {
    config: Config,
    css: String,
    background: Background<HtmlPage>,
}

impl WatchSession {
    fn new(config: Config, css: String, background: Background<HtmlPage>) -> Self {
        Self {
            config,
            css,
            background,
        }
    }

    /// Start over from a new config and stylesheet; nothing changes on error
    fn replace(&mut self, config: Config, css: String) -> Result<()> {
        // Page settings may have changed, so start from a fresh page
        let background = build_background(&config, &css)?;
        *self = Self::new(config, css, background);
        Ok(())
    }

    /// Swap the stylesheet on the current page; nothing changes on error
    fn replace_stylesheet(&mut self, css: String) -> Result<()> {
        let presets = presets_for(&self.config, &css)?;
        self.background.set_presets(presets);
        self.css = css;
        Ok(())
    }
}

fn watch(args: &Args, sources: Sources, mut session: WatchSession) -> Result<()> {
    let watcher = ConfigWatcherBuilder::new()
        .build(&sources.config_path, sources.stylesheet_path.as_deref())
        .context("start file watcher")?;
    log::info!("Watching {:?} for changes", sources.config_path);

    loop {
        let Some(event) = watcher.recv_timeout(Duration::from_millis(250)) else {
            continue;
        };

        let applied = match event {
            ConfigEvent::ConfigReloaded(mut config) => {
                apply_args(&mut config, args);
                let css = match args.stylesheet {
                    Some(_) => Ok(session.css.clone()),
                    None => load_stylesheet(&config, None),
                };
                css.and_then(|css| session.replace(config, css))
                    .context("keeping previous configuration")
            }
            ConfigEvent::StylesheetReloaded(css) => session
                .replace_stylesheet(css)
                .context("keeping previous presets"),
            ConfigEvent::ReloadError(e) => {
                log::warn!("Reload failed: {}", e);
                continue;
            }
        };
        if let Err(e) = applied {
            log::error!("{:#}", e);
            continue;
        }

        let report = session.background.regenerate()?;
        emit(args.format, &session.background, &report)?;
    }
}

pub fn run() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn,stardrift=info")).init();

    let args = Args::parse();
    let (mut config, config_path) = load_config(&args)?;
    apply_args(&mut config, &args);

    let css = load_stylesheet(&config, args.stylesheet.as_deref())?;
    let mut background = build_background(&config, &css)?;

    let mut report = background.on_load()?;
    if let Some(resized) = simulate_resizes(&mut background, &args.resizes)? {
        report = resized;
    }
    emit(args.format, &background, &report)?;

    if args.watch {
        let stylesheet_path = match &args.stylesheet {
            Some(path) => Some(path.clone()),
            None => config.user_stylesheet_path()?,
        };
        let sources = Sources {
            config_path,
            stylesheet_path,
        };
        watch(&args, sources, WatchSession::new(config, css, background))?;
    }

    Ok(())
}
