//! CLI headless commands for scripting and CI
//!
//! Provides non-interactive commands:
//! - `toggle [--clicks N] [--page FILE] [--json]` - Click the toggle and report the result
//! - `page` - Print the built-in sign-in page as JSON
//! - `config [--path]` - Show the effective configuration

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::core::config::{Config, ToggleSettings};
use crate::core::dom::Document;
use crate::core::handler;
use crate::core::page::Page;
use crate::core::visibility::Visibility;

/// Output format for report commands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_args(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOptions {
    pub clicks: usize,
    pub page: Option<PathBuf>,
    pub format: OutputFormat,
}

impl Default for ToggleOptions {
    fn default() -> Self {
        Self {
            clicks: 1,
            page: None,
            format: OutputFormat::Human,
        }
    }
}

impl ToggleOptions {
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut options = Self::default();
        let mut json = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--clicks" | "-n" => {
                    let value = args
                        .get(i + 1)
                        .context("--clicks requires a number")?;
                    options.clicks = value
                        .parse()
                        .with_context(|| format!("Invalid click count '{}'", value))?;
                    i += 2;
                }
                "--page" | "-p" => {
                    let value = args.get(i + 1).context("--page requires a file path")?;
                    options.page = Some(PathBuf::from(value));
                    i += 2;
                }
                "--json" => {
                    json = true;
                    i += 1;
                }
                other => bail!("Unknown option '{}' for toggle", other),
            }
        }

        options.format = OutputFormat::from_args(json);
        Ok(options)
    }
}

/// State of the page after the toggle has been clicked
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToggleReport {
    pub clicks: usize,
    pub visibility: Visibility,
    pub field_type: Option<String>,
    pub control_classes: Vec<String>,
}

impl ToggleReport {
    fn print(&self, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(self)?),
            OutputFormat::Human => {
                println!("Clicks:     {}", self.clicks);
                println!("Visibility: {}", self.visibility);
                println!(
                    "Field type: {}",
                    self.field_type.as_deref().unwrap_or("(none)")
                );
                println!("Classes:    {}", self.control_classes.join(" "));
            }
        }
        Ok(())
    }
}

/// Installs the toggle on `document`, clicks the control `clicks` times and
/// reports the resulting state.
pub fn run_toggle(document: Document, settings: &ToggleSettings, clicks: usize) -> Result<ToggleReport> {
    let mut page = Page::new(document);
    let control = handler::install(&mut page, settings)?;

    for _ in 0..clicks {
        page.click(control)?;
    }

    let doc = page.document();
    let field = doc
        .select(&settings.field_selector)?
        .and_then(|id| doc.get(id))
        .context("Password field disappeared")?;
    let field_type = field.attribute("type").map(str::to_string);
    let control_classes = doc
        .get(control)
        .map(|el| el.classes.clone())
        .unwrap_or_default();

    Ok(ToggleReport {
        clicks,
        visibility: Visibility::from_input_type(field_type.as_deref()),
        field_type,
        control_classes,
    })
}

// ============================================================================
// TOGGLE COMMAND
// ============================================================================

pub fn cmd_toggle(options: &ToggleOptions, config: &Config) -> Result<()> {
    let document = match options.page {
        Some(ref path) => Document::load(path)?,
        None => Document::login_form(),
    };

    let report = run_toggle(document, &config.toggle, options.clicks)?;
    report.print(options.format)
}

// ============================================================================
// PAGE COMMAND
// ============================================================================

pub fn cmd_page() -> Result<()> {
    println!("{}", Document::login_form().to_json()?);
    Ok(())
}

// ============================================================================
// CONFIG COMMAND
// ============================================================================

pub fn cmd_config(config_dir: &Path, path_only: bool) -> Result<()> {
    let config_path = Config::config_path(config_dir);
    if path_only {
        println!("{}", config_path.display());
        return Ok(());
    }

    // Loading also creates the default file on first use
    let config = Config::load(config_dir)?;
    println!("# {}", config_path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
