use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use builder_sync::{
    BuilderMode, BuilderState, HashLinkSync, MemoryDocument, MemoryHistory, PageCatalog,
    PageLocation, PageUrlSync, PathBuilder,
};
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Scenario .json file or directory of scenarios
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// A scripted session against an in-memory history and view
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Initial history entry
    #[serde(default = "default_location")]
    pub location: String,

    /// Catalog installed by the `loadPages` step
    pub pages: PageCatalog,

    /// Element ids present in the view
    #[serde(default)]
    pub elements: Vec<String>,

    #[serde(default)]
    pub auth_token: Option<String>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_location() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Step {
    LoadPages,
    #[serde(rename_all = "camelCase")]
    SelectPage {
        page_id: String,
    },
    SetMode {
        #[serde(default)]
        mode: Option<BuilderMode>,
    },
    #[serde(rename_all = "camelCase")]
    SetPageHash {
        page_hash: String,
    },
    #[serde(rename_all = "camelCase")]
    SetAuthToken {
        #[serde(default)]
        auth_token: Option<String>,
    },
    Back,
    Forward,
    AddElement {
        id: String,
    },
    RemoveElement {
        id: String,
    },
    Unmount,
}

impl Step {
    pub fn describe(&self) -> String {
        match self {
            Step::LoadPages => "loadPages".to_string(),
            Step::SelectPage { page_id } => format!("selectPage {page_id}"),
            Step::SetMode { mode } => match mode {
                Some(mode) => format!("setMode {mode}"),
                None => "setMode (default)".to_string(),
            },
            Step::SetPageHash { page_hash } => format!("setPageHash {page_hash:?}"),
            Step::SetAuthToken { auth_token } => match auth_token {
                Some(_) => "setAuthToken ***".to_string(),
                None => "setAuthToken (none)".to_string(),
            },
            Step::Back => "back".to_string(),
            Step::Forward => "forward".to_string(),
            Step::AddElement { id } => format!("addElement {id}"),
            Step::RemoveElement { id } => format!("removeElement {id}"),
            Step::Unmount => "unmount".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutcome {
    pub action: String,
    pub location: String,
    pub navigated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub steps: Vec<StepOutcome>,
    pub entries: Vec<String>,
    pub index: usize,
    pub navigations: usize,
    pub scrolled: Vec<String>,
    /// Final builder state, if a page was selected
    pub state: Option<PageLocation>,
}

#[derive(Debug, Serialize)]
struct FileReport<'a> {
    file: String,
    #[serde(flatten)]
    report: &'a ReplayReport,
}

/// Mount both sync units against in-memory collaborators and play the steps
pub fn run_scenario(
    scenario: &Scenario,
    build_path: PathBuilder,
    default_auth_token: Option<String>,
) -> ReplayReport {
    let history = Rc::new(MemoryHistory::new(scenario.location.clone()));
    let document = Rc::new(MemoryDocument::with_elements(scenario.elements.iter().cloned()));
    let state = BuilderState::new();
    state
        .auth_token
        .set(scenario.auth_token.clone().or(default_auth_token));

    let mut page_url = Some(PageUrlSync::mount_with(history.clone(), &state, build_path));
    let mut hash_link = Some(HashLinkSync::mount(document.clone(), &state.selected_page_hash));

    let mut steps = Vec::with_capacity(scenario.steps.len());
    for step in &scenario.steps {
        debug!(action = %step.describe(), "Replaying step");
        let before = history.navigation_count();

        match step {
            Step::LoadPages => state.load_pages(scenario.pages.clone()),
            Step::SelectPage { page_id } => state.select_page(page_id.clone()),
            Step::SetMode { mode } => state.set_builder_mode(*mode),
            Step::SetPageHash { page_hash } => state.selected_page_hash.set(page_hash.clone()),
            Step::SetAuthToken { auth_token } => state.auth_token.set(auth_token.clone()),
            Step::Back => {
                history.back();
            }
            Step::Forward => {
                history.forward();
            }
            Step::AddElement { id } => document.add_element(id.clone()),
            Step::RemoveElement { id } => {
                document.remove_element(id);
            }
            Step::Unmount => {
                if let Some(page_url) = page_url.take() {
                    page_url.unmount();
                }
                if let Some(hash_link) = hash_link.take() {
                    hash_link.unmount();
                }
            }
        }

        steps.push(StepOutcome {
            action: step.describe(),
            location: history.current(),
            navigated: history.navigation_count() > before,
        });
    }

    let final_state = state.selected_page().map(|page| {
        PageLocation::new(page.id, state.selected_page_hash.get(), state.builder_mode.get())
    });

    ReplayReport {
        steps,
        entries: history.entries(),
        index: history.index(),
        navigations: history.navigation_count(),
        scrolled: document.scrolled(),
        state: final_state,
    }
}

pub fn replay(args: ReplayArgs, config: &Config) -> Result<()> {
    let files = find_scenarios(&args.input)?;
    if files.is_empty() {
        return Err(anyhow!("No scenarios found in {}", args.input.display()));
    }

    let mut reports = Vec::with_capacity(files.len());
    for file in &files {
        let content = fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let scenario: Scenario = serde_json::from_str(&content)
            .with_context(|| format!("Invalid scenario {}", file.display()))?;

        let report = run_scenario(&scenario, config.path_builder(), config.auth_token.clone());
        reports.push((file.display().to_string(), report));
    }

    match args.format {
        OutputFormat::Json => {
            let output: Vec<FileReport> = reports
                .iter()
                .map(|(file, report)| FileReport {
                    file: file.clone(),
                    report,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            for (file, report) in &reports {
                print_report(file, report);
            }
        }
    }

    Ok(())
}

fn print_report(file: &str, report: &ReplayReport) {
    println!("▶️  {} {}", "Replaying".bright_blue().bold(), file);

    for step in &report.steps {
        let marker = if step.navigated {
            "→".green()
        } else {
            "·".dimmed()
        };
        println!("   {} {:<28} {}", marker, step.action, step.location);
    }

    println!();
    println!("   History ({} pushed):", report.navigations);
    for (i, entry) in report.entries.iter().enumerate() {
        let cursor = if i == report.index { "▸" } else { " " };
        println!("     {} {}", cursor.bright_white(), entry);
    }

    if !report.scrolled.is_empty() {
        println!("   Scrolled: {}", report.scrolled.join(", "));
    }

    match &report.state {
        Some(state) => println!(
            "   State: page={} hash={:?} mode={}",
            state.page_id, state.page_hash, state.mode
        ),
        None => println!("   State: {}", "no page selected".yellow()),
    }
    println!();
}

fn find_scenarios(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    files.sort();

    Ok(files)
}
