use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

const EXAMPLE_SCENARIO: &str = r##"{
  "location": "/?pageId=pricing&mode=content",
  "pages": {
    "homePage": { "id": "home", "name": "Home", "path": "" },
    "pages": [
      { "id": "pricing", "name": "Pricing", "path": "/pricing" }
    ]
  },
  "elements": ["plans", "faq"],
  "steps": [
    { "action": "loadPages" },
    { "action": "setPageHash", "pageHash": "%23plans" },
    { "action": "setMode" },
    { "action": "back" },
    { "action": "selectPage", "pageId": "home" }
  ]
}
"##;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Base path the builder is served from
    #[arg(short, long, default_value = "/")]
    pub base_path: String,

    /// Directory for the example scenario
    #[arg(short, long, default_value = "scenarios")]
    pub scenarios_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing builder-sync...".bright_blue().bold());

    let scenarios_dir = PathBuf::from(cwd).join(&args.scenarios_dir);
    if !scenarios_dir.exists() {
        fs::create_dir_all(&scenarios_dir)?;
        println!("  {} Created {}/", "✓".green(), args.scenarios_dir);
    }

    let example = scenarios_dir.join("example.json");
    if !example.exists() {
        fs::write(&example, EXAMPLE_SCENARIO)?;
        println!("  {} Created example.json", "✓".green());
    }

    let config = Config {
        base_path: args.base_path,
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("{}", "✨ Done!".green().bold());
    println!(
        "  Run {} to replay the example",
        format!("builder-sync replay {}", args.scenarios_dir).bright_white()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::replay::Scenario;

    #[test]
    fn test_example_scenario_parses() {
        let scenario: Scenario = serde_json::from_str(EXAMPLE_SCENARIO).unwrap();
        assert_eq!(scenario.steps.len(), 5);
        assert_eq!(scenario.elements, vec!["plans", "faq"]);
    }

    #[test]
    fn test_init_writes_config_and_example() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();

        init(
            InitArgs {
                base_path: "/builder".to_string(),
                scenarios_dir: "scenarios".to_string(),
                force: false,
            },
            cwd,
        )
        .unwrap();

        let config = Config::load(cwd).unwrap();
        assert_eq!(config.base_path, "/builder");
        assert!(dir.path().join("scenarios/example.json").exists());
    }
}
