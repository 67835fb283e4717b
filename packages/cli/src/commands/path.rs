use crate::config::Config;
use anyhow::Result;
use builder_sync::{encode_location, BuilderMode, BuilderPathParams, PageLocation};
use clap::Args;

#[derive(Args, Debug)]
pub struct PathArgs {
    /// Selected page id
    #[arg(long)]
    pub page_id: Option<String>,

    /// Raw page hash, stored as-is
    #[arg(long, default_value = "")]
    pub page_hash: String,

    /// Builder mode (design, preview, content)
    #[arg(short, long)]
    pub mode: Option<BuilderMode>,

    /// Auth token; falls back to the config file
    #[arg(long)]
    pub auth_token: Option<String>,

    /// Home page id, left out of the path
    #[arg(long, default_value = "home")]
    pub home: String,
}

pub fn path(args: PathArgs, config: &Config) -> Result<()> {
    println!("{}", build(args, config));
    Ok(())
}

fn build(args: PathArgs, config: &Config) -> String {
    let params = params_for(&args, config);
    (config.path_builder())(&params)
}

fn params_for(args: &PathArgs, config: &Config) -> BuilderPathParams {
    let location = PageLocation::new(
        args.page_id.clone().unwrap_or_else(|| args.home.clone()),
        args.page_hash.clone(),
        args.mode.unwrap_or_default(),
    );
    let auth_token = args.auth_token.clone().or_else(|| config.auth_token.clone());

    encode_location(&location, &args.home, auth_token)
}
