use anyhow::{Context, Result};
use builder_sync::{search_of, try_decode_location, Page, PageCatalog, PageLocation, SearchParams};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Full URL, builder path, or bare query string
    pub location: String,

    /// Home page id used when the location has no pageId
    #[arg(long, default_value = "home")]
    pub home: String,

    /// Page catalog JSON; its home page overrides --home and the decoded
    /// page must exist in it
    #[arg(short, long)]
    pub pages: Option<PathBuf>,
}

pub fn decode(args: DecodeArgs) -> Result<()> {
    let location = match &args.pages {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let catalog = PageCatalog::from_json(&content)
                .with_context(|| format!("Invalid page catalog {}", path.display()))?;
            decode_in_catalog(&args.location, &catalog)?
        }
        None => {
            let catalog = PageCatalog::new(Page::new(args.home.clone(), "", ""), Vec::new());
            decode_input(&args.location, &catalog)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&location)?);

    Ok(())
}

/// Decode and check that the page is part of `catalog`
pub fn decode_in_catalog(input: &str, catalog: &PageCatalog) -> Result<PageLocation> {
    let location = decode_input(input, catalog)?;
    catalog.require(&location.page_id)?;
    Ok(location)
}

/// Decode any of the accepted location shapes
pub fn decode_input(input: &str, catalog: &PageCatalog) -> Result<PageLocation> {
    let params = if input.contains("://") {
        SearchParams::from_url(input).with_context(|| format!("Invalid URL {input}"))?
    } else if input.contains('?') {
        SearchParams::parse(search_of(input))
    } else {
        SearchParams::parse(input)
    };
    debug!(?params, "Decoding location");

    Ok(try_decode_location(&params, catalog)?)
}
