//! Fetch command implementation.

use crate::cli::FetchArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use curio_extractor::Extractor;

/// Execute the fetch command.
pub async fn execute_fetch(args: FetchArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let file_name = match args.name {
        Some(name) => name,
        None => file_name_from_url(&args.url).ok_or_else(|| {
            CliError::InvalidInput(format!(
                "Cannot tell the file name from '{}'; pass --name",
                args.url
            ))
        })?,
    };

    let extractor = Extractor::new(config.extractor_config(args.flags.strict, args.flags.pages))?;
    let result = extractor.extract_from_url(&args.url, &file_name).await?;

    println!("{}", formatter.format_extraction(&result)?);
    Ok(())
}

/// Last path segment of a URL, without query or fragment.
fn file_name_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let path = path.split_once("://").map_or(path, |(_, rest)| {
        rest.split_once('/').map_or("", |(_, p)| p)
    });
    path.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
