//! Find command handler.
//!
//! Implements the `find` subcommand: report where a page sits in the table.

use crate::config::{FindConfig, Validatable};
use crate::pipeline::{
    BreadcrumbReport, OutputFormat, OutputTarget, exit_codes, load_table_with_context,
};
use anyhow::{Result, bail};

/// Run the find command
///
/// Returns [`exit_codes::NOT_FOUND`] when neither the page nor its
/// fallback is in the table.
#[allow(clippy::needless_pass_by_value)]
pub fn run_find(config: FindConfig) -> Result<i32> {
    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("invalid configuration: {}", messages.join("; "));
    }

    let loaded = load_table_with_context(
        &config.table_path,
        config.resolve_dir.as_deref(),
        config.quiet,
    )?;

    let fallback = (!config.no_fallback).then_some(config.tree.index_page.as_str());
    let Some(report) = BreadcrumbReport::resolve(&loaded.table, &config.page, fallback) else {
        if !config.quiet {
            tracing::warn!("{} is not in {}", config.page, loaded.path.display());
        }
        return Ok(exit_codes::NOT_FOUND);
    };

    let output_target = OutputTarget::from(config.output.file.clone());
    let rendered = match config.output.format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            json
        }
        OutputFormat::Auto | OutputFormat::Tui | OutputFormat::Text => report.to_text(),
    };
    output_target.write(&rendered, config.quiet)?;

    if report.fallback {
        tracing::debug!("{} matched through the fallback page", config.page);
    }
    Ok(exit_codes::SUCCESS)
}
