//! View command handler.
//!
//! Implements the `view` subcommand: build the tree for one page and either
//! browse it interactively or print what a reader would see.

use crate::config::{Validatable, ViewConfig};
use crate::pipeline::{
    OutputFormat, OutputTarget, color_enabled, exit_codes, load_table_with_context, render_tree,
};
use crate::tui::{ViewApp, run_view_tui};
use anyhow::{Result, bail};

/// Run the view command
#[allow(clippy::needless_pass_by_value)]
pub fn run_view(config: ViewConfig) -> Result<i32> {
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

    let output_target = OutputTarget::from(config.output.file.clone());
    let effective_output = config.output.format.resolve(&output_target);

    if effective_output == OutputFormat::Tui {
        let mut app = ViewApp::new(loaded.table, config.tree.clone(), &config.page, &config.tui)?;
        if app.breadcrumb_labels().is_empty() {
            app.set_status_message(format!("{} is not in the table", config.page));
        }
        run_view_tui(
            &mut app,
            &config.tui,
            config.tree.glyphs,
            color_enabled(config.output.no_color),
        )?;
    } else {
        let options = config.tree.options_for(config.page.as_str());
        let rendered = render_tree(&loaded.table, options, effective_output, config.tree.glyphs)?;
        output_target.write(&rendered, config.quiet)?;
    }

    Ok(exit_codes::SUCCESS)
}
