//! Command handlers
//!
//! Each handler runs one subcommand and returns the process exit code.

use std::path::PathBuf;

use tracing::{debug, error, info};

use super::commands::{
    AddArgs, EditArgs, ExportArgs, FormatArgs, ImportArgs, ListArgs, RemoveArgs, TagsArgs,
    VisitArgs,
};
use super::output::{Listing, OutputFormat, OutputFormatter};
use crate::config::ToolboxConfig;
use crate::interact::{AssumeYes, Confirmer, NoOpOpener, StdinConfirmer, UrlOpener};
use crate::service::{ImportOutcome, ServiceError, ToolboxService};
use crate::tool::{add_tag, remove_tag, ToolDraft};
use crate::views;

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;

/// Loads and validates configuration, applying the `--data-dir` override
pub fn load_config(data_dir: Option<PathBuf>) -> Result<ToolboxConfig, i32> {
    let mut config = ToolboxConfig::default();
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return Err(EXIT_CONFIG);
    }
    debug!(data_dir = %config.data_dir.display(), key = %config.storage_key, "Configuration loaded");
    Ok(config)
}

fn open_service(
    config: &ToolboxConfig,
    confirmer: Box<dyn Confirmer>,
    opener: Box<dyn UrlOpener>,
) -> ToolboxService {
    ToolboxService::open(
        Box::new(config.create_store()),
        config.storage_key.clone(),
        confirmer,
        opener,
    )
}

fn unattended_service(config: &ToolboxConfig) -> ToolboxService {
    open_service(config, Box::new(AssumeYes), Box::new(NoOpOpener))
}

fn confirmer_for(yes: bool) -> Box<dyn Confirmer> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirmer)
    }
}

fn emit(rendered: anyhow::Result<String>) -> i32 {
    match rendered {
        Ok(text) => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
            EXIT_OK
        }
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            eprintln!("Error: {:#}", e);
            EXIT_FAILURE
        }
    }
}

fn report(err: &ServiceError) -> i32 {
    error!(error = %err, "Operation failed");
    eprintln!("{}", err.help_message());
    EXIT_FAILURE
}

fn formatter(args: &FormatArgs) -> OutputFormatter {
    OutputFormatter::new(OutputFormat::from(args.format))
}

pub fn handle_list(args: &ListArgs, config: &ToolboxConfig) -> i32 {
    let service = unattended_service(config);
    let listing = Listing::build(service.tools(), args.search.as_deref());
    emit(formatter(&args.output).format_listing(&listing))
}

pub fn handle_top(args: &FormatArgs, config: &ToolboxConfig) -> i32 {
    let service = unattended_service(config);
    let top: Vec<_> = service.top_tools().into_iter().cloned().collect();
    emit(formatter(args).format_tools("Most visited", &top))
}

pub fn handle_tags(args: &TagsArgs, config: &ToolboxConfig) -> i32 {
    let service = unattended_service(config);
    let all = service.all_tags();
    let tags = if args.filter.is_some() || !args.exclude.is_empty() {
        views::suggest_tags(&all, &args.exclude, args.filter.as_deref().unwrap_or(""))
    } else {
        all
    };
    emit(formatter(&args.output).format_tags(&tags))
}

pub fn handle_add(args: &AddArgs, config: &ToolboxConfig) -> i32 {
    let mut service = unattended_service(config);
    let draft = ToolDraft::new(args.title.trim(), args.url.trim())
        .with_tags(&args.tags)
        .with_note(args.note.clone());
    let tool = service.create(draft).clone();
    emit(formatter(&args.output).format_tool(&tool))
}

/// Applies the edit flags on top of the tool's current fields
pub fn edit_draft(current: ToolDraft, args: &EditArgs) -> ToolDraft {
    let mut draft = current;
    if let Some(title) = &args.title {
        draft.title = title.trim().to_string();
    }
    if let Some(url) = &args.url {
        draft.url = url.trim().to_string();
    }
    if let Some(note) = &args.note {
        draft.note = note.clone();
    }
    if args.clear_tags {
        draft.tags.clear();
    }
    for tag in &args.remove_tags {
        remove_tag(&mut draft.tags, tag);
    }
    for tag in &args.add_tags {
        add_tag(&mut draft.tags, tag);
    }
    draft
}

pub fn handle_edit(args: &EditArgs, config: &ToolboxConfig) -> i32 {
    let mut service = unattended_service(config);
    let current = match service.get(&args.id) {
        Some(tool) => tool.to_draft(),
        None => return report(&ServiceError::NotFound(args.id.clone())),
    };
    let draft = edit_draft(current, args);
    match service.update(&args.id, &draft) {
        Ok(tool) => {
            let tool = tool.clone();
            emit(formatter(&args.output).format_tool(&tool))
        }
        Err(e) => report(&e),
    }
}

pub fn handle_remove(args: &RemoveArgs, config: &ToolboxConfig) -> i32 {
    let mut service = open_service(config, confirmer_for(args.yes), Box::new(NoOpOpener));
    match service.delete(&args.id) {
        Ok(true) => {
            println!("Deleted {}", args.id);
            EXIT_OK
        }
        Ok(false) => {
            println!("Cancelled");
            EXIT_OK
        }
        Err(e) => report(&e),
    }
}

pub fn handle_visit(args: &VisitArgs, config: &ToolboxConfig) -> i32 {
    let opener: Box<dyn UrlOpener> = if args.no_open {
        Box::new(NoOpOpener)
    } else {
        config.create_opener()
    };
    let mut service = open_service(config, Box::new(AssumeYes), opener);
    match service.visit(&args.id) {
        Ok(tool) => {
            println!("{} \u{00B7} {} visits \u{2192} {}", tool.title, tool.visits, tool.url);
            EXIT_OK
        }
        Err(e) => report(&e),
    }
}

pub fn handle_export(args: &ExportArgs, config: &ToolboxConfig) -> i32 {
    let service = unattended_service(config);
    let dir = args.output_dir.clone().unwrap_or_else(|| config.export_dir.clone());
    match service.export(&dir) {
        Ok(path) => {
            println!("Exported {} tools to {}", service.tools().len(), path.display());
            EXIT_OK
        }
        Err(e) => report(&e),
    }
}

pub async fn handle_import(args: &ImportArgs, config: &ToolboxConfig) -> i32 {
    let mut service = open_service(config, confirmer_for(args.yes), Box::new(NoOpOpener));
    match service.import(&args.file).await {
        Ok(ImportOutcome::Replaced(count)) => {
            info!(count, file = %args.file.display(), "Import complete");
            println!("Imported {} tools", count);
            EXIT_OK
        }
        Ok(ImportOutcome::Declined) => {
            println!("Cancelled");
            EXIT_OK
        }
        Err(e) => report(&e),
    }
}

pub fn handle_config(args: &FormatArgs, config: &ToolboxConfig) -> i32 {
    emit(formatter(args).format_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::OutputFormatArg;

    fn edit_args(id: &str) -> EditArgs {
        EditArgs {
            id: id.to_string(),
            title: None,
            url: None,
            add_tags: vec![],
            remove_tags: vec![],
            clear_tags: false,
            note: None,
            output: FormatArgs {
                format: OutputFormatArg::Human,
            },
        }
    }

    fn current() -> ToolDraft {
        ToolDraft::new("GitHub", "https://github.com")
            .with_tags(["dev", "code"])
            .with_note("hosting")
    }

    #[test]
    fn test_edit_draft_without_flags_keeps_fields() {
        assert_eq!(edit_draft(current(), &edit_args("x")), current());
    }

    #[test]
    fn test_edit_draft_applies_changes() {
        let mut args = edit_args("x");
        args.title = Some("  GitHub Enterprise ".into());
        args.note = Some(String::new());
        args.remove_tags = vec!["code".into()];
        args.add_tags = vec!["git".into(), "dev".into()];

        let draft = edit_draft(current(), &args);
        assert_eq!(draft.title, "GitHub Enterprise");
        assert_eq!(draft.url, "https://github.com");
        assert_eq!(draft.note, "");
        assert_eq!(draft.tags, vec!["dev", "git"]);
    }

    #[test]
    fn test_edit_draft_clear_tags() {
        let mut args = edit_args("x");
        args.clear_tags = true;
        args.add_tags = vec!["fresh".into()];
        assert_eq!(edit_draft(current(), &args).tags, vec!["fresh"]);
    }
}
