use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Personal bookmark and tool organizer
#[derive(Parser, Debug)]
#[command(
    name = "toolbox",
    about = "Personal bookmark and tool organizer",
    version,
    author,
    long_about = "toolbox keeps your frequently used web tools in one place. Links carry \
                  tags and a note, visits are counted, the collection is grouped by tag, \
                  and everything can be exported to and restored from a JSON backup."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,

    #[arg(
        long,
        global = true,
        value_name = "DIR",
        help = "Directory holding the stored collection (overrides TOOLBOX_DATA_DIR)"
    )]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "List tools grouped by tag",
        long_about = "Shows the most visited tools followed by every tag group. With --search, \
                      shows a single group of tools whose title, note or tags contain the \
                      query (case-insensitive).\n\n\
                      Examples:\n  \
                      toolbox list\n  \
                      toolbox list --search design\n  \
                      toolbox list --format json"
    )]
    List(ListArgs),

    #[command(about = "Show the most visited tools")]
    Top(FormatArgs),

    #[command(
        about = "List all tags, or suggest tags for a partial input",
        long_about = "Without options, prints every distinct tag in alphabetical order.\n\n\
                      Examples:\n  \
                      toolbox tags\n  \
                      toolbox tags --filter dev --exclude Docs"
    )]
    Tags(TagsArgs),

    #[command(
        about = "Add a new tool",
        long_about = "Adds a tool at the front of the collection.\n\n\
                      Examples:\n  \
                      toolbox add --title GitHub --url https://github.com --tag dev --tag code\n  \
                      toolbox add --title Figma --url https://figma.com --note \"UI design\""
    )]
    Add(AddArgs),

    #[command(about = "Edit the title, URL, tags or note of a tool")]
    Edit(EditArgs),

    #[command(about = "Delete a tool (asks for confirmation)")]
    Remove(RemoveArgs),

    #[command(about = "Count a visit and open the tool's URL")]
    Visit(VisitArgs),

    #[command(about = "Write a dated JSON backup of all tools")]
    Export(ExportArgs),

    #[command(about = "Replace all tools with the contents of a JSON backup")]
    Import(ImportArgs),

    #[command(about = "Show the effective configuration")]
    Config(FormatArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct FormatArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    #[arg(short = 's', long, value_name = "QUERY", help = "Only show tools matching QUERY")]
    pub search: Option<String>,

    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct TagsArgs {
    #[arg(long, value_name = "TEXT", help = "Suggest tags containing TEXT")]
    pub filter: Option<String>,

    #[arg(long, value_name = "TAG", help = "Tags to leave out of suggestions")]
    pub exclude: Vec<String>,

    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct AddArgs {
    #[arg(long, help = "Tool title")]
    pub title: String,

    #[arg(long, help = "Tool URL")]
    pub url: String,

    #[arg(short = 't', long = "tag", value_name = "TAG", help = "Tag (repeatable)")]
    pub tags: Vec<String>,

    #[arg(short = 'n', long, default_value = "", help = "Short note")]
    pub note: String,

    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct EditArgs {
    #[arg(value_name = "ID", help = "Tool id")]
    pub id: String,

    #[arg(long, help = "New title")]
    pub title: Option<String>,

    #[arg(long, help = "New URL")]
    pub url: Option<String>,

    #[arg(short = 't', long = "tag", value_name = "TAG", help = "Add a tag (repeatable)")]
    pub add_tags: Vec<String>,

    #[arg(long = "remove-tag", value_name = "TAG", help = "Remove a tag (repeatable)")]
    pub remove_tags: Vec<String>,

    #[arg(long, help = "Remove all existing tags before adding new ones")]
    pub clear_tags: bool,

    #[arg(short = 'n', long, help = "New note")]
    pub note: Option<String>,

    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct RemoveArgs {
    #[arg(value_name = "ID", help = "Tool id")]
    pub id: String,

    #[arg(short = 'y', long, help = "Skip the confirmation prompt")]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct VisitArgs {
    #[arg(value_name = "ID", help = "Tool id")]
    pub id: String,

    #[arg(long, help = "Only count the visit, do not open the URL")]
    pub no_open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        help = "Directory to write the backup to (overrides TOOLBOX_EXPORT_DIR)"
    )]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportArgs {
    #[arg(value_name = "FILE", help = "Backup file to import")]
    pub file: PathBuf,

    #[arg(short = 'y', long, help = "Skip the confirmation prompt")]
    pub yes: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_list_defaults() {
        let args = CliArgs::parse_from(["toolbox", "list"]);
        match args.command {
            Commands::List(list) => {
                assert!(list.search.is_none());
                assert_eq!(list.output.format, OutputFormatArg::Human);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_list_with_search_and_format() {
        let args = CliArgs::parse_from(["toolbox", "list", "-s", "dev", "--format", "json"]);
        match args.command {
            Commands::List(list) => {
                assert_eq!(list.search.as_deref(), Some("dev"));
                assert_eq!(list.output.format, OutputFormatArg::Json);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_add_with_repeated_tags() {
        let args = CliArgs::parse_from([
            "toolbox",
            "add",
            "--title",
            "GitHub",
            "--url",
            "https://github.com",
            "-t",
            "dev",
            "--tag",
            "code",
        ]);
        match args.command {
            Commands::Add(add) => {
                assert_eq!(add.title, "GitHub");
                assert_eq!(add.tags, vec!["dev", "code"]);
                assert_eq!(add.note, "");
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_add_requires_title_and_url() {
        assert!(CliArgs::try_parse_from(["toolbox", "add", "--title", "x"]).is_err());
    }

    #[test]
    fn test_edit_options() {
        let args = CliArgs::parse_from([
            "toolbox",
            "edit",
            "init-1",
            "--clear-tags",
            "--tag",
            "ai",
            "--remove-tag",
            "Google",
            "--note",
            "",
        ]);
        match args.command {
            Commands::Edit(edit) => {
                assert_eq!(edit.id, "init-1");
                assert!(edit.clear_tags);
                assert_eq!(edit.add_tags, vec!["ai"]);
                assert_eq!(edit.remove_tags, vec!["Google"]);
                assert_eq!(edit.note.as_deref(), Some(""));
                assert!(edit.title.is_none());
            }
            _ => panic!("Expected Edit command"),
        }
    }

    #[test]
    fn test_remove_and_import_yes_flag() {
        let args = CliArgs::parse_from(["toolbox", "remove", "abc", "-y"]);
        assert!(matches!(args.command, Commands::Remove(RemoveArgs { yes: true, .. })));

        let args = CliArgs::parse_from(["toolbox", "import", "backup.json"]);
        match args.command {
            Commands::Import(import) => {
                assert_eq!(import.file, PathBuf::from("backup.json"));
                assert!(!import.yes);
            }
            _ => panic!("Expected Import command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["toolbox", "-v", "--data-dir", "/tmp/tb", "top"]);
        assert!(args.verbose);
        assert!(!args.quiet);
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/tb")));

        let args = CliArgs::parse_from(["toolbox", "top", "-q"]);
        assert!(args.quiet);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["toolbox", "-v", "-q", "top"]).is_err());
    }

    #[test]
    fn test_log_level_flag() {
        let args = CliArgs::parse_from(["toolbox", "--log-level", "debug", "config"]);
        assert_eq!(args.log_level, Some("debug".to_string()));
    }
}
