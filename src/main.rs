use ppx_toolbox::cli::commands::{CliArgs, Commands};
use ppx_toolbox::cli::handlers::{
    handle_add, handle_config, handle_edit, handle_export, handle_import, handle_list,
    handle_remove, handle_tags, handle_top, handle_visit, load_config,
};
use ppx_toolbox::util::logging::{init_logging, json_from_env, parse_level, LoggingConfig};
use ppx_toolbox::VERSION;

use clap::Parser;
use std::env;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("toolbox v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let config = match load_config(args.data_dir.clone()) {
        Ok(config) => config,
        Err(code) => std::process::exit(code),
    };

    let exit_code = match &args.command {
        Commands::List(list_args) => handle_list(list_args, &config),
        Commands::Top(format_args) => handle_top(format_args, &config),
        Commands::Tags(tags_args) => handle_tags(tags_args, &config),
        Commands::Add(add_args) => handle_add(add_args, &config),
        Commands::Edit(edit_args) => handle_edit(edit_args, &config),
        Commands::Remove(remove_args) => handle_remove(remove_args, &config),
        Commands::Visit(visit_args) => handle_visit(visit_args, &config),
        Commands::Export(export_args) => handle_export(export_args, &config),
        Commands::Import(import_args) => handle_import(import_args, &config).await,
        Commands::Config(format_args) => handle_config(format_args, &config),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str = env::var("TOOLBOX_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        parse_level(&level_str)
    };

    let config = LoggingConfig {
        level,
        use_json: json_from_env(),
        ..Default::default()
    };
    init_logging(config);
}
