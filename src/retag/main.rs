use clap::Parser;
use retag::api::{ConfigAction, RetagApi};
use retag::config::RetagConfig;
use retag::error::Result;
use retag::scope::ScopeSpec;
use retag::store::fs::VaultStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod args;
mod print;
use args::{Cli, Commands, TargetArgs};
use print::{print_batch, print_config, print_json, print_messages};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: RetagApi<VaultStore>,
    verbose: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Add { tags, target } => {
            let scope = target_scope(&target);
            let result = ctx.api.add_tags(&tags, &scope, target.dry_run())?;
            report(&ctx, &target, result)
        }
        Commands::Remove { tags, target } => {
            let scope = target_scope(&target);
            let result = ctx.api.remove_tags(&tags, &scope, target.dry_run())?;
            report(&ctx, &target, result)
        }
        Commands::Replace {
            find,
            replacement,
            all,
            target,
        } => {
            let scope = target_scope(&target);
            let result =
                ctx.api
                    .replace_tags(&find, &replacement, all, &scope, target.dry_run())?;
            report(&ctx, &target, result)
        }
        Commands::Config { key, value } => handle_config(&mut ctx, key, value),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let vault = match (&cli.vault, std::env::var("RETAG_VAULT")) {
        (Some(dir), _) => dir.clone(),
        (None, Ok(dir)) if !dir.is_empty() => PathBuf::from(dir),
        _ => std::env::current_dir()?,
    };
    let config = RetagConfig::load_for_vault(&vault)?;
    init_tracing(cli.verbose || config.debug_mode);
    tracing::debug!(vault = %vault.display(), "Using vault");

    let mut api = RetagApi::new(
        VaultStore::new(&vault),
        config,
        RetagConfig::vault_dir(&vault),
    );
    if let Some(global) = RetagConfig::global_dir() {
        api = api.with_global_config_dir(global);
    }
    Ok(AppContext {
        api,
        verbose: cli.verbose,
    })
}

fn init_tracing(debug: bool) {
    let default = if debug { "warn,retag=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn target_scope(target: &TargetArgs) -> ScopeSpec {
    ScopeSpec::from_inputs(target.folder.as_deref(), target.files.as_deref())
}

fn report(ctx: &AppContext, target: &TargetArgs, result: retag::api::CmdResult) -> Result<()> {
    let Some(batch) = &result.batch else {
        print_messages(&result.messages);
        return Ok(());
    };
    if target.json {
        return print_json(batch);
    }
    print_batch(batch, ctx.verbose);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
