mod commands;
mod console;
mod logging;

use std::process;

use clap::{CommandFactory, Parser};
use colored::*;
use commands::Cli;
use console::ConsoleInteraction;
use dotenv::dotenv;
use sweeper_core::{planner, AuditSink, JsonlAudit, RunState, Runner, SystemTrash};
use tracing::{error, info};

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let mut config = match sweeper_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    if args.print_config {
        println!("Configuration: {:?}", config);
        return;
    }

    let Some(prompt) = args.prompt else {
        let _ = Cli::command().print_long_help();
        return;
    };

    if let Some(scopes) = args.scopes {
        config.scopes = scopes;
    }
    let scopes = config.scope_paths();

    let run_id = sweeper_core::new_run_id();
    let audit = JsonlAudit::new(config.audit_path());
    audit.record(
        &run_id,
        "info",
        "input.prompt",
        serde_json::json!({"prompt": prompt, "execute": args.execute}),
    );

    let plan = planner::compile(&prompt);

    let mut interaction = ConsoleInteraction::new(args.preview);
    let sink = SystemTrash;
    let mut runner = Runner::new(
        &config,
        scopes,
        &mut interaction,
        &sink,
        &audit,
        run_id.clone(),
        !args.execute,
    );
    let report = runner.run(&plan);

    info!(
        "Run {} finished: {:?} ({} selected, {} trashed, {} failed)",
        run_id,
        report.state,
        report.selected,
        report.trashed,
        report.failures.len()
    );
    if report.state == RunState::Aborted {
        println!("{}", "Run aborted; nothing was deleted.".yellow());
    }
}
