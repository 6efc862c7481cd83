use crate::cli::ScanArgs;
use crate::config::Config;
use crate::discovery::discover_files_for_tool;
use crate::engine::CancellationToken;
use crate::output::write_summary;
use crate::runner::{Orchestrator, RunOptions};
use chrono::Local;
use tracing::{error, info, warn};

pub async fn execute(args: ScanArgs) -> anyhow::Result<()> {
    info!("Loading config from {:?}", args.config);
    let mut config = Config::load(&args.config)?;

    // Apply CLI overrides
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(report_dir) = args.report_dir {
        config.report_dir = report_dir;
    }
    if args.dry_run {
        config.dry_run = true;
    }

    let options = RunOptions {
        tool_filter: args.tools,
        scope_filter: args.scopes,
    };

    config.validate()?;

    if config.dry_run {
        info!("DRY RUN - no files will be parsed");
        print_execution_plan(&config, &options);
        return Ok(());
    }

    // Dated report directory (reports/YYYY-MM-DD/)
    let date_str = Local::now().format("%Y-%m-%d").to_string();
    let report_dir = config.report_dir.join(&date_str);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing with partial results");
            ctrl_c.cancel();
        }
    });

    info!("Reports will be written to {:?}", report_dir);
    let target = config.target.clone();
    let orchestrator = Orchestrator::new(config, cancel);
    let report = orchestrator.run(&options, &report_dir).await?;

    write_summary(&report_dir, &report, &target)?;

    let totals = report.totals();
    info!(
        "Completed in {:.1}s: {} error, {} high, {} normal, {} low issues across {} tools",
        report.total_duration.as_secs_f64(),
        totals.error,
        totals.high,
        totals.normal,
        totals.low,
        report.tool_results.len()
    );
    if report.was_canceled() {
        warn!("Scan was canceled; reports contain partial results");
    }

    if args.fail_on_errors && totals.error > 0 {
        error!("Exiting with error: {} ERROR severity issues", totals.error);
        std::process::exit(1);
    }

    Ok(())
}

fn print_execution_plan(config: &Config, options: &RunOptions) {
    println!("\n=== Execution Plan ===\n");
    println!("Target: {:?}", config.target);
    println!("Concurrency: {}", config.concurrency);
    println!("Report dir: {:?}", config.report_dir);
    println!("Encoding: {}", config.encoding);

    println!("\nTools to run:");
    for tool in config.enabled_tools() {
        if let Some(ref filter) = options.tool_filter {
            if !filter.contains(&tool.id) {
                continue;
            }
        }
        if let Some(ref filter) = options.scope_filter {
            if !tool.scopes.iter().any(|s| filter.contains(s)) {
                continue;
            }
        }

        let files = match discover_files_for_tool(config, tool) {
            Ok(files) => format!("{} files", files.len()),
            Err(e) => format!("discovery failed: {}", e),
        };

        println!(
            "  - {} ({}) -> scopes: {:?} [{}]",
            tool.id, tool.parser, tool.scopes, files
        );
    }
    println!();
}
