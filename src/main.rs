use clap::Parser;
use serde_json::json;
use tiny_ops::utils::error::{OpsError, Result};
use tiny_ops::utils::{logger, validation::Validate};
use tiny_ops::{
    number_value, render_dry_run, render_result, CliConfig, Command, ScriptConfig, ScriptRunner,
};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        fail(&e);
    }

    if let Err(e) = execute(&config) {
        tracing::error!(
            "Operation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        fail(&e);
    }

    Ok(())
}

fn fail(e: &OpsError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn execute(config: &CliConfig) -> Result<()> {
    let result = match &config.command {
        Command::Greet { name } => {
            if config.json {
                // stdout 只輸出 JSON
                json!(tiny_ops::greet_to(&mut std::io::sink(), name)?)
            } else {
                tiny_ops::greet(name);
                return Ok(());
            }
        }
        Command::Add { a, b } => number_value(tiny_ops::add(*a, *b)),
        Command::CurrentDirectory => json!(tiny_ops::current_directory()?),
        Command::CauseError { data } => json!(tiny_ops::cause_error(data)?),
        Command::Divide { a, b } => number_value(tiny_ops::divide(*a, *b)?),
        Command::Run {
            config: path,
            dry_run,
            keep_going,
        } => return run_script(path, *dry_run, *keep_going, config.json),
    };

    println!(
        "{}",
        render_result(operation_name(&config.command), &result, config.json)?
    );
    Ok(())
}

fn run_script(path: &str, dry_run: bool, keep_going: bool, as_json: bool) -> Result<()> {
    tracing::info!("Loading script from: {}", path);

    let script = ScriptConfig::from_file(path).inspect_err(|e| {
        tracing::error!("Failed to load script file '{}': {}", path, e);
    })?;
    script.validate()?;

    let runner = ScriptRunner::new(script).keep_going(keep_going);

    if dry_run {
        tracing::info!("DRY RUN MODE - no steps will be executed");
        println!("{}", render_dry_run(runner.steps(), as_json)?);
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    let report = runner.run(&mut stdout)?;
    drop(stdout);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for outcome in &report.outcomes {
            match (&outcome.output, &outcome.error) {
                (Some(output), _) => println!(
                    "✅ [{}] {} => {}",
                    outcome.index,
                    outcome.op,
                    render_result(&outcome.op, output, false)?
                ),
                (None, Some(error)) => println!("❌ [{}] {} => {}", outcome.index, outcome.op, error),
                (None, None) => {}
            }
        }
        println!(
            "📊 {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
    }

    Ok(())
}

fn operation_name(command: &Command) -> &'static str {
    match command {
        Command::Greet { .. } => "greet",
        Command::Add { .. } => "add",
        Command::CurrentDirectory => "current_directory",
        Command::CauseError { .. } => "cause_error",
        Command::Divide { .. } => "divide",
        Command::Run { .. } => "run",
    }
}
