use anyhow::Context;
use clap::Parser;
use trial_primes::core::MilestoneSink;
use trial_primes::utils::{logger, validation::Validate};
use trial_primes::{
    CliConfig, EnumerationEngine, EnumerationSettings, PrimeError, TomlConfig, WriterSink,
};

fn main() {
    let cli = CliConfig::parse();

    // The config file may set the log level, so it is read and validated
    // before logging starts.
    let file_config = match load_file_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let level = file_config.as_ref().and_then(TomlConfig::log_level);
    if cli.json_logs {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }

    tracing::info!("Starting trial-primes");
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match resolve_settings(&cli, file_config.as_ref()) {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };

    if cli.dry_run {
        display_run_plan(&settings);
        return;
    }

    if settings.monitor {
        tracing::info!("System monitoring enabled");
    }

    let sink: Box<dyn MilestoneSink> = match &settings.output_path {
        Some(path) => match WriterSink::create_file(path, settings.output_format) {
            Ok(sink) => Box::new(sink),
            Err(e) => fail(&e),
        },
        None => Box::new(WriterSink::stdout(settings.output_format)),
    };

    let mut engine = EnumerationEngine::new_with_monitoring(sink, settings.monitor);
    let summary = match engine.run(&settings) {
        Ok(summary) => summary,
        Err(e) => fail(&e),
    };

    if let Some(path) = &settings.output_path {
        tracing::info!("Milestones saved to: {}", path);
    }

    if cli.summary {
        if let Err(e) = print_summary(&summary) {
            tracing::error!("Could not print summary: {:#}", e);
            std::process::exit(3);
        }
    }
}

fn load_file_config(path: Option<&str>) -> trial_primes::Result<Option<TomlConfig>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let config = TomlConfig::from_file(path)?;
    config.validate()?;
    Ok(Some(config))
}

fn resolve_settings(
    cli: &CliConfig,
    file_config: Option<&TomlConfig>,
) -> trial_primes::Result<EnumerationSettings> {
    let settings = EnumerationSettings::resolve(&cli.overrides(), file_config)?;
    settings.validate()?;
    Ok(settings)
}

fn fail(e: &PrimeError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}

fn display_run_plan(settings: &EnumerationSettings) {
    tracing::info!("DRY RUN MODE - no enumeration will occur");
    eprintln!("Upper bound:        {}", settings.upper_bound);
    eprintln!("Milestone interval: {}", settings.milestone_interval);
    eprintln!(
        "Output:             {} ({})",
        settings.output_path.as_deref().unwrap_or("stdout"),
        settings.output_format
    );
    eprintln!("Monitoring:         {}", settings.monitor);
}

fn print_summary(summary: &trial_primes::EnumerationSummary) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(summary).context("serializing run summary")?;
    eprintln!("{}", json);
    Ok(())
}
