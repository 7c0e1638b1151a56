//! CLI entrypoint for envswitch
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use envswitch_application::{
    LocatorSettings, PreferenceStore, ServiceLocator, SwitchListener, WarningNotifier,
};
use envswitch_domain::{ConfigId, ConfigurationDescriptor, HostContext};
use envswitch_infrastructure::{
    ConfigLoader, EnvironmentDescriptor, FileConfig, JsonPreferenceStore, MemoryPreferenceStore,
    ProcessExitTerminator, Severity, TracingNotifier, register_file_domains,
};
use envswitch_presentation::{
    Cli, Command, ConsoleFormatter, ConsoleNotifier, ConsoleSwitchReporter, DomainView,
    OutputFormat,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.command == Command::Sources {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    if cli.staging_allowed {
        config.switcher.staging_allowed = true;
    }
    if cli.debug_build {
        config.switcher.debug_build = true;
    }
    report_config_issues(&config);

    // === Dependency Injection ===
    let switcher = &config.switcher;
    let mut host = HostContext::new(switcher.app_name.clone());
    if let Some(dir) = switcher.data_dir() {
        host = host.with_data_dir(dir);
    }

    let preferences: Arc<dyn PreferenceStore> = if cli.ephemeral {
        Arc::new(MemoryPreferenceStore::new())
    } else {
        let path = switcher.resolved_store_path();
        info!("Using preference file {}", path.display());
        Arc::new(JsonPreferenceStore::open(&path)?)
    };

    let notifier: Arc<dyn WarningNotifier> = if cli.quiet {
        Arc::new(TracingNotifier)
    } else {
        Arc::new(ConsoleNotifier)
    };

    let mut locator = ServiceLocator::initialize(
        host,
        LocatorSettings {
            staging_allowed: switcher.staging_allowed,
            debug_build: switcher.debug_build,
        },
        preferences,
        notifier,
        Arc::new(ProcessExitTerminator),
    );
    register_file_domains(&mut locator, &config.domains)
        .context("Invalid domain configuration")?;

    match cli.command {
        Command::List { format } => {
            let views: Vec<DomainView> = locator
                .controllers()
                .map(|c| DomainView::from_controller(c, descriptor_values))
                .collect();
            let output = match format {
                OutputFormat::Text => ConsoleFormatter::format_domains(&views),
                OutputFormat::Json => ConsoleFormatter::format_json(&views),
            };
            print!("{}", output);
            if format == OutputFormat::Json {
                println!();
            }
        }
        Command::Current { domain, format } => {
            // Surface unknown domains as errors rather than an empty view.
            locator.current(&domain)?;
            let controller = locator
                .controller(&domain)
                .ok_or_else(|| anyhow!("No controller registered for domain '{}'", domain))?;
            let view = DomainView::from_controller(controller, descriptor_values);
            match format {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_current(&view)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&view)),
            }
        }
        Command::Switch { domain, id } => {
            let reporter: Arc<dyn SwitchListener> = Arc::new(ConsoleSwitchReporter::new(&domain));
            locator
                .controller_mut(&domain)
                .ok_or_else(|| anyhow!("No controller registered for domain '{}'", domain))?
                .add_listener(reporter);

            // Does not return when the domain exits on change.
            let outcome = locator.switch(&domain, ConfigId::new(id))?;
            println!("{}", ConsoleFormatter::format_switch(&domain, &outcome));
        }
        Command::Sources => {}
    }

    Ok(())
}

/// Log `validate()` findings before any controller is built.
fn report_config_issues(config: &FileConfig) {
    for issue in config.validate() {
        match issue.severity {
            Severity::Error => error!("{}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
}

fn descriptor_values(descriptor: &dyn ConfigurationDescriptor) -> BTreeMap<String, String> {
    descriptor
        .downcast_ref::<EnvironmentDescriptor>()
        .map(|env| env.values().clone())
        .unwrap_or_default()
}
