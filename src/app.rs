//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! collects the Old List and drives one reconcile session.

use anyhow::Result;
use tracing::debug;

use crate::cli::Args;
use crate::config;
use crate::listing;
use crate::logging::init_tracing;
use crate::output;
use crate::prompt::Prompter;
use crate::reconcile::Session;
use crate::shutdown;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    // Build config (may read XML). CLI args override config values.
    let mut cfg = config::load_or_default();
    args.apply_overrides(&mut cfg);

    init_tracing(&cfg.log_level, args.json)?;

    ctrlc::set_handler(|| {
        shutdown::request();
        output::print_warn("interrupted; no further changes will be applied");
    })
    .expect("failed to install signal handler");

    debug!(?cfg, "starting edmv");

    let old = listing::collect_roots(&cfg, &args.roots());
    if old.is_empty() {
        output::print_warn("nothing to edit (no files collected)");
        return Ok(());
    }

    let session = Session::new(cfg, old)?;
    let mut prompter = Prompter::stdio();
    let summary = session.run(&mut prompter)?;
    output::print_user(&summary.line());
    Ok(())
}

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var("EDMV_CONFIG") {
        output::print_info(&format!("Using EDMV_CONFIG (explicit):\n  {cfg_env}"));
        output::print_info("To override, unset EDMV_CONFIG or set it to another file.");
        return;
    }
    match config::default_config_path() {
        Some(p) => {
            output::print_info(&format!("Default edmv config path:\n  {}", p.display()));
            if p.exists() {
                output::print_info("A config file already exists at that location.");
            } else {
                output::print_info(
                    "No config file exists there yet; a template will be created on the next run.",
                );
            }
        }
        None => {
            output::print_error("Could not determine a default config path.");
        }
    }
}
