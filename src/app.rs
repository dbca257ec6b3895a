//! Application orchestrator.
//! Loads/merges config, initializes logging, validates the scratch directory,
//! allocates the requested pairs and tears them down (or keeps/holds them).

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, error, info};

use scratch_pair::output as out;
use scratch_pair::{
    default_config_path, load_config, shutdown, NameAllocator, RemovalOutcome, ScratchError,
    ScratchFile,
};

use crate::cli::Args;
use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        match default_config_path() {
            Some(p) => {
                out::print_info(&format!("scratch_pair config path:\n  {}\n", p.display()));
                if !p.exists() {
                    out::print_info("No config file exists there yet; built-in defaults apply.");
                }
            }
            None => out::print_error("Could not determine a config path; set SCRATCH_PAIR_CONFIG."),
        }
        return Ok(());
    }

    let mut cfg = load_config()?;
    args.apply_overrides(&mut cfg);

    // Held until return so the non-blocking file writer flushes.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).inspect_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
    })?;

    debug!("Starting scratch_pair: {:?}", args);
    cfg.validate()?;

    let opts = cfg.allocator_options();
    let mut alloc = NameAllocator::new(&opts);
    let mut slots = Vec::with_capacity(args.count);
    for _ in 0..args.count {
        let slot = ScratchFile::with_allocator(&mut alloc).map_err(|e| {
            error!(code = e.code(), error = %e, "Allocation failed");
            e
        })?;
        out::print_user(&format!(
            "{}\t{}",
            slot.permanent_path().display(),
            slot.temporary_path().display()
        ));
        slots.push(slot);
    }

    if args.keep {
        for slot in slots {
            let pair = slot.keep();
            info!(permanent = %pair.permanent_path().display(), "Keeping scratch pair");
        }
        return Ok(());
    }

    if args.hold {
        ctrlc::set_handler(shutdown::request).context("install Ctrl-C handler")?;
        out::print_info("Holding scratch pairs; press Ctrl-C to clean up.");
        shutdown::wait(Duration::from_millis(100));
    }

    let mut failed = 0usize;
    for slot in slots {
        let permanent = slot.permanent_path().to_path_buf();
        let report = slot.release();
        if args.hold {
            out::print_info(&format!(
                "{}: temporary {}, permanent {}",
                permanent.display(),
                describe(&report.temporary),
                describe(&report.permanent)
            ));
        }
        failed += report.failures().count();
    }
    if failed > 0 {
        anyhow::bail!("{failed} scratch path(s) could not be removed");
    }
    Ok(())
}

fn describe(r: &Result<RemovalOutcome, ScratchError>) -> String {
    match r {
        Ok(RemovalOutcome::Removed) => "removed".to_string(),
        Ok(RemovalOutcome::Absent) => "absent".to_string(),
        Err(e) => format!("failed ({e})"),
    }
}
