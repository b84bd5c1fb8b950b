//! # ALULA CLI Application
//!
//! Command-line front end for the ALULA engine. Loads a design file (or a
//! default design for one archetype), runs the full analysis and prints the
//! performance report, FAR 103 findings and V-g envelope summary.
//!
//! ```text
//! alula my_cub.json
//! alula --vehicle glider --json
//! alula --vehicle "lighter than air" --save blimp.json
//! alula --rules
//! ```
//!
//! Log lines go to stderr so `--json` output can be piped.

#[macro_use]
mod logger;

use std::path::PathBuf;
use std::process;

use clap::Parser;

use alula_core::calculations::DesignAnalysis;
use alula_core::compliance::{CheckStatus, Severity};
use alula_core::config::VehicleType;
use alula_core::design::Design;
use alula_core::errors::{AlulaError, AlulaResult};
use alula_core::file_io::{load_design_into, save_design};
use alula_core::regulations::Regulations;

#[derive(Parser, Debug)]
#[command(author, version, about = "Ultralight performance and FAR 103 compliance calculator")]
struct Cli {
    /// Design file to load (JSON)
    design: Option<PathBuf>,

    /// Archetype to start from, e.g. "fixed wing", "gyrocopter" (default: Fixed Wing)
    #[arg(long)]
    vehicle: Option<String>,

    /// Print the full analysis as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Write the resolved design to this path
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print the FAR 103 rule summary and exit
    #[arg(long, default_value_t = false)]
    rules: bool,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logger::set_verbose(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("{}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!("{}", json);
        }
        process::exit(1);
    }
}

fn run(cli: &Cli) -> AlulaResult<()> {
    let regs = Regulations::default();

    if cli.rules {
        print_rules(&regs);
        return Ok(());
    }

    let vehicle_type = match &cli.vehicle {
        Some(name) => VehicleType::from_str_flexible(name)?,
        None => VehicleType::default(),
    };
    let mut design = Design::new(vehicle_type);
    debug!("starting from {} defaults", vehicle_type);

    if let Some(path) = &cli.design {
        load_design_into(&mut design, path)?;
        info!("loaded {}", path.display());
    }
    debug!(
        "{} with {} component rows ({} usable)",
        design.vehicle_type(),
        design.components.len(),
        design.weight_balance().valid_rows
    );

    let analysis = design.analyze(&regs);

    if cli.json {
        let json = serde_json::to_string_pretty(&analysis)
            .map_err(|e| AlulaError::serialization(e.to_string()))?;
        println!("{}", json);
    } else {
        print_analysis(&design, &analysis);
    }

    if !analysis.compliance.is_compliant() {
        warn!("design exceeds {} FAR 103 limit(s)", analysis.compliance.violations().count());
    }

    if let Some(path) = &cli.save {
        save_design(&design, path)?;
        info!("saved {}", path.display());
    }

    Ok(())
}

fn print_rules(regs: &Regulations) {
    println!("FAR Part 103 Ultralight Rules");
    println!("=============================");
    for (rule, limit) in regs.summary() {
        println!("  {:<30} {}", rule, limit);
    }
}

fn print_analysis(design: &Design, analysis: &DesignAnalysis) {
    let report = &analysis.report;

    println!("═══════════════════════════════════════");
    println!("  {} PERFORMANCE", design.vehicle_type().display_name().to_uppercase());
    println!("═══════════════════════════════════════");
    for metric in report.metrics.keys() {
        println!("  {:<22} {}", metric.label(), report.formatted(*metric));
    }

    println!();
    println!("FAR 103 Compliance:");
    for check in &analysis.compliance.checks {
        println!("  {} {}", status_icon(check.status), check.describe());
    }

    if !analysis.compliance.advisories.is_empty() {
        println!();
        println!("Design Notes:");
        for advisory in &analysis.compliance.advisories {
            println!("  {:?} {}: {}", advisory.kind, severity_tag(advisory.severity), advisory.message);
        }
    }

    println!();
    match &analysis.envelope {
        Some(env) => {
            println!("V-g Envelope:");
            println!("  Vs   {:.1} knots", env.stall_speed_kn);
            if let Some(vsf) = env.stall_speed_flaps_kn {
                println!("  Vsf  {:.1} knots", vsf);
            }
            println!("  Va   {:.1} knots", env.maneuvering_speed_kn);
            println!("  Vne  {:.1} knots", env.never_exceed_speed_kn);
            println!("  VH   {:.1} knots", env.max_level_speed_kn);
            println!("  Load limits {:+.1} g / {:+.1} g", env.limits.positive_g, env.limits.negative_g);
        }
        None => println!("V-g Envelope: not applicable"),
    }

    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  RESULT: {}",
        if analysis.compliance.is_compliant() { "PART 103 COMPLIANT" } else { "NOT COMPLIANT" }
    );
    println!("═══════════════════════════════════════");
}

fn status_icon(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::WithinLimit => "[OK]",
        CheckStatus::ExceedsLimit => "[FAIL]",
        CheckStatus::NotApplicable => "[N/A]",
    }
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "(info)",
        Severity::Good => "(good)",
        Severity::Poor => "(poor)",
    }
}
