mod error;

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use error::{CliError, CliResult};
use rd_config::RunConfig;
use rd_sim::RunSummary;
use rd_solver::StepProgress;

#[derive(Parser)]
#[command(name = "rd-cli")]
#[command(about = "Rotor run-up simulation on short hydrodynamic journal bearings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a run-up
    Run {
        /// Path to the run config (YAML or JSON)
        config_path: PathBuf,
        /// Output CSV file path (overrides the config)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the run summary as JSON (overrides the config)
        #[arg(long)]
        summary_json: Option<PathBuf>,
    },
    /// Evaluate the dimensionless short-bearing force law
    Force {
        /// Eccentricity ratio in [0, 1)
        eps: f64,
        /// Dimensionless radial speed
        #[arg(allow_negative_numbers = true)]
        eps_s: f64,
        /// Dimensionless whirl speed
        #[arg(allow_negative_numbers = true)]
        phi_s: f64,
        /// Width/diameter ratio
        #[arg(default_value_t = 0.5)]
        b2d: f64,
    },
    /// Print the nominal run config as YAML
    Defaults,
    /// Validate a run config
    Validate {
        /// Path to the run config (YAML or JSON)
        config_path: PathBuf,
    },
    /// Run independent run-ups over several final frequencies
    Sweep {
        /// Path to the run config (YAML or JSON)
        config_path: PathBuf,
        /// Final run-up frequencies in Hz, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        f_max: Vec<f64>,
        /// Write all summaries as a JSON array
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config_path,
            output,
            summary_json,
        } => cmd_run(&config_path, output, summary_json),
        Commands::Force {
            eps,
            eps_s,
            phi_s,
            b2d,
        } => cmd_force(eps, eps_s, phi_s, b2d),
        Commands::Defaults => cmd_defaults(),
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Sweep {
            config_path,
            f_max,
            output,
        } => cmd_sweep(&config_path, &f_max, output.as_deref()),
    }
}

fn cmd_run(
    config_path: &Path,
    output: Option<PathBuf>,
    summary_json: Option<PathBuf>,
) -> CliResult<()> {
    let config = rd_config::load(config_path)?;
    println!("Running run-up: {}", config.name);
    println!(
        "  f_max = {:.1} Hz, t_max = {:.3} s, samples = {}",
        config.run_up.f_max,
        config.run_up.t_max,
        config.run_up.sample_count()
    );

    let started = Instant::now();
    let mut last_emit = Instant::now();
    let mut last_fraction = -1.0f64;
    let record = rd_sim::run_up_with_progress(
        &config,
        Some(&mut |p: StepProgress| {
            let emit_now = (p.fraction_complete - last_fraction).abs() >= 0.005
                || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_progress(&p, started.elapsed().as_secs_f64());
                last_fraction = p.fraction_complete;
                last_emit = Instant::now();
            }
        }),
    );
    clear_progress_line();
    let record = record?;

    let summary = record.summary(&config.name);
    println!("✓ Run-up completed");
    print_summary(&summary);

    if let Some(path) = output.or(config.output.csv.clone()) {
        record.write_csv(&path)?;
        println!("✓ Exported {} samples to {}", record.len(), path.display());
    }
    if let Some(path) = summary_json.or(config.output.summary_json.clone()) {
        std::fs::write(&path, serde_json::to_string_pretty(&summary)?)?;
        println!("✓ Summary written to {}", path.display());
    }
    Ok(())
}

fn cmd_force(eps: f64, eps_s: f64, phi_s: f64, b2d: f64) -> CliResult<()> {
    let film = rd_bearing::evaluate(eps, eps_s, phi_s, b2d)?;
    let (radial, tangential) = film.polar();
    println!("case:       {:?}", film.case);
    println!("fr:         {:.9e}", film.fr);
    println!("fphi:       {:.9e}", film.fphi);
    println!("radial:     {:.9e}", radial);
    println!("tangential: {:.9e}", tangential);
    Ok(())
}

fn cmd_defaults() -> CliResult<()> {
    print!("{}", serde_yaml::to_string(&RunConfig::default())?);
    Ok(())
}

fn cmd_validate(config_path: &Path) -> CliResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = rd_config::load(config_path)?;
    rd_sim::build_rotor(&config)?;
    println!("✓ Config is valid");
    Ok(())
}

fn cmd_sweep(config_path: &Path, f_max: &[f64], output: Option<&Path>) -> CliResult<()> {
    let config = rd_config::load(config_path)?;
    println!(
        "Sweeping {} over {} final frequencies",
        config.name,
        f_max.len()
    );

    let outcomes = rd_sim::sweep_f_max(&config, f_max);
    let mut summaries = Vec::new();
    let mut failed = 0usize;
    for o in &outcomes {
        match &o.outcome {
            Ok(s) => {
                println!(
                    "  f_max={:>8.1} Hz  max_eps={:.4} at {:.1} Hz  steps={}",
                    o.value, s.max_eccentricity, s.max_eccentricity_frequency, s.accepted_steps
                );
                summaries.push(s);
            }
            Err(e) => {
                println!("  f_max={:>8.1} Hz  failed: {}", o.value, e);
                failed += 1;
            }
        }
    }

    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&summaries)?)?;
        println!("✓ Exported {} summaries to {}", summaries.len(), path.display());
    }

    if failed > 0 {
        return Err(CliError::SweepFailed {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_progress(p: &StepProgress, elapsed_s: f64) {
    let width = 28usize;
    let filled = ((p.fraction_complete * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    print!(
        "\r[{}] {:>6.2}%  t={:.4}/{:.4}s  h={:.2e}  steps={}  rejected={}  elapsed={:.1}s",
        bar,
        p.fraction_complete * 100.0,
        p.t,
        p.t_end,
        p.step_size,
        p.accepted_steps,
        p.rejected_steps,
        elapsed_s
    );
    let _ = io::stdout().flush();
}

fn print_summary(s: &RunSummary) {
    println!("  Samples: {}", s.samples);
    println!(
        "  Max eccentricity: {:.4} at {:.1} Hz",
        s.max_eccentricity, s.max_eccentricity_frequency
    );
    println!("  Final eccentricity: {:.4}", s.final_eccentricity);
    println!(
        "  Peak disc amplitude: {:.3e} m at {:.1} Hz",
        s.peak_disc_amplitude, s.peak_disc_frequency
    );
    println!(
        "  Steps: {} accepted, {} rejected ({} rhs, {} Jacobians)",
        s.accepted_steps, s.rejected_steps, s.rhs_evaluations, s.jacobian_evaluations
    );
    println!("  Wall time: {:.2} s", s.wall_time_s);
}
