use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vc_app::{
    AppError, AppResult, BenchPoint, Demo, RunOptions, bench_project, default_provider,
    describe_project, load_project, run_project, summarize, validate_project,
};
use vc_fluids::{Fluid, Property, PropertyProvider};
use vc_project::Project;

#[derive(Parser)]
#[command(name = "vc-cli")]
#[command(about = "Steady-state vapour-compression cycle solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    Validate {
        /// Path to the configuration (YAML or JSON)
        config: PathBuf,
    },
    /// List the components and junctions of a configuration
    Describe {
        /// Path to the configuration (YAML or JSON)
        config: Option<PathBuf>,
        /// Bundled configuration instead of a file (freezer, compressor)
        #[arg(long)]
        demo: Option<String>,
    },
    /// Solve a cycle and print the report
    Run {
        /// Path to the configuration (YAML or JSON)
        config: Option<PathBuf>,
        /// Bundled configuration instead of a file (freezer, compressor)
        #[arg(long)]
        demo: Option<String>,
        /// Print the JSON summary instead of the text report
        #[arg(long)]
        json: bool,
        /// Write the JSON summary to this file as well
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Solve again from the converged states
        #[arg(long)]
        warm_restart: bool,
    },
    /// Evaluate the compressor at one bench operating point
    Bench {
        /// Shaft speed [rpm]
        #[arg(long, default_value_t = 3000.0)]
        speed: f64,
        /// Suction pressure [Pa]
        #[arg(long, default_value_t = 2.764e5)]
        p_in: f64,
        /// Suction temperature [K]
        #[arg(long, default_value_t = 291.606)]
        t_in: f64,
        /// Discharge pressure [Pa]
        #[arg(long, default_value_t = 20.666e5)]
        p_out: f64,
    },
    /// Look up one property, e.g. `props R290 H P 1e5 T 300`
    Props {
        fluid: String,
        output: String,
        input1: String,
        value1: f64,
        input2: String,
        value2: f64,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config } => cmd_validate(&config),
        Commands::Describe { config, demo } => cmd_describe(config.as_deref(), demo.as_deref()),
        Commands::Run {
            config,
            demo,
            json,
            output,
            warm_restart,
        } => cmd_run(
            config.as_deref(),
            demo.as_deref(),
            json,
            output.as_deref(),
            warm_restart,
        ),
        Commands::Bench {
            speed,
            p_in,
            t_in,
            p_out,
        } => cmd_bench(BenchPoint {
            speed_rpm: speed,
            suction_pressure_pa: p_in,
            suction_temperature_k: t_in,
            discharge_pressure_pa: p_out,
        }),
        Commands::Props {
            fluid,
            output,
            input1,
            value1,
            input2,
            value2,
        } => cmd_props(&fluid, &output, (&input1, value1), (&input2, value2)),
    }
}

fn resolve_project(
    config: Option<&Path>,
    demo: Option<&str>,
) -> AppResult<Project> {
    match (config, demo) {
        (Some(path), None) => load_project(path),
        (None, Some(name)) => name.parse::<Demo>()?.load(),
        _ => Err(AppError::InvalidInput(
            "give either a configuration path or --demo".to_string(),
        )),
    }
}

fn cmd_validate(config: &Path) -> AppResult<()> {
    println!("Validating configuration: {}", config.display());
    let project = load_project(config)?;
    validate_project(&project)?;
    println!("✓ Configuration is valid");
    Ok(())
}

fn cmd_describe(config: Option<&Path>, demo: Option<&str>) -> AppResult<()> {
    let project = resolve_project(config, demo)?;
    let overview = describe_project(&project);
    println!("{} ({})", overview.name, overview.id);
    println!("Components:");
    for (id, kind) in &overview.components {
        println!("  {id:<10} {kind}");
    }
    println!("Junctions:");
    for (id, fluid, from, to) in &overview.junctions {
        println!("  {id:<12} {fluid:<6} {from} -> {to}");
    }
    Ok(())
}

fn cmd_run(
    config: Option<&Path>,
    demo: Option<&str>,
    json: bool,
    output: Option<&Path>,
    warm_restart: bool,
) -> AppResult<()> {
    let project = resolve_project(config, demo)?;
    info!(name = %project.name, system = %project.system.id, "loaded configuration");
    let options = RunOptions { warm_restart };
    let response = run_project(&project, default_provider(), &options)?;
    let summary = summarize(&project.name, &response);

    if json {
        println!("{}", summary.to_json()?);
    } else {
        print!("{summary}");
        println!(
            "\nTiming: compile {:.3}s, solve {:.3}s",
            response.compile_time_s, response.solve_time_s
        );
    }
    if let Some(path) = output {
        std::fs::write(path, summary.to_json()?)
            .map_err(|e| AppError::InvalidInput(format!("{}: {e}", path.display())))?;
        println!("Summary written to {}", path.display());
    }
    Ok(())
}

fn cmd_bench(point: BenchPoint) -> AppResult<()> {
    let project = bench_project(&point)?;
    let response = run_project(&project, default_provider(), &RunOptions::default())?;
    let perf = response
        .system
        .performance("cpr")
        .cloned()
        .unwrap_or_default();

    println!(
        "Compressor at {:.0} rpm, {:.4} bar / {:.2} K -> {:.4} bar",
        point.speed_rpm,
        point.suction_pressure_pa / 1e5,
        point.suction_temperature_k,
        point.discharge_pressure_pa / 1e5
    );
    let show = |label: &str, v: Option<f64>, unit: &str| match v {
        Some(v) => println!("  {label:<6} {v:>12.4} {unit}"),
        None => println!("  {label:<6} {:>12} {unit}", "-"),
    };
    show("Pel", perf.power, "W");
    show("mdot", perf.mdot.map(|m| m * 3600.0), "kg/h");
    show("T_out", perf.outlet_temperature, "K");
    show("PR", perf.pressure_ratio, "-");
    Ok(())
}

fn cmd_props(
    fluid: &str,
    output: &str,
    input1: (&str, f64),
    input2: (&str, f64),
) -> AppResult<()> {
    let fluid: Fluid = fluid
        .parse()
        .map_err(|e| AppError::InvalidInput(format!("fluid '{fluid}': {e}")))?;
    let property = |code: &str| -> AppResult<Property> {
        code.parse()
            .map_err(|e| AppError::InvalidInput(format!("property '{code}': {e}")))
    };
    let out = property(output)?;
    let (in1, in2) = (property(input1.0)?, property(input2.0)?);

    let props = default_provider();
    let value = PropertyProvider::lookup(props.as_ref(), fluid, out, in1, input1.1, in2, input2.1)?;
    println!("{fluid} {out} = {value} {}", out.unit());
    Ok(())
}
