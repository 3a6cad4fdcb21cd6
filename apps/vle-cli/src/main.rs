use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vle_app::{
    AlphaSummary, AnalysisConfig, AnalysisReport, AnalysisSession, AppResult, IsobaricReport,
    IsothermalReport, ModelOutcome, load_config, load_dataset, query,
};
use vle_models::{ModelKind, OrderedPair};
use vle_props::ReferenceData;

#[derive(Parser)]
#[command(name = "vle-cli")]
#[command(about = "VLE correlation-model fitting for binary mixtures", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known compounds, optionally filtered by a name fragment
    Compounds {
        /// Case-insensitive name or alias fragment
        query: Option<String>,
    },
    /// Saturation pressure from the Antoine tables
    Psat {
        compound: String,
        /// Temperature in K
        temperature_k: f64,
    },
    /// Liquid molar volume from the density tables
    Volume {
        compound: String,
        /// Temperature in K
        temperature_k: f64,
    },
    /// Fit correlation models to a binary VLE dataset
    Analyze {
        /// Path to the dataset YAML file
        dataset_path: PathBuf,
        /// Analysis settings YAML file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Fit only these models (repeatable)
        #[arg(short, long = "model")]
        models: Vec<ModelKind>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
        /// Skip the fit cache
        #[arg(long)]
        no_cache: bool,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compounds { query } => cmd_compounds(query.as_deref().unwrap_or("")),
        Commands::Psat {
            compound,
            temperature_k,
        } => cmd_property(&compound, temperature_k, Property::Psat),
        Commands::Volume {
            compound,
            temperature_k,
        } => cmd_property(&compound, temperature_k, Property::Volume),
        Commands::Analyze {
            dataset_path,
            config,
            models,
            json,
            no_cache,
        } => cmd_analyze(&dataset_path, config.as_deref(), &models, json, !no_cache),
    }
}

enum Property {
    Psat,
    Volume,
}

fn cmd_compounds(filter: &str) -> AppResult<()> {
    let reference = ReferenceData::shared()?;
    let compounds = query::list_compounds(reference, filter);

    if compounds.is_empty() {
        println!("No compounds match '{}'", filter);
        return Ok(());
    }
    for c in compounds {
        let mut line = format!("  {:<26}", c.id);
        if c.display_name != c.id {
            line.push_str(&format!("{}  ", c.display_name));
        }
        if !c.aliases.is_empty() {
            line.push_str(&format!("({})", c.aliases.join(", ")));
        }
        if c.has_uniquac {
            line.push_str("  [uniquac]");
        }
        println!("{}", line);
    }
    Ok(())
}

fn cmd_property(compound: &str, temperature_k: f64, property: Property) -> AppResult<()> {
    let reference = ReferenceData::shared()?;
    let value = match property {
        Property::Psat => query::saturation_pressure(reference, compound, temperature_k)?,
        Property::Volume => query::liquid_molar_volume(reference, compound, temperature_k)?,
    };
    println!(
        "{} at {:.2} K: {:.6e} {}",
        value.compound, value.temperature_k, value.value, value.unit
    );
    Ok(())
}

fn cmd_analyze(
    dataset_path: &Path,
    config_path: Option<&Path>,
    models: &[ModelKind],
    json: bool,
    use_cache: bool,
) -> AppResult<()> {
    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None => AnalysisConfig::default(),
    };
    config.use_cache = use_cache;

    let dataset = load_dataset(dataset_path)?;
    info!(dataset = %dataset.name, path = %dataset_path.display(), "loaded dataset");

    let mut session = AnalysisSession::new(config)?;
    let report = if models.is_empty() {
        session.analyze(&dataset)?
    } else {
        session.analyze_with_models(&dataset, models)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match &report {
        AnalysisReport::Isothermal(r) => print_isothermal(r),
        AnalysisReport::Isobaric(r) => print_isobaric(r),
    }
    Ok(())
}

fn print_header(name: &str, pair: &OrderedPair, removed: usize, points: usize) {
    println!("{}", name);
    println!(
        "  Components: {} (1) / {} (2){}",
        pair.pair.first,
        pair.pair.second,
        if pair.swapped { "  [reordered]" } else { "" }
    );
    println!("  Points: {} ({} pure-component removed)", points, removed);
}

fn print_alpha(alpha: &AlphaSummary) {
    match alpha {
        Ok(estimate) => match estimate.usable() {
            Some(a) => println!("  alpha_GM: {:.4}  (R2 = {:.4})", a, estimate.r_squared()),
            None => println!(
                "  alpha_GM: withheld, constant-alpha fit R2 = {:.4}",
                estimate.r_squared()
            ),
        },
        Err(failure) => println!("  alpha_GM: unavailable ({})", failure.message),
    }
}

fn print_outcome(outcome: &ModelOutcome) {
    match &outcome.outcome {
        Ok(report) => {
            let params: Vec<String> = report
                .fit
                .parameters
                .names
                .iter()
                .zip(&report.fit.parameters.values)
                .map(|(n, v)| format!("{}={:.4}", n, v))
                .collect();
            println!(
                "    {:<16} R2={:.5}  {}",
                outcome.model.name(),
                report.fit.r_squared,
                params.join("  ")
            );
        }
        Err(failure) => println!(
            "    {:<16} failed [{:?}]: {}",
            outcome.model.name(),
            failure.kind,
            failure.message
        ),
    }
}

fn print_isothermal(r: &IsothermalReport) {
    print_header(&r.name, &r.pair, r.removed_points, r.experimental.x1.len());
    println!(
        "  T = {:.2} K   P1sat = {:.3} kPa   P2sat = {:.3} kPa",
        r.temperature_k, r.pair.psat_kpa[0], r.pair.psat_kpa[1]
    );
    print_alpha(&r.alpha);
    println!("\n  Model fits:");
    for outcome in &r.models {
        print_outcome(outcome);
    }
}

fn print_isobaric(r: &IsobaricReport) {
    print_header(&r.name, &r.pair, r.removed_points, r.experimental.x1.len());
    println!("  P = {:.3} kPa", r.pressure_kpa);
    print_alpha(&r.alpha);
    println!("\n  Model fit:");
    print_outcome(&r.uniquac);

    let Some(txy) = r.uniquac.report().and_then(|m| m.txy.as_ref()) else {
        return;
    };
    println!(
        "\n  Predicted T-x-y ({} solved, {} failed):",
        txy.num_successful, txy.num_failed
    );
    println!("    {:>8}  {:>10}  {:>8}", "x1", "T (K)", "y1");
    for (x, state) in txy.x1.iter().zip(&txy.states) {
        match state {
            Some(p) => println!("    {:>8.4}  {:>10.3}  {:>8.4}", x, p.temperature_k, p.y1),
            None => println!("    {:>8.4}  {:>10}  {:>8}", x, "-", "-"),
        }
    }
}
