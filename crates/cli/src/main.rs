use clap::{Parser, Subcommand};
use qsofa_core::{
    classify,
    config::{history_policy_from_env_value, import_policy_from_env_value},
    score, CoreConfig, DashboardView, ImportPolicy, Importer, SampleScenario, Session, Vitals,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qsofa")]
#[command(about = "qSOFA sepsis risk dashboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in sample patients with their score and tier
    Samples,
    /// Show the dashboard for one patient
    Show {
        /// Patient payload (JSON); the built-in samples are used when omitted
        #[arg(long)]
        file: Option<PathBuf>,
        /// Position of the patient in the list
        #[arg(long, conflicts_with = "id")]
        index: Option<usize>,
        /// Patient id
        #[arg(long)]
        id: Option<String>,
    },
    /// Validate a patient payload without showing a dashboard
    Validate {
        /// Patient payload (JSON)
        #[arg(long)]
        file: PathBuf,
        /// Drop invalid records instead of rejecting the whole payload
        #[arg(long)]
        skip_invalid: bool,
    },
    /// Score a single set of vitals
    Score {
        /// Respiratory rate (breaths/min)
        #[arg(long)]
        rr: f64,
        /// Systolic blood pressure (mmHg)
        #[arg(long)]
        sbp: f64,
        /// Altered mental status
        #[arg(long)]
        ams: bool,
    },
}

/// Resolve core configuration from `QSOFA_IMPORT_POLICY` and `QSOFA_HISTORY_POLICY`.
fn config_from_env() -> Result<CoreConfig, Box<dyn std::error::Error>> {
    let import_policy = import_policy_from_env_value(std::env::var("QSOFA_IMPORT_POLICY").ok())?;
    let history_policy =
        history_policy_from_env_value(std::env::var("QSOFA_HISTORY_POLICY").ok())?;
    Ok(CoreConfig::new(import_policy, history_policy))
}

fn render_dashboard(view: &DashboardView) -> String {
    let f = &view.fields;
    let q = &view.qsofa;
    let mark = |hit: bool| if hit { "x" } else { " " };

    let mut out = String::new();
    out.push_str(&format!(
        "{} [{}]\n{}\n\n",
        view.status.label, view.status.status_class, view.status.advisory
    ));
    out.push_str(&format!(
        "Patient {} ({}), age {}, {}\n",
        f.patient_id, f.name, f.age, f.gender
    ));
    out.push_str(&format!(
        "Vitals  HR {}  RR {}  SBP {}  Temp {}\n",
        f.hr, f.rr, f.sbp, f.temp
    ));
    out.push_str(&format!(
        "Labs    WBC {}  Lactate {}  CRP {}\n\n",
        f.wbc, f.lactate, f.crp
    ));
    out.push_str(&format!("qSOFA score: {}\n", q.score));
    out.push_str(&format!("  [{}] RR >= 22\n", mark(q.rr_high)));
    out.push_str(&format!("  [{}] SBP <= 100\n", mark(q.sbp_low)));
    out.push_str(&format!("  [{}] Altered mental status\n\n", mark(q.ams_positive)));

    let trend: Vec<String> = view
        .chart
        .labels
        .iter()
        .zip(view.chart.samples.iter())
        .map(|(label, bpm)| format!("{label}: {bpm}"))
        .collect();
    out.push_str(&format!("{}: {}\n", view.chart.title, trend.join(", ")));
    if view.chart.label_mismatch {
        out.push_str(&format!(
            "  ({} samples recorded for {} time points)\n",
            view.chart.samples.len(),
            view.chart.labels.len()
        ));
    }

    out
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Samples) => {
            for scenario in SampleScenario::ALL {
                let record = scenario.record();
                let result = score(&record.vitals)?;
                let tier = classify(result.score)?;
                println!(
                    "{:?}: {} qSOFA {} -> {}",
                    scenario,
                    record.id(),
                    result.score,
                    tier
                );
            }
        }
        Some(Commands::Show { file, index, id }) => {
            let mut session = match file {
                Some(path) => {
                    let raw = std::fs::read_to_string(&path)?;
                    let report = Importer::new(&config_from_env()?).import(&raw)?;
                    for issue in &report.skipped {
                        eprintln!("Skipped record {}: {}", issue.index, issue.reason);
                    }
                    let mut session = Session::new();
                    session.load_list(report.patients);
                    session
                }
                None => Session::with_samples(),
            };

            if let Some(index) = index {
                session.select(index)?;
            } else if let Some(id) = id {
                session.select_by_id(&id)?;
            }

            match session.current() {
                Some(record) => print!("{}", render_dashboard(&DashboardView::build(record)?)),
                None => println!("No patients loaded."),
            }
        }
        Some(Commands::Validate { file, skip_invalid }) => {
            let cfg = config_from_env()?;
            let cfg = if skip_invalid {
                CoreConfig::new(ImportPolicy::SkipInvalid, cfg.history_policy())
            } else {
                cfg
            };
            let raw = std::fs::read_to_string(&file)?;
            match Importer::new(&cfg).import(&raw) {
                Ok(report) => {
                    println!("Valid: {} patient(s)", report.patients.len());
                    for issue in report.skipped {
                        println!("Skipped record {}: {}", issue.index, issue.reason);
                    }
                }
                Err(e) => eprintln!("Error validating {}: {}", file.display(), e),
            }
        }
        Some(Commands::Score { rr, sbp, ams }) => {
            let vitals = Vitals {
                hr: None,
                rr,
                sbp,
                temp: None,
                ams,
            };
            match score(&vitals) {
                Ok(result) => {
                    let tier = classify(result.score)?;
                    println!("qSOFA {} -> {}: {}", result.score, tier, tier.advisory());
                }
                Err(e) => eprintln!("Error scoring vitals: {}", e),
            }
        }
        None => {
            println!("Use 'qsofa --help' for commands");
        }
    }

    Ok(())
}
