use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use checkin_core::{
    close_document, load_patient_record, open_and_prefill, resolve_field_values, AppointmentInfo,
    CoreConfig, MemoryViewer, PatientRecord, SdkSettings, ViewerConfiguration, WritePlan,
    DEFAULT_DOCUMENTS_DIR, DEFAULT_PATIENT_DATA_FILE, INTAKE_FORMS,
};
use checkin_types::{FieldId, FieldValues};

#[derive(Parser)]
#[command(name = "checkin")]
#[command(about = "Patient check-in kiosk CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct DataArgs {
    /// Patient record JSON
    #[arg(long, default_value = DEFAULT_PATIENT_DATA_FILE)]
    data: PathBuf,
}

#[derive(Args)]
struct ResolveArgs {
    /// Field names reported by the document (comma-separated)
    #[arg(long, value_delimiter = ',', required = true)]
    fields: Vec<String>,
    /// Date used for "today" fields (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,
    #[command(flatten)]
    data: DataArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// List the intake forms
    Forms,
    /// Show the loaded patient record
    Patient {
        #[command(flatten)]
        data: DataArgs,
    },
    /// Print the pre-fill values for a set of fields
    Resolve(ResolveArgs),
    /// Print the ordered write plan for a set of fields
    Plan(ResolveArgs),
    /// Pre-fill an in-memory document described by a manifest
    Simulate {
        /// JSON object of field name to current value
        #[arg(long)]
        manifest: PathBuf,
        /// Date used for "today" fields (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[command(flatten)]
        data: DataArgs,
    },
}

fn load(path: &Path) -> anyhow::Result<PatientRecord> {
    let record = load_patient_record(path);
    record.with_context(|| format!("no patient record at {}", path.display()))
}

fn field_ids(names: Vec<String>) -> Vec<FieldId> {
    names
        .into_iter()
        .filter_map(|name| FieldId::new(name.trim()).ok())
        .collect()
}

fn today_or(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}

fn resolve(args: ResolveArgs) -> anyhow::Result<(Vec<FieldId>, FieldValues)> {
    let record = load(&args.data.data)?;
    let available = field_ids(args.fields);
    let values = resolve_field_values(&available, &record, today_or(args.date));
    Ok((available, values))
}

async fn simulate(manifest: &Path, data: &Path, date: Option<NaiveDate>) -> anyhow::Result<()> {
    let record = load(data)?;
    let mut viewer = MemoryViewer::from_manifest(manifest)
        .with_context(|| format!("no field manifest at {}", manifest.display()))?;

    let cfg = CoreConfig::new(
        data.to_path_buf(),
        PathBuf::from(DEFAULT_DOCUMENTS_DIR),
        SdkSettings::default(),
    )?;
    let document = manifest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let config = ViewerConfiguration::new(&cfg, "viewer-cli", cfg.document_url(&document));

    let outcome = open_and_prefill(&mut viewer, &config, &record, today_or(date)).await;
    println!("Outcome: {:?}", outcome);
    println!("Writes: {}", viewer.writes().len());
    println!("{}", serde_json::to_string_pretty(viewer.values())?);
    close_document(&mut viewer).await;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Forms) => {
            for (index, form) in INTAKE_FORMS.iter().enumerate() {
                println!(
                    "{}. {} ({}) - {}",
                    index + 1,
                    form.name,
                    form.duration,
                    form.file
                );
            }
        }
        Some(Commands::Patient { data }) => {
            let record = load(&data.data)?;
            let appointment = AppointmentInfo::at(chrono::Local::now().naive_local(), &record);
            println!("Name: {}", record.full_name());
            println!("Date of birth: {}", record.patient.date_of_birth);
            println!("Provider: {}", appointment.provider);
            println!("Visit: {}", record.visit_info.reason_for_visit);
            println!("Appointment: {} at {}", appointment.date, appointment.time);
        }
        Some(Commands::Resolve(args)) => {
            let (_, values) = resolve(args)?;
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
        Some(Commands::Plan(args)) => {
            let (available, values) = resolve(args)?;
            let plan = WritePlan::build(&values, &available);
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Some(Commands::Simulate {
            manifest,
            date,
            data,
        }) => {
            let runtime = tokio::runtime::Builder::new_current_thread().build()?;
            runtime.block_on(simulate(&manifest, &data.data, date))?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn field_list_is_split_and_trimmed() {
        let cli = Cli::try_parse_from([
            "checkin",
            "resolve",
            "--fields",
            "firstName_firstName, ssn_ssn,,",
            "--date",
            "2026-10-17",
        ])
        .unwrap();
        let Some(Commands::Resolve(args)) = cli.command else {
            panic!("expected resolve");
        };
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2026, 10, 17));
        assert_eq!(args.data.data, PathBuf::from(DEFAULT_PATIENT_DATA_FILE));

        let ids = field_ids(args.fields);
        let names: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(names, vec!["firstName_firstName", "ssn_ssn"]);
    }
}
