#![forbid(unsafe_code)]
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use wardroster::{
    io,
    model::{Role, Staff},
    report::{SummaryRenderer, TextSummary},
    scheduler::{GenerateOptions, RoleTarget, Scheduler, ViolationKind},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de planification de gardes (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du jeu de données
    #[arg(long, global = true, default_value = "ward.json")]
    data: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(clap::Args, Debug, Clone, Copy)]
struct RuleArgs {
    #[arg(long, default_value_t = 4)]
    max_consecutive_days: u32,
    #[arg(long, default_value_t = 7)]
    caregiver_min: u32,
    #[arg(long, default_value_t = 8)]
    caregiver_max: u32,
    #[arg(long, default_value_t = 2)]
    assistant_min: u32,
    #[arg(long, default_value_t = 3)]
    assistant_max: u32,
}

impl From<RuleArgs> for GenerateOptions {
    fn from(a: RuleArgs) -> Self {
        Self {
            max_consecutive_days: a.max_consecutive_days,
            caregiver_target: RoleTarget {
                min: a.caregiver_min,
                max: a.caregiver_max,
            },
            assistant_target: RoleTarget {
                min: a.assistant_min,
                max: a.assistant_max,
            },
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter un membre du personnel
    AddStaff {
        #[arg(long)]
        name: String,
        /// caregiver | assistant | supervisor
        #[arg(long)]
        role: Role,
        #[arg(long, default_value_t = 40)]
        target_hours: u32,
    },

    /// Importer du personnel depuis un CSV
    ImportStaff {
        #[arg(long)]
        csv: String,
    },

    /// Importer des indisponibilités depuis un CSV
    ImportUnavailability {
        #[arg(long)]
        csv: String,
    },

    /// Importer des vœux de créneaux depuis un CSV
    ImportRequests {
        #[arg(long)]
        csv: String,
    },

    /// Générer le planning d'une plage de dates
    Generate {
        /// AAAA-MM-JJ
        #[arg(long)]
        start: NaiveDate,
        /// AAAA-MM-JJ
        #[arg(long)]
        end: NaiveDate,
        #[command(flatten)]
        rules: RuleArgs,
        /// Export CSV du planning généré (optionnel)
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Lister et optionnellement exporter le planning
    List {
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vérifier le planning stocké contre les règles de service
    Check {
        #[command(flatten)]
        rules: RuleArgs,
        /// Export CSV des entorses (optionnel)
        #[arg(long)]
        report: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.data)?;
    let mut dataset = storage.load().unwrap_or_default();

    let code = match cli.cmd {
        Commands::AddStaff {
            name,
            role,
            target_hours,
        } => {
            let person = Staff::new(name, role).with_target_hours(target_hours);
            println!("{} | {} | {}", person.id.as_str(), person.name, person.role);
            dataset.staff.push(person);
            storage.save(&dataset)?;
            0
        }
        Commands::ImportStaff { csv } => {
            let staff = io::import_staff_csv(csv)?;
            dataset.staff.extend(staff);
            storage.save(&dataset)?;
            0
        }
        Commands::ImportUnavailability { csv } => {
            let records = io::import_unavailability_csv(csv)?;
            dataset.unavailability.extend(records);
            storage.save(&dataset)?;
            0
        }
        Commands::ImportRequests { csv } => {
            let records = io::import_requests_csv(csv)?;
            dataset.requests.extend(records);
            storage.save(&dataset)?;
            0
        }
        Commands::Generate {
            start,
            end,
            rules,
            out_csv,
        } => {
            dataset.clear_schedule_range(start, end);
            let scheduler = Scheduler::new(
                dataset.schedulable_staff(),
                &dataset.unavailability,
                dataset.requests.clone(),
            );
            let generation = scheduler.generate(&dataset.schedule, start, end, rules.into())?;

            print!(
                "{}",
                TextSummary.render(&dataset.staff, &generation.report)
            );
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, &generation.entries, &dataset.staff)?;
            }

            dataset.schedule.extend(generation.entries);
            dataset
                .schedule
                .sort_by(|a, b| (a.date, &a.staff_id).cmp(&(b.date, &b.staff_id)));
            storage.save(&dataset)?;
            0
        }
        Commands::List { out_csv } => {
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, &dataset.schedule, &dataset.staff)?;
            }
            // impression compacte
            for e in &dataset.schedule {
                let name = dataset
                    .find_staff_by_id(&e.staff_id)
                    .map(|s| s.name.as_str())
                    .unwrap_or("-");
                println!("{} | {} | {}", wardroster::day_key(e.date), name, e.shift);
            }
            0
        }
        Commands::Check { rules, report } => {
            let scheduler = Scheduler::new(
                dataset.schedulable_staff(),
                &dataset.unavailability,
                Vec::new(),
            );
            let violations = scheduler.audit(&dataset.schedule, rules.into());
            if violations.is_empty() {
                println!("OK: no violations");
                0
            } else {
                eprintln!("Found {} violation(s)", violations.len());
                if let Some(path) = report {
                    // CSV simple
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["staff_id", "date", "kind"])?;
                    for v in &violations {
                        w.write_record([
                            v.staff_id.as_str(),
                            wardroster::day_key(v.date).as_str(),
                            match v.kind {
                                ViolationKind::DoubleBooking => "double-booking",
                                ViolationKind::NightRest => "night-rest",
                                ViolationKind::StreakExceeded => "streak",
                                ViolationKind::HoursExceeded => "hours",
                                ViolationKind::MixExceeded => "mix",
                                ViolationKind::UnavailableDay => "unavailable-day",
                            },
                        ])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
    };

    std::process::exit(code);
}
