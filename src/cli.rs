use clap::{Args, Parser, Subcommand};
use petcare_domain::REMINDER_PRESETS;
use petcare_sdk::{EventKind, PeriodUnit, ReminderSettings, ID};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "petcare")]
#[command(about = "Medical records of your pets: doctor visits, vaccinations and treatments")]
pub struct Cli {
    /// Address of the petcare api, overrides PETCARE_API_BASE_URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Time zone dates are typed in and shown in, overrides PETCARE_TIMEZONE
    #[arg(long, global = true)]
    pub timezone: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Pet {
        #[command(subcommand)]
        command: PetCommand,
    },
    Event {
        #[command(subcommand)]
        command: EventCommand,
    },
    /// Computes when a recurring procedure is due next, without the api
    NextDate {
        /// Date of the procedure, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Time of the procedure, HH:MM
        #[arg(long, default_value = "00:00")]
        time: String,
        #[arg(long)]
        unit: PeriodUnit,
        #[arg(long, default_value_t = 1)]
        value: u32,
    },
}

#[derive(Subcommand)]
pub enum PetCommand {
    /// Profile of a pet followed by its upcoming procedures
    Show {
        id: ID,
        /// How many upcoming procedures to list
        #[arg(long, default_value_t = 3)]
        upcoming: usize,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        owner_id: ID,
        #[arg(long)]
        breed: Option<String>,
        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,
        /// YYYY-MM-DD
        #[arg(long)]
        birth_date: Option<String>,
    },
    /// Changes the given fields, blank values leave a field unchanged
    Update {
        id: ID,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        breed: String,
        /// Weight in kg
        #[arg(long, default_value = "")]
        weight: String,
        /// YYYY-MM-DD
        #[arg(long, default_value = "")]
        birth_date: String,
    },
    UploadPhoto {
        id: ID,
        file: PathBuf,
        #[arg(long)]
        telegram_file_id: Option<String>,
    },
    /// Adds and deletes photos of a pet in one go
    Photos {
        id: ID,
        #[arg(long = "add")]
        add: Vec<PathBuf>,
        /// Id of a photo to delete
        #[arg(long = "delete")]
        delete: Vec<ID>,
    },
}

#[derive(Subcommand)]
pub enum EventCommand {
    Upcoming {
        pet_id: ID,
        /// Show at most this many procedures
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Procedures that already happened
    History { pet_id: ID },
    Show { kind: EventKind, id: ID },
    Add(AddEventArgs),
    Update(UpdateEventArgs),
    Delete { kind: EventKind, id: ID },
}

#[derive(Args)]
pub struct AddEventArgs {
    /// doctor-visit, vaccine or treatment
    pub kind: EventKind,
    #[arg(long)]
    pub pet_id: ID,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: String,
    /// HH:MM
    #[arg(long)]
    pub time: String,
    #[command(flatten)]
    pub details: EventDetailsArgs,
}

#[derive(Args)]
pub struct UpdateEventArgs {
    pub kind: EventKind,
    pub id: ID,
    /// YYYY-MM-DD, keeps the current date when missing
    #[arg(long)]
    pub date: Option<String>,
    /// HH:MM, keeps the current time when missing
    #[arg(long)]
    pub time: Option<String>,
    #[command(flatten)]
    pub details: EventDetailsArgs,
}

/// Fields of an event besides its date. When updating, missing fields keep
/// their current value.
#[derive(Args, Default)]
pub struct EventDetailsArgs {
    #[arg(long)]
    pub title: Option<String>,
    /// Remind this long before the event: 5m, 1h or 1d
    #[arg(long, value_parser = parse_reminder)]
    pub remind: Option<ReminderSettings>,
    #[arg(long, conflicts_with = "remind")]
    pub no_reminder: bool,
    #[arg(long)]
    pub clinic: Option<String>,
    #[arg(long)]
    pub doctor: Option<String>,
    #[arg(long)]
    pub diagnosis: Option<String>,
    #[arg(long)]
    pub recommendations: Option<String>,
    #[arg(long)]
    pub referrals: Option<String>,
    #[arg(long)]
    pub medicine: Option<String>,
    #[arg(long)]
    pub remedy: Option<String>,
    #[arg(long)]
    pub parasite: Option<String>,
    /// How often a vaccination or treatment repeats: day, week, month or year
    #[arg(long)]
    pub period: Option<PeriodUnit>,
}

/// Parses a lead time like `5m`, `1h` or `1 day` into one of the reminder
/// presets
fn parse_reminder(lead: &str) -> Result<ReminderSettings, String> {
    let lead = lead.trim();
    let presets = || {
        REMINDER_PRESETS
            .iter()
            .map(|p| p.label)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let split = lead
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| format!("{} has no unit, choose one of: {}", lead, presets()))?;
    let (value, unit) = lead.split_at(split);
    let value = value
        .parse::<u32>()
        .map_err(|_| format!("{} does not start with a number", lead))?;
    let unit = unit.parse::<PeriodUnit>().map_err(|e| e.to_string())?;
    REMINDER_PRESETS
        .iter()
        .find(|p| p.value == value && p.unit == unit)
        .map(ReminderSettings::from_preset)
        .ok_or_else(|| format!("Unsupported lead time {}, choose one of: {}", lead, presets()))
}
