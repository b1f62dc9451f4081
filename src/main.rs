//! Command-line driver for the scan workflow, accounts and history.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use derma_scan::adapters::FileImageSource;
use derma_scan::app::App;
use derma_scan::application::{
    GetScanQuery, RegisterUserCommand, ScanTiming, SignInCommand, UpdateProfileCommand,
};
use derma_scan::config::{AppConfig, ConfigError, LoggingConfig};
use derma_scan::domain::diagnosis::{Progression, SymptomForm};
use derma_scan::domain::foundation::{DomainError, HistoryEntryId};
use derma_scan::domain::history::HistoryEntry;
use derma_scan::domain::navigation::Route;
use derma_scan::domain::user::{AccountError, ProfileDetails, ProfileForm, SignUpForm};
use derma_scan::domain::workflow::{CareBranch, WorkflowError, WorkflowStage};
use derma_scan::ports::CaptureSource;

#[derive(Parser, Debug)]
#[command(name = "derma-scan", version, about = "Skin-condition self-check")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and sign in
    Register(RegisterArgs),
    /// Sign in with email and password
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out of the current session
    SignOut,
    /// Show the signed-in user
    Whoami,
    /// Complete or edit the signed-in profile
    EditProfile(EditProfileArgs),
    /// Run a full scan on an image file and save it
    Scan(ScanArgs),
    /// List saved scans, newest first
    History,
    /// Show one saved scan
    Show {
        /// History entry id
        id: String,
    },
    /// Delete every saved scan
    ClearHistory {
        /// Required; the deletion cannot be undone
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    /// Defaults to the password
    #[arg(long)]
    confirm_password: Option<String>,
    #[arg(long, default_value = "")]
    phone: String,
}

#[derive(Args, Debug)]
struct EditProfileArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    /// Completing the profile right after registration
    #[arg(long)]
    new_user: bool,
    #[arg(long)]
    date_of_birth: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    blood_type: Option<String>,
    #[arg(long)]
    allergies: Option<String>,
    #[arg(long)]
    medications: Option<String>,
    #[arg(long)]
    emergency_contact: Option<String>,
    #[arg(long)]
    emergency_phone: Option<String>,
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Photo of the affected area
    image: PathBuf,
    #[arg(long, value_enum, default_value_t = SourceArg::Camera)]
    source: SourceArg,
    /// 1-5
    #[arg(long)]
    severity: u8,
    /// 1-5
    #[arg(long)]
    pain: u8,
    /// 1-5
    #[arg(long)]
    itching: Option<u8>,
    #[arg(long, default_value = "")]
    duration: String,
    /// better, stable or worse
    #[arg(long)]
    progression: Option<Progression>,
    /// Had this condition before
    #[arg(long)]
    recurring: Option<bool>,
    /// Free-text description
    #[arg(long, default_value = "")]
    symptoms: String,
    /// Show the self-care plan even when a doctor visit is advised
    #[arg(long)]
    care_plan: bool,
    /// How many blurry captures to retake before giving up
    #[arg(long, default_value_t = 3)]
    retries: u32,
    /// Skip the simulated processing delays
    #[arg(long)]
    fast: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SourceArg {
    Camera,
    Gallery,
}

impl From<SourceArg> for CaptureSource {
    fn from(value: SourceArg) -> Self {
        match value {
            SourceArg::Camera => CaptureSource::Camera,
            SourceArg::Gallery => CaptureSource::Gallery,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("{}", .0.message)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Usage(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging);

    match run(cli.command, App::from_config(config)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<AppConfig, ConfigError> {
    let config = AppConfig::load()?;
    config.validate()?;
    Ok(config)
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(command: Command, app: App) -> Result<(), CliError> {
    match command {
        Command::Register(args) => {
            let confirm_password = args.confirm_password.unwrap_or_else(|| args.password.clone());
            let result = app
                .register_user()
                .handle(RegisterUserCommand {
                    form: SignUpForm {
                        full_name: args.name,
                        email: args.email,
                        password: args.password,
                        confirm_password,
                        phone: args.phone,
                    },
                })
                .await?;
            println!("Account created for {}.", result.user.email);
            println!("Next: {}", result.next.name());
            if let Route::EditProfile { is_new_user: true, .. } = result.next {
                println!("Complete your profile with `derma-scan edit-profile --new-user ...`.");
            }
        }
        Command::SignIn { email, password } => {
            let result = app.sign_in().handle(SignInCommand { email, password }).await?;
            println!("Welcome back, {}!", result.user.greeting_name());
        }
        Command::SignOut => {
            app.sign_out().handle().await?;
            println!("Signed out.");
        }
        Command::Whoami => match app.current_user().handle().await {
            Some(user) => {
                println!("{} <{}>", user.greeting_name(), user.email);
                if !user.is_profile_complete() {
                    println!("Profile incomplete: phone number missing.");
                }
            }
            None => println!("Not signed in."),
        },
        Command::EditProfile(args) => {
            let result = app
                .update_profile()
                .handle(UpdateProfileCommand {
                    form: ProfileForm {
                        full_name: args.name,
                        email: args.email,
                        phone: args.phone,
                        details: ProfileDetails {
                            date_of_birth: args.date_of_birth,
                            gender: args.gender,
                            blood_type: args.blood_type,
                            allergies: args.allergies,
                            medications: args.medications,
                            emergency_contact: args.emergency_contact,
                            emergency_phone: args.emergency_phone,
                        },
                    },
                    is_new_user: args.new_user,
                })
                .await?;
            if args.new_user {
                println!("Profile completed successfully!");
            } else {
                println!("Profile updated successfully!");
            }
            println!("Next: {}", result.next.name());
        }
        Command::Scan(args) => scan(&app, args).await?,
        Command::History => {
            let entries = app.list_history().handle().await;
            if entries.is_empty() {
                println!("No scans saved yet.");
            }
            for entry in entries {
                println!(
                    "{}  {}  {}  {} risk  {}",
                    entry.id,
                    entry.date.short_date(),
                    entry.condition,
                    entry.risk_label(),
                    entry.confidence
                );
            }
        }
        Command::Show { id } => {
            let id = HistoryEntryId::parse(id).map_err(DomainError::from)?;
            if let Route::ScanDetail { scan } = app.get_scan().handle(GetScanQuery { id }).await? {
                print_entry(&scan);
            }
        }
        Command::ClearHistory { yes } => {
            if !yes {
                return Err(CliError::Usage(
                    "This deletes every saved scan. Re-run with --yes to confirm.".into(),
                ));
            }
            let removed = app.clear_history().handle().await?;
            println!("Deleted {} saved scan(s).", removed);
        }
    }
    Ok(())
}

async fn scan(app: &App, args: ScanArgs) -> Result<(), CliError> {
    let mut controller = app.scan_controller(Arc::new(FileImageSource::new(&args.image)));
    if args.fast {
        controller = controller.with_timing(ScanTiming::immediate());
    }

    println!("Hello, {}.", app.current_user().greeting_name().await);
    controller.start_scan().await?;

    let source = CaptureSource::from(args.source);
    let mut route = controller.capture(source).await?;
    let mut retries = args.retries;
    while route == Route::CaptureError {
        if retries == 0 {
            controller.abandon().await?;
            return Err(CliError::Usage(
                "The photo looks blurry. Try again with better lighting.".into(),
            ));
        }
        retries -= 1;
        println!("Image looks blurry, retaking...");
        controller.retake().await?;
        route = controller.capture(source).await?;
    }
    if route != Route::SymptomDetails {
        controller.abandon().await?;
        return Err(CliError::Usage("No photo selected.".into()));
    }

    controller
        .submit_symptoms(SymptomForm {
            severity: args.severity,
            pain_level: args.pain,
            itching_level: args.itching,
            duration: args.duration,
            progression: args.progression,
            is_recurring: args.recurring,
            symptoms_text: args.symptoms,
        })
        .await?;

    println!("Analyzing skin texture and extracting features...");
    let route = controller.run_inference().await?;

    let record = controller.record().await;
    println!("Condition:  {}", record.condition);
    println!("Confidence: {}", record.confidence);
    for recommendation in &record.recommendations {
        println!("  - {}", recommendation);
    }

    if route == Route::DoctorAlert {
        println!("We recommend seeing a dermatologist about this.");
        if args.care_plan {
            controller.view_care_plan().await?;
        }
    }
    if controller.stage().await == WorkflowStage::Resolved(CareBranch::CareAdvice) {
        println!("Follow the self-care plan and re-scan in a few days.");
    }

    controller.save_and_finish().await?;
    println!("Scan saved to history.");
    Ok(())
}

fn print_entry(entry: &HistoryEntry) {
    println!("Condition:   {}", entry.condition);
    println!("Date:        {}", entry.date.short_date());
    println!("Confidence:  {}", entry.confidence);
    println!(
        "Severity:    {} ({})",
        entry.severity.value(),
        entry.severity.severity_label()
    );
    println!(
        "Pain:        {} ({})",
        entry.pain_level.value(),
        entry.pain_level.pain_label()
    );
    if let Some(itching) = entry.itching_level {
        println!("Itching:     {} ({})", itching.value(), itching.itching_label());
    }
    if !entry.duration.is_empty() {
        println!("Duration:    {}", entry.duration);
    }
    println!("Progression: {}", entry.progression.label());
    println!("Recurring:   {}", entry.is_recurring.label());
    if !entry.symptoms_text.is_empty() {
        println!("Symptoms:    {}", entry.symptoms_text);
    }
    if let Some(image) = &entry.image_ref {
        println!("Image:       {}", image.as_str());
    }
}
