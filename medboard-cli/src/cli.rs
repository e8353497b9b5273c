//! Command line surface

use std::str::FromStr;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use medboard_lib::model::KycStatus;
use medboard_lib::table::SortDirection;
use simplelog::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "medboard")]
#[command(about = "Healthcare admin dashboard client")]
#[command(version)]
pub struct Cli {
    /// API base URL, e.g. https://api.example.com/api/v1/
    #[arg(long, env = "MEDBOARD_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Bearer token. Signs in for this invocation only, except with `login`.
    #[arg(long, env = "MEDBOARD_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Log level written to latest.log
    #[arg(long, default_value = "info", global = true)]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store a session from `--token`
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// System totals, recent appointments and pending approvals
    Dashboard,
    Patients {
        #[command(subcommand)]
        action: PatientAction,
    },
    Doctors {
        #[command(subcommand)]
        action: DoctorAction,
    },
    Hospitals {
        #[command(subcommand)]
        action: HospitalAction,
    },
    Appointments {
        #[command(subcommand)]
        action: AppointmentAction,
    },
    Reviews {
        #[command(subcommand)]
        target: ReviewCommand,
    },
    /// List medical specialties
    Specialties,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub refresh_token: Option<String>,

    /// Display name of the signed-in user
    #[arg(long, requires = "email")]
    pub name: Option<String>,

    #[arg(long, requires = "name")]
    pub email: Option<String>,

    /// admin, doctor, hospital or patient
    #[arg(long)]
    pub role: Option<String>,
}

/// Paging, search and presentation of a list.
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (10, 20, 30, 40 or 50)
    #[arg(long, default_value_t = 10)]
    pub page_size: usize,

    /// Server-side search
    #[arg(long)]
    pub search: Option<String>,

    /// Sort the page by COLUMN or COLUMN:desc; repeat for secondary keys
    #[arg(long, value_name = "COLUMN[:desc]")]
    pub sort: Vec<SortArg>,

    /// Hide a column; repeatable
    #[arg(long, value_name = "COLUMN")]
    pub hide: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortArg {
    pub column: String,
    pub direction: SortDirection,
}

impl FromStr for SortArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, direction) = match s.split_once(':') {
            None => (s, SortDirection::Ascending),
            Some((column, "asc")) => (column, SortDirection::Ascending),
            Some((column, "desc")) => (column, SortDirection::Descending),
            Some((_, other)) => {
                return Err(format!("unknown sort direction '{}', expected asc or desc", other));
            }
        };
        if column.is_empty() {
            return Err("sort column is empty".to_string());
        }
        Ok(Self {
            column: column.to_string(),
            direction,
        })
    }
}

#[derive(Args, Debug)]
pub struct KycArgs {
    pub id: String,

    /// pending, verified, rejected or suspended
    pub status: KycStatus,

    /// Required for rejected and suspended
    #[arg(long)]
    pub reason: Option<String>,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum PatientAction {
    List(TableArgs),
    Show { id: String },
}

#[derive(Subcommand, Debug)]
pub enum DoctorAction {
    List {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long)]
        hospital_id: Option<String>,
        #[arg(long)]
        specialty: Option<String>,
    },
    Show {
        id: String,
    },
    /// Change a doctor's KYC status
    Kyc(KycArgs),
}

#[derive(Subcommand, Debug)]
pub enum HospitalAction {
    List {
        #[command(flatten)]
        table: TableArgs,
        /// Comma separated specialty names
        #[arg(long)]
        specialties: Option<String>,
    },
    Show {
        id: String,
    },
    /// Change a hospital's KYC status
    Kyc(KycArgs),
}

#[derive(Subcommand, Debug)]
pub enum AppointmentAction {
    List {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        doctor_id: Option<String>,
        #[arg(long)]
        patient_id: Option<String>,
    },
    Show {
        id: String,
    },
    Cancel {
        id: String,
        #[arg(long)]
        reason: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReviewCommand {
    Doctor {
        id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Hospital {
        id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_sort_arg() {
        let arg: SortArg = "name".parse().unwrap();
        assert_eq!(arg.direction, SortDirection::Ascending);
        let arg: SortArg = "email:desc".parse().unwrap();
        assert_eq!(arg.column, "email");
        assert_eq!(arg.direction, SortDirection::Descending);
        assert!("name:up".parse::<SortArg>().is_err());
        assert!(":desc".parse::<SortArg>().is_err());
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::try_parse_from([
            "medboard",
            "--api-url",
            "http://localhost:8000/api/v1/",
            "doctors",
            "list",
            "--page",
            "2",
            "--sort",
            "name:desc",
            "--hide",
            "email",
            "--specialty",
            "Cardiology",
        ])
        .unwrap();
        match cli.command {
            Command::Doctors {
                action: DoctorAction::List { table, specialty, .. },
            } => {
                assert_eq!(table.page, 2);
                assert_eq!(table.page_size, 10);
                assert_eq!(table.hide, vec!["email"]);
                assert_eq!(specialty.as_deref(), Some("Cardiology"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_kyc_status() {
        let cli = Cli::try_parse_from([
            "medboard", "hospitals", "kyc", "h1", "rejected", "--reason", "expired",
        ])
        .unwrap();
        match cli.command {
            Command::Hospitals {
                action: HospitalAction::Kyc(args),
            } => {
                assert_eq!(args.status, KycStatus::Rejected);
                assert!(!args.yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
