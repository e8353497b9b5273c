//! Command execution

use std::io;
use std::io::Write;

use medboard_lib::api::AppointmentFilter;
use medboard_lib::api::DoctorFilter;
use medboard_lib::api::HospitalFilter;
use medboard_lib::api::ReviewTarget;
use medboard_lib::api::Reviews;
use medboard_lib::api::Specialties;
use medboard_lib::auth::AccessToken;
use medboard_lib::auth::AuthSlice;
use medboard_lib::auth::SessionUser;
use medboard_lib::model::Appointment;
use medboard_lib::model::Doctor;
use medboard_lib::model::Hospital;
use medboard_lib::model::KycRecord;
use medboard_lib::model::KycSubject;
use medboard_lib::model::Paginated;
use medboard_lib::model::Patient;
use medboard_lib::model::Review;
use medboard_lib::pages::AppointmentDetail;
use medboard_lib::pages::DashboardPage;
use medboard_lib::pages::DoctorDetail;
use medboard_lib::pages::HospitalDetail;
use medboard_lib::pages::KycChange;
use medboard_lib::pages::ListPage;
use medboard_lib::pages::ListResource;
use medboard_lib::pages::PatientDetail;
use medboard_lib::pages::TableEntity;
use medboard_lib::pages::cancel_appointment;
use medboard_lib::store::AppStore;
use medboard_lib::store::StoreConfig;
use medboard_lib::table::Column;
use medboard_lib::table::DataTable;
use medboard_lib::table::Row;
use medboard_lib::table::SortDirection;
use medboard_lib::table::TableOptions;

use crate::cli::AppointmentAction;
use crate::cli::Cli;
use crate::cli::Command;
use crate::cli::DoctorAction;
use crate::cli::HospitalAction;
use crate::cli::KycArgs;
use crate::cli::LoginArgs;
use crate::cli::PatientAction;
use crate::cli::ReviewCommand;
use crate::cli::TableArgs;
use crate::error::CliError;
use crate::paths;
use crate::render;

/// Opens the store, runs one command and flushes the session.
///
/// A `--token` given to any command but `login` signs in for this run
/// only and leaves the stored session untouched.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let api_url = cli.api_url.clone().ok_or(CliError::MissingApiUrl)?;
    let mut config = StoreConfig::new(api_url);
    if let Some(path) = paths::settings_db() {
        config = config.with_settings_path(path);
    }
    let store = AppStore::open(config).await?;

    let ephemeral = cli.token.is_some() && !matches!(cli.command, Command::Login(_));
    if let Some(token) = cli.token.as_ref().filter(|_| ephemeral) {
        store
            .session()
            .replace(AuthSlice::signed_in(AccessToken::new(token.clone()), None));
        log::debug!("using --token for this run");
    }

    let result = dispatch(&store, cli.command, cli.token.as_deref()).await;
    if !ephemeral {
        store.shutdown().await?;
    }
    result
}

async fn dispatch(store: &AppStore, command: Command, token: Option<&str>) -> Result<(), CliError> {
    if requires_session(&command) && !store.session().is_authenticated() {
        return Err(CliError::NotSignedIn);
    }

    match command {
        Command::Login(args) => login(store, token, &args).await,
        Command::Logout => {
            store.logout().await?;
            println!("Signed out.");
            Ok(())
        }
        Command::Dashboard => dashboard(store).await,
        Command::Patients { action } => match action {
            PatientAction::List(table) => list::<Patient>(store, (), &table).await,
            PatientAction::Show { id } => show_patient(store, &id).await,
        },
        Command::Doctors { action } => match action {
            DoctorAction::List {
                table,
                hospital_id,
                specialty,
            } => {
                let filter = DoctorFilter {
                    hospital_id,
                    specialty,
                };
                list::<Doctor>(store, filter, &table).await
            }
            DoctorAction::Show { id } => show_doctor(store, &id).await,
            DoctorAction::Kyc(args) => {
                change_kyc(store, KycSubject::Doctor(args.id.clone()), &args).await
            }
        },
        Command::Hospitals { action } => match action {
            HospitalAction::List { table, specialties } => {
                list::<Hospital>(store, HospitalFilter { specialties }, &table).await
            }
            HospitalAction::Show { id } => show_hospital(store, &id).await,
            HospitalAction::Kyc(args) => {
                change_kyc(store, KycSubject::Hospital(args.id.clone()), &args).await
            }
        },
        Command::Appointments { action } => match action {
            AppointmentAction::List {
                table,
                status,
                doctor_id,
                patient_id,
            } => {
                let filter = AppointmentFilter {
                    status,
                    doctor_id,
                    patient_id,
                    hospital_id: None,
                };
                list::<Appointment>(store, filter, &table).await
            }
            AppointmentAction::Show { id } => show_appointment(store, &id).await,
            AppointmentAction::Cancel { id, reason } => {
                cancel_appointment(store, &id, &reason).await?;
                println!("Appointment {} cancelled.", id);
                Ok(())
            }
        },
        Command::Reviews { target } => match target {
            ReviewCommand::Doctor { id, page } => {
                reviews(store, ReviewTarget::Doctor, &id, page).await
            }
            ReviewCommand::Hospital { id, page } => {
                reviews(store, ReviewTarget::Hospital, &id, page).await
            }
        },
        Command::Specialties => specialties(store).await,
    }
}

fn requires_session(command: &Command) -> bool {
    !matches!(
        command,
        Command::Login(_) | Command::Logout | Command::Specialties
    )
}

// =============================================================================
// Session
// =============================================================================

async fn login(store: &AppStore, token: Option<&str>, args: &LoginArgs) -> Result<(), CliError> {
    let token = token.ok_or(CliError::MissingToken)?;
    let access = match &args.refresh_token {
        Some(refresh) => AccessToken::with_refresh(token, None, refresh.clone()),
        None => AccessToken::new(token),
    };
    let user = args
        .name
        .clone()
        .zip(args.email.clone())
        .map(|(name, email)| SessionUser {
            id: email.clone(),
            name,
            email,
            role: args.role.clone(),
        });

    let greeting = user
        .as_ref()
        .map(|u| format!(" as {}", u.name))
        .unwrap_or_default();
    store.login(AuthSlice::signed_in(access, user)).await?;
    println!("Signed in{}.", greeting);
    Ok(())
}

// =============================================================================
// Lists
// =============================================================================

async fn list<R: ListResource>(
    store: &AppStore,
    filter: R::Filter,
    args: &TableArgs,
) -> Result<(), CliError> {
    let options = TableOptions::default().with_page_size(args.page_size);
    let mut page = ListPage::<R>::with_options(store.clone(), filter, options)?;

    match args.search.as_deref() {
        Some(text) => page.search(text).await?,
        None => page.load().await?,
    }
    if args.page > 1 {
        page.go_to(args.page).await?;
    }

    let table = page.table_mut();
    for sort in &args.sort {
        table.toggle_sort(&sort.column, true)?;
        if sort.direction == SortDirection::Descending {
            table.toggle_sort(&sort.column, true)?;
        }
    }
    for column in &args.hide {
        table.set_column_visible(column, false)?;
    }

    println!("{}\n", render::cards(page.stat_cards()));
    if !page.insight_cards().is_empty() {
        println!("{}\n", render::cards(page.insight_cards()));
    }
    println!("{}", render::table(page.table()));
    Ok(())
}

/// All of `rows` in one unpaginated table.
fn static_table(columns: Vec<Column>, rows: Vec<Row>) -> Result<DataTable, CliError> {
    let options = TableOptions::default()
        .with_pagination(false)
        .with_free_text_search(false);
    let mut table = DataTable::new(columns, options)?;
    table.set_rows(rows)?;
    Ok(table)
}

fn entity_table<T: TableEntity>(items: &[T]) -> Result<DataTable, CliError> {
    static_table(T::columns(), items.iter().map(TableEntity::to_row).collect())
}

fn reviews_table(reviews: &Paginated<Review>) -> Result<DataTable, CliError> {
    let columns = vec![
        Column::key("user", "Reviewer"),
        Column::key("rating", "Rating"),
        Column::key("text", "Review"),
        Column::key("created_at", "Date"),
    ];
    let rows = reviews
        .results
        .iter()
        .map(|r| {
            Row::new(&r.id)
                .with("user", r.user.name.as_str())
                .with("rating", render::stars(r.rating))
                .with("text", r.text.as_str())
                .with("created_at", r.created_at.as_str())
        })
        .collect();
    static_table(columns, rows)
}

fn kyc_table(records: &[KycRecord]) -> Result<DataTable, CliError> {
    let columns = vec![
        Column::key("status", "Status"),
        Column::key("reason", "Reason"),
        Column::key("created_at", "Date"),
    ];
    let rows = records
        .iter()
        .map(|r| {
            Row::new(&r.id)
                .with("status", r.status.as_str())
                .with("reason", r.reason.clone())
                .with("created_at", r.created_at.as_str())
        })
        .collect();
    static_table(columns, rows)
}

// =============================================================================
// Details
// =============================================================================

fn text(row: &Row, key: &str) -> String {
    row.get(key).to_string()
}

fn yes_no(row: &Row, key: &str) -> String {
    match row.get(key).as_bool() {
        Some(true) => "Yes".to_string(),
        _ => "No".to_string(),
    }
}

fn location(row: &Row) -> String {
    format!(
        "{}, {}, {}",
        row.get("city"),
        row.get("state"),
        row.get("country")
    )
}

async fn dashboard(store: &AppStore) -> Result<(), CliError> {
    let page = DashboardPage::load(store).await?;
    println!("{}\n", render::cards(page.stat_cards()));
    println!("{}", render::heading("Recent Appointments"));
    println!("{}\n", render::table(&page.recent_appointments_table()?));
    println!("{}", render::heading("Pending Approvals"));
    println!("{}", render::table(&page.pending_approvals_table()?));
    Ok(())
}

async fn show_patient(store: &AppStore, id: &str) -> Result<(), CliError> {
    let detail = PatientDetail::load(store, id).await?;
    let row = detail.patient.to_row();
    println!("{}", render::heading(&text(&row, "name")));
    println!(
        "{}\n",
        render::fields(&[
            ("Email", text(&row, "email")),
            ("Phone", text(&row, "phone_number")),
            ("Gender", text(&row, "gender")),
            ("Location", location(&row)),
            ("KYC", render::badge(&text(&row, "kyc_status"))),
            ("Active", yes_no(&row, "is_active")),
            ("Joined", text(&row, "created_at")),
        ])
    );
    println!("{}", render::heading("Appointments"));
    println!("{}", render::table(&entity_table(&detail.appointments.results)?));
    Ok(())
}

async fn show_doctor(store: &AppStore, id: &str) -> Result<(), CliError> {
    let detail = DoctorDetail::load(store, id).await?;
    let row = detail.doctor.to_row();
    let rating = detail.doctor.rating.unwrap_or_default();
    println!("{}", render::heading(&text(&row, "name")));
    println!(
        "{}\n",
        render::fields(&[
            ("Email", text(&row, "email")),
            ("Phone", text(&row, "phone_number")),
            ("Specialty", text(&row, "specialty")),
            ("Hospital", text(&row, "hospital")),
            ("Location", location(&row)),
            ("KYC", render::badge(&text(&row, "kyc_status"))),
            ("Active", yes_no(&row, "is_active")),
            ("Visible", yes_no(&row, "is_visible")),
            (
                "Rating",
                format!("{:.1} ({} reviews)", rating.average_rating, rating.total_reviews),
            ),
        ])
    );
    println!("{}", render::heading("Reviews"));
    println!("{}\n", render::table(&reviews_table(&detail.reviews)?));
    println!("{}", render::heading("KYC History"));
    println!("{}", render::table(&kyc_table(&detail.kyc_records)?));
    Ok(())
}

async fn show_hospital(store: &AppStore, id: &str) -> Result<(), CliError> {
    let detail = HospitalDetail::load(store, id).await?;
    let row = detail.hospital.to_row();
    let rating = detail.rating();
    println!("{}", render::heading(&text(&row, "name")));
    println!(
        "{}\n",
        render::fields(&[
            ("Email", text(&row, "email")),
            ("Phone", text(&row, "phone_number")),
            ("Specialties", text(&row, "specialties")),
            ("Location", location(&row)),
            ("KYC", render::badge(&text(&row, "kyc_status"))),
            ("Active", yes_no(&row, "is_active")),
            ("Visible", yes_no(&row, "is_visible")),
            (
                "Rating",
                format!("{:.1} ({} reviews)", rating.average_rating, rating.total_reviews),
            ),
        ])
    );
    println!("{}", render::heading("Reviews"));
    println!("{}\n", render::table(&reviews_table(&detail.reviews)?));
    println!("{}", render::heading("KYC History"));
    println!("{}", render::table(&kyc_table(&detail.kyc_records)?));
    Ok(())
}

async fn show_appointment(store: &AppStore, id: &str) -> Result<(), CliError> {
    let detail = AppointmentDetail::load(store, id).await?;
    let row = detail.appointment.to_row();
    let appointment = &detail.appointment;
    let mut fields = vec![
        ("Doctor", text(&row, "doctor_name")),
        ("Patient", text(&row, "patient_name")),
        ("Date", detail.date()),
        ("Time", detail.time()),
        ("Type", text(&row, "appointment_type")),
        ("Status", render::badge(&text(&row, "status"))),
        ("Reason", text(&row, "reason")),
    ];
    if let Some(notes) = &appointment.notes {
        fields.push(("Notes", notes.clone()));
    }
    if let Some(reason) = &appointment.cancellation_reason {
        fields.push(("Cancelled", reason.clone()));
    }
    println!("{}", render::fields(&fields));
    Ok(())
}

// =============================================================================
// Mutations and catalogues
// =============================================================================

async fn change_kyc(store: &AppStore, subject: KycSubject, args: &KycArgs) -> Result<(), CliError> {
    let mut change = KycChange::new(subject, args.status);
    if let Some(reason) = &args.reason {
        change = change.reason(reason.clone());
    }
    change.validate()?;

    if !args.yes && !confirm(&change.prompt())? {
        return Err(CliError::Aborted);
    }
    let record = change.confirm(store).await?;
    println!("KYC status set to {}.", record.status);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, CliError> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

async fn reviews(store: &AppStore, target: ReviewTarget, id: &str, page: u32) -> Result<(), CliError> {
    let reviews = store
        .query(&Reviews::list(target, id, Some(page), None))
        .await?
        .into_inner();
    println!("{}", render::table(&reviews_table(&reviews)?));
    println!("\n{} review(s), page {}", reviews.count, page);
    Ok(())
}

async fn specialties(store: &AppStore) -> Result<(), CliError> {
    let specialties = store.query(&Specialties::list()).await?.into_inner();
    let columns = vec![
        Column::key("name", "Specialty"),
        Column::key("description", "Description"),
    ];
    let rows = specialties
        .iter()
        .map(|s| {
            Row::new(s.id.to_string())
                .with("name", s.name.as_str())
                .with("description", s.description.clone())
        })
        .collect();
    println!("{}", render::table(&static_table(columns, rows)?));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_session() {
        assert!(!requires_session(&Command::Logout));
        assert!(!requires_session(&Command::Specialties));
        assert!(requires_session(&Command::Dashboard));
    }

    #[test]
    fn test_kyc_table_keeps_missing_reason_empty() {
        let record = KycRecord {
            id: "k1".into(),
            status: medboard_lib::model::KycStatus::Verified,
            reason: None,
            doctor: Some("d1".into()),
            hospital: None,
            created_at: "2025-03-01".into(),
            updated_at: "2025-03-01".into(),
        };
        let table = kyc_table(&[record]).unwrap();
        assert!(table.rows()[0].get("reason").is_null());
        assert_eq!(table.page_rows().len(), 1);
    }
}
