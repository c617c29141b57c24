use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::display::{format_appointment, format_day, format_time};
use crate::error::PlannerError;
use crate::roster::{append_record_to_csv, validate_record, PersonRecord, Role, Roster};
use crate::schedule::{find_appointments, BookingKind, MatchOutcome, SlotGrid, UnscheduledRequest};

// Roster and last timetable live in memory only
pub struct AppState {
    pub roster: Mutex<Roster>,
    pub timetable: Mutex<Option<TimetableResponse>>,
    pub config: PlannerConfig,
    /// Created records are also appended here when set.
    pub roster_file: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: PlannerConfig, roster: Roster, roster_file: Option<PathBuf>) -> Self {
        Self {
            roster: Mutex::new(roster),
            timetable: Mutex::new(None),
            config,
            roster_file,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct PlanRequest {
    max_classrooms: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub day: String,
    pub time: String,
    pub teacher: String,
    pub student: String,
    pub subject: String,
    pub kind: BookingKind,
    pub line: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableResponse {
    pub max_classrooms: u32,
    pub appointments: Vec<TimetableEntry>,
    pub unpaired: Vec<String>,
    pub unscheduled: Vec<UnscheduledRequest>,
}

impl TimetableResponse {
    fn from_outcome(outcome: &MatchOutcome, max_classrooms: u32) -> Self {
        Self {
            max_classrooms,
            appointments: outcome
                .appointments
                .iter()
                .map(|a| TimetableEntry {
                    day: format_day(a.slot.day).to_string(),
                    time: format_time(a.slot.time),
                    teacher: a.teacher.clone(),
                    student: a.student.clone(),
                    subject: a.subject.clone(),
                    kind: a.kind,
                    line: format_appointment(a),
                })
                .collect(),
            unpaired: outcome.unpaired.iter().map(format_appointment).collect(),
            unscheduled: outcome.unscheduled.clone(),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| actix_web::error::ErrorInternalServerError("state lock poisoned"))
}

fn bad_request(e: &PlannerError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({"success": false, "error": e.to_string()}))
}

async fn list_people(role: Role, state: &AppState) -> Result<HttpResponse> {
    let roster = lock(&state.roster)?;
    let people = match role {
        Role::Staff => &roster.staff,
        Role::Client => &roster.clients,
    };
    Ok(HttpResponse::Ok().json(people))
}

async fn create_person(role: Role, record: PersonRecord, state: &AppState) -> Result<HttpResponse> {
    if let Err(e) = validate_record(&record) {
        return Ok(bad_request(&e));
    }
    let record = record.normalized();

    let mut roster = lock(&state.roster)?;

    // The roster only changes once the record is safely on disk.
    if let Some(path) = &state.roster_file {
        if let Err(e) = append_record_to_csv(role, &record, path) {
            tracing::error!(error = %e, path = %path.display(), "Failed to append record to roster file");
            return Err(actix_web::error::ErrorInternalServerError(format!("Failed to save record: {}", e)));
        }
    }

    if let Err(e) = roster.upsert(role, record) {
        return Ok(bad_request(&e));
    }

    tracing::info!(role = role.as_str(), "Roster record saved");
    Ok(HttpResponse::Created().json(serde_json::json!({"success": true})))
}

async fn list_staff(state: web::Data<AppState>) -> Result<HttpResponse> {
    list_people(Role::Staff, &state).await
}

async fn create_staff(req: web::Json<PersonRecord>, state: web::Data<AppState>) -> Result<HttpResponse> {
    create_person(Role::Staff, req.into_inner(), &state).await
}

async fn list_clients(state: web::Data<AppState>) -> Result<HttpResponse> {
    list_people(Role::Client, &state).await
}

async fn create_client(req: web::Json<PersonRecord>, state: web::Data<AppState>) -> Result<HttpResponse> {
    create_person(Role::Client, req.into_inner(), &state).await
}

// Runs the matcher over the current roster
async fn plan(req: Option<web::Json<PlanRequest>>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let req = req.map(|r| r.into_inner()).unwrap_or_default();
    let max_classrooms = req.max_classrooms.unwrap_or(state.config.max_classrooms);

    let (teachers, students) = {
        let roster = lock(&state.roster)?;
        match roster.students() {
            Ok(students) => (roster.teachers(), students),
            Err(e) => return Ok(bad_request(&e)),
        }
    };

    let outcome = SlotGrid::from_config(&state.config.grid)
        .and_then(|grid| find_appointments(&teachers, &students, &grid, max_classrooms));

    match outcome {
        Ok(outcome) => {
            let timetable = TimetableResponse::from_outcome(&outcome, max_classrooms);
            *lock(&state.timetable)? = Some(timetable.clone());
            Ok(HttpResponse::Ok().json(timetable))
        }
        Err(e) => Ok(bad_request(&e)),
    }
}

async fn get_timetable(state: web::Data<AppState>) -> Result<HttpResponse> {
    let timetable = lock(&state.timetable)?;
    match timetable.as_ref() {
        Some(timetable) => Ok(HttpResponse::Ok().json(timetable)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No timetable available"}))),
    }
}

/// Registers every API route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/staff", web::get().to(list_staff))
        .route("/api/staff", web::post().to(create_staff))
        .route("/api/clients", web::get().to(list_clients))
        .route("/api/clients", web::post().to(create_client))
        .route("/api/plan", web::post().to(plan))
        .route("/api/timetable", web::get().to(get_timetable));
}

pub async fn start_server(port: u16, state: AppState) -> std::io::Result<()> {
    let app_state = web::Data::new(state);

    tracing::info!(port, "Starting web server");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
