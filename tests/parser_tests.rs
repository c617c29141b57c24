mod common;

use std::path::PathBuf;

use chronoplan::parser::{load_roster, load_roster_from_reader};
use chronoplan::roster::{append_record_to_csv, PersonRecord, Role};
use chronoplan::schedule::{find_appointments, Slot};

use common::reference_grid;

fn temp_csv(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("chronoplan-{}-{}.csv", std::process::id(), name));
    let _ = std::fs::remove_file(&path);
    path
}

const ROSTER: &str = "\
role,name,services,availability
teacher,Ana,Math;Physics,Mon 13:45;Mon 14:30;Mon 15:15
staff,Ben,English,Mon 14:30
student,Cy,Math;English,Monday 13:45;Monday 14:30
client,Dee,History,Tue 16:00;bad entry
admin,Eve,Math,Mon 13:45
student,,Math,Mon 13:45
student,Fay,,Mon 13:45
";

#[test]
fn test_load_roster_from_csv_text() {
    let roster = load_roster_from_reader(ROSTER.as_bytes()).unwrap();

    let staff: Vec<&str> = roster.staff.iter().map(|r| r.name.as_str()).collect();
    let clients: Vec<&str> = roster.clients.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(staff, vec!["Ana", "Ben"]);
    assert_eq!(clients, vec!["Cy", "Dee"]);

    assert_eq!(roster.staff[0].services, vec!["Math".to_string(), "Physics".to_string()]);
    assert_eq!(
        roster.staff[0].availability,
        vec![Slot::new(0, 1345), Slot::new(0, 1430), Slot::new(0, 1515)]
    );
    assert_eq!(roster.clients[1].availability, vec![Slot::new(1, 1600)]);

    // Ana teaches two subjects, so she appears as two teachers.
    assert_eq!(roster.teachers().len(), 3);
}

#[test]
fn test_columns_follow_header_order() {
    let csv = "name,availability,role,services\nAna,Wed 09:00,staff,Math\n";
    let roster = load_roster_from_reader(csv.as_bytes()).unwrap();
    assert_eq!(roster.staff.len(), 1);
    assert_eq!(roster.staff[0].availability, vec![Slot::new(2, 900)]);
}

#[test]
fn test_later_row_replaces_earlier() {
    let csv = "role,name,services,availability\nstudent,Cy,Math,Mon 13:45\nstudent,Cy,Art,Tue 13:45\n";
    let roster = load_roster_from_reader(csv.as_bytes()).unwrap();
    assert_eq!(roster.clients.len(), 1);
    assert_eq!(roster.clients[0].services, vec!["Art".to_string()]);
}

#[test]
fn test_loaded_roster_plans() {
    let roster = load_roster_from_reader(ROSTER.as_bytes()).unwrap();
    let outcome = find_appointments(&roster.teachers(), &roster.students().unwrap(), &reference_grid(), 2).unwrap();

    let lines: Vec<(String, String, Slot)> = outcome
        .appointments
        .iter()
        .map(|a| (a.teacher.clone(), a.subject.clone(), a.slot))
        .collect();
    assert_eq!(
        lines,
        vec![
            ("Ana".to_string(), "Math".to_string(), Slot::new(0, 1345)),
            ("Ben".to_string(), "English".to_string(), Slot::new(0, 1430)),
        ]
    );
}

#[test]
fn test_appended_records_load_back() {
    let path = temp_csv("append");

    let staff = PersonRecord {
        name: "Ana".to_string(),
        services: vec!["Math".to_string()],
        availability: vec![Slot::new(0, 1430), Slot::new(0, 1345)],
    };
    let client = PersonRecord {
        name: "Cy".to_string(),
        services: vec!["Math".to_string(), "English".to_string()],
        availability: vec![Slot::new(4, 1730)],
    };
    append_record_to_csv(Role::Staff, &staff, &path).unwrap();
    append_record_to_csv(Role::Client, &client, &path).unwrap();

    let roster = load_roster(&path).unwrap();
    assert_eq!(roster.staff.len(), 1);
    assert_eq!(roster.staff[0].availability, vec![Slot::new(0, 1345), Slot::new(0, 1430)]);
    assert_eq!(roster.clients, vec![client]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(load_roster(temp_csv("missing")).is_err());
}
