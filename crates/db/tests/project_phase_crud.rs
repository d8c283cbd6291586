//! Database-level tests for project creation and versioned phase updates.
//!
//! These run against a real Postgres instance (`DATABASE_URL`), so they are
//! ignored by default; run with `cargo test -- --ignored`.

use jupiter_db::models::phase::{NewPhase, UpdatePhase};
use jupiter_db::models::profile::CreateProfile;
use jupiter_db::models::project::{NewProject, ProjectQuery};
use jupiter_db::models::time_entry::NewTimeEntry;
use jupiter_db::repositories::{PhaseRepo, ProfileRepo, ProjectRepo, TimeEntryRepo};
use sqlx::PgPool;

async fn seed_staff(pool: &PgPool) -> i64 {
    let profile = ProfileRepo::create(
        pool,
        &CreateProfile {
            email: "drafter@jupiter.test".into(),
            full_name: "Test Drafter".into(),
            role: "staff_drafter".into(),
            password_hash: Some("$argon2id$test".into()),
        },
    )
    .await
    .expect("profile creation should succeed");
    profile.id
}

fn new_project(created_by: i64, number: &str) -> NewProject {
    NewProject {
        project_number: number.into(),
        project_name: "Smith Residence".into(),
        project_type: "residential_single".into(),
        address: "123 Main Street".into(),
        client_id: None,
        assigned_staff_id: None,
        project_manager_id: None,
        lead_drafter_id: None,
        start_date: None,
        deadline: None,
        status: "Draft".into(),
        notes: None,
        template_used: Some("standard".into()),
        created_by,
    }
}

fn two_phases() -> Vec<NewPhase> {
    vec![
        NewPhase {
            name: "Preliminary Design".into(),
            code: "PD".into(),
            estimated_hours: 40.0,
            description: None,
            assigned_staff_id: None,
            start_date: None,
            end_date: None,
        },
        NewPhase {
            name: "Design Development".into(),
            code: "DD".into(),
            estimated_hours: 80.0,
            description: None,
            assigned_staff_id: None,
            start_date: None,
            end_date: None,
        },
    ]
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn create_inserts_project_and_ordered_phases(pool: PgPool) {
    let staff = seed_staff(&pool).await;
    let project = ProjectRepo::create(&pool, &new_project(staff, "PRJ-2026-001"), &two_phases())
        .await
        .expect("create should succeed");

    assert_eq!(project.project_number, "PRJ-2026-001");
    assert_eq!(project.current_phase_index, 0);

    let phases = PhaseRepo::list_for_project(&pool, project.id)
        .await
        .expect("listing should succeed");
    assert_eq!(phases.len(), 2);
    assert_eq!(phases[0].phase_index, 0);
    assert_eq!(phases[0].code, "PD");
    assert_eq!(phases[1].phase_index, 1);
    assert_eq!(phases[0].status, "pending");
    assert_eq!(phases[0].version, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn stale_version_update_affects_no_rows(pool: PgPool) {
    let staff = seed_staff(&pool).await;
    let project = ProjectRepo::create(&pool, &new_project(staff, "PRJ-2026-002"), &two_phases())
        .await
        .expect("create should succeed");

    let edit = UpdatePhase {
        status: Some("in_progress".into()),
        completion: Some(25),
        actual_hours: None,
        assigned_staff_id: None,
        notes: None,
        description: None,
        start_date: None,
        end_date: None,
        expected_version: 1,
    };

    // First write with the current version succeeds and bumps the version.
    let updated = PhaseRepo::update(&pool, project.id, 0, &edit)
        .await
        .expect("update should succeed")
        .expect("row should match");
    assert_eq!(updated.version, 2);
    assert_eq!(updated.status, "in_progress");

    // Replaying the same expected_version now matches nothing.
    let stale = PhaseRepo::update(&pool, project.id, 0, &edit)
        .await
        .expect("update should succeed");
    assert!(stale.is_none(), "stale write must not apply");

    // Untouched fields survived the first edit.
    let phase = PhaseRepo::find(&pool, project.id, 0)
        .await
        .expect("find should succeed")
        .expect("phase should exist");
    assert_eq!(phase.name, "Preliminary Design");
    assert_eq!(phase.completion, 25);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn logging_time_increments_actual_hours_atomically(pool: PgPool) {
    let staff = seed_staff(&pool).await;
    let project = ProjectRepo::create(&pool, &new_project(staff, "PRJ-2026-003"), &two_phases())
        .await
        .expect("create should succeed");

    let entry = NewTimeEntry {
        project_id: project.id,
        phase_index: 1,
        staff_id: staff,
        date: chrono::NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        hours: 6.5,
        description: Some("Floor plan revisions".into()),
    };
    TimeEntryRepo::log(&pool, &entry).await.expect("log should succeed");
    TimeEntryRepo::log(&pool, &entry).await.expect("log should succeed");

    let phase = PhaseRepo::find(&pool, project.id, 1)
        .await
        .expect("find should succeed")
        .expect("phase should exist");
    assert!((phase.actual_hours - 13.0).abs() < f64::EPSILON * 100.0);

    let entries = TimeEntryRepo::list_for_phase(&pool, project.id, 1)
        .await
        .expect("listing should succeed");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].staff_name, "Test Drafter");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn list_filters_by_status_and_search(pool: PgPool) {
    let staff = seed_staff(&pool).await;
    ProjectRepo::create(&pool, &new_project(staff, "PRJ-2026-004"), &[])
        .await
        .expect("create should succeed");
    let mut pending = new_project(staff, "PRJ-2026-005");
    pending.project_name = "Harbor Office Tower".into();
    pending.status = "Pending".into();
    ProjectRepo::create(&pool, &pending, &[])
        .await
        .expect("create should succeed");

    let by_status = ProjectRepo::list(
        &pool,
        &ProjectQuery {
            status: Some("Pending".into()),
            ..Default::default()
        },
    )
    .await
    .expect("list should succeed");
    assert_eq!(by_status.len(), 1);
    assert_eq!(by_status[0].project_number, "PRJ-2026-005");

    let by_search = ProjectRepo::list(
        &pool,
        &ProjectQuery {
            search: Some("harbor".into()),
            ..Default::default()
        },
    )
    .await
    .expect("list should succeed");
    assert_eq!(by_search.len(), 1);

    let all = ProjectRepo::list(&pool, &ProjectQuery::default())
        .await
        .expect("list should succeed");
    assert_eq!(all.len(), 2);
}
