use axum::{
    Extension, Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use database::{
    entities::period,
    services::{
        course::CourseService, instructor::InstructorService, reference::ReferenceService,
        section::SectionService, semester::SemesterService, student::StudentService,
    },
};
use migration::{Migrator, MigratorTrait};
use models::forms::{
    CourseForm, InstructorForm, SectionForm, SemesterForm, StudentForm, YearForm,
};
use sea_orm::{
    ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, QueryFilter,
};
use serde_json::{Value, json};
use server::{AppState, api_router, auth::Claims};
use tower::ServiceExt;

async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

/// The API as seen by a caller holding `permissions`
fn app(db: &DatabaseConnection, permissions: &[&str]) -> Router {
    let claims = Claims {
        sub: Some("registrar".to_string()),
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
    };
    api_router(AppState { db: db.clone() }).layer(Extension(claims))
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, headers, body)
}

/// Seeds CS101 with section A taught in Fall 2019; returns (course id, section id)
async fn seed_section(db: &DatabaseConnection) -> (i32, i32) {
    let year = ReferenceService::create_year(db, YearForm { year: 2019 })
        .await
        .unwrap();
    let fall = period::Entity::find()
        .filter(period::Column::PeriodName.eq("Fall"))
        .one(db)
        .await
        .unwrap()
        .unwrap();
    let semester = SemesterService::create(
        db,
        SemesterForm {
            year_id: year.id,
            period_id: fall.id,
        },
    )
    .await
    .unwrap();
    let course = CourseService::create(
        db,
        CourseForm {
            course_number: "CS101".to_string(),
            course_name: "Intro".to_string(),
        },
    )
    .await
    .unwrap();
    let instructor = InstructorService::create(
        db,
        InstructorForm {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
        },
    )
    .await
    .unwrap();
    let section = SectionService::create(
        db,
        SectionForm {
            section_name: "A".to_string(),
            semester_id: semester.semester.id,
            course_id: course.id,
            instructor_id: instructor.id,
        },
    )
    .await
    .unwrap();

    (course.id, section.section.id)
}

#[tokio::test]
async fn test_missing_claims_is_unauthorized() {
    let db = setup().await;
    let app = api_router(AppState { db });

    let (status, headers, _) = send(app, Method::GET, "/courses", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(headers[header::WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn test_missing_permission_is_checked_before_the_form() {
    let db = setup().await;
    let viewer = app(&db, &["courseInfo.view_course"]);

    let (status, _, _) = send(
        viewer.clone(),
        Method::POST,
        "/courses",
        Some(json!({ "course_number": "", "course_name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, body) = send(viewer, Method::GET, "/courses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_viewing_requires_the_view_permission_of_that_entity() {
    let db = setup().await;
    seed_section(&db).await;
    let app = app(&db, &["courseInfo.view_instructor"]);

    let (status, _, body) = send(app.clone(), Method::GET, "/courses", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(!body.to_string().contains("CS101"));

    let (status, _, _) = send(app, Method::GET, "/instructors", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_course_trims_fields_and_points_at_the_new_row() {
    let db = setup().await;
    let app = app(&db, &["courseInfo.add_course", "courseInfo.view_course"]);

    let (status, headers, body) = send(
        app.clone(),
        Method::POST,
        "/courses",
        Some(json!({ "course_number": "  CS101 ", "course_name": "Intro\t" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["course_number"], "CS101");
    assert_eq!(body["label"], "CS101 - Intro");

    let location = headers[header::LOCATION].to_str().unwrap().to_string();
    assert_eq!(location, format!("/courses/{}", body["id"]));

    let (status, _, detail) = send(app, Method::GET, &location, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["course"]["course_name"], "Intro");
    assert_eq!(detail["sections"], json!([]));
}

#[tokio::test]
async fn test_blank_and_overlong_fields_are_reported_per_field() {
    let db = setup().await;
    let app = app(&db, &["courseInfo.add_instructor"]);

    let (status, _, body) = send(
        app,
        Method::POST,
        "/instructors",
        Some(json!({ "first_name": "   ", "last_name": "x".repeat(46) })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["errors"]["first_name"],
        json!(["This field is required."])
    );
    assert_eq!(
        body["errors"]["last_name"],
        json!(["Ensure this value has at most 45 characters (it has 46)."])
    );
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let db = setup().await;
    let app = app(&db, &["courseInfo.add_course"]);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/courses")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_section_is_a_form_error() {
    let db = setup().await;
    let (course_id, section_id) = seed_section(&db).await;
    let section = SectionService::get(&db, section_id).await.unwrap();
    let app = app(&db, &["courseInfo.add_section"]);

    let (status, _, body) = send(
        app,
        Method::POST,
        "/sections",
        Some(json!({
            "section_name": "A",
            "semester_id": section.semester.semester.id,
            "course_id": course_id,
            "instructor_id": section.instructor.id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["errors"]["__all__"],
        json!(["Section with this Semester, Course and Section name already exists."])
    );
}

#[tokio::test]
async fn test_course_delete_is_refused_while_sections_exist() {
    let db = setup().await;
    let (course_id, section_id) = seed_section(&db).await;
    let app = app(
        &db,
        &[
            "courseInfo.view_course",
            "courseInfo.delete_course",
            "courseInfo.delete_section",
        ],
    );
    let delete_uri = format!("/courses/{course_id}/delete");

    let (status, _, body) = send(app.clone(), Method::GET, &delete_uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["deletable"], false);
    assert_eq!(body["object"]["label"], "CS101 - Intro");
    assert_eq!(body["dependents"][0]["label"], "CS101 - A (2019 - Fall)");

    let (status, _, _) = send(app.clone(), Method::POST, &delete_uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, headers, _) = send(
        app.clone(),
        Method::POST,
        &format!("/sections/{section_id}/delete"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/sections");

    let (status, _, body) = send(app.clone(), Method::GET, &delete_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletable"], true);

    let (status, headers, _) = send(app.clone(), Method::POST, &delete_uri, None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/courses");

    let (status, _, _) = send(app, Method::GET, &format!("/courses/{course_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_instructor_list_is_paginated() {
    let db = setup().await;
    for i in 0..16 {
        InstructorService::create(
            &db,
            InstructorForm {
                first_name: "Ada".to_string(),
                last_name: format!("Lovelace{i:02}"),
            },
        )
        .await
        .unwrap();
    }
    let app = app(&db, &["courseInfo.view_instructor"]);

    let (status, _, body) = send(app.clone(), Method::GET, "/instructors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["instructors"].as_array().unwrap().len(), 15);
    assert_eq!(body["instructors"][0]["label"], "Lovelace00, Ada");
    assert_eq!(body["page"]["num_pages"], 2);
    assert_eq!(body["links"]["last"], "?page=2");
    assert_eq!(body["links"]["first"], Value::Null);

    let (status, _, body) = send(app.clone(), Method::GET, "/instructors?page=last", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"]["number"], 2);
    assert_eq!(body["instructors"][0]["label"], "Lovelace15, Ada");
    assert_eq!(body["links"]["first"], "?page=1");

    for uri in ["/instructors?page=3", "/instructors?page=0", "/instructors?page=abc"] {
        let (status, _, _) = send(app.clone(), Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_student_list_is_paginated_by_25() {
    let db = setup().await;
    for i in 0..26 {
        StudentService::create(
            &db,
            StudentForm {
                first_name: "Alan".to_string(),
                last_name: format!("Turing{i:02}"),
                nickname: String::new(),
            },
        )
        .await
        .unwrap();
    }
    let app = app(&db, &["courseInfo.view_student"]);

    let (status, _, body) = send(app.clone(), Method::GET, "/students", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["students"].as_array().unwrap().len(), 25);
    assert_eq!(body["page"]["per_page"], 25);
    assert_eq!(
        body["links"],
        json!({ "first": null, "previous": null, "next": null, "last": "?page=2" })
    );

    let (status, _, body) = send(app.clone(), Method::GET, "/students?page=last", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["students"].as_array().unwrap().len(), 1);
    assert_eq!(body["students"][0]["label"], "Turing25, Alan");
    assert_eq!(
        body["links"],
        json!({ "first": "?page=1", "previous": null, "next": null, "last": null })
    );

    let (status, _, _) = send(app, Method::GET, "/students?page=3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_rows_are_not_found() {
    let db = setup().await;
    let app = app(
        &db,
        &[
            "courseInfo.view_student",
            "courseInfo.change_student",
            "courseInfo.delete_registration",
        ],
    );

    let (status, _, _) = send(app.clone(), Method::GET, "/students/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(
        app.clone(),
        Method::PUT,
        "/students/99",
        Some(json!({ "first_name": "Alan", "last_name": "Turing" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(app, Method::POST, "/registrations/99/delete", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_periods_are_listed_in_sequence_order() {
    let db = setup().await;
    let app = app(&db, &["courseInfo.view_period"]);

    let (status, _, body) = send(app, Method::GET, "/periods", None).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["period_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Spring", "Summer", "Fall", "TemporaryValue"]);
}
