use database::{
    entities::{Course, Instructor, Section, period},
    error::ServiceError,
    services::{
        Deletion, course::CourseService, instructor::InstructorService,
        reference::ReferenceService, registration::RegistrationService, section::SectionService,
        semester::SemesterService, student::StudentService, views::SemesterView,
    },
};
use migration::{Migrator, MigratorTrait};
use models::{
    form_errors::NON_FIELD_ERRORS,
    forms::{
        CourseForm, INVALID_CHOICE, InstructorForm, RegistrationForm, SectionForm, SemesterForm,
        StudentForm, YearForm,
    },
    pagination::PageRequest,
};
use sea_orm::{
    ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter,
};

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

async fn fall_semester(db: &DatabaseConnection, year: i32) -> SemesterView {
    let year = ReferenceService::create_year(db, YearForm { year }).await.unwrap();
    let fall = period::Entity::find()
        .filter(period::Column::PeriodName.eq("Fall"))
        .one(db)
        .await
        .unwrap()
        .unwrap();

    SemesterService::create(
        db,
        SemesterForm {
            year_id: year.id,
            period_id: fall.id,
        },
    )
    .await
    .unwrap()
}

fn instructor_form(first: &str, last: &str) -> InstructorForm {
    InstructorForm {
        first_name: first.to_string(),
        last_name: last.to_string(),
    }
}

fn course_form(number: &str, name: &str) -> CourseForm {
    CourseForm {
        course_number: number.to_string(),
        course_name: name.to_string(),
    }
}

fn student_form(first: &str, last: &str, nickname: &str) -> StudentForm {
    StudentForm {
        first_name: first.to_string(),
        last_name: last.to_string(),
        nickname: nickname.to_string(),
    }
}

fn non_field_errors(err: ServiceError) -> Vec<String> {
    match err {
        ServiceError::Invalid(errors) => errors.get(NON_FIELD_ERRORS).unwrap().to_vec(),
        other => panic!("expected a form error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_text_fields_are_trimmed_on_create_and_update() {
    let db = setup().await;

    let instructor = InstructorService::create(&db, instructor_form("  Ada ", " Lovelace\t"))
        .await
        .unwrap();
    assert_eq!(instructor.first_name, "Ada");
    assert_eq!(instructor.last_name, "Lovelace");

    let updated =
        InstructorService::update(&db, instructor.id, instructor_form(" Augusta ", "Lovelace "))
            .await
            .unwrap();
    assert_eq!(updated.first_name, "Augusta");
    assert_eq!(updated.last_name, "Lovelace");

    let course = CourseService::create(&db, course_form(" CS101 ", "  Intro  "))
        .await
        .unwrap();
    assert_eq!(course.course_number, "CS101");
    assert_eq!(course.course_name, "Intro");

    let student = StudentService::create(&db, student_form(" Grace", "Hopper ", "  Amazing "))
        .await
        .unwrap();
    assert_eq!(student.label(), "Hopper, Grace (Amazing)");

    let semester = fall_semester(&db, 2019).await;
    let section = SectionService::create(
        &db,
        SectionForm {
            section_name: "  A ".to_string(),
            semester_id: semester.semester.id,
            course_id: course.id,
            instructor_id: instructor.id,
        },
    )
    .await
    .unwrap();
    assert_eq!(section.section.section_name, "A");
    assert_eq!(section.label(), "CS101 - A (2019 - Fall)");
}

#[tokio::test]
async fn test_duplicate_section_is_rejected() {
    let db = setup().await;
    let semester = fall_semester(&db, 2020).await;
    let course = CourseService::create(&db, course_form("CS101", "Intro"))
        .await
        .unwrap();
    let instructor = InstructorService::create(&db, instructor_form("Alan", "Turing"))
        .await
        .unwrap();

    let form = SectionForm {
        section_name: "A".to_string(),
        semester_id: semester.semester.id,
        course_id: course.id,
        instructor_id: instructor.id,
    };
    SectionService::create(&db, form.clone()).await.unwrap();

    // Padding is stripped before the uniqueness check
    let err = SectionService::create(
        &db,
        SectionForm {
            section_name: " A ".to_string(),
            ..form
        },
    )
    .await
    .unwrap_err();
    assert_eq!(
        non_field_errors(err),
        vec!["Section with this Semester, Course and Section name already exists."]
    );
    assert_eq!(Section::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_may_keep_its_own_unique_key() {
    let db = setup().await;
    let course = CourseService::create(&db, course_form("CS101", "Intro"))
        .await
        .unwrap();
    CourseService::create(&db, course_form("CS102", "Data Structures"))
        .await
        .unwrap();

    CourseService::update(&db, course.id, course_form("CS101", "Intro"))
        .await
        .unwrap();

    let err = CourseService::update(&db, course.id, course_form("CS102", "Data Structures"))
        .await
        .unwrap_err();
    assert_eq!(
        non_field_errors(err),
        vec!["Course with this Course number and Course name already exists."]
    );
}

#[tokio::test]
async fn test_missing_references_are_invalid_choices() {
    let db = setup().await;
    let course = CourseService::create(&db, course_form("CS101", "Intro"))
        .await
        .unwrap();

    let err = SectionService::create(
        &db,
        SectionForm {
            section_name: "A".to_string(),
            semester_id: 404,
            course_id: course.id,
            instructor_id: 405,
        },
    )
    .await
    .unwrap_err();

    let ServiceError::Invalid(errors) = err else {
        panic!("expected a form error");
    };
    assert_eq!(errors.get("semester_id"), Some(&[INVALID_CHOICE.to_string()][..]));
    assert_eq!(errors.get("instructor_id"), Some(&[INVALID_CHOICE.to_string()][..]));
    assert_eq!(errors.get("course_id"), None);
}

#[tokio::test]
async fn test_course_with_section_cannot_be_deleted() {
    let db = setup().await;
    let semester = fall_semester(&db, 2019).await;
    let course = CourseService::create(&db, course_form("CS101", "Intro"))
        .await
        .unwrap();
    let instructor = InstructorService::create(&db, instructor_form("Alan", "Turing"))
        .await
        .unwrap();
    let section = SectionService::create(
        &db,
        SectionForm {
            section_name: "A".to_string(),
            semester_id: semester.semester.id,
            course_id: course.id,
            instructor_id: instructor.id,
        },
    )
    .await
    .unwrap();

    let check = CourseService::check_delete(&db, course.id).await.unwrap();
    let Deletion::Blocked { object, dependents } = check else {
        panic!("expected the delete check to be refused");
    };
    assert_eq!(object, course);
    assert_eq!(dependents, vec![section.clone()]);

    // The commit is refused as well and leaves every row in place
    let deletion = CourseService::delete(&db, course.id).await.unwrap();
    assert!(deletion.is_blocked());
    assert_eq!(Course::find().count(&db).await.unwrap(), 1);
    assert_eq!(Section::find().count(&db).await.unwrap(), 1);

    // The instructor teaching the section is protected too
    let deletion = InstructorService::delete(&db, instructor.id).await.unwrap();
    assert!(deletion.is_blocked());
    assert_eq!(Instructor::find().count(&db).await.unwrap(), 1);

    // Once the section is gone the course can be deleted
    assert!(!SectionService::delete(&db, section.section.id)
        .await
        .unwrap()
        .is_blocked());
    assert_eq!(
        CourseService::delete(&db, course.id).await.unwrap(),
        Deletion::Allowed(course)
    );
    assert_eq!(Course::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_refusal_lists_every_registration() {
    let db = setup().await;
    let semester = fall_semester(&db, 2021).await;
    let course = CourseService::create(&db, course_form("CS101", "Intro"))
        .await
        .unwrap();
    let instructor = InstructorService::create(&db, instructor_form("Alan", "Turing"))
        .await
        .unwrap();
    let section = SectionService::create(
        &db,
        SectionForm {
            section_name: "A".to_string(),
            semester_id: semester.semester.id,
            course_id: course.id,
            instructor_id: instructor.id,
        },
    )
    .await
    .unwrap();

    let mut registration_ids = vec![];
    for (first, last) in [("Grace", "Hopper"), ("Edsger", "Dijkstra"), ("Barbara", "Liskov")] {
        let student = StudentService::create(&db, student_form(first, last, ""))
            .await
            .unwrap();
        let registration = RegistrationService::create(
            &db,
            RegistrationForm {
                student_id: student.id,
                section_id: section.section.id,
            },
        )
        .await
        .unwrap();
        registration_ids.push(registration.registration.id);
    }

    let Deletion::Blocked { dependents, .. } =
        SectionService::delete(&db, section.section.id).await.unwrap()
    else {
        panic!("expected the section delete to be refused");
    };

    let labels: Vec<_> = dependents.iter().map(|r| r.label()).collect();
    assert_eq!(
        labels,
        vec![
            "CS101 - A (2021 - Fall) / Dijkstra, Edsger",
            "CS101 - A (2021 - Fall) / Hopper, Grace",
            "CS101 - A (2021 - Fall) / Liskov, Barbara",
        ]
    );

    let mut listed: Vec<_> = dependents.iter().map(|r| r.registration.id).collect();
    listed.sort();
    assert_eq!(listed, registration_ids);
}

#[tokio::test]
async fn test_deleting_missing_row_is_not_found() {
    let db = setup().await;

    assert!(matches!(
        StudentService::check_delete(&db, 1).await,
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        SemesterService::delete(&db, 1).await,
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        RegistrationService::delete(&db, 1).await,
        Err(ServiceError::NotFound)
    ));
}

#[tokio::test]
async fn test_instructor_pages() {
    let db = setup().await;
    for i in 0..16 {
        InstructorService::create(&db, instructor_form("Pat", &format!("Turing{i:02}")))
            .await
            .unwrap();
    }

    let first = InstructorService::list_page(&db, PageRequest::First)
        .await
        .unwrap();
    assert_eq!(first.items.len(), 15);
    assert_eq!(first.items[0].last_name, "Turing00");
    assert_eq!(first.page.num_pages, 2);

    let last = InstructorService::list_page(&db, PageRequest::Last)
        .await
        .unwrap();
    assert_eq!(last.page.number, 2);
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].last_name, "Turing15");

    assert!(matches!(
        InstructorService::list_page(&db, PageRequest::Number(3)).await,
        Err(ServiceError::NotFound)
    ));
}

#[tokio::test]
async fn test_student_pages_order_by_name_then_nickname() {
    let db = setup().await;
    for i in 0..24 {
        StudentService::create(&db, student_form("Grace", &format!("Hopper{i:02}"), ""))
            .await
            .unwrap();
    }
    for nickname in ["kz2", "kz1"] {
        StudentService::create(&db, student_form("Konrad", "Zuse", nickname))
            .await
            .unwrap();
    }

    let first = StudentService::list_page(&db, PageRequest::First)
        .await
        .unwrap();
    assert_eq!(first.items.len(), 25);
    assert_eq!(first.page.num_pages, 2);
    assert_eq!(first.items[0].last_name, "Hopper00");
    assert_eq!(first.items[24].label(), "Zuse, Konrad (kz1)");

    let last = StudentService::list_page(&db, PageRequest::Last)
        .await
        .unwrap();
    assert_eq!(last.page.number, 2);
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].label(), "Zuse, Konrad (kz2)");

    assert!(matches!(
        StudentService::list_page(&db, PageRequest::Number(3)).await,
        Err(ServiceError::NotFound)
    ));
}

#[tokio::test]
async fn test_semesters_are_listed_in_calendar_order() {
    let db = setup().await;
    let year = ReferenceService::create_year(&db, YearForm { year: 2019 })
        .await
        .unwrap();
    let periods = ReferenceService::list_periods(&db).await.unwrap();
    let names: Vec<_> = periods.iter().map(|p| p.period_name.as_str()).collect();
    assert_eq!(names, vec!["Spring", "Summer", "Fall", "TemporaryValue"]);

    // Created out of order on purpose
    for period in periods.iter().rev() {
        SemesterService::create(
            &db,
            SemesterForm {
                year_id: year.id,
                period_id: period.id,
            },
        )
        .await
        .unwrap();
    }

    let labels: Vec<_> = SemesterService::list(&db)
        .await
        .unwrap()
        .iter()
        .map(SemesterView::label)
        .collect();
    assert_eq!(
        labels,
        vec![
            "2019 - Spring",
            "2019 - Summer",
            "2019 - Fall",
            "2019 - TemporaryValue",
        ]
    );

    let err = ReferenceService::create_year(&db, YearForm { year: 2019 })
        .await
        .unwrap_err();
    assert_eq!(non_field_errors(err), vec!["Year with this Year already exists."]);
}
