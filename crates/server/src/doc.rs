use crate::routes::{
    course, health, instructor, reference, registration, section, semester, student,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        reference::list_years,
        reference::create_year,
        reference::list_periods,
        course::list_courses,
        course::get_course,
        course::create_course,
        course::update_course,
        course::check_delete_course,
        course::delete_course,
        instructor::list_instructors,
        instructor::get_instructor,
        instructor::create_instructor,
        instructor::update_instructor,
        instructor::check_delete_instructor,
        instructor::delete_instructor,
        student::list_students,
        student::get_student,
        student::create_student,
        student::update_student,
        student::check_delete_student,
        student::delete_student,
        semester::list_semesters,
        semester::get_semester,
        semester::create_semester,
        semester::update_semester,
        semester::check_delete_semester,
        semester::delete_semester,
        section::list_sections,
        section::get_section,
        section::create_section,
        section::update_section,
        section::check_delete_section,
        section::delete_section,
        registration::list_registrations,
        registration::get_registration,
        registration::create_registration,
        registration::update_registration,
        registration::check_delete_registration,
        registration::delete_registration
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Reference", description = "Years and periods"),
        (name = "Courses", description = "Course related endpoints"),
        (name = "Instructors", description = "Instructor related endpoints"),
        (name = "Students", description = "Student related endpoints"),
        (name = "Semesters", description = "Semester related endpoints"),
        (name = "Sections", description = "Section related endpoints"),
        (name = "Registrations", description = "Registration related endpoints"),
    ),
    info(
        title = "Course Registration API",
        version = "1.0.0",
        description = "Manage courses, instructors, students, semesters, sections and registrations",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
