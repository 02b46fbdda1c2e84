//! Rows joined with the rows they reference, as the list and detail
//! endpoints display them.

use crate::entities::{course, instructor, period, registration, section, semester, student, year};
use futures::try_join;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct SemesterView {
    pub semester: semester::Model,
    pub year: year::Model,
    pub period: period::Model,
}

impl SemesterView {
    /// e.g. "2019 - Fall"
    pub fn label(&self) -> String {
        format!("{} - {}", self.year.year, self.period.period_name)
    }

    pub fn sort_key(&self) -> (i32, i32) {
        (self.year.year, self.period.period_sequence)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub section: section::Model,
    pub course: course::Model,
    pub semester: SemesterView,
    pub instructor: instructor::Model,
}

impl SectionView {
    /// e.g. "CS101 - A (2019 - Fall)"
    pub fn label(&self) -> String {
        format!(
            "{} - {} ({})",
            self.course.course_number,
            self.section.section_name,
            self.semester.label()
        )
    }

    pub fn sort_key(&self) -> (&str, &str, (i32, i32)) {
        (
            &self.course.course_number,
            &self.section.section_name,
            self.semester.sort_key(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationView {
    pub registration: registration::Model,
    pub section: SectionView,
    pub student: student::Model,
}

impl RegistrationView {
    pub fn label(&self) -> String {
        format!("{} / {}", self.section.label(), self.student.label())
    }
}

fn missing(table: &str, id: i32) -> DbErr {
    DbErr::RecordNotFound(format!("{table} row {id} is referenced but missing"))
}

fn unique_ids(ids: impl IntoIterator<Item = i32>) -> Vec<i32> {
    ids.into_iter().collect::<HashSet<_>>().into_iter().collect()
}

/// Joins semesters with their year and period, in default semester order
pub async fn load_semesters<C: ConnectionTrait>(
    conn: &C,
    semesters: Vec<semester::Model>,
) -> Result<Vec<SemesterView>, DbErr> {
    if semesters.is_empty() {
        return Ok(vec![]);
    }

    // Batch fetch the referenced years and periods
    let (years, periods) = try_join!(
        year::Entity::find()
            .filter(year::Column::Id.is_in(unique_ids(semesters.iter().map(|s| s.year_id))))
            .all(conn),
        period::Entity::find()
            .filter(period::Column::Id.is_in(unique_ids(semesters.iter().map(|s| s.period_id))))
            .all(conn),
    )?;
    let years: HashMap<i32, year::Model> = years.into_iter().map(|y| (y.id, y)).collect();
    let periods: HashMap<i32, period::Model> = periods.into_iter().map(|p| (p.id, p)).collect();

    let mut views = semesters
        .into_iter()
        .map(|semester| {
            let year = years
                .get(&semester.year_id)
                .cloned()
                .ok_or_else(|| missing("years", semester.year_id))?;
            let period = periods
                .get(&semester.period_id)
                .cloned()
                .ok_or_else(|| missing("periods", semester.period_id))?;

            Ok(SemesterView {
                semester,
                year,
                period,
            })
        })
        .collect::<Result<Vec<_>, DbErr>>()?;

    views.sort_by_key(SemesterView::sort_key);
    Ok(views)
}

/// Joins sections with their course, semester and instructor, in default section order
pub async fn load_sections<C: ConnectionTrait>(
    conn: &C,
    sections: Vec<section::Model>,
) -> Result<Vec<SectionView>, DbErr> {
    if sections.is_empty() {
        return Ok(vec![]);
    }

    let (courses, instructors, semester_models) = try_join!(
        course::Entity::find()
            .filter(course::Column::Id.is_in(unique_ids(sections.iter().map(|s| s.course_id))))
            .all(conn),
        instructor::Entity::find()
            .filter(
                instructor::Column::Id
                    .is_in(unique_ids(sections.iter().map(|s| s.instructor_id))),
            )
            .all(conn),
        semester::Entity::find()
            .filter(
                semester::Column::Id.is_in(unique_ids(sections.iter().map(|s| s.semester_id))),
            )
            .all(conn),
    )?;
    let courses: HashMap<i32, course::Model> = courses.into_iter().map(|c| (c.id, c)).collect();
    let instructors: HashMap<i32, instructor::Model> =
        instructors.into_iter().map(|i| (i.id, i)).collect();
    let semesters: HashMap<i32, SemesterView> = load_semesters(conn, semester_models)
        .await?
        .into_iter()
        .map(|s| (s.semester.id, s))
        .collect();

    let mut views = sections
        .into_iter()
        .map(|section| {
            let course = courses
                .get(&section.course_id)
                .cloned()
                .ok_or_else(|| missing("courses", section.course_id))?;
            let semester = semesters
                .get(&section.semester_id)
                .cloned()
                .ok_or_else(|| missing("semesters", section.semester_id))?;
            let instructor = instructors
                .get(&section.instructor_id)
                .cloned()
                .ok_or_else(|| missing("instructors", section.instructor_id))?;

            Ok(SectionView {
                section,
                course,
                semester,
                instructor,
            })
        })
        .collect::<Result<Vec<_>, DbErr>>()?;

    views.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    Ok(views)
}

/// Joins registrations with their section and student, ordered by section then student
pub async fn load_registrations<C: ConnectionTrait>(
    conn: &C,
    registrations: Vec<registration::Model>,
) -> Result<Vec<RegistrationView>, DbErr> {
    if registrations.is_empty() {
        return Ok(vec![]);
    }

    let students: HashMap<i32, student::Model> = student::Entity::find()
        .filter(
            student::Column::Id.is_in(unique_ids(registrations.iter().map(|r| r.student_id))),
        )
        .all(conn)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let section_models = section::Entity::find()
        .filter(
            section::Column::Id.is_in(unique_ids(registrations.iter().map(|r| r.section_id))),
        )
        .all(conn)
        .await?;
    let sections: HashMap<i32, SectionView> = load_sections(conn, section_models)
        .await?
        .into_iter()
        .map(|s| (s.section.id, s))
        .collect();

    let mut views = registrations
        .into_iter()
        .map(|registration| {
            let section = sections
                .get(&registration.section_id)
                .cloned()
                .ok_or_else(|| missing("sections", registration.section_id))?;
            let student = students
                .get(&registration.student_id)
                .cloned()
                .ok_or_else(|| missing("students", registration.student_id))?;

            Ok(RegistrationView {
                registration,
                section,
                student,
            })
        })
        .collect::<Result<Vec<_>, DbErr>>()?;

    views.sort_by(|a, b| {
        a.section
            .sort_key()
            .cmp(&b.section.sort_key())
            .then_with(|| a.student.sort_key().cmp(&b.student.sort_key()))
    });
    Ok(views)
}

/// Joins a single semester
pub async fn load_semester<C: ConnectionTrait>(
    conn: &C,
    semester: semester::Model,
) -> Result<SemesterView, DbErr> {
    let id = semester.id;
    load_semesters(conn, vec![semester])
        .await?
        .pop()
        .ok_or_else(|| missing("semesters", id))
}

/// Joins a single section
pub async fn load_section<C: ConnectionTrait>(
    conn: &C,
    section: section::Model,
) -> Result<SectionView, DbErr> {
    let id = section.id;
    load_sections(conn, vec![section])
        .await?
        .pop()
        .ok_or_else(|| missing("sections", id))
}

/// Joins a single registration
pub async fn load_registration<C: ConnectionTrait>(
    conn: &C,
    registration: registration::Model,
) -> Result<RegistrationView, DbErr> {
    let id = registration.id;
    load_registrations(conn, vec![registration])
        .await?
        .pop()
        .ok_or_else(|| missing("registrations", id))
}
