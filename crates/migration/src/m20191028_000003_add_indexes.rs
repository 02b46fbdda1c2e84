use crate::idens::{Courses, Instructors, Registrations, Sections, Semesters, Students};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Unique-together rules
        manager
            .create_index(
                Index::create()
                    .name("uq_semesters_year_period")
                    .table(Semesters::Table)
                    .col(Semesters::YearId)
                    .col(Semesters::PeriodId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_courses_number_name")
                    .table(Courses::Table)
                    .col(Courses::CourseNumber)
                    .col(Courses::CourseName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_instructors_last_first")
                    .table(Instructors::Table)
                    .col(Instructors::LastName)
                    .col(Instructors::FirstName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_students_last_first_nickname")
                    .table(Students::Table)
                    .col(Students::LastName)
                    .col(Students::FirstName)
                    .col(Students::Nickname)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_sections_semester_course_name")
                    .table(Sections::Table)
                    .col(Sections::SemesterId)
                    .col(Sections::CourseId)
                    .col(Sections::SectionName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_registrations_section_student")
                    .table(Registrations::Table)
                    .col(Registrations::SectionId)
                    .col(Registrations::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Foreign key lookups used when counting dependents
        manager
            .create_index(
                Index::create()
                    .name("idx_sections_course_id")
                    .table(Sections::Table)
                    .col(Sections::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sections_instructor_id")
                    .table(Sections::Table)
                    .col(Sections::InstructorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_registrations_student_id")
                    .table(Registrations::Table)
                    .col(Registrations::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_registrations_student_id",
            "idx_sections_instructor_id",
            "idx_sections_course_id",
            "uq_registrations_section_student",
            "uq_sections_semester_course_name",
            "uq_students_last_first_nickname",
            "uq_instructors_last_first",
            "uq_courses_number_name",
            "uq_semesters_year_period",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
