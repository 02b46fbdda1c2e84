use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub enum Years {
    Table,
    Id,
    Year,
}

#[derive(DeriveIden)]
pub enum Periods {
    Table,
    Id,
    PeriodSequence,
    PeriodName,
}

#[derive(DeriveIden)]
pub enum Semesters {
    Table,
    Id,
    YearId,
    PeriodId,
}

#[derive(DeriveIden)]
pub enum Courses {
    Table,
    Id,
    CourseNumber,
    CourseName,
}

#[derive(DeriveIden)]
pub enum Instructors {
    Table,
    Id,
    FirstName,
    LastName,
}

#[derive(DeriveIden)]
pub enum Students {
    Table,
    Id,
    FirstName,
    LastName,
    Nickname,
}

#[derive(DeriveIden)]
pub enum Sections {
    Table,
    Id,
    SectionName,
    SemesterId,
    CourseId,
    InstructorId,
}

#[derive(DeriveIden)]
pub enum Registrations {
    Table,
    Id,
    StudentId,
    SectionId,
}
