use crate::idens::{
    Courses, Instructors, Periods, Registrations, Sections, Semesters, Students, Years,
};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Auto-increment integer primary key
fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

/// Foreign key that refuses to delete a referenced row
fn restrict_fk(
    name: &str,
    from: (impl IntoIden + 'static, impl IntoIden + 'static),
    to: (impl IntoIden + 'static, impl IntoIden + 'static),
) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(from.0, from.1)
        .to(to.0, to.1)
        .on_delete(ForeignKeyAction::Restrict)
        .on_update(ForeignKeyAction::Cascade)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create semesters table
        manager
            .create_table(
                Table::create()
                    .table(Semesters::Table)
                    .if_not_exists()
                    .col(id_col(Semesters::Id))
                    .col(ColumnDef::new(Semesters::YearId).integer().not_null())
                    .col(ColumnDef::new(Semesters::PeriodId).integer().not_null())
                    .foreign_key(&mut restrict_fk(
                        "fk-semesters-year_id",
                        (Semesters::Table, Semesters::YearId),
                        (Years::Table, Years::Id),
                    ))
                    .foreign_key(&mut restrict_fk(
                        "fk-semesters-period_id",
                        (Semesters::Table, Semesters::PeriodId),
                        (Periods::Table, Periods::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(id_col(Courses::Id))
                    .col(ColumnDef::new(Courses::CourseNumber).string_len(20).not_null())
                    .col(ColumnDef::new(Courses::CourseName).string_len(225).not_null())
                    .to_owned(),
            )
            .await?;

        // Create instructors table
        manager
            .create_table(
                Table::create()
                    .table(Instructors::Table)
                    .if_not_exists()
                    .col(id_col(Instructors::Id))
                    .col(ColumnDef::new(Instructors::FirstName).string_len(45).not_null())
                    .col(ColumnDef::new(Instructors::LastName).string_len(45).not_null())
                    .to_owned(),
            )
            .await?;

        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(id_col(Students::Id))
                    .col(ColumnDef::new(Students::FirstName).string_len(45).not_null())
                    .col(ColumnDef::new(Students::LastName).string_len(45).not_null())
                    .col(
                        ColumnDef::new(Students::Nickname)
                            .string_len(45)
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        // Create sections table, one offering of a course in a semester
        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(id_col(Sections::Id))
                    .col(ColumnDef::new(Sections::SectionName).string_len(10).not_null())
                    .col(ColumnDef::new(Sections::SemesterId).integer().not_null())
                    .col(ColumnDef::new(Sections::CourseId).integer().not_null())
                    .col(ColumnDef::new(Sections::InstructorId).integer().not_null())
                    .foreign_key(&mut restrict_fk(
                        "fk-sections-semester_id",
                        (Sections::Table, Sections::SemesterId),
                        (Semesters::Table, Semesters::Id),
                    ))
                    .foreign_key(&mut restrict_fk(
                        "fk-sections-course_id",
                        (Sections::Table, Sections::CourseId),
                        (Courses::Table, Courses::Id),
                    ))
                    .foreign_key(&mut restrict_fk(
                        "fk-sections-instructor_id",
                        (Sections::Table, Sections::InstructorId),
                        (Instructors::Table, Instructors::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        // Create registrations junction table between students and sections
        manager
            .create_table(
                Table::create()
                    .table(Registrations::Table)
                    .if_not_exists()
                    .col(id_col(Registrations::Id))
                    .col(ColumnDef::new(Registrations::StudentId).integer().not_null())
                    .col(ColumnDef::new(Registrations::SectionId).integer().not_null())
                    .foreign_key(&mut restrict_fk(
                        "fk-registrations-student_id",
                        (Registrations::Table, Registrations::StudentId),
                        (Students::Table, Students::Id),
                    ))
                    .foreign_key(&mut restrict_fk(
                        "fk-registrations-section_id",
                        (Registrations::Table, Registrations::SectionId),
                        (Sections::Table, Sections::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children first so no foreign key is left dangling
        manager
            .drop_table(Table::drop().table(Registrations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Instructors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Semesters::Table).to_owned())
            .await?;

        Ok(())
    }
}
