use super::{
    Deletion, check_reference, ensure_no_duplicates, finish_deletion,
    views::{RegistrationView, SectionView, load_registrations, load_section, load_sections},
};
use crate::{
    entities::{course, instructor, registration, section, semester},
    error::ServiceError,
};
use log::info;
use models::{form_errors::FormErrors, forms::SectionForm};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, TransactionTrait,
};

const DUPLICATE: &str = "Section with this Semester, Course and Section name already exists.";

pub struct SectionService;

impl SectionService {
    /// All sections ordered by course number, section name and semester
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<SectionView>, ServiceError> {
        let sections = section::Entity::find().all(db).await?;
        Ok(load_sections(db, sections).await?)
    }

    pub async fn get<C: ConnectionTrait>(conn: &C, id: i32) -> Result<SectionView, ServiceError> {
        let section = section::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(ServiceError::NotFound)?;
        Ok(load_section(conn, section).await?)
    }

    /// A section with its course, semester, instructor and registrations
    pub async fn detail(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<(SectionView, Vec<RegistrationView>), ServiceError> {
        let section = Self::get(db, id).await?;
        let registrations = registration::Entity::find()
            .filter(registration::Column::SectionId.eq(id))
            .all(db)
            .await?;
        let registrations = load_registrations(db, registrations).await?;

        Ok((section, registrations))
    }

    pub async fn create(
        db: &DatabaseConnection,
        form: SectionForm,
    ) -> Result<SectionView, ServiceError> {
        let form = form.clean()?;
        let txn = db.begin().await?;

        Self::validate(&txn, &form, None).await?;
        let section = section::ActiveModel {
            section_name: Set(form.section_name),
            semester_id: Set(form.semester_id),
            course_id: Set(form.course_id),
            instructor_id: Set(form.instructor_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ServiceError::from_write(e, DUPLICATE))?;
        let section = load_section(&txn, section).await?;

        txn.commit().await?;
        info!("Created section {} ({})", section.section.id, section.label());
        Ok(section)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        form: SectionForm,
    ) -> Result<SectionView, ServiceError> {
        let txn = db.begin().await?;
        let existing = Self::get(&txn, id).await?;
        let form = form.clean()?;

        Self::validate(&txn, &form, Some(id)).await?;
        let mut active: section::ActiveModel = existing.section.into();
        active.section_name = Set(form.section_name);
        active.semester_id = Set(form.semester_id);
        active.course_id = Set(form.course_id);
        active.instructor_id = Set(form.instructor_id);
        let section = active
            .update(&txn)
            .await
            .map_err(|e| ServiceError::from_write(e, DUPLICATE))?;
        let section = load_section(&txn, section).await?;

        txn.commit().await?;
        info!("Updated section {} ({})", section.section.id, section.label());
        Ok(section)
    }

    pub async fn check_delete(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Deletion<SectionView, RegistrationView>, ServiceError> {
        Self::deletion(db, id).await
    }

    /// Deletes the section unless a student is still registered in it
    pub async fn delete(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Deletion<SectionView, RegistrationView>, ServiceError> {
        let txn = db.begin().await?;
        let deletion = Self::deletion(&txn, id).await?;
        finish_deletion::<section::Entity, _, _>(txn, id, deletion, Self::deletion(db, id)).await
    }

    async fn deletion<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> Result<Deletion<SectionView, RegistrationView>, ServiceError> {
        let section = Self::get(conn, id).await?;
        let registrations =
            registration::Entity::find().filter(registration::Column::SectionId.eq(id));

        if registrations.clone().count(conn).await? == 0 {
            return Ok(Deletion::Allowed(section));
        }

        let dependents = load_registrations(conn, registrations.all(conn).await?).await?;
        Ok(Deletion::Blocked {
            object: section,
            dependents,
        })
    }

    /// Checks every referenced row, then the (semester, course, section_name) uniqueness
    async fn validate<C: ConnectionTrait>(
        conn: &C,
        form: &SectionForm,
        exclude: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut errors = FormErrors::new();
        check_reference::<semester::Entity, _>(conn, &mut errors, "semester_id", form.semester_id)
            .await?;
        check_reference::<course::Entity, _>(conn, &mut errors, "course_id", form.course_id)
            .await?;
        check_reference::<instructor::Entity, _>(
            conn,
            &mut errors,
            "instructor_id",
            form.instructor_id,
        )
        .await?;
        errors.into_result(())?;

        let mut query = section::Entity::find()
            .filter(section::Column::SemesterId.eq(form.semester_id))
            .filter(section::Column::CourseId.eq(form.course_id))
            .filter(section::Column::SectionName.eq(form.section_name.as_str()));
        if let Some(id) = exclude {
            query = query.filter(section::Column::Id.ne(id));
        }

        ensure_no_duplicates(query.count(conn).await?, DUPLICATE)
    }
}
