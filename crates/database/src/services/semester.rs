use super::{
    Deletion, check_reference, ensure_no_duplicates, finish_deletion,
    views::{SectionView, SemesterView, load_sections, load_semester, load_semesters},
};
use crate::{
    entities::{period, section, semester, year},
    error::ServiceError,
};
use log::info;
use models::{form_errors::FormErrors, forms::SemesterForm};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, TransactionTrait,
};

const DUPLICATE: &str = "Semester with this Year and Period already exists.";

pub struct SemesterService;

impl SemesterService {
    /// All semesters in calendar order
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<SemesterView>, ServiceError> {
        let semesters = semester::Entity::find().all(db).await?;
        Ok(load_semesters(db, semesters).await?)
    }

    pub async fn get<C: ConnectionTrait>(conn: &C, id: i32) -> Result<SemesterView, ServiceError> {
        let semester = semester::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(ServiceError::NotFound)?;
        Ok(load_semester(conn, semester).await?)
    }

    /// A semester with the sections offered in it
    pub async fn detail(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<(SemesterView, Vec<SectionView>), ServiceError> {
        let semester = Self::get(db, id).await?;
        let sections = section::Entity::find()
            .filter(section::Column::SemesterId.eq(id))
            .all(db)
            .await?;
        let sections = load_sections(db, sections).await?;

        Ok((semester, sections))
    }

    pub async fn create(
        db: &DatabaseConnection,
        form: SemesterForm,
    ) -> Result<SemesterView, ServiceError> {
        let form = form.clean()?;
        let txn = db.begin().await?;

        Self::validate(&txn, &form, None).await?;
        let semester = semester::ActiveModel {
            year_id: Set(form.year_id),
            period_id: Set(form.period_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ServiceError::from_write(e, DUPLICATE))?;
        let semester = load_semester(&txn, semester).await?;

        txn.commit().await?;
        info!("Created semester {} ({})", semester.semester.id, semester.label());
        Ok(semester)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        form: SemesterForm,
    ) -> Result<SemesterView, ServiceError> {
        let txn = db.begin().await?;
        let existing = Self::get(&txn, id).await?;
        let form = form.clean()?;

        Self::validate(&txn, &form, Some(id)).await?;
        let mut active: semester::ActiveModel = existing.semester.into();
        active.year_id = Set(form.year_id);
        active.period_id = Set(form.period_id);
        let semester = active
            .update(&txn)
            .await
            .map_err(|e| ServiceError::from_write(e, DUPLICATE))?;
        let semester = load_semester(&txn, semester).await?;

        txn.commit().await?;
        info!("Updated semester {} ({})", semester.semester.id, semester.label());
        Ok(semester)
    }

    pub async fn check_delete(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Deletion<SemesterView, SectionView>, ServiceError> {
        Self::deletion(db, id).await
    }

    /// Deletes the semester unless a section is still offered in it
    pub async fn delete(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Deletion<SemesterView, SectionView>, ServiceError> {
        let txn = db.begin().await?;
        let deletion = Self::deletion(&txn, id).await?;
        finish_deletion::<semester::Entity, _, _>(txn, id, deletion, Self::deletion(db, id)).await
    }

    async fn deletion<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> Result<Deletion<SemesterView, SectionView>, ServiceError> {
        let semester = Self::get(conn, id).await?;
        let sections = section::Entity::find().filter(section::Column::SemesterId.eq(id));

        if sections.clone().count(conn).await? == 0 {
            return Ok(Deletion::Allowed(semester));
        }

        let dependents = load_sections(conn, sections.all(conn).await?).await?;
        Ok(Deletion::Blocked {
            object: semester,
            dependents,
        })
    }

    /// Checks the referenced year and period, then the (year, period) uniqueness
    async fn validate<C: ConnectionTrait>(
        conn: &C,
        form: &SemesterForm,
        exclude: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut errors = FormErrors::new();
        check_reference::<year::Entity, _>(conn, &mut errors, "year_id", form.year_id).await?;
        check_reference::<period::Entity, _>(conn, &mut errors, "period_id", form.period_id)
            .await?;
        errors.into_result(())?;

        let mut query = semester::Entity::find()
            .filter(semester::Column::YearId.eq(form.year_id))
            .filter(semester::Column::PeriodId.eq(form.period_id));
        if let Some(id) = exclude {
            query = query.filter(semester::Column::Id.ne(id));
        }

        ensure_no_duplicates(query.count(conn).await?, DUPLICATE)
    }
}
