use super::{
    Deletion, ensure_no_duplicates, finish_deletion,
    views::{SectionView, load_sections},
};
use crate::{
    entities::{course, section},
    error::ServiceError,
};
use log::info;
use models::forms::CourseForm;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

const DUPLICATE: &str = "Course with this Course number and Course name already exists.";

pub struct CourseService;

impl CourseService {
    /// All courses ordered by number then name
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<course::Model>, ServiceError> {
        Ok(course::Entity::find()
            .order_by_asc(course::Column::CourseNumber)
            .order_by_asc(course::Column::CourseName)
            .all(db)
            .await?)
    }

    pub async fn get<C: ConnectionTrait>(conn: &C, id: i32) -> Result<course::Model, ServiceError> {
        course::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// A course with every section offered of it
    pub async fn detail(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<(course::Model, Vec<SectionView>), ServiceError> {
        let course = Self::get(db, id).await?;
        let sections = course.find_related(section::Entity).all(db).await?;
        let sections = load_sections(db, sections).await?;

        Ok((course, sections))
    }

    pub async fn create(
        db: &DatabaseConnection,
        form: CourseForm,
    ) -> Result<course::Model, ServiceError> {
        let form = form.clean()?;
        let txn = db.begin().await?;

        Self::ensure_unique(&txn, &form, None).await?;
        let course = course::ActiveModel {
            course_number: Set(form.course_number),
            course_name: Set(form.course_name),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ServiceError::from_write(e, DUPLICATE))?;

        txn.commit().await?;
        info!("Created course {} ({})", course.id, course.label());
        Ok(course)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        form: CourseForm,
    ) -> Result<course::Model, ServiceError> {
        let txn = db.begin().await?;
        let existing = Self::get(&txn, id).await?;
        let form = form.clean()?;

        Self::ensure_unique(&txn, &form, Some(id)).await?;
        let mut active: course::ActiveModel = existing.into();
        active.course_number = Set(form.course_number);
        active.course_name = Set(form.course_name);
        let course = active
            .update(&txn)
            .await
            .map_err(|e| ServiceError::from_write(e, DUPLICATE))?;

        txn.commit().await?;
        info!("Updated course {} ({})", course.id, course.label());
        Ok(course)
    }

    pub async fn check_delete(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Deletion<course::Model, SectionView>, ServiceError> {
        Self::deletion(db, id).await
    }

    /// Deletes the course unless a section of it still exists
    pub async fn delete(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Deletion<course::Model, SectionView>, ServiceError> {
        let txn = db.begin().await?;
        let deletion = Self::deletion(&txn, id).await?;
        finish_deletion::<course::Entity, _, _>(txn, id, deletion, Self::deletion(db, id)).await
    }

    async fn deletion<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> Result<Deletion<course::Model, SectionView>, ServiceError> {
        let course = Self::get(conn, id).await?;
        let sections = section::Entity::find().filter(section::Column::CourseId.eq(id));

        if sections.clone().count(conn).await? == 0 {
            return Ok(Deletion::Allowed(course));
        }

        let dependents = load_sections(conn, sections.all(conn).await?).await?;
        Ok(Deletion::Blocked {
            object: course,
            dependents,
        })
    }

    async fn ensure_unique<C: ConnectionTrait>(
        conn: &C,
        form: &CourseForm,
        exclude: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut query = course::Entity::find()
            .filter(course::Column::CourseNumber.eq(form.course_number.as_str()))
            .filter(course::Column::CourseName.eq(form.course_name.as_str()));
        if let Some(id) = exclude {
            query = query.filter(course::Column::Id.ne(id));
        }

        ensure_no_duplicates(query.count(conn).await?, DUPLICATE)
    }
}
