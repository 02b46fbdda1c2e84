use super::{
    Deletion, PageOf, ensure_no_duplicates, finish_deletion,
    views::{SectionView, load_sections},
};
use crate::{
    entities::{instructor, section},
    error::ServiceError,
};
use log::info;
use models::{
    forms::InstructorForm,
    pagination::{INSTRUCTORS_PER_PAGE, Page, PageRequest},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

const DUPLICATE: &str = "Instructor with this Last name and First name already exists.";

pub struct InstructorService;

impl InstructorService {
    /// One page of instructors ordered by last then first name
    pub async fn list_page(
        db: &DatabaseConnection,
        request: PageRequest,
    ) -> Result<PageOf<instructor::Model>, ServiceError> {
        let query = instructor::Entity::find()
            .order_by_asc(instructor::Column::LastName)
            .order_by_asc(instructor::Column::FirstName)
            .order_by_asc(instructor::Column::Id);

        let count = query.clone().count(db).await?;
        let page =
            Page::resolve(request, count, INSTRUCTORS_PER_PAGE).ok_or(ServiceError::NotFound)?;
        let items = query.paginate(db, page.per_page).fetch_page(page.index()).await?;

        Ok(PageOf { items, page })
    }

    pub async fn get<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> Result<instructor::Model, ServiceError> {
        instructor::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// An instructor with the sections they teach
    pub async fn detail(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<(instructor::Model, Vec<SectionView>), ServiceError> {
        let instructor = Self::get(db, id).await?;
        let sections = instructor.find_related(section::Entity).all(db).await?;
        let sections = load_sections(db, sections).await?;

        Ok((instructor, sections))
    }

    pub async fn create(
        db: &DatabaseConnection,
        form: InstructorForm,
    ) -> Result<instructor::Model, ServiceError> {
        let form = form.clean()?;
        let txn = db.begin().await?;

        Self::ensure_unique(&txn, &form, None).await?;
        let instructor = instructor::ActiveModel {
            first_name: Set(form.first_name),
            last_name: Set(form.last_name),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ServiceError::from_write(e, DUPLICATE))?;

        txn.commit().await?;
        info!("Created instructor {} ({})", instructor.id, instructor.label());
        Ok(instructor)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        form: InstructorForm,
    ) -> Result<instructor::Model, ServiceError> {
        let txn = db.begin().await?;
        let existing = Self::get(&txn, id).await?;
        let form = form.clean()?;

        Self::ensure_unique(&txn, &form, Some(id)).await?;
        let mut active: instructor::ActiveModel = existing.into();
        active.first_name = Set(form.first_name);
        active.last_name = Set(form.last_name);
        let instructor = active
            .update(&txn)
            .await
            .map_err(|e| ServiceError::from_write(e, DUPLICATE))?;

        txn.commit().await?;
        info!("Updated instructor {} ({})", instructor.id, instructor.label());
        Ok(instructor)
    }

    /// Whether the instructor can be deleted, listing the sections that prevent it
    pub async fn check_delete(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Deletion<instructor::Model, SectionView>, ServiceError> {
        Self::deletion(db, id).await
    }

    /// Deletes the instructor unless a section still references them
    pub async fn delete(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Deletion<instructor::Model, SectionView>, ServiceError> {
        let txn = db.begin().await?;
        let deletion = Self::deletion(&txn, id).await?;
        finish_deletion::<instructor::Entity, _, _>(txn, id, deletion, Self::deletion(db, id)).await
    }

    async fn deletion<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> Result<Deletion<instructor::Model, SectionView>, ServiceError> {
        let instructor = Self::get(conn, id).await?;
        let sections = section::Entity::find()
            .filter(section::Column::InstructorId.eq(id));

        if sections.clone().count(conn).await? == 0 {
            return Ok(Deletion::Allowed(instructor));
        }

        let dependents = load_sections(conn, sections.all(conn).await?).await?;
        Ok(Deletion::Blocked {
            object: instructor,
            dependents,
        })
    }

    async fn ensure_unique<C: ConnectionTrait>(
        conn: &C,
        form: &InstructorForm,
        exclude: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut query = instructor::Entity::find()
            .filter(instructor::Column::LastName.eq(form.last_name.as_str()))
            .filter(instructor::Column::FirstName.eq(form.first_name.as_str()));
        if let Some(id) = exclude {
            query = query.filter(instructor::Column::Id.ne(id));
        }

        ensure_no_duplicates(query.count(conn).await?, DUPLICATE)
    }
}
