use super::{
    Deletion, PageOf, ensure_no_duplicates, finish_deletion,
    views::{RegistrationView, load_registrations},
};
use crate::{
    entities::{registration, student},
    error::ServiceError,
};
use log::info;
use models::{
    forms::StudentForm,
    pagination::{Page, PageRequest, STUDENTS_PER_PAGE},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

const DUPLICATE: &str = "Student with this Last name, First name and Nickname already exists.";

pub struct StudentService;

impl StudentService {
    /// One page of students ordered by last name, first name and nickname
    pub async fn list_page(
        db: &DatabaseConnection,
        request: PageRequest,
    ) -> Result<PageOf<student::Model>, ServiceError> {
        let query = student::Entity::find()
            .order_by_asc(student::Column::LastName)
            .order_by_asc(student::Column::FirstName)
            .order_by_asc(student::Column::Nickname)
            .order_by_asc(student::Column::Id);

        let count = query.clone().count(db).await?;
        let page = Page::resolve(request, count, STUDENTS_PER_PAGE).ok_or(ServiceError::NotFound)?;
        let items = query.paginate(db, page.per_page).fetch_page(page.index()).await?;

        Ok(PageOf { items, page })
    }

    pub async fn get<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> Result<student::Model, ServiceError> {
        student::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// A student with the sections they are registered in
    pub async fn detail(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<(student::Model, Vec<RegistrationView>), ServiceError> {
        let student = Self::get(db, id).await?;
        let registrations = student.find_related(registration::Entity).all(db).await?;
        let registrations = load_registrations(db, registrations).await?;

        Ok((student, registrations))
    }

    pub async fn create(
        db: &DatabaseConnection,
        form: StudentForm,
    ) -> Result<student::Model, ServiceError> {
        let form = form.clean()?;
        let txn = db.begin().await?;

        Self::ensure_unique(&txn, &form, None).await?;
        let student = student::ActiveModel {
            first_name: Set(form.first_name),
            last_name: Set(form.last_name),
            nickname: Set(form.nickname),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ServiceError::from_write(e, DUPLICATE))?;

        txn.commit().await?;
        info!("Created student {} ({})", student.id, student.label());
        Ok(student)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        form: StudentForm,
    ) -> Result<student::Model, ServiceError> {
        let txn = db.begin().await?;
        let existing = Self::get(&txn, id).await?;
        let form = form.clean()?;

        Self::ensure_unique(&txn, &form, Some(id)).await?;
        let mut active: student::ActiveModel = existing.into();
        active.first_name = Set(form.first_name);
        active.last_name = Set(form.last_name);
        active.nickname = Set(form.nickname);
        let student = active
            .update(&txn)
            .await
            .map_err(|e| ServiceError::from_write(e, DUPLICATE))?;

        txn.commit().await?;
        info!("Updated student {} ({})", student.id, student.label());
        Ok(student)
    }

    pub async fn check_delete(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Deletion<student::Model, RegistrationView>, ServiceError> {
        Self::deletion(db, id).await
    }

    /// Deletes the student unless they are still registered somewhere
    pub async fn delete(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Deletion<student::Model, RegistrationView>, ServiceError> {
        let txn = db.begin().await?;
        let deletion = Self::deletion(&txn, id).await?;
        finish_deletion::<student::Entity, _, _>(txn, id, deletion, Self::deletion(db, id)).await
    }

    async fn deletion<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> Result<Deletion<student::Model, RegistrationView>, ServiceError> {
        let student = Self::get(conn, id).await?;
        let registrations =
            registration::Entity::find().filter(registration::Column::StudentId.eq(id));

        if registrations.clone().count(conn).await? == 0 {
            return Ok(Deletion::Allowed(student));
        }

        let dependents = load_registrations(conn, registrations.all(conn).await?).await?;
        Ok(Deletion::Blocked {
            object: student,
            dependents,
        })
    }

    async fn ensure_unique<C: ConnectionTrait>(
        conn: &C,
        form: &StudentForm,
        exclude: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut query = student::Entity::find()
            .filter(student::Column::LastName.eq(form.last_name.as_str()))
            .filter(student::Column::FirstName.eq(form.first_name.as_str()))
            .filter(student::Column::Nickname.eq(form.nickname.as_str()));
        if let Some(id) = exclude {
            query = query.filter(student::Column::Id.ne(id));
        }

        ensure_no_duplicates(query.count(conn).await?, DUPLICATE)
    }
}
