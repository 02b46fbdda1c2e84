use super::{
    check_reference, ensure_no_duplicates,
    views::{RegistrationView, load_registration, load_registrations},
};
use crate::{
    entities::{registration, section, student},
    error::ServiceError,
};
use log::info;
use models::{form_errors::FormErrors, forms::RegistrationForm};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, TransactionTrait,
};

const DUPLICATE: &str = "Registration with this Section and Student already exists.";

pub struct RegistrationService;

impl RegistrationService {
    /// All registrations ordered by section then student
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<RegistrationView>, ServiceError> {
        let registrations = registration::Entity::find().all(db).await?;
        Ok(load_registrations(db, registrations).await?)
    }

    /// A registration with its student and section
    pub async fn get<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> Result<RegistrationView, ServiceError> {
        let registration = registration::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(ServiceError::NotFound)?;
        Ok(load_registration(conn, registration).await?)
    }

    pub async fn create(
        db: &DatabaseConnection,
        form: RegistrationForm,
    ) -> Result<RegistrationView, ServiceError> {
        let form = form.clean()?;
        let txn = db.begin().await?;

        Self::validate(&txn, &form, None).await?;
        let registration = registration::ActiveModel {
            student_id: Set(form.student_id),
            section_id: Set(form.section_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ServiceError::from_write(e, DUPLICATE))?;
        let registration = load_registration(&txn, registration).await?;

        txn.commit().await?;
        info!(
            "Created registration {} ({})",
            registration.registration.id,
            registration.label()
        );
        Ok(registration)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        form: RegistrationForm,
    ) -> Result<RegistrationView, ServiceError> {
        let txn = db.begin().await?;
        let existing = Self::get(&txn, id).await?;
        let form = form.clean()?;

        Self::validate(&txn, &form, Some(id)).await?;
        let mut active: registration::ActiveModel = existing.registration.into();
        active.student_id = Set(form.student_id);
        active.section_id = Set(form.section_id);
        let registration = active
            .update(&txn)
            .await
            .map_err(|e| ServiceError::from_write(e, DUPLICATE))?;
        let registration = load_registration(&txn, registration).await?;

        txn.commit().await?;
        info!(
            "Updated registration {} ({})",
            registration.registration.id,
            registration.label()
        );
        Ok(registration)
    }

    /// Nothing references a registration, so it can always be deleted
    pub async fn check_delete(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<RegistrationView, ServiceError> {
        Self::get(db, id).await
    }

    pub async fn delete(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<RegistrationView, ServiceError> {
        let txn = db.begin().await?;
        let registration = Self::get(&txn, id).await?;
        registration::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!("Deleted registrations row {id} ({})", registration.label());
        Ok(registration)
    }

    /// Checks the referenced student and section, then the (section, student) uniqueness
    async fn validate<C: ConnectionTrait>(
        conn: &C,
        form: &RegistrationForm,
        exclude: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut errors = FormErrors::new();
        check_reference::<student::Entity, _>(conn, &mut errors, "student_id", form.student_id)
            .await?;
        check_reference::<section::Entity, _>(conn, &mut errors, "section_id", form.section_id)
            .await?;
        errors.into_result(())?;

        let mut query = registration::Entity::find()
            .filter(registration::Column::SectionId.eq(form.section_id))
            .filter(registration::Column::StudentId.eq(form.student_id));
        if let Some(id) = exclude {
            query = query.filter(registration::Column::Id.ne(id));
        }

        ensure_no_duplicates(query.count(conn).await?, DUPLICATE)
    }
}
