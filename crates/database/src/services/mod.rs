use crate::error::ServiceError;
use log::{info, warn};
use models::{
    form_errors::{FormErrors, NON_FIELD_ERRORS},
    forms::INVALID_CHOICE,
    pagination::Page,
};
use sea_orm::{
    ConnectionTrait, DatabaseTransaction, DbErr, EntityName, EntityTrait, PrimaryKeyTrait, SqlErr,
};

pub mod course;
pub mod instructor;
pub mod reference;
pub mod registration;
pub mod section;
pub mod semester;
pub mod student;
pub mod views;

/// One page of a paginated list
#[derive(Debug, Clone, PartialEq)]
pub struct PageOf<T> {
    pub items: Vec<T>,
    pub page: Page,
}

/// Whether a row may be deleted.
///
/// Returned both by the delete check, where `Allowed` asks for confirmation, and
/// by the delete commit, where `Allowed` carries the row that was removed.
#[derive(Debug, Clone, PartialEq)]
pub enum Deletion<T, D> {
    Allowed(T),
    Blocked { object: T, dependents: Vec<D> },
}

impl<T, D> Deletion<T, D> {
    /// A refusal, keeping whatever dependents are already known
    pub fn into_blocked(self) -> Self {
        match self {
            Self::Allowed(object) => Self::Blocked {
                object,
                dependents: vec![],
            },
            blocked @ Self::Blocked { .. } => blocked,
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }
}

/// Whether a row of `E` with primary key `id` exists
pub(crate) async fn exists<E, C>(conn: &C, id: i32) -> Result<bool, DbErr>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    C: ConnectionTrait,
{
    Ok(E::find_by_id(id).one(conn).await?.is_some())
}

/// Records an invalid-choice error on `field` unless the referenced row of `E` exists
pub(crate) async fn check_reference<E, C>(
    conn: &C,
    errors: &mut FormErrors,
    field: &str,
    id: i32,
) -> Result<(), DbErr>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    C: ConnectionTrait,
{
    if !exists::<E, C>(conn, id).await? {
        errors.add(field, INVALID_CHOICE);
    }
    Ok(())
}

/// Fails with a non-field error when `duplicates` rows already hold the same unique key
pub(crate) fn ensure_no_duplicates(duplicates: u64, message: &str) -> Result<(), ServiceError> {
    if duplicates > 0 {
        return Err(FormErrors::single(NON_FIELD_ERRORS, message).into());
    }
    Ok(())
}

/// Completes a guarded delete inside `txn`.
///
/// The row of `E` is removed and the transaction committed only when nothing
/// references it; otherwise the transaction is rolled back untouched. When the
/// database itself rejects the delete because a dependent row appeared after
/// the check, `recheck` is awaited once the transaction is rolled back and its
/// outcome is reported as a refusal.
pub(crate) async fn finish_deletion<E, T, D>(
    txn: DatabaseTransaction,
    id: i32,
    deletion: Deletion<T, D>,
    recheck: impl Future<Output = Result<Deletion<T, D>, ServiceError>>,
) -> Result<Deletion<T, D>, ServiceError>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    let table = E::default().table_name().to_owned();

    if let Deletion::Blocked { dependents, .. } = &deletion {
        txn.rollback().await?;
        info!(
            "Refused to delete {table} row {id}: {} dependent row(s)",
            dependents.len()
        );
        return Ok(deletion);
    }

    match E::delete_by_id(id).exec(&txn).await {
        Ok(_) => {
            txn.commit().await?;
            info!("Deleted {table} row {id}");
            Ok(deletion)
        }
        Err(err) if matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) => {
            txn.rollback().await?;
            warn!("Refused to delete {table} row {id}: a dependent row was added meanwhile");
            Ok(recheck.await?.into_blocked())
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod test {
    use super::{
        Deletion, course::CourseService, finish_deletion, instructor::InstructorService,
        reference::ReferenceService, semester::SemesterService,
    };
    use crate::entities::{Course, course, section};
    use migration::{Migrator, MigratorTrait};
    use models::forms::{CourseForm, InstructorForm, SemesterForm, YearForm};
    use sea_orm::{
        ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database, DatabaseConnection,
        EntityTrait, TransactionTrait,
    };

    async fn setup() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_dependent_added_after_check_is_refused() {
        let db = setup().await;
        let course = CourseService::create(
            &db,
            CourseForm {
                course_number: "CS101".to_string(),
                course_name: "Intro".to_string(),
            },
        )
        .await
        .unwrap();
        let instructor = InstructorService::create(
            &db,
            InstructorForm {
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
            },
        )
        .await
        .unwrap();
        let year = ReferenceService::create_year(&db, YearForm { year: 2019 })
            .await
            .unwrap();
        let periods = ReferenceService::list_periods(&db).await.unwrap();
        let semester = SemesterService::create(
            &db,
            SemesterForm {
                year_id: year.id,
                period_id: periods[0].id,
            },
        )
        .await
        .unwrap();

        let deletion = CourseService::check_delete(&db, course.id).await.unwrap();
        assert!(!deletion.is_blocked());

        // A section for the course lands between the check and the delete
        section::ActiveModel {
            section_name: Set("A".to_string()),
            semester_id: Set(semester.semester.id),
            course_id: Set(course.id),
            instructor_id: Set(instructor.id),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let txn = db.begin().await.unwrap();
        let outcome = finish_deletion::<course::Entity, _, _>(
            txn,
            course.id,
            deletion,
            CourseService::check_delete(&db, course.id),
        )
        .await
        .unwrap();

        match outcome {
            Deletion::Blocked { object, dependents } => {
                assert_eq!(object.id, course.id);
                assert_eq!(dependents.len(), 1);
                assert_eq!(dependents[0].label(), "CS101 - A (2019 - Spring)");
            }
            Deletion::Allowed(_) => panic!("delete should have been refused"),
        }
        assert!(Course::find_by_id(course.id)
            .one(&db)
            .await
            .unwrap()
            .is_some());
    }
}
