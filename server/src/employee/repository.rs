//! Storage access for employees.

use async_trait::async_trait;
use entity::employee;
use platform_db::DbPool;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, QueryOrder};
use thiserror::Error;
use tracing::instrument;

use super::model::Employee;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("employee {0} not found")]
    NotFound(u64),
    #[error("storage error: {0}")]
    Storage(#[from] DbErr),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Persistence operations on employee rows.
///
/// Only `find_by_id` reports a missing row as [`RepositoryError::NotFound`];
/// `update` and `delete` surface it as a storage failure like any other.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Inserts `employee` and returns it with its assigned id. Any id on the
    /// input is ignored.
    async fn create(&self, employee: Employee) -> RepositoryResult<Employee>;

    /// Every employee, ordered by id.
    async fn find_all(&self) -> RepositoryResult<Vec<Employee>>;

    async fn find_by_id(&self, id: u64) -> RepositoryResult<Employee>;

    /// Replaces all mutable fields of the row keyed by `employee.id`.
    async fn update(&self, employee: Employee) -> RepositoryResult<Employee>;

    async fn delete(&self, id: u64) -> RepositoryResult<()>;
}

/// [`EmployeeRepository`] over a sea-orm connection pool.
#[derive(Clone, Debug)]
pub struct SeaOrmEmployeeRepository {
    db: DbPool,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    #[instrument(name = "employee_repo.create", skip_all)]
    async fn create(&self, employee: Employee) -> RepositoryResult<Employee> {
        let row = employee.into_new_active_model().insert(&self.db).await?;
        Ok(Employee::try_from(row)?)
    }

    #[instrument(name = "employee_repo.find_all", skip_all)]
    async fn find_all(&self) -> RepositoryResult<Vec<Employee>> {
        let rows = employee::Entity::find()
            .order_by_asc(employee::Column::Id)
            .all(&self.db)
            .await?;
        rows.into_iter()
            .map(|row| Employee::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    #[instrument(name = "employee_repo.find_by_id", skip(self))]
    async fn find_by_id(&self, id: u64) -> RepositoryResult<Employee> {
        let Ok(key) = i32::try_from(id) else {
            return Err(RepositoryError::NotFound(id));
        };
        let row = employee::Entity::find_by_id(key)
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound(id))?;
        Ok(Employee::try_from(row)?)
    }

    #[instrument(name = "employee_repo.update", skip_all, fields(id = employee.id))]
    async fn update(&self, employee: Employee) -> RepositoryResult<Employee> {
        let key = employee.storage_id().ok_or(DbErr::RecordNotUpdated)?;
        let row = employee.into_update_model(key).update(&self.db).await?;
        Ok(Employee::try_from(row)?)
    }

    #[instrument(name = "employee_repo.delete", skip(self))]
    async fn delete(&self, id: u64) -> RepositoryResult<()> {
        let missing = || DbErr::RecordNotFound(format!("employee {id}"));
        let key = i32::try_from(id).map_err(|_| missing())?;
        let result = employee::Entity::delete_by_id(key).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(missing().into());
        }
        Ok(())
    }
}
