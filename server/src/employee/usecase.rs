//! Employee use cases.
//!
//! Nothing here adds behavior on top of the repository; the trait exists so
//! the HTTP layer can be exercised against a substitute implementation.

use std::sync::Arc;

use async_trait::async_trait;

use super::{
    model::Employee,
    repository::{EmployeeRepository, RepositoryResult},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeUseCase: Send + Sync {
    async fn create_employee(&self, employee: Employee) -> RepositoryResult<Employee>;
    async fn get_employees(&self) -> RepositoryResult<Vec<Employee>>;
    async fn get_employee_by_id(&self, id: u64) -> RepositoryResult<Employee>;
    async fn update_employee(&self, employee: Employee) -> RepositoryResult<Employee>;
    async fn delete_employee(&self, id: u64) -> RepositoryResult<()>;
}

/// Shared handle used by the HTTP layer.
pub type DynEmployeeUseCase = Arc<dyn EmployeeUseCase>;

pub struct EmployeeService {
    repository: Arc<dyn EmployeeRepository>,
}

impl EmployeeService {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl EmployeeUseCase for EmployeeService {
    async fn create_employee(&self, employee: Employee) -> RepositoryResult<Employee> {
        self.repository.create(employee).await
    }

    async fn get_employees(&self) -> RepositoryResult<Vec<Employee>> {
        self.repository.find_all().await
    }

    async fn get_employee_by_id(&self, id: u64) -> RepositoryResult<Employee> {
        self.repository.find_by_id(id).await
    }

    async fn update_employee(&self, employee: Employee) -> RepositoryResult<Employee> {
        self.repository.update(employee).await
    }

    async fn delete_employee(&self, id: u64) -> RepositoryResult<()> {
        self.repository.delete(id).await
    }
}
