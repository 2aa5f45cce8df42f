//! Employee records: model, storage, use case and HTTP handlers.

pub mod controller;
pub mod id;
pub mod model;
pub mod repository;
pub mod usecase;

pub use model::Employee;
pub use repository::{EmployeeRepository, RepositoryError, SeaOrmEmployeeRepository};
pub use usecase::{DynEmployeeUseCase, EmployeeService, EmployeeUseCase};
