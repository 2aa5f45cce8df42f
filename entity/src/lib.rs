//! sea-orm entities for the employee service.

pub mod employee;
