// Repository ports (interfaces implemented by the infrastructure layer)

pub mod customer_repository;

pub use customer_repository::CustomerRepository;
