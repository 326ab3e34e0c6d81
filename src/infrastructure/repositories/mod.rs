//! Repository implementations using SeaORM

pub mod analysis_repository;
pub mod sea_orm_repository;

pub use analysis_repository::ProcedureStartupAnalyzer;
pub use sea_orm_repository::SeaOrmRepository;
