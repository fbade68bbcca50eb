/// CRUD and relation tests for all entities (require a live database)
pub mod crud_tests;
