pub mod entity;
pub mod proximity;
pub mod repository;
pub mod value_objects;
