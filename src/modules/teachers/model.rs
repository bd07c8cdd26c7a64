pub use studio_models::teachers::{Teacher, TeacherDto};
