use tracing::instrument;

use studio_core::{AppError, EntityId};
use studio_db::TeacherRepository;

use super::model::Teacher;

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(teachers))]
    pub async fn find_all(teachers: &dyn TeacherRepository) -> Result<Vec<Teacher>, AppError> {
        teachers.find_all().await
    }

    #[instrument(skip(teachers))]
    pub async fn find_by_id(
        teachers: &dyn TeacherRepository,
        id: EntityId,
    ) -> Result<Option<Teacher>, AppError> {
        teachers.find_by_id(id).await
    }
}
