use tracing::{info, instrument};

use studio_core::{AppError, EntityId};
use studio_db::UserRepository;

use super::model::User;

pub struct UserService;

impl UserService {
    #[instrument(skip(users))]
    pub async fn find_by_id(
        users: &dyn UserRepository,
        id: EntityId,
    ) -> Result<Option<User>, AppError> {
        users.find_by_id(id).await
    }

    /// Deletes the user; their participations go with them.
    #[instrument(skip(users))]
    pub async fn delete(users: &dyn UserRepository, id: EntityId) -> Result<(), AppError> {
        if !users.delete(id).await? {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }
        info!(user_id = id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_db::Repositories;
    use studio_models::NewUser;

    #[tokio::test]
    async fn test_find_and_delete() {
        let repos = Repositories::in_memory();
        let users = repos.users.as_ref();
        let user = users
            .create(NewUser {
                email: "toto@toto.com".to_string(),
                first_name: "Toto".to_string(),
                last_name: "Toto".to_string(),
                password_hash: "hash".to_string(),
                admin: false,
            })
            .await
            .unwrap();

        assert_eq!(
            UserService::find_by_id(users, user.id).await.unwrap(),
            Some(user.clone())
        );

        UserService::delete(users, user.id).await.unwrap();
        assert!(UserService::find_by_id(users, user.id).await.unwrap().is_none());

        let err = UserService::delete(users, user.id).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
