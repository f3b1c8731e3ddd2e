//! Repository state container: the ordered set of tracked mirrors

use gm_client_api::{ClientApi, ClientApiError};
use gm_rest_api_contract::{NewRepository, Repository};
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

/// Why a [`RepositoryStore`] action failed
#[derive(Debug, Error)]
pub enum RepositoryStoreError {
    #[error("API call failed: {0}")]
    Api(#[from] ClientApiError),

    /// 2xx envelope without the expected payload field
    #[error("response carried no {0}")]
    MissingData(&'static str),
}

/// Ordered sequence of tracked repositories, mirrored from the backend.
///
/// The sequence only changes in response to successful API calls: a
/// listing replaces it wholesale, a create appends the server-returned
/// entity, a delete removes the server-echoed entity. It is never edited
/// speculatively.
#[derive(Debug, Default)]
pub struct RepositoryStore {
    repositories: Vec<Repository>,
}

impl RepositoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    /// Refresh the sequence from the backend. Replaces local state on
    /// success; clears it on any failure so the UI never shows a stale
    /// listing.
    pub async fn get_repositories<C: ClientApi>(
        &mut self,
        api: &C,
    ) -> Result<&[Repository], RepositoryStoreError> {
        match fetch_repositories(api).await {
            Ok(repositories) => {
                self.set_repositories(repositories);
                Ok(&self.repositories)
            }
            Err(e) => {
                error!("get repositories error: {}", e);
                self.clear_repositories();
                Err(e)
            }
        }
    }

    /// Create a repository and append the server-returned entity. On
    /// failure the local sequence is left untouched.
    pub async fn add_repository<C: ClientApi>(
        &mut self,
        api: &C,
        data: &NewRepository,
    ) -> Result<Repository, RepositoryStoreError> {
        let created = match add_remote(api, data).await {
            Ok(created) => created,
            Err(e) => {
                error!("add repository error: {}", e);
                return Err(e);
            }
        };

        self.repositories.push(created.clone());
        Ok(created)
    }

    /// Delete a repository and drop the matching entity from the local
    /// sequence. Exactly the entity whose id the server echoed back is
    /// removed; failures leave the sequence untouched.
    pub async fn delete_repository<C: ClientApi>(
        &mut self,
        api: &C,
        id: Uuid,
    ) -> Result<Repository, RepositoryStoreError> {
        let deleted = match delete_remote(api, id).await {
            Ok(deleted) => deleted,
            Err(e) => {
                error!("delete repository error: {}", e);
                return Err(e);
            }
        };

        self.repositories.retain(|r| r.id != deleted.id);
        Ok(deleted)
    }

    pub fn set_repositories(&mut self, repositories: Vec<Repository>) {
        self.repositories = repositories;
    }

    pub fn clear_repositories(&mut self) {
        self.repositories.clear();
    }
}

async fn fetch_repositories<C: ClientApi>(api: &C) -> Result<Vec<Repository>, RepositoryStoreError> {
    let envelope = api.get_repositories().await?;
    let payload = envelope
        .data
        .ok_or(RepositoryStoreError::MissingData("repositories"))?;
    Ok(payload.repositories)
}

async fn add_remote<C: ClientApi>(
    api: &C,
    data: &NewRepository,
) -> Result<Repository, RepositoryStoreError> {
    let envelope = api.add_repository(data).await?;
    let payload = envelope
        .data
        .ok_or(RepositoryStoreError::MissingData("createdRepository"))?;
    Ok(payload.created_repository)
}

async fn delete_remote<C: ClientApi>(api: &C, id: Uuid) -> Result<Repository, RepositoryStoreError> {
    let envelope = api.delete_repository(id).await?;
    let payload = envelope
        .data
        .ok_or(RepositoryStoreError::MissingData("repository"))?;
    Ok(payload.repository)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gm_rest_client_mock::{fixtures, MockClient};

    #[tokio::test]
    async fn get_repositories_replaces_local_sequence() {
        let repos = vec![fixtures::repository("alpha"), fixtures::repository("beta")];
        let api = MockClient::new().with_repositories(repos.clone());

        let mut store = RepositoryStore::new();
        store.set_repositories(vec![fixtures::repository("stale")]);

        store.get_repositories(&api).await.unwrap();

        assert_eq!(store.repositories().len(), 2);
        assert_eq!(store.repositories()[0].name, "alpha");
    }

    #[tokio::test]
    async fn get_repositories_failure_clears_sequence() {
        let api = MockClient::new().failing();
        let mut store = RepositoryStore::new();
        store.set_repositories(vec![fixtures::repository("alpha")]);

        let result = store.get_repositories(&api).await;

        assert!(result.is_err());
        assert!(store.repositories().is_empty());
    }

    #[tokio::test]
    async fn get_repositories_missing_data_clears_sequence() {
        let api = MockClient::new().missing_data();
        let mut store = RepositoryStore::new();
        store.set_repositories(vec![fixtures::repository("alpha")]);

        let result = store.get_repositories(&api).await;

        assert!(matches!(
            result,
            Err(RepositoryStoreError::MissingData("repositories"))
        ));
        assert!(store.repositories().is_empty());
    }

    #[tokio::test]
    async fn add_repository_appends_created_entity() {
        let api = MockClient::new();
        let mut store = RepositoryStore::new();

        let created = store
            .add_repository(&api, &fixtures::new_repository("gamma"))
            .await
            .unwrap();

        assert_eq!(store.repositories().len(), 1);
        assert_eq!(store.repositories()[0].id, created.id);
        assert_eq!(store.repositories()[0].name, "gamma");
    }

    #[tokio::test]
    async fn add_repository_failure_leaves_sequence_untouched() {
        let api = MockClient::new().failing();
        let mut store = RepositoryStore::new();
        store.set_repositories(vec![fixtures::repository("alpha")]);

        let result = store
            .add_repository(&api, &fixtures::new_repository("gamma"))
            .await;

        assert!(result.is_err());
        assert_eq!(store.repositories().len(), 1);
    }

    #[tokio::test]
    async fn add_then_refresh_does_not_duplicate() {
        let api = MockClient::new();
        let mut store = RepositoryStore::new();

        store
            .add_repository(&api, &fixtures::new_repository("gamma"))
            .await
            .unwrap();

        // The backend now reports the same set the store holds locally
        let refreshed = MockClient::new().with_repositories(store.repositories().to_vec());
        store.get_repositories(&refreshed).await.unwrap();

        assert_eq!(store.repositories().len(), 1);
    }

    #[tokio::test]
    async fn delete_repository_removes_exactly_the_matching_entity() {
        let alpha = fixtures::repository("alpha");
        let beta = fixtures::repository("beta");
        let api = MockClient::new().with_repositories(vec![alpha.clone(), beta.clone()]);

        let mut store = RepositoryStore::new();
        store.set_repositories(vec![alpha.clone(), beta.clone()]);

        let deleted = store.delete_repository(&api, alpha.id).await.unwrap();

        assert_eq!(deleted.id, alpha.id);
        assert_eq!(store.repositories().len(), 1);
        assert_eq!(store.repositories()[0].id, beta.id);
    }

    #[tokio::test]
    async fn delete_unknown_repository_leaves_sequence_untouched() {
        let alpha = fixtures::repository("alpha");
        let api = MockClient::new().with_repositories(vec![alpha.clone()]);

        let mut store = RepositoryStore::new();
        store.set_repositories(vec![alpha.clone()]);

        let result = store.delete_repository(&api, Uuid::new_v4()).await;

        assert!(result.is_err());
        assert_eq!(store.repositories().len(), 1);
    }
}
