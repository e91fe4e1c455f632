use std::marker::PhantomData;

use reqwest::Method;

use crate::{
    api_client::{ApiClient, ApiError},
    resources::Resource,
};

/// CRUD over one backend collection, e.g. `/roles/` and `/roles/{id}`.
pub struct ResourceApiClient<R: Resource> {
    client: ApiClient,
    _resource: PhantomData<R>,
}

impl<R: Resource> Clone for ResourceApiClient<R> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone())
    }
}

impl<R: Resource> ResourceApiClient<R> {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    fn item_path(id: i64) -> String {
        format!("{}{}", R::KIND.collection_path(), id)
    }

    pub async fn list(&self) -> Result<Vec<R>, ApiError> {
        let request = self
            .client
            .request(Method::GET, R::KIND.collection_path())
            .await?;
        self.client.send(request).await
    }

    pub async fn get(&self, id: i64) -> Result<R, ApiError> {
        let request = self.client.request(Method::GET, &Self::item_path(id)).await?;
        self.client.send(request).await
    }

    pub async fn create(&self, draft: &R::Draft) -> Result<R, ApiError> {
        let request = self
            .client
            .request(Method::POST, R::KIND.collection_path())
            .await?
            .json(draft);
        self.client.send(request).await
    }

    pub async fn update(&self, id: i64, draft: &R::Draft) -> Result<R, ApiError> {
        let request = self
            .client
            .request(Method::PUT, &Self::item_path(id))
            .await?
            .json(draft);
        self.client.send(request).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let request = self
            .client
            .request(Method::DELETE, &Self::item_path(id))
            .await?;
        self.client.send_discarding(request).await
    }
}
