use tracing::{debug, warn};

use crate::{
    api_client::resource::ResourceApiClient,
    console::notice::Notice,
    resources::{DraftMode, Resource, Validate},
};

/// List/search/create/edit/delete screen over one collection.
///
/// The backend is the only authority: the panel never patches its rows
/// locally and refetches after every successful mutation.
pub struct ResourcePanel<R: Resource> {
    client: ResourceApiClient<R>,
    rows: Vec<R>,
    query: String,
}

impl<R: Resource> ResourcePanel<R> {
    pub fn new(client: ResourceApiClient<R>) -> Self {
        Self {
            client,
            rows: vec![],
            query: String::new(),
        }
    }

    /// Fetches the collection. On failure the previous rows are kept.
    pub async fn refresh(&mut self) -> Result<(), Notice> {
        match self.client.list().await {
            Ok(rows) => {
                debug!("fetched {} {}", rows.len(), R::KIND.plural());
                self.rows = rows;
                Ok(())
            }
            Err(e) => {
                warn!("failed to fetch {}: {}", R::KIND.plural(), e);
                Err(Notice::error(format!("Failed to fetch {}", R::KIND.plural())))
            }
        }
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn all(&self) -> &[R] {
        &self.rows
    }

    /// Rows matching the current search; everything when the search is empty.
    pub fn rows(&self) -> Vec<&R> {
        if self.query.is_empty() {
            return self.rows.iter().collect();
        }

        self.rows.iter().filter(|row| row.matches(&self.query)).collect()
    }

    pub async fn get(&self, id: i64) -> Result<R, Notice> {
        self.client.get(id).await.map_err(|e| {
            warn!("failed to fetch {} {}: {}", R::KIND.singular(), id, e);
            Notice::error(
                e.detail()
                    .map(String::from)
                    .unwrap_or_else(|| format!("Failed to fetch {}", R::KIND.singular())),
            )
        })
    }

    /// Creates when `editing` is `None`, otherwise updates that id.
    pub async fn save(&mut self, draft: &R::Draft, editing: Option<i64>) -> Notice {
        let mode = match editing {
            Some(_) => DraftMode::Update,
            None => DraftMode::Create,
        };

        let hints = draft.validate(mode);
        if !hints.is_empty() {
            return Notice::warning(hints.join("; "));
        }

        let result = match editing {
            Some(id) => self.client.update(id, draft).await.map(|_| "updated"),
            None => self.client.create(draft).await.map(|_| "created"),
        };

        match result {
            Ok(verb) => {
                let done = Notice::success(format!("{} {} successfully!", R::KIND.title(), verb));
                self.refetch_after(done).await
            }
            Err(e) => {
                warn!("failed to save {}: {}", R::KIND.singular(), e);
                Notice::error(
                    e.detail()
                        .map(String::from)
                        .unwrap_or_else(|| format!("Error saving {}", R::KIND.singular())),
                )
            }
        }
    }

    /// Nothing is sent until the caller confirms.
    pub async fn delete(&mut self, id: i64, confirmed: bool) -> Notice {
        if !confirmed {
            return Notice::warning(format!(
                "Are you sure you want to delete {} {}?",
                R::KIND.singular(),
                id
            ));
        }

        match self.client.delete(id).await {
            Ok(()) => {
                let done = Notice::success(format!("{} deleted successfully!", R::KIND.title()));
                self.refetch_after(done).await
            }
            Err(e) => {
                warn!("failed to delete {} {}: {}", R::KIND.singular(), id, e);
                Notice::error(format!("Failed to delete {}", R::KIND.singular()))
            }
        }
    }

    /// The mutation went through either way; a failed refetch only
    /// downgrades the notice.
    async fn refetch_after(&mut self, done: Notice) -> Notice {
        match self.refresh().await {
            Ok(()) => done,
            Err(failed) => Notice::warning(format!("{done} ({failed})")),
        }
    }
}
