//! Forward/backward paging through the location-area listing.

use tracing::debug;

use pokedex_core::error::{PokedexError, Result};
use pokedex_core::types::LocationAreaPage;

use crate::client::PokeApiClient;

/// Remembers where the user is in the location-area listing.
///
/// The cursor only moves after a page loads successfully, so a failed
/// request can simply be retried.
#[derive(Clone, Debug, Default)]
pub struct LocationCursor {
    current: Option<String>,
    next: Option<String>,
    previous: Option<String>,
}

impl LocationCursor {
    /// Creates a cursor positioned before the first page.
    pub fn new() -> Self {
        Self::default()
    }

    /// URL of the page shown last, if any.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Returns true if [`previous_page`](Self::previous_page) would succeed.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Loads the page after the current one, or the first page if nothing was shown yet.
    pub async fn next_page(&mut self, client: &PokeApiClient) -> Result<LocationAreaPage> {
        let url = match (&self.current, &self.next) {
            (None, _) => client.first_page_url(),
            (Some(_), Some(next)) => next.clone(),
            (Some(_), None) => return Err(PokedexError::NoMorePages),
        };
        self.load(client, url).await
    }

    /// Loads the page before the current one.
    pub async fn previous_page(&mut self, client: &PokeApiClient) -> Result<LocationAreaPage> {
        let url = self.previous.clone().ok_or(PokedexError::FirstPage)?;
        self.load(client, url).await
    }

    async fn load(&mut self, client: &PokeApiClient, url: String) -> Result<LocationAreaPage> {
        let page = client.location_areas(&url).await?;
        debug!(url = %url, next = ?page.next, previous = ?page.previous, "Moved location cursor");
        self.next = page.next.clone();
        self.previous = page.previous.clone();
        self.current = Some(url);
        Ok(page)
    }
}
