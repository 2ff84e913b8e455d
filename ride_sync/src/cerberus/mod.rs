//! Client for the Cerberus telemetry API.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::{http, SyncError};

pub mod constants;
mod fetcher;
mod resolver;

pub use fetcher::RideFetcher;
pub use resolver::IdentityResolver;

#[derive(Clone)]
pub struct CerberusClient {
    http: Client,
    base_url: Url,
    api_token: String,
}

impl CerberusClient {
    pub fn new(http: Client, base_url: &str, api_token: String) -> Result<Self, SyncError> {
        let parsed = Url::parse(base_url).map_err(|err| SyncError::Config(format!("api base url {base_url:?}: {err}")))?;
        if parsed.cannot_be_a_base() {
            return Err(SyncError::Config(format!("api base url {base_url:?} cannot carry a path")));
        }

        Ok(Self {
            http,
            base_url: parsed,
            api_token,
        })
    }

    /// `query` is used as is. Sort values carry a `%20` separator the API expects literally.
    pub(crate) fn endpoint(&self, path: &str, query: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(path);
        }
        url.set_query(Some(query));
        url
    }

    pub(crate) async fn get_json<T>(&self, url: Url, what: &str) -> Result<T, SyncError>
    where
        T: DeserializeOwned,
    {
        let request = self.http.get(url).bearer_auth(&self.api_token);
        let response = http::send(request, what).await?;
        http::read_json(response, what).await
    }
}
