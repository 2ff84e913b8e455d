use reqwest::{Client, Url};
use ride_sync_lib::{known_ids::KnownIdSet, payload::RidePush};

use crate::{http, SyncError};

pub const GET_IDS: &str = "getids";

/// The spreadsheet webhook. A GET with `getids=true` lists the recorded ride
/// ids, a POST appends one ride.
#[derive(Clone)]
pub struct SheetWebhook {
    http: Client,
    url: Url,
}

impl SheetWebhook {
    pub fn new(http: Client, url: &str) -> Result<Self, SyncError> {
        let url = Url::parse(url).map_err(|err| SyncError::Config(format!("webhook url {url:?}: {err}")))?;
        Ok(Self { http, url })
    }

    pub fn ids_url(&self) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut().append_pair(GET_IDS, "true");
        url
    }

    pub async fn fetch_known_ids(&self) -> Result<KnownIdSet, SyncError> {
        let response = http::send(self.http.get(self.ids_url()), "sheet webhook id list").await?;
        http::read_json(response, "sheet webhook id list").await
    }

    /// Returns the webhook's response text.
    pub async fn push(&self, push: &RidePush) -> Result<String, SyncError> {
        let response = http::send(self.http.post(self.url.clone()).json(push), "sheet webhook").await?;
        response
            .text()
            .await
            .map_err(|err| SyncError::Request(format!("sheet webhook response: {err}")))
    }
}

#[test]
fn test_ids_url_keeps_existing_query() {
    let webhook = SheetWebhook::new(Client::new(), "https://script.example/macros/s/abc/exec").unwrap();
    assert_eq!(webhook.ids_url().as_str(), "https://script.example/macros/s/abc/exec?getids=true");

    let webhook = SheetWebhook::new(Client::new(), "https://script.example/exec?sheet=rides").unwrap();
    assert_eq!(webhook.ids_url().as_str(), "https://script.example/exec?sheet=rides&getids=true");
}
