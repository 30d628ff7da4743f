//! HTTP client for end-to-end tests
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    pub base_url: String,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /
    pub async fn get_stats(&self) -> Response {
        self.get("/").await
    }

    /// GET /albums
    pub async fn get_albums(&self) -> Response {
        self.get("/albums").await
    }

    /// GET /albums/{id}
    pub async fn get_album(&self, id: &str) -> Response {
        self.get(&format!("/albums/{}", id)).await
    }

    /// POST /albums with a JSON body
    pub async fn post_album(&self, body: &serde_json::Value) -> Response {
        self.client
            .post(format!("{}/albums", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// POST /albums with a raw body labelled as JSON
    pub async fn post_album_raw(&self, body: &str) -> Response {
        self.post_album_with_content_type(body, "application/json").await
    }

    /// POST /albums with a raw body and an arbitrary content type
    pub async fn post_album_with_content_type(&self, body: &str, content_type: &str) -> Response {
        self.client
            .post(format!("{}/albums", self.base_url))
            .header("content-type", content_type)
            .body(body.to_owned())
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /albumsByName/{name}
    pub async fn get_albums_by_name(&self, name: &str) -> Response {
        self.get(&format!("/albumsByName/{}", urlencoding::encode(name)))
            .await
    }

    /// GET /tracks
    pub async fn get_tracks(&self) -> Response {
        self.get("/tracks").await
    }

    /// GET /counter
    pub async fn get_counter(&self) -> Response {
        self.get("/counter").await
    }
}
