//! WebDAV uploads
//!
//! Directories are created with `MKCOL` (405 means it already exists) and
//! files are stored with `PUT`. Both use basic auth with the access token as
//! the user name and an empty password.

use reqwest::blocking::Client;
use reqwest::{Method, StatusCode};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, SyncError};
use crate::remote::{directory_chain, parent_directory};

const MKCOL_TIMEOUT: Duration = Duration::from_secs(10);
const PUT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where uploaded files end up
pub trait RemoteStore {
    /// Create every directory from the root down to `remote_dir`
    fn ensure_directory(&self, remote_dir: &str) -> Result<()>;

    /// Store `body` at `remote_path`, replacing whatever was there
    fn put(&self, remote_path: &str, body: Vec<u8>) -> Result<()>;
}

/// Upload a local file, creating its remote parent directories first
pub fn upload(store: &dyn RemoteStore, local_path: &Path, remote_path: &str) -> Result<()> {
    if let Some(dir) = parent_directory(remote_path) {
        store.ensure_directory(dir)?;
    }

    let body = fs::read(local_path).map_err(|source| SyncError::Io {
        path: local_path.to_path_buf(),
        source,
    })?;

    store.put(remote_path, body)
}

/// A WebDAV server reached over HTTP(S)
pub struct WebDavStore {
    client: Client,
    base_url: String,
    token: String,
}

impl WebDavStore {
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("dav-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SyncError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn url(&self, remote_path: &str) -> String {
        format!("{}/{}", self.base_url, remote_path.trim_start_matches('/'))
    }

    fn mkcol(&self, remote_dir: &str) -> Result<()> {
        let url = self.url(remote_dir);
        let method = Method::from_bytes(b"MKCOL")
            .map_err(|e| SyncError::transport("MKCOL", &url, e))?;

        let response = self
            .client
            .request(method, &url)
            .basic_auth(&self.token, Some(""))
            .timeout(MKCOL_TIMEOUT)
            .send()
            .map_err(|e| SyncError::transport("MKCOL", &url, e))?;

        match response.status() {
            StatusCode::CREATED | StatusCode::METHOD_NOT_ALLOWED => Ok(()),
            status => Err(SyncError::transport("MKCOL", &url, status)),
        }
    }
}

impl RemoteStore for WebDavStore {
    fn ensure_directory(&self, remote_dir: &str) -> Result<()> {
        for dir in directory_chain(remote_dir) {
            self.mkcol(&dir)?;
        }
        Ok(())
    }

    fn put(&self, remote_path: &str, body: Vec<u8>) -> Result<()> {
        let url = self.url(remote_path);

        let response = self
            .client
            .put(&url)
            .basic_auth(&self.token, Some(""))
            .timeout(PUT_TIMEOUT)
            .body(body)
            .send()
            .map_err(|e| SyncError::transport("PUT", &url, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().unwrap_or_default();
            return Err(SyncError::transport(
                "PUT",
                &url,
                format!("{} {}", status, text.trim()),
            ));
        }

        Ok(())
    }
}
