//! Drive REST calls: token refresh, file listing, text download.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::DriveError;

/// Google token endpoint.
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Drive v3 files collection.
pub const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

/// Field projection for listings; keeps responses small.
const LIST_FIELDS: &str = "files(id,name,mimeType,modifiedTime,size),nextPageToken";

/// Download cap; Drive documents can be arbitrarily large.
pub const DEFAULT_MAX_DOWNLOAD_BYTES: usize = 250_000;

const LIST_TIMEOUT: Duration = Duration::from_secs(30);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Mime prefix for Google-native documents, which must be exported.
const GOOGLE_APPS_PREFIX: &str = "application/vnd.google-apps.";

/// Endpoint URLs, overridable for tests.
#[derive(Clone, Debug)]
pub struct DriveEndpoints {
    /// OAuth token endpoint (for refresh grants).
    pub token_url: String,
    /// Drive v3 files collection URL.
    pub files_url: String,
}

impl Default for DriveEndpoints {
    fn default() -> Self {
        Self {
            token_url: GOOGLE_TOKEN_URL.to_string(),
            files_url: DRIVE_FILES_URL.to_string(),
        }
    }
}

/// One file in a listing.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DriveFile {
    /// Drive file id.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Mime type; decides the download path.
    #[serde(default, rename = "mimeType")]
    pub mime_type: String,
    /// Last modification timestamp, RFC 3339.
    #[serde(default, rename = "modifiedTime")]
    pub modified_time: Option<String>,
    /// Size in bytes; absent for Google-native documents.
    #[serde(default)]
    pub size: Option<String>,
}

/// Files listing response.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct FileList {
    /// Files in this page.
    #[serde(default)]
    pub files: Vec<DriveFile>,
    /// Continuation token, when more pages exist.
    #[serde(default, rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct RefreshResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// HTTP client for the Drive v3 API.
#[derive(Clone, Debug)]
pub struct DriveClient {
    endpoints: DriveEndpoints,
    http: reqwest::Client,
}

impl DriveClient {
    /// Create a client against the production Google endpoints.
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoints(DriveEndpoints::default())
    }

    /// Create a client against explicit endpoints (tests point this at a
    /// local mock server).
    #[must_use]
    pub fn with_endpoints(endpoints: DriveEndpoints) -> Self {
        Self {
            endpoints,
            http: reqwest::Client::new(),
        }
    }

    /// Trade a stored refresh token for a fresh access token.
    #[tracing::instrument(skip_all)]
    pub async fn refresh_access_token(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<String, DriveError> {
        let form = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];
        let resp = self
            .http
            .post(&self.endpoints.token_url)
            .timeout(LIST_TIMEOUT)
            .form(&form)
            .send()
            .await?;
        let parsed: RefreshResponse = check_status(resp).await?.json().await?;
        parsed
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(DriveError::MissingAccessToken)
    }

    /// List files, optionally filtered by a Drive query expression.
    #[tracing::instrument(skip_all, fields(page_size))]
    pub async fn list_files(
        &self,
        access_token: &str,
        query: &str,
        page_size: u32,
    ) -> Result<FileList, DriveError> {
        let page_size = page_size.to_string();
        let mut params = vec![
            ("pageSize", page_size.as_str()),
            ("fields", LIST_FIELDS),
        ];
        let query = query.trim();
        if !query.is_empty() {
            params.push(("q", query));
        }
        let resp = self
            .http
            .get(&self.endpoints.files_url)
            .timeout(LIST_TIMEOUT)
            .bearer_auth(access_token)
            .query(&params)
            .send()
            .await?;
        check_status(resp).await?.json().await.map_err(Into::into)
    }

    /// Download a bounded plain-text rendition of a file.
    ///
    /// Google-native documents go through `/export` (spreadsheets as CSV,
    /// everything else as plain text); regular files are fetched with
    /// `alt=media`. The body is truncated to `max_bytes` and decoded
    /// lossily.
    #[tracing::instrument(skip_all, fields(file_id, mime_type))]
    pub async fn download_text(
        &self,
        access_token: &str,
        file_id: &str,
        mime_type: &str,
        max_bytes: usize,
    ) -> Result<String, DriveError> {
        let file_url = format!("{}/{file_id}", self.endpoints.files_url);
        let request = if mime_type.starts_with(GOOGLE_APPS_PREFIX) {
            let export_mime = if mime_type.ends_with(".spreadsheet") {
                "text/csv"
            } else {
                "text/plain"
            };
            self.http
                .get(format!("{file_url}/export"))
                .query(&[("mimeType", export_mime)])
        } else {
            self.http.get(file_url).query(&[("alt", "media")])
        };

        let resp = request
            .timeout(DOWNLOAD_TIMEOUT)
            .bearer_auth(access_token)
            .send()
            .await?;
        let body = check_status(resp).await?.bytes().await?;
        let truncated = &body[..body.len().min(max_bytes)];
        Ok(String::from_utf8_lossy(truncated).into_owned())
    }
}

impl Default for DriveClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Map non-2xx responses to [`DriveError::Api`] with the body attached.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, DriveError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(DriveError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> DriveClient {
        DriveClient::with_endpoints(DriveEndpoints {
            token_url: format!("{}/token", server.uri()),
            files_url: format!("{}/drive/v3/files", server.uri()),
        })
    }

    #[tokio::test]
    async fn refresh_posts_grant_and_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=stored-rt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "fresh-at", "expires_in": 3599
            })))
            .mount(&server)
            .await;

        let token = client_for(&server)
            .refresh_access_token("cid", "csecret", "stored-rt")
            .await
            .unwrap();
        assert_eq!(token, "fresh-at");
    }

    #[tokio::test]
    async fn refresh_without_access_token_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"scope": "drive"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .refresh_access_token("cid", "csecret", "rt")
            .await
            .unwrap_err();
        assert_matches!(err, DriveError::MissingAccessToken);
    }

    #[tokio::test]
    async fn list_files_sends_projection_and_optional_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/drive/v3/files"))
            .and(header("authorization", "Bearer at"))
            .and(query_param("pageSize", "20"))
            .and(query_param("fields", LIST_FIELDS))
            .and(query_param("q", "name contains 'report'"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "files": [
                    {"id": "f1", "name": "report.txt", "mimeType": "text/plain",
                     "modifiedTime": "2026-01-02T03:04:05Z", "size": "123"}
                ],
                "nextPageToken": "page2"
            })))
            .mount(&server)
            .await;

        let listing = client_for(&server)
            .list_files("at", "  name contains 'report'  ", 20)
            .await
            .unwrap();
        assert_eq!(listing.files.len(), 1);
        assert_eq!(listing.files[0].name, "report.txt");
        assert_eq!(listing.next_page_token.as_deref(), Some("page2"));
    }

    #[tokio::test]
    async fn regular_file_downloads_with_alt_media() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/drive/v3/files/f1"))
            .and(query_param("alt", "media"))
            .respond_with(ResponseTemplate::new(200).set_body_string("plain body"))
            .mount(&server)
            .await;

        let text = client_for(&server)
            .download_text("at", "f1", "text/plain", 1000)
            .await
            .unwrap();
        assert_eq!(text, "plain body");
    }

    #[tokio::test]
    async fn google_doc_exports_as_text_and_spreadsheet_as_csv() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/drive/v3/files/doc1/export"))
            .and(query_param("mimeType", "text/plain"))
            .respond_with(ResponseTemplate::new(200).set_body_string("doc body"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/drive/v3/files/sheet1/export"))
            .and(query_param("mimeType", "text/csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("a,b\n1,2"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let doc = client
            .download_text("at", "doc1", "application/vnd.google-apps.document", 1000)
            .await
            .unwrap();
        assert_eq!(doc, "doc body");
        let sheet = client
            .download_text("at", "sheet1", "application/vnd.google-apps.spreadsheet", 1000)
            .await
            .unwrap();
        assert_eq!(sheet, "a,b\n1,2");
    }

    #[tokio::test]
    async fn download_truncates_to_max_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/drive/v3/files/big"))
            .respond_with(ResponseTemplate::new(200).set_body_string("abcdefghij"))
            .mount(&server)
            .await;

        let text = client_for(&server)
            .download_text("at", "big", "text/plain", 4)
            .await
            .unwrap();
        assert_eq!(text, "abcd");
    }

    #[tokio::test]
    async fn api_error_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/drive/v3/files"))
            .respond_with(ResponseTemplate::new(403).set_body_string("insufficient scope"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_files("at", "", 10).await.unwrap_err();
        assert_matches!(err, DriveError::Api { status: 403, ref message } if message.contains("scope"));
    }
}
