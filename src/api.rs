// API client module: a small blocking HTTP client that pushes tests and
// their permutations to the test server. Requests go out one at a time
// and each response is handed back to the caller untouched.

use crate::error::{PushError, Result};
use crate::form;
use crate::layout::TestDir;
use crate::model::{Permutation, Test};
use reqwest::blocking::{multipart::Form, Client};
use reqwest::StatusCode;
use std::fmt;
use tracing::{debug, info};

/// Server used when `TEST_PUSH_SERVER` is not set.
pub const DEFAULT_SERVER: &str = "http://test-server-161210.appspot.com";

/// Blocking client bound to one test server.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// What the server said about one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Status 200; the body is the key the server stored the upload under.
    Accepted(String),
    Rejected { status: StatusCode, body: String },
}

impl UploadOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, UploadOutcome::Accepted(_))
    }
}

impl fmt::Display for UploadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadOutcome::Accepted(key) => write!(f, "key = {}", key),
            UploadOutcome::Rejected { status, body } => {
                write!(f, "Status Code {}: {}", status.as_u16(), body)
            }
        }
    }
}

impl ApiClient {
    /// Create a client for `base_url` (scheme and host, no trailing path).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(PushError::Request)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(ApiClient { client, base_url })
    }

    /// Client configured by `TEST_PUSH_SERVER`, falling back to
    /// [`DEFAULT_SERVER`].
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("TEST_PUSH_SERVER").unwrap_or_else(|_| DEFAULT_SERVER.into());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload the test metadata with both test-level PDFs.
    pub fn push_test(&self, dir: &TestDir, test: &Test) -> Result<UploadOutcome> {
        let url = format!("{}/test", self.base_url);
        info!(id = test.id, title = %test.title, "pushing test");
        self.post(&url, form::test_form(dir, test)?)
    }

    /// Upload one permutation of the test identified by `test.id`.
    pub fn push_permutation(
        &self,
        dir: &TestDir,
        test: &Test,
        perm: &Permutation,
    ) -> Result<UploadOutcome> {
        let url = format!("{}/test/{}/permutation", self.base_url, test.id);
        debug!(index = perm.index, "pushing permutation");
        self.post(&url, form::permutation_form(dir, perm)?)
    }

    fn post(&self, url: &str, form: Form) -> Result<UploadOutcome> {
        let request = self
            .client
            .post(url)
            .multipart(form)
            .build()
            .map_err(PushError::Request)?;
        let res = self.client.execute(request).map_err(PushError::Http)?;
        let status = res.status();
        if status == StatusCode::OK {
            let key = res.text().map_err(PushError::ResponseBody)?;
            Ok(UploadOutcome::Accepted(key))
        } else {
            let body = res.text().unwrap_or_else(|_| "".into());
            Ok(UploadOutcome::Rejected { status, body })
        }
    }
}
