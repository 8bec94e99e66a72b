//! HTTP retrieval seam and a blocking reqwest adapter.

use hostlist_core::HostAttributes;
use tracing::{debug, warn};

use crate::{HostsConfig, HostsError};

/// Status and body of an HTTP GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP GET used for the topology and host list documents.
pub trait HttpGet {
    /// Fetch `url`. Transport failures map to [`HostsError::Retrieval`];
    /// a non-success status is returned, not raised.
    fn get(&self, url: &str) -> Result<HttpResponse, HostsError>;
}

impl<T: HttpGet + ?Sized> HttpGet for &T {
    fn get(&self, url: &str) -> Result<HttpResponse, HostsError> {
        (**self).get(url)
    }
}

/// Fetch the host list feed at `url` and materialize one record per `Item`.
pub fn fetch_host_list<H: HttpGet + ?Sized>(
    http: &H,
    url: &str,
) -> Result<Vec<HostAttributes>, HostsError> {
    let response = http.get(url)?;
    if !response.is_success() {
        warn!(url, status = response.status, "host list request failed");
        return Err(HostsError::Retrieval(format!(
            "HTTP {} fetching {url}",
            response.status
        )));
    }
    let list = hostlist_xml::parse(&response.body)?;
    debug!(url, hosts = list.len(), "fetched host list");
    Ok(list.items.into_iter().map(HostAttributes::from).collect())
}

/// Blocking adapter turning an asynchronous [`reqwest::Client`] into an
/// [`HttpGet`] implementation.
///
/// Requests are driven by the provided [`tokio::runtime::Handle`]; callers
/// must invoke [`HttpGet::get`] from outside of the runtime context to avoid
/// nested `block_on` panics.
pub struct ReqwestHttp {
    handle: tokio::runtime::Handle,
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(handle: tokio::runtime::Handle, config: &HostsConfig) -> Result<Self, HostsError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| HostsError::Retrieval(format!("create HTTP client: {err}")))?;
        Ok(Self { handle, client })
    }
}

impl HttpGet for ReqwestHttp {
    fn get(&self, url: &str) -> Result<HttpResponse, HostsError> {
        debug!(url, "http get");
        self.handle.block_on(async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|err| HostsError::Retrieval(format!("GET {url}: {err}")))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|err| HostsError::Retrieval(format!("read body of {url}: {err}")))?;
            Ok::<_, HostsError>(HttpResponse { status, body })
        })
    }
}
