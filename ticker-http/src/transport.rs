use reqwest::{Client, Response, StatusCode};
use ticker_core::TickerError;

/// Issue a GET and require `200 OK`.
///
/// The response is dropped on the error path, which releases the connection.
pub(crate) async fn get_ok(http: &Client, url: &str) -> Result<Response, TickerError> {
    #[cfg(feature = "tracing")]
    tracing::debug!(target: "ticker::http", url, "loading content");

    let resp = http
        .get(url)
        .send()
        .await
        .map_err(|e| TickerError::fetch(url, e.to_string()))?;

    #[cfg(feature = "tracing")]
    tracing::debug!(target: "ticker::http", url, status = resp.status().as_u16(), "got response");

    if resp.status() != StatusCode::OK {
        return Err(TickerError::status(url, resp.status().as_u16()));
    }
    Ok(resp)
}
