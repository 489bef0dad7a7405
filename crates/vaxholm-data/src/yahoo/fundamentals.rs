//! Fundamental data fetching from Yahoo Finance.
//!
//! Yahoo's quoteSummary endpoint requires a session cookie plus a crumb token
//! obtained from `getcrumb`. The crumb is fetched lazily, cached for the life of
//! the provider, and refreshed once when the endpoint answers 401.

use crate::error::{DataError, Result};
use crate::throttle::RequestPacer;
use reqwest::header::REFERER;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URLS: [&str; 2] = [
    "https://query1.finance.yahoo.com/v1/test/getcrumb",
    "https://query2.finance.yahoo.com/v1/test/getcrumb",
];
const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";
const MODULES: &str = "price,summaryDetail,financialData,assetProfile";
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";

/// Company fundamentals snapshot.
///
/// Every field is optional; a provider answering with malformed or
/// non-numeric values leaves the field empty rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    /// Stock symbol as queried
    pub symbol: String,
    /// Current price (`financialData.currentPrice`)
    #[serde(default)]
    pub current_price: Option<f64>,
    /// Regular market price (`price.regularMarketPrice`)
    #[serde(default)]
    pub regular_market_price: Option<f64>,
    /// Trailing annual dividend per share, in the quote currency
    #[serde(default)]
    pub trailing_annual_dividend_rate: Option<f64>,
    /// Trailing annual dividend yield as a fraction (0.034 = 3.4%)
    #[serde(default)]
    pub trailing_annual_dividend_yield: Option<f64>,
    /// Sector
    #[serde(default)]
    pub sector: Option<String>,
    /// Industry
    #[serde(default)]
    pub industry: Option<String>,
    /// Short display name
    #[serde(default)]
    pub short_name: Option<String>,
    /// Long display name
    #[serde(default)]
    pub long_name: Option<String>,
}

impl Fundamentals {
    /// An empty record for `symbol`.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }
}

/// Endpoints of the cookie/crumb handshake.
#[derive(Debug, Clone)]
struct Handshake {
    cookie: String,
    crumb: Vec<String>,
}

impl Default for Handshake {
    fn default() -> Self {
        Self {
            cookie: COOKIE_URL.to_string(),
            crumb: CRUMB_URLS.iter().map(|url| (*url).to_string()).collect(),
        }
    }
}

/// Yahoo Finance fundamentals provider.
pub struct YahooFundamentalsProvider {
    client: reqwest::Client,
    crumb: Mutex<Option<String>>,
    pacer: Arc<RequestPacer>,
    handshake: Handshake,
}

impl std::fmt::Debug for YahooFundamentalsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooFundamentalsProvider")
            .field("pacer", &self.pacer)
            .finish_non_exhaustive()
    }
}

impl YahooFundamentalsProvider {
    /// Create a provider whose requests, handshake included, go through `pacer`.
    pub fn new(pacer: Arc<RequestPacer>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            crumb: Mutex::new(None),
            pacer,
            handshake: Handshake::default(),
        })
    }

    async fn send(&self, request: RequestBuilder) -> reqwest::Result<Response> {
        self.pacer.wait().await;
        request.send().await
    }

    /// Fetch fundamental data for a single symbol.
    pub async fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let crumb = self.crumb().await?;
        let (status, body) = self.quote_summary(symbol, &crumb).await?;

        let body = if status == StatusCode::UNAUTHORIZED {
            tracing::debug!(symbol, "crumb rejected, refreshing");
            self.crumb.lock().await.take();
            let crumb = self.crumb().await?;
            let (status, body) = self.quote_summary(symbol, &crumb).await?;
            Self::ensure_success(status, symbol)?;
            body
        } else {
            Self::ensure_success(status, symbol)?;
            body
        };

        parse_quote_summary(symbol, &body)
    }

    async fn quote_summary(&self, symbol: &str, crumb: &str) -> Result<(StatusCode, String)> {
        tracing::debug!(symbol, "fetching quoteSummary");

        let request = self
            .client
            .get(format!("{QUOTE_SUMMARY_URL}/{symbol}"))
            .query(&[("modules", MODULES), ("crumb", crumb)])
            .header(REFERER, "https://finance.yahoo.com/");
        let response = self.send(request).await?;

        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    fn ensure_success(status: StatusCode, symbol: &str) -> Result<()> {
        if status.is_success() {
            Ok(())
        } else {
            Err(DataError::Http {
                status: status.as_u16(),
                endpoint: format!("{QUOTE_SUMMARY_URL}/{symbol}"),
            })
        }
    }

    /// Return the cached crumb, performing the cookie/crumb handshake on first use.
    async fn crumb(&self) -> Result<String> {
        let mut cached = self.crumb.lock().await;
        if let Some(crumb) = cached.as_ref() {
            return Ok(crumb.clone());
        }

        // fc.yahoo.com answers 404 but sets the session cookie.
        if let Err(e) = self.send(self.client.get(&self.handshake.cookie)).await {
            tracing::debug!(error = %e, "cookie request failed");
        }

        for endpoint in &self.handshake.crumb {
            let request = self
                .client
                .get(endpoint)
                .header(REFERER, "https://finance.yahoo.com/");
            let response = match self.send(request).await {
                Ok(response) if response.status().is_success() => response,
                Ok(response) => {
                    tracing::debug!(endpoint = %endpoint, status = %response.status(), "crumb endpoint refused");
                    continue;
                }
                Err(e) => {
                    tracing::debug!(endpoint = %endpoint, error = %e, "crumb endpoint unreachable");
                    continue;
                }
            };

            let body = response.text().await?;
            let crumb = body.trim();
            if is_plausible_crumb(crumb) {
                *cached = Some(crumb.to_string());
                return Ok(crumb.to_string());
            }
        }

        Err(DataError::YahooApi(
            "failed to obtain a crumb from any endpoint".to_string(),
        ))
    }
}

fn is_plausible_crumb(body: &str) -> bool {
    !body.is_empty()
        && body.len() < 100
        && !body.contains(char::is_whitespace)
        && !body.contains('<')
        && !body.to_lowercase().contains("too many requests")
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryBody {
    #[serde(default)]
    result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResult {
    #[serde(default)]
    price: Option<PriceModule>,
    #[serde(default)]
    summary_detail: Option<SummaryDetailModule>,
    #[serde(default)]
    financial_data: Option<FinancialDataModule>,
    #[serde(default)]
    asset_profile: Option<AssetProfileModule>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    #[serde(default)]
    short_name: Option<Value>,
    #[serde(default)]
    long_name: Option<Value>,
    #[serde(default)]
    regular_market_price: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetailModule {
    #[serde(default)]
    trailing_annual_dividend_rate: Option<Value>,
    #[serde(default)]
    trailing_annual_dividend_yield: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialDataModule {
    #[serde(default)]
    current_price: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct AssetProfileModule {
    #[serde(default)]
    sector: Option<Value>,
    #[serde(default)]
    industry: Option<Value>,
}

/// Yahoo wraps numbers as `{"raw": 1.23, "fmt": "1.23"}`; bare numbers are accepted too.
fn number(value: Option<&Value>) -> Option<f64> {
    let value = value?;
    let raw = match value {
        Value::Object(map) => map.get("raw")?,
        other => other,
    };
    raw.as_f64().filter(|v| v.is_finite())
}

fn text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse a quoteSummary response body into [`Fundamentals`].
pub fn parse_quote_summary(symbol: &str, body: &str) -> Result<Fundamentals> {
    let response: QuoteSummaryResponse = serde_json::from_str(body)?;

    let result = response
        .quote_summary
        .result
        .and_then(|mut results| (!results.is_empty()).then(|| results.swap_remove(0)));

    let Some(result) = result else {
        let reason = response
            .quote_summary
            .error
            .filter(|e| !e.is_null())
            .map_or_else(|| "empty quoteSummary result".to_string(), |e| e.to_string());
        return Err(DataError::missing(symbol, reason));
    };

    let price = result.price.unwrap_or_default();
    let detail = result.summary_detail.unwrap_or_default();
    let financial = result.financial_data.unwrap_or_default();
    let profile = result.asset_profile.unwrap_or_default();

    Ok(Fundamentals {
        symbol: symbol.to_string(),
        current_price: number(financial.current_price.as_ref()),
        regular_market_price: number(price.regular_market_price.as_ref()),
        trailing_annual_dividend_rate: number(detail.trailing_annual_dividend_rate.as_ref()),
        trailing_annual_dividend_yield: number(detail.trailing_annual_dividend_yield.as_ref()),
        sector: text(profile.sector.as_ref()),
        industry: text(profile.industry.as_ref()),
        short_name: text(price.short_name.as_ref()),
        long_name: text(price.long_name.as_ref()),
    })
}
