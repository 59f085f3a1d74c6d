//! Ticker universe — S&P 500 and Nasdaq-100 constituents from Wikipedia.
//!
//! Wikipedia's constituent pages carry the member tables as plain HTML, so
//! the scrape is a CSS-selector walk over the first cell of each row. Both
//! index pages are fetched; any failure on either degrades to whatever the
//! other produced, and total failure returns the built-in emergency list.
//! Output is always deduplicated, sorted, and normalized for the bar
//! provider (class-share dots become dashes).

use super::provider::{DataError, UniverseProvider};
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{info, warn};

const SP500_URL: &str = "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies";
const NDX_URL: &str = "https://en.wikipedia.org/wiki/Nasdaq-100";

/// Emergency list used when both scrapes fail: large-cap names the scan can
/// still do useful work on.
pub const FALLBACK_TICKERS: &[&str] = &[
    "AAPL", "MSFT", "NVDA", "TSLA", "GOOGL", "AMZN", "META", "AMD", "AVGO", "COST", "PEP", "ADBE",
    "LIN", "NFLX", "INTC", "TMUS", "CSCO", "CMCSA", "TXN", "QCOM", "AMAT", "INTU", "AMGN", "ISRG",
    "HON", "BKNG", "MU", "VRTX", "REGN", "PANW", "LRCX", "ADP", "MDLZ", "GILD", "MELI", "PDD",
    "ADI", "SBUX", "BRK-B", "V", "JPM", "UNH", "MA", "XOM", "HD", "PG", "JNJ", "LLY", "ABBV",
    "CVX", "MRK", "MRVL", "ORCL", "ABT", "KO", "BAC", "SCHW", "TMO", "DIS", "WMT", "MCD", "PFE",
    "IBM", "GE", "CAT", "CRM", "UBER", "NOW", "AXP", "GS", "BA", "AMCR", "LOW", "NKE", "UPS",
    "MS", "BLK", "PLTR", "SNOW", "MSTR", "COIN", "SQ", "PYPL", "SHOP", "CRWD", "NET",
];

/// Universe provider scraping Wikipedia constituent tables.
pub struct WikipediaUniverse {
    client: reqwest::blocking::Client,
}

impl WikipediaUniverse {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }

    fn fetch_page(&self, url: &str) -> Result<String, DataError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| DataError::UniverseUnavailable(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(DataError::UniverseUnavailable(format!(
                "HTTP {} for {url}",
                resp.status()
            )));
        }
        resp.text()
            .map_err(|e| DataError::UniverseUnavailable(e.to_string()))
    }

    /// Extract ticker symbols from a Wikipedia constituents page.
    ///
    /// Finds each `wikitable` with a "Symbol" or "Ticker" header and reads
    /// the cell in that column of every row. The S&P 500 page keeps the
    /// symbol first, the Nasdaq-100 page does not, so the column position
    /// comes from the header rather than being assumed.
    fn extract_symbols(html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let table_sel = Selector::parse("table.wikitable").expect("static selector");
        let row_sel = Selector::parse("tr").expect("static selector");
        let cell_sel = Selector::parse("td").expect("static selector");
        let header_sel = Selector::parse("th").expect("static selector");

        let mut symbols = Vec::new();
        for table in document.select(&table_sel) {
            let symbol_column = table.select(&header_sel).position(|th| {
                let text = th.text().collect::<String>().trim().to_lowercase();
                text.starts_with("symbol") || text.starts_with("ticker")
            });
            let Some(column) = symbol_column else {
                continue;
            };

            for row in table.select(&row_sel) {
                let Some(cell) = row.select(&cell_sel).nth(column) else {
                    continue;
                };
                let text = cell.text().collect::<String>().trim().to_string();
                if looks_like_symbol(&text) {
                    symbols.push(text);
                }
            }
        }
        symbols
    }

    fn scrape(&self) -> Result<Vec<String>, DataError> {
        let mut raw = Vec::new();
        let mut failures = 0;

        for (name, url) in [("S&P 500", SP500_URL), ("Nasdaq-100", NDX_URL)] {
            match self.fetch_page(url).map(|html| Self::extract_symbols(&html)) {
                Ok(symbols) if !symbols.is_empty() => {
                    info!(index = name, count = symbols.len(), "loaded constituents");
                    raw.extend(symbols);
                }
                Ok(_) => {
                    warn!(index = name, "constituent table not found");
                    failures += 1;
                }
                Err(e) => {
                    warn!(index = name, error = %e, "constituent fetch failed");
                    failures += 1;
                }
            }
        }

        if failures == 2 {
            return Err(DataError::UniverseUnavailable(
                "both constituent pages failed".into(),
            ));
        }

        Ok(normalize(raw.iter().map(String::as_str)))
    }
}

impl Default for WikipediaUniverse {
    fn default() -> Self {
        Self::new()
    }
}

impl UniverseProvider for WikipediaUniverse {
    fn name(&self) -> &str {
        "wikipedia_constituents"
    }

    fn fetch(&self) -> Vec<String> {
        match self.scrape() {
            Ok(tickers) => tickers,
            Err(e) => {
                warn!(error = %e, "falling back to emergency ticker list");
                normalize(FALLBACK_TICKERS.iter().copied())
            }
        }
    }
}

/// Dedup, sort, and normalize separators (`BRK.B` → `BRK-B`).
pub fn normalize<'a>(tickers: impl Iterator<Item = &'a str>) -> Vec<String> {
    tickers
        .map(|t| t.trim().replace('.', "-"))
        .filter(|t| !t.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Heuristic for a US equity symbol cell: short, uppercase, no spaces.
fn looks_like_symbol(text: &str) -> bool {
    !text.is_empty()
        && text.len() <= 6
        && text
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '.' || c == '-')
}
