//! # NIST Chemistry WebBook Scraper Module
//!
//! ## Aim
//! This module retrieves thermodynamic tables and phase-change data for a compound from the
//! NIST Chemistry WebBook (https://webbook.nist.gov). The compound is first identified by
//! formula or name, then its JANAF-type thermochemistry page and its phase-change page
//! are fetched and handed to the table parsers in `NIST_tables`.
//!
//! ## Main Data Structures and Logic
//! - `NistScraper<C>`: Generic scraper with dependency injection for HTTP client (enables testing)
//! - `HttpClient` trait: one GET with a per-request timeout, returning the final URL and body
//! - `CompoundScrapeResult`: everything collected for one compound
//! - `NistError`: network, URL and lookup failures
//!
//! ## Key Methods
//! - `search_attempts()`: the four lookup URLs tried in order (formula/name, with and without NoIon)
//! - `search_compound()`: finds the WebBook id (`C` followed by digits) of a compound
//! - `get_thermodynamic_data()`: `Mask=1`, `Type=JANAFG` page -> records
//! - `get_phase_change_data()`: `Mask=4` page -> boiling/melting data
//! - `scrape_compound_data()`: all of the above with the politeness delay between requests
//!
//! ## Usage
//! ```rust, ignore
//! let scraper = NistScraper::new(&ScraperSettings::default())?;
//! let result = scraper.scrape_compound_data("CH4")?;
//! println!("{:?}", result.thermodynamic_data);
//! ```

use super::NIST_tables::{
    PhaseChangeProperties, ThermodynamicRecord, parse_phase_change_data,
    parse_thermodynamic_tables,
};
use crate::settings::ScraperSettings;
use log::{info, warn};
use regex::Regex;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use url::Url;

static COMPOUND_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ID=(C\d+)").expect("id pattern is valid"));
static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector"));

/// a fetched page: the URL after redirects and the body
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub body: String,
}

/// HTTP client trait for dependency injection
pub trait HttpClient {
    fn get_page(&self, url: &Url, timeout: Duration) -> Result<Page, NistError>;
}

// Implementation for the real reqwest client
impl HttpClient for Client {
    fn get_page(&self, url: &Url, timeout: Duration) -> Result<Page, NistError> {
        let response = self
            .get(url.as_str())
            .timeout(timeout)
            .send()?
            .error_for_status()?;
        let final_url = response.url().to_string();
        let body = response.text()?;
        Ok(Page {
            url: final_url,
            body,
        })
    }
}

/// error types for the WebBook scraper
#[derive(Debug, Error)]
pub enum NistError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("Substance not found: {0}")]
    SubstanceNotFound(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
}

impl NistError {
    /// true for failures of the transport, as opposed to a page without the compound
    pub fn is_network(&self) -> bool {
        matches!(self, NistError::NetworkError(_) | NistError::RequestFailed(_))
    }
}

/// everything collected for one compound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundScrapeResult {
    /// the formula or name the compound was searched by
    pub formula: String,
    /// WebBook id, e.g. "C7732185"
    pub compound_id: String,
    #[serde(default)]
    pub phase_change_data: PhaseChangeProperties,
    /// `None` when no thermodynamic table of the page produced a record
    pub thermodynamic_data: Option<Vec<ThermodynamicRecord>>,
}

impl CompoundScrapeResult {
    pub fn record_count(&self) -> usize {
        self.thermodynamic_data.as_ref().map_or(0, Vec::len)
    }
}

/// Pulls the first WebBook compound id out of a link href or URL.
pub fn extract_compound_id(text: &str) -> Option<String> {
    COMPOUND_ID
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Looks for the compound id on a search result page: first in the links, then in
/// the final URL (the WebBook redirects straight to the compound on a unique hit).
pub fn find_compound_id(page: &Page) -> Option<String> {
    let document = Html::parse_document(&page.body);
    document
        .select(&LINK)
        .filter_map(|a| a.value().attr("href"))
        .find_map(extract_compound_id)
        .or_else(|| extract_compound_id(&page.url))
}

pub struct NistScraper<C: HttpClient> {
    client: C,
    base_url: Url,
    delay: Duration,
    search_timeout: Duration,
    data_timeout: Duration,
}

impl NistScraper<Client> {
    pub fn new(settings: &ScraperSettings) -> Result<Self, NistError> {
        let client = Client::builder().user_agent(settings.user_agent.as_str()).build()?;
        Self::with_client(client, settings)
    }
}

impl<C: HttpClient> NistScraper<C> {
    pub fn with_client(client: C, settings: &ScraperSettings) -> Result<Self, NistError> {
        Ok(Self {
            client,
            base_url: Url::parse(&settings.base_url)?,
            delay: settings.delay(),
            search_timeout: settings.search_timeout(),
            data_timeout: settings.data_timeout(),
        })
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// politeness pause between requests
    pub fn pause(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }

    fn url_with(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().clear().extend_pairs(params);
        url
    }

    /// lookup URLs in the order they are tried
    pub fn search_attempts(&self, formula_or_name: &str) -> Vec<Url> {
        vec![
            self.url_with(&[("Formula", formula_or_name), ("NoIon", "on"), ("Units", "SI")]),
            self.url_with(&[("Name", formula_or_name), ("NoIon", "on"), ("Units", "SI")]),
            self.url_with(&[("Formula", formula_or_name), ("Units", "SI")]),
            self.url_with(&[("Name", formula_or_name), ("Units", "SI")]),
        ]
    }

    /// Finds the WebBook id of a compound. The first attempt yielding an id wins.
    /// If every attempt failed on the network the last network error is returned,
    /// otherwise `SubstanceNotFound`.
    pub fn search_compound(&self, formula_or_name: &str) -> Result<String, NistError> {
        let mut network_failures = Vec::new();
        let attempts = self.search_attempts(formula_or_name);
        let n_attempts = attempts.len();
        for url in attempts {
            match self.client.get_page(&url, self.search_timeout) {
                Ok(page) => {
                    if let Some(compound_id) = find_compound_id(&page) {
                        info!("Found compound ID: {} for {}", compound_id, formula_or_name);
                        return Ok(compound_id);
                    }
                }
                Err(e) => {
                    warn!("Search attempt failed for {}: {}", formula_or_name, e);
                    if e.is_network() {
                        network_failures.push(e);
                    }
                }
            }
        }
        if network_failures.len() == n_attempts {
            if let Some(e) = network_failures.pop() {
                return Err(e);
            }
        }
        Err(NistError::SubstanceNotFound(formula_or_name.to_string()))
    }

    /// JANAF-type thermochemistry tables of the compound
    pub fn get_thermodynamic_data(
        &self,
        compound_id: &str,
    ) -> Result<Option<Vec<ThermodynamicRecord>>, NistError> {
        let url = self.url_with(&[
            ("ID", compound_id),
            ("Mask", "1"),
            ("Type", "JANAFG"),
            ("Units", "SI"),
        ]);
        let page = self.client.get_page(&url, self.data_timeout)?;
        let document = Html::parse_document(&page.body);
        Ok(parse_thermodynamic_tables(&document))
    }

    /// boiling point, melting point and latent heats of the compound
    pub fn get_phase_change_data(
        &self,
        compound_id: &str,
    ) -> Result<PhaseChangeProperties, NistError> {
        let url = self.url_with(&[("ID", compound_id), ("Mask", "4"), ("Units", "SI")]);
        let page = self.client.get_page(&url, self.data_timeout)?;
        let document = Html::parse_document(&page.body);
        Ok(parse_phase_change_data(&document))
    }

    /// Identifies the compound and fetches both data pages. A failed data page
    /// degrades to "no data" for that page; only a failed identification is an error.
    pub fn scrape_compound_data(
        &self,
        formula_or_name: &str,
    ) -> Result<CompoundScrapeResult, NistError> {
        info!("Scraping data for: {}", formula_or_name);
        let compound_id = self.search_compound(formula_or_name)?;

        self.pause();
        let thermodynamic_data = self
            .get_thermodynamic_data(&compound_id)
            .unwrap_or_else(|e| {
                warn!(
                    "Error getting thermodynamic data for {}: {}",
                    compound_id, e
                );
                None
            });

        self.pause();
        let phase_change_data = self
            .get_phase_change_data(&compound_id)
            .unwrap_or_else(|e| {
                warn!("Error getting phase change data for {}: {}", compound_id, e);
                PhaseChangeProperties::default()
            });

        Ok(CompoundScrapeResult {
            formula: formula_or_name.to_string(),
            compound_id,
            phase_change_data,
            thermodynamic_data,
        })
    }
}
