//! In-memory WebBook for tests: canned pages chosen by the query parameters of the URL.
use super::NIST_parser::{HttpClient, NistError, Page};
use std::cell::RefCell;
use std::time::Duration;
use url::Url;

pub const NOT_FOUND_PAGE: &str = r#"
<html><body>
  <h1>Name Not Found</h1>
  <p>No matching species found in database.</p>
</body></html>
"#;

/// search result page linking to the compound with WebBook id `id`
pub fn search_page(id: &str) -> String {
    format!(
        r#"<html><body>
  <h1>Search Results</h1>
  <ol>
    <li><a href="/cgi/cbook.cgi?ID={id}&amp;Units=SI">Compound</a></li>
  </ol>
</body></html>"#
    )
}

/// JANAF-style page: one navigation table, one data table with 5 columns
pub const JANAF_PAGE: &str = r#"
<html><body>
  <table class="nav"><tr><td><a href="/">Home</a></td><td>Links</td></tr></table>
  <table aria-label="Gas Phase Heat Capacity">
    <tr><th>Temperature (K)</th><th>Cp (J/mol*K)</th><th>S° (J/mol*K)</th><th>-(G° - H°298)/T</th><th>H° - H°298 (kJ/mol)</th></tr>
    <tr><td>100</td><td>33.299</td><td>152.388</td><td>218.534</td><td>-6.617</td></tr>
    <tr><td>298.15</td><td>33.590</td><td>188.834</td><td>188.834</td><td>0.</td></tr>
    <tr><td>500</td><td>35.226</td><td>206.534</td><td>191.896</td><td>6.925</td></tr>
    <tr><td>1000</td><td>41.268</td><td>232.738</td><td>206.738</td><td>26.000</td></tr>
    <tr><td>6000</td><td>58.000</td><td>320.000</td><td>280.000</td><td>300.000</td></tr>
    <tr><td>-</td><td>-</td><td>-</td><td>-</td><td>-</td></tr>
  </table>
</body></html>
"#;

pub const PHASE_PAGE: &str = r#"
<html><body>
  <table aria-label="One dimensional data">
    <tr><th>Quantity</th><th>Value</th></tr>
    <tr><td>Boiling point</td><td>373.15 K</td></tr>
    <tr><td>Melting point</td><td>273.15 ± 0.01</td></tr>
    <tr><td>Enthalpy of vaporization</td><td>40.65</td></tr>
    <tr><td>Enthalpy of fusion</td><td>6.01</td></tr>
  </table>
</body></html>
"#;

type Response = Result<String, String>;

#[derive(Default)]
pub struct MockHttpClient {
    routes: Vec<(Vec<(String, String)>, Response)>,
    requests: RefCell<Vec<Url>>,
    timeouts: RefCell<Vec<Duration>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(mut self, params: &[(&str, &str)], response: Response) -> Self {
        let params = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.routes.push((params, response));
        self
    }

    /// answer requests carrying all of `params` with `body`; earlier routes win
    pub fn route(self, params: &[(&str, &str)], body: &str) -> Self {
        self.add(params, Ok(body.to_string()))
    }

    /// fail requests carrying all of `params` as a transport error
    pub fn fail(self, params: &[(&str, &str)], message: &str) -> Self {
        self.add(params, Err(message.to_string()))
    }

    /// a compound found by `name` (formula or name query) with both data pages
    pub fn compound(self, name: &str, id: &str, janaf: &str, phase: &str) -> Self {
        self.route(&[("ID", id), ("Mask", "1")], janaf)
            .route(&[("ID", id), ("Mask", "4")], phase)
            .route(&[("Formula", name)], &search_page(id))
            .route(&[("Name", name)], &search_page(id))
    }

    pub fn requested(&self) -> Vec<Url> {
        self.requests.borrow().clone()
    }

    /// timeouts passed with the requests, in request order
    pub fn timeouts(&self) -> Vec<Duration> {
        self.timeouts.borrow().clone()
    }
}

impl HttpClient for MockHttpClient {
    fn get_page(&self, url: &Url, timeout: Duration) -> Result<Page, NistError> {
        self.requests.borrow_mut().push(url.clone());
        self.timeouts.borrow_mut().push(timeout);
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        for (required, response) in &self.routes {
            if required.iter().all(|p| pairs.contains(p)) {
                return match response {
                    Ok(body) => Ok(Page {
                        url: url.to_string(),
                        body: body.clone(),
                    }),
                    Err(message) => Err(NistError::RequestFailed(message.clone())),
                };
            }
        }
        Ok(Page {
            url: url.to_string(),
            body: NOT_FOUND_PAGE.to_string(),
        })
    }
}
