//! Advisory table scraping and version-rule containment

use scraper::{Html, Selector};
use swagcheck_core::{version, Error, Result};
use swagcheck_detect::HttpClient;
use tracing::{error, info};
use url::Url;

/// One scraped advisory: name, link, and the raw version-range text.
/// Immutable once parsed; held in order of appearance for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub name: String,
    pub link: String,
    /// Raw range expression, e.g. `<4.1.3` or `>=2.0.3 <2.0.24`.
    pub version_rule: String,
}

/// Catalog of known swagger-ui vulnerabilities scraped from an HTML table.
///
/// Either unloaded (every query returns empty) or loaded with the full
/// table; a failed fetch or parse leaves it in the "no vulnerabilities
/// known" state rather than a partial one.
pub struct VulnerabilityCatalog {
    source_url: String,
    base_url: String,
    version_chip_class: String,
    advisories: Vec<Advisory>,
    loaded: bool,
}

impl VulnerabilityCatalog {
    /// Create an unloaded catalog for the given source page. The chip
    /// class locates the version-range span inside each row's second cell.
    pub fn new(source_url: &str, version_chip_class: &str) -> Result<Self> {
        let parsed = Url::parse(source_url)
            .map_err(|e| Error::Configuration(format!("invalid catalog URL {}: {}", source_url, e)))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| Error::Configuration(format!("catalog URL {} has no host", source_url)))?;
        let base_url = format!("{}://{}/", parsed.scheme(), host);

        Ok(Self {
            source_url: source_url.to_string(),
            base_url,
            version_chip_class: version_chip_class.to_string(),
            advisories: Vec::new(),
            loaded: false,
        })
    }

    /// Fetch and parse the advisory table. Network errors, non-200
    /// responses, and malformed tables all leave the catalog empty with
    /// the loaded flag false; nothing propagates.
    pub async fn load(&mut self, client: &HttpClient) {
        info!("Load vulnerabilities from {} ...", self.source_url);
        self.advisories.clear();
        self.loaded = false;

        let response = match client.get(&self.source_url).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                error!(
                    "Failed to load vulnerabilities from {} - status {}.",
                    self.source_url, response.status
                );
                return;
            }
            Err(e) => {
                error!(
                    "Failed to load vulnerabilities from {} - {}.",
                    self.source_url, e
                );
                return;
            }
        };

        match parse_advisories(&response.body, &self.base_url, &self.version_chip_class) {
            Ok(advisories) => {
                self.loaded = !advisories.is_empty();
                self.advisories = advisories;
                info!("Loaded {} vulnerabilities.", self.advisories.len());
            }
            Err(e) => {
                error!("Failed to parse response from {} - {}.", self.source_url, e);
            }
        }
    }

    /// Whether the last `load` produced at least one advisory.
    pub fn loaded(&self) -> bool {
        self.loaded
    }

    /// All loaded advisories in table order.
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// Every loaded advisory whose rule applies to `in_version`.
    /// Indeterminate rules are excluded along with non-matching ones.
    pub fn matches(&self, in_version: &str) -> Vec<&Advisory> {
        self.advisories
            .iter()
            .filter(|advisory| is_version_vulnerable(in_version, &advisory.version_rule) == Some(true))
            .collect()
    }
}

/// Check whether `in_version` falls inside a raw rule: a single upper
/// bound or a two-sided interval, both inclusive. Comparison symbols are
/// stripped and otherwise ignored; only magnitude comparison remains.
/// Returns `None` when the rule cannot be decided (empty, or three or
/// more tokens).
pub fn is_version_vulnerable(in_version: &str, rule: &str) -> Option<bool> {
    if rule.is_empty() {
        return None;
    }

    let bounds: Vec<String> = rule
        .split(' ')
        .map(|token| {
            token
                .chars()
                .filter(|c| !matches!(c, '=' | '<' | '>'))
                .collect()
        })
        .collect();

    match bounds.as_slice() {
        [upper] => Some(version::less_or_equal(in_version, upper)),
        [lower, upper] => Some(
            version::less_or_equal(lower, in_version) && version::less_or_equal(in_version, upper),
        ),
        _ => None,
    }
}

/// Parse the first table's body rows into advisories. Any row missing the
/// expected structure fails the entire parse; scraping is all-or-nothing.
pub fn parse_advisories(
    html: &str,
    base_url: &str,
    version_chip_class: &str,
) -> Result<Vec<Advisory>> {
    let table_selector = Selector::parse("table").unwrap();
    let row_selector = Selector::parse("tbody tr").unwrap();
    let cell_selector = Selector::parse("td").unwrap();
    let anchor_selector = Selector::parse("a").unwrap();
    let chip_selector = chip_selector(version_chip_class)?;

    let base = Url::parse(base_url)
        .map_err(|e| Error::Parse(format!("invalid base URL {}: {}", base_url, e)))?;

    let document = Html::parse_document(html);
    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| Error::Parse(String::from("no advisory table in response")))?;

    let mut advisories = Vec::new();
    for row in table.select(&row_selector) {
        let mut cells = row.select(&cell_selector);
        let advisory_cell = cells
            .next()
            .ok_or_else(|| Error::Parse(String::from("row missing advisory cell")))?;
        let version_cell = cells
            .next()
            .ok_or_else(|| Error::Parse(String::from("row missing version cell")))?;

        let anchor = advisory_cell
            .select(&anchor_selector)
            .next()
            .ok_or_else(|| Error::Parse(String::from("advisory cell missing link")))?;
        let href = anchor
            .value()
            .attr("href")
            .ok_or_else(|| Error::Parse(String::from("advisory link missing href")))?;
        let link = base
            .join(href)
            .map_err(|e| Error::Parse(format!("bad advisory href {}: {}", href, e)))?
            .to_string();
        let name = anchor.text().collect::<String>().trim().to_string();

        let chip = version_cell
            .select(&chip_selector)
            .next()
            .ok_or_else(|| Error::Parse(String::from("version cell missing range chip")))?;
        let version_rule = chip.text().collect::<String>().trim().to_string();

        advisories.push(Advisory {
            name,
            link,
            version_rule,
        });
    }

    Ok(advisories)
}

/// Build a selector for the configured chip class list, e.g.
/// "vue--chip vulnerable-versions__chip" -> "span.vue--chip.vulnerable-versions__chip".
fn chip_selector(version_chip_class: &str) -> Result<Selector> {
    let css = format!(
        "span.{}",
        version_chip_class
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(".")
    );
    Selector::parse(&css)
        .map_err(|e| Error::Parse(format!("invalid version chip selector {}: {}", css, e)))
}
