//! Catalog loading tests against a mocked advisory page

use swagcheck_detect::HttpClient;
use swagcheck_vuln::VulnerabilityCatalog;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHIP_CLASS: &str = "vue--chip vulnerable-versions__chip vue--chip--default";

const ADVISORY_PAGE: &str = r#"<html><body>
<table>
  <thead><tr><th>Vulnerability</th><th>Versions</th></tr></thead>
  <tbody>
    <tr>
      <td><a href="/vuln/SNYK-JS-SWAGGERUI-2314885">
        User Interface (UI) Misrepresentation of Critical Information
      </a></td>
      <td><span class="vue--chip vulnerable-versions__chip vue--chip--default"> &lt;4.1.3 </span></td>
    </tr>
    <tr>
      <td><a href="/vuln/SNYK-JS-SWAGGERUI-572012">Insecure Defaults</a></td>
      <td><span class="vue--chip vulnerable-versions__chip vue--chip--default">&lt;3.26.1</span></td>
    </tr>
    <tr>
      <td><a href="/vuln/SNYK-JS-SWAGGERUI-449942">Cross-site Scripting (XSS)</a></td>
      <td><span class="vue--chip vulnerable-versions__chip vue--chip--default">&gt;=2.0.3 &lt;2.0.24</span></td>
    </tr>
  </tbody>
</table>
</body></html>"#;

async fn catalog_from(server: &MockServer, body: &str, status: u16) -> VulnerabilityCatalog {
    Mock::given(method("GET"))
        .and(path("/vuln/npm:swagger-ui"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;

    let mut catalog = VulnerabilityCatalog::new(
        &format!("{}/vuln/npm:swagger-ui", server.uri()),
        CHIP_CLASS,
    )
    .unwrap();
    catalog.load(&HttpClient::new(5, "swagcheck-tests")).await;
    catalog
}

#[tokio::test]
async fn test_load_well_formed_table() {
    let server = MockServer::start().await;
    let catalog = catalog_from(&server, ADVISORY_PAGE, 200).await;

    assert!(catalog.loaded());
    let advisories = catalog.advisories();
    assert_eq!(advisories.len(), 3);

    // Scraped text survives literally: trimmed, entities decoded, links
    // resolved against the source's origin.
    assert_eq!(
        advisories[0].name,
        "User Interface (UI) Misrepresentation of Critical Information"
    );
    assert_eq!(
        advisories[0].link,
        format!("{}/vuln/SNYK-JS-SWAGGERUI-2314885", server.uri())
    );
    assert_eq!(advisories[0].version_rule, "<4.1.3");
    assert_eq!(advisories[2].version_rule, ">=2.0.3 <2.0.24");
}

#[tokio::test]
async fn test_load_non_200_leaves_catalog_empty() {
    let server = MockServer::start().await;
    let catalog = catalog_from(&server, "error", 404).await;

    assert!(!catalog.loaded());
    assert!(catalog.advisories().is_empty());
    assert!(catalog.matches("v2.0").is_empty());
}

#[tokio::test]
async fn test_load_unparseable_body_leaves_catalog_empty() {
    let server = MockServer::start().await;
    let catalog = catalog_from(&server, "<html><body>no table here</body></html>", 200).await;

    assert!(!catalog.loaded());
    assert!(catalog.advisories().is_empty());
}

#[tokio::test]
async fn test_load_malformed_row_discards_everything() {
    let server = MockServer::start().await;
    let page = r#"<html><body><table><tbody>
        <tr>
          <td><a href="/vuln/X">Fine Advisory</a></td>
          <td><span class="vue--chip vulnerable-versions__chip vue--chip--default">&lt;1.0</span></td>
        </tr>
        <tr><td>no link</td><td>no chip</td></tr>
    </tbody></table></body></html>"#;
    let catalog = catalog_from(&server, page, 200).await;

    assert!(!catalog.loaded());
    assert!(catalog.advisories().is_empty());
}

#[tokio::test]
async fn test_end_to_end_version_matching() {
    let server = MockServer::start().await;
    let catalog = catalog_from(&server, ADVISORY_PAGE, 200).await;

    assert!(catalog.matches("4.11.1").is_empty());

    let matches = catalog.matches("v4.0");
    assert_eq!(matches.len(), 1);
    assert_eq!(
        matches[0].name,
        "User Interface (UI) Misrepresentation of Critical Information"
    );
}
