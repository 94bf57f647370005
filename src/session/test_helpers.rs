//! Shared test helpers for creating TidyTuesday sessions against a mock server.

use serde_json::{Value as Json, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::Config;
use crate::session::TidyTuesday;

pub(crate) const API_ROOT: &str = "/repos/rfordatascience/tidytuesday/contents/data";

/// Start a mock server that answers the rate-limit endpoint with `remaining`.
/// `None` makes the endpoint fail so the budget stays unknown.
pub(crate) async fn server_with_budget(remaining: Option<u64>) -> MockServer {
    let server = MockServer::start().await;
    let response = match remaining {
        Some(n) => ResponseTemplate::new(200).set_body_json(json!({
            "resources": {"core": {"limit": 60, "remaining": n}}
        })),
        None => ResponseTemplate::new(500),
    };
    Mock::given(method("GET"))
        .and(path("/rate_limit"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

pub(crate) fn session(server: &MockServer) -> TidyTuesday {
    TidyTuesday::new(Config::with_base_url(server.uri())).unwrap()
}

pub(crate) fn listing_path(branch: &str, year: &str) -> String {
    format!("/rfordatascience/tidytuesday/blob/{branch}/data/{year}/readme.md")
}

pub(crate) fn readme_path(branch: &str, year: &str, date: &str) -> String {
    format!("/rfordatascience/tidytuesday/{branch}/data/{year}/{date}/README.md")
}

/// Rendered listing page with one table row per (date, title)
pub(crate) fn listing_html(rows: &[(&str, &str)]) -> String {
    let body: String = rows
        .iter()
        .enumerate()
        .map(|(i, (date, title))| {
            format!(
                "<tr><td>{}</td><td>{date}</td><td>{title}</td><td>src</td></tr>",
                i + 1
            )
        })
        .collect();
    format!(
        "<html><body><table><thead><tr><th>Week</th><th>Date</th><th>Data</th><th>Source</th></tr></thead><tbody>{body}</tbody></table></body></html>"
    )
}

pub(crate) fn dir_entry(parent: &str, name: &str) -> Json {
    json!({"name": name, "type": "dir", "download_url": null, "path": format!("data/{parent}/{name}")})
}

pub(crate) fn file_entry(server: &MockServer, release: &str, name: &str) -> Json {
    json!({
        "name": name,
        "type": "file",
        "download_url": format!("{}/raw/{release}/{name}", server.uri()),
        "path": format!("data/{release}/{name}")
    })
}

/// Mount a contents listing for `{year}/{date}` with the given file names
pub(crate) async fn mount_release(server: &MockServer, year: &str, date: &str, files: &[&str]) {
    let release = format!("{year}/{date}");
    let entries: Vec<Json> = files
        .iter()
        .map(|name| file_entry(server, &release, name))
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("{API_ROOT}/{release}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(entries))
        .mount(server)
        .await;
}

/// Mount the raw download of one release file
pub(crate) async fn mount_file(server: &MockServer, year: &str, date: &str, name: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/raw/{year}/{date}/{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}
