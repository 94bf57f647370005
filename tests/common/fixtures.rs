//! Mock repository fixtures

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Contents API root of the default repository
pub const API_ROOT: &str = "/repos/rfordatascience/tidytuesday/contents/data";

/// Small CSV used as release data
pub const PIXAR_CSV: &str = "number,film,release_date,run_time\n1,Toy Story,1995-11-22,81\n2,A Bug's Life,1998-11-25,95\n";

/// Start a mock server whose rate-limit endpoint reports `remaining`
pub async fn mock_repo(remaining: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rate_limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": {"core": {"limit": 60, "remaining": remaining}}
        })))
        .mount(&server)
        .await;
    server
}

/// Mount a rendered listing page for `year` on the main branch
pub async fn mount_listing(server: &MockServer, year: &str, rows: &[(&str, &str)]) {
    let body: String = rows
        .iter()
        .enumerate()
        .map(|(i, (date, title))| format!("<tr><td>{}</td><td>{date}</td><td>{title}</td></tr>", i + 1))
        .collect();
    let html = format!(
        "<html><body><table><tr><th>Week</th><th>Date</th><th>Data</th></tr>{body}</table></body></html>"
    );
    Mock::given(method("GET"))
        .and(path(format!(
            "/rfordatascience/tidytuesday/blob/main/data/{year}/readme.md"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

/// Mount a release directory with `files` (name, body) and a README on main
pub async fn mount_release(server: &MockServer, date: &str, files: &[(&str, &str)]) {
    let year = &date[..4];
    let entries: Vec<serde_json::Value> = files
        .iter()
        .map(|(name, _)| {
            json!({
                "name": name,
                "type": "file",
                "download_url": format!("{}/raw/{date}/{name}", server.uri()),
                "path": format!("data/{year}/{date}/{name}")
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("{API_ROOT}/{year}/{date}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(entries))
        .mount(server)
        .await;

    for (name, body) in files {
        Mock::given(method("GET"))
            .and(path(format!("/raw/{date}/{name}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
            .mount(server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path(format!(
            "/rfordatascience/tidytuesday/main/data/{year}/{date}/README.md"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("# Release {date}\n")))
        .mount(server)
        .await;
}
