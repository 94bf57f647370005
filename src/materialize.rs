//! Downloading one data file into a [`Table`]
//!
//! The file is fetched in full, staged in a temporary file that keeps the
//! original extension (spreadsheet readers sniff it), parsed, and the staging
//! file is removed when it goes out of scope on every path.

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::formats::{FetchPath, FileFormat};
use crate::http::RepoClient;
use crate::table::Table;
use crate::types::FileReference;

/// Download and parse one file
///
/// # Errors
///
/// - [`Error::UnsupportedFormat`](crate::Error::UnsupportedFormat) before any
///   request when the extension has no reader on `fetch`
/// - transport errors from the download
/// - [`Error::Parse`](crate::Error::Parse) when the content is malformed
pub async fn materialize(
    client: &RepoClient,
    file: &FileReference,
    fetch: FetchPath,
) -> Result<Table> {
    let format = FileFormat::for_file(&file.name, fetch)?;

    tracing::info!(file = %file.name, "Downloading {}...", file.name);
    let bytes = client.get_bytes(&file.download_url).await?;

    parse_staged(&std::env::temp_dir(), &bytes, &file.name, format)
}

/// Stage `bytes` in `dir` and parse them with `format`
pub(crate) fn parse_staged(
    dir: &Path,
    bytes: &[u8],
    name: &str,
    format: FileFormat,
) -> Result<Table> {
    let suffix = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();

    let mut staged = tempfile::Builder::new()
        .prefix("tidytuesday-")
        .suffix(&suffix)
        .tempfile_in(dir)?;
    staged.write_all(bytes)?;
    staged.flush()?;

    let table = format.read(staged.path(), name);
    tracing::debug!(file = name, path = %staged.path().display(), ok = table.is_ok(), "parsed staged file");
    table
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::Error;
    use crate::table::Value;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn dir_is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    fn file_ref(server: &MockServer, name: &str) -> FileReference {
        FileReference {
            name: name.to_string(),
            download_url: format!("{}/files/{name}", server.uri()),
            path: format!("data/2025/2025-03-11/{name}"),
        }
    }

    #[test]
    fn test_staging_removed_after_success() {
        let dir = tempfile::tempdir().unwrap();
        let table = parse_staged(dir.path(), b"a,b\n1,2\n", "x.csv", FileFormat::Csv).unwrap();
        assert_eq!(table.shape(), (1, 2));
        assert!(dir_is_empty(dir.path()));
    }

    #[test]
    fn test_staging_removed_after_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_staged(dir.path(), b"[1, 2", "x.json", FileFormat::Json);
        assert!(matches!(result, Err(Error::Parse { .. })));
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_unsupported_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = RepoClient::new(Config::with_base_url(server.uri())).unwrap();
        let result = materialize(&client, &file_ref(&server, "notes.xyz"), FetchPath::Single).await;
        assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
    }

    #[tokio::test]
    async fn test_download_and_parse_tsv() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/films.tsv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("film\tyear\nUp\t2009\n"))
            .mount(&server)
            .await;

        let client = RepoClient::new(Config::with_base_url(server.uri())).unwrap();
        let table = materialize(&client, &file_ref(&server, "films.tsv"), FetchPath::Batch)
            .await
            .unwrap();
        assert_eq!(table.rows[0], vec![Value::Text("Up".into()), Value::Int(2009)]);
    }

    #[tokio::test]
    async fn test_transport_failure_is_distinct_from_parse() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = RepoClient::new(Config::with_base_url(server.uri())).unwrap();
        let result = materialize(&client, &file_ref(&server, "gone.csv"), FetchPath::Single).await;
        assert!(matches!(result, Err(Error::Http { status: 404, .. })));
    }
}
