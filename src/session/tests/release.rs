use super::*;

fn date(s: &str) -> ReleaseTarget {
    ReleaseTarget::parse(s, None).unwrap()
}

#[tokio::test]
async fn test_metadata_by_date() {
    let server = server_with_budget(Some(60)).await;
    mount_release(
        &server,
        "2025",
        "2025-03-11",
        &["pixar_films.csv", "README.md", "public_response.csv"],
    )
    .await;
    Mock::given(method("GET"))
        .and(path(readme_path("main", "2025", "2025-03-11")))
        .respond_with(ResponseTemplate::new(200).set_body_string("# Pixar Films\n"))
        .mount(&server)
        .await;

    let mut tt = session(&server);
    let meta = tt.try_load_metadata(&date("2025-03-11")).await.unwrap();

    assert_eq!(meta.date, "2025-03-11");
    assert_eq!(meta.year, "2025");
    let names: Vec<&str> = meta.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["pixar_films.csv", "public_response.csv"]);
    assert_eq!(meta.readme_content, "# Pixar Films\n");
    assert!(meta.readme_html.contains("<h1>Pixar Films</h1>"));
}

#[tokio::test]
async fn test_readme_falls_back_to_master() {
    let server = server_with_budget(Some(60)).await;
    mount_release(&server, "2020", "2020-07-28", &["penguins.csv"]).await;
    Mock::given(method("GET"))
        .and(path(readme_path("main", "2020", "2020-07-28")))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(readme_path("master", "2020", "2020-07-28")))
        .respond_with(ResponseTemplate::new(200).set_body_string("Palmer penguins"))
        .expect(1)
        .mount(&server)
        .await;

    let mut tt = session(&server);
    let meta = tt.try_load_metadata(&date("2020-07-28")).await.unwrap();
    assert_eq!(meta.readme_content, "Palmer penguins");
}

#[tokio::test]
async fn test_missing_readme_is_empty_not_error() {
    let server = server_with_budget(Some(60)).await;
    mount_release(&server, "2020", "2020-07-28", &["penguins.csv"]).await;

    let mut tt = session(&server);
    let meta = tt.try_load_metadata(&date("2020-07-28")).await.unwrap();

    assert_eq!(meta.readme_content, "");
    assert!(meta.readme_html.starts_with("<!DOCTYPE html>"));
    assert_eq!(meta.files.len(), 1);
}

#[tokio::test]
async fn test_low_budget_makes_no_release_calls() {
    let server = server_with_budget(Some(4)).await;
    Mock::given(method("GET"))
        .and(path(format!("{API_ROOT}/2025/2025-03-11")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(readme_path("main", "2025", "2025-03-11")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut tt = session(&server);
    assert!(matches!(
        tt.try_load_metadata(&date("2025-03-11")).await,
        Err(Error::BudgetExhausted {
            remaining: 4,
            required: 5
        })
    ));
    assert!(tt.load_metadata(&date("2025-03-11")).await.is_empty());
}

#[tokio::test]
async fn test_unknown_budget_is_permissive() {
    let server = server_with_budget(None).await;
    mount_release(&server, "2025", "2025-03-11", &["pixar_films.csv"]).await;

    let mut tt = session(&server);
    let meta = tt.try_load_metadata(&date("2025-03-11")).await.unwrap();
    assert_eq!(meta.files.len(), 1);
}

#[tokio::test]
async fn test_week_number_resolves_through_catalog() {
    let server = server_with_budget(Some(60)).await;
    Mock::given(method("GET"))
        .and(path(listing_path("main", "2025")))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&[
            ("2025-01-14", "posit::conf talks"),
            ("2025-01-07", "Bring your own data"),
        ])))
        .mount(&server)
        .await;
    mount_release(&server, "2025", "2025-01-14", &["conf2023.csv"]).await;

    let mut tt = session(&server);
    let target = ReleaseTarget::parse("2025", Some(2)).unwrap();
    let meta = tt.try_load_metadata(&target).await.unwrap();

    assert_eq!(meta.date, "2025-01-14");
    assert_eq!(meta.files[0].name, "conf2023.csv");
}

#[tokio::test]
async fn test_week_out_of_range_is_reported_not_raised() {
    let server = server_with_budget(Some(60)).await;
    Mock::given(method("GET"))
        .and(path(listing_path("main", "2025")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_html(&[("2025-01-07", "Bring your own data")])),
        )
        .mount(&server)
        .await;

    let mut tt = session(&server);
    for week in [0, 2] {
        let target = ReleaseTarget::parse("2025", Some(week)).unwrap();
        assert!(matches!(
            tt.try_load_metadata(&target).await,
            Err(Error::InvalidInput(_))
        ));
        assert!(tt.load_metadata(&target).await.is_empty());
    }
}

#[tokio::test]
async fn test_readme_without_content_shows_nothing() {
    let server = server_with_budget(None).await;
    let tt = session(&server);
    assert!(tt.readme(&ReleaseMetadata::default()).is_none());
}
