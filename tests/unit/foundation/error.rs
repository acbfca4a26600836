use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        OgweaveError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        OgweaveError::network("x")
            .to_string()
            .contains("network error:")
    );
    assert!(
        OgweaveError::missing_asset("x")
            .to_string()
            .contains("missing asset:")
    );
    assert!(
        OgweaveError::render("x")
            .to_string()
            .contains("render error:")
    );
}

#[test]
fn download_error_carries_status_and_url() {
    let err = OgweaveError::Download {
        status: 404,
        url: "https://example.com/bg.jpg".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("404"));
    assert!(msg.contains("https://example.com/bg.jpg"));
}

#[test]
fn fatal_classification() {
    assert!(OgweaveError::missing_asset("font").is_fatal());
    assert!(OgweaveError::validation("bad slug").is_fatal());
    assert!(!OgweaveError::render("page").is_fatal());
    assert!(
        !OgweaveError::Download {
            status: 500,
            url: String::new(),
        }
        .is_fatal()
    );
    assert!(
        !OgweaveError::TooManyRedirects {
            url: String::new(),
            limit: 5,
        }
        .is_fatal()
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = OgweaveError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
