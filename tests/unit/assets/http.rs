use std::cell::RefCell;
use std::collections::VecDeque;

use super::*;

/// Transport that replays a scripted response sequence and records the URLs
/// it was asked for.
struct ScriptedTransport {
    responses: RefCell<VecDeque<HttpResponse>>,
    requested: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    fn new(responses: Vec<HttpResponse>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl HttpTransport for ScriptedTransport {
    fn get(&self, url: &str) -> OgweaveResult<HttpResponse> {
        self.requested.borrow_mut().push(url.to_string());
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| OgweaveError::network("scripted transport exhausted"))
    }
}

fn redirect(status: u16, location: &str) -> HttpResponse {
    HttpResponse {
        status,
        location: Some(location.to_string()),
        body: Vec::new(),
    }
}

fn ok(body: &[u8]) -> HttpResponse {
    HttpResponse {
        status: 200,
        location: None,
        body: body.to_vec(),
    }
}

#[test]
fn follows_redirect_chain_to_terminal_body() {
    let transport = ScriptedTransport::new(vec![
        redirect(301, "https://cdn.example.com/a"),
        redirect(301, "https://cdn.example.com/b"),
        ok(b"pixels"),
    ]);

    let body = download(&transport, "https://example.com/bg.jpg").unwrap();
    assert_eq!(body, b"pixels");
    assert_eq!(
        *transport.requested.borrow(),
        vec![
            "https://example.com/bg.jpg",
            "https://cdn.example.com/a",
            "https://cdn.example.com/b",
        ]
    );
}

#[test]
fn resolves_relative_location_against_current_url() {
    let transport = ScriptedTransport::new(vec![redirect(302, "/moved/bg.jpg"), ok(b"x")]);

    download(&transport, "https://example.com/old/bg.jpg").unwrap();
    assert_eq!(
        transport.requested.borrow()[1],
        "https://example.com/moved/bg.jpg"
    );
}

#[test]
fn terminal_non_200_is_a_download_error() {
    let transport = ScriptedTransport::new(vec![redirect(302, "https://x.test/gone"), HttpResponse {
        status: 404,
        location: None,
        body: Vec::new(),
    }]);

    let err = download(&transport, "https://x.test/bg.jpg").unwrap_err();
    match err {
        OgweaveError::Download { status, url } => {
            assert_eq!(status, 404);
            assert_eq!(url, "https://x.test/gone");
        }
        other => panic!("expected Download, got {other:?}"),
    }
}

#[test]
fn redirect_chain_is_bounded() {
    let responses = (0..=MAX_REDIRECT_HOPS + 1)
        .map(|i| redirect(301, &format!("https://x.test/hop{i}")))
        .collect();
    let transport = ScriptedTransport::new(responses);

    let err = download(&transport, "https://x.test/start").unwrap_err();
    match err {
        OgweaveError::TooManyRedirects { url, limit } => {
            assert_eq!(url, "https://x.test/start");
            assert_eq!(limit, MAX_REDIRECT_HOPS);
        }
        other => panic!("expected TooManyRedirects, got {other:?}"),
    }
    // Initial request plus exactly `limit` followed hops.
    assert_eq!(transport.requested.borrow().len(), MAX_REDIRECT_HOPS + 1);
}

#[test]
fn redirect_without_location_is_a_network_error() {
    let transport = ScriptedTransport::new(vec![HttpResponse {
        status: 301,
        location: None,
        body: Vec::new(),
    }]);

    let err = download(&transport, "https://x.test/bg.jpg").unwrap_err();
    assert!(matches!(err, OgweaveError::Network(_)));
}
