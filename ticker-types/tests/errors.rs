use ticker_types::{ExtractError, TickerError};

#[test]
fn page_errors_carry_their_url() {
    let e = TickerError::status("https://example.test/a", 404);
    assert_eq!(e.url(), Some("https://example.test/a"));
    assert!(e.is_page_error());

    let e = TickerError::extract(
        "https://example.test/b",
        ExtractError::NoForecasts {
            name: "Acme".into(),
        },
    );
    assert_eq!(e.url(), Some("https://example.test/b"));

    assert_eq!(TickerError::Invariant("x".into()).url(), None);
    assert!(!TickerError::Invariant("x".into()).is_page_error());
}

#[test]
fn flatten_unwraps_nested_aggregates() {
    let nested = TickerError::PagesFailed(vec![
        TickerError::fetch("u1", "refused"),
        TickerError::PagesFailed(vec![
            TickerError::status("u2", 500),
            TickerError::fetch_timeout("u3"),
        ]),
    ]);
    let flat = nested.flatten();
    assert_eq!(flat.len(), 3);
    assert!(flat.iter().all(TickerError::is_page_error));
}

#[test]
fn extraction_messages_name_the_instrument() {
    let e = ExtractError::CountMismatch {
        name: "Acme".into(),
        dates: 3,
        forecasts: 4,
    };
    let msg = e.to_string();
    assert!(msg.contains("Acme"));
    assert!(msg.contains('3') && msg.contains('4'));
}
