use p4k_reviews::{db, extract, ExtractError};

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
}

#[test]
fn extract_compile_and_store() {
    let url = "https://pitchfork.com/reviews/albums/22703-vulnicura-live/";
    let record = extract(&fixture("vulnicura_live"), url).unwrap();
    let compiled = record.compile();

    assert_eq!(compiled.reviews.reviewid, "22703");
    assert_eq!(compiled.reviews.artist, "bjrk, arca");
    assert_eq!(compiled.reviews.url, url);
    assert_eq!(compiled.reviews.pub_date, "2017-01-06");
    assert_eq!(compiled.reviews.pub_weekday, 4);
    assert_eq!(compiled.artists.len(), 2);

    let conn = rusqlite::Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    db::save_compiled(&conn, &[compiled]).unwrap();
    let title: String = conn
        .query_row("SELECT title FROM reviews WHERE reviewid = '22703'", [], |r| r.get(0))
        .unwrap();
    assert_eq!(title, "vulnicura live");
}

#[test]
fn bad_date_is_parse_error() {
    let html = fixture("trans_canada_highway")
        .replace(r#"datetime="2006-05-26T00:00:00""#, r#"datetime="May 26, 2006""#);
    assert!(matches!(
        extract(&html, "u"),
        Err(ExtractError::FieldParse { field: "pub_date", .. })
    ));
}

#[test]
fn extraction_is_stateless() {
    let a = extract(&fixture("vulnicura_live"), "a").unwrap();
    let b = extract(&fixture("trans_canada_highway"), "b").unwrap();
    assert_eq!(extract(&fixture("vulnicura_live"), "a").unwrap(), a);
    assert_ne!(a.review_id, b.review_id);
}
