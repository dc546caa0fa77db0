use bastion::http::parser::{ParseError, parse_http_request};
use bastion::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.header("Host"), Some("example.com"));
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_post_request_with_body() {
    let req = b"POST /login HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.path, "/login");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.body, b"hello".to_vec());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_multiple_headers() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("Host"), Some("example.com"));
    assert_eq!(parsed.header("User-Agent"), Some("test-client"));
    assert_eq!(parsed.header("Accept"), Some("*/*"));
}

#[test]
fn test_parse_request_with_path_and_query_string() {
    let req = b"GET /search?q=rust HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.path, "/search?q=rust");
}

#[test]
fn test_parse_incomplete_request_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_incomplete_request_partial_body() {
    let req = b"POST /api HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_invalid_http_method() {
    let req = b"INVALID / HTTP/1.1\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidMethod)));
}

#[test]
fn test_parse_skips_malformed_header_line() {
    let req = b"GET /admin HTTP/1.1\r\nBrokenHeader\r\nAuthorization: Bearer t\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.len(), 1);
    assert_eq!(parsed.header("Authorization"), Some("Bearer t"));
}

#[test]
fn test_parse_body_without_content_length() {
    let body = r#"{"username":"admin","password":"pw"}"#;
    let req = format!("POST /login HTTP/1.1\r\nHost: x\r\n\r\n{body}");
    let (parsed, consumed) = parse_http_request(req.as_bytes()).unwrap();

    assert_eq!(parsed.body, body.as_bytes().to_vec());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_various_http_methods() {
    let methods = vec![
        ("GET", Method::GET),
        ("POST", Method::POST),
        ("PUT", Method::PUT),
        ("DELETE", Method::DELETE),
        ("HEAD", Method::HEAD),
        ("OPTIONS", Method::OPTIONS),
        ("PATCH", Method::PATCH),
    ];

    for (method_str, expected_method) in methods {
        let req = format!("{} / HTTP/1.1\r\n\r\n", method_str);
        let (parsed, _) = parse_http_request(req.as_bytes()).unwrap();
        assert_eq!(parsed.method, expected_method);
    }
}

#[test]
fn test_parse_request_with_empty_body() {
    let req = b"POST /api HTTP/1.1\r\nContent-Length: 0\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body.len(), 0);
}

#[test]
fn test_parse_request_with_binary_body() {
    let req = b"POST /upload HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\x01\x02\x03";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, vec![0, 1, 2, 3]);
}

#[test]
fn test_parse_header_case_preservation() {
    let req = b"GET / HTTP/1.1\r\nContent-Type: application/json\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    // Headers are stored as-is with trimming
    assert_eq!(
        parsed.headers,
        vec![("Content-Type".to_string(), "application/json".to_string())]
    );
}

#[test]
fn test_parse_headers_keep_arrival_order() {
    let req = b"GET /admin HTTP/1.1\r\nHost: a\r\nAuthorization: Bearer t\r\nAccept: */*\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    let names: Vec<&str> = parsed.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, vec!["Host", "Authorization", "Accept"]);
}

#[test]
fn test_parse_login_request_leaves_trailing_bytes() {
    let body = br#"{"username":"admin","password":"pw"}"#;
    let mut req = format!(
        "POST /login HTTP/1.1\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n",
        body.len()
    )
    .into_bytes();
    req.extend_from_slice(body);
    let expected = req.len();
    req.extend_from_slice(b"GET / HTTP/1.1\r\n");

    let (parsed, consumed) = parse_http_request(&req).unwrap();

    assert_eq!(parsed.body, body.to_vec());
    assert_eq!(consumed, expected);
}

#[test]
fn test_parse_invalid_content_length() {
    let req = b"POST /login HTTP/1.1\r\nContent-Length: lots\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidContentLength)));
}

#[test]
fn test_parse_missing_path() {
    let req = b"GET\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidRequest)));
}
