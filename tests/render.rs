use vulntext::{convert, JsonHandler, Message, ReportError, ShowOptions, TextHandler};

const STREAM: &str = r#"
{"config": {
  "protocol_version": "v1.0.0",
  "scanner_name": "govulncheck",
  "scanner_version": "v1.0.1",
  "db": "https://vuln.go.dev",
  "db_last_modified": "2023-06-22T18:52:23Z",
  "go_version": "go1.20.5",
  "scan_level": "symbol"
}}
{"progress": {"message": "Scanning your code and 46 packages across 3 dependent modules for known vulnerabilities..."}}
{"finding": {
  "osv": "GO-2023-1840",
  "fixed_version": "v1.20.5",
  "trace": [
    {"module": "stdlib", "version": "v1.20.4", "package": "runtime"}
  ]
}}
{"osv": {
  "id": "GO-2023-1878",
  "summary": "Insufficient sanitization of Host header in net/http",
  "details": "The HTTP/1 client does not fully validate the contents of the Host header.",
  "affected": [{"package": {"name": "stdlib", "ecosystem": "Go"}}],
  "database_specific": {"url": "https://pkg.go.dev/vuln/GO-2023-1878"}
}}
{"finding": {
  "osv": "GO-2023-1878",
  "fixed_version": "v1.20.6",
  "trace": [
    {"module": "stdlib", "version": "v1.20.4", "package": "net/http", "receiver": "*Client", "function": "Do"},
    {"module": "example.com/app", "package": "example.com/app/fetch", "function": "Get", "position": {"filename": "fetch/fetch.go", "line": 21, "column": 20}},
    {"module": "example.com/app", "package": "example.com/app", "function": "main", "position": {"filename": "main.go", "line": 9, "column": 11}}
  ]
}}
{"finding": {
  "osv": "GO-2022-0969",
  "trace": [
    {"module": "golang.org/x/net", "version": "v0.0.0-20220722155237-a158d28d115b", "package": "golang.org/x/net/http2", "function": "ServeConn"},
    {"module": "example.com/app", "package": "example.com/app", "function": "serve", "position": {"filename": "server.go", "line": 40, "column": 5}}
  ]
}}
{"osv": {
  "id": "GO-2023-1840",
  "summary": "Unsafe behavior in setuid/setgid binaries in runtime",
  "affected": [{"package": {"name": "stdlib", "ecosystem": "Go"}}],
  "database_specific": {"url": "https://pkg.go.dev/vuln/GO-2023-1840"}
}}
{"osv": {
  "id": "GO-2022-0969",
  "summary": "Denial of service in net/http and golang.org/x/net/http2 when a server accepts a large number of connections that are left idle",
  "affected": [{"package": {"name": "golang.org/x/net", "ecosystem": "Go"}}],
  "database_specific": {"url": "https://pkg.go.dev/vuln/GO-2022-0969"}
}}
"#;

const EXPECTED: &str = "\
Using go1.20.5 and govulncheck@v1.0.1 with vulnerability data from https://vuln.go.dev (last modified 2023-06-22 18:52:23 +0000 UTC).

Scanning your code and 46 packages across 3 dependent modules for known vulnerabilities...

Vulnerability #1: GO-2023-1878
    Insufficient sanitization of Host header in net/http
  More info: https://pkg.go.dev/vuln/GO-2023-1878
  Standard library
    Found in: net/http@go1.20.4
    Fixed in: net/http@go1.20.6
    Example traces found:
      #1: fetch/fetch.go:21:20: fetch.Get calls http.Client.Do

Vulnerability #2: GO-2022-0969
    Denial of service in net/http and golang.org/x/net/http2 when a server
    accepts a large number of connections that are left idle
  More info: https://pkg.go.dev/vuln/GO-2022-0969
  Module: golang.org/x/net
    Found in: golang.org/x/net@v0.0.0-20220722155237-a158d28d115b
    Fixed in: N/A
    Example traces found:
      #1: server.go:40:5: app.serve calls http2.ServeConn

=== Informational ===

Found 1 vulnerability in packages that you import, but there are no call
stacks leading to the use of this vulnerability. You may not need to
take any action. See https://pkg.go.dev/golang.org/x/vuln/cmd/govulncheck
for details.

Vulnerability #1: GO-2023-1840
    Unsafe behavior in setuid/setgid binaries in runtime
  More info: https://pkg.go.dev/vuln/GO-2023-1840
  Standard library
    Found in: runtime@go1.20.4
    Fixed in: runtime@go1.20.5

Your code is affected by 2 vulnerabilities from 1 module and the Go standard library.

Share feedback at https://go.dev/s/govulncheck-feedback.
";

fn render(show: ShowOptions) -> (String, Result<(), ReportError>) {
    let mut buf = Vec::new();
    let result = convert(STREAM.as_bytes(), TextHandler::new(&mut buf).with_show(show));
    (String::from_utf8(buf).unwrap(), result)
}

#[test]
fn test_text_report_end_to_end() {
    let (out, result) = render(ShowOptions::default());
    assert_eq!(out, EXPECTED);
    assert!(result.unwrap_err().is_vulnerabilities_found());
}

#[test]
fn test_text_report_is_deterministic() {
    let (first, _) = render(ShowOptions::default());
    let (second, _) = render(ShowOptions::default());
    assert_eq!(first, second);
}

#[test]
fn test_text_report_full_traces() {
    let (out, _) = render(ShowOptions {
        traces: true,
        color: false,
    });
    assert!(out.contains(
        "      #1: for function net/http.Client.Do
        main.go:9:11: example.com/app.main
        fetch/fetch.go:21:20: example.com/app/fetch.Get
        net/http.Client.Do
"
    ));
}

#[test]
fn test_invalid_finding_is_skipped() {
    let stream = format!(
        "{}\n{}",
        r#"{"finding": {"osv": "GO-X", "trace": [{"package": "os", "function": "Open"}]}}"#,
        STREAM
    );
    let mut buf = Vec::new();
    let result = convert(stream.as_bytes(), TextHandler::new(&mut buf));
    assert!(result.unwrap_err().is_vulnerabilities_found());
    let out = String::from_utf8(buf).unwrap();
    assert!(!out.contains("GO-X"));
    assert_eq!(out, EXPECTED);
}

#[test]
fn test_json_report_round_trips_stream() {
    let mut buf = Vec::new();
    convert(STREAM.as_bytes(), JsonHandler::new(&mut buf)).unwrap();

    let original: Vec<Message> = serde_json::Deserializer::from_str(STREAM)
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();
    let emitted: Vec<Message> = serde_json::Deserializer::from_slice(&buf)
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(original, emitted);
}
