use clap::Parser;

use super::{HttpMethod, VolleyArgs};

fn parse(argv: &[&str]) -> Result<VolleyArgs, String> {
    VolleyArgs::try_parse_from(argv).map_err(|err| err.to_string())
}

#[test]
fn defaults_match_documented_values() -> Result<(), String> {
    let args = parse(&["volley", "--input", "urls.txt"])?;
    assert_eq!(args.prefix, "");
    assert_eq!(args.limit, 1000);
    assert_eq!(args.chunk_size.get(), 1000);
    assert_eq!(args.time_range, 1000);
    assert_eq!(args.min_distance, 0);
    assert_eq!(args.timeout.get(), 1000);
    assert_eq!(args.method, HttpMethod::Get);
    assert_eq!(args.expected_status, 200);
    assert_eq!(args.output, "stdout");
    assert!(!args.sequential);
    assert!(!args.no_body);
    assert!(!args.repeat_data);
    assert!(args.latency_output.is_none());
    Ok(())
}

#[test]
fn short_flags_parse() -> Result<(), String> {
    let args = parse(&[
        "volley", "-i", "urls.txt", "-l", "25", "-X", "post", "-p", "http://h/", "-o", "out.bin",
    ])?;
    assert_eq!(args.input.as_deref(), Some(std::path::Path::new("urls.txt")));
    assert_eq!(args.limit, 25);
    assert_eq!(args.method, HttpMethod::Post);
    assert_eq!(args.prefix, "http://h/");
    assert_eq!(args.output, "out.bin");
    Ok(())
}

#[test]
fn method_is_case_insensitive() -> Result<(), String> {
    let args = parse(&["volley", "-i", "urls.txt", "-X", "POST"])?;
    assert_eq!(args.method, HttpMethod::Post);
    Ok(())
}

#[test]
fn zero_chunk_size_is_rejected() {
    assert!(parse(&["volley", "-i", "urls.txt", "--chunk-size", "0"]).is_err());
}

#[test]
fn zero_timeout_is_rejected() {
    assert!(parse(&["volley", "-i", "urls.txt", "--timeout", "0"]).is_err());
}

#[test]
fn repeat_data_requires_data_file() {
    assert!(parse(&["volley", "-i", "urls.txt", "--repeat-data"]).is_err());
    assert!(
        parse(&[
            "volley",
            "-i",
            "urls.txt",
            "--data-file",
            "bodies.txt",
            "--repeat-data"
        ])
        .is_ok()
    );
}
