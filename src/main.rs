// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! csrf-fetch CLI
//!
//! Shows the AJAX headers for a cookie store and sends one-off requests
//! with the CSRF token attached.

use std::env;
use std::process::ExitCode;

use reqwest::Method;
use url::Url;

use csrf_fetch::{
    ajax_headers, AjaxClient, AjaxConfig, CredentialsMode, RequestOptions, StaticCookies,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("csrf_fetch=info".parse().expect("static directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "headers" => show_headers(&args[2..]),
        "fetch" => {
            if args.len() < 3 {
                eprintln!("Usage: csrf-fetch fetch <url> [OPTIONS]");
                return ExitCode::from(1);
            }
            fetch_url(&args[2], &args[3..]).await
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("csrf-fetch {}", csrf_fetch::VERSION);
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"csrf-fetch - CSRF-aware AJAX requests

USAGE:
    csrf-fetch <COMMAND> [OPTIONS]

COMMANDS:
    headers         Print the AJAX headers as JSON
    fetch <url>     Send one request with the AJAX headers attached
    help            Show this help message
    version         Show version information

OPTIONS:
    --cookie <store>         Cookie store, e.g. "csrftoken=abc; sessionid=xyz"
    -X, --method <method>    Request method (fetch, default GET)
    -d, --data <body>        Request body (fetch)
    -H, --header <h: v>      Header override, repeatable (fetch)
    --credentials <mode>     omit | same-origin | include (fetch)

EXAMPLES:
    csrf-fetch headers --cookie "csrftoken=abc123; sessionid=xyz"
    csrf-fetch fetch http://localhost:8000/api/routes/ -X POST -d '{{"route": 7}}' \
        --cookie "csrftoken=abc123"
"#
    );
}

#[derive(Debug, Default)]
struct CliOptions {
    cookie: Option<String>,
    method: Option<Method>,
    data: Option<String>,
    headers: Vec<(String, String)>,
    credentials: Option<CredentialsMode>,
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();

    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("Missing value for {}", flag))
        };

        match flag.as_str() {
            "--cookie" => options.cookie = Some(value()?),
            "-X" | "--method" => {
                let method = value()?;
                options.method = Some(
                    Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                        .map_err(|_| format!("Invalid method: {}", method))?,
                );
            }
            "-d" | "--data" => options.data = Some(value()?),
            "-H" | "--header" => {
                let header = value()?;
                let (name, val) = header
                    .split_once(':')
                    .ok_or_else(|| format!("Header must look like 'Name: value': {}", header))?;
                options.headers.push((name.trim().to_string(), val.trim().to_string()));
            }
            "--credentials" => {
                options.credentials =
                    Some(value()?.parse::<CredentialsMode>().map_err(|e| e.to_string())?);
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
    }

    Ok(options)
}

fn show_headers(args: &[String]) -> ExitCode {
    let options = match parse_options(args) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    let cookies = options
        .cookie
        .map(StaticCookies::new)
        .unwrap_or_else(StaticCookies::none);

    match serde_json::to_string_pretty(&ajax_headers(&cookies)) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to render headers: {}", e);
            ExitCode::from(1)
        }
    }
}

async fn fetch_url(url: &str, args: &[String]) -> ExitCode {
    let options = match parse_options(args) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    let client = match AjaxClient::with_config(AjaxConfig::default()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return ExitCode::from(1);
        }
    };

    if let Some(ref store) = options.cookie {
        match (Url::parse(url), client.cookie_jar()) {
            (Ok(target), Some(jar)) => jar.seed(store, &target),
            (Err(e), _) => {
                eprintln!("Invalid URL {}: {}", url, e);
                return ExitCode::from(1);
            }
            (Ok(_), None) => {}
        }
    }

    let mut request = RequestOptions::new();
    if let Some(method) = options.method {
        request = request.method(method);
    }
    if let Some(data) = options.data {
        request = request.body(data);
    }
    if let Some(credentials) = options.credentials {
        request = request.credentials(credentials);
    }
    for (name, value) in options.headers {
        request = request.header(name, value);
    }

    match client.fetch(url, request).await {
        Ok(response) => {
            println!("Status: {}", response.status);
            println!("URL: {}", response.url);
            if response.redirected {
                println!("Redirected: yes");
            }
            for (name, value) in response.headers.iter() {
                println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
            }
            println!();
            println!("{}", response.text_lossy());

            if response.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => {
            match e.url() {
                Some(target) => eprintln!("Request to {} failed: {}", target, e),
                None => eprintln!("Request failed: {}", e),
            }
            if e.is_request_error() {
                ExitCode::from(3)
            } else {
                ExitCode::from(1)
            }
        }
    }
}
