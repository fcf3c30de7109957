use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cookie::{extract_set_cookie_header, CookiePair, SET_COOKIE};
use crate::headers::{print_headers, save_headers_to_file, HeaderMapping, DEFAULT_HEADERS_FILE, DEFAULT_SAMPLE_HEADERS_FILE};
use crate::http_request_executor::ExecutionContext;
use crate::url_list_parser::parse_url_file;

/// Line based console: prompts go to `output`, answers come from `input`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Console<R, W> {
        return Console { input, output };
    }

    pub fn out(&mut self) -> &mut W {
        return &mut self.output;
    }

    pub fn into_output(self) -> W {
        return self.output;
    }

    /// Returns the trimmed answer, `None` once the input is exhausted.
    pub fn read_answer(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("while reading from the console")?;
        if read == 0 {
            return Ok(None);
        }
        return Ok(Some(line.trim().to_string()));
    }

    /// Like [`Console::read_answer`] but exhausted input reads as a blank answer.
    pub fn prompt(&mut self, prompt: &str) -> Result<String> {
        return Ok(self.read_answer(prompt)?.unwrap_or_default());
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MenuChoice {
    SingleUrl,
    SampleUrl,
    UrlFile,
    ReuseCookie,
    ModifyCookie,
    Exit,
}

impl MenuChoice {
    pub fn parse(choice: &str) -> Option<MenuChoice> {
        return match choice {
            "1" => Some(MenuChoice::SingleUrl),
            "2" => Some(MenuChoice::SampleUrl),
            "3" => Some(MenuChoice::UrlFile),
            "4" => Some(MenuChoice::ReuseCookie),
            "5" => Some(MenuChoice::ModifyCookie),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        };
    }
}

const MENU: &str = "\nMenu:
1. Fetch headers for a single URL
2. Fetch headers for a sample URL
3. Fetch headers for multiple URLs from a file
4. Extract and automatically reuse cookies
5. Modify a cookie and reuse it
6. Exit";

/// Runs the menu until the user picks exit or the input ends.
pub fn run_interactive<R: BufRead, W: Write>(console: &mut Console<R, W>, context: &ExecutionContext) -> Result<()> {
    writeln!(console.out(), "Welcome to the HTTP Header Identifier Tool!")?;
    loop {
        writeln!(console.out(), "{}", MENU)?;
        let answer = console.read_answer("Enter your choice (1/2/3/4/5/6): ")?;
        let choice = match answer {
            // end of input behaves like choosing exit
            None => MenuChoice::Exit,
            Some(answer) => match MenuChoice::parse(&answer) {
                Some(choice) => choice,
                None => {
                    writeln!(console.out(), "Invalid choice. Please try again.")?;
                    continue;
                }
            },
        };
        debug!(?choice, "menu choice");
        match choice {
            MenuChoice::SingleUrl => {
                let url = console.prompt("Enter the URL: ")?;
                fetch_print_and_offer_save(console, context, &url, DEFAULT_HEADERS_FILE)?;
            }
            MenuChoice::SampleUrl => {
                let url = context.config.sample_url.clone();
                writeln!(console.out(), "\nUsing sample URL: {}", url)?;
                fetch_print_and_offer_save(console, context, &url, DEFAULT_SAMPLE_HEADERS_FILE)?;
            }
            MenuChoice::UrlFile => {
                let file_path = console.prompt("Enter the file path containing URLs: ")?;
                fetch_url_file(console, context, Path::new(&file_path))?;
            }
            MenuChoice::ReuseCookie => {
                let url = console.prompt("Enter the URL to fetch headers and reuse cookies: ")?;
                reuse_cookie(console, context, &url)?;
            }
            MenuChoice::ModifyCookie => {
                let url = console.prompt("Enter the URL to fetch headers and modify cookies: ")?;
                modify_and_reuse_cookie(console, context, &url)?;
            }
            MenuChoice::Exit => {
                writeln!(console.out(), "Exiting the tool. Goodbye!")?;
                info!("exiting");
                return Ok(());
            }
        }
    }
}

fn fetch_print_and_offer_save<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    context: &ExecutionContext,
    url: &str,
    default_file: &str,
) -> Result<()> {
    let headers = context.fetch_and_report(console.out(), url, context.config.fetch_timeout)?;
    print_headers(console.out(), &headers)?;
    let save_choice = console.prompt("Do you want to save the headers to a file? (yes/no): ")?;
    if save_choice.to_lowercase() == "yes" {
        let filename = console.prompt(&format!("Enter the filename (default: {}): ", default_file))?;
        let filename = if filename.is_empty() { default_file.to_string() } else { filename };
        save_headers_to_file(console.out(), &headers, Path::new(&filename))?;
    }
    return Ok(());
}

fn fetch_url_file<R: BufRead, W: Write>(console: &mut Console<R, W>, context: &ExecutionContext, file_path: &Path) -> Result<()> {
    let urls = match parse_url_file(file_path) {
        Ok(urls) => urls,
        Err(e) => {
            writeln!(console.out(), "{}", e)?;
            return Ok(());
        }
    };
    for url in urls {
        let headers = context.fetch_and_report(console.out(), &url, context.config.fetch_timeout)?;
        print_headers(console.out(), &headers)?;
    }
    return Ok(());
}

/// Fetches `url` on the cookie path, prints its headers and reports what the
/// `Set-Cookie` header yields.
fn fetch_cookie<R: BufRead, W: Write>(console: &mut Console<R, W>, context: &ExecutionContext, url: &str) -> Result<Option<String>> {
    let headers: HeaderMapping = context.fetch_and_report(console.out(), url, context.config.cookie_timeout)?;
    print_headers(console.out(), &headers)?;
    if headers.is_error() {
        debug!(url, "fetch failed, there is no cookie to extract");
    }
    match headers.get(SET_COOKIE).filter(|raw| !raw.is_empty()) {
        Some(raw) => writeln!(console.out(), "\nSet-Cookie Header: {}", raw)?,
        None => writeln!(console.out(), "No Set-Cookie header found.")?,
    }
    let cookie = extract_set_cookie_header(&headers);
    if cookie.is_none() {
        writeln!(console.out(), "No valid cookie found. Cannot proceed with cookie-based request.")?;
    }
    return Ok(cookie);
}

fn send_and_print<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    context: &ExecutionContext,
    url: &str,
    cookie: &str,
    title: &str,
) -> Result<()> {
    writeln!(console.out(), "\nSending request to {} with cookie: {}", url, cookie)?;
    let response_text = match context.send_request_with_cookie(url, cookie) {
        Ok(body) => body,
        Err(e) => format!("Error sending request with cookie: {}", e),
    };
    writeln!(console.out(), "\n{}", title)?;
    writeln!(console.out(), "{}", response_text)?;
    return Ok(());
}

fn reuse_cookie<R: BufRead, W: Write>(console: &mut Console<R, W>, context: &ExecutionContext, url: &str) -> Result<()> {
    let cookie = match fetch_cookie(console, context, url)? {
        Some(cookie) => cookie,
        None => return Ok(()),
    };
    writeln!(console.out(), "\nAutomatically reusing the extracted cookie...")?;
    return send_and_print(console, context, url, &cookie, "Response using cookie:");
}

fn modify_and_reuse_cookie<R: BufRead, W: Write>(console: &mut Console<R, W>, context: &ExecutionContext, url: &str) -> Result<()> {
    let cookie = match fetch_cookie(console, context, url)? {
        Some(cookie) => cookie,
        None => return Ok(()),
    };
    writeln!(console.out(), "\nCurrent cookie: {}", cookie)?;
    let pair = match CookiePair::parse(&cookie) {
        Some(pair) => pair,
        None => {
            writeln!(console.out(), "Malformed cookie '{}': expected name=value.", cookie)?;
            return Ok(());
        }
    };
    writeln!(console.out(), "Current key: {}, Current value: {}", pair.name, pair.value)?;
    let new_key = console.prompt(&format!("Enter a new key (press Enter to keep '{}'): ", pair.name))?;
    let new_value = console.prompt(&format!("Enter a new value (press Enter to keep '{}'): ", pair.value))?;
    let modified_cookie = pair.with_overrides(&new_key, &new_value).to_string();
    writeln!(console.out(), "\nModified cookie: {}", modified_cookie)?;
    return send_and_print(console, context, url, &modified_cookie, "Response using modified cookie:");
}
