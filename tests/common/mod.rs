#![allow(dead_code)]

pub mod http_server;

use std::io::Cursor;

use headerscope::config::Config;
use headerscope::execute::{run_interactive, Console};
use headerscope::http_request_executor::ExecutionContext;

/// Feeds `script` to the menu as if typed and returns everything printed.
pub fn run_script(script: &str, config: Config) -> String {
    let context = ExecutionContext::new(config).expect("Failed to build execution context");
    let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    run_interactive(&mut console, &context).expect("Interactive run failed");
    String::from_utf8(console.into_output()).expect("Console output is not utf-8")
}
