pub mod config;
pub mod cookie;
pub mod errors;
pub mod execute;
pub mod headers;
pub mod http_request_executor;
pub mod url_list_parser;
