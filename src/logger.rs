use crate::config::Config;
use chrono::{Local, SecondsFormat};
use hyper::{Method, StatusCode, Uri};
use std::net::SocketAddr;

/// Local time in ISO-8601, matching the timestamps in response bodies
fn timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("ScriptGuard demo server started");
    println!("Listening on: http://{addr}");
    println!("Serving demo files from: {}", config.static_files.root);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Available endpoints:");
    println!("  GET http://{addr}/fake/track          - Returns JSON confirmation");
    println!("  GET http://{addr}/fake/miner_payload  - Returns miner payload");
    println!();
    println!("Open http://{addr}/news_demo.html to test the extension");
    println!("Press Ctrl+C to stop the server");
    println!("======================================\n");
}

pub fn log_server_stopped() {
    println!("\nServer stopped.");
}

/// One line per handled request, whichever route served it
pub fn log_request(method: &Method, uri: &Uri, status: StatusCode) {
    println!(
        "[SERVER] {} - \"{} {}\" {}",
        timestamp(),
        method,
        uri,
        status.as_u16()
    );
}

pub fn log_track() {
    println!("[TRACK] {} - Analytics ping received", timestamp());
}

pub fn log_miner() {
    println!("[MINER] {} - Miner payload sent", timestamp());
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        println!("[Headers] Count: {count}");
    }
}
