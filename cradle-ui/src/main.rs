//! Cradle Dashboard
//!
//! Infant-care log dashboard built with Leptos (WASM).
//!
//! # Pages
//!
//! - Dashboard: overview of the comprehensive analysis
//! - Sleep, feeding and vomit pattern analyses
//! - Growth records
//! - Upload: run the backend parser and download CSV exports
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Fetch sequencing and payload shaping live in the `cradle`
//! core crate; this crate supplies the browser HTTP client, signals and
//! rendering.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
