//! Fan site client: session cache, content gateways, controller and view.
//!
//! ARCHITECTURE
//! ============
//! `Controller` holds the page state and drives every user action through a
//! `ContentGateway` (`HttpGateway` against the action endpoint, or
//! `MockGateway` over in-process fixtures). The signed-in identity survives
//! restarts through a `SessionStore`. `view::render` turns controller state
//! into a `PageView` for whatever front end draws it.

pub mod controller;
pub mod gateway;
pub mod http;
pub mod mock;
pub mod session;
pub mod view;

pub use controller::{Controller, Dialogs, Notice, ReviewDraft};
pub use gateway::{ContentGateway, GatewayError};
pub use http::HttpGateway;
pub use mock::MockGateway;
pub use session::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};
pub use view::{PageView, render};

use crate::config::ClientConfig;

/// Controller wired from configuration: the HTTP gateway when an API URL is
/// set, fixtures otherwise, with the identity cached at `session_path`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn connect(config: &ClientConfig) -> Result<Controller<Box<dyn ContentGateway>, FileSessionStore>, GatewayError> {
    let gateway: Box<dyn ContentGateway> = match &config.api_url {
        Some(url) => {
            tracing::info!(api_url = %url, "using HTTP gateway");
            Box::new(HttpGateway::new(url.clone())?)
        }
        None => {
            tracing::info!("no API URL configured, using fixture gateway");
            Box::new(MockGateway::with_fixtures())
        }
    };
    Ok(Controller::new(gateway, FileSessionStore::new(&config.session_path)))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
