//! Explicit page registry with a documented lifecycle.
//!
//! Pages are registered while the router is idle. `start` freezes the
//! registry and activates the default page; from then on `navigate` switches
//! pages and is a no-op for the page already shown.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    #[error("page {0:?} registered after start")]
    RegisterAfterStart(String),
    #[error("page {0:?} already registered")]
    Duplicate(String),
    #[error("unknown page {0:?}")]
    UnknownPage(String),
    #[error("router not started")]
    NotStarted,
    #[error("router already started")]
    AlreadyStarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Switched,
    AlreadyActive,
}

/// Name -> page mapping plus the active page.
#[derive(Debug, Clone, PartialEq)]
pub struct Router<P> {
    pages: HashMap<String, P>,
    order: Vec<String>,
    current: Option<String>,
    started: bool,
}

impl<P> Default for Router<P> {
    fn default() -> Self {
        Self {
            pages: HashMap::new(),
            order: Vec::new(),
            current: None,
            started: false,
        }
    }
}

impl<P: Clone + PartialEq> Router<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, page: P) -> Result<(), RouterError> {
        if self.started {
            return Err(RouterError::RegisterAfterStart(name.to_string()));
        }
        if self.pages.contains_key(name) {
            return Err(RouterError::Duplicate(name.to_string()));
        }
        self.pages.insert(name.to_string(), page);
        self.order.push(name.to_string());
        Ok(())
    }

    pub fn start(&mut self, default_page: &str) -> Result<(), RouterError> {
        if self.started {
            return Err(RouterError::AlreadyStarted);
        }
        if !self.pages.contains_key(default_page) {
            return Err(RouterError::UnknownPage(default_page.to_string()));
        }
        self.started = true;
        self.current = Some(default_page.to_string());
        dioxus_logger::tracing::info!("Router started on {}", default_page);
        Ok(())
    }

    pub fn navigate(&mut self, name: &str) -> Result<Navigation, RouterError> {
        if !self.started {
            return Err(RouterError::NotStarted);
        }
        if !self.pages.contains_key(name) {
            return Err(RouterError::UnknownPage(name.to_string()));
        }
        if self.current.as_deref() == Some(name) {
            return Ok(Navigation::AlreadyActive);
        }
        self.current = Some(name.to_string());
        dioxus_logger::tracing::info!("Navigated to {}", name);
        Ok(Navigation::Switched)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current(&self) -> Option<&P> {
        self.current.as_ref().and_then(|name| self.pages.get(name))
    }

    /// Registered names in registration order
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}

impl<P: Clone + PartialEq + Eq + Hash> Router<P> {
    pub fn name_of(&self, page: &P) -> Option<&str> {
        self.order
            .iter()
            .find(|name| self.pages.get(name.as_str()) == Some(page))
            .map(String::as_str)
    }
}
