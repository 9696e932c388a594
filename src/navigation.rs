//! Active-page tracking.
//!
//! Exactly one known page is active at any time. Requests for unknown pages
//! are refused and leave the state untouched.

use crate::log;

/// A successful page change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone)]
pub struct NavigationController {
    pages: Vec<String>,
    default: String,
    active: String,
}

impl NavigationController {
    /// `pages` in navigation order; `default` is the initial page.
    ///
    /// An unknown default falls back to the first page.
    pub fn new<I, S>(pages: I, default: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages: Vec<String> = pages.into_iter().map(Into::into).collect();
        let default = if pages.iter().any(|p| p == default) {
            default.to_owned()
        } else {
            pages.first().cloned().unwrap_or_default()
        };
        Self {
            active: default.clone(),
            default,
            pages,
        }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn default_page(&self) -> &str {
        &self.default
    }

    pub fn is_active(&self, page: &str) -> bool {
        self.active == page
    }

    pub fn contains(&self, page: &str) -> bool {
        self.pages.iter().any(|p| p == page)
    }

    /// Make `page` active if it is known.
    ///
    /// Navigating to the already active page is still a transition, so the
    /// caller re-renders and records the visit.
    pub fn navigate(&mut self, page: &str) -> Option<Transition> {
        if !self.contains(page) {
            log!("warn"; "invalid page: {}", page);
            return None;
        }
        let from = std::mem::replace(&mut self.active, page.to_owned());
        Some(Transition {
            from,
            to: self.active.clone(),
        })
    }

    /// Move to the following page, if any.
    pub fn next(&mut self) -> Option<Transition> {
        let target = self.pages.get(self.index()? + 1)?.clone();
        self.navigate(&target)
    }

    /// Move to the preceding page, if any.
    pub fn previous(&mut self) -> Option<Transition> {
        let index = self.index()?.checked_sub(1)?;
        let target = self.pages[index].clone();
        self.navigate(&target)
    }

    /// Route a location hash such as `#links`.
    ///
    /// An empty hash routes to the default page; unknown hashes are ignored.
    pub fn from_hash(&mut self, hash: &str) -> Option<Transition> {
        let target = hash.strip_prefix('#').unwrap_or(hash);
        if target.is_empty() {
            let default = self.default.clone();
            return self.navigate(&default);
        }
        if !self.contains(target) {
            return None;
        }
        self.navigate(target)
    }

    fn index(&self) -> Option<usize> {
        self.pages.iter().position(|p| *p == self.active)
    }
}
