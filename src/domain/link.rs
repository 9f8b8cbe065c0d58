use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::Result;

/// Href of one image detail page, as found on a gallery page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetailLink(String);

impl DetailLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self(href.into())
    }

    pub fn href(&self) -> &str {
        &self.0
    }

    /// Resolve against the gallery base URL. Absolute hrefs pass through.
    pub fn resolve(&self, base: &Url) -> Result<Url> {
        Ok(base.join(&self.0)?)
    }
}

impl std::fmt::Display for DetailLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
