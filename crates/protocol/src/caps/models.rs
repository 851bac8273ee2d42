use time::OffsetDateTime;

use crate::Category;

/// Decoded `t=caps` response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub server: Server,
    pub limits: Limits,
    pub retention: Retention,
    pub registration: Registration,
    pub searching: Searching,
    /// Top-level categories, each owning its subcategories.
    pub categories: Vec<CategoryNode>,
    pub groups: Vec<Group>,
    pub genres: Vec<Genre>,
}

impl Capabilities {
    /// Depth-first walk over every category in the forest, parents before
    /// their children.
    pub fn iter_categories(&self) -> impl Iterator<Item = &CategoryNode> {
        let mut stack: Vec<&CategoryNode> = self.categories.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.subcategories.iter().rev());
            Some(node)
        })
    }

    pub fn find_category(&self, id: u32) -> Option<&CategoryNode> {
        self.iter_categories().find(|node| node.id == id)
    }
}

/// Information about the indexer itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Server {
    /// Protocol version implemented by the server.
    pub version: String,
    pub title: String,
    pub strapline: String,
    pub email: String,
    pub url: String,
    pub image: String,
}

/// Result-count limits imposed on searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    pub max: u32,
    pub default: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Retention {
    pub days: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registration {
    pub available: bool,
    pub open: bool,
}

/// Which search functions the indexer offers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Searching {
    pub search: SearchCapability,
    pub tv: SearchCapability,
    pub movie: SearchCapability,
    /// `audio-search`, also advertised as `music-search`.
    pub audio: SearchCapability,
    pub book: SearchCapability,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCapability {
    pub available: bool,
    /// Query parameters accepted by this search, e.g. `q`, `season`, `ep`.
    pub supported_params: Vec<String>,
}

impl SearchCapability {
    pub fn supports(&self, param: &str) -> bool {
        self.supported_params.iter().any(|supported| supported.eq_ignore_ascii_case(param))
    }
}

/// A category as advertised by the indexer. Indexers name their categories
/// freely, so the advertised name may differ from the registry's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryNode {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub subcategories: Vec<CategoryNode>,
}

impl CategoryNode {
    /// The registry entry for this node's code.
    pub fn category(&self) -> Category {
        Category::from_code(self.id)
    }
}

/// A usenet group the indexer covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub id: Option<u32>,
    pub name: String,
    pub description: String,
    /// `lastupdate` exactly as sent.
    pub last_update_raw: Option<String>,
    /// `lastupdate` when it could be parsed.
    pub last_update: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Genre {
    pub id: String,
    pub name: String,
    pub category_id: Option<u32>,
}
