//! Document-shaped proxies for the capabilities XML. They mirror the nesting of
//! the wire format and are flattened into [`super::models`] on conversion.

use serde::{Deserialize, Deserializer};

use super::models::{
    Capabilities, CategoryNode, Genre, Group, Limits, Registration, Retention, SearchCapability, Searching, Server,
};
use crate::codec::{parse_date, yes_no};

#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct CapabilitiesProxy {
    server: ServerProxy,
    limits: LimitsProxy,
    retention: RetentionProxy,
    registration: RegistrationProxy,
    searching: SearchingProxy,
    categories: CategoriesProxy,
    groups: GroupsProxy,
    genres: GenresProxy,
}
impl From<CapabilitiesProxy> for Capabilities {
    fn from(caps: CapabilitiesProxy) -> Self {
        Self {
            server: caps.server.into(),
            limits: Limits {
                max: caps.limits.max,
                default: caps.limits.default,
            },
            retention: Retention {
                days: caps.retention.days,
            },
            registration: Registration {
                available: caps.registration.available,
                open: caps.registration.open,
            },
            searching: caps.searching.into(),
            categories: caps.categories.category.into_iter().map(CategoryNode::from).collect(),
            groups: caps.groups.group.into_iter().map(Group::from).collect(),
            genres: caps.genres.genre.into_iter().map(Genre::from).collect(),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ServerProxy {
    #[serde(rename = "@version")]
    version: String,
    #[serde(rename = "@title")]
    title: String,
    #[serde(rename = "@strapline")]
    strapline: String,
    #[serde(rename = "@email")]
    email: String,
    #[serde(rename = "@url")]
    url: String,
    #[serde(rename = "@image")]
    image: String,
}
impl From<ServerProxy> for Server {
    fn from(server: ServerProxy) -> Self {
        Self {
            version: server.version,
            title: server.title,
            strapline: server.strapline,
            email: server.email,
            url: server.url,
            image: server.image,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LimitsProxy {
    #[serde(rename = "@max")]
    max: u32,
    #[serde(rename = "@default")]
    default: u32,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RetentionProxy {
    #[serde(rename = "@days")]
    days: u32,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RegistrationProxy {
    #[serde(rename = "@available", deserialize_with = "yes_no::deserialize")]
    available: bool,
    #[serde(rename = "@open", deserialize_with = "yes_no::deserialize")]
    open: bool,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct SearchingProxy {
    search: SearchProxy,
    #[serde(rename = "tv-search")]
    tv: SearchProxy,
    #[serde(rename = "movie-search")]
    movie: SearchProxy,
    #[serde(rename = "audio-search", alias = "music-search")]
    audio: SearchProxy,
    #[serde(rename = "book-search")]
    book: SearchProxy,
}
impl From<SearchingProxy> for Searching {
    fn from(searching: SearchingProxy) -> Self {
        Self {
            search: searching.search.into(),
            tv: searching.tv.into(),
            movie: searching.movie.into(),
            audio: searching.audio.into(),
            book: searching.book.into(),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct SearchProxy {
    #[serde(rename = "@available", deserialize_with = "yes_no::deserialize")]
    available: bool,
    #[serde(rename = "@supportedParams", deserialize_with = "comma_separated")]
    supported_params: Vec<String>,
}
impl From<SearchProxy> for SearchCapability {
    fn from(search: SearchProxy) -> Self {
        Self {
            available: search.available,
            supported_params: search.supported_params,
        }
    }
}

fn comma_separated<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value
        .split(',')
        .map(str::trim)
        .filter(|param| !param.is_empty())
        .map(str::to_string)
        .collect())
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CategoriesProxy {
    category: Vec<CategoryProxy>,
}

/// Subcategories are usually `<subcat>` children, but some indexers nest
/// `<category>` elements instead, sometimes interleaved with `<subcat>`. Both
/// end up in the same list. A missing `id` decodes as 0.
#[derive(Deserialize)]
struct CategoryProxy {
    #[serde(rename = "@id", default)]
    id: u32,
    #[serde(rename = "@name", default)]
    name: String,
    #[serde(rename = "@description", default)]
    description: Option<String>,
    #[serde(default)]
    subcat: Vec<CategoryProxy>,
    #[serde(default)]
    category: Vec<CategoryProxy>,
}
impl From<CategoryProxy> for CategoryNode {
    fn from(category: CategoryProxy) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description.filter(|description| !description.is_empty()),
            subcategories: category
                .subcat
                .into_iter()
                .chain(category.category)
                .map(CategoryNode::from)
                .collect(),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GroupsProxy {
    group: Vec<GroupProxy>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GroupProxy {
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@description")]
    description: String,
    #[serde(rename = "@lastupdate")]
    last_update: Option<String>,
}
impl From<GroupProxy> for Group {
    fn from(group: GroupProxy) -> Self {
        let last_update = group.last_update.as_deref().and_then(|raw| match parse_date(raw) {
            Ok(date) => Some(date),
            Err(err) => {
                tracing::debug!(group = %group.name, "ignoring group lastupdate: {}", *err);
                None
            },
        });
        Self {
            id: group.id.and_then(|id| id.trim().parse().ok()),
            name: group.name,
            description: group.description,
            last_update_raw: group.last_update,
            last_update,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GenresProxy {
    genre: Vec<GenreProxy>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GenreProxy {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@categoryid")]
    category_id: Option<String>,
}
impl From<GenreProxy> for Genre {
    fn from(genre: GenreProxy) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
            category_id: genre.category_id.and_then(|id| id.trim().parse().ok()),
        }
    }
}
