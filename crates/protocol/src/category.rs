//! The fixed newznab category table.
//!
//! Codes follow a decimal hierarchy: the thousands digit selects the top-level
//! category and the tens select a subcategory (`5040` is `TV/HD` under `5000`).

use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::LazyLock;

/// A newznab category: numeric code plus human-readable text.
///
/// Codes the registry doesn't know about are still representable; they simply
/// carry empty text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category {
    pub code: u32,
    pub text: &'static str,
}

impl Category {
    pub const RESERVED: Self = Self::new(0, "Reserved");
    pub const CONSOLE: Self = Self::new(1000, "Console");
    pub const CONSOLE_NDS: Self = Self::new(1010, "Console/NDS");
    pub const CONSOLE_PSP: Self = Self::new(1020, "Console/PSP");
    pub const CONSOLE_WII: Self = Self::new(1030, "Console/Wii");
    pub const CONSOLE_XBOX: Self = Self::new(1040, "Console/XBox");
    pub const CONSOLE_XBOX_360: Self = Self::new(1050, "Console/XBox 360");
    pub const CONSOLE_WIIWARE: Self = Self::new(1060, "Console/Wiiware");
    pub const CONSOLE_XBOX_360_DLC: Self = Self::new(1070, "Console/XBox 360 DLC");
    pub const MOVIES: Self = Self::new(2000, "Movies");
    pub const MOVIES_FOREIGN: Self = Self::new(2010, "Movies/Foreign");
    pub const MOVIES_OTHER: Self = Self::new(2020, "Movies/Other");
    pub const MOVIES_SD: Self = Self::new(2030, "Movies/SD");
    pub const MOVIES_HD: Self = Self::new(2040, "Movies/HD");
    pub const MOVIES_UHD: Self = Self::new(2045, "Movies/UHD");
    pub const MOVIES_BLURAY: Self = Self::new(2050, "Movies/BluRay");
    pub const MOVIES_3D: Self = Self::new(2060, "Movies/3D");
    pub const AUDIO: Self = Self::new(3000, "Audio");
    pub const AUDIO_MP3: Self = Self::new(3010, "Audio/MP3");
    pub const AUDIO_VIDEO: Self = Self::new(3020, "Audio/Video");
    pub const AUDIO_AUDIOBOOK: Self = Self::new(3030, "Audio/Audiobook");
    pub const AUDIO_LOSSLESS: Self = Self::new(3040, "Audio/Lossless");
    pub const PC: Self = Self::new(4000, "PC");
    pub const PC_0DAY: Self = Self::new(4010, "PC/0day");
    pub const PC_ISO: Self = Self::new(4020, "PC/ISO");
    pub const PC_MAC: Self = Self::new(4030, "PC/Mac");
    pub const PC_MOBILE_OTHER: Self = Self::new(4040, "PC/Mobile-Other");
    pub const PC_GAMES: Self = Self::new(4050, "PC/Games");
    pub const PC_MOBILE_IOS: Self = Self::new(4060, "PC/Mobile-iOS");
    pub const PC_MOBILE_ANDROID: Self = Self::new(4070, "PC/Mobile-Android");
    pub const TV: Self = Self::new(5000, "TV");
    pub const TV_FOREIGN: Self = Self::new(5020, "TV/Foreign");
    pub const TV_SD: Self = Self::new(5030, "TV/SD");
    pub const TV_HD: Self = Self::new(5040, "TV/HD");
    pub const TV_UHD: Self = Self::new(5045, "TV/UHD");
    pub const TV_OTHER: Self = Self::new(5050, "TV/Other");
    pub const TV_SPORT: Self = Self::new(5060, "TV/Sport");
    pub const TV_ANIME: Self = Self::new(5070, "TV/Anime");
    pub const TV_DOCUMENTARY: Self = Self::new(5080, "TV/Documentary");
    pub const XXX: Self = Self::new(6000, "XXX");
    pub const XXX_DVD: Self = Self::new(6010, "XXX/DVD");
    pub const XXX_WMV: Self = Self::new(6020, "XXX/WMV");
    pub const XXX_XVID: Self = Self::new(6030, "XXX/XviD");
    pub const XXX_X264: Self = Self::new(6040, "XXX/x264");
    pub const XXX_PACK: Self = Self::new(6050, "XXX/Pack");
    pub const XXX_IMAGESET: Self = Self::new(6060, "XXX/ImgSet");
    pub const XXX_OTHER: Self = Self::new(6070, "XXX/Other");
    pub const BOOKS: Self = Self::new(7000, "Books");
    pub const BOOKS_MAGS: Self = Self::new(7010, "Books/Mags");
    pub const BOOKS_EBOOK: Self = Self::new(7020, "Books/EBook");
    pub const BOOKS_COMICS: Self = Self::new(7030, "Books/Comics");
    pub const OTHER: Self = Self::new(8000, "Other");
    pub const OTHER_MISC: Self = Self::new(8010, "Other/Misc");

    /// Every category the registry knows about.
    pub const ALL: &'static [Category] = &[
        Self::RESERVED,
        Self::CONSOLE,
        Self::CONSOLE_NDS,
        Self::CONSOLE_PSP,
        Self::CONSOLE_WII,
        Self::CONSOLE_XBOX,
        Self::CONSOLE_XBOX_360,
        Self::CONSOLE_WIIWARE,
        Self::CONSOLE_XBOX_360_DLC,
        Self::MOVIES,
        Self::MOVIES_FOREIGN,
        Self::MOVIES_OTHER,
        Self::MOVIES_SD,
        Self::MOVIES_HD,
        Self::MOVIES_UHD,
        Self::MOVIES_BLURAY,
        Self::MOVIES_3D,
        Self::AUDIO,
        Self::AUDIO_MP3,
        Self::AUDIO_VIDEO,
        Self::AUDIO_AUDIOBOOK,
        Self::AUDIO_LOSSLESS,
        Self::PC,
        Self::PC_0DAY,
        Self::PC_ISO,
        Self::PC_MAC,
        Self::PC_MOBILE_OTHER,
        Self::PC_GAMES,
        Self::PC_MOBILE_IOS,
        Self::PC_MOBILE_ANDROID,
        Self::TV,
        Self::TV_FOREIGN,
        Self::TV_SD,
        Self::TV_HD,
        Self::TV_UHD,
        Self::TV_OTHER,
        Self::TV_SPORT,
        Self::TV_ANIME,
        Self::TV_DOCUMENTARY,
        Self::XXX,
        Self::XXX_DVD,
        Self::XXX_WMV,
        Self::XXX_XVID,
        Self::XXX_X264,
        Self::XXX_PACK,
        Self::XXX_IMAGESET,
        Self::XXX_OTHER,
        Self::BOOKS,
        Self::BOOKS_MAGS,
        Self::BOOKS_EBOOK,
        Self::BOOKS_COMICS,
        Self::OTHER,
        Self::OTHER_MISC,
    ];

    const fn new(code: u32, text: &'static str) -> Self {
        Self { code, text }
    }

    /// Resolves a numeric code against the registry. Never fails: unknown
    /// codes come back with empty text.
    ///
    /// # Examples
    ///
    /// ```
    /// use nabdex_protocol::Category;
    /// assert_eq!(Category::from_code(5040), Category::TV_HD);
    /// assert_eq!(Category::from_code(99999).text, "");
    /// ```
    pub fn from_code(code: u32) -> Self {
        REGISTRY.get(&code).copied().unwrap_or(Self { code, text: "" })
    }

    /// Whether the code exists in the registry.
    pub fn is_known(&self) -> bool {
        REGISTRY.contains_key(&self.code)
    }

    /// Whether this is a top-level (thousands) category.
    pub fn is_top_level(&self) -> bool {
        self.code % 1000 == 0
    }

    /// The top-level category this one belongs to.
    pub fn parent(&self) -> Self {
        Self::from_code(self.code - self.code % 1000)
    }
}
impl From<u32> for Category {
    fn from(code: u32) -> Self {
        Self::from_code(code)
    }
}
impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.text {
            "" => write!(f, "{}", self.code),
            text => write!(f, "{text}"),
        }
    }
}

static REGISTRY: LazyLock<HashMap<u32, Category>> =
    LazyLock::new(|| Category::ALL.iter().map(|category| (category.code, *category)).collect());
