//! Poker site domain models and the preset catalog.

use serde::{Deserialize, Serialize};

/// Whether a site is an online room or a live venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
    Online,
    Live,
}

/// A poker site or venue a user tracks sessions against.
///
/// `user_id` is null for preset rows seeded by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRow {
    pub id: String,
    pub user_id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub site_type: SiteType,
    pub currency: String,
    pub is_preset: bool,
    pub created_at: String,
}

/// A seeded site offered during onboarding, before any row exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetSite {
    pub name: &'static str,
    pub site_type: SiteType,
    pub currency: &'static str,
}

/// Canonical preset catalog shown in the site picker.
pub const PRESET_SITES: [PresetSite; 19] = [
    // Online
    PresetSite { name: "PokerStars", site_type: SiteType::Online, currency: "USD" },
    PresetSite { name: "GGPoker", site_type: SiteType::Online, currency: "USD" },
    PresetSite { name: "WPT Global", site_type: SiteType::Online, currency: "USD" },
    PresetSite { name: "partypoker", site_type: SiteType::Online, currency: "USD" },
    PresetSite { name: "888poker", site_type: SiteType::Online, currency: "USD" },
    PresetSite { name: "ACR (Americas Cardroom)", site_type: SiteType::Online, currency: "USD" },
    PresetSite { name: "BetOnline", site_type: SiteType::Online, currency: "USD" },
    PresetSite { name: "Ignition", site_type: SiteType::Online, currency: "USD" },
    PresetSite { name: "Bovada", site_type: SiteType::Online, currency: "USD" },
    PresetSite { name: "ClubGG", site_type: SiteType::Online, currency: "USD" },
    PresetSite { name: "Winamax", site_type: SiteType::Online, currency: "EUR" },
    PresetSite { name: "iPoker Network", site_type: SiteType::Online, currency: "EUR" },
    // Live
    PresetSite { name: "Local Casino", site_type: SiteType::Live, currency: "USD" },
    PresetSite { name: "Home Game", site_type: SiteType::Live, currency: "USD" },
    PresetSite { name: "Bellagio", site_type: SiteType::Live, currency: "USD" },
    PresetSite { name: "Aria", site_type: SiteType::Live, currency: "USD" },
    PresetSite { name: "Wynn", site_type: SiteType::Live, currency: "USD" },
    PresetSite { name: "Commerce Casino", site_type: SiteType::Live, currency: "USD" },
    PresetSite { name: "Hustler Casino", site_type: SiteType::Live, currency: "USD" },
];
