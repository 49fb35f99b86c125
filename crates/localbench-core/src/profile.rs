use serde::{Deserialize, Serialize};

/// Distance labels offered to users when choosing the search radius.
///
/// Informational only: [`BusinessProfile::radius`] is forwarded verbatim and
/// nothing in the core rejects a label outside this set.
pub const RADIUS_OPTIONS: [&str; 3] = ["1km", "5km", "10km"];

/// Radius used when the caller does not pick one.
pub const DEFAULT_RADIUS: &str = "1km";

/// The user's own business, as collected by the input form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    #[serde(default, alias = "businessName")]
    pub business_name: String,
    #[serde(default)]
    pub address: String,
    /// Free-text category, e.g. `"bakery"`.
    #[serde(default)]
    pub segment: String,
    #[serde(default = "default_radius")]
    pub radius: String,
    /// Self-declared competitive differentiators, free text.
    #[serde(default)]
    pub differentiators: String,
    /// Link to the business's Google listing.
    #[serde(default, alias = "gmbLink", alias = "listingLink")]
    pub listing_link: String,
    /// Social-media handle, e.g. `"@padaria.central"`.
    #[serde(default, alias = "instagramHandle", alias = "socialHandle")]
    pub social_handle: String,
}

fn default_radius() -> String {
    DEFAULT_RADIUS.to_string()
}

impl BusinessProfile {
    /// Names of the required fields that are blank.
    ///
    /// Name, address and segment are always required, as are the listing link
    /// and the social handle. Differentiators may be left empty. The radius is
    /// never checked against [`RADIUS_OPTIONS`].
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("business_name", &self.business_name),
            ("address", &self.address),
            ("segment", &self.segment),
            ("listing_link", &self.listing_link),
            ("social_handle", &self.social_handle),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Returns `true` when every required field is filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
