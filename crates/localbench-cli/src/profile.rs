//! Assembling a [`BusinessProfile`] from a YAML file and command-line flags.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use localbench_core::BusinessProfile;

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct ProfileArgs {
    /// YAML file holding the business profile; flags below override it.
    #[arg(long = "profile", value_name = "FILE")]
    pub profile_file: Option<PathBuf>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    /// Business category, e.g. "bakery".
    #[arg(long)]
    pub segment: Option<String>,
    /// Search radius label, e.g. "1km", "5km" or "10km".
    #[arg(long)]
    pub radius: Option<String>,
    #[arg(long)]
    pub differentiators: Option<String>,
    #[arg(long)]
    pub listing_link: Option<String>,
    #[arg(long)]
    pub social_handle: Option<String>,
}

impl ProfileArgs {
    /// Reads the profile file, if any, applies flag overrides and rejects
    /// profiles with blank required fields.
    pub(crate) fn resolve(&self) -> anyhow::Result<BusinessProfile> {
        let base = match &self.profile_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read profile {}", path.display()))?;
                parse_profile_yaml(&raw)
                    .with_context(|| format!("failed to parse profile {}", path.display()))?
            }
            None => parse_profile_yaml("{}")?,
        };

        let profile = self.apply_overrides(base);
        let missing = profile.missing_fields();
        if !missing.is_empty() {
            anyhow::bail!("profile is missing required fields: {}", missing.join(", "));
        }
        Ok(profile)
    }

    pub(crate) fn apply_overrides(&self, mut profile: BusinessProfile) -> BusinessProfile {
        let overrides = [
            (&self.name, &mut profile.business_name),
            (&self.address, &mut profile.address),
            (&self.segment, &mut profile.segment),
            (&self.radius, &mut profile.radius),
            (&self.differentiators, &mut profile.differentiators),
            (&self.listing_link, &mut profile.listing_link),
            (&self.social_handle, &mut profile.social_handle),
        ];
        for (flag, field) in overrides {
            if let Some(value) = flag {
                field.clone_from(value);
            }
        }
        profile
    }
}

/// Parses a profile document; absent keys come back blank and the radius
/// falls back to its default.
pub(crate) fn parse_profile_yaml(raw: &str) -> Result<BusinessProfile, serde_yaml::Error> {
    serde_yaml::from_str(raw)
}
