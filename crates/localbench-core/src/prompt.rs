//! Prompt construction for the competitor analysis.
//!
//! The prompt asks for free-form Markdown followed by a data block fenced by
//! [`DATA_START`] and [`DATA_END`], one `Name|Rating|ReviewCount` line per
//! competitor. [`crate::extract`] is the other half of that contract; keep the
//! two in step when changing the format.

use std::fmt::Write as _;

use serde::Serialize;

use crate::profile::BusinessProfile;

/// Line that opens the competitor data block.
pub const DATA_START: &str = "---DATA_START---";

/// Line that closes the competitor data block.
pub const DATA_END: &str = "---DATA_END---";

/// Sampling temperature favouring consistent formatting over creativity.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Grounding capability the model is allowed to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundingTool {
    /// Location search, used to find nearby competitors.
    GoogleMaps,
    /// General web search, used to audit competitors' online presence.
    GoogleSearch,
}

/// Everything the model invocation needs for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    pub prompt: String,
    pub tools: Vec<GroundingTool>,
    pub temperature: f32,
}

impl AnalysisRequest {
    /// Builds the request for `profile` with both grounding tools enabled.
    #[must_use]
    pub fn for_profile(profile: &BusinessProfile, temperature: f32) -> Self {
        Self {
            prompt: build_prompt(profile),
            tools: vec![GroundingTool::GoogleMaps, GroundingTool::GoogleSearch],
            temperature,
        }
    }
}

/// Builds the analysis prompt for `profile`.
///
/// Every profile field is restated verbatim. Infallible and side-effect free.
#[must_use]
pub fn build_prompt(profile: &BusinessProfile) -> String {
    let BusinessProfile {
        business_name,
        address,
        segment,
        radius,
        differentiators,
        listing_link,
        social_handle,
    } = profile;

    let mut prompt = String::with_capacity(2_048);

    prompt.push_str(
        "Act as a senior market-intelligence and digital benchmarking consultant.\n\n",
    );

    prompt.push_str("Details of MY business (the client):\n");
    // Writing into a String cannot fail.
    let _ = writeln!(prompt, "- Name: {business_name}");
    let _ = writeln!(prompt, "- Location: {address}");
    let _ = writeln!(prompt, "- Segment: {segment}");
    let _ = writeln!(prompt, "- Google business listing: {listing_link}");
    let _ = writeln!(prompt, "- Social media: {social_handle}");
    let _ = writeln!(prompt, "- My declared competitive differentiators: {differentiators}");
    let _ = writeln!(prompt, "- Desired analysis radius: {radius}");

    prompt.push_str("\nAnalysis goals:\n");
    let _ = writeln!(
        prompt,
        "1. Use Google Maps to map direct and indirect competitors in this segment within \
         roughly {radius} of the address above."
    );
    prompt.push_str(
        "2. Use Google Search to run a \"digital audit\" of the competitors you found. Look \
         specifically for their social media profiles and official websites.\n",
    );
    prompt.push_str(
        "3. Identify each competitor's name, average star rating and NUMBER OF REVIEWS on \
         Google Maps.\n",
    );
    prompt.push_str("4. Compare my differentiators with the local market standard.\n");
    prompt.push_str("5. DIGITAL COMPARISON (mandatory):\n");
    let _ = writeln!(
        prompt,
        "   - Compare my social media ({social_handle}) with the competitors' (look for public \
         mentions, approximate follower counts when publicly searchable, and externally \
         perceived visual quality)."
    );
    prompt.push_str(
        "   - Compare my Google presence (based on the listing link above) with the \
         competitors' review density.\n",
    );

    prompt.push_str("\nMandatory response format:\n");
    prompt.push_str(
        "Start with a rich written analysis using Markdown. Use headings (##) to separate \
         sections, bullet points for lists and **bold** for key findings.\n",
    );
    prompt.push_str(
        "The \"Digital Presence & Social Media\" section must be detailed and cite the \
         competitors' handles when you find them.\n",
    );

    prompt.push_str("\nIMPORTANT:\n");
    prompt.push_str(
        "At the very END of your response, add strictly one hidden data block for me to \
         process in code, in this format (Name|Rating|ReviewCount):\n\n",
    );
    let _ = writeln!(prompt, "{DATA_START}");
    prompt.push_str("Competitor Name 1|4.5|120\n");
    prompt.push_str("Competitor Name 2|3.8|45\n");
    prompt.push_str("Competitor Name 3|N/A|0\n");
    let _ = writeln!(prompt, "{DATA_END}");
    prompt.push_str(
        "\n(If you cannot find the rating or the reviews, write 0 or N/A. The third field is \
         the numeric review count. One competitor per line.)\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> BusinessProfile {
        BusinessProfile {
            business_name: "Padaria Central".to_string(),
            address: "Rua Augusta 100, São Paulo".to_string(),
            segment: "bakery".to_string(),
            radius: "5km".to_string(),
            differentiators: "sourdough | open 24h".to_string(),
            listing_link: "https://maps.google.com/?cid=123".to_string(),
            social_handle: "@padariacentral".to_string(),
        }
    }

    #[test]
    fn prompt_restates_every_profile_field_verbatim() {
        let p = profile();
        let prompt = build_prompt(&p);
        for value in [
            &p.business_name,
            &p.address,
            &p.segment,
            &p.radius,
            &p.differentiators,
            &p.listing_link,
            &p.social_handle,
        ] {
            assert!(prompt.contains(value.as_str()), "prompt is missing {value:?}");
        }
    }

    #[test]
    fn prompt_mandates_sentinel_block_on_own_lines() {
        let prompt = build_prompt(&profile());
        let lines: Vec<&str> = prompt.lines().collect();
        let start = lines.iter().position(|l| *l == DATA_START).expect("start line");
        let end = lines.iter().position(|l| *l == DATA_END).expect("end line");
        assert!(start < end);
        assert!(lines[start + 1..end].iter().all(|l| l.split('|').count() == 3));
    }

    #[test]
    fn prompt_mentions_both_search_capabilities() {
        let prompt = build_prompt(&profile());
        assert!(prompt.contains("Google Maps"));
        assert!(prompt.contains("Google Search"));
        assert!(prompt.contains("consultant"));
    }

    #[test]
    fn unusual_radius_is_forwarded_unchanged() {
        let p = BusinessProfile {
            radius: "about 3 blocks".to_string(),
            ..profile()
        };
        assert!(build_prompt(&p).contains("within roughly about 3 blocks of"));
    }

    #[test]
    fn request_declares_maps_and_search_tools() {
        let request = AnalysisRequest::for_profile(&profile(), DEFAULT_TEMPERATURE);
        assert_eq!(
            request.tools,
            vec![GroundingTool::GoogleMaps, GroundingTool::GoogleSearch]
        );
        assert!((request.temperature - 0.5).abs() < f32::EPSILON);
        assert_eq!(request.prompt, build_prompt(&profile()));
    }
}
