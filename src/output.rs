//! Result of loading a data directory.

use crate::error::DocumentError;
use crate::pipeline::extract::{
    DevelopmentSummary, InternshipSummary, PersonalSummary, Publication, SectionSummary,
};
use crate::pipeline::personal::PersonalData;
use crate::pipeline::records::{DevelopmentExperience, Internship, PersonalInfo, ResearchHistory};
use crate::view::SiteView;
use serde::{Deserialize, Serialize};

/// Every record the site needs, built from one data directory.
///
/// A document that could not be read leaves its record at the default and
/// shows up in [`LoadStats::errors`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioOutput {
    /// `personal.md`.
    pub personal: PersonalData,
    /// `personal-info.md` through the section tree.
    pub personal_info: PersonalInfo,
    /// Header fields of `personal-info.md`.
    pub summary: PersonalSummary,
    pub development: DevelopmentExperience,
    /// Award cards and tech badges of `development-experience.md`.
    pub development_summary: DevelopmentSummary,
    /// Ranked awards, technologies and project cards of
    /// `development-experience.md`.
    pub sections_summary: SectionSummary,
    pub research: ResearchHistory,
    /// `## 発表論文` entries of `research-history.md`.
    pub publications: Vec<Publication>,
    pub internships: Vec<Internship>,
    /// Heading and period of each internship, in document order.
    pub internship_summaries: Vec<InternshipSummary>,
    /// Footer date.
    pub last_updated: String,
    /// Header name.
    pub name: String,
    /// Period strings and timelines derived from the above.
    pub view: SiteView,
    pub stats: LoadStats,
}

/// Aggregate statistics for one load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadStats {
    /// Documents read successfully.
    pub loaded: usize,
    /// Documents that were missing or unreadable.
    pub errors: Vec<DocumentError>,
    /// Wall-clock time for the whole load.
    pub duration_ms: u64,
}

impl LoadStats {
    pub fn failed(&self) -> usize {
        self.errors.len()
    }
}
