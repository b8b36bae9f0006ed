//! Timeline entries shared by the education, internship, award and
//! laboratory pages.

use crate::view::{AwardItem, EducationItem, Internship, Laboratory};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineLink {
    pub url: String,
    /// Accessible label for the link.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Date or period shown next to the title.
    pub meta: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<TimelineLink>,
}

fn homepage_link(owner: &str, url: Option<&str>) -> Option<TimelineLink> {
    url.filter(|url| !url.is_empty()).map(|url| TimelineLink {
        url: url.to_string(),
        label: format!("{owner}のホームページを開く"),
    })
}

pub fn education_timeline(education: &[EducationItem]) -> Vec<TimelineItem> {
    education
        .iter()
        .map(|edu| TimelineItem {
            title: edu.institution.clone(),
            subtitle: None,
            meta: edu.period.clone(),
            link: None,
        })
        .collect()
}

pub fn internship_timeline(internships: &[Internship]) -> Vec<TimelineItem> {
    internships
        .iter()
        .map(|internship| TimelineItem {
            title: internship.company.clone(),
            subtitle: Some(internship.position.clone()),
            meta: internship.period.clone(),
            link: homepage_link(&internship.company, internship.hp_link.as_deref()),
        })
        .collect()
}

/// Awards newest first; the input is in document (oldest first) order.
pub fn award_timeline(awards: &[AwardItem]) -> Vec<TimelineItem> {
    awards
        .iter()
        .rev()
        .map(|award| TimelineItem {
            title: award.event.clone(),
            subtitle: Some(award.award.clone()),
            meta: award.date.clone(),
            link: None,
        })
        .collect()
}

pub fn laboratory_timeline(laboratories: &[Laboratory]) -> Vec<TimelineItem> {
    laboratories
        .iter()
        .map(|lab| TimelineItem {
            title: lab.name.clone(),
            subtitle: None,
            meta: lab.period.clone(),
            link: homepage_link(&lab.name, lab.site_url.as_deref()),
        })
        .collect()
}
