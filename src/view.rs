//! Records shaped for page templates.
//!
//! The scanners keep start and finish months apart; pages want one period
//! string and a ready-made timeline per list. [`SiteView::build`] derives
//! both, plus an icon for each technology.

use crate::fields;
use crate::pipeline::personal::{self, PersonalData};
use crate::pipeline::records::{DevelopmentExperience, TechEvent, TechStack};
use crate::tech_icons;
use crate::timeline::{self, TimelineItem};
use serde::{Deserialize, Serialize};

/// Shown in place of a finish month for something still running.
pub const ONGOING: &str = "現在";

/// `"2023/04 〜 2024/03"`, or `"2023/04 〜 現在"` without a finish month.
pub fn format_period(start: &str, finish: Option<&str>) -> String {
    let finish = finish.filter(|f| !f.is_empty()).unwrap_or(ONGOING);
    format!("{start} 〜 {finish}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Laboratory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    pub period: String,
}

impl From<&personal::Laboratory> for Laboratory {
    fn from(lab: &personal::Laboratory) -> Self {
        Self {
            name: lab.name.clone(),
            site_url: lab.site_url.clone(),
            period: format_period(&lab.start_month, lab.finish_month.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    pub company: String,
    pub period: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hp_link: Option<String>,
}

impl From<&personal::JobHistory> for Internship {
    fn from(job: &personal::JobHistory) -> Self {
        Self {
            company: job.company.clone(),
            period: format_period(&job.start_month, job.finish_month.as_deref()),
            position: job.position.clone(),
            hp_link: job.hp_link.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationItem {
    pub period: String,
    pub institution: String,
}

impl From<&personal::Education> for EducationItem {
    fn from(edu: &personal::Education) -> Self {
        Self {
            period: edu.period.clone(),
            institution: edu.institution.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardItem {
    pub event: String,
    pub date: String,
    pub award: String,
}

impl From<&TechEvent> for AwardItem {
    fn from(event: &TechEvent) -> Self {
        Self {
            event: event.name.clone(),
            date: format!("{}年{}月", event.date.year, event.date.month),
            award: event.award.clone(),
        }
    }
}

/// One technology with its icon class, grouped under a category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechBadge {
    pub category: String,
    pub name: String,
    pub icon: String,
}

/// Badges for every technology in `stack`, bucket by bucket.
pub fn tech_badges(stack: &TechStack) -> Vec<TechBadge> {
    let buckets = [
        ("frontend", &stack.frontend),
        ("backend", &stack.backend),
        ("mobile", &stack.mobile),
        ("Infrastructure", &stack.infrastructure),
        ("database", &stack.database),
        ("other", &stack.other),
    ];

    buckets
        .into_iter()
        .flat_map(|(bucket, techs)| {
            let category = fields::category_display_name(bucket);
            techs.iter().filter(|t| !t.is_empty()).map(move |tech| TechBadge {
                category: category.to_string(),
                name: tech.clone(),
                icon: tech_icons::tech_icon(tech).to_string(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timelines {
    pub education: Vec<TimelineItem>,
    pub internships: Vec<TimelineItem>,
    pub awards: Vec<TimelineItem>,
    pub laboratories: Vec<TimelineItem>,
}

/// Everything the pages render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteView {
    pub laboratories: Vec<Laboratory>,
    pub internships: Vec<Internship>,
    pub education: Vec<EducationItem>,
    pub awards: Vec<AwardItem>,
    pub tech_badges: Vec<TechBadge>,
    pub timelines: Timelines,
}

impl SiteView {
    /// Build the view from `personal.md` and the development events.
    pub fn build(personal: &PersonalData, development: &DevelopmentExperience) -> Self {
        let laboratories: Vec<Laboratory> =
            personal.laboratories.iter().map(Laboratory::from).collect();
        let internships: Vec<Internship> =
            personal.job_history.iter().map(Internship::from).collect();
        let education: Vec<EducationItem> =
            personal.education.iter().map(EducationItem::from).collect();
        let awards: Vec<AwardItem> = development.events.iter().map(AwardItem::from).collect();

        let timelines = Timelines {
            education: timeline::education_timeline(&education),
            internships: timeline::internship_timeline(&internships),
            awards: timeline::award_timeline(&awards),
            laboratories: timeline::laboratory_timeline(&laboratories),
        };

        Self {
            laboratories,
            internships,
            education,
            awards,
            tech_badges: tech_badges(&development.tech_stack),
            timelines,
        }
    }
}
