//! Portfolio profile data
//!
//! Loaded once at startup from the JSON bundled into the binary. Read-only
//! after that.

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

/// Bundled profile document
const EMBEDDED_PROFILE: &str = include_str!("../assets/profile.json");

/// Skill grouping used by the skills section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillCategory {
    Backend,
    Frontend,
    Database,
    DevOps,
}

/// A skill with a 0-100 proficiency level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: u8,
    pub category: SkillCategory,
    /// Progress bar colour class
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Card image URL
    #[serde(default)]
    pub image: Option<String>,
}

/// Outbound profile link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Everything the page says about its owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    /// Line under the title in the hero section
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub location: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub summary: String,
    /// Awards and recognitions shown under the summary
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Downloadable resume document
    #[serde(default)]
    pub resume_url: Option<String>,
}

/// Skills split into the three display columns
#[derive(Debug, Clone, Default)]
pub struct SkillColumns<'a> {
    pub backend: Vec<&'a Skill>,
    pub frontend: Vec<&'a Skill>,
    /// DevOps and Database share a column
    pub devops: Vec<&'a Skill>,
}

impl Profile {
    /// Parse the profile bundled with the binary
    pub fn load_embedded() -> anyhow::Result<Self> {
        Self::from_json(EMBEDDED_PROFILE).context("embedded profile")
    }

    /// Parse and validate a profile document
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let profile: Profile = serde_json::from_str(json).context("malformed profile JSON")?;
        profile.validate()?;
        Ok(profile)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.name.trim().is_empty() {
            bail!("profile name is empty");
        }
        if let Some(skill) = self.skills.iter().find(|s| s.level > 100) {
            bail!("skill {:?} has level {} (max 100)", skill.name, skill.level);
        }
        Ok(())
    }

    /// Skills in the given categories, in document order
    pub fn skills_in<'a>(
        &'a self,
        categories: &'a [SkillCategory],
    ) -> impl Iterator<Item = &'a Skill> + 'a {
        self.skills
            .iter()
            .filter(move |s| categories.contains(&s.category))
    }

    pub fn skill_columns(&self) -> SkillColumns<'_> {
        SkillColumns {
            backend: self.skills_in(&[SkillCategory::Backend]).collect(),
            frontend: self.skills_in(&[SkillCategory::Frontend]).collect(),
            devops: self
                .skills_in(&[SkillCategory::DevOps, SkillCategory::Database])
                .collect(),
        }
    }

    /// `mailto:` link for the contact section
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }
}
