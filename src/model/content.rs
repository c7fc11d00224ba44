use crate::entity::Entity;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A blog post. Keys on its slug rather than an id, so the URL handle is
/// also the storage handle and duplicate slugs are rejected at create time.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub body_markdown: String,
    pub tags: Vec<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

impl BlogPost {
    /// Unpublished post with just a slug and title filled in.
    pub fn draft(slug: &str, title: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            ..Self::default()
        }
    }
}

impl Entity for BlogPost {
    const KIND: &'static str = "blogPost";

    fn storage_key(&self) -> String {
        self.slug.clone()
    }
}

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub summary: String,
    pub tech: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
}

impl Entity for Project {
    const KIND: &'static str = "project";

    fn storage_key(&self) -> String {
        self.id.clone()
    }

    fn seed_data() -> Vec<Self> {
        vec![
            Self {
                id: "portfolio-site".to_string(),
                name: "This site".to_string(),
                summary: "Personal site with blog, chat boards, and a webmail client".to_string(),
                tech: vec!["rust".to_string(), "tokio".to_string()],
                repo_url: None,
                live_url: None,
                featured: true,
            },
            Self {
                id: "entitydb".to_string(),
                name: "entitydb".to_string(),
                summary: "The durable entity storage layer behind this site".to_string(),
                tech: vec!["rust".to_string()],
                repo_url: None,
                live_url: None,
                featured: false,
            },
        ]
    }
}

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct ExperienceEntry {
    pub id: String,
    pub company: String,
    pub role: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub highlights: Vec<String>,
}

impl Entity for ExperienceEntry {
    const KIND: &'static str = "experience";

    fn storage_key(&self) -> String {
        self.id.clone()
    }

    fn seed_data() -> Vec<Self> {
        vec![Self {
            id: "first-role".to_string(),
            company: "Acme".to_string(),
            role: "Software Engineer".to_string(),
            start: NaiveDate::from_ymd_opt(2021, 3, 1),
            end: None,
            highlights: vec!["Shipped the storage layer".to_string()],
        }]
    }
}

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

/// Site-wide settings. A singleton in practice: one record keyed "main",
/// seeded on first run and edited from the admin dashboard afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub id: String,
    pub site_title: String,
    pub tagline: String,
    pub contact_email: String,
    pub social: Vec<SocialLink>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            id: "main".to_string(),
            site_title: String::new(),
            tagline: String::new(),
            contact_email: String::new(),
            social: Vec::new(),
        }
    }
}

impl Entity for SiteConfig {
    const KIND: &'static str = "siteConfig";

    fn storage_key(&self) -> String {
        self.id.clone()
    }

    fn seed_data() -> Vec<Self> {
        vec![Self {
            site_title: "My Portfolio".to_string(),
            tagline: "Projects, writing, and a place to say hi".to_string(),
            ..Self::default()
        }]
    }
}
