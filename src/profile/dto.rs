use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::{
    error::{ApiError, FieldError},
    profile::repo_types::{Education, Experience, Profile, ProfileUpdate, SocialLinks, SocialUpdate},
    users::repo_types::User,
};

/// Split a comma-separated skills string into an ordered list.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Request body for profile create/update. Social links arrive as top-level
/// fields, skills as one comma-separated string.
#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub status: Option<String>,
    pub skills: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub facebook: Option<String>,
}

impl UpsertProfileRequest {
    pub fn into_update(self) -> Result<ProfileUpdate, ApiError> {
        let mut errors = Vec::new();
        if !matches!(&self.status, Some(s) if !s.trim().is_empty()) {
            errors.push(FieldError::new("Status is required", "status"));
        }
        if !matches!(&self.skills, Some(s) if !s.trim().is_empty()) {
            errors.push(FieldError::new("Skills is required", "skills"));
        }

        match (self.status, self.skills) {
            (Some(status), Some(skills)) if errors.is_empty() => Ok(ProfileUpdate {
                status,
                skills: parse_skills(&skills),
                company: self.company,
                website: self.website,
                location: self.location,
                bio: self.bio,
                github_username: self.github_username,
                social: SocialUpdate {
                    youtube: self.youtube,
                    twitter: self.twitter,
                    instagram: self.instagram,
                    linkedin: self.linkedin,
                    facebook: self.facebook,
                },
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

/// Request body for adding a work-history entry.
#[derive(Debug, Deserialize)]
pub struct ExperienceRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<Date>,
    pub to: Option<Date>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

impl ExperienceRequest {
    pub fn into_entry(self) -> Result<Experience, ApiError> {
        let mut errors = Vec::new();
        if !matches!(&self.title, Some(t) if !t.trim().is_empty()) {
            errors.push(FieldError::new("Title is required", "title"));
        }
        if !matches!(&self.company, Some(c) if !c.trim().is_empty()) {
            errors.push(FieldError::new("Company is required", "company"));
        }
        if self.from.is_none() {
            errors.push(FieldError::new("From date is required", "from"));
        }

        match (self.title, self.company, self.from) {
            (Some(title), Some(company), Some(from)) if errors.is_empty() => Ok(Experience {
                id: Uuid::new_v4(),
                title,
                company,
                location: self.location,
                from,
                to: self.to,
                current: self.current,
                description: self.description,
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

/// Request body for adding an education entry.
#[derive(Debug, Deserialize)]
pub struct EducationRequest {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub from: Option<Date>,
    pub to: Option<Date>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

impl EducationRequest {
    pub fn into_entry(self) -> Result<Education, ApiError> {
        let mut errors = Vec::new();
        if !matches!(&self.school, Some(s) if !s.trim().is_empty()) {
            errors.push(FieldError::new("School is required", "school"));
        }
        if !matches!(&self.degree, Some(d) if !d.trim().is_empty()) {
            errors.push(FieldError::new("Degree is required", "degree"));
        }
        if !matches!(&self.field_of_study, Some(f) if !f.trim().is_empty()) {
            errors.push(FieldError::new("Field of study is required", "field_of_study"));
        }
        if self.from.is_none() {
            errors.push(FieldError::new("From date is required", "from"));
        }

        match (self.school, self.degree, self.field_of_study, self.from) {
            (Some(school), Some(degree), Some(field_of_study), Some(from))
                if errors.is_empty() =>
            {
                Ok(Education {
                    id: Uuid::new_v4(),
                    school,
                    degree,
                    field_of_study,
                    from,
                    to: self.to,
                    current: self.current,
                    description: self.description,
                })
            }
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

/// Owner details surfaced alongside a profile.
#[derive(Debug, Serialize)]
pub struct ProfileOwner {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
}

/// Profile document as returned to clients, with the owning user resolved.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub user: ProfileOwner,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,
    pub skills: Vec<String>,
    pub social: SocialLinks,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl ProfileResponse {
    pub fn from_parts(profile: Profile, owner: &User) -> Self {
        Self {
            id: profile.id,
            user: ProfileOwner {
                id: owner.id,
                name: owner.name.clone(),
                avatar: owner.avatar.clone(),
            },
            company: profile.company,
            website: profile.website,
            location: profile.location,
            bio: profile.bio,
            status: profile.status,
            github_username: profile.github_username,
            skills: profile.skills.0,
            social: profile.social.0,
            experience: profile.experience.0,
            education: profile.education.0,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// Plain confirmation body, e.g. after account deletion.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: &'static str,
}
