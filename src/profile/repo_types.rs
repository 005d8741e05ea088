use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Optional links to the owner's social accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
}

/// One work-history entry embedded in a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: Date,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Date>,
    #[serde(default)]
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One education entry embedded in a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: Date,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Date>,
    #[serde(default)]
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Profile document, one row per user. The embedded lists live in JSONB
/// columns and are spliced in process before the row is written back.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: String,
    pub github_username: Option<String>,
    pub skills: Json<Vec<String>>,
    pub social: Json<SocialLinks>,
    pub experience: Json<Vec<Experience>>,
    pub education: Json<Vec<Education>>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Profile {
    /// Build a fresh profile document for a user from a submission.
    pub fn new(user_id: Uuid, update: ProfileUpdate) -> Self {
        let now = OffsetDateTime::now_utc();
        let mut social = SocialLinks::default();
        update.social.apply(&mut social);
        Self {
            id: Uuid::new_v4(),
            user_id,
            company: update.company,
            website: update.website,
            location: update.location,
            bio: update.bio,
            status: update.status,
            github_username: update.github_username,
            skills: Json(update.skills),
            social: Json(social),
            experience: Json(Vec::new()),
            education: Json(Vec::new()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Prepend an entry so the newest appears first.
    pub fn add_experience(&mut self, entry: Experience) {
        self.experience.0.insert(0, entry);
    }

    /// Remove the entry with the given id. An unknown id leaves the list
    /// unchanged; callers persist and return the profile either way.
    pub fn remove_experience(&mut self, id: Uuid) {
        if let Some(index) = self.experience.0.iter().position(|e| e.id == id) {
            self.experience.0.remove(index);
        }
    }

    pub fn add_education(&mut self, entry: Education) {
        self.education.0.insert(0, entry);
    }

    pub fn remove_education(&mut self, id: Uuid) {
        if let Some(index) = self.education.0.iter().position(|e| e.id == id) {
            self.education.0.remove(index);
        }
    }
}

/// Sparse social-link update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialUpdate {
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub facebook: Option<String>,
}

impl SocialUpdate {
    pub fn apply(&self, links: &mut SocialLinks) {
        if let Some(v) = &self.youtube {
            links.youtube = Some(v.clone());
        }
        if let Some(v) = &self.twitter {
            links.twitter = Some(v.clone());
        }
        if let Some(v) = &self.instagram {
            links.instagram = Some(v.clone());
        }
        if let Some(v) = &self.linkedin {
            links.linkedin = Some(v.clone());
        }
        if let Some(v) = &self.facebook {
            links.facebook = Some(v.clone());
        }
    }
}

/// Sparse profile update built from a submission. Status and skills are
/// always present (the handler rejects submissions without them); every
/// other field only overwrites the stored value when provided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub status: String,
    pub skills: Vec<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
    pub social: SocialUpdate,
}

impl ProfileUpdate {
    pub fn apply(&self, profile: &mut Profile) {
        profile.status = self.status.clone();
        profile.skills = Json(self.skills.clone());
        if let Some(v) = &self.company {
            profile.company = Some(v.clone());
        }
        if let Some(v) = &self.website {
            profile.website = Some(v.clone());
        }
        if let Some(v) = &self.location {
            profile.location = Some(v.clone());
        }
        if let Some(v) = &self.bio {
            profile.bio = Some(v.clone());
        }
        if let Some(v) = &self.github_username {
            profile.github_username = Some(v.clone());
        }
        self.social.apply(&mut profile.social.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn sample_update() -> ProfileUpdate {
        ProfileUpdate {
            status: "Developer".into(),
            skills: vec!["Rust".into(), "SQL".into()],
            company: Some("Acme".into()),
            bio: Some("hello".into()),
            ..Default::default()
        }
    }

    fn sample_profile() -> Profile {
        Profile::new(Uuid::new_v4(), sample_update())
    }

    fn experience(title: &str) -> Experience {
        Experience {
            id: Uuid::new_v4(),
            title: title.into(),
            company: "Acme".into(),
            location: None,
            from: date!(2019 - 01 - 01),
            to: None,
            current: true,
            description: None,
        }
    }

    #[test]
    fn new_profile_carries_submission_fields() {
        let profile = sample_profile();
        assert_eq!(profile.status, "Developer");
        assert_eq!(profile.skills.0, vec!["Rust", "SQL"]);
        assert_eq!(profile.company.as_deref(), Some("Acme"));
        assert!(profile.website.is_none());
        assert!(profile.experience.0.is_empty());
    }

    #[test]
    fn apply_only_overwrites_present_fields() {
        let mut profile = sample_profile();
        let update = ProfileUpdate {
            status: "Senior Developer".into(),
            skills: vec!["Rust".into()],
            location: Some("Berlin".into()),
            ..Default::default()
        };
        update.apply(&mut profile);

        assert_eq!(profile.status, "Senior Developer");
        assert_eq!(profile.skills.0, vec!["Rust"]);
        assert_eq!(profile.location.as_deref(), Some("Berlin"));
        // Fields absent from the update keep their stored values.
        assert_eq!(profile.company.as_deref(), Some("Acme"));
        assert_eq!(profile.bio.as_deref(), Some("hello"));
    }

    #[test]
    fn apply_is_idempotent() {
        let mut profile = sample_profile();
        let update = ProfileUpdate {
            status: "Student".into(),
            skills: vec!["C".into()],
            social: SocialUpdate {
                twitter: Some("https://twitter.com/a".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        update.apply(&mut profile);
        let once = profile.clone();
        update.apply(&mut profile);

        assert_eq!(profile.status, once.status);
        assert_eq!(profile.skills.0, once.skills.0);
        assert_eq!(profile.social.0, once.social.0);
        assert_eq!(profile.company, once.company);
    }

    #[test]
    fn social_update_merges_into_existing_links() {
        let mut links = SocialLinks {
            youtube: Some("https://youtube.com/a".into()),
            ..Default::default()
        };
        let update = SocialUpdate {
            twitter: Some("https://twitter.com/a".into()),
            ..Default::default()
        };
        update.apply(&mut links);
        assert_eq!(links.youtube.as_deref(), Some("https://youtube.com/a"));
        assert_eq!(links.twitter.as_deref(), Some("https://twitter.com/a"));
    }

    #[test]
    fn experience_is_prepended() {
        let mut profile = sample_profile();
        profile.add_experience(experience("first"));
        profile.add_experience(experience("second"));
        assert_eq!(profile.experience.0[0].title, "second");
        assert_eq!(profile.experience.0[1].title, "first");
    }

    #[test]
    fn remove_experience_by_id_shrinks_list_by_one() {
        let mut profile = sample_profile();
        let keep = experience("keep");
        let gone = experience("gone");
        profile.add_experience(keep.clone());
        profile.add_experience(gone.clone());

        profile.remove_experience(gone.id);
        assert_eq!(profile.experience.0.len(), 1);
        assert_eq!(profile.experience.0[0].id, keep.id);
    }

    #[test]
    fn remove_experience_with_unknown_id_is_a_noop() {
        let mut profile = sample_profile();
        profile.add_experience(experience("only"));
        profile.remove_experience(Uuid::new_v4());
        assert_eq!(profile.experience.0.len(), 1);
    }

    #[test]
    fn education_list_behaves_like_experience() {
        let mut profile = sample_profile();
        let entry = Education {
            id: Uuid::new_v4(),
            school: "MIT".into(),
            degree: "BSc".into(),
            field_of_study: "CS".into(),
            from: date!(2015 - 09 - 01),
            to: Some(date!(2019 - 06 - 01)),
            current: false,
            description: None,
        };
        profile.add_education(entry.clone());
        assert_eq!(profile.education.0[0].id, entry.id);

        profile.remove_education(Uuid::new_v4());
        assert_eq!(profile.education.0.len(), 1);
        profile.remove_education(entry.id);
        assert!(profile.education.0.is_empty());
    }

    #[test]
    fn entry_dates_use_iso_strings_on_the_wire() {
        let entry = experience("wire");
        let json = serde_json::to_value(&entry).expect("serialize entry");
        assert_eq!(json["from"], "2019-01-01");
        assert!(json.get("to").is_none());
    }
}
