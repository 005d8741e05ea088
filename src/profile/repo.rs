use sqlx::{types::Json, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::profile::repo_types::Profile;

impl Profile {
    /// Find the profile document owned by a user.
    pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, company, website, location, bio, status, github_username,
                   skills, social, experience, education, created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(profile)
    }

    /// List every profile document, newest first.
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Profile>> {
        let profiles = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, company, website, location, bio, status, github_username,
                   skills, social, experience, education, created_at, updated_at
            FROM profiles
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(profiles)
    }

    /// Persist a newly built profile document.
    pub async fn insert(db: &PgPool, profile: &Profile) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, user_id, company, website, location, bio, status,
                                  github_username, skills, social, experience, education,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.company)
        .bind(&profile.website)
        .bind(&profile.location)
        .bind(&profile.bio)
        .bind(&profile.status)
        .bind(&profile.github_username)
        .bind(Json(&profile.skills.0))
        .bind(Json(&profile.social.0))
        .bind(Json(&profile.experience.0))
        .bind(Json(&profile.education.0))
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Write a modified document back. Concurrent writers are not isolated;
    /// the last write wins.
    pub async fn save(db: &PgPool, profile: &mut Profile) -> anyhow::Result<()> {
        profile.updated_at = OffsetDateTime::now_utc();
        sqlx::query(
            r#"
            UPDATE profiles
            SET company = $2, website = $3, location = $4, bio = $5, status = $6,
                github_username = $7, skills = $8, social = $9, experience = $10,
                education = $11, updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(profile.id)
        .bind(&profile.company)
        .bind(&profile.website)
        .bind(&profile.location)
        .bind(&profile.bio)
        .bind(&profile.status)
        .bind(&profile.github_username)
        .bind(Json(&profile.skills.0))
        .bind(Json(&profile.social.0))
        .bind(Json(&profile.experience.0))
        .bind(Json(&profile.education.0))
        .bind(profile.updated_at)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Delete the profile owned by a user, if any.
    pub async fn delete_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(())
    }
}
