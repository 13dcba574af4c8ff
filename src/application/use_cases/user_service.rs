use std::path::Path;

use sha2::{Digest, Sha256};
use sqlx::sqlite::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::error::{AppError, Result};
use crate::domain::user::AuthOutcome;
use crate::infrastructure::db::users::UserRepository;

/// Register a new account. A taken username is signaled in the outcome,
/// not raised.
pub async fn register_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
    role: &str,
) -> Result<AuthOutcome> {
    if username.trim().is_empty() || password.is_empty() {
        return Ok(AuthOutcome::failure(
            "Username and password must not be empty.",
        ));
    }

    let repo = UserRepository::new(pool);
    if repo.find_by_username(username).await?.is_some() {
        return Ok(AuthOutcome::failure(format!(
            "Username '{username}' is already taken."
        )));
    }

    let hash = hash_password(password, &new_salt());
    repo.insert(username, &hash, role).await?;
    info!(username, role, "registered user");

    Ok(AuthOutcome::success(format!(
        "User '{username}' registered successfully."
    )))
}

/// Check credentials against the stored salted hash.
pub async fn login_user(pool: &SqlitePool, username: &str, password: &str) -> Result<AuthOutcome> {
    let repo = UserRepository::new(pool);
    let Some(stored) = repo.password_hash(username).await? else {
        return Ok(AuthOutcome::failure("Invalid username or password."));
    };

    let Some((salt, _)) = stored.split_once('$') else {
        return Err(AppError::Internal(format!(
            "Malformed password hash for user '{username}'"
        )));
    };

    if hash_password(password, salt) == stored {
        Ok(AuthOutcome::success(format!("Welcome back, {username}!")))
    } else {
        Ok(AuthOutcome::failure("Invalid username or password."))
    }
}

/// Import accounts from the legacy flat file, one `username,password,role`
/// triple per line. Blank lines and `#` comments are skipped; malformed
/// lines are logged and skipped. Usernames already present are left
/// untouched, so the import is safe to repeat. Returns the number of
/// records actually written.
pub async fn migrate_users_from_file(pool: &SqlitePool, path: &Path) -> Result<usize> {
    if !path.exists() {
        info!(file = %path.display(), "legacy user file missing, skipping migration");
        return Ok(0);
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let repo = UserRepository::new(pool);
    let mut imported = 0usize;

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.splitn(3, ',').map(str::trim);
        let (Some(username), Some(password)) = (parts.next(), parts.next()) else {
            warn!(
                file = %path.display(),
                line = line_no + 1,
                "skipping malformed legacy user line"
            );
            continue;
        };
        let role = parts.next().unwrap_or("user");

        if username.is_empty() || password.is_empty() {
            warn!(
                file = %path.display(),
                line = line_no + 1,
                "skipping legacy user line with empty fields"
            );
            continue;
        }

        let hash = hash_password(password, &new_salt());
        imported += repo.insert_if_absent(username, &hash, role).await? as usize;
    }

    Ok(imported)
}

fn new_salt() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Salted SHA-256, stored as `salt$hexdigest`.
fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{salt}${}", hex::encode(hasher.finalize()))
}
