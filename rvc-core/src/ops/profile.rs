//! Author identity stored in the repository config.

use crate::helpers::store::Repository;
use crate::types::Config;
use crate::VcsError;

/// Set the author name and email recorded on future commits.
///
/// # Errors
///
/// * `InvalidEmail` - the address lacks an `@` or a `.`
pub fn update_profile(repo: &Repository, author: &str, email: &str) -> Result<Config, VcsError> {
    if !email.contains('@') || !email.contains('.') {
        return Err(VcsError::InvalidEmail {
            email: email.to_string(),
        });
    }

    let mut config = repo.read_config()?;
    config.author = author.to_string();
    config.email = email.to_string();
    repo.write_config(&config)?;
    repo.append_log(format!("Profile updated to {} <{}>.", author, email))?;
    Ok(config)
}

/// The current profile.
pub fn profile(repo: &Repository) -> Result<Config, VcsError> {
    repo.read_config()
}
