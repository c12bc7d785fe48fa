use lingo_core::{KeyValueStore, User, UserRecord};
use lingo_store::{AuthUser, UserService};

/// Local key of the learner profile
pub const PROFILE_KEY: &str = "user";

fn create_default(store: &dyn KeyValueStore) -> User {
    let user = User::default_profile();
    if let Err(e) = save_local_profile(store, &user) {
        tracing::warn!("Could not persist default profile: {e}");
    }
    tracing::info!("Created default profile {}", user.id());
    user
}

/// Load the local profile, creating the default one on first run.
///
/// An unreadable profile is replaced by the default.
pub fn load_local_profile(store: &dyn KeyValueStore) -> User {
    let raw = match store.get(PROFILE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return create_default(store),
        Err(e) => {
            tracing::warn!("Failed to read profile: {e}");
            return create_default(store);
        }
    };

    match serde_json::from_str::<UserRecord>(&raw) {
        Ok(record) => User::from_record(record),
        Err(e) => {
            tracing::warn!("Stored profile is corrupt ({e}), starting from defaults");
            create_default(store)
        }
    }
}

pub fn save_local_profile(store: &dyn KeyValueStore, user: &User) -> anyhow::Result<()> {
    let json = serde_json::to_string(&user.to_record())?;
    store.set(PROFILE_KEY, &json)?;
    Ok(())
}

/// Fetch the account's profile, creating it remotely if this is the first sign-in
pub async fn load_account_profile(users: &UserService, account: &AuthUser) -> anyhow::Result<User> {
    if let Some(user) = users.get_user(&account.uid).await? {
        tracing::info!("Loaded profile for {}", account.email);
        return Ok(user);
    }

    let template = User::default_profile();
    let user = User::with_id(
        account.uid.clone(),
        template.name(),
        template.teaching_language(),
        template.learning_languages(),
    );
    users.create_user(&user).await?;
    Ok(user)
}
