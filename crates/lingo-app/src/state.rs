use std::sync::Arc;

use anyhow::{Context, bail};
use lingo_config::Config;
use lingo_core::{KeyValueWordRepository, User, VocabularyManager, Word, WordBook, WordBookEntry};
use lingo_generator::{ContentGenerator, GeminiClient};
use lingo_store::{
    AuthProvider, AuthUser, FileStore, FirebaseAuth, FirestoreStore, KeyValueDocumentStore,
    Subscription, UserService,
};
use lingo_types::Language;

use crate::profile;

pub struct AppState {
    pub config: Config,
    pub user: User,
    pub word_book: WordBook,
    pub users: UserService,
    pub account: Option<AuthUser>,
    pub lessons: VocabularyManager,
    content: Option<ContentGenerator>,
    local: Arc<FileStore>,
    auth: Option<(FirebaseAuth, Subscription)>,
}

pub fn build_generator(
    config: &Config,
    model: Option<&str>,
) -> anyhow::Result<Option<ContentGenerator>> {
    if !config.gemini.enabled() {
        tracing::info!("GEMINI_API_KEY not set, generation disabled");
        return Ok(None);
    }

    let mut client = GeminiClient::from_config(&config.gemini);
    if let Some(model) = model {
        client.switch_model(model)?;
    }
    Ok(Some(ContentGenerator::new(Arc::new(client))))
}

impl AppState {
    /// Local mode: profile, word book and history all live in the data directory
    pub fn local(config: Config, content: Option<ContentGenerator>) -> anyhow::Result<Self> {
        let local = Arc::new(
            FileStore::open(&config.storage.data_dir).context("Failed to open data directory")?,
        );
        let user = profile::load_local_profile(local.as_ref());
        let users = UserService::new(Arc::new(KeyValueDocumentStore::new(local.clone())));

        Ok(Self::assemble(config, user, users, content, local, None))
    }

    /// Account mode: sign in, then keep profile and history in the account backend
    pub async fn signed_in(
        config: Config,
        content: Option<ContentGenerator>,
        email: &str,
        password: &str,
    ) -> anyhow::Result<Self> {
        if !config.firebase.enabled() {
            bail!("Account mode needs FIREBASE_API_KEY and FIREBASE_PROJECT_ID");
        }

        let local = Arc::new(
            FileStore::open(&config.storage.data_dir).context("Failed to open data directory")?,
        );
        let auth = FirebaseAuth::new(&config.firebase);
        let watch = auth.on_auth_state_changed(Box::new(|user: Option<&AuthUser>| match user {
            Some(user) => tracing::debug!("Auth state: signed in as {}", user.uid),
            None => tracing::debug!("Auth state: signed out"),
        }));

        let account = auth.login(email, password).await.context("Sign-in failed")?;
        let users = UserService::new(Arc::new(FirestoreStore::new(
            &config.firebase,
            account.id_token.clone(),
        )));
        let user = profile::load_account_profile(&users, &account).await?;

        let mut state = Self::assemble(config, user, users, content, local, Some((auth, watch)));
        state.account = Some(account);
        Ok(state)
    }

    fn assemble(
        config: Config,
        user: User,
        users: UserService,
        content: Option<ContentGenerator>,
        local: Arc<FileStore>,
        auth: Option<(FirebaseAuth, Subscription)>,
    ) -> Self {
        let repository = Arc::new(KeyValueWordRepository::new(local.clone()));
        let word_book = WordBook::load(user.id(), repository);

        Self {
            config,
            user,
            word_book,
            users,
            account: None,
            lessons: VocabularyManager::new(),
            content,
            local,
            auth,
        }
    }

    pub fn content(&self) -> anyhow::Result<&ContentGenerator> {
        self.content
            .as_ref()
            .context("Generation is disabled; set GEMINI_API_KEY")
    }

    /// `code` if given, otherwise the profile's first learning language
    pub fn learning_language(&self, code: Option<&str>) -> anyhow::Result<&'static Language> {
        match code {
            Some(code) => lookup_language(code),
            None => self
                .user
                .learning_languages()
                .first()
                .copied()
                .context("No learning language set; use `profile add-learning <code>`"),
        }
    }

    /// Persist the profile to the account when signed in, locally otherwise
    pub async fn save_profile(&self) -> anyhow::Result<()> {
        if self.account.is_some() {
            self.users.update_user(&self.user).await?;
        } else {
            profile::save_local_profile(self.local.as_ref(), &self.user)?;
        }
        Ok(())
    }

    /// End the account session, if any
    pub async fn sign_out(&mut self) {
        if let Some((auth, _watch)) = self.auth.take() {
            if let Err(e) = auth.logout().await {
                tracing::warn!("Sign-out failed: {e}");
            }
            self.account = None;
        }
    }

    /// Add to the local word book and mirror into the account word book when signed in
    pub async fn save_word(&mut self, word: Word) -> anyhow::Result<()> {
        let entry = WordBookEntry::from_word(&word);
        self.word_book.add_word(word)?;
        if self.account.is_some() {
            self.users.add_word_to_book(self.user.id(), &entry).await?;
        }
        Ok(())
    }
}

pub fn lookup_language(code: &str) -> anyhow::Result<&'static Language> {
    Language::find_by_code(code.trim()).with_context(|| {
        let known: Vec<_> = Language::all().iter().map(|l| l.code).collect();
        format!("Unknown language code '{code}' (known: {})", known.join(", "))
    })
}
