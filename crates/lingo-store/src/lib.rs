pub mod auth;
pub mod document;
pub mod error;
pub mod file;
pub mod firestore;
pub mod service;

pub use auth::{
    AuthCallback, AuthProvider, AuthSession, AuthUser, FirebaseAuth, MemoryAuthProvider,
    Subscription,
};
pub use document::{Collection, DocumentStore, KeyValueDocumentStore, Stored};
pub use error::{AuthError, StoreError};
pub use file::FileStore;
pub use firestore::FirestoreStore;
pub use service::UserService;
