//! This crate contains all shared UI for the workspace: the API client
//! constructor, auth and i18n contexts, and the generic components the web
//! views are built from.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod browser;

mod client;
pub use client::{make_client, platform_store, use_client, use_config, Client, Manager, PlatformStore};

mod auth;
pub use auth::{use_auth, AuthContext, AuthProvider, LogoutButton, LOGIN_PATH};

pub mod i18n;
pub use i18n::{use_i18n, I18n, I18nProvider, Locale};

mod date_format;
pub use date_format::DateFormatter;

mod loading;
pub use loading::{use_loader, LoadState, Loader};

mod loading_states;
pub use loading_states::{CardSkeleton, PageLoader, Spinner, TableSkeleton};

mod error_message;
pub use error_message::{error_text, AppErrorBoundary, ErrorMessage};

mod language_selector;
pub use language_selector::LanguageSelector;

mod file_upload;
pub use file_upload::{partition_files, FileUpload, PickedFile};

mod attachments;
pub use attachments::{file_icon, format_file_size, AttachmentsManager};

pub mod crud;
pub use crud::{CrudEntity, CrudTable};

pub mod forms;
pub use forms::{EntityForm, FieldKind, FieldSpec, FormError, FormModel, FormValues};
