//! View-level load state.
//!
//! Every data operation a view starts ends in one of three states. A failed
//! load keeps the [`ApiError`] so views can tell "not found" from other
//! failures.

use std::future::Future;

use api::ApiError;
use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Failed(ApiError),
    Loaded(T),
}

impl<T: Clone> LoadState<T> {
    /// Snapshot of a resource's value; `None` means still running.
    pub fn from_resource(value: Option<&Result<T, ApiError>>) -> Self {
        match value {
            None => Self::Loading,
            Some(Ok(v)) => Self::Loaded(v.clone()),
            Some(Err(e)) => Self::Failed(e.clone()),
        }
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            Self::Loading => LoadState::Loading,
            Self::Failed(e) => LoadState::Failed(e),
            Self::Loaded(v) => LoadState::Loaded(f(v)),
        }
    }
}

impl<T> LoadState<Vec<T>> {
    /// Loaded with no rows. An error is never empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Loaded(rows) if rows.is_empty())
    }
}

/// Handle on a running load, returned by [`use_loader`].
pub struct Loader<T: 'static> {
    resource: Resource<Result<T, ApiError>>,
}

impl<T: 'static> Clone for Loader<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Loader<T> {}

impl<T: 'static> PartialEq for Loader<T> {
    fn eq(&self, other: &Self) -> bool {
        self.resource == other.resource
    }
}

impl<T: Clone + 'static> Loader<T> {
    pub fn state(&self) -> LoadState<T> {
        LoadState::from_resource(self.resource.read().as_ref())
    }

    /// Run the load again. Nothing is retried automatically.
    pub fn retry(&mut self) {
        self.resource.restart();
    }
}

/// Start `load` on mount and rerun it when a signal it reads changes.
pub fn use_loader<T, F, Fut>(load: F) -> Loader<T>
where
    T: 'static,
    F: FnMut() -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    Loader {
        resource: use_resource(load),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_resource() {
        assert_eq!(LoadState::<u32>::from_resource(None), LoadState::Loading);
        assert_eq!(LoadState::from_resource(Some(&Ok(3u32))), LoadState::Loaded(3));

        let err = ApiError::NotFound("Person not found".to_string());
        assert_eq!(
            LoadState::<u32>::from_resource(Some(&Err(err.clone()))),
            LoadState::Failed(err)
        );
    }

    #[test]
    fn test_empty_list_is_not_an_error() {
        let empty: LoadState<Vec<u32>> = LoadState::Loaded(Vec::new());
        assert!(empty.is_empty());

        let failed: LoadState<Vec<u32>> = LoadState::Failed(ApiError::Network("offline".to_string()));
        assert!(!failed.is_empty());
        assert!(!LoadState::<Vec<u32>>::Loading.is_empty());
    }

    #[test]
    fn test_map_keeps_state() {
        let loaded = LoadState::Loaded(vec![1, 2, 3]).map(|v| v.len());
        assert_eq!(loaded.loaded(), Some(&3));
        assert!(LoadState::<Vec<u8>>::Loading.map(|v| v.len()).is_loading());
    }
}
