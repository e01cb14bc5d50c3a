//! Persisted form input (`app_form_state`).

use pc_core::{CheckRequest, FormSnapshot};

use crate::{SharedStorage, StorageError};

/// Key holding the last-used form input.
pub const FORM_STATE_KEY: &str = "app_form_state";

/// Load the saved form, falling back to defaults when it is missing,
/// unreadable or no longer valid.
#[must_use]
pub fn load_form(storage: &dyn SharedStorage) -> FormSnapshot {
    let raw = match storage.get(FORM_STATE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return FormSnapshot::default(),
        Err(error) => {
            tracing::warn!(%error, "failed to read saved form state; using defaults");
            return FormSnapshot::default();
        }
    };

    let snapshot = match serde_json::from_str::<FormSnapshot>(&raw) {
        Ok(snapshot) => snapshot,
        Err(source) => {
            let error = StorageError::Decode {
                key: FORM_STATE_KEY.to_string(),
                source,
            };
            tracing::warn!(%error, "using default form state");
            return FormSnapshot::default();
        }
    };

    match snapshot.to_request() {
        Ok(_) => snapshot,
        Err(error) => {
            tracing::warn!(%error, "saved form state is out of bounds; using defaults");
            FormSnapshot::default()
        }
    }
}

/// Save a validated request as the form state.
///
/// # Errors
///
/// Returns [`StorageError`] if encoding or the write fails.
pub fn save_form(storage: &dyn SharedStorage, request: CheckRequest) -> Result<(), StorageError> {
    let snapshot = FormSnapshot::from(request);
    let json = serde_json::to_string(&snapshot).map_err(|source| StorageError::Encode {
        key: FORM_STATE_KEY.to_string(),
        source,
    })?;
    storage.set(FORM_STATE_KEY, &json)
}

/// Forget the saved form state.
///
/// # Errors
///
/// Returns [`StorageError`] if the removal fails.
pub fn clear_form(storage: &dyn SharedStorage) -> Result<(), StorageError> {
    storage.remove(FORM_STATE_KEY)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::MemoryStorage;

    #[test]
    fn missing_state_yields_defaults() {
        let tab = MemoryStorage::new().tab();
        assert_eq!(load_form(&tab), FormSnapshot::default());
    }

    #[test]
    fn saved_request_is_restored() {
        let tab = MemoryStorage::new().tab();
        let request = CheckRequest::new(1.5, -2.0, 2.5).expect("valid");
        save_form(&tab, request).expect("save");

        assert_eq!(load_form(&tab), FormSnapshot { x: 1.5, y: -2.0, r: 2.5 });
    }

    #[test]
    fn corrupt_state_yields_defaults() {
        let tab = MemoryStorage::new().tab();
        tab.set(FORM_STATE_KEY, "{not json").expect("set");
        assert_eq!(load_form(&tab), FormSnapshot::default());
    }

    #[test]
    fn out_of_bounds_state_yields_defaults() {
        let tab = MemoryStorage::new().tab();
        tab.set(FORM_STATE_KEY, r#"{"x": 10, "y": 0, "r": 1}"#).expect("set");
        assert_eq!(load_form(&tab), FormSnapshot::default());
    }

    #[test]
    fn clear_removes_state() {
        let tab = MemoryStorage::new().tab();
        save_form(&tab, CheckRequest::new(0.0, 0.0, 1.0).expect("valid")).expect("save");
        clear_form(&tab).expect("clear");
        assert_eq!(tab.get(FORM_STATE_KEY).expect("get"), None);
    }
}
