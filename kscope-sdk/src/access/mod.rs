
use tracing::error;

use crate::error::AccessError;

/// User facing actions and the verbs that satisfy each of them.
static ACTION_VERBS: &[(&str, &[&str])] = &[
    ("describe", &["get"]),
    ("view", &["get", "list"]),
    ("delete", &["delete"]),
    ("edit", &["patch", "update"]),
];

/// Resolves an action to the verbs that grant it.
pub fn map_verb(action: &str) -> Result<&'static [&'static str], AccessError> {
    ACTION_VERBS
        .iter()
        .find(|(name, _)| *name == action)
        .map(|(_, verbs)| *verbs)
        .ok_or_else(|| AccessError::UnknownAction(action.to_string()))
}

/// Known actions, in table order.
pub fn actions() -> impl Iterator<Item = &'static str> {
    ACTION_VERBS.iter().map(|(name, _)| *name)
}

/// Determines whether any of the granted verbs permits `action`.
///
/// An unknown action is logged and denied.
pub fn can<S: AsRef<str>>(verbs: &[S], action: &str) -> bool {
    let candidates = match map_verb(action) {
        Ok(candidates) => candidates,
        Err(err) => {
            error!(error = %err, "verb mapping failed");
            return false;
        }
    };

    verbs
        .iter()
        .any(|verb| candidates.contains(&verb.as_ref()))
}
