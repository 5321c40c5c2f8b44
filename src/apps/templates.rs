//! Starter templates an app workspace can be forked from.
//!
//! The registry is fixed at build time, mirroring the curated template set
//! exposed to the UI. Lookup failures are permanent errors naming the
//! available ids.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::AppdockError;

/// A starter template: display name plus the git repo the workspace host
/// clones from.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub repo: &'static str,
}

static TEMPLATES: LazyLock<BTreeMap<&'static str, Template>> = LazyLock::new(|| {
    [
        Template {
            id: "nextjs",
            name: "Next.js",
            repo: "https://github.com/appdock-templates/nextjs-starter",
        },
        Template {
            id: "vite-react",
            name: "Vite + React",
            repo: "https://github.com/appdock-templates/vite-react-starter",
        },
        Template {
            id: "expo",
            name: "Expo",
            repo: "https://github.com/appdock-templates/expo-starter",
        },
    ]
    .into_iter()
    .map(|t| (t.id, t))
    .collect()
});

/// Resolves a template id, failing with the list of available ids.
pub fn lookup(template_id: &str) -> Result<Template, AppdockError> {
    TEMPLATES
        .get(template_id)
        .copied()
        .ok_or_else(|| AppdockError::UnknownTemplate {
            template_id: template_id.to_string(),
            available: available_ids().join(", "),
        })
}

/// Template ids in stable (sorted) order.
pub fn available_ids() -> Vec<&'static str> {
    TEMPLATES.keys().copied().collect()
}
