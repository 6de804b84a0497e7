//! Store: the per-compile-unit symbol table.
//!
//! A binding names a piece of runtime state the rendered document expects the
//! agent to track. Every binding renders as one canonical token, `{NAME}`.
//!
//! # Name normalization
//!
//! Source material spells references inconsistently (`{$NAME}`, `$NAME`,
//! `{NAME}`). Names are normalized at the `declare`/`reference` boundary:
//! whitespace, one pair of braces and a leading `$` are stripped, so all
//! spellings bind the same entry and yield the same token.
//!
//! # Failure semantics
//!
//! Nothing here fails. Referencing an undeclared name yields
//! `{NAME?unresolved}` and records one [`Lint`], so a partially specified
//! command still renders a usable document.


use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

/// Marker appended to the name inside an unresolved token.
pub const UNRESOLVED_MARKER: &str = "?unresolved";

/// `{$NAME}` references embedded in text payloads.
static DOLLAR_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\$\s*([A-Za-z_][A-Za-z0-9_.\-]*)\s*\}").expect("static regex")
});

/// Unresolved tokens in rendered output.
static UNRESOLVED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([^{}\s]+)\?unresolved\}").expect("static regex")
});

/// A declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Normalized name (no braces, no `$`).
    pub name: String,
    /// What the bound state represents. Updated on re-declaration.
    pub description: String,
    /// Position of the first declaration within the compile unit.
    pub declared_at: usize,
}

impl Binding {
    /// The canonical token for this binding.
    pub fn token(&self) -> String {
        token(&self.name)
    }
}

/// Lint diagnostic for a reference to an undeclared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lint {
    /// Normalized name that failed to resolve.
    pub name: String,
    /// The annotated token emitted in its place.
    pub token: String,
    /// Library trail active when the reference was made.
    pub via: Vec<String>,
}

/// Per-compile-unit symbol table.
#[derive(Debug, Default, Clone)]
pub struct Store {
    bindings: HashMap<String, Binding>,
    lints: Vec<Lint>,
    via: Vec<String>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a binding and return its canonical token.
    ///
    /// Re-declaring a name replaces the description but keeps the original
    /// ordinal and token.
    pub fn declare(&mut self, name: &str, description: impl Into<String>) -> String {
        let name = normalize_name(name);
        let description = description.into();
        let next = self.bindings.len();

        let binding = self
            .bindings
            .entry(name.clone())
            .and_modify(|b| b.description.clone_from(&description))
            .or_insert_with(|| Binding {
                name: name.clone(),
                description: description.clone(),
                declared_at: next,
            });

        binding.token()
    }

    /// Look up a binding and return its token.
    ///
    /// Undeclared names return `{NAME?unresolved}` and record one lint.
    pub fn reference(&mut self, name: &str) -> String {
        let name = normalize_name(name);
        if let Some(binding) = self.bindings.get(&name) {
            return binding.token();
        }

        let token = unresolved_token(&name);
        debug!(name = %name, "unresolved store reference");
        self.lints.push(Lint {
            name,
            token: token.clone(),
            via: self.via.clone(),
        });
        token
    }

    /// Replace every `{$NAME}` in `text` with the result of [`Store::reference`].
    ///
    /// Plain `{...}` text is left untouched.
    pub fn resolve_text(&mut self, text: &str) -> String {
        if !text.contains("{$") {
            return text.to_string();
        }

        let mut result = String::with_capacity(text.len());
        let mut last = 0;
        for caps in DOLLAR_REF_RE.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            result.push_str(&text[last..whole.start()]);
            result.push_str(&self.reference(name.as_str()));
            last = whole.end();
        }
        result.push_str(&text[last..]);
        result
    }

    /// Look up a binding without recording lints.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(&normalize_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All bindings in declaration order.
    pub fn bindings(&self) -> Vec<&Binding> {
        let mut bindings: Vec<&Binding> = self.bindings.values().collect();
        bindings.sort_by_key(|b| b.declared_at);
        bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Set the library trail stamped onto lints recorded from now on.
    pub(crate) fn set_via(&mut self, via: &[String]) {
        self.via = via.to_vec();
    }

    /// Lints recorded so far, in the order the references were made.
    pub fn lints(&self) -> &[Lint] {
        &self.lints
    }
}

/// Strip whitespace, one pair of braces and a leading `$` on either side
/// of the braces (`{$NAME}` and `${NAME}` both give `NAME`).
pub fn normalize_name(raw: &str) -> String {
    let trimmed = strip_dollar(raw);
    let unbraced = trimmed
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .unwrap_or(trimmed);
    strip_dollar(unbraced).to_string()
}

fn strip_dollar(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix('$').unwrap_or(s).trim()
}

/// Canonical token for a normalized name.
pub fn token(name: &str) -> String {
    format!("{{{}}}", name)
}

/// Annotated token for a name that never resolved.
pub fn unresolved_token(name: &str) -> String {
    format!("{{{}{}}}", name, UNRESOLVED_MARKER)
}

/// Names of all unresolved tokens in `text`, in order of appearance.
pub fn find_unresolved(text: &str) -> Vec<String> {
    UNRESOLVED_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}
