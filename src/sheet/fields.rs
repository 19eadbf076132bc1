//! Form field declarations and per-field editing state.

use super::upload::{UploadPolicy, UploadQueue, UploadedFile};
use crate::domain::duration::DurationInput;
use crate::domain::error::Result;
use crate::table::FilterOption;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Input behaviour of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    Email,
    Phone,
    /// `YYYY-MM-DD`.
    Date,
    /// `HH:MM` via [`DurationInput`].
    Duration,
    /// `#rrggbb`.
    Color,
    Password,
    Select(Vec<FilterOption>),
    Upload(UploadPolicy),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: String,
    pub kind: FieldKind,
    /// Rendered as `*`; never enforced.
    pub required: bool,
    pub placeholder: Option<String>,
    pub default: String,
}

macro_rules! field_constructors {
    ($($name:ident => $kind:ident),* $(,)?) => {
        $(
            #[must_use]
            pub fn $name(key: &'static str, label: impl Into<String>) -> Self {
                Self::new(key, label, FieldKind::$kind)
            }
        )*
    };
}

impl FieldSpec {
    #[must_use]
    pub fn new(key: &'static str, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key,
            label: label.into(),
            kind,
            required: false,
            placeholder: None,
            default: String::new(),
        }
    }

    field_constructors! {
        text => Text,
        multiline => Multiline,
        email => Email,
        phone => Phone,
        date => Date,
        duration => Duration,
        color => Color,
        password => Password,
    }

    #[must_use]
    pub fn select(key: &'static str, label: impl Into<String>, options: Vec<FilterOption>) -> Self {
        Self::new(key, label, FieldKind::Select(options))
    }

    #[must_use]
    pub fn upload(key: &'static str, label: impl Into<String>) -> Self {
        Self::upload_with(key, label, UploadPolicy::default())
    }

    #[must_use]
    pub fn upload_with(key: &'static str, label: impl Into<String>, policy: UploadPolicy) -> Self {
        Self::new(key, label, FieldKind::Upload(policy))
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = value.into();
        self
    }

    /// Label with the required marker.
    #[must_use]
    pub fn display_label(&self) -> String {
        if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        }
    }
}

/// Submitted form values keyed by field key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Live value of one field while the sheet is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    spec: FieldSpec,
    text: String,
    duration: DurationInput,
    uploads: UploadQueue,
}

impl FieldState {
    #[must_use]
    pub fn new(spec: FieldSpec) -> Self {
        let uploads = match &spec.kind {
            FieldKind::Upload(policy) => UploadQueue::new(*policy),
            _ => UploadQueue::default(),
        };
        let mut field = Self {
            spec,
            text: String::new(),
            duration: DurationInput::default(),
            uploads,
        };
        field.reset();
        field
    }

    #[must_use]
    pub const fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    #[must_use]
    pub const fn uploads(&self) -> &UploadQueue {
        &self.uploads
    }

    pub fn reset(&mut self) {
        let default = self.spec.default.clone();
        self.uploads.clear();
        self.set_value(&default);
    }

    /// Loads a stored value. Upload fields keep their current files.
    pub fn set_value(&mut self, value: &str) {
        match &self.spec.kind {
            FieldKind::Duration => self.duration = DurationInput::parse(value),
            FieldKind::Select(options) => {
                self.text = options
                    .iter()
                    .find(|o| o.value == value)
                    .map(|o| o.value.clone())
                    .unwrap_or_default();
            }
            FieldKind::Upload(_) => self.text.clear(),
            _ => self.text = value.to_string(),
        }
    }

    /// Submitted value.
    #[must_use]
    pub fn value(&self) -> String {
        match &self.spec.kind {
            FieldKind::Duration => self.duration.value(),
            FieldKind::Upload(_) => self.uploads.names(),
            _ => self.text.clone(),
        }
    }

    /// Text shown in the input box.
    #[must_use]
    pub fn display(&self) -> String {
        match &self.spec.kind {
            FieldKind::Password => "•".repeat(self.text.chars().count()),
            FieldKind::Duration => self.duration.value(),
            FieldKind::Select(options) => options
                .iter()
                .find(|o| o.value == self.text)
                .map(|o| o.label.clone())
                .unwrap_or_default(),
            _ => self.text.clone(),
        }
    }

    /// Feeds one typed character, dropping characters the kind rejects.
    pub fn input(&mut self, c: char) {
        match &self.spec.kind {
            FieldKind::Duration => self.duration.push(c),
            FieldKind::Select(_) => {}
            FieldKind::Phone => {
                if c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')') {
                    self.text.push(c);
                }
            }
            FieldKind::Date => {
                if (c.is_ascii_digit() || c == '-') && self.text.len() < 10 {
                    self.text.push(c);
                }
            }
            FieldKind::Color => {
                if self.text.is_empty() && c != '#' {
                    self.text.push('#');
                }
                if (c == '#' && self.text.is_empty()) || (c.is_ascii_hexdigit() && self.text.len() < 7) {
                    self.text.push(c.to_ascii_lowercase());
                }
            }
            _ => self.text.push(c),
        }
    }

    /// Deletes the last character; on an upload field with an empty path,
    /// removes the last attached file instead.
    pub fn backspace(&mut self) {
        match &self.spec.kind {
            FieldKind::Duration => self.duration.pop(),
            FieldKind::Select(_) => self.text.clear(),
            FieldKind::Upload(_) if self.text.is_empty() => {
                let last = self.uploads.files().len().checked_sub(1);
                if let Some(index) = last {
                    self.uploads.remove(index);
                }
            }
            _ => {
                self.text.pop();
            }
        }
    }

    /// Steps a select field to the next or previous option.
    pub fn cycle(&mut self, forward: bool) {
        let FieldKind::Select(options) = &self.spec.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let current = options.iter().position(|o| o.value == self.text);
        let len = options.len();
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.text = options[next].value.clone();
    }

    /// Enter on an upload field attaches the typed path.
    ///
    /// Returns `Ok(false)` for other kinds so the caller can move focus.
    ///
    /// # Errors
    ///
    /// Returns an error if the typed path cannot be read.
    pub fn confirm(&mut self) -> Result<bool> {
        if !matches!(self.spec.kind, FieldKind::Upload(_)) {
            return Ok(false);
        }
        if self.text.trim().is_empty() {
            return Ok(true);
        }
        let file = UploadedFile::from_path(&self.text)?;
        let accepted = self.uploads.add(vec![file]);
        tracing::debug!(field = self.spec.key, accepted, "upload attached");
        self.text.clear();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(spec: FieldSpec, keys: &str) -> FieldState {
        let mut field = FieldState::new(spec);
        keys.chars().for_each(|c| field.input(c));
        field
    }

    #[test]
    fn required_label_has_marker() {
        assert_eq!(FieldSpec::text("name", "Name").required().display_label(), "Name *");
    }

    #[test]
    fn phone_drops_letters() {
        assert_eq!(typed(FieldSpec::phone("p", "Phone"), "+39 02x1").value(), "+39 021");
    }

    #[test]
    fn color_is_prefixed_and_capped() {
        assert_eq!(typed(FieldSpec::color("c", "Colour"), "3B82F6FF").value(), "#3b82f6");
    }

    #[test]
    fn password_is_masked() {
        let field = typed(FieldSpec::password("pw", "Password"), "abc");
        assert_eq!(field.display(), "•••");
        assert_eq!(field.value(), "abc");
    }

    #[test]
    fn select_cycles_and_ignores_unknown_values() {
        let options = FilterOption::same(["a", "b"]);
        let mut field = FieldState::new(FieldSpec::select("s", "S", options));
        field.cycle(false);
        assert_eq!(field.value(), "b");
        field.cycle(true);
        assert_eq!(field.value(), "a");
        field.set_value("zzz");
        assert_eq!(field.value(), "");
    }

    #[test]
    fn defaults_are_restored_on_reset() {
        let mut field = FieldState::new(FieldSpec::text("t", "T").default_value("INT"));
        field.input('X');
        field.reset();
        assert_eq!(field.value(), "INT");
    }

    #[test]
    fn form_data_collects_pairs() {
        let data: FormData = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(data.get("b"), Some("2"));
        assert_eq!(data.len(), 2);
    }
}
