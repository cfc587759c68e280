use crate::error::{Error, Result};
use crate::fields::TextField;
use crate::filter::{FilterExpr, Pattern, Predicate, TextMatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextMode {
    /// Case-insensitive substring.
    Contains,
    /// Case-insensitive whole-value equality.
    Exact,
    /// Case-insensitive regular expression.
    Regex,
}

/// Text search on one field. Negation inverts containment, never
/// case-sensitivity.
#[derive(Debug, Clone, PartialEq)]
pub struct TextParam {
    field: TextField,
    value: String,
    mode: TextMode,
    pattern: Option<Pattern>,
    pub(crate) negated: bool,
}

impl TextParam {
    pub fn new(
        field: TextField,
        value: impl Into<String>,
        mode: TextMode,
        negated: bool,
    ) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(Error::Validation(format!(
                "A {} search needs a non-empty value",
                field.label()
            )));
        }
        let pattern = match mode {
            TextMode::Regex => Some(Pattern::new(&value).map_err(|e| {
                Error::Validation(format!("Invalid regular expression /{}/: {}", value, e))
            })?),
            _ => None,
        };
        Ok(Self {
            field,
            value,
            mode,
            pattern,
            negated,
        })
    }

    pub fn field(&self) -> TextField {
        self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn mode(&self) -> TextMode {
        self.mode
    }

    pub fn to_filter(&self) -> FilterExpr {
        let matcher = match (&self.mode, &self.pattern) {
            (TextMode::Regex, Some(pattern)) => TextMatch::Regex(pattern.clone()),
            (TextMode::Exact, _) => TextMatch::Exact(self.value.to_lowercase()),
            _ => TextMatch::Contains(self.value.to_lowercase()),
        };
        let expr = FilterExpr::Atom(Predicate::Text {
            field: self.field,
            matcher,
        });
        if self.negated {
            expr.negate()
        } else {
            expr
        }
    }

    pub fn describe(&self) -> String {
        let label = self.field.label();
        match (self.mode, self.negated) {
            (TextMode::Contains, false) => format!("{} contains \"{}\"", label, self.value),
            (TextMode::Contains, true) => format!("{} doesn't contain \"{}\"", label, self.value),
            (TextMode::Exact, false) => format!("{} is \"{}\"", label, self.value),
            (TextMode::Exact, true) => format!("{} isn't \"{}\"", label, self.value),
            (TextMode::Regex, false) => format!("{} matches /{}/", label, self.value),
            (TextMode::Regex, true) => format!("{} doesn't match /{}/", label, self.value),
        }
    }
}
