//! The validation rule table.
//!
//! On disk a rule is the classic `[severity, applicability, value]` tuple,
//! e.g. `header-max-length: [2, always, 72]`. Severities accept both the
//! numeric (0/1/2) and symbolic (`off`/`warn`/`error`) spellings.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    /// The type must be a member of the allowed set.
    TypeEnum,
    /// The type must follow the configured case convention.
    TypeCase,
    /// The type must not be empty.
    TypeEmpty,
    /// The scope, when present, must follow the configured case convention.
    ScopeCase,
    /// The subject must not match any of the configured case styles.
    SubjectCase,
    /// The subject must not be empty.
    SubjectEmpty,
    /// The subject must not end with the configured full stop.
    SubjectFullStop,
    /// The header must not exceed the configured length.
    HeaderMaxLength,
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleId::TypeEnum => "type-enum",
            RuleId::TypeCase => "type-case",
            RuleId::TypeEmpty => "type-empty",
            RuleId::ScopeCase => "scope-case",
            RuleId::SubjectCase => "subject-case",
            RuleId::SubjectEmpty => "subject-empty",
            RuleId::SubjectFullStop => "subject-full-stop",
            RuleId::HeaderMaxLength => "header-max-length",
        };
        write!(f, "{name}")
    }
}

/// Severity of a rule: decides whether a violation blocks acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// The rule is disabled.
    Off,
    /// Violations are reported but do not block.
    Warn,
    /// Violations block acceptance.
    #[default]
    Error,
}

impl Severity {
    /// Numeric level as used by the on-disk table (0/1/2).
    pub fn level(self) -> u8 {
        match self {
            Severity::Off => 0,
            Severity::Warn => 1,
            Severity::Error => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Off => write!(f, "off"),
            Severity::Warn => write!(f, "warn"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SeverityVisitor;

        impl Visitor<'_> for SeverityVisitor {
            type Value = Severity;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a severity level: 0/1/2 or off/warn/error")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Severity, E> {
                match v {
                    0 => Ok(Severity::Off),
                    1 => Ok(Severity::Warn),
                    2 => Ok(Severity::Error),
                    other => Err(E::custom(format!("invalid severity level {other}"))),
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Severity, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("invalid severity level {v}")))
                    .and_then(|v| self.visit_u64(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Severity, E> {
                match v {
                    "off" => Ok(Severity::Off),
                    "warn" | "warning" => Ok(Severity::Warn),
                    "error" => Ok(Severity::Error),
                    other => Err(E::custom(format!("invalid severity {other:?}"))),
                }
            }
        }

        deserializer.deserialize_any(SeverityVisitor)
    }
}

/// Whether the rule's condition must always hold or must never hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    /// The condition must hold.
    Always,
    /// The condition must not hold.
    Never,
}

/// Case convention for single-token fields (type, scope).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseConvention {
    /// No upper-case letters allowed.
    LowerCase,
    /// No lower-case letters allowed.
    UpperCase,
}

/// Case style a subject can be rejected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseStyle {
    /// Capitalized first word, e.g. "Fix the parser".
    SentenceCase,
    /// Every word capitalized, e.g. "Fix The Parser".
    StartCase,
    /// Concatenated capitalized segments, e.g. "FixTheParser".
    PascalCase,
    /// No lower-case letters at all, e.g. "FIX THE PARSER".
    UpperCase,
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseStyle::SentenceCase => write!(f, "sentence-case"),
            CaseStyle::StartCase => write!(f, "start-case"),
            CaseStyle::PascalCase => write!(f, "pascal-case"),
            CaseStyle::UpperCase => write!(f, "upper-case"),
        }
    }
}

/// A single configured rule: severity, applicability and an optional
/// rule-specific parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule<T> {
    /// How strictly violations are treated.
    pub severity: Severity,
    /// Whether the condition must always or never hold.
    pub when: Applicability,
    /// Rule-specific parameter; built-in defaults apply when absent.
    pub value: Option<T>,
}

impl<T> Rule<T> {
    /// Creates a rule.
    pub fn new(severity: Severity, when: Applicability, value: Option<T>) -> Self {
        Self {
            severity,
            when,
            value,
        }
    }

    /// Whether the rule participates in evaluation at all.
    pub fn is_enabled(&self) -> bool {
        self.severity != Severity::Off
    }

    /// Returns whether the evaluated condition constitutes a violation.
    pub fn violates(&self, condition_holds: bool) -> bool {
        match self.when {
            Applicability::Always => !condition_holds,
            Applicability::Never => condition_holds,
        }
    }
}

impl<T: Serialize> Serialize for Rule<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.value.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.severity)?;
        seq.serialize_element(&self.when)?;
        if let Some(value) = &self.value {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Rule<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RuleVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for RuleVisitor<T> {
            type Value = Rule<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a [severity, applicability, value?] sequence")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Rule<T>, A::Error> {
                let severity = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let when = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let value = seq.next_element()?;
                Ok(Rule {
                    severity,
                    when,
                    value,
                })
            }
        }

        deserializer.deserialize_seq(RuleVisitor(PhantomData))
    }
}

/// The full rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// The type must be in the allowed set.
    #[serde(rename = "type-enum")]
    pub type_enum: Rule<Vec<String>>,
    /// Case convention for the type.
    #[serde(rename = "type-case")]
    pub type_case: Rule<CaseConvention>,
    /// The type must not be empty.
    #[serde(rename = "type-empty")]
    pub type_empty: Rule<()>,
    /// Case convention for the scope.
    #[serde(rename = "scope-case")]
    pub scope_case: Rule<CaseConvention>,
    /// Case styles the subject must not match.
    #[serde(rename = "subject-case")]
    pub subject_case: Rule<Vec<CaseStyle>>,
    /// The subject must not be empty.
    #[serde(rename = "subject-empty")]
    pub subject_empty: Rule<()>,
    /// The subject must not end with this character.
    #[serde(rename = "subject-full-stop")]
    pub subject_full_stop: Rule<String>,
    /// Maximum header length in characters.
    #[serde(rename = "header-max-length")]
    pub header_max_length: Rule<usize>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            type_enum: Rule::new(Severity::Error, Applicability::Always, None),
            type_case: Rule::new(
                Severity::Error,
                Applicability::Always,
                Some(CaseConvention::LowerCase),
            ),
            type_empty: Rule::new(Severity::Error, Applicability::Never, None),
            scope_case: Rule::new(
                Severity::Error,
                Applicability::Always,
                Some(CaseConvention::LowerCase),
            ),
            subject_case: Rule::new(
                Severity::Error,
                Applicability::Never,
                Some(vec![
                    CaseStyle::SentenceCase,
                    CaseStyle::StartCase,
                    CaseStyle::PascalCase,
                    CaseStyle::UpperCase,
                ]),
            ),
            subject_empty: Rule::new(Severity::Error, Applicability::Never, None),
            subject_full_stop: Rule::new(
                Severity::Error,
                Applicability::Never,
                Some(".".to_string()),
            ),
            header_max_length: Rule::new(Severity::Error, Applicability::Always, Some(72)),
        }
    }
}

impl RuleSet {
    /// Default maximum header length.
    pub const DEFAULT_HEADER_MAX_LENGTH: usize = 72;

    /// The effective header length limit.
    pub fn header_limit(&self) -> usize {
        self.header_max_length
            .value
            .unwrap_or(Self::DEFAULT_HEADER_MAX_LENGTH)
    }
}
