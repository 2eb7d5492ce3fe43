//! `${key}` placeholder resolution against a variable map.
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use tokensplice::properties::{PropertyOptions, PropertyParser};
//!
//! let vars = BTreeMap::from([("user".to_string(), "scott".to_string())]);
//! let parser = PropertyParser::new(PropertyOptions {
//!     enable_default_value: true,
//!     ..Default::default()
//! });
//! assert_eq!(
//!     parser.parse("${user}@${host:localhost}", Some(&vars)).unwrap(),
//!     "scott@localhost"
//! );
//! ```
//!
//! Options can also come from the variables themselves, under
//! [`KEY_ENABLE_DEFAULT_VALUE`] and [`KEY_DEFAULT_VALUE_SEPARATOR`]; see
//! [`resolve`].
use alloc::{
    borrow::Cow,
    collections::BTreeMap,
    format,
    string::{String, ToString},
};

use thiserror::Error;

use crate::{TokenHandler, TokenParser};

/// Variable map consulted while resolving placeholders.
pub type Variables = BTreeMap<String, String>;

/// Token opening a placeholder.
pub const OPEN_TOKEN: &str = "${";
/// Token closing a placeholder.
pub const CLOSE_TOKEN: &str = "}";

/// Variable enabling `${key:default}` syntax when set to `true`.
pub const KEY_ENABLE_DEFAULT_VALUE: &str = "tokensplice.property-parser.enable-default-value";
/// Variable overriding the separator between a key and its default value.
pub const KEY_DEFAULT_VALUE_SEPARATOR: &str =
    "tokensplice.property-parser.default-value-separator";

const DEFAULT_VALUE_SEPARATOR: &str = ":";

/// Errors raised while resolving placeholders.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// The placeholder names a key absent from the variables, has no default,
    /// and [`MissingPolicy::Error`] is in effect.
    #[error("unresolved property '{key}'")]
    Unresolved {
        /// The key that was looked up.
        key: String,
    },
}

/// What to do with a placeholder whose key is not defined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum MissingPolicy {
    /// Leave the placeholder in the output exactly as written.
    #[default]
    Keep,
    /// Fail with [`PropertyError::Unresolved`].
    Error,
}

/// Configuration for [`PropertyParser`].
///
/// # Default
///
/// Default values disabled, separator `":"`, unresolved placeholders kept.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "kebab-case")
)]
pub struct PropertyOptions {
    /// Whether `${key<separator>default}` falls back to `default` when `key`
    /// is undefined.
    ///
    /// When `false` the whole expression, separator included, is the key.
    ///
    /// # Default
    ///
    /// `false`
    pub enable_default_value: bool,

    /// Separator between the key and the default value. Only the first
    /// occurrence splits, so defaults may contain the separator.
    ///
    /// # Default
    ///
    /// `":"`
    pub default_value_separator: String,

    /// Policy for keys that resolve to nothing.
    ///
    /// # Default
    ///
    /// [`MissingPolicy::Keep`]
    pub missing: MissingPolicy,
}

impl Default for PropertyOptions {
    fn default() -> Self {
        Self {
            enable_default_value: false,
            default_value_separator: DEFAULT_VALUE_SEPARATOR.to_string(),
            missing: MissingPolicy::default(),
        }
    }
}

impl PropertyOptions {
    /// Reads options from well-known variables, falling back to the
    /// defaults for anything absent.
    ///
    /// [`KEY_ENABLE_DEFAULT_VALUE`] enables defaults when it equals `true`,
    /// ignoring case. [`KEY_DEFAULT_VALUE_SEPARATOR`] is used as is.
    pub fn from_variables(variables: &Variables) -> Self {
        let mut options = Self::default();
        if let Some(flag) = variables.get(KEY_ENABLE_DEFAULT_VALUE) {
            options.enable_default_value = flag.eq_ignore_ascii_case("true");
        }
        if let Some(separator) = variables.get(KEY_DEFAULT_VALUE_SEPARATOR) {
            options.default_value_separator.clone_from(separator);
        }
        options
    }
}

/// [`TokenHandler`] looking expressions up in a [`Variables`] map.
#[derive(Debug, Clone)]
pub struct PropertyHandler<'v> {
    variables: Option<&'v Variables>,
    options: PropertyOptions,
}

impl<'v> PropertyHandler<'v> {
    /// A handler resolving against `variables`. Without variables every
    /// placeholder is left as written.
    pub fn new(variables: Option<&'v Variables>, options: PropertyOptions) -> Self {
        Self { variables, options }
    }

    fn unresolved(&self, expression: &str) -> Result<String, PropertyError> {
        match self.options.missing {
            MissingPolicy::Keep => Ok(format!("{OPEN_TOKEN}{expression}{CLOSE_TOKEN}")),
            MissingPolicy::Error => Err(PropertyError::Unresolved {
                key: expression.to_string(),
            }),
        }
    }
}

impl TokenHandler for PropertyHandler<'_> {
    type Error = PropertyError;

    fn handle_token(&self, expression: &str) -> Result<String, PropertyError> {
        let Some(variables) = self.variables else {
            return Ok(format!("{OPEN_TOKEN}{expression}{CLOSE_TOKEN}"));
        };

        if self.options.enable_default_value {
            if let Some((key, default)) =
                expression.split_once(self.options.default_value_separator.as_str())
            {
                return Ok(variables
                    .get(key)
                    .map_or_else(|| default.to_string(), Clone::clone));
            }
        }

        match variables.get(expression) {
            Some(value) => Ok(value.clone()),
            None => {
                log::trace!("no variable named '{expression}'");
                self.unresolved(expression)
            }
        }
    }
}

/// Resolves `${...}` placeholders with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct PropertyParser {
    options: PropertyOptions,
}

impl PropertyParser {
    /// A parser using `options` for every call.
    pub fn new(options: PropertyOptions) -> Self {
        Self { options }
    }

    /// The options applied by this parser.
    pub fn options(&self) -> &PropertyOptions {
        &self.options
    }

    /// Replaces every placeholder in `text`.
    ///
    /// # Errors
    ///
    /// [`PropertyError::Unresolved`] for the first undefined key when the
    /// options ask for [`MissingPolicy::Error`].
    pub fn parse<'a>(
        &self,
        text: &'a str,
        variables: Option<&Variables>,
    ) -> Result<Cow<'a, str>, PropertyError> {
        let handler = PropertyHandler::new(variables, self.options.clone());
        TokenParser::new(OPEN_TOKEN, CLOSE_TOKEN, handler).parse(text)
    }
}

/// Replaces every placeholder in `text`, reading options from `variables`
/// via [`PropertyOptions::from_variables`].
///
/// Undefined keys are left as written, so this never fails.
///
/// ```rust
/// use std::collections::BTreeMap;
///
/// use tokensplice::properties::{KEY_ENABLE_DEFAULT_VALUE, resolve};
///
/// let mut vars = BTreeMap::new();
/// vars.insert("db".to_string(), "orders".to_string());
/// assert_eq!(resolve("${db}/${port:5432}", Some(&vars)), "orders/${port:5432}");
///
/// vars.insert(KEY_ENABLE_DEFAULT_VALUE.to_string(), "true".to_string());
/// assert_eq!(resolve("${db}/${port:5432}", Some(&vars)), "orders/5432");
/// ```
pub fn resolve<'a>(text: &'a str, variables: Option<&Variables>) -> Cow<'a, str> {
    let options = variables.map(PropertyOptions::from_variables).unwrap_or_default();
    let handler = PropertyHandler::new(variables, options);
    // `MissingPolicy::Keep` is the only policy `from_variables` produces.
    TokenParser::new(OPEN_TOKEN, CLOSE_TOKEN, handler)
        .parse(text)
        .unwrap_or_else(|_| Cow::Borrowed(text))
}
