//! The backend and policies recognizers are built against.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use crate::backend::RecognitionBackend;
use crate::language;
use crate::{Error, Result};

static INSTALLED: RwLock<Option<Platform>> = RwLock::new(None);

/// What a plain speech recognizer does when its configuration does not name a recognition
/// language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LanguagePolicy {
    /// Construction fails with [`Error::InvalidConfiguration`].
    #[default]
    Required,
    /// The given language is used instead.
    Fallback(String),
}

impl FromStr for LanguagePolicy {
    type Err = Error;

    /// Parses `required` or `fallback:<language>`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("required") {
            return Ok(Self::Required);
        }
        match s.split_once(':') {
            Some((policy, tag)) if policy.trim().eq_ignore_ascii_case("fallback") => {
                let tag = tag.trim();
                if language::is_well_formed(tag) {
                    Ok(Self::Fallback(tag.to_owned()))
                } else {
                    Err(Error::invalid_argument(
                        "language_policy",
                        format!("`{}` is not a valid language", tag),
                    ))
                }
            }
            _ => Err(Error::invalid_argument(
                "language_policy",
                format!("expected `required` or `fallback:<language>`, got `{}`", s),
            )),
        }
    }
}

/// A recognition backend together with the policies that apply to recognizers built on it.
#[derive(Clone)]
pub struct Platform {
    backend: Arc<dyn RecognitionBackend>,
    language_policy: LanguagePolicy,
}

impl Platform {
    /// Creates a platform with the default policies.
    pub fn new<B: RecognitionBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            language_policy: LanguagePolicy::default(),
        }
    }

    /// Replaces the language policy.
    pub fn with_language_policy(mut self, policy: LanguagePolicy) -> Self {
        self.language_policy = policy;
        self
    }

    /// The backend recognizers connect to.
    pub fn backend(&self) -> &dyn RecognitionBackend {
        self.backend.as_ref()
    }

    /// What plain speech recognizers do without a recognition language.
    pub fn language_policy(&self) -> &LanguagePolicy {
        &self.language_policy
    }

    /// Returns the platform installed with [`initialize`](crate::initialize).
    pub fn installed() -> Result<Self> {
        INSTALLED
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::Resource("no platform is installed".to_owned()))
    }

    pub(crate) fn install(platform: Option<Platform>) -> Option<Platform> {
        std::mem::replace(&mut *INSTALLED.write().unwrap(), platform)
    }
}

impl fmt::Debug for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Platform").field("language_policy", &self.language_policy).finish()
    }
}
