//! Artifact coordinates and resolution results
//!
//! A [`Coordinate`] names one file in a Maven-layout repository. Companion
//! artifacts (sources, javadoc) share everything but the classifier with
//! their primary.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

fn default_type() -> String {
    "jar".to_string()
}

/// Dependency scope as declared in the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Compile,
    Provided,
    Runtime,
    Test,
    System,
    Import,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Provided => "provided",
            Self::Runtime => "runtime",
            Self::Test => "test",
            Self::System => "system",
            Self::Import => "import",
        }
    }

    /// Short marker used in dependency reports
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Compile => "[C]",
            Self::Provided => "[P]",
            Self::Runtime => "[R]",
            Self::Test => "[T]",
            Self::System => "[S]",
            Self::Import => "[I]",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "compile" => Ok(Self::Compile),
            "provided" => Ok(Self::Provided),
            "runtime" => Ok(Self::Runtime),
            "test" => Ok(Self::Test),
            "system" => Ok(Self::System),
            "import" => Ok(Self::Import),
            other => Err(Error::InvalidScope {
                scope: other.to_string(),
            }),
        }
    }
}

/// Kind of companion artifact attached to a library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    Sources,
    Javadoc,
}

impl Attachment {
    /// Classifier suffix and project-local subdirectory name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sources => "sources",
            Self::Javadoc => "javadoc",
        }
    }
}

/// Identity of one artifact file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(rename = "type", default = "default_type")]
    pub artifact_type: String,
    #[serde(default)]
    pub scope: Scope,
}

impl Coordinate {
    /// A compile-scoped jar without classifier
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
            classifier: None,
            artifact_type: default_type(),
            scope: Scope::Compile,
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    pub fn with_type(mut self, artifact_type: impl Into<String>) -> Self {
        self.artifact_type = artifact_type.into();
        self
    }

    /// `artifact[-version][-classifier].type`
    pub fn file_name(&self) -> String {
        let mut name = self.artifact.clone();
        if !self.version.is_empty() {
            name.push('-');
            name.push_str(&self.version);
        }
        if let Some(classifier) = self.classifier.as_deref().filter(|c| !c.is_empty()) {
            name.push('-');
            name.push_str(classifier);
        }
        name.push('.');
        name.push_str(&self.artifact_type);
        name
    }

    /// Location inside a Maven-layout repository, `/`-separated
    pub fn repository_path(&self) -> String {
        let mut path = String::new();
        if !self.group.is_empty() {
            path.push_str(&self.group.replace('.', "/"));
            path.push('/');
        }
        path.push_str(&self.artifact);
        path.push('/');
        if !self.version.is_empty() {
            path.push_str(&self.version);
            path.push('/');
        }
        path.push_str(&self.file_name());
        path
    }

    /// The companion coordinate for a sources or javadoc attachment.
    ///
    /// A primary that already has a classifier `base` gets `base-sources`.
    pub fn companion(&self, attachment: Attachment) -> Coordinate {
        let classifier = match self.classifier.as_deref().filter(|c| !c.is_empty()) {
            Some(base) => format!("{}-{}", base, attachment.as_str()),
            None => attachment.as_str().to_string(),
        };
        Coordinate {
            classifier: Some(classifier),
            ..self.clone()
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.artifact_type)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        write!(f, ":{}:{}", self.version, self.scope)
    }
}

/// A coordinate together with the file it resolved to, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedArtifact {
    pub coordinate: Coordinate,
    pub location: Option<PathBuf>,
}

impl ResolvedArtifact {
    pub fn resolved(coordinate: Coordinate, location: impl Into<PathBuf>) -> Self {
        Self {
            coordinate,
            location: Some(location.into()),
        }
    }

    pub fn unresolved(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            location: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.location.is_some()
    }

    /// Report marker: `[R]` resolved, `[N]` not resolved
    pub fn status_marker(&self) -> &'static str {
        if self.is_resolved() { "[R]" } else { "[N]" }
    }
}

/// A resolved primary artifact with its optional companions.
///
/// A companion is `None` when its lookup was disabled, and an unresolved
/// artifact when the lookup ran and found nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub primary: ResolvedArtifact,
    pub sources: Option<ResolvedArtifact>,
    pub javadoc: Option<ResolvedArtifact>,
}

impl Dependency {
    pub fn new(primary: ResolvedArtifact) -> Self {
        Self {
            primary,
            sources: None,
            javadoc: None,
        }
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.primary.coordinate
    }

    /// Resolved file of the given attachment, if it resolved
    pub fn attachment_location(&self, attachment: Attachment) -> Option<&Path> {
        let companion = match attachment {
            Attachment::Sources => self.sources.as_ref(),
            Attachment::Javadoc => self.javadoc.as_ref(),
        };
        companion.and_then(|a| a.location.as_deref())
    }
}

/// Matches descriptor paths that refer to any version of one library
#[derive(Debug, Clone)]
pub struct VersionPattern {
    regex: Regex,
}

impl VersionPattern {
    /// Build the pattern `^(?:.*/)?<artifact>-[0-9][^/]*\.<type>$`
    pub fn new(coordinate: &Coordinate) -> Result<Self> {
        let source = format!(
            r"^(?:.*/)?{}-[0-9][^/]*\.{}$",
            regex::escape(&coordinate.artifact),
            regex::escape(&coordinate.artifact_type)
        );
        Ok(Self {
            regex: Regex::new(&source)?,
        })
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn file_name_and_repository_path() {
        let coordinate = Coordinate::new("org.slf4j", "slf4j-api", "1.7.36");
        assert_eq!(coordinate.file_name(), "slf4j-api-1.7.36.jar");
        assert_eq!(
            coordinate.repository_path(),
            "org/slf4j/slf4j-api/1.7.36/slf4j-api-1.7.36.jar"
        );
    }

    #[test]
    fn companion_of_plain_and_classified_primary() {
        let plain = Coordinate::new("g", "foo", "1.0");
        assert_eq!(plain.companion(Attachment::Sources).file_name(), "foo-1.0-sources.jar");

        let classified = plain.clone().with_classifier("jdk15");
        assert_eq!(
            classified.companion(Attachment::Javadoc).file_name(),
            "foo-1.0-jdk15-javadoc.jar"
        );
    }

    #[test]
    fn display_includes_classifier_and_scope() {
        let coordinate = Coordinate::new("g", "foo", "1.0")
            .with_classifier("tests")
            .with_scope(Scope::Test);
        assert_eq!(coordinate.to_string(), "g:foo:jar:tests:1.0:test");
    }

    #[test]
    fn unknown_scope_is_rejected() {
        assert!(matches!(
            "bundled".parse::<Scope>(),
            Err(Error::InvalidScope { .. })
        ));
        assert_eq!("provided".parse::<Scope>().unwrap(), Scope::Provided);
    }

    #[rstest]
    #[case("lib/foo-1.0.jar", true)]
    #[case("foo-2.0.1-SNAPSHOT.jar", true)]
    #[case("M2_REPO/g/foo/1.0/foo-1.0.jar", true)]
    #[case("lib/foo-bar-1.0.jar", false)]
    #[case("lib/barfoo-1.0.jar", false)]
    #[case("lib/foo-1.0.zip", false)]
    #[case("lib/foo-latest.jar", false)]
    fn version_pattern_matches_any_version(#[case] path: &str, #[case] expected: bool) {
        let pattern = VersionPattern::new(&Coordinate::new("g", "foo", "1.0")).unwrap();
        assert_eq!(pattern.is_match(path), expected, "path: {}", path);
    }

    #[rstest]
    #[case("commons.lang+", "lib/commons.lang+-3.0.jar", true)]
    #[case("commons.lang+", "lib/commonsXlang+-3.0.jar", false)]
    #[case("commons.lang+", "lib/commons.langg-3.0.jar", false)]
    #[case("a(b)[c]", "lib/a(b)[c]-1.0.jar", true)]
    #[case("a(b)[c]", "lib/ab-1.0.jar", false)]
    fn version_pattern_escapes_metacharacters(
        #[case] artifact: &str,
        #[case] path: &str,
        #[case] expected: bool,
    ) {
        let pattern = VersionPattern::new(&Coordinate::new("g", artifact, "1.0")).unwrap();
        assert_eq!(pattern.is_match(path), expected, "path: {}", path);
    }
}
