//! Syntax registry - include statement templates per file extension

use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::error::PartialError;

/// Placeholder for the partial reference inside an include template
pub const PLACEHOLDER: &str = "{name}";

/// Built-in include templates, keyed by extension
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (".css", "@import url('{name}');"),
    (".dust", "{> \"{name}\" /}"),
    (".erb", "<%= render '{name}' %>"),
    (".haml", "= render '{name}'"),
    (".html", "<%= render '{name}' %>"),
    (".less", "@import '{name}';"),
    (".sass", "@import '{name}'"),
    (".scss", "@import '{name}';"),
    (".slim", "== render '{name}'"),
];

/// How one file type references a partial
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxRule {
    extension: String,
    template: String,
}

impl SyntaxRule {
    /// Create a rule, validating that the template has exactly one placeholder
    pub fn new(extension: &str, template: &str) -> Result<Self, PartialError> {
        debug!(%extension, %template, "SyntaxRule::new: called");
        if template.matches(PLACEHOLDER).count() != 1 {
            return Err(PartialError::InvalidTemplate {
                template: template.to_string(),
            });
        }
        Ok(Self {
            extension: normalize_extension(extension),
            template: template.to_string(),
        })
    }

    /// Extension this rule applies to, with its leading dot
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Include template containing the `{name}` placeholder
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render the include statement for a partial name
    pub fn format(&self, name: &str) -> String {
        self.template.replacen(PLACEHOLDER, name, 1)
    }

    /// Matcher recognising this rule's include statements
    pub fn matcher(&self) -> Result<IncludeMatcher, PartialError> {
        include_matcher(&self.template)
    }
}

/// Regex derived from an include template that captures the partial reference
#[derive(Debug, Clone)]
pub struct IncludeMatcher {
    regex: Regex,
}

impl IncludeMatcher {
    /// Extract the partial reference from a line, if it holds an include statement
    pub fn reference<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.regex
            .captures(line)
            .and_then(|caps| caps.name("name"))
            .map(|m| m.as_str())
    }

    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }
}

/// Build a matcher from an include template.
///
/// Every literal character of the template is escaped; the placeholder becomes
/// the non-greedy `name` capture group. Leading indentation is allowed. When
/// the placeholder ends the template the capture runs to the end of the line.
pub fn include_matcher(template: &str) -> Result<IncludeMatcher, PartialError> {
    debug!(%template, "include_matcher: called");
    let invalid = || PartialError::InvalidTemplate {
        template: template.to_string(),
    };

    let (prefix, suffix) = template.split_once(PLACEHOLDER).ok_or_else(invalid)?;
    if suffix.contains(PLACEHOLDER) {
        return Err(invalid());
    }

    let pattern = if suffix.is_empty() {
        format!(r"^\s*{}(?P<name>.+?)\s*$", regex::escape(prefix))
    } else {
        format!(
            r"^\s*{}(?P<name>.+?){}",
            regex::escape(prefix),
            regex::escape(suffix)
        )
    };
    debug!(%pattern, "include_matcher: pattern built");

    let regex = Regex::new(&pattern).map_err(|_| invalid())?;
    Ok(IncludeMatcher { regex })
}

/// Extension of a file: everything from the first `.` of its base name
///
/// `show.html.erb` yields `.html.erb`, `main.scss` yields `.scss`.
pub fn file_extension(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let dot = name.find('.')?;
    let extension = &name[dot..];
    if extension.len() > 1 { Some(extension.to_string()) } else { None }
}

fn normalize_extension(extension: &str) -> String {
    let lower = extension.trim().to_lowercase();
    if lower.starts_with('.') { lower } else { format!(".{}", lower) }
}

/// Immutable table of include templates, built once at startup
#[derive(Debug, Clone)]
pub struct SyntaxRegistry {
    rules: BTreeMap<String, SyntaxRule>,
}

impl Default for SyntaxRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SyntaxRegistry {
    /// Registry holding only the built-in templates
    pub fn builtin() -> Self {
        let rules = BUILTIN_TEMPLATES
            .iter()
            .map(|(extension, template)| {
                let rule = SyntaxRule {
                    extension: (*extension).to_string(),
                    template: (*template).to_string(),
                };
                (rule.extension.clone(), rule)
            })
            .collect();
        Self { rules }
    }

    /// Built-in templates with additions and replacements applied on top
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Result<Self, PartialError> {
        debug!(count = overrides.len(), "SyntaxRegistry::with_overrides: called");
        let mut registry = Self::builtin();
        for (extension, template) in overrides {
            registry.insert(SyntaxRule::new(extension, template)?);
        }
        Ok(registry)
    }

    fn insert(&mut self, rule: SyntaxRule) {
        self.rules.insert(rule.extension.clone(), rule);
    }

    /// Rule for an extension.
    ///
    /// Compound extensions (`.html.erb`) fall back to their last component.
    pub fn rule_for(&self, extension: &str) -> Result<&SyntaxRule, PartialError> {
        debug!(%extension, "SyntaxRegistry::rule_for: called");
        let key = normalize_extension(extension);
        if let Some(rule) = self.rules.get(&key) {
            return Ok(rule);
        }

        if let Some(dot) = key.rfind('.')
            && dot > 0
            && let Some(rule) = self.rules.get(&key[dot..])
        {
            debug!(fallback = %rule.extension, "SyntaxRegistry::rule_for: matched last component");
            return Ok(rule);
        }

        Err(PartialError::UnsupportedFileType {
            extension: extension.to_string(),
        })
    }

    /// Include template for an extension
    pub fn template_for(&self, extension: &str) -> Result<&str, PartialError> {
        self.rule_for(extension).map(SyntaxRule::template)
    }

    /// Rule for the file at `path`, using its compound extension
    pub fn rule_for_path(&self, path: &Path) -> Result<(&SyntaxRule, String), PartialError> {
        let extension = file_extension(path).ok_or_else(|| PartialError::UnsupportedFileType {
            extension: path.display().to_string(),
        })?;
        let rule = self.rule_for(&extension)?;
        Ok((rule, extension))
    }

    /// All rules, ordered by extension
    pub fn rules(&self) -> impl Iterator<Item = &SyntaxRule> {
        self.rules.values()
    }
}
