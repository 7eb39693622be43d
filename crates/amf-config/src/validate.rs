//! Configuration validation utilities.
//!
//! Detects structural problems in an assembled configuration:
//! - Views and roles referencing missing color spaces
//! - Display color spaces exposed without any view
//! - Shared views referencing missing view transforms
//! - Duplicate names, named transforms with no transform

use crate::config::Config;
use crate::display::USE_DISPLAY_NAME;
use std::collections::HashSet;

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational message.
    Info,
    /// Warning - config works but may have issues.
    Warning,
    /// Error - config has problems that may cause failures.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A validation issue found in the config.
#[derive(Debug, Clone)]
pub struct Issue {
    /// Severity level.
    pub severity: Severity,
    /// Issue category.
    pub category: IssueCategory,
    /// Human-readable message.
    pub message: String,
    /// Related element (color space name, role, etc.).
    pub context: Option<String>,
}

/// Categories of validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCategory {
    /// Missing color space reference.
    MissingColorSpace,
    /// Missing role definition.
    MissingRole,
    /// Missing or incomplete display/view.
    MissingDisplay,
    /// Missing view transform.
    MissingViewTransform,
    /// Invalid transform configuration.
    InvalidTransform,
    /// Duplicate definition.
    Duplicate,
}

/// Validates a config and returns all issues found.
pub fn check(config: &Config) -> Vec<Issue> {
    let mut issues = Vec::new();

    check_roles(config, &mut issues);
    check_displays(config, &mut issues);
    check_colorspaces(config, &mut issues);
    check_named_transforms(config, &mut issues);

    issues
}

fn check_roles(config: &Config, issues: &mut Vec<Issue>) {
    for (role, cs_name) in config.roles().iter() {
        if config.colorspace(cs_name).is_none() {
            issues.push(Issue {
                severity: Severity::Error,
                category: IssueCategory::MissingColorSpace,
                message: format!(
                    "role '{role}' references non-existent color space '{cs_name}'"
                ),
                context: Some(role.to_string()),
            });
        }
    }
}

fn check_displays(config: &Config, issues: &mut Vec<Issue>) {
    let displays = config.displays();

    if displays.displays().is_empty() {
        issues.push(Issue {
            severity: Severity::Warning,
            category: IssueCategory::MissingDisplay,
            message: "no displays defined".to_string(),
            context: None,
        });
    }

    for display in displays.displays() {
        if display.views().is_empty() && display.shared_views().is_empty() {
            issues.push(Issue {
                severity: Severity::Error,
                category: IssueCategory::MissingDisplay,
                message: format!("display '{}' has no views", display.name()),
                context: Some(display.name().to_string()),
            });
        }

        for view in display.views() {
            if config.colorspace(view.colorspace()).is_none() {
                issues.push(Issue {
                    severity: Severity::Error,
                    category: IssueCategory::MissingColorSpace,
                    message: format!(
                        "view '{}' in display '{}' references non-existent color space '{}'",
                        view.name(),
                        display.name(),
                        view.colorspace()
                    ),
                    context: Some(format!("{}:{}", display.name(), view.name())),
                });
            }
        }

        for shared in display.shared_views() {
            if displays.shared_view(shared).is_none() {
                issues.push(Issue {
                    severity: Severity::Error,
                    category: IssueCategory::MissingDisplay,
                    message: format!(
                        "display '{}' references undefined shared view '{shared}'",
                        display.name()
                    ),
                    context: Some(display.name().to_string()),
                });
            }
        }
    }

    for shared in displays.shared_views() {
        if !shared.view_transform.is_empty()
            && displays.view_transform(&shared.view_transform).is_none()
        {
            issues.push(Issue {
                severity: Severity::Error,
                category: IssueCategory::MissingViewTransform,
                message: format!(
                    "shared view '{}' references non-existent view transform '{}'",
                    shared.name, shared.view_transform
                ),
                context: Some(shared.name.clone()),
            });
        }
        if shared.colorspace != USE_DISPLAY_NAME
            && config.colorspace(&shared.colorspace).is_none()
        {
            issues.push(Issue {
                severity: Severity::Error,
                category: IssueCategory::MissingColorSpace,
                message: format!(
                    "shared view '{}' references non-existent color space '{}'",
                    shared.name, shared.colorspace
                ),
                context: Some(shared.name.clone()),
            });
        }
    }
}

fn check_colorspaces(config: &Config, issues: &mut Vec<Issue>) {
    let mut names: HashSet<&str> = HashSet::new();

    for cs in config.colorspaces() {
        if !names.insert(cs.name()) {
            issues.push(Issue {
                severity: Severity::Error,
                category: IssueCategory::Duplicate,
                message: format!("duplicate color space name: '{}'", cs.name()),
                context: Some(cs.name().to_string()),
            });
        }

        if cs.is_data() && (cs.to_reference().is_some() || cs.from_reference().is_some()) {
            issues.push(Issue {
                severity: Severity::Warning,
                category: IssueCategory::InvalidTransform,
                message: format!(
                    "data color space '{}' has transforms defined (will be ignored)",
                    cs.name()
                ),
                context: Some(cs.name().to_string()),
            });
        }
    }
}

fn check_named_transforms(config: &Config, issues: &mut Vec<Issue>) {
    for nt in config.named_transforms() {
        if nt.forward.is_none() && nt.inverse.is_none() {
            issues.push(Issue {
                severity: Severity::Error,
                category: IssueCategory::InvalidTransform,
                message: format!("named transform '{}' has no transform", nt.name),
                context: Some(nt.name.clone()),
            });
        }
    }
}

/// Returns true if there are any errors.
pub fn has_errors(issues: &[Issue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

/// Returns true if there are any warnings or errors.
pub fn has_warnings(issues: &[Issue]) -> bool {
    issues
        .iter()
        .any(|i| matches!(i.severity, Severity::Warning | Severity::Error))
}
