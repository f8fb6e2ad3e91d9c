//! Fix template matching
//!
//! Free-text issue descriptions are matched against an ordered rule list.
//! The first rule whose predicate holds selects the template; order decides
//! precedence when an issue mentions several things at once.

use tracing::{debug, warn};

use crate::store::FixtureStore;

/// Bicep template resizing an overloaded virtual machine
pub const VM_RESIZE_TEMPLATE: &str = "vm_resize.bicep";

/// CLI script scaling up a saturated SQL database
pub const SQL_SCALE_TEMPLATE: &str = "sql_scale.sh";

/// Returned when no rule matches or the matched template is missing
pub const NO_TEMPLATE_MESSAGE: &str =
    "No specific fix template found for this issue. Please investigate manually.";

/// Normalized inputs for rule predicates.
///
/// Both strings are lowercased; the resource type additionally has spaces
/// removed so "Virtual Machine" and "virtualMachines" compare alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixQuery {
    pub issue: String,
    pub resource: String,
}

impl FixQuery {
    pub fn new(issue_type: &str, resource_type: &str) -> Self {
        Self {
            issue: issue_type.to_lowercase(),
            resource: resource_type.to_lowercase().replace(' ', ""),
        }
    }
}

pub fn is_cpu_issue(query: &FixQuery) -> bool {
    query.issue.contains("cpu")
}

pub fn is_vm_resource(query: &FixQuery) -> bool {
    query.resource.contains("vm") || query.resource.contains("virtualmachine")
}

pub fn is_dtu_issue(query: &FixQuery) -> bool {
    query.issue.contains("dtu")
}

pub fn is_sql_issue(query: &FixQuery) -> bool {
    query.issue.contains("sql")
}

pub fn is_database_resource(query: &FixQuery) -> bool {
    query.resource.contains("database")
}

/// CPU pressure on a virtual machine
pub fn is_vm_cpu_issue(query: &FixQuery) -> bool {
    is_cpu_issue(query) && is_vm_resource(query)
}

/// DTU or SQL trouble, or anything on a database resource
pub fn is_sql_capacity_issue(query: &FixQuery) -> bool {
    is_dtu_issue(query) || is_sql_issue(query) || is_database_resource(query)
}

/// A predicate paired with the template it selects
#[derive(Clone, Copy)]
pub struct FixRule {
    pub name: &'static str,
    pub matches: fn(&FixQuery) -> bool,
    pub template: &'static str,
}

/// Rules in evaluation order
pub const FIX_RULES: &[FixRule] = &[
    FixRule {
        name: "vm_cpu",
        matches: is_vm_cpu_issue,
        template: VM_RESIZE_TEMPLATE,
    },
    FixRule {
        name: "sql_capacity",
        matches: is_sql_capacity_issue,
        template: SQL_SCALE_TEMPLATE,
    },
];

/// First rule in [`FIX_RULES`] matching the query
pub fn match_rule(query: &FixQuery) -> Option<&'static FixRule> {
    FIX_RULES.iter().find(|rule| (rule.matches)(query))
}

/// Outcome of fix generation; both variants are valid answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixText {
    Template {
        rule: &'static str,
        template: &'static str,
        content: String,
    },
    NoTemplate,
}

impl FixText {
    pub fn as_str(&self) -> &str {
        match self {
            FixText::Template { content, .. } => content,
            FixText::NoTemplate => NO_TEMPLATE_MESSAGE,
        }
    }

    pub fn is_template(&self) -> bool {
        matches!(self, FixText::Template { .. })
    }
}

impl std::fmt::Display for FixText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn generate_fix(store: &FixtureStore, issue_type: &str, resource_type: &str) -> FixText {
    let query = FixQuery::new(issue_type, resource_type);

    let Some(rule) = match_rule(&query) else {
        debug!(issue = %query.issue, resource = %query.resource, "No fix rule matched");
        return FixText::NoTemplate;
    };

    match store.template(rule.template) {
        Some(content) => FixText::Template {
            rule: rule.name,
            template: rule.template,
            content,
        },
        None => {
            warn!(rule = rule.name, template = rule.template, "Fix rule matched but template is missing");
            FixText::NoTemplate
        }
    }
}
