//! Guild role domain models and the classification rule table.
//!
//! Roles fetched from Discord are projected to a reduced `Role` shape and partitioned by
//! `RoleRules` into named categories. The restricted matcher runs first and removes roles
//! from every assignable category; each category rule is then evaluated independently, so
//! a role whose name matches several rules is listed under each of them.

use regex::{Regex, RegexBuilder};
use serenity::all::RoleId;
use std::collections::BTreeMap;

use crate::{model::role::RoleDto, server::error::config::ConfigError};

/// Name of the bucket holding roles members may never change.
pub const RESTRICTED_CATEGORY: &str = "restricted";

/// Name of the bucket holding every role, unfiltered.
pub const ALL_CATEGORY: &str = "all";

/// Roles matching this pattern anywhere in their name are restricted.
const RESTRICTED_PATTERN: &str =
    r"(server|verified|@everyone|umass cics|cics role bot|admin|professor|----)";

/// Assignable categories in display order, with their start-of-name patterns.
const DEFAULT_CATEGORY_RULES: &[(&str, &str)] = &[
    ("identity", r"he/him|she/her|they/them|ze/hir"),
    ("graduation", r"alumni|graduate student|class of [0-9]{4}"),
    (
        "residence",
        r"zoomer|central|ohill|northeast|southwest|honors|sylvan|off-campus|rap data science|rap ethics society",
    ),
    ("cs_courses", r"cs|cics|info"),
    ("math_courses", r"math|stat"),
    (
        "interdisciplinary_courses",
        r"business|biology|economics|engineering|linguistics|psychology|informatics|physics",
    ),
    ("hobbies", r"projects|hardware|video games|finance|music|travel"),
    ("miscellaneous", r"snooper|daily coding problems|community events"),
];

/// Discord guild role reduced to the fields the dashboard needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    /// RGB color, display only.
    pub color: u32,
    /// Position in the guild's role hierarchy (higher = more senior).
    pub priority: u16,
}

impl Role {
    /// Projects an upstream Serenity role, discarding every other field.
    pub fn from_serenity(role: &serenity::all::Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
            color: role.colour.0,
            priority: role.position,
        }
    }

    pub fn into_dto(self) -> RoleDto {
        RoleDto {
            id: self.id.get(),
            name: self.name,
            color: self.color,
            priority: self.priority,
        }
    }
}

/// A single row of the classification table.
#[derive(Debug, Clone)]
pub struct RoleRule {
    category: String,
    pattern: Regex,
}

impl RoleRule {
    /// Builds a rule whose pattern must match at the start of a role name, ignoring case.
    ///
    /// # Arguments
    /// - `category` - Category name the rule fills
    /// - `pattern` - Regex alternatives, without anchoring
    ///
    /// # Returns
    /// - `Ok(RoleRule)` - Compiled rule
    /// - `Err(ConfigError::ReservedCategory)` - Category is `restricted` or `all`
    /// - `Err(ConfigError::InvalidRolePattern)` - Pattern failed to compile
    pub fn new(category: &str, pattern: &str) -> Result<Self, ConfigError> {
        if category == RESTRICTED_CATEGORY || category == ALL_CATEGORY {
            return Err(ConfigError::ReservedCategory(category.to_string()));
        }

        Ok(Self {
            category: category.to_string(),
            pattern: compile(category, &format!("^(?:{})", pattern))?,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}

/// Ordered classification table: one restricted matcher plus assignable category rules.
#[derive(Debug, Clone)]
pub struct RoleRules {
    restricted: Regex,
    rules: Vec<RoleRule>,
}

impl RoleRules {
    /// Creates a rule table from a restricted pattern and ordered category rules.
    ///
    /// The restricted pattern is unanchored and case-insensitive.
    pub fn new(restricted_pattern: &str, rules: Vec<RoleRule>) -> Result<Self, ConfigError> {
        Ok(Self {
            restricted: compile(RESTRICTED_CATEGORY, restricted_pattern)?,
            rules,
        })
    }

    /// Builds the standard table for the CICS guild.
    pub fn standard() -> Result<Self, ConfigError> {
        let rules = DEFAULT_CATEGORY_RULES
            .iter()
            .map(|(category, pattern)| RoleRule::new(category, pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(RESTRICTED_PATTERN, rules)
    }

    pub fn rules(&self) -> &[RoleRule] {
        &self.rules
    }

    pub fn is_restricted(&self, name: &str) -> bool {
        self.restricted.is_match(name)
    }

    /// Partitions roles into the restricted bucket and every matching category.
    ///
    /// Source order is preserved within every bucket. The role list is neither
    /// deduplicated nor sorted.
    ///
    /// # Arguments
    /// - `roles` - Roles in upstream order
    ///
    /// # Returns
    /// - `Classification` - Category buckets, plus `restricted` and `all`
    pub fn classify(&self, roles: Vec<Role>) -> Classification {
        let (restricted, assignable): (Vec<&Role>, Vec<&Role>) = roles
            .iter()
            .partition(|role| self.is_restricted(&role.name));

        let categories = self
            .rules
            .iter()
            .map(|rule| {
                let matching = assignable
                    .iter()
                    .filter(|role| rule.matches(&role.name))
                    .map(|role| (*role).clone())
                    .collect();

                (rule.category.clone(), matching)
            })
            .collect();

        let restricted = restricted.into_iter().cloned().collect();

        Classification {
            categories,
            restricted,
            all: roles,
        }
    }
}

fn compile(category: &str, pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ConfigError::InvalidRolePattern {
            category: category.to_string(),
            source,
        })
}

/// Guild roles partitioned by the rule table.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Assignable categories in rule-table order.
    pub categories: Vec<(String, Vec<Role>)>,
    pub restricted: Vec<Role>,
    pub all: Vec<Role>,
}

impl Classification {
    /// Looks up any bucket by name, including `restricted` and `all`.
    #[cfg(test)]
    pub fn get(&self, category: &str) -> Option<&[Role]> {
        match category {
            RESTRICTED_CATEGORY => Some(&self.restricted),
            ALL_CATEGORY => Some(&self.all),
            _ => self
                .categories
                .iter()
                .find(|(name, _)| name == category)
                .map(|(_, roles)| roles.as_slice()),
        }
    }

    pub fn is_restricted(&self, role_id: RoleId) -> bool {
        self.restricted.iter().any(|role| role.id == role_id)
    }

    /// Converts into the category name to role list mapping sent to the dashboard.
    pub fn into_dto(self) -> BTreeMap<String, Vec<RoleDto>> {
        let into_dtos = |roles: Vec<Role>| roles.into_iter().map(Role::into_dto).collect();

        let mut dto: BTreeMap<String, Vec<RoleDto>> = self
            .categories
            .into_iter()
            .map(|(name, roles)| (name, into_dtos(roles)))
            .collect();

        dto.insert(RESTRICTED_CATEGORY.to_string(), into_dtos(self.restricted));
        dto.insert(ALL_CATEGORY.to_string(), into_dtos(self.all));

        dto
    }
}
