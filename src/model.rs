//! Data model for parsed API documentation.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Visibility keyword of a documented class or function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "protected" => Ok(Visibility::Protected),
            "private" => Ok(Visibility::Private),
            other => Err(format!("unknown visibility: {}", other)),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A documented class (`@class`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Klass {
    pub name: String,
    pub visibility: Visibility,
    /// Functions in documentation order.
    pub functions: Vec<Function>,
    /// Prose left over after all markers were consumed.
    pub guide_markdown: String,
}

impl Klass {
    pub fn new(name: impl Into<String>) -> Self {
        Klass {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// A documented function, selector or event (`@method`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Function {
    pub name: String,
    pub visibility: Visibility,
    pub params: Vec<Parameter>,
    /// `@ujs`: the feature is an unobtrusive UI binding (a selector).
    pub ujs: bool,
    pub guide_markdown: String,
    /// Name of the owning class. Empty until the function is attached.
    pub klass: String,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Function {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A documented `@param`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub optional: bool,
    /// Only ever set for optional parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub types: Vec<String>,
    pub guide_markdown: String,
}
