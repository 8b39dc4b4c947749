//! Project-wide architecture classification from aggregate declaration counts.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How strongly one side must outnumber the other before the project is
/// labelled by it.
pub const DOMINANCE_RATIO: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ArchitectureStyle {
    #[serde(rename = "object-oriented")]
    ObjectOriented,
    #[serde(rename = "functional/procedural")]
    FunctionalProcedural,
    #[serde(rename = "mixed")]
    Mixed,
}

impl ArchitectureStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchitectureStyle::ObjectOriented => "object-oriented",
            ArchitectureStyle::FunctionalProcedural => "functional/procedural",
            ArchitectureStyle::Mixed => "mixed",
        }
    }

    /// Classifies by comparing class and function totals against
    /// [`DOMINANCE_RATIO`]. Empty projects are mixed.
    pub fn classify(classes: usize, functions: usize) -> Self {
        let (c, f) = (classes as f64, functions as f64);
        if classes > 0 && c >= DOMINANCE_RATIO * f {
            ArchitectureStyle::ObjectOriented
        } else if functions > 0 && f >= DOMINANCE_RATIO * c {
            ArchitectureStyle::FunctionalProcedural
        } else {
            ArchitectureStyle::Mixed
        }
    }
}

impl fmt::Display for ArchitectureStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Design patterns recognised from class names across the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DesignPattern {
    Repository,
    ServiceLayer,
    Factory,
    Builder,
    Controller,
    Handler,
}

const PATTERN_MARKERS: &[(DesignPattern, &str)] = &[
    (DesignPattern::Repository, "Repository"),
    (DesignPattern::ServiceLayer, "Service"),
    (DesignPattern::Factory, "Factory"),
    (DesignPattern::Builder, "Builder"),
    (DesignPattern::Controller, "Controller"),
    (DesignPattern::Handler, "Handler"),
];

impl DesignPattern {
    pub fn display_name(&self) -> &'static str {
        match self {
            DesignPattern::Repository => "Repository Pattern",
            DesignPattern::ServiceLayer => "Service Layer",
            DesignPattern::Factory => "Factory Pattern",
            DesignPattern::Builder => "Builder Pattern",
            DesignPattern::Controller => "MVC/Controller Pattern",
            DesignPattern::Handler => "Handler Pattern",
        }
    }

    pub fn detect<'a, I>(class_names: I) -> BTreeSet<DesignPattern>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut patterns = BTreeSet::new();
        for name in class_names {
            for (pattern, marker) in PATTERN_MARKERS {
                if name.contains(marker) {
                    patterns.insert(*pattern);
                }
            }
        }
        patterns
    }
}
