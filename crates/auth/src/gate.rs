//! Declarative show/hide gate for conditional content.
//!
//! `Gate::can` shows content when the requirement passes; `Gate::cannot` is
//! its inverse. With no requirement at all, `can` hides and `cannot` shows.

use crate::{PermissionScope, Requirement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    Can,
    Cannot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    requirement: Option<Requirement>,
    polarity: Polarity,
}

impl Gate {
    pub fn can(requirement: Option<Requirement>) -> Self {
        Self {
            requirement,
            polarity: Polarity::Can,
        }
    }

    pub fn cannot(requirement: Option<Requirement>) -> Self {
        Self {
            requirement,
            polarity: Polarity::Cannot,
        }
    }

    pub fn is_visible(&self, scope: &PermissionScope) -> bool {
        let passed = self
            .requirement
            .as_ref()
            .map(|r| r.evaluate(scope.user(), scope.registry()));

        match (self.polarity, passed) {
            (Polarity::Can, Some(passed)) => passed,
            (Polarity::Cannot, Some(passed)) => !passed,
            (Polarity::Can, None) => false,
            (Polarity::Cannot, None) => true,
        }
    }

    /// Produce `content` when visible, `fallback` otherwise. Only one runs.
    pub fn render<T>(
        &self,
        scope: &PermissionScope,
        content: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T {
        if self.is_visible(scope) { content() } else { fallback() }
    }
}
