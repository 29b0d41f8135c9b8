//! # Input Validation
//!
//! Shape checks on caller input, run before any transaction opens. The
//! validator is constructed by the caller and handed to the [`Journal`]
//! rather than living in a global.
//!
//! [`Journal`]: super::Journal

use std::collections::HashSet;

use uuid::Uuid;

use crate::model::{ElementPatch, Geometry, Skin};
use crate::ordering::Position;

use super::errors::{ServiceError, ServiceResult};

/// Length limits, counted in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationLimits {
    pub max_title_len: usize,
    pub max_description_len: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_title_len: 255,
            max_description_len: 500,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Validator {
    limits: ValidationLimits,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> ValidationLimits {
        self.limits
    }

    pub fn board_title(&self, title: &str) -> ServiceResult<()> {
        self.title("board title", title)
    }

    pub fn page_title(&self, title: &str) -> ServiceResult<()> {
        self.title("page title", title)
    }

    pub fn description(&self, description: &str) -> ServiceResult<()> {
        let len = description.chars().count();
        if len > self.limits.max_description_len {
            return Err(ServiceError::validation(format!(
                "description must be at most {} characters (got {})",
                self.limits.max_description_len, len
            )));
        }
        Ok(())
    }

    /// Parse a skin name. Unknown names are rejected.
    pub fn skin(&self, skin: &str) -> ServiceResult<Skin> {
        skin.parse::<Skin>().map_err(ServiceError::Validation)
    }

    pub fn order_idx(&self, order_idx: Option<Position>) -> ServiceResult<()> {
        match order_idx {
            Some(idx) if idx < 0 => Err(ServiceError::validation(format!(
                "order_idx must be >= 0 (got {})",
                idx
            ))),
            _ => Ok(()),
        }
    }

    pub fn geometry(&self, geometry: &Geometry) -> ServiceResult<()> {
        finite("x", geometry.x)?;
        finite("y", geometry.y)?;
        finite("rotation", geometry.rotation)?;
        positive("w", geometry.w)?;
        positive("h", geometry.h)
    }

    pub fn element_patch(&self, patch: &ElementPatch) -> ServiceResult<()> {
        if patch.is_empty() {
            return Err(ServiceError::validation("update must change at least one field"));
        }
        for (name, value) in [("x", patch.x), ("y", patch.y), ("rotation", patch.rotation)] {
            if let Some(value) = value {
                finite(name, value)?;
            }
        }
        if let Some(w) = patch.w {
            positive("w", w)?;
        }
        if let Some(h) = patch.h {
            positive("h", h)?;
        }
        Ok(())
    }

    /// A reorder batch: non-empty, every z >= 0, each element named once
    pub fn reorder(&self, assignments: &[(Uuid, Position)]) -> ServiceResult<()> {
        if assignments.is_empty() {
            return Err(ServiceError::validation("elements must not be empty"));
        }

        let mut seen = HashSet::with_capacity(assignments.len());
        for (id, z) in assignments {
            if *z < 0 {
                return Err(ServiceError::validation(format!("z must be >= 0 (got {} for {})", z, id)));
            }
            if !seen.insert(*id) {
                return Err(ServiceError::validation(format!("element {} listed more than once", id)));
            }
        }
        Ok(())
    }

    fn title(&self, what: &str, title: &str) -> ServiceResult<()> {
        if title.trim().is_empty() {
            return Err(ServiceError::validation(format!("{} is required", what)));
        }
        let len = title.chars().count();
        if len > self.limits.max_title_len {
            return Err(ServiceError::validation(format!(
                "{} must be at most {} characters (got {})",
                what, self.limits.max_title_len, len
            )));
        }
        Ok(())
    }
}

fn finite(name: &str, value: f64) -> ServiceResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ServiceError::validation(format!("{} must be a finite number", name)))
    }
}

fn positive(name: &str, value: f64) -> ServiceResult<()> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ServiceError::validation(format!("{} must be > 0 (got {})", name, value)))
    }
}
