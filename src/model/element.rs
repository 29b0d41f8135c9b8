//! # Elements
//!
//! Z-stacked visual items on a page. The kind-specific payload is opaque to
//! the core: it is stored and returned verbatim.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ordering::Position;

/// Closed set of element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Sticker,
    Shape,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Sticker => "sticker",
            ElementKind::Shape => "shape",
        }
    }
}

impl FromStr for ElementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ElementKind::Text),
            "image" => Ok(ElementKind::Image),
            "sticker" => Ok(ElementKind::Sticker),
            "shape" => Ok(ElementKind::Shape),
            other => Err(format!(
                "kind must be one of text, image, sticker, shape (got '{}')",
                other
            )),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placement of an element on its page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    /// Width, always > 0
    pub w: f64,
    /// Height, always > 0
    pub h: f64,
    #[serde(default)]
    pub rotation: f64,
}

/// Everything needed to place a new element
#[derive(Debug, Clone)]
pub struct ElementDraft {
    pub kind: ElementKind,
    pub geometry: Geometry,
    pub payload: serde_json::Value,
}

/// Partial element update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElementPatch {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub w: Option<f64>,
    #[serde(default)]
    pub h: Option<f64>,
    #[serde(default)]
    pub rotation: Option<f64>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub locked: Option<bool>,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

impl ElementPatch {
    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.w.is_none()
            && self.h.is_none()
            && self.rotation.is_none()
            && self.visible.is_none()
            && self.locked.is_none()
            && self.payload.is_none()
    }
}

/// A visual element on a page
#[derive(Debug, Clone, Serialize)]
pub struct Element {
    pub id: Uuid,

    /// Owning page. Never changes after creation.
    pub page_id: Uuid,

    pub kind: ElementKind,

    #[serde(flatten)]
    pub geometry: Geometry,

    /// Stacking rank among the page's elements
    pub z: Position,

    pub visible: bool,

    pub locked: bool,

    pub payload: serde_json::Value,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Element {
    pub fn new(page_id: Uuid, draft: ElementDraft, z: Position) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            page_id,
            kind: draft.kind,
            geometry: draft.geometry,
            z,
            visible: true,
            locked: false,
            payload: draft.payload,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Apply a partial update. Does not touch `z` or ownership.
    pub fn apply(&mut self, patch: ElementPatch) {
        if let Some(x) = patch.x {
            self.geometry.x = x;
        }
        if let Some(y) = patch.y {
            self.geometry.y = y;
        }
        if let Some(w) = patch.w {
            self.geometry.w = w;
        }
        if let Some(h) = patch.h {
            self.geometry.h = h;
        }
        if let Some(rotation) = patch.rotation {
            self.geometry.rotation = rotation;
        }
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
        if let Some(locked) = patch.locked {
            self.locked = locked;
        }
        if let Some(payload) = patch.payload {
            self.payload = payload;
        }
        self.touch();
    }
}
