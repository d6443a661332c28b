//! Declarative behaviour scripts
//!
//! A small script host good enough to drive scenes without an embedded
//! interpreter. Classes are declared in RON, each with the capability tags it
//! derives from and the actions its `start` and `update` hooks run:
//!
//! ```ron
//! (
//!     classes: {
//!         "Spinner": (
//!             extends: ["Component"],
//!             start: [Log("spinning up")],
//!             update: [Rotate(0.0, 90.0, 0.0)],
//!         ),
//!     },
//! )
//! ```
//!
//! `Translate` and `Rotate` are rates per second and scale with the frame's
//! delta time; `SetPosition` and `SetScale` are absolute.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::bridge::ScriptComponent;
use super::host::{ScriptError, ScriptObject, START_HOOK, UPDATE_HOOK};
use crate::config::{Config, ConfigFormat};
use crate::foundation::logging::SCRIPT_TARGET;
use crate::foundation::math::Vec3;
use crate::scene::{tags, ComponentContext};

/// One step of a hook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Move by (x, y, z) units per second
    Translate(f32, f32, f32),
    /// Rotate by (x, y, z) degrees per second
    Rotate(f32, f32, f32),
    /// Place at an absolute local position
    SetPosition(f32, f32, f32),
    /// Set an absolute local scale
    SetScale(f32, f32, f32),
    /// Write a message to the script log
    Log(String),
    /// Raise a script error
    Fail(String),
}

/// A declared behaviour class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassDef {
    /// Capability tags (base classes) the class derives from
    pub extends: Vec<String>,
    /// Actions of the `start` hook; empty means no hook
    pub start: Vec<Action>,
    /// Actions of the `update` hook; empty means no hook
    pub update: Vec<Action>,
}

impl ClassDef {
    fn hook(&self, hook: &str) -> Option<&[Action]> {
        let actions = match hook {
            START_HOOK => &self.start,
            UPDATE_HOOK => &self.update,
            _ => return None,
        };
        (!actions.is_empty()).then_some(actions.as_slice())
    }
}

/// Set of behaviour classes loaded from a script file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviourLibrary {
    /// Classes by name
    pub classes: BTreeMap<String, ClassDef>,
}

impl Config for BehaviourLibrary {}

impl BehaviourLibrary {
    /// Empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a library from RON source
    pub fn from_ron_str(source: &str) -> Result<Self, ScriptError> {
        Self::from_str_as(source, ConfigFormat::Ron).map_err(|e| ScriptError::Load(e.to_string()))
    }

    /// Load a library from a `.ron` or `.toml` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let library = Self::load_from_file(path).map_err(|e| ScriptError::Load(format!("{}: {}", path.display(), e)))?;
        log::info!(target: SCRIPT_TARGET, "Loaded {} behaviour classes from {}", library.classes.len(), path.display());
        Ok(library)
    }

    /// Builder pattern: Declare a class
    pub fn with_class(mut self, name: impl Into<String>, class: ClassDef) -> Self {
        self.classes.insert(name.into(), class);
        self
    }

    /// Whether a class is declared
    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    /// Create an instance of a class
    pub fn instantiate(&self, class: &str) -> Result<Behaviour, ScriptError> {
        let def = self
            .classes
            .get(class)
            .ok_or_else(|| ScriptError::Load(format!("unknown behaviour class '{}'", class)))?;
        Ok(Behaviour {
            class: class.to_string(),
            def: def.clone(),
        })
    }

    /// Create an instance wrapped in a bridge, ready to attach
    pub fn instantiate_component(&self, class: &str) -> Result<ScriptComponent, ScriptError> {
        self.instantiate(class).map(ScriptComponent::new)
    }
}

/// Instance of a behaviour class
#[derive(Debug, Clone)]
pub struct Behaviour {
    class: String,
    def: ClassDef,
}

impl Behaviour {
    fn run(&self, action: &Action, ctx: &mut ComponentContext<'_>) -> Result<(), ScriptError> {
        let dt = ctx.delta_time();
        let transform = ctx.transform_mut();
        match action {
            Action::Translate(x, y, z) => transform.translate(Vec3::new(*x, *y, *z) * dt),
            Action::Rotate(x, y, z) => transform.rotate(Vec3::new(*x, *y, *z) * dt),
            Action::SetPosition(x, y, z) => transform.set_local_position(Vec3::new(*x, *y, *z)),
            Action::SetScale(x, y, z) => transform.set_local_scale(Vec3::new(*x, *y, *z)),
            Action::Log(message) => {
                log::info!(target: SCRIPT_TARGET, "[{} on {}] {}", self.class, ctx.owner(), message);
            }
            Action::Fail(message) => {
                return Err(ScriptError::Runtime {
                    class: self.class.clone(),
                    message: message.clone(),
                });
            }
        }
        Ok(())
    }
}

impl ScriptObject for Behaviour {
    fn class_name(&self) -> &str {
        &self.class
    }

    fn has_hook(&self, hook: &str) -> bool {
        self.def.hook(hook).is_some()
    }

    fn call_hook(&mut self, hook: &str, ctx: &mut ComponentContext<'_>) -> Result<(), ScriptError> {
        let actions = self.def.hook(hook).ok_or_else(|| ScriptError::MissingHook {
            class: self.class.clone(),
            hook: hook.to_string(),
        })?;
        for action in actions {
            self.run(action, ctx)?;
        }
        Ok(())
    }

    fn is_instance_of(&self, tag: &str) -> bool {
        tag == tags::COMPONENT || tag == self.class || self.def.extends.iter().any(|base| base == tag)
    }
}
