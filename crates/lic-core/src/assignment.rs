//! # Assignment Targets
//!
//! A license instance may be bound to one consuming object. The set of
//! assignable kinds is closed, so the target is a tagged union rather than
//! a type name plus an id that has to be resolved at runtime. Whether a
//! target still exists is answered by an [`AssignmentDirectory`] supplied
//! by whoever owns those records.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The kinds of object a license can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentKind {
    /// A person in the contact directory.
    Contact,
    /// A physical device.
    Device,
    /// A virtual machine.
    VirtualMachine,
    /// A tenant (organisation).
    Tenant,
    /// A network service.
    Service,
}

impl AssignmentKind {
    /// Wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Device => "device",
            Self::VirtualMachine => "virtual_machine",
            Self::Tenant => "tenant",
            Self::Service => "service",
        }
    }
}

impl std::fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The object a license instance is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AssignedObject {
    /// Contact id.
    Contact(u64),
    /// Device id.
    Device(u64),
    /// Virtual machine id.
    VirtualMachine(u64),
    /// Tenant id.
    Tenant(u64),
    /// Service id.
    Service(u64),
}

impl AssignedObject {
    /// The kind of the target.
    pub fn kind(&self) -> AssignmentKind {
        match self {
            Self::Contact(_) => AssignmentKind::Contact,
            Self::Device(_) => AssignmentKind::Device,
            Self::VirtualMachine(_) => AssignmentKind::VirtualMachine,
            Self::Tenant(_) => AssignmentKind::Tenant,
            Self::Service(_) => AssignmentKind::Service,
        }
    }

    /// The target's id within its kind.
    pub fn id(&self) -> u64 {
        match self {
            Self::Contact(id)
            | Self::Device(id)
            | Self::VirtualMachine(id)
            | Self::Tenant(id)
            | Self::Service(id) => *id,
        }
    }
}

impl std::fmt::Display for AssignedObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}

/// Lookup capability for assignment targets held by another system.
pub trait AssignmentDirectory {
    /// Whether the target still exists.
    fn exists(&self, target: &AssignedObject) -> bool;
}

/// A directory that treats every target as present.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumePresent;

impl AssignmentDirectory for AssumePresent {
    fn exists(&self, _target: &AssignedObject) -> bool {
        true
    }
}

impl AssignmentDirectory for HashSet<AssignedObject> {
    fn exists(&self, target: &AssignedObject) -> bool {
        self.contains(target)
    }
}
