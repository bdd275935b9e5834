//! Flag bitsets and id newtypes shared across the workspace.
//!
//! The flag layouts follow the host compiler's NodeFlags, ModifierFlags,
//! SymbolFlags, TypeFlags and ObjectFlags, trimmed to the bits the
//! reflection pass actually inspects.

bitflags::bitflags! {
    /// Node flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        const NONE        = 0;
        /// The node was created by a transform, not parsed from source.
        const SYNTHESIZED = 1 << 0;
    }
}

bitflags::bitflags! {
    /// Modifier flags for declarations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u32 {
        const NONE      = 0;
        const PUBLIC    = 1 << 0;
        const PRIVATE   = 1 << 1;
        const PROTECTED = 1 << 2;
        const READONLY  = 1 << 3;
        const STATIC    = 1 << 4;

        const ACCESSIBILITY = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
        /// A constructor parameter carrying any of these also declares a property.
        const PARAMETER_PROPERTY = Self::ACCESSIBILITY.bits() | Self::READONLY.bits();
    }
}

bitflags::bitflags! {
    /// Symbol flags assigned by the host binder.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SymbolFlags: u32 {
        const NONE      = 0;
        const CLASS     = 1 << 0;
        const INTERFACE = 1 << 1;
        const FUNCTION  = 1 << 2;
        const VARIABLE  = 1 << 3;
        /// An import/re-export binding; resolves to another symbol.
        const ALIAS     = 1 << 4;
    }
}

bitflags::bitflags! {
    /// Type flags used by the host type checker.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u32 {
        const NONE            = 0;
        const ANY             = 1 << 0;
        const UNKNOWN         = 1 << 1;
        const STRING          = 1 << 2;
        const NUMBER          = 1 << 3;
        const BOOLEAN         = 1 << 4;
        const STRING_LITERAL  = 1 << 5;
        const NUMBER_LITERAL  = 1 << 6;
        const BOOLEAN_LITERAL = 1 << 7;
        const ES_SYMBOL       = 1 << 8;
        const VOID            = 1 << 9;
        const UNDEFINED       = 1 << 10;
        const NULL            = 1 << 11;
        const NEVER           = 1 << 12;
        const OBJECT          = 1 << 13;
        const UNION           = 1 << 14;
        const INTERSECTION    = 1 << 15;

        const UNION_OR_INTERSECTION = Self::UNION.bits() | Self::INTERSECTION.bits();
        const BOOLEAN_LIKE = Self::BOOLEAN.bits() | Self::BOOLEAN_LITERAL.bits();
    }
}

bitflags::bitflags! {
    /// Object type flags, refining `TypeFlags::OBJECT`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ObjectFlags: u32 {
        const NONE      = 0;
        const CLASS     = 1 << 0;
        const INTERFACE = 1 << 1;
        /// A generic instantiation of a target type.
        const REFERENCE = 1 << 2;
        const TUPLE     = 1 << 3;
        const ANONYMOUS = 1 << 4;

        const CLASS_OR_INTERFACE = Self::CLASS.bits() | Self::INTERFACE.bits();
    }
}

/// Unique id of an AST node, assigned by the host during binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const INVALID: NodeId = NodeId(u32::MAX);

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// Unique id of a binder symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub const INVALID: SymbolId = SymbolId(u32::MAX);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Unique id of a checker type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
