//! Exemption resolution for the doc-comment requirement.
//!
//! A declaration is exempt when any of these hold:
//!
//! - its effective access (minimum over itself and all ancestors) is below
//!   `public`
//! - its name, or any enclosing declaration's name, starts with `_`
//! - it is a deinitializer
//! - it carries an SPI attribute and the policy is [`SpiPolicy::Exempt`]
//!
//! Exemption only tightens going down the tree, so the resolver is a
//! top-down fold: [`ExemptionResolver::enter`] combines the enclosing
//! [`Scope`] with the node's own criteria in O(1).

use doc_lint_core::utils::has_attribute;
use doc_lint_core::{access, AccessLevel, Decl, DeclId, DeclKind, DeclTree};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute names that mark a declaration as SPI.
pub const SPI_ATTRIBUTES: &[&str] = &["_spi", "spi"];

/// How SPI-attributed declarations are treated.
///
/// An SPI declaration is still public to the importers it is meant for, so
/// by default it is diagnosed like any other public API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpiPolicy {
    /// SPI attributes have no effect on the check.
    #[default]
    Diagnose,
    /// SPI declarations and everything nested in them are exempt.
    Exempt,
}

/// Why a declaration is exempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExemptionReason {
    /// Effective access is below `public`.
    RestrictedAccess(AccessLevel),
    /// The name (or the extended type's name) starts with an underscore.
    Underscored,
    /// Deinitializers have no referenceable name.
    Deinitializer,
    /// SPI attribute under [`SpiPolicy::Exempt`].
    Spi,
    /// An enclosing declaration is exempt.
    Inherited,
}

impl fmt::Display for ExemptionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RestrictedAccess(level) => write!(f, "effective access is {level}"),
            Self::Underscored => f.write_str("underscored name"),
            Self::Deinitializer => f.write_str("deinitializer"),
            Self::Spi => f.write_str("SPI attribute"),
            Self::Inherited => f.write_str("enclosing declaration is exempt"),
        }
    }
}

/// Accumulated state carried from a declaration to its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    /// Minimum access over the declaration and its ancestors.
    pub access: AccessLevel,
    /// Whether the declaration or any ancestor is exempt.
    pub exempt: bool,
}

impl Scope {
    /// File scope: nothing restricts visibility yet.
    pub const FILE: Self = Self {
        access: AccessLevel::Open,
        exempt: false,
    };
}

/// Outcome of resolving one declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Scope to pass to the declaration's members.
    pub scope: Scope,
    /// Why the declaration is exempt, `None` if it is not.
    pub reason: Option<ExemptionReason>,
}

impl Resolution {
    /// Returns true if the declaration is exempt.
    #[must_use]
    pub fn is_exempt(&self) -> bool {
        self.reason.is_some()
    }
}

/// Decides whether declarations are exempt from the doc-comment requirement.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExemptionResolver {
    spi: SpiPolicy,
}

impl ExemptionResolver {
    /// Creates a resolver with the given SPI policy.
    #[must_use]
    pub fn new(spi: SpiPolicy) -> Self {
        Self { spi }
    }

    /// Returns the SPI policy.
    #[must_use]
    pub fn spi_policy(&self) -> SpiPolicy {
        self.spi
    }

    /// Resolves `id` given the scope of its parent.
    #[must_use]
    pub fn enter(&self, tree: &DeclTree, id: DeclId, outer: Scope) -> Resolution {
        let decl = &tree[id];
        let access = outer.access.min(access::intrinsic_access(tree, id));

        let reason = if outer.exempt {
            Some(ExemptionReason::Inherited)
        } else if is_underscored(decl) {
            Some(ExemptionReason::Underscored)
        } else if decl.kind == DeclKind::Deinitializer {
            Some(ExemptionReason::Deinitializer)
        } else if !access.is_public_api() {
            Some(ExemptionReason::RestrictedAccess(access))
        } else if self.spi == SpiPolicy::Exempt && has_attribute(&decl.attributes, SPI_ATTRIBUTES) {
            Some(ExemptionReason::Spi)
        } else {
            None
        };

        Resolution {
            scope: Scope {
                access,
                exempt: reason.is_some(),
            },
            reason,
        }
    }

    /// Resolves `id` from file scope by folding over its ancestor path.
    #[must_use]
    pub fn resolve(&self, tree: &DeclTree, id: DeclId) -> Resolution {
        let mut path: Vec<DeclId> = tree.ancestors(id).collect();
        path.reverse();
        path.push(id);

        let start = Resolution {
            scope: Scope::FILE,
            reason: None,
        };
        path.into_iter()
            .fold(start, |outer, node| self.enter(tree, node, outer.scope))
    }

    /// Returns true if `id` is exempt from the doc-comment requirement.
    #[must_use]
    pub fn is_exempt(&self, tree: &DeclTree, id: DeclId) -> bool {
        self.resolve(tree, id).is_exempt()
    }
}

/// An extension counts as underscored when any segment of the extended
/// type's name is.
fn is_underscored(decl: &Decl) -> bool {
    decl.is_underscored()
        || decl
            .extended_type
            .as_ref()
            .is_some_and(|ty| ty.name.split('.').any(|segment| segment.starts_with('_')))
}
