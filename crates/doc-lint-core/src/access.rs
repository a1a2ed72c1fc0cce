//! Access-level evaluation.
//!
//! Intrinsic access comes from a declaration's own modifier, or from the
//! kind-specific inheritance rules when the modifier is omitted. Effective
//! access is the minimum over the declaration and all of its ancestors.

use crate::decl::{AccessLevel, Decl, DeclId, DeclKind, DeclTree};

/// Resolved context of a member declared inside an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionContext<'a> {
    /// Name of the extended type as written.
    pub type_name: &'a str,
    /// Access of the extended type.
    pub access: AccessLevel,
}

/// Returns the intrinsic access of a declaration.
///
/// Enum cases and unannotated protocol members inherit the enclosing type's
/// level, capped at `public`. An extension reports the access of the type it
/// extends; any modifier written on the extension itself is ignored.
#[must_use]
pub fn intrinsic_access(tree: &DeclTree, id: DeclId) -> AccessLevel {
    let decl = tree.get(id);
    if decl.kind == DeclKind::Extension {
        return extended_type_access(tree, decl);
    }
    if let Some(access) = decl.access {
        return access;
    }

    let Some(parent) = decl.parent() else {
        return AccessLevel::Internal;
    };
    let inherits = match tree.get(parent).kind {
        DeclKind::Enum => decl.kind == DeclKind::EnumCase,
        DeclKind::Protocol => inherits_protocol_access(decl.kind),
        _ => false,
    };

    if inherits {
        intrinsic_access(tree, parent).min(AccessLevel::Public)
    } else {
        AccessLevel::Internal
    }
}

fn inherits_protocol_access(kind: DeclKind) -> bool {
    match kind {
        DeclKind::AssociatedType
        | DeclKind::Function
        | DeclKind::Initializer
        | DeclKind::Subscript
        | DeclKind::TypeAlias
        | DeclKind::Variable => true,
        DeclKind::Class
        | DeclKind::Struct
        | DeclKind::Enum
        | DeclKind::EnumCase
        | DeclKind::Protocol
        | DeclKind::Deinitializer
        | DeclKind::Extension
        | DeclKind::Other => false,
    }
}

/// Returns the access of the type an extension extends.
///
/// Uses the access recorded on the extension when present, otherwise looks
/// the type up by name in the same tree. Types not declared in the tree are
/// imported and therefore public. An extension with no extended type at all
/// is malformed and resolves to `private`.
#[must_use]
pub fn extended_type_access(tree: &DeclTree, extension: &Decl) -> AccessLevel {
    let Some(extended) = &extension.extended_type else {
        return AccessLevel::Private;
    };
    if let Some(access) = extended.access {
        return access;
    }
    tree.find_type(&extended.name)
        .map_or(AccessLevel::Public, |ty| effective_access(tree, ty))
}

/// Returns the effective access: the minimum across the node and its ancestors.
#[must_use]
pub fn effective_access(tree: &DeclTree, id: DeclId) -> AccessLevel {
    std::iter::once(id)
        .chain(tree.ancestors(id))
        .map(|node| intrinsic_access(tree, node))
        .min()
        .unwrap_or_default()
}

/// Returns the extension context when the immediate parent is an extension.
#[must_use]
pub fn extension_context(tree: &DeclTree, id: DeclId) -> Option<ExtensionContext<'_>> {
    let parent = tree.get(tree.get(id).parent()?);
    let extended = parent.extended_type.as_ref()?;
    Some(ExtensionContext {
        type_name: &extended.name,
        access: extended_type_access(tree, parent),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use AccessLevel::{FilePrivate, Internal, Open, Private, Public};

    #[test]
    fn test_declared_access_wins() {
        let mut tree = DeclTree::new("a.swift");
        let c = tree.add_root(Decl::new(DeclKind::Class, "C").with_access(Open));
        let f = tree.add_child(c, Decl::new(DeclKind::Function, "f").with_access(FilePrivate));
        assert_eq!(intrinsic_access(&tree, c), Open);
        assert_eq!(intrinsic_access(&tree, f), FilePrivate);
    }

    #[test]
    fn test_missing_modifier_defaults_to_internal() {
        let mut tree = DeclTree::new("a.swift");
        let s = tree.add_root(Decl::new(DeclKind::Struct, "S").with_access(Public));
        let f = tree.add_child(s, Decl::new(DeclKind::Function, "f"));
        let top = tree.add_root(Decl::new(DeclKind::Function, "g"));
        assert_eq!(intrinsic_access(&tree, f), Internal);
        assert_eq!(intrinsic_access(&tree, top), Internal);
    }

    #[test]
    fn test_enum_cases_inherit_enum_access() {
        let mut tree = DeclTree::new("a.swift");
        let public_enum = tree.add_root(Decl::new(DeclKind::Enum, "E").with_access(Public));
        let case = tree.add_child(public_enum, Decl::new(DeclKind::EnumCase, "one"));
        let private_enum = tree.add_root(Decl::new(DeclKind::Enum, "P").with_access(Private));
        let hidden = tree.add_child(private_enum, Decl::new(DeclKind::EnumCase, "two"));
        assert_eq!(intrinsic_access(&tree, case), Public);
        assert_eq!(intrinsic_access(&tree, hidden), Private);
    }

    #[test]
    fn test_protocol_requirements_inherit_protocol_access() {
        let mut tree = DeclTree::new("a.swift");
        let p = tree.add_root(Decl::new(DeclKind::Protocol, "P").with_access(Public));
        let ty = tree.add_child(p, Decl::new(DeclKind::AssociatedType, "Ty"));
        let req = tree.add_child(p, Decl::new(DeclKind::Function, "req"));
        assert_eq!(intrinsic_access(&tree, ty), Public);
        assert_eq!(intrinsic_access(&tree, req), Public);
    }

    #[test]
    fn test_inheritance_never_exceeds_public() {
        let mut tree = DeclTree::new("a.swift");
        let e = tree.add_root(Decl::new(DeclKind::Enum, "E").with_access(Open));
        let case = tree.add_child(e, Decl::new(DeclKind::EnumCase, "one"));
        assert_eq!(intrinsic_access(&tree, case), Public);
    }

    #[test]
    fn test_struct_members_do_not_inherit() {
        let mut tree = DeclTree::new("a.swift");
        let s = tree.add_root(Decl::new(DeclKind::Struct, "S").with_access(Public));
        let v = tree.add_child(s, Decl::new(DeclKind::Variable, "v"));
        assert_eq!(intrinsic_access(&tree, v), Internal);
    }

    #[test]
    fn test_effective_access_is_minimum_over_ancestors() {
        let mut tree = DeclTree::new("a.swift");
        let outer = tree.add_root(Decl::new(DeclKind::Struct, "Outer"));
        let inner = tree.add_child(outer, Decl::new(DeclKind::Struct, "Inner").with_access(Public));
        assert_eq!(intrinsic_access(&tree, inner), Public);
        assert_eq!(effective_access(&tree, inner), Internal);
    }

    #[test]
    fn test_extension_uses_extended_type_access() {
        let mut tree = DeclTree::new("a.swift");
        tree.add_root(Decl::new(DeclKind::Struct, "S").with_access(Public));
        tree.add_root(Decl::new(DeclKind::Struct, "Hidden"));
        let ext = tree.add_root(Decl::extension("S").with_access(Private));
        let hidden_ext = tree.add_root(Decl::extension("Hidden"));
        let imported_ext = tree.add_root(Decl::extension("Int"));
        let recorded = tree.add_root(Decl::extension("Int").extending_access(FilePrivate));

        assert_eq!(intrinsic_access(&tree, ext), Public);
        assert_eq!(intrinsic_access(&tree, hidden_ext), Internal);
        assert_eq!(intrinsic_access(&tree, imported_ext), Public);
        assert_eq!(intrinsic_access(&tree, recorded), FilePrivate);
    }

    #[test]
    fn test_extension_context_is_reported_for_members() {
        let mut tree = DeclTree::new("a.swift");
        let s = tree.add_root(Decl::new(DeclKind::Struct, "S").with_access(Public));
        let ext = tree.add_root(Decl::extension("S"));
        let member = tree.add_child(ext, Decl::new(DeclKind::Function, "inExt").with_access(Public));

        let ctx = extension_context(&tree, member).unwrap();
        assert_eq!(ctx.type_name, "S");
        assert_eq!(ctx.access, Public);
        assert!(extension_context(&tree, s).is_none());
        assert!(extension_context(&tree, ext).is_none());
    }

    #[test]
    fn test_extension_of_type_declared_in_extension() {
        let mut tree = DeclTree::new("a.swift");
        tree.add_root(Decl::new(DeclKind::Struct, "Outer"));
        let ext = tree.add_root(Decl::extension("Outer"));
        let inner = tree.add_child(ext, Decl::new(DeclKind::Struct, "Inner").with_access(Public));
        let inner_ext = tree.add_root(Decl::extension("Outer.Inner"));
        let f = tree.add_child(inner_ext, Decl::new(DeclKind::Function, "f").with_access(Public));

        assert_eq!(effective_access(&tree, inner), Internal);
        assert_eq!(intrinsic_access(&tree, inner_ext), Internal);
        assert_eq!(effective_access(&tree, f), Internal);
    }

    #[test]
    fn test_malformed_extension_is_private() {
        let mut tree = DeclTree::new("a.swift");
        let ext = tree.add_root(Decl::new(DeclKind::Extension, ""));
        assert_eq!(intrinsic_access(&tree, ext), Private);
    }
}
