//! Declaration tree model.
//!
//! A [`DeclTree`] is an arena of [`Decl`] nodes for one compilation unit.
//! Children are owned by the arena and referenced by [`DeclId`]; parent
//! links are plain indices, so there are no ownership cycles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Visibility of a declaration, ordered from least to most visible.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Visible only within the enclosing declaration.
    Private,
    /// Visible only within the source file.
    FilePrivate,
    /// Visible within the defining module.
    #[default]
    Internal,
    /// Visible to importers of the module.
    Public,
    /// Visible to importers and overridable outside the module.
    Open,
}

impl AccessLevel {
    /// Returns true if a declaration at this level is part of the public API surface.
    #[must_use]
    pub fn is_public_api(self) -> bool {
        self >= Self::Public
    }

    /// Returns the source keyword for this level.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::FilePrivate => "fileprivate",
            Self::Internal => "internal",
            Self::Public => "public",
            Self::Open => "open",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Error returned when an access modifier string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown access level `{0}`, expected: open, public, internal, fileprivate, private")]
pub struct ParseAccessError(pub String);

impl FromStr for AccessLevel {
    type Err = ParseAccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "private" => Ok(Self::Private),
            "fileprivate" => Ok(Self::FilePrivate),
            "internal" => Ok(Self::Internal),
            "public" => Ok(Self::Public),
            "open" => Ok(Self::Open),
            other => Err(ParseAccessError(other.to_string())),
        }
    }
}

/// Kind of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    /// `class`
    Class,
    /// `struct`
    Struct,
    /// `enum`
    Enum,
    /// A `case` inside an enum.
    EnumCase,
    /// `protocol`
    Protocol,
    /// `associatedtype` inside a protocol.
    AssociatedType,
    /// `func`
    Function,
    /// `init`
    Initializer,
    /// `deinit`
    Deinitializer,
    /// `subscript`
    Subscript,
    /// `typealias`
    TypeAlias,
    /// `var` / `let`
    Variable,
    /// An extension body. Never diagnosed itself.
    Extension,
    /// Any declaration the check does not cover (imports, operators, ...),
    /// including kinds this version does not recognize.
    #[serde(other)]
    Other,
}

impl DeclKind {
    /// Returns true if declarations of this kind are subject to the doc-comment check.
    #[must_use]
    pub fn is_checked(self) -> bool {
        match self {
            Self::Class
            | Self::Struct
            | Self::Enum
            | Self::EnumCase
            | Self::Protocol
            | Self::AssociatedType
            | Self::Function
            | Self::Initializer
            | Self::Deinitializer
            | Self::Subscript
            | Self::TypeAlias
            | Self::Variable => true,
            Self::Extension | Self::Other => false,
        }
    }

    /// Returns true if a well-formed declaration of this kind carries a simple name.
    #[must_use]
    pub fn requires_name(self) -> bool {
        match self {
            Self::Deinitializer | Self::Extension | Self::Other => false,
            Self::Class
            | Self::Struct
            | Self::Enum
            | Self::EnumCase
            | Self::Protocol
            | Self::AssociatedType
            | Self::Function
            | Self::Initializer
            | Self::Subscript
            | Self::TypeAlias
            | Self::Variable => true,
        }
    }

    /// Returns true for nominal types that can be the target of an extension.
    #[must_use]
    pub fn is_nominal_type(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Struct | Self::Enum | Self::Protocol
        )
    }

    /// Human-readable kind used in diagnostics.
    ///
    /// Functions and variables read differently at file scope than as members.
    #[must_use]
    pub fn descriptive_name(self, at_file_scope: bool) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::EnumCase => "enum case",
            Self::Protocol => "protocol",
            Self::AssociatedType => "associated type",
            Self::Function if at_file_scope => "global function",
            Self::Function => "method",
            Self::Initializer => "initializer",
            Self::Deinitializer => "deinitializer",
            Self::Subscript => "subscript",
            Self::TypeAlias => "type alias",
            Self::Variable if at_file_scope => "global variable",
            Self::Variable => "property",
            Self::Extension => "extension",
            Self::Other => "declaration",
        }
    }
}

/// Start position of a declaration in its source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Line number (1-indexed, 0 if unknown).
    pub line: usize,
    /// Column number (1-indexed, 0 if unknown).
    pub column: usize,
    /// Byte offset, when the producer knows it.
    pub offset: Option<usize>,
    /// Length of the name token in bytes.
    pub length: usize,
}

impl Span {
    /// Creates a span at the given line and column.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            offset: None,
            length: 0,
        }
    }
}

/// The type named by an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedType {
    /// Possibly dotted name, e.g. `Outer.Inner`.
    pub name: String,
    /// Access of the extended type, if the producer resolved it.
    pub access: Option<AccessLevel>,
}

/// Index of a declaration inside its [`DeclTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclId(usize);

impl DeclId {
    /// Returns the arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single declaration.
#[derive(Debug, Clone)]
pub struct Decl {
    /// Declaration kind.
    pub kind: DeclKind,
    /// Simple name; empty for deinitializers and extensions.
    pub name: String,
    /// Explicit access modifier, if written.
    pub access: Option<AccessLevel>,
    /// Whether a documentation comment is attached.
    pub has_doc_comment: bool,
    /// Attribute names as written, e.g. `_spi(Experimental)`.
    pub attributes: BTreeSet<String>,
    /// Start position.
    pub span: Span,
    /// Set on extension nodes.
    pub extended_type: Option<ExtendedType>,
    parent: Option<DeclId>,
    children: Vec<DeclId>,
}

impl Decl {
    /// Creates a declaration with default access and no doc comment.
    #[must_use]
    pub fn new(kind: DeclKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            access: None,
            has_doc_comment: false,
            attributes: BTreeSet::new(),
            span: Span::default(),
            extended_type: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Creates an extension of the named type.
    #[must_use]
    pub fn extension(type_name: impl Into<String>) -> Self {
        let mut decl = Self::new(DeclKind::Extension, String::new());
        decl.extended_type = Some(ExtendedType {
            name: type_name.into(),
            access: None,
        });
        decl
    }

    /// Sets the explicit access modifier.
    #[must_use]
    pub fn with_access(mut self, access: AccessLevel) -> Self {
        self.access = Some(access);
        self
    }

    /// Marks the declaration as documented.
    #[must_use]
    pub fn documented(self) -> Self {
        self.with_doc_comment(true)
    }

    /// Sets whether a doc comment is attached.
    #[must_use]
    pub fn with_doc_comment(mut self, present: bool) -> Self {
        self.has_doc_comment = present;
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.insert(attribute.into());
        self
    }

    /// Sets the start position.
    #[must_use]
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.span = Span::new(line, column);
        self
    }

    /// Sets the full span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Records the access of the extended type. Only meaningful on extensions.
    #[must_use]
    pub fn extending_access(mut self, access: AccessLevel) -> Self {
        if let Some(extended) = &mut self.extended_type {
            extended.access = Some(access);
        }
        self
    }

    /// Parent declaration, `None` at file scope.
    #[must_use]
    pub fn parent(&self) -> Option<DeclId> {
        self.parent
    }

    /// Children in source order.
    #[must_use]
    pub fn children(&self) -> &[DeclId] {
        &self.children
    }

    /// Returns true if the simple name starts with an underscore.
    #[must_use]
    pub fn is_underscored(&self) -> bool {
        self.name.starts_with('_')
    }

    /// Returns true if the node is at file scope.
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}

/// Declarations of one compilation unit.
#[derive(Debug, Clone, Default)]
pub struct DeclTree {
    source: PathBuf,
    nodes: Vec<Decl>,
    roots: Vec<DeclId>,
}

impl DeclTree {
    /// Creates an empty tree for the given source file.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Source file this tree was parsed from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a file-scope declaration.
    pub fn add_root(&mut self, decl: Decl) -> DeclId {
        let id = self.insert(None, decl);
        self.roots.push(id);
        id
    }

    /// Appends a member to `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn add_child(&mut self, parent: DeclId, decl: Decl) -> DeclId {
        let id = self.insert(Some(parent), decl);
        self.nodes[parent.0].children.push(id);
        id
    }

    fn insert(&mut self, parent: Option<DeclId>, mut decl: Decl) -> DeclId {
        let id = DeclId(self.nodes.len());
        decl.parent = parent;
        decl.children.clear();
        self.nodes.push(decl);
        id
    }

    /// File-scope declarations in source order.
    #[must_use]
    pub fn roots(&self) -> &[DeclId] {
        &self.roots
    }

    /// Returns the declaration for `id`.
    #[must_use]
    pub fn get(&self, id: DeclId) -> &Decl {
        &self.nodes[id.0]
    }

    /// Iterates the strict ancestors of `id`, innermost first.
    pub fn ancestors(&self, id: DeclId) -> impl Iterator<Item = DeclId> + '_ {
        std::iter::successors(self.get(id).parent, |&p| self.get(p).parent)
    }

    /// Iterates all declarations in pre-order, source order.
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Finds a nominal type by possibly dotted name, e.g. `Outer.Inner`.
    ///
    /// Types declared in the body of an extension count as members of the
    /// extended type, so `extension Outer { struct Inner {} }` makes
    /// `Outer.Inner` resolvable.
    #[must_use]
    pub fn find_type(&self, path: &str) -> Option<DeclId> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut found = self.nominal_named(self.roots.iter().copied(), first)?;
        let mut qualified = first.to_string();

        for segment in segments {
            let members = self
                .get(found)
                .children()
                .iter()
                .chain(self.extension_members(&qualified))
                .copied();
            found = self.nominal_named(members, segment)?;
            qualified.push('.');
            qualified.push_str(segment);
        }
        Some(found)
    }

    fn nominal_named(&self, mut ids: impl Iterator<Item = DeclId>, name: &str) -> Option<DeclId> {
        ids.find(|&id| {
            let decl = self.get(id);
            decl.kind.is_nominal_type() && decl.name == name
        })
    }

    /// Members of every file-scope extension of `qualified`.
    fn extension_members<'a>(&'a self, qualified: &'a str) -> impl Iterator<Item = &'a DeclId> + 'a {
        self.roots
            .iter()
            .filter(move |&&id| {
                self.get(id)
                    .extended_type
                    .as_ref()
                    .is_some_and(|ty| ty.name == qualified)
            })
            .flat_map(move |&id| self.get(id).children())
    }
}

impl std::ops::Index<DeclId> for DeclTree {
    type Output = Decl;

    fn index(&self, id: DeclId) -> &Decl {
        self.get(id)
    }
}

/// Pre-order iterator over a [`DeclTree`].
pub struct Preorder<'a> {
    tree: &'a DeclTree,
    stack: Vec<DeclId>,
}

impl Iterator for Preorder<'_> {
    type Item = DeclId;

    fn next(&mut self) -> Option<DeclId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.get(id).children().iter().rev().copied());
        Some(id)
    }
}
