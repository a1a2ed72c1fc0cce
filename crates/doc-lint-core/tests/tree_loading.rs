//! Loading serialized trees and resolving access over them.

use std::fmt::Write as _;
use std::path::Path;

use doc_lint_core::tree_file::parse;
use doc_lint_core::{effective_access, DeclTree};

const SHAPES: &str = r#"{
  "source": "Sources/Shapes.swift",
  "declarations": [
    { "kind": "struct", "name": "Shape", "access": "public", "doc_comment": "/// A shape.",
      "members": [
        { "kind": "variable", "name": "area", "access": "public", "doc_comment": "///" },
        { "kind": "function", "name": "scale", "access": "internal" }
      ] },
    { "kind": "operator", "name": "<>" },
    { "kind": "enum", "name": "Kind", "access": "public",
      "members": [ { "kind": "enum_case", "name": "circle" } ] },
    { "kind": "extension", "extended_type": "Shape",
      "members": [ { "kind": "function", "name": "moved", "access": "public" } ] },
    { "kind": "class", "name": "Odd", "access": "sealed" },
    { "name": "noKind" }
  ]
}"#;

fn outline(tree: &DeclTree) -> String {
    let mut out = String::new();
    for id in tree.preorder() {
        let decl = &tree[id];
        let depth = tree.ancestors(id).count();
        let _ = writeln!(
            out,
            "{}{:?} '{}' {} {}",
            "  ".repeat(depth),
            decl.kind,
            decl.name,
            effective_access(tree, id),
            if decl.has_doc_comment { "documented" } else { "-" },
        );
    }
    out
}

#[test]
fn test_outline_of_loaded_tree() {
    let tree = parse(SHAPES, Path::new("build/Shapes.decls.json")).unwrap();
    assert_eq!(tree.source(), Path::new("Sources/Shapes.swift"));

    insta::assert_snapshot!(outline(&tree), @r"
    Struct 'Shape' public documented
      Variable 'area' public -
      Function 'scale' internal -
    Other '<>' internal -
    Enum 'Kind' public -
      EnumCase 'circle' public -
    Extension '' public -
      Function 'moved' public -
    Class 'Odd' private -
    Other 'noKind' internal -
    ");
}

#[test]
fn test_source_defaults_to_tree_file_path() {
    let tree = parse(r#"{ "declarations": [] }"#, Path::new("build/Empty.decls.json")).unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.source(), Path::new("build/Empty.decls.json"));
}

#[test]
fn test_invalid_json_names_the_file() {
    let err = parse("{ not json", Path::new("build/Broken.decls.json")).unwrap_err();
    assert!(err.to_string().contains("build/Broken.decls.json"));
}
