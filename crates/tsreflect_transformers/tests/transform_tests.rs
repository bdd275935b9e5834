//! Transform-level integration tests: eligibility, attachment shapes,
//! property ordering, diagnostics, and hard failures.

mod common;

use bumpalo::Bump;
use common::*;
use tsreflect_ast::node::*;
use tsreflect_transformers::{ImportRetention, ReflectTransformer, TransformError, Transformer};

#[test]
fn non_reflective_class_passes_through_untouched() {
    let arena = Bump::new();
    let mut fx = Fixture::new(&arena);

    let plain = fx.decorator_of_type("Component", fx.checker.type_table.any_type);
    let number = fx.checker.type_table.number_type;
    let width = fx.property("width", number, None);
    let (class, _) = fx.class("Widget", &[plain], &[width]);
    let file = fx.source_file(&[Statement::ClassDeclaration(class)]);

    let transformer = ReflectTransformer::new(&fx.checker, &fx.factory);
    let output = transformer.transform(file).unwrap();

    assert_eq!(
        format!("{:?}", output.source_file.statements),
        format!("{:?}", file.statements),
    );
    assert!(output.diagnostics.is_empty());
    assert!(output.referenced.is_empty());
}

#[test]
fn declaration_files_are_skipped_wholesale() {
    let arena = Bump::new();
    let mut fx = Fixture::new(&arena);

    let reflective = fx.reflective_decorator();
    let (class, _) = fx.class("Widget", &[reflective], &[]);
    let file = fx.declaration_file(&[Statement::ClassDeclaration(class)]);

    let transformer = ReflectTransformer::new(&fx.checker, &fx.factory);
    let output = transformer.transform(file).unwrap();

    assert_eq!(
        output.source_file.statements.as_ptr(),
        file.statements.as_ptr()
    );
    assert!(output.diagnostics.is_empty());
}

#[test]
fn type_metadata_is_appended_after_existing_decorators() {
    let arena = Bump::new();
    let mut fx = Fixture::new(&arena);

    let reflective = fx.reflective_decorator();
    let number = fx.checker.type_table.number_type;
    let width = fx.property("width", number, None);
    let (class, _) = fx.class("Widget", &[reflective], &[width]);
    let file = fx.source_file(&[Statement::ClassDeclaration(class)]);

    let transformer = ReflectTransformer::new(&fx.checker, &fx.factory);
    let output = transformer.transform(file).unwrap();
    let class = first_class(&output.source_file);

    assert_eq!(class.decorators.len(), 2);
    let Expression::Identifier(original) = class.decorators[0].expression else {
        panic!("existing decorator must stay first");
    };
    assert_eq!(original.text_name, "Reflective");

    let class_literal = metadata_literal(&class.decorators[1]);
    assert_eq!(kind_tag(class_literal), 20.0);
    assert_eq!(props_of(class_literal), ["width"]);

    let ClassElement::PropertyDeclaration(property) = &class.members[0] else {
        panic!("expected property member");
    };
    assert_eq!(property.decorators.len(), 1);
    let property_literal = metadata_literal(&property.decorators[0]);
    assert_eq!(kind_tag(property_literal), 3.0);
}

#[test]
fn property_order_is_fields_then_shorthand_parameters() {
    let arena = Bump::new();
    let mut fx = Fixture::new(&arena);

    let number = fx.checker.type_table.number_type;
    let string = fx.checker.type_table.string_type;
    let reflective = fx.reflective_decorator();
    let f1 = fx.property("alpha", number, None);
    let f2 = fx.property("beta", string, None);
    let s1 = fx.shorthand_param("gamma", number);
    let plain = fx.plain_param("ignored");
    let s2 = fx.shorthand_param("delta", string);
    let ctor = fx.constructor(&[s1, plain, s2]);
    let (class, _) = fx.class("Widget", &[reflective], &[f1, f2, ctor]);
    let file = fx.source_file(&[Statement::ClassDeclaration(class)]);

    let transformer = ReflectTransformer::new(&fx.checker, &fx.factory);
    let output = transformer.transform(file).unwrap();
    let class = first_class(&output.source_file);

    let class_literal = metadata_literal(&class.decorators[1]);
    assert_eq!(props_of(class_literal), ["alpha", "beta", "gamma", "delta"]);

    // Shorthand parameters get aggregate decorators; the plain one stays bare.
    let ClassElement::Constructor(ctor) = &class.members[2] else {
        panic!("expected constructor");
    };
    assert_eq!(ctor.parameters[0].decorators.len(), 1);
    assert!(ctor.parameters[1].decorators.is_empty());
    assert_eq!(ctor.parameters[2].decorators.len(), 1);
}

#[test]
fn union_typed_decorator_makes_a_class_eligible() {
    let arena = Bump::new();
    let mut fx = Fixture::new(&arena);

    let marker = fx.marker_type();
    let string = fx.checker.type_table.string_type;
    let union = fx.checker.type_table.add_union(vec![string, marker]);
    let decorator = fx.decorator_of_type("MaybeReflective", union);
    let (class, _) = fx.class("Widget", &[decorator], &[]);
    let file = fx.source_file(&[Statement::ClassDeclaration(class)]);

    let transformer = ReflectTransformer::new(&fx.checker, &fx.factory);
    let output = transformer.transform(file).unwrap();
    let class = first_class(&output.source_file);

    assert_eq!(class.decorators.len(), 2);
}

#[test]
fn intersection_typed_decorator_makes_a_class_eligible() {
    let arena = Bump::new();
    let mut fx = Fixture::new(&arena);

    // The marker's natural shape: a decorator cast to `T & { marker }`.
    let marker = fx.marker_type();
    let string = fx.checker.type_table.string_type;
    let branded = fx.checker.type_table.add_type(
        tsreflect_ast::types::TypeFlags::INTERSECTION,
        tsreflect_checker::TypeKind::Intersection {
            types: vec![string, marker],
        },
    );
    let decorator = fx.decorator_of_type("Branded", branded);
    let (class, _) = fx.class("Widget", &[decorator], &[]);
    let file = fx.source_file(&[Statement::ClassDeclaration(class)]);

    let transformer = ReflectTransformer::new(&fx.checker, &fx.factory);
    let output = transformer.transform(file).unwrap();
    let class = first_class(&output.source_file);

    assert_eq!(class.decorators.len(), 2);
}

#[test]
fn unknown_shape_degrades_with_a_warning() {
    let arena = Bump::new();
    let mut fx = Fixture::new(&arena);

    let string = fx.checker.type_table.string_type;
    let number = fx.checker.type_table.number_type;
    let intersection = fx.checker.type_table.add_type(
        tsreflect_ast::types::TypeFlags::INTERSECTION,
        tsreflect_checker::TypeKind::Intersection {
            types: vec![string, number],
        },
    );
    let reflective = fx.reflective_decorator();
    let odd = fx.property("odd", intersection, None);
    let (class, _) = fx.class("Widget", &[reflective], &[odd]);
    let file = fx.source_file(&[Statement::ClassDeclaration(class)]);

    let transformer = ReflectTransformer::new(&fx.checker, &fx.factory);
    let output = transformer.transform(file).unwrap();

    assert_eq!(output.diagnostics.len(), 1);
    let diagnostic = output.diagnostics.iter().next().unwrap();
    assert!(diagnostic.is_warning());
    assert_eq!(diagnostic.message_text, "unknown type: string & number");

    let class = first_class(&output.source_file);
    let ClassElement::PropertyDeclaration(property) = &class.members[0] else {
        panic!("expected property member");
    };
    assert_eq!(kind_tag(metadata_literal(&property.decorators[0])), 999.0);
}

#[test]
fn referenced_symbols_feed_import_retention() {
    let arena = Bump::new();
    let mut fx = Fixture::new(&arena);

    let dep_declaration = fx.node_id();
    let dep_type = fx.class_type("Dep", dep_declaration);
    let dep_symbol = fx.checker.symbol_of_type(dep_type).unwrap();

    let reflective = fx.reflective_decorator();
    let dep = fx.property("dep", dep_type, None);
    let (class, _) = fx.class("Holder", &[reflective], &[dep]);
    let file = fx.source_file(&[Statement::ClassDeclaration(class)]);

    let transformer = ReflectTransformer::new(&fx.checker, &fx.factory);
    let output = transformer.transform(file).unwrap();

    assert!(output.referenced.contains(&dep_symbol));
    let retention = ImportRetention::from_referenced(output.referenced);
    assert!(retention.should_retain(dep_symbol, false));
}

#[test]
fn interface_typed_property_serializes_by_name() {
    let arena = Bump::new();
    let mut fx = Fixture::new(&arena);

    let shape = fx.interface_type("Shape");
    let reflective = fx.reflective_decorator();
    let outline = fx.property("outline", shape, None);
    let (class, _) = fx.class("Widget", &[reflective], &[outline]);
    let file = fx.source_file(&[Statement::ClassDeclaration(class)]);

    let transformer = ReflectTransformer::new(&fx.checker, &fx.factory);
    let output = transformer.transform(file).unwrap();
    let class = first_class(&output.source_file);

    let ClassElement::PropertyDeclaration(property) = &class.members[0] else {
        panic!("expected property member");
    };
    let literal = metadata_literal(&property.decorators[0]);
    assert_eq!(kind_tag(literal), 19.0);
    let Some(Expression::StringLiteral(name)) = literal_field(literal, "name") else {
        panic!("interface descriptor without a name");
    };
    assert_eq!(name.value, "Shape");
    // A pure compile-time shape never forces an import to stay.
    assert!(output.referenced.is_empty());
}

#[test]
fn computed_property_key_is_a_hard_failure() {
    let arena = Bump::new();
    let mut fx = Fixture::new(&arena);

    let string = fx.checker.type_table.string_type;
    let reflective = fx.reflective_decorator();
    let key = fx.factory.string_literal("dynamic");
    let member = fx.computed_property(key, string);
    let (class, _) = fx.class("Widget", &[reflective], &[member]);
    let file = fx.source_file(&[Statement::ClassDeclaration(class)]);

    let transformer = ReflectTransformer::new(&fx.checker, &fx.factory);
    let error = transformer.transform(file).unwrap_err();
    assert!(matches!(error, TransformError::ComputedPropertyKey { .. }));
}

#[test]
fn unnamed_reflective_class_is_a_hard_failure() {
    let arena = Bump::new();
    let mut fx = Fixture::new(&arena);

    let reflective = fx.reflective_decorator();
    let (mut class, _) = fx.class("Widget", &[reflective], &[]);
    class.name = None;
    let file = fx.source_file(&[Statement::ClassDeclaration(class)]);

    let transformer = ReflectTransformer::new(&fx.checker, &fx.factory);
    let error = transformer.transform(file).unwrap_err();
    assert!(matches!(error, TransformError::UnnamedClass));
}

#[test]
fn classes_inside_module_blocks_are_found() {
    let arena = Bump::new();
    let mut fx = Fixture::new(&arena);

    let reflective = fx.reflective_decorator();
    let (class, _) = fx.class("Inner", &[reflective], &[]);
    let block_id = fx.node_id();
    let mut block_data = NodeData::synthesized(tsreflect_ast::syntax_kind::SyntaxKind::ModuleBlock);
    block_data.id = block_id;
    let body = fx.factory.alloc(ModuleBlock {
        data: block_data,
        statements: fx.factory.list(&[Statement::ClassDeclaration(class)]),
    });
    let module = Statement::ModuleDeclaration(ModuleDeclarationNode {
        data: NodeData::synthesized(tsreflect_ast::syntax_kind::SyntaxKind::ModuleDeclaration),
        name: fx.factory.identifier("ns"),
        body: Some(body),
    });
    let file = fx.source_file(&[module]);

    let transformer = ReflectTransformer::new(&fx.checker, &fx.factory);
    let output = transformer.transform(file).unwrap();

    let Statement::ModuleDeclaration(module) = &output.source_file.statements[0] else {
        panic!("expected module declaration");
    };
    let Statement::ClassDeclaration(class) = &module.body.unwrap().statements[0] else {
        panic!("expected class inside module");
    };
    assert_eq!(class.decorators.len(), 2);
    let class_literal = metadata_literal(&class.decorators[1]);
    assert_eq!(kind_tag(class_literal), 20.0);
}
