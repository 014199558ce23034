//! Built-in TypeScript concept catalogue
//!
//! Seed data for `GraphStore::with_builtin_catalogue`. Ids are stable,
//! lowercase and hand-picked so callers can refer to them directly.

use crate::edge::{NewTypeEdge, Relationship};
use crate::node::{NewTypeNode, TypeCategory, TypeKind};
use crate::store::GraphStore;
use Relationship::{Accepts, Composes, Constrains, Contains, Extends, Implements, Returns, Transforms, Uses};
use TypeCategory::{Advanced, BuiltIn, UserDefined, Utility};

pub const CATALOGUE_NAME: &str = "TypeScript Type System";
pub const CATALOGUE_DESCRIPTION: &str =
    "Built-in TypeScript types, utility types and advanced type operators with their relationships";
pub const CATALOGUE_TAGS: &[&str] = &["typescript", "types", "builtin"];

struct NodeSeed {
    id: &'static str,
    name: &'static str,
    kind: TypeKind,
    category: TypeCategory,
    complexity: i64,
    description: &'static str,
    example: &'static str,
}

struct EdgeSeed {
    source: &'static str,
    target: &'static str,
    relationship: Relationship,
    strength: i64,
    description: &'static str,
}

const fn node(
    id: &'static str,
    name: &'static str,
    kind: TypeKind,
    category: TypeCategory,
    complexity: i64,
    description: &'static str,
    example: &'static str,
) -> NodeSeed {
    NodeSeed {
        id,
        name,
        kind,
        category,
        complexity,
        description,
        example,
    }
}

const fn edge(
    source: &'static str,
    target: &'static str,
    relationship: Relationship,
    strength: i64,
    description: &'static str,
) -> EdgeSeed {
    EdgeSeed {
        source,
        target,
        relationship,
        strength,
        description,
    }
}

#[rustfmt::skip]
const NODES: &[NodeSeed] = &[
    // primitives
    node("string", "string", TypeKind::Primitive, BuiltIn, 1, "Textual data", "let name: string = 'Ada';"),
    node("number", "number", TypeKind::Primitive, BuiltIn, 1, "Double-precision floating point numbers", "let count: number = 42;"),
    node("boolean", "boolean", TypeKind::Primitive, BuiltIn, 1, "Logical true or false", "let done: boolean = false;"),
    node("null", "null", TypeKind::Primitive, BuiltIn, 1, "The intentional absence of a value", "let empty: null = null;"),
    node("undefined", "undefined", TypeKind::Primitive, BuiltIn, 1, "A value that was never assigned", "let missing: undefined = undefined;"),
    node("void", "void", TypeKind::Primitive, BuiltIn, 2, "Return type of functions that return nothing", "function log(msg: string): void {}"),
    node("any", "any", TypeKind::Primitive, BuiltIn, 2, "Opts out of type checking entirely", "let loose: any = JSON.parse(text);"),
    node("bigint", "bigint", TypeKind::Primitive, BuiltIn, 2, "Arbitrary-precision integers", "let big: bigint = 9007199254740993n;"),
    node("symbol", "symbol", TypeKind::Primitive, BuiltIn, 2, "Unique, immutable identifiers", "const key: symbol = Symbol('key');"),
    node("never", "never", TypeKind::Primitive, BuiltIn, 3, "The bottom type: values that never occur", "function fail(msg: string): never { throw new Error(msg); }"),
    node("unknown", "unknown", TypeKind::Primitive, BuiltIn, 3, "The type-safe top type; must be narrowed before use", "let input: unknown = readInput();"),
    // structural built-ins
    node("object", "object", TypeKind::Object, BuiltIn, 3, "Any non-primitive value", "let config: object = { debug: true };"),
    node("array", "Array<T>", TypeKind::Array, BuiltIn, 3, "Ordered, indexable collection of one element type", "let ids: number[] = [1, 2, 3];"),
    node("function", "Function", TypeKind::Function, BuiltIn, 3, "Callable values with parameter and return types", "type Handler = (event: Event) => void;"),
    node("promise", "Promise<T>", TypeKind::Generic, BuiltIn, 3, "Eventual result of an asynchronous operation", "async function load(): Promise<string> { return ''; }"),
    // user-defined shapes
    node("interface", "interface", TypeKind::Interface, UserDefined, 2, "Named object shape that can be extended and merged", "interface User { id: number; name: string }"),
    node("class", "class", TypeKind::Class, UserDefined, 3, "Constructor with an instance type", "class Point { constructor(public x: number, public y: number) {} }"),
    node("enum", "enum", TypeKind::Enum, UserDefined, 2, "Named set of numeric or string constants", "enum Color { Red, Green, Blue }"),
    // type operators
    node("union", "Union Types", TypeKind::Union, Advanced, 2, "A value that may be one of several types", "type Id = string | number;"),
    node("intersection", "Intersection Types", TypeKind::Intersection, Advanced, 3, "Combines several types into one", "type Admin = User & { permissions: string[] };"),
    node("literal", "Literal Types", TypeKind::Literal, Advanced, 2, "Exact string, number or boolean values as types", "type Direction = 'up' | 'down';"),
    node("generics", "Generics", TypeKind::Generic, Advanced, 3, "Types parameterized over other types", "function identity<T>(value: T): T { return value; }"),
    node("keyof", "keyof", TypeKind::Utility, Advanced, 3, "Union of the property names of a type", "type UserKey = keyof User;"),
    node("mapped", "Mapped Types", TypeKind::Generic, Advanced, 4, "Builds a type by iterating over keys", "type Flags<T> = { [K in keyof T]: boolean };"),
    node("conditional", "Conditional Types", TypeKind::Conditional, Advanced, 5, "Chooses a type based on an assignability test", "type IsString<T> = T extends string ? true : false;"),
    // utility types
    node("partial", "Partial<T>", TypeKind::Utility, Utility, 3, "Makes every property optional", "function patch(user: Partial<User>) {}"),
    node("required", "Required<T>", TypeKind::Utility, Utility, 3, "Makes every property required", "const full: Required<Options> = defaults;"),
    node("readonly", "Readonly<T>", TypeKind::Utility, Utility, 3, "Makes every property read-only", "const frozen: Readonly<User> = user;"),
    node("record", "Record<K, T>", TypeKind::Utility, Utility, 3, "Object type with keys K and values T", "const scores: Record<string, number> = {};"),
    node("pick", "Pick<T, K>", TypeKind::Utility, Utility, 4, "Selects a subset of properties", "type Preview = Pick<User, 'id' | 'name'>;"),
    node("omit", "Omit<T, K>", TypeKind::Utility, Utility, 4, "Removes a subset of properties", "type Draft = Omit<User, 'id'>;"),
    node("exclude", "Exclude<T, U>", TypeKind::Utility, Utility, 4, "Removes union members assignable to U", "type Visible = Exclude<Status, 'hidden'>;"),
    node("extract", "Extract<T, U>", TypeKind::Utility, Utility, 4, "Keeps union members assignable to U", "type Numeric = Extract<Id, number>;"),
    node("return-type", "ReturnType<T>", TypeKind::Utility, Utility, 4, "Return type of a function type", "type Loaded = ReturnType<typeof load>;"),
    node("parameters", "Parameters<T>", TypeKind::Utility, Utility, 4, "Tuple of a function type's parameters", "type Args = Parameters<typeof patch>;"),
];

#[rustfmt::skip]
const EDGES: &[EdgeSeed] = &[
    edge("string", "unknown", Extends, 8, "Every string is assignable to unknown"),
    edge("number", "unknown", Extends, 8, "Every number is assignable to unknown"),
    edge("boolean", "unknown", Extends, 8, "Every boolean is assignable to unknown"),
    edge("bigint", "unknown", Extends, 7, "Every bigint is assignable to unknown"),
    edge("symbol", "unknown", Extends, 7, "Every symbol is assignable to unknown"),
    edge("null", "unknown", Extends, 6, "null is assignable to unknown"),
    edge("object", "unknown", Extends, 7, "Every object is assignable to unknown"),
    edge("undefined", "void", Extends, 7, "undefined is assignable to void"),
    edge("never", "string", Extends, 5, "never is assignable to every type"),
    edge("literal", "string", Extends, 9, "String literals narrow string"),
    edge("literal", "number", Extends, 9, "Numeric literals narrow number"),
    edge("literal", "boolean", Extends, 8, "true and false narrow boolean"),
    edge("union", "literal", Composes, 8, "Unions of literals model finite sets"),
    edge("union", "null", Composes, 6, "Nullable types are unions with null"),
    edge("intersection", "interface", Composes, 7, "Intersections merge object shapes"),
    edge("interface", "object", Extends, 8, "Interfaces describe object shapes"),
    edge("class", "interface", Implements, 9, "Classes implement interfaces"),
    edge("enum", "number", Contains, 6, "Numeric enum members"),
    edge("enum", "string", Contains, 6, "String enum members"),
    edge("array", "generics", Uses, 9, "Array is parameterized by its element type"),
    edge("promise", "generics", Uses, 8, "Promise is parameterized by its result type"),
    edge("function", "void", Returns, 6, "Functions without a result return void"),
    edge("function", "unknown", Accepts, 4, "Parameters may be typed as unknown"),
    edge("any", "unknown", Constrains, 3, "any disables the checks unknown enforces"),
    edge("keyof", "generics", Constrains, 6, "keyof constrains type parameters"),
    edge("mapped", "keyof", Uses, 9, "Mapped types iterate over keyof"),
    edge("conditional", "generics", Uses, 9, "Conditional types test type parameters"),
    edge("partial", "mapped", Uses, 9, "Partial is a mapped type"),
    edge("partial", "object", Transforms, 8, "Partial transforms object types"),
    edge("required", "mapped", Uses, 9, "Required is a mapped type"),
    edge("required", "object", Transforms, 8, "Required transforms object types"),
    edge("readonly", "mapped", Uses, 9, "Readonly is a mapped type"),
    edge("readonly", "object", Transforms, 8, "Readonly transforms object types"),
    edge("record", "mapped", Uses, 8, "Record is a mapped type"),
    edge("record", "keyof", Constrains, 6, "Record keys extend keyof any"),
    edge("pick", "mapped", Uses, 8, "Pick is a mapped type"),
    edge("pick", "keyof", Constrains, 9, "Pick keys must be keys of T"),
    edge("pick", "object", Transforms, 7, "Pick transforms object types"),
    edge("omit", "pick", Uses, 9, "Omit is Pick over the excluded keys"),
    edge("omit", "exclude", Uses, 9, "Omit computes its keys with Exclude"),
    edge("exclude", "conditional", Uses, 10, "Exclude is a distributive conditional type"),
    edge("exclude", "union", Transforms, 8, "Exclude filters union members"),
    edge("extract", "conditional", Uses, 10, "Extract is a distributive conditional type"),
    edge("extract", "union", Transforms, 8, "Extract filters union members"),
    edge("return-type", "conditional", Uses, 9, "ReturnType infers through a conditional type"),
    edge("return-type", "function", Accepts, 8, "ReturnType takes a function type"),
    edge("parameters", "conditional", Uses, 9, "Parameters infers through a conditional type"),
    edge("parameters", "function", Accepts, 8, "Parameters takes a function type"),
];

/// Insert every catalogue node and edge into `store`
pub fn seed(store: &mut GraphStore) {
    for seed in NODES {
        store.add_node(
            NewTypeNode::new(seed.name, seed.kind, seed.category)
                .with_id(seed.id)
                .with_complexity(seed.complexity)
                .with_description(seed.description)
                .with_example(seed.example),
        );
    }

    for seed in EDGES {
        let data = NewTypeEdge::new(seed.source, seed.target, seed.relationship)
            .with_id(format!("{}-{}-{}", seed.source, seed.relationship, seed.target))
            .with_strength(seed.strength)
            .with_description(seed.description);
        if let Err(e) = store.add_edge(data) {
            tracing::warn!("Skipping catalogue edge: {}", e);
        }
    }

    tracing::debug!("Seeded catalogue with {} nodes and {} edges", store.node_count(), store.edge_count());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::NodeFilter;

    #[test]
    fn test_every_catalogue_edge_resolves() {
        let store = GraphStore::with_builtin_catalogue();
        assert_eq!(store.node_count(), NODES.len());
        assert_eq!(store.edge_count(), EDGES.len());
        assert!(store.get_edge("union-composes-literal").is_some());
    }

    #[test]
    fn test_catalogue_metadata() {
        let store = GraphStore::with_builtin_catalogue();
        assert_eq!(store.metadata().name, CATALOGUE_NAME);
        assert!(store.metadata().tags.iter().any(|t| t == "typescript"));
    }

    #[test]
    fn test_low_complexity_builtins_are_primitives() {
        let store = GraphStore::with_builtin_catalogue();
        let filter = NodeFilter::new()
            .with_category(TypeCategory::BuiltIn)
            .with_complexity_range(1, 2);

        let results = store.query_nodes(&filter);
        let ids: Vec<&str> = results.iter().map(|n| n.id.as_str()).collect();

        for expected in ["string", "number", "boolean", "null", "undefined", "void", "any"] {
            assert!(ids.contains(&expected), "missing {expected}");
        }
        assert!(!ids.contains(&"never"));
        assert!(!ids.contains(&"unknown"));
        assert!(results.iter().all(|n| n.kind == TypeKind::Primitive));
    }

    #[test]
    fn test_catalogue_shortest_path() {
        let store = GraphStore::with_builtin_catalogue();
        let path = store.find_shortest_path("omit", "generics").unwrap();
        assert_eq!(path.path.first().map(|n| n.as_str()), Some("omit"));
        assert_eq!(path.path.last().map(|n| n.as_str()), Some("generics"));
        assert!(path.distance > 0);
    }
}
