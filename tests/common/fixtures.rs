#![allow(dead_code)]
//! Fixture types and the catalog that registers them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::bail;
use beanwright::{BeanFactory, ParamType, TypeCatalog, TypeDescriptor};

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, PartialEq)]
pub struct User {
    pub name: String,
    pub age: i64,
}

#[derive(Debug)]
pub struct Widget {
    pub name: String,
    pub owner: Arc<User>,
}

/// Records which overload built it.
#[derive(Debug, PartialEq)]
pub enum Foo {
    FromInt(i32),
    FromString(String),
}

/// Linked node; `next` comes from a reference argument.
#[derive(Debug)]
pub struct Node {
    pub label: String,
    pub next: Option<Arc<Node>>,
}

/// Catalog with `Point`, `User`, `Widget`, `Foo`, `Pair`, `Node`, `Holder` and `Strict`.
///
/// `Node` constructions are counted in `node_builds`.
pub fn fixture_catalog(node_builds: Arc<AtomicUsize>) -> TypeCatalog {
    let mut catalog = TypeCatalog::new();

    catalog.register(
        TypeDescriptor::builder("Point")
            .constructor([], |_| Ok(Point { x: 0, y: 0 }))
            .constructor([ParamType::Int, ParamType::Int], |args| {
                Ok(Point {
                    x: args.int(0)?,
                    y: args.int(1)?,
                })
            })
            .build(),
    );

    catalog.register(
        TypeDescriptor::builder("User")
            .constructor([ParamType::String], |args| {
                Ok(User {
                    name: args.str(0)?.to_string(),
                    age: 0,
                })
            })
            .constructor([ParamType::String, ParamType::Long], |args| {
                Ok(User {
                    name: args.str(0)?.to_string(),
                    age: args.long(1)?,
                })
            })
            .build(),
    );

    catalog.register(
        TypeDescriptor::builder("Widget")
            .constructor([ParamType::String, ParamType::object("User")], |args| {
                Ok(Widget {
                    name: args.str(0)?.to_string(),
                    owner: args.object::<User>(1)?,
                })
            })
            .build(),
    );

    // Declaration order: int first, then string.
    catalog.register(
        TypeDescriptor::builder("Foo")
            .constructor([ParamType::Int], |args| Ok(Foo::FromInt(args.int(0)?)))
            .constructor([ParamType::String], |args| {
                Ok(Foo::FromString(args.str(0)?.to_string()))
            })
            .build(),
    );

    // Same types as Foo, declared the other way round.
    catalog.register(
        TypeDescriptor::builder("Oof")
            .constructor([ParamType::String], |args| {
                Ok(Foo::FromString(args.str(0)?.to_string()))
            })
            .constructor([ParamType::Int], |args| Ok(Foo::FromInt(args.int(0)?)))
            .build(),
    );

    catalog.register(
        TypeDescriptor::builder("Pair")
            .constructor([ParamType::Int, ParamType::Int], |args| {
                Ok(format!("ints {} {}", args.int(0)?, args.int(1)?))
            })
            .constructor([ParamType::String, ParamType::String], |args| {
                Ok(format!("strings {} {}", args.str(0)?, args.str(1)?))
            })
            .build(),
    );

    let counter = Arc::clone(&node_builds);
    catalog.register(
        TypeDescriptor::builder("Node")
            .constructor([ParamType::String], move |args| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Node {
                    label: args.str(0)?.to_string(),
                    next: None,
                })
            })
            .constructor([ParamType::String, ParamType::object("Node")], |args| {
                Ok(Node {
                    label: args.str(0)?.to_string(),
                    next: Some(args.object::<Node>(1)?),
                })
            })
            .build(),
    );

    // Two candidates sharing a reference in position 0; only the second
    // accepts a non-numeric literal in position 1.
    catalog.register(
        TypeDescriptor::builder("Holder")
            .constructor([ParamType::object("Node"), ParamType::Int], |args| {
                Ok(format!("{}#{}", args.object::<Node>(0)?.label, args.int(1)?))
            })
            .constructor([ParamType::object("Node"), ParamType::String], |args| {
                Ok(format!("{}:{}", args.object::<Node>(0)?.label, args.str(1)?))
            })
            .build(),
    );

    catalog.register(
        TypeDescriptor::builder("Strict")
            .constructor([ParamType::Int], |args| {
                let n = args.int(0)?;
                if n < 0 {
                    bail!("negative value {}", n);
                }
                Ok(n)
            })
            .build(),
    );

    catalog
}

pub fn fixture_factory() -> BeanFactory {
    BeanFactory::new(fixture_catalog(Arc::new(AtomicUsize::new(0))))
}
