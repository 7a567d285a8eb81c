//! Built-in type universe: the commonly used part of `java.lang`,
//! `java.util`, `java.io` and `java.math`.
//!
//! Overloads with different return types are listed once with the most
//! general return type, so calls through this table resolve unambiguously.
//! Type arguments are erased.

use std::sync::{Arc, LazyLock};

use super::types::{
    FieldDescriptor, MethodDescriptor, TypeDecl, TypeKind, TypeName, TypeUniverse, Visibility,
};

#[derive(Clone, Copy)]
enum MemberKind {
    Field,
    Method,
}

#[derive(Clone, Copy)]
struct Member {
    kind: MemberKind,
    name: &'static str,
    ty: &'static str,
    params: usize,
    visibility: Visibility,
    is_static: bool,
}

impl Member {
    const fn field(name: &'static str, ty: &'static str) -> Self {
        Self {
            kind: MemberKind::Field,
            name,
            ty,
            params: 0,
            visibility: Visibility::Public,
            is_static: false,
        }
    }

    const fn method(name: &'static str, ty: &'static str, params: usize) -> Self {
        Self {
            kind: MemberKind::Method,
            name,
            ty,
            params,
            visibility: Visibility::Public,
            is_static: false,
        }
    }

    const fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    const fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

struct Builtin {
    name: &'static str,
    kind: TypeKind,
    supertypes: &'static [&'static str],
    members: &'static [Member],
}

const fn field(name: &'static str, ty: &'static str) -> Member {
    Member::field(name, ty)
}

const fn method(name: &'static str, ty: &'static str, params: usize) -> Member {
    Member::method(name, ty, params)
}

const fn static_field(name: &'static str, ty: &'static str) -> Member {
    Member::field(name, ty).as_static()
}

const fn static_method(name: &'static str, ty: &'static str, params: usize) -> Member {
    Member::method(name, ty, params).as_static()
}

const PRIVATE: Visibility = Visibility::Private;
const PROTECTED: Visibility = Visibility::Protected;

const NUMBER_METHODS: [Member; 6] = [
    method("intValue", "int", 0),
    method("longValue", "long", 0),
    method("doubleValue", "double", 0),
    method("floatValue", "float", 0),
    method("shortValue", "short", 0),
    method("byteValue", "byte", 0),
];

const COLLECTION_METHODS: [Member; 11] = [
    method("size", "int", 0),
    method("isEmpty", "boolean", 0),
    method("contains", "boolean", 1),
    method("add", "boolean", 1),
    method("remove", "boolean", 1),
    method("addAll", "boolean", 1),
    method("removeAll", "boolean", 1),
    method("clear", "void", 0),
    method("stream", "java.util.stream.Stream", 0),
    method("toArray", "java.lang.Object[]", 0),
    method("iterator", "java.util.Iterator", 0),
];

const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "java.lang.Object",
        kind: TypeKind::Class,
        supertypes: &[],
        members: &[
            method("getClass", "java.lang.Class", 0),
            method("hashCode", "int", 0),
            method("equals", "boolean", 1),
            method("toString", "java.lang.String", 0),
            method("notify", "void", 0),
            method("notifyAll", "void", 0),
            method("wait", "void", 0),
            method("clone", "java.lang.Object", 0).with_visibility(PROTECTED),
            method("finalize", "void", 0).with_visibility(PROTECTED),
        ],
    },
    Builtin {
        name: "java.lang.CharSequence",
        kind: TypeKind::Interface,
        supertypes: &[],
        members: &[
            method("length", "int", 0),
            method("charAt", "char", 1),
            method("subSequence", "java.lang.CharSequence", 2),
            method("isEmpty", "boolean", 0),
        ],
    },
    Builtin {
        name: "java.lang.Comparable",
        kind: TypeKind::Interface,
        supertypes: &[],
        members: &[method("compareTo", "int", 1)],
    },
    Builtin {
        name: "java.lang.Iterable",
        kind: TypeKind::Interface,
        supertypes: &[],
        members: &[
            method("iterator", "java.util.Iterator", 0),
            method("forEach", "void", 1),
        ],
    },
    Builtin {
        name: "java.lang.String",
        kind: TypeKind::Class,
        supertypes: &["java.lang.CharSequence", "java.lang.Comparable"],
        members: &[
            field("value", "byte[]").with_visibility(PRIVATE),
            field("hash", "int").with_visibility(PRIVATE),
            static_field("CASE_INSENSITIVE_ORDER", "java.util.Comparator"),
            method("length", "int", 0),
            method("charAt", "char", 1),
            method("isEmpty", "boolean", 0),
            method("isBlank", "boolean", 0),
            method("substring", "java.lang.String", 1),
            method("substring", "java.lang.String", 2),
            method("indexOf", "int", 1),
            method("lastIndexOf", "int", 1),
            method("contains", "boolean", 1),
            method("startsWith", "boolean", 1),
            method("endsWith", "boolean", 1),
            method("equalsIgnoreCase", "boolean", 1),
            method("compareTo", "int", 1),
            method("toUpperCase", "java.lang.String", 0),
            method("toLowerCase", "java.lang.String", 0),
            method("trim", "java.lang.String", 0),
            method("strip", "java.lang.String", 0),
            method("replace", "java.lang.String", 2),
            method("split", "java.lang.String[]", 1),
            method("toCharArray", "char[]", 0),
            method("getBytes", "byte[]", 0),
            method("matches", "boolean", 1),
            method("concat", "java.lang.String", 1),
            method("intern", "java.lang.String", 0),
            method("repeat", "java.lang.String", 1),
            static_method("valueOf", "java.lang.String", 1),
            static_method("format", "java.lang.String", 2),
            static_method("join", "java.lang.String", 2),
        ],
    },
    Builtin {
        name: "java.lang.StringBuilder",
        kind: TypeKind::Class,
        supertypes: &["java.lang.CharSequence"],
        members: &[
            method("append", "java.lang.StringBuilder", 1),
            method("insert", "java.lang.StringBuilder", 2),
            method("reverse", "java.lang.StringBuilder", 0),
            method("deleteCharAt", "java.lang.StringBuilder", 1),
            method("setLength", "void", 1),
            method("indexOf", "int", 1),
        ],
    },
    Builtin {
        name: "java.lang.System",
        kind: TypeKind::Class,
        supertypes: &[],
        members: &[
            static_field("out", "java.io.PrintStream"),
            static_field("in", "java.io.InputStream"),
            static_field("err", "java.io.PrintStream"),
            static_field("lineSeparator", "java.lang.String").with_visibility(PRIVATE),
            static_method("currentTimeMillis", "long", 0),
            static_method("nanoTime", "long", 0),
            static_method("arraycopy", "void", 5),
            static_method("gc", "void", 0),
            static_method("exit", "void", 1),
            static_method("getProperty", "java.lang.String", 1),
            static_method("getenv", "java.lang.String", 1),
            static_method("lineSeparator", "java.lang.String", 0),
            static_method("identityHashCode", "int", 1),
            static_method("setOut", "void", 1),
            static_method("setErr", "void", 1),
            static_method("setIn", "void", 1),
            static_method("load", "void", 1),
            static_method("loadLibrary", "void", 1),
            static_method("registerNatives", "void", 0).with_visibility(PRIVATE),
        ],
    },
    Builtin {
        name: "java.lang.Math",
        kind: TypeKind::Class,
        supertypes: &[],
        members: &[
            static_field("PI", "double"),
            static_field("E", "double"),
            static_method("abs", "double", 1),
            static_method("max", "double", 2),
            static_method("min", "double", 2),
            static_method("pow", "double", 2),
            static_method("sqrt", "double", 1),
            static_method("floor", "double", 1),
            static_method("ceil", "double", 1),
            static_method("round", "long", 1),
            static_method("random", "double", 0),
            static_method("sin", "double", 1),
            static_method("cos", "double", 1),
            static_method("log", "double", 1),
            static_method("exp", "double", 1),
        ],
    },
    Builtin {
        name: "java.lang.Number",
        kind: TypeKind::Class,
        supertypes: &[],
        members: &NUMBER_METHODS,
    },
    Builtin {
        name: "java.lang.Integer",
        kind: TypeKind::Class,
        supertypes: &["java.lang.Number", "java.lang.Comparable"],
        members: &[
            field("value", "int").with_visibility(PRIVATE),
            static_field("MAX_VALUE", "int"),
            static_field("MIN_VALUE", "int"),
            static_method("parseInt", "int", 1),
            static_method("valueOf", "java.lang.Integer", 1),
            static_method("compare", "int", 2),
            static_method("sum", "int", 2),
            method("compareTo", "int", 1),
        ],
    },
    Builtin {
        name: "java.lang.Long",
        kind: TypeKind::Class,
        supertypes: &["java.lang.Number", "java.lang.Comparable"],
        members: &[
            field("value", "long").with_visibility(PRIVATE),
            static_field("MAX_VALUE", "long"),
            static_field("MIN_VALUE", "long"),
            static_method("parseLong", "long", 1),
            static_method("valueOf", "java.lang.Long", 1),
            static_method("compare", "int", 2),
            method("compareTo", "int", 1),
        ],
    },
    Builtin {
        name: "java.lang.Double",
        kind: TypeKind::Class,
        supertypes: &["java.lang.Number", "java.lang.Comparable"],
        members: &[
            field("value", "double").with_visibility(PRIVATE),
            static_field("MAX_VALUE", "double"),
            static_field("MIN_VALUE", "double"),
            static_field("NaN", "double"),
            static_method("parseDouble", "double", 1),
            static_method("valueOf", "java.lang.Double", 1),
            static_method("compare", "int", 2),
            method("isNaN", "boolean", 0),
            method("compareTo", "int", 1),
        ],
    },
    Builtin {
        name: "java.lang.Boolean",
        kind: TypeKind::Class,
        supertypes: &["java.lang.Comparable"],
        members: &[
            static_field("TRUE", "java.lang.Boolean"),
            static_field("FALSE", "java.lang.Boolean"),
            static_method("parseBoolean", "boolean", 1),
            static_method("valueOf", "java.lang.Boolean", 1),
            method("booleanValue", "boolean", 0),
            method("compareTo", "int", 1),
        ],
    },
    Builtin {
        name: "java.lang.Character",
        kind: TypeKind::Class,
        supertypes: &["java.lang.Comparable"],
        members: &[
            static_method("isDigit", "boolean", 1),
            static_method("isLetter", "boolean", 1),
            static_method("isWhitespace", "boolean", 1),
            static_method("toUpperCase", "char", 1),
            static_method("toLowerCase", "char", 1),
            method("charValue", "char", 0),
            method("compareTo", "int", 1),
        ],
    },
    Builtin {
        name: "java.lang.Class",
        kind: TypeKind::Class,
        supertypes: &[],
        members: &[
            method("getName", "java.lang.String", 0),
            method("getSimpleName", "java.lang.String", 0),
            method("getSuperclass", "java.lang.Class", 0),
            method("isInstance", "boolean", 1),
            method("isInterface", "boolean", 0),
            method("cast", "java.lang.Object", 1),
        ],
    },
    Builtin {
        name: "java.lang.Enum",
        kind: TypeKind::Class,
        supertypes: &["java.lang.Comparable"],
        members: &[
            method("name", "java.lang.String", 0),
            method("ordinal", "int", 0),
            method("compareTo", "int", 1),
            method("getDeclaringClass", "java.lang.Class", 0),
        ],
    },
    Builtin {
        name: "java.lang.Throwable",
        kind: TypeKind::Class,
        supertypes: &[],
        members: &[
            method("getMessage", "java.lang.String", 0),
            method("getLocalizedMessage", "java.lang.String", 0),
            method("getCause", "java.lang.Throwable", 0),
            method("printStackTrace", "void", 0),
        ],
    },
    Builtin {
        name: "java.lang.Exception",
        kind: TypeKind::Class,
        supertypes: &["java.lang.Throwable"],
        members: &[],
    },
    Builtin {
        name: "java.lang.RuntimeException",
        kind: TypeKind::Class,
        supertypes: &["java.lang.Exception"],
        members: &[],
    },
    Builtin {
        name: "java.lang.IllegalArgumentException",
        kind: TypeKind::Class,
        supertypes: &["java.lang.RuntimeException"],
        members: &[],
    },
    Builtin {
        name: "java.lang.IllegalStateException",
        kind: TypeKind::Class,
        supertypes: &["java.lang.RuntimeException"],
        members: &[],
    },
    Builtin {
        name: "java.io.OutputStream",
        kind: TypeKind::Class,
        supertypes: &[],
        members: &[
            method("write", "void", 1),
            method("flush", "void", 0),
            method("close", "void", 0),
        ],
    },
    Builtin {
        name: "java.io.PrintStream",
        kind: TypeKind::Class,
        supertypes: &["java.io.OutputStream"],
        members: &[
            method("println", "void", 1),
            method("print", "void", 1),
            method("printf", "java.io.PrintStream", 2),
            method("format", "java.io.PrintStream", 2),
            method("append", "java.io.PrintStream", 1),
            method("checkError", "boolean", 0),
        ],
    },
    Builtin {
        name: "java.io.InputStream",
        kind: TypeKind::Class,
        supertypes: &[],
        members: &[
            method("read", "int", 0),
            method("available", "int", 0),
            method("skip", "long", 1),
            method("mark", "void", 1),
            method("reset", "void", 0),
            method("markSupported", "boolean", 0),
            method("readAllBytes", "byte[]", 0),
            method("close", "void", 0),
        ],
    },
    Builtin {
        name: "java.util.Collection",
        kind: TypeKind::Interface,
        supertypes: &["java.lang.Iterable"],
        members: &COLLECTION_METHODS,
    },
    Builtin {
        name: "java.util.List",
        kind: TypeKind::Interface,
        supertypes: &["java.util.Collection"],
        members: &[
            method("get", "java.lang.Object", 1),
            method("set", "java.lang.Object", 2),
            method("indexOf", "int", 1),
            method("subList", "java.util.List", 2),
            method("sort", "void", 1),
            static_method("of", "java.util.List", 1),
        ],
    },
    Builtin {
        name: "java.util.Set",
        kind: TypeKind::Interface,
        supertypes: &["java.util.Collection"],
        members: &[static_method("of", "java.util.Set", 1)],
    },
    Builtin {
        name: "java.util.Map",
        kind: TypeKind::Interface,
        supertypes: &[],
        members: &[
            method("get", "java.lang.Object", 1),
            method("put", "java.lang.Object", 2),
            method("remove", "java.lang.Object", 1),
            method("getOrDefault", "java.lang.Object", 2),
            method("putIfAbsent", "java.lang.Object", 2),
            method("containsKey", "boolean", 1),
            method("containsValue", "boolean", 1),
            method("keySet", "java.util.Set", 0),
            method("values", "java.util.Collection", 0),
            method("entrySet", "java.util.Set", 0),
            method("size", "int", 0),
            method("isEmpty", "boolean", 0),
            method("clear", "void", 0),
            static_method("of", "java.util.Map", 0),
        ],
    },
    Builtin {
        name: "java.util.ArrayList",
        kind: TypeKind::Class,
        supertypes: &["java.util.List"],
        members: &[
            field("elementData", "java.lang.Object[]").with_visibility(Visibility::Package),
            field("size", "int").with_visibility(PRIVATE),
            method("ensureCapacity", "void", 1),
            method("trimToSize", "void", 0),
        ],
    },
    Builtin {
        name: "java.util.HashMap",
        kind: TypeKind::Class,
        supertypes: &["java.util.Map"],
        members: &[field("table", "java.lang.Object[]").with_visibility(Visibility::Package)],
    },
    Builtin {
        name: "java.util.HashSet",
        kind: TypeKind::Class,
        supertypes: &["java.util.Set"],
        members: &[],
    },
    Builtin {
        name: "java.util.Iterator",
        kind: TypeKind::Interface,
        supertypes: &[],
        members: &[
            method("hasNext", "boolean", 0),
            method("next", "java.lang.Object", 0),
            method("remove", "void", 0),
        ],
    },
    Builtin {
        name: "java.util.Comparator",
        kind: TypeKind::Interface,
        supertypes: &[],
        members: &[
            method("compare", "int", 2),
            method("reversed", "java.util.Comparator", 0),
        ],
    },
    Builtin {
        name: "java.util.Optional",
        kind: TypeKind::Class,
        supertypes: &[],
        members: &[
            method("isPresent", "boolean", 0),
            method("isEmpty", "boolean", 0),
            method("get", "java.lang.Object", 0),
            method("orElse", "java.lang.Object", 1),
            method("ifPresent", "void", 1),
            method("map", "java.util.Optional", 1),
            static_method("of", "java.util.Optional", 1),
            static_method("ofNullable", "java.util.Optional", 1),
            static_method("empty", "java.util.Optional", 0),
        ],
    },
    Builtin {
        name: "java.util.Objects",
        kind: TypeKind::Class,
        supertypes: &[],
        members: &[
            static_method("equals", "boolean", 2),
            static_method("hash", "int", 1),
            static_method("hashCode", "int", 1),
            static_method("isNull", "boolean", 1),
            static_method("nonNull", "boolean", 1),
            static_method("requireNonNull", "java.lang.Object", 1),
            static_method("toString", "java.lang.String", 1),
        ],
    },
    Builtin {
        name: "java.util.Arrays",
        kind: TypeKind::Class,
        supertypes: &[],
        members: &[
            static_method("asList", "java.util.List", 1),
            static_method("sort", "void", 1),
            static_method("toString", "java.lang.String", 1),
            static_method("fill", "void", 2),
            static_method("copyOf", "java.lang.Object[]", 2),
            static_method("stream", "java.util.stream.Stream", 1),
        ],
    },
    Builtin {
        name: "java.util.Collections",
        kind: TypeKind::Class,
        supertypes: &[],
        members: &[
            static_method("emptyList", "java.util.List", 0),
            static_method("singletonList", "java.util.List", 1),
            static_method("unmodifiableList", "java.util.List", 1),
            static_method("sort", "void", 1),
        ],
    },
    Builtin {
        name: "java.util.stream.Stream",
        kind: TypeKind::Interface,
        supertypes: &[],
        members: &[
            method("filter", "java.util.stream.Stream", 1),
            method("map", "java.util.stream.Stream", 1),
            method("sorted", "java.util.stream.Stream", 0),
            method("distinct", "java.util.stream.Stream", 0),
            method("limit", "java.util.stream.Stream", 1),
            method("collect", "java.lang.Object", 1),
            method("forEach", "void", 1),
            method("count", "long", 0),
            method("toList", "java.util.List", 0),
            method("anyMatch", "boolean", 1),
            method("allMatch", "boolean", 1),
            method("findFirst", "java.util.Optional", 0),
        ],
    },
    Builtin {
        name: "java.math.BigDecimal",
        kind: TypeKind::Class,
        supertypes: &["java.lang.Number", "java.lang.Comparable"],
        members: &[
            static_field("ZERO", "java.math.BigDecimal"),
            static_field("ONE", "java.math.BigDecimal"),
            static_field("TEN", "java.math.BigDecimal"),
            field("scale", "int").with_visibility(PRIVATE),
            method("add", "java.math.BigDecimal", 1),
            method("subtract", "java.math.BigDecimal", 1),
            method("multiply", "java.math.BigDecimal", 1),
            method("divide", "java.math.BigDecimal", 1),
            method("negate", "java.math.BigDecimal", 0),
            method("abs", "java.math.BigDecimal", 0),
            method("setScale", "java.math.BigDecimal", 2),
            method("scale", "int", 0),
            method("precision", "int", 0),
            method("signum", "int", 0),
            method("toPlainString", "java.lang.String", 0),
            method("compareTo", "int", 1),
            static_method("valueOf", "java.math.BigDecimal", 1),
        ],
    },
    Builtin {
        name: "java.math.BigInteger",
        kind: TypeKind::Class,
        supertypes: &["java.lang.Number", "java.lang.Comparable"],
        members: &[
            static_field("ZERO", "java.math.BigInteger"),
            static_field("ONE", "java.math.BigInteger"),
            static_field("TWO", "java.math.BigInteger"),
            static_field("TEN", "java.math.BigInteger"),
            method("add", "java.math.BigInteger", 1),
            method("subtract", "java.math.BigInteger", 1),
            method("multiply", "java.math.BigInteger", 1),
            method("divide", "java.math.BigInteger", 1),
            method("mod", "java.math.BigInteger", 1),
            method("pow", "java.math.BigInteger", 1),
            method("negate", "java.math.BigInteger", 0),
            method("abs", "java.math.BigInteger", 0),
            method("signum", "int", 0),
            method("bitLength", "int", 0),
            method("compareTo", "int", 1),
            static_method("valueOf", "java.math.BigInteger", 1),
        ],
    },
];

fn build(builtin: &Builtin) -> TypeDecl {
    let mut decl = TypeDecl::new(builtin.name, builtin.kind);
    decl.supertypes = builtin
        .supertypes
        .iter()
        .map(|name| TypeName::parse(name))
        .collect();
    for member in builtin.members {
        match member.kind {
            MemberKind::Field => decl.fields.push(FieldDescriptor {
                name: member.name.into(),
                ty: TypeName::parse(member.ty),
                visibility: member.visibility,
                is_static: member.is_static,
            }),
            MemberKind::Method => decl.methods.push(MethodDescriptor {
                name: member.name.into(),
                return_type: TypeName::parse(member.ty),
                param_count: member.params,
                visibility: member.visibility,
                is_static: member.is_static,
            }),
        }
    }
    decl
}

static JDK: LazyLock<Arc<TypeUniverse>> = LazyLock::new(|| {
    let mut universe = TypeUniverse::new();
    for builtin in BUILTINS {
        universe.insert(build(builtin));
    }
    Arc::new(universe)
});

/// The shared built-in universe.
pub fn jdk_universe() -> Arc<TypeUniverse> {
    JDK.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::types::TypeScope;

    #[test]
    fn supertypes_of_builtins_are_builtins() {
        let universe = jdk_universe();
        for builtin in BUILTINS {
            for supertype in builtin.supertypes {
                assert!(
                    universe.get(supertype).is_some(),
                    "{} extends unknown {supertype}",
                    builtin.name
                );
            }
        }
    }

    #[test]
    fn system_members() {
        let scope = Arc::new(TypeScope::new(jdk_universe()));
        let system = scope.reference("java.lang.System").unwrap();
        let fields = system.fields_visible_to_inheritors().unwrap();
        let out = fields.iter().find(|field| field.name == "out").unwrap();
        assert!(out.is_static);
        assert_eq!(out.ty.to_string(), "java.io.PrintStream");
        assert!(system.methods_named("gc").unwrap().len() == 1);
        // Object's members are inherited
        assert!(!system.methods_named("hashCode").unwrap().is_empty());
    }

    #[test]
    fn java_lang_is_implicit() {
        let scope = TypeScope::new(jdk_universe());
        assert!(scope.lookup("String").is_some());
        assert!(scope.lookup("List").is_none());
        assert!(scope.lookup("java.util.List").is_some());
    }
}
