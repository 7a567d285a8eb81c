//! Type model for member completion
//!
//! Types are described by [`TypeDecl`]s (name, supertypes, member
//! descriptors) stored in a [`TypeUniverse`]. A [`TypeScope`] resolves type
//! names the way a compilation unit sees them: document types, imports, the
//! current package and `java.lang`.

use std::fmt;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::error::{ResolveError, ResolveResult};
use crate::base::constants::{IMPLICIT_PACKAGE, OBJECT_TYPE};

/// Declared accessibility of a member.
///
/// `Unknown` is for members whose declaration could not be introspected;
/// completion treats them as accessible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Package,
    Private,
    Unknown,
}

impl Visibility {
    pub fn is_accessible(self) -> bool {
        matches!(self, Visibility::Public | Visibility::Unknown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
    Void,
}

impl PrimitiveType {
    pub fn from_keyword(name: &str) -> Option<PrimitiveType> {
        Some(match name {
            "boolean" => PrimitiveType::Boolean,
            "byte" => PrimitiveType::Byte,
            "short" => PrimitiveType::Short,
            "int" => PrimitiveType::Int,
            "long" => PrimitiveType::Long,
            "char" => PrimitiveType::Char,
            "float" => PrimitiveType::Float,
            "double" => PrimitiveType::Double,
            "void" => PrimitiveType::Void,
            _ => return None,
        })
    }

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Char => "char",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Void => "void",
        }
    }

    fn numeric_rank(self) -> Option<u8> {
        match self {
            PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Char | PrimitiveType::Int => {
                Some(0)
            }
            PrimitiveType::Long => Some(1),
            PrimitiveType::Float => Some(2),
            PrimitiveType::Double => Some(3),
            PrimitiveType::Boolean | PrimitiveType::Void => None,
        }
    }

    /// Binary numeric promotion.
    pub fn promote(self, other: PrimitiveType) -> Option<PrimitiveType> {
        let rank = self.numeric_rank()?.max(other.numeric_rank()?);
        Some(match rank {
            0 => PrimitiveType::Int,
            1 => PrimitiveType::Long,
            2 => PrimitiveType::Float,
            _ => PrimitiveType::Double,
        })
    }

    /// Boxed counterpart, used when a primitive appears where a reference is needed.
    pub fn boxed(self) -> Option<&'static str> {
        Some(match self {
            PrimitiveType::Boolean => "java.lang.Boolean",
            PrimitiveType::Int => "java.lang.Integer",
            PrimitiveType::Long => "java.lang.Long",
            PrimitiveType::Double => "java.lang.Double",
            PrimitiveType::Char => "java.lang.Character",
            _ => return None,
        })
    }
}

/// A type as written in source, with type arguments erased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    pub name: SmolStr,
    pub dims: usize,
}

impl TypeName {
    pub fn new(name: impl Into<SmolStr>, dims: usize) -> Self {
        Self {
            name: name.into(),
            dims,
        }
    }

    /// Parse `java.util.List<String>[]` style text.
    pub fn parse(text: &str) -> Self {
        let mut name = String::new();
        let mut depth = 0usize;
        let mut dims = 0;
        for ch in text.chars() {
            match ch {
                '<' => depth += 1,
                '>' => depth = depth.saturating_sub(1),
                '[' if depth == 0 => dims += 1,
                _ if depth > 0 || ch.is_whitespace() || ch == ']' => {}
                _ => name.push(ch),
            }
        }
        Self::new(name, dims)
    }

    pub fn element(&self) -> Option<TypeName> {
        (self.dims > 0).then(|| TypeName::new(self.name.clone(), self.dims - 1))
    }

    pub fn is_var(&self) -> bool {
        self.dims == 0 && self.name == "var"
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for _ in 0..self.dims {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: SmolStr,
    pub ty: TypeName,
    pub visibility: Visibility,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: SmolStr,
    pub return_type: TypeName,
    pub param_count: usize,
    pub visibility: Visibility,
    pub is_static: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
}

/// A class, interface or enum with its direct members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub qualified_name: SmolStr,
    pub kind: TypeKind,
    pub supertypes: Vec<TypeName>,
    pub fields: Vec<FieldDescriptor>,
    pub methods: Vec<MethodDescriptor>,
}

impl TypeDecl {
    pub fn new(qualified_name: impl Into<SmolStr>, kind: TypeKind) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind,
            supertypes: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit_once('.')
            .map_or(self.qualified_name.as_str(), |(_, simple)| simple)
    }

    pub fn package(&self) -> &str {
        self.qualified_name
            .rsplit_once('.')
            .map_or("", |(package, _)| package)
    }
}

/// Types by qualified name, optionally layered over a parent universe.
#[derive(Debug, Default)]
pub struct TypeUniverse {
    types: FxHashMap<SmolStr, Arc<TypeDecl>>,
    parent: Option<Arc<TypeUniverse>>,
}

impl TypeUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: Arc<TypeUniverse>) -> Self {
        Self {
            types: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Insert or replace a declaration in this layer.
    pub fn insert(&mut self, decl: TypeDecl) -> Arc<TypeDecl> {
        let decl = Arc::new(decl);
        self.types.insert(decl.qualified_name.clone(), decl.clone());
        decl
    }

    pub fn get(&self, qualified_name: &str) -> Option<Arc<TypeDecl>> {
        self.types
            .get(qualified_name)
            .cloned()
            .or_else(|| self.parent.as_ref()?.get(qualified_name))
    }

    pub fn len(&self) -> usize {
        self.types.len() + self.parent.as_ref().map_or(0, |parent| parent.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An import declaration: `import [static] a.b.C[.*];`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub path: SmolStr,
    pub wildcard: bool,
    pub is_static: bool,
}

/// Resolves type names as seen from one compilation unit.
#[derive(Debug)]
pub struct TypeScope {
    universe: Arc<TypeUniverse>,
    package: Option<SmolStr>,
    imports: Vec<Import>,
    /// Simple (and `Outer.Inner`) names of document types to qualified names.
    local_types: FxHashMap<SmolStr, SmolStr>,
}

impl TypeScope {
    pub fn new(universe: Arc<TypeUniverse>) -> Self {
        Self {
            universe,
            package: None,
            imports: Vec::new(),
            local_types: FxHashMap::default(),
        }
    }

    pub fn with_package(mut self, package: Option<SmolStr>) -> Self {
        self.package = package;
        self
    }

    pub fn with_imports(mut self, imports: Vec<Import>) -> Self {
        self.imports = imports;
        self
    }

    pub fn with_local_type(mut self, name: SmolStr, qualified_name: SmolStr) -> Self {
        self.local_types.insert(name, qualified_name);
        self
    }

    pub fn universe(&self) -> &Arc<TypeUniverse> {
        &self.universe
    }

    /// Find the declaration a type name refers to.
    pub fn lookup(&self, name: &str) -> Option<Arc<TypeDecl>> {
        if let Some(qualified) = self.local_types.get(name) {
            return self.universe.get(qualified);
        }
        if name.contains('.') {
            return self.universe.get(name).or_else(|| {
                let package = self.package.as_deref()?;
                self.universe.get(&format!("{package}.{name}"))
            });
        }
        let single = self
            .imports
            .iter()
            .filter(|import| !import.wildcard && !import.is_static)
            .find(|import| import.path.rsplit('.').next() == Some(name))
            .and_then(|import| self.universe.get(&import.path));
        single
            .or_else(|| {
                let package = self.package.as_deref()?;
                self.universe.get(&format!("{package}.{name}"))
            })
            .or_else(|| {
                self.imports
                    .iter()
                    .filter(|import| import.wildcard && !import.is_static)
                    .find_map(|import| self.universe.get(&format!("{}.{name}", import.path)))
            })
            .or_else(|| self.universe.get(&format!("{IMPLICIT_PACKAGE}.{name}")))
    }

    /// Resolve a written type to a [`ResolvedType`].
    pub fn resolve(self: &Arc<Self>, ty: &TypeName) -> ResolveResult<ResolvedType> {
        let base = match PrimitiveType::from_keyword(&ty.name) {
            Some(primitive) => ResolvedType::Primitive(primitive),
            None => {
                let decl = self
                    .lookup(&ty.name)
                    .ok_or_else(|| ResolveError::UnknownType(ty.name.clone()))?;
                ResolvedType::Reference(ReferenceType::new(decl, self.clone()))
            }
        };
        Ok((0..ty.dims).fold(base, |element, _| ResolvedType::Array(Box::new(element))))
    }

    /// Resolve a type known by qualified name, e.g. `java.lang.String`.
    pub fn reference(self: &Arc<Self>, qualified_name: &str) -> ResolveResult<ReferenceType> {
        self.universe
            .get(qualified_name)
            .map(|decl| ReferenceType::new(decl, self.clone()))
            .ok_or_else(|| ResolveError::UnknownType(qualified_name.into()))
    }
}

/// The result of resolving an expression's type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedType {
    Primitive(PrimitiveType),
    Array(Box<ResolvedType>),
    Reference(ReferenceType),
}

impl ResolvedType {
    pub fn describe(&self) -> String {
        match self {
            ResolvedType::Primitive(primitive) => primitive.keyword().to_string(),
            ResolvedType::Array(element) => format!("{}[]", element.describe()),
            ResolvedType::Reference(reference) => reference.qualified_name().to_string(),
        }
    }

    pub fn is_reference_to(&self, qualified_name: &str) -> bool {
        matches!(self, ResolvedType::Reference(reference) if reference.qualified_name() == qualified_name)
    }
}

/// A class, interface or enum type together with the scope that resolves
/// its supertypes.
#[derive(Debug, Clone)]
pub struct ReferenceType {
    decl: Arc<TypeDecl>,
    scope: Arc<TypeScope>,
}

impl PartialEq for ReferenceType {
    fn eq(&self, other: &Self) -> bool {
        self.decl.qualified_name == other.decl.qualified_name
    }
}

impl ReferenceType {
    pub fn new(decl: Arc<TypeDecl>, scope: Arc<TypeScope>) -> Self {
        Self { decl, scope }
    }

    pub fn decl(&self) -> &TypeDecl {
        &self.decl
    }

    pub fn qualified_name(&self) -> &str {
        &self.decl.qualified_name
    }

    pub fn scope(&self) -> &Arc<TypeScope> {
        &self.scope
    }

    /// This type followed by all its supertypes, depth first, each once.
    /// `java.lang.Object` comes last.
    pub fn ancestors(&self) -> ResolveResult<Vec<Arc<TypeDecl>>> {
        let mut seen = FxHashSet::default();
        let mut ordered = Vec::new();
        let mut stack = vec![self.decl.clone()];
        while let Some(decl) = stack.pop() {
            if !seen.insert(decl.qualified_name.clone()) {
                continue;
            }
            // Supertypes are pushed in reverse so the first declared is visited first.
            for supertype in decl.supertypes.iter().rev() {
                let resolved = self
                    .scope
                    .lookup(&supertype.name)
                    .ok_or_else(|| ResolveError::UnknownType(supertype.name.clone()))?;
                stack.push(resolved);
            }
            if decl.qualified_name != OBJECT_TYPE {
                ordered.push(decl);
            }
        }
        if let Some(object) = self.scope.universe().get(OBJECT_TYPE) {
            ordered.push(object);
        }
        Ok(ordered)
    }

    /// Own fields of any visibility, then inherited non-private fields.
    pub fn fields_visible_to_inheritors(&self) -> ResolveResult<Vec<FieldDescriptor>> {
        let mut fields = Vec::new();
        for (depth, decl) in self.ancestors()?.iter().enumerate() {
            fields.extend(
                decl.fields
                    .iter()
                    .filter(|field| depth == 0 || field.visibility != Visibility::Private)
                    .cloned(),
            );
        }
        Ok(fields)
    }

    /// Own methods of any visibility, then inherited non-private methods.
    pub fn all_methods(&self) -> ResolveResult<Vec<MethodDescriptor>> {
        let mut methods = Vec::new();
        for (depth, decl) in self.ancestors()?.iter().enumerate() {
            methods.extend(
                decl.methods
                    .iter()
                    .filter(|method| depth == 0 || method.visibility != Visibility::Private)
                    .cloned(),
            );
        }
        Ok(methods)
    }

    pub fn field(&self, name: &str) -> ResolveResult<Option<FieldDescriptor>> {
        Ok(self
            .fields_visible_to_inheritors()?
            .into_iter()
            .find(|field| field.name == name))
    }

    pub fn methods_named(&self, name: &str) -> ResolveResult<Vec<MethodDescriptor>> {
        Ok(self
            .all_methods()?
            .into_iter()
            .filter(|method| method.name == name)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe() -> Arc<TypeUniverse> {
        let mut universe = TypeUniverse::new();
        let mut object = TypeDecl::new(OBJECT_TYPE, TypeKind::Class);
        object.methods.push(MethodDescriptor {
            name: "hashCode".into(),
            return_type: TypeName::new("int", 0),
            param_count: 0,
            visibility: Visibility::Public,
            is_static: false,
        });
        universe.insert(object);

        let mut base = TypeDecl::new("org.example.Base", TypeKind::Class);
        base.fields.push(FieldDescriptor {
            name: "secret".into(),
            ty: TypeName::new("int", 0),
            visibility: Visibility::Private,
            is_static: false,
        });
        base.fields.push(FieldDescriptor {
            name: "shared".into(),
            ty: TypeName::new("int", 0),
            visibility: Visibility::Public,
            is_static: false,
        });
        universe.insert(base);

        let mut derived = TypeDecl::new("org.example.Derived", TypeKind::Class);
        derived.supertypes.push(TypeName::new("Base", 0));
        derived.fields.push(FieldDescriptor {
            name: "own".into(),
            ty: TypeName::new("Base", 1),
            visibility: Visibility::Private,
            is_static: false,
        });
        universe.insert(derived);
        Arc::new(universe)
    }

    fn scope() -> Arc<TypeScope> {
        Arc::new(TypeScope::new(universe()).with_package(Some("org.example".into())))
    }

    #[test]
    fn type_name_parse_erases_arguments() {
        assert_eq!(TypeName::parse("java.util.List<String>"), TypeName::new("java.util.List", 0));
        assert_eq!(TypeName::parse("Map<K, V[]>[][]"), TypeName::new("Map", 2));
        assert_eq!(TypeName::parse("int[]").to_string(), "int[]");
    }

    #[test]
    fn inherited_private_fields_are_hidden() {
        let scope = scope();
        let derived = scope.reference("org.example.Derived").unwrap();
        let names: Vec<_> = derived
            .fields_visible_to_inheritors()
            .unwrap()
            .into_iter()
            .map(|field| field.name)
            .collect();
        assert_eq!(names, vec!["own", "shared"]);
    }

    #[test]
    fn ancestors_end_with_object() {
        let scope = scope();
        let derived = scope.reference("org.example.Derived").unwrap();
        let names: Vec<_> = derived
            .ancestors()
            .unwrap()
            .iter()
            .map(|decl| decl.qualified_name.to_string())
            .collect();
        assert_eq!(names, vec!["org.example.Derived", "org.example.Base", OBJECT_TYPE]);
        assert_eq!(derived.methods_named("hashCode").unwrap().len(), 1);
    }

    #[test]
    fn unknown_supertype_is_an_error() {
        let mut universe = TypeUniverse::with_parent(universe());
        let mut orphan = TypeDecl::new("Orphan", TypeKind::Class);
        orphan.supertypes.push(TypeName::new("Missing", 0));
        universe.insert(orphan);
        let scope = Arc::new(TypeScope::new(Arc::new(universe)));
        let orphan = scope.reference("Orphan").unwrap();
        assert_eq!(
            orphan.all_methods(),
            Err(ResolveError::UnknownType("Missing".into()))
        );
    }

    #[test]
    fn resolve_wraps_array_dimensions() {
        let scope = scope();
        let resolved = scope.resolve(&TypeName::new("Base", 2)).unwrap();
        assert_eq!(resolved.describe(), "org.example.Base[][]");
        let primitive = scope.resolve(&TypeName::new("long", 0)).unwrap();
        assert_eq!(primitive, ResolvedType::Primitive(PrimitiveType::Long));
    }

    #[test]
    fn numeric_promotion() {
        assert_eq!(PrimitiveType::Int.promote(PrimitiveType::Double), Some(PrimitiveType::Double));
        assert_eq!(PrimitiveType::Char.promote(PrimitiveType::Short), Some(PrimitiveType::Int));
        assert_eq!(PrimitiveType::Boolean.promote(PrimitiveType::Int), None);
    }

    #[test]
    fn only_public_and_unknown_are_accessible() {
        assert!(Visibility::Public.is_accessible());
        assert!(Visibility::Unknown.is_accessible());
        assert!(!Visibility::Protected.is_accessible());
        assert!(!Visibility::Package.is_accessible());
        assert!(!Visibility::Private.is_accessible());
    }
}
