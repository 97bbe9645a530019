//! Shared corpus builders for unit tests.

use crate::model::{FieldRecord, MethodRecord, TypeKind, TypeRecord, Variable};

/// A method with no parameters and the given raw call expressions.
pub(crate) fn method(name: &str, calls: &[&str]) -> MethodRecord {
    method_with_params(name, &[], calls)
}

/// A method with `(type, name)` parameters.
pub(crate) fn method_with_params(name: &str, params: &[(&str, &str)], calls: &[&str]) -> MethodRecord {
    MethodRecord {
        name: name.to_string(),
        return_type: "void".to_string(),
        parameters: params.iter().map(|(t, n)| Variable::new(t, n)).collect(),
        locals: Vec::new(),
        calls: calls.iter().map(|c| c.to_string()).collect(),
    }
}

pub(crate) fn returning(mut m: MethodRecord, return_type: &str) -> MethodRecord {
    m.return_type = return_type.to_string();
    m
}

pub(crate) fn with_locals(mut m: MethodRecord, locals: &[(&str, &str)]) -> MethodRecord {
    m.locals = locals.iter().map(|(t, n)| Variable::new(t, n)).collect();
    m
}

pub(crate) fn type_rec(package: &str, name: &str, kind: TypeKind, methods: Vec<MethodRecord>) -> TypeRecord {
    TypeRecord {
        package: package.to_string(),
        name: name.to_string(),
        kind,
        fields: Vec::new(),
        methods,
        parent: None,
        interfaces: Vec::new(),
    }
}

pub(crate) fn with_fields(mut t: TypeRecord, fields: &[(&str, &str)]) -> TypeRecord {
    t.fields = fields
        .iter()
        .map(|(ty, name)| FieldRecord {
            name: name.to_string(),
            type_name: ty.to_string(),
            annotations: Vec::new(),
        })
        .collect();
    t
}

pub(crate) fn with_parent(mut t: TypeRecord, parent: &str) -> TypeRecord {
    t.parent = Some(parent.to_string());
    t
}
