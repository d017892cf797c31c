//! Type-union normalization: structural dedup, literal collapse, and
//! object-shape alignment.
//!
//! Used by the local inferrer to keep synthesized unions small and
//! stable. Structural comparison refuses to guess: a type-literal member
//! it cannot compare (computed name, index/call signature) is returned
//! as an error node for the caller to diagnose.

use bitflags::bitflags;
use tsd_ast::{
    KeywordTypeKind, LiteralValue, ModifierFlags, NodeArena, NodeId, NodeKind, builder,
};

bitflags! {
    /// Presence bits driving literal collapse: base keyword types OR'd
    /// with literal kinds seen in the union.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct CollapseFlags: u32 {
        const STRING = 1 << 0;
        const NUMBER = 1 << 1;
        const BOOLEAN = 1 << 2;
        const BIGINT = 1 << 3;
        const ANY = 1 << 4;
        const STRING_LIT = 1 << 8;
        const NUMBER_LIT = 1 << 9;
        const BIGINT_LIT = 1 << 10;
        const TRUE_LIT = 1 << 11;
        const FALSE_LIT = 1 << 12;
    }
}

/// Key of a comparable type-literal member: name, optionality,
/// modifiers, member type, and whether it is a method signature.
struct MemberKey {
    name: String,
    optional: bool,
    modifiers: ModifierFlags,
    ty: NodeId,
    is_method: bool,
}

/// Extract the comparable key of a type-literal member, or the member
/// itself when its shape cannot be compared safely.
fn member_key(arena: &NodeArena, member: NodeId) -> Result<MemberKey, NodeId> {
    match arena.get(member).map(|n| &n.kind) {
        Some(NodeKind::PropertySignature {
            name,
            ty,
            optional,
            modifiers,
        }) => {
            let name_text = plain_name(arena, *name).ok_or(member)?;
            Ok(MemberKey {
                name: name_text,
                optional: *optional,
                modifiers: *modifiers,
                ty: *ty,
                is_method: false,
            })
        }
        Some(NodeKind::MethodSignature {
            name, optional, ..
        }) => {
            let name_text = plain_name(arena, *name).ok_or(member)?;
            Ok(MemberKey {
                name: name_text,
                optional: *optional,
                modifiers: ModifierFlags::empty(),
                ty: member,
                is_method: true,
            })
        }
        _ => Err(member),
    }
}

fn plain_name(arena: &NodeArena, name: NodeId) -> Option<String> {
    match arena.get(name).map(|n| &n.kind) {
        Some(NodeKind::Ident(text)) => Some(text.clone()),
        Some(NodeKind::StringLit(text)) => Some(format!("\"{text}\"")),
        Some(NodeKind::NumberLit { text }) => Some(text.clone()),
        _ => None,
    }
}

fn literal_values_equal(a: &LiteralValue, b: &LiteralValue) -> bool {
    match (a, b) {
        (
            LiteralValue::Number {
                text: ta,
                negative: na,
            },
            LiteralValue::Number {
                text: tb,
                negative: nb,
            },
        ) => na == nb && ta.trim() == tb.trim(),
        (
            LiteralValue::BigInt {
                text: ta,
                negative: na,
            },
            LiteralValue::BigInt {
                text: tb,
                negative: nb,
            },
        ) => na == nb && ta.trim() == tb.trim(),
        _ => a == b,
    }
}

fn signatures_equal(
    arena: &NodeArena,
    a_params: &[NodeId],
    a_ret: NodeId,
    b_params: &[NodeId],
    b_ret: NodeId,
) -> Result<bool, NodeId> {
    if a_params.len() != b_params.len() {
        return Ok(false);
    }
    for (pa, pb) in a_params.iter().zip(b_params) {
        let (ta, rest_a, opt_a) = param_shape(arena, *pa);
        let (tb, rest_b, opt_b) = param_shape(arena, *pb);
        if rest_a != rest_b || opt_a != opt_b {
            return Ok(false);
        }
        if !types_equal_opt(arena, ta, tb)? {
            return Ok(false);
        }
    }
    types_equal_opt(arena, a_ret, b_ret)
}

fn param_shape(arena: &NodeArena, param: NodeId) -> (NodeId, bool, bool) {
    match arena.get(param).map(|n| &n.kind) {
        Some(NodeKind::Parameter {
            ty,
            dotdotdot,
            question,
            ..
        }) => (*ty, *dotdotdot, *question),
        _ => (NodeId::NONE, false, false),
    }
}

fn types_equal_opt(arena: &NodeArena, a: NodeId, b: NodeId) -> Result<bool, NodeId> {
    match (a.is_none(), b.is_none()) {
        (true, true) => Ok(true),
        (false, false) => types_equal(arena, a, b),
        _ => Ok(false),
    }
}

/// Structural, order-sensitive equality of two type nodes.
///
/// `Err(node)` reports a member whose shape cannot be compared safely;
/// the caller diagnoses it instead of assuming either answer.
pub fn types_equal(arena: &NodeArena, a: NodeId, b: NodeId) -> Result<bool, NodeId> {
    // Parenthesization is not meaningful for equality.
    if let Some(NodeKind::ParenthesizedType { ty }) = arena.get(a).map(|n| &n.kind) {
        return types_equal(arena, *ty, b);
    }
    if let Some(NodeKind::ParenthesizedType { ty }) = arena.get(b).map(|n| &n.kind) {
        return types_equal(arena, a, *ty);
    }

    let (Some(na), Some(nb)) = (arena.get(a), arena.get(b)) else {
        return Ok(false);
    };
    match (&na.kind, &nb.kind) {
        (NodeKind::KeywordType(ka), NodeKind::KeywordType(kb)) => Ok(ka == kb),
        (NodeKind::LiteralType(va), NodeKind::LiteralType(vb)) => {
            Ok(literal_values_equal(va, vb))
        }
        (NodeKind::Ident(ta), NodeKind::Ident(tb)) => Ok(ta == tb),
        (NodeKind::ThisType, NodeKind::ThisType) => Ok(true),
        (NodeKind::InvalidType, NodeKind::InvalidType) => Ok(true),
        (
            NodeKind::TypeReference {
                name: name_a,
                type_args: args_a,
            },
            NodeKind::TypeReference {
                name: name_b,
                type_args: args_b,
            },
        ) => {
            if builder::entity_name_text(arena, *name_a)
                != builder::entity_name_text(arena, *name_b)
            {
                return Ok(false);
            }
            lists_equal(arena, args_a, args_b)
        }
        (NodeKind::ArrayType { element: ea }, NodeKind::ArrayType { element: eb }) => {
            types_equal(arena, *ea, *eb)
        }
        (NodeKind::TupleType { elements: ea }, NodeKind::TupleType { elements: eb }) => {
            lists_equal(arena, ea, eb)
        }
        (NodeKind::UnionType { members: ma }, NodeKind::UnionType { members: mb })
        | (
            NodeKind::IntersectionType { members: ma },
            NodeKind::IntersectionType { members: mb },
        ) => lists_equal(arena, ma, mb),
        (
            NodeKind::TypeOperator { op: oa, ty: ta },
            NodeKind::TypeOperator { op: ob, ty: tb },
        ) => {
            if oa != ob {
                return Ok(false);
            }
            types_equal(arena, *ta, *tb)
        }
        (NodeKind::FunctionType(sa), NodeKind::FunctionType(sb)) => {
            signatures_equal(arena, &sa.params, sa.return_type, &sb.params, sb.return_type)
        }
        (
            NodeKind::ConstructorType {
                sig: sa,
                is_abstract: aa,
            },
            NodeKind::ConstructorType {
                sig: sb,
                is_abstract: ab,
            },
        ) => {
            if aa != ab {
                return Ok(false);
            }
            signatures_equal(arena, &sa.params, sa.return_type, &sb.params, sb.return_type)
        }
        (NodeKind::TypeQuery { name: qa }, NodeKind::TypeQuery { name: qb }) => Ok(
            builder::entity_name_text(arena, *qa) == builder::entity_name_text(arena, *qb),
        ),
        (
            NodeKind::IndexedAccessType {
                object: oa,
                index: ia,
            },
            NodeKind::IndexedAccessType {
                object: ob,
                index: ib,
            },
        ) => Ok(types_equal(arena, *oa, *ob)? && types_equal(arena, *ia, *ib)?),
        (
            NodeKind::ImportTypeNode {
                specifier: spec_a,
                qualifier: qa,
                type_args: args_a,
                is_typeof: ta,
                ..
            },
            NodeKind::ImportTypeNode {
                specifier: spec_b,
                qualifier: qb,
                type_args: args_b,
                is_typeof: tb,
                ..
            },
        ) => {
            if spec_a != spec_b
                || ta != tb
                || builder::entity_name_text(arena, *qa)
                    != builder::entity_name_text(arena, *qb)
            {
                return Ok(false);
            }
            lists_equal(arena, args_a, args_b)
        }
        (NodeKind::TypeLiteral { members: ma }, NodeKind::TypeLiteral { members: mb }) => {
            type_literals_equal(arena, ma, mb)
        }
        _ => Ok(false),
    }
}

fn lists_equal(arena: &NodeArena, a: &[NodeId], b: &[NodeId]) -> Result<bool, NodeId> {
    if a.len() != b.len() {
        return Ok(false);
    }
    for (x, y) in a.iter().zip(b) {
        if !types_equal(arena, *x, *y)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Member-set equality: same keys, same optionality, same modifiers,
/// recursively equal member types. Order-insensitive on keys.
fn type_literals_equal(arena: &NodeArena, a: &[NodeId], b: &[NodeId]) -> Result<bool, NodeId> {
    if a.len() != b.len() {
        return Ok(false);
    }
    let keys_a: Vec<MemberKey> = a
        .iter()
        .map(|m| member_key(arena, *m))
        .collect::<Result<_, _>>()?;
    let keys_b: Vec<MemberKey> = b
        .iter()
        .map(|m| member_key(arena, *m))
        .collect::<Result<_, _>>()?;
    for ka in &keys_a {
        let Some(kb) = keys_b.iter().find(|k| k.name == ka.name) else {
            return Ok(false);
        };
        if ka.optional != kb.optional
            || ka.modifiers != kb.modifiers
            || ka.is_method != kb.is_method
        {
            return Ok(false);
        }
        let equal = if ka.is_method {
            method_signatures_equal(arena, ka.ty, kb.ty)?
        } else {
            types_equal_opt(arena, ka.ty, kb.ty)?
        };
        if !equal {
            return Ok(false);
        }
    }
    Ok(true)
}

fn method_signatures_equal(arena: &NodeArena, a: NodeId, b: NodeId) -> Result<bool, NodeId> {
    match (arena.get(a).map(|n| &n.kind), arena.get(b).map(|n| &n.kind)) {
        (
            Some(NodeKind::MethodSignature { sig: sa, .. }),
            Some(NodeKind::MethodSignature { sig: sb, .. }),
        ) => signatures_equal(arena, &sa.params, sa.return_type, &sb.params, sb.return_type),
        _ => Ok(false),
    }
}

/// Remove structurally-equal duplicates, keeping first occurrences.
pub fn dedupe(arena: &NodeArena, types: &[NodeId]) -> Result<Vec<NodeId>, NodeId> {
    let mut out: Vec<NodeId> = Vec::with_capacity(types.len());
    for &ty in types {
        let mut seen = false;
        for &kept in &out {
            if types_equal(arena, kept, ty)? {
                seen = true;
                break;
            }
        }
        if !seen {
            out.push(ty);
        }
    }
    Ok(out)
}

fn presence_flags(arena: &NodeArena, types: &[NodeId]) -> CollapseFlags {
    let mut flags = CollapseFlags::empty();
    for &ty in types {
        match arena.get(ty).map(|n| &n.kind) {
            Some(NodeKind::KeywordType(KeywordTypeKind::String)) => flags |= CollapseFlags::STRING,
            Some(NodeKind::KeywordType(KeywordTypeKind::Number)) => flags |= CollapseFlags::NUMBER,
            Some(NodeKind::KeywordType(KeywordTypeKind::Boolean)) => {
                flags |= CollapseFlags::BOOLEAN;
            }
            Some(NodeKind::KeywordType(KeywordTypeKind::BigInt)) => flags |= CollapseFlags::BIGINT,
            Some(NodeKind::KeywordType(KeywordTypeKind::Any)) => flags |= CollapseFlags::ANY,
            Some(NodeKind::LiteralType(value)) => match value {
                LiteralValue::String(_) => flags |= CollapseFlags::STRING_LIT,
                LiteralValue::Number { .. } => flags |= CollapseFlags::NUMBER_LIT,
                LiteralValue::BigInt { .. } => flags |= CollapseFlags::BIGINT_LIT,
                LiteralValue::True => flags |= CollapseFlags::TRUE_LIT,
                LiteralValue::False => flags |= CollapseFlags::FALSE_LIT,
            },
            _ => {}
        }
    }
    flags
}

/// Collapse literal members into present base types.
///
/// `string | "a"` becomes `string`; `true | false` becomes `boolean`;
/// an `any` anywhere absorbs the whole union.
pub fn collapse(arena: &mut NodeArena, types: &[NodeId]) -> Vec<NodeId> {
    let flags = presence_flags(arena, types);

    if flags.contains(CollapseFlags::ANY) {
        let any = types
            .iter()
            .copied()
            .find(|t| {
                matches!(
                    arena.get(*t).map(|n| &n.kind),
                    Some(NodeKind::KeywordType(KeywordTypeKind::Any))
                )
            })
            .unwrap_or_else(|| arena.ty_keyword(KeywordTypeKind::Any));
        return vec![any];
    }

    let both_bools = flags.contains(CollapseFlags::TRUE_LIT | CollapseFlags::FALSE_LIT);
    let mut synthesized_boolean = false;
    let mut out = Vec::with_capacity(types.len());
    for &ty in types {
        let keep = match arena.get(ty).map(|n| &n.kind) {
            Some(NodeKind::LiteralType(LiteralValue::String(_))) => {
                !flags.contains(CollapseFlags::STRING)
            }
            Some(NodeKind::LiteralType(LiteralValue::Number { .. })) => {
                !flags.contains(CollapseFlags::NUMBER)
            }
            Some(NodeKind::LiteralType(LiteralValue::BigInt { .. })) => {
                !flags.contains(CollapseFlags::BIGINT)
            }
            Some(NodeKind::LiteralType(LiteralValue::True | LiteralValue::False)) => {
                if flags.contains(CollapseFlags::BOOLEAN) {
                    false
                } else if both_bools {
                    // First boolean literal becomes the synthesized
                    // `boolean`; the second is dropped as subsumed.
                    if !synthesized_boolean {
                        synthesized_boolean = true;
                        out.push(arena.ty_keyword(KeywordTypeKind::Boolean));
                    }
                    false
                } else {
                    true
                }
            }
            _ => true,
        };
        if keep {
            out.push(ty);
        }
    }
    out
}

/// Align object-literal-shaped members of a union: every member gains
/// the keys it is missing (relative to the union) as optional
/// `undefined` properties, in the union's first-seen key order.
pub fn align_object_members(
    arena: &mut NodeArena,
    types: &[NodeId],
) -> Result<Vec<NodeId>, NodeId> {
    let object_count = types
        .iter()
        .filter(|t| matches!(arena.get(**t).map(|n| &n.kind), Some(NodeKind::TypeLiteral { .. })))
        .count();
    if object_count < 2 {
        return Ok(types.to_vec());
    }

    // Global key order: first appearance across members.
    let mut all_keys: Vec<String> = Vec::new();
    for &ty in types {
        let Some(NodeKind::TypeLiteral { members }) = arena.get(ty).map(|n| &n.kind) else {
            continue;
        };
        for &member in members.clone().iter() {
            let key = member_key(arena, member)?;
            if !all_keys.contains(&key.name) {
                all_keys.push(key.name);
            }
        }
    }

    let mut out = Vec::with_capacity(types.len());
    for &ty in types {
        let Some(NodeKind::TypeLiteral { members }) = arena.get(ty).map(|n| &n.kind) else {
            out.push(ty);
            continue;
        };
        let members = members.clone();
        let mut by_key: Vec<(String, NodeId)> = Vec::with_capacity(members.len());
        for &member in &members {
            by_key.push((member_key(arena, member)?.name, member));
        }
        let mut rebuilt = Vec::with_capacity(all_keys.len());
        let mut padded = false;
        for key in &all_keys {
            if let Some((_, member)) = by_key.iter().find(|(name, _)| name == key) {
                rebuilt.push(*member);
            } else {
                let undef = arena.ty_keyword(KeywordTypeKind::Undefined);
                rebuilt.push(arena.synth_property_signature(key.clone(), undef, true, false));
                padded = true;
            }
        }
        if padded {
            let new_literal = arena.ty_type_literal(rebuilt);
            arena.set_original(new_literal, ty);
            out.push(new_literal);
        } else {
            out.push(ty);
        }
    }
    Ok(out)
}

/// Full normalization pipeline: dedup, collapse, object alignment.
pub fn normalize_union(arena: &mut NodeArena, types: &[NodeId]) -> Result<Vec<NodeId>, NodeId> {
    let deduped = dedupe(arena, types)?;
    let collapsed = collapse(arena, &deduped);
    let aligned = align_object_members(arena, &collapsed)?;
    dedupe(arena, &aligned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_lit(arena: &mut NodeArena, s: &str) -> NodeId {
        arena.ty_string_literal(s)
    }

    #[test]
    fn equality_is_symmetric() {
        let mut arena = NodeArena::new();
        let a = string_lit(&mut arena, "a");
        let b = string_lit(&mut arena, "b");
        let a2 = string_lit(&mut arena, "a");
        let num = arena.ty_keyword(KeywordTypeKind::Number);
        let arr_a = arena.ty_array(a);
        let arr_a2 = arena.ty_array(a2);

        for (x, y) in [(a, b), (a, a2), (a, num), (arr_a, arr_a2), (arr_a, num)] {
            assert_eq!(
                types_equal(&arena, x, y).unwrap(),
                types_equal(&arena, y, x).unwrap(),
                "equality not symmetric for {x:?} / {y:?}"
            );
        }
        assert!(types_equal(&arena, a, a2).unwrap());
        assert!(!types_equal(&arena, a, b).unwrap());
        assert!(types_equal(&arena, arr_a, arr_a2).unwrap());
    }

    #[test]
    fn negative_number_literals_compare_by_value_and_sign() {
        let mut arena = NodeArena::new();
        let neg = arena.ty_number_literal("1", true);
        let neg2 = arena.ty_number_literal("1", true);
        let pos = arena.ty_number_literal("1", false);
        assert!(types_equal(&arena, neg, neg2).unwrap());
        assert!(!types_equal(&arena, neg, pos).unwrap());
    }

    #[test]
    fn collapse_drops_subsumed_literals() {
        let mut arena = NodeArena::new();
        let base = arena.ty_keyword(KeywordTypeKind::String);
        let lit = string_lit(&mut arena, "a");
        let out = collapse(&mut arena, &[base, lit]);
        assert_eq!(out, vec![base]);
    }

    #[test]
    fn collapse_is_idempotent() {
        let mut arena = NodeArena::new();
        let base = arena.ty_keyword(KeywordTypeKind::Number);
        let lit = arena.ty_number_literal("3", false);
        let lit2 = string_lit(&mut arena, "x");
        let once = collapse(&mut arena, &[base, lit, lit2]);
        let twice = collapse(&mut arena, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn any_absorbs_the_union() {
        let mut arena = NodeArena::new();
        let lit = string_lit(&mut arena, "a");
        let any = arena.ty_keyword(KeywordTypeKind::Any);
        let num = arena.ty_keyword(KeywordTypeKind::Number);
        let out = collapse(&mut arena, &[lit, any, num]);
        assert_eq!(out, vec![any]);
    }

    #[test]
    fn true_and_false_become_boolean() {
        let mut arena = NodeArena::new();
        let t = arena.ty_literal(LiteralValue::True);
        let f = arena.ty_literal(LiteralValue::False);
        let out = collapse(&mut arena, &[t, f]);
        assert_eq!(out.len(), 1);
        assert!(matches!(
            arena.kind(out[0]),
            NodeKind::KeywordType(KeywordTypeKind::Boolean)
        ));
    }

    #[test]
    fn object_members_gain_missing_keys_as_optional_undefined() {
        let mut arena = NodeArena::new();
        let num = arena.ty_keyword(KeywordTypeKind::Number);
        let s = arena.ty_keyword(KeywordTypeKind::String);
        let prop_a = arena.synth_property_signature("a", num, false, false);
        let obj_a = arena.ty_type_literal(vec![prop_a]);
        let prop_b = arena.synth_property_signature("b", s, false, false);
        let obj_b = arena.ty_type_literal(vec![prop_b]);

        let out = align_object_members(&mut arena, &[obj_a, obj_b]).unwrap();
        assert_eq!(out.len(), 2);

        let first = match arena.kind(out[0]) {
            NodeKind::TypeLiteral { members } => members.clone(),
            other => panic!("expected type literal, got {other:?}"),
        };
        assert_eq!(first.len(), 2);
        // `{a: number}` gains `b?: undefined`.
        match arena.kind(first[1]) {
            NodeKind::PropertySignature { optional, ty, .. } => {
                assert!(*optional);
                assert!(matches!(
                    arena.kind(*ty),
                    NodeKind::KeywordType(KeywordTypeKind::Undefined)
                ));
            }
            other => panic!("expected padded property, got {other:?}"),
        }
        // `{b: string}` gains `a?: undefined` *before* `b`.
        let second = match arena.kind(out[1]) {
            NodeKind::TypeLiteral { members } => members.clone(),
            other => panic!("expected type literal, got {other:?}"),
        };
        match arena.kind(second[0]) {
            NodeKind::PropertySignature { optional, .. } => assert!(*optional),
            other => panic!("expected padded property first, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_member_shape_is_an_error_not_a_guess() {
        let mut arena = NodeArena::new();
        let num = arena.ty_keyword(KeywordTypeKind::Number);
        let name = arena.add_ident(tsd_common::span::Span::EMPTY, "k");
        let computed = arena.alloc(
            NodeKind::ComputedName { expr: name },
            tsd_common::span::Span::EMPTY,
        );
        let bad_prop = arena.alloc(
            NodeKind::PropertySignature {
                name: computed,
                ty: num,
                optional: false,
                modifiers: ModifierFlags::empty(),
            },
            tsd_common::span::Span::EMPTY,
        );
        let obj = arena.ty_type_literal(vec![bad_prop]);
        let obj2 = arena.ty_type_literal(vec![bad_prop]);
        let err = types_equal(&arena, obj, obj2).unwrap_err();
        assert_eq!(err, bad_prop);
    }
}
