//! Declaration text rendering.
//!
//! Prints an output tree (already rewritten: bodies elided, types
//! explicit) as declaration-file text. Top-level value declarations gain
//! the `declare` keyword unless they already sit in an ambient context.

use tsd_ast::{
    ImportEqualsTarget, KeywordTypeKind, LiteralValue, ModifierFlags, ModuleName, NamedBindings,
    NodeArena, NodeId, NodeKind, SignatureData, TypeOperatorKind, VarKind, builder,
};

/// Render a rewritten source file to declaration text.
#[must_use]
pub fn print_source_file(arena: &NodeArena, file: NodeId) -> String {
    let mut printer = Printer::new(arena);
    for &stmt in builder::statements_of(arena, file) {
        printer.print_statement(stmt, false);
    }
    printer.finish()
}

pub(crate) struct Printer<'a> {
    arena: &'a NodeArena,
    out: String,
    indent: usize,
}

impl<'a> Printer<'a> {
    pub(crate) fn new(arena: &'a NodeArena) -> Printer<'a> {
        Printer {
            arena,
            out: String::new(),
            indent: 0,
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn line_start(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
    }

    fn newline(&mut self) {
        self.out.push('\n');
    }

    /// Modifier keywords, inserting `declare` for top-level value
    /// declarations outside ambient contexts.
    fn write_modifiers(&mut self, modifiers: ModifierFlags, needs_declare: bool) {
        let mut modifiers = modifiers;
        if needs_declare {
            modifiers.insert(ModifierFlags::AMBIENT);
        }
        for keyword in modifiers.keywords() {
            self.write(keyword);
            self.write(" ");
        }
    }

    pub(crate) fn print_statement(&mut self, stmt: NodeId, ambient: bool) {
        let Some(node) = self.arena.get(stmt) else {
            return;
        };
        match &node.kind {
            NodeKind::Function(f) => {
                self.line_start();
                self.write_modifiers(f.modifiers, !ambient);
                self.write("function ");
                self.write(f.name.as_deref().unwrap_or_default());
                self.print_type_parameters(&f.type_params);
                self.print_parameter_list(&f.params);
                if f.return_type.is_some() {
                    self.write(": ");
                    self.print_type(f.return_type);
                }
                self.write(";");
                self.newline();
            }
            NodeKind::Class(c) => {
                self.line_start();
                self.write_modifiers(c.modifiers, !ambient);
                self.write("class ");
                self.write(c.name.as_deref().unwrap_or_default());
                self.print_type_parameters(&c.type_params);
                self.print_heritage(&c.heritage);
                self.write(" {");
                self.newline();
                self.indent += 1;
                for &member in &c.members {
                    self.print_class_member(member);
                }
                self.indent -= 1;
                self.line_start();
                self.write("}");
                self.newline();
            }
            NodeKind::Interface(i) => {
                self.line_start();
                self.write_modifiers(i.modifiers, false);
                self.write("interface ");
                self.write(&i.name);
                self.print_type_parameters(&i.type_params);
                self.print_heritage(&i.heritage);
                self.write(" {");
                self.newline();
                self.indent += 1;
                for &member in &i.members {
                    self.line_start();
                    self.print_member_signature(member);
                    self.newline();
                }
                self.indent -= 1;
                self.line_start();
                self.write("}");
                self.newline();
            }
            NodeKind::TypeAlias(t) => {
                self.line_start();
                self.write_modifiers(t.modifiers, false);
                self.write("type ");
                self.write(&t.name);
                self.print_type_parameters(&t.type_params);
                self.write(" = ");
                self.print_type(t.ty);
                self.write(";");
                self.newline();
            }
            NodeKind::Enum(e) => {
                self.line_start();
                self.write_modifiers(e.modifiers, !ambient);
                self.write("enum ");
                self.write(&e.name);
                self.write(" {");
                self.newline();
                self.indent += 1;
                for &member in &e.members {
                    if let Some(NodeKind::EnumMember { name, initializer }) =
                        self.arena.get(member).map(|n| &n.kind)
                    {
                        self.line_start();
                        self.print_member_name(*name);
                        if initializer.is_some() {
                            self.write(" = ");
                            self.print_expr(*initializer);
                        }
                        self.write(",");
                        self.newline();
                    }
                }
                self.indent -= 1;
                self.line_start();
                self.write("}");
                self.newline();
            }
            NodeKind::Module(m) => {
                self.line_start();
                self.write_modifiers(m.modifiers, !ambient);
                match &m.name {
                    ModuleName::Ident(name) => {
                        self.write("namespace ");
                        self.write(name);
                    }
                    ModuleName::StringLiteral(name) => {
                        self.write("module ");
                        self.write(&quote(name));
                    }
                }
                if m.body.is_none() {
                    self.write(";");
                    self.newline();
                    return;
                }
                self.write(" {");
                self.newline();
                self.indent += 1;
                for &inner in builder::statements_of(self.arena, m.body) {
                    self.print_statement(inner, true);
                }
                self.indent -= 1;
                self.line_start();
                self.write("}");
                self.newline();
            }
            NodeKind::VariableStatement(v) => {
                self.line_start();
                self.write_modifiers(v.modifiers, !ambient);
                self.write(v.kind.keyword());
                self.write(" ");
                for (i, &decl) in v.declarations.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(NodeKind::VariableDeclaration { name, ty, .. }) =
                        self.arena.get(decl).map(|n| &n.kind)
                    {
                        self.print_binding_name(*name);
                        if ty.is_some() {
                            self.write(": ");
                            self.print_type(*ty);
                        }
                    }
                }
                self.write(";");
                self.newline();
            }
            NodeKind::ImportDecl {
                default_name,
                named,
                specifier,
                type_only,
            } => {
                self.line_start();
                self.write("import ");
                if *type_only {
                    self.write("type ");
                }
                let mut wrote_binding = false;
                if let Some(default_name) = default_name {
                    self.write(default_name);
                    wrote_binding = true;
                }
                match named {
                    NamedBindings::None => {}
                    NamedBindings::Namespace(ns) => {
                        if wrote_binding {
                            self.write(", ");
                        }
                        self.write("* as ");
                        self.write(ns);
                        wrote_binding = true;
                    }
                    NamedBindings::Named(specifiers) => {
                        if wrote_binding {
                            self.write(", ");
                        }
                        self.write("{ ");
                        for (i, spec) in specifiers.iter().enumerate() {
                            if i > 0 {
                                self.write(", ");
                            }
                            if spec.type_only {
                                self.write("type ");
                            }
                            if let Some(property) = &spec.property_name {
                                self.write(property);
                                self.write(" as ");
                            }
                            self.write(&spec.name);
                        }
                        self.write(" }");
                        wrote_binding = true;
                    }
                }
                if wrote_binding {
                    self.write(" from ");
                }
                self.write(&quote(specifier));
                self.write(";");
                self.newline();
            }
            NodeKind::ImportEquals {
                name,
                target,
                modifiers,
                type_only,
            } => {
                self.line_start();
                self.write_modifiers(*modifiers, false);
                self.write("import ");
                if *type_only {
                    self.write("type ");
                }
                self.write(name);
                self.write(" = ");
                match target {
                    ImportEqualsTarget::EntityName(entity) => {
                        let text = builder::entity_name_text(self.arena, *entity);
                        self.write(&text);
                    }
                    ImportEqualsTarget::ExternalModule(specifier) => {
                        self.write("require(");
                        self.write(&quote(specifier));
                        self.write(")");
                    }
                }
                self.write(";");
                self.newline();
            }
            NodeKind::ExportDecl {
                named,
                specifier,
                type_only,
            } => {
                self.line_start();
                self.write("export ");
                if *type_only {
                    self.write("type ");
                }
                match named {
                    None => self.write("*"),
                    Some(specifiers) => {
                        self.write("{");
                        for (i, spec) in specifiers.iter().enumerate() {
                            if i > 0 {
                                self.write(",");
                            }
                            self.write(" ");
                            if spec.type_only {
                                self.write("type ");
                            }
                            if let Some(property) = &spec.property_name {
                                self.write(property);
                                self.write(" as ");
                            }
                            self.write(&spec.name);
                        }
                        if !specifiers.is_empty() {
                            self.write(" ");
                        }
                        self.write("}");
                    }
                }
                if let Some(specifier) = specifier {
                    self.write(" from ");
                    self.write(&quote(specifier));
                }
                self.write(";");
                self.newline();
            }
            NodeKind::ExportAssignment {
                expr,
                is_export_equals,
            } => {
                self.line_start();
                if *is_export_equals {
                    self.write("export = ");
                } else {
                    self.write("export default ");
                }
                self.print_expr(*expr);
                self.write(";");
                self.newline();
            }
            _ => {}
        }
    }

    fn print_class_member(&mut self, member: NodeId) {
        let Some(node) = self.arena.get(member) else {
            return;
        };
        self.line_start();
        match &node.kind {
            NodeKind::PropertyDecl {
                name,
                ty,
                optional,
                modifiers,
                ..
            } => {
                self.write_modifiers(*modifiers, false);
                self.print_member_name(*name);
                if *optional {
                    self.write("?");
                }
                if ty.is_some() {
                    self.write(": ");
                    self.print_type(*ty);
                }
                self.write(";");
            }
            NodeKind::MethodDecl {
                name,
                sig,
                optional,
                modifiers,
                ..
            } => {
                self.write_modifiers(*modifiers, false);
                self.print_member_name(*name);
                if *optional {
                    self.write("?");
                }
                self.print_type_parameters(&sig.type_params);
                self.print_parameter_list(&sig.params);
                if sig.return_type.is_some() {
                    self.write(": ");
                    self.print_type(sig.return_type);
                }
                self.write(";");
            }
            NodeKind::Constructor {
                params, modifiers, ..
            } => {
                self.write_modifiers(*modifiers, false);
                self.write("constructor");
                self.print_parameter_list(params);
                self.write(";");
            }
            NodeKind::Accessor {
                is_getter,
                name,
                params,
                return_type,
                modifiers,
                ..
            } => {
                self.write_modifiers(*modifiers, false);
                self.write(if *is_getter { "get " } else { "set " });
                self.print_member_name(*name);
                self.print_parameter_list(params);
                if return_type.is_some() {
                    self.write(": ");
                    self.print_type(*return_type);
                }
                self.write(";");
            }
            NodeKind::IndexSignature { .. } => self.print_member_signature(member),
            _ => {}
        }
        self.newline();
    }

    fn print_member_signature(&mut self, member: NodeId) {
        let Some(node) = self.arena.get(member) else {
            return;
        };
        match &node.kind {
            NodeKind::PropertySignature {
                name,
                ty,
                optional,
                modifiers,
            } => {
                self.write_modifiers(*modifiers, false);
                self.print_member_name(*name);
                if *optional {
                    self.write("?");
                }
                if ty.is_some() {
                    self.write(": ");
                    self.print_type(*ty);
                }
                self.write(";");
            }
            NodeKind::MethodSignature {
                name,
                sig,
                optional,
            } => {
                self.print_member_name(*name);
                if *optional {
                    self.write("?");
                }
                self.print_signature(sig, ": ");
                self.write(";");
            }
            NodeKind::CallSignature(sig) => {
                self.print_signature(sig, ": ");
                self.write(";");
            }
            NodeKind::ConstructSignature(sig) => {
                self.write("new ");
                self.print_signature(sig, ": ");
                self.write(";");
            }
            NodeKind::IndexSignature {
                param,
                ty,
                modifiers,
            } => {
                self.write_modifiers(*modifiers, false);
                self.write("[");
                self.print_parameter(*param);
                self.write("]: ");
                self.print_type(*ty);
                self.write(";");
            }
            _ => {}
        }
    }

    fn print_signature(&mut self, sig: &SignatureData, return_separator: &str) {
        self.print_type_parameters(&sig.type_params);
        self.print_parameter_list(&sig.params);
        if sig.return_type.is_some() {
            self.write(return_separator);
            self.print_type(sig.return_type);
        }
    }

    fn print_type_parameters(&mut self, type_params: &[NodeId]) {
        if type_params.is_empty() {
            return;
        }
        self.write("<");
        for (i, &tp) in type_params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if let Some(NodeKind::TypeParameter {
                name,
                constraint,
                default,
            }) = self.arena.get(tp).map(|n| &n.kind)
            {
                self.write(name);
                if constraint.is_some() {
                    self.write(" extends ");
                    self.print_type(*constraint);
                }
                if default.is_some() {
                    self.write(" = ");
                    self.print_type(*default);
                }
            }
        }
        self.write(">");
    }

    fn print_heritage(&mut self, heritage: &[NodeId]) {
        for &clause in heritage {
            let Some(NodeKind::HeritageClause { kind, types }) =
                self.arena.get(clause).map(|n| &n.kind)
            else {
                continue;
            };
            if types.is_empty() {
                continue;
            }
            self.write(match kind {
                tsd_ast::HeritageKind::Extends => " extends ",
                tsd_ast::HeritageKind::Implements => " implements ",
            });
            for (i, &ty) in types.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                if let Some(NodeKind::ExpressionWithTypeArgs { expr, type_args }) =
                    self.arena.get(ty).map(|n| &n.kind)
                {
                    self.print_expr(*expr);
                    if !type_args.is_empty() {
                        self.write("<");
                        for (j, &arg) in type_args.iter().enumerate() {
                            if j > 0 {
                                self.write(", ");
                            }
                            self.print_type(arg);
                        }
                        self.write(">");
                    }
                }
            }
        }
    }

    fn print_parameter_list(&mut self, params: &[NodeId]) {
        self.write("(");
        for (i, &param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_parameter(param);
        }
        self.write(")");
    }

    fn print_parameter(&mut self, param: NodeId) {
        let Some(NodeKind::Parameter {
            name,
            ty,
            dotdotdot,
            question,
            modifiers,
            ..
        }) = self.arena.get(param).map(|n| &n.kind)
        else {
            return;
        };
        self.write_modifiers(*modifiers, false);
        if *dotdotdot {
            self.write("...");
        }
        self.print_binding_name(*name);
        if *question {
            self.write("?");
        }
        if ty.is_some() {
            self.write(": ");
            self.print_type(*ty);
        }
    }

    fn print_binding_name(&mut self, name: NodeId) {
        let Some(node) = self.arena.get(name) else {
            return;
        };
        match &node.kind {
            NodeKind::Ident(text) => self.write(&text.clone()),
            NodeKind::ObjectBindingPattern { elements } => {
                self.write("{ ");
                let elements = elements.clone();
                for (i, &element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.print_binding_element(element);
                }
                self.write(" }");
            }
            NodeKind::ArrayBindingPattern { elements } => {
                self.write("[");
                let elements = elements.clone();
                for (i, &element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if element.is_some() {
                        self.print_binding_element(element);
                    }
                }
                self.write("]");
            }
            _ => {}
        }
    }

    fn print_binding_element(&mut self, element: NodeId) {
        let Some(NodeKind::BindingElement {
            name,
            property_name,
            dotdotdot,
            ..
        }) = self.arena.get(element).map(|n| &n.kind)
        else {
            return;
        };
        let (name, property_name, dotdotdot) = (*name, *property_name, *dotdotdot);
        if dotdotdot {
            self.write("...");
        }
        if property_name.is_some() {
            self.print_member_name(property_name);
            self.write(": ");
        }
        self.print_binding_name(name);
    }

    fn print_member_name(&mut self, name: NodeId) {
        let Some(node) = self.arena.get(name) else {
            return;
        };
        match &node.kind {
            NodeKind::Ident(text) => self.write(&text.clone()),
            NodeKind::PrivateName(text) => {
                let text = format!("#{text}");
                self.write(&text);
            }
            NodeKind::StringLit(text) => {
                let text = quote(&text.clone());
                self.write(&text);
            }
            NodeKind::NumberLit { text } => self.write(&text.clone()),
            NodeKind::ComputedName { expr } => {
                self.write("[");
                self.print_expr(*expr);
                self.write("]");
            }
            _ => {}
        }
    }

    pub(crate) fn print_type(&mut self, ty: NodeId) {
        let Some(node) = self.arena.get(ty) else {
            return;
        };
        match node.kind.clone() {
            NodeKind::KeywordType(kind) => self.write(kind.text()),
            NodeKind::LiteralType(value) => self.print_literal(&value),
            NodeKind::ThisType => self.write("this"),
            NodeKind::InvalidType => self.write("invalid"),
            NodeKind::TypeReference { name, type_args } => {
                let text = builder::entity_name_text(self.arena, name);
                self.write(&text);
                if !type_args.is_empty() {
                    self.write("<");
                    for (i, &arg) in type_args.iter().enumerate() {
                        if i > 0 {
                            self.write(", ");
                        }
                        self.print_type(arg);
                    }
                    self.write(">");
                }
            }
            NodeKind::ArrayType { element } => {
                self.print_type(element);
                self.write("[]");
            }
            NodeKind::TupleType { elements } => {
                self.write("[");
                for (i, &element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.print_type(element);
                }
                self.write("]");
            }
            NodeKind::UnionType { members } => {
                for (i, &member) in members.iter().enumerate() {
                    if i > 0 {
                        self.write(" | ");
                    }
                    self.print_type(member);
                }
            }
            NodeKind::IntersectionType { members } => {
                for (i, &member) in members.iter().enumerate() {
                    if i > 0 {
                        self.write(" & ");
                    }
                    self.print_type(member);
                }
            }
            NodeKind::ParenthesizedType { ty } => {
                self.write("(");
                self.print_type(ty);
                self.write(")");
            }
            NodeKind::TypeOperator { op, ty } => {
                self.write(match op {
                    TypeOperatorKind::KeyOf => "keyof ",
                    TypeOperatorKind::Unique => "unique ",
                    TypeOperatorKind::Readonly => "readonly ",
                });
                self.print_type(ty);
            }
            NodeKind::IndexedAccessType { object, index } => {
                self.print_type(object);
                self.write("[");
                self.print_type(index);
                self.write("]");
            }
            NodeKind::FunctionType(sig) => {
                self.print_signature(&sig, " => ");
            }
            NodeKind::ConstructorType { sig, is_abstract } => {
                if is_abstract {
                    self.write("abstract ");
                }
                self.write("new ");
                self.print_signature(&sig, " => ");
            }
            NodeKind::TypeLiteral { members } => {
                if members.is_empty() {
                    self.write("{}");
                    return;
                }
                self.write("{");
                for &member in &members {
                    self.write(" ");
                    self.print_member_signature(member);
                }
                self.write(" }");
            }
            NodeKind::TypeQuery { name } => {
                self.write("typeof ");
                let text = builder::entity_name_text(self.arena, name);
                self.write(&text);
            }
            NodeKind::MappedType {
                type_param,
                ty,
                readonly_mod,
                optional_mod,
            } => {
                self.write("{ ");
                if readonly_mod {
                    self.write("readonly ");
                }
                self.write("[");
                if let Some(NodeKind::TypeParameter {
                    name, constraint, ..
                }) = self.arena.get(type_param).map(|n| &n.kind)
                {
                    let (name, constraint) = (name.clone(), *constraint);
                    self.write(&name);
                    self.write(" in ");
                    self.print_type(constraint);
                }
                self.write("]");
                if optional_mod {
                    self.write("?");
                }
                self.write(": ");
                self.print_type(ty);
                self.write(" }");
            }
            NodeKind::ImportTypeNode {
                specifier,
                qualifier,
                type_args,
                is_typeof,
                ..
            } => {
                if is_typeof {
                    self.write("typeof ");
                }
                self.write("import(");
                self.write(&quote(&specifier));
                self.write(")");
                if qualifier.is_some() {
                    self.write(".");
                    let text = builder::entity_name_text(self.arena, qualifier);
                    self.write(&text);
                }
                if !type_args.is_empty() {
                    self.write("<");
                    for (i, &arg) in type_args.iter().enumerate() {
                        if i > 0 {
                            self.write(", ");
                        }
                        self.print_type(arg);
                    }
                    self.write(">");
                }
            }
            _ => {}
        }
    }

    fn print_literal(&mut self, value: &LiteralValue) {
        match value {
            LiteralValue::String(text) => self.write(&quote(text)),
            LiteralValue::Number { text, negative } => {
                if *negative {
                    self.write("-");
                }
                self.write(&text.clone());
            }
            LiteralValue::BigInt { text, negative } => {
                if *negative {
                    self.write("-");
                }
                self.write(&text.clone());
                self.write("n");
            }
            LiteralValue::True => self.write("true"),
            LiteralValue::False => self.write("false"),
        }
    }

    fn print_expr(&mut self, expr: NodeId) {
        let Some(node) = self.arena.get(expr) else {
            return;
        };
        match node.kind.clone() {
            NodeKind::Ident(text) => self.write(&text),
            NodeKind::StringLit(text) => self.write(&quote(&text)),
            NodeKind::NumberLit { text } => self.write(&text),
            NodeKind::BigIntLit { text } => {
                self.write(&text);
                self.write("n");
            }
            NodeKind::BoolLit(value) => self.write(if value { "true" } else { "false" }),
            NodeKind::NullLit => self.write("null"),
            NodeKind::PrefixUnary { op, operand } => {
                self.write(match op {
                    tsd_ast::PrefixOp::Minus => "-",
                    tsd_ast::PrefixOp::Plus => "+",
                });
                self.print_expr(operand);
            }
            NodeKind::PropertyAccess { .. } | NodeKind::QualifiedName { .. } => {
                let text = builder::entity_name_text(self.arena, expr);
                self.write(&text);
            }
            NodeKind::ParenExpr { expr } => {
                self.write("(");
                self.print_expr(expr);
                self.write(")");
            }
            NodeKind::InvalidType => self.write("invalid"),
            _ => {}
        }
    }
}

/// Double-quote a string, escaping quotes and backslashes.
#[must_use]
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsd_ast::{FunctionData, VariableStatementData};
    use tsd_common::span::Span;

    #[test]
    fn prints_declare_function_with_params() {
        let mut arena = NodeArena::new();
        let param_name = arena.add_ident(Span::EMPTY, "x");
        let param_ty = arena.ty_keyword(KeywordTypeKind::Number);
        let param = arena.alloc(
            NodeKind::Parameter {
                name: param_name,
                ty: param_ty,
                initializer: NodeId::NONE,
                dotdotdot: false,
                question: false,
                modifiers: ModifierFlags::empty(),
            },
            Span::EMPTY,
        );
        let ret = arena.ty_keyword(KeywordTypeKind::String);
        let function = arena.alloc(
            NodeKind::Function(FunctionData {
                name: Some("f".into()),
                type_params: Vec::new(),
                params: vec![param],
                return_type: ret,
                body: NodeId::NONE,
                modifiers: ModifierFlags::EXPORT,
            }),
            Span::EMPTY,
        );
        let file = arena.add_source_file("a.d.ts", vec![function]);

        let text = print_source_file(&arena, file);
        assert_eq!(text, "export declare function f(x: number): string;\n");
    }

    #[test]
    fn prints_const_with_literal_type() {
        let mut arena = NodeArena::new();
        let name = arena.add_ident(Span::EMPTY, "answer");
        let ty = arena.ty_number_literal("42", false);
        let decl = arena.alloc(
            NodeKind::VariableDeclaration {
                name,
                ty,
                initializer: NodeId::NONE,
            },
            Span::EMPTY,
        );
        let stmt = arena.alloc(
            NodeKind::VariableStatement(VariableStatementData {
                kind: VarKind::Const,
                declarations: vec![decl],
                modifiers: ModifierFlags::empty(),
            }),
            Span::EMPTY,
        );
        let file = arena.add_source_file("a.d.ts", vec![stmt]);

        let text = print_source_file(&arena, file);
        assert_eq!(text, "declare const answer: 42;\n");
    }

    #[test]
    fn prints_type_literal_members_inline() {
        let mut arena = NodeArena::new();
        let number = arena.ty_keyword(KeywordTypeKind::Number);
        let a = arena.synth_property_signature("a", number, false, false);
        let string = arena.ty_keyword(KeywordTypeKind::String);
        let b = arena.synth_property_signature("b", string, true, false);
        let literal = arena.alloc(
            NodeKind::TypeLiteral {
                members: vec![a, b],
            },
            Span::EMPTY,
        );
        let mut printer = Printer::new(&arena);
        printer.print_type(literal);
        assert_eq!(printer.finish(), "{ a: number; b?: string; }");
    }

    #[test]
    fn prints_readonly_tuple_and_union_array() {
        let mut arena = NodeArena::new();
        let one = arena.ty_number_literal("1", false);
        let a = arena.ty_string_literal("a");
        let tuple = arena.ty_tuple(vec![one, a]);
        let readonly = arena.ty_operator(TypeOperatorKind::Readonly, tuple);
        let mut printer = Printer::new(&arena);
        printer.print_type(readonly);
        assert_eq!(printer.finish(), "readonly [1, \"a\"]");

        let number = arena.ty_keyword(KeywordTypeKind::Number);
        let string = arena.ty_keyword(KeywordTypeKind::String);
        let union = arena.ty_union(vec![number, string]);
        let paren = arena.alloc(NodeKind::ParenthesizedType { ty: union }, Span::EMPTY);
        let array = arena.ty_array(paren);
        let mut printer = Printer::new(&arena);
        printer.print_type(array);
        assert_eq!(printer.finish(), "(number | string)[]");
    }
}
