use crate::ir::{Expr, Function, Stmt, TypeRef};

const INDENT: &str = "\t";

pub fn type_ref(t: &TypeRef) -> String {
    format!(
        "{}{}{}",
        if t.list { "[]" } else { "" },
        if t.pointer { "*" } else { "" },
        t.name
    )
}

/// Renders an expression at the given indentation depth. The depth only
/// matters for multi-line keyed literals.
pub fn expr(e: &Expr, depth: usize) -> String {
    match e {
        Expr::Ident(name) | Expr::Raw(name) => name.clone(),
        Expr::Selector(base, field) => format!("{}.{}", expr(base, depth), field),
        Expr::Index(base, index) => format!("{}[{}]", expr(base, depth), index),
        Expr::Deref(inner) => format!("*{}", expr(inner, depth)),
        Expr::AddrOf(inner) => format!("&{}", expr(inner, depth)),
        Expr::Call { func, args } => {
            let args: Vec<String> = args.iter().map(|a| expr(a, depth)).collect();
            format!("{}({})", func, args.join(", "))
        }
        Expr::Composite { type_, entries } if entries.is_empty() => format!("{}{{}}", type_),
        Expr::Composite { type_, entries } => composite(type_, entries, depth),
        Expr::MakeSlice { elem, len_of } => {
            format!("make([]{}, len({}))", type_ref(elem), expr(len_of, depth))
        }
    }
}

/// Keyed literal with values aligned the way gofmt aligns them.
fn composite(type_: &str, entries: &[(String, Expr)], depth: usize) -> String {
    let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let inner = INDENT.repeat(depth + 1);

    let mut out = format!("{}{{\n", type_);
    for (key, value) in entries {
        out.push_str(&format!(
            "{}{}:{:pad$} {},\n",
            inner,
            key,
            "",
            expr(value, depth + 1),
            pad = width - key.len()
        ));
    }
    out.push_str(&INDENT.repeat(depth));
    out.push('}');
    out
}

pub fn stmt(s: &Stmt, depth: usize, out: &mut String) {
    if *s == Stmt::Blank {
        out.push('\n');
        return;
    }

    let pad = INDENT.repeat(depth);
    match s {
        Stmt::Define { name, value } => {
            out.push_str(&format!("{}{} := {}\n", pad, name, expr(value, depth)));
        }
        Stmt::Assign { target, value } => {
            out.push_str(&format!("{}{} = {}\n", pad, expr(target, depth), expr(value, depth)));
        }
        Stmt::Expr(e) => {
            out.push_str(&format!("{}{}\n", pad, expr(e, depth)));
        }
        Stmt::Return(None) => {
            out.push_str(&format!("{}return\n", pad));
        }
        Stmt::Return(Some(e)) => {
            out.push_str(&format!("{}return {}\n", pad, expr(e, depth)));
        }
        Stmt::IfNil { subject, body } => {
            out.push_str(&format!("{}if {} == nil {{\n", pad, expr(subject, depth)));
            block(body, depth + 1, out);
            out.push_str(&format!("{}}}\n", pad));
        }
        Stmt::Range { key, value, over, body } => {
            out.push_str(&format!("{}for {}, {} := range {} {{\n", pad, key, value, expr(over, depth)));
            block(body, depth + 1, out);
            out.push_str(&format!("{}}}\n", pad));
        }
        Stmt::Blank => {}
    }
}

fn block(body: &[Stmt], depth: usize, out: &mut String) {
    for s in body {
        stmt(s, depth, out);
    }
}

pub fn function(f: &Function) -> String {
    let mut out = String::new();
    for line in &f.doc {
        out.push_str(&format!("// {}\n", line));
    }

    let params: Vec<String> = f
        .params
        .iter()
        .map(|p| format!("{} {}", p.name, p.type_))
        .collect();
    out.push_str(&format!(
        "func {}({}) {} {{\n",
        f.name,
        params.join(", "),
        type_ref(&f.result)
    ));
    block(&f.body, 1, &mut out);
    out.push_str("}\n");
    out
}
