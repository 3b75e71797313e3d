//! Builds the conversion function family of a message.
//!
//! Every direction gets the value→value function carrying the field logic and
//! seven wrappers delegating to it, plus the legacy `List` alias:
//!
//! | name suffix  | source      | result      |
//! |--------------|-------------|-------------|
//! | (none)       | `S`         | `D`         |
//! | `Ptr`        | `*S`        | `*D`        |
//! | `PtrVal`     | `*S`        | `D`         |
//! | `ValPtr`     | `S`         | `*D`        |
//! | `ValList`    | `[]S`       | `[]D`       |
//! | `PtrList`    | `[]*S`      | `[]*D`      |
//! | `PtrValList` | `[]*S`      | `[]D`       |
//! | `ValPtrList` | `[]S`       | `[]*D`      |
//! | `List`       | deprecated, forwards to the mixed list with wire pointers |

use crate::{
    ir::{Expr, Function, Param, Stmt, TypeRef},
    printer,
    types::{
        base_name, deprecated_list_name, function_name, Direction, FieldKind, FieldSpec,
        MessageMapping, Shape,
    },
};

pub const OPTIONS_TYPE: &str = "TransformParam";

/// Synthesizes conversion families. Calls of helpers that live in another
/// package are prefixed with `helper_package`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Synthesizer<'a> {
    pub helper_package: Option<&'a str>,
}

impl<'a> Synthesizer<'a> {
    pub fn new(helper_package: Option<&'a str>) -> Self {
        Synthesizer { helper_package }
    }

    /// Both directions, rendered as Go source.
    pub fn render(&self, mapping: &MessageMapping) -> String {
        [Direction::WireToDest, Direction::DestToWire]
            .iter()
            .flat_map(|d| self.family(mapping, *d))
            .map(|f| printer::function(&f))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The nine functions of one direction, value→value first.
    pub fn family(&self, mapping: &MessageMapping, direction: Direction) -> Vec<Function> {
        let (src, dst) = mapping.sides(direction);
        let base = base_name(&src.alias, &dst.alias);
        let src_type = src.qualified();
        let dst_type = dst.qualified();

        let mut out = Vec::with_capacity(Shape::ALL.len() + 1);
        for shape in Shape::ALL {
            let f = match (shape.src_ptr, shape.dst_ptr, shape.list) {
                (false, false, false) => self.value_to_value(mapping, direction, &base),
                (true, true, false) => ptr_to_ptr(&base, &src_type, &dst_type),
                (true, false, false) => ptr_to_val(&base, &src_type, &dst_type),
                (false, true, false) => val_to_ptr(&base, &src_type, &dst_type),
                (_, _, true) => list(&base, shape, &src_type, &dst_type),
            };
            out.push(f);
        }

        let wire_pointers = match direction {
            Direction::WireToDest => Shape::new(true, false, true),
            Direction::DestToWire => Shape::new(false, true, true),
        };
        out.push(deprecated_list(&base, wire_pointers, &src_type, &dst_type));
        out
    }

    fn value_to_value(&self, mapping: &MessageMapping, direction: Direction, base: &str) -> Function {
        let (src, dst) = mapping.sides(direction);

        let entries = mapping
            .fields
            .iter()
            .filter(|f| !(f.is_oneof() && direction == Direction::DestToWire))
            .map(|f| (f.target_name(direction).to_string(), self.field_value(f, direction)))
            .collect();

        let mut body = vec![
            Stmt::Define {
                name:  "s".into(),
                value: Expr::Composite { type_: dst.qualified(), entries },
            },
            Stmt::Blank,
        ];

        let apply = Expr::call("applyOptions", vec![spread_opts()]);
        let oneofs = match direction {
            Direction::DestToWire => mapping.oneof_representatives(),
            Direction::WireToDest => Vec::new(),
        };

        if oneofs.is_empty() {
            body.push(Stmt::Expr(apply));
            body.push(Stmt::Blank);
        } else {
            body.push(Stmt::Define { name: "o".into(), value: apply });
            body.push(Stmt::Blank);
            for field in oneofs {
                body.extend(oneof_write(field, &dst.package));
            }
        }

        body.push(Stmt::Return(Some(Expr::ident("s"))));

        Function {
            doc:    Vec::new(),
            name:   base.to_string(),
            params: params(TypeRef::value(src.qualified())),
            result: TypeRef::value(dst.qualified()),
            body,
        }
    }

    /// Right-hand side of one literal entry.
    fn field_value(&self, field: &FieldSpec, direction: Direction) -> Expr {
        let source = Expr::ident("src").field(field.source_name(direction));
        let Some(conversion) = field.conversion(direction) else {
            return source;
        };

        let func = match &field.kind {
            FieldKind::Message { list, .. } => {
                let (src_ptr, dst_ptr) = field.pointers(direction);
                function_name(conversion, Shape::new(src_ptr, dst_ptr, *list))
            }
            _ => self.qualify(conversion, field.use_package),
        };

        let mut args = vec![source];
        if let Some(extra) = &field.extra_args {
            args.push(Expr::Raw(extra.clone()));
        }
        Expr::call(func, args)
    }

    fn qualify(&self, func: &str, use_package: bool) -> String {
        match self.helper_package {
            Some(pkg) if use_package => format!("{}.{}", pkg, func),
            _ => func.to_string(),
        }
    }
}

/// Allocates the wire oneof holder and fills it through the write helper.
fn oneof_write(field: &FieldSpec, package: &str) -> Vec<Stmt> {
    let Some(write) = field.conversion(Direction::DestToWire) else {
        return Vec::new();
    };
    let holder = Expr::ident("s").field(&field.wire_name);
    let wire_type = if package.is_empty() {
        field.wire_type.clone()
    } else {
        format!("{}.{}", package, field.wire_type)
    };

    vec![
        Stmt::Assign {
            target: holder.clone(),
            value:  Expr::empty(wire_type).addr(),
        },
        Stmt::Expr(Expr::call(
            write,
            vec![
                Expr::ident("src").field(&field.name),
                holder,
                Expr::ident("o").field("Version"),
            ],
        )),
        Stmt::Blank,
    ]
}

fn spread_opts() -> Expr {
    Expr::Raw("opts...".into())
}

fn params(src: TypeRef) -> Vec<Param> {
    vec![
        Param::new("src", printer::type_ref(&src)),
        Param::new("opts", format!("...{}", OPTIONS_TYPE)),
    ]
}

fn ptr_to_ptr(base: &str, src: &str, dst: &str) -> Function {
    Function {
        doc:    Vec::new(),
        name:   function_name(base, Shape::new(true, true, false)),
        params: params(TypeRef::new(src, true, false)),
        result: TypeRef::new(dst, true, false),
        body:   vec![
            Stmt::IfNil {
                subject: Expr::ident("src"),
                body:    vec![Stmt::Return(Some(Expr::ident("nil")))],
            },
            Stmt::Blank,
            Stmt::Define {
                name:  "d".into(),
                value: Expr::call(base, vec![Expr::ident("src").deref(), spread_opts()]),
            },
            Stmt::Return(Some(Expr::ident("d").addr())),
        ],
    }
}

fn ptr_to_val(base: &str, src: &str, dst: &str) -> Function {
    Function {
        doc:    Vec::new(),
        name:   function_name(base, Shape::new(true, false, false)),
        params: params(TypeRef::new(src, true, false)),
        result: TypeRef::value(dst),
        body:   vec![
            Stmt::IfNil {
                subject: Expr::ident("src"),
                body:    vec![Stmt::Return(Some(Expr::empty(dst)))],
            },
            Stmt::Blank,
            Stmt::Return(Some(Expr::call(
                base,
                vec![Expr::ident("src").deref(), spread_opts()],
            ))),
        ],
    }
}

fn val_to_ptr(base: &str, src: &str, dst: &str) -> Function {
    Function {
        doc:    Vec::new(),
        name:   function_name(base, Shape::new(false, true, false)),
        params: params(TypeRef::value(src)),
        result: TypeRef::new(dst, true, false),
        body:   vec![
            Stmt::Define {
                name:  "d".into(),
                value: Expr::call(base, vec![Expr::ident("src"), spread_opts()]),
            },
            Stmt::Return(Some(Expr::ident("d").addr())),
        ],
    }
}

/// Maps the single-element variant of the same shape over the input.
fn list(base: &str, shape: Shape, src: &str, dst: &str) -> Function {
    let result = TypeRef::new(dst, shape.dst_ptr, true);
    let element = function_name(base, shape.element());

    Function {
        doc:    Vec::new(),
        name:   function_name(base, shape),
        params: params(TypeRef::new(src, shape.src_ptr, true)),
        result: result.clone(),
        body:   vec![
            Stmt::Define {
                name:  "resp".into(),
                value: Expr::MakeSlice {
                    elem:   result.element(),
                    len_of: Box::new(Expr::ident("src")),
                },
            },
            Stmt::Blank,
            Stmt::Range {
                key:   "i".into(),
                value: "s".into(),
                over:  Expr::ident("src"),
                body:  vec![Stmt::Assign {
                    target: Expr::Index(Box::new(Expr::ident("resp")), "i".into()),
                    value:  Expr::call(element, vec![Expr::ident("s"), spread_opts()]),
                }],
            },
            Stmt::Blank,
            Stmt::Return(Some(Expr::ident("resp"))),
        ],
    }
}

fn deprecated_list(base: &str, target: Shape, src: &str, dst: &str) -> Function {
    let name = deprecated_list_name(base);
    let forward_to = function_name(base, target);

    Function {
        doc:    vec![format!("{} is DEPRECATED. Use {} instead.", name, forward_to)],
        name,
        params: params(TypeRef::new(src, target.src_ptr, true)),
        result: TypeRef::new(dst, target.dst_ptr, true),
        body:   vec![Stmt::Return(Some(Expr::call(
            forward_to,
            vec![Expr::ident("src"), spread_opts()],
        )))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StructRef;

    fn mapping() -> MessageMapping {
        MessageMapping {
            wire:   StructRef::new("pb", "Customer", "Pb"),
            dest:   StructRef::new("models", "Customer", "Customer"),
            fields: vec![FieldSpec::copy("ID", "Id")],
        }
    }

    #[test]
    fn test_family_names() {
        let names: Vec<String> = Synthesizer::default()
            .family(&mapping(), Direction::WireToDest)
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "PbToCustomer",
                "PbToCustomerPtr",
                "PbToCustomerPtrVal",
                "PbToCustomerValPtr",
                "PbToCustomerValList",
                "PbToCustomerPtrList",
                "PbToCustomerPtrValList",
                "PbToCustomerValPtrList",
                "PbToCustomerList",
            ]
        );
    }

    #[test]
    fn test_deprecated_forwards_to_wire_pointer_list() {
        let synth = Synthesizer::default();
        let forward = synth.family(&mapping(), Direction::WireToDest);
        let backward = synth.family(&mapping(), Direction::DestToWire);

        let want = "// PbToCustomerList is DEPRECATED. Use PbToCustomerPtrValList instead.
func PbToCustomerList(src []*pb.Customer, opts ...TransformParam) []models.Customer {
\treturn PbToCustomerPtrValList(src, opts...)
}
";
        assert_eq!(printer::function(&forward[8]), want);

        let want = "// CustomerToPbList is DEPRECATED. Use CustomerToPbValPtrList instead.
func CustomerToPbList(src []models.Customer, opts ...TransformParam) []*pb.Customer {
\treturn CustomerToPbValPtrList(src, opts...)
}
";
        assert_eq!(printer::function(&backward[8]), want);
    }

    #[test]
    fn test_helper_package_prefix() {
        let synth = Synthesizer::new(Some("helpers"));
        let mut field = FieldSpec::copy("Count", "Count");
        field.kind = FieldKind::Convert {
            wire_to_dest: "Int64ToString".into(),
            dest_to_wire: "StringToInt64".into(),
        };
        field.use_package = true;

        let got = synth.field_value(&field, Direction::WireToDest);
        assert_eq!(printer::expr(&got, 0), "helpers.Int64ToString(src.Count)");

        field.use_package = false;
        let got = synth.field_value(&field, Direction::DestToWire);
        assert_eq!(printer::expr(&got, 0), "StringToInt64(src.Count)");
    }
}
