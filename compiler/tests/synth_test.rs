#![cfg(test)]

use struct_transformer_compiler::{
    printer,
    synth::Synthesizer,
    types::{Direction, FieldKind, FieldSpec, MessageMapping, StructRef},
};

fn lines(lines: &[&str]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn customer() -> MessageMapping {
    let address = FieldSpec {
        name:          "Address".into(),
        wire_name:     "Address".into(),
        wire_type:     "Pb".into(),
        kind:          FieldKind::Message {
            wire_to_dest: "PbToAddress".into(),
            dest_to_wire: "AddressToPb".into(),
            list:         false,
        },
        dest_pointer:  false,
        wire_nullable: true,
        use_package:   false,
        extra_args:    Some("opts...".into()),
    };
    let created_at = FieldSpec {
        kind: FieldKind::Convert {
            wire_to_dest: "TimePtrToNullsTime".into(),
            dest_to_wire: "NullsTimeToTimePtr".into(),
        },
        use_package: true,
        ..FieldSpec::copy("CreatedAt", "CreatedAt")
    };

    MessageMapping {
        wire:   StructRef::new("pb", "Customer", "Pb"),
        dest:   StructRef::new("models", "Customer", "Customer"),
        fields: vec![FieldSpec::copy("ID", "Id"), address, created_at],
    }
}

fn with_oneof() -> MessageMapping {
    let oneof = |name: &str| FieldSpec {
        name:          name.into(),
        wire_name:     name.into(),
        wire_type:     "TheOne".into(),
        kind:          FieldKind::Oneof {
            read:       "TheOneToString".into(),
            write:      "StringToTheOne".into(),
            decl:       "the_decl".into(),
            dest_alias: "String".into(),
        },
        dest_pointer:  false,
        wire_nullable: true,
        use_package:   false,
        extra_args:    None,
    };

    MessageMapping {
        wire:   StructRef::new("pb", "Product", "Pb"),
        dest:   StructRef::new("", "Product", "Product"),
        fields: vec![FieldSpec::copy("ID", "Id"), oneof("Value"), oneof("Other")],
    }
}

fn render(mapping: &MessageMapping, direction: Direction, index: usize) -> String {
    let synth = Synthesizer::new(Some("helpers"));
    printer::function(&synth.family(mapping, direction)[index])
}

#[test]
fn test_value_to_value_forward() {
    let want = lines(&[
        "func PbToCustomer(src pb.Customer, opts ...TransformParam) models.Customer {",
        "\ts := models.Customer{",
        "\t\tID:        src.Id,",
        "\t\tAddress:   PbToAddressPtrVal(src.Address, opts...),",
        "\t\tCreatedAt: helpers.TimePtrToNullsTime(src.CreatedAt),",
        "\t}",
        "",
        "\tapplyOptions(opts...)",
        "",
        "\treturn s",
        "}",
    ]);
    assert_eq!(render(&customer(), Direction::WireToDest, 0), want);
}

#[test]
fn test_value_to_value_backward() {
    let want = lines(&[
        "func CustomerToPb(src models.Customer, opts ...TransformParam) pb.Customer {",
        "\ts := pb.Customer{",
        "\t\tId:        src.ID,",
        "\t\tAddress:   AddressToPbValPtr(src.Address, opts...),",
        "\t\tCreatedAt: helpers.NullsTimeToTimePtr(src.CreatedAt),",
        "\t}",
        "",
        "\tapplyOptions(opts...)",
        "",
        "\treturn s",
        "}",
    ]);
    assert_eq!(render(&customer(), Direction::DestToWire, 0), want);
}

#[test]
fn test_ptr_to_ptr() {
    let want = lines(&[
        "func PbToCustomerPtr(src *pb.Customer, opts ...TransformParam) *models.Customer {",
        "\tif src == nil {",
        "\t\treturn nil",
        "\t}",
        "",
        "\td := PbToCustomer(*src, opts...)",
        "\treturn &d",
        "}",
    ]);
    assert_eq!(render(&customer(), Direction::WireToDest, 1), want);
}

#[test]
fn test_ptr_to_val() {
    let want = lines(&[
        "func CustomerToPbPtrVal(src *models.Customer, opts ...TransformParam) pb.Customer {",
        "\tif src == nil {",
        "\t\treturn pb.Customer{}",
        "\t}",
        "",
        "\treturn CustomerToPb(*src, opts...)",
        "}",
    ]);
    assert_eq!(render(&customer(), Direction::DestToWire, 2), want);
}

#[test]
fn test_val_to_ptr() {
    let want = lines(&[
        "func PbToCustomerValPtr(src pb.Customer, opts ...TransformParam) *models.Customer {",
        "\td := PbToCustomer(src, opts...)",
        "\treturn &d",
        "}",
    ]);
    assert_eq!(render(&customer(), Direction::WireToDest, 3), want);
}

#[test]
fn test_lists() {
    let cases = [
        (4, "PbToCustomerValList", "[]pb.Customer", "[]models.Customer", "models.Customer", "PbToCustomer"),
        (5, "PbToCustomerPtrList", "[]*pb.Customer", "[]*models.Customer", "*models.Customer", "PbToCustomerPtr"),
        (6, "PbToCustomerPtrValList", "[]*pb.Customer", "[]models.Customer", "models.Customer", "PbToCustomerPtrVal"),
        (7, "PbToCustomerValPtrList", "[]pb.Customer", "[]*models.Customer", "*models.Customer", "PbToCustomerValPtr"),
    ];

    for (index, name, src, dst, elem, single) in cases {
        let want = lines(&[
            &format!("func {}(src {}, opts ...TransformParam) {} {{", name, src, dst),
            &format!("\tresp := make([]{}, len(src))", elem),
            "",
            "\tfor i, s := range src {",
            &format!("\t\tresp[i] = {}(s, opts...)", single),
            "\t}",
            "",
            "\treturn resp",
            "}",
        ]);
        assert_eq!(render(&customer(), Direction::WireToDest, index), want, "{}", name);
    }
}

#[test]
fn test_oneof_forward_reads_in_literal() {
    let want = lines(&[
        "func PbToProduct(src pb.Product, opts ...TransformParam) Product {",
        "\ts := Product{",
        "\t\tID:    src.Id,",
        "\t\tValue: TheOneToString(src.Value),",
        "\t\tOther: TheOneToString(src.Other),",
        "\t}",
        "",
        "\tapplyOptions(opts...)",
        "",
        "\treturn s",
        "}",
    ]);
    assert_eq!(render(&with_oneof(), Direction::WireToDest, 0), want);
}

#[test]
fn test_oneof_backward_writes_after_literal() {
    // one write per declaration, using its first field
    let want = lines(&[
        "func ProductToPb(src Product, opts ...TransformParam) pb.Product {",
        "\ts := pb.Product{",
        "\t\tId: src.ID,",
        "\t}",
        "",
        "\to := applyOptions(opts...)",
        "",
        "\ts.Value = &pb.TheOne{}",
        "\tStringToTheOne(src.Value, s.Value, o.Version)",
        "",
        "\treturn s",
        "}",
    ]);
    assert_eq!(render(&with_oneof(), Direction::DestToWire, 0), want);
}

#[test]
fn test_repeated_field_call() {
    let addresses = FieldSpec {
        name:          "Addresses".into(),
        wire_name:     "Addresses".into(),
        wire_type:     "Pb".into(),
        kind:          FieldKind::Message {
            wire_to_dest: "PbToAddress".into(),
            dest_to_wire: "AddressToPb".into(),
            list:         true,
        },
        dest_pointer:  false,
        wire_nullable: true,
        use_package:   false,
        extra_args:    Some("opts...".into()),
    };
    let mapping = MessageMapping {
        wire:   StructRef::new("pb", "Customer", "Pb"),
        dest:   StructRef::new("", "Customer", "Customer"),
        fields: vec![addresses],
    };

    let forward = render(&mapping, Direction::WireToDest, 0);
    assert!(forward.contains("\t\tAddresses: PbToAddressPtrValList(src.Addresses, opts...),\n"));

    let backward = render(&mapping, Direction::DestToWire, 0);
    assert!(backward.contains("\t\tAddresses: AddressToPbValPtrList(src.Addresses, opts...),\n"));
}

#[test]
fn test_render_both_directions() {
    let out = Synthesizer::default().render(&customer());
    let names: Vec<&str> = out
        .lines()
        .filter_map(|l| l.strip_prefix("func "))
        .map(|l| &l[..l.find('(').unwrap()])
        .collect();
    assert_eq!(names.len(), 18);
    assert_eq!(names[0], "PbToCustomer");
    assert_eq!(names[8], "PbToCustomerList");
    assert_eq!(names[9], "CustomerToPb");
    assert_eq!(names[17], "CustomerToPbList");

    // helpers are unqualified without a helper package
    assert!(out.contains("TimePtrToNullsTime(src.CreatedAt)"));
    assert!(!out.contains("helpers."));
    assert!(out.contains("}\n\nfunc PbToCustomerPtr("));
}
