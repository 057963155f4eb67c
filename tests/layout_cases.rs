mod common;

use invoice_layout::{
    AddressLine, ExtractOptions, InvoiceRecord, PageText, PartRecord, TextPages, WarningCode,
    extract_batch, extract_document, extract_invoice,
};
use pretty_assertions::assert_eq;

fn pages_from(lines: &[Vec<&str>]) -> Vec<PageText> {
    lines
        .iter()
        .zip(1..)
        .map(|(lines, page_number)| PageText {
            page_number,
            text: lines.join("\n"),
        })
        .collect()
}

fn part(part_id: &str, description: &str, unit: &str, extended: &str) -> PartRecord {
    PartRecord {
        part_id: part_id.to_string(),
        description: description.to_string(),
        unit_price: Some(unit.to_string()),
        extended_price: Some(extended.to_string()),
    }
}

#[test]
fn full_invoice_is_reassembled_across_pages() {
    let pages = pages_from(&common::sample_invoice_pages());
    let report = extract_invoice(&pages, &ExtractOptions::default()).expect("report");

    assert_eq!(
        report.record,
        InvoiceRecord {
            invoice_id: Some("90012345".to_string()),
            pack_list_id: Some("182371".to_string()),
            harmonization_code: Some("8543.70.9960".to_string()),
            customer_po: Some("4500123456".to_string()),
            shipping_method: Some("UPS GROUND".to_string()),
            ship_date: Some("01/09/2025".to_string()),
            order_date: Some("01/02/2025".to_string()),
            ship_to_address: Some("NOVANTA INC\n125 Middlesex Turnpike".to_string()),
            parts: vec![
                part("ABC-1", "Widget", "$1.00", "$5.00"),
                part("XYZ-2", "Mounting bracket", "$2.50", "$5.00"),
            ],
        }
    );
    assert!(report.record.is_complete());
    assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
}

#[test]
fn identifier_page_then_parts_page() {
    let pages = pages_from(&[
        vec!["Invoice ID: INV-1001"],
        vec![
            "ORDERED SHIPPED PART ID DESCRIPTION PRICE EXTENDED",
            "1 1.00AB-100 Encoder $10.00 $10.00",
            "4 4.00CD-200 Cable assembly $2.00 $8.00",
        ],
    ]);
    let report = extract_invoice(&pages, &ExtractOptions::default()).expect("report");

    assert_eq!(report.record.invoice_id.as_deref(), Some("INV-1001"));
    assert_eq!(
        report.record.parts,
        vec![
            part("AB-100", "Encoder", "$10.00", "$10.00"),
            part("CD-200", "Cable assembly", "$2.00", "$8.00"),
        ]
    );
    assert_eq!(report.pages_scanned, 2);
}

#[test]
fn early_exit_matches_full_scan() {
    let mut lines = common::sample_invoice_pages();
    lines.push(vec![
        "Invoice ID: SHOULD-NOT-WIN",
        "Harmonization Code: 1111.11.1111",
    ]);
    let pages = pages_from(&lines);

    let early = extract_invoice(&pages, &ExtractOptions::default()).expect("early");
    let full = extract_invoice(
        &pages,
        &ExtractOptions {
            early_exit: false,
            ..ExtractOptions::default()
        },
    )
    .expect("full");

    assert!(early.stopped_early);
    assert_eq!(early.pages_scanned, 2);
    assert!(!full.stopped_early);
    assert_eq!(full.pages_scanned, 3);
    assert_eq!(early.record, full.record);
}

#[test]
fn later_parts_table_keeps_scanning_after_completion() {
    let mut lines = common::sample_invoice_pages();
    lines.push(vec!["Continued notes"]);
    lines.push(vec![
        "Invoice ID: SHOULD-NOT-WIN",
        "PART ID DESCRIPTION",
        "1 1.00LATE-1 Late row $1.00 $1.00",
        "Country MFG: DE",
    ]);
    let pages = pages_from(&lines);

    let early = extract_invoice(&pages, &ExtractOptions::default()).expect("early");
    let full = extract_invoice(
        &pages,
        &ExtractOptions {
            early_exit: false,
            ..ExtractOptions::default()
        },
    )
    .expect("full");

    assert!(!early.stopped_early);
    assert_eq!(early.pages_scanned, 4);
    assert_eq!(early.record, full.record);
    assert_eq!(early.record.invoice_id.as_deref(), Some("90012345"));
    let ids = early
        .record
        .parts
        .iter()
        .map(|part| part.part_id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["ABC-1", "XYZ-2", "LATE-1"]);
}

#[test]
fn terminated_tables_on_separate_pages_are_all_kept() {
    let pages = pages_from(&[
        vec!["PART ID DESCRIPTION", "1 1.00A-1 First $1.00 $1.00", "Country MFG: US"],
        vec!["PART ID DESCRIPTION", "1 1.00A-2 Second $2.00 $2.00", "Country MFG: US"],
    ]);
    let report = extract_invoice(
        &pages,
        &ExtractOptions {
            early_exit: false,
            ..ExtractOptions::default()
        },
    )
    .expect("report");

    assert_eq!(
        report.record.parts,
        vec![
            part("A-1", "First", "$1.00", "$1.00"),
            part("A-2", "Second", "$2.00", "$2.00"),
        ]
    );
}

#[test]
fn early_exit_matches_full_scan_when_never_complete() {
    let pages = pages_from(&[
        vec!["Invoice ID: A-1", "PART ID DESCRIPTION", "1 1.00P-1 One $1.00 $1.00"],
        vec!["Invoice ID: A-2", "PART ID DESCRIPTION", "1 1.00P-2 Two $1.00 $1.00"],
    ]);

    let early = extract_invoice(&pages, &ExtractOptions::default()).expect("early");
    let full = extract_invoice(
        &pages,
        &ExtractOptions {
            early_exit: false,
            ..ExtractOptions::default()
        },
    )
    .expect("full");

    assert_eq!(early.record, full.record);
    assert_eq!(early.record.parts.len(), 2);
    assert!(!early.stopped_early);
}

#[test]
fn missing_sections_degrade_to_absent_fields() {
    let pages = pages_from(&[vec![
        "Invoice ID: 77",
        "PACK LIST ID SALES REP ID",
        "",
        "CUSTOMER ID SHIP VIA SHIP DATE",
        "C1 SO1 01/01/2025",
        "PART ID DESCRIPTION",
        "junk",
        "1 1.00Q-1 Thing",
    ]]);
    let report = extract_invoice(&pages, &ExtractOptions::default()).expect("report");
    let record = &report.record;

    assert_eq!(record.invoice_id.as_deref(), Some("77"));
    assert_eq!(record.pack_list_id, None);
    assert_eq!(record.shipping_method, None);
    assert_eq!(record.ship_to_address, None);
    assert_eq!(
        record.parts,
        vec![PartRecord {
            part_id: "Q-1".to_string(),
            description: "Thing".to_string(),
            unit_price: None,
            extended_price: None,
        }]
    );
    assert!(
        report
            .warnings
            .iter()
            .any(|warning| warning.code == WarningCode::MalformedRow && warning.page == Some(1))
    );
    assert!(
        report
            .warnings
            .iter()
            .any(|warning| warning.code == WarningCode::FieldNotFound)
    );
}

#[test]
fn pack_list_row_shorter_than_header_is_absent() {
    let pages = pages_from(&[vec!["SALES REP ID PACK LIST ID", "INTL"]]);
    let report = extract_invoice(&pages, &ExtractOptions::default()).expect("report");
    assert_eq!(report.record.pack_list_id, None);
}

#[test]
fn address_lines_are_tagged_by_split_kind() {
    assert!(matches!(
        AddressLine::classify("ONE TWO THREE FOUR"),
        AddressLine::Split { .. }
    ));
    assert!(matches!(
        AddressLine::classify("ONE TWO THREE"),
        AddressLine::Verbatim(_)
    ));
}

#[test]
fn batch_keeps_going_after_an_unreadable_document() {
    let text = common::sample_invoice_pages()
        .iter()
        .map(|lines| lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\u{000C}");
    let sources: Vec<Box<dyn invoice_layout::PageSource>> = vec![
        Box::new(TextPages::new("empty.txt", "")),
        Box::new(TextPages::new("invoice.txt", text)),
    ];

    let outcomes = extract_batch(&sources, &ExtractOptions::default());
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].name, "empty.txt");
    assert!(
        outcomes[0]
            .result
            .as_ref()
            .is_err_and(invoice_layout::ExtractError::is_unreadable)
    );

    let report = outcomes[1].result.as_ref().expect("second document");
    assert_eq!(report.record.invoice_id.as_deref(), Some("90012345"));
    assert_eq!(report.record.parts.len(), 2);
}

#[test]
fn documents_share_no_state() {
    let first = TextPages::new("a", "Invoice ID: A\nPART ID DESCRIPTION\n1 1.00X-1 One $1.00 $1.00");
    let second = TextPages::new("b", "Invoice ID: B");

    let options = ExtractOptions::default();
    extract_document(&first, &options).expect("first");
    let report = extract_document(&second, &options).expect("second");

    assert_eq!(report.record.invoice_id.as_deref(), Some("B"));
    assert!(report.record.parts.is_empty());
}
