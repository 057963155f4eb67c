#![allow(dead_code)]

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// Writes a PDF with one text object per line so every extractor sees line breaks.
pub fn create_test_pdf(path: &Path, pages: &[Vec<&str>]) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut page_ids = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (index, line) in lines.iter().enumerate() {
            let y = 780 - 16 * i64::try_from(index)?;
            operations.extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 10.into()]),
                Operation::new("Td", vec![40.into(), y.into()]),
                Operation::new("Tj", vec![Object::string_literal(*line)]),
                Operation::new("ET", vec![]),
            ]);
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| (*id).into()).collect::<Vec<_>>(),
            "Count" => i64::try_from(page_ids.len())?,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    doc.save(path)?;
    Ok(())
}

/// Plain-text pages of a two-page invoice in the supported layout.
pub fn sample_invoice_pages() -> Vec<Vec<&'static str>> {
    vec![
        vec![
            "NOVANTA INC",
            "Invoice ID: 90012345",
            "BILL TO: SHIP TO:",
            "ACME CORP NOVANTA INC",
            "125 Middlesex Turnpike",
            "",
            "CUSTOMER ID SALES ORDER SHIP VIA ORDER DATE SHIP DATE",
            "C1002 SO-77 UPS GROUND 01/02/2025 01/09/2025",
            "PACK LIST ID SALES REP ID CUSTOMER PO",
            "182371 INTL 4500123456",
        ],
        vec![
            "ORDERED SHIPPED PART ID DESCRIPTION UNIT PRICE EXTENDED PRICE",
            "00123 SHIP9998ABC-1 Widget $1.00 $5.00",
            "00003",
            "2 2.00XYZ-2 Mounting bracket $2.50 $5.00",
            "Country MFG: US",
            "Harmonization Code: 8543.70.9960",
        ],
    ]
}
