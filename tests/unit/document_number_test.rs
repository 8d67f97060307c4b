// Document number format: {prefix}-{year}-{sequence}, sequence zero-padded
// to four digits and allowed to grow past 9999.

use proptest::prelude::*;

use thaibill::modules::numbering::{format_document_number, DocumentKind};

proptest! {
    #[test]
    fn test_number_parses_back(year in 2000i32..2200i32, seq in 1u32..100_000u32) {
        let number = format_document_number(DocumentKind::Invoice.prefix(), year, seq);
        let parts: Vec<&str> = number.splitn(3, '-').collect();

        prop_assert_eq!(parts.len(), 3);
        prop_assert_eq!(parts[0], "INV");
        prop_assert_eq!(parts[1].parse::<i32>().unwrap(), year);
        prop_assert_eq!(parts[2].parse::<u32>().unwrap(), seq);
        prop_assert!(parts[2].len() >= 4);
    }

    #[test]
    fn test_numbers_sort_by_sequence_within_a_year(a in 1u32..10_000u32, b in 1u32..10_000u32) {
        let na = format_document_number("QT", 2025, a);
        let nb = format_document_number("QT", 2025, b);
        prop_assert_eq!(a.cmp(&b), na.cmp(&nb));
    }
}

#[test]
fn test_prefixes() {
    assert_eq!(DocumentKind::Quotation.prefix(), "QT");
    assert_eq!(DocumentKind::Invoice.prefix(), "INV");
}

#[test]
fn test_reference_numbers() {
    assert_eq!(format_document_number("QT", 2025, 1), "QT-2025-0001");
    assert_eq!(format_document_number("INV", 2024, 42), "INV-2024-0042");
    assert_eq!(format_document_number("INV", 2024, 12345), "INV-2024-12345");
}
