//! Follow-up message for one order

use crate::headers::{KnownHeaders, column_index};
use crate::reader::CellValue;

/// Asked of every client whose collection point is not confirmed
pub const COLLECTION_REMINDER: &str = "- whether you will be collecting on site or at the take away point (Please note that the time of collection for Take Aways ranges from 16:30 to 20:00, kindly let us know at what time you will come and collect your order).";

/// Sent to every client whose payment is not marked done
pub const PAYMENT_INSTRUCTIONS: &str = "
For the payment of your order:
MCB Account Number for Payment: 000 452 303 990
Send proof of payment to 54591307
";

/// The two conditional blocks of a message; each is empty or its full literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fragments {
    pub collection: &'static str,
    pub payment: &'static str,
}

impl Fragments {
    /// Interpolate the fragments into the fixed confirmation message
    pub fn compose(&self) -> String {
        format!(
            "Assalamu Allaikum wa Rahmatullahi wa Barakatuhu

We are contacting you to confirm your order for mina bazar on the 6th of September.

Please confirm:
- the amount of each item
{}

{}

Please respond to this message to confirm your order.

Jazakumullah
Wassalam
",
            self.collection, self.payment
        )
    }
}

/// Collection reminder unless the cell reads `YES` (trimmed, any case).
///
/// `None` means the table has no collection point column.
pub fn collection_fragment(cell: Option<&CellValue>, remind_when_absent: bool) -> &'static str {
    let confirmed = match cell {
        None => !remind_when_absent,
        Some(CellValue::Missing) => false,
        Some(value) => value.to_string().trim().to_uppercase() == "YES",
    };
    if confirmed { "" } else { COLLECTION_REMINDER }
}

/// Payment instructions unless the cell reads `done` (trimmed, any case).
///
/// `None` means the table has no payment column.
pub fn payment_fragment(cell: Option<&CellValue>, remind_when_absent: bool) -> &'static str {
    let paid = match cell {
        None => !remind_when_absent,
        Some(CellValue::Missing) => false,
        Some(value) => value.to_string().trim().to_lowercase() == "done",
    };
    if paid { "" } else { PAYMENT_INSTRUCTIONS }
}

/// Resolves the collection point and payment columns once per table
#[derive(Debug, Clone)]
pub struct MessageSynthesizer {
    collection_point: Option<usize>,
    payment: Option<usize>,
    remind_when_absent: bool,
}

impl MessageSynthesizer {
    pub fn new(headers: &[String], columns: &KnownHeaders, remind_when_absent: bool) -> Self {
        Self {
            collection_point: column_index(headers, &columns.collection_point),
            payment: column_index(headers, &columns.payment),
            remind_when_absent,
        }
    }

    pub fn fragments(&self, row: &[CellValue]) -> Fragments {
        let cell = |index: Option<usize>| index.and_then(|i| row.get(i));
        Fragments {
            collection: collection_fragment(cell(self.collection_point), self.remind_when_absent),
            payment: payment_fragment(cell(self.payment), self.remind_when_absent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::COLLECTION_POINT;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_collection_fragment() {
        assert_eq!(collection_fragment(Some(&text("YES")), false), "");
        assert_eq!(collection_fragment(Some(&text(" yes ")), false), "");
        assert_eq!(collection_fragment(Some(&text("NO")), false), COLLECTION_REMINDER);
        assert_eq!(collection_fragment(Some(&text("")), false), COLLECTION_REMINDER);
        assert_eq!(collection_fragment(Some(&CellValue::Missing), false), COLLECTION_REMINDER);
        assert_eq!(collection_fragment(Some(&CellValue::Number(1.0)), false), COLLECTION_REMINDER);
    }

    #[test]
    fn test_payment_fragment() {
        assert_eq!(payment_fragment(Some(&text("done")), false), "");
        assert_eq!(payment_fragment(Some(&text("  Done\t")), false), "");
        assert_eq!(payment_fragment(Some(&text("done!")), false), PAYMENT_INSTRUCTIONS);
        assert_eq!(payment_fragment(Some(&CellValue::Missing), false), PAYMENT_INSTRUCTIONS);
    }

    #[test]
    fn test_absent_columns_follow_policy() {
        assert_eq!(collection_fragment(None, false), "");
        assert_eq!(payment_fragment(None, false), "");
        assert_eq!(collection_fragment(None, true), COLLECTION_REMINDER);
        assert_eq!(payment_fragment(None, true), PAYMENT_INSTRUCTIONS);
    }

    #[test]
    fn test_synthesizer_fragments_are_independent() {
        let headers: Vec<String> = ["Name", COLLECTION_POINT, "payment"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let synthesizer = MessageSynthesizer::new(&headers, &KnownHeaders::default(), false);

        let fragments = synthesizer.fragments(&[text("Aisha"), text("YES"), CellValue::Missing]);
        assert_eq!(fragments.collection, "");
        assert_eq!(fragments.payment, PAYMENT_INSTRUCTIONS);

        let fragments = synthesizer.fragments(&[text("Bilal"), text("no"), text("DONE")]);
        assert_eq!(fragments.collection, COLLECTION_REMINDER);
        assert_eq!(fragments.payment, "");
    }

    #[test]
    fn test_compose_interpolates_fragments() {
        let message = Fragments {
            collection: COLLECTION_REMINDER,
            payment: PAYMENT_INSTRUCTIONS,
        }
        .compose();

        assert!(message.starts_with("Assalamu Allaikum"));
        assert!(message.contains(COLLECTION_REMINDER));
        assert!(message.contains("MCB Account Number for Payment: 000 452 303 990"));
        assert!(message.ends_with("Wassalam\n"));

        let bare = Fragments::default().compose();
        assert!(!bare.contains("16:30"));
        assert!(!bare.contains("MCB"));
        assert!(bare.contains("- the amount of each item"));
    }
}
