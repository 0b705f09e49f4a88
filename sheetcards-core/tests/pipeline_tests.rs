use sheetcards_core::message::{COLLECTION_REMINDER, PAYMENT_INSTRUCTIONS};
use sheetcards_core::{
    CardError, CardRenderer, FilterToggles, NoticeLevel, ProjectedField, ReadError,
    SheetCardsConfig,
};
use std::fs;
use std::path::{Path, PathBuf};

const ORDER_HEADERS: &str = "Name,Items,Contact by,ORDER WILL COLLECT  TAKE AWAY point,payment";

// Helper to write an order sheet next to the test's temp dir
fn write_sheet(dir: &Path, name: &str, content: &[u8]) -> anyhow::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, content)?;
    Ok(path)
}

#[test]
fn test_paid_and_unpaid_orders() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let content = format!("{ORDER_HEADERS}\nAisha,3 samosas,,YES,done\nBilal,2 pies,,NO,\n");
    let path = write_sheet(dir.path(), "orders.csv", content.as_bytes())?;

    let frame = CardRenderer::new().frame_file(&path, None, None, FilterToggles::default());
    assert!(!frame.has_errors());
    assert_eq!(frame.cards.len(), 2);

    let aisha = &frame.cards[0];
    assert_eq!(
        aisha.fields,
        vec![
            ProjectedField::new("Items", "3 samosas"),
            ProjectedField::new("Order will be collected at take away point", "YES"),
            ProjectedField::new("payment", "done"),
        ]
    );
    assert!(!aisha.needs_collection_reminder);
    assert!(!aisha.needs_payment_reminder);

    let bilal = &frame.cards[1];
    assert_eq!(bilal.heading(), "--- Row 2: Bilal ---");
    assert_eq!(
        bilal.fields,
        vec![
            ProjectedField::new("Items", "2 pies"),
            ProjectedField::new("Order will be collected at take away point", "NO"),
        ]
    );
    let message = bilal.message.as_deref().unwrap_or_default();
    assert!(message.contains(COLLECTION_REMINDER));
    assert!(message.contains(PAYMENT_INSTRUCTIONS));

    Ok(())
}

#[test]
fn test_blank_contact_and_done_filters() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let content = format!(
        "{ORDER_HEADERS}\nAisha,3 samosas,,YES,done\nBilal,2 pies,,NO,\nChafik,1 cake,Aisha,YES,\n"
    );
    let path = write_sheet(dir.path(), "orders.csv", content.as_bytes())?;
    let renderer = CardRenderer::new();

    let toggles = FilterToggles {
        show_done_payments: true,
        show_only_blank_contact: true,
    };
    let frame = renderer.frame_file(&path, None, None, toggles);
    let rows: Vec<usize> = frame.cards.iter().map(|c| c.row).collect();
    assert_eq!(rows, vec![1, 2]);

    let toggles = FilterToggles {
        show_done_payments: false,
        show_only_blank_contact: false,
    };
    let frame = renderer.frame_file(&path, None, None, toggles);
    let rows: Vec<usize> = frame.cards.iter().map(|c| c.row).collect();
    assert_eq!(rows, vec![2, 3]);

    Ok(())
}

#[test]
fn test_inverted_range_renders_nothing() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let content = format!("{ORDER_HEADERS}\nAisha,3 samosas,,YES,done\nBilal,2 pies,,NO,\n");
    let path = write_sheet(dir.path(), "orders.csv", content.as_bytes())?;

    let frame = CardRenderer::new().frame_file(&path, Some(2), Some(1), FilterToggles::default());
    assert!(frame.cards.is_empty());
    let last = frame.notices.last().expect("range notice");
    assert_eq!(last.level, NoticeLevel::Error);
    assert!(last.message.contains("cannot be greater than the end row"));

    Ok(())
}

#[test]
fn test_header_only_file_is_empty_table() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_sheet(dir.path(), "orders.csv", format!("{ORDER_HEADERS}\n").as_bytes())?;

    let err = CardRenderer::new().load(&path).unwrap_err();
    assert!(matches!(err, CardError::EmptyTable(_)));

    let frame = CardRenderer::new().frame_file(&path, None, None, FilterToggles::default());
    assert_eq!(frame.notices.len(), 1);
    assert_eq!(frame.notices[0].level, NoticeLevel::Warning);

    Ok(())
}

#[test]
fn test_windows_1252_fallback() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_sheet(dir.path(), "orders.csv", b"Name,Items\nJos\xe9,cr\xe8me br\xfbl\xe9e\n")?;

    let loaded = CardRenderer::new().load(&path)?;
    assert_eq!(loaded.table.rows[0][0].as_text(), Some("José"));

    let mut config = SheetCardsConfig::default();
    config.loader.encodings = vec!["utf-8".to_string()];
    let err = CardRenderer::with_config(config).load(&path).unwrap_err();
    assert!(matches!(err, CardError::Read(ReadError::Decode { .. })));

    Ok(())
}

#[test]
fn test_missing_file_is_read_error() {
    let err = CardRenderer::new()
        .load("/nonexistent/orders.csv")
        .unwrap_err();
    assert!(matches!(err, CardError::Read(ReadError::Io(_))));
}

#[test]
fn test_tsv_and_header_warnings() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_sheet(
        dir.path(),
        "orders.tsv",
        b"Name\tItems\tORDER WILL COLLECT TAKE AWAY point\nAisha\tpies\tYES\n",
    )?;

    let loaded = CardRenderer::new().load(&path)?;
    assert_eq!(loaded.table.column_count(), 3);
    assert_eq!(loaded.warnings.len(), 1);
    assert_eq!(loaded.warnings[0].role, "collection point");

    // The near miss is still an ordinary column
    let frame = CardRenderer::new().frame(&loaded, None, None, FilterToggles::default());
    assert_eq!(frame.notices[1].level, NoticeLevel::Warning);
    assert_eq!(
        frame.cards[0].fields[1],
        ProjectedField::new("ORDER WILL COLLECT TAKE AWAY point", "YES")
    );

    Ok(())
}
