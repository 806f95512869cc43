use saldo_report::{
    Cell, DocTypeMap, HelperColumns, ISSUED_HEADER, ReferenceColumns, ReferenceMap, SaldoBuilder,
    SaldoError, SaldoInputs, SaldoReport, Sheet, TEMPLATE_HEADER_ROW, TemplateColumns, Theme,
};

fn load_fixture(name: &str, header_row: u32) -> Sheet {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let file = std::fs::File::open(path).expect("open fixture");
    Sheet::from_csv_reader(file, header_row).expect("parse fixture")
}

fn fixture_inputs() -> SaldoInputs {
    SaldoInputs {
        template: load_fixture("template.csv", TEMPLATE_HEADER_ROW),
        helper: load_fixture("helper.csv", 1),
        movements: load_fixture("movements.csv", 1),
        references: load_fixture("references.csv", 1),
    }
}

fn generate_fixture_report() -> SaldoReport {
    SaldoBuilder::new(fixture_inputs(), "Ján Novák", "1002003", "800123")
        .generate()
        .expect("generate report")
}

fn sheet(header_row: u32, rows: &[&[&str]]) -> Sheet {
    let rows = rows
        .iter()
        .map(|cells| {
            cells
                .iter()
                .map(|value| {
                    if value.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text((*value).to_string())
                    }
                })
                .collect()
        })
        .collect();
    Sheet::from_rows(header_row, rows)
}

fn template_with_issued(issued: &str) -> Sheet {
    sheet(
        5,
        &[
            &[""],
            &[""],
            &[""],
            &[""],
            &[
                "Číslo dokladu",
                "Číslo Faktúry",
                issued,
                "Dátum účtovania",
                "Splatnosť netto",
                "Typ dokladu",
                "Čiastka",
                "Zostatok",
            ],
        ],
    )
}

fn helper_sheet() -> Sheet {
    sheet(
        1,
        &[
            &["Označenie pôvodu", "Typ dokladu"],
            &["X1", "Faktúra"],
            &["X2", "Platba"],
        ],
    )
}

fn references_sheet(rows: &[&[&str]]) -> Sheet {
    let mut all: Vec<&[&str]> = vec![&["Číslo dokladu", "Doplnková referencia"]];
    all.extend_from_slice(rows);
    sheet(1, &all)
}

fn movements_sheet(rows: &[&[&str]]) -> Sheet {
    let mut all: Vec<&[&str]> = vec![&[
        "Číslo dokladu",
        "Dátum zadania",
        "Dátum účtovania",
        "Splatnosť netto",
        "Označenie pôvodu",
        "Čiastka",
    ]];
    all.extend_from_slice(rows);
    sheet(1, &all)
}

fn mini_inputs(movements: Sheet) -> SaldoInputs {
    SaldoInputs {
        template: template_with_issued(ISSUED_HEADER),
        helper: helper_sheet(),
        movements,
        references: references_sheet(&[]),
    }
}

#[test]
fn generates_report_from_fixtures() {
    let report = generate_fixture_report();

    // Staršie znenie hlavičky je prepísané a stĺpec označený na zalomenie.
    assert_eq!(
        report.sheet.cell(9, 3),
        &Cell::Text(ISSUED_HEADER.to_string())
    );
    assert_eq!(report.columns.issued, 3);
    assert_eq!(report.columns.wrapped, vec![3]);

    // Štyri dátové riadky pohybov, jeden prázdny — tri riadky salda.
    assert_eq!(report.ledger.len(), 3);
    assert_eq!(report.last_row, 12);

    let rows = &report.projection.rows;
    assert_eq!(rows[0].document, "D1");
    assert_eq!(rows[0].invoice, "000123");
    assert_eq!(rows[0].issued, "01.03.2024");
    assert_eq!(rows[0].posted, "02.03.2024");
    assert_eq!(rows[0].due, "31.03.2024");
    assert_eq!(rows[0].doc_type, "Faktúra");
    assert_eq!(rows[0].amount, "100,00\u{a0}€");
    assert_eq!(rows[0].balance, "100,00\u{a0}€");

    assert_eq!(rows[1].document, "D2");
    assert_eq!(rows[1].doc_type, "Platba");
    assert_eq!(rows[1].invoice, "");
    assert_eq!(rows[1].due, "");
    assert_eq!(rows[1].amount, "-40,00\u{a0}€");
    assert_eq!(rows[1].balance, "60,00\u{a0}€");

    assert_eq!(rows[2].document, "D3");
    assert_eq!(rows[2].invoice, "777888");
    assert_eq!(rows[2].balance, "85,50\u{a0}€");
    assert_eq!(report.projection.total, "85,50\u{a0}€");

    // Hlavičkové bunky reportu.
    assert_eq!(report.sheet.cell(1, 2), &Cell::Text("1002003".to_string()));
    assert_eq!(report.sheet.cell(2, 2), &Cell::Text("Ján Novák".to_string()));
    assert_eq!(report.sheet.cell(3, 2), &Cell::Text("SWAN a.s.".to_string()));
    assert_eq!(report.sheet.cell(4, 2), &Cell::Text("800123".to_string()));
}

#[test]
fn stale_template_rows_are_replaced() {
    let report = generate_fixture_report();
    assert_eq!(report.sheet.cell(10, 1), &Cell::Text("D1".to_string()));
    assert!(report.sheet.cell(13, 1).is_blank());
}

#[test]
fn balance_formulas_are_chained() {
    let report = generate_fixture_report();
    assert_eq!(report.sheet.cell(10, 8), &Cell::Formula("=G10".to_string()));
    assert_eq!(
        report.sheet.cell(11, 8),
        &Cell::Formula("=H10+G11".to_string())
    );
    assert_eq!(
        report.sheet.cell(12, 8),
        &Cell::Formula("=H11+G12".to_string())
    );
}

#[test]
fn total_summary_block_is_written() {
    let report = generate_fixture_report();
    assert_eq!(report.summary_row, Some(14));
    assert_eq!(
        report.sheet.cell(14, 8),
        &Cell::Formula("=SUM(H10:H12)".to_string())
    );
    assert_eq!(
        report.sheet.cell(14, 7),
        &Cell::Text("Celkový zostatok:".to_string())
    );
}

#[test]
fn balances_chain_and_regeneration_is_idempotent() {
    let inputs = fixture_inputs();
    let first = SaldoBuilder::new(inputs.clone(), "Ján Novák", "1002003", "800123")
        .generate()
        .expect("first run");
    let second = SaldoBuilder::new(inputs, "Ján Novák", "1002003", "800123")
        .generate()
        .expect("second run");

    for (i, row) in first.ledger.iter().enumerate() {
        let amount = row.amount.expect("numeric amount");
        if i == 0 {
            assert_eq!(row.balance, amount);
        } else {
            assert_eq!(row.balance, first.ledger[i - 1].balance + amount);
        }
    }
    for (a, b) in first.ledger.iter().zip(&second.ledger) {
        assert_eq!(a.balance, b.balance);
    }
    assert_eq!(first.projection.total, second.projection.total);
}

#[test]
fn header_phrasings_resolve_same_column() {
    let phrasings = [
        ISSUED_HEADER,
        "Dátum vystavenia/Pripísania platby",
        "Dátum zadania",
    ];
    for phrasing in phrasings {
        let mut template = template_with_issued(phrasing);
        let columns = TemplateColumns::resolve(&mut template).expect("resolve template");
        assert_eq!(columns.issued, 3, "phrasing '{phrasing}'");
        assert_eq!(
            template.cell(5, 3),
            &Cell::Text(ISSUED_HEADER.to_string()),
            "phrasing '{phrasing}'"
        );
    }
}

#[test]
fn canonical_header_is_not_marked_for_wrapping() {
    let mut template = template_with_issued(ISSUED_HEADER);
    let columns = TemplateColumns::resolve(&mut template).expect("resolve template");
    assert!(columns.wrapped.is_empty());

    let mut legacy = template_with_issued("Dátum zadania");
    let columns = TemplateColumns::resolve(&mut legacy).expect("resolve template");
    assert_eq!(columns.wrapped, vec![3]);
}

#[test]
fn missing_template_columns_are_aggregated() {
    let mut template = sheet(
        1,
        &[&[
            "Číslo dokladu",
            "Číslo Faktúry",
            ISSUED_HEADER,
            "Dátum účtovania",
            "Splatnosť netto",
            "Typ dokladu",
        ]],
    );
    let err = TemplateColumns::resolve(&mut template).expect_err("missing columns");
    assert!(matches!(
        err,
        SaldoError::MissingColumns {
            source_label: "šablóna",
            ..
        }
    ));
    let message = err.to_string();
    assert!(message.contains("Čiastka"), "{message}");
    assert!(message.contains("Zostatok"), "{message}");
}

#[test]
fn missing_helper_column_fails() {
    let helper = sheet(1, &[&["Označenie pôvodu"]]);
    let err = HelperColumns::resolve(&helper).expect_err("missing doc type column");
    assert!(matches!(
        err,
        SaldoError::MissingColumns {
            source_label: "pomôcka",
            ..
        }
    ));
    assert!(err.to_string().contains("Typ dokladu"));
}

#[test]
fn doc_type_keys_trim_but_keep_case() {
    let helper = helper_sheet();
    let columns = HelperColumns::resolve(&helper).expect("resolve helper");
    let map = DocTypeMap::from_sheet(&helper, &columns);

    let trimmed = map.resolve(&Cell::Text("X1  ".to_string()));
    assert_eq!(trimmed, Some(&Cell::Text("Faktúra".to_string())));
    assert_eq!(map.resolve(&Cell::Text("x1".to_string())), None);
    assert_eq!(map.resolve(&Cell::Empty), None);
}

#[test]
fn duplicate_origin_code_keeps_last_row() {
    let helper = sheet(
        1,
        &[
            &["Označenie pôvodu", "Typ dokladu"],
            &["X1", "Faktúra"],
            &["X1", "Dobropis"],
        ],
    );
    let columns = HelperColumns::resolve(&helper).expect("resolve helper");
    let map = DocTypeMap::from_sheet(&helper, &columns);
    assert_eq!(
        map.resolve(&Cell::Text("X1".to_string())),
        Some(&Cell::Text("Dobropis".to_string()))
    );
}

#[test]
fn reference_prefix_is_stripped_case_insensitively() {
    let references = references_sheet(&[
        &["D1", "VBRK 000123"],
        &["D2", "vbrk999"],
        &["D3", "Zmluva 55"],
        &["", "VBRK111"],
    ]);
    let columns = ReferenceColumns::resolve(&references).expect("resolve references");
    let map = ReferenceMap::from_sheet(&references, &columns);

    assert_eq!(map.resolve(&Cell::Text("D1".to_string())), Some("000123"));
    assert_eq!(map.resolve(&Cell::Text("D2".to_string())), Some("999"));
    assert_eq!(
        map.resolve(&Cell::Text("D3".to_string())),
        Some("Zmluva 55")
    );
    assert_eq!(map.len(), 3);
}

#[test]
fn non_invoice_rows_suppress_due_and_reference() {
    let movements = movements_sheet(&[&["D9", "2024-03-01", "2024-03-02", "2024-03-31", "X2", "10"]]);
    let mut inputs = mini_inputs(movements);
    inputs.references = references_sheet(&[&["D9", "VBRK555"]]);

    let report = SaldoBuilder::new(inputs, "Ján Novák", "1002003", "800123")
        .generate()
        .expect("generate report");

    let row = &report.projection.rows[0];
    assert_eq!(row.doc_type, "Platba");
    assert_eq!(row.due, "");
    assert_eq!(row.invoice, "");
    assert!(report.sheet.cell(6, 5).is_blank());
    assert!(report.sheet.cell(6, 2).is_blank());
}

#[test]
fn identical_rows_are_both_kept() {
    let movements = movements_sheet(&[
        &["D1", "2024-03-01", "2024-03-02", "", "X2", "5"],
        &["D1", "2024-03-01", "2024-03-02", "", "X2", "5"],
        &["", "", "", "", "", ""],
    ]);
    let report = SaldoBuilder::new(mini_inputs(movements), "Ján Novák", "1002003", "800123")
        .generate()
        .expect("generate report");
    assert_eq!(report.ledger.len(), 2);
    assert_eq!(report.projection.total, "10,00\u{a0}€");
}

#[test]
fn trailing_rows_without_document_are_excluded() {
    let movements = movements_sheet(&[
        &["D1", "2024-03-01", "2024-03-02", "", "X2", "5"],
        &["", "", "", "", "", "7"],
    ]);
    let report = SaldoBuilder::new(mini_inputs(movements), "Ján Novák", "1002003", "800123")
        .generate()
        .expect("generate report");

    // Riadok bez čísla dokladu je pod hranicou salda.
    assert_eq!(report.ledger.len(), 1);
    assert_eq!(report.last_row, 6);
    assert!(report.sheet.cell(7, 8).is_blank());
    assert_eq!(report.projection.total, "5,00\u{a0}€");
}

#[test]
fn unmapped_origin_leaves_doc_type_empty() {
    let movements = movements_sheet(&[&["D1", "2024-03-01", "2024-03-02", "", "X9", "5"]]);
    let report = SaldoBuilder::new(mini_inputs(movements), "Ján Novák", "1002003", "800123")
        .generate()
        .expect("generate report");
    assert!(report.sheet.cell(6, 6).is_blank());
    assert_eq!(report.projection.rows[0].doc_type, "");
}

#[test]
fn serial_and_typed_dates_format() {
    let mut movements = movements_sheet(&[&["D1", "", "", "", "X1", "5"]]);
    movements.set_cell(2, 2, Cell::Number("45357".parse().expect("decimal")));
    movements.set_cell(
        2,
        3,
        Cell::Date(chrono::NaiveDate::from_ymd_opt(2024, 3, 7).expect("date")),
    );
    movements.set_cell(2, 4, Cell::Text("neurčito".to_string()));

    let report = SaldoBuilder::new(mini_inputs(movements), "Ján Novák", "1002003", "800123")
        .generate()
        .expect("generate report");

    let row = &report.projection.rows[0];
    assert_eq!(row.issued, "06.03.2024");
    assert_eq!(row.posted, "07.03.2024");
    // Nerozpoznaný text dátumu prechádza bez zmeny.
    assert_eq!(row.due, "neurčito");
}

#[test]
fn amounts_with_spaces_and_commas_parse() {
    let movements = movements_sheet(&[
        &["D1", "2024-03-01", "", "", "X2", "1 234,56"],
        &["D2", "2024-03-02", "", "", "X2", "1\u{a0}000"],
        &["D3", "2024-03-03", "", "", "X2", "nie je číslo"],
    ]);
    let report = SaldoBuilder::new(mini_inputs(movements), "Ján Novák", "1002003", "800123")
        .generate()
        .expect("generate report");

    let rows = &report.projection.rows;
    assert_eq!(rows[0].amount, "1 234,56\u{a0}€");
    assert_eq!(rows[1].amount, "1 000,00\u{a0}€");
    assert_eq!(rows[2].amount, "");
    // Nečíselná čiastka sa do zostatku nepočíta.
    assert_eq!(report.projection.total, "2 234,56\u{a0}€");
}

#[test]
fn empty_movements_yield_empty_report() {
    let movements = movements_sheet(&[]);
    let report = SaldoBuilder::new(mini_inputs(movements), "Ján Novák", "1002003", "800123")
        .generate()
        .expect("generate report");
    assert!(report.ledger.is_empty());
    assert_eq!(report.summary_row, None);
    assert_eq!(report.projection.total, "0,00\u{a0}€");
}

#[test]
fn blank_required_params_fail_fast() {
    let err = SaldoBuilder::new(fixture_inputs(), "", "1002003", "800123")
        .generate()
        .expect_err("blank name");
    assert!(matches!(
        err,
        SaldoError::BlankParameter {
            field: "Meno zákazníka"
        }
    ));

    let err = SaldoBuilder::new(fixture_inputs(), "Ján Novák", "   ", "800123")
        .generate()
        .expect_err("blank sap id");
    assert!(matches!(err, SaldoError::BlankParameter { field: "SAP ID" }));
}

#[test]
fn blank_company_falls_back_to_default() {
    let report = SaldoBuilder::new(fixture_inputs(), "Ján Novák", "1002003", "800123")
        .company("   ")
        .generate()
        .expect("generate report");
    assert_eq!(report.sheet.cell(3, 2), &Cell::Text("SWAN a.s.".to_string()));
}

#[test]
fn unknown_theme_falls_back_to_blue() {
    assert_eq!(Theme::from_name("neon"), Theme::Blue);
    assert_eq!(Theme::from_name(" WARM "), Theme::Warm);
    assert_eq!(Theme::from_name("gray"), Theme::Gray);

    let report = SaldoBuilder::new(fixture_inputs(), "Ján Novák", "1002003", "800123")
        .theme(Theme::from_name("hocičo"))
        .generate()
        .expect("generate report");
    assert_eq!(report.projection.theme, Theme::Blue);
    assert_eq!(report.projection.theme.palette().header, "#25B3AD");
}

#[test]
fn logo_container_is_sniffed_from_magic_bytes() {
    use saldo_report::{sniff_image, ImageKind};

    assert_eq!(
        sniff_image(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A]),
        Some(ImageKind::Png)
    );
    assert_eq!(sniff_image(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageKind::Jpeg));
    assert_eq!(sniff_image(b"GIF89a"), Some(ImageKind::Gif));
    assert_eq!(sniff_image(b"obycajny text"), None);
}
