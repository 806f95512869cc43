//! Zostavenie saldokonta v dátovej oblasti šablóny.
//!
//! Dátová oblasť sa pri každom behu najprv celá odstráni a nanovo
//! prepíše z pohybov; nič sa neprikladá k starému obsahu.

use crate::header::{MovementColumns, TemplateColumns};
use crate::lookup::{DocTypeMap, ReferenceMap};
use crate::table::{Cell, Sheet};
use crate::utils::{column_letter, normalize};
use log::debug;

/// Jediný kanonický predikát faktúry: bunka typu dokladu je textová
/// a po normalizácii sa rovná norme slova `Faktúra`.
pub(crate) fn is_invoice(value: &Cell) -> bool {
    value.as_text().is_some_and(|text| normalize(text) == "faktura")
}

/// Prepíše dátovú oblasť šablóny riadkami pohybov v ich poradí.
///
/// Prázdne riadky pohybov sa potichu preskakujú a kurzor zápisu sa za ne
/// neposúva. Typ dokladu sa dopĺňa z prevodovej tabuľky; nenamapované
/// označenie pôvodu necháva typ prázdny. Splatnosť netto sa prenáša len
/// pri faktúrach. Vracia počet zapísaných riadkov.
pub(crate) fn populate(
    template: &mut Sheet,
    columns: &TemplateColumns,
    movements: &Sheet,
    movement_columns: &MovementColumns,
    doc_types: &DocTypeMap,
) -> u32 {
    let header_row = template.header_row();
    template.truncate_after(header_row);

    let mut write_row = header_row + 1;
    for row in movements.header_row() + 1..=movements.max_row() {
        if movements.row_is_blank(row) {
            debug!("skipping blank movement row {row}");
            continue;
        }
        let fetch = |column: Option<u32>| -> Cell {
            column.map_or(Cell::Empty, |col| movements.cell(row, col).clone())
        };

        let origin = fetch(movement_columns.origin);
        let doc_type = doc_types.resolve(&origin).cloned();
        if doc_type.is_none() && !origin.is_blank() {
            debug!("unmapped origin code in movement row {row}");
        }
        let doc_type = doc_type.unwrap_or(Cell::Empty);

        let due = if is_invoice(&doc_type) {
            fetch(movement_columns.due)
        } else {
            Cell::Empty
        };

        template.set_cell(write_row, columns.document, fetch(movement_columns.document));
        template.set_cell(write_row, columns.issued, fetch(movement_columns.issued));
        template.set_cell(write_row, columns.posted, fetch(movement_columns.posted));
        template.set_cell(write_row, columns.due, due);
        template.set_cell(write_row, columns.doc_type, doc_type);
        template.set_cell(write_row, columns.amount, fetch(movement_columns.amount));
        write_row += 1;
    }
    write_row - header_row - 1
}

/// Nájde posledný dátový riadok podľa stĺpca čísla dokladu: prechádza od
/// prvého dátového riadku nadol a drží si posledný neprázdny. Riadky pod
/// ním sú mimo rozsahu, aj keby inde obsahovali hodnoty.
pub(crate) fn last_data_row(sheet: &Sheet, key_column: u32) -> u32 {
    let header_row = sheet.header_row();
    let mut last = header_row;
    for row in header_row + 1..=sheet.max_row() {
        if !sheet.cell(row, key_column).is_blank() {
            last = row;
        }
    }
    last
}

/// Zapíše do stĺpca zostatku reťazené vzorce priebežného súčtu:
/// prvý riadok odkazuje na vlastnú čiastku, každý ďalší na zostatok
/// predchádzajúceho riadku plus vlastnú čiastku. Prepočet v tabuľkovom
/// procesore tak dá rovnaké číslo ako priamy súčet čiastok.
pub(crate) fn write_balances(sheet: &mut Sheet, columns: &TemplateColumns, last_row: u32) {
    let first = sheet.header_row() + 1;
    let amount = column_letter(columns.amount);
    let balance = column_letter(columns.balance);
    for row in first..=last_row {
        let formula = if row == first {
            format!("={amount}{row}")
        } else {
            format!("={balance}{}+{amount}{row}", row - 1)
        };
        sheet.set_cell(row, columns.balance, Cell::Formula(formula));
    }
}

/// Dva riadky pod posledným dátovým riadkom zapíše súčtový vzorec
/// celkového zostatku a popisok `Celkový zostatok:` o stĺpec vľavo.
/// Bez dátových riadkov sa nezapisuje nič. Vracia riadok súčtu.
pub(crate) fn write_total_summary(
    sheet: &mut Sheet,
    columns: &TemplateColumns,
    last_row: u32,
) -> Option<u32> {
    let first = sheet.header_row() + 1;
    if last_row < first {
        return None;
    }
    let summary_row = last_row + 2;
    let balance = column_letter(columns.balance);
    sheet.set_cell(
        summary_row,
        columns.balance,
        Cell::Formula(format!("=SUM({balance}{first}:{balance}{last_row})")),
    );
    if columns.balance > 1 {
        sheet.set_cell(
            summary_row,
            columns.balance - 1,
            Cell::Text("Celkový zostatok:".to_string()),
        );
    }
    Some(summary_row)
}

/// Doplní čísla faktúr z tabuľky referencií. Riadok s typom faktúry
/// dostane dohľadanú neprázdnu referenciu, inak sa bunka vyprázdni;
/// mimo faktúr sa bunka vyprázdňuje vždy.
pub(crate) fn annotate_references(
    sheet: &mut Sheet,
    columns: &TemplateColumns,
    last_row: u32,
    references: &ReferenceMap,
) {
    for row in sheet.header_row() + 1..=last_row {
        let value = if is_invoice(sheet.cell(row, columns.doc_type)) {
            references
                .resolve(sheet.cell(row, columns.document))
                .filter(|reference| !reference.is_empty())
                .map_or(Cell::Empty, |reference| Cell::Text(reference.to_string()))
        } else {
            Cell::Empty
        };
        sheet.set_cell(row, columns.invoice, value);
    }
}
