//! Projekcia hotového saldokonta na zobraziteľné riadky.
//!
//! Dátumy a čiastky prichádzajú zo zdrojov v rôznych podobách (hotové
//! hodnoty, dátumové seriály, texty s časom alebo čiarkou); projekcia ich
//! mäkko typuje a formátuje. Nečitateľná hodnota sa zobrazí prázdna,
//! nikdy nezhadzuje beh.

use crate::header::TemplateColumns;
use crate::ledger::is_invoice;
use crate::table::{Cell, Sheet};
use crate::types::{LedgerRow, Money, ProjectedReport, ReportRow, Theme};
use crate::utils::date_from_serial;
use log::debug;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use std::sync::LazyLock;

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,4})-(\d{1,2})-(\d{1,2})$").expect("valid date regex"));

/// Načíta dátové riadky šablóny do typovaných záznamov a priebežne
/// sčítava zostatok. Zostatok sa počíta vždy odznova z čiastok, vzorce
/// v stĺpci zostatku sa nečítajú.
pub(crate) fn read_ledger(
    sheet: &Sheet,
    columns: &TemplateColumns,
    last_row: u32,
) -> Vec<LedgerRow> {
    let mut rows = Vec::new();
    let mut running = Decimal::ZERO;
    for row in sheet.header_row() + 1..=last_row {
        let amount_cell = sheet.cell(row, columns.amount);
        let amount = parse_amount(amount_cell);
        if amount.is_none() && !amount_cell.is_blank() {
            debug!("amount in ledger row {row} is not numeric, shown blank");
        }
        running += amount.unwrap_or(Decimal::ZERO);
        rows.push(LedgerRow {
            document: sheet.cell(row, columns.document).clone(),
            invoice: sheet.cell(row, columns.invoice).clone(),
            issued: sheet.cell(row, columns.issued).clone(),
            posted: sheet.cell(row, columns.posted).clone(),
            due: sheet.cell(row, columns.due).clone(),
            doc_type: sheet.cell(row, columns.doc_type).clone(),
            amount,
            balance: running,
        });
    }
    rows
}

/// Premietne saldokonto na zobraziteľné riadky. Celkový zostatok je
/// priebežný zostatok posledného riadku, žiadny nový súčet sa nerobí.
pub(crate) fn project(ledger: &[LedgerRow], theme: Theme) -> ProjectedReport {
    let total = format_money(ledger.last().map_or(Decimal::ZERO, |row| row.balance));
    let rows = ledger.iter().map(project_row).collect();
    ProjectedReport { rows, total, theme }
}

/// Sformátuje jeden riadok. Číslo faktúry a splatnosť sa zobrazujú len
/// pri faktúrach, aj keby bunky hodnoty obsahovali.
fn project_row(row: &LedgerRow) -> ReportRow {
    let invoice_row = is_invoice(&row.doc_type);
    ReportRow {
        document: row.document.to_string(),
        invoice: if invoice_row {
            row.invoice.to_string()
        } else {
            String::new()
        },
        issued: format_date(&row.issued),
        posted: format_date(&row.posted),
        due: if invoice_row {
            format_date(&row.due)
        } else {
            String::new()
        },
        doc_type: row.doc_type.to_string(),
        amount: row.amount.map_or_else(String::new, format_money),
        balance: format_money(row.balance),
    }
}

/// Sformátuje dátumovú bunku do tvaru `d.m.Y`. Hotový dátum sa formátuje
/// priamo, číslo sa berie ako tabuľkový seriál, text sa odreže pri prvej
/// medzere (zahodí sa čas) a prípadný tvar rok-mesiac-deň sa preusporiada;
/// iný text prechádza bez zmeny.
pub(crate) fn format_date(cell: &Cell) -> String {
    match cell {
        Cell::Date(date) => date.format("%d.%m.%Y").to_string(),
        Cell::Number(serial) => serial
            .trunc()
            .to_i64()
            .and_then(date_from_serial)
            .map_or_else(String::new, |date| date.format("%d.%m.%Y").to_string()),
        Cell::Text(s) => format_date_text(s),
        Cell::Empty | Cell::Formula(_) => String::new(),
    }
}

fn format_date_text(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    let value = value.split(' ').next().unwrap_or(value);
    ISO_DATE_RE.captures(value).map_or_else(
        || value.to_string(),
        |caps| format!("{}.{}.{}", &caps[3], &caps[2], &caps[1]),
    )
}

/// Mäkko prečíta čiastku: z textu odstráni medzery (aj nezalomiteľné)
/// a znamienko plus, čiarku nahradí bodkou. Nečíselný výsledok je `None`.
pub(crate) fn parse_amount(cell: &Cell) -> Option<Money> {
    match cell {
        Cell::Number(n) => Some(*n),
        Cell::Text(s) => {
            let normalized: String = s
                .chars()
                .filter(|ch| !matches!(*ch, ' ' | '\u{a0}' | '\u{202f}' | '+'))
                .map(|ch| if ch == ',' { '.' } else { ch })
                .collect();
            if normalized.is_empty() {
                None
            } else {
                Decimal::from_str(&normalized).ok()
            }
        }
        Cell::Empty | Cell::Date(_) | Cell::Formula(_) => None,
    }
}

/// Sformátuje čiastku do tvaru `1 234,56 €`: zaokrúhlenie na dve
/// desatinné miesta od nuly, tisíce oddelené medzerou, desatinná čiarka
/// a nezalomiteľná medzera pred znakom meny.
pub(crate) fn format_money(value: Money) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut fraction = frac_part.to_string();
    fraction.truncate(2);
    while fraction.len() < 2 {
        fraction.push('0');
    }

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(text.len() + 4);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(char::from(*digit));
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped},{fraction}\u{a0}€")
}
