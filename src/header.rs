//! Hľadanie stĺpcov podľa textu hlavičky.
//!
//! Zdroje s pevnou hlavičkou (pohyby, väzby, pomôcka) sa hľadajú presne,
//! šablóna tolerantne cez [`crate::normalize`] — jej hlavička sa
//! historicky vyskytuje vo viacerých zneniach. Každý zdroj má vlastnú
//! typovanú sadu stĺpcov, ktorá sa zostaví raz a ďalej sa nemení.

use crate::error::SaldoError;
use crate::table::{Cell, Sheet};
use crate::utils::normalize;

/// Kanonické znenie hlavičky dátumu vystavenia v šablóne.
pub const ISSUED_HEADER: &str = "Dátum vystavenia / Pripísania platby";

/// Akceptované znenia hlavičky dátumu vystavenia, v poradí priority.
/// Posledné je staršie znenie `Dátum zadania`.
const ISSUED_CANDIDATES: &[&str] = &[
    ISSUED_HEADER,
    "Dátum vystavenia/Pripísania platby",
    "Dátum zadania",
];

/// Nájde stĺpec, ktorého bunka hlavičky sa po orezaní presne rovná
/// hľadanému názvu. Netextové bunky sa nezhodujú nikdy.
#[must_use]
pub fn find_exact(sheet: &Sheet, name: &str) -> Option<u32> {
    let header_row = sheet.header_row();
    (1..=sheet.max_col())
        .find(|&col| sheet.cell(header_row, col).as_text().map(str::trim) == Some(name))
}

/// Nájde stĺpec tolerantne: znenia sa skúšajú v zadanom poradí a bunka
/// hlavičky sa porovnáva po [`crate::normalize`] na oboch stranách.
/// Vracia prvú zhodu prvého úspešného znenia.
#[must_use]
pub fn find_normalized(sheet: &Sheet, candidates: &[&str]) -> Option<u32> {
    let header_row = sheet.header_row();
    for candidate in candidates {
        let target = normalize(candidate);
        for col in 1..=sheet.max_col() {
            if let Some(text) = sheet.cell(header_row, col).as_text()
                && normalize(text) == target
            {
                return Some(col);
            }
        }
    }
    None
}

/// Vráti pozíciu stĺpca alebo zaradí jeho názov medzi chýbajúce.
fn require(column: Option<u32>, name: &'static str, missing: &mut Vec<&'static str>) -> u32 {
    column.unwrap_or_else(|| {
        missing.push(name);
        0
    })
}

/// Pozície povinných stĺpcov šablóny salda.
#[derive(Debug, Clone)]
pub struct TemplateColumns {
    /// Číslo dokladu.
    pub document: u32,
    /// Číslo faktúry.
    pub invoice: u32,
    /// Dátum vystavenia / pripísania platby.
    pub issued: u32,
    /// Dátum účtovania.
    pub posted: u32,
    /// Splatnosť netto.
    pub due: u32,
    /// Typ dokladu.
    pub doc_type: u32,
    /// Čiastka.
    pub amount: u32,
    /// Zostatok.
    pub balance: u32,
    /// Stĺpce, ktorých záhlavie bolo prepísané na kanonické znenie a má
    /// sa vykresliť zalomené a centrované (rieši štýlovací kolaborant).
    pub wrapped: Vec<u32>,
}

impl TemplateColumns {
    /// Vyhľadá všetky povinné stĺpce šablóny tolerantným porovnaním.
    ///
    /// Keď sa niektoré nenájdu, zlyhá jedinou chybou s výčtom všetkých
    /// chýbajúcich názvov. Pri zhode so starším znením hlavičky dátumu
    /// vystavenia bunku prepíše na [`ISSUED_HEADER`] a stĺpec označí
    /// na zalomené zobrazenie.
    pub fn resolve(sheet: &mut Sheet) -> Result<Self, SaldoError> {
        let document = find_normalized(sheet, &["Číslo dokladu"]);
        let invoice = find_normalized(sheet, &["Číslo Faktúry"]);
        let issued = find_normalized(sheet, ISSUED_CANDIDATES);
        let posted = find_normalized(sheet, &["Dátum účtovania"]);
        let due = find_normalized(sheet, &["Splatnosť netto"]);
        let doc_type = find_normalized(sheet, &["Typ dokladu"]);
        let amount = find_normalized(sheet, &["Čiastka"]);
        let balance = find_normalized(sheet, &["Zostatok"]);

        let mut missing = Vec::new();
        let mut columns = Self {
            document: require(document, "Číslo dokladu", &mut missing),
            invoice: require(invoice, "Číslo Faktúry", &mut missing),
            issued: require(issued, ISSUED_HEADER, &mut missing),
            posted: require(posted, "Dátum účtovania", &mut missing),
            due: require(due, "Splatnosť netto", &mut missing),
            doc_type: require(doc_type, "Typ dokladu", &mut missing),
            amount: require(amount, "Čiastka", &mut missing),
            balance: require(balance, "Zostatok", &mut missing),
            wrapped: Vec::new(),
        };
        if !missing.is_empty() {
            return Err(SaldoError::MissingColumns {
                source_label: "šablóna",
                columns: missing,
            });
        }

        let header_row = sheet.header_row();
        if let Some(text) = sheet.cell(header_row, columns.issued).as_text()
            && text.trim() != ISSUED_HEADER
        {
            sheet.set_cell(
                header_row,
                columns.issued,
                Cell::Text(ISSUED_HEADER.to_string()),
            );
            columns.wrapped.push(columns.issued);
        }

        Ok(columns)
    }
}

/// Pozície stĺpcov zdroja pohybov. Hlavička pohybov sa berie ako príde:
/// chýbajúci stĺpec nie je chyba, do salda sa zaň zapíše prázdna bunka.
#[derive(Debug, Clone, Copy)]
pub struct MovementColumns {
    /// Číslo dokladu.
    pub document: Option<u32>,
    /// Dátum zadania (v pohyboch sa používa staršie znenie).
    pub issued: Option<u32>,
    /// Dátum účtovania.
    pub posted: Option<u32>,
    /// Splatnosť netto.
    pub due: Option<u32>,
    /// Označenie pôvodu.
    pub origin: Option<u32>,
    /// Čiastka.
    pub amount: Option<u32>,
}

impl MovementColumns {
    /// Vyhľadá stĺpce pohybov presným porovnaním.
    #[must_use]
    pub fn resolve(sheet: &Sheet) -> Self {
        Self {
            document: find_exact(sheet, "Číslo dokladu"),
            issued: find_exact(sheet, "Dátum zadania"),
            posted: find_exact(sheet, "Dátum účtovania"),
            due: find_exact(sheet, "Splatnosť netto"),
            origin: find_exact(sheet, "Označenie pôvodu"),
            amount: find_exact(sheet, "Čiastka"),
        }
    }
}

/// Pozície stĺpcov pomôcky (prevodová tabuľka označení pôvodu).
#[derive(Debug, Clone, Copy)]
pub struct HelperColumns {
    /// Označenie pôvodu.
    pub origin: u32,
    /// Typ dokladu.
    pub doc_type: u32,
}

impl HelperColumns {
    /// Vyhľadá oba povinné stĺpce pomôcky presným porovnaním.
    pub fn resolve(sheet: &Sheet) -> Result<Self, SaldoError> {
        let origin = find_exact(sheet, "Označenie pôvodu");
        let doc_type = find_exact(sheet, "Typ dokladu");

        let mut missing = Vec::new();
        let columns = Self {
            origin: require(origin, "Označenie pôvodu", &mut missing),
            doc_type: require(doc_type, "Typ dokladu", &mut missing),
        };
        if missing.is_empty() {
            Ok(columns)
        } else {
            Err(SaldoError::MissingColumns {
                source_label: "pomôcka",
                columns: missing,
            })
        }
    }
}

/// Pozície stĺpcov zdroja väzieb (doplnkové referencie k dokladom).
#[derive(Debug, Clone, Copy)]
pub struct ReferenceColumns {
    /// Číslo dokladu.
    pub document: u32,
    /// Doplnková referencia.
    pub reference: u32,
}

impl ReferenceColumns {
    /// Vyhľadá oba povinné stĺpce väzieb presným porovnaním.
    pub fn resolve(sheet: &Sheet) -> Result<Self, SaldoError> {
        let document = find_exact(sheet, "Číslo dokladu");
        let reference = find_exact(sheet, "Doplnková referencia");

        let mut missing = Vec::new();
        let columns = Self {
            document: require(document, "Číslo dokladu", &mut missing),
            reference: require(reference, "Doplnková referencia", &mut missing),
        };
        if missing.is_empty() {
            Ok(columns)
        } else {
            Err(SaldoError::MissingColumns {
                source_label: "väzby",
                columns: missing,
            })
        }
    }
}
