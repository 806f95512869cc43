//! Prevodové tabuľky zostavené z pomocných zdrojov.
//!
//! Obe tabuľky vznikajú jedným usporiadaným prechodom cez dátové riadky
//! zdroja a ďalej sa nemenia; pri opakovanom kľúči platí posledný výskyt.

use crate::header::{HelperColumns, ReferenceColumns};
use crate::table::{Cell, Sheet};
use log::debug;
use std::collections::BTreeMap;

/// Známy prefix doplnkovej referencie, ktorý sa z hodnoty odstraňuje.
pub const REFERENCE_PREFIX: &str = "VBRK";

/// Prevod označenia pôvodu pohybu na typ dokladu.
///
/// Kľúčom je orezané textové označenie pôvodu; riadky s prázdnym alebo
/// netextovým označením do tabuľky neprispievajú. Hodnota sa ukladá
/// orezaná, netextová hodnota tak, ako je. Množina typov dokladov nie je
/// uzavretá, neznáme hodnoty prechádzajú bez zmeny.
#[derive(Debug, Clone, Default)]
pub struct DocTypeMap {
    map: BTreeMap<String, Cell>,
}

impl DocTypeMap {
    /// Zostaví tabuľku z dátových riadkov pomôcky.
    #[must_use]
    pub fn from_sheet(sheet: &Sheet, columns: &HelperColumns) -> Self {
        let mut map = BTreeMap::new();
        for row in sheet.header_row() + 1..=sheet.max_row() {
            let Some(origin) = sheet.cell(row, columns.origin).as_text() else {
                continue;
            };
            let origin = origin.trim();
            if origin.is_empty() {
                continue;
            }
            let value = match sheet.cell(row, columns.doc_type) {
                Cell::Text(s) => Cell::Text(s.trim().to_string()),
                other => other.clone(),
            };
            if map.insert(origin.to_string(), value).is_some() {
                debug!("duplicate origin code '{origin}', keeping the later row");
            }
        }
        Self { map }
    }

    /// Dohľadá typ dokladu k označeniu pôvodu. Textové kľúče sa pred
    /// porovnaním orezávajú, veľkosť písmen sa nezjednocuje.
    #[must_use]
    pub fn resolve(&self, origin: &Cell) -> Option<&Cell> {
        let key = origin.lookup_key()?;
        self.map.get(&key)
    }

    /// Počet záznamov v tabuľke.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Tabuľka bez jediného záznamu.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Prevod čísla dokladu na vyčistenú doplnkovú referenciu.
#[derive(Debug, Clone, Default)]
pub struct ReferenceMap {
    map: BTreeMap<String, String>,
}

impl ReferenceMap {
    /// Zostaví tabuľku z dátových riadkov väzieb. Riadky bez čísla
    /// dokladu sa preskakujú, hodnota referencie sa pred uložením
    /// vyčistí od prefixu [`REFERENCE_PREFIX`].
    #[must_use]
    pub fn from_sheet(sheet: &Sheet, columns: &ReferenceColumns) -> Self {
        let mut map = BTreeMap::new();
        for row in sheet.header_row() + 1..=sheet.max_row() {
            let Some(key) = sheet.cell(row, columns.document).lookup_key() else {
                continue;
            };
            let value = clean_reference(sheet.cell(row, columns.reference));
            map.insert(key, value);
        }
        Self { map }
    }

    /// Dohľadá referenciu k číslu dokladu. Hodnota môže byť prázdna,
    /// rozhodnutie čo s ňou necháva na volajúcom.
    #[must_use]
    pub fn resolve(&self, document: &Cell) -> Option<&str> {
        let key = document.lookup_key()?;
        self.map.get(&key).map(String::as_str)
    }

    /// Počet záznamov v tabuľke.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Tabuľka bez jediného záznamu.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Vyčistí hodnotu doplnkovej referencie: text sa oreže a prípadný
/// [`REFERENCE_PREFIX`] na začiatku (bez ohľadu na veľkosť písmen) sa
/// odstráni aj s medzerami za ním; netextová hodnota sa prepíše na text;
/// prázdna bunka dáva prázdny text.
fn clean_reference(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => {
            let trimmed = s.trim();
            if let Some(head) = trimmed.get(..REFERENCE_PREFIX.len())
                && head.eq_ignore_ascii_case(REFERENCE_PREFIX)
            {
                trimmed[REFERENCE_PREFIX.len()..].trim_start().to_string()
            } else {
                trimmed.to_string()
            }
        }
        Cell::Empty => String::new(),
        other => other.to_string(),
    }
}
